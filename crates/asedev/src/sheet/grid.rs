use crate::{compose::Raster, sheet::IslandRect};

/// Occupancy state of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Full,
    /// Full, and already assigned to an island.
    Visited,
}

/// Per-pixel occupancy of a raster, row 0 at the top.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl OccupancyGrid {
    /// Marks every pixel with non-zero alpha as [`Cell::Full`], flipping the
    /// raster's bottom-up rows so that row 0 is the top.
    #[must_use]
    pub fn from_raster(raster: &Raster) -> Self {
        let (width, height) = (raster.width(), raster.height());
        Self::from_fn(width, height, |x, y| {
            raster
                .pixel(x, height - 1 - y)
                .is_some_and(|color| color.alpha() > 0)
        })
    }

    /// Builds a grid from a predicate telling whether `(x, y)` is occupied.
    #[must_use]
    pub fn from_fn(width: u16, height: u16, mut is_full: impl FnMut(u16, u16) -> bool) -> Self {
        let mut cells = Vec::with_capacity(usize::from(width) * usize::from(height));
        for y in 0..height {
            for x in 0..width {
                cells.push(if is_full(x, y) { Cell::Full } else { Cell::Empty });
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[must_use]
    pub fn cell(&self, x: u16, y: u16) -> Option<Cell> {
        (x < self.width && y < self.height).then(|| self.cells[self.index(x, y)])
    }

    fn index(&self, x: u16, y: u16) -> usize {
        usize::from(y) * usize::from(self.width) + usize::from(x)
    }

    /// Finds the bounding box of every 8-connected region of full cells, in
    /// row-major order of each region's first cell.
    #[must_use]
    pub fn into_islands(mut self) -> Vec<IslandRect> {
        let mut islands = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.cells[self.index(x, y)] == Cell::Full {
                    let (rect, _) = self.flood_fill(x, y);
                    islands.push(rect);
                }
            }
        }
        islands
    }

    /// Visits the region containing `(x, y)` with an explicit stack.
    ///
    /// Cells are marked visited as they are pushed, so each cell of the region
    /// enters the stack exactly once. Returns the bounds and the number of
    /// cells in the region.
    fn flood_fill(&mut self, x: u16, y: u16) -> (IslandRect, usize) {
        let mut rect = IslandRect::new(x, y);
        let mut stack = vec![(x, y)];
        let mut pushed = 1;
        let start = self.index(x, y);
        self.cells[start] = Cell::Visited;

        while let Some((x, y)) = stack.pop() {
            rect.add_pixel(x, y);

            let (min_x, max_x) = (x.saturating_sub(1), (x + 1).min(self.width - 1));
            let (min_y, max_y) = (y.saturating_sub(1), (y + 1).min(self.height - 1));
            for ny in min_y..=max_y {
                for nx in min_x..=max_x {
                    let index = self.index(nx, ny);
                    if self.cells[index] == Cell::Full {
                        self.cells[index] = Cell::Visited;
                        stack.push((nx, ny));
                        pushed += 1;
                    }
                }
            }
        }

        (rect, pushed)
    }
}
