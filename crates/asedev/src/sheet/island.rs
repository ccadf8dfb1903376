/// The bounding box of one connected region, in grid coordinates (row 0 at
/// the top). Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IslandRect {
    min_x: u16,
    min_y: u16,
    max_x: u16,
    max_y: u16,
}

impl IslandRect {
    /// A rectangle covering the single cell `(x, y)`.
    #[must_use]
    pub fn new(x: u16, y: u16) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Grows the rectangle to include `(x, y)`.
    pub fn add_pixel(&mut self, x: u16, y: u16) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    #[must_use]
    pub fn min_x(&self) -> u16 {
        self.min_x
    }

    #[must_use]
    pub fn min_y(&self) -> u16 {
        self.min_y
    }

    #[must_use]
    pub fn max_x(&self) -> u16 {
        self.max_x
    }

    #[must_use]
    pub fn max_y(&self) -> u16 {
        self.max_y
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.max_x - self.min_x + 1
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.max_y - self.min_y + 1
    }
}
