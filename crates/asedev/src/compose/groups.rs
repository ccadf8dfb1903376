//! Partitioning of a frame's layer tree into independently flattened groups.
//!
//! Every surviving top-level layer starts a new group; its descendants that
//! survive exclusion are drawn into the same group. The tree is never built
//! explicitly: layers are visited in file order, carrying only the depth of
//! the most recent excluded layer.

use crate::{
    errors::FormatError,
    format::{CelChunk, Frame, LayerChunk},
};

/// Why a layer was left out of every group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionReason {
    Reference,
    IgnoredPrefix,
    Hidden,
}

/// Decides which layers are individually excluded.
#[derive(Debug, Clone)]
pub struct ExclusionRules<'a> {
    ignore_prefixes: &'a [String],
}

impl<'a> ExclusionRules<'a> {
    #[must_use]
    pub fn new(ignore_prefixes: &'a [String]) -> Self {
        Self { ignore_prefixes }
    }

    /// Returns why `layer` is excluded, or `None` if it is kept.
    ///
    /// Hidden layers are only excluded below the top level; a hidden
    /// top-level layer still produces its own group.
    #[must_use]
    pub fn exclusion_reason(&self, layer: &LayerChunk) -> Option<ExclusionReason> {
        if layer.is_reference() {
            Some(ExclusionReason::Reference)
        } else if self
            .ignore_prefixes
            .iter()
            .any(|prefix| layer.name().starts_with(prefix.as_str()))
        {
            Some(ExclusionReason::IgnoredPrefix)
        } else if !layer.is_visible() && layer.child_level() != 0 {
            Some(ExclusionReason::Hidden)
        } else {
            None
        }
    }
}

/// The layers flattened into one output raster, in draw order.
#[derive(Debug, Clone)]
pub struct TextureGroup<'a> {
    name: &'a str,
    members: Vec<(&'a CelChunk, &'a LayerChunk)>,
}

impl<'a> TextureGroup<'a> {
    /// The name of the top-level layer that opened this group.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Cels paired with their layers, bottom-most first.
    #[must_use]
    pub fn members(&self) -> &[(&'a CelChunk, &'a LayerChunk)] {
        &self.members
    }
}

/// Indexes the frame's cels by layer index.
fn cels_by_layer(frame: &Frame) -> Result<Vec<Option<&CelChunk>>, FormatError> {
    let layer_count = frame.layers().len();
    let mut lookup = vec![None; layer_count];
    for cel in frame.cels() {
        let slot = lookup
            .get_mut(usize::from(cel.layer_index()))
            .ok_or(FormatError::CelLayerOutOfRange {
                layer_index: cel.layer_index(),
                layer_count,
            })?;
        *slot = Some(cel);
    }
    Ok(lookup)
}

/// Groups the frame's layers by top-level ancestor, dropping excluded layers
/// together with all of their descendants.
pub fn build_groups<'a>(
    frame: &'a Frame,
    rules: &ExclusionRules<'_>,
) -> Result<Vec<TextureGroup<'a>>, FormatError> {
    let cels = cels_by_layer(frame)?;

    let mut groups = Vec::new();
    let mut current: Option<TextureGroup<'a>> = None;
    // `None` means no exclusion is active.
    let mut last_excluded_depth: Option<u16> = None;

    for (layer, cel) in frame.layers().iter().zip(cels) {
        let depth = layer.child_level();

        if let Some(excluded_depth) = last_excluded_depth
            && depth > excluded_depth
        {
            log::debug!("Skipping layer {:?}: ancestor is excluded", layer.name());
            continue;
        }

        if let Some(reason) = rules.exclusion_reason(layer) {
            log::debug!("Excluding layer {:?}: {reason:?}", layer.name());
            last_excluded_depth = Some(depth);
            continue;
        }
        last_excluded_depth = None;

        if depth == 0 {
            groups.extend(current.take());
            current = Some(TextureGroup {
                name: layer.name(),
                members: Vec::new(),
            });
        }

        let Some(group) = current.as_mut() else {
            return Err(FormatError::OrphanLayer {
                name: layer.name().to_owned(),
                child_level: depth,
            });
        };
        if let Some(cel) = cel {
            group.members.push((cel, layer));
        }
    }
    groups.extend(current);

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{Color, LayerFlags};

    fn layer(name: &str, depth: u16) -> LayerChunk {
        LayerChunk::new(name, depth, LayerFlags::VISIBLE)
    }

    fn hidden(name: &str, depth: u16) -> LayerChunk {
        LayerChunk::new(name, depth, LayerFlags::empty())
    }

    fn cel(layer_index: u16) -> CelChunk {
        CelChunk::from_colors(layer_index, (0, 0), 255, (1, 1), &[Color::TRANSPARENT])
    }

    /// A frame where every layer has a cel.
    fn frame(layers: Vec<LayerChunk>) -> Frame {
        let count = u16::try_from(layers.len()).unwrap();
        Frame::from_parts(layers, (0..count).map(cel).collect())
    }

    fn default_prefixes() -> Vec<String> {
        vec!["@".to_owned(), ".".to_owned()]
    }

    fn summarize(groups: &[TextureGroup<'_>]) -> Vec<(String, Vec<String>)> {
        groups
            .iter()
            .map(|group| {
                (
                    group.name().to_owned(),
                    group
                        .members()
                        .iter()
                        .map(|(_, layer)| layer.name().to_owned())
                        .collect(),
                )
            })
            .collect()
    }

    fn group(name: &str, members: &[&str]) -> (String, Vec<String>) {
        (
            name.to_owned(),
            members.iter().map(|&member| member.to_owned()).collect(),
        )
    }

    #[test]
    fn one_group_per_top_level_layer() {
        let frame = frame(vec![
            layer("Color", 0),
            layer("Shade", 1),
            layer("Normal", 0),
        ]);
        let prefixes = default_prefixes();
        let groups = build_groups(&frame, &ExclusionRules::new(&prefixes)).unwrap();
        assert_eq!(
            summarize(&groups),
            [
                group("Color", &["Color", "Shade"]),
                group("Normal", &["Normal"])
            ]
        );
    }

    #[test]
    fn excluded_layers_drop_their_descendants() {
        let frame = frame(vec![
            layer("Color", 0),
            layer("@notes", 1),
            layer("note text", 2),
            layer("note arrow", 3),
            layer("Detail", 1),
            layer(".scratch", 0),
            layer("scratch child", 1),
            layer("Mask", 0),
        ]);
        let prefixes = default_prefixes();
        let groups = build_groups(&frame, &ExclusionRules::new(&prefixes)).unwrap();
        assert_eq!(
            summarize(&groups),
            [group("Color", &["Color", "Detail"]), group("Mask", &["Mask"])]
        );
    }

    #[test]
    fn hidden_top_level_layer_still_forms_group() {
        let frame = frame(vec![
            hidden("Hidden", 0),
            layer("Child", 1),
            hidden("Hidden child", 1),
            layer("Grandchild", 2),
        ]);
        let groups = build_groups(&frame, &ExclusionRules::new(&[])).unwrap();
        assert_eq!(summarize(&groups), [group("Hidden", &["Hidden", "Child"])]);
    }

    #[test]
    fn reference_layers_are_excluded() {
        let frame = frame(vec![
            LayerChunk::new("Reference", 0, LayerFlags::VISIBLE | LayerFlags::REFERENCE_LAYER),
            layer("Inside reference", 1),
            layer("Art", 0),
        ]);
        let groups = build_groups(&frame, &ExclusionRules::new(&[])).unwrap();
        assert_eq!(summarize(&groups), [group("Art", &["Art"])]);
    }

    #[test]
    fn layers_without_cels_open_groups_but_add_no_members() {
        let frame = Frame::from_parts(
            vec![layer("Group", 0), layer("Empty", 1), layer("Filled", 1)],
            vec![cel(2)],
        );
        let groups = build_groups(&frame, &ExclusionRules::new(&[])).unwrap();
        assert_eq!(summarize(&groups), [group("Group", &["Filled"])]);
    }

    #[test]
    fn members_keep_draw_order() {
        let frame = frame(vec![
            layer("Top", 0),
            layer("b", 1),
            layer("c", 2),
            layer("d", 1),
        ]);
        let groups = build_groups(&frame, &ExclusionRules::new(&[])).unwrap();
        let indices: Vec<_> = groups[0]
            .members()
            .iter()
            .map(|(cel, _)| cel.layer_index())
            .collect();
        assert_eq!(indices, [0, 1, 2, 3]);
    }

    #[test]
    fn exclusion_reasons() {
        let prefixes = default_prefixes();
        let rules = ExclusionRules::new(&prefixes);
        assert_eq!(rules.exclusion_reason(&layer("Color", 0)), None);
        assert_eq!(rules.exclusion_reason(&hidden("Color", 0)), None);
        assert_eq!(
            rules.exclusion_reason(&hidden("Color", 1)),
            Some(ExclusionReason::Hidden)
        );
        assert_eq!(
            rules.exclusion_reason(&layer("@guide", 0)),
            Some(ExclusionReason::IgnoredPrefix)
        );
    }

    #[test]
    fn cel_for_missing_layer_is_an_error() {
        let frame = Frame::from_parts(vec![layer("Only", 0)], vec![cel(4)]);
        assert!(matches!(
            build_groups(&frame, &ExclusionRules::new(&[])),
            Err(FormatError::CelLayerOutOfRange {
                layer_index: 4,
                layer_count: 1
            })
        ));
    }

    #[test]
    fn child_before_any_top_level_layer_is_an_error() {
        let frame = frame(vec![layer("Stray", 1), layer("Top", 0)]);
        assert!(matches!(
            build_groups(&frame, &ExclusionRules::new(&[])),
            Err(FormatError::OrphanLayer { child_level: 1, .. })
        ));
    }

    #[test]
    fn empty_frame_has_no_groups() {
        let frame = Frame::default();
        let groups = build_groups(&frame, &ExclusionRules::new(&[])).unwrap();
        assert!(groups.is_empty());
    }
}
