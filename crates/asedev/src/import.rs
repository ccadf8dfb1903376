//! The end-to-end import: decode a file, flatten its layer groups into named
//! textures and optionally cut a sheet into quads.

use serde::{Deserialize, Serialize};

use crate::{
    compose::{ExclusionRules, Raster, build_groups, composite_group},
    errors::{NotSupportedError, Result},
    format::{AsepriteFile, ColorDepth, Header},
    sheet::{Quad, build_quads},
    utils::mem_reader::SliceMemReader,
};

/// User-configurable import behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ImportSettings {
    /// Layers whose names start with any of these are dropped, together with
    /// everything nested under them.
    pub ignore_prefixes: Vec<String>,
    /// Marks a group as linear (not sRGB). Stripped from the texture name.
    pub linear_prefix: String,
    /// Group names containing any of these (ignoring case) are also linear.
    pub linear_keywords: Vec<String>,
    pub generate_quads: bool,
    /// World units per pixel for generated quads.
    pub quad_scale: f32,
    /// Quads are cut from the first group whose name contains this, ignoring
    /// case.
    pub quad_source_keyword: String,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            ignore_prefixes: vec!["@".to_owned(), ".".to_owned()],
            linear_prefix: "#".to_owned(),
            linear_keywords: Vec::new(),
            generate_quads: false,
            quad_scale: 1.0,
            quad_source_keyword: "color".to_owned(),
        }
    }
}

/// One flattened layer group.
#[derive(Debug, Clone)]
pub struct Texture {
    name: String,
    group_name: String,
    linear: bool,
    raster: Raster,
}

impl Texture {
    /// `"{base}_{group}"`, with any linear prefix removed from the group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name of the top-level layer the texture was built from, as stored
    /// in the file.
    #[must_use]
    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    /// Whether the texture holds linear data rather than sRGB color.
    #[must_use]
    pub fn is_linear(&self) -> bool {
        self.linear
    }

    #[must_use]
    pub fn raster(&self) -> &Raster {
        &self.raster
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImportOutput {
    textures: Vec<Texture>,
    quads: Vec<Quad>,
}

impl ImportOutput {
    /// Textures in layer order, bottom-most group first.
    #[must_use]
    pub fn textures(&self) -> &[Texture] {
        &self.textures
    }

    #[must_use]
    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }
}

/// Rejects files using features the compositor cannot reproduce.
pub fn check_supported(header: &Header) -> Result<(), NotSupportedError> {
    let (pixel_width, pixel_height) = header.pixel_ratio();
    if pixel_width != pixel_height {
        return Err(NotSupportedError::PixelAspect {
            width: pixel_width,
            height: pixel_height,
        });
    }
    if header.color_depth() != ColorDepth::Rgba {
        return Err(NotSupportedError::ColorDepth(header.color_depth()));
    }
    if header.frame_count() > 1 {
        return Err(NotSupportedError::MultipleFrames(header.frame_count()));
    }
    Ok(())
}

/// Decodes `data` and imports it. See [`import_file`].
///
/// The header is checked against [`check_supported`] before any frame is
/// decoded, so an animation is reported as having multiple frames rather than
/// failing on whatever its later frames contain.
pub fn import(data: &[u8], base_name: &str, settings: &ImportSettings) -> Result<ImportOutput> {
    check_supported(&Header::read(&mut SliceMemReader::new(data))?)?;
    let file = AsepriteFile::from_bytes(data)?;
    import_file(&file, base_name, settings)
}

/// Flattens every layer group of a decoded file into a texture named after
/// `base_name`, then builds quads if the settings ask for them.
pub fn import_file(
    file: &AsepriteFile,
    base_name: &str,
    settings: &ImportSettings,
) -> Result<ImportOutput> {
    let header = file.header();
    check_supported(header)?;

    let Some(frame) = file.frames().first() else {
        log::warn!("{base_name}: file has no frames");
        return Ok(ImportOutput::default());
    };

    let rules = ExclusionRules::new(&settings.ignore_prefixes);
    let textures = build_groups(frame, &rules)?
        .iter()
        .map(|group| -> Result<Texture> {
            let raster = composite_group(group, header)?;
            let (name, linear) = texture_name(base_name, group.name(), settings);
            log::debug!("Built texture {name:?} (linear: {linear})");
            Ok(Texture {
                name,
                group_name: group.name().to_owned(),
                linear,
                raster,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let quads = if settings.generate_quads {
        match quad_source(&textures, &settings.quad_source_keyword) {
            Some(texture) => build_quads(texture.raster(), base_name, settings.quad_scale),
            None => {
                log::warn!(
                    "{base_name}: no group name contains {:?}, skipping quad generation",
                    settings.quad_source_keyword
                );
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    Ok(ImportOutput { textures, quads })
}

/// Returns the texture name for a group and whether it is linear.
fn texture_name(base_name: &str, group_name: &str, settings: &ImportSettings) -> (String, bool) {
    let stripped = Some(settings.linear_prefix.as_str())
        .filter(|prefix| !prefix.is_empty())
        .and_then(|prefix| group_name.strip_prefix(prefix));
    let lower = group_name.to_lowercase();
    let has_keyword = settings
        .linear_keywords
        .iter()
        .any(|keyword| !keyword.is_empty() && lower.contains(&keyword.to_lowercase()));

    let name = stripped.unwrap_or(group_name);
    (format!("{base_name}_{name}"), stripped.is_some() || has_keyword)
}

fn quad_source<'a>(textures: &'a [Texture], keyword: &str) -> Option<&'a Texture> {
    let keyword = keyword.to_lowercase();
    textures
        .iter()
        .find(|texture| texture.group_name.to_lowercase().contains(&keyword))
}
