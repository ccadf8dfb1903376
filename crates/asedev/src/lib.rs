//! Decoding of Aseprite sprite files and flattening of their layer groups
//! into RGBA textures, with optional slicing of a sprite sheet into quads.
//!
//! The usual entry point is [`import::import`], which runs the whole pipeline.
//! The individual stages are exposed for tools that need only part of it:
//!
//! - [`format`] decodes the binary file,
//! - [`compose`] groups layers and blends them onto canvases,
//! - [`sheet`] finds opaque islands in a raster and builds quads for them.

pub mod compose;
pub mod errors;
pub mod format;
pub mod icon;
pub mod import;
pub mod sheet;
pub mod utils;

pub use self::errors::{Error, FormatError, NotSupportedError, Result};
