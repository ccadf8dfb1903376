//! Fixed-point alpha compositing.

use crate::{
    errors::NotSupportedError,
    format::{BlendMode, Color},
};

/// Multiplies two 8-bit values as fractions of 255, rounding to nearest.
#[must_use]
pub fn mul8(a: u8, b: u8) -> u8 {
    let t = u32::from(a) * u32::from(b) + 0x80;
    let product = ((t >> 8) + t) >> 8;
    u8::try_from(product).unwrap_or(u8::MAX)
}

/// The blend operators the compositor can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendOp {
    Normal,
    Multiply,
    Screen,
    Addition,
    Subtract,
}

impl BlendOp {
    /// Selects the operator for a layer's blend mode.
    ///
    /// Modes without an operator are an error rather than falling back to
    /// [`BlendOp::Normal`].
    pub fn for_mode(mode: BlendMode) -> Result<Self, NotSupportedError> {
        match mode {
            BlendMode::Normal => Ok(Self::Normal),
            BlendMode::Multiply => Ok(Self::Multiply),
            BlendMode::Screen => Ok(Self::Screen),
            BlendMode::Addition => Ok(Self::Addition),
            BlendMode::Subtraction => Ok(Self::Subtract),
            other => Err(NotSupportedError::BlendMode(other)),
        }
    }

    /// Blends `source` over `backdrop` at the given opacity.
    #[must_use]
    pub fn apply(self, backdrop: Color, source: Color, opacity: u8) -> Color {
        let source = match self {
            Self::Normal => source,
            Self::Multiply => map_channels(backdrop, source, mul8),
            Self::Screen => map_channels(backdrop, source, |b, s| {
                let sum = u16::from(b) + u16::from(s) - u16::from(mul8(b, s));
                u8::try_from(sum).unwrap_or(u8::MAX)
            }),
            Self::Addition => map_channels(backdrop, source, u8::saturating_add),
            Self::Subtract => map_channels(backdrop, source, u8::saturating_sub),
        };
        blend_normal(backdrop, source, opacity)
    }
}

/// Combines each color channel of `backdrop` and `source`, keeping the
/// source alpha.
fn map_channels(backdrop: Color, source: Color, op: impl Fn(u8, u8) -> u8) -> Color {
    Color::from_rgba(
        op(backdrop.red(), source.red()),
        op(backdrop.green(), source.green()),
        op(backdrop.blue(), source.blue()),
        source.alpha(),
    )
}

/// Source-over compositing with straight (non-premultiplied) alpha.
#[must_use]
pub fn blend_normal(backdrop: Color, source: Color, opacity: u8) -> Color {
    if backdrop.alpha() == 0 {
        return Color::from_rgba(
            source.red(),
            source.green(),
            source.blue(),
            mul8(source.alpha(), opacity),
        );
    }
    if source.alpha() == 0 {
        return backdrop;
    }

    let source_alpha = mul8(source.alpha(), opacity);
    let result_alpha = i32::from(source_alpha) + i32::from(backdrop.alpha())
        - i32::from(mul8(backdrop.alpha(), source_alpha));

    // `source_alpha <= result_alpha`, so each result lies between the two
    // input channels.
    let channel = |b: u8, s: u8| {
        let b = i32::from(b);
        let value = b + (i32::from(s) - b) * i32::from(source_alpha) / result_alpha;
        u8::try_from(value).unwrap_or(u8::MAX)
    };

    Color::from_rgba(
        channel(backdrop.red(), source.red()),
        channel(backdrop.green(), source.green()),
        channel(backdrop.blue(), source.blue()),
        u8::try_from(result_alpha).unwrap_or(u8::MAX),
    )
}
