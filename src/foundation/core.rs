use crate::foundation::error::{ShapeClipError, ShapeClipResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Straight-alpha RGBA8 color (r,g,b not multiplied by a).
///
/// Deserializes from `{"r", "g", "b", "a"}` or a `#rrggbb` / `#rrggbbaa` string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black, the default border color.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    /// Build a color from straight-alpha channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Return `true` when the color has zero alpha.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Scale alpha by `opacity` in `[0, 1]`, rounding to nearest.
    pub fn with_opacity(self, opacity: f32) -> Self {
        let o = opacity.clamp(0.0, 1.0);
        let a = (f32::from(self.a) * o).round().clamp(0.0, 255.0) as u8;
        Self { a, ..self }
    }

    /// Lowercase `#rrggbbaa` rendering of the raw channels.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> ShapeClipResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        let channel = |i: usize| -> ShapeClipResult<u8> {
            hex.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .ok_or_else(|| ShapeClipError::validation(format!("invalid hex color '{s}'")))
        };
        match hex.len() {
            6 => Ok(Self::opaque(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(ShapeClipError::validation(format!(
                "invalid hex color '{s}'"
            ))),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Obj {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "opaque_alpha")]
                a: u8,
            },
        }

        fn opaque_alpha() -> u8 {
            255
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Self::from_hex(&s).map_err(serde::de::Error::custom),
            Repr::Obj { r, g, b, a } => Ok(Self::new(r, g, b, a)),
        }
    }
}

/// Requested output size, or the sentinel asking for the source's own size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetSize {
    /// Use the source image dimensions.
    Original,
    /// Explicit pixel dimensions.
    Exact {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
}

impl TargetSize {
    /// Shorthand for [`TargetSize::Exact`].
    pub fn exact(width: u32, height: u32) -> Self {
        Self::Exact { width, height }
    }

    /// Resolve against the source size, rejecting empty results.
    pub fn resolve(self, src_width: u32, src_height: u32) -> ShapeClipResult<CanvasSize> {
        let (width, height) = match self {
            Self::Original => (src_width, src_height),
            Self::Exact { width, height } => (width, height),
        };
        if width == 0 || height == 0 {
            return Err(ShapeClipError::InvalidDimensions { width, height });
        }
        Ok(CanvasSize { width, height })
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CanvasSize {
    /// Create a canvas size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Smaller of the two sides.
    pub fn min_side(self) -> u32 {
        self.width.min(self.height)
    }

    /// Full canvas rectangle in pixel space.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Size left after removing `inset` from every edge, or `None` when nothing remains.
    pub fn shrink(self, inset: u32) -> Option<Self> {
        let twice = inset.checked_mul(2)?;
        let width = self.width.checked_sub(twice).filter(|w| *w > 0)?;
        let height = self.height.checked_sub(twice).filter(|h| *h > 0)?;
        Some(Self { width, height })
    }

    /// Canvas rectangle inset by `inset` on every edge (may be empty or inverted).
    pub fn inset_rect(self, inset: f64) -> Rect {
        Rect::new(
            inset,
            inset,
            f64::from(self.width) - inset,
            f64::from(self.height) - inset,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
