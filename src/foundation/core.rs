use crate::foundation::error::{DotfieldError, DotfieldResult};

pub use kurbo::{Point, Vec2};

/// Default dot size weight when adaptive sizing is off.
///
/// The size is a fraction of the base radius; transforms multiply it and the
/// renderer clamps it to [`MIN_DOT_SIZE`] before use.
pub const DEFAULT_DOT_SIZE: f64 = 1.0;

/// Smallest size weight the renderer will accept as a radius multiplier.
pub const MIN_DOT_SIZE: f64 = 0.01;

/// Drawing area in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Construct a canvas. Zero-size canvases are allowed; they are a
    /// degenerate request, not an error.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Geometric center of the canvas.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Straight (non-premultiplied) RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Construct a color from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A single rendered unit: position in canvas space, color, and a size
/// weight ("fraction of base radius", default [`DEFAULT_DOT_SIZE`]).
///
/// Dots are values; every transform (scaling, monochrome, animation)
/// produces new dots instead of mutating in place.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Dot {
    /// Dot center. May sit exactly on the canvas boundary.
    pub pos: Point,
    /// Sampled color.
    pub color: Rgb8,
    /// Size weight, multiplied into the base radius at draw time.
    pub size: f64,
}

impl Dot {
    /// Construct a dot with the default size weight.
    pub fn new(pos: Point, color: Rgb8) -> Self {
        Self {
            pos,
            color,
            size: DEFAULT_DOT_SIZE,
        }
    }

    /// Copy of this dot with a different size weight.
    pub fn with_size(self, size: f64) -> Self {
        Self { size, ..self }
    }

    /// Copy of this dot with a different color.
    pub fn with_color(self, color: Rgb8) -> Self {
        Self { color, ..self }
    }
}

/// Shape drawn for each dot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DotShape {
    /// Filled disc. Default, and the fallback for unknown keys.
    #[default]
    Circle,
    /// Axis-aligned filled square with side `2 * radius`.
    Square,
    /// Irregular 8-gon with jittered vertex radii.
    Organic,
}

impl DotShape {
    /// Parse a UI-facing key. Unknown keys fall back to [`DotShape::Circle`];
    /// this is a documented default, not a failure.
    pub fn parse(key: &str) -> Self {
        match key {
            "square" => Self::Square,
            "organic" => Self::Organic,
            _ => Self::Circle,
        }
    }
}

/// Per-frame transform applied to every dot during animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveformKind {
    /// Horizontal traveling wave displacing y and breathing size.
    Wave,
    /// Size modulation by distance from the canvas center.
    Ripple,
    /// Uniform size pulse.
    Pulse,
}

impl WaveformKind {
    /// Parse a UI-facing key. Unknown keys yield `None`, which the engine
    /// treats as a pass-through transform.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "wave" => Some(Self::Wave),
            "ripple" => Some(Self::Ripple),
            "pulse" => Some(Self::Pulse),
            _ => None,
        }
    }
}

/// Enumerated background fill for rendered frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    /// `#ffffff`. Default, and the fallback for unknown keys.
    #[default]
    White,
    /// `#1a1a1a`.
    Black,
    /// `#1e3a8a`.
    Blue,
    /// `#166534`.
    Green,
    /// `#991b1b`.
    Red,
}

impl Background {
    /// Parse a UI-facing key. Unknown keys fall back to
    /// [`Background::White`].
    pub fn parse(key: &str) -> Self {
        match key {
            "black" => Self::Black,
            "blue" => Self::Blue,
            "green" => Self::Green,
            "red" => Self::Red,
            _ => Self::White,
        }
    }

    /// Resolved fill color.
    pub fn rgb(self) -> Rgb8 {
        match self {
            Self::White => Rgb8::new(0xff, 0xff, 0xff),
            Self::Black => Rgb8::new(0x1a, 0x1a, 0x1a),
            Self::Blue => Rgb8::new(0x1e, 0x3a, 0x8a),
            Self::Green => Rgb8::new(0x16, 0x65, 0x34),
            Self::Red => Rgb8::new(0x99, 0x1b, 0x1b),
        }
    }
}

impl Canvas {
    /// Validate that both dimensions are non-zero.
    pub fn require_non_empty(self) -> DotfieldResult<Self> {
        if self.is_empty() {
            return Err(DotfieldError::validation(
                "canvas width/height must be > 0",
            ));
        }
        Ok(self)
    }
}
