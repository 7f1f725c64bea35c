//! Drawable element definitions for the whiteboard.

mod arrow;
mod ellipse;
mod rectangle;
mod stroke;
mod text;

pub use arrow::{arrow_wings, Arrow, ARROW_HEAD_ANGLE, ARROW_HEAD_LENGTH};
pub use ellipse::Ellipse;
pub use rectangle::Rectangle;
pub use stroke::Stroke;
pub use text::TextLabel;

use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {0:?}: expected #rgb, #rrggbb or #rrggbbaa")]
pub struct ParseColorError(pub String);

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::black()
    }
}

impl fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for SerializableColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.is_ascii() {
            return Err(err());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let nibble = |i: usize| {
            u8::from_str_radix(&hex[i..i + 1], 16)
                .map(|v| v * 17)
                .map_err(|_| err())
        };

        match hex.len() {
            3 => Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(err()),
        }
    }
}

// Colors travel as hex strings in config files and scene dumps.
impl Serialize for SerializableColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SerializableColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Check that every coordinate is a finite number.
pub(crate) fn points_finite<'a>(points: impl IntoIterator<Item = &'a Point>) -> bool {
    points.into_iter().all(|p| p.x.is_finite() && p.y.is_finite())
}

/// Bounding box of a set of points, or `None` for an empty set.
pub fn bounds_of(points: &[Point]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    Some(
        rest.iter()
            .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p)),
    )
}

/// Common trait for all drawable elements.
pub trait ElementTrait {
    /// Get the unique identifier.
    fn id(&self) -> ElementId;

    /// Get the element's color.
    fn color(&self) -> SerializableColor;

    /// Get the geometric bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Whether the element carries enough finite geometry to be drawn.
    fn is_complete(&self) -> bool;
}

/// The closed set of drawable elements.
///
/// Later elements in a scene are drawn on top of earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Stroke(Stroke),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Arrow(Arrow),
    Text(TextLabel),
}

impl Element {
    /// Short lowercase name of the variant, used in log output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Element::Stroke(_) => "stroke",
            Element::Rectangle(_) => "rectangle",
            Element::Ellipse(_) => "ellipse",
            Element::Arrow(_) => "arrow",
            Element::Text(_) => "text",
        }
    }

    fn as_trait(&self) -> &dyn ElementTrait {
        match self {
            Element::Stroke(s) => s,
            Element::Rectangle(r) => r,
            Element::Ellipse(e) => e,
            Element::Arrow(a) => a,
            Element::Text(t) => t,
        }
    }
}

impl ElementTrait for Element {
    fn id(&self) -> ElementId {
        self.as_trait().id()
    }

    fn color(&self) -> SerializableColor {
        self.as_trait().color()
    }

    fn bounds(&self) -> Rect {
        self.as_trait().bounds()
    }

    fn is_complete(&self) -> bool {
        self.as_trait().is_complete()
    }
}
