#![forbid(unsafe_code)]

//! One-way value converters for presenting record fields.

use std::fmt;

use crate::error::ConvertError;
use crate::field::FieldValue;

/// An opaque 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const GREEN: Rgb = Rgb::new(0x00, 0x80, 0x00);
    pub const RED: Rgb = Rgb::new(0xFF, 0x00, 0x00);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#RRGGBB`, uppercase.
    #[must_use]
    pub fn hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Converts a field value into something a view can draw.
pub trait ValueConverter {
    type Output;

    /// `None` means the bound value is unset.
    fn convert(&self, value: Option<&FieldValue>) -> Self::Output;

    /// Map a presented value back to a field value.
    fn convert_back(&self, output: &Self::Output) -> Result<FieldValue, ConvertError>;
}

/// Maps the active flag to an indicator color.
///
/// `true` maps to the affirmative color, `false` to the negative color, and
/// anything that is not a bool (including an unset value) to the neutral
/// color. The reverse direction always fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolToColor {
    pub affirmative: Rgb,
    pub negative: Rgb,
    pub neutral: Rgb,
}

impl Default for BoolToColor {
    fn default() -> Self {
        Self {
            affirmative: Rgb::GREEN,
            negative: Rgb::RED,
            neutral: Rgb::BLACK,
        }
    }
}

impl BoolToColor {
    #[must_use]
    pub fn new(affirmative: Rgb, negative: Rgb, neutral: Rgb) -> Self {
        Self {
            affirmative,
            negative,
            neutral,
        }
    }
}

impl ValueConverter for BoolToColor {
    type Output = Rgb;

    fn convert(&self, value: Option<&FieldValue>) -> Rgb {
        match value.and_then(FieldValue::as_bool) {
            Some(true) => self.affirmative,
            Some(false) => self.negative,
            None => self.neutral,
        }
    }

    fn convert_back(&self, output: &Rgb) -> Result<FieldValue, ConvertError> {
        tracing::warn!(
            message = "convert.unsupported",
            converter = "BoolToColor",
            color = %output
        );
        Err(ConvertError::unsupported("BoolToColor", "convert_back"))
    }
}
