//! Text, image and icon elements.

use super::{ElementId, deserialize_angle};
use serde::{Deserialize, Serialize};

/// Ordinal font size, each tier mapped to a fixed pixel size.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
    Xlarge,
    Xxlarge,
    Huge,
    Massive,
    Giant,
}

impl FontSize {
    /// All tiers from smallest to largest.
    pub const ALL: [FontSize; 9] = [
        FontSize::Tiny,
        FontSize::Small,
        FontSize::Medium,
        FontSize::Large,
        FontSize::Xlarge,
        FontSize::Xxlarge,
        FontSize::Huge,
        FontSize::Massive,
        FontSize::Giant,
    ];

    /// Pixel size of this tier.
    pub fn px(self) -> f64 {
        match self {
            FontSize::Tiny => 16.0,
            FontSize::Small => 24.0,
            FontSize::Medium => 36.0,
            FontSize::Large => 48.0,
            FontSize::Xlarge => 60.0,
            FontSize::Xxlarge => 72.0,
            FontSize::Huge => 96.0,
            FontSize::Massive => 120.0,
            FontSize::Giant => 144.0,
        }
    }

    /// Display name for this tier.
    pub fn display_name(self) -> &'static str {
        match self {
            FontSize::Tiny => "Tiny",
            FontSize::Small => "Small",
            FontSize::Medium => "Medium",
            FontSize::Large => "Large",
            FontSize::Xlarge => "X-Large",
            FontSize::Xxlarge => "XX-Large",
            FontSize::Huge => "Huge",
            FontSize::Massive => "Massive",
            FontSize::Giant => "Giant",
        }
    }
}

/// Horizontal text alignment relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Whether a styleable fill uses the flat color or the gradient colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorType {
    #[default]
    Solid,
    Gradient,
}

/// Drop shadow parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub enabled: bool,
    pub color: String,
    pub blur: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            enabled: false,
            color: "rgba(0, 0, 0, 0.3)".to_string(),
            blur: 4.0,
            offset_x: 2.0,
            offset_y: 2.0,
        }
    }
}

/// Text outline parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub enabled: bool,
    pub color: String,
    pub width: f64,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            enabled: false,
            color: "#000000".to_string(),
            width: 2.0,
        }
    }
}

fn default_opacity() -> f64 {
    1.0
}

fn default_gradient_direction() -> f64 {
    45.0
}

fn default_line_height() -> f64 {
    1.2
}

fn default_font_family() -> String {
    "Inter".to_string()
}

fn default_font_weight() -> String {
    "600".to_string()
}

fn default_fill() -> String {
    "#FFFFFF".to_string()
}

/// A run of text anchored at `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub id: ElementId,
    pub text: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub font_size: FontSize,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_weight")]
    pub font_weight: String,
    #[serde(default = "default_fill")]
    pub color: String,
    #[serde(default)]
    pub color_type: ColorType,
    #[serde(default)]
    pub gradient_colors: Vec<String>,
    #[serde(
        default = "default_gradient_direction",
        deserialize_with = "deserialize_angle"
    )]
    pub gradient_direction: f64,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default)]
    pub letter_spacing: f64,
    #[serde(default = "default_line_height")]
    pub line_height: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub shadow: Shadow,
    #[serde(default)]
    pub stroke: Stroke,
}

/// A raster image drawn into a `width x height` box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    pub id: ElementId,
    pub src: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Percent of `min(width, height) / 2`.
    #[serde(default)]
    pub border_radius: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

/// A catalog glyph drawn into a `size x size` square.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconElement {
    pub id: ElementId,
    /// Catalog key resolved at render time.
    #[serde(rename = "type")]
    pub icon_type: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_fill")]
    pub color: String,
    #[serde(default)]
    pub color_type: ColorType,
    #[serde(default)]
    pub gradient_colors: Vec<String>,
    #[serde(
        default = "default_gradient_direction",
        deserialize_with = "deserialize_angle"
    )]
    pub gradient_direction: f64,
    #[serde(default)]
    pub shadow: Shadow,
    #[serde(default)]
    pub flip_x: bool,
    #[serde(default)]
    pub flip_y: bool,
}
