//! Color math: HSL/hex conversion, contrast heuristics and palette generation.
//!
//! Every function here is total. Malformed input never panics; it either yields
//! `None` (when the caller must know the color could not be read) or a documented
//! fallback value.

use crate::scene::BackgroundKind;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Returned by [`hsl_string_to_hex`] when the input is not a valid `hsl()` string.
pub const FALLBACK_HEX: &str = "#000000";

/// Dominant color assumed for photographic backgrounds.
pub const IMAGE_DOMINANT_COLOR: &str = "#333333";

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Euclidean distance in RGB space.
    pub fn distance(self, other: Rgb) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

/// An 8-bit RGBA color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Multiply the alpha channel by `factor` (clamped to `[0, 1]`).
    pub fn with_alpha_factor(self, factor: f64) -> Self {
        let a = (self.a as f64 * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }
}

impl From<Rgb> for Rgba {
    fn from(c: Rgb) -> Self {
        Rgba::new(c.r, c.g, c.b, 255)
    }
}

/// Convert HSL (hue in degrees, saturation and lightness in percent) to RGB.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = (s / 100.0).clamp(0.0, 1.0);
    let l = (l / 100.0).clamp(0.0, 1.0);

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        )
    };

    Rgb::new(channel(r), channel(g), channel(b))
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Convert HSL components to a lowercase `#rrggbb` string.
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    hsl_to_rgb(h, s, l).to_hex()
}

/// Parse an `hsl(h, s%, l%)` string into its numeric components.
pub fn parse_hsl(input: &str) -> Option<(f64, f64, f64)> {
    let inner = input
        .trim()
        .strip_prefix("hsl(")?
        .strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);
    let h = parts.next()?.parse::<f64>().ok()?;
    let s = parts.next()?.strip_suffix('%')?.trim().parse::<f64>().ok()?;
    let l = parts.next()?.strip_suffix('%')?.trim().parse::<f64>().ok()?;
    if parts.next().is_some() || !(h.is_finite() && s.is_finite() && l.is_finite()) {
        return None;
    }
    Some((h, s, l))
}

/// Convert an `hsl()` string to hex, falling back to [`FALLBACK_HEX`] on malformed input.
pub fn hsl_string_to_hex(input: &str) -> String {
    match parse_hsl(input) {
        Some((h, s, l)) => hsl_to_hex(h, s, l),
        None => {
            log::warn!("Failed to parse HSL color: {input}");
            FALLBACK_HEX.to_string()
        }
    }
}

/// Convert RGB to HSL (hue in degrees, saturation and lightness in percent).
pub fn rgb_to_hsl(rgb: Rgb) -> (f64, f64, f64) {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h * 60.0, s * 100.0, l * 100.0)
}

/// Parse a strict `#RRGGBB` hex color (case-insensitive).
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(Rgb::new(r, g, b))
}

/// Perceptual lightness test: `(0.299r + 0.587g + 0.114b) / 255 > 0.5`.
///
/// Unparseable colors are treated as dark.
pub fn is_light_color(hex: &str) -> bool {
    match hex_to_rgb(hex) {
        Some(rgb) => {
            let luminance =
                (0.299 * rgb.r as f64 + 0.587 * rgb.g as f64 + 0.114 * rgb.b as f64) / 255.0;
            luminance > 0.5
        }
        None => false,
    }
}

/// Black on light backgrounds, white on dark ones.
pub fn contrasting_text_color(background: &str) -> &'static str {
    if is_light_color(background) {
        "#000000"
    } else {
        "#FFFFFF"
    }
}

/// True when the Euclidean RGB distance is below `threshold`.
///
/// Returns false if either color cannot be parsed.
pub fn are_colors_similar(a: &str, b: &str, threshold: f64) -> bool {
    match (hex_to_rgb(a), hex_to_rgb(b)) {
        (Some(a), Some(b)) => a.distance(b) < threshold,
        _ => false,
    }
}

/// Darken a hex color by `percent`. Unparseable input is returned unchanged.
pub fn darken(hex: &str, percent: f64) -> String {
    let Some(rgb) = hex_to_rgb(hex) else {
        return hex.to_string();
    };
    let factor = ((100.0 - percent) / 100.0).clamp(0.0, 1.0);
    let scale = |c: u8| (c as f64 * factor).round() as u8;
    Rgb::new(scale(rgb.r), scale(rgb.g), scale(rgb.b)).to_hex()
}

/// Lighten a hex color towards white by `percent`. Unparseable input is returned unchanged.
pub fn lighten(hex: &str, percent: f64) -> String {
    let Some(rgb) = hex_to_rgb(hex) else {
        return hex.to_string();
    };
    let factor = (percent / 100.0).clamp(0.0, 1.0);
    let scale = |c: u8| (c as f64 + (255.0 - c as f64) * factor).round() as u8;
    Rgb::new(scale(rgb.r), scale(rgb.g), scale(rgb.b)).to_hex()
}

/// Parse the CSS color forms used by scenes: hex (`#rgb`, `#rrggbb`, `#rrggbbaa`),
/// `rgb()`, `rgba()`, `hsl()`, `transparent` and a handful of named colors.
pub fn parse_css_color(input: &str) -> Option<Rgba> {
    let s = input.trim();
    if let Some(digits) = s.strip_prefix('#') {
        return parse_hex_digits(digits);
    }
    let lower = s.to_ascii_lowercase();
    if let Some(inner) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgb_function(inner);
    }
    if lower.starts_with("hsl(") {
        let (h, sat, l) = parse_hsl(&lower)?;
        return Some(hsl_to_rgb(h, sat, l).into());
    }
    named_color(&lower)
}

fn parse_hex_digits(digits: &str) -> Option<Rgba> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok().map(|v| v * 17);
    match digits.len() {
        3 => Some(Rgba::new(nibble(0)?, nibble(1)?, nibble(2)?, 255)),
        6 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, 255)),
        8 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn parse_rgb_function(inner: &str) -> Option<Rgba> {
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let component = |p: &str| -> Option<u8> {
        let v = p.parse::<f64>().ok()?;
        v.is_finite().then(|| v.round().clamp(0.0, 255.0) as u8)
    };
    let alpha = match parts.get(3) {
        Some(p) => {
            let a = p.parse::<f64>().ok()?;
            if !a.is_finite() {
                return None;
            }
            (a.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        None => 255,
    };
    Some(Rgba::new(
        component(parts[0])?,
        component(parts[1])?,
        component(parts[2])?,
        alpha,
    ))
}

fn named_color(name: &str) -> Option<Rgba> {
    let c = match name {
        "transparent" => Rgba::TRANSPARENT,
        "black" => Rgba::BLACK,
        "white" => Rgba::WHITE,
        "red" => Rgba::new(255, 0, 0, 255),
        "green" => Rgba::new(0, 128, 0, 255),
        "blue" => Rgba::new(0, 0, 255, 255),
        "yellow" => Rgba::new(255, 255, 0, 255),
        "orange" => Rgba::new(255, 165, 0, 255),
        "purple" => Rgba::new(128, 0, 128, 255),
        "pink" => Rgba::new(255, 192, 203, 255),
        "gray" | "grey" => Rgba::new(128, 128, 128, 255),
        _ => return None,
    };
    Some(c)
}

/// Normalise any supported CSS color to `#rrggbb`, dropping alpha.
pub fn to_hex(input: &str) -> Option<String> {
    parse_css_color(input).map(|c| c.rgb().to_hex())
}

/// The color that best represents a background for contrast decisions.
pub fn dominant_background_color(background: &BackgroundKind) -> String {
    match background {
        BackgroundKind::Solid { value } => value.clone(),
        BackgroundKind::Gradient { gradient_colors, .. } => gradient_colors
            .first()
            .cloned()
            .unwrap_or_else(|| IMAGE_DOMINANT_COLOR.to_string()),
        BackgroundKind::Fancy { pattern_colors, .. } => pattern_colors
            .first()
            .cloned()
            .unwrap_or_else(|| IMAGE_DOMINANT_COLOR.to_string()),
        BackgroundKind::Image { .. } => IMAGE_DOMINANT_COLOR.to_string(),
    }
}

/// A uniformly random opaque hex color.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    Rgb::new(rng.random(), rng.random(), rng.random()).to_hex()
}

/// Color-theory schemes used by [`generate_harmonious_colors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarmonyScheme {
    Complementary,
    Triadic,
    Analogous,
    SplitComplementary,
    Tetradic,
    Monochromatic,
}

impl HarmonyScheme {
    pub const ALL: [HarmonyScheme; 6] = [
        HarmonyScheme::Complementary,
        HarmonyScheme::Triadic,
        HarmonyScheme::Analogous,
        HarmonyScheme::SplitComplementary,
        HarmonyScheme::Tetradic,
        HarmonyScheme::Monochromatic,
    ];

    /// Hues produced by this scheme for a base hue.
    pub fn hues(self, base: u32) -> Vec<u32> {
        let rot = |deg: u32| (base + deg) % 360;
        match self {
            HarmonyScheme::Complementary => vec![base, rot(180)],
            HarmonyScheme::Triadic => vec![base, rot(120), rot(240)],
            HarmonyScheme::Analogous => vec![base, rot(30), rot(330)],
            HarmonyScheme::SplitComplementary => vec![base, rot(150), rot(210)],
            HarmonyScheme::Tetradic => vec![base, rot(90), rot(180), rot(270)],
            HarmonyScheme::Monochromatic => vec![base; 4],
        }
    }
}

fn random_hsl<R: Rng + ?Sized>(rng: &mut R, hue: u32) -> String {
    let saturation = rng.random_range(50..90);
    let lightness = rng.random_range(30..80);
    format!("hsl({hue}, {saturation}%, {lightness}%)")
}

/// Generate at least four `hsl()` strings following a random color-theory scheme.
pub fn generate_harmonious_colors<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    let base = rng.random_range(0..360);
    let scheme = HarmonyScheme::ALL[rng.random_range(0..HarmonyScheme::ALL.len())];

    let mut colors: Vec<String> = scheme
        .hues(base)
        .into_iter()
        .map(|hue| random_hsl(rng, hue))
        .collect();

    while colors.len() < 4 {
        let hue = rng.random_range(0..360);
        colors.push(random_hsl(rng, hue));
    }

    colors
}

/// Number of sampled text colors before the black/white fallbacks are appended.
const CONTRAST_SLOTS: usize = 4;
const CONTRAST_ATTEMPTS: usize = 10;
const CONTRAST_THRESHOLD: f64 = 80.0;

/// Sample vibrant text colors that are not similar to any background color.
///
/// Best effort: a slot stays empty when every attempt collides with the background.
/// Pure white and black are always appended.
pub fn generate_contrasting_text_colors<R: Rng + ?Sized>(
    background_colors: &[String],
    rng: &mut R,
) -> Vec<String> {
    let backgrounds: Vec<String> = background_colors
        .iter()
        .filter_map(|c| to_hex(c))
        .collect();

    let mut colors = Vec::with_capacity(CONTRAST_SLOTS + 2);
    for _ in 0..CONTRAST_SLOTS {
        for _ in 0..CONTRAST_ATTEMPTS {
            let hue = rng.random_range(0..360) as f64;
            let saturation = rng.random_range(60..90) as f64;
            let lightness = rng.random_range(25..75) as f64;
            let candidate = hsl_to_hex(hue, saturation, lightness);
            let clashes = backgrounds
                .iter()
                .any(|bg| are_colors_similar(&candidate, bg, CONTRAST_THRESHOLD));
            if !clashes {
                colors.push(candidate);
                break;
            }
        }
    }

    colors.push("#FFFFFF".to_string());
    colors.push("#000000".to_string());
    colors
}
