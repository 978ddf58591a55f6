//! Fill, font and shadow descriptions shared by every surface.

use bannerkit_core::color::{self, Rgba};
use kurbo::{Point, Vec2};

pub use bannerkit_core::scene::TextAlign;

/// A color string that does not parse as CSS.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unparseable color {0:?}")]
pub struct InvalidColor(pub String);

/// Parse a CSS color string.
pub fn parse_color(value: &str) -> Result<Rgba, InvalidColor> {
    color::parse_css_color(value).ok_or_else(|| InvalidColor(value.to_string()))
}

/// One color stop of a gradient, `offset` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgba,
}

/// What a fill or stroke paints with.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    /// Linear gradient in user space from `start` to `end`.
    LinearGradient {
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
    },
}

impl Default for Paint {
    fn default() -> Self {
        Paint::Solid(Rgba::BLACK)
    }
}

impl Paint {
    /// Solid paint from a CSS color string, falling back to `fallback` if it does not parse.
    pub fn css(value: &str, fallback: Rgba) -> Self {
        Paint::Solid(parse_color(value).unwrap_or(fallback))
    }

    /// Linear gradient with stops evenly spaced at `i / (n - 1)`.
    ///
    /// An empty color list paints a single fallback color; one color paints flat.
    pub fn linear(start: Point, end: Point, colors: &[String], fallback: Rgba) -> Self {
        let parsed: Vec<Rgba> = colors
            .iter()
            .map(|c| color::parse_css_color(c).unwrap_or(fallback))
            .collect();
        match parsed.as_slice() {
            [] => Paint::Solid(fallback),
            [single] => Paint::Solid(*single),
            many => {
                let last = (many.len() - 1) as f64;
                let stops = many
                    .iter()
                    .enumerate()
                    .map(|(i, c)| GradientStop {
                        offset: i as f64 / last,
                        color: *c,
                    })
                    .collect();
                Paint::LinearGradient { start, end, stops }
            }
        }
    }

    /// Color of this paint at a user-space point.
    pub fn color_at(&self, point: Point) -> Rgba {
        match self {
            Paint::Solid(c) => *c,
            Paint::LinearGradient { start, end, stops } => {
                let axis = *end - *start;
                let len2 = axis.hypot2();
                let t = if len2 > 0.0 {
                    ((point - *start).dot(axis) / len2).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                sample_stops(stops, t)
            }
        }
    }

    /// Copy with every color's alpha scaled by `factor`.
    pub fn with_alpha_factor(&self, factor: f64) -> Paint {
        match self {
            Paint::Solid(c) => Paint::Solid(c.with_alpha_factor(factor)),
            Paint::LinearGradient { start, end, stops } => Paint::LinearGradient {
                start: *start,
                end: *end,
                stops: stops
                    .iter()
                    .map(|s| GradientStop {
                        offset: s.offset,
                        color: s.color.with_alpha_factor(factor),
                    })
                    .collect(),
            },
        }
    }
}

fn sample_stops(stops: &[GradientStop], t: f64) -> Rgba {
    let Some(first) = stops.first() else {
        return Rgba::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let f = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
            return lerp(a.color, b.color, f);
        }
    }
    stops.last().map_or(first.color, |s| s.color)
}

fn lerp(a: Rgba, b: Rgba, f: f64) -> Rgba {
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * f).round().clamp(0.0, 255.0) as u8;
    Rgba::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b), mix(a.a, b.a))
}

/// Font selection for text drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub weight: String,
    pub size_px: f64,
    /// CSS family list, e.g. `"Inter, sans-serif"`.
    pub family: String,
    pub letter_spacing: f64,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            weight: "400".to_string(),
            size_px: 10.0,
            family: "sans-serif".to_string(),
            letter_spacing: 0.0,
        }
    }
}

impl FontSpec {
    pub fn new(weight: impl Into<String>, size_px: f64, family: impl Into<String>) -> Self {
        Self {
            weight: weight.into(),
            size_px,
            family: family.into(),
            letter_spacing: 0.0,
        }
    }

    pub fn with_letter_spacing(mut self, spacing: f64) -> Self {
        self.letter_spacing = spacing;
        self
    }

    /// CSS font shorthand: `"<weight> <size>px <family>"`.
    pub fn css(&self) -> String {
        format!("{} {}px {}", self.weight, self.size_px, self.family)
    }

    /// Family names in preference order, unquoted.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.family
            .split(',')
            .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\''))
            .filter(|f| !f.is_empty())
    }
}

/// Vertical anchor of text relative to its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Top,
    Middle,
}

/// Drop shadow applied to subsequent fills.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowStyle {
    pub color: Rgba,
    pub blur: f64,
    /// Device-space offset; not affected by the current transform.
    pub offset: Vec2,
}

impl ShadowStyle {
    /// Shadow from element settings, or `None` if disabled.
    pub fn from_settings(shadow: &bannerkit_core::scene::Shadow) -> Option<Self> {
        shadow.enabled.then(|| ShadowStyle {
            color: color::parse_css_color(&shadow.color).unwrap_or(Rgba::new(0, 0, 0, 77)),
            blur: shadow.blur.max(0.0),
            offset: Vec2::new(shadow.offset_x, shadow.offset_y),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_even_stops() {
        let colors = vec!["#FF0000".to_string(), "#00FF00".to_string(), "#0000FF".to_string()];
        let paint = Paint::linear(Point::ZERO, Point::new(100.0, 0.0), &colors, Rgba::BLACK);
        let Paint::LinearGradient { stops, .. } = &paint else {
            panic!("expected gradient");
        };
        let offsets: Vec<f64> = stops.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
        assert_eq!(paint.color_at(Point::new(50.0, 30.0)), Rgba::new(0, 255, 0, 255));
        assert_eq!(paint.color_at(Point::new(-10.0, 0.0)), Rgba::new(255, 0, 0, 255));
        assert_eq!(paint.color_at(Point::new(500.0, 0.0)), Rgba::new(0, 0, 255, 255));
    }

    #[test]
    fn test_linear_degenerate_lists() {
        let fallback = Rgba::new(1, 2, 3, 255);
        assert_eq!(Paint::linear(Point::ZERO, Point::ZERO, &[], fallback), Paint::Solid(fallback));
        assert_eq!(
            Paint::linear(Point::ZERO, Point::ZERO, &["#FFFFFF".to_string()], fallback),
            Paint::Solid(Rgba::WHITE)
        );
    }

    #[test]
    fn test_parse_color_error() {
        assert_eq!(parse_color("#zzzzzz"), Err(InvalidColor("#zzzzzz".to_string())));
        assert_eq!(parse_color("white"), Ok(Rgba::WHITE));
    }

    #[test]
    fn test_css_fallback() {
        assert_eq!(Paint::css("nonsense", Rgba::WHITE), Paint::Solid(Rgba::WHITE));
        assert_eq!(Paint::css("#000000", Rgba::WHITE), Paint::Solid(Rgba::BLACK));
    }

    #[test]
    fn test_font_css_and_families() {
        let font = FontSpec::new("600", 32.0, "'Open Sans', Inter, sans-serif");
        assert_eq!(font.css(), "600 32px 'Open Sans', Inter, sans-serif");
        let families: Vec<&str> = font.families().collect();
        assert_eq!(families, vec!["Open Sans", "Inter", "sans-serif"]);
    }
}
