//! Icon glyph resolution.
//!
//! Icons come from the catalog as either a vector shape keyword or a symbol
//! string. Vector shapes are built as unit paths centered on the origin,
//! spanning `[-0.5, 0.5]` on both axes; the renderer scales them by the icon size.

use bannerkit_core::catalog::{Catalogs, IconDefinition};
use kurbo::{BezPath, Circle, Point, Rect, Shape};
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::sync::Arc;

/// A drawable icon glyph.
#[derive(Debug, Clone, PartialEq)]
pub enum IconGlyph {
    /// Unit-sized vector path.
    Path(BezPath),
    /// Text drawn centered with the icon size as font size.
    Symbol(String),
}

/// Looks up the glyph for an icon type. Unknown types yield `None`.
pub trait GlyphResolver {
    fn resolve(&self, icon_type: &str) -> Option<IconGlyph>;
}

impl GlyphResolver for [IconDefinition] {
    fn resolve(&self, icon_type: &str) -> Option<IconGlyph> {
        let definition = self.iter().find(|icon| icon.id == icon_type)?;
        Some(glyph_for(&definition.glyph))
    }
}

impl GlyphResolver for Vec<IconDefinition> {
    fn resolve(&self, icon_type: &str) -> Option<IconGlyph> {
        self.as_slice().resolve(icon_type)
    }
}

impl GlyphResolver for Catalogs {
    fn resolve(&self, icon_type: &str) -> Option<IconGlyph> {
        self.icons.resolve(icon_type)
    }
}

impl<T: GlyphResolver + ?Sized> GlyphResolver for Arc<T> {
    fn resolve(&self, icon_type: &str) -> Option<IconGlyph> {
        (**self).resolve(icon_type)
    }
}

/// Glyph for a catalog glyph string: a shape keyword or a literal symbol.
pub fn glyph_for(glyph: &str) -> IconGlyph {
    match unit_shape(glyph) {
        Some(path) => IconGlyph::Path(path),
        None => IconGlyph::Symbol(glyph.to_string()),
    }
}

/// Unit path for a shape keyword.
pub fn unit_shape(keyword: &str) -> Option<BezPath> {
    let path = match keyword {
        "circle" => Circle::new(Point::ZERO, 0.5).to_path(1e-3),
        "square" => Rect::new(-0.5, -0.5, 0.5, 0.5).to_path(1e-3),
        "triangle" => polygon(&[(0.0, -0.5), (0.5, 0.5), (-0.5, 0.5)]),
        "diamond" => polygon(&[(0.0, -0.5), (0.5, 0.0), (0.0, 0.5), (-0.5, 0.0)]),
        "hexagon" => regular_polygon(6, 0.0),
        "pentagon" => regular_polygon(5, -FRAC_PI_2),
        "star" => star(5, 0.5, 0.2),
        "heart" => heart(),
        "arrow-right" => arrow(0.0),
        "arrow-down" => arrow(FRAC_PI_2),
        "arrow-left" => arrow(PI),
        "arrow-up" => arrow(-FRAC_PI_2),
        "plus" => plus(),
        "cross" => kurbo::Affine::rotate(PI / 4.0) * plus(),
        "check" => polygon(&[
            (-0.5, 0.0),
            (-0.35, -0.15),
            (-0.15, 0.1),
            (0.35, -0.4),
            (0.5, -0.25),
            (-0.15, 0.4),
        ]),
        _ => return None,
    };
    Some(path)
}

fn polygon(points: &[(f64, f64)]) -> BezPath {
    let mut path = BezPath::new();
    for (i, &(x, y)) in points.iter().enumerate() {
        if i == 0 {
            path.move_to((x, y));
        } else {
            path.line_to((x, y));
        }
    }
    path.close_path();
    path
}

fn regular_polygon(sides: usize, phase: f64) -> BezPath {
    let points: Vec<(f64, f64)> = (0..sides)
        .map(|i| {
            let angle = phase + TAU * i as f64 / sides as f64;
            (0.5 * angle.cos(), 0.5 * angle.sin())
        })
        .collect();
    polygon(&points)
}

fn star(points: usize, outer: f64, inner: f64) -> BezPath {
    let vertices: Vec<(f64, f64)> = (0..points * 2)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let angle = -FRAC_PI_2 + PI * i as f64 / points as f64;
            (radius * angle.cos(), radius * angle.sin())
        })
        .collect();
    polygon(&vertices)
}

fn heart() -> BezPath {
    let mut path = BezPath::new();
    path.move_to((0.0, 0.45));
    path.curve_to((-0.1, 0.35), (-0.5, 0.1), (-0.5, -0.15));
    path.curve_to((-0.5, -0.4), (-0.2, -0.5), (0.0, -0.25));
    path.curve_to((0.2, -0.5), (0.5, -0.4), (0.5, -0.15));
    path.curve_to((0.5, 0.1), (0.1, 0.35), (0.0, 0.45));
    path.close_path();
    path
}

/// Right-pointing arrow rotated by `angle`.
fn arrow(angle: f64) -> BezPath {
    let path = polygon(&[
        (-0.5, -0.12),
        (0.1, -0.12),
        (0.1, -0.35),
        (0.5, 0.0),
        (0.1, 0.35),
        (0.1, 0.12),
        (-0.5, 0.12),
    ]);
    kurbo::Affine::rotate(angle) * path
}

fn plus() -> BezPath {
    let t = 0.14;
    polygon(&[
        (-t, -0.5),
        (t, -0.5),
        (t, -t),
        (0.5, -t),
        (0.5, t),
        (t, t),
        (t, 0.5),
        (-t, 0.5),
        (-t, t),
        (-0.5, t),
        (-0.5, -t),
        (-t, -t),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_fit_unit_box() {
        for keyword in [
            "circle", "square", "triangle", "diamond", "hexagon", "pentagon", "star", "heart",
            "arrow-right", "arrow-left", "arrow-up", "arrow-down", "plus", "cross", "check",
        ] {
            let path = unit_shape(keyword).unwrap();
            let bbox = path.bounding_box();
            assert!(bbox.x0 >= -0.51 && bbox.x1 <= 0.51, "{keyword}: {bbox:?}");
            assert!(bbox.y0 >= -0.51 && bbox.y1 <= 0.51, "{keyword}: {bbox:?}");
        }
    }

    #[test]
    fn test_catalog_resolution() {
        let catalogs = Catalogs::builtin();
        assert!(matches!(catalogs.resolve("star"), Some(IconGlyph::Path(_))));
        assert_eq!(catalogs.resolve("trophy"), Some(IconGlyph::Symbol("🏆".to_string())));
        assert_eq!(catalogs.resolve("no-such-icon"), None);
    }
}
