//! Procedural background patterns.
//!
//! Every generator fills the canvas with the base color (first pattern color,
//! `#f0f0f0` if absent) and draws its motif in the second color (`#e0e0e0` if
//! absent). Output depends only on the kind, colors and canvas size.

use crate::paint::Paint;
use crate::surface::Surface;
use bannerkit_core::color::{Rgba, parse_css_color};
use bannerkit_core::scene::PatternKind;
use kurbo::{Affine, BezPath, Circle, Point, Rect, Shape};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Base fill when no pattern color is given.
pub const DEFAULT_BASE_COLOR: Rgba = Rgba::new(0xf0, 0xf0, 0xf0, 255);

/// Motif fill when fewer than two pattern colors are given.
pub const DEFAULT_MOTIF_COLOR: Rgba = Rgba::new(0xe0, 0xe0, 0xe0, 255);

/// Checkerboard tile edge.
pub const CHECKER_TILE: f64 = 50.0;

const TOLERANCE: f64 = 0.1;

/// Simple seeded random number generator (xorshift32).
struct PatternRng {
    state: u32,
}

impl PatternRng {
    fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / (u32::MAX as f64 + 1.0)
    }
}

/// Resolve the base and motif colors of a pattern.
pub fn pattern_colors(colors: &[String]) -> (Rgba, Rgba) {
    let pick = |i: usize, fallback: Rgba| {
        colors
            .get(i)
            .and_then(|c| parse_css_color(c))
            .unwrap_or(fallback)
    };
    (pick(0, DEFAULT_BASE_COLOR), pick(1, DEFAULT_MOTIF_COLOR))
}

/// Paint a full-canvas pattern.
pub fn paint_pattern<S: Surface + ?Sized>(
    surface: &mut S,
    kind: PatternKind,
    colors: &[String],
    width: f64,
    height: f64,
) {
    let (base, motif) = pattern_colors(colors);
    surface.set_fill(Paint::Solid(base));
    surface.fill_rect(Rect::new(0.0, 0.0, width, height));
    surface.set_fill(Paint::Solid(motif));

    match kind {
        PatternKind::Dots => dots(surface, width, height),
        PatternKind::Grid => grid(surface, width, height),
        PatternKind::Diagonal => diagonal(surface, width, height),
        PatternKind::Hexagon => hexagons(surface, width, height),
        PatternKind::Waves => waves(surface, width, height),
        PatternKind::Triangles => triangles(surface, width, height),
        PatternKind::Circles => circles(surface, width, height),
        PatternKind::Chevron => chevrons(surface, width, height),
        PatternKind::Stars => stars(surface, width, height),
        PatternKind::Noise => noise(surface, width, height),
        PatternKind::Bubbles => bubbles(surface, width, height),
        PatternKind::Circuit => circuit(surface, width, height),
        PatternKind::Checkerboard => checkerboard(surface, width, height),
    }
}

/// Lattice points `(x, y)` with the given step, starting at `offset`.
fn lattice(width: f64, height: f64, step: f64, offset: f64) -> impl Iterator<Item = (f64, f64)> {
    let cols = ((width - offset) / step).ceil().max(0.0) as usize + 1;
    let rows = ((height - offset) / step).ceil().max(0.0) as usize + 1;
    (0..rows).flat_map(move |r| (0..cols).map(move |c| (offset + c as f64 * step, offset + r as f64 * step)))
}

fn checkerboard<S: Surface + ?Sized>(surface: &mut S, width: f64, height: f64) {
    for (x, y) in lattice(width, height, CHECKER_TILE * 2.0, 0.0) {
        surface.fill_rect(Rect::new(x, y, x + CHECKER_TILE, y + CHECKER_TILE));
        surface.fill_rect(Rect::new(
            x + CHECKER_TILE,
            y + CHECKER_TILE,
            x + 2.0 * CHECKER_TILE,
            y + 2.0 * CHECKER_TILE,
        ));
    }
}

fn dots<S: Surface + ?Sized>(surface: &mut S, width: f64, height: f64) {
    for (x, y) in lattice(width, height, 30.0, 15.0) {
        surface.fill_path(&Circle::new((x, y), 4.0).to_path(TOLERANCE));
    }
}

fn grid<S: Surface + ?Sized>(surface: &mut S, width: f64, height: f64) {
    let step = 40.0;
    let mut x = 0.0;
    while x <= width {
        surface.fill_rect(Rect::new(x, 0.0, x + 1.0, height));
        x += step;
    }
    let mut y = 0.0;
    while y <= height {
        surface.fill_rect(Rect::new(0.0, y, width, y + 1.0));
        y += step;
    }
}

fn diagonal<S: Surface + ?Sized>(surface: &mut S, width: f64, height: f64) {
    let step = 30.0;
    let band = 10.0;
    let mut x = -height;
    while x <= width {
        let mut path = BezPath::new();
        path.move_to((x, height));
        path.line_to((x + height, 0.0));
        path.line_to((x + height + band, 0.0));
        path.line_to((x + band, height));
        path.close_path();
        surface.fill_path(&path);
        x += step;
    }
}

fn hexagon_path(center: Point, radius: f64) -> BezPath {
    let mut path = BezPath::new();
    for i in 0..6 {
        let angle = PI / 6.0 + TAU * i as f64 / 6.0;
        let p = Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin());
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close_path();
    path
}

fn hexagons<S: Surface + ?Sized>(surface: &mut S, width: f64, height: f64) {
    let radius = 20.0;
    let dx = radius * 3f64.sqrt();
    let dy = radius * 1.5;
    let rows = (height / dy).ceil() as usize + 1;
    let cols = (width / dx).ceil() as usize + 1;
    for r in 0..rows {
        let shift = if r % 2 == 0 { 0.0 } else { dx / 2.0 };
        for c in 0..cols {
            let center = Point::new(c as f64 * dx + shift, r as f64 * dy);
            surface.fill_path(&hexagon_path(center, radius * 0.8));
        }
    }
}

fn waves<S: Surface + ?Sized>(surface: &mut S, width: f64, height: f64) {
    let amplitude = 10.0;
    let wavelength = 80.0;
    let thickness = 6.0;
    let samples = (width / 4.0).ceil().max(1.0) as usize;
    let mut y = 20.0;
    while y <= height + amplitude {
        let mut path = BezPath::new();
        let at = |i: usize| {
            let x = width * i as f64 / samples as f64;
            (x, y + amplitude * (TAU * x / wavelength).sin())
        };
        path.move_to(at(0));
        for i in 1..=samples {
            path.line_to(at(i));
        }
        for i in (0..=samples).rev() {
            let (x, wy) = at(i);
            path.line_to((x, wy + thickness));
        }
        path.close_path();
        surface.fill_path(&path);
        y += 40.0;
    }
}

fn triangles<S: Surface + ?Sized>(surface: &mut S, width: f64, height: f64) {
    let size = 40.0;
    for (x, y) in lattice(width, height, size, 0.0) {
        let mut path = BezPath::new();
        path.move_to((x, y + size));
        path.line_to((x + size / 2.0, y));
        path.line_to((x + size, y + size));
        path.close_path();
        surface.fill_path(&path);
    }
}

fn circles<S: Surface + ?Sized>(surface: &mut S, width: f64, height: f64) {
    // Rings: the mirrored inner contour winds the other way and cuts the hole.
    for (x, y) in lattice(width, height, 60.0, 30.0) {
        let mut ring = Circle::new((x, y), 20.0).to_path(TOLERANCE);
        let inner = Affine::translate((x, y))
            * Affine::FLIP_X
            * Circle::new(Point::ZERO, 16.0).to_path(TOLERANCE);
        ring.extend(inner);
        surface.fill_path(&ring);
    }
}

fn chevrons<S: Surface + ?Sized>(surface: &mut S, width: f64, height: f64) {
    let w = 40.0;
    let h = 20.0;
    let t = 6.0;
    for (x, y) in lattice(width, height, w, 0.0) {
        let mut path = BezPath::new();
        path.move_to((x, y + h));
        path.line_to((x + w / 2.0, y));
        path.line_to((x + w, y + h));
        path.line_to((x + w, y + h + t));
        path.line_to((x + w / 2.0, y + t));
        path.line_to((x, y + h + t));
        path.close_path();
        surface.fill_path(&path);
    }
}

fn star_path(center: Point, outer: f64, inner: f64) -> BezPath {
    let mut path = BezPath::new();
    for i in 0..10 {
        let radius = if i % 2 == 0 { outer } else { inner };
        let angle = -FRAC_PI_2 + PI * i as f64 / 5.0;
        let p = Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin());
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close_path();
    path
}

fn stars<S: Surface + ?Sized>(surface: &mut S, width: f64, height: f64) {
    let mut rng = PatternRng::new(0x5741_5253);
    let count = ((width * height) / 4000.0).ceil() as usize;
    for _ in 0..count {
        let center = Point::new(rng.next_f64() * width, rng.next_f64() * height);
        let outer = 3.0 + rng.next_f64() * 5.0;
        surface.fill_path(&star_path(center, outer, outer * 0.4));
    }
}

fn noise<S: Surface + ?Sized>(surface: &mut S, width: f64, height: f64) {
    let mut rng = PatternRng::new(0x4e4f_4953);
    let cell = 16.0;
    for (x, y) in lattice(width, height, cell, 0.0) {
        if rng.next_f64() < 0.35 {
            surface.fill_rect(Rect::new(x, y, x + cell, y + cell));
        }
    }
}

fn bubbles<S: Surface + ?Sized>(surface: &mut S, width: f64, height: f64) {
    let mut rng = PatternRng::new(0x4255_4242);
    let count = ((width * height) / 12000.0).ceil() as usize;
    for _ in 0..count {
        let center = Point::new(rng.next_f64() * width, rng.next_f64() * height);
        let radius = 5.0 + rng.next_f64() * 25.0;
        surface.fill_path(&Circle::new(center, radius).to_path(TOLERANCE));
    }
}

fn circuit<S: Surface + ?Sized>(surface: &mut S, width: f64, height: f64) {
    let mut rng = PatternRng::new(0x4349_5243);
    let step = 40.0;
    for (x, y) in lattice(width, height, step, 20.0) {
        let roll = rng.next_f64();
        if roll < 0.4 {
            surface.fill_rect(Rect::new(x, y - 1.0, x + step, y + 1.0));
        } else if roll < 0.8 {
            surface.fill_rect(Rect::new(x - 1.0, y, x + 1.0, y + step));
        }
        if rng.next_f64() < 0.3 {
            surface.fill_rect(Rect::new(x - 3.0, y - 3.0, x + 3.0, y + 3.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCall, RecordingSurface};

    fn record(kind: PatternKind, colors: &[String]) -> Vec<DrawCall> {
        let mut surface = RecordingSurface::new();
        paint_pattern(&mut surface, kind, colors, 300.0, 200.0);
        surface.take_calls()
    }

    #[test]
    fn test_fallback_colors() {
        let calls = record(PatternKind::Checkerboard, &[]);
        assert_eq!(calls[0], DrawCall::SetFill(Paint::Solid(DEFAULT_BASE_COLOR)));
        assert_eq!(calls[1], DrawCall::FillRect(Rect::new(0.0, 0.0, 300.0, 200.0)));
        assert_eq!(calls[2], DrawCall::SetFill(Paint::Solid(DEFAULT_MOTIF_COLOR)));
    }

    #[test]
    fn test_consumes_first_two_colors() {
        let colors: Vec<String> = ["#111111", "#222222", "#333333"].iter().map(|s| s.to_string()).collect();
        let calls = record(PatternKind::Dots, &colors);
        let fills: Vec<&DrawCall> = calls.iter().filter(|c| matches!(c, DrawCall::SetFill(_))).collect();
        assert_eq!(
            fills,
            vec![
                &DrawCall::SetFill(Paint::Solid(Rgba::new(0x11, 0x11, 0x11, 255))),
                &DrawCall::SetFill(Paint::Solid(Rgba::new(0x22, 0x22, 0x22, 255))),
            ]
        );
    }

    #[test]
    fn test_checkerboard_tiles() {
        let calls = record(PatternKind::Checkerboard, &[]);
        assert!(calls.contains(&DrawCall::FillRect(Rect::new(0.0, 0.0, 50.0, 50.0))));
        assert!(calls.contains(&DrawCall::FillRect(Rect::new(50.0, 50.0, 100.0, 100.0))));
        assert!(calls.contains(&DrawCall::FillRect(Rect::new(100.0, 0.0, 150.0, 50.0))));
    }

    #[test]
    fn test_every_pattern_is_deterministic() {
        let kinds = [
            PatternKind::Dots,
            PatternKind::Grid,
            PatternKind::Diagonal,
            PatternKind::Hexagon,
            PatternKind::Waves,
            PatternKind::Triangles,
            PatternKind::Circles,
            PatternKind::Chevron,
            PatternKind::Stars,
            PatternKind::Noise,
            PatternKind::Bubbles,
            PatternKind::Circuit,
            PatternKind::Checkerboard,
        ];
        for kind in kinds {
            let a = record(kind, &[]);
            let b = record(kind, &[]);
            assert!(a.len() > 3, "{kind:?} drew no motif");
            assert_eq!(a, b, "{kind:?}");
        }
    }
}
