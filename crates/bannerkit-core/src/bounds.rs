//! Element geometry: bounding boxes, hit testing, clamping and rescaling.
//!
//! Hit testing works on the axis-aligned, unrotated box of each element.
//! Rotation only affects rendering.

use crate::scene::{BannerSize, IconElement, ImageElement, Scene, TextElement};
use kurbo::{Point, Rect};

/// Edge length used for elements without an explicit extent.
pub const DEFAULT_EXTENT: f64 = 50.0;

/// Smallest width, height or size an element may have.
pub const MIN_EXTENT: f64 = 10.0;

/// Allowed letter spacing in pixels.
pub const LETTER_SPACING_RANGE: (f64, f64) = (-50.0, 200.0);

/// Allowed line height multiplier.
pub const LINE_HEIGHT_RANGE: (f64, f64) = (0.5, 5.0);

/// Something with a top-left anchor in banner pixel space.
pub trait HasPosition {
    fn position(&self) -> Point;
    fn set_position(&mut self, position: Point);
}

/// The dimensions an element declares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extent {
    /// Explicit width and height.
    Box { width: f64, height: f64 },
    /// Square edge length.
    Radial(f64),
    /// No declared dimensions.
    Unsized,
}

impl Extent {
    /// Width and height used for bounds, with the default for unsized elements.
    pub fn effective(self) -> (f64, f64) {
        match self {
            Extent::Box { width, height } => (width, height),
            Extent::Radial(size) => (size, size),
            Extent::Unsized => (DEFAULT_EXTENT, DEFAULT_EXTENT),
        }
    }
}

/// Something with a position and an extent.
pub trait HasExtent: HasPosition {
    fn extent(&self) -> Extent;

    /// Set the extent. Ignored when the variant does not match the element's own.
    fn set_extent(&mut self, extent: Extent);

    /// Pin spacing-style metrics into their allowed ranges.
    fn clamp_metrics(&mut self) {}
}

impl HasPosition for TextElement {
    fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }
}

impl HasExtent for TextElement {
    fn extent(&self) -> Extent {
        Extent::Unsized
    }

    fn set_extent(&mut self, _extent: Extent) {}

    fn clamp_metrics(&mut self) {
        self.letter_spacing = clamp_range(self.letter_spacing, LETTER_SPACING_RANGE, 0.0);
        self.line_height = clamp_range(self.line_height, LINE_HEIGHT_RANGE, 1.2);
    }
}

impl HasPosition for ImageElement {
    fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }
}

impl HasExtent for ImageElement {
    fn extent(&self) -> Extent {
        Extent::Box {
            width: self.width,
            height: self.height,
        }
    }

    fn set_extent(&mut self, extent: Extent) {
        if let Extent::Box { width, height } = extent {
            self.width = width;
            self.height = height;
        }
    }
}

impl HasPosition for IconElement {
    fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }
}

impl HasExtent for IconElement {
    fn extent(&self) -> Extent {
        Extent::Radial(self.size)
    }

    fn set_extent(&mut self, extent: Extent) {
        if let Extent::Radial(size) = extent {
            self.size = size;
        }
    }
}

/// Axis-aligned bounding box of an element.
pub fn element_bounds<E: HasExtent + ?Sized>(element: &E) -> Rect {
    let (width, height) = element.extent().effective();
    Rect::from_origin_size(element.position(), (width, height))
}

/// Inclusive point-in-box test.
pub fn is_point_in_element<E: HasExtent + ?Sized>(element: &E, point: Point) -> bool {
    let b = element_bounds(element);
    point.x >= b.x0 && point.x <= b.x1 && point.y >= b.y0 && point.y <= b.y1
}

/// Clamp an element inside the canvas and enforce the minimum extent.
///
/// The position is clamped against the extent as it was before the minimum is applied.
pub fn validate_element_bounds<E: HasExtent + ?Sized>(element: &mut E, canvas: &BannerSize) {
    let (width, height) = element.extent().effective();
    let position = element.position();
    let x = clamp_axis(position.x, canvas.width_f64() - width);
    let y = clamp_axis(position.y, canvas.height_f64() - height);
    if x != position.x || y != position.y {
        element.set_position(Point::new(x, y));
    }

    match element.extent() {
        Extent::Box { width, height } if width < MIN_EXTENT || height < MIN_EXTENT => {
            element.set_extent(Extent::Box {
                width: width.max(MIN_EXTENT),
                height: height.max(MIN_EXTENT),
            });
        }
        Extent::Radial(size) if size < MIN_EXTENT => {
            element.set_extent(Extent::Radial(MIN_EXTENT));
        }
        _ => {}
    }
    element.clamp_metrics();
}

fn clamp_range(value: f64, (min, max): (f64, f64), fallback: f64) -> f64 {
    if value.is_finite() { value.clamp(min, max) } else { fallback }
}

/// `max(0, min(value, limit))`, with non-finite values pinned to zero.
fn clamp_axis(value: f64, limit: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.min(limit).max(0.0)
}

/// Scale position and extent by per-axis ratios, rounding to whole pixels.
///
/// Radial extents scale by the smaller ratio to keep their aspect.
pub fn scale_element<E: HasExtent + ?Sized>(element: &mut E, x_ratio: f64, y_ratio: f64) {
    let p = element.position();
    element.set_position(Point::new((p.x * x_ratio).round(), (p.y * y_ratio).round()));
    match element.extent() {
        Extent::Box { width, height } => element.set_extent(Extent::Box {
            width: (width * x_ratio).round(),
            height: (height * y_ratio).round(),
        }),
        Extent::Radial(size) => {
            element.set_extent(Extent::Radial((size * x_ratio.min(y_ratio)).round()))
        }
        Extent::Unsized => {}
    }
}

/// Rescale every element of `scene` from `old` to the scene's current size.
pub fn adjust_elements_to_new_size(scene: &mut Scene, old: &BannerSize) {
    let new = scene.size();
    let x_ratio = new.width_f64() / old.width_f64();
    let y_ratio = new.height_f64() / old.height_f64();
    if x_ratio == 1.0 && y_ratio == 1.0 {
        return;
    }
    log::debug!(
        "Rescaling {} elements by {x_ratio:.3} x {y_ratio:.3}",
        scene.element_count()
    );

    for text in scene.text_elements_mut() {
        scale_element(text, x_ratio, y_ratio);
    }
    for image in scene.images_mut() {
        scale_element(image, x_ratio, y_ratio);
    }
    for icon in scene.icons_mut() {
        scale_element(icon, x_ratio, y_ratio);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{create_icon_element, create_image_element, create_text_element};
    use crate::scene::BackgroundOption;

    fn canvas() -> BannerSize {
        BannerSize::new("test", "Test", 800, 400, "Test")
    }

    #[test]
    fn test_clamp_negative_x() {
        let mut image = create_image_element("a.png", &canvas());
        image.x = -50.0;
        image.width = 100.0;
        validate_element_bounds(&mut image, &canvas());
        assert_eq!(image.x, 0.0);
    }

    #[test]
    fn test_minimum_extent() {
        let mut image = create_image_element("a.png", &canvas());
        image.width = 5.0;
        validate_element_bounds(&mut image, &canvas());
        assert_eq!(image.width, 10.0);

        let mut icon = create_icon_element("star", &canvas());
        icon.size = 2.0;
        validate_element_bounds(&mut icon, &canvas());
        assert_eq!(icon.size, 10.0);
    }

    #[test]
    fn test_clamp_uses_default_extent_for_text() {
        let mut text = create_text_element("Hi", &canvas());
        text.x = 900.0;
        text.y = 900.0;
        validate_element_bounds(&mut text, &canvas());
        assert_eq!((text.x, text.y), (750.0, 350.0));
    }

    #[test]
    fn test_text_metrics_clamped() {
        let mut text = create_text_element("Hi", &canvas());
        text.letter_spacing = 1.0e12;
        text.line_height = f64::NAN;
        validate_element_bounds(&mut text, &canvas());
        assert_eq!(text.letter_spacing, LETTER_SPACING_RANGE.1);
        assert_eq!(text.line_height, 1.2);

        text.letter_spacing = f64::NEG_INFINITY;
        text.line_height = 0.1;
        validate_element_bounds(&mut text, &canvas());
        assert_eq!(text.letter_spacing, 0.0);
        assert_eq!(text.line_height, LINE_HEIGHT_RANGE.0);
    }

    #[test]
    fn test_oversized_element_pins_to_origin() {
        let mut image = create_image_element("a.png", &canvas());
        image.x = 30.0;
        image.width = 2000.0;
        validate_element_bounds(&mut image, &canvas());
        assert_eq!(image.x, 0.0);
    }

    #[test]
    fn test_hit_test_inclusive() {
        let mut icon = create_icon_element("star", &canvas());
        icon.x = 10.0;
        icon.y = 10.0;
        icon.size = 20.0;
        assert!(is_point_in_element(&icon, Point::new(10.0, 10.0)));
        assert!(is_point_in_element(&icon, Point::new(30.0, 30.0)));
        assert!(!is_point_in_element(&icon, Point::new(30.1, 30.0)));
        assert_eq!(element_bounds(&icon), Rect::new(10.0, 10.0, 30.0, 30.0));
    }

    #[test]
    fn test_hit_test_ignores_rotation() {
        let mut image = create_image_element("a.png", &canvas());
        image.rotation = 45.0;
        assert!(is_point_in_element(&image, Point::new(image.x, image.y)));
    }

    #[test]
    fn test_adjust_scales_linearly() {
        let old = canvas();
        let mut scene = Scene::new(old.clone(), BackgroundOption::solid("w", "W", "#FFFFFF"));
        let mut text = create_text_element("Edge", &old);
        text.x = 800.0;
        scene.push(text);
        let mut image = create_image_element("a.png", &old);
        image.width = 100.0;
        image.height = 50.0;
        scene.push(image);
        let mut icon = create_icon_element("star", &old);
        icon.size = 64.0;
        scene.push(icon);

        scene.set_size(BannerSize::new("big", "Big", 1600, 600, "Test"));

        assert_eq!(scene.text_elements()[0].x, 1600.0);
        assert_eq!(scene.images()[0].width, 200.0);
        assert_eq!(scene.images()[0].height, 75.0);
        assert_eq!(scene.icons()[0].size, 96.0);
    }
}
