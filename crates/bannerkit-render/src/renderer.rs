//! Scene renderer.
//!
//! Paints a [`Scene`] onto a [`Surface`] in a fixed order: background, images,
//! icons, then texts. Every element scopes its transform, clip and style
//! changes with a [`StateGuard`], so nothing leaks into the next element.

use crate::assets::{DecodedImage, ImageLoader, LoadError, SourceLoader};
use crate::diagnostics::{ErrorSink, LogSink, RenderFailure};
use crate::error::{RenderResult, RendererError};
use crate::glyphs::{GlyphResolver, IconGlyph};
use crate::paint::{self, FontSpec, Paint, ShadowStyle, TextAlign, TextBaseline};
use crate::patterns;
use crate::surface::{StateGuard, Surface};
use bannerkit_core::color::{self, Rgba};
use bannerkit_core::export::ExportOptions;
use bannerkit_core::scene::{
    BackgroundKind, ColorType, IconElement, ImageElement, Scene, Shadow, TextElement,
};
use kurbo::{Affine, Point, Rect, RoundedRect, Shape, Vec2};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Flat fill used when a background cannot be painted as described.
pub const NEUTRAL_FILL: Rgba = Rgba::new(0xf0, 0xf0, 0xf0, 0xff);

/// How a render call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Every layer was painted; `skipped_assets` images failed to load.
    Completed { skipped_assets: usize },
    /// A newer render was requested while this one awaited an asset.
    Superseded,
}

/// Handle that marks in-flight renders as obsolete.
#[derive(Debug, Clone)]
pub struct RenderInvalidator {
    generation: Arc<AtomicU64>,
}

impl RenderInvalidator {
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

/// An encoded export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportBlob {
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Renders scenes onto an owned surface.
pub struct Renderer<S: Surface> {
    surface: S,
    glyphs: Box<dyn GlyphResolver>,
    loader: Box<dyn ImageLoader>,
    sink: Box<dyn ErrorSink>,
    generation: Arc<AtomicU64>,
    image_cache: HashMap<String, DecodedImage>,
    has_rendered: bool,
}

impl<S: Surface> Renderer<S> {
    /// Create a renderer with the default loader and a logging error sink.
    pub fn new(surface: S, glyphs: impl GlyphResolver + 'static) -> Self {
        Self {
            surface,
            glyphs: Box::new(glyphs),
            loader: Box::new(SourceLoader::new()),
            sink: Box::new(LogSink),
            generation: Arc::new(AtomicU64::new(0)),
            image_cache: HashMap::new(),
            has_rendered: false,
        }
    }

    pub fn with_loader(mut self, loader: impl ImageLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self.image_cache.clear();
        self
    }

    pub fn with_error_sink(mut self, sink: impl ErrorSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Handle for superseding renders from elsewhere.
    pub fn invalidator(&self) -> RenderInvalidator {
        RenderInvalidator {
            generation: Arc::clone(&self.generation),
        }
    }

    /// Drop every cached decoded image.
    pub fn clear_image_cache(&mut self) {
        self.image_cache.clear();
    }

    /// Paint `scene` from scratch.
    ///
    /// Image load failures are reported to the error sink and skipped; the
    /// render only fails if the surface cannot be sized.
    pub async fn render(&mut self, scene: &Scene) -> RenderResult<RenderOutcome> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.has_rendered = false;
        let size = scene.size();
        self.surface.resize(size.width, size.height)?;
        self.surface.clear();
        log::debug!(
            "Rendering {}x{} scene with {} elements",
            size.width,
            size.height,
            scene.element_count()
        );

        let mut skipped_assets = 0;
        let (width, height) = (size.width_f64(), size.height_f64());

        if let BackgroundKind::Image {
            value,
            crop_x,
            crop_y,
            scale,
        } = &scene.background().kind
        {
            let loaded = self.image(value).await;
            if self.is_superseded(generation) {
                return Ok(RenderOutcome::Superseded);
            }
            match loaded {
                Ok(image) => {
                    let dest = cover_rect(image.aspect_ratio(), width, height, *crop_x, *crop_y, *scale);
                    self.surface.draw_image(&image, dest);
                }
                Err(e) => {
                    skipped_assets += 1;
                    self.sink.report(RenderFailure::new(value.as_str(), e));
                    self.surface.set_fill(Paint::Solid(NEUTRAL_FILL));
                    self.surface.fill_rect(Rect::new(0.0, 0.0, width, height));
                }
            }
        } else {
            let kind = &scene.background().kind;
            self.report_invalid_colors(&scene.background().id, background_colors(kind));
            self.paint_background(kind, width, height);
        }

        for element in scene.images() {
            let loaded = self.image(&element.src).await;
            if self.is_superseded(generation) {
                return Ok(RenderOutcome::Superseded);
            }
            match loaded {
                Ok(image) => self.paint_image(element, &image),
                Err(e) => {
                    skipped_assets += 1;
                    self.sink
                        .report(RenderFailure::new(format!("{} ({})", element.src, element.id), e));
                }
            }
        }

        for icon in scene.icons() {
            let mut colors =
                style_colors(icon.color_type, &icon.color, &icon.gradient_colors, &icon.shadow);
            if self.glyphs.resolve(&icon.icon_type).is_none() {
                colors.clear();
            }
            self.report_invalid_colors(&icon.id, colors);
            self.paint_icon(icon);
        }

        for text in scene.text_elements() {
            let mut colors =
                style_colors(text.color_type, &text.color, &text.gradient_colors, &text.shadow);
            if text.stroke.enabled {
                colors.push(&text.stroke.color);
            }
            self.report_invalid_colors(&text.id, colors);
            self.paint_text(text);
        }

        self.has_rendered = true;
        Ok(RenderOutcome::Completed { skipped_assets })
    }

    /// Encode the last rendered frame.
    pub async fn export(&self, options: &ExportOptions) -> RenderResult<ExportBlob> {
        if !self.has_rendered || self.surface.dimensions().is_none() {
            return Err(RendererError::Validation(
                "nothing has been rendered yet".to_string(),
            ));
        }
        let bytes = self.surface.encode(options)?;
        log::info!(
            "Exported {} bytes as {}",
            bytes.len(),
            options.format.mime_type()
        );
        Ok(ExportBlob {
            mime_type: options.format.mime_type(),
            bytes,
        })
    }

    /// Report unparseable colors; painting substitutes fallbacks on its own.
    fn report_invalid_colors(&self, owner: &str, colors: Vec<&str>) {
        for value in colors {
            if let Err(e) = paint::parse_color(value) {
                self.sink.report(RenderFailure::new(owner, e));
            }
        }
    }

    fn is_superseded(&self, generation: u64) -> bool {
        let superseded = self.generation.load(Ordering::SeqCst) != generation;
        if superseded {
            log::debug!("Render {generation} superseded");
        }
        superseded
    }

    async fn image(&mut self, source: &str) -> Result<DecodedImage, LoadError> {
        if let Some(image) = self.image_cache.get(source) {
            return Ok(image.clone());
        }
        let image = self.loader.load(source).await?;
        self.image_cache.insert(source.to_string(), image.clone());
        Ok(image)
    }

    fn paint_background(&mut self, kind: &BackgroundKind, width: f64, height: f64) {
        let mut s = StateGuard::new(&mut self.surface);
        let full = Rect::new(0.0, 0.0, width, height);
        match kind {
            BackgroundKind::Solid { value } => {
                s.set_fill(Paint::css(value, NEUTRAL_FILL));
                s.fill_rect(full);
            }
            BackgroundKind::Gradient {
                gradient_colors,
                gradient_direction,
            } => {
                let (start, end) = gradient_axis(*gradient_direction, width, height);
                s.set_fill(Paint::linear(start, end, gradient_colors, NEUTRAL_FILL));
                s.fill_rect(full);
            }
            BackgroundKind::Fancy {
                pattern_type,
                pattern_colors,
            } => patterns::paint_pattern(&mut *s, *pattern_type, pattern_colors, width, height),
            BackgroundKind::Image { .. } => {}
        }
    }

    fn paint_image(&mut self, element: &ImageElement, image: &DecodedImage) {
        if element.width <= 0.0 || element.height <= 0.0 {
            return;
        }
        let rect = Rect::new(
            element.x,
            element.y,
            element.x + element.width,
            element.y + element.height,
        );
        let mut s = StateGuard::new(&mut self.surface);
        s.set_global_alpha(element.opacity);
        if element.rotation != 0.0 {
            let center = rect.center().to_vec2();
            s.translate(center);
            s.rotate(element.rotation.to_radians());
            s.translate(-center);
        }
        if element.border_radius > 0.0 {
            let radius = element.border_radius / 100.0 * element.width.min(element.height) / 2.0;
            s.clip_path(&RoundedRect::from_rect(rect, radius).to_path(0.1));
        }
        s.draw_image(image, rect);
    }

    fn paint_icon(&mut self, icon: &IconElement) {
        let Some(glyph) = self.glyphs.resolve(&icon.icon_type) else {
            log::debug!("No glyph for icon type {:?}", icon.icon_type);
            return;
        };
        let half = icon.size / 2.0;
        let mut s = StateGuard::new(&mut self.surface);
        s.set_global_alpha(icon.opacity);
        s.translate(Vec2::new(icon.x + half, icon.y + half));
        if icon.rotation != 0.0 {
            s.rotate(icon.rotation.to_radians());
        }
        if icon.flip_x {
            s.scale(-1.0, 1.0);
        }
        if icon.flip_y {
            s.scale(1.0, -1.0);
        }
        if let Some(shadow) = ShadowStyle::from_settings(&icon.shadow) {
            s.set_shadow(Some(shadow));
        }
        s.set_fill(element_fill(
            icon.color_type,
            &icon.color,
            &icon.gradient_colors,
            Point::new(-half, -half),
            Point::new(half, half),
        ));

        match glyph {
            IconGlyph::Path(path) => s.fill_path(&(Affine::scale(icon.size) * path)),
            IconGlyph::Symbol(symbol) => {
                s.set_font(FontSpec::new("normal", icon.size, "Arial"));
                s.set_text_align(TextAlign::Center);
                s.set_text_baseline(TextBaseline::Middle);
                s.fill_text(&symbol, Point::ZERO);
            }
        }
    }

    fn paint_text(&mut self, text: &TextElement) {
        let anchor = Point::new(text.x, text.y);
        let mut s = StateGuard::new(&mut self.surface);
        s.set_font(
            FontSpec::new(
                text.font_weight.as_str(),
                text.font_size.px(),
                text.font_family.as_str(),
            )
            .with_letter_spacing(text.letter_spacing),
        );
        s.set_text_align(text.text_align);
        s.set_global_alpha(text.opacity);
        if text.rotation != 0.0 {
            s.translate(anchor.to_vec2());
            s.rotate(text.rotation.to_radians());
            s.translate(-anchor.to_vec2());
        }
        if let Some(shadow) = ShadowStyle::from_settings(&text.shadow) {
            s.set_shadow(Some(shadow));
        }
        let fill = element_fill(
            text.color_type,
            &text.color,
            &text.gradient_colors,
            anchor,
            anchor + Vec2::new(100.0, 100.0),
        );
        if text.stroke.enabled {
            s.set_stroke(Paint::css(&text.stroke.color, Rgba::BLACK), text.stroke.width);
            s.stroke_text(&text.text, anchor);
        }
        s.set_fill(fill);
        s.fill_text(&text.text, anchor);
    }
}

/// Color strings a background paints with.
fn background_colors(kind: &BackgroundKind) -> Vec<&str> {
    match kind {
        BackgroundKind::Solid { value } => vec![value.as_str()],
        BackgroundKind::Gradient { gradient_colors, .. } => {
            gradient_colors.iter().map(String::as_str).collect()
        }
        BackgroundKind::Fancy { pattern_colors, .. } => {
            pattern_colors.iter().take(2).map(String::as_str).collect()
        }
        BackgroundKind::Image { .. } => Vec::new(),
    }
}

/// Color strings a styleable element paints with.
fn style_colors<'a>(
    color_type: ColorType,
    color: &'a str,
    gradient_colors: &'a [String],
    shadow: &'a Shadow,
) -> Vec<&'a str> {
    let mut colors = vec![color];
    if color_type == ColorType::Gradient {
        colors.extend(gradient_colors.iter().map(String::as_str));
    }
    if shadow.enabled {
        colors.push(&shadow.color);
    }
    colors
}

/// Fill for a styleable element; gradients fall back to the flat color.
fn element_fill(
    color_type: ColorType,
    color: &str,
    gradient_colors: &[String],
    start: Point,
    end: Point,
) -> Paint {
    match color_type {
        ColorType::Solid => Paint::css(color, Rgba::BLACK),
        ColorType::Gradient => {
            let fallback = color::parse_css_color(color).unwrap_or(Rgba::BLACK);
            Paint::linear(start, end, gradient_colors, fallback)
        }
    }
}

/// Gradient axis through the canvas center at `degrees`, spanning the canvas.
pub fn gradient_axis(degrees: f64, width: f64, height: f64) -> (Point, Point) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let center = Point::new(width / 2.0, height / 2.0);
    let half = Vec2::new(cos * width / 2.0, sin * height / 2.0);
    (center - half, center + half)
}

/// Destination rect that covers a `width x height` canvas with an image of `aspect`.
///
/// `scale` zooms past the cover size; `crop_x`/`crop_y` are percentages
/// choosing which part of the overflow stays visible.
pub fn cover_rect(aspect: f64, width: f64, height: f64, crop_x: f64, crop_y: f64, scale: f64) -> Rect {
    let scale = if scale > 0.0 { scale } else { 1.0 };
    let (draw_width, draw_height) = if aspect > width / height {
        let h = height * scale;
        (h * aspect, h)
    } else {
        let w = width * scale;
        (w, w / aspect)
    };
    let x = -(draw_width - width) * crop_x.clamp(0.0, 100.0) / 100.0;
    let y = -(draw_height - height) * crop_y.clamp(0.0, 100.0) / 100.0;
    Rect::new(x, y, x + draw_width, y + draw_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::BoxFuture;
    use crate::diagnostics::MemorySink;
    use crate::recording::{DrawCall, RecordingSurface};
    use bannerkit_core::catalog::Catalogs;
    use bannerkit_core::factory::{create_icon_element, create_image_element, create_text_element};
    use bannerkit_core::scene::{BackgroundOption, BannerSize, PatternKind};
    use std::sync::atomic::AtomicUsize;

    /// Serves a 4x2 image for any source not starting with "missing".
    #[derive(Default)]
    struct StubLoader {
        loads: Arc<AtomicUsize>,
        invalidate: Option<RenderInvalidator>,
    }

    impl ImageLoader for StubLoader {
        fn load<'a>(&'a self, source: &'a str) -> BoxFuture<'a, Result<DecodedImage, LoadError>> {
            Box::pin(async move {
                self.loads.fetch_add(1, Ordering::SeqCst);
                if let Some(invalidator) = &self.invalidate {
                    invalidator.invalidate();
                }
                if source.starts_with("missing") {
                    Err(LoadError::Io {
                        path: source.to_string(),
                        message: "not found".to_string(),
                    })
                } else {
                    DecodedImage::filled(4, 2, [10, 20, 30, 255])
                }
            })
        }
    }

    fn scene(background: BackgroundOption) -> Scene {
        Scene::new(BannerSize::new("test", "Test", 400, 200, "Test"), background)
    }

    fn white() -> BackgroundOption {
        BackgroundOption::solid("white", "White", "#FFFFFF")
    }

    fn renderer() -> Renderer<RecordingSurface> {
        Renderer::new(RecordingSurface::new(), Catalogs::builtin()).with_loader(StubLoader::default())
    }

    #[test]
    fn test_solid_background_first() {
        let mut r = renderer();
        let outcome = pollster::block_on(r.render(&scene(white()))).unwrap();
        assert_eq!(outcome, RenderOutcome::Completed { skipped_assets: 0 });
        let calls = r.surface().calls();
        assert_eq!(calls[0], DrawCall::Resize { width: 400, height: 200 });
        assert_eq!(calls[1], DrawCall::Clear);
        assert!(calls.contains(&DrawCall::SetFill(Paint::Solid(Rgba::WHITE))));
        assert!(calls.contains(&DrawCall::FillRect(Rect::new(0.0, 0.0, 400.0, 200.0))));
        assert_eq!(r.surface().save_depth(), 0);
    }

    #[test]
    fn test_gradient_axis() {
        let (start, end) = gradient_axis(0.0, 400.0, 200.0);
        assert_eq!(start, Point::new(0.0, 100.0));
        assert_eq!(end, Point::new(400.0, 100.0));

        let (start, end) = gradient_axis(90.0, 400.0, 200.0);
        assert!((start.x - 200.0).abs() < 1e-9 && start.y.abs() < 1e-9);
        assert!((end.x - 200.0).abs() < 1e-9 && (end.y - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_cover_rect() {
        // Wide image on a 2:1 canvas: height-led.
        let r = cover_rect(4.0, 400.0, 200.0, 50.0, 50.0, 1.0);
        assert_eq!(r, Rect::new(-200.0, 0.0, 600.0, 200.0));

        // Tall image: width-led, crop to the top.
        let r = cover_rect(1.0, 400.0, 200.0, 50.0, 0.0, 1.0);
        assert_eq!(r, Rect::new(0.0, 0.0, 400.0, 400.0));

        // Zoom keeps covering.
        let r = cover_rect(2.0, 400.0, 200.0, 0.0, 100.0, 2.0);
        assert_eq!(r, Rect::new(0.0, -200.0, 800.0, 200.0));
    }

    #[test]
    fn test_image_element_clip_and_rotation() {
        let mut s = scene(white());
        let mut image = create_image_element("photo.png", s.size());
        image.border_radius = 50.0;
        image.rotation = 90.0;
        s.push(image);

        let mut r = renderer();
        pollster::block_on(r.render(&s)).unwrap();
        let surface = r.surface();
        let clip = surface.position(|c| matches!(c, DrawCall::Clip(_))).unwrap();
        let rotate = surface.position(|c| matches!(c, DrawCall::Rotate(_))).unwrap();
        let draw = surface
            .position(|c| matches!(c, DrawCall::DrawImage { width: 4, height: 2, .. }))
            .unwrap();
        assert!(rotate < clip && clip < draw);
        assert_eq!(surface.save_depth(), 0);
    }

    #[test]
    fn test_failed_image_is_skipped_and_reported() {
        let mut s = scene(white());
        let size = s.size().clone();
        s.push(create_image_element("missing.png", &size));
        s.push(create_image_element("present.png", &size));
        s.push(create_text_element("After", &size));

        let sink = MemorySink::new();
        let mut r = renderer().with_error_sink(sink.clone());
        let outcome = pollster::block_on(r.render(&s)).unwrap();

        assert_eq!(outcome, RenderOutcome::Completed { skipped_assets: 1 });
        let failures = sink.failures();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].source.starts_with("missing.png"));
        let calls = r.surface().calls();
        assert_eq!(
            calls.iter().filter(|c| matches!(c, DrawCall::DrawImage { .. })).count(),
            1
        );
        assert!(calls.iter().any(|c| matches!(c, DrawCall::FillText { text, .. } if text == "After")));
    }

    #[test]
    fn test_background_image_fallback() {
        let sink = MemorySink::new();
        let mut r = renderer().with_error_sink(sink.clone());
        pollster::block_on(r.render(&scene(BackgroundOption::image("missing-bg.jpg")))).unwrap();
        assert!(r.surface().calls().contains(&DrawCall::SetFill(Paint::Solid(NEUTRAL_FILL))));
        assert_eq!(sink.failures().len(), 1);
    }

    #[test]
    fn test_background_image_cover() {
        let mut r = renderer();
        pollster::block_on(r.render(&scene(BackgroundOption::image("bg.jpg")))).unwrap();
        // 2:1 image on a 2:1 canvas fills it exactly.
        assert!(r.surface().calls().contains(&DrawCall::DrawImage {
            width: 4,
            height: 2,
            dest: Rect::new(0.0, 0.0, 400.0, 200.0),
        }));
    }

    #[test]
    fn test_fancy_background_uses_pattern() {
        let background = BackgroundOption::new(
            "fancy-dots",
            "Dots",
            BackgroundKind::Fancy {
                pattern_type: PatternKind::Dots,
                pattern_colors: vec!["#112233".to_string(), "#445566".to_string()],
            },
        );
        let mut r = renderer();
        pollster::block_on(r.render(&scene(background))).unwrap();
        let calls = r.surface().calls();
        assert!(calls.contains(&DrawCall::SetFill(Paint::Solid(Rgba::new(0x11, 0x22, 0x33, 255)))));
        assert!(calls.contains(&DrawCall::SetFill(Paint::Solid(Rgba::new(0x44, 0x55, 0x66, 255)))));
    }

    #[test]
    fn test_icon_transforms_and_glyphs() {
        let mut s = scene(white());
        let size = s.size().clone();
        let mut star = create_icon_element("star", &size);
        star.flip_x = true;
        star.rotation = 45.0;
        s.push(star);
        s.push(create_icon_element("trophy", &size));
        s.push(create_icon_element("no-such-icon", &size));

        let mut r = renderer();
        pollster::block_on(r.render(&s)).unwrap();
        let surface = r.surface();
        let calls = surface.calls();

        let rotate = surface.position(|c| matches!(c, DrawCall::Rotate(_))).unwrap();
        let flip = surface.position(|c| *c == DrawCall::Scale(-1.0, 1.0)).unwrap();
        let path = surface.position(|c| matches!(c, DrawCall::FillPath(_))).unwrap();
        assert!(rotate < flip && flip < path);
        assert!(calls.contains(&DrawCall::SetTextBaseline(TextBaseline::Middle)));
        assert!(calls.iter().any(|c| matches!(c, DrawCall::FillText { text, origin } if text == "🏆" && *origin == Point::ZERO)));
        // The unknown icon draws nothing: one path and one symbol.
        assert_eq!(calls.iter().filter(|c| matches!(c, DrawCall::FillPath(_))).count(), 1);
        assert_eq!(surface.save_depth(), 0);
    }

    #[test]
    fn test_text_rotation_and_stroke_order() {
        let mut s = scene(white());
        let mut text = create_text_element("Outlined", s.size());
        text.x = 50.0;
        text.y = 60.0;
        text.rotation = 30.0;
        text.stroke.enabled = true;
        text.shadow.enabled = true;
        s.push(text);

        let mut r = renderer();
        pollster::block_on(r.render(&s)).unwrap();
        let surface = r.surface();
        let calls = surface.calls();

        let rotate = surface.position(|c| matches!(c, DrawCall::Rotate(_))).unwrap();
        assert_eq!(calls[rotate - 1], DrawCall::Translate(Vec2::new(50.0, 60.0)));
        assert_eq!(calls[rotate + 1], DrawCall::Translate(Vec2::new(-50.0, -60.0)));
        assert!(calls.iter().any(|c| matches!(c, DrawCall::SetShadow(Some(_)))));

        let stroke = surface.position(|c| matches!(c, DrawCall::StrokeText { .. })).unwrap();
        let fill = surface.position(|c| matches!(c, DrawCall::FillText { .. })).unwrap();
        assert!(stroke < fill);
        assert!(calls.contains(&DrawCall::SetFont(FontSpec::new("600", 36.0, "Inter"))));
    }

    #[test]
    fn test_text_gradient_box() {
        let mut s = scene(white());
        let mut text = create_text_element("Gradient", s.size());
        text.color_type = ColorType::Gradient;
        s.push(text.clone());

        let mut r = renderer();
        pollster::block_on(r.render(&s)).unwrap();
        let expected = Paint::linear(
            Point::new(text.x, text.y),
            Point::new(text.x + 100.0, text.y + 100.0),
            &text.gradient_colors,
            Rgba::BLACK,
        );
        assert!(r.surface().calls().contains(&DrawCall::SetFill(expected)));
    }

    #[test]
    fn test_images_are_cached() {
        let loads = Arc::new(AtomicUsize::new(0));
        let mut s = scene(white());
        let size = s.size().clone();
        s.push(create_image_element("a.png", &size));
        s.push(create_image_element("a.png", &size));

        let mut r = Renderer::new(RecordingSurface::new(), Catalogs::builtin()).with_loader(StubLoader {
            loads: Arc::clone(&loads),
            invalidate: None,
        });
        pollster::block_on(r.render(&s)).unwrap();
        pollster::block_on(r.render(&s)).unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 1);

        r.clear_image_cache();
        pollster::block_on(r.render(&s)).unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_superseded_render_stops() {
        let mut s = scene(white());
        let size = s.size().clone();
        s.push(create_image_element("a.png", &size));
        s.push(create_text_element("Never", &size));

        let r = Renderer::new(RecordingSurface::new(), Catalogs::builtin());
        let invalidator = r.invalidator();
        let mut r = r.with_loader(StubLoader {
            loads: Arc::default(),
            invalidate: Some(invalidator),
        });
        let outcome = pollster::block_on(r.render(&s)).unwrap();
        assert_eq!(outcome, RenderOutcome::Superseded);
        assert!(!r.surface().calls().iter().any(|c| matches!(c, DrawCall::FillText { .. })));
    }

    #[test]
    fn test_malformed_colors_are_reported() {
        let mut s = scene(BackgroundOption::solid("broken", "Broken", "not-a-color"));
        let size = s.size().clone();
        let mut text = create_text_element("Hi", &size);
        text.color = "#zzzzzz".to_string();
        let text_id = text.id.clone();
        s.push(text);

        let sink = MemorySink::new();
        let mut r = renderer().with_error_sink(sink.clone());
        let outcome = pollster::block_on(r.render(&s)).unwrap();
        assert_eq!(outcome, RenderOutcome::Completed { skipped_assets: 0 });

        let failures = sink.failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].source, "broken");
        assert!(failures[0].error.contains("not-a-color"));
        assert_eq!(failures[1].source, text_id);
        assert!(failures[1].error.contains("#zzzzzz"));

        // Fallback fills are still painted.
        let calls = r.surface().calls();
        assert!(calls.contains(&DrawCall::SetFill(Paint::Solid(NEUTRAL_FILL))));
        assert!(calls.contains(&DrawCall::SetFill(Paint::Solid(Rgba::BLACK))));
    }

    #[test]
    fn test_valid_colors_report_nothing() {
        let mut s = scene(white());
        let size = s.size().clone();
        let mut text = create_text_element("Hi", &size);
        text.stroke.enabled = true;
        text.shadow.enabled = true;
        s.push(text);
        s.push(create_icon_element("star", &size));

        let sink = MemorySink::new();
        let mut r = renderer().with_error_sink(sink.clone());
        pollster::block_on(r.render(&s)).unwrap();
        assert!(sink.failures().is_empty());
    }

    #[test]
    fn test_superseded_render_blocks_export() {
        let mut s = scene(white());
        let mut r = Renderer::new(crate::raster::RasterSurface::new(), Catalogs::builtin());
        pollster::block_on(r.render(&s)).unwrap();
        assert!(pollster::block_on(r.export(&ExportOptions::default())).is_ok());

        let size = s.size().clone();
        s.push(create_image_element("a.png", &size));
        let invalidator = r.invalidator();
        let mut r = r.with_loader(StubLoader {
            loads: Arc::default(),
            invalidate: Some(invalidator),
        });
        let outcome = pollster::block_on(r.render(&s)).unwrap();
        assert_eq!(outcome, RenderOutcome::Superseded);
        assert!(matches!(
            pollster::block_on(r.export(&ExportOptions::default())),
            Err(RendererError::Validation(_))
        ));

        let mut r = r.with_loader(StubLoader::default());
        pollster::block_on(r.render(&s)).unwrap();
        assert!(pollster::block_on(r.export(&ExportOptions::default())).is_ok());
    }

    #[test]
    fn test_failed_resize_blocks_export() {
        let mut r = Renderer::new(crate::raster::RasterSurface::new(), Catalogs::builtin());
        let mut s = scene(white());
        pollster::block_on(r.render(&s)).unwrap();
        s.set_size(BannerSize::new("huge", "Huge", 20_000, 20_000, "Test"));
        assert!(pollster::block_on(r.render(&s)).is_err());
        assert!(matches!(
            pollster::block_on(r.export(&ExportOptions::default())),
            Err(RendererError::Validation(_))
        ));
    }

    #[test]
    fn test_export_requires_render() {
        let r = renderer();
        let result = pollster::block_on(r.export(&ExportOptions::default()));
        assert!(matches!(result, Err(RendererError::Validation(_))));
    }

    #[test]
    fn test_oversized_render_fails() {
        struct NoGlyphs;
        impl GlyphResolver for NoGlyphs {
            fn resolve(&self, _icon_type: &str) -> Option<IconGlyph> {
                None
            }
        }
        let mut s = scene(white());
        s.set_size(BannerSize::new("huge", "Huge", 20_000, 20_000, "Test"));
        let mut r = Renderer::new(crate::raster::RasterSurface::new(), NoGlyphs);
        assert!(matches!(
            pollster::block_on(r.render(&s)),
            Err(RendererError::Surface(_))
        ));
        assert!(matches!(
            pollster::block_on(r.export(&ExportOptions::default())),
            Err(RendererError::Validation(_))
        ));
    }
}
