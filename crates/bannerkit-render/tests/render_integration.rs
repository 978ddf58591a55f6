use bannerkit_core::catalog::Catalogs;
use bannerkit_core::color::Rgba;
use bannerkit_core::export::{ExportFormat, ExportOptions};
use bannerkit_core::factory::{create_icon_element, create_image_element, create_text_element};
use bannerkit_core::scene::{BackgroundKind, BackgroundOption, BannerSize, FontSize, Scene};
use bannerkit_render::{
    DrawCall, MemorySink, Paint, RasterSurface, RecordingSurface, RenderOutcome, Renderer,
    RendererError, SourceLoader,
};
use kurbo::Point;

fn hi_scene() -> Scene {
    let mut scene = Scene::new(
        BannerSize::new("wide", "Wide", 800, 400, "Test"),
        BackgroundOption::solid("white", "White", "#FFFFFF"),
    );
    let mut text = create_text_element("Hi", scene.size());
    text.x = 10.0;
    text.y = 10.0;
    text.font_size = FontSize::Medium;
    text.color = "#000000".to_string();
    scene.push(text);
    scene
}

/// A scene without async assets, exercising gradients, patterns, icons and text.
fn busy_scene() -> Scene {
    let mut scene = Scene::new(
        BannerSize::new("busy", "Busy", 320, 160, "Test"),
        BackgroundOption::new(
            "sunset",
            "Sunset",
            BackgroundKind::Gradient {
                gradient_colors: vec!["#FF512F".to_string(), "#DD2476".to_string()],
                gradient_direction: 30.0,
            },
        ),
    );
    let size = scene.size().clone();
    let mut star = create_icon_element("star", &size);
    star.rotation = 20.0;
    star.shadow.enabled = true;
    scene.push(star);
    let mut heart = create_icon_element("heart", &size);
    heart.x = 200.0;
    heart.flip_y = true;
    scene.push(heart);
    scene.push(create_text_element("Sale", &size));
    scene
}

#[test]
fn test_hi_renders_black_text_at_anchor() {
    let mut renderer = Renderer::new(RecordingSurface::new(), Catalogs::builtin());
    let outcome = pollster::block_on(renderer.render(&hi_scene())).unwrap();
    assert_eq!(outcome, RenderOutcome::Completed { skipped_assets: 0 });

    let surface = renderer.surface();
    let text = surface
        .position(|c| {
            *c == DrawCall::FillText {
                text: "Hi".to_string(),
                origin: Point::new(10.0, 10.0),
            }
        })
        .expect("fillText(\"Hi\", 10, 10)");
    let fill = surface.calls()[..text]
        .iter()
        .rposition(|c| matches!(c, DrawCall::SetFill(_)))
        .unwrap();
    assert_eq!(surface.calls()[fill], DrawCall::SetFill(Paint::Solid(Rgba::BLACK)));
    assert_eq!(surface.save_depth(), 0);
}

#[test]
fn test_export_before_render_fails() {
    let options = ExportOptions::new(ExportFormat::Png, 0.9);

    let recording = Renderer::new(RecordingSurface::new(), Catalogs::builtin());
    assert!(matches!(
        pollster::block_on(recording.export(&options)),
        Err(RendererError::Validation(_))
    ));

    let raster = Renderer::new(RasterSurface::new(), Catalogs::builtin());
    assert!(matches!(
        pollster::block_on(raster.export(&options)),
        Err(RendererError::Validation(_))
    ));
}

#[test]
fn test_export_after_render() {
    let mut renderer = Renderer::new(RasterSurface::new(), Catalogs::builtin());
    pollster::block_on(renderer.render(&hi_scene())).unwrap();

    let blob = pollster::block_on(renderer.export(&ExportOptions::new(ExportFormat::Png, 0.9))).unwrap();
    assert_eq!(blob.mime_type, "image/png");
    assert!(!blob.bytes.is_empty());
    assert_eq!(&blob.bytes[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);

    let jpeg = pollster::block_on(renderer.export(&ExportOptions::new(ExportFormat::Jpg, 0.7))).unwrap();
    assert_eq!(jpeg.mime_type, "image/jpeg");
    assert_eq!(&jpeg.bytes[..2], &[0xFF, 0xD8]);
}

#[test]
fn test_raster_background_pixels() {
    let mut renderer = Renderer::new(RasterSurface::new(), Catalogs::builtin());
    pollster::block_on(renderer.render(&hi_scene())).unwrap();
    let surface = renderer.surface();
    assert_eq!(surface.pixel(400, 200), Some(Rgba::WHITE));
    assert_eq!(surface.pixel(799, 399), Some(Rgba::WHITE));
}

#[test]
fn test_render_is_deterministic() {
    let scene = busy_scene();

    let mut first = Renderer::new(RasterSurface::new(), Catalogs::builtin());
    let mut second = Renderer::new(RasterSurface::new(), Catalogs::builtin());
    pollster::block_on(first.render(&scene)).unwrap();
    pollster::block_on(second.render(&scene)).unwrap();
    assert_eq!(first.surface().pixels(), second.surface().pixels());

    // Re-rendering onto a used surface leaves no residue.
    pollster::block_on(first.render(&scene)).unwrap();
    assert_eq!(first.surface().pixels(), second.surface().pixels());
}

#[test]
fn test_rerender_clears_previous_frame() {
    let mut renderer = Renderer::new(RasterSurface::new(), Catalogs::builtin());
    let mut scene = busy_scene();
    pollster::block_on(renderer.render(&scene)).unwrap();

    scene.clear_elements();
    scene.set_background(BackgroundOption::solid("black", "Black", "#000000"));
    pollster::block_on(renderer.render(&scene)).unwrap();
    let pixels = renderer.surface().pixels().unwrap();
    assert!(pixels.chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
}

#[test]
fn test_missing_image_is_reported_and_skipped() {
    let mut scene = hi_scene();
    let size = scene.size().clone();
    scene.push(create_image_element("/no/such/image.png", &size));

    let sink = MemorySink::new();
    let mut renderer = Renderer::new(RecordingSurface::new(), Catalogs::builtin())
        .with_loader(SourceLoader::new())
        .with_error_sink(sink.clone());
    let outcome = pollster::block_on(renderer.render(&scene)).unwrap();

    assert_eq!(outcome, RenderOutcome::Completed { skipped_assets: 1 });
    assert_eq!(sink.failures().len(), 1);
    assert!(
        renderer
            .surface()
            .calls()
            .iter()
            .any(|c| matches!(c, DrawCall::FillText { text, .. } if text == "Hi"))
    );
}
