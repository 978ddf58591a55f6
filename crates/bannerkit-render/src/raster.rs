//! CPU raster surface backed by tiny-skia, with fontdue text.

use crate::assets::DecodedImage;
use crate::error::{RenderResult, RendererError};
use crate::paint::{FontSpec, Paint, ShadowStyle, TextAlign, TextBaseline};
use crate::surface::Surface;
use bannerkit_core::color::Rgba;
use bannerkit_core::export::{ExportFormat, ExportOptions};
use kurbo::{Affine, BezPath, PathEl, Point, Rect, Vec2};
use std::fmt;
use std::path::Path;
use tiny_skia::{
    FillRule, FilterQuality, IntSize, Mask, Pixmap, PixmapPaint, SpreadMode, Transform,
};

/// Maximum surface edge in pixels.
pub const MAX_DIMENSION: u32 = 16384;

/// Registered font faces.
#[derive(Default)]
pub struct FontBook {
    faces: Vec<(String, fontdue::Font)>,
}

impl fmt::Debug for FontBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.faces.iter().map(|(family, _)| family))
            .finish()
    }
}

impl FontBook {
    /// Register a face under a family name.
    pub fn register(&mut self, family: impl Into<String>, bytes: Vec<u8>) -> RenderResult<()> {
        let family = family.into();
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| RendererError::AssetLoad(format!("font {family}: {e}")))?;
        log::info!("Registered font family {family}");
        self.faces.push((family, font));
        Ok(())
    }

    /// Register a font file; the family name is the file stem.
    pub fn register_file(&mut self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| RendererError::AssetLoad(format!("{}: {e}", path.display())))?;
        let family = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "default".to_string());
        self.register(family, bytes)
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Faces in preference order: families named by `font` first, then the rest.
    fn select(&self, font: &FontSpec) -> Vec<&fontdue::Font> {
        let mut ordered: Vec<&fontdue::Font> = Vec::with_capacity(self.faces.len());
        for family in font.families() {
            for (name, face) in &self.faces {
                if name.eq_ignore_ascii_case(family) && !ordered.iter().any(|f| std::ptr::eq(*f, face)) {
                    ordered.push(face);
                }
            }
        }
        for (_, face) in &self.faces {
            if !ordered.iter().any(|f| std::ptr::eq(*f, face)) {
                ordered.push(face);
            }
        }
        ordered
    }
}

#[derive(Clone)]
struct CanvasState {
    transform: Affine,
    alpha: f64,
    fill: Paint,
    stroke: Paint,
    line_width: f64,
    shadow: Option<ShadowStyle>,
    font: FontSpec,
    align: TextAlign,
    baseline: TextBaseline,
    clip: Option<Mask>,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            alpha: 1.0,
            fill: Paint::default(),
            stroke: Paint::default(),
            line_width: 1.0,
            shadow: None,
            font: FontSpec::default(),
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
            clip: None,
        }
    }
}

/// What a single draw call covers.
#[derive(Clone, Copy)]
enum Op<'a> {
    Rect(Rect),
    Path(&'a BezPath),
    Text { text: &'a str, origin: Point, stroke: bool },
}

/// Coverage of a run of text in user space, anchored at `origin` (top-left).
struct TextMask {
    origin: Vec2,
    width: usize,
    height: usize,
    coverage: Vec<u8>,
}

/// A tiny-skia pixmap with a canvas-style state stack.
#[derive(Default)]
pub struct RasterSurface {
    pixmap: Option<Pixmap>,
    state: CanvasState,
    stack: Vec<CanvasState>,
    fonts: FontBook,
    warned_no_font: bool,
}

impl fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterSurface")
            .field("dimensions", &self.dimensions())
            .field("depth", &self.stack.len())
            .field("fonts", &self.fonts)
            .finish()
    }
}

impl RasterSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fonts(fonts: FontBook) -> Self {
        Self {
            fonts,
            ..Self::default()
        }
    }

    pub fn fonts_mut(&mut self) -> &mut FontBook {
        &mut self.fonts
    }

    /// Premultiplied RGBA8 pixels, or `None` before the first resize.
    pub fn pixels(&self) -> Option<&[u8]> {
        self.pixmap.as_ref().map(|p| p.data())
    }

    /// Straight-alpha color of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let c = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some(Rgba::new(c.red(), c.green(), c.blue(), c.alpha()))
    }

    fn draw(&mut self, op: Op<'_>) {
        let Self {
            pixmap,
            state,
            fonts,
            warned_no_font,
            ..
        } = self;
        let Some(pixmap) = pixmap.as_mut() else {
            return;
        };
        if state.alpha <= 0.0 {
            return;
        }

        let text_mask = match op {
            Op::Text { text, origin, stroke } => {
                if fonts.is_empty() {
                    if !*warned_no_font {
                        log::warn!("No font registered; text is not drawn");
                        *warned_no_font = true;
                    }
                    return;
                }
                let dilate = if stroke { (state.line_width / 2.0).ceil() as usize } else { 0 };
                let Some(visible) = visible_user_rect(state, pixmap.width(), pixmap.height()) else {
                    return;
                };
                match layout_text(fonts, state, text, origin, dilate, visible) {
                    Some(mask) => Some(mask),
                    None => return,
                }
            }
            _ => None,
        };

        let paint = match op {
            Op::Text { stroke: true, .. } => &state.stroke,
            _ => &state.fill,
        };
        let ts = to_skia(state.transform);
        let clip = state.clip.as_ref();

        if let Some(shadow) = state.shadow.filter(|s| s.color.a > 0) {
            if let Some(mut layer) = Pixmap::new(pixmap.width(), pixmap.height()) {
                let shadow_ts = Transform::from_translate(shadow.offset.x as f32, shadow.offset.y as f32)
                    .pre_concat(ts);
                let shadow_paint = Paint::Solid(shadow.color);
                render(&mut layer, op, text_mask.as_ref(), &shadow_paint, state.alpha, shadow_ts, None);
                box_blur(&mut layer, (shadow.blur / 2.0).round() as usize);
                pixmap.draw_pixmap(0, 0, layer.as_ref(), &PixmapPaint::default(), Transform::identity(), clip);
            }
        }
        render(pixmap, op, text_mask.as_ref(), paint, state.alpha, ts, clip);
    }
}

/// The surface area, grown by the shadow reach, mapped back into user space.
fn visible_user_rect(state: &CanvasState, width: u32, height: u32) -> Option<Rect> {
    let det = state.transform.determinant();
    if !det.is_finite() || det.abs() < 1e-12 {
        return None;
    }
    let reach = state
        .shadow
        .map_or(0.0, |s| s.offset.x.abs().max(s.offset.y.abs()) + s.blur);
    let device = Rect::new(0.0, 0.0, width as f64, height as f64).inflate(reach, reach);
    let user = state.transform.inverse().transform_rect_bbox(device);
    user.is_finite().then_some(user)
}

fn to_skia(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

fn skia_color(c: Rgba) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = tiny_skia::PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p) => builder.quad_to(p1.x as f32, p1.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(p1, p2, p) => builder.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

/// tiny-skia paint for a fill, with the gradient mapped through `ts`.
fn skia_paint(paint: &Paint, alpha: f64, ts: Transform) -> tiny_skia::Paint<'static> {
    let mut out = tiny_skia::Paint {
        anti_alias: true,
        ..Default::default()
    };
    match paint.with_alpha_factor(alpha) {
        Paint::Solid(c) => out.set_color(skia_color(c)),
        Paint::LinearGradient { start, end, stops } => {
            let skia_stops = stops
                .iter()
                .map(|s| tiny_skia::GradientStop::new(s.offset as f32, skia_color(s.color)))
                .collect();
            let shader = tiny_skia::LinearGradient::new(
                tiny_skia::Point::from_xy(start.x as f32, start.y as f32),
                tiny_skia::Point::from_xy(end.x as f32, end.y as f32),
                skia_stops,
                SpreadMode::Pad,
                ts,
            );
            match shader {
                Some(shader) => out.shader = shader,
                None => {
                    let fallback = stops.first().map_or(Rgba::TRANSPARENT, |s| s.color);
                    out.set_color(skia_color(fallback));
                }
            }
        }
    }
    out
}

fn render(
    target: &mut Pixmap,
    op: Op<'_>,
    text_mask: Option<&TextMask>,
    paint: &Paint,
    alpha: f64,
    ts: Transform,
    clip: Option<&Mask>,
) {
    match op {
        Op::Rect(rect) => {
            let Some(r) = tiny_skia::Rect::from_ltrb(rect.x0 as f32, rect.y0 as f32, rect.x1 as f32, rect.y1 as f32) else {
                return;
            };
            target.fill_rect(r, &skia_paint(paint, alpha, ts), ts, clip);
        }
        Op::Path(path) => {
            if let Some(p) = skia_path(path) {
                target.fill_path(&p, &skia_paint(paint, alpha, ts), FillRule::Winding, ts, clip);
            }
        }
        Op::Text { .. } => {
            if let Some(mask) = text_mask {
                if let Some(layer) = colorize(mask, paint, alpha) {
                    let placed = ts.pre_translate(mask.origin.x as f32, mask.origin.y as f32);
                    target.draw_pixmap(0, 0, layer.as_ref(), &PixmapPaint::default(), placed, clip);
                }
            }
        }
    }
}

/// Rasterize `text` into a coverage mask positioned in user space.
///
/// The mask covers only the part of the run that falls inside `visible`.
fn layout_text(
    fonts: &FontBook,
    state: &CanvasState,
    text: &str,
    origin: Point,
    dilate: usize,
    visible: Rect,
) -> Option<TextMask> {
    let faces = fonts.select(&state.font);
    let primary = *faces.first()?;
    let px = state.font.size_px as f32;
    if !(px > 0.0) || text.is_empty() {
        return None;
    }
    let spacing = state.font.letter_spacing as f32;
    let spacing = if spacing.is_finite() { spacing } else { 0.0 };
    let (ascent, descent) = primary
        .horizontal_line_metrics(px)
        .map_or((px * 0.8, -px * 0.2), |m| (m.ascent, m.descent));

    let mut glyphs = Vec::new();
    let mut pen = 0.0f32;
    for ch in text.chars() {
        let face = faces
            .iter()
            .copied()
            .find(|f| f.lookup_glyph_index(ch) != 0)
            .unwrap_or(primary);
        let (metrics, bitmap) = face.rasterize(ch, px);
        glyphs.push((pen, metrics, bitmap));
        pen += metrics.advance_width + spacing;
    }
    let advance = (pen - spacing).max(0.0) as f64;

    let left = match state.align {
        TextAlign::Left => origin.x,
        TextAlign::Center => origin.x - advance / 2.0,
        TextAlign::Right => origin.x - advance,
    };
    let baseline = match state.baseline {
        TextBaseline::Alphabetic => origin.y,
        TextBaseline::Top => origin.y + ascent as f64,
        TextBaseline::Middle => origin.y + (ascent + descent) as f64 / 2.0,
    };

    // Glyph boxes in user space, dropping those that never reach the surface.
    let pad = dilate as f64;
    let reach = visible.inflate(pad, pad);
    let boxes: Vec<(f64, f64, usize, usize, &[u8])> = glyphs
        .iter()
        .filter(|(_, m, _)| m.width > 0 && m.height > 0)
        .map(|(pen, m, bitmap)| {
            let x = left + (*pen + m.xmin as f32) as f64;
            let y = baseline - (m.ymin + m.height as i32) as f64;
            (x, y, m.width, m.height, bitmap.as_slice())
        })
        .filter(|&(x, y, w, h, _)| {
            x.is_finite()
                && y.is_finite()
                && x + w as f64 >= reach.x0
                && x <= reach.x1
                && y + h as f64 >= reach.y0
                && y <= reach.y1
        })
        .collect();
    if boxes.is_empty() {
        return None;
    }

    let x0 = boxes.iter().map(|b| b.0).fold(f64::INFINITY, f64::min).floor().max(reach.x0.floor()) - pad;
    let y0 = boxes.iter().map(|b| b.1).fold(f64::INFINITY, f64::min).floor().max(reach.y0.floor()) - pad;
    let x1 = boxes
        .iter()
        .map(|b| b.0 + b.2 as f64)
        .fold(f64::NEG_INFINITY, f64::max)
        .ceil()
        .min(reach.x1.ceil())
        + pad;
    let y1 = boxes
        .iter()
        .map(|b| b.1 + b.3 as f64)
        .fold(f64::NEG_INFINITY, f64::max)
        .ceil()
        .min(reach.y1.ceil())
        + pad;
    if !(x1 >= x0 && y1 >= y0) {
        return None;
    }
    let width = (x1 - x0) as usize + 1;
    let height = (y1 - y0) as usize + 1;
    let limit = 2 * MAX_DIMENSION as usize;
    if width > limit || height > limit {
        log::warn!("Text mask of {width}x{height} exceeds the surface limit; not drawn");
        return None;
    }

    let mut coverage = vec![0u8; width * height];
    for (gx, gy, gw, gh, bitmap) in boxes {
        let ox = (gx - x0).round() as isize;
        let oy = (gy - y0).round() as isize;
        for row in 0..gh {
            let ty = oy + row as isize;
            if ty < 0 {
                continue;
            }
            if ty as usize >= height {
                break;
            }
            for col in 0..gw {
                let tx = ox + col as isize;
                if tx < 0 {
                    continue;
                }
                if tx as usize >= width {
                    break;
                }
                let cell = &mut coverage[ty as usize * width + tx as usize];
                *cell = (*cell).max(bitmap[row * gw + col]);
            }
        }
    }
    if dilate > 0 {
        coverage = dilate_coverage(&coverage, width, height, dilate);
    }

    Some(TextMask {
        origin: Vec2::new(x0, y0),
        width,
        height,
        coverage,
    })
}

/// Max filter with a square window of radius `r`.
fn dilate_coverage(src: &[u8], width: usize, height: usize, r: usize) -> Vec<u8> {
    let mut horizontal = vec![0u8; src.len()];
    for y in 0..height {
        for x in 0..width {
            let lo = x.saturating_sub(r);
            let hi = (x + r).min(width - 1);
            horizontal[y * width + x] = src[y * width + lo..=y * width + hi].iter().copied().max().unwrap_or(0);
        }
    }
    let mut out = vec![0u8; src.len()];
    for y in 0..height {
        let lo = y.saturating_sub(r);
        let hi = (y + r).min(height - 1);
        for x in 0..width {
            out[y * width + x] = (lo..=hi).map(|yy| horizontal[yy * width + x]).max().unwrap_or(0);
        }
    }
    out
}

/// Premultiplied pixmap painting `paint` through the mask coverage.
fn colorize(mask: &TextMask, paint: &Paint, alpha: f64) -> Option<Pixmap> {
    let mut layer = Pixmap::new(mask.width as u32, mask.height as u32)?;
    let data = layer.data_mut();
    for y in 0..mask.height {
        for x in 0..mask.width {
            let cov = mask.coverage[y * mask.width + x];
            if cov == 0 {
                continue;
            }
            let point = Point::new(
                mask.origin.x + x as f64 + 0.5,
                mask.origin.y + y as f64 + 0.5,
            );
            let c = paint.color_at(point);
            let a = (c.a as f64 * cov as f64 / 255.0 * alpha.clamp(0.0, 1.0)).round() as u16;
            let premul = |v: u8| ((v as u16 * a + 127) / 255) as u8;
            let i = (y * mask.width + x) * 4;
            data[i] = premul(c.r);
            data[i + 1] = premul(c.g);
            data[i + 2] = premul(c.b);
            data[i + 3] = a as u8;
        }
    }
    Some(layer)
}

/// Separable box blur over premultiplied RGBA.
fn box_blur(pixmap: &mut Pixmap, radius: usize) {
    if radius == 0 {
        return;
    }
    let width = pixmap.width() as usize;
    let height = pixmap.height() as usize;
    let data = pixmap.data_mut();
    let mut scratch = vec![0u8; data.len()];
    blur_pass(data, &mut scratch, width, height, radius, 4, width * 4);
    blur_pass(&scratch, data, height, width, radius, width * 4, 4);
}

/// One blur pass along lines of `len` pixels spaced `stride` bytes apart,
/// with neighbouring pixels `step` bytes apart.
fn blur_pass(src: &[u8], dst: &mut [u8], len: usize, lines: usize, radius: usize, step: usize, stride: usize) {
    let window = (2 * radius + 1) as u32;
    for line in 0..lines {
        let base = line * stride;
        for channel in 0..4 {
            let at = |i: isize| -> u32 {
                let clamped = i.clamp(0, len as isize - 1) as usize;
                src[base + clamped * step + channel] as u32
            };
            let mut sum: u32 = (-(radius as isize)..=radius as isize).map(&at).sum();
            for i in 0..len {
                dst[base + i * step + channel] = (sum / window) as u8;
                sum += at(i as isize + radius as isize + 1);
                sum -= at(i as isize - radius as isize);
            }
        }
    }
}

fn premultiplied_pixmap(image: &DecodedImage) -> Option<Pixmap> {
    let mut data = image.rgba().to_vec();
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u16;
        for v in &mut px[..3] {
            *v = ((*v as u16 * a + 127) / 255) as u8;
        }
    }
    Pixmap::from_vec(data, IntSize::from_wh(image.width(), image.height())?)
}

impl Surface for RasterSurface {
    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(RendererError::Surface(format!(
                "{width}x{height} exceeds the maximum of {MAX_DIMENSION}"
            )));
        }
        let pixmap = Pixmap::new(width, height)
            .ok_or_else(|| RendererError::Surface(format!("invalid size {width}x{height}")))?;
        self.pixmap = Some(pixmap);
        self.state = CanvasState::default();
        self.stack.clear();
        Ok(())
    }

    fn dimensions(&self) -> Option<(u32, u32)> {
        self.pixmap.as_ref().map(|p| (p.width(), p.height()))
    }

    fn clear(&mut self) {
        if let Some(pixmap) = &mut self.pixmap {
            pixmap.fill(tiny_skia::Color::TRANSPARENT);
        }
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.state.transform *= Affine::translate(offset);
    }

    fn rotate(&mut self, radians: f64) {
        self.state.transform *= Affine::rotate(radians);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.transform *= Affine::scale_non_uniform(sx, sy);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    fn set_fill(&mut self, paint: Paint) {
        self.state.fill = paint;
    }

    fn set_stroke(&mut self, paint: Paint, width: f64) {
        self.state.stroke = paint;
        self.state.line_width = width.max(0.0);
    }

    fn set_shadow(&mut self, shadow: Option<ShadowStyle>) {
        self.state.shadow = shadow;
    }

    fn set_font(&mut self, font: FontSpec) {
        self.state.font = font;
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.baseline = baseline;
    }

    fn clip_path(&mut self, path: &BezPath) {
        let Some((width, height)) = self.dimensions() else {
            return;
        };
        let Some(path) = skia_path(path) else {
            return;
        };
        let ts = to_skia(self.state.transform);
        match &mut self.state.clip {
            Some(mask) => mask.intersect_path(&path, FillRule::Winding, true, ts),
            None => {
                if let Some(mut mask) = Mask::new(width, height) {
                    mask.fill_path(&path, FillRule::Winding, true, ts);
                    self.state.clip = Some(mask);
                }
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.draw(Op::Rect(rect));
    }

    fn fill_path(&mut self, path: &BezPath) {
        self.draw(Op::Path(path));
    }

    fn fill_text(&mut self, text: &str, origin: Point) {
        self.draw(Op::Text {
            text,
            origin,
            stroke: false,
        });
    }

    fn stroke_text(&mut self, text: &str, origin: Point) {
        self.draw(Op::Text {
            text,
            origin,
            stroke: true,
        });
    }

    fn draw_image(&mut self, image: &DecodedImage, dest: Rect) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        let Some(source) = premultiplied_pixmap(image) else {
            return;
        };
        let placed = self.state.transform
            * Affine::translate(dest.origin().to_vec2())
            * Affine::scale_non_uniform(
                dest.width() / image.width() as f64,
                dest.height() / image.height() as f64,
            );
        let paint = PixmapPaint {
            opacity: self.state.alpha as f32,
            quality: FilterQuality::Bilinear,
            ..Default::default()
        };
        pixmap.draw_pixmap(0, 0, source.as_ref(), &paint, to_skia(placed), self.state.clip.as_ref());
    }

    fn encode(&self, options: &ExportOptions) -> RenderResult<Vec<u8>> {
        let pixmap = self
            .pixmap
            .as_ref()
            .ok_or_else(|| RendererError::Validation("surface has not been sized".to_string()))?;
        match options.format {
            ExportFormat::Png => encode_png(pixmap),
            ExportFormat::Jpg => encode_jpeg(pixmap, options.jpeg_quality()),
        }
    }
}

fn encode_png(pixmap: &Pixmap) -> RenderResult<Vec<u8>> {
    let straight: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RendererError::Encoding(format!("PNG header: {e}")))?;
        writer
            .write_image_data(&straight)
            .map_err(|e| RendererError::Encoding(format!("PNG data: {e}")))?;
    }
    Ok(buf)
}

/// Premultiplied channels are the color composited on black, which JPEG keeps.
fn encode_jpeg(pixmap: &Pixmap, quality: u8) -> RenderResult<Vec<u8>> {
    let rgb: Vec<u8> = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|p| [p[0], p[1], p[2]])
        .collect();
    let mut buf = Vec::new();
    ::image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality)
        .encode(&rgb, pixmap.width(), pixmap.height(), ::image::ExtendedColorType::Rgb8)
        .map_err(|e| RendererError::Encoding(format!("JPEG: {e}")))?;
    Ok(buf)
}
