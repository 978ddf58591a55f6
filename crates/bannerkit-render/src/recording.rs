//! A surface that records draw calls instead of producing pixels.

use crate::assets::DecodedImage;
use crate::error::{RenderResult, RendererError};
use crate::paint::{FontSpec, Paint, ShadowStyle, TextAlign, TextBaseline};
use crate::surface::Surface;
use bannerkit_core::export::ExportOptions;
use kurbo::{BezPath, Point, Rect, Vec2};

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Resize { width: u32, height: u32 },
    Clear,
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f64),
    Scale(f64, f64),
    GlobalAlpha(f64),
    SetFill(Paint),
    SetStroke { paint: Paint, width: f64 },
    SetShadow(Option<ShadowStyle>),
    SetFont(FontSpec),
    SetTextAlign(TextAlign),
    SetTextBaseline(TextBaseline),
    Clip(BezPath),
    FillRect(Rect),
    FillPath(BezPath),
    FillText { text: String, origin: Point },
    StrokeText { text: String, origin: Point },
    DrawImage { width: u32, height: u32, dest: Rect },
}

/// Records every call in order.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    size: Option<(u32, u32)>,
    calls: Vec<DrawCall>,
    depth: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Drain the recorded calls.
    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of saves not yet restored.
    pub fn save_depth(&self) -> usize {
        self.depth
    }

    /// Index of the first call matching `predicate`.
    pub fn position(&self, predicate: impl Fn(&DrawCall) -> bool) -> Option<usize> {
        self.calls.iter().position(predicate)
    }

    fn push(&mut self, call: DrawCall) {
        self.calls.push(call);
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        if width == 0 || height == 0 {
            return Err(RendererError::Surface(format!("invalid size {width}x{height}")));
        }
        self.size = Some((width, height));
        self.depth = 0;
        self.push(DrawCall::Resize { width, height });
        Ok(())
    }

    fn dimensions(&self) -> Option<(u32, u32)> {
        self.size
    }

    fn clear(&mut self) {
        self.push(DrawCall::Clear);
    }

    fn save(&mut self) {
        self.depth += 1;
        self.push(DrawCall::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.push(DrawCall::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.push(DrawCall::Translate(offset));
    }

    fn rotate(&mut self, radians: f64) {
        self.push(DrawCall::Rotate(radians));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.push(DrawCall::Scale(sx, sy));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.push(DrawCall::GlobalAlpha(alpha));
    }

    fn set_fill(&mut self, paint: Paint) {
        self.push(DrawCall::SetFill(paint));
    }

    fn set_stroke(&mut self, paint: Paint, width: f64) {
        self.push(DrawCall::SetStroke { paint, width });
    }

    fn set_shadow(&mut self, shadow: Option<ShadowStyle>) {
        self.push(DrawCall::SetShadow(shadow));
    }

    fn set_font(&mut self, font: FontSpec) {
        self.push(DrawCall::SetFont(font));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.push(DrawCall::SetTextAlign(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.push(DrawCall::SetTextBaseline(baseline));
    }

    fn clip_path(&mut self, path: &BezPath) {
        self.push(DrawCall::Clip(path.clone()));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.push(DrawCall::FillRect(rect));
    }

    fn fill_path(&mut self, path: &BezPath) {
        self.push(DrawCall::FillPath(path.clone()));
    }

    fn fill_text(&mut self, text: &str, origin: Point) {
        self.push(DrawCall::FillText {
            text: text.to_string(),
            origin,
        });
    }

    fn stroke_text(&mut self, text: &str, origin: Point) {
        self.push(DrawCall::StrokeText {
            text: text.to_string(),
            origin,
        });
    }

    fn draw_image(&mut self, image: &DecodedImage, dest: Rect) {
        self.push(DrawCall::DrawImage {
            width: image.width(),
            height: image.height(),
            dest,
        });
    }

    fn encode(&self, _options: &ExportOptions) -> RenderResult<Vec<u8>> {
        Err(RendererError::Surface(
            "recording surface has no pixels to encode".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::StateGuard;

    #[test]
    fn test_guard_restores_on_drop() {
        let mut surface = RecordingSurface::new();
        {
            let mut guard = StateGuard::new(&mut surface);
            guard.translate(Vec2::new(1.0, 2.0));
            assert_eq!(guard.save_depth(), 1);
        }
        assert_eq!(surface.save_depth(), 0);
        assert_eq!(
            surface.calls(),
            &[DrawCall::Save, DrawCall::Translate(Vec2::new(1.0, 2.0)), DrawCall::Restore]
        );
    }

    #[test]
    fn test_resize_rejects_zero() {
        let mut surface = RecordingSurface::new();
        assert!(surface.resize(0, 10).is_err());
        assert_eq!(surface.dimensions(), None);
        surface.resize(10, 10).unwrap();
        assert_eq!(surface.dimensions(), Some((10, 10)));
    }
}
