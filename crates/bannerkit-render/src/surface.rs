//! Host drawing surface abstraction.
//!
//! A surface is a stateful 2D context in the style of an HTML canvas: a
//! current transform, fill, stroke, shadow, font and clip, saved and restored
//! as a stack. Coordinates are device pixels of the last `resize`.

use crate::assets::DecodedImage;
use crate::error::RenderResult;
use crate::paint::{FontSpec, Paint, ShadowStyle, TextAlign, TextBaseline};
use bannerkit_core::export::ExportOptions;
use kurbo::{BezPath, Point, Rect, Vec2};
use std::ops::{Deref, DerefMut};

/// A raster drawing target.
pub trait Surface {
    /// Set the pixel size and reset all pixels and graphics state.
    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()>;

    /// Current pixel size, or `None` before the first resize.
    fn dimensions(&self) -> Option<(u32, u32)>;

    /// Make every pixel transparent.
    fn clear(&mut self);

    /// Push the graphics state.
    fn save(&mut self);

    /// Pop the graphics state. Unbalanced calls are ignored.
    fn restore(&mut self);

    fn translate(&mut self, offset: Vec2);

    /// Rotate the user space clockwise by `radians`.
    fn rotate(&mut self, radians: f64);

    fn scale(&mut self, sx: f64, sy: f64);

    /// Opacity multiplier for subsequent drawing, in `[0, 1]`.
    fn set_global_alpha(&mut self, alpha: f64);

    fn set_fill(&mut self, paint: Paint);

    fn set_stroke(&mut self, paint: Paint, width: f64);

    /// Shadow drawn beneath subsequent fills; `None` disables it.
    fn set_shadow(&mut self, shadow: Option<ShadowStyle>);

    fn set_font(&mut self, font: FontSpec);

    fn set_text_align(&mut self, align: TextAlign);

    fn set_text_baseline(&mut self, baseline: TextBaseline);

    /// Intersect the clip region with `path` under the current transform.
    fn clip_path(&mut self, path: &BezPath);

    fn fill_rect(&mut self, rect: Rect);

    fn fill_path(&mut self, path: &BezPath);

    fn fill_text(&mut self, text: &str, origin: Point);

    fn stroke_text(&mut self, text: &str, origin: Point);

    /// Draw `image` scaled into `dest`.
    fn draw_image(&mut self, image: &DecodedImage, dest: Rect);

    /// Encode the current pixels.
    fn encode(&self, options: &ExportOptions) -> RenderResult<Vec<u8>>;
}

/// Saves the surface state on creation and restores it on drop.
pub struct StateGuard<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: Surface + ?Sized> StateGuard<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: Surface + ?Sized> Deref for StateGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for StateGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for StateGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}
