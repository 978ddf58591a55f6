//! BannerKit Render Library
//!
//! Draws scenes onto a 2D surface. The [`Surface`] trait is the host drawing
//! contract; [`RasterSurface`] is the CPU backend and [`RecordingSurface`]
//! logs draw calls for tests and diagnostics.

pub mod assets;
pub mod diagnostics;
mod error;
pub mod glyphs;
#[cfg(feature = "http")]
pub mod http;
pub mod paint;
pub mod patterns;
pub mod raster;
pub mod recording;
mod renderer;
pub mod surface;

pub use assets::{DecodedImage, ImageLoader, LoadError, SourceLoader};
pub use diagnostics::{ErrorSink, LogSink, MemorySink, RenderFailure};
pub use error::{RenderResult, RendererError};
pub use glyphs::{GlyphResolver, IconGlyph};
#[cfg(feature = "http")]
pub use http::HttpLoader;
pub use paint::{FontSpec, GradientStop, Paint, ShadowStyle, TextBaseline};
pub use raster::{FontBook, RasterSurface};
pub use recording::{DrawCall, RecordingSurface};
pub use renderer::{
    ExportBlob, NEUTRAL_FILL, RenderInvalidator, RenderOutcome, Renderer, cover_rect,
    gradient_axis,
};
pub use surface::{StateGuard, Surface};
