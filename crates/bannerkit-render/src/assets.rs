//! Image asset loading.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

/// Boxed future for async loading.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Image loading errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("Unsupported source: {0}")]
    Unsupported(String),
    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),
    #[error("IO error reading {path}: {message}")]
    Io { path: String, message: String },
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Network error fetching {url}: {message}")]
    Network { url: String, message: String },
}

/// A decoded image in straight-alpha RGBA8.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    rgba: Arc<[u8]>,
}

impl DecodedImage {
    /// Wrap raw RGBA8 pixels. Fails if the buffer size does not match.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, LoadError> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || rgba.len() != expected {
            return Err(LoadError::Decode(format!(
                "expected {expected} bytes for {width}x{height}, got {}",
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba: rgba.into(),
        })
    }

    /// Decode PNG, JPEG or WebP bytes.
    pub fn from_encoded(bytes: &[u8]) -> Result<Self, LoadError> {
        let decoded = ::image::load_from_memory(bytes)
            .map_err(|e| LoadError::Decode(e.to_string()))?
            .to_rgba8();
        let (width, height) = decoded.dimensions();
        Self::new(width, height, decoded.into_raw())
    }

    /// A single-color image.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, LoadError> {
        let pixels = rgba.repeat(width as usize * height as usize);
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Resolves image sources to decoded pixels.
pub trait ImageLoader {
    fn load<'a>(&'a self, source: &'a str) -> BoxFuture<'a, Result<DecodedImage, LoadError>>;
}

/// Loads `data:` URIs and filesystem paths.
///
/// Relative paths resolve against the base directory when one is set.
/// Network URLs are reported as unsupported; see `HttpLoader` behind the
/// `http` feature.
#[derive(Debug, Clone, Default)]
pub struct SourceLoader {
    base_dir: Option<PathBuf>,
}

impl SourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    pub(crate) fn load_sync(&self, source: &str) -> Result<DecodedImage, LoadError> {
        if let Some(rest) = source.strip_prefix("data:") {
            return DecodedImage::from_encoded(&decode_data_uri(rest)?);
        }
        if source.starts_with("http://") || source.starts_with("https://") {
            return Err(LoadError::Unsupported(source.to_string()));
        }
        let path = self.resolve(source.strip_prefix("file://").unwrap_or(source));
        let bytes = std::fs::read(&path).map_err(|e| LoadError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        DecodedImage::from_encoded(&bytes)
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl ImageLoader for SourceLoader {
    fn load<'a>(&'a self, source: &'a str) -> BoxFuture<'a, Result<DecodedImage, LoadError>> {
        Box::pin(async move { self.load_sync(source) })
    }
}

/// Decode the part of a data URI after `data:`. Only base64 payloads are accepted.
fn decode_data_uri(rest: &str) -> Result<Vec<u8>, LoadError> {
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| LoadError::InvalidDataUri("missing ','".to_string()))?;
    if !header.ends_with(";base64") {
        return Err(LoadError::InvalidDataUri(format!("not base64: {header}")));
    }
    STANDARD
        .decode(payload.trim())
        .map_err(|e| LoadError::InvalidDataUri(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes() -> Vec<u8> {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, 2, 1);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer
                .write_image_data(&[255, 0, 0, 255, 0, 0, 255, 128])
                .unwrap();
        }
        bytes
    }

    #[test]
    fn test_data_uri() {
        let uri = format!("data:image/png;base64,{}", STANDARD.encode(png_bytes()));
        let image = pollster::block_on(SourceLoader::new().load(&uri)).unwrap();
        assert_eq!((image.width(), image.height()), (2, 1));
        assert_eq!(image.rgba(), &[255, 0, 0, 255, 0, 0, 255, 128]);
    }

    #[test]
    fn test_file_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pixel.png"), png_bytes()).unwrap();

        let loader = SourceLoader::with_base_dir(dir.path());
        let image = pollster::block_on(loader.load("pixel.png")).unwrap();
        assert_eq!(image.width(), 2);
    }

    #[test]
    fn test_failures() {
        let loader = SourceLoader::new();
        assert!(matches!(
            pollster::block_on(loader.load("https://example.com/a.png")),
            Err(LoadError::Unsupported(_))
        ));
        assert!(matches!(
            pollster::block_on(loader.load("data:image/png,raw")),
            Err(LoadError::InvalidDataUri(_))
        ));
        assert!(matches!(
            pollster::block_on(loader.load("/definitely/missing.png")),
            Err(LoadError::Io { .. })
        ));
        assert!(matches!(
            pollster::block_on(loader.load("data:image/png;base64,AAAA")),
            Err(LoadError::Decode(_))
        ));
    }

    #[test]
    fn test_buffer_size_checked() {
        assert!(DecodedImage::new(2, 2, vec![0; 15]).is_err());
        assert!(DecodedImage::filled(3, 2, [1, 2, 3, 4]).is_ok());
    }
}
