//! Export request types.

use serde::{Deserialize, Serialize};

/// Raster export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    #[serde(alias = "jpeg")]
    Jpg,
}

impl ExportFormat {
    /// MIME type of the encoded blob.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpg => "image/jpeg",
        }
    }

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpg => "jpg",
        }
    }

    /// Guess the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpg),
            _ => None,
        }
    }
}

/// Export parameters: format and a quality factor in `[0, 1]` (ignored for PNG).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub quality: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Png,
            quality: 0.92,
        }
    }
}

impl ExportOptions {
    pub fn new(format: ExportFormat, quality: f64) -> Self {
        Self { format, quality }
    }

    /// Quality mapped onto the 1–100 scale used by JPEG encoders.
    pub fn jpeg_quality(&self) -> u8 {
        let q = if self.quality.is_finite() { self.quality } else { 0.92 };
        (q.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(ExportFormat::from_extension("JPEG"), Some(ExportFormat::Jpg));
        assert_eq!(ExportFormat::from_extension("png"), Some(ExportFormat::Png));
        assert_eq!(ExportFormat::from_extension("gif"), None);
        assert_eq!(ExportFormat::Jpg.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_jpeg_quality_mapping() {
        assert_eq!(ExportOptions::new(ExportFormat::Jpg, 0.9).jpeg_quality(), 90);
        assert_eq!(ExportOptions::new(ExportFormat::Jpg, 0.0).jpeg_quality(), 1);
        assert_eq!(ExportOptions::new(ExportFormat::Jpg, 7.0).jpeg_quality(), 100);
        assert_eq!(ExportOptions::new(ExportFormat::Jpg, f64::NAN).jpeg_quality(), 92);
    }

    #[test]
    fn test_options_json() {
        let options: ExportOptions = serde_json::from_str(r#"{"format":"jpeg","quality":0.5}"#).unwrap();
        assert_eq!(options.format, ExportFormat::Jpg);
    }
}
