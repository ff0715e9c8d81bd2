//! Image format gate.
//!
//! Classifies a file extension as one of the supported image formats. The
//! selected format is informational: nothing is re-encoded.

use std::fmt;

use serde::Serialize;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Portable Network Graphics.
    Png,
    /// JPEG (`.jpg` or `.jpeg`).
    Jpeg,
    /// Graphics Interchange Format.
    Gif,
}

impl ImageFormat {
    /// Classifies a file extension, with or without its leading `.`.
    ///
    /// Matching is case-insensitive. Returns `None` for anything unsupported,
    /// including the empty extension.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.trim_start_matches('.');

        if extension.eq_ignore_ascii_case("png") {
            Some(Self::Png)
        } else if extension.eq_ignore_ascii_case("jpg") || extension.eq_ignore_ascii_case("jpeg") {
            Some(Self::Jpeg)
        } else if extension.eq_ignore_ascii_case("gif") {
            Some(Self::Gif)
        } else {
            None
        }
    }

    /// MIME type of the format.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
        }
    }

    /// Name of the encoder that would handle this format.
    #[must_use]
    pub const fn encoder_name(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encoder_name())
    }
}
