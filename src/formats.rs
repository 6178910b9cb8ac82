/// Output encoding selection.
///
/// Only two encoders are ever used: PNG inputs stay PNG, everything else is
/// written as JPEG bytes at the same path.
use image::ImageFormat;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossy, probed down the quality ladder
    Jpeg,
    /// Lossless, optimized once
    Png,
}

impl OutputFormat {
    /// Pick the encoder for an input file from its lowercased file-name
    /// suffix, the same test the finder applies.
    pub fn for_input(path: &Path) -> OutputFormat {
        let is_png = path
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase().ends_with(".png"))
            .unwrap_or(false);

        if is_png {
            OutputFormat::Png
        } else {
            OutputFormat::Jpeg
        }
    }

    pub fn to_image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Png => ImageFormat::Png,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Png => "PNG",
        };
        write!(f, "{}", name)
    }
}
