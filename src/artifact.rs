//! Decoded image held in memory while a single file is processed.

use crate::error::{CompressionError, Result};
use image::metadata::Orientation;
use image::{
    ColorType, DynamicImage, GenericImageView, ImageDecoder, ImageReader, Rgb, RgbImage, RgbaImage,
};
use std::path::Path;

/// An image decoded from disk, together with the orientation recorded in its
/// metadata and the dimensions it was decoded at.
#[derive(Debug, Clone)]
pub struct ImageArtifact {
    image: DynamicImage,
    orientation: Orientation,
    original_dimensions: (u32, u32),
}

impl ImageArtifact {
    /// Decodes `path`, sniffing the format from content rather than trusting
    /// the extension.
    pub fn decode(path: &Path) -> Result<Self> {
        let reader = ImageReader::open(path)?.with_guessed_format()?;
        let decode_err = |source| CompressionError::Decode {
            path: path.to_path_buf(),
            source,
        };

        let mut decoder = reader.into_decoder().map_err(decode_err)?;
        // Missing or unreadable EXIF is not an error; treat it as upright.
        let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
        let image = DynamicImage::from_decoder(decoder).map_err(decode_err)?;

        Ok(Self::from_image(image, orientation))
    }

    pub fn from_image(image: DynamicImage, orientation: Orientation) -> Self {
        let original_dimensions = image.dimensions();
        Self {
            image,
            orientation,
            original_dimensions,
        }
    }

    /// Rotates/flips the pixels so the stored orientation becomes upright.
    /// Idempotent: the orientation is cleared once applied.
    pub fn apply_orientation(&mut self) {
        if self.orientation != Orientation::NoTransforms {
            self.image.apply_orientation(self.orientation);
            self.orientation = Orientation::NoTransforms;
        }
    }

    /// Reduces the pixels to opaque 8-bit RGB.
    ///
    /// Anything with an alpha channel is flattened onto white, so transparency
    /// is lost for good. Palette images arrive already expanded by the decoder
    /// and take the same path when they carry transparency.
    pub fn normalize_color(&mut self) {
        let color = self.image.color();
        if color.has_alpha() {
            let flattened = flatten_onto_white(&self.image.to_rgba8());
            self.image = DynamicImage::ImageRgb8(flattened);
        } else if color != ColorType::Rgb8 {
            self.image = DynamicImage::ImageRgb8(self.image.to_rgb8());
        }
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn color(&self) -> ColorType {
        self.image.color()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Dimensions as decoded, before any orientation correction.
    pub fn original_dimensions(&self) -> (u32, u32) {
        self.original_dimensions
    }
}

/// Alpha-composites `rgba` over an opaque white background.
pub fn flatten_onto_white(rgba: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = u32::from(a);
        let blend = |c: u8| -> u8 {
            ((u32::from(c) * alpha + 255 * (255 - alpha) + 127) / 255) as u8
        };
        Rgb([blend(r), blend(g), blend(b)])
    })
}
