//! Project image attachments.
//!
//! Attachments are validated entirely in memory: size cap, media-type
//! allow-list, and a header-only decode to read pixel dimensions before
//! the bytes are ever accepted into a draft.

use std::io::Cursor;

use image::ImageReader;

/// Maximum accepted attachment size (5 MB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Maximum accepted width or height in pixels, where the context enforces
/// a dimension cap.
pub const MAX_PIXEL_DIM: u32 = 1500;

/// Media types accepted for project images.
///
/// `Jpg` and `Jpeg` are distinct on the wire (`image/jpg` vs `image/jpeg`)
/// even though they name the same codec; the server accepts both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Jpeg,
    Jpg,
    Png,
}

impl MediaType {
    /// Parse a MIME string such as `image/png`.
    pub fn parse(mime: &str) -> Result<Self, ImageError> {
        match mime {
            "image/jpeg" => Ok(Self::Jpeg),
            "image/jpg" => Ok(Self::Jpg),
            "image/png" => Ok(Self::Png),
            other => Err(ImageError::UnsupportedMediaType(other.to_string())),
        }
    }

    /// Infer the media type from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Result<Self, ImageError> {
        match ext.to_ascii_lowercase().as_str() {
            "jpeg" => Ok(Self::Jpeg),
            "jpg" => Ok(Self::Jpg),
            "png" => Ok(Self::Png),
            other => Err(ImageError::UnsupportedMediaType(other.to_string())),
        }
    }

    /// The wire MIME string.
    pub fn as_mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Jpg => "image/jpg",
            Self::Png => "image/png",
        }
    }
}

/// Raw image bytes held by a draft until submission.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    /// Original file name, sent as the multipart part's file name.
    pub file_name: String,
    pub media_type: MediaType,
    pub bytes: Vec<u8>,
}

/// Errors from attachment validation.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("The file must be at most 5 MB ({size} bytes given)")]
    TooLarge { size: usize },

    #[error("Invalid file format '{0}'. Only JPG, PNG or JPEG are allowed")]
    UnsupportedMediaType(String),

    #[error("The image must be at most {max} pixels in either direction (got {width}x{height})")]
    DimensionsExceeded { width: u32, height: u32, max: u32 },

    #[error("Could not decode image: {0}")]
    Undecodable(String),
}

impl ImageAttachment {
    /// Validate this attachment: size cap, then — when `max_pixel_dim` is
    /// set — a header-only decode to check pixel dimensions.
    pub fn validate(&self, max_pixel_dim: Option<u32>) -> Result<(), ImageError> {
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(ImageError::TooLarge {
                size: self.bytes.len(),
            });
        }

        if let Some(max) = max_pixel_dim {
            let (width, height) = read_dimensions(&self.bytes)?;
            if width > max || height > max {
                return Err(ImageError::DimensionsExceeded { width, height, max });
            }
        }

        Ok(())
    }
}

/// Read `(width, height)` from the image header without decoding pixel data.
pub fn read_dimensions(bytes: &[u8]) -> Result<(u32, u32), ImageError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ImageError::Undecodable(e.to_string()))?
        .into_dimensions()
        .map_err(|e| ImageError::Undecodable(e.to_string()))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    /// Encode a blank PNG of the given dimensions.
    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::new(width, height);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)
            .expect("PNG encoding should succeed");
        out.into_inner()
    }

    fn attachment(bytes: Vec<u8>) -> ImageAttachment {
        ImageAttachment {
            file_name: "photo.png".to_string(),
            media_type: MediaType::Png,
            bytes,
        }
    }

    #[test]
    fn test_media_type_allow_list() {
        assert_matches!(MediaType::parse("image/jpeg"), Ok(MediaType::Jpeg));
        assert_matches!(MediaType::parse("image/jpg"), Ok(MediaType::Jpg));
        assert_matches!(MediaType::parse("image/png"), Ok(MediaType::Png));
        assert_matches!(
            MediaType::parse("image/webp"),
            Err(ImageError::UnsupportedMediaType(_))
        );
        assert_matches!(
            MediaType::parse("application/pdf"),
            Err(ImageError::UnsupportedMediaType(_))
        );
    }

    #[test]
    fn test_extension_inference() {
        assert_matches!(MediaType::from_extension("PNG"), Ok(MediaType::Png));
        assert_matches!(MediaType::from_extension("jpeg"), Ok(MediaType::Jpeg));
        assert_matches!(
            MediaType::from_extension("gif"),
            Err(ImageError::UnsupportedMediaType(_))
        );
    }

    #[test]
    fn test_oversized_attachment_rejected() {
        let img = attachment(vec![0u8; MAX_IMAGE_BYTES + 1]);
        assert_matches!(img.validate(None), Err(ImageError::TooLarge { .. }));
    }

    #[test]
    fn test_dimensions_within_cap_accepted() {
        let img = attachment(png_bytes(800, 600));
        assert!(img.validate(Some(MAX_PIXEL_DIM)).is_ok());
    }

    #[test]
    fn test_dimensions_over_cap_rejected() {
        let img = attachment(png_bytes(1501, 10));
        assert_matches!(
            img.validate(Some(MAX_PIXEL_DIM)),
            Err(ImageError::DimensionsExceeded {
                width: 1501,
                height: 10,
                max: MAX_PIXEL_DIM,
            })
        );
    }

    #[test]
    fn test_no_dimension_check_when_uncapped() {
        // The relaxed rule context skips the decode entirely.
        let img = attachment(png_bytes(1600, 1600));
        assert!(img.validate(None).is_ok());
    }

    #[test]
    fn test_garbage_bytes_are_undecodable() {
        let img = attachment(b"definitely not an image".to_vec());
        assert_matches!(
            img.validate(Some(MAX_PIXEL_DIM)),
            Err(ImageError::Undecodable(_))
        );
    }

    #[test]
    fn test_header_dimensions_match_encoded_image() {
        let (w, h) = read_dimensions(&png_bytes(123, 45)).expect("header should decode");
        assert_eq!((w, h), (123, 45));
    }
}
