//! # PNG Data URIs
//!
//! Rendered codes leave this crate as `data:image/png;base64,...` strings so
//! the display layer can show them without touching the filesystem.

use std::io::Cursor;

use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, ImageFormat};
use kupon_core::DataUri;

use crate::error::{EncodingError, RenderResult};

/// Encodes an image as PNG and wraps it in a data URI.
pub fn png_data_uri(image: DynamicImage) -> RenderResult<DataUri> {
    let bytes = png_bytes(&image)?;
    Ok(DataUri::from_png_base64(&general_purpose::STANDARD.encode(bytes)))
}

/// Encodes an image as PNG.
pub fn png_bytes(image: &DynamicImage) -> RenderResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Extracts the raw PNG bytes from a data URI.
///
/// Used when a rendered code has to be written out as a file.
pub fn decode_png_data_uri(uri: &DataUri) -> RenderResult<Vec<u8>> {
    let body = uri.png_base64().ok_or_else(|| {
        EncodingError::InvalidDataUri(format!(
            "expected prefix '{}'",
            DataUri::PNG_PREFIX
        ))
    })?;

    let bytes = general_purpose::STANDARD.decode(body)?;
    if bytes.is_empty() {
        return Err(EncodingError::InvalidDataUri("empty image body".to_string()));
    }

    Ok(bytes)
}

/// Decodes a PNG data URI back into an image.
pub fn decode_png_image(uri: &DataUri) -> RenderResult<DynamicImage> {
    let bytes = decode_png_data_uri(uri)?;
    Ok(image::load_from_memory_with_format(&bytes, ImageFormat::Png)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn test_png_data_uri_prefix_and_decode() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 3, Luma([255])));
        let uri = png_data_uri(image).unwrap();

        assert!(uri.as_str().starts_with("data:image/png;base64,"));

        let decoded = decode_png_image(&uri).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 3));
    }

    #[test]
    fn test_decode_rejects_other_uris() {
        let jpeg = DataUri::from_string("data:image/jpeg;base64,/9j/4AAQ");
        assert!(matches!(
            decode_png_data_uri(&jpeg),
            Err(EncodingError::InvalidDataUri(_))
        ));

        let garbage = DataUri::from_png_base64("%%%");
        assert!(decode_png_data_uri(&garbage).is_err());

        let empty = DataUri::from_png_base64("");
        assert!(decode_png_data_uri(&empty).is_err());
    }
}
