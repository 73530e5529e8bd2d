use crate::Result;
use image::RgbaImage;
use std::hash::{Hash, Hasher};

/// Custom compass glyph as an RGBA bitmap.
///
/// Pixels are transferred uncompressed, so a bitmap near 4096 x 4096 no longer
/// fits the 64 MiB transfer limit of [`crate::data::transfer::encode`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompassImage {
    bitmap: RgbaImage,
}

impl CompassImage {
    pub fn new(bitmap: RgbaImage) -> Self {
        Self { bitmap }
    }

    /// Decodes an encoded image (PNG) into a bitmap.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self::new(image.to_rgba8()))
    }

    /// Rebuilds an image from raw RGBA pixels.
    ///
    /// Returns `None` unless `pixels` holds exactly `width * height` RGBA pixels.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if pixels.len() != expected {
            return None;
        }
        RgbaImage::from_raw(width, height, pixels).map(Self::new)
    }

    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }

    pub fn pixels(&self) -> &[u8] {
        self.bitmap.as_raw()
    }

    pub fn bitmap(&self) -> &RgbaImage {
        &self.bitmap
    }
}

impl Hash for CompassImage {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.width().hash(state);
        self.height().hash(state);
        self.pixels().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageOutputFormat, Rgba};
    use std::io::Cursor;

    fn png_bytes(image: &RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(image.clone())
            .write_to(&mut out, ImageOutputFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let mut bitmap = RgbaImage::new(3, 2);
        bitmap.put_pixel(1, 1, Rgba([255, 0, 0, 255]));

        let icon = CompassImage::decode(&png_bytes(&bitmap)).unwrap();
        assert_eq!(icon.width(), 3);
        assert_eq!(icon.height(), 2);
        assert_eq!(icon, CompassImage::new(bitmap));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(CompassImage::decode(b"not an image").is_err());
    }

    #[test]
    fn test_from_rgba_checks_length() {
        assert!(CompassImage::from_rgba(2, 2, vec![0; 16]).is_some());
        assert!(CompassImage::from_rgba(2, 2, vec![0; 15]).is_none());
        assert!(CompassImage::from_rgba(2, 2, vec![0; 20]).is_none());
    }
}
