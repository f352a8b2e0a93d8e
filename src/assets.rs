//! Image-backed level masks and wall tints
//!
//! Levels and wall textures can come from PNG files: column x is slice x, row
//! y is ring position y. Any pixel that would show on screen counts as a wall.

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read asset: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode asset: {0}")]
    Decode(#[from] image::ImageError),
}

/// One pixel, straight alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Whether this pixel would show on screen: some alpha and some color.
    /// Pure black is treated as empty so masks can use it as background.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.a != 0 && (self.r != 0 || self.g != 0 || self.b != 0)
    }

    /// Normalized color for the vertex stream
    #[inline]
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// Anything that can answer per-pixel queries for a mask or tint
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Pixel at `(x, y)`; callers keep coordinates in bounds
    fn pixel(&self, x: u32, y: u32) -> Rgba;
}

/// A decoded image held in memory
pub struct ImagePixels {
    image: image::RgbaImage,
}

impl ImagePixels {
    /// Decode an image file into RGBA
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let image = image::open(path)?.to_rgba8();
        log::info!(
            "loaded {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self { image })
    }

    pub fn from_image(image: image::RgbaImage) -> Self {
        Self { image }
    }
}

impl PixelSource for ImagePixels {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn pixel(&self, x: u32, y: u32) -> Rgba {
        let [r, g, b, a] = self.image.get_pixel(x, y).0;
        Rgba::new(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_needs_alpha_and_color() {
        assert!(Rgba::new(200, 30, 30, 255).is_visible());
        assert!(Rgba::new(0, 0, 40, 1).is_visible());
        // Transparent or pure black pixels are background
        assert!(!Rgba::new(200, 30, 30, 0).is_visible());
        assert!(!Rgba::new(0, 0, 0, 255).is_visible());
    }

    #[test]
    fn test_to_f32_normalizes() {
        let c = Rgba::new(255, 0, 51, 255).to_f32();
        assert_eq!(c[0], 1.0);
        assert_eq!(c[1], 0.0);
        assert!((c[2] - 0.2).abs() < 1e-6);
        assert_eq!(c[3], 1.0);
    }

    #[test]
    fn test_image_pixels_passthrough() {
        let mut img = image::RgbaImage::from_pixel(3, 2, image::Rgba([0, 0, 0, 0]));
        img.put_pixel(2, 1, image::Rgba([10, 200, 30, 255]));
        let src = ImagePixels::from_image(img);
        assert_eq!(src.width(), 3);
        assert_eq!(src.height(), 2);
        assert_eq!(src.pixel(2, 1), Rgba::new(10, 200, 30, 255));
        assert!(!src.pixel(0, 0).is_visible());
        assert!(src.pixel(2, 1).is_visible());
    }
}
