//! Placeholder icon for apps without a decodable raster icon.

use app_registry::Drawable;
use image::{Rgba, RgbaImage};
use sha2::{Digest, Sha256};

/// Solid square whose colour is stable per package.
pub struct SolidTile {
    size: i32,
    color: Rgba<u8>,
}

impl SolidTile {
    pub fn for_package(package: &str, size: u32) -> Self {
        let digest = Sha256::digest(package.as_bytes());

        Self {
            size: size.min(i32::MAX as u32) as i32,
            color: Rgba([digest[0], digest[1], digest[2], 255]),
        }
    }

    pub fn color(&self) -> Rgba<u8> {
        self.color
    }
}

impl Drawable for SolidTile {
    fn intrinsic_width(&self) -> i32 {
        self.size
    }

    fn intrinsic_height(&self) -> i32 {
        self.size
    }

    fn draw(&self, canvas: &mut RgbaImage) {
        for pixel in canvas.pixels_mut() {
            *pixel = self.color;
        }
    }
}
