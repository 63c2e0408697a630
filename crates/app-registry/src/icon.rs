//! Icon rasterization and PNG encoding.

use crate::provider::{Drawable, PlatformIcon, ProviderResult};
use image::{DynamicImage, ImageOutputFormat, RgbaImage};
use std::io::Cursor;

/// Encode a platform icon as PNG.
///
/// Bitmaps are encoded directly. Drawables are painted onto a transparent
/// canvas of their intrinsic size first, never smaller than 1x1.
pub fn encode_icon(icon: PlatformIcon) -> ProviderResult<Vec<u8>> {
    let image = match icon {
        PlatformIcon::Bitmap(bitmap) => bitmap,
        PlatformIcon::Drawable(drawable) => DynamicImage::ImageRgba8(rasterize(drawable.as_ref())),
    };

    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageOutputFormat::Png)?;
    Ok(out.into_inner())
}

/// Paint a drawable onto a canvas matching its intrinsic dimensions.
pub fn rasterize(drawable: &dyn Drawable) -> RgbaImage {
    let width = drawable.intrinsic_width().max(1) as u32;
    let height = drawable.intrinsic_height().max(1) as u32;

    let mut canvas = RgbaImage::new(width, height);
    drawable.draw(&mut canvas);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba};

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    struct Tile {
        width: i32,
        height: i32,
    }

    impl Drawable for Tile {
        fn intrinsic_width(&self) -> i32 {
            self.width
        }

        fn intrinsic_height(&self) -> i32 {
            self.height
        }

        fn draw(&self, canvas: &mut RgbaImage) {
            for pixel in canvas.pixels_mut() {
                *pixel = Rgba([200, 10, 10, 255]);
            }
        }
    }

    #[test]
    fn test_bitmap_is_encoded_as_png() {
        let bitmap = DynamicImage::new_rgba8(3, 2);
        let bytes = encode_icon(PlatformIcon::Bitmap(bitmap)).unwrap();

        assert_eq!(&bytes[..8], &PNG_SIGNATURE);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (3, 2));
    }

    #[test]
    fn test_drawable_uses_intrinsic_size() {
        let tile = Tile {
            width: 16,
            height: 8,
        };
        let bytes = encode_icon(PlatformIcon::Drawable(Box::new(tile))).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (16, 8));
        assert_eq!(decoded.get_pixel(4, 4), Rgba([200, 10, 10, 255]));
    }

    #[test]
    fn test_degenerate_drawable_gets_one_pixel_canvas() {
        let canvas = rasterize(&Tile {
            width: 0,
            height: -1,
        });
        assert_eq!(canvas.dimensions(), (1, 1));
        assert_eq!(canvas.get_pixel(0, 0), &Rgba([200, 10, 10, 255]));
    }
}
