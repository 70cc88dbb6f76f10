//! Integration tests for wallpack-texture.

use std::io::Cursor;

use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};
use wallpack_texture::{
    blend_with_color, crop, resize_for_cropping, CropArea, TextureError, DEFAULT_CROP_PREVIEW_SIZE,
    TEXTURE_TILE_SIZE,
};

fn png(width: u32, height: u32, fill: [u8; 4]) -> Vec<u8> {
    encode(RgbaImage::from_pixel(width, height, Rgba(fill)))
}

fn encode(image: RgbaImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image)
        .write_to(&mut out, ImageOutputFormat::Png)
        .unwrap();
    out.into_inner()
}

fn decode(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory(bytes).unwrap().to_rgba8()
}

fn close(actual: u8, expected: u8) -> bool {
    (i16::from(actual) - i16::from(expected)).abs() <= 2
}

mod crop_tests {
    use super::*;

    #[test]
    fn test_crop_keeps_pixels() {
        let mut image = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
        image.put_pixel(2, 3, Rgba([255, 0, 0, 255]));

        let out = decode(&crop(&encode(image), CropArea::new(2, 3, 4, 5)).unwrap());
        assert_eq!(out.dimensions(), (4, 5));
        assert_eq!(*out.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*out.get_pixel(1, 0), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_crop_outside_image() {
        let bytes = png(10, 10, [0, 0, 0, 255]);
        assert!(matches!(
            crop(&bytes, CropArea::new(8, 0, 4, 4)),
            Err(TextureError::InvalidCrop(_))
        ));
        assert!(matches!(
            crop(&bytes, CropArea::new(0, 0, 0, 4)),
            Err(TextureError::InvalidCrop(_))
        ));
    }

    #[test]
    fn test_garbage_input() {
        assert!(matches!(
            crop(b"definitely not an image", CropArea::new(0, 0, 1, 1)),
            Err(TextureError::Decode(_))
        ));
    }
}

mod blend_tests {
    use super::*;

    #[test]
    fn test_blend_produces_tile() {
        let out = decode(&blend_with_color(&png(32, 16, [255, 255, 255, 255]), "#ff0000", 0.5).unwrap());
        assert_eq!(out.dimensions(), (TEXTURE_TILE_SIZE, TEXTURE_TILE_SIZE));

        // White tinted red at half strength, detail overlaid at the other half.
        let Rgba([r, g, b, a]) = *out.get_pixel(64, 64);
        assert!(close(r, 255));
        assert!(close(g, 191));
        assert!(close(b, 191));
        assert_eq!(a, 255);
    }

    #[test]
    fn test_full_strength_is_pure_multiply() {
        let out = decode(&blend_with_color(&png(8, 8, [255, 255, 255, 255]), "#3498db", 1.0).unwrap());
        let Rgba([r, g, b, _]) = *out.get_pixel(10, 10);
        assert!(close(r, 0x34));
        assert!(close(g, 0x98));
        assert!(close(b, 0xdb));
    }

    #[test]
    fn test_bad_color() {
        let bytes = png(8, 8, [255, 255, 255, 255]);
        assert!(matches!(
            blend_with_color(&bytes, "red", 0.5),
            Err(TextureError::InvalidColor(_))
        ));
    }
}

mod resize_tests {
    use super::*;

    #[test]
    fn test_downscale_keeps_aspect() {
        let resized = resize_for_cropping(&png(800, 400, [10, 20, 30, 255]), DEFAULT_CROP_PREVIEW_SIZE).unwrap();
        assert_eq!((resized.width, resized.height), (400, 200));
        assert_eq!((resized.original_width, resized.original_height), (800, 400));
        assert_eq!(decode(&resized.bytes).dimensions(), (400, 200));
    }

    #[test]
    fn test_small_image_not_upscaled() {
        let resized = resize_for_cropping(&png(300, 200, [10, 20, 30, 255]), 400).unwrap();
        assert_eq!((resized.width, resized.height), (300, 200));
        assert_eq!((resized.original_width, resized.original_height), (300, 200));
    }

    #[test]
    fn test_tall_image() {
        let resized = resize_for_cropping(&png(100, 1000, [0, 0, 0, 255]), 400).unwrap();
        assert_eq!((resized.width, resized.height), (40, 400));
    }
}
