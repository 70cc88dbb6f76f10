//! Image operations behind block textures.
//!
//! Inputs are encoded image bytes in any format the `image` crate decodes;
//! outputs are always PNG.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};

use crate::color::{mix, multiply, overlay, parse_hex_color};
use crate::error::{Result, TextureError};

/// Edge length of blended texture tiles.
pub const TEXTURE_TILE_SIZE: u32 = 128;
/// Default longest edge for [`resize_for_cropping`].
pub const DEFAULT_CROP_PREVIEW_SIZE: u32 = 400;
/// Default color strength for [`blend_with_color`].
pub const DEFAULT_BLEND_STRENGTH: f32 = 0.5;

/// Pixel rectangle to cut from an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropArea {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropArea {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// A downscaled image together with the source dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizedImage {
    /// PNG bytes.
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub original_width: u32,
    pub original_height: u32,
}

fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|err| TextureError::Decode(err.to_string()))
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageOutputFormat::Png)
        .map_err(|err| TextureError::Encode(err.to_string()))?;
    Ok(out.into_inner())
}

/// Cuts `area` out of the image.
///
/// The area must be non-empty and lie entirely inside the image.
pub fn crop(bytes: &[u8], area: CropArea) -> Result<Vec<u8>> {
    let image = decode(bytes)?;
    let (w, h) = (image.width(), image.height());
    if area.width == 0 || area.height == 0 {
        return Err(TextureError::InvalidCrop("crop area is empty".to_string()));
    }
    let fits_x = area.x.checked_add(area.width).map_or(false, |r| r <= w);
    let fits_y = area.y.checked_add(area.height).map_or(false, |b| b <= h);
    if !fits_x || !fits_y {
        return Err(TextureError::InvalidCrop(format!(
            "{}x{} at ({}, {}) exceeds {}x{} image",
            area.width, area.height, area.x, area.y, w, h
        )));
    }
    let cropped = image.crop_imm(area.x, area.y, area.width, area.height);
    log::debug!("Cropped {}x{} image to {}x{}", w, h, area.width, area.height);
    encode_png(&cropped)
}

/// Tints an image with `color` and returns a square texture tile.
///
/// The image is stretched to [`TEXTURE_TILE_SIZE`] square, multiplied by the
/// color at `strength`, then the original is overlaid at `1 - strength` to
/// bring back surface detail. `strength` is clamped to `0.0..=1.0`.
pub fn blend_with_color(bytes: &[u8], color: &str, strength: f32) -> Result<Vec<u8>> {
    let rgb = parse_hex_color(color)?;
    let strength = strength.clamp(0.0, 1.0);
    let source = decode(bytes)?.to_rgba8();
    let tile = image::imageops::resize(&source, TEXTURE_TILE_SIZE, TEXTURE_TILE_SIZE, FilterType::Triangle);

    let tint = rgb.map(|c| f32::from(c) / 255.0);
    let blended = RgbaImage::from_fn(TEXTURE_TILE_SIZE, TEXTURE_TILE_SIZE, |x, y| {
        let Rgba(px) = *tile.get_pixel(x, y);
        let mut out = [0u8; 4];
        for i in 0..3 {
            let original = f32::from(px[i]) / 255.0;
            let tinted = mix(original, multiply(original, tint[i]), strength);
            let detailed = mix(tinted, overlay(tinted, original), 1.0 - strength);
            out[i] = (detailed.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        out[3] = px[3];
        Rgba(out)
    });

    encode_png(&DynamicImage::ImageRgba8(blended))
}

/// Downscales an image so neither edge exceeds `max_size`, keeping the aspect ratio.
///
/// Images already within bounds are re-encoded at their own size.
pub fn resize_for_cropping(bytes: &[u8], max_size: u32) -> Result<ResizedImage> {
    let image = decode(bytes)?;
    let (original_width, original_height) = (image.width(), image.height());
    let max_size = max_size.max(1);

    let resized = if original_width > max_size || original_height > max_size {
        let ratio = f64::min(
            f64::from(max_size) / f64::from(original_width),
            f64::from(max_size) / f64::from(original_height),
        );
        let width = ((f64::from(original_width) * ratio).round() as u32).clamp(1, max_size);
        let height = ((f64::from(original_height) * ratio).round() as u32).clamp(1, max_size);
        log::debug!(
            "Resizing {}x{} to {}x{} for cropping",
            original_width,
            original_height,
            width,
            height
        );
        image.resize_exact(width, height, FilterType::Triangle)
    } else {
        image
    };

    Ok(ResizedImage {
        bytes: encode_png(&resized)?,
        width: resized.width(),
        height: resized.height(),
        original_width,
        original_height,
    })
}
