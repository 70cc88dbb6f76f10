//! # wallpack texture
//!
//! Image processing for block textures: cropping an uploaded photo, tinting it
//! with a block color, and shrinking it for an interactive crop preview.
//!
//! Textures only decorate blocks (`Block::texture_image`); they never affect
//! placement.

pub mod color;
pub mod error;
pub mod process;

// Re-exports
pub use color::parse_hex_color;
pub use error::{Result, TextureError};
pub use process::{
    blend_with_color, crop, resize_for_cropping, CropArea, ResizedImage, DEFAULT_BLEND_STRENGTH,
    DEFAULT_CROP_PREVIEW_SIZE, TEXTURE_TILE_SIZE,
};
