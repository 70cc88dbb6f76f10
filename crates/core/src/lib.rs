//! # wallpack core
//!
//! Geometry, validation and data model for the wallpack wall-design engine.
//!
//! A wall is a bounded rectangular canvas; blocks are axis-aligned rectangles
//! placed on it. This crate holds everything the placement engine agrees on:
//!
//! - **Geometry**: [`Rect`], [`Position`], [`Size`], [`overlaps`], [`overlap_percentage`]
//! - **Bounds**: strict overflow flags and the tolerant placement bounds in [`bounds`]
//! - **Validation**: [`can_place_block`] and [`PlacementContext`]
//! - **Overlap feedback**: [`classify_overlap`], [`has_significant_overlap`]
//! - **Model**: [`Wall`], [`Block`], [`BlockTemplate`], [`Design`]
//! - **Configuration**: [`PlacementConfig`]
//!
//! ## Example
//!
//! ```rust
//! use wallpack_core::{can_place_block, Block, PlacementConfig, Rect, Wall};
//!
//! let wall = Wall::new(200.0, 100.0);
//! let placed = vec![Block::new("a", Rect::new(0.0, 0.0, 60.0, 30.0), "#ffffff")];
//! let config = PlacementConfig::default();
//!
//! assert!(can_place_block(&Rect::new(60.0, 0.0, 60.0, 30.0), &placed, &wall, None, &config));
//! assert!(!can_place_block(&Rect::new(30.0, 0.0, 60.0, 30.0), &placed, &wall, None, &config));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod bounds;
pub mod config;
pub mod error;
pub mod geometry;
pub mod model;
pub mod overlap;
pub mod validator;

// Re-exports
pub use bounds::{
    is_horizontally_overflowing, is_valid_horizontal_position, is_valid_vertical_position,
    is_vertically_overflowing, is_within_wall, BoundsPolicy,
};
pub use config::PlacementConfig;
pub use error::{Error, Result};
pub use geometry::{overlap_percentage, overlaps, Footprint, Position, Rect, Size};
pub use model::{
    default_block_templates, Block, BlockTemplate, Design, DesignPreview, Wall, BLOCK_PALETTE,
};
pub use overlap::{
    classify_overlap, has_significant_overlap, overlap_severity, OverlapOffender, OverlapReport,
    OverlapSeverity,
};
pub use validator::{can_place_block, can_place_tolerant, can_place_within_wall, PlacementContext};
