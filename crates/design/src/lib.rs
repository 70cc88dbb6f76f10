//! # wallpack design
//!
//! Design files and the saved-design library.
//!
//! - [`codec`]: JSON serialization of single designs and archives, import
//!   validation and previews
//! - [`storage`]: [`DesignLibrary`] over a pluggable [`StorageBackend`]
//! - [`ids`]: design and block identifiers
//! - [`timestamp`]: UTC timestamps for `createdAt` / `exportDate`
//!
//! ## Example
//!
//! ```rust
//! use wallpack_core::{Design, Wall};
//! use wallpack_design::{codec, DesignLibrary, MemoryBackend};
//!
//! let design = Design::new("d1", "Hallway", Wall::new(240.0, 120.0), "2024-01-01T00:00:00Z");
//! let bytes = codec::serialize_design(&design).unwrap();
//! let file = codec::parse(&bytes).unwrap();
//! let imported = codec::prepare_import(file, wallpack_design::ids::new_design_id, "2024-01-02T00:00:00Z");
//!
//! let mut library = DesignLibrary::new(MemoryBackend::new());
//! let summary = library.import_batch(imported, false).unwrap();
//! assert_eq!(summary.imported, 1);
//! ```

pub mod codec;
pub mod error;
pub mod ids;
pub mod storage;
pub mod timestamp;

// Re-exports
pub use codec::{
    default_archive_filename, parse, prepare_import, serialize_archive, serialize_design,
    DesignArchive, DesignData, DesignFile, ImportKind, ImportPreview,
};
pub use error::{DesignError, Result};
pub use storage::{DesignLibrary, FileBackend, ImportSummary, MemoryBackend, StorageBackend};
pub use timestamp::Timestamp;
