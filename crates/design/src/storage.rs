//! Persistent design library.
//!
//! The library keeps the whole design list in memory and writes it back in
//! full after every change, as one JSON array.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use wallpack_core::Design;

use crate::error::{DesignError, Result};

/// Where the serialized design list lives.
pub trait StorageBackend {
    /// Returns the stored payload, or `None` if nothing has been stored yet.
    fn read(&self) -> Result<Option<String>>;

    /// Replaces the stored payload.
    fn write(&mut self, payload: &str) -> Result<()>;
}

/// In-memory backend, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    payload: Option<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last written payload.
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.payload.clone())
    }

    fn write(&mut self, payload: &str) -> Result<()> {
        self.payload = Some(payload.to_string());
        Ok(())
    }
}

/// A JSON file on disk. A missing file reads as an empty library.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileBackend {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, payload: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

/// Counts from [`DesignLibrary::import_batch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub overwritten: usize,
    pub skipped: usize,
}

/// Saved designs over a [`StorageBackend`].
#[derive(Debug)]
pub struct DesignLibrary<B: StorageBackend> {
    backend: B,
    designs: Vec<Design>,
}

impl<B: StorageBackend> DesignLibrary<B> {
    /// Creates an empty library; call [`Self::load`] to read stored designs.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            designs: Vec::new(),
        }
    }

    /// Creates a library and loads it.
    pub fn open(backend: B) -> Result<Self> {
        let mut library = Self::new(backend);
        library.load()?;
        Ok(library)
    }

    /// Replaces the in-memory list with the stored one.
    pub fn load(&mut self) -> Result<&[Design]> {
        self.designs = match self.backend.read()? {
            Some(payload) if !payload.trim().is_empty() => serde_json::from_str(&payload)?,
            _ => Vec::new(),
        };
        log::debug!("Loaded {} designs", self.designs.len());
        Ok(&self.designs)
    }

    pub fn designs(&self) -> &[Design] {
        &self.designs
    }

    pub fn len(&self) -> usize {
        self.designs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.designs.is_empty()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Index of the design named `name`.
    pub fn position_by_name(&self, name: &str) -> Option<usize> {
        self.designs.iter().position(|d| d.name == name)
    }

    /// Stores `design`, replacing the one with the same id if present.
    pub fn save(&mut self, design: Design) -> Result<()> {
        match self.designs.iter().position(|d| d.id == design.id) {
            Some(index) => {
                log::info!("Updating design '{}'", design.name);
                self.designs[index] = design;
            }
            None => {
                log::info!("Saving new design '{}'", design.name);
                self.designs.push(design);
            }
        }
        self.persist()
    }

    /// Removes and returns the design at `index`.
    pub fn delete(&mut self, index: usize) -> Result<Design> {
        if index >= self.designs.len() {
            return Err(DesignError::NotFound(format!(
                "index {} (library holds {} designs)",
                index,
                self.designs.len()
            )));
        }
        let removed = self.designs.remove(index);
        log::info!("Deleted design '{}'", removed.name);
        self.persist()?;
        Ok(removed)
    }

    /// Adds designs, matching existing ones by name.
    ///
    /// A design whose name is already taken replaces the stored one when
    /// `overwrite` is set and is skipped otherwise.
    pub fn import_batch(&mut self, designs: Vec<Design>, overwrite: bool) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();
        for design in designs {
            match self.position_by_name(&design.name) {
                Some(index) if overwrite => {
                    self.designs[index] = design;
                    summary.overwritten += 1;
                }
                Some(_) => summary.skipped += 1,
                None => {
                    self.designs.push(design);
                    summary.imported += 1;
                }
            }
        }
        log::info!(
            "Imported {} designs ({} overwritten, {} skipped)",
            summary.imported,
            summary.overwritten,
            summary.skipped
        );
        self.persist()?;
        Ok(summary)
    }

    fn persist(&mut self) -> Result<()> {
        let payload = serde_json::to_string(&self.designs)?;
        self.backend.write(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallpack_core::Wall;

    fn design(id: &str, name: &str) -> Design {
        Design::new(id, name, Wall::new(300.0, 150.0), "2024-01-01T00:00:00Z")
    }

    #[test]
    fn test_empty_backend_loads_empty() {
        let library = DesignLibrary::open(MemoryBackend::new()).unwrap();
        assert!(library.is_empty());
    }

    #[test]
    fn test_save_updates_by_id() {
        let mut library = DesignLibrary::new(MemoryBackend::new());
        library.save(design("a", "First")).unwrap();
        library.save(design("b", "Second")).unwrap();
        library.save(design("a", "Renamed")).unwrap();

        let names: Vec<&str> = library.designs().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Renamed", "Second"]);
    }

    #[test]
    fn test_mutations_persist() {
        let mut library = DesignLibrary::new(MemoryBackend::new());
        library.save(design("a", "First")).unwrap();

        let backend = library.backend().clone();
        let reopened = DesignLibrary::open(backend).unwrap();
        assert_eq!(reopened.designs(), library.designs());
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut library = DesignLibrary::new(MemoryBackend::new());
        library.save(design("a", "First")).unwrap();
        assert!(matches!(library.delete(1), Err(DesignError::NotFound(_))));
        assert_eq!(library.delete(0).unwrap().id, "a");
        assert!(library.is_empty());
    }

    #[test]
    fn test_import_batch_by_name() {
        let mut library = DesignLibrary::new(MemoryBackend::new());
        library.save(design("a", "Kitchen")).unwrap();

        let summary = library
            .import_batch(vec![design("x", "Kitchen"), design("y", "Hall")], false)
            .unwrap();
        assert_eq!(summary, ImportSummary { imported: 1, overwritten: 0, skipped: 1 });
        assert_eq!(library.designs()[0].id, "a");

        let summary = library.import_batch(vec![design("z", "Kitchen")], true).unwrap();
        assert_eq!(summary, ImportSummary { imported: 0, overwritten: 1, skipped: 0 });
        assert_eq!(library.designs()[0].id, "z");
        assert_eq!(library.len(), 2);
    }
}
