//! JSON design files.
//!
//! A file holds either one design or an archive of designs. Parsing checks the
//! shape before deserializing so a wrong file is reported as
//! [`DesignError::InvalidFormat`] with the expected shape instead of a serde
//! message about some nested field.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use wallpack_core::{Block, BlockTemplate, Design, DesignPreview, Wall};

use crate::error::{DesignError, Result};
use crate::timestamp::Timestamp;

const EXPECTED_SHAPE: &str = "expected a design object with `name` (string), `wall.width` and \
    `wall.height` (numbers), `blocks` and `blockTemplates` (arrays), or an archive object with a \
    non-empty `designs` array of such objects";

/// Name given to the editor's unsaved state in an archive.
pub const CURRENT_DESIGN_NAME: &str = "Current Design";

/// A design as found in a file; ids and dates may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub wall: Wall,
    pub blocks: Vec<Block>,
    pub block_templates: Vec<BlockTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<DesignPreview>,
}

impl DesignData {
    /// `"{w}×{h}cm"`.
    pub fn wall_dimensions(&self) -> String {
        format!("{}×{}cm", self.wall.width, self.wall.height)
    }

    /// Turns file contents into a stored design with a fresh id.
    ///
    /// A missing creation date becomes `imported_at`; a missing preview is
    /// computed from the contents.
    pub fn into_design(self, id: String, imported_at: &str) -> Design {
        let mut design = Design {
            id,
            name: self.name,
            wall: self.wall,
            blocks: self.blocks,
            block_templates: self.block_templates,
            created_at: self.created_at.unwrap_or_else(|| imported_at.to_string()),
            preview: self.preview,
        };
        if design.preview.is_none() {
            design.preview = Some(design.compute_preview());
        }
        design
    }
}

/// Archive payload as found in a file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveData {
    #[serde(default)]
    pub export_date: Option<String>,
    pub designs: Vec<DesignData>,
}

/// A parsed design file.
#[derive(Debug, Clone, PartialEq)]
pub enum DesignFile {
    Single(DesignData),
    Archive(ArchiveData),
}

impl DesignFile {
    /// Number of designs in the file.
    pub fn design_count(&self) -> usize {
        match self {
            DesignFile::Single(_) => 1,
            DesignFile::Archive(a) => a.designs.len(),
        }
    }
}

/// A collection of designs exported together.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignArchive {
    pub export_date: String,
    pub designs: Vec<Design>,
}

impl DesignArchive {
    /// Creates an empty archive stamped with `export_date`.
    pub fn new(export_date: impl Into<String>) -> Self {
        Self {
            export_date: export_date.into(),
            designs: Vec::new(),
        }
    }

    /// Adds saved designs.
    pub fn with_designs(mut self, designs: impl IntoIterator<Item = Design>) -> Self {
        self.designs.extend(designs);
        self
    }

    /// Adds a snapshot of unsaved editor state named [`CURRENT_DESIGN_NAME`].
    pub fn with_current(
        mut self,
        id: impl Into<String>,
        wall: Wall,
        blocks: Vec<Block>,
        block_templates: Vec<BlockTemplate>,
    ) -> Self {
        let mut design = Design {
            id: id.into(),
            name: CURRENT_DESIGN_NAME.to_string(),
            wall,
            blocks,
            block_templates,
            created_at: self.export_date.clone(),
            preview: None,
        };
        design.preview = Some(design.compute_preview());
        self.designs.push(design);
        self
    }
}

/// Kind of file shown in an import preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Single,
    Archive,
}

/// What the user sees before confirming an import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportPreview {
    pub kind: ImportKind,
    pub name: String,
    pub design_count: usize,
    pub block_count: Option<usize>,
    pub wall_dimensions: Option<String>,
    pub template_count: Option<usize>,
    pub created_at: Option<String>,
    pub export_date: Option<String>,
}

impl ImportPreview {
    pub fn from_file(file: &DesignFile) -> Self {
        match file {
            DesignFile::Single(d) => Self {
                kind: ImportKind::Single,
                name: d.name.clone(),
                design_count: 1,
                block_count: Some(d.blocks.len()),
                wall_dimensions: Some(d.wall_dimensions()),
                template_count: Some(d.block_templates.len()),
                created_at: d.created_at.clone(),
                export_date: None,
            },
            DesignFile::Archive(a) => Self {
                kind: ImportKind::Archive,
                name: format!("Design Archive ({} designs)", a.designs.len()),
                design_count: a.designs.len(),
                block_count: None,
                wall_dimensions: None,
                template_count: None,
                created_at: None,
                export_date: a.export_date.clone(),
            },
        }
    }
}

/// Pretty-printed JSON for one design.
pub fn serialize_design(design: &Design) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(design)?)
}

/// Pretty-printed JSON for an archive.
pub fn serialize_archive(archive: &DesignArchive) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(archive)?)
}

/// Parses a design file, telling single designs and archives apart.
pub fn parse(bytes: &[u8]) -> Result<DesignFile> {
    let value: Value = serde_json::from_slice(bytes)?;

    if is_design_shape(&value) {
        let design: DesignData = serde_json::from_value(value)?;
        log::debug!("Parsed design '{}'", design.name);
        return Ok(DesignFile::Single(design));
    }
    if is_archive_shape(&value) {
        let archive: ArchiveData = serde_json::from_value(value)?;
        log::debug!("Parsed archive with {} designs", archive.designs.len());
        return Ok(DesignFile::Archive(archive));
    }

    Err(DesignError::InvalidFormat(EXPECTED_SHAPE.to_string()))
}

fn is_design_shape(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    let wall_ok = obj.get("wall").map_or(false, |wall| {
        wall.get("width").map_or(false, Value::is_number)
            && wall.get("height").map_or(false, Value::is_number)
    });
    wall_ok
        && obj.get("blocks").map_or(false, Value::is_array)
        && obj.get("blockTemplates").map_or(false, Value::is_array)
        && obj.get("name").map_or(false, Value::is_string)
}

fn is_archive_shape(value: &Value) -> bool {
    value
        .get("designs")
        .and_then(Value::as_array)
        .map_or(false, |designs| !designs.is_empty() && designs.iter().all(is_design_shape))
}

/// Converts a parsed file into designs ready to store.
///
/// Every design gets a new id from `next_id`, so importing the same file twice
/// never collides by id; duplicates are detected by name when storing.
pub fn prepare_import(
    file: DesignFile,
    mut next_id: impl FnMut() -> String,
    imported_at: &str,
) -> Vec<Design> {
    let designs = match file {
        DesignFile::Single(d) => vec![d],
        DesignFile::Archive(a) => a.designs,
    };
    designs
        .into_iter()
        .map(|d| d.into_design(next_id(), imported_at))
        .collect()
}

/// Default archive file name: `designs-archive-YYYY-MM-DD-HHMM`.
pub fn default_archive_filename(at: &Timestamp) -> String {
    format!(
        "designs-archive-{:04}-{:02}-{:02}-{:02}{:02}",
        at.year, at.month, at.day, at.hour, at.minute
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallpack_core::Rect;

    fn sample_design() -> Design {
        let mut design = Design::new("d1", "Kitchen", Wall::new(300.0, 150.0), "2024-05-01T10:00:00Z");
        design.blocks.push(Block::new("b1", Rect::new(0.0, 0.0, 60.0, 30.0), "#ffffff"));
        design
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let bytes = serialize_design(&sample_design()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"blockTemplates\""));
        assert!(text.contains("\"createdAt\""));
        assert!(text.contains("\"backgroundColor\""));
        assert!(!text.contains("block_templates"));
    }

    #[test]
    fn test_parse_single() {
        let bytes = serialize_design(&sample_design()).unwrap();
        match parse(&bytes).unwrap() {
            DesignFile::Single(d) => {
                assert_eq!(d.name, "Kitchen");
                assert_eq!(d.id.as_deref(), Some("d1"));
                assert_eq!(d.blocks.len(), 1);
            }
            other => panic!("expected single design, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_minimal_design() {
        let json = br#"{"name":"Bare","wall":{"width":200,"height":100},"blocks":[],"blockTemplates":[]}"#;
        let file = parse(json).unwrap();
        let DesignFile::Single(d) = file else {
            panic!("expected single design");
        };
        assert_eq!(d.wall.background_color, "#f5f5f5");
        assert!(d.created_at.is_none());
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let missing_name = br#"{"wall":{"width":200,"height":100},"blocks":[],"blockTemplates":[]}"#;
        assert!(matches!(parse(missing_name), Err(DesignError::InvalidFormat(_))));

        let string_width = br#"{"name":"x","wall":{"width":"200","height":100},"blocks":[],"blockTemplates":[]}"#;
        assert!(matches!(parse(string_width), Err(DesignError::InvalidFormat(_))));

        let empty_archive = br#"{"exportDate":"2024-01-01T00:00:00Z","designs":[]}"#;
        assert!(matches!(parse(empty_archive), Err(DesignError::InvalidFormat(_))));

        assert!(matches!(parse(b"[1, 2, 3]"), Err(DesignError::InvalidFormat(_))));
        assert!(matches!(parse(b"not json"), Err(DesignError::Json(_))));
    }

    #[test]
    fn test_archive_with_one_bad_entry_is_rejected() {
        let json = br#"{"designs":[
            {"name":"ok","wall":{"width":200,"height":100},"blocks":[],"blockTemplates":[]},
            {"name":"bad","wall":{"width":200},"blocks":[],"blockTemplates":[]}
        ]}"#;
        assert!(matches!(parse(json), Err(DesignError::InvalidFormat(_))));
    }

    #[test]
    fn test_archive_preview_and_import() {
        let archive = DesignArchive::new("2024-06-01T08:30:00Z")
            .with_designs(vec![sample_design()])
            .with_current("cur", Wall::new(100.0, 50.0), Vec::new(), Vec::new());
        let bytes = serialize_archive(&archive).unwrap();
        let file = parse(&bytes).unwrap();

        let preview = ImportPreview::from_file(&file);
        assert_eq!(preview.kind, ImportKind::Archive);
        assert_eq!(preview.name, "Design Archive (2 designs)");
        assert_eq!(preview.export_date.as_deref(), Some("2024-06-01T08:30:00Z"));

        let mut n = 0;
        let designs = prepare_import(
            file,
            || {
                n += 1;
                format!("new-{}", n)
            },
            "2024-07-01T00:00:00Z",
        );
        assert_eq!(designs.len(), 2);
        assert_eq!(designs[0].id, "new-1");
        assert_eq!(designs[1].name, CURRENT_DESIGN_NAME);
        assert_eq!(designs[1].preview.as_ref().unwrap().wall_dimensions, "100×50cm");
    }

    #[test]
    fn test_import_fills_missing_fields() {
        let json = br#"{"name":"Bare","wall":{"width":200,"height":100},"blocks":[],"blockTemplates":[]}"#;
        let designs = prepare_import(parse(json).unwrap(), || "id".to_string(), "2024-07-01T00:00:00Z");
        assert_eq!(designs[0].created_at, "2024-07-01T00:00:00Z");
        let preview = designs[0].preview.as_ref().unwrap();
        assert_eq!(preview.block_count, 0);
        assert_eq!(preview.wall_dimensions, "200×100cm");
    }

    #[test]
    fn test_default_archive_filename() {
        let at = Timestamp::from_unix_secs(1_709_214_310);
        assert_eq!(default_archive_filename(&at), "designs-archive-2024-02-29-1345");
    }
}
