//! Wall design data model.

use crate::geometry::{Footprint, Position, Rect, Size};
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Colors used for randomly generated blocks.
pub const BLOCK_PALETTE: [&str; 10] = [
    "#e74c3c", "#3498db", "#2ecc71", "#f1c40f", "#9b59b6", "#e67e22", "#e91e63", "#8d6e63",
    "#95a5a6", "#1abc9c",
];

/// The bounded canvas blocks are placed onto.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Wall {
    pub width: f64,
    pub height: f64,
    #[cfg_attr(feature = "serde", serde(default = "default_background"))]
    pub background_color: String,
}

#[cfg(feature = "serde")]
fn default_background() -> String {
    "#f5f5f5".to_string()
}

impl Wall {
    /// Creates a wall with the default background.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background_color: "#f5f5f5".to_string(),
        }
    }

    /// Sets the background color.
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Validates the wall dimensions.
    pub fn validate(&self) -> Result<()> {
        if !self.size().is_valid() {
            return Err(Error::InvalidWall(format!(
                "dimensions {}x{} must be positive",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Returns true if a block of `size` fits on the wall without overflow.
    ///
    /// Always false for an invalid wall.
    pub fn fits(&self, size: Size) -> bool {
        self.size().is_valid()
            && size.is_valid()
            && size.width <= self.width
            && size.height <= self.height
    }
}

/// A placed rectangular tile.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Block {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub texture_image: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub is_overflow: Option<bool>,
}

impl Block {
    /// Creates a block at `rect` with the given color.
    pub fn new(id: impl Into<String>, rect: Rect, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            color: color.into(),
            texture_image: None,
            is_overflow: None,
        }
    }

    /// Instantiates a template at `position`.
    pub fn from_template(id: impl Into<String>, template: &BlockTemplate, position: Position) -> Self {
        let mut block = Self::new(id, template.size().at(position), template.color.clone());
        block.texture_image = template.texture_image.clone();
        block
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Moves the block, keeping its id and appearance.
    pub fn move_to(&mut self, position: Position) {
        self.x = position.x;
        self.y = position.y;
    }

    /// Recomputes the overflow display flag against `wall`.
    pub fn refresh_overflow(&mut self, wall: &Wall) {
        let rect = self.rect();
        let overflowing = crate::bounds::is_horizontally_overflowing(&rect, wall)
            || crate::bounds::is_vertically_overflowing(&rect, wall);
        self.is_overflow = if overflowing { Some(true) } else { None };
    }
}

impl Footprint for Block {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// A prototype block supplying size and appearance for new blocks.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BlockTemplate {
    pub id: String,
    pub width: f64,
    pub height: f64,
    pub color: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub texture_image: Option<String>,
}

impl BlockTemplate {
    pub fn new(id: impl Into<String>, width: f64, height: f64, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            color: color.into(),
            texture_image: None,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// The templates a new design starts with.
pub fn default_block_templates() -> Vec<BlockTemplate> {
    vec![
        BlockTemplate::new("template-1", 60.0, 30.0, "#ffffff"),
        BlockTemplate::new("template-2", 60.0, 30.0, "#eeeeee"),
        BlockTemplate::new("template-3", 60.0, 30.0, "#222222"),
    ]
}

/// Summary shown in design listings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DesignPreview {
    pub block_count: usize,
    pub wall_dimensions: String,
    pub template_count: usize,
}

/// A named, persisted wall design.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Design {
    pub id: String,
    pub name: String,
    pub wall: Wall,
    pub blocks: Vec<Block>,
    pub block_templates: Vec<BlockTemplate>,
    /// RFC 3339 timestamp.
    pub created_at: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub preview: Option<DesignPreview>,
}

impl Design {
    /// Creates an empty design with the default templates.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        wall: Wall,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            wall,
            blocks: Vec::new(),
            block_templates: default_block_templates(),
            created_at: created_at.into(),
            preview: None,
        }
    }

    /// Builds the preview from the current contents.
    pub fn compute_preview(&self) -> DesignPreview {
        DesignPreview {
            block_count: self.blocks.len(),
            wall_dimensions: format!("{}×{}cm", self.wall.width, self.wall.height),
            template_count: self.block_templates.len(),
        }
    }

    /// Returns the block with `id`.
    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Largest template width and height, if any template exists.
    pub fn max_template_size(&self) -> Option<Size> {
        max_template_size(&self.block_templates)
    }
}

/// Largest width and largest height across `templates`.
pub fn max_template_size(templates: &[BlockTemplate]) -> Option<Size> {
    templates.iter().fold(None, |acc: Option<Size>, t| {
        Some(match acc {
            None => t.size(),
            Some(s) => Size::new(s.width.max(t.width), s.height.max(t.height)),
        })
    })
}
