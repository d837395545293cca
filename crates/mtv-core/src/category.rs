//! Category resolution and filter option derivation.
//!
//! A record's category is the canonical label of its tool tag when the tag
//! is known to the [`CategoryTable`], otherwise its own (non-blank) label.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use mtv_model::{ALL_CATEGORIES, FilterSelection, MeasurementRecord};

use crate::error::ConfigError;

/// Tool group passed to the host when a category button activates a tool.
pub const DEFAULT_TOOL_GROUP: &str = "default";

// =============================================================================
// CATEGORY TABLE
// =============================================================================

/// One symbolic tag with its display label and the tool it activates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    /// Symbolic tag as carried in `toolName` and sent with "add" actions.
    pub tag: String,
    /// Canonical, user-facing category label.
    pub label: String,
    /// Tool to activate when the category's add button is pressed.
    #[serde(default)]
    pub tool: Option<String>,
}

impl CategoryEntry {
    pub fn new(tag: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            label: label.into(),
            tool: None,
        }
    }

    #[must_use]
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }
}

#[derive(Debug, Default, Deserialize)]
struct CategoryFile {
    #[serde(default, rename = "category")]
    categories: Vec<CategoryEntry>,
}

/// Lookup table from tool tag to canonical category.
///
/// Entry order is preserved; it is also the order of the "add measurement"
/// buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    entries: Vec<CategoryEntry>,
}

impl Default for CategoryTable {
    /// The dental measurement categories.
    fn default() -> Self {
        Self {
            entries: vec![
                CategoryEntry::new("periapicalLength", "PA length").with_tool("Length"),
                CategoryEntry::new("canalAngle", "Canal angle").with_tool("Angle"),
                CategoryEntry::new("crownWidth", "Crown width").with_tool("Length"),
                CategoryEntry::new("rootLength", "Root length").with_tool("Length"),
            ],
        }
    }
}

impl CategoryTable {
    /// Build a table, rejecting duplicate tags.
    pub fn new(entries: Vec<CategoryEntry>) -> Result<Self, ConfigError> {
        let mut seen = BTreeSet::new();
        for entry in &entries {
            if !seen.insert(entry.tag.as_str()) {
                return Err(ConfigError::DuplicateTag {
                    tag: entry.tag.clone(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// A table with no tags; every record falls back to its own label.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Parse a table from TOML (`[[category]]` arrays of tables).
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: CategoryFile = toml::from_str(content)?;
        Self::new(file.categories)
    }

    /// Load a table from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    /// Find the entry for a tool tag.
    pub fn entry(&self, tag: &str) -> Option<&CategoryEntry> {
        self.entries.iter().find(|entry| entry.tag == tag)
    }

    /// Find the entry whose button reads `label`.
    pub fn entry_by_label(&self, label: &str) -> Option<&CategoryEntry> {
        self.entries.iter().find(|entry| entry.label == label)
    }

    /// Canonical label for a tool tag, if the tag is known.
    pub fn label_for_tag(&self, tag: &str) -> Option<&str> {
        self.entry(tag).map(|entry| entry.label.as_str())
    }
}

// =============================================================================
// RESOLUTION
// =============================================================================

/// Resolve the category of a record.
///
/// Returns `None` for records with an unknown tag and no usable label.
pub fn resolve_category<'a>(
    record: &'a MeasurementRecord,
    table: &'a CategoryTable,
) -> Option<&'a str> {
    if let Some(label) = record
        .tool_name
        .as_deref()
        .and_then(|tag| table.label_for_tag(tag))
    {
        return Some(label);
    }
    record
        .label
        .as_deref()
        .filter(|label| !label.trim().is_empty())
}

/// Filter options for a record set: `All`, then categories in first-seen order.
///
/// A category spelled like the `All` sentinel is folded into it.
pub fn category_options(records: &[MeasurementRecord], table: &CategoryTable) -> Vec<FilterSelection> {
    let mut seen = BTreeSet::from([ALL_CATEGORIES]);
    let mut options = vec![FilterSelection::All];
    for category in records
        .iter()
        .filter_map(|record| resolve_category(record, table))
    {
        if seen.insert(category) {
            options.push(FilterSelection::Category(category.to_string()));
        }
    }
    options
}
