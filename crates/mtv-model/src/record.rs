use serde::{Deserialize, Serialize};

/// Structured display text attached to a measurement by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayText {
    /// Primary lines; the first one stands in for a missing value.
    pub primary: Vec<String>,
    /// Secondary lines (shown in row details only).
    pub secondary: Vec<String>,
}

/// A single measurement entry supplied by the host viewer.
///
/// Records are owned by the host and only borrowed by the view engine.
/// The presentation flags are passed through to renderers untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementRecord {
    /// Stable identifier, unique within a record set.
    pub uid: String,
    /// Display name.
    #[serde(default)]
    pub label: Option<String>,
    /// Pre-formatted display value (e.g. "12.4 mm").
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub display_text: DisplayText,
    /// Symbolic tool tag (e.g. "Length", "canalAngle").
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub color_hex: Option<String>,
    #[serde(default)]
    pub is_selected: bool,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub is_unmapped: bool,
    #[serde(default)]
    pub status_tooltip: Option<String>,
}

fn default_visible() -> bool {
    true
}

impl MeasurementRecord {
    /// Create a visible, unselected record with only an identifier.
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            label: None,
            value: None,
            display_text: DisplayText::default(),
            tool_name: None,
            color_hex: None,
            is_selected: false,
            is_visible: true,
            is_locked: false,
            is_unmapped: false,
            status_tooltip: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_tool(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = Some(tool_name.into());
        self
    }

    #[must_use]
    pub fn with_primary_text(mut self, lines: Vec<String>) -> Self {
        self.display_text.primary = lines;
        self
    }

    /// Label for display; a missing label reads as the empty string.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }

    /// Value shown for this record: `value`, else the first primary line.
    pub fn resolved_value(&self) -> Option<&str> {
        self.value
            .as_deref()
            .or_else(|| self.display_text.primary.first().map(String::as_str))
    }
}
