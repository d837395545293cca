use std::fmt;

use serde::{Deserialize, Serialize};

/// Symbolic commands forwarded to the host's action handler.
///
/// The serialized names are the command strings the host listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionCommand {
    #[serde(rename = "addMeasurement")]
    AddMeasurement,
    #[serde(rename = "removeMeasurement")]
    RemoveMeasurement,
    /// Select a row; the host jumps the viewport to the measurement.
    #[serde(rename = "jumpToMeasurement")]
    SelectMeasurement,
    #[serde(rename = "renameMeasurement")]
    RenameMeasurement,
    #[serde(rename = "toggleVisibilityMeasurement")]
    ToggleVisibility,
    #[serde(rename = "toggleLockMeasurement")]
    ToggleLock,
    #[serde(rename = "changeMeasurementColor")]
    RecolorMeasurement,
}

impl ActionCommand {
    /// Commands available on every row, in display order.
    pub const ROW: [ActionCommand; 6] = [
        Self::SelectMeasurement,
        Self::RenameMeasurement,
        Self::ToggleVisibility,
        Self::ToggleLock,
        Self::RecolorMeasurement,
        Self::RemoveMeasurement,
    ];

    /// Wire name of the command.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddMeasurement => "addMeasurement",
            Self::RemoveMeasurement => "removeMeasurement",
            Self::SelectMeasurement => "jumpToMeasurement",
            Self::RenameMeasurement => "renameMeasurement",
            Self::ToggleVisibility => "toggleVisibilityMeasurement",
            Self::ToggleLock => "toggleLockMeasurement",
            Self::RecolorMeasurement => "changeMeasurementColor",
        }
    }

    /// Commands hidden when editing is disabled.
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::AddMeasurement | Self::RemoveMeasurement)
    }
}

impl fmt::Display for ActionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user intent, as handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEvent {
    pub command: ActionCommand,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

impl ActionEvent {
    /// A row action targeting one record.
    pub fn for_record(command: ActionCommand, uid: impl Into<String>) -> Self {
        Self {
            command,
            value: None,
            label: None,
            uid: Some(uid.into()),
        }
    }

    /// An "add measurement" request carrying the category tag and label.
    pub fn add(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            command: ActionCommand::AddMeasurement,
            value: Some(value.into()),
            label: Some(label.into()),
            uid: None,
        }
    }
}
