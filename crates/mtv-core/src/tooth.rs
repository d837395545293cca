//! Tooth numbering systems and the two-step tooth selector.

use std::fmt;

/// Dental numbering system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ToothSystem {
    /// FDI two-digit notation: quadrant 1-4 followed by tooth 1-8.
    #[default]
    Fdi,
    /// Universal numbering 1-32.
    Universal,
}

impl ToothSystem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fdi => "FDI",
            Self::Universal => "UNI",
        }
    }

    /// Tooth numbers in display order.
    pub fn numbers(&self) -> Vec<String> {
        match self {
            Self::Fdi => (1..=4)
                .flat_map(|quadrant| (1..=8).map(move |tooth| format!("{quadrant}{tooth}")))
                .collect(),
            Self::Universal => (1..=32).map(|tooth| tooth.to_string()).collect(),
        }
    }

    pub fn contains(&self, tooth: &str) -> bool {
        self.numbers().iter().any(|number| number == tooth)
    }
}

impl fmt::Display for ToothSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Selected numbering system and tooth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToothSelection {
    system: ToothSystem,
    tooth: Option<String>,
}

impl ToothSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn system(&self) -> ToothSystem {
        self.system
    }

    pub fn tooth(&self) -> Option<&str> {
        self.tooth.as_deref()
    }

    /// Switch numbering system; the selected tooth is cleared.
    pub fn select_system(&mut self, system: ToothSystem) {
        self.system = system;
        self.tooth = None;
    }

    /// Select a tooth in the active system. Unknown numbers are rejected and
    /// leave the selection unchanged.
    pub fn select_tooth(&mut self, tooth: &str) -> bool {
        if !self.system.contains(tooth) {
            return false;
        }
        self.tooth = Some(tooth.to_string());
        true
    }

    pub fn clear_tooth(&mut self) {
        self.tooth = None;
    }
}
