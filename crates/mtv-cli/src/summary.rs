//! Terminal rendering of the measurement panel with `comfy-table`.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mtv_core::{ButtonContext, HeaderContext, PanelRenderer, RowContext};
use mtv_model::{ActionCommand, MeasurementRecord};

/// Collects one render pass and prints it as text.
pub struct TableRenderer {
    heading: String,
    status: String,
    buttons: Vec<String>,
    table: Table,
    rows: usize,
    empty: Option<String>,
}

impl Default for TableRenderer {
    fn default() -> Self {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("#"),
            header_cell("Label"),
            header_cell("Value"),
            header_cell("Category"),
            header_cell("Flags"),
            header_cell("Actions"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 0, CellAlignment::Right);
        align_column(&mut table, 2, CellAlignment::Right);
        Self {
            heading: String::new(),
            status: String::new(),
            buttons: Vec::new(),
            table,
            rows: 0,
            empty: None,
        }
    }
}

impl TableRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rendered panel as text.
    pub fn output(&self) -> String {
        let mut lines = vec![self.heading.clone(), self.status.clone()];
        if !self.buttons.is_empty() {
            lines.push(format!("Add: {}", self.buttons.join("  ")));
        }
        match &self.empty {
            Some(message) if self.rows == 0 => lines.push(message.clone()),
            _ => lines.push(self.table.to_string()),
        }
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

impl PanelRenderer for TableRenderer {
    fn header(&mut self, header: &HeaderContext<'_>) {
        self.heading = header.heading();
        self.status = format!(
            "Sort: {} ({}) | Filter: {} | Categories: {}",
            header.sort_key,
            header.sort_direction.short(),
            header.filter,
            header.filter_options.len().saturating_sub(1)
        );
    }

    fn category_buttons(&mut self, buttons: &[ButtonContext<'_>]) {
        self.buttons = buttons
            .iter()
            .map(|button| {
                if button.is_selected {
                    format!("[{}]*", button.label)
                } else {
                    format!("[{}]", button.label)
                }
            })
            .collect();
    }

    fn row(&mut self, row: &RowContext<'_>) {
        let record = row.record;
        let label = match record.display_label() {
            "" => dim_cell("-"),
            label => Cell::new(label),
        };
        let value = record.resolved_value().map_or_else(|| dim_cell("-"), Cell::new);
        let category = row.category.map_or_else(|| dim_cell("-"), Cell::new);
        let flags = match row.warning {
            Some(tooltip) => Cell::new(warning_text(record, tooltip))
                .fg(Color::Yellow)
                .add_attribute(Attribute::Bold),
            None => match flags_text(record) {
                text if text.is_empty() => dim_cell("-"),
                text => Cell::new(text),
            },
        };
        self.table.add_row(vec![
            Cell::new(row.number),
            label,
            value,
            category,
            flags,
            dim_cell(actions_text(row.actions)),
        ]);
        self.rows += 1;
    }

    fn empty(&mut self, message: &str) {
        self.empty = Some(message.to_string());
    }
}

fn flags_text(record: &MeasurementRecord) -> String {
    let mut flags = Vec::new();
    if record.is_selected {
        flags.push("selected");
    }
    if !record.is_visible {
        flags.push("hidden");
    }
    if record.is_locked {
        flags.push("locked");
    }
    flags.join(", ")
}

fn warning_text(record: &MeasurementRecord, tooltip: &str) -> String {
    let flags = flags_text(record);
    let warning = if tooltip.is_empty() {
        "unmapped".to_string()
    } else {
        format!("unmapped: {tooltip}")
    };
    if flags.is_empty() {
        warning
    } else {
        format!("{flags}, {warning}")
    }
}

fn actions_text(actions: &[ActionCommand]) -> String {
    actions
        .iter()
        .map(ActionCommand::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
