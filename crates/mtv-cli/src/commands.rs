use std::cell::RefCell;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use comfy_table::{Cell, CellAlignment, Table};
use tracing::{info, info_span, warn};

use mtv_core::{
    ActionDispatcher, CategoryTable, Dispatch, ExportFormat, ExportedArtifact, MeasurementPanel,
    PanelRenderer, RecordStore, ToothSelection, ToothSystem, ViewStatus, category_options, filter,
};
use mtv_model::{ActionCommand, ActionEvent, FilterSelection, SortKey};

use crate::cli::{CategoriesArgs, DispatchArgs, ExportArgs, TeethArgs, ViewArgs, ViewOptions};
use crate::logging::redact_value;
use crate::records::load_records;
use crate::sink::FileSink;
use crate::summary::{TableRenderer, align_column, apply_table_style, dim_cell, header_cell};

/// Category table from `path`, or the built-in dental table.
pub fn load_table(path: Option<&Path>) -> Result<CategoryTable> {
    match path {
        Some(path) => {
            let table = CategoryTable::load(path)
                .with_context(|| format!("load category table {}", path.display()))?;
            info!(path = %path.display(), categories = table.entries().len(), "category table loaded");
            Ok(table)
        }
        None => Ok(CategoryTable::default()),
    }
}

/// Build a panel with the sort and filter requested on the command line.
fn panel_for<R: PanelRenderer>(
    renderer: R,
    options: &ViewOptions,
    store: &RecordStore,
    table: CategoryTable,
) -> MeasurementPanel<R> {
    let mut panel = MeasurementPanel::new(renderer, table);
    let key = SortKey::from(options.sort);
    if panel.state().sort_key != key {
        panel.select_sort_key(key);
    }
    if options.descending {
        panel.select_sort_key(key);
    }
    if let Some(label) = &options.filter {
        let selection = FilterSelection::from_label(label);
        if !panel.filter_options(store).contains(&selection) {
            warn!(filter = redact_value(label), "filter matches no category");
        }
        panel.select_filter(selection);
    }
    panel
}

// =============================================================================
// view
// =============================================================================

pub struct ViewOutcome {
    pub status: ViewStatus,
    pub output: String,
}

pub fn run_view(args: &ViewArgs, table: CategoryTable) -> Result<ViewOutcome> {
    let store = load_records(&args.view.records)?;
    let mut panel = panel_for(TableRenderer::new(), &args.view, &store, table);
    if let Some(title) = &args.title {
        panel = panel.with_title(title.clone());
    }
    let dispatcher = ActionDispatcher::detached().with_editing_disabled(args.disable_editing);
    let status = panel.render(Some(&store), &dispatcher);
    Ok(ViewOutcome {
        status,
        output: panel.renderer().output(),
    })
}

// =============================================================================
// categories
// =============================================================================

/// Filter options with record counts, or the category table itself when no
/// records are given.
pub fn run_categories(args: &CategoriesArgs, table: &CategoryTable) -> Result<Table> {
    let mut out = Table::new();
    match &args.records {
        Some(path) => {
            let store = load_records(path)?;
            out.set_header(vec![header_cell("Category"), header_cell("Records")]);
            apply_table_style(&mut out);
            align_column(&mut out, 1, CellAlignment::Right);
            for option in category_options(store.records(), table) {
                let count = filter(store.records(), &option, table).len();
                out.add_row(vec![option.label().to_string(), count.to_string()]);
            }
        }
        None => {
            out.set_header(vec![header_cell("Tag"), header_cell("Label"), header_cell("Tool")]);
            apply_table_style(&mut out);
            for entry in table.entries() {
                let tool = entry.tool.as_deref().map_or_else(|| dim_cell("-"), Cell::new);
                out.add_row(vec![Cell::new(&entry.tag), Cell::new(&entry.label), tool]);
            }
        }
    }
    Ok(out)
}

// =============================================================================
// export
// =============================================================================

pub struct ExportOutcome {
    /// `None` when the view was empty and nothing was written.
    pub artifact: Option<ExportedArtifact>,
    pub path: Option<PathBuf>,
}

pub fn run_export(args: &ExportArgs, table: CategoryTable) -> Result<ExportOutcome> {
    let span = info_span!("export", records = %args.view.records.display());
    let _guard = span.enter();
    let store = load_records(&args.view.records)?;
    let mut panel = panel_for(TableRenderer::new(), &args.view, &store, table);
    let mut sink = FileSink::new(&args.output_dir);
    let artifact = panel
        .export(&store, ExportFormat::from(args.format), &mut sink)
        .with_context(|| format!("export to {}", args.output_dir.display()))?;
    Ok(ExportOutcome {
        artifact,
        path: sink.written().last().cloned(),
    })
}

// =============================================================================
// dispatch
// =============================================================================

pub struct DispatchOutcome {
    pub dispatch: Dispatch,
    /// Events the host received, in order.
    pub events: Vec<ActionEvent>,
    /// Tool activations as `(tool, group)`.
    pub activations: Vec<(String, String)>,
}

pub fn run_dispatch(args: &DispatchArgs, table: CategoryTable) -> Result<DispatchOutcome> {
    let store = load_records(&args.records)?;
    let events = RefCell::new(Vec::new());
    let activations = RefCell::new(Vec::new());
    let handler = |event: &ActionEvent| events.borrow_mut().push(event.clone());
    let tools = |tool: &str, group: &str| {
        info!(tool, group, "tool activated");
        activations
            .borrow_mut()
            .push((tool.to_string(), group.to_string()));
    };
    let dispatcher = ActionDispatcher::new(&handler)
        .with_tools(&tools)
        .with_editing_disabled(args.disable_editing)
        .with_tool_group(args.tool_group.clone());

    let dispatch = match (args.action, &args.uid, &args.add) {
        (Some(action), Some(uid), _) => {
            if store.find(uid).is_none() {
                bail!("no measurement with uid {uid}");
            }
            dispatcher.dispatch_row(ActionCommand::from(action), uid)
        }
        (None, _, Some(label)) => {
            let mut panel = MeasurementPanel::new(TableRenderer::new(), table);
            let Some(dispatch) = panel.press_category_button(label, &dispatcher) else {
                bail!("unknown category button: {label}");
            };
            dispatch
        }
        _ => bail!("either --action with --uid or --add is required"),
    };
    Ok(DispatchOutcome {
        dispatch,
        events: events.into_inner(),
        activations: activations.into_inner(),
    })
}

// =============================================================================
// teeth
// =============================================================================

pub fn run_teeth(args: &TeethArgs) -> Result<Vec<String>> {
    let system = ToothSystem::from(args.system);
    let mut selection = ToothSelection::new();
    selection.select_system(system);
    if let Some(tooth) = &args.select {
        if !selection.select_tooth(tooth) {
            bail!("tooth {tooth} is not in the {system} system");
        }
        return Ok(vec![tooth.clone()]);
    }
    Ok(system.numbers())
}
