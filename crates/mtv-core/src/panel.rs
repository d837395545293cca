//! Measurement panel composition.
//!
//! The panel owns the per-instance [`ViewState`] and view cache and drives a
//! host-supplied [`PanelRenderer`]. Renderers receive explicit contexts
//! holding exactly what they draw; nothing is looked up ambiently.

use mtv_model::{ActionCommand, FilterSelection, MeasurementRecord, SortDirection, SortKey};

use crate::category::{CategoryTable, category_options, resolve_category};
use crate::dispatch::{ActionDispatcher, Dispatch};
use crate::error::ExportError;
use crate::export::{DownloadSink, ExportFormat, ExportedArtifact, export_view};
use crate::materialize::{DerivedView, ViewCache};
use crate::state::ViewState;
use crate::store::RecordStore;

pub const DEFAULT_TITLE: &str = "Measurements";

/// Empty-state text when no category button has been pressed.
pub const NO_MEASUREMENTS: &str = "No tracked measurements";

// =============================================================================
// RENDER CONTEXTS
// =============================================================================

/// Everything the panel header shows.
#[derive(Debug, Clone)]
pub struct HeaderContext<'v> {
    pub title: &'v str,
    /// Number of records in the store (not in the filtered view).
    pub count: usize,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub filter: &'v FilterSelection,
    pub filter_options: &'v [FilterSelection],
}

impl HeaderContext<'_> {
    /// `"<title> (<count>)"`.
    pub fn heading(&self) -> String {
        format!("{} ({})", self.title, self.count)
    }
}

/// One "add measurement" category button.
#[derive(Debug, Clone)]
pub struct ButtonContext<'v> {
    pub label: &'v str,
    pub tag: &'v str,
    /// Whether this was the last button pressed.
    pub is_selected: bool,
}

/// One measurement row.
#[derive(Debug, Clone)]
pub struct RowContext<'v> {
    /// 1-based position in the view.
    pub number: usize,
    pub record: &'v MeasurementRecord,
    pub category: Option<&'v str>,
    /// Row commands exposed under the current editing mode.
    pub actions: &'v [ActionCommand],
    /// Warning tooltip for unmapped measurements.
    pub warning: Option<&'v str>,
}

/// Host-supplied widgets, resolved once when the panel is composed.
pub trait PanelRenderer {
    fn header(&mut self, header: &HeaderContext<'_>);

    fn category_buttons(&mut self, _buttons: &[ButtonContext<'_>]) {}

    fn row(&mut self, row: &RowContext<'_>);

    /// Rendered instead of rows when there is nothing to show.
    fn empty(&mut self, message: &str);
}

/// What a render pass showed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    /// The host has not supplied records yet.
    NoStore,
    /// Records exist but none pass the filter (or the store is empty).
    Empty,
    Rows(usize),
}

// =============================================================================
// PANEL
// =============================================================================

pub struct MeasurementPanel<R: PanelRenderer> {
    title: String,
    table: CategoryTable,
    state: ViewState,
    cache: ViewCache,
    renderer: R,
}

impl<R: PanelRenderer> MeasurementPanel<R> {
    pub fn new(renderer: R, table: CategoryTable) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            table,
            state: ViewState::default(),
            cache: ViewCache::default(),
            renderer,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn select_sort_key(&mut self, key: SortKey) {
        self.state.select_sort_key(key);
    }

    pub fn select_filter(&mut self, filter: FilterSelection) {
        self.state.select_filter(filter);
    }

    pub fn filter_options(&self, store: &RecordStore) -> Vec<FilterSelection> {
        category_options(store.records(), &self.table)
    }

    /// Current view of `store`, memoized across calls.
    pub fn view<'a>(&mut self, store: &'a RecordStore) -> DerivedView<'a> {
        self.cache.view(store, &self.state, &self.table)
    }

    /// Press the category button labelled `label`.
    ///
    /// Returns `None` when the table has no such button.
    pub fn press_category_button(
        &mut self,
        label: &str,
        dispatcher: &ActionDispatcher<'_>,
    ) -> Option<Dispatch> {
        let button = self.table.entry_by_label(label)?;
        Some(dispatcher.press_category_button(&mut self.state, button))
    }

    /// Export the current view through `sink`.
    pub fn export<S: DownloadSink>(
        &mut self,
        store: &RecordStore,
        format: ExportFormat,
        sink: &mut S,
    ) -> Result<Option<ExportedArtifact>, ExportError> {
        let view = self.cache.view(store, &self.state, &self.table);
        export_view(&view, &self.state, &self.table, format, sink)
    }

    /// Render header, buttons and rows (or the empty state).
    pub fn render(&mut self, store: Option<&RecordStore>, dispatcher: &ActionDispatcher<'_>) -> ViewStatus {
        let options = store
            .map(|store| self.filter_options(store))
            .unwrap_or_else(|| vec![FilterSelection::All]);
        self.renderer.header(&HeaderContext {
            title: &self.title,
            count: store.map_or(0, RecordStore::len),
            sort_key: self.state.sort_key,
            sort_direction: self.state.sort_direction,
            filter: &self.state.filter,
            filter_options: &options,
        });

        if dispatcher.can_add() {
            let last = self.state.last_interacted_category.as_deref();
            let buttons: Vec<ButtonContext<'_>> = self
                .table
                .entries()
                .iter()
                .map(|entry| ButtonContext {
                    label: &entry.label,
                    tag: &entry.tag,
                    is_selected: last == Some(entry.label.as_str()),
                })
                .collect();
            self.renderer.category_buttons(&buttons);
        }

        let Some(store) = store else {
            let message = self.empty_message();
            self.renderer.empty(&message);
            return ViewStatus::NoStore;
        };
        let view = self.cache.view(store, &self.state, &self.table);
        if view.is_empty() {
            let message = self.empty_message();
            self.renderer.empty(&message);
            return ViewStatus::Empty;
        }
        let actions = dispatcher.row_actions();
        for (position, record) in view.iter().enumerate() {
            let warning = record
                .is_unmapped
                .then(|| record.status_tooltip.as_deref().unwrap_or(""));
            self.renderer.row(&RowContext {
                number: position + 1,
                record,
                category: resolve_category(record, &self.table),
                actions: &actions,
                warning,
            });
        }
        ViewStatus::Rows(view.len())
    }

    fn empty_message(&self) -> String {
        match &self.state.last_interacted_category {
            Some(category) => format!("Click detected: {category}"),
            None => NO_MEASUREMENTS.to_string(),
        }
    }
}
