//! Measurement view engine.
//!
//! Turns a host-supplied set of measurement records into the view a panel
//! shows: filtered by category, sorted by index, label or value, and
//! exportable as a snapshot of exactly what is displayed. User actions are
//! forwarded to the host through [`dispatch::ActionDispatcher`].
//!
//! ```
//! use mtv_core::{CategoryTable, RecordStore, ViewCache, ViewState};
//! use mtv_model::{MeasurementRecord, SortKey};
//!
//! let store = RecordStore::new(vec![
//!     MeasurementRecord::new("a").with_label("Crown width").with_value("5.2"),
//!     MeasurementRecord::new("b").with_label("Canal angle").with_value("30"),
//!     MeasurementRecord::new("c").with_label("PA length").with_value("12"),
//! ]);
//! let mut state = ViewState::new();
//! state.select_sort_key(SortKey::Value);
//!
//! let mut cache = ViewCache::new();
//! let view = cache.view(&store, &state, &CategoryTable::default());
//! assert_eq!(view.uids(), vec!["a", "c", "b"]);
//! ```

pub mod category;
pub mod dispatch;
pub mod error;
pub mod export;
pub mod filter;
pub mod materialize;
pub mod panel;
pub mod sort;
pub mod state;
pub mod store;
pub mod tooth;

pub use category::{
    CategoryEntry, CategoryTable, DEFAULT_TOOL_GROUP, category_options, resolve_category,
};
pub use dispatch::{ActionDispatcher, ActionHandler, Dispatch, ToolActivator};
pub use error::{ConfigError, ExportError};
pub use export::{
    DownloadSink, ExportFormat, ExportedArtifact, MemorySink, artifact_name, export_view,
    serialize, snapshot,
};
pub use filter::filter;
pub use materialize::{DerivedView, ViewCache, materialize};
pub use panel::{
    ButtonContext, HeaderContext, MeasurementPanel, PanelRenderer, RowContext, ViewStatus,
};
pub use sort::sort;
pub use state::ViewState;
pub use store::RecordStore;
pub use tooth::{ToothSelection, ToothSystem};
