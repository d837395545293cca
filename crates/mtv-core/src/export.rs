//! Export of the current view as a downloadable artifact.
//!
//! The snapshot mirrors the view exactly as displayed: same records, same
//! order, 1-based indices. Delivery goes through a [`DownloadSink`]; the
//! registered buffer is revoked on every path once the download has been
//! initiated (or has failed to start).

use std::collections::BTreeMap;
use std::io;

use tracing::{debug, info};

use mtv_model::{EMPTY_FIELD, ExportEntry, ExportSnapshot, FilterSelection};

use crate::category::{CategoryTable, resolve_category};
use crate::error::ExportError;
use crate::materialize::DerivedView;
use crate::state::ViewState;

/// Base name shared by every export artifact.
pub const ARTIFACT_STEM: &str = "measurements";

// =============================================================================
// FORMAT
// =============================================================================

/// Text format of the export artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Pretty-printed JSON array.
    #[default]
    Json,
    /// CSV with an `index,label,value` header row.
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
        }
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Build the export snapshot for a view.
pub fn snapshot(view: &DerivedView<'_>, table: &CategoryTable) -> ExportSnapshot {
    let entries = view
        .iter()
        .enumerate()
        .map(|(position, record)| ExportEntry {
            index: position + 1,
            label: resolve_category(record, table)
                .unwrap_or(EMPTY_FIELD)
                .to_string(),
            value: record.resolved_value().unwrap_or(EMPTY_FIELD).to_string(),
        })
        .collect();
    ExportSnapshot { entries }
}

/// Serialize a snapshot in the given format.
pub fn serialize(snapshot: &ExportSnapshot, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_vec_pretty(snapshot)?),
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for entry in snapshot {
                writer.serialize(entry)?;
            }
            writer
                .into_inner()
                .map_err(|err| ExportError::Csv(err.into_error().into()))
        }
    }
}

/// File name for an export of the view under `state`.
///
/// `measurements-<filter>-<key>-<direction>.<ext>`, e.g.
/// `measurements-canal-angle-value-desc.json`.
pub fn artifact_name(state: &ViewState, format: ExportFormat) -> String {
    let filter = match &state.filter {
        FilterSelection::All => "all".to_string(),
        FilterSelection::Category(category) => slug(category),
    };
    format!(
        "{ARTIFACT_STEM}-{filter}-{}-{}.{}",
        state.sort_key,
        state.sort_direction.short(),
        format.extension()
    )
}

fn slug(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let trimmed = slug.trim_end_matches('-');
    if trimmed.is_empty() {
        "category".to_string()
    } else {
        trimmed.to_string()
    }
}

// =============================================================================
// DELIVERY
// =============================================================================

/// Host facility that turns a buffer into a user download.
pub trait DownloadSink {
    /// Opaque reference to a registered buffer.
    type Handle;

    /// Register an artifact buffer under a file name.
    fn register(&mut self, name: &str, mime_type: &str, content: Vec<u8>) -> io::Result<Self::Handle>;

    /// Start the download of a registered buffer.
    fn initiate(&mut self, handle: &Self::Handle) -> io::Result<()>;

    /// Release a registered buffer.
    fn revoke(&mut self, handle: Self::Handle);
}

/// Revokes its registration when dropped.
pub struct ArtifactGuard<'s, S: DownloadSink> {
    sink: &'s mut S,
    handle: Option<S::Handle>,
}

impl<'s, S: DownloadSink> ArtifactGuard<'s, S> {
    pub fn register(
        sink: &'s mut S,
        name: &str,
        mime_type: &str,
        content: Vec<u8>,
    ) -> io::Result<Self> {
        let handle = sink.register(name, mime_type, content)?;
        Ok(Self {
            sink,
            handle: Some(handle),
        })
    }

    pub fn initiate(&mut self) -> io::Result<()> {
        match &self.handle {
            Some(handle) => self.sink.initiate(handle),
            None => Ok(()),
        }
    }
}

impl<S: DownloadSink> Drop for ArtifactGuard<'_, S> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.sink.revoke(handle);
        }
    }
}

/// Summary of a delivered export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedArtifact {
    pub name: String,
    pub entries: usize,
    pub bytes: usize,
}

/// Export the view through `sink`.
///
/// Returns `Ok(None)` without touching the sink when the view is empty.
pub fn export_view<S: DownloadSink>(
    view: &DerivedView<'_>,
    state: &ViewState,
    table: &CategoryTable,
    format: ExportFormat,
    sink: &mut S,
) -> Result<Option<ExportedArtifact>, ExportError> {
    if view.is_empty() {
        debug!("export skipped: view is empty");
        return Ok(None);
    }
    let snapshot = snapshot(view, table);
    let content = serialize(&snapshot, format)?;
    let name = artifact_name(state, format);
    let bytes = content.len();

    let sink_error = |source| ExportError::Sink {
        name: name.clone(),
        source,
    };
    let mut guard =
        ArtifactGuard::register(sink, &name, format.mime_type(), content).map_err(sink_error)?;
    guard.initiate().map_err(sink_error)?;
    drop(guard);

    info!(artifact = %name, entries = snapshot.len(), bytes, "export delivered");
    Ok(Some(ExportedArtifact {
        name,
        entries: snapshot.len(),
        bytes,
    }))
}

// =============================================================================
// IN-MEMORY SINK
// =============================================================================

/// A download sink that keeps initiated artifacts in memory.
///
/// Useful for embedding hosts that hand the bytes on themselves.
#[derive(Debug, Default)]
pub struct MemorySink {
    next_handle: u64,
    registered: BTreeMap<u64, (String, Vec<u8>)>,
    /// Artifacts whose download was initiated, as `(name, content)`.
    pub downloads: Vec<(String, Vec<u8>)>,
    /// Fail `initiate` calls (used to exercise the release path).
    pub fail_initiate: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrations not yet revoked.
    pub fn live_registrations(&self) -> usize {
        self.registered.len()
    }
}

impl DownloadSink for MemorySink {
    type Handle = u64;

    fn register(&mut self, name: &str, _mime_type: &str, content: Vec<u8>) -> io::Result<u64> {
        self.next_handle += 1;
        self.registered
            .insert(self.next_handle, (name.to_string(), content));
        Ok(self.next_handle)
    }

    fn initiate(&mut self, handle: &u64) -> io::Result<()> {
        if self.fail_initiate {
            return Err(io::Error::other("download blocked"));
        }
        let (name, content) = self
            .registered
            .get(handle)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "artifact not registered"))?;
        self.downloads.push((name.clone(), content.clone()));
        Ok(())
    }

    fn revoke(&mut self, handle: u64) {
        self.registered.remove(&handle);
    }
}
