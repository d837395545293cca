//! Download sink that writes export artifacts into a directory.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use mtv_core::DownloadSink;

/// Buffers registered artifacts and writes them out when initiated.
#[derive(Debug)]
pub struct FileSink {
    output_dir: PathBuf,
    pending: BTreeMap<u64, (String, Vec<u8>)>,
    next_handle: u64,
    written: Vec<PathBuf>,
}

impl FileSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            pending: BTreeMap::new(),
            next_handle: 0,
            written: Vec::new(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Paths written so far, in delivery order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Buffers registered but not yet revoked.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl DownloadSink for FileSink {
    type Handle = u64;

    fn register(&mut self, name: &str, mime_type: &str, content: Vec<u8>) -> io::Result<u64> {
        let handle = self.next_handle;
        self.next_handle += 1;
        debug!(name, mime_type, bytes = content.len(), "artifact registered");
        self.pending.insert(handle, (name.to_string(), content));
        Ok(handle)
    }

    fn initiate(&mut self, handle: &u64) -> io::Result<()> {
        let (name, content) = self
            .pending
            .get(handle)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "unknown artifact handle"))?;
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(name);
        fs::write(&path, content)?;
        self.written.push(path);
        Ok(())
    }

    fn revoke(&mut self, handle: u64) {
        self.pending.remove(&handle);
    }
}
