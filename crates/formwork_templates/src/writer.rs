//! Pluggable output writers.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Destination for rendered files.
pub trait TemplateWriter {
    /// Write `contents` to `path`.
    fn write(&mut self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// Writer that persists rendered files to the local filesystem, creating
/// parent directories as needed.
#[derive(Debug, Default)]
pub struct LocalWriter;

impl LocalWriter {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateWriter for LocalWriter {
    fn write(&mut self, path: &Path, contents: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!("writing {:?}", path);
        fs::write(path, contents)
    }
}

/// Writer that keeps rendered files in memory, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered files captured so far.
    pub fn files(&self) -> &BTreeMap<PathBuf, Vec<u8>> {
        &self.files
    }

    /// Contents of a captured file as text.
    pub fn text(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .get(path.as_ref())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

impl TemplateWriter for MemoryWriter {
    fn write(&mut self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.files.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }
}
