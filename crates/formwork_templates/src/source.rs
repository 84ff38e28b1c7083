//! Abstract readable file tree backing a template.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// A readable file tree containing template files.
///
/// The renderer only needs a deterministic file listing and whole-file
/// reads, so tests and embedded catalogs can supply their own trees.
pub trait TemplateSource {
    /// Relative paths of every file under `path`, depth-first with siblings
    /// in file-name order. Directories are not listed.
    fn files(&self, path: &str) -> io::Result<Vec<PathBuf>>;

    /// Full text of the file at `path`, relative to the tree root.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Template source rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateSource for DirSource {
    fn files(&self, path: &str) -> io::Result<Vec<PathBuf>> {
        let base = self.root.join(path);
        let mut files = Vec::new();
        for entry in WalkDir::new(&base).sort_by_file_name() {
            let entry = entry.map_err(io::Error::other)?;
            if entry.file_type().is_file() {
                let relative = entry.path().strip_prefix(&self.root).unwrap();
                files.push(relative.to_path_buf());
            }
        }
        Ok(files)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(self.root.join(path))
    }
}
