//! Resource stores: where bundled pages physically come from.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::RESOURCE_EXTENSION;

/// A read-only space of resources addressed by logical `/`-separated paths.
pub trait ResourceStore: Send + Sync {
    /// Open the resource at `path`.
    ///
    /// Returns `Ok(None)` when nothing exists at `path`. An `Err` means the
    /// resource exists but could not be opened.
    fn open(&self, path: &str) -> io::Result<Option<Box<dyn Read + '_>>>;

    /// Keys (file stems) of the pages directly under `prefix`, sorted.
    fn keys(&self, prefix: &str) -> Vec<String>;
}

/// Normalise a logical path: drop empty segments and leading/trailing `/`.
///
/// Returns `None` if the path tries to leave the resource space (`..`) or is
/// empty after normalisation.
pub fn normalize_path(path: &str) -> Option<String> {
    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return None,
            s => segments.push(s),
        }
    }
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

fn page_key(name: &str) -> Option<&str> {
    name.strip_suffix(RESOURCE_EXTENSION)
        .filter(|stem| !stem.is_empty())
}

/// Resources stored as files below a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ResourceStore for DirectoryStore {
    fn open(&self, path: &str) -> io::Result<Option<Box<dyn Read + '_>>> {
        let Some(relative) = normalize_path(path) else {
            return Ok(None);
        };
        let full = self.root.join(relative);

        let metadata = match fs::metadata(&full) {
            Ok(m) => m,
            // Existence cannot be confirmed (missing, or a parent is not a directory)
            Err(_) => return Ok(None),
        };
        if !metadata.is_file() {
            return Ok(None);
        }

        match File::open(&full) {
            Ok(file) => Ok(Some(Box::new(BufReader::new(file)) as Box<dyn Read + '_>)),
            // Removed between the metadata check and the open
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn keys(&self, prefix: &str) -> Vec<String> {
        let dir = match normalize_path(prefix) {
            Some(relative) => self.root.join(relative),
            None => self.root.clone(),
        };

        let mut keys: Vec<String> = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                let name = e.file_name().to_str()?;
                page_key(name).map(str::to_string)
            })
            .collect();
        keys.sort();
        keys
    }
}

/// Resources held in memory, keyed by normalised logical path.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedStore {
    entries: BTreeMap<String, Cow<'static, [u8]>>,
}

impl EmbeddedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The documentation pack compiled into the binary.
    pub fn builtin() -> Self {
        let mut store = Self::new();
        for (path, content) in super::BUILTIN_PACK.entries() {
            let content: &'static str = *content;
            store.insert(path, Cow::Borrowed(content.as_bytes()));
        }
        store
    }

    /// Add or replace a resource. Paths that do not normalise are ignored.
    pub fn insert(&mut self, path: &str, content: impl Into<Cow<'static, [u8]>>) {
        if let Some(path) = normalize_path(path) {
            self.entries.insert(path, content.into());
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, path: &str, content: impl Into<Cow<'static, [u8]>>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ResourceStore for EmbeddedStore {
    fn open(&self, path: &str) -> io::Result<Option<Box<dyn Read + '_>>> {
        let Some(path) = normalize_path(path) else {
            return Ok(None);
        };
        Ok(self.entries.get(&path).map(|content| {
            let bytes: &[u8] = content;
            Box::new(Cursor::new(bytes)) as Box<dyn Read + '_>
        }))
    }

    fn keys(&self, prefix: &str) -> Vec<String> {
        let dir = normalize_path(prefix).map(|p| format!("{}/", p)).unwrap_or_default();

        self.entries
            .keys()
            .filter_map(|path| path.strip_prefix(&dir))
            .filter(|rest| !rest.contains('/'))
            .filter_map(page_key)
            .map(str::to_string)
            .collect()
    }
}
