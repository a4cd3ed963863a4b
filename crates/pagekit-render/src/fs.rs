//! Read-only template filesystems.
//!
//! The template manager never touches the OS filesystem directly. It reads
//! through a [`TemplateFs`], which makes it possible to serve templates from a
//! directory on disk ([`DirFs`]), from files embedded into the binary
//! ([`EmbeddedFs`]), or from memory ([`MemoryFs`], mostly for tests).
//!
//! All paths are slash-separated and relative to the filesystem root. Leading
//! slashes and `.` segments are ignored; `..` is rejected.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use include_dir::Dir;

use crate::path::normalize_fs_path;

/// A read-only hierarchical file store.
pub trait TemplateFs: Send + Sync {
    /// Lists the names of the files directly inside `dir`.
    ///
    /// Only file names are returned, not paths, and subdirectories are
    /// skipped. The order is whatever the store produces and callers must not
    /// rely on it.
    fn read_dir(&self, dir: &str) -> io::Result<Vec<String>>;

    /// Reads a whole file as UTF-8.
    fn read_to_string(&self, path: &str) -> io::Result<String>;

    /// Returns true if `path` names an existing file.
    fn exists(&self, path: &str) -> bool;
}

impl<T: TemplateFs + ?Sized> TemplateFs for Arc<T> {
    fn read_dir(&self, dir: &str) -> io::Result<Vec<String>> {
        (**self).read_dir(dir)
    }

    fn read_to_string(&self, path: &str) -> io::Result<String> {
        (**self).read_to_string(path)
    }

    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }
}

fn not_found(path: &str) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("no such file or directory: {}", path))
}

// ============================================================================
// DirFs
// ============================================================================

/// A template filesystem rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct DirFs {
    root: PathBuf,
}

impl DirFs {
    /// Creates a filesystem rooted at `root`.
    ///
    /// The directory is not checked here; lookups against a missing root
    /// fail with `NotFound`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, path: &str) -> io::Result<PathBuf> {
        let relative = normalize_fs_path(path)?;
        if relative.is_empty() {
            return Ok(self.root.clone());
        }
        Ok(relative.split('/').fold(self.root.clone(), |acc, s| acc.join(s)))
    }
}

impl TemplateFs for DirFs {
    fn read_dir(&self, dir: &str) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(self.full_path(dir)?)? {
            let entry = entry?;
            // Follows symlinks, matching `exists`.
            if !entry.path().is_file() {
                continue;
            }
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn read_to_string(&self, path: &str) -> io::Result<String> {
        std::fs::read_to_string(self.full_path(path)?)
    }

    fn exists(&self, path: &str) -> bool {
        self.full_path(path).map(|p| p.is_file()).unwrap_or(false)
    }
}

// ============================================================================
// EmbeddedFs
// ============================================================================

/// A template filesystem over a directory embedded with [`include_dir!`].
///
/// ```rust,ignore
/// use include_dir::{include_dir, Dir};
/// use pagekit_render::EmbeddedFs;
///
/// static TEMPLATES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");
///
/// let fs = EmbeddedFs::new(&TEMPLATES);
/// ```
///
/// [`include_dir!`]: include_dir::include_dir
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedFs {
    dir: &'static Dir<'static>,
}

impl EmbeddedFs {
    pub fn new(dir: &'static Dir<'static>) -> Self {
        Self { dir }
    }

    fn subdir(&self, dir: &str) -> io::Result<&'static Dir<'static>> {
        let relative = normalize_fs_path(dir)?;
        if relative.is_empty() {
            return Ok(self.dir);
        }
        self.dir.get_dir(&relative).ok_or_else(|| not_found(dir))
    }
}

impl TemplateFs for EmbeddedFs {
    fn read_dir(&self, dir: &str) -> io::Result<Vec<String>> {
        let names = self
            .subdir(dir)?
            .files()
            .filter_map(|f| f.path().file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        Ok(names)
    }

    fn read_to_string(&self, path: &str) -> io::Result<String> {
        let relative = normalize_fs_path(path)?;
        let file = self.dir.get_file(&relative).ok_or_else(|| not_found(path))?;
        file.contents_utf8().map(str::to_string).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("template is not valid UTF-8: {}", path),
            )
        })
    }

    fn exists(&self, path: &str) -> bool {
        normalize_fs_path(path)
            .map(|p| self.dir.get_file(&p).is_some())
            .unwrap_or(false)
    }
}

// ============================================================================
// MemoryFs
// ============================================================================

/// An in-memory template filesystem.
///
/// Files are listed in sorted order. The store counts directory listings and
/// file reads, which lets tests observe whether the template manager went to
/// the filesystem at all.
///
/// ```rust
/// use pagekit_render::{MemoryFs, TemplateFs};
///
/// let fs = MemoryFs::new()
///     .with_file("layouts/base.layout.html", "<main>{% block body %}{% endblock %}</main>")
///     .with_file("pages/index.html", "{% extends 'base.layout.html' %}");
///
/// assert_eq!(fs.read_dir("layouts").unwrap(), vec!["base.layout.html"]);
/// assert_eq!(fs.read_dir_calls(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: BTreeMap<String, String>,
    read_dir_calls: AtomicUsize,
    read_calls: AtomicUsize,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, replacing any previous content at the same path.
    ///
    /// # Panics
    ///
    /// Panics if `path` contains a `..` segment.
    pub fn with_file(mut self, path: &str, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Adds a file in place.
    ///
    /// # Panics
    ///
    /// Panics if `path` contains a `..` segment.
    pub fn insert(&mut self, path: &str, content: impl Into<String>) {
        let key = normalize_fs_path(path).unwrap_or_else(|e| panic!("invalid path {path}: {e}"));
        self.files.insert(key, content.into());
    }

    /// Number of [`TemplateFs::read_dir`] calls so far.
    pub fn read_dir_calls(&self) -> usize {
        self.read_dir_calls.load(Ordering::SeqCst)
    }

    /// Number of [`TemplateFs::read_to_string`] calls so far.
    pub fn read_calls(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }
}

impl TemplateFs for MemoryFs {
    fn read_dir(&self, dir: &str) -> io::Result<Vec<String>> {
        self.read_dir_calls.fetch_add(1, Ordering::SeqCst);
        let relative = normalize_fs_path(dir)?;
        let prefix = if relative.is_empty() {
            String::new()
        } else {
            format!("{}/", relative)
        };

        let mut found_dir = relative.is_empty();
        let mut names = Vec::new();
        for path in self.files.keys() {
            let Some(rest) = path.strip_prefix(&prefix) else {
                continue;
            };
            found_dir = true;
            if !rest.contains('/') {
                names.push(rest.to_string());
            }
        }

        if !found_dir {
            return Err(not_found(dir));
        }
        Ok(names)
    }

    fn read_to_string(&self, path: &str) -> io::Result<String> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        let relative = normalize_fs_path(path)?;
        self.files
            .get(&relative)
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    fn exists(&self, path: &str) -> bool {
        normalize_fs_path(path)
            .map(|p| self.files.contains_key(&p))
            .unwrap_or(false)
    }
}
