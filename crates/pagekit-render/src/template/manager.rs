//! Template lookup, base merging and caching.
//!
//! [`TemplateManager`] turns a logical template name into an executable
//! [`TemplateSet`] that already contains every configured base layout.
//!
//! # Lookup
//!
//! 1. With caching enabled, a previously built set is returned as is.
//! 2. Every base directory is listed and files ending in one of the base
//!    suffixes are collected (directory order, then listing order).
//! 3. The name is resolved by probing `template_dir/name` for each template
//!    directory in order; if none exists the name itself is used as a
//!    root-relative path.
//! 4. Base files and the target are compiled into one set, with built-in
//!    filters and the manager's default functions registered first. Each file
//!    is registered under its file name, so pages can
//!    `{% extends "base.layout.html" %}` regardless of directory.
//! 5. The result is cached under the original name.
//!
//! When two base files share a file name, the one listed last wins. Listing
//! order is filesystem dependent, so such setups should be avoided.

use std::sync::Arc;

use tracing::{debug, trace};

use super::cache::TemplateCache;
use super::config::ManagerConfig;
use super::functions::Functions;
use super::set::TemplateSet;
use crate::error::TemplateError;
use crate::fs::TemplateFs;
use crate::path::{filename_from_path, join_fs_path, nice_path};

/// Root name of the set returned by [`TemplateManager::get_bases`].
pub const BASES_NAME: &str = "base";

/// Resolves, parses and caches templates from a [`TemplateFs`].
///
/// Managers are meant to be built once at startup and shared, usually behind
/// an `Arc`. All methods take `&self` and are safe to call concurrently.
///
/// # Example
///
/// ```rust
/// use pagekit_render::{Functions, ManagerConfig, MemoryFs, TemplateManager};
/// use serde_json::json;
///
/// let fs = MemoryFs::new()
///     .with_file("layouts/base.layout.html", "<main>{% block body %}{% endblock %}</main>")
///     .with_file("pages/index.html", "{% extends 'base.layout.html' %}{% block body %}{{ greet(name) }}{% endblock %}");
///
/// let config = ManagerConfig::new()
///     .base_dir("layouts")
///     .base_suffix(".layout.html")
///     .template_dir("pages");
///
/// let manager = TemplateManager::new(config, fs)
///     .with_functions(Functions::new().add("greet", |n: String| format!("Hello {}", n)));
///
/// let (set, filename) = manager.get("index.html").unwrap();
/// assert_eq!(filename, "index.html");
/// assert_eq!(set.render(&json!({"name": "World"})).unwrap(), "<main>Hello World</main>");
/// ```
pub struct TemplateManager {
    config: ManagerConfig,
    functions: Functions,
    fs: Arc<dyn TemplateFs>,
    cache: TemplateCache,
}

impl TemplateManager {
    /// Creates a manager reading from `fs`.
    pub fn new(config: ManagerConfig, fs: impl TemplateFs + 'static) -> Self {
        Self::with_shared_fs(config, Arc::new(fs))
    }

    /// Creates a manager over a filesystem that is shared with other code.
    pub fn with_shared_fs(config: ManagerConfig, fs: Arc<dyn TemplateFs>) -> Self {
        Self {
            config,
            functions: Functions::new(),
            fs,
            cache: TemplateCache::new(),
        }
    }

    /// Sets the default functions attached to every template this manager
    /// builds.
    ///
    /// Top-level keys of the data a template is executed with shadow
    /// functions of the same name; see [`Functions`].
    pub fn with_functions(mut self, functions: Functions) -> Self {
        self.functions = functions;
        self
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// The default function set.
    pub fn functions(&self) -> &Functions {
        &self.functions
    }

    pub fn fs(&self) -> &dyn TemplateFs {
        self.fs.as_ref()
    }

    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    /// Resets the template cache.
    pub fn init(&self) {
        self.cache.clear();
    }

    /// Returns the template set for `name` and the file name of the template
    /// it resolved to.
    ///
    /// # Errors
    ///
    /// - [`TemplateError::BaseDir`] if a base directory cannot be listed
    /// - [`TemplateError::NotFound`] if the resolved path does not exist
    /// - [`TemplateError::Read`] if a template file cannot be read
    /// - [`TemplateError::Parse`] if any base or target template fails to compile
    pub fn get(&self, name: &str) -> Result<(TemplateSet, String), TemplateError> {
        if self.config.use_cache {
            if let Some(set) = self.cache.get(name) {
                trace!(template = name, "template cache hit");
                return Ok((set, filename_from_path(name).to_string()));
            }
        }

        let bases = self.base_template_paths()?;
        let path = self.resolve(name);
        debug!(
            template = name,
            path = %path,
            bases = bases.len(),
            "loading template"
        );

        if !self.fs.exists(&path) {
            return Err(TemplateError::NotFound(path));
        }

        let filename = filename_from_path(&path).to_string();
        let env = self.config.env_options().environment(&self.functions);
        let mut set = TemplateSet::empty(&filename, env);
        for base in &bases {
            self.add_file(&mut set, base)?;
        }
        self.add_file(&mut set, &path)?;

        if self.config.use_cache {
            self.cache.insert(name, set.clone());
        }
        Ok((set, filename))
    }

    /// Parses `source` as a standalone template called `name`, with the
    /// default functions attached.
    pub fn get_from_string(&self, source: &str, name: &str) -> Result<TemplateSet, TemplateError> {
        let env = self.config.env_options().environment(&self.functions);
        let mut set = TemplateSet::empty(name, env);
        set.add_template(name, source)?;
        Ok(set)
    }

    /// Parses every base template into one set whose root is named
    /// [`BASES_NAME`].
    ///
    /// `extra` is merged over the default functions; entries in `extra` win.
    /// Base directories are re-scanned on every call; the result is not
    /// cached.
    pub fn get_bases(&self, extra: &Functions) -> Result<TemplateSet, TemplateError> {
        let bases = self.base_template_paths()?;
        debug!(bases = bases.len(), "loading base templates");

        let functions = self.functions.merged(extra);
        let env = self.config.env_options().environment(&functions);
        let mut set = TemplateSet::empty(BASES_NAME, env);
        for base in &bases {
            self.add_file(&mut set, base)?;
        }
        Ok(set)
    }

    /// Parses a single file of this manager's filesystem, without bases.
    ///
    /// The set's root is the file name of `path`.
    pub fn parse_file(&self, path: &str) -> Result<TemplateSet, TemplateError> {
        if !self.fs.exists(path) {
            return Err(TemplateError::NotFound(path.to_string()));
        }
        let env = self.config.env_options().environment(&self.functions);
        let mut set = TemplateSet::empty(filename_from_path(path), env);
        self.add_file(&mut set, path)?;
        Ok(set)
    }

    /// Lists the paths of every base template, in directory order then
    /// filesystem listing order.
    pub fn base_template_paths(&self) -> Result<Vec<String>, TemplateError> {
        let mut paths = Vec::new();
        for dir in &self.config.base_dirs {
            let names = self
                .fs
                .read_dir(dir)
                .map_err(|source| TemplateError::BaseDir {
                    dir: dir.clone(),
                    source,
                })?;
            paths.extend(
                names
                    .iter()
                    .filter(|n| self.config.is_base_template(n))
                    .map(|n| join_fs_path(dir, n)),
            );
        }
        Ok(paths)
    }

    /// Maps a template name onto a path in the filesystem.
    ///
    /// The first template directory containing `name` wins; otherwise `name`
    /// itself is used.
    pub fn resolve(&self, name: &str) -> String {
        self.config
            .template_dirs
            .iter()
            .map(|dir| nice_path(false, &[dir.as_str(), name]))
            .find(|candidate| self.fs.exists(candidate))
            .unwrap_or_else(|| nice_path(false, &[name]))
    }

    fn add_file(&self, set: &mut TemplateSet, path: &str) -> Result<(), TemplateError> {
        let source = self
            .fs
            .read_to_string(path)
            .map_err(|source| TemplateError::Read {
                path: path.to_string(),
                source,
            })?;
        set.add_template(filename_from_path(path), &source)
            .map_err(|e| match e {
                TemplateError::Parse { source, .. } => TemplateError::Parse {
                    name: path.to_string(),
                    source,
                },
                other => other,
            })
    }
}

impl std::fmt::Debug for TemplateManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateManager")
            .field("config", &self.config)
            .field("functions", &self.functions)
            .field("cached", &self.cache.len())
            .finish()
    }
}
