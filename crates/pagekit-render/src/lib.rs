//! # Pagekit Render - Cached HTML Templates with Base Layouts
//!
//! `pagekit-render` loads HTML templates from an injected filesystem, merges
//! shared base layouts into every page, and caches the compiled result so a
//! page is parsed once per process.
//!
//! This crate is the rendering foundation for the `pagekit` web helpers, but
//! can be used on its own wherever MiniJinja templates are loaded by name.
//!
//! ## Core Concepts
//!
//! - [`TemplateManager`]: name resolution, base merging, caching
//! - [`TemplateSet`]: compiled templates with a root, executable into any writer
//! - [`TemplateFs`]: read-only file store ([`DirFs`], [`EmbeddedFs`], [`MemoryFs`])
//! - [`Functions`]: named functions attached to templates
//! - [`ManagerConfig`]: directories, suffixes, cache and escaping switches
//!
//! ## Quick Start
//!
//! ```rust
//! use pagekit_render::{ManagerConfig, MemoryFs, TemplateManager};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Page {
//!     title: String,
//! }
//!
//! let fs = MemoryFs::new()
//!     .with_file("layouts/site.layout.html", "<h1>{% block title %}{% endblock %}</h1>")
//!     .with_file("pages/home.html", "{% extends 'site.layout.html' %}{% block title %}{{ title }}{% endblock %}");
//!
//! let manager = TemplateManager::new(
//!     ManagerConfig::new()
//!         .base_dir("layouts")
//!         .base_suffix(".layout.html")
//!         .template_dir("pages"),
//!     fs,
//! );
//!
//! let (set, _) = manager.get("home.html").unwrap();
//! let html = set.render(&Page { title: "Welcome".into() }).unwrap();
//! assert_eq!(html, "<h1>Welcome</h1>");
//! ```

mod error;
pub mod fs;
pub mod path;
pub mod template;

pub use error::TemplateError;

pub use fs::{DirFs, EmbeddedFs, MemoryFs, TemplateFs};

pub use path::{filename_from_path, nice_path, normalize_fs_path};

pub use template::{
    register_filters, Functions, ManagerConfig, TemplateCache, TemplateManager, TemplateSet,
    BASES_NAME,
};

// Re-export the engine so callers can build values and functions without a
// direct dependency.
pub use minijinja;
