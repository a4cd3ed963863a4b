//! Template loading, merging and caching.
//!
//! Templates are compiled by MiniJinja. This module adds the layer a web
//! application needs on top of it:
//!
//! - [`TemplateManager`]: resolves a page name against a list of template
//!   directories, merges every base layout into it, and caches the result.
//! - [`TemplateSet`]: a compiled group of templates with a root, which can be
//!   executed into any `io::Write` sink.
//! - [`Functions`]: named functions attached to every template a manager
//!   builds.
//! - [`TemplateCache`]: the lock-guarded name to set map behind the manager.
//!
//! ## Base Layouts
//!
//! Files in the configured base directories whose name ends in one of the
//! base suffixes are compiled into every page. Pages reach them by file name:
//!
//! ```jinja
//! {% extends "base.layout.html" %}
//! {% block body %}Hello {{ name }}{% endblock %}
//! ```
//!
//! ## Escaping
//!
//! By default every expression is HTML-escaped, whatever the template name.
//! Turn it off with [`ManagerConfig::autoescape`].

mod cache;
mod config;
pub mod filters;
mod functions;
mod manager;
mod set;

pub use cache::TemplateCache;
pub use config::ManagerConfig;
pub use filters::register_filters;
pub use functions::Functions;
pub use manager::{TemplateManager, BASES_NAME};
pub use set::TemplateSet;
