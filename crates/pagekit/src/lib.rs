//! # Pagekit - Base-Layout Pages and JSON Responses for Web Handlers
//!
//! Pagekit renders HTML pages inside shared base layouts and writes JSON
//! envelopes, on top of the `axum::http` types. It does not route or serve:
//! handlers call into it with a request and get a response back.
//!
//! - [`render`] (the [`pagekit_render`] crate): template managers, caching and
//!   filesystems
//! - [`extensions`]: pages composed from a fragment plus every base layout
//! - [`ResponseWriter`]: buffered response with write-once headers
//! - JSON helpers: [`json_encode`], [`json_decode`], [`json_error`]
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use axum::body::Bytes;
//! use axum::http::Request;
//! use pagekit::extensions::{Context, ExtensionOptions, ExtensionView, WithString};
//! use pagekit::render::{ManagerConfig, MemoryFs, TemplateManager};
//!
//! let layouts = MemoryFs::new()
//!     .with_file("layouts/layout.html", "<body>{% block content %}{% endblock %}</body>");
//! let base = TemplateManager::new(
//!     ManagerConfig::new().base_dir("layouts").base_suffix(".html"),
//!     layouts,
//! );
//! let ext = TemplateManager::new(ManagerConfig::new(), MemoryFs::new());
//! let options = ExtensionOptions::new(Arc::new(base), Arc::new(ext));
//!
//! let hello = WithString::new(
//!     "hello",
//!     "{% extends 'layout.html' %}{% block content %}Hello {{ Name }}{% endblock %}",
//! )
//! .with_view(|_req| {
//!     let mut ctx = Context::new();
//!     ctx.insert("Name".into(), "World".into());
//!     ctx
//! });
//!
//! let view = ExtensionView::new(options, hello);
//! let mut w = pagekit::ResponseWriter::new();
//! view.serve(&Request::new(Bytes::new()), &mut w);
//! assert_eq!(w.body_str(), Some("<body>Hello World</body>"));
//! ```
//!
//! ## Managers Are Explicit
//!
//! There is no process-wide manager. Build a [`TemplateManager`] at startup,
//! share it behind an `Arc`, and pass it to [`render`](response::render) or
//! [`ExtensionOptions`](extensions::ExtensionOptions).

mod error;
pub mod extensions;
pub mod response;

pub use error::{ExtensionError, ResponseError};

pub use response::{
    json, json_decode, json_encode, json_encode_with_status, json_error, render_string, JsonError,
    JsonResponse, ResponseStatus, ResponseWriter,
};

pub use pagekit_render as render;
pub use pagekit_render::{Functions, ManagerConfig, TemplateError, TemplateManager, TemplateSet};
