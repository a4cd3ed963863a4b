//! Error types for template loading and execution.
//!
//! [`TemplateError`] is the single error type returned by the template
//! manager and template sets. Every variant names the template, path or
//! directory being processed and keeps the underlying cause as its source.

use std::io;

use thiserror::Error;

/// Error type for template resolution, parsing and execution.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A configured base template directory could not be listed.
    #[error("error reading base template directory {dir}: {source}")]
    BaseDir {
        dir: String,
        #[source]
        source: io::Error,
    },

    /// A template file could not be read.
    #[error("error reading template {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The requested template does not exist.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Template syntax error or compilation failure.
    #[error("error parsing template {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// Template execution against the supplied data failed.
    #[error("error executing template {name}: {source}")]
    Execute {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// Rendered output could not be written to the sink.
    #[error("error writing output of template {name}: {source}")]
    Write {
        name: String,
        #[source]
        source: io::Error,
    },

    /// Manager configuration could not be loaded.
    #[error("invalid template configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl TemplateError {
    /// Name of the template, path or directory the error is about, if any.
    pub fn subject(&self) -> Option<&str> {
        match self {
            TemplateError::BaseDir { dir, .. } => Some(dir.as_str()),
            TemplateError::Read { path, .. } => Some(path.as_str()),
            TemplateError::NotFound(name) => Some(name.as_str()),
            TemplateError::Parse { name, .. }
            | TemplateError::Execute { name, .. }
            | TemplateError::Write { name, .. } => Some(name.as_str()),
            TemplateError::Config(_) => None,
        }
    }

    pub(crate) fn parse(name: &str, source: minijinja::Error) -> Self {
        TemplateError::Parse {
            name: name.to_string(),
            source,
        }
    }

    pub(crate) fn execute(name: &str, source: minijinja::Error) -> Self {
        TemplateError::Execute {
            name: name.to_string(),
            source,
        }
    }
}
