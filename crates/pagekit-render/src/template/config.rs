//! Template manager configuration.

use serde::{Deserialize, Serialize};

use super::set::EnvOptions;
use crate::error::TemplateError;

/// Settings for a [`TemplateManager`](crate::TemplateManager).
///
/// Every field has a default, so configuration files only need to name what
/// they change.
///
/// ```rust
/// use pagekit_render::ManagerConfig;
///
/// let config = ManagerConfig::from_yaml(r#"
/// base_dirs: [layouts]
/// base_suffixes: [".layout.html"]
/// template_dirs: [pages, shared]
/// "#).unwrap();
///
/// assert!(config.use_cache);
/// assert_eq!(config.template_dirs, vec!["pages", "shared"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Cache parsed templates by name.
    pub use_cache: bool,
    /// File name suffixes that mark a file in a base directory as a base
    /// template, e.g. `".layout.html"`.
    pub base_suffixes: Vec<String>,
    /// Directories scanned for base templates, in order.
    pub base_dirs: Vec<String>,
    /// Directories probed for page templates, in priority order.
    pub template_dirs: Vec<String>,
    /// HTML-escape every `{{ }}` expression.
    pub autoescape: bool,
    /// Fail execution on undefined values instead of rendering them empty.
    pub strict_undefined: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            use_cache: true,
            base_suffixes: Vec::new(),
            base_dirs: Vec::new(),
            template_dirs: Vec::new(),
            autoescape: true,
            strict_undefined: false,
        }
    }
}

impl ManagerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, TemplateError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn use_cache(mut self, enabled: bool) -> Self {
        self.use_cache = enabled;
        self
    }

    pub fn base_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.base_suffixes.push(suffix.into());
        self
    }

    pub fn base_dir(mut self, dir: impl Into<String>) -> Self {
        self.base_dirs.push(dir.into());
        self
    }

    pub fn template_dir(mut self, dir: impl Into<String>) -> Self {
        self.template_dirs.push(dir.into());
        self
    }

    pub fn autoescape(mut self, enabled: bool) -> Self {
        self.autoescape = enabled;
        self
    }

    pub fn strict_undefined(mut self, enabled: bool) -> Self {
        self.strict_undefined = enabled;
        self
    }

    /// Returns true if `file_name` ends with one of the base suffixes.
    pub fn is_base_template(&self, file_name: &str) -> bool {
        self.base_suffixes
            .iter()
            .any(|suffix| file_name.ends_with(suffix.as_str()))
    }

    pub(crate) fn env_options(&self) -> EnvOptions {
        EnvOptions {
            autoescape: self.autoescape,
            strict_undefined: self.strict_undefined,
        }
    }
}
