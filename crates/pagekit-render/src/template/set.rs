//! Parsed template sets.
//!
//! A [`TemplateSet`] is the compiled form of one or more template sources:
//! a page plus every base layout it may extend, include or import. One of the
//! templates is the root, which is what [`TemplateSet::execute`] runs.
//!
//! Sets are cheap to clone. Clones share the compiled environment until one
//! of them is modified (copy on write), so a cached set handed out to many
//! requests is compiled exactly once.

use std::io;
use std::sync::Arc;

use minijinja::functions::Function;
use minijinja::value::{FunctionArgs, FunctionResult, Value};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;

use super::filters::register_filters;
use super::functions::Functions;
use crate::error::TemplateError;

/// Environment options shared by every set a manager builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EnvOptions {
    pub autoescape: bool,
    pub strict_undefined: bool,
}

impl Default for EnvOptions {
    fn default() -> Self {
        Self {
            autoescape: true,
            strict_undefined: false,
        }
    }
}

impl EnvOptions {
    /// Creates an empty environment with built-in filters and `functions`
    /// registered, ready for templates to be added.
    pub(crate) fn environment(&self, functions: &Functions) -> Environment<'static> {
        let mut env = Environment::new();
        if self.autoescape {
            env.set_auto_escape_callback(|_| AutoEscape::Html);
        } else {
            env.set_auto_escape_callback(|_| AutoEscape::None);
        }
        if self.strict_undefined {
            env.set_undefined_behavior(UndefinedBehavior::Strict);
        }
        register_filters(&mut env);
        functions.register(&mut env);
        env
    }
}

/// One or more compiled templates with a designated root.
///
/// # Example
///
/// ```rust
/// use pagekit_render::TemplateSet;
/// use serde_json::json;
///
/// let mut set = TemplateSet::parse("page", "{% include 'header' %}: {{ title }}").unwrap();
/// set.add_template("header", "<h1>Site</h1>").unwrap();
///
/// let out = set.render(&json!({ "title": "Home" })).unwrap();
/// assert_eq!(out, "<h1>Site</h1>: Home");
/// ```
#[derive(Clone)]
pub struct TemplateSet {
    root: String,
    names: Vec<String>,
    env: Arc<Environment<'static>>,
}

impl TemplateSet {
    /// Parses `source` as a standalone set whose root is named `name`.
    ///
    /// Only the built-in filters are available; use a
    /// [`TemplateManager`](crate::TemplateManager) to get default functions.
    pub fn parse(name: &str, source: &str) -> Result<Self, TemplateError> {
        let mut set = Self::empty(name, EnvOptions::default().environment(&Functions::new()));
        set.add_template(name, source)?;
        Ok(set)
    }

    /// Creates a set with no templates around a prepared environment.
    pub(crate) fn empty(root: &str, env: Environment<'static>) -> Self {
        Self {
            root: root.to_string(),
            names: Vec::new(),
            env: Arc::new(env),
        }
    }

    /// Name of the root template.
    pub fn name(&self) -> &str {
        &self.root
    }

    /// Names of every template in the set, in the order they were added.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns true if both sets share the same compiled environment.
    pub fn ptr_eq(a: &TemplateSet, b: &TemplateSet) -> bool {
        Arc::ptr_eq(&a.env, &b.env)
    }

    /// Returns the source text of the template called `name`.
    pub fn source_of(&self, name: &str) -> Option<String> {
        self.env
            .get_template(name)
            .ok()
            .map(|t| t.source().to_string())
    }

    /// Serializes the root template back to source text.
    pub fn root_source(&self) -> Result<String, TemplateError> {
        self.source_of(&self.root)
            .ok_or_else(|| TemplateError::NotFound(self.root.clone()))
    }

    /// Compiles `source` and adds it under `name`.
    ///
    /// A template with the same name is replaced.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), TemplateError> {
        Arc::make_mut(&mut self.env)
            .add_template_owned(name.to_string(), source.to_string())
            .map_err(|e| TemplateError::parse(name, e))?;
        if !self.has_template(name) {
            self.names.push(name.to_string());
        }
        Ok(())
    }

    /// Copies every template of `other` into this set, by name.
    ///
    /// Templates from `other` replace same-named templates here, except the
    /// root of this set, which is never replaced.
    pub fn attach(&mut self, other: &TemplateSet) -> Result<(), TemplateError> {
        for name in other.names() {
            if name == self.root {
                continue;
            }
            if let Some(source) = other.source_of(name) {
                self.add_template(name, &source)?;
            }
        }
        Ok(())
    }

    /// Registers a single function on this set.
    pub fn add_function<F, Rv, Args>(&mut self, name: impl Into<String>, f: F)
    where
        F: Function<Rv, Args>,
        Rv: FunctionResult,
        Args: for<'a> FunctionArgs<'a>,
    {
        Arc::make_mut(&mut self.env).add_global(name.into(), Value::from_function(f));
    }

    /// Registers every function of `functions`; they replace same-named ones.
    pub fn add_functions(&mut self, functions: &Functions) {
        if functions.is_empty() {
            return;
        }
        functions.register(Arc::make_mut(&mut self.env));
    }

    /// Executes the root template against `data`, writing into `out`.
    pub fn execute<S: Serialize, W: io::Write>(&self, data: &S, out: W) -> Result<(), TemplateError> {
        self.execute_template(&self.root, data, out)
    }

    /// Executes the template called `name` against `data`, writing into `out`.
    ///
    /// Output is produced in full before anything is written, so a failed
    /// execution leaves `out` untouched.
    pub fn execute_template<S: Serialize, W: io::Write>(
        &self,
        name: &str,
        data: &S,
        mut out: W,
    ) -> Result<(), TemplateError> {
        let tmpl = self
            .env
            .get_template(name)
            .map_err(|_| TemplateError::NotFound(name.to_string()))?;
        let rendered = tmpl
            .render(Value::from_serialize(data))
            .map_err(|e| TemplateError::execute(name, e))?;
        out.write_all(rendered.as_bytes())
            .map_err(|source| TemplateError::Write {
                name: name.to_string(),
                source,
            })
    }

    /// Executes the root template and returns the output as a string.
    pub fn render<S: Serialize>(&self, data: &S) -> Result<String, TemplateError> {
        let tmpl = self
            .env
            .get_template(&self.root)
            .map_err(|_| TemplateError::NotFound(self.root.clone()))?;
        tmpl.render(Value::from_serialize(data))
            .map_err(|e| TemplateError::execute(&self.root, e))
    }
}

impl std::fmt::Debug for TemplateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateSet")
            .field("root", &self.root)
            .field("names", &self.names)
            .finish()
    }
}
