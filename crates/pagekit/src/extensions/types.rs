//! Extension traits and ready-made extension types.

use std::fmt;
use std::sync::Arc;

use pagekit_render::TemplateSet;

/// The request type handed to extensions and hooks.
pub type Request = axum::http::Request<axum::body::Bytes>;

/// Page data produced by [`Extension::view`].
pub type Context = serde_json::Map<String, serde_json::Value>;

/// Data callback used by the ready-made extensions.
pub type ViewFn = Arc<dyn Fn(&Request) -> Context + Send + Sync>;

/// A page rendered inside the site's base layouts.
///
/// Besides producing page data, an extension supplies its markup through
/// exactly one of three capabilities: an already parsed template, a source
/// string, or a file in the extension manager's filesystem. Override the
/// matching `as_*` accessor to advertise it; the first one that returns
/// `Some`, in the order template, string, file, is used.
pub trait Extension: Send + Sync {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// Produces the data the page is rendered with.
    fn view(&self, req: &Request) -> Context;

    fn as_template(&self) -> Option<&dyn TemplateSource> {
        None
    }

    fn as_string(&self) -> Option<&dyn StringSource> {
        None
    }

    fn as_filename(&self) -> Option<&dyn FileSource> {
        None
    }
}

/// Supplies the page markup as a parsed template; its root is used.
///
/// Called on every render, so the template may depend on the request.
pub trait TemplateSource {
    fn template(&self, req: &Request) -> TemplateSet;
}

/// Supplies the page markup as template source text.
///
/// Called on every render, so the markup may depend on the request.
pub trait StringSource {
    fn string(&self, req: &Request) -> String;
}

/// Supplies a path to the page markup, relative to the extension
/// filesystem.
pub trait FileSource {
    fn filename(&self) -> String;
}

/// Where an extension's markup comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Template,
    String,
    Filename,
}

impl ContentKind {
    /// Inspects the capabilities of `ext`; `None` if it has none.
    pub fn of(ext: &dyn Extension) -> Option<ContentKind> {
        if ext.as_template().is_some() {
            Some(ContentKind::Template)
        } else if ext.as_string().is_some() {
            Some(ContentKind::String)
        } else if ext.as_filename().is_some() {
            Some(ContentKind::Filename)
        } else {
            None
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContentKind::Template => "template",
            ContentKind::String => "string",
            ContentKind::Filename => "filename",
        };
        f.write_str(s)
    }
}

/// Name and data callback shared by the ready-made extensions.
#[derive(Clone)]
pub struct Base {
    pub name: String,
    pub callback: Option<ViewFn>,
}

impl Base {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            callback: None,
        }
    }

    pub fn with_view<F>(mut self, f: F) -> Self
    where
        F: Fn(&Request) -> Context + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(f));
        self
    }

    /// Runs the callback, or returns empty data when there is none.
    pub fn view(&self, req: &Request) -> Context {
        match &self.callback {
            Some(cb) => cb(req),
            None => Context::new(),
        }
    }
}

impl fmt::Debug for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Base")
            .field("name", &self.name)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

macro_rules! base_delegate {
    ($ty:ident) => {
        impl $ty {
            /// Sets the data callback.
            pub fn with_view<F>(mut self, f: F) -> Self
            where
                F: Fn(&Request) -> Context + Send + Sync + 'static,
            {
                self.base = self.base.with_view(f);
                self
            }
        }
    };
}

/// An extension whose markup is an already parsed template.
#[derive(Debug, Clone)]
pub struct WithTemplate {
    pub base: Base,
    pub template: TemplateSet,
}

impl WithTemplate {
    pub fn new(name: impl Into<String>, template: TemplateSet) -> Self {
        Self {
            base: Base::new(name),
            template,
        }
    }
}

base_delegate!(WithTemplate);

impl TemplateSource for WithTemplate {
    fn template(&self, _req: &Request) -> TemplateSet {
        self.template.clone()
    }
}

impl Extension for WithTemplate {
    fn name(&self) -> &str {
        &self.base.name
    }

    fn view(&self, req: &Request) -> Context {
        self.base.view(req)
    }

    fn as_template(&self) -> Option<&dyn TemplateSource> {
        Some(self)
    }
}

/// An extension whose markup is inline template source.
#[derive(Debug, Clone)]
pub struct WithString {
    pub base: Base,
    pub source: String,
}

impl WithString {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            base: Base::new(name),
            source: source.into(),
        }
    }
}

base_delegate!(WithString);

impl StringSource for WithString {
    fn string(&self, _req: &Request) -> String {
        self.source.clone()
    }
}

impl Extension for WithString {
    fn name(&self) -> &str {
        &self.base.name
    }

    fn view(&self, req: &Request) -> Context {
        self.base.view(req)
    }

    fn as_string(&self) -> Option<&dyn StringSource> {
        Some(self)
    }
}

/// An extension whose markup lives in a file of the extension filesystem.
#[derive(Debug, Clone)]
pub struct WithFilename {
    pub base: Base,
    pub filename: String,
}

impl WithFilename {
    pub fn new(name: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            base: Base::new(name),
            filename: filename.into(),
        }
    }
}

base_delegate!(WithFilename);

impl FileSource for WithFilename {
    fn filename(&self) -> String {
        self.filename.clone()
    }
}

impl Extension for WithFilename {
    fn name(&self) -> &str {
        &self.base.name
    }

    fn view(&self, req: &Request) -> Context {
        self.base.view(req)
    }

    fn as_filename(&self) -> Option<&dyn FileSource> {
        Some(self)
    }
}
