//! Composition and rendering of extension pages.

use std::fmt;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pagekit_render::{Functions, TemplateError, TemplateManager, TemplateSet};
use tracing::{debug, warn};

use super::types::{ContentKind, Extension, Request};
use crate::error::ExtensionError;
use crate::response::ResponseWriter;

/// Name of the root template of a composed extension page.
pub const EXT_TEMPLATE_NAME: &str = "ext";

/// Called with the composed set right before it is executed.
pub type BeforeRender = Arc<dyn Fn(&mut ResponseWriter, &Request, &mut TemplateSet) + Send + Sync>;

/// Called instead of the default 500 response when rendering fails.
pub type OnError = Arc<dyn Fn(&mut ResponseWriter, &Request, &ExtensionError) + Send + Sync>;

/// Managers and hooks shared by every extension view of a site.
#[derive(Clone)]
pub struct ExtensionOptions {
    /// Supplies base layouts and default functions.
    pub base_manager: Arc<TemplateManager>,
    /// Resolves file-backed extensions and supplies extra functions.
    pub extension_manager: Arc<TemplateManager>,
    pub before_render: Option<BeforeRender>,
    pub on_error: Option<OnError>,
}

impl ExtensionOptions {
    pub fn new(base_manager: Arc<TemplateManager>, extension_manager: Arc<TemplateManager>) -> Self {
        Self {
            base_manager,
            extension_manager,
            before_render: None,
            on_error: None,
        }
    }

    pub fn before_render<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut ResponseWriter, &Request, &mut TemplateSet) + Send + Sync + 'static,
    {
        self.before_render = Some(Arc::new(f));
        self
    }

    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut ResponseWriter, &Request, &ExtensionError) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for ExtensionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionOptions")
            .field("base_manager", &self.base_manager)
            .field("extension_manager", &self.extension_manager)
            .field("before_render", &self.before_render.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Renders one extension inside the base layouts.
///
/// The extension's markup is compiled as the `"ext"` template, every base
/// layout is added next to it, and the result is executed with the data from
/// [`Extension::view`]. Fragments reach layouts by file name:
///
/// ```rust
/// use std::sync::Arc;
/// use pagekit::extensions::{Context, ExtensionOptions, ExtensionView, WithString};
/// use pagekit::render::{ManagerConfig, MemoryFs, TemplateManager};
///
/// let layouts = MemoryFs::new().with_file("base/layout.html", "<main>{% block body %}{% endblock %}</main>");
/// let base = TemplateManager::new(ManagerConfig::new().base_dir("base").base_suffix(".html"), layouts);
/// let ext = TemplateManager::new(ManagerConfig::new(), MemoryFs::new());
///
/// let page = WithString::new("hello", "{% extends 'layout.html' %}{% block body %}Hello {{ name }}{% endblock %}")
///     .with_view(|_| {
///         let mut ctx = Context::new();
///         ctx.insert("name".into(), "World".into());
///         ctx
///     });
///
/// let view = ExtensionView::new(ExtensionOptions::new(Arc::new(base), Arc::new(ext)), page);
/// let req = axum::http::Request::new(axum::body::Bytes::new());
/// let html = view.compose(&req).unwrap().render(&serde_json::json!({"name": "World"})).unwrap();
/// assert_eq!(html, "<main>Hello World</main>");
/// ```
pub struct ExtensionView {
    options: ExtensionOptions,
    extension: Arc<dyn Extension>,
    kind: ContentKind,
}

impl ExtensionView {
    /// Binds `extension` to `options`.
    ///
    /// # Panics
    ///
    /// If the extension supplies neither a template, a string nor a
    /// filename. This is a wiring mistake and is reported with the
    /// extension's name.
    pub fn new(options: ExtensionOptions, extension: impl Extension + 'static) -> Self {
        Self::from_shared(options, Arc::new(extension))
    }

    /// Like [`new`](Self::new), for an extension that is already shared.
    pub fn from_shared(options: ExtensionOptions, extension: Arc<dyn Extension>) -> Self {
        let Some(kind) = ContentKind::of(extension.as_ref()) else {
            panic!(
                "extension {:?} provides no template, string or filename",
                extension.name()
            );
        };
        debug!(extension = extension.name(), kind = %kind, "registered extension");
        Self {
            options,
            extension,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        self.extension.name()
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn options(&self) -> &ExtensionOptions {
        &self.options
    }

    /// Builds the executable set for this extension without running it.
    ///
    /// The fragment becomes the root template `"ext"`, base layouts are
    /// attached to it, and the default functions of the base manager and
    /// then the extension manager are registered. Template and string
    /// extensions are asked for their markup with `req`.
    pub fn compose(&self, req: &Request) -> Result<TemplateSet, ExtensionError> {
        self.try_compose(req).map_err(|e| self.error(e))
    }

    /// Renders the extension into `w`.
    ///
    /// Failures go to the `on_error` hook if one is configured; otherwise
    /// `w` is replaced with a plain-text 500 response.
    pub fn serve(&self, req: &Request, w: &mut ResponseWriter) {
        if let Err(err) = self.try_serve(req, w) {
            warn!(extension = self.name(), error = %err.source, "extension render failed");
            match &self.options.on_error {
                Some(hook) => hook(w, req, &err),
                None => w.error(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string()),
            }
        }
    }

    /// Renders the extension into a fresh response.
    pub fn handle(&self, req: &Request) -> Response {
        let mut w = ResponseWriter::new();
        self.serve(req, &mut w);
        w.into_response()
    }

    fn try_serve(&self, req: &Request, w: &mut ResponseWriter) -> Result<(), ExtensionError> {
        let data = self.extension.view(req);
        let mut set = self.compose(req)?;

        if let Some(hook) = &self.options.before_render {
            hook(&mut *w, req, &mut set);
        }

        set.execute(&data, w).map_err(|e| self.error(e))
    }

    fn try_compose(&self, req: &Request) -> Result<TemplateSet, TemplateError> {
        let source = self.fragment_source(req)?;
        let base = &self.options.base_manager;

        let mut set = base.get_from_string(&source, EXT_TEMPLATE_NAME)?;
        let bases = base.get_bases(&Functions::new())?;
        set.attach(&bases)?;

        set.add_functions(base.functions());
        set.add_functions(self.options.extension_manager.functions());
        Ok(set)
    }

    fn fragment_source(&self, req: &Request) -> Result<String, TemplateError> {
        let ext = self.extension.as_ref();
        let source = match self.kind {
            ContentKind::Template => ext.as_template().map(|t| t.template(req).root_source()),
            ContentKind::String => ext.as_string().map(|s| Ok(s.string(req))),
            ContentKind::Filename => ext.as_filename().map(|f| {
                self.options
                    .extension_manager
                    .parse_file(&f.filename())
                    .and_then(|set| set.root_source())
            }),
        };
        // The capability was present at registration.
        source.unwrap_or_else(|| Err(TemplateError::NotFound(ext.name().to_string())))
    }

    fn error(&self, source: TemplateError) -> ExtensionError {
        ExtensionError::new(self.name(), source)
    }
}

impl fmt::Debug for ExtensionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionView")
            .field("extension", &self.name())
            .field("kind", &self.kind)
            .finish()
    }
}
