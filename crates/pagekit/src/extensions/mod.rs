//! Pages rendered inside the site's base layouts.
//!
//! An [`Extension`] provides page data and markup. [`ExtensionView`] compiles
//! that markup as the `"ext"` template, adds every base layout from the base
//! manager, registers default functions, and renders the result into a
//! [`ResponseWriter`](crate::ResponseWriter).
//!
//! Markup comes from one of three capabilities, checked once when the view is
//! built:
//!
//! | Capability | Trait | Ready-made type |
//! |------------|-------|-----------------|
//! | Parsed template | [`TemplateSource`] | [`WithTemplate`] |
//! | Source string | [`StringSource`] | [`WithString`] |
//! | File in the extension filesystem | [`FileSource`] | [`WithFilename`] |
//!
//! ## Hooks
//!
//! [`ExtensionOptions::before_render`] sees the composed set before execution
//! and may add functions or headers. [`ExtensionOptions::on_error`] replaces
//! the default plain-text 500 response.

mod types;
mod view;

pub use types::{
    Base, Context, ContentKind, Extension, FileSource, Request, StringSource, TemplateSource,
    ViewFn, WithFilename, WithString, WithTemplate,
};
pub use view::{BeforeRender, ExtensionOptions, ExtensionView, OnError, EXT_TEMPLATE_NAME};
