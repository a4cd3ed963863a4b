//! Response sink and the helpers that write into it.
//!
//! - [`ResponseWriter`]: buffered response with write-once headers
//! - [`render`] / [`render_string`]: HTML pages from templates
//! - [`json_encode`], [`json_decode`], [`json_error`]: JSON envelopes

mod json;
mod render;
mod writer;

pub use json::{
    json, json_decode, json_encode, json_encode_with_status, json_error, JsonError, JsonResponse,
    ResponseStatus,
};
pub use render::{render, render_string, STRING_TEMPLATE_NAME};
pub use writer::ResponseWriter;
