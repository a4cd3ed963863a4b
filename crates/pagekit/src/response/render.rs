//! HTML rendering helpers.

use pagekit_render::{TemplateManager, TemplateSet};
use serde::Serialize;

use super::writer::ResponseWriter;
use crate::error::ResponseError;

/// Name given to templates rendered by [`render_string`].
pub const STRING_TEMPLATE_NAME: &str = "string";

/// Loads `name` through `manager` and executes it into `w`.
///
/// Sets `Content-Type: text/html; charset=utf-8` unless a content type is
/// already present.
pub fn render<S: Serialize>(
    manager: &TemplateManager,
    w: &mut ResponseWriter,
    name: &str,
    data: &S,
) -> Result<(), ResponseError> {
    let (set, filename) = manager.get(name)?;
    ensure_html(w);
    set.execute_template(&filename, data, w)?;
    Ok(())
}

/// Parses `source` on its own and executes it into `w`.
///
/// No base layouts or default functions are available to the template.
pub fn render_string<S: Serialize>(
    w: &mut ResponseWriter,
    source: &str,
    data: &S,
) -> Result<(), ResponseError> {
    let set = TemplateSet::parse(STRING_TEMPLATE_NAME, source)?;
    ensure_html(w);
    set.execute(data, w)?;
    Ok(())
}

fn ensure_html(w: &mut ResponseWriter) {
    if !w.headers().contains_key(axum::http::header::CONTENT_TYPE) {
        w.set_content_type("text/html; charset=utf-8");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_TYPE;
    use pagekit_render::{ManagerConfig, MemoryFs, TemplateError};
    use serde_json::json;

    fn manager() -> TemplateManager {
        let fs = MemoryFs::new()
            .with_file("layouts/site.html", "<body>{% block main %}{% endblock %}</body>")
            .with_file(
                "pages/about.html",
                "{% extends 'site.html' %}{% block main %}About {{ who }}{% endblock %}",
            );
        TemplateManager::new(
            ManagerConfig::new()
                .base_dir("layouts")
                .base_suffix(".html")
                .template_dir("pages"),
            fs,
        )
    }

    #[test]
    fn test_render_named_template() {
        let mut w = ResponseWriter::new();
        render(&manager(), &mut w, "about.html", &json!({"who": "us"})).unwrap();

        assert_eq!(w.body_str(), Some("<body>About us</body>"));
        assert_eq!(w.headers()[CONTENT_TYPE], "text/html; charset=utf-8");
    }

    #[test]
    fn test_render_missing_template() {
        let mut w = ResponseWriter::new();
        let err = render(&manager(), &mut w, "missing.html", &json!({})).unwrap_err();
        assert!(matches!(
            err,
            ResponseError::Render(TemplateError::NotFound(_))
        ));
        assert!(!w.is_committed());
    }

    #[test]
    fn test_render_string_escapes() {
        let mut w = ResponseWriter::new();
        render_string(&mut w, "<p>{{ msg }}</p>", &json!({"msg": "<b>"})).unwrap();
        assert_eq!(w.body_str(), Some("<p>&lt;b&gt;</p>"));
    }

    #[test]
    fn test_render_string_keeps_content_type() {
        let mut w = ResponseWriter::new();
        w.set_content_type("text/plain");
        render_string(&mut w, "{{ 1 + 1 }}", &json!({})).unwrap();
        assert_eq!(w.headers()[CONTENT_TYPE], "text/plain");
        assert_eq!(w.body_str(), Some("2"));
    }

    #[test]
    fn test_render_string_parse_error() {
        let mut w = ResponseWriter::new();
        let err = render_string(&mut w, "{% if %}", &json!({})).unwrap_err();
        assert!(matches!(
            err,
            ResponseError::Render(TemplateError::Parse { ref name, .. }) if name == "string"
        ));
    }
}
