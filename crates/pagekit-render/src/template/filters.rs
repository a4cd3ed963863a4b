//! MiniJinja filter registration.

use minijinja::{Environment, Value};

use crate::path::filename_from_path;

/// Registers the built-in filters on a MiniJinja environment.
///
/// Every environment built by this crate gets these filters, before any
/// template is compiled.
pub fn register_filters(env: &mut Environment<'static>) {
    // Usage: {{ content | nl }} outputs content followed by \n
    env.add_filter("nl", |value: Value| -> String { format!("{}\n", value) });

    // Usage: {{ "static/img/logo.png" | basename }} outputs logo.png
    env.add_filter("basename", |value: String| -> String {
        filename_from_path(&value).to_string()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nl_filter_appends_newline() {
        let mut env = Environment::new();
        register_filters(&mut env);
        let out = env.render_str("{{ 'a' | nl }}{{ 'b' | nl }}", ()).unwrap();
        assert_eq!(out, "a\nb\n");
    }

    #[test]
    fn test_basename_filter() {
        let mut env = Environment::new();
        register_filters(&mut env);
        let out = env
            .render_str("{{ path | basename }}", minijinja::context! { path => "a/b/c.css" })
            .unwrap();
        assert_eq!(out, "c.css");
    }
}
