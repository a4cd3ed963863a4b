use std::fs;
use std::path::Path;
use std::sync::Arc;

use pagekit_render::{DirFs, Functions, ManagerConfig, TemplateError, TemplateManager, TemplateSet};
use serde_json::json;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn site(root: &Path) {
    write(root, "layouts/base.layout.html", "<main>{% block content %}{% endblock %}</main>");
    write(root, "layouts/footer.partial.html", "<footer>{{ year() }}</footer>");
    write(root, "layouts/notes.md", "ignored");
    write(
        root,
        "views/home.html",
        "{% extends 'base.layout.html' %}{% block content %}{{ title }}{% include 'footer.partial.html' %}{% endblock %}",
    );
    write(root, "fallback/page.html", "fallback {{ title }}");
}

fn config() -> ManagerConfig {
    ManagerConfig::new()
        .base_dir("layouts")
        .base_suffix(".layout.html")
        .base_suffix(".partial.html")
        .template_dir("views")
}

#[test]
fn test_dir_fs_manager_renders_page() {
    let dir = tempfile::tempdir().unwrap();
    site(dir.path());

    let manager = TemplateManager::new(config(), DirFs::new(dir.path()))
        .with_functions(Functions::new().add("year", || 2024));

    let (set, filename) = manager.get("home.html").unwrap();
    assert_eq!(filename, "home.html");
    assert!(set.has_template("base.layout.html"));
    assert!(set.has_template("footer.partial.html"));
    assert!(!set.has_template("notes.md"));

    let html = set.render(&json!({"title": "Home"})).unwrap();
    assert_eq!(html, "<main>Home<footer>2024</footer></main>");
}

#[test]
fn test_dir_fs_root_relative_fallback() {
    let dir = tempfile::tempdir().unwrap();
    site(dir.path());
    let manager = TemplateManager::new(config(), DirFs::new(dir.path()))
        .with_functions(Functions::new().add("year", || 2024));

    let (set, filename) = manager.get("fallback/page.html").unwrap();
    assert_eq!(filename, "page.html");
    assert_eq!(set.render(&json!({"title": "x"})).unwrap(), "fallback x");
}

#[test]
fn test_dir_fs_cache_survives_file_changes() {
    let dir = tempfile::tempdir().unwrap();
    site(dir.path());
    let manager = Arc::new(
        TemplateManager::new(config(), DirFs::new(dir.path()))
            .with_functions(Functions::new().add("year", || 2024)),
    );

    let (first, _) = manager.get("fallback/page.html").unwrap();
    write(dir.path(), "fallback/page.html", "changed");

    let (second, _) = manager.get("fallback/page.html").unwrap();
    assert!(TemplateSet::ptr_eq(&first, &second));
    assert_eq!(second.render(&json!({"title": "x"})).unwrap(), "fallback x");

    manager.init();
    let (third, _) = manager.get("fallback/page.html").unwrap();
    assert_eq!(third.render(&json!({})).unwrap(), "changed");
}

#[test]
fn test_dir_fs_without_cache_sees_changes() {
    let dir = tempfile::tempdir().unwrap();
    site(dir.path());
    let manager = TemplateManager::new(config().use_cache(false), DirFs::new(dir.path()))
        .with_functions(Functions::new().add("year", || 2024));

    manager.get("fallback/page.html").unwrap();
    write(dir.path(), "fallback/page.html", "changed");
    let (set, _) = manager.get("fallback/page.html").unwrap();
    assert_eq!(set.render(&json!({})).unwrap(), "changed");
}

#[test]
fn test_dir_fs_missing_base_dir_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let manager = TemplateManager::new(config(), DirFs::new(dir.path()));
    let err = manager.get("home.html").unwrap_err();
    assert!(matches!(err, TemplateError::BaseDir { ref dir, .. } if dir == "layouts"));
}

#[cfg(unix)]
#[test]
fn test_dir_fs_symlinked_base_layout_is_merged() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "shared/base.layout.html", "<main>{% block content %}{% endblock %}</main>");
    fs::create_dir_all(dir.path().join("layouts")).unwrap();
    std::os::unix::fs::symlink(
        dir.path().join("shared/base.layout.html"),
        dir.path().join("layouts/base.layout.html"),
    )
    .unwrap();
    write(
        dir.path(),
        "views/home.html",
        "{% extends 'base.layout.html' %}{% block content %}{{ title }}{% endblock %}",
    );

    let manager = TemplateManager::new(config(), DirFs::new(dir.path()));
    let (set, _) = manager.get("home.html").unwrap();
    assert!(set.has_template("base.layout.html"));
    assert_eq!(set.render(&json!({"title": "Home"})).unwrap(), "<main>Home</main>");
}
