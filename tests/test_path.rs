use std::path::{Path, PathBuf};

use staticd::http::path::{is_safe, resolve};

#[test]
fn test_single_segment_targets_are_safe() {
    assert!(is_safe("/"));
    assert!(is_safe("/index.html"));
    assert!(is_safe("/style.css"));
    assert!(is_safe("/a"));
}

#[test]
fn test_traversal_is_rejected() {
    let targets = vec![
        "/../etc/passwd",
        "/..",
        "/..hidden",
        "/file..txt",
        "..",
        "/%2e%2e/../x",
    ];

    for target in targets {
        assert!(!is_safe(target), "{}", target);
    }
}

#[test]
fn test_more_than_one_slash_is_rejected() {
    let targets = vec!["/a/b", "//", "/dir/", "//etc/passwd", "/a/b/c"];

    for target in targets {
        assert!(!is_safe(target), "{}", target);
    }
}

#[test]
fn test_is_safe_does_not_require_leading_slash() {
    // the leading-slash check belongs to resolve
    assert!(is_safe("index.html"));
    assert!(is_safe(""));
}

#[test]
fn test_resolve_root_to_index() {
    let root = Path::new("/srv/www");

    assert_eq!(
        resolve(root, "index.html", "/"),
        Some(PathBuf::from("/srv/www/index.html"))
    );
    assert_eq!(
        resolve(root, "home.htm", "/"),
        Some(PathBuf::from("/srv/www/home.htm"))
    );
}

#[test]
fn test_resolve_named_file() {
    assert_eq!(
        resolve(Path::new("."), "index.html", "/notes.txt"),
        Some(PathBuf::from("./notes.txt"))
    );
}

#[test]
fn test_resolve_rejects_bad_targets() {
    let root = Path::new("/srv/www");

    assert_eq!(resolve(root, "index.html", ""), None);
    assert_eq!(resolve(root, "index.html", "index.html"), None);
    assert_eq!(resolve(root, "index.html", "/../secret"), None);
    assert_eq!(resolve(root, "index.html", "/sub/file"), None);
    assert_eq!(resolve(root, "index.html", "*"), None);
}
