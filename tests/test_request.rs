use staticd::http::request::{Method, Request};

#[test]
fn test_request_method_classification() {
    let req = Request::new("GET", "/", "HTTP/1.1");
    assert_eq!(req.method(), Some(Method::GET));

    let req = Request::new("HEAD", "/", "HTTP/1.1");
    assert_eq!(req.method(), Some(Method::HEAD));

    let req = Request::new("BREW", "/", "HTTP/1.1");
    assert_eq!(req.method(), None);

    let req = Request::default();
    assert_eq!(req.method(), None);
}

#[test]
fn test_request_wants_body_only_for_get() {
    assert!(Request::new("GET", "/", "HTTP/1.1").wants_body());
    assert!(!Request::new("HEAD", "/", "HTTP/1.1").wants_body());
    assert!(!Request::new("POST", "/", "HTTP/1.1").wants_body());
}

#[test]
fn test_request_method_from_string() {
    assert_eq!(Method::from_str("GET"), Some(Method::GET));
    assert_eq!(Method::from_str("HEAD"), Some(Method::HEAD));
    assert_eq!(Method::from_str("INVALID"), None);
    assert_eq!(Method::from_str("get"), None); // Case-sensitive
}

#[test]
fn test_unserved_methods_have_no_method() {
    let methods = vec!["POST", "PUT", "DELETE", "OPTIONS", "PATCH", "TRACE", "CONNECT", ""];

    for method_str in methods {
        assert_eq!(Method::from_str(method_str), None, "{}", method_str);
        assert_eq!(Request::new(method_str, "/", "HTTP/1.1").method(), None);
    }
}
