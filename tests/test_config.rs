use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use staticd::config::{Config, LISTEN_ENV, Mode};

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.server.mode, Mode::Thread);
    assert_eq!(cfg.files.root, PathBuf::from("."));
    assert_eq!(cfg.files.index, "index.html");
    assert_eq!(cfg.limits.max_header_bytes, 8192);
    assert_eq!(cfg.limits.read_timeout_secs, 15);
    assert_eq!(cfg.log_level().unwrap(), tracing::Level::INFO);
}

#[test]
fn test_handler_config_from_defaults() {
    let handler = Config::default().handler();

    assert_eq!(handler.root, PathBuf::from("."));
    assert_eq!(handler.index, "index.html");
    assert_eq!(handler.max_header_bytes, 8192);
    assert_eq!(handler.read_timeout, Duration::from_secs(15));
}

#[test]
fn test_config_partial_yaml_keeps_defaults() {
    let cfg = Config::from_yaml(
        r#"
server:
  mode: fork
files:
  root: /srv/www
"#,
    )
    .unwrap();

    assert_eq!(cfg.server.mode, Mode::Fork);
    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.files.root, PathBuf::from("/srv/www"));
    assert_eq!(cfg.files.index, "index.html");
    assert_eq!(cfg.limits.max_header_bytes, 8192);
}

#[test]
fn test_config_full_yaml() {
    let cfg = Config::from_yaml(
        r#"
server:
  listen_addr: "0.0.0.0:3000"
  mode: task
files:
  root: public
  index: home.html
limits:
  max_header_bytes: 1024
  read_timeout_secs: 2
log:
  level: debug
"#,
    )
    .unwrap();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:3000");
    assert_eq!(cfg.server.mode, Mode::Task);
    assert_eq!(cfg.log_level().unwrap(), tracing::Level::DEBUG);

    let handler = cfg.handler();
    assert_eq!(handler.root, PathBuf::from("public"));
    assert_eq!(handler.index, "home.html");
    assert_eq!(handler.max_header_bytes, 1024);
    assert_eq!(handler.read_timeout, Duration::from_secs(2));
}

#[test]
fn test_config_unknown_mode_is_rejected() {
    assert!(Config::from_yaml("server:\n  mode: green-threads\n").is_err());
}

#[test]
fn test_config_validation() {
    let mut cfg = Config::default();
    assert!(cfg.validate().is_ok());

    cfg.limits.read_timeout_secs = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = Config::default();
    cfg.files.index = "sub/index.html".to_string();
    assert!(cfg.validate().is_err());

    let mut cfg = Config::default();
    cfg.log.level = "chatty".to_string();
    assert!(cfg.validate().is_err());
}

#[test]
fn test_config_load_missing_file_fails() {
    let err = Config::load(Some(std::path::Path::new("/nonexistent/staticd.yaml"))).unwrap_err();
    assert!(format!("{:#}", err).contains("reading config file"));
}

#[test]
fn test_config_load_file_and_env_override() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "server:\n  listen_addr: \"127.0.0.1:9000\"\nfiles:\n  root: /tmp").unwrap();

    unsafe {
        std::env::remove_var(LISTEN_ENV);
    }
    let cfg = Config::load(Some(file.path())).unwrap();
    assert_eq!(cfg.server.listen_addr, "127.0.0.1:9000");
    assert_eq!(cfg.files.root, PathBuf::from("/tmp"));

    unsafe {
        std::env::set_var(LISTEN_ENV, "0.0.0.0:5000");
    }
    let cfg = Config::load(Some(file.path())).unwrap();
    assert_eq!(cfg.server.listen_addr, "0.0.0.0:5000");

    let cfg = Config::load(None).unwrap();
    assert_eq!(cfg.server.listen_addr, "0.0.0.0:5000");
    unsafe {
        std::env::remove_var(LISTEN_ENV);
    }
}
