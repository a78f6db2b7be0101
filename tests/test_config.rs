use docserve::config::Config;
use docserve::http::writer::Framing;
use std::collections::HashMap;
use std::path::PathBuf;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.server.listen_addr, "localhost:8080");
    assert_eq!(cfg.server.read_limit, 1024);
    assert_eq!(cfg.server.line_timeout_ms, 250);
    assert_eq!(cfg.server.framing, Framing::Standard);
    assert_eq!(cfg.static_files.root, PathBuf::from("./www"));
    assert_eq!(cfg.static_files.index, "index.html");
    assert_eq!(cfg.logging.level, "info");
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_config_public_url_derived_from_listen_addr() {
    let cfg = Config::default();

    assert_eq!(cfg.public_url().unwrap().as_str(), "http://localhost:8080/");
}

#[test]
fn test_config_full_yaml() {
    let yaml = r#"
server:
  listen_addr: "0.0.0.0:9000"
  public_url: "https://files.example.com"
  read_limit: 2048
  line_timeout_ms: 500
  framing: legacy
static_files:
  root: "/srv/site"
  index: "home.html"
logging:
  level: debug
"#;
    let cfg = Config::from_yaml(yaml).unwrap();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:9000");
    assert_eq!(cfg.server.read_limit, 2048);
    assert_eq!(cfg.server.line_timeout_ms, 500);
    assert_eq!(cfg.server.framing, Framing::Legacy);
    assert_eq!(cfg.static_files.root, PathBuf::from("/srv/site"));
    assert_eq!(cfg.static_files.index, "home.html");
    assert_eq!(cfg.log_level().unwrap(), tracing::Level::DEBUG);
    assert_eq!(
        cfg.public_url().unwrap().as_str(),
        "https://files.example.com/"
    );
}

#[test]
fn test_config_partial_yaml_falls_back_to_defaults() {
    let cfg = Config::from_yaml("static_files:\n  root: ./public\n").unwrap();

    assert_eq!(cfg.static_files.root, PathBuf::from("./public"));
    assert_eq!(cfg.static_files.index, "index.html");
    assert_eq!(cfg.server.listen_addr, "localhost:8080");
}

#[test]
fn test_config_empty_yaml() {
    let cfg = Config::from_yaml("  \n").unwrap();

    assert_eq!(cfg.server.read_limit, 1024);
}

#[test]
fn test_config_rejects_unknown_framing() {
    assert!(Config::from_yaml("server:\n  framing: chunked\n").is_err());
}

#[test]
fn test_config_env_overrides() {
    let cfg = Config::default().with_env_overrides(env(&[
        ("LISTEN", "127.0.0.1:3000"),
        ("DOCSERVE_ROOT", "/tmp/site"),
        ("DOCSERVE_LOG", "warn"),
    ]));

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:3000");
    assert_eq!(cfg.static_files.root, PathBuf::from("/tmp/site"));
    assert_eq!(cfg.log_level().unwrap(), tracing::Level::WARN);
    assert_eq!(
        cfg.public_url().unwrap().as_str(),
        "http://127.0.0.1:3000/"
    );
}

#[test]
fn test_config_no_env_overrides_keeps_values() {
    let cfg = Config::default().with_env_overrides(env(&[]));

    assert_eq!(cfg.server.listen_addr, "localhost:8080");
}

#[test]
fn test_config_validation_failures() {
    let mut cfg = Config::default();
    cfg.server.read_limit = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = Config::default();
    cfg.server.line_timeout_ms = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = Config::default();
    cfg.static_files.index = "../index.html".to_string();
    assert!(cfg.validate().is_err());

    let mut cfg = Config::default();
    cfg.server.public_url = Some("ftp://example.com".to_string());
    assert!(cfg.validate().is_err());

    let mut cfg = Config::default();
    cfg.logging.level = "loud".to_string();
    assert!(cfg.validate().is_err());
}

#[test]
fn test_config_from_missing_file() {
    let err = Config::from_file("/nonexistent/docserve.yaml").unwrap_err();

    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1.server.listen_addr, cfg2.server.listen_addr);
}
