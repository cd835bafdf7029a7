use std::time::Duration;

use hf_dataset_watch::config::{Config, ConfigLoader, SearchEntry};
use hf_dataset_watch::domain::WatchScope;
use hf_dataset_watch::error::WatchError;

#[test]
fn parse_full_config_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("hf-watch.json");
    std::fs::write(
        &path,
        r#"{
            "catalog_base_url": "https://hub.example.test/api/",
            "token": "  hf_secret  ",
            "search": { "term": "speech", "limit": 3 },
            "scope": "room",
            "store_dir": "/var/lib/hf-watch",
            "timeout_secs": 10
        }"#,
    )
    .unwrap();

    let config = ConfigLoader::load(path.to_str()).unwrap();
    let resolved = ConfigLoader::resolve_config(config).unwrap();

    assert_eq!(resolved.catalog_base_url, "https://hub.example.test/api");
    assert_eq!(resolved.token.as_deref(), Some("hf_secret"));
    assert_eq!(resolved.search.term, "speech");
    assert_eq!(resolved.search.author, "ryua22222");
    assert_eq!(resolved.search.limit, 3);
    assert_eq!(resolved.scope, WatchScope::Room);
    assert_eq!(
        resolved.store_dir.as_ref().map(|dir| dir.as_str()),
        Some("/var/lib/hf-watch")
    );
    assert_eq!(resolved.timeout, Duration::from_secs(10));
}

#[test]
fn explicit_missing_file_is_error() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("absent.json");
    let err = ConfigLoader::load(path.to_str()).unwrap_err();
    assert!(matches!(err, WatchError::ConfigRead(_)));
}

#[test]
fn malformed_file_is_parse_error() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("hf-watch.json");
    std::fs::write(&path, "{ scope: ").unwrap();
    let err = ConfigLoader::load(path.to_str()).unwrap_err();
    assert!(matches!(err, WatchError::ConfigParse(_)));
}

#[test]
fn zero_limit_is_rejected() {
    let config = Config {
        search: Some(SearchEntry {
            limit: Some(0),
            ..SearchEntry::default()
        }),
        ..Config::default()
    };
    let err = ConfigLoader::resolve_config(config).unwrap_err();
    assert!(matches!(err, WatchError::InvalidConfig(_)));
}

#[test]
fn blank_token_is_dropped() {
    let config = ConfigLoader::apply_env(Config::default(), |_| Some("   ".to_string()));
    let resolved = ConfigLoader::resolve_config(config).unwrap();
    assert!(resolved.token.is_none());
    assert!(resolved.store_dir.is_none());
}
