//! Configuration source integration tests
//!
//! Uses mockito to serve configuration documents over HTTP.

mod common;

use logbridge::domain::models::{LogFormat, RotationPolicy};
use logbridge::domain::ports::ConfigSource;
use logbridge::infrastructure::config::{DocumentFormat, FileSource, StreamSource, UriSource};
use std::fs::File;
use std::path::PathBuf;

#[tokio::test]
async fn test_uri_source_fetches_yaml_over_http() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/config/logbridge.yaml")
        .with_status(200)
        .with_header("content-type", "application/yaml")
        .with_body("level: debug\nformat: json\nrotation: hourly\n")
        .create_async()
        .await;

    let source = UriSource::parse(&format!("{}/config/logbridge.yaml", server.url())).unwrap();
    let config = source.load().await.unwrap();

    mock.assert_async().await;
    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.rotation, RotationPolicy::Hourly);
    assert!(source.watch_path().is_none());
}

#[tokio::test]
async fn test_uri_source_picks_format_from_path() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/logbridge.json")
        .with_status(200)
        .with_body(r#"{"level": "warn", "enable_stdout": false}"#)
        .create_async()
        .await;

    let source = UriSource::parse(&format!("{}/logbridge.json", server.url())).unwrap();
    let config = source.load().await.unwrap();

    assert_eq!(config.level, "warn");
    assert!(!config.enable_stdout);
}

#[tokio::test]
async fn test_uri_source_reports_http_errors() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/missing.yaml")
        .with_status(404)
        .create_async()
        .await;

    let source = UriSource::parse(&format!("{}/missing.yaml", server.url())).unwrap();
    let err = source.load().await.unwrap_err();

    assert!(format!("{err:#}").contains("404"), "{err:#}");
}

#[tokio::test]
async fn test_uri_source_rejects_invalid_document() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/bad.yaml")
        .with_status(200)
        .with_body("level: shouting\n")
        .create_async()
        .await;

    let source = UriSource::parse(&format!("{}/bad.yaml", server.url())).unwrap();
    assert!(source.load().await.is_err());
}

#[tokio::test]
async fn test_file_uri_matches_file_source() {
    let dir = common::temp_dir();
    let path = common::write_config(dir.path(), "logbridge.toml", "level = \"error\"\nformat = \"compact\"\n");

    let uri = reqwest::Url::from_file_path(&path).unwrap();
    let from_uri = UriSource::new(uri).unwrap().load().await.unwrap();
    let from_file = FileSource::new(&path).load().await.unwrap();

    assert_eq!(from_uri, from_file);
    assert_eq!(from_file.format, LogFormat::Compact);
}

#[tokio::test]
async fn test_stream_source_from_open_file() {
    let dir = common::temp_dir();
    let path = common::write_config(dir.path(), "stream.yaml", "level: trace\nlog_dir: /var/log/app\n");

    let source = StreamSource::from_reader_as(File::open(&path).unwrap(), DocumentFormat::Yaml).unwrap();
    let config = source.load().await.unwrap();

    assert_eq!(config.level, "trace");
    assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/app")));
    assert!(source.watch_path().is_none());
}

#[tokio::test]
async fn test_file_source_missing_file() {
    let dir = common::temp_dir();
    let source = FileSource::new(dir.path().join("absent.yaml"));

    assert!(source.load().await.is_err());
}
