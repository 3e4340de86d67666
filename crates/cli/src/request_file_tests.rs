// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn loads_toml_request() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "request.toml",
        r#"
urls = ["https://example.com", "https://example.org"]
title = "Portal"
company = "Acme"
output_dir = "/out"
icon_path = "/icons/app.ico"
use_embedded_browser = true
inflate_size = true
"#,
    );

    let request = load_request(&path).unwrap();
    assert_eq!(request.urls, vec!["https://example.com", "https://example.org"]);
    assert_eq!(request.title, "Portal");
    assert_eq!(request.company, "Acme");
    assert_eq!(request.output_dir, PathBuf::from("/out"));
    assert_eq!(request.icon(), Some(Path::new("/icons/app.ico")));
    assert!(request.use_embedded_browser);
    assert!(!request.use_splash);
    assert!(request.inflate_size);
}

#[test]
fn unknown_fields_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.toml", "urls = []\nfavicon = \"x\"\n");
    let err = load_request(&path).unwrap_err();
    assert!(matches!(err, RequestFileError::Parse { .. }));
    assert!(err.to_string().contains("bad.toml"));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let err = load_request(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, RequestFileError::Read { .. }));
}

#[test]
fn url_file_keeps_inner_blank_lines() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "urls.txt", "\n\nhttps://a.test\n\nhttps://b.test\n\n");
    assert_eq!(read_url_file(&path).unwrap(), vec!["https://a.test", "", "https://b.test"]);
}

#[test]
fn home_is_expanded_only_at_the_start() {
    if let Some(home) = dirs::home_dir() {
        assert_eq!(expand_home(Path::new("~/out")), home.join("out"));
    }
    assert_eq!(expand_home(Path::new("/tmp/~/out")), PathBuf::from("/tmp/~/out"));
    assert_eq!(expand_home(Path::new("out")), PathBuf::from("out"));
}
