// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use clap::Parser;
use serial_test::serial;
use std::path::Path;
use tempfile::TempDir;

#[derive(Parser)]
struct Harness {
    #[command(flatten)]
    args: BuildArgs,
}

fn parse(argv: &[&str]) -> BuildArgs {
    Harness::parse_from(std::iter::once("build").chain(argv.iter().copied())).args
}

#[test]
fn flags_fill_the_request() {
    let args = parse(&[
        "https://a.test",
        "https://b.test",
        "-t",
        "Portal",
        "--app-version",
        "1.2.3",
        "--company",
        "Acme",
        "-d",
        "/out",
        "--embedded",
        "--inflate",
    ]);
    let request = args.to_request().unwrap();
    assert_eq!(request.urls, vec!["https://a.test", "https://b.test"]);
    assert_eq!(request.title, "Portal");
    assert_eq!(request.version, "1.2.3");
    assert_eq!(request.company, "Acme");
    assert_eq!(request.output_dir, PathBuf::from("/out"));
    assert!(request.use_embedded_browser);
    assert!(request.inflate_size);
    assert!(!request.use_splash);
}

#[test]
fn splash_flag_enables_splash() {
    let args = parse(&["https://a.test", "--splash", "/pages/splash.html"]);
    let request = args.to_request().unwrap();
    assert!(request.use_splash);
    assert_eq!(request.splash_html(), Some(Path::new("/pages/splash.html")));
}

#[test]
fn flags_override_request_file_and_urls_accumulate() {
    let dir = TempDir::new().unwrap();
    let request_path = dir.path().join("request.toml");
    std::fs::write(
        &request_path,
        concat!(
            "urls = [\"https://file.test\"]\n",
            "title = \"FromFile\"\n",
            "company = \"Acme\"\n",
            "output_dir = \"/from-file\"\n",
        ),
    )
    .unwrap();
    let urls_path = dir.path().join("urls.txt");
    std::fs::write(&urls_path, "https://list.test\n\nhttps://list2.test\n").unwrap();

    let request = parse(&[
        "https://arg.test",
        "--request",
        request_path.to_str().unwrap(),
        "--urls-file",
        urls_path.to_str().unwrap(),
        "-t",
        "FromFlag",
    ])
    .to_request()
    .unwrap();

    assert_eq!(
        request.urls,
        vec!["https://file.test", "https://list.test", "", "https://list2.test", "https://arg.test"]
    );
    assert_eq!(request.title, "FromFlag");
    assert_eq!(request.company, "Acme");
    assert_eq!(request.output_dir, PathBuf::from("/from-file"));
}

#[test]
fn missing_request_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.toml");
    let err = parse(&["--request", missing.to_str().unwrap()]).to_request().unwrap_err();
    assert!(err.to_string().contains("missing.toml"), "{err}");
}

#[test]
#[serial]
fn flags_override_environment_config() {
    std::env::set_var("WEBEXE_PACKAGER", "env-packager");
    std::env::set_var("WEBEXE_MAX_JOBS", "3");
    std::env::set_var("WEBEXE_PADDING_MB", "7");

    let from_env = parse(&[]).engine_config().unwrap();
    assert_eq!(from_env.packager, "env-packager");
    assert_eq!(from_env.max_jobs, 3);
    assert_eq!(from_env.padding_mb, 7);

    let args = parse(&["--packager", "flag-packager", "--max-jobs", "0", "--padding-mb", "1"]);
    let overridden = args.engine_config().unwrap();
    assert_eq!(overridden.packager, "flag-packager");
    assert_eq!(overridden.max_jobs, 1);
    assert_eq!(overridden.padding_mb, 1);

    for var in ["WEBEXE_PACKAGER", "WEBEXE_MAX_JOBS", "WEBEXE_PADDING_MB"] {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn invalid_environment_is_reported() {
    std::env::set_var("WEBEXE_MAX_JOBS", "many");
    let err = parse(&[]).engine_config().unwrap_err();
    std::env::remove_var("WEBEXE_MAX_JOBS");
    assert!(err.to_string().contains("WEBEXE_MAX_JOBS"), "{err}");
}
