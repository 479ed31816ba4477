//! Command line flow: arguments to output.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tempfile::TempDir;

use crumbs::cli::commands::run;
use crumbs::cli::{Cli, CliError};
use crumbs::config::Settings;
use crumbs::exitcode;
use crumbs::util::testing;

fn outline_file(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("outline.txt");
    fs::write(&path, content).unwrap();
    path
}

fn run_args(args: &[&str], settings: &Settings) -> Result<String, CliError> {
    testing::init_test_setup();
    let cli = Cli::parse_from(std::iter::once("crumbs").chain(args.iter().copied()));
    let mut out = Vec::new();
    run(&cli, settings, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn given_outline_file_when_running_then_prints_graph() {
    let dir = TempDir::new().unwrap();
    let file = outline_file(&dir, "* main idea\n** topic 1\n** topic 2\n");

    let dot = run_args(&[file.to_str().unwrap()], &Settings::default()).unwrap();
    assert!(dot.starts_with("graph {"));
    assert_eq!(dot.matches(" -- ").count(), 2);
    assert!(dot.contains(r#"rankdir="LR""#));
}

#[test]
fn given_layout_flags_when_running_then_override_settings() {
    let dir = TempDir::new().unwrap();
    let file = outline_file(&dir, "* a really long label that will wrap\n");

    let dot = run_args(
        &["--vertical", "--lim", "0", "--search-path", "/opt/icons", file.to_str().unwrap()],
        &Settings::default(),
    )
    .unwrap();
    assert!(dot.contains(r#"rankdir="TB""#));
    assert!(dot.contains(r#"imagepath="/opt/icons""#));
    assert!(dot.contains("<b>a really long label that will wrap</b>"));
}

#[test]
fn given_vertical_config_when_running_with_horizontal_then_left_to_right() {
    let dir = TempDir::new().unwrap();
    let file = outline_file(&dir, "* a\n** b\n");
    let settings = Settings {
        vertical: true,
        ..Settings::default()
    };

    let configured = run_args(&[file.to_str().unwrap()], &settings).unwrap();
    assert!(configured.contains(r#"rankdir="TB""#));

    let overridden = run_args(&["--horizontal", file.to_str().unwrap()], &settings).unwrap();
    assert!(overridden.contains(r#"rankdir="LR""#));
}

#[test]
fn given_both_layout_flags_when_parsing_args_then_rejected() {
    let result = Cli::try_parse_from(["crumbs", "--vertical", "--horizontal"]);
    assert!(result.is_err());
}

#[test]
fn given_marker_flag_when_running_tree_then_nested_with_it() {
    let dir = TempDir::new().unwrap();
    let file = outline_file(&dir, "- a\n-- b\n- c\n");

    let tree = run_args(&["--marker", "-", "--tree", file.to_str().unwrap()], &Settings::default())
        .unwrap();
    assert!(tree.starts_with('.'));
    assert!(tree.contains("── a"));
    assert!(tree.contains("── b"));
    assert!(tree.find("── b") < tree.find("── c"));
    assert!(!tree.contains("graph {"));
}

#[test]
fn given_images_path_flag_when_running_tree_then_icon_joined() {
    let dir = TempDir::new().unwrap();
    let file = outline_file(&dir, "* [[idea.png]] think\n");

    let tree = run_args(
        &["--images-path", "./icons", "--tree", file.to_str().unwrap()],
        &Settings::default(),
    )
    .unwrap();
    assert!(tree.contains("think [icons/idea.png]"));
}

#[test]
fn given_input_larger_than_cap_when_running_then_truncated() {
    let dir = TempDir::new().unwrap();
    let file = outline_file(&dir, "* kept\n* dropped\n");
    let settings = Settings {
        max_input_bytes: 7,
        ..Settings::default()
    };

    let tree = run_args(&["--tree", file.to_str().unwrap()], &settings).unwrap();
    assert!(tree.contains("kept"));
    assert!(!tree.contains("dropped"));
}

#[test]
fn given_missing_file_when_running_then_noinput_exit_code() {
    let err = run_args(&["/no/such/outline.txt"], &Settings::default()).unwrap_err();
    assert!(matches!(err, CliError::Infra(_)));
    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn given_whitespace_marker_flag_when_running_then_usage_error() {
    let dir = TempDir::new().unwrap();
    let file = outline_file(&dir, "* a\n");

    let err = run_args(&["--marker", " ", file.to_str().unwrap()], &Settings::default())
        .unwrap_err();
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_debug_flags_when_parsing_args_then_counted() {
    let cli = Cli::parse_from(["crumbs", "-d", "-d", "--lim", "12"]);
    assert_eq!(cli.debug, 2);
    assert_eq!(cli.lim, Some(12));
    assert!(cli.file.is_none());
}
