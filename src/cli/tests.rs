//! Unit tests for CLI commands

use crate::cli::{run_cli, Cli, Commands, OutputFormat};
use clap::Parser;

fn run(args: &[&str]) -> (bool, String) {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    let ok = run_cli(&cli, &mut out).unwrap();
    (ok, String::from_utf8(out).unwrap())
}

#[test]
fn test_compile_command_parses_flags() {
    let cli = Cli::try_parse_from(["routewerk", "compile", "/a/:b", "--strict", "--format", "json"])
        .unwrap();
    match cli.command {
        Commands::Compile { pattern } => {
            assert_eq!(pattern.pattern, "/a/:b");
            assert!(pattern.strict);
            assert!(!pattern.prefix);
            assert_eq!(pattern.format, OutputFormat::Json);
        }
        _ => panic!("Expected Compile command"),
    }
}

#[test]
fn test_compile_text_output() {
    let (ok, out) = run(&["routewerk", "compile", "/users/:id"]);
    assert!(ok);
    assert!(out.contains("matcher: pattern"));
    assert!(out.contains("params:  id"));
}

#[test]
fn test_compile_json_output() {
    let (_, out) = run(&["routewerk", "compile", "/users", "--format", "json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["matcher"], "exact");
    assert!(value["regex"].is_null());
}

#[test]
fn test_match_reports_params() {
    let (ok, out) = run(&["routewerk", "match", "/dog/:id", "/dog//123456/"]);
    assert!(ok);
    assert!(out.contains("match: /dog/:id /dog/123456/"));
    assert!(out.contains("id = 123456"));
}

#[test]
fn test_match_failure() {
    let (ok, out) = run(&["routewerk", "match", "/dog/:id", "/cat/1", "--strict"]);
    assert!(!ok);
    assert!(out.starts_with("no match"));
}

#[test]
fn test_invalid_pattern_is_an_error() {
    let cli = Cli::try_parse_from(["routewerk", "compile", "/a(b"]).unwrap();
    let mut out = Vec::new();
    let err = run_cli(&cli, &mut out).unwrap_err();
    assert!(format!("{err:#}").contains("unmatched '('"));
}

#[test]
fn test_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("routewerk.toml");
    std::fs::write(&path, "strict_slash = true\n").unwrap();
    let (ok, out) = run(&["routewerk", "config", "--file", path.to_str().unwrap()]);
    assert!(ok);
    assert!(out.contains("strict_slash = true"));
    assert!(out.contains("panic_recovery = false"));
}
