//! Unit tests for CLI commands

use crate::cli::{run_cli_to, Cli, Commands, Outcome};
use clap::Parser;
use std::fs;

const MANIFEST: &str = r#"
routes:
  - method: GET
    path: /users/:id
    handler: get_user
    description: Fetch one user
  - method: GET
    path: /static/*filepath
    handler: serve_static
  - method: POST
    path: /users
    handler: create_user
"#;

fn write_manifest(dir: &tempfile::TempDir) -> String {
    let path = dir.path().join("routes.yaml");
    fs::write(&path, MANIFEST).unwrap();
    path.to_string_lossy().into_owned()
}

fn run(args: &[&str]) -> (anyhow::Result<Outcome>, String) {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    let outcome = run_cli_to(cli, &mut out);
    (outcome, String::from_utf8(out).unwrap())
}

#[test]
fn test_match_command_parses() {
    let cli = Cli::try_parse_from([
        "kvolt-routes",
        "match",
        "--routes",
        "routes.yaml",
        "GET",
        "/users/1",
        "--json",
    ])
    .unwrap();

    match cli.command {
        Commands::Match {
            routes,
            method,
            path,
            json,
        } => {
            assert_eq!(routes.to_string_lossy(), "routes.yaml");
            assert_eq!(method, "GET");
            assert_eq!(path, "/users/1");
            assert!(json);
        }
        _ => panic!("Expected Match command"),
    }
}

#[test]
fn test_routes_flag_is_required() {
    assert!(Cli::try_parse_from(["kvolt-routes", "check"]).is_err());
}

#[test]
fn test_check_reports_route_count() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(&dir);
    let (outcome, out) = run(&["kvolt-routes", "check", "--routes", &manifest]);
    assert_eq!(outcome.unwrap(), Outcome::Success);
    assert_eq!(out.trim(), "ok: 3 routes across 2 methods");
}

#[test]
fn test_list_prints_every_route() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(&dir);
    let (outcome, out) = run(&["kvolt-routes", "list", "--routes", &manifest]);
    assert_eq!(outcome.unwrap(), Outcome::Success);
    assert_eq!(out.lines().count(), 3);
    assert!(out.contains("/users/:id -> get_user  # Fetch one user"));
    assert!(out.contains("/users -> create_user"));
}

#[test]
fn test_list_json() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(&dir);
    let (_, out) = run(&["kvolt-routes", "list", "--routes", &manifest, "--json"]);
    let items: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(items.as_array().map(Vec::len), Some(3));
}

#[test]
fn test_match_found_text() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(&dir);
    let (outcome, out) = run(&[
        "kvolt-routes",
        "match",
        "--routes",
        &manifest,
        "GET",
        "/static/css/a.css",
    ]);
    assert_eq!(outcome.unwrap(), Outcome::Success);
    assert!(out.contains("handler: serve_static"));
    assert!(out.contains("filepath = css/a.css"));
}

#[test]
fn test_match_found_json() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(&dir);
    let (_, out) = run(&[
        "kvolt-routes",
        "match",
        "--routes",
        &manifest,
        "GET",
        "/users/42",
        "--json",
    ]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["found"], true);
    assert_eq!(value["handler"], "get_user");
    assert_eq!(value["params"][0]["name"], "id");
    assert_eq!(value["params"][0]["value"], "42");
}

#[test]
fn test_match_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(&dir);
    let (outcome, out) = run(&[
        "kvolt-routes",
        "match",
        "--routes",
        &manifest,
        "POST",
        "/users/42",
    ]);
    assert_eq!(outcome.unwrap(), Outcome::NoMatch);
    assert_eq!(out.trim(), "no route for POST /users/42");
}

#[test]
fn test_match_rejects_invalid_method() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(&dir);
    let (outcome, _) = run(&[
        "kvolt-routes",
        "match",
        "--routes",
        &manifest,
        "GE T",
        "/users/42",
    ]);
    assert!(outcome.is_err());
}
