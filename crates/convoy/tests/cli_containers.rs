//! Integration tests for `convoy containers`.

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::{Value, json};

use common::{TestHome, authorized, json_body, serve, unauthorized};

fn main_team_containers() -> Value {
    json!([
        {
            "id": "handle-1",
            "worker_name": "worker-name-1",
            "pipeline_name": "pipeline-name",
            "type": "check",
            "resource_name": "git-repo"
        },
        {
            "id": "early-handle",
            "worker_name": "worker-name-1",
            "pipeline_name": "pipeline-name",
            "job_name": "job-name-1",
            "build_name": "3",
            "build_id": 123,
            "type": "get",
            "step_name": "git-repo",
            "attempt": "1.5"
        },
        {
            "id": "other-handle",
            "worker_name": "worker-name-2",
            "pipeline_name": "pipeline-name",
            "job_name": "job-name-2",
            "build_name": "2",
            "build_id": 122,
            "type": "task",
            "step_name": "unit-tests",
            "attempt": "1"
        },
        {
            "id": "post-handle",
            "worker_name": "worker-name-3",
            "build_id": 142,
            "type": "task",
            "step_name": "one-off"
        }
    ])
}

fn other_team_containers() -> Value {
    json!([
        {
            "id": "z-handle",
            "worker_name": "worker-name-4",
            "pipeline_name": "other-pipeline",
            "job_name": "deploy",
            "build_name": "9",
            "build_id": 900,
            "type": "put",
            "step_name": "release",
            "attempt": "1",
            "state": "created"
        },
        {
            "id": "a-handle",
            "worker_name": "worker-name-4",
            "type": "check",
            "resource_name": "version"
        }
    ])
}

/// Fake service with teams `main`, `empty` and `other`.
fn containers_service(teams: HashMap<&'static str, Value>) -> String {
    let listing = Arc::new(teams);

    let router = Router::new()
        .route(
            "/api/v1/teams",
            get(|headers: HeaderMap| async move {
                if !authorized(&headers) {
                    return unauthorized();
                }
                json_body(
                    json!([
                        {"id": 1, "name": "main"},
                        {"id": 2, "name": "empty"},
                        {"id": 3, "name": "other"}
                    ])
                    .to_string(),
                )
            }),
        )
        .route(
            "/api/v1/teams/{team}/containers",
            get(move |Path(team): Path<String>, headers: HeaderMap| {
                let listing = Arc::clone(&listing);
                async move {
                    if !authorized(&headers) {
                        return unauthorized();
                    }
                    match listing.get(team.as_str()) {
                        Some(body) => json_body(body.to_string()),
                        None => (StatusCode::NOT_FOUND, "no such team").into_response(),
                    }
                }
            }),
        );

    serve(router)
}

fn default_teams() -> HashMap<&'static str, Value> {
    HashMap::from([
        ("main", main_team_containers()),
        ("empty", json!([])),
        ("other", other_team_containers()),
    ])
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn assert_success(output: &std::process::Output) {
    assert!(
        output.status.success(),
        "convoy containers failed with exit code {:?}. stderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_table_rows_are_sorted() {
    let home = TestHome::new(&containers_service(default_teams()));
    let output = home.convoy().arg("containers").output().unwrap();
    assert_success(&output);

    let stdout = stdout_of(&output);
    let rows: Vec<&str> = stdout
        .lines()
        .filter(|line| line.contains("handle") && line.contains("worker-name"))
        .collect();
    let handles: Vec<&str> = rows
        .iter()
        .map(|row| {
            row.trim_start_matches('│')
                .split('│')
                .next()
                .unwrap()
                .trim()
        })
        .collect();

    assert_eq!(
        handles,
        vec!["early-handle", "handle-1", "other-handle", "post-handle"]
    );
}

#[test]
fn test_table_substitutes_missing_values() {
    let home = TestHome::new(&containers_service(default_teams()));
    let output = home.convoy().arg("containers").output().unwrap();
    assert_success(&output);

    let stdout = stdout_of(&output);
    let post = stdout
        .lines()
        .find(|line| line.contains("post-handle"))
        .expect("post-handle row");
    let cells: Vec<&str> = post
        .trim_matches('│')
        .split('│')
        .map(str::trim)
        .collect();

    assert_eq!(
        cells,
        vec![
            "post-handle",
            "worker-name-3",
            "none",
            "none",
            "none",
            "142",
            "task",
            "one-off",
            "n/a"
        ]
    );

    let header = stdout.lines().nth(1).expect("header row");
    for label in [
        "handle", "worker", "pipeline", "job", "build #", "build id", "type", "name", "attempt",
    ] {
        assert!(header.contains(label), "header missing {}: {}", label, header);
    }
}

#[test]
fn test_json_output_matches_service_response() {
    let home = TestHome::new(&containers_service(default_teams()));
    let output = home.convoy().args(["containers", "--json"]).output().unwrap();
    assert_success(&output);

    let printed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed, main_team_containers());
}

#[test]
fn test_team_flag_selects_team() {
    let home = TestHome::new(&containers_service(default_teams()));
    let output = home
        .convoy()
        .args(["containers", "--team", "other", "--json"])
        .output()
        .unwrap();
    assert_success(&output);

    let printed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed, other_team_containers());
}

#[test]
fn test_all_teams_concatenates_in_team_order() {
    let home = TestHome::new(&containers_service(default_teams()));
    let output = home
        .convoy()
        .args(["containers", "--all-teams", "--json"])
        .output()
        .unwrap();
    assert_success(&output);

    let mut expected = main_team_containers().as_array().unwrap().clone();
    expected.extend(other_team_containers().as_array().unwrap().iter().cloned());

    let printed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed, Value::Array(expected));
}

#[test]
fn test_all_teams_table_includes_every_team() {
    let home = TestHome::new(&containers_service(default_teams()));
    let output = home
        .convoy()
        .args(["containers", "--all-teams"])
        .output()
        .unwrap();
    assert_success(&output);

    let stdout = stdout_of(&output);
    let a = stdout.find("a-handle").expect("a-handle row");
    let early = stdout.find("early-handle").expect("early-handle row");
    let z = stdout.find("z-handle").expect("z-handle row");
    assert!(a < early && early < z);
}

#[test]
fn test_empty_listing_prints_header() {
    let home = TestHome::new(&containers_service(default_teams()));
    let output = home
        .convoy()
        .args(["containers", "--team", "empty"])
        .output()
        .unwrap();
    assert_success(&output);
    let stdout = stdout_of(&output);
    assert_eq!(stdout.lines().count(), 4);
    assert!(stdout.contains("handle"));

    let output = home
        .convoy()
        .args(["containers", "--team", "empty", "--json"])
        .output()
        .unwrap();
    assert_success(&output);
    let printed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed, json!([]));
}

#[test]
fn test_server_error_exits_one_with_empty_stdout() {
    let router = Router::new().route(
        "/api/v1/teams/{team}/containers",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database on fire").into_response() }),
    );
    let home = TestHome::new(&serve(router));

    let output = home.convoy().arg("containers").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "stdout: {}", stdout_of(&output));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unexpected Response"), "stderr: {}", stderr);
    assert!(stderr.contains("500"), "stderr: {}", stderr);
    assert!(stderr.contains("database on fire"), "stderr: {}", stderr);
}

#[test]
fn test_failure_in_one_team_prints_nothing() {
    let router = Router::new()
        .route(
            "/api/v1/teams",
            get(|| async {
                json_body(json!([{"name": "main"}, {"name": "broken"}]).to_string())
            }),
        )
        .route(
            "/api/v1/teams/{team}/containers",
            get(|Path(team): Path<String>| async move {
                let response: Response = if team == "main" {
                    json_body(main_team_containers().to_string())
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
                };
                response
            }),
        );
    let home = TestHome::new(&serve(router));

    let output = home
        .convoy()
        .args(["containers", "--all-teams", "--json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_unknown_target_fails_before_any_request() {
    let home = TestHome::new("http://127.0.0.1:9");
    let output = home
        .convoy()
        .args(["-t", "nope", "containers"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown target 'nope'"), "stderr: {}", stderr);
}
