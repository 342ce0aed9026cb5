//! Shared fixtures for CLI integration tests: a fake orchestration service
//! served by axum on a background thread, and a throwaway HOME holding the
//! targets file that points at it.

#![allow(dead_code)]

use std::convert::Infallible;
use std::path::Path;
use std::process::Command;

use axum::Router;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use futures::stream::{self, Stream, StreamExt};
use tempfile::TempDir;

pub const TOKEN: &str = "secret-token";
pub const TARGET: &str = "test";

/// Serve `router` on 127.0.0.1 and return its base URL.
pub fn serve(router: Router) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    listener
        .set_nonblocking(true)
        .expect("set listener non-blocking");
    let addr = listener.local_addr().expect("listener address");

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("build test server runtime");
        runtime.block_on(async move {
            let listener =
                tokio::net::TcpListener::from_std(listener).expect("adopt test listener");
            axum::serve(listener, router).await.expect("serve test router");
        });
    });

    format!("http://{}", addr)
}

/// Whether a request carries the bearer token written to the targets file.
pub fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN))
}

pub fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, "not authorized").into_response()
}

/// JSON response with a raw body, so tests control the exact bytes sent.
pub fn json_body(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// One `event` message carrying a build event envelope.
pub fn build_event(kind: &str, data: serde_json::Value) -> Event {
    let envelope = serde_json::json!({ "event": kind, "version": "1.0", "data": data });
    Event::default().event("event").data(envelope.to_string())
}

pub fn end_event() -> Event {
    Event::default().event("end").data("{}")
}

/// SSE response sending `events`, then closing, or hanging open when `hang`.
pub fn event_stream(
    events: Vec<Event>,
    hang: bool,
) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static> {
    let sent = stream::iter(events.into_iter().map(Ok::<_, Infallible>));
    let tail = if hang {
        stream::pending().boxed()
    } else {
        stream::empty().boxed()
    };
    Sse::new(sent.chain(tail))
}

/// A HOME directory whose `~/.convoy/targets.toml` selects the fake service.
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new(api: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp home");
        let convoy_dir = dir.path().join(".convoy");
        std::fs::create_dir_all(&convoy_dir).expect("create .convoy dir");
        std::fs::write(
            convoy_dir.join("targets.toml"),
            format!(
                "default_target = \"{TARGET}\"\n\n[targets.{TARGET}]\napi = \"{api}\"\nteam = \"main\"\ntoken = \"{TOKEN}\"\n"
            ),
        )
        .expect("write targets.toml");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `convoy` with HOME and the working directory set to this home.
    pub fn convoy(&self) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_convoy"));
        command
            .env("HOME", self.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .current_dir(self.path());
        command
    }
}
