//! Watch session: follow a build's event stream until it finishes or the
//! operator detaches.
//!
//! The session races the renderer against a [`CancellationToken`]. The
//! token is armed by the caller (see [`arm_interrupt_listener`]) before the
//! session opens the stream, so no interrupt between the two is lost.
//! Whichever completes first decides the outcome:
//!
//! - renderer first: [`WatchOutcome::Completed`] with the renderer's code,
//!   and the stream is closed
//! - token first: [`WatchOutcome::Detached`], a re-attach notice is written,
//!   and the in-flight render is dropped

mod interrupt;

pub use interrupt::arm_interrupt_listener;

use std::io::Write;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use convoy_protocol::Build;

use crate::api::{ApiError, BuildEvents, FleetApi};

/// Exit code reserved for a user-initiated detach.
pub const DETACH_EXIT_CODE: i32 = 2;

/// Consumes a build's events and reports the build's final status.
///
/// Implementations must write each event as it arrives; the call can be
/// abandoned at any await point. Output must be written asynchronously: a
/// blocking write on a stalled consumer would keep the session from ever
/// seeing cancellation.
#[async_trait]
pub trait Renderer: Send {
    async fn render(&mut self, events: &mut dyn BuildEvents) -> i32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Idle,
    Streaming,
    Completed(i32),
    Detached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    Completed { exit_code: i32 },
    Detached,
}

impl WatchOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            WatchOutcome::Completed { exit_code } => *exit_code,
            WatchOutcome::Detached => DETACH_EXIT_CODE,
        }
    }
}

pub struct WatchSession {
    target: String,
    pipeline: String,
    job: String,
    build: Build,
    team: Option<String>,
    cancel: CancellationToken,
    state: WatchState,
}

impl WatchSession {
    pub fn new(
        target: impl Into<String>,
        pipeline: impl Into<String>,
        job: impl Into<String>,
        build: Build,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            target: target.into(),
            pipeline: pipeline.into(),
            job: job.into(),
            build,
            team: None,
            cancel,
            state: WatchState::Idle,
        }
    }

    /// Record the team the build was looked up under when it was not the
    /// target's default, so the re-attach command finds the same build.
    pub fn with_team(mut self, team: Option<&str>) -> Self {
        self.team = team.map(str::to_string);
        self
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    pub fn build(&self) -> &Build {
        &self.build
    }

    /// Command that re-attaches to this build from another shell.
    pub fn reattach_command(&self) -> String {
        let mut command = format!(
            "convoy -t {} watch -j {}/{} -b {}",
            self.target, self.pipeline, self.job, self.build.name
        );
        if let Some(team) = &self.team {
            command.push_str(&format!(" -n {}", team));
        }
        command
    }

    /// Run the session to a terminal state.
    ///
    /// Fails only when the event stream cannot be opened. The detach notice
    /// is written to `err`.
    pub async fn run<A, R, W>(
        &mut self,
        api: &A,
        renderer: &mut R,
        err: &mut W,
    ) -> Result<WatchOutcome, ApiError>
    where
        A: FleetApi,
        R: Renderer + ?Sized,
        W: Write + Send,
    {
        if self.state != WatchState::Idle {
            return Err(ApiError::InvalidRequest {
                message: "watch session has already run".to_string(),
            });
        }

        let build_id = self.build.event_stream_id();
        info!(
            event = "core.watch.session_started",
            build_id = %build_id,
            build_name = %self.build.name
        );

        let opened = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            opened = api.build_events(&build_id) => Some(opened),
        };
        let mut events = match opened {
            Some(opened) => opened?,
            None => return Ok(self.detach(err)),
        };

        self.state = WatchState::Streaming;

        let rendered = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            code = renderer.render(events.as_mut()) => Some(code),
        };

        match rendered {
            Some(exit_code) => {
                events.close();
                self.state = WatchState::Completed(exit_code);
                info!(
                    event = "core.watch.session_completed",
                    build_id = %build_id,
                    exit_code = exit_code
                );
                Ok(WatchOutcome::Completed { exit_code })
            }
            None => Ok(self.detach(err)),
        }
    }

    fn detach<W: Write>(&mut self, err: &mut W) -> WatchOutcome {
        self.state = WatchState::Detached;
        info!(
            event = "core.watch.session_detached",
            build_id = self.build.id,
            build_name = %self.build.name
        );

        let notice = format!(
            "\ndetached, build is still running...\nre-attach to it with:\n\n    {}\n\n",
            self.reattach_command()
        );
        if let Err(e) = err.write_all(notice.as_bytes()).and_then(|_| err.flush()) {
            warn!(event = "core.watch.detach_notice_failed", error = %e);
        }

        WatchOutcome::Detached
    }
}
