//! Terminal rendering of a build's event stream.
//!
//! Output goes through an async writer so a stalled consumer (a paused
//! pager, a full pipe) parks the render future instead of the runtime
//! thread, and an interrupt can still detach.

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::warn;

use convoy_core::{BuildEvent, BuildEvents, BuildStatus, Renderer, StreamError};

/// Returned when the stream breaks or ends without a terminal status.
pub const STREAM_FAILURE_EXIT_CODE: i32 = 255;

/// Exit code for a terminal build status. `None` while the build is live.
///
/// 2 belongs to detach, so errored builds use 3.
pub fn status_exit_code(status: BuildStatus) -> Option<i32> {
    match status {
        BuildStatus::Succeeded => Some(0),
        BuildStatus::Failed => Some(1),
        BuildStatus::Errored => Some(3),
        BuildStatus::Aborted => Some(4),
        _ => None,
    }
}

/// Writes build output to a terminal, one event at a time.
pub struct TerminalRenderer<W> {
    out: W,
}

impl<W: AsyncWrite + Unpin + Send> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    /// Render one event. `Some(code)` once the build reached a terminal status.
    async fn render_event(&mut self, event: BuildEvent) -> std::io::Result<Option<i32>> {
        let mut finished = None;
        let text = match event {
            BuildEvent::Log { payload, .. } => Some(payload),
            BuildEvent::SelectedWorker { worker } => Some(format!(
                "{}\n",
                crate::color::muted(&format!("selected worker: {}", worker))
            )),
            BuildEvent::InitializeTask { .. } => {
                Some(format!("{}\n", crate::color::bold("initializing")))
            }
            BuildEvent::Error { message, .. } => {
                Some(format!("{}\n", crate::color::failure(&message)))
            }
            BuildEvent::Status { status, .. } => status_exit_code(status).map(|code| {
                finished = Some(code);
                format!("{}\n", crate::color::build_status(&status.to_string()))
            }),
            BuildEvent::Finish { .. } | BuildEvent::Other { .. } => None,
        };
        if let Some(text) = text {
            self.out.write_all(text.as_bytes()).await?;
            self.out.flush().await?;
        }
        Ok(finished)
    }

    async fn render_failure(&mut self, message: &str) -> i32 {
        let line = format!("{}\n", crate::color::failure(message));
        let written = match self.out.write_all(line.as_bytes()).await {
            Ok(()) => self.out.flush().await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            warn!(event = "cli.render.write_failed", error = %e);
        }
        STREAM_FAILURE_EXIT_CODE
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> Renderer for TerminalRenderer<W> {
    async fn render(&mut self, events: &mut dyn BuildEvents) -> i32 {
        while let Some(next) = events.next_event().await {
            match next {
                Ok(event) => match self.render_event(event).await {
                    Ok(Some(code)) => return code,
                    Ok(None) => {}
                    Err(e) => {
                        warn!(event = "cli.render.write_failed", error = %e);
                        return STREAM_FAILURE_EXIT_CODE;
                    }
                },
                Err(StreamError::Decode(message)) => {
                    warn!(event = "cli.render.decode_failed", error = %message);
                    return self
                        .render_failure(&format!("failed to parse next event: {}", message))
                        .await;
                }
                Err(e) => {
                    warn!(event = "cli.render.stream_failed", error = %e);
                    return self
                        .render_failure(&format!("stream ended without a build status: {}", e))
                        .await;
                }
            }
        }
        self.render_failure("stream ended without a build status").await
    }
}
