use std::future::Future;

use clap::ArgMatches;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use convoy_core::{Build, JobFlag, Target, WatchSession, arm_interrupt_listener, events};

use crate::color;
use crate::render::TerminalRenderer;

/// Resolve the `-t/--target` selection, printing the reason on failure.
pub fn load_target(
    matches: &ArgMatches,
    failed_event: &'static str,
) -> Result<Target, Box<dyn std::error::Error>> {
    let name = matches.get_one::<String>("target").map(String::as_str);
    match Target::load(name) {
        Ok(target) => Ok(target),
        Err(e) => {
            eprintln!("{}", color::error(&format!("error: {}", e)));
            error!(event = failed_event, error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

pub fn runtime() -> Result<tokio::runtime::Runtime, Box<dyn std::error::Error>> {
    tokio::runtime::Runtime::new().map_err(|e| {
        eprintln!("{}", color::error(&format!("error: failed to start runtime: {}", e)));
        error!(event = "cli.runtime.start_failed", error = %e);
        e.into()
    })
}

/// Run `work` on a fresh runtime.
///
/// The runtime is shut down without waiting on blocking tasks: after a
/// detach, a stdout write can stay parked on a pipe nobody drains.
pub fn block_on<F>(work: F) -> Result<i32, Box<dyn std::error::Error>>
where
    F: Future<Output = Result<i32, Box<dyn std::error::Error>>>,
{
    let runtime = runtime()?;
    let result = runtime.block_on(work);
    runtime.shutdown_background();
    result
}

/// Follow `build` until it finishes or the operator detaches.
///
/// Returns the renderer's exit code, or the detach code.
pub async fn watch_build(
    target: &Target,
    job: &JobFlag,
    team: Option<&str>,
    build: Build,
) -> Result<i32, Box<dyn std::error::Error>> {
    let cancel = CancellationToken::new();
    if let Err(e) = arm_interrupt_listener(cancel.clone()) {
        eprintln!("{}", color::error(&format!("error: cannot listen for interrupts: {}", e)));
        error!(event = "cli.watch.signal_setup_failed", error = %e);
        return Err(e.into());
    }

    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;

    let mut session = WatchSession::new(target.name(), &job.pipeline, &job.job, build, cancel)
        .with_team(team);
    let mut renderer = TerminalRenderer::new(stdout);
    let mut stderr = std::io::stderr();

    match session
        .run(target.client(), &mut renderer, &mut stderr)
        .await
    {
        Ok(outcome) => {
            info!(
                event = "cli.watch.session_finished",
                outcome = ?outcome,
                exit_code = outcome.exit_code()
            );
            Ok(outcome.exit_code())
        }
        Err(e) => {
            eprintln!("{}", color::error(&format!("error: {}", e)));
            error!(event = "cli.watch.stream_open_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
