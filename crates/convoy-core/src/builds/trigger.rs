use std::io::Write;

use tracing::{error, info, warn};

use convoy_protocol::Build;

use super::errors::BuildError;
use crate::api::{FleetApi, TeamApi};

/// Printed when a trigger fails and no `--team` was given.
pub const TEAM_HINT: &str = "hint: are you missing '--team' to specify the team for the build?";

/// Create a new build of `pipeline/job`.
///
/// The build runs under `team_override` when given, else under
/// `default_team`. On success `started <pipeline>/<job> #<name>` is written
/// to `out`. On failure without an override the team hint is written to
/// `out` first, then the API error is returned untouched.
pub async fn trigger_build<A, W>(
    api: &A,
    default_team: &str,
    pipeline: &str,
    job: &str,
    team_override: Option<&str>,
    out: &mut W,
) -> Result<Build, BuildError>
where
    A: FleetApi,
    W: Write + Send,
{
    let team = api.team(team_override.unwrap_or(default_team));

    info!(
        event = "core.build.trigger_started",
        team = team.name(),
        pipeline = pipeline,
        job = job
    );

    let build = match team.create_job_build(pipeline, job).await {
        Ok(build) => build,
        Err(e) => {
            error!(
                event = "core.build.trigger_failed",
                team = team.name(),
                pipeline = pipeline,
                job = job,
                error = %e
            );
            if team_override.is_none()
                && let Err(write_err) = writeln!(out, "{}", TEAM_HINT).and_then(|_| out.flush())
            {
                warn!(event = "core.build.team_hint_failed", error = %write_err);
            }
            return Err(e.into());
        }
    };

    writeln!(out, "started {}/{} #{}", pipeline, job, build.name)?;
    out.flush()?;

    info!(
        event = "core.build.trigger_completed",
        team = team.name(),
        build_id = build.id,
        build_name = %build.name
    );

    Ok(build)
}
