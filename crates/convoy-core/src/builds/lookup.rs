use tracing::info;

use convoy_protocol::Build;

use super::errors::BuildError;
use crate::api::{FleetApi, TeamApi};

/// Find the build `watch` should follow.
///
/// With a build name that build is fetched. Without one the job's pending
/// or running build is used, falling back to its last finished build.
pub async fn find_build<A: FleetApi>(
    api: &A,
    team: &str,
    pipeline: &str,
    job: &str,
    build_name: Option<&str>,
) -> Result<Build, BuildError> {
    let team = api.team(team);

    let build = match build_name {
        Some(name) => team.job_build(pipeline, job, name).await?,
        None => team
            .job(pipeline, job)
            .await?
            .current_build()
            .cloned()
            .ok_or_else(|| BuildError::NoBuilds {
                pipeline: pipeline.to_string(),
                job: job.to_string(),
            })?,
    };

    info!(
        event = "core.build.lookup_completed",
        team = team.name(),
        build_id = build.id,
        build_name = %build.name
    );
    Ok(build)
}
