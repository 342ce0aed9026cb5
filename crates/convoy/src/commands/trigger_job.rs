use clap::ArgMatches;
use tracing::{error, info};

use convoy_core::{JobFlag, events, trigger_build};

use super::helpers;
use crate::color;

pub(crate) fn handle_trigger_job_command(
    matches: &ArgMatches,
) -> Result<i32, Box<dyn std::error::Error>> {
    let job = matches
        .get_one::<JobFlag>("job")
        .ok_or("Job argument is required")?;
    let team = matches.get_one::<String>("team").map(String::as_str);
    let watch = matches.get_flag("watch");

    info!(
        event = "cli.trigger_job_started",
        job = %job,
        team = ?team,
        watch = watch
    );

    let target = helpers::load_target(matches, "cli.trigger_job_failed")?;

    helpers::block_on(async {
        let mut stdout = std::io::stdout();
        let build = match trigger_build(
            target.client(),
            target.default_team(),
            &job.pipeline,
            &job.job,
            team,
            &mut stdout,
        )
        .await
        {
            Ok(build) => build,
            Err(e) => {
                eprintln!("{}", color::error(&format!("error: {}", e)));
                error!(event = "cli.trigger_job_failed", job = %job, error = %e);
                events::log_app_error(&e);
                return Err(e.into());
            }
        };

        info!(
            event = "cli.trigger_job_completed",
            job = %job,
            build_id = build.id,
            build_name = %build.name
        );

        if !watch {
            return Ok(0);
        }
        helpers::watch_build(&target, job, team, build).await
    })
}
