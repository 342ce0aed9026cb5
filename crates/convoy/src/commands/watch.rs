use clap::ArgMatches;
use tracing::{error, info};

use convoy_core::{JobFlag, events, find_build};

use super::helpers;
use crate::color;

pub(crate) fn handle_watch_command(matches: &ArgMatches) -> Result<i32, Box<dyn std::error::Error>> {
    let job = matches
        .get_one::<JobFlag>("job")
        .ok_or("Job argument is required")?;
    let build_name = matches.get_one::<String>("build").map(String::as_str);
    let team = matches.get_one::<String>("team").map(String::as_str);

    info!(
        event = "cli.watch_started",
        job = %job,
        build = ?build_name,
        team = ?team
    );

    let target = helpers::load_target(matches, "cli.watch_failed")?;

    helpers::block_on(async {
        let build = match find_build(
            target.client(),
            team.unwrap_or(target.default_team()),
            &job.pipeline,
            &job.job,
            build_name,
        )
        .await
        {
            Ok(build) => build,
            Err(e) => {
                eprintln!("{}", color::error(&format!("error: {}", e)));
                error!(event = "cli.watch_failed", job = %job, error = %e);
                events::log_app_error(&e);
                return Err(e.into());
            }
        };

        helpers::watch_build(&target, job, team, build).await
    })
}
