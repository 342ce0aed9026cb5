use std::io::Write;

use clap::ArgMatches;
use tracing::{error, info};

use convoy_core::{ContainerScope, ConvoyError, events, list_containers};

use super::helpers;
use crate::color;
use crate::table::{ContainerTableFormatter, sort_rows};

pub(crate) fn handle_containers_command(
    matches: &ArgMatches,
) -> Result<i32, Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let scope = ContainerScope::from_flags(
        matches.get_one::<String>("team").map(String::as_str),
        matches.get_flag("all-teams"),
    );

    info!(
        event = "cli.containers_started",
        json_output = json_output,
        scope = ?scope
    );

    let target = helpers::load_target(matches, "cli.containers_failed")?;
    let runtime = helpers::runtime()?;

    let mut containers = match runtime.block_on(list_containers(
        target.client(),
        target.default_team(),
        &scope,
    )) {
        Ok(containers) => containers,
        Err(e) => {
            eprintln!("{}", color::error(&format!("error: {}", e)));
            error!(
                event = "cli.containers_failed",
                error_code = e.error_code(),
                error = %e
            );
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    let mut stdout = std::io::stdout().lock();
    if json_output {
        writeln!(stdout, "{}", serde_json::to_string_pretty(&containers)?)?;
    } else {
        sort_rows(&mut containers);
        ContainerTableFormatter::new(&containers).write_table(&containers, &mut stdout)?;
    }
    stdout.flush()?;

    info!(event = "cli.containers_completed", count = containers.len());
    Ok(0)
}
