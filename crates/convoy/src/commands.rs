use clap::ArgMatches;
use tracing::error;

use convoy_core::events;

mod containers;
mod helpers;
mod trigger_job;
mod watch;

use containers::handle_containers_command;
use trigger_job::handle_trigger_job_command;
use watch::handle_watch_command;

/// Dispatch a parsed command line. `Ok` carries the process exit code.
pub fn run_command(matches: &ArgMatches) -> Result<i32, Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        Some(("trigger-job", sub_matches)) => handle_trigger_job_command(sub_matches),
        Some(("watch", sub_matches)) => handle_watch_command(sub_matches),
        Some(("containers", sub_matches)) => handle_containers_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
