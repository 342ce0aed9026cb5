mod builds;
mod containers;
mod global;


use clap::Command;

pub fn build_cli() -> Command {
    global::root_command()
        .subcommand(builds::trigger_job_command())
        .subcommand(builds::watch_command())
        .subcommand(containers::containers_command())
}
