use clap::{Arg, ArgAction, Command};

use convoy_protocol::JobFlag;

fn job_arg(help: &'static str) -> Arg {
    Arg::new("job")
        .short('j')
        .long("job")
        .value_name("PIPELINE/JOB")
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(JobFlag))
}

fn team_arg(help: &'static str) -> Arg {
    Arg::new("team")
        .short('n')
        .long("team")
        .value_name("TEAM")
        .help(help)
}

pub fn trigger_job_command() -> Command {
    Command::new("trigger-job")
        .about("Start a job in a pipeline")
        .arg(job_arg("Name of a job to trigger"))
        .arg(
            Arg::new("watch")
                .short('w')
                .long("watch")
                .help("Start watching the build output")
                .action(ArgAction::SetTrue),
        )
        .arg(team_arg("Trigger job for the given team"))
}

pub fn watch_command() -> Command {
    Command::new("watch")
        .about("Stream a build's output")
        .arg(job_arg("Watches builds of the given job"))
        .arg(
            Arg::new("build")
                .short('b')
                .long("build")
                .value_name("NAME")
                .help("Watches a specific build (defaults to the job's current build)"),
        )
        .arg(team_arg("Name of the team the job belongs to"))
}
