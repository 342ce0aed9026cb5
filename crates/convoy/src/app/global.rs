use clap::{Arg, ArgAction, Command};

pub fn root_command() -> Command {
    Command::new("convoy")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Trigger builds, watch them live, and inspect containers on a build orchestration service")
        .arg(
            Arg::new("target")
                .short('t')
                .long("target")
                .value_name("NAME")
                .help("Target from ~/.convoy/targets.toml (defaults to default_target)")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable colored output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
}
