use clap::{Arg, ArgAction, Command};

pub fn containers_command() -> Command {
    Command::new("containers")
        .about("Print the active containers")
        .arg(
            Arg::new("team")
                .short('n')
                .long("team")
                .value_name("TEAM")
                .help("List containers of the given team")
                .conflicts_with("all-teams"),
        )
        .arg(
            Arg::new("all-teams")
                .short('a')
                .long("all-teams")
                .help("List containers of every team you can see")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the service's response as JSON")
                .action(ArgAction::SetTrue),
        )
}
