use convoy_core::init_logging;

mod app;
pub(crate) mod color;
mod commands;
mod render;
mod table;

fn main() {
    let app = app::build_cli();
    let matches = app.get_matches();

    // Handle --no-color before any output
    if matches.get_flag("no-color") {
        color::set_no_color();
    }

    let verbose = matches.get_flag("verbose");
    let quiet = !verbose;
    init_logging(quiet);

    match commands::run_command(&matches) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            // Error already printed to user via eprintln! in command handlers.
            drop(e);
            std::process::exit(1);
        }
    }
}
