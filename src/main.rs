use clap::Parser;
use daybook::cli::commands::Cli;
use daybook::cli::handlers;
use daybook::cli::settings::{self, Settings};
use daybook::logging;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(&settings::log_config(&cli.global)) {
        eprintln!("warning: logging disabled: {}", e);
    }

    let settings = match Settings::resolve(&cli.global) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        None => {
            // No subcommand → launch TUI
            if let Err(e) = daybook::tui::run(&settings) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(command) => {
            if let Err(e) = handlers::dispatch(command, &settings) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
