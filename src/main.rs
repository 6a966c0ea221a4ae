use KiNet::cli::cli_main::run_interactive;
use KiNet::settings::{SETTINGS_FILE, Settings};
use log::error;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::Path;
use std::process;

pub fn main() {
    let settings_path = Path::new(SETTINGS_FILE);
    let settings = match Settings::load_or_create(settings_path) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let level = settings.level_filter().unwrap_or(log::LevelFilter::Info);
    if let Err(e) = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)
    {
        eprintln!("logger was not initialised: {}", e);
    }

    if let Err(e) = run_interactive(&settings) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
