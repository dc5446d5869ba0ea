use anyhow::Result;
use std::io;
use std::process;
use log::error;

use cerberus::{app, cli, logging};

fn main() {
    if let Err(e) = run() {
        error!("Application error: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = cli::parse_args();
    cli::validate_args(&args)?;

    let config_manager = app::load_configuration(&args)?;

    let log_config = app::configure_logging(&args, &config_manager)?;
    logging::init_logger(log_config)?;

    let today = chrono::Local::now().date_naive();
    let settings = app::report_settings(&args, &config_manager, today)?;
    let colours = app::create_colour_manager(&args, &config_manager)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    app::run_report(&args, &config_manager, &colours, &settings, &mut out)
}
