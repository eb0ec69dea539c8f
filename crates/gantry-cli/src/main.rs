//! gantry CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use gantry_cli::{Args, error_adapter::to_reportables};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Unrecognized log level '{}', defaulting to 'warn'.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting gantry");
    debug!(args:?; "Arguments");

    if let Err(err) = gantry_cli::run(&args) {
        let reporter = miette::GraphicalReportHandler::new();

        // One report per diagnostic, so every problem gets its own excerpt
        for reportable in to_reportables(err.inner()) {
            let mut writer = String::new();
            reporter
                .render_report(&mut writer, &reportable)
                .expect("String formatting cannot fail");

            error!("{writer}");
        }

        process::exit(err.exit_code());
    }

    info!("Finished");
}
