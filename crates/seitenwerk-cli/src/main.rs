// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Seitenwerk — local-only PDF merge, split, and compression.
//
// Entry point. Initialises logging, loads configuration, builds the document
// pipeline, and runs the requested subcommand.

mod cli;
mod commands;
mod output;

use std::process::ExitCode;

use clap::Parser;
use seitenwerk_core::config::{AppConfig, default_config_path};
use seitenwerk_core::human_errors::humanize_error;
use seitenwerk_document::Pipeline;

use cli::Cli;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = AppConfig::load_or_default(&config_path);
    tracing::debug!(path = %config_path.display(), "configuration loaded");

    let pipeline = Pipeline::from_config(config);
    tracing::info!(renderer = pipeline.renderer().name(), "Seitenwerk starting");

    let operation = cli.command.operation();
    match commands::run(&pipeline, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, %operation, "operation failed");
            let human = humanize_error(operation, &err);
            eprintln!("{}", human.message);
            eprintln!("{}", human.suggestion);
            ExitCode::FAILURE
        }
    }
}
