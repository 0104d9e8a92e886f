// ABOUTME: Siccus CLI - command-line front end to the progression engine
// ABOUTME: Computes summaries, reconciles backend payloads and clamps percentages as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Siccus Contributors
//!
//! Usage:
//! ```bash
//! # Progress summary for 1450 XP at the default 100 XP per level
//! siccus-cli summary --xp 1450 --energy 85 --health 92
//!
//! # Validate a backend summary payload and list drifted fields
//! siccus-cli reconcile --payload '{"xpTotal": 1450, "nivel": 12}'
//!
//! # Refuse drifted payloads instead of recomputing them
//! siccus-cli reconcile --strict --payload -  < summary.json
//!
//! # Predict a mission completion
//! siccus-cli project --xp 180 --mission-xp 120
//!
//! # XP needed to reach level 10
//! siccus-cli threshold 10
//!
//! # Clamp a raw percentage for a progress bar
//! siccus-cli clamp 140
//! ```

mod commands;

use clap::{Parser, Subcommand};
use siccus::constants::service_names;
use siccus::errors::{AppResult, ErrorResponse};
use siccus::logging::LoggingConfig;
use siccus::progression::ProgressionConfig;
use std::env;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "siccus-cli",
    about = "Siccus progression CLI",
    long_about = "Command-line front end to the Siccus XP leveling engine. Results are printed as JSON on stdout; logs go to stderr."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Compute the progress report for an XP total
    Summary {
        /// Cumulative XP total
        #[arg(long, allow_negative_numbers = true)]
        xp: i64,

        /// XP cost of one level (defaults to SICCUS_XP_PER_LEVEL or 100)
        #[arg(long, allow_negative_numbers = true)]
        xp_per_level: Option<i64>,

        /// Raw energy value
        #[arg(long, allow_negative_numbers = true)]
        energy: Option<f64>,

        /// Raw health value
        #[arg(long, allow_negative_numbers = true)]
        health: Option<f64>,
    },

    /// Validate and recompute a backend summary payload
    Reconcile {
        /// JSON payload, or `-` to read it from stdin
        #[arg(long)]
        payload: String,

        /// Reject payloads whose derived fields disagree with xpTotal
        #[arg(long)]
        strict: bool,
    },

    /// Predict the summary after completing a mission
    Project {
        /// Current XP total
        #[arg(long, allow_negative_numbers = true)]
        xp: i64,

        /// XP the mission awards
        #[arg(long)]
        mission_xp: u64,

        /// XP cost of one level (defaults to SICCUS_XP_PER_LEVEL or 100)
        #[arg(long, allow_negative_numbers = true)]
        xp_per_level: Option<i64>,
    },

    /// Cumulative XP at which a level starts
    Threshold {
        /// Level number, starting at 1
        level: u64,

        /// XP cost of one level (defaults to SICCUS_XP_PER_LEVEL or 100)
        #[arg(long, allow_negative_numbers = true)]
        xp_per_level: Option<i64>,
    },

    /// Clamp a raw percentage into [0, 100]
    Clamp {
        /// Raw value; omitted or NaN reads as 0
        #[arg(allow_negative_numbers = true)]
        value: Option<f64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if env::var_os("SERVICE_NAME").is_none() {
        service_names::SICCUS_CLI.clone_into(&mut logging.service_name);
    }
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else if env::var_os("RUST_LOG").is_none() {
        logging.with_level("warn")
    } else {
        logging
    };
    if let Err(e) = logging.init() {
        eprintln!("{e}");
    }

    match run(&cli.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            debug!(code = ?error.code, "Command failed");
            let response = ErrorResponse::from(error);
            match serde_json::to_string_pretty(&response) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("{}", response.error.message),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: &Command) -> AppResult<String> {
    let config = ProgressionConfig::from_env()?;

    let output = match command {
        Command::Summary {
            xp,
            xp_per_level,
            energy,
            health,
        } => serde_json::to_value(commands::summary(
            &config,
            *xp,
            *xp_per_level,
            *energy,
            *health,
        )?)?,
        Command::Reconcile { payload, strict } => {
            serde_json::to_value(commands::reconcile(&config, payload, *strict)?)?
        }
        Command::Project {
            xp,
            mission_xp,
            xp_per_level,
        } => serde_json::to_value(commands::project(&config, *xp, *mission_xp, *xp_per_level)?)?,
        Command::Threshold {
            level,
            xp_per_level,
        } => commands::threshold(&config, *level, *xp_per_level)?,
        Command::Clamp { value } => commands::clamp(*value),
    };

    Ok(serde_json::to_string_pretty(&output)?)
}
