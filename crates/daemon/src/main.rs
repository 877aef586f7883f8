// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hopper Daemon (hopperd)
//!
//! Watches a directory for command files and runs the named jobs on a
//! bounded pool of worker processes while CPU and memory stay below a
//! threshold.
//!
//! Architecture:
//! - Intake Task: polls the watched directory, queues new files
//! - Dispatcher Task: parses queued commands, starts and stops jobs

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod env;
mod lifecycle;
mod logging;

use tracing::{error, info};

use crate::lifecycle::Config;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle info flags before touching the watched directory or log file
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("hopperd {VERSION}");
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("hopperd {VERSION}");
                println!("Hopper Daemon - runs jobs requested through command files");
                println!();
                println!("USAGE:");
                println!("    hopperd");
                println!();
                println!("Drop a file containing `start <group> <job>` or `stop <group> <job>`");
                println!("into the watched directory. Configuration is read from HOPPER_*");
                println!("environment variables.");
                println!();
                println!("OPTIONS:");
                println!("    -h, --help       Print help information");
                println!("    -v, --version    Print version information");
                return Ok(());
            }
            _ => {
                eprintln!("error: unexpected argument '{arg}'");
                eprintln!("Usage: hopperd [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let config = Config::load();

    logging::rotate_log_if_needed(&config.log_path);
    let log_guard = logging::setup_logging(&config.log_path)?;

    info!(version = VERSION, "Starting hopper daemon");

    let result = lifecycle::run(&config).await;
    if let Err(e) = &result {
        error!(error = %e, "service terminated");
    }

    // Flush buffered log lines before exit
    drop(log_guard);
    result.map_err(Into::into)
}
