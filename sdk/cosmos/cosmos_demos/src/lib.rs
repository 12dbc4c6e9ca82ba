// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Console demos for the Cosmos DB SQL API.
//!
//! Two binaries share this library: `client-demos` covers databases, containers,
//! documents and indexing, and `server-demos` covers stored procedures, triggers
//! and user-defined functions.

pub mod config;
pub mod console;
pub mod demos;
pub mod menu;
pub mod models;
pub mod scripts;
pub mod shared;
#[cfg(test)]
mod test_support;

pub use config::{Args, DemoConfig};
pub use shared::Shared;

use clap::Parser;
use std::process::ExitCode;

/// Installs the `tracing` subscriber used by both binaries.
///
/// Client logging defaults to `warn` so it doesn't interleave with demo output; `RUST_LOG` overrides it.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();
}

/// Entry point shared by both binaries: parse arguments, connect, then run `menu` on stdin/stdout.
pub async fn run_menu(menu: &menu::Menu) -> ExitCode {
    init_tracing();

    let args = Args::parse();
    let shared = match DemoConfig::from_args(&args).and_then(|config| Shared::new(&config)) {
        Ok(shared) => shared,
        Err(error) => {
            eprintln!("{}", console::error_chain(&error));
            return ExitCode::FAILURE;
        }
    };

    let stdin = std::io::stdin();
    match menu::run_loop(menu, &shared, stdin.lock(), std::io::stdout()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", console::error_chain(&error));
            ExitCode::FAILURE
        }
    }
}
