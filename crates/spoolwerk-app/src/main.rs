// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spoolwerk: simulated print devices
//
// Entry point. Initialises logging, loads settings, registers one network
// and one USB printer, and replays a fixed session against them.

mod session;

use spoolwerk_core::SpoolConfig;
use spoolwerk_core::human_errors::humanize_error;
use spoolwerk_print::PrinterRegistry;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Spoolwerk starting");

    let config = match std::env::args().nth(1) {
        Some(path) => match SpoolConfig::load(&path) {
            Ok(config) => {
                tracing::info!(path = %path, "settings loaded");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "settings unusable, using defaults");
                SpoolConfig::default()
            }
        },
        None => SpoolConfig::default(),
    };

    let mut registry = match PrinterRegistry::new(config) {
        Ok(registry) => registry,
        Err(e) => {
            let human = humanize_error(&e);
            tracing::error!(error = %e, suggestion = %human.suggestion, "{}", human.message);
            std::process::exit(1);
        }
    };

    session::run(&mut registry).await;

    tracing::info!("Spoolwerk finished");
}
