// ABOUTME: Structured logging setup built on tracing/tracing-subscriber
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Production logging configuration, adapted from the teacher's
//! `LoggingConfig`/`init` pair down to what this crate actually needs:
//! level and format selection via environment variables, no HTTP-specific
//! request-id plumbing.

use std::env;

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Newline-delimited JSON, for production log aggregation.
    Json,
    /// Human-readable, for local development.
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `tracing::EnvFilter` directive string, e.g. `"info"` or
    /// `"visionfit_server=debug,info"`.
    pub filter: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    /// Build from `RUST_LOG` and `LOG_FORMAT` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };
        Self { filter, format }
    }

    /// Initialize the global tracing subscriber.
    ///
    /// # Errors
    ///
    /// Returns an error if a subscriber has already been installed for this
    /// process.
    pub fn init(&self) -> Result<()> {
        let env_filter = EnvFilter::try_new(&self.filter).unwrap_or_else(|_| EnvFilter::new("info"));

        match self.format {
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().json())
                    .try_init()?;
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().pretty())
                    .try_init()?;
            }
        }
        Ok(())
    }
}
