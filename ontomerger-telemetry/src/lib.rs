// Copyright 2025 OntoMerger Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! OntoMerger telemetry (logging + step runtimes).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub filter: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            json: false,
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Returns `Ok(false)` when a global subscriber was already installed, so
/// tests and embedding applications can call this more than once.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)?,
    };

    let installed = if config.json {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE);
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .is_ok()
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .is_ok()
    };

    Ok(installed)
}

/// Wall-clock record of one pipeline step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRuntime {
    /// Step name
    pub step: String,
    /// When the step started
    pub started_at: DateTime<Utc>,
    /// When the step finished
    pub finished_at: DateTime<Utc>,
    /// Elapsed time measured on the monotonic clock
    pub elapsed_seconds: f64,
}

/// Ordered runtime records for a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeLog {
    steps: Vec<StepRuntime>,
}

impl RuntimeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` and record how long it took under `step`.
    pub fn time<T, F>(&mut self, step: &str, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let started_at = Utc::now();
        let clock = Instant::now();
        let out = f();
        let elapsed_seconds = clock.elapsed().as_secs_f64();
        let finished_at = Utc::now();

        tracing::debug!(step = step, elapsed_seconds, "Step finished");

        self.steps.push(StepRuntime {
            step: step.to_string(),
            started_at,
            finished_at,
            elapsed_seconds,
        });
        out
    }

    pub fn steps(&self) -> &[StepRuntime] {
        &self.steps
    }

    /// Look up the first record for `step`
    pub fn get(&self, step: &str) -> Option<&StepRuntime> {
        self.steps.iter().find(|s| s.step == step)
    }

    pub fn total_seconds(&self) -> f64 {
        self.steps.iter().map(|s| s.elapsed_seconds).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
