//! Simulation driver
//!
//! Runs a network month by month and reports its state around every tick.

use tracing::{debug, info, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::Network;
use crate::infrastructure::traits::Reporter;

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationOutcome {
    /// Months actually simulated
    pub months_run: u64,
    /// Registered marketers at the end of the run
    pub total_marketers: usize,
    /// Marketers whose front line is full
    pub saturated: usize,
}

/// Drives a [`Network`] through a fixed number of months.
pub struct SimulationService<R: Reporter> {
    network: Network,
    reporter: R,
}

impl<R: Reporter> SimulationService<R> {
    /// Create a new simulation service.
    pub fn new(network: Network, reporter: R) -> Self {
        Self { network, reporter }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Give back the network and reporter.
    pub fn into_parts(self) -> (Network, R) {
        (self.network, self.reporter)
    }

    /// Simulate `months` months.
    ///
    /// Each month reports the network, runs one recruitment tick, and reports
    /// the result. Zero or negative `months` runs no tick and reports the
    /// initial state once.
    #[instrument(level = "debug", skip(self))]
    pub fn run(&mut self, months: i64) -> ApplicationResult<SimulationOutcome> {
        let months = u64::try_from(months).unwrap_or(0);
        debug!(
            "run: months={}, strategy={}",
            months,
            self.network.strategy_name()
        );

        if months == 0 {
            self.reporter
                .initial_state(&self.network)
                .with_context(|| "report initial state".to_string())?;
        }

        for month in 0..months {
            self.reporter
                .month_started(month, &self.network)
                .with_context(|| format!("report start of month {month}"))?;

            self.network.recruit();

            self.reporter
                .month_completed(month, &self.network)
                .with_context(|| format!("report end of month {month}"))?;
        }

        let outcome = SimulationOutcome {
            months_run: months,
            total_marketers: self.network.len(),
            saturated: self.network.saturated_count(),
        };
        info!(
            "simulation finished after {} months: {} marketers, {} saturated",
            outcome.months_run, outcome.total_marketers, outcome.saturated
        );
        Ok(outcome)
    }
}
