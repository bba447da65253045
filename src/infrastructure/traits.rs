//! I/O boundary traits for testability
//!
//! The simulation reports through [`Reporter`], so services can be tested
//! with recording implementations instead of scraping stdout.

use std::io::{self, Write};

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::domain::{Network, TreeNodeConvert};

/// Receives the network state around every simulated month.
pub trait Reporter {
    /// Called once instead of the monthly hooks when no month is simulated.
    fn initial_state(&mut self, network: &Network) -> io::Result<()>;

    /// Called before month `month` (0-based) recruits.
    fn month_started(&mut self, month: u64, network: &Network) -> io::Result<()>;

    /// Called after month `month` (0-based) recruited.
    fn month_completed(&mut self, month: u64, network: &Network) -> io::Result<()>;
}

/// How a network is rendered in reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every marketer with its front line, in registry order
    #[default]
    Summary,
    /// Recruiting tree from the root
    Tree,
}

/// Banner line separating months.
pub fn banner() -> String {
    "=".repeat(80)
}

/// Plain-text reporter writing to any `Write` (stdout in production).
pub struct TextReporter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&self, network: &Network) -> String {
        match self.format {
            OutputFormat::Summary => network.to_string(),
            OutputFormat::Tree => format!(
                "Total marketers {}.\n{}",
                network.len(),
                network.to_tree_string()
            ),
        }
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn initial_state(&mut self, network: &Network) -> io::Result<()> {
        let rendered = self.render(network);
        writeln!(self.out, "{}\n", banner().cyan())?;
        writeln!(self.out, "Month 0: {}", rendered)?;
        self.out.flush()
    }

    fn month_started(&mut self, month: u64, network: &Network) -> io::Result<()> {
        let rendered = self.render(network);
        writeln!(self.out, "{}\n", banner().cyan())?;
        writeln!(self.out, "Month {}: {}", month, rendered)
    }

    fn month_completed(&mut self, _month: u64, network: &Network) -> io::Result<()> {
        let rendered = self.render(network);
        writeln!(
            self.out,
            "\tRecruiting complete. Updated status for month: {}",
            rendered
        )?;
        self.out.flush()
    }
}
