//! mlmsim: month-by-month simulation of recruiting networks
//!
//! Every marketer recruits a front line until its quota is met; each month
//! all marketers that existed at the start of the month recruit once, so the
//! network grows breadth-first.
//!
//! # Architecture
//!
//! - [`domain`]: marketers, the arena-backed recruiting tree, the network
//!   registry and recruiting strategies (no I/O)
//! - [`application`]: the simulation driver
//! - [`infrastructure`]: the reporting boundary
//! - [`config`]: layered settings
//! - [`cli`]: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
