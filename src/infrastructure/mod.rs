//! Infrastructure layer: I/O boundary traits and their implementations

pub mod traits;

pub use traits::{banner, OutputFormat, Reporter, TextReporter};
