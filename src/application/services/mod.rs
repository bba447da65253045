//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (Reporter) but are themselves
//! concrete structs, not traits.

mod simulation;

pub use simulation::{SimulationOutcome, SimulationService};
