//! Domain layer: marketers, the recruiting tree and growth policies
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod entities;
pub mod error;
pub mod network;
pub mod render;
pub mod strategy;

pub use arena::{MarketerArena, TreeIterator};
pub use entities::{
    IdSequence, Marketer, MarketerId, Prospect, RecruitState, DEFAULT_FRONT_LINE_TARGET,
};
pub use error::{DomainError, DomainResult};
pub use network::Network;
pub use render::{MarketerSummary, TreeNodeConvert};
pub use strategy::{
    build_strategy, FixedBatch, Probabilistic, RecruitingStrategy, SingleRecruit, StrategySpec,
};
