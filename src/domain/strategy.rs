//! Recruiting strategies: how many prospects a marketer signs up per call.
//!
//! A strategy only decides *who* joins. The tree assigns ids, attaches the
//! new marketers to the recruiter's front line and enforces the quota, so
//! alternative growth policies never touch recruitment bookkeeping.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::domain::entities::{Marketer, Prospect};
use crate::domain::error::{DomainError, DomainResult};

/// Growth policy consulted each time a non-saturated marketer recruits.
pub trait RecruitingStrategy: fmt::Debug {
    /// Prospects the recruiter signs up on this call, in recruitment order.
    fn prospects(&mut self, recruiter: &Marketer) -> Vec<Prospect>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// One new recruit per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleRecruit;

impl RecruitingStrategy for SingleRecruit {
    fn prospects(&mut self, _recruiter: &Marketer) -> Vec<Prospect> {
        vec![Prospect::new()]
    }

    fn name(&self) -> &'static str {
        "single"
    }
}

/// A fixed number of recruits per call.
#[derive(Debug, Clone, Copy)]
pub struct FixedBatch {
    size: usize,
}

impl FixedBatch {
    pub fn new(size: usize) -> DomainResult<Self> {
        if size == 0 {
            return Err(DomainError::invalid_strategy(
                "batch size must be at least 1",
            ));
        }
        Ok(Self { size })
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl RecruitingStrategy for FixedBatch {
    fn prospects(&mut self, _recruiter: &Marketer) -> Vec<Prospect> {
        vec![Prospect::new(); self.size]
    }

    fn name(&self) -> &'static str {
        "batch"
    }
}

/// One recruit with a fixed probability, nobody otherwise.
#[derive(Debug)]
pub struct Probabilistic {
    probability: f64,
    rng: StdRng,
}

impl Probabilistic {
    /// `seed` makes runs reproducible; without it the generator is seeded from entropy.
    pub fn new(probability: f64, seed: Option<u64>) -> DomainResult<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(DomainError::invalid_strategy(format!(
                "probability must be within [0, 1], got {probability}"
            )));
        }
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { probability, rng })
    }
}

impl RecruitingStrategy for Probabilistic {
    fn prospects(&mut self, recruiter: &Marketer) -> Vec<Prospect> {
        if self.rng.gen_bool(self.probability) {
            vec![Prospect::new()]
        } else {
            debug!("marketer {} found nobody this month", recruiter.id);
            Vec::new()
        }
    }

    fn name(&self) -> &'static str {
        "probabilistic"
    }
}

/// Validated description of a strategy, independent of how it was configured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrategySpec {
    Single,
    Batch { size: usize },
    Probabilistic { probability: f64, seed: Option<u64> },
}

/// Build the strategy described by `spec`.
pub fn build_strategy(spec: &StrategySpec) -> DomainResult<Box<dyn RecruitingStrategy>> {
    let strategy: Box<dyn RecruitingStrategy> = match *spec {
        StrategySpec::Single => Box::new(SingleRecruit),
        StrategySpec::Batch { size } => Box::new(FixedBatch::new(size)?),
        StrategySpec::Probabilistic { probability, seed } => {
            Box::new(Probabilistic::new(probability, seed)?)
        }
    };
    debug!("build_strategy: {}", strategy.name());
    Ok(strategy)
}
