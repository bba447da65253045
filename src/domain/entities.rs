//! Domain entities: core data structures

use std::fmt;

use generational_arena::Index;

/// Quota of direct recruits a marketer stops at unless told otherwise.
pub const DEFAULT_FRONT_LINE_TARGET: usize = 5;

/// Identity of a marketer, unique within one network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarketerId(u64);

impl MarketerId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MarketerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic id source owned by the tree that constructs marketers.
///
/// Ids start at 1 and are handed out exactly once.
#[derive(Debug)]
pub struct IdSequence {
    next: u64,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSequence {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Hand out the next id.
    pub fn next_id(&mut self) -> MarketerId {
        let id = MarketerId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}

/// Recruitment state of a single marketer.
///
/// `Saturated` is terminal: the front line only grows and the target never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecruitState {
    Recruiting,
    Saturated,
}

impl fmt::Display for RecruitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecruitState::Recruiting => write!(f, "recruiting"),
            RecruitState::Saturated => write!(f, "saturated"),
        }
    }
}

/// A participant in the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marketer {
    /// Unique id, assigned at construction
    pub id: MarketerId,
    /// Number of direct recruits after which this marketer stops recruiting
    pub front_line_target: usize,
    /// Direct recruits in recruitment order (handles into the owning arena)
    pub front_line: Vec<Index>,
    /// Recruiting marketer, `None` for the root
    pub sponsor: Option<Index>,
    /// Month (completed ticks) in which this marketer joined
    pub joined_month: u64,
}

impl Marketer {
    pub fn new(
        id: MarketerId,
        front_line_target: usize,
        sponsor: Option<Index>,
        joined_month: u64,
    ) -> Self {
        Self {
            id,
            front_line_target,
            front_line: Vec::new(),
            sponsor,
            joined_month,
        }
    }

    pub fn sponsoring_goals_met(&self) -> bool {
        self.front_line.len() >= self.front_line_target
    }

    pub fn state(&self) -> RecruitState {
        if self.sponsoring_goals_met() {
            RecruitState::Saturated
        } else {
            RecruitState::Recruiting
        }
    }

    /// Recruits still needed to reach the target.
    pub fn remaining_capacity(&self) -> usize {
        self.front_line_target.saturating_sub(self.front_line.len())
    }
}

/// Someone a strategy wants signed up; becomes a `Marketer` once the tree
/// assigns an id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Prospect {
    /// Quota override, `None` keeps the network default
    pub front_line_target: Option<usize>,
}

impl Prospect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(front_line_target: usize) -> Self {
        Self {
            front_line_target: Some(front_line_target),
        }
    }
}
