//! The recruiting network: the tree plus the registry that drives ticks.

use generational_arena::Index;
use tracing::{info, instrument};

use crate::domain::arena::MarketerArena;
use crate::domain::entities::{Marketer, RecruitState};
use crate::domain::strategy::RecruitingStrategy;

/// All marketers of one simulation and the policy they recruit with.
///
/// `marketers` lists every marketer in creation order, each exactly once.
/// Ownership stays with the tree; the registry only holds handles.
#[derive(Debug)]
pub struct Network {
    tree: MarketerArena,
    marketers: Vec<Index>,
    strategy: Box<dyn RecruitingStrategy>,
    month: u64,
}

impl Network {
    /// Create a network holding a single root marketer.
    pub fn new(strategy: Box<dyn RecruitingStrategy>, front_line_target: usize) -> Self {
        let tree = MarketerArena::new(front_line_target);
        let marketers = vec![tree.root()];
        Self {
            tree,
            marketers,
            strategy,
            month: 0,
        }
    }

    /// Advance one month.
    ///
    /// Every marketer registered at the start of the call recruits exactly
    /// once; marketers recruited during the call join the registry afterwards
    /// and first recruit next month. Returns the number of new marketers.
    #[instrument(level = "debug", skip(self))]
    pub fn recruit(&mut self) -> usize {
        let month = self.month + 1;
        let mut new_marketers = Vec::new();
        for &idx in &self.marketers {
            new_marketers.extend(self.tree.recruit(idx, self.strategy.as_mut(), month));
        }

        let added = new_marketers.len();
        self.marketers.extend(new_marketers);
        self.month = month;
        info!(
            "month {}: {} new marketers, {} total, {} still recruiting",
            month,
            added,
            self.marketers.len(),
            self.recruiting_count()
        );
        added
    }

    pub fn tree(&self) -> &MarketerArena {
        &self.tree
    }

    pub fn root(&self) -> Index {
        self.tree.root()
    }

    pub fn get(&self, idx: Index) -> Option<&Marketer> {
        self.tree.get(idx)
    }

    /// Completed months.
    pub fn month(&self) -> u64 {
        self.month
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Number of registered marketers.
    pub fn len(&self) -> usize {
        self.marketers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marketers.is_empty()
    }

    /// Registry handles in creation order.
    pub fn registry(&self) -> &[Index] {
        &self.marketers
    }

    /// Registered marketers in creation order.
    pub fn marketers(&self) -> impl Iterator<Item = &Marketer> + '_ {
        self.marketers.iter().filter_map(|&idx| self.tree.get(idx))
    }

    /// Direct recruits of `idx`, in recruitment order.
    pub fn front_line_of(&self, idx: Index) -> Vec<&Marketer> {
        self.get(idx)
            .map(|marketer| {
                marketer
                    .front_line
                    .iter()
                    .filter_map(|&child| self.tree.get(child))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn recruiting_count(&self) -> usize {
        self.count_in_state(RecruitState::Recruiting)
    }

    pub fn saturated_count(&self) -> usize {
        self.count_in_state(RecruitState::Saturated)
    }

    fn count_in_state(&self, state: RecruitState) -> usize {
        self.marketers().filter(|m| m.state() == state).count()
    }

    pub fn depth(&self) -> usize {
        self.tree.depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::strategy::SingleRecruit;

    #[test]
    fn given_new_network_when_inspected_then_registry_holds_root() {
        let network = Network::new(Box::new(SingleRecruit), 5);
        assert_eq!(network.len(), 1);
        assert_eq!(network.registry(), &[network.root()]);
        assert_eq!(network.month(), 0);
        assert_eq!(network.strategy_name(), "single");
    }

    #[test]
    fn given_one_tick_when_recruit_then_root_has_one_child() {
        let mut network = Network::new(Box::new(SingleRecruit), 5);
        assert_eq!(network.recruit(), 1);
        assert_eq!(network.len(), 2);
        assert_eq!(network.front_line_of(network.root()).len(), 1);
        assert_eq!(network.month(), 1);
    }

    #[test]
    fn given_saturated_network_when_recruit_then_no_op_but_month_advances() {
        let mut network = Network::new(Box::new(SingleRecruit), 0);
        assert_eq!(network.recruit(), 0);
        assert_eq!(network.len(), 1);
        assert_eq!(network.month(), 1);
        assert_eq!(network.saturated_count(), 1);
    }
}
