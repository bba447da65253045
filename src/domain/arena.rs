use generational_arena::{Arena, Index};
use tracing::{debug, instrument, warn};

use crate::domain::entities::{IdSequence, Marketer, Prospect};
use crate::domain::strategy::RecruitingStrategy;

/// Arena-based recruiting tree.
///
/// The arena owns every marketer; parents refer to their front line by
/// generational index, so the tree has no shared ownership and no cycles.
/// Ids come from the tree's own [`IdSequence`], so every marketer built
/// through it gets a fresh one.
#[derive(Debug)]
pub struct MarketerArena {
    /// Arena storage for all marketers
    arena: Arena<Marketer>,
    /// Index of the marketer the tree grows from
    root: Index,
    /// Id source for every marketer in this tree
    ids: IdSequence,
    /// Quota for prospects that do not override it
    default_target: usize,
}

impl MarketerArena {
    /// Create a tree holding a single root marketer.
    pub fn new(default_target: usize) -> Self {
        let mut ids = IdSequence::new();
        let mut arena = Arena::new();
        let root = arena.insert(Marketer::new(ids.next_id(), default_target, None, 0));
        Self {
            arena,
            root,
            ids,
            default_target,
        }
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn default_target(&self) -> usize {
        self.default_target
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn get(&self, idx: Index) -> Option<&Marketer> {
        self.arena.get(idx)
    }

    /// Ids handed out so far; equals `len()` since marketers are never removed.
    pub fn issued_ids(&self) -> u64 {
        self.ids.issued()
    }

    #[instrument(level = "trace", skip(self))]
    fn spawn(&mut self, prospect: Prospect, sponsor: Index, month: u64) -> Index {
        let target = prospect.front_line_target.unwrap_or(self.default_target);
        let marketer = Marketer::new(self.ids.next_id(), target, Some(sponsor), month);
        self.arena.insert(marketer)
    }

    /// Let one marketer recruit.
    ///
    /// Saturated or unknown marketers recruit nobody. Otherwise the strategy's
    /// prospects become new marketers appended to the recruiter's front line,
    /// and exactly those are returned. Prospects beyond the remaining quota
    /// are dropped before any id is assigned.
    #[instrument(level = "trace", skip(self, strategy))]
    pub fn recruit(
        &mut self,
        recruiter: Index,
        strategy: &mut dyn RecruitingStrategy,
        month: u64,
    ) -> Vec<Index> {
        let Some(marketer) = self.arena.get(recruiter) else {
            return Vec::new();
        };
        if marketer.sponsoring_goals_met() {
            return Vec::new();
        }

        let recruiter_id = marketer.id;
        let remaining = marketer.remaining_capacity();
        let mut prospects = strategy.prospects(marketer);
        if prospects.len() > remaining {
            warn!(
                "{} strategy offered {} recruits to marketer {}, only {} fit its front line",
                strategy.name(),
                prospects.len(),
                recruiter_id,
                remaining
            );
            prospects.truncate(remaining);
        }

        let recruits: Vec<Index> = prospects
            .into_iter()
            .map(|prospect| self.spawn(prospect, recruiter, month))
            .collect();

        if let Some(marketer) = self.arena.get_mut(recruiter) {
            marketer.front_line.extend(recruits.iter().copied());
            if marketer.sponsoring_goals_met() {
                debug!(
                    "marketer {} saturated with {} recruits",
                    marketer.id,
                    marketer.front_line.len()
                );
            }
        }

        recruits
    }

    /// Pre-order traversal from the root, front lines left to right.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Number of levels in the tree; a lone root has depth 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, idx: Index) -> usize {
        if let Some(marketer) = self.get(idx) {
            1 + marketer
                .front_line
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }
}

pub struct TreeIterator<'a> {
    arena: &'a MarketerArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a MarketerArena) -> Self {
        Self {
            arena,
            stack: vec![arena.root()],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a Marketer);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(marketer) = self.arena.get(current_idx) {
                // Push in reverse for left-to-right traversal
                for &child in marketer.front_line.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, marketer));
            }
        }
        None
    }
}
