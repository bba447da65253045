//! Text renderings of marketers and networks.

use std::fmt;

use generational_arena::Index;
use termtree::Tree;

use crate::domain::arena::MarketerArena;
use crate::domain::entities::Marketer;
use crate::domain::network::Network;

/// One marketer with its front line resolved to ids.
///
/// ```text
/// Marketer 1 has sponsored for the following 2 marketers:
///     [2, 3]
/// ```
pub struct MarketerSummary<'a> {
    marketer: &'a Marketer,
    tree: &'a MarketerArena,
}

impl<'a> MarketerSummary<'a> {
    pub fn new(marketer: &'a Marketer, tree: &'a MarketerArena) -> Self {
        Self { marketer, tree }
    }
}

impl fmt::Display for MarketerSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self
            .marketer
            .front_line
            .iter()
            .filter_map(|&child| self.tree.get(child))
            .map(|child| child.id.to_string())
            .collect();
        write!(
            f,
            "Marketer {} has sponsored for the following {} marketers:\n\t[{}]",
            self.marketer.id,
            self.marketer.front_line.len(),
            ids.join(", ")
        )
    }
}

impl Network {
    pub fn summary(&self, idx: Index) -> Option<MarketerSummary<'_>> {
        self.get(idx)
            .map(|marketer| MarketerSummary::new(marketer, self.tree()))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total marketers {}.", self.len())?;
        for marketer in self.marketers() {
            writeln!(f, "{}", MarketerSummary::new(marketer, self.tree()))?;
        }
        Ok(())
    }
}

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

fn node_label(marketer: &Marketer) -> String {
    format!(
        "Marketer {} ({}/{}, joined month {})",
        marketer.id,
        marketer.front_line.len(),
        marketer.front_line_target,
        marketer.joined_month
    )
}

impl TreeNodeConvert for MarketerArena {
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(tree: &MarketerArena, idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(marketer) = tree.get(idx) {
                for &child_idx in &marketer.front_line {
                    if let Some(child) = tree.get(child_idx) {
                        let mut child_tree = Tree::new(node_label(child));
                        build_tree(tree, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }
        }

        match self.get(self.root()) {
            Some(root) => {
                let mut tree = Tree::new(node_label(root));
                build_tree(self, self.root(), &mut tree);
                tree
            }
            None => Tree::new("Empty network".to_string()),
        }
    }
}

impl TreeNodeConvert for Network {
    fn to_tree_string(&self) -> Tree<String> {
        self.tree().to_tree_string()
    }
}
