//! Bounded production-tree synthesis.
//!
//! The synthesizer expands a root item into a tree of production steps:
//! for each input of a node's recipe it looks up producing recipes, lets the
//! rater choose one, and recurses. Two monotonically-decreasing counters --
//! the per-path depth budget and the global node budget -- guarantee
//! termination on any dataset shape, cyclic ones included. Hitting either
//! budget silently truncates the tree; a partial tree is a result, not an
//! error.

use crate::id::{ItemId, NodeId, RecipeKey};
use crate::index::{Direction, RecipeIndex};
use crate::layout::Position;
use crate::oredict::OredictTable;
use crate::rate::RatingTables;
use crate::recipe::{Dataset, Recipe};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Items the solver never expands: raw materials, tools, and catalysts that
/// a production chain treats as leaves.
#[derive(Debug, Clone, Default)]
pub struct StopSet {
    ids: HashSet<ItemId>,
    prefixes: Vec<String>,
}

impl StopSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: impl Into<ItemId>) {
        self.ids.insert(item.into());
    }

    pub fn insert_prefix(&mut self, prefix: impl Into<String>) {
        self.prefixes.push(prefix.into());
    }

    pub fn stops(&self, item: &ItemId) -> bool {
        self.ids.contains(item) || self.prefixes.iter().any(|p| item.starts_with(p))
    }

    /// The stop set tuned for the GregTech-style pack: crafting tools,
    /// ambient fluids, and the `meta_item_1` circuit/shape ranges.
    pub fn gregtech() -> Self {
        let mut set = Self::default();
        for id in [
            "gregtech:hammer:0",
            "gregtech:wire_cutter:0",
            "gregtech:screndriver:0",
            "gregtech:file:0",
            "gregtech:saw:0",
            "gregtech:mortar:0",
            "gregtech:meta_item_1:461",
            "fluid:water",
            "gregtech:rubber_log:0",
            "forge:bucketfilled:0",
        ] {
            set.insert(id);
        }
        for variant in 0..=57 {
            set.insert(format!("gregtech:meta_item_1:{variant}"));
        }
        for variant in 821..=835 {
            set.insert(format!("gregtech:meta_item_1:{variant}"));
        }
        for prefix in [
            "deepmoblearning:data_model_",
            "gregtech:ore_",
            "thermalfoundation:fertilizer:",
            "minecraft:log",
        ] {
            set.insert_prefix(prefix);
        }
        set
    }
}

/// Termination guarantees for one synthesis call. Both counters are
/// mandatory: depth bounds any root-to-leaf path, the node limit bounds the
/// whole tree across all branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveBudget {
    pub max_depth: u32,
    pub node_limit: usize,
}

impl Default for SolveBudget {
    fn default() -> Self {
        Self {
            max_depth: 20,
            node_limit: 10_000,
        }
    }
}

/// One step of a synthesized production tree. Children correspond 1:1 to the
/// subset of the recipe's inputs that resolved to a producing recipe; inputs
/// with no chosen recipe simply have no child. Owned exclusively by the
/// parent (or the caller, for the root).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionNode {
    pub id: NodeId,
    pub key: RecipeKey,
    pub recipe: Recipe,
    pub children: Vec<ProductionNode>,
    pub position: Position,
}

impl ProductionNode {
    /// Total nodes in this subtree, root included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ProductionNode::node_count).sum::<usize>()
    }

    /// Length of the longest root-to-leaf path, in levels.
    pub fn depth(&self) -> u32 {
        1 + self
            .children
            .iter()
            .map(ProductionNode::depth)
            .max()
            .unwrap_or(0)
    }
}

/// Read-only view over everything one synthesis call needs. No state is
/// shared with the caller; each call produces its own tree and node-id space.
#[derive(Debug, Clone, Copy)]
pub struct Synthesizer<'a> {
    pub dataset: &'a Dataset,
    pub index: &'a RecipeIndex,
    pub oredict: &'a OredictTable,
    pub tables: &'a RatingTables,
    pub stops: &'a StopSet,
    pub budget: SolveBudget,
}

impl<'a> Synthesizer<'a> {
    /// Resolve `item` to its best producing recipe and expand it into a
    /// production tree. `None` if no usable recipe produces the item.
    pub fn solve_item(&self, item: &ItemId) -> Option<ProductionNode> {
        let candidates = self.index.lookup(item, Direction::Producers, self.oredict);
        let chosen = self.tables.select(self.dataset, &candidates)?;
        Some(self.solve(chosen.key, chosen.recipe))
    }

    /// Expand a caller-picked recipe (as the browser does when the user
    /// clicks a specific recipe) into a production tree.
    pub fn solve_recipe(&self, key: RecipeKey) -> Option<ProductionNode> {
        let recipe = self.dataset.recipe(key)?.clone();
        Some(self.solve(key, recipe))
    }

    fn solve(&self, key: RecipeKey, recipe: Recipe) -> ProductionNode {
        let mut created = 1usize; // the root
        let mut next_id = 0u64;
        let mut root = self.new_node(key, recipe, Position::ZERO, &mut next_id);
        self.expand(
            &mut root,
            self.budget.max_depth,
            &mut created,
            &HashSet::new(),
            &mut next_id,
        );
        root
    }

    fn new_node(
        &self,
        key: RecipeKey,
        recipe: Recipe,
        position: Position,
        next_id: &mut u64,
    ) -> ProductionNode {
        let id = NodeId(*next_id);
        *next_id += 1;
        ProductionNode {
            id,
            key,
            recipe,
            children: Vec::new(),
            position,
        }
    }

    fn expand(
        &self,
        node: &mut ProductionNode,
        depth: u32,
        created: &mut usize,
        seen: &HashSet<ItemId>,
        next_id: &mut u64,
    ) {
        if depth == 0 {
            return;
        }

        // Iterating a clone of the input list keeps the borrow checker out of
        // the way while children are appended to the same node.
        let inputs: Vec<ItemId> = node.recipe.inputs.iter().map(|s| s.item.clone()).collect();
        for item in inputs {
            if *created >= self.budget.node_limit {
                return;
            }
            if self.stops.stops(&item) || seen.contains(&item) {
                continue;
            }

            let candidates = self.index.lookup(&item, Direction::Producers, self.oredict);
            let Some(chosen) = self.tables.select(self.dataset, &candidates) else {
                continue; // terminal material, not an error
            };

            let mut child = self.new_node(chosen.key, chosen.recipe, node.position, next_id);
            *created += 1;

            // Copy-on-descend: sibling branches may legitimately re-expand
            // this item, so only the current path sees it.
            let mut seen_below = seen.clone();
            seen_below.insert(item);

            self.expand(&mut child, depth - 1, created, &seen_below, next_id);
            node.children.push(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn stop_set_matches_ids_and_prefixes() {
        let stops = StopSet::gregtech();
        assert!(stops.stops(&"gregtech:hammer:0".into()));
        assert!(stops.stops(&"gregtech:meta_item_1:30".into()));
        assert!(stops.stops(&"gregtech:meta_item_1:835".into()));
        assert!(!stops.stops(&"gregtech:meta_item_1:100".into()));
        assert!(stops.stops(&"gregtech:ore_iron:3".into()));
        assert!(stops.stops(&"minecraft:log:1".into()));
        assert!(!stops.stops(&"minecraft:stone:0".into()));
    }

    #[test]
    fn chain_expands_to_terminal_material() {
        let env = SolveEnv::new(smelt_chain_dataset());
        let root = env.synthesizer().solve_item(&"mod:plate:0".into()).unwrap();

        // plate <- ingot <- ore; ore has no producer, so the chain ends.
        assert_eq!(root.node_count(), 3);
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].children.len(), 1);
        assert!(root.children[0].children[0].children.is_empty());
    }

    #[test]
    fn unresolved_inputs_are_skipped_without_error() {
        let env = SolveEnv::new(dataset(vec![process(
            "craft",
            vec![recipe(
                vec![stack("mod:mystery:0", 1)],
                vec![stack("mod:thing:0", 1)],
            )],
        )]));
        let root = env.synthesizer().solve_item(&"mod:thing:0".into()).unwrap();
        assert!(root.children.is_empty());
    }

    #[test]
    fn stop_items_are_never_expanded() {
        let mut env = SolveEnv::new(smelt_chain_dataset());
        env.stops.insert("mod:ingot:0");
        let root = env.synthesizer().solve_item(&"mod:plate:0".into()).unwrap();
        assert_eq!(root.node_count(), 1);
    }

    #[test]
    fn cyclic_dataset_terminates_within_depth() {
        let mut env = SolveEnv::new(cyclic_dataset());
        env.budget = SolveBudget {
            max_depth: 5,
            node_limit: 10_000,
        };
        let root = env.synthesizer().solve_item(&"mod:a:0".into()).unwrap();

        // a <- b <- a, then the path-local seen set blocks b: the expansion
        // halts at three nodes, well inside the depth budget.
        assert!(root.depth() <= 6);
        assert_eq!(root.node_count(), 3);
        assert_eq!(root.depth(), 3);
    }

    #[test]
    fn depth_budget_bounds_every_path() {
        let mut env = SolveEnv::new(deep_chain_dataset(30));
        env.budget = SolveBudget {
            max_depth: 5,
            node_limit: 10_000,
        };
        let root = env.synthesizer().solve_item(&"mod:item_0:0".into()).unwrap();
        // Root plus at most five expansion levels.
        assert_eq!(root.depth(), 6);
    }

    #[test]
    fn node_budget_caps_total_nodes_exactly() {
        let mut env = SolveEnv::new(wide_dataset(50, 12));
        env.budget = SolveBudget {
            max_depth: 10,
            node_limit: 100,
        };
        let root = env.synthesizer().solve_item(&"mod:w0_0:0".into()).unwrap();
        assert_eq!(root.node_count(), 100);
    }

    #[test]
    fn sibling_branches_may_reuse_an_item() {
        // Both branches of the root consume mod:mid, which itself is built
        // from ore; the seen set is per path, so both branches expand it.
        let env = SolveEnv::new(dataset(vec![
            process(
                "craft",
                vec![recipe(
                    vec![stack("mod:mid:0", 1), stack("mod:mid:0", 1)],
                    vec![stack("mod:top:0", 1)],
                )],
            ),
            process(
                "smelt",
                vec![recipe(
                    vec![stack("mod:raw:0", 1)],
                    vec![stack("mod:mid:0", 1)],
                )],
            ),
        ]));
        let root = env.synthesizer().solve_item(&"mod:top:0".into()).unwrap();
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].key, root.children[1].key);
    }

    #[test]
    fn node_ids_are_deterministic_and_unique() {
        let env = SolveEnv::new(smelt_chain_dataset());
        let a = env.synthesizer().solve_item(&"mod:plate:0".into()).unwrap();
        let b = env.synthesizer().solve_item(&"mod:plate:0".into()).unwrap();
        assert_eq!(a, b);

        let mut ids = Vec::new();
        collect_ids(&a, &mut ids);
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), a.node_count());
    }

    fn collect_ids(node: &ProductionNode, ids: &mut Vec<NodeId>) {
        ids.push(node.id);
        for child in &node.children {
            collect_ids(child, ids);
        }
    }
}
