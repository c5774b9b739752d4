//! Deterministic tree layout.
//!
//! Positions a synthesized production tree so that no two node footprints
//! overlap and the tree reads top to bottom: producers sit above the
//! consumers they feed. A single post-order pass walks the tree from an
//! already-positioned root, reserving each child's subtree width before
//! placing the next sibling.

use crate::solve::ProductionNode;
use serde::{Deserialize, Serialize};

/// A 2D point in chart coordinates. All layout math is addition of exact
/// small integers, so positions are reproducible bit-for-bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ZERO: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which row of a node's box a stack slot sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Input,
    Output,
}

/// Node geometry. A node's footprint width grows with the larger of its
/// recipe's input/output counts; height is fixed. Defaults match the
/// browser's 32px icons with 8px padding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    pub padding: f64,
    pub icon_size: f64,
    /// Gap reserved between adjacent subtrees and between tree levels.
    pub margin: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            padding: 8.0,
            icon_size: 32.0,
            margin: 32.0,
        }
    }
}

impl LayoutMetrics {
    fn slot(&self) -> f64 {
        self.icon_size + self.padding
    }

    /// Footprint width of one node: machine icon column plus one slot per
    /// stack on the wider recipe side.
    pub fn node_width(&self, node: &ProductionNode) -> f64 {
        let slots = node.recipe.inputs.len().max(node.recipe.outputs.len()) as f64;
        self.padding + self.icon_size + self.padding + slots * self.slot()
    }

    /// Fixed node height: input row, machine row, output row.
    pub fn node_height(&self) -> f64 {
        self.padding + 3.0 * self.slot()
    }

    /// Horizontal footprint the layout reserves for a node and all of its
    /// descendants. A leaf claims its own width plus the margin; an inner
    /// node claims the larger of its children's combined widths and its own
    /// box, so it is never narrower than itself.
    pub fn subtree_width(&self, node: &ProductionNode) -> f64 {
        if node.children.is_empty() {
            return self.node_width(node) + self.margin;
        }
        let children: f64 = self.children_width(node);
        children.max(self.node_width(node) + self.margin)
    }

    fn children_width(&self, node: &ProductionNode) -> f64 {
        node.children.iter().map(|c| self.subtree_width(c)).sum()
    }

    /// Center of the `i`-th stack slot on the given side of a node's box.
    pub fn stack_anchor(&self, node: &ProductionNode, slot: usize, side: Side) -> Position {
        let x = node.position.x
            + self.padding
            + self.icon_size
            + self.padding
            + slot as f64 * self.slot()
            + self.icon_size / 2.0;
        let y = node.position.y
            + match side {
                Side::Input => self.padding + self.icon_size / 2.0,
                Side::Output => self.padding + 2.0 * self.slot() + self.icon_size / 2.0,
            };
        Position::new(x, y)
    }
}

/// Position every descendant of `root` relative to the root's own (caller
/// supplied) position. Children are laid out left to right starting at the
/// parent's x, one level above it (the tree grows upward, producer over
/// consumer); each child then recursively places its own subtree.
pub fn align_tree(root: &mut ProductionNode, metrics: &LayoutMetrics) {
    let mut offset = 0.0;
    let base = root.position;
    for child in &mut root.children {
        child.position.x = base.x + offset;
        child.position.y = base.y - (metrics.node_height() + metrics.margin);
        offset += metrics.subtree_width(child);
        align_tree(child, metrics);
    }
}

/// A producer-to-consumer connection: from an output slot of the child node
/// to the matching input slot of its parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub from: Position,
    pub to: Position,
}

/// Compute the connection lines of a laid-out tree by matching each child's
/// output items against its parent's input slots.
pub fn connection_lines(root: &ProductionNode, metrics: &LayoutMetrics) -> Vec<Line> {
    let mut lines = Vec::new();
    collect_lines(root, metrics, &mut lines);
    lines
}

fn collect_lines(node: &ProductionNode, metrics: &LayoutMetrics, lines: &mut Vec<Line>) {
    for child in &node.children {
        for (i, input) in node.recipe.inputs.iter().enumerate() {
            if let Some(j) = child
                .recipe
                .outputs
                .iter()
                .position(|out| out.item == input.item)
            {
                lines.push(Line {
                    from: metrics.stack_anchor(child, j, Side::Output),
                    to: metrics.stack_anchor(node, i, Side::Input),
                });
            }
        }
        collect_lines(child, metrics, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{NodeId, RecipeKey};
    use crate::test_utils::*;

    fn node(inputs: usize, outputs: usize, children: Vec<ProductionNode>) -> ProductionNode {
        let inputs = (0..inputs).map(|i| stack(format!("mod:in_{i}:0"), 1)).collect();
        let outputs = (0..outputs)
            .map(|i| stack(format!("mod:out_{i}:0"), 1))
            .collect();
        ProductionNode {
            id: NodeId(0),
            key: RecipeKey::new(0, 0),
            recipe: recipe(inputs, outputs),
            children,
            position: Position::ZERO,
        }
    }

    #[test]
    fn width_follows_wider_recipe_side() {
        let metrics = LayoutMetrics::default();
        let narrow = node(1, 1, vec![]);
        let wide = node(3, 1, vec![]);
        assert_eq!(metrics.node_width(&narrow), 8.0 + 32.0 + 8.0 + 40.0);
        assert_eq!(metrics.node_width(&wide), 8.0 + 32.0 + 8.0 + 3.0 * 40.0);
        assert_eq!(metrics.node_height(), 8.0 + 3.0 * 40.0);
    }

    #[test]
    fn leaf_subtree_width_is_footprint_plus_margin() {
        let metrics = LayoutMetrics::default();
        let leaf = node(1, 1, vec![]);
        assert_eq!(
            metrics.subtree_width(&leaf),
            metrics.node_width(&leaf) + metrics.margin
        );
    }

    #[test]
    fn parent_is_never_narrower_than_its_own_box() {
        let metrics = LayoutMetrics::default();
        // Wide parent over a single slim child.
        let parent = node(6, 1, vec![node(1, 1, vec![])]);
        assert_eq!(
            metrics.subtree_width(&parent),
            metrics.node_width(&parent) + metrics.margin
        );
    }

    #[test]
    fn siblings_never_overlap() {
        let metrics = LayoutMetrics::default();
        let mut root = node(2, 1, vec![node(2, 1, vec![]), node(1, 1, vec![])]);
        root.position = Position::new(100.0, 500.0);
        align_tree(&mut root, &metrics);

        let first = &root.children[0];
        let second = &root.children[1];
        assert_eq!(first.position.x, 100.0);
        assert_eq!(second.position.x, 100.0 + metrics.subtree_width(first));
        assert!(second.position.x >= first.position.x + metrics.node_width(first));
        assert_eq!(
            first.position.y,
            500.0 - (metrics.node_height() + metrics.margin)
        );
        assert_eq!(first.position.y, second.position.y);
    }

    #[test]
    fn single_child_chain_stacks_straight_up() {
        let metrics = LayoutMetrics::default();
        let mut root = node(1, 1, vec![node(1, 1, vec![node(1, 1, vec![])])]);
        root.position = Position::new(40.0, 0.0);
        align_tree(&mut root, &metrics);

        let level = metrics.node_height() + metrics.margin;
        let mid = &root.children[0];
        let top = &mid.children[0];
        assert_eq!(mid.position, Position::new(40.0, -level));
        assert_eq!(top.position, Position::new(40.0, -2.0 * level));
    }

    #[test]
    fn anchors_sit_inside_their_slot_rows() {
        let metrics = LayoutMetrics::default();
        let n = node(2, 1, vec![]);
        let first_in = metrics.stack_anchor(&n, 0, Side::Input);
        let second_in = metrics.stack_anchor(&n, 1, Side::Input);
        let first_out = metrics.stack_anchor(&n, 0, Side::Output);

        assert_eq!(first_in.x, 8.0 + 32.0 + 8.0 + 16.0);
        assert_eq!(second_in.x - first_in.x, 40.0);
        assert_eq!(first_in.y, 8.0 + 16.0);
        assert_eq!(first_out.y, 8.0 + 2.0 * 40.0 + 16.0);
        assert_eq!(first_in.x, first_out.x);
    }

    #[test]
    fn connection_lines_match_items_to_slots() {
        let metrics = LayoutMetrics::default();
        let mut child = node(0, 2, vec![]);
        child.recipe.outputs[1] = stack("mod:in_0:0", 1); // feeds parent input 0
        let mut root = node(2, 1, vec![child]);
        root.position = Position::new(0.0, 0.0);
        align_tree(&mut root, &metrics);

        let lines = connection_lines(&root, &metrics);
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0].from,
            metrics.stack_anchor(&root.children[0], 1, Side::Output)
        );
        assert_eq!(lines[0].to, metrics.stack_anchor(&root, 0, Side::Input));
    }
}
