use crate::id::ItemId;
use serde::{Deserialize, Serialize};

/// A quantity of one item. Count zero is valid and used for representative
/// placeholders (e.g. a collapsed ore-dictionary reference).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    pub item: ItemId,
    pub count: u32,
}

impl Stack {
    pub fn new(item: impl Into<ItemId>, count: u32) -> Self {
        Self {
            item: item.into(),
            count,
        }
    }
}

/// Merge stacks with the same item id, summing counts, sorted by id.
/// Display-side helper: raw recipe dumps repeat an item once per slot.
pub fn dedup_stacks(stacks: &[Stack]) -> Vec<Stack> {
    let mut merged: Vec<Stack> = Vec::new();
    for stack in stacks {
        match merged.iter_mut().find(|s| s.item == stack.item) {
            // Counts are display-only, so an overflowing dump saturates
            // rather than panicking.
            Some(existing) => existing.count = existing.count.saturating_add(stack.count),
            None => merged.push(stack.clone()),
        }
    }
    merged.sort_by(|a, b| a.item.cmp(&b.item));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_merges_and_sums() {
        let stacks = vec![
            Stack::new("minecraft:planks:0", 2),
            Stack::new("minecraft:stick:0", 1),
            Stack::new("minecraft:planks:0", 2),
        ];
        let deduped = dedup_stacks(&stacks);
        assert_eq!(
            deduped,
            vec![
                Stack::new("minecraft:planks:0", 4),
                Stack::new("minecraft:stick:0", 1),
            ]
        );
    }

    #[test]
    fn dedup_sorts_by_id() {
        let stacks = vec![Stack::new("b:b:0", 1), Stack::new("a:a:0", 1)];
        let deduped = dedup_stacks(&stacks);
        assert_eq!(deduped[0].item, "a:a:0".into());
        assert_eq!(deduped[1].item, "b:b:0".into());
    }

    #[test]
    fn dedup_saturates_on_overflow() {
        let stacks = vec![Stack::new("a:a:0", u32::MAX), Stack::new("a:a:0", 2)];
        let deduped = dedup_stacks(&stacks);
        assert_eq!(deduped, vec![Stack::new("a:a:0", u32::MAX)]);
    }

    #[test]
    fn dedup_keeps_zero_counts() {
        let deduped = dedup_stacks(&[Stack::new("a:a:0", 0)]);
        assert_eq!(deduped, vec![Stack::new("a:a:0", 0)]);
    }
}
