//! Forward and reverse recipe lookup tables.

use crate::id::{ItemId, RecipeKey};
use crate::oredict::OredictTable;
use crate::recipe::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which side of a recipe a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Recipes that produce the item (the item appears in their outputs).
    Producers,
    /// Recipes that consume the item (the item appears in their inputs).
    Consumers,
}

/// An item-keyed multimap preserving key insertion order, so persisted index
/// artifacts serialize deterministically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct KeyedEntries {
    entries: Vec<(ItemId, Vec<RecipeKey>)>,
    positions: HashMap<ItemId, usize>,
}

impl KeyedEntries {
    fn push(&mut self, item: &ItemId, key: RecipeKey) {
        match self.positions.get(item) {
            Some(&i) => self.entries[i].1.push(key),
            None => {
                self.positions.insert(item.clone(), self.entries.len());
                self.entries.push((item.clone(), vec![key]));
            }
        }
    }

    fn get(&self, item: &ItemId) -> &[RecipeKey] {
        self.positions
            .get(item)
            .map(|&i| self.entries[i].1.as_slice())
            .unwrap_or(&[])
    }
}

/// By-output and by-input lookup tables over every recipe of a dataset.
/// Amortized O(1) per query; keys unique per (item, recipe) pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeIndex {
    by_output: KeyedEntries,
    by_input: KeyedEntries,
}

impl RecipeIndex {
    /// Index every recipe of the dataset. Run after normalization so tagged
    /// entries are indexed under their group tag.
    pub fn build(dataset: &Dataset) -> Self {
        let mut index = Self::default();
        for (key, recipe) in dataset.iter_recipes() {
            for stack in &recipe.outputs {
                index.by_output.push(&stack.item, key);
            }
            for stack in &recipe.inputs {
                index.by_input.push(&stack.item, key);
            }
        }
        index
    }

    /// Recipe keys for `item` in the given direction, including matches for
    /// every item id sharing an equivalence group with it: direct matches
    /// first, then per group (in group-discovery order) the group tag's
    /// matches and the other members' matches. Duplicates across groups are
    /// permitted; callers de-duplicate downstream if they care.
    pub fn lookup(
        &self,
        item: &ItemId,
        direction: Direction,
        oredict: &OredictTable,
    ) -> Vec<RecipeKey> {
        let table = match direction {
            Direction::Producers => &self.by_output,
            Direction::Consumers => &self.by_input,
        };

        let mut keys: Vec<RecipeKey> = table.get(item).to_vec();
        let canonical = item.with_default_variant();
        for group in oredict.groups_for(item) {
            keys.extend_from_slice(table.get(&ItemId::new(group.tag.clone())));
            for member in &group.members {
                if *member != canonical {
                    keys.extend_from_slice(table.get(member));
                }
            }
        }
        keys
    }

    /// Ordered (item, keys) pairs of the by-output table, for persistence.
    pub fn producers_entries(&self) -> impl Iterator<Item = (&ItemId, &[RecipeKey])> {
        self.by_output
            .entries
            .iter()
            .map(|(item, keys)| (item, keys.as_slice()))
    }

    /// Ordered (item, keys) pairs of the by-input table, for persistence.
    pub fn consumers_entries(&self) -> impl Iterator<Item = (&ItemId, &[RecipeKey])> {
        self.by_input
            .entries
            .iter()
            .map(|(item, keys)| (item, keys.as_slice()))
    }
}
