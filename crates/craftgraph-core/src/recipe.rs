use crate::id::{ItemId, RecipeKey};
use crate::item::Stack;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One crafting step: ordered inputs, ordered outputs. Input order is
/// significant during ore-dictionary normalization (adjacency matters) but
/// carries no meaning afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub inputs: Vec<Stack>,
    pub outputs: Vec<Stack>,
}

/// A group of recipes sharing a crafting method (a machine type, the
/// crafting table, a worldgen pseudo-process, ...). `machines` lists the
/// catalyst items that perform the process; display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub id: String,
    pub machines: Vec<ItemId>,
    pub recipes: Vec<Recipe>,
}

/// An immutable loaded dataset: the item-name catalog plus the ordered
/// process list. Passed by shared reference into every component call;
/// recipes are addressed by [`RecipeKey`] for the dataset's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub names: HashMap<ItemId, String>,
    pub processes: Vec<Process>,
}

impl Dataset {
    pub fn new(names: HashMap<ItemId, String>, processes: Vec<Process>) -> Self {
        Self { names, processes }
    }

    pub fn process(&self, key: RecipeKey) -> Option<&Process> {
        self.processes.get(key.process)
    }

    pub fn recipe(&self, key: RecipeKey) -> Option<&Recipe> {
        self.process(key)?.recipes.get(key.recipe)
    }

    /// Display name for an item, falling back to the raw id.
    pub fn display_name<'a>(&'a self, item: &'a ItemId) -> &'a str {
        self.names.get(item).map(String::as_str).unwrap_or(item.as_str())
    }

    /// Iterate every recipe with its stable key, in dataset order.
    pub fn iter_recipes(&self) -> impl Iterator<Item = (RecipeKey, &Recipe)> {
        self.processes.iter().enumerate().flat_map(|(i, process)| {
            process
                .recipes
                .iter()
                .enumerate()
                .map(move |(j, recipe)| (RecipeKey::new(i, j), recipe))
        })
    }
}
