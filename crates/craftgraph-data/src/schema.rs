//! Deserialization schemas for the raw recipe dump.
//!
//! The dump is an ordered sequence of process records, each carrying its
//! machine catalysts and recipes. Stack entries use `name` for the item id
//! (the dumper's vocabulary); conversion renames them into core [`Stack`]s.

use craftgraph_core::item::Stack;
use craftgraph_core::recipe::{Process, Recipe};
use serde::Deserialize;

/// Raw form of one process record.
#[derive(Debug, Deserialize)]
pub struct RawProcess {
    pub id: String,
    #[serde(default)]
    pub machines: Vec<String>,
    #[serde(default)]
    pub recipes: Vec<RawRecipe>,
}

/// Raw form of one recipe.
#[derive(Debug, Deserialize)]
pub struct RawRecipe {
    #[serde(default)]
    pub inputs: Vec<RawStackEntry>,
    #[serde(default)]
    pub outputs: Vec<RawStackEntry>,
}

/// Raw form of one stack slot.
#[derive(Debug, Deserialize)]
pub struct RawStackEntry {
    pub name: String,
    #[serde(default)]
    pub count: u32,
}

/// TOML has no top-level arrays; a TOML dump wraps the sequence in a
/// `processes` array-of-tables.
#[derive(Debug, Deserialize)]
pub struct RawDumpToml {
    #[serde(default)]
    pub processes: Vec<RawProcess>,
}

impl From<RawStackEntry> for Stack {
    fn from(raw: RawStackEntry) -> Self {
        Stack::new(raw.name, raw.count)
    }
}

impl From<RawRecipe> for Recipe {
    fn from(raw: RawRecipe) -> Self {
        Recipe {
            inputs: raw.inputs.into_iter().map(Stack::from).collect(),
            outputs: raw.outputs.into_iter().map(Stack::from).collect(),
        }
    }
}

impl From<RawProcess> for Process {
    fn from(raw: RawProcess) -> Self {
        Process {
            id: raw.id,
            machines: raw.machines.into_iter().map(Into::into).collect(),
            recipes: raw.recipes.into_iter().map(Recipe::from).collect(),
        }
    }
}

/// Convert a parsed dump into core process records, preserving order.
pub fn into_processes(raw: Vec<RawProcess>) -> Vec<Process> {
    raw.into_iter().map(Process::from).collect()
}
