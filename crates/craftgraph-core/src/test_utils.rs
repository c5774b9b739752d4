//! Builders for synthetic datasets used across the test suites.

use crate::id::ItemId;
use crate::index::RecipeIndex;
use crate::item::Stack;
use crate::oredict::OredictTable;
use crate::rate::RatingTables;
use crate::recipe::{Dataset, Process, Recipe};
use crate::solve::{SolveBudget, StopSet, Synthesizer};
use std::collections::HashMap;

pub fn stack(id: impl Into<ItemId>, count: u32) -> Stack {
    Stack::new(id, count)
}

pub fn recipe(inputs: Vec<Stack>, outputs: Vec<Stack>) -> Recipe {
    Recipe { inputs, outputs }
}

pub fn process(id: &str, recipes: Vec<Recipe>) -> Process {
    Process {
        id: id.to_string(),
        machines: Vec::new(),
        recipes,
    }
}

pub fn dataset(processes: Vec<Process>) -> Dataset {
    Dataset::new(HashMap::new(), processes)
}

/// ore -> ingot -> plate, each step its own process; ore has no producer.
pub fn smelt_chain_dataset() -> Dataset {
    dataset(vec![
        process(
            "smelt",
            vec![recipe(
                vec![stack("mod:ore:0", 1)],
                vec![stack("mod:ingot:0", 1)],
            )],
        ),
        process(
            "press",
            vec![recipe(
                vec![stack("mod:ingot:0", 1)],
                vec![stack("mod:plate:0", 1)],
            )],
        ),
    ])
}

/// a is produced from b and b from a; termination relies entirely on the
/// solver's path-local seen set and budgets.
pub fn cyclic_dataset() -> Dataset {
    dataset(vec![process(
        "loop",
        vec![
            recipe(vec![stack("mod:b:0", 1)], vec![stack("mod:a:0", 1)]),
            recipe(vec![stack("mod:a:0", 1)], vec![stack("mod:b:0", 1)]),
        ],
    )])
}

/// A linear chain `item_0 <- item_1 <- ... <- item_<levels>`; the last item
/// has no producer.
pub fn deep_chain_dataset(levels: usize) -> Dataset {
    let recipes = (0..levels)
        .map(|i| {
            recipe(
                vec![stack(format!("mod:item_{}:0", i + 1), 1)],
                vec![stack(format!("mod:item_{i}:0"), 1)],
            )
        })
        .collect();
    dataset(vec![process("chain", recipes)])
}

/// Every item `w<L>_<j>` is produced from all `branching` items of level
/// `L + 1`; items of the last level are terminal. Expanding `w0_0` yields a
/// tree with `branching` children per node, `levels` deep.
pub fn wide_dataset(branching: usize, levels: usize) -> Dataset {
    let mut recipes = Vec::new();
    for level in 0..levels {
        for j in 0..branching.max(1) {
            let inputs = (0..branching)
                .map(|k| stack(format!("mod:w{}_{k}:0", level + 1), 1))
                .collect();
            recipes.push(recipe(inputs, vec![stack(format!("mod:w{level}_{j}:0"), 1)]));
        }
    }
    dataset(vec![process("wide", recipes)])
}

/// Everything one synthesis call needs, with neutral tables, no stop set,
/// and default budgets. Tests tweak fields before calling `synthesizer()`.
#[derive(Debug)]
pub struct SolveEnv {
    pub dataset: Dataset,
    pub index: RecipeIndex,
    pub oredict: OredictTable,
    pub tables: RatingTables,
    pub stops: StopSet,
    pub budget: SolveBudget,
}

impl SolveEnv {
    pub fn new(dataset: Dataset) -> Self {
        let index = RecipeIndex::build(&dataset);
        Self {
            dataset,
            index,
            oredict: OredictTable::new(),
            tables: RatingTables::neutral(),
            stops: StopSet::empty(),
            budget: SolveBudget::default(),
        }
    }

    pub fn synthesizer(&self) -> Synthesizer<'_> {
        Synthesizer {
            dataset: &self.dataset,
            index: &self.index,
            oredict: &self.oredict,
            tables: &self.tables,
            stops: &self.stops,
            budget: self.budget,
        }
    }
}
