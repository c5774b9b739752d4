//! Heuristic recipe rating and selection.
//!
//! Given the candidate recipes that produce an item, the rater scores each
//! one against two weight tables and picks the best, or reports that none is
//! usable. The weights are dataset tuning, not engine logic: the defaults
//! ship the tuning for the GregTech-style pack the browser was built around,
//! and callers may substitute their own tables.

use crate::id::RecipeKey;
use crate::recipe::{Dataset, Recipe};
use std::collections::HashMap;

/// Process-id weights. `f64::NEG_INFINITY` bans the process outright.
const PROCESS_WEIGHTS: &[(&str, f64)] = &[
    ("gregtech:material_tree", f64::NEG_INFINITY),
    ("chisel.chiseling", f64::NEG_INFINITY),
    ("jeresources.dungeon", f64::NEG_INFINITY),
    ("jeresources.villager", f64::NEG_INFINITY),
    ("jeresources.worldgen", f64::NEG_INFINITY),
    ("gregtech:packer", -100.0),
    ("jeresources.mob", -100.0),
    ("gregtech:arc_furnace_recycling", -100.0),
    ("gregtech:extractor_recycling", -100.0),
    ("gregtech:ore_by_product", -800.0),
    ("gregtech:ore_spawn_location", -400.0),
    ("minecraft.crafting", 50.0),
    ("minecraft.smelting", 150.0),
    ("gregtech:wiremill", 100.0),
    ("gregtech:lathe", 100.0),
    ("gregtech:assembler", 100.0),
    ("gregtech:electric_blast_furnace", 300.0),
    ("gregtech:mixer", 100.0),
    ("gregtech:polarizer", 100.0),
    ("gregtech:centrifuge", 100.0),
    ("gregtech:rock_breaker", 100.0),
    ("gregtech:gas_collector", 200.0),
    ("gregtech:coke_oven", 100.0),
    ("gregtech:chemical_reactor", 50.0),
    ("gregtech:macerator", 100.0),
    ("gregtech:arc_furnace", 100.0),
    ("gregtech:fluid_spawn_location", 400.0),
];

/// Input-item-id prefix weights. An input may match several prefixes; every
/// matching weight accumulates (deliberately, see [`RatingTables`]).
const INPUT_PREFIX_WEIGHTS: &[(&str, f64)] = &[
    ("gregtech:meta_nugget", -100.0),
    ("nomilabs:meta_nugget", -100.0),
    ("gregtech:meta_dust_small", -100.0),
    ("nomilabs:meta_dust_small", -100.0),
    ("gregtech:meta_dust_tiny", -100.0),
    ("nomilabs:meta_dust_tiny", -100.0),
    ("gregtech:meta_crushed_centrifuged", -100.0),
    ("nomilabs:meta_crushed_centrifuged", -100.0),
    ("gregtech:meta_crushed_purified", -100.0),
    ("nomilabs:meta_crushed_purified", -100.0),
    ("gregtech:meta_dust_pure", -100.0),
    ("nomilabs:meta_dust_pure", -100.0),
    ("fluid:plasma", -100.0),
    ("gregtech:ore_", 300.0),
    ("nomilabs:ore_", 300.0),
    ("minecraft:ore_", 300.0),
    ("gregtech:meta_ingot", 100.0),
    ("nomilabs:meta_ingot", 100.0),
    ("gregtech:meta_gem:", 150.0),
    ("gregtech:rubber_log", 100.0),
    ("gregtech:meta_item_1:438", 100.0),
    ("minecraft:log", 100.0),
    ("minecraft:glass", 100.0),
    ("minecraft:cobblestone", 100.0),
    ("fluid:water", 100.0),
    ("fluid:plastic", 200.0),
    ("fluid:hydrogen_sulfide", 300.0),
    ("gregtech:meta_dust:103", 100.0),
    ("gregtech:meta_dust:2010", 100.0),
];

/// The process whose recipes enumerate interchangeable ore variants as
/// inputs; after selection the list is collapsed to one representative.
const SMELTING_PROCESS: &str = "minecraft.smelting";

/// Configurable weight tables driving recipe selection.
///
/// A recipe's score is the process weight of its owning process (0 if absent)
/// plus, for every input stack, every matching prefix weight. Prefix matches
/// are summed without deduplication: an input matching both a namespace
/// prefix and a more specific sub-prefix counts both. Downstream tuning
/// depends on that cumulative effect, so it is intentional.
#[derive(Debug, Clone)]
pub struct RatingTables {
    pub process_weights: HashMap<String, f64>,
    pub input_prefix_weights: Vec<(String, f64)>,
    /// Process id subject to the representative-input collapse.
    pub smelting_process: String,
}

impl Default for RatingTables {
    fn default() -> Self {
        Self {
            process_weights: PROCESS_WEIGHTS
                .iter()
                .map(|&(id, w)| (id.to_string(), w))
                .collect(),
            input_prefix_weights: INPUT_PREFIX_WEIGHTS
                .iter()
                .map(|&(p, w)| (p.to_string(), w))
                .collect(),
            smelting_process: SMELTING_PROCESS.to_string(),
        }
    }
}

/// The recipe the rater settled on. `recipe` is a private copy; the smelting
/// collapse rewrites its input list without touching the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ChosenRecipe {
    pub key: RecipeKey,
    pub recipe: Recipe,
}

impl RatingTables {
    /// Tables that score everything zero. Selection degrades to "first
    /// candidate wins"; useful for synthetic datasets.
    pub fn neutral() -> Self {
        Self {
            process_weights: HashMap::new(),
            input_prefix_weights: Vec::new(),
            smelting_process: SMELTING_PROCESS.to_string(),
        }
    }

    /// Score one recipe. `NEG_INFINITY` means the recipe must never be used.
    pub fn rate(&self, dataset: &Dataset, key: RecipeKey) -> f64 {
        let Some(process) = dataset.process(key) else {
            return f64::NEG_INFINITY;
        };
        let Some(recipe) = process.recipes.get(key.recipe) else {
            return f64::NEG_INFINITY;
        };

        let mut rating = self.process_weights.get(&process.id).copied().unwrap_or(0.0);
        for stack in &recipe.inputs {
            for (prefix, weight) in &self.input_prefix_weights {
                if stack.item.starts_with(prefix) {
                    rating += weight;
                }
            }
        }
        rating
    }

    /// Pick the best-rated candidate, or `None` if the set is empty or every
    /// candidate is banned -- the caller treats that as "raw material".
    /// Ties break toward the earlier candidate (stable).
    pub fn select(&self, dataset: &Dataset, candidates: &[RecipeKey]) -> Option<ChosenRecipe> {
        let mut best: Option<(RecipeKey, f64)> = None;
        for &key in candidates {
            let rating = self.rate(dataset, key);
            if rating == f64::NEG_INFINITY {
                continue;
            }
            if best.is_none_or(|(_, r)| rating > r) {
                best = Some((key, rating));
            }
        }

        let (key, _) = best?;
        let mut recipe = dataset.recipe(key)?.clone();
        if dataset.process(key)?.id == self.smelting_process {
            collapse_smelting_inputs(&mut recipe);
        }
        Some(ChosenRecipe { key, recipe })
    }
}

/// Smelting recipes enumerate every functionally-interchangeable ore variant;
/// only one is needed per operation. Keep the preferred representative: the
/// lowest-variant ore form (`..._0:0`, then `..._0:1`), else the first input.
fn collapse_smelting_inputs(recipe: &mut Recipe) {
    if recipe.inputs.is_empty() {
        return;
    }
    let representative = recipe
        .inputs
        .iter()
        .find(|s| s.item.as_str().ends_with("_0:0"))
        .or_else(|| recipe.inputs.iter().find(|s| s.item.as_str().ends_with("_0:1")))
        .unwrap_or(&recipe.inputs[0])
        .clone();
    recipe.inputs = vec![representative];
}
