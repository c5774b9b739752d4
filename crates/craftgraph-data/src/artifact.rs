//! Persisted index artifacts.
//!
//! The browser's loading layer persists four lookup tables next to the
//! processed dataset: by-output (`recipes_r`), by-input (`recipes_u`), the
//! oredict groups, and the inverse oredict. Each is serialized as an ordered
//! sequence of `(key, value-list)` pairs -- never a keyed record -- so
//! arbitrary string keys and insertion order survive the round trip. Recipe
//! keys travel as `"<process>.<recipe>"` strings.

use craftgraph_core::id::{ItemId, ParseRecipeKeyError, RecipeKey};
use craftgraph_core::index::RecipeIndex;
use craftgraph_core::oredict::OredictTable;
use serde::{Deserialize, Serialize};

/// An ordered multimap flattened for persistence.
pub type PairSeq = Vec<(String, Vec<String>)>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexArtifacts {
    /// Item id -> recipes producing it.
    pub recipes_r: PairSeq,
    /// Item id -> recipes consuming it.
    pub recipes_u: PairSeq,
    /// Group tag -> member item ids.
    pub oredict: PairSeq,
    /// Member item id -> group tags containing it.
    pub oredict_inv: PairSeq,
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("artifact JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    BadRecipeKey(#[from] ParseRecipeKeyError),
}

impl IndexArtifacts {
    /// Flatten a built index and oredict table. The inverse table is derived
    /// here by walking groups in insertion order, so its key order is the
    /// first-appearance order of members.
    pub fn build(index: &RecipeIndex, oredict: &OredictTable) -> Self {
        let recipes_r = index
            .producers_entries()
            .map(|(item, keys)| key_pair(item, keys))
            .collect();
        let recipes_u = index
            .consumers_entries()
            .map(|(item, keys)| key_pair(item, keys))
            .collect();

        let oredict_pairs: PairSeq = oredict
            .iter()
            .map(|group| {
                (
                    group.tag.clone(),
                    group.members.iter().map(|m| m.to_string()).collect(),
                )
            })
            .collect();

        let mut oredict_inv: PairSeq = Vec::new();
        for group in oredict.iter() {
            for member in &group.members {
                match oredict_inv.iter_mut().find(|(k, _)| k == member.as_str()) {
                    Some((_, tags)) => tags.push(group.tag.clone()),
                    None => oredict_inv.push((member.to_string(), vec![group.tag.clone()])),
                }
            }
        }

        Self {
            recipes_r,
            recipes_u,
            oredict: oredict_pairs,
            oredict_inv,
        }
    }

    pub fn to_json(&self) -> Result<String, ArtifactError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ArtifactError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse one flattened recipe table back into typed keys, preserving
    /// entry order. Fails fast on a malformed key string.
    pub fn parse_recipe_keys(
        pairs: &PairSeq,
    ) -> Result<Vec<(ItemId, Vec<RecipeKey>)>, ArtifactError> {
        pairs
            .iter()
            .map(|(item, keys)| {
                let keys = keys
                    .iter()
                    .map(|k| k.parse::<RecipeKey>())
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((ItemId::new(item.clone()), keys))
            })
            .collect()
    }
}

fn key_pair(item: &ItemId, keys: &[RecipeKey]) -> (String, Vec<String>) {
    (
        item.to_string(),
        keys.iter().map(RecipeKey::to_string).collect(),
    )
}
