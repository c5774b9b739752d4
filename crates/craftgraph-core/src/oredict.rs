//! Ore-dictionary equivalence groups and recipe normalization.
//!
//! A recipe dump emits ore-dictionary wildcards as several consecutive input
//! entries, one per concrete variant. Normalization collapses each such run
//! back into a single entry carrying the group tag as its item id, so the
//! recipe is expressed in terms of the most specific group(s) instead of an
//! enumeration of concrete items.

use crate::id::ItemId;
use crate::item::Stack;
use crate::recipe::{Dataset, Recipe};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One equivalence group: a tag naming an ordered set of interchangeable
/// member item ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OredictGroup {
    pub tag: String,
    pub members: Vec<ItemId>,
}

/// All equivalence groups of a dataset, in insertion order, with an inverse
/// index from member item id to the groups containing it. Membership is
/// many-to-many: one item may belong to several groups.
///
/// Member ids are stored canonicalized (implicit `:0` suffix applied), and
/// queries are canonicalized the same way, so bare and `:0`-suffixed ids are
/// the same token throughout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OredictTable {
    groups: Vec<OredictGroup>,
    by_tag: HashMap<String, usize>,
    inverse: HashMap<ItemId, Vec<usize>>,
}

impl OredictTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a group. Replaces the member list if the tag already exists
    /// (keeping the tag's original position).
    pub fn insert(&mut self, tag: impl Into<String>, members: Vec<ItemId>) {
        let tag = tag.into();
        let members: Vec<ItemId> = members.iter().map(ItemId::with_default_variant).collect();

        let index = match self.by_tag.get(&tag) {
            Some(&index) => {
                // Unlink the old members before replacing, or the inverse
                // would keep reporting membership the group no longer has.
                let old = std::mem::replace(&mut self.groups[index].members, members);
                for member in old {
                    if let Some(entry) = self.inverse.get_mut(&member) {
                        entry.retain(|&i| i != index);
                        if entry.is_empty() {
                            self.inverse.remove(&member);
                        }
                    }
                }
                index
            }
            None => {
                let index = self.groups.len();
                self.groups.push(OredictGroup {
                    tag: tag.clone(),
                    members,
                });
                self.by_tag.insert(tag, index);
                index
            }
        };

        for member in self.groups[index].members.clone() {
            let entry = self.inverse.entry(member).or_default();
            if !entry.contains(&index) {
                entry.push(index);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn members(&self, tag: &str) -> Option<&[ItemId]> {
        self.by_tag
            .get(tag)
            .map(|&i| self.groups[i].members.as_slice())
    }

    /// Groups containing `item`, in group insertion order.
    pub fn groups_for(&self, item: &ItemId) -> impl Iterator<Item = &OredictGroup> {
        self.inverse
            .get(&item.with_default_variant())
            .into_iter()
            .flatten()
            .map(|&i| &self.groups[i])
    }

    /// Iterate all groups in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &OredictGroup> {
        self.groups.iter()
    }
}

/// A contiguous run of recipe inputs that exactly matches one group's member
/// list, recorded during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RunMatch {
    group: usize,
    start: usize,
    len: usize,
}

impl RunMatch {
    fn overlaps(&self, other: &RunMatch) -> bool {
        self.start < other.start + other.len && other.start < self.start + self.len
    }
}

/// Collapse every matched ore-dictionary run in `recipe`'s inputs into a
/// single entry carrying the group tag as its item id. Outputs and the
/// recipe/process boundary are never touched; inputs not covered by any match
/// are kept as-is.
pub fn normalize_recipe(recipe: &mut Recipe, oredict: &OredictTable) {
    let canonical: Vec<ItemId> = recipe
        .inputs
        .iter()
        .map(|s| s.item.with_default_variant())
        .collect();

    // Groups that contain at least one input, in input-then-group order.
    let mut group_indices: Vec<usize> = Vec::new();
    for item in &canonical {
        for &index in oredict.inverse.get(item).into_iter().flatten() {
            if !group_indices.contains(&index) {
                group_indices.push(index);
            }
        }
    }

    // Every contiguous run whose items, in order, exactly equal a group's
    // member list. Group length must match run length exactly.
    let mut candidates: Vec<RunMatch> = Vec::new();
    for &group in &group_indices {
        let members = &oredict.groups[group].members;
        if members.is_empty() || members.len() > canonical.len() {
            continue;
        }
        for start in 0..=canonical.len() - members.len() {
            if canonical[start..start + members.len()] == members[..] {
                candidates.push(RunMatch {
                    group,
                    start,
                    len: members.len(),
                });
            }
        }
    }

    // Local greedy overlap resolution: a candidate survives only if it is
    // strictly longer than every already-accepted candidate it intersects
    // (ties keep the earlier discovery).
    let mut accepted: Vec<RunMatch> = Vec::new();
    for candidate in candidates {
        let conflicting: Vec<usize> = accepted
            .iter()
            .enumerate()
            .filter(|(_, a)| a.overlaps(&candidate))
            .map(|(i, _)| i)
            .collect();
        if conflicting.iter().all(|&i| candidate.len > accepted[i].len) {
            for &i in conflicting.iter().rev() {
                accepted.remove(i);
            }
            accepted.push(candidate);
        }
    }
    accepted.sort_by_key(|m| m.start);

    // Rebuild the input list, replacing each surviving run's first entry with
    // the group tag and dropping the rest of the run.
    let mut inputs = Vec::with_capacity(recipe.inputs.len());
    let mut next_match = accepted.iter().peekable();
    let mut i = 0;
    while i < recipe.inputs.len() {
        match next_match.peek() {
            Some(m) if m.start == i => {
                inputs.push(Stack {
                    item: ItemId::new(oredict.groups[m.group].tag.clone()),
                    count: recipe.inputs[i].count,
                });
                i += m.len;
                next_match.next();
            }
            _ => {
                inputs.push(recipe.inputs[i].clone());
                i += 1;
            }
        }
    }
    recipe.inputs = inputs;
}

/// Normalize every recipe of every process in place.
pub fn normalize_dataset(dataset: &mut Dataset, oredict: &OredictTable) {
    for process in &mut dataset.processes {
        for recipe in &mut process.recipes {
            normalize_recipe(recipe, oredict);
        }
    }
}
