//! Craftgraph Core -- recipe graph resolution and production-tree synthesis.
//!
//! This crate turns a raw crafting-recipe dump (as exported from a modded-game
//! recipe dumper) into something a browser UI can ask questions of: what
//! produces an item, what consumes it, and what does a full production chain
//! for it look like.
//!
//! # Pipeline
//!
//! The data flows one way through four stages:
//!
//! 1. **Normalize** -- [`oredict::normalize_dataset`] collapses runs of
//!    ore-dictionary variant inputs into a single tagged entry, so recipes
//!    are expressed in terms of equivalence groups instead of enumerations.
//! 2. **Index** -- [`index::RecipeIndex`] builds by-output and by-input
//!    lookup tables over every recipe, keyed by item id.
//! 3. **Solve** -- [`solve::Synthesizer`] expands a root item into a bounded
//!    production tree, choosing the best producing recipe for each input via
//!    the weight tables in [`rate::RatingTables`].
//! 4. **Layout** -- [`layout::align_tree`] assigns non-overlapping positions
//!    to the tree, producers above consumers.
//!
//! # Key Types
//!
//! - [`recipe::Dataset`] -- immutable item catalog + ordered process list.
//!   Every component takes it by shared reference; there is no global state.
//! - [`id::RecipeKey`] -- stable `(process, recipe)` pair identifying one
//!   recipe within a loaded dataset, formatted as `"<i>.<j>"`.
//! - [`oredict::OredictTable`] -- equivalence groups plus the inverse
//!   item-to-groups index used to expand lookups.
//! - [`solve::ProductionNode`] -- one step of a synthesized tree. Owned
//!   exclusively by its parent; no back references, no shared ownership.
//!
//! The core is purely computational: single threaded, no I/O, and infallible
//! by design -- a missing recipe is an empty result, never an error. Parsing
//! and load errors live in the companion data crate.

pub mod id;
pub mod index;
pub mod item;
pub mod layout;
pub mod oredict;
pub mod rate;
pub mod recipe;
pub mod solve;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
