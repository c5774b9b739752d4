//! Dataset loading for craftgraph: parses the raw text/JSON exports of a
//! modded-game recipe dump into the core's immutable [`Dataset`], builds the
//! lookup index, and persists/reloads the index artifacts.
//!
//! The core itself never does I/O; everything fallible lives here. A missing
//! or unparsable required file fails the whole load fast -- there is no
//! partial pack.
//!
//! [`Dataset`]: craftgraph_core::recipe::Dataset

pub mod artifact;
pub mod loader;
pub mod names;
pub mod oredict_src;
pub mod schema;
