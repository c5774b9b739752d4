//! Pack loading pipeline: reads a pack directory, parses every required
//! file, normalizes, and builds the index plus persisted artifacts.
//!
//! A pack directory contains `names.txt`, `oredict.txt`, and a recipe dump
//! `recipes.{json,ron,toml}` (format detected by extension). Any missing or
//! unparsable required file fails the whole load.

use crate::artifact::IndexArtifacts;
use crate::names::parse_names;
use crate::oredict_src::build_oredict;
use crate::schema::{RawDumpToml, RawProcess, into_processes};
use craftgraph_core::index::RecipeIndex;
use craftgraph_core::oredict::{OredictTable, normalize_dataset};
use craftgraph_core::recipe::Dataset;
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during pack loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required pack file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: &'static str, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two recipe dumps with different formats exist side by side.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection and file discovery
// ===========================================================================

/// Supported recipe dump formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Ron,
    Toml,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

/// Scan a directory for `{base_name}.json`, `.ron`, or `.toml`. Returns
/// `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if multiple
/// formats exist for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;
    for ext in ["json", "ron", "toml"] {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(ref existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing.clone(),
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }
    Ok(found)
}

fn require_text_file(dir: &Path, file: &'static str) -> Result<String, DataLoadError> {
    let path = dir.join(file);
    if !path.exists() {
        return Err(DataLoadError::MissingRequired {
            file,
            dir: dir.to_path_buf(),
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

fn read_dump(path: &Path) -> Result<Vec<RawProcess>, DataLoadError> {
    let content = std::fs::read_to_string(path)?;
    let parse_err = |detail: String| DataLoadError::Parse {
        file: path.to_path_buf(),
        detail,
    };
    match detect_format(path)? {
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_err(e.to_string())),
        Format::Ron => ron::from_str(&content).map_err(|e| parse_err(e.to_string())),
        Format::Toml => toml::from_str::<RawDumpToml>(&content)
            .map(|dump| dump.processes)
            .map_err(|e| parse_err(e.to_string())),
    }
}

// ===========================================================================
// Pack loading
// ===========================================================================

/// Everything a loaded pack provides: the normalized dataset, the oredict
/// table, the built index, and the flattened artifacts ready to persist.
#[derive(Debug)]
pub struct LoadedPack {
    pub dataset: Dataset,
    pub oredict: OredictTable,
    pub index: RecipeIndex,
    pub artifacts: IndexArtifacts,
}

/// Load a pack directory end to end: parse the catalog, build and expand the
/// oredict, parse the recipe dump, normalize every recipe against the
/// oredict, and index the result.
pub fn load_pack(dir: &Path) -> Result<LoadedPack, DataLoadError> {
    let names = parse_names(&require_text_file(dir, "names.txt")?);

    let oredict_src = require_text_file(dir, "oredict.txt")?;
    let oredict = build_oredict(&oredict_src, &names);

    let dump_path = find_data_file(dir, "recipes")?.ok_or(DataLoadError::MissingRequired {
        file: "recipes.{json,ron,toml}",
        dir: dir.to_path_buf(),
    })?;
    let processes = into_processes(read_dump(&dump_path)?);

    let mut dataset = Dataset::new(names, processes);
    normalize_dataset(&mut dataset, &oredict);
    let index = RecipeIndex::build(&dataset);
    let artifacts = IndexArtifacts::build(&index, &oredict);

    Ok(LoadedPack {
        dataset,
        oredict,
        index,
        artifacts,
    })
}
