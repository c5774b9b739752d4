//! Item catalog parsing.
//!
//! The dump's `names.txt` is line oriented; each useful line carries the item
//! id in angle brackets and the display name as the second element of a
//! trailing quoted pair:
//!
//! ```text
//! <minecraft:stone> -> itemstack:"1xtile.stone@0","Stone"
//! ```

use craftgraph_core::id::ItemId;
use std::collections::HashMap;

/// Parse the catalog. Lines without an id or display name are skipped; a
/// later line for the same id wins, matching the original generator.
pub fn parse_names(src: &str) -> HashMap<ItemId, String> {
    let mut names = HashMap::new();
    for line in src.lines() {
        let Some((id, display)) = parse_line(line) else {
            continue;
        };
        names.insert(ItemId::new(id), display.to_string());
    }
    names
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let start = line.find('<')?;
    let end = line.rfind('>')?;
    let id = line.get(start + 1..end)?;

    let rest = &line[end + 1..];
    let sep = rest.find("\",\"")?;
    let tail = &rest[sep + 3..];
    let display = &tail[..tail.rfind('"')?];

    if id.is_empty() || display.is_empty() {
        return None;
    }
    Some((id, display))
}
