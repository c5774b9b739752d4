//! Ore-dictionary source parsing and expansion.
//!
//! The dump's `oredict.txt` is a sequence of line-oriented blocks:
//!
//! ```text
//! Ore entries for <logWood>
//! <minecraft:log:*>
//! <minecraft:log2:*>
//! ```
//!
//! A member id ending in `:*` stands for every numeric variant of that
//! prefix present in the item catalog; ids without an explicit numeric
//! suffix are implicitly `:0`. Both expansions happen here, before the
//! groups ever reach the core table.

use craftgraph_core::id::ItemId;
use craftgraph_core::oredict::OredictTable;
use std::collections::HashMap;

/// Corrections for group definitions the upstream dumper gets wrong (members
/// of unrelated mods leaking in, or variants the dumper truncates). Applied
/// after parsing and before wildcard expansion; the listed members replace
/// the parsed ones wholesale.
const GROUP_OVERRIDES: &[(&str, &[&str])] = &[
    ("plankWood", &["minecraft:planks:*"]),
    ("stickWood", &["minecraft:stick"]),
    ("craftingToolSaw", &["gregtech:saw"]),
];

/// Parse the raw blocks into (tag, members) in file order. Member lines
/// before the first header and lines without angle brackets are skipped.
pub fn parse_oredict(src: &str) -> Vec<(String, Vec<ItemId>)> {
    let mut groups: Vec<(String, Vec<ItemId>)> = Vec::new();
    for line in src.lines() {
        if let Some(rest) = line.strip_prefix("Ore entries for") {
            if let Some(tag) = bracketed(rest) {
                groups.push((tag.to_string(), Vec::new()));
            }
        } else if let Some((_, members)) = groups.last_mut() {
            if let Some(id) = bracketed(line) {
                members.push(ItemId::new(id));
            }
        }
    }
    groups
}

fn bracketed(line: &str) -> Option<&str> {
    let start = line.find('<')?;
    let end = line.rfind('>')?;
    let inner = line.get(start + 1..end)?;
    (!inner.is_empty()).then_some(inner)
}

/// Expand one raw member list against the item catalog: wildcards become one
/// concrete entry per existing numeric variant (ascending), concrete ids get
/// the implicit `:0` suffix. A wildcard with no catalog variants expands to
/// nothing.
pub fn expand_members(members: &[ItemId], catalog: &HashMap<ItemId, String>) -> Vec<ItemId> {
    let mut expanded = Vec::new();
    for member in members {
        match member.wildcard_prefix() {
            Some(prefix) => {
                let mut variants: Vec<(u32, ItemId)> = catalog
                    .keys()
                    .filter(|id| {
                        id.as_str()
                            .strip_prefix(prefix)
                            .and_then(|rest| rest.strip_prefix(':'))
                            .is_some_and(|v| v.bytes().all(|b| b.is_ascii_digit()))
                    })
                    .map(|id| (id.variant().unwrap_or(0), id.with_default_variant()))
                    .collect();
                variants.sort();
                expanded.extend(variants.into_iter().map(|(_, id)| id));
            }
            None => expanded.push(member.with_default_variant()),
        }
    }
    expanded
}

/// Parse, correct, and expand the oredict source into the core table.
pub fn build_oredict(src: &str, catalog: &HashMap<ItemId, String>) -> OredictTable {
    let mut groups = parse_oredict(src);
    for (tag, members) in &mut groups {
        if let Some((_, correct)) = GROUP_OVERRIDES.iter().find(|(t, _)| t == tag) {
            *members = correct.iter().map(|&m| ItemId::new(m)).collect();
        }
    }

    let mut table = OredictTable::new();
    for (tag, members) in groups {
        table.insert(tag, expand_members(&members, catalog));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(ids: &[&str]) -> HashMap<ItemId, String> {
        ids.iter()
            .map(|&id| (ItemId::new(id), String::new()))
            .collect()
    }

    #[test]
    fn parses_blocks_in_file_order() {
        let groups = parse_oredict(
            "Ore entries for <ingotIron>\n\
             <minecraft:iron_ingot>\n\
             <gregtech:meta_ingot:32>\n\
             Ore entries for <logWood>\n\
             <minecraft:log:*>\n",
        );
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "ingotIron");
        assert_eq!(
            groups[0].1,
            vec![
                ItemId::new("minecraft:iron_ingot"),
                ItemId::new("gregtech:meta_ingot:32"),
            ]
        );
        assert_eq!(groups[1].1, vec![ItemId::new("minecraft:log:*")]);
    }

    #[test]
    fn stray_member_lines_before_any_header_are_dropped() {
        let groups = parse_oredict("<mod:orphan:0>\nOre entries for <gemA>\n<mod:gem:0>\n");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].1, vec![ItemId::new("mod:gem:0")]);
    }

    #[test]
    fn wildcard_expands_to_catalog_variants_in_order() {
        let catalog = catalog(&[
            "minecraft:log:2",
            "minecraft:log:0",
            "minecraft:log:1",
            "minecraft:log_cabin:0", // different item, must not match
            "minecraft:stone:0",
        ]);
        let expanded = expand_members(&[ItemId::new("minecraft:log:*")], &catalog);
        assert_eq!(
            expanded,
            vec![
                ItemId::new("minecraft:log:0"),
                ItemId::new("minecraft:log:1"),
                ItemId::new("minecraft:log:2"),
            ]
        );
    }

    #[test]
    fn wildcard_with_no_variants_expands_to_nothing() {
        let expanded = expand_members(&[ItemId::new("mod:ghost:*")], &catalog(&[]));
        assert!(expanded.is_empty());
    }

    #[test]
    fn bare_ids_get_default_variant() {
        let expanded = expand_members(&[ItemId::new("minecraft:stick")], &catalog(&[]));
        assert_eq!(expanded, vec![ItemId::new("minecraft:stick:0")]);
    }

    #[test]
    fn overrides_replace_parsed_members() {
        let src = "Ore entries for <stickWood>\n<mod:bogus_stick:0>\n";
        let table = build_oredict(src, &catalog(&["minecraft:stick:0"]));
        assert_eq!(
            table.members("stickWood").unwrap(),
            &[ItemId::new("minecraft:stick:0")]
        );
    }

    #[test]
    fn build_produces_queryable_table() {
        let src = "Ore entries for <logWood>\n<minecraft:log:*>\n";
        let table = build_oredict(src, &catalog(&["minecraft:log:0", "minecraft:log:1"]));
        let tags: Vec<_> = table
            .groups_for(&"minecraft:log:1".into())
            .map(|g| g.tag.clone())
            .collect();
        assert_eq!(tags, vec!["logWood".to_string()]);
    }
}
