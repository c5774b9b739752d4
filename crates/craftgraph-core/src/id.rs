use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque item identifier, mod-namespace-qualified and optionally carrying
/// a numeric variant suffix (`"minecraft:log:1"`). Item ids come from the
/// dataset; the core never invents them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The trailing numeric variant suffix, if the id has one.
    /// `"minecraft:log:1"` -> `Some(1)`, `"fluid:water"` -> `None`.
    pub fn variant(&self) -> Option<u32> {
        self.0.rsplit_once(':').and_then(|(_, v)| v.parse().ok())
    }

    /// Appends the default `:0` variant suffix if the id has no explicit
    /// numeric suffix, so bare and `:0`-suffixed ids compare equal during
    /// ore-dictionary matching.
    pub fn with_default_variant(&self) -> ItemId {
        if self.variant().is_some() {
            self.clone()
        } else {
            ItemId(format!("{}:0", self.0))
        }
    }

    /// For a wildcard id (`"<ns>:<name>:*"`), the prefix the wildcard covers
    /// (`"<ns>:<name>"`). `None` for concrete ids.
    pub fn wildcard_prefix(&self) -> Option<&str> {
        self.0.strip_suffix(":*")
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable identifier of one recipe within a loaded dataset: the index of its
/// owning process and the recipe's index within that process. Never reused
/// across dataset reloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeKey {
    pub process: usize,
    pub recipe: usize,
}

impl RecipeKey {
    pub fn new(process: usize, recipe: usize) -> Self {
        Self { process, recipe }
    }
}

/// Recipe keys travel through persisted index artifacts as `"<i>.<j>"`.
impl fmt::Display for RecipeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.process, self.recipe)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid recipe key '{0}', expected '<process>.<recipe>'")]
pub struct ParseRecipeKeyError(String);

impl FromStr for RecipeKey {
    type Err = ParseRecipeKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (process, recipe) = s
            .split_once('.')
            .ok_or_else(|| ParseRecipeKeyError(s.to_string()))?;
        let process = process
            .parse()
            .map_err(|_| ParseRecipeKeyError(s.to_string()))?;
        let recipe = recipe
            .parse()
            .map_err(|_| ParseRecipeKeyError(s.to_string()))?;
        Ok(Self { process, recipe })
    }
}

/// Identifies a node within one synthesized production tree. Assigned
/// monotonically from zero per synthesis call, so results are reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_suffix_parsing() {
        assert_eq!(ItemId::new("minecraft:log:1").variant(), Some(1));
        assert_eq!(ItemId::new("gregtech:meta_item_1:461").variant(), Some(461));
        assert_eq!(ItemId::new("fluid:water").variant(), None);
        assert_eq!(ItemId::new("minecraft:log:*").variant(), None);
    }

    #[test]
    fn default_variant_only_added_when_missing() {
        assert_eq!(
            ItemId::new("fluid:water").with_default_variant(),
            ItemId::new("fluid:water:0")
        );
        assert_eq!(
            ItemId::new("minecraft:log:1").with_default_variant(),
            ItemId::new("minecraft:log:1")
        );
    }

    #[test]
    fn wildcard_prefix() {
        assert_eq!(
            ItemId::new("minecraft:log:*").wildcard_prefix(),
            Some("minecraft:log")
        );
        assert_eq!(ItemId::new("minecraft:log:0").wildcard_prefix(), None);
    }

    #[test]
    fn recipe_key_round_trip() {
        let key = RecipeKey::new(12, 345);
        assert_eq!(key.to_string(), "12.345");
        assert_eq!("12.345".parse::<RecipeKey>().unwrap(), key);
    }

    #[test]
    fn recipe_key_rejects_garbage() {
        assert!("12".parse::<RecipeKey>().is_err());
        assert!("a.b".parse::<RecipeKey>().is_err());
        assert!("1.2.3".parse::<RecipeKey>().is_err());
    }
}
