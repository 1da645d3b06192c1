//! Item Kinds
//!
//! Immutable per-type content data: what an item is, and what two of them
//! become when merged. Kinds form a chain (or tree, looking backwards) over
//! the `merge_result` links; the top tier simply has no link. The library
//! is a flat JSON list on disk, mirroring how the rest of the game stores
//! content indexes.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ContentError;

/// Stable identity key for an item kind.
///
/// Kind equality is identity equality: two items are merge partners exactly
/// when their `KindId`s match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KindId(pub u32);

/// Immutable data for one item kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemKind {
    /// Identity key.
    pub id: KindId,
    /// Human-readable display name.
    pub name: String,
    /// Spawn template slug, consumed by the host's item factory.
    pub template: String,
    /// Kind produced when two items of this kind merge. `None` = top tier.
    pub merge_result: Option<KindId>,
}

/// Lookup table of item kinds: the game's merge-chain content.
#[derive(Debug, Clone, Default)]
pub struct KindLibrary {
    kinds: HashMap<KindId, ItemKind>,
}

impl KindLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a kind (deduplicates by id).
    pub fn add_kind(&mut self, kind: ItemKind) {
        self.kinds.insert(kind.id, kind);
    }

    /// Look up a kind by id.
    pub fn get(&self, id: KindId) -> Option<&ItemKind> {
        self.kinds.get(&id)
    }

    /// The kind two items of `id` merge into, if any.
    pub fn merge_result(&self, id: KindId) -> Option<KindId> {
        self.kinds.get(&id).and_then(|kind| kind.merge_result)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Parse a library from a JSON list of kinds.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let kinds: Vec<ItemKind> = serde_json::from_str(json)?;
        let mut library = Self::new();
        for kind in kinds {
            library.add_kind(kind);
        }
        Ok(library)
    }

    /// Load a library from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Validate every merge chain: links must resolve to known kinds and
    /// must not loop. Opt-in at content load time; the controller itself
    /// never walks more than one link.
    pub fn check_merge_chains(&self) -> Result<(), ContentError> {
        for start in self.kinds.keys().copied() {
            let mut visited = HashSet::new();
            let mut current = start;
            visited.insert(current);

            while let Some(next) = self.merge_result(current) {
                if !self.kinds.contains_key(&next) {
                    return Err(ContentError::UnknownKind {
                        kind: next,
                        referenced_by: current,
                    });
                }
                if !visited.insert(next) {
                    return Err(ContentError::MergeCycle(start));
                }
                current = next;
            }
        }
        Ok(())
    }
}
