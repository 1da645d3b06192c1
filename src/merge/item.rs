//! Items and the Item Store
//!
//! The capability seams the controller works through: [`MergeItem`] is a
//! placed object, [`MergeHandler`] its effect playback, [`ItemFactory`] the
//! host's spawner. Live items are owned by an [`ItemStore`] and referenced
//! everywhere else by [`ItemId`], so the controller, drag tasks and merge
//! routines never hold aliasing borrows into the scene.

use glam::Vec3;

use std::collections::HashMap;

use super::data::KindId;

/// Stable handle to a live item. Ids are never reused within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(u32);

impl ItemId {
    /// Build an id from its raw value. Mostly useful in tests; store
    /// handles are normally obtained from [`ItemStore::insert`].
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }
}

/// Effect playback capability of an item.
///
/// Everything here is fire-and-forget except the merge effect, which is
/// asynchronous: `begin_merge_effect` starts it and the merge routine polls
/// `merge_effect_finished` once per tick until it reports completion.
pub trait MergeHandler {
    fn on_spawned(&mut self);
    fn on_grabbed(&mut self);
    fn on_dropped(&mut self);
    /// This item became a merge candidate for the grabbed item.
    fn on_selected_to_merge(&mut self);
    /// The grabbed item was released; this item is no longer a candidate.
    fn on_rejected_to_merge(&mut self);
    /// Start the asynchronous merge effect (shrink, fade, ...).
    fn begin_merge_effect(&mut self);
    /// Whether the merge effect started by `begin_merge_effect` has played
    /// out. Must keep answering `true` once finished.
    fn merge_effect_finished(&self) -> bool;
}

/// A placed, mergeable object.
pub trait MergeItem {
    /// Identity key of this item's kind.
    fn kind(&self) -> KindId;
    /// Whether the item is currently eligible for interaction.
    fn can_merge(&self) -> bool;
    fn set_can_merge(&mut self, can_merge: bool);
    /// World position.
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    /// Point the item moves toward while dragged (or settling).
    fn target_point(&self) -> Vec3;
    fn set_target_point(&mut self, point: Vec3);
    /// Effect playback capability.
    fn handler(&mut self) -> &mut dyn MergeHandler;
}

/// Creates live items from kind definitions.
///
/// The factory owns whatever template data the host needs (prefabs, visual
/// configs); the merge routine only hands it a kind, a world point and a
/// facing direction.
pub trait ItemFactory<I: MergeItem> {
    fn spawn(&mut self, kind: KindId, position: Vec3, forward: Vec3) -> I;
}

/// Owner of all live items, keyed by [`ItemId`].
#[derive(Debug, Clone, Default)]
pub struct ItemStore<I> {
    items: HashMap<ItemId, I>,
    next_id: u32,
}

impl<I> ItemStore<I> {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            next_id: 0,
        }
    }

    /// Take ownership of an item and return its handle.
    pub fn insert(&mut self, item: I) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.insert(id, item);
        id
    }

    /// Destroy an item, returning it if it was still live.
    pub fn remove(&mut self, id: ItemId) -> Option<I> {
        self.items.remove(&id)
    }

    pub fn get(&self, id: ItemId) -> Option<&I> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut I> {
        self.items.get_mut(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &I)> {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ItemId, &mut I)> {
        self.items.iter_mut().map(|(id, item)| (*id, item))
    }
}
