//! Merge Resolution
//!
//! The eligibility predicate and the two-phase asynchronous merge routine.
//! Phase one plays both items' merge effects and waits for *both* to finish
//! (a join; cleanup must never interrupt a playing effect). Phase two
//! spawns the result, destroys the sources and hands the new item back to
//! the controller. Once begun, a routine always runs to completion; there
//! is no cancellation hook.

use glam::Vec3;

use super::data::{KindId, KindLibrary};
use super::item::{ItemFactory, ItemId, ItemStore, MergeItem};
use super::slot::PlacementSlot;

/// Merge eligibility: kinds equal by identity, and the first item's kind
/// has a merge result. The result is always taken from the first
/// argument's link.
pub fn merge_result_for<I: MergeItem>(
    store: &ItemStore<I>,
    library: &KindLibrary,
    first: ItemId,
    second: ItemId,
) -> Option<KindId> {
    let a = store.get(first)?;
    let b = store.get(second)?;
    if a.kind() != b.kind() {
        return None;
    }
    library.merge_result(a.kind())
}

/// Where a merge result appears.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum MergePlacement {
    /// Free mode: at a world point, default facing.
    AtPoint(Vec3),
    /// Slot mode: on the slot's point, facing the slot's forward direction.
    InSlot(usize),
}

/// Outcome of one routine tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MergeStatus {
    Pending,
    Finished(ItemId),
}

/// A merge in flight: both sources are already non-interactable and out of
/// the available collection; their effects are playing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MergeRoutine {
    first: ItemId,
    second: ItemId,
    result: KindId,
    placement: MergePlacement,
}

impl MergeRoutine {
    pub fn new(first: ItemId, second: ItemId, result: KindId, placement: MergePlacement) -> Self {
        Self {
            first,
            second,
            result,
            placement,
        }
    }

    /// Poll the effect join; on completion swap the sources for the result.
    pub fn tick<I: MergeItem>(
        &self,
        store: &mut ItemStore<I>,
        available: &mut Vec<ItemId>,
        slots: &mut [PlacementSlot],
        factory: &mut dyn ItemFactory<I>,
    ) -> MergeStatus {
        // A missing source counts as finished so a routine can never wedge
        // the controller.
        let first_done = store
            .get_mut(self.first)
            .is_none_or(|item| item.handler().merge_effect_finished());
        let second_done = store
            .get_mut(self.second)
            .is_none_or(|item| item.handler().merge_effect_finished());
        if !(first_done && second_done) {
            return MergeStatus::Pending;
        }

        let (point, forward) = match self.placement {
            MergePlacement::AtPoint(point) => (point, Vec3::Z),
            MergePlacement::InSlot(index) => (slots[index].point, slots[index].forward),
        };

        let mut item = factory.spawn(self.result, point, forward);
        item.set_target_point(point);
        item.handler().on_spawned();
        item.set_can_merge(true);
        let id = store.insert(item);
        available.push(id);

        if let MergePlacement::InSlot(index) = self.placement {
            slots[index].set_occupant(id);
        }

        store.remove(self.first);
        store.remove(self.second);

        MergeStatus::Finished(id)
    }
}
