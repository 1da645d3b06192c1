//! Controller Events
//!
//! Lifecycle notifications for external observers (UI, audio, scoring).
//! Delivery is synchronous and in order, on the same tick the transition
//! happens; every subscriber sees every event.

use super::data::KindId;
use super::item::ItemId;

/// Notifications emitted by the merge controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeEvent {
    /// An item was picked up.
    ItemGrabbed(ItemId),
    /// The grabbed item was released without merging.
    ItemDropped(ItemId),
    /// A merge was accepted; resolution started for this result kind.
    MergeStarted(KindId),
    /// Resolution finished; the new item is live and interactable.
    ItemMerged(ItemId),
}

/// Synchronous observer list.
#[derive(Default)]
pub struct EventObservers {
    observers: Vec<Box<dyn FnMut(MergeEvent)>>,
}

impl EventObservers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Observers are invoked in subscription order.
    pub fn subscribe(&mut self, observer: impl FnMut(MergeEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Deliver an event to every observer.
    pub fn emit(&mut self, event: MergeEvent) {
        for observer in &mut self.observers {
            observer(event);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}
