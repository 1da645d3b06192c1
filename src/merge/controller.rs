//! Merge Controller
//!
//! Top-level orchestrator of the grab/drag/merge interaction. Consumes
//! pointer edges, picks grab targets by view alignment, runs the per-tick
//! drag loop, and on release decides between merging, moving between
//! slots, rejecting a placement, or plain dropping. Merges resolve
//! asynchronously over the following ticks via [`MergeRoutine`]s.
//!
//! Per tick, in order: pointer edges, drag-target refresh for the grabbed
//! item, drag tasks, merge routines. The controller is the single writer
//! of the available collection and of slot occupancy.

use glam::Vec2;
use tracing::debug;

use crate::camera::{DragSurface, GroundPlane, Viewpoint};
use crate::input::{PointerEvent, PointerState};

use super::config::MergeConfig;
use super::data::{KindId, KindLibrary};
use super::drag::{DragTargetResolver, DragTask};
use super::error::SetupError;
use super::events::{EventObservers, MergeEvent};
use super::item::{ItemFactory, ItemId, ItemStore, MergeItem};
use super::resolver::{merge_result_for, MergePlacement, MergeRoutine, MergeStatus};
use super::selection::select_best;
use super::slot::{slot_holding, PlacementSlot};

/// The grab/drag/merge state machine.
///
/// Generic over the host's item type; everything else the controller needs
/// comes in through capability traits at build time.
pub struct MergeController<I: MergeItem> {
    config: MergeConfig,
    /// Active camera used for pointer rays. Host-owned data; update freely.
    pub viewpoint: Viewpoint,
    /// Window size in pixels, for pointer-to-ray conversion.
    pub screen_size: Vec2,
    /// Merge-chain content.
    pub library: KindLibrary,
    /// Owner of all live items.
    pub store: ItemStore<I>,
    /// Items currently eligible to be grabbed or targeted for merging.
    pub available: Vec<ItemId>,
    /// Placement slots; only consulted in slot mode.
    pub slots: Vec<PlacementSlot>,

    input: PointerState,
    surface: Box<dyn DragSurface>,
    factory: Box<dyn ItemFactory<I>>,
    observers: EventObservers,

    enabled: bool,
    use_slots: bool,
    grabbed: Option<ItemId>,
    /// Items compatible with the grabbed one, recomputed on grab.
    suitable: Vec<ItemId>,
    /// Slot the grabbed item came from (slot mode).
    current_slot: Option<usize>,
    drag: DragTargetResolver,
    drag_tasks: Vec<DragTask>,
    merges: Vec<MergeRoutine>,
}

impl<I: MergeItem> MergeController<I> {
    /// Start building a controller.
    pub fn builder() -> MergeControllerBuilder<I> {
        MergeControllerBuilder::new()
    }

    // ------------------------------------------------------------------
    // Public surface
    // ------------------------------------------------------------------

    /// Whether the controller reacts to input.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the controller. Disabling while an item is held
    /// forces an immediate drop; merges already resolving are unaffected.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.force_drop();
        }
    }

    pub fn use_slots(&self) -> bool {
        self.use_slots
    }

    /// Switch between slot and free placement. Re-resolves the drag target
    /// on the next tick.
    pub fn set_use_slots(&mut self, use_slots: bool) {
        self.use_slots = use_slots;
        self.drag.invalidate();
    }

    pub fn grabbed_item(&self) -> Option<ItemId> {
        self.grabbed
    }

    pub fn is_item_grabbed(&self) -> bool {
        self.grabbed.is_some()
    }

    /// Slot nearest the current drag target (slot mode).
    pub fn selected_slot(&self) -> Option<usize> {
        self.drag.selected_slot()
    }

    /// Slot the grabbed item is occupying (slot mode).
    pub fn current_slot(&self) -> Option<usize> {
        self.current_slot
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Whether any merge is still resolving.
    pub fn is_resolving(&self) -> bool {
        !self.merges.is_empty()
    }

    /// Subscribe to lifecycle events (grabbed/dropped/merge-started/merged).
    pub fn observe(&mut self, observer: impl FnMut(MergeEvent) + 'static) {
        self.observers.subscribe(observer);
    }

    /// The pointer the controller listens to; feed window events here.
    pub fn input_mut(&mut self) -> &mut PointerState {
        &mut self.input
    }

    pub fn input(&self) -> &PointerState {
        &self.input
    }

    /// Register a live item and make it interactable.
    pub fn add_item(&mut self, item: I) -> ItemId {
        let id = self.store.insert(item);
        self.available.push(id);
        id
    }

    /// Register an item and claim `slot` for it.
    ///
    /// # Panics
    ///
    /// If `slot` is out of bounds.
    pub fn add_item_in_slot(&mut self, item: I, slot: usize) -> ItemId {
        let id = self.add_item(item);
        self.slots[slot].set_occupant(id);
        id
    }

    // ------------------------------------------------------------------
    // Tick
    // ------------------------------------------------------------------

    /// Advance one simulation tick.
    pub fn update(&mut self, dt: f32) {
        for event in self.input.drain_events() {
            match event {
                PointerEvent::Pressed => self.try_grab(),
                PointerEvent::Released => self.try_merge_or_drop(),
            }
        }

        self.refresh_drag_target();
        self.tick_drag_tasks(dt);
        self.tick_merges();
    }

    fn refresh_drag_target(&mut self) {
        if !self.enabled {
            return;
        }
        let Some(grabbed) = self.grabbed else { return };

        let slots = self.use_slots.then_some(self.slots.as_slice());
        let target = self.drag.refresh(
            self.input.position(),
            &self.viewpoint,
            self.screen_size,
            self.surface.as_ref(),
            self.config.drag_max_distance,
            slots,
        );

        if let Some(point) = target {
            if let Some(item) = self.store.get_mut(grabbed) {
                item.set_target_point(point);
            }
        }
    }

    fn tick_drag_tasks(&mut self, dt: f32) {
        let grabbed = self.grabbed;
        let motion = self.config.drag_motion;
        let speed = self.config.drag_speed;
        let store = &mut self.store;
        self.drag_tasks
            .retain(|task| task.tick(store, grabbed, motion, speed, dt));
    }

    fn tick_merges(&mut self) {
        let mut index = 0;
        while index < self.merges.len() {
            let status = self.merges[index].tick(
                &mut self.store,
                &mut self.available,
                &mut self.slots,
                self.factory.as_mut(),
            );
            match status {
                MergeStatus::Pending => index += 1,
                MergeStatus::Finished(id) => {
                    self.merges.remove(index);
                    debug!(item = ?id, "merge resolved");
                    self.observers.emit(MergeEvent::ItemMerged(id));
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Grab
    // ------------------------------------------------------------------

    fn try_grab(&mut self) {
        if !self.enabled || self.grabbed.is_some() || self.available.is_empty() {
            return;
        }

        let ray = self.viewpoint.pointer_ray(self.input.position(), self.screen_size);
        let Some((id, score)) = select_best(
            self.viewpoint.position,
            ray.direction,
            &self.available,
            &self.store,
            self.config.grab_threshold,
        ) else {
            return;
        };
        let Some(kind) = self.store.get(id).map(|item| item.kind()) else {
            return;
        };

        self.grabbed = Some(id);
        if let Some(item) = self.store.get_mut(id) {
            item.handler().on_grabbed();
        }
        self.current_slot = if self.use_slots {
            slot_holding(&self.slots, id)
        } else {
            None
        };

        self.drag.invalidate();
        if !self.drag_tasks.iter().any(|task| task.item == id) {
            self.drag_tasks.push(DragTask { item: id });
        }

        self.suitable = if self.library.merge_result(kind).is_some() {
            self.available
                .iter()
                .copied()
                .filter(|&other| {
                    other != id
                        && self
                            .store
                            .get(other)
                            .is_some_and(|item| item.kind() == kind)
                })
                .collect()
        } else {
            Vec::new()
        };
        for index in 0..self.suitable.len() {
            let other = self.suitable[index];
            if let Some(item) = self.store.get_mut(other) {
                item.handler().on_selected_to_merge();
            }
        }

        debug!(item = ?id, score, candidates = self.suitable.len(), "item grabbed");
        self.observers.emit(MergeEvent::ItemGrabbed(id));
    }

    // ------------------------------------------------------------------
    // Release
    // ------------------------------------------------------------------

    fn try_merge_or_drop(&mut self) {
        if !self.enabled {
            return;
        }
        let Some(grabbed) = self.grabbed else { return };

        self.reject_suitable();

        if self.use_slots {
            if self.try_slot_release(grabbed) {
                return;
            }
        } else if self.try_free_merge(grabbed) {
            return;
        }

        self.drop_grabbed(grabbed);
    }

    /// Slot-mode release. Returns `true` when a merge began (everything
    /// else, including a slot move or a rejected placement, still ends
    /// in a drop).
    fn try_slot_release(&mut self, grabbed: ItemId) -> bool {
        let Some(selected) = self.drag.selected_slot() else {
            return false;
        };
        let Some(occupant) = self.slots.get(selected).map(|slot| slot.occupant()) else {
            return false;
        };

        match occupant {
            Some(occupant) if occupant != grabbed => {
                if let Some(result) =
                    merge_result_for(&self.store, &self.library, grabbed, occupant)
                {
                    self.begin_merge(grabbed, occupant, result, MergePlacement::InSlot(selected));
                    return true;
                }
                // Incompatible occupant: send the item back to its own
                // slot; it settles there over the next ticks.
                if let Some(current) = self.current_slot {
                    let home = self.slots[current].point;
                    if let Some(item) = self.store.get_mut(grabbed) {
                        item.set_target_point(home);
                    }
                    debug!(item = ?grabbed, slot = current, "placement rejected");
                }
            }
            Some(_) => {} // released over its own slot
            None => {
                self.slots[selected].set_occupant(grabbed);
                if let Some(current) = self.current_slot {
                    if current != selected {
                        self.slots[current].vacate();
                    }
                }
                debug!(item = ?grabbed, slot = selected, "moved to empty slot");
            }
        }
        false
    }

    /// Free-mode release: re-rank the suitable set by the release ray and
    /// merge with the best partner above the merge threshold, if any.
    fn try_free_merge(&mut self, grabbed: ItemId) -> bool {
        if self.suitable.is_empty() {
            return false;
        }

        let ray = self.viewpoint.pointer_ray(self.input.position(), self.screen_size);
        let Some((partner, score)) = select_best(
            self.viewpoint.position,
            ray.direction,
            &self.suitable,
            &self.store,
            self.config.merge_threshold,
        ) else {
            return false;
        };

        let Some(result) = merge_result_for(&self.store, &self.library, grabbed, partner) else {
            return false;
        };
        let Some(point) = self.store.get(partner).map(|item| item.position()) else {
            return false;
        };

        debug!(item = ?partner, score, "merge partner accepted");
        self.begin_merge(grabbed, partner, result, MergePlacement::AtPoint(point));
        true
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Begin a two-phase merge. Both sources leave the available
    /// collection immediately; destruction waits for the effect join.
    fn begin_merge(
        &mut self,
        first: ItemId,
        second: ItemId,
        result: KindId,
        placement: MergePlacement,
    ) {
        debug!(?first, ?second, result = ?result, "merge started");
        self.observers.emit(MergeEvent::MergeStarted(result));

        for id in [first, second] {
            if let Some(item) = self.store.get_mut(id) {
                item.set_can_merge(false);
            }
        }
        self.available.retain(|&id| id != first && id != second);

        self.grabbed = None;
        self.suitable.clear();
        if let MergePlacement::InSlot(_) = placement {
            if let Some(current) = self.current_slot.take() {
                self.slots[current].vacate();
            }
        }
        self.current_slot = None;

        for id in [first, second] {
            if let Some(item) = self.store.get_mut(id) {
                item.handler().begin_merge_effect();
            }
        }

        self.merges
            .push(MergeRoutine::new(first, second, result, placement));
    }

    /// Transition 2: release without a merge.
    fn drop_grabbed(&mut self, grabbed: ItemId) {
        if let Some(item) = self.store.get_mut(grabbed) {
            item.handler().on_dropped();
        }
        self.grabbed = None;
        self.current_slot = None;
        self.suitable.clear();

        debug!(item = ?grabbed, "item dropped");
        self.observers.emit(MergeEvent::ItemDropped(grabbed));
    }

    /// Clear the selection highlights on the suitable set.
    fn reject_suitable(&mut self) {
        for index in 0..self.suitable.len() {
            let other = self.suitable[index];
            if let Some(item) = self.store.get_mut(other) {
                item.handler().on_rejected_to_merge();
            }
        }
    }

    /// The drop clearing of transition 2, applied outside a release (used
    /// when the controller is disabled mid-grab).
    fn force_drop(&mut self) {
        let Some(grabbed) = self.grabbed else { return };
        self.reject_suitable();
        self.drop_grabbed(grabbed);
    }
}

// ----------------------------------------------------------------------
// Builder
// ----------------------------------------------------------------------

/// Builder for [`MergeController`]. Input and factory are mandatory; the
/// drag surface defaults to a ground plane at y = 0.
pub struct MergeControllerBuilder<I: MergeItem> {
    config: MergeConfig,
    viewpoint: Viewpoint,
    screen_size: Vec2,
    library: KindLibrary,
    slots: Vec<PlacementSlot>,
    use_slots: bool,
    input: Option<PointerState>,
    surface: Box<dyn DragSurface>,
    factory: Option<Box<dyn ItemFactory<I>>>,
}

impl<I: MergeItem> MergeControllerBuilder<I> {
    pub fn new() -> Self {
        Self {
            config: MergeConfig::default(),
            viewpoint: Viewpoint::default(),
            screen_size: Vec2::new(1280.0, 720.0),
            library: KindLibrary::new(),
            slots: Vec::new(),
            use_slots: false,
            input: None,
            surface: Box::new(GroundPlane::new(0.0)),
            factory: None,
        }
    }

    pub fn config(mut self, config: MergeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn viewpoint(mut self, viewpoint: Viewpoint) -> Self {
        self.viewpoint = viewpoint;
        self
    }

    pub fn screen_size(mut self, screen_size: Vec2) -> Self {
        self.screen_size = screen_size;
        self
    }

    pub fn library(mut self, library: KindLibrary) -> Self {
        self.library = library;
        self
    }

    pub fn slots(mut self, slots: Vec<PlacementSlot>) -> Self {
        self.slots = slots;
        self
    }

    pub fn use_slots(mut self, use_slots: bool) -> Self {
        self.use_slots = use_slots;
        self
    }

    pub fn input(mut self, input: PointerState) -> Self {
        self.input = Some(input);
        self
    }

    pub fn surface(mut self, surface: impl DragSurface + 'static) -> Self {
        self.surface = Box::new(surface);
        self
    }

    pub fn factory(mut self, factory: impl ItemFactory<I> + 'static) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Build the controller. The controller starts enabled.
    pub fn build(self) -> Result<MergeController<I>, SetupError> {
        let input = self.input.ok_or(SetupError::MissingInput)?;
        let factory = self.factory.ok_or(SetupError::MissingFactory)?;

        Ok(MergeController {
            config: self.config,
            viewpoint: self.viewpoint,
            screen_size: self.screen_size,
            library: self.library,
            store: ItemStore::new(),
            available: Vec::new(),
            slots: self.slots,
            input,
            surface: self.surface,
            factory,
            observers: EventObservers::new(),
            enabled: true,
            use_slots: self.use_slots,
            grabbed: None,
            suitable: Vec::new(),
            current_slot: None,
            drag: DragTargetResolver::new(),
            drag_tasks: Vec::new(),
            merges: Vec::new(),
        })
    }
}

impl<I: MergeItem> Default for MergeControllerBuilder<I> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Unit, UnitFactory};

    #[test]
    fn test_build_requires_input() {
        let result = MergeController::<Unit>::builder()
            .factory(UnitFactory::default())
            .build();

        assert!(matches!(result, Err(SetupError::MissingInput)));
    }

    #[test]
    fn test_build_requires_factory() {
        let result = MergeController::<Unit>::builder()
            .input(PointerState::new())
            .build();

        assert!(matches!(result, Err(SetupError::MissingFactory)));
    }

    #[test]
    fn test_build_defaults() {
        let controller = MergeController::<Unit>::builder()
            .input(PointerState::new())
            .factory(UnitFactory::default())
            .build()
            .expect("controller should build");

        assert!(controller.enabled());
        assert!(!controller.use_slots());
        assert!(!controller.is_item_grabbed());
        assert!(!controller.is_resolving());
    }
}
