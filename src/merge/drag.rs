//! Drag Resolution and Motion
//!
//! Two halves of dragging: resolving where the grabbed item should go
//! (raycast against the drag surface, optionally snapped to the nearest
//! placement slot), and the cooperative per-tick task that actually moves
//! an item toward that point. The resolver memoizes on pointer position so
//! an idle pointer costs no raycasts.

use glam::{Vec2, Vec3};

use crate::camera::{DragSurface, Viewpoint};

use super::config::DragMotion;
use super::item::{ItemId, ItemStore, MergeItem};
use super::slot::{self, PlacementSlot};

/// Distance at which a moving item is considered settled on its target.
const SETTLE_EPSILON: f32 = 1e-3;

/// Resolves, once per tick, the world point the grabbed item chases.
#[derive(Debug, Clone, Default)]
pub struct DragTargetResolver {
    last_pointer: Option<Vec2>,
    selected_slot: Option<usize>,
}

impl DragTargetResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot chosen by the latest slot-mode resolution of this drag.
    pub fn selected_slot(&self) -> Option<usize> {
        self.selected_slot
    }

    /// Forget the memoized pointer and slot selection. Called on grab and
    /// on slot-mode toggle so the next tick always resolves fresh.
    pub fn invalidate(&mut self) {
        self.last_pointer = None;
        self.selected_slot = None;
    }

    /// Resolve the drag target for the current pointer.
    ///
    /// Returns `None` when the pointer has not moved since the last
    /// resolution, or when the ray misses the surface (the previous target
    /// stays in effect). `slots` being `Some` selects slot mode.
    ///
    /// # Panics
    ///
    /// In slot mode with an empty slot registry; the controller cannot
    /// place anything and the configuration is unusable.
    pub fn refresh(
        &mut self,
        pointer: Vec2,
        viewpoint: &Viewpoint,
        screen_size: Vec2,
        surface: &dyn DragSurface,
        max_distance: f32,
        slots: Option<&[PlacementSlot]>,
    ) -> Option<Vec3> {
        if let Some(slots) = slots {
            assert!(
                !slots.is_empty(),
                "slot mode requires at least one placement slot"
            );
        }

        if self.last_pointer == Some(pointer) {
            return None;
        }
        self.last_pointer = Some(pointer);

        let ray = viewpoint.pointer_ray(pointer, screen_size);
        let hit = surface.raycast(ray, max_distance)?;

        match slots {
            None => Some(hit),
            Some(slots) => {
                let index = slot::nearest_slot(slots, hit)?;
                self.selected_slot = Some(index);
                Some(slots[index].point)
            }
        }
    }
}

/// One motion step toward `target`.
pub(crate) fn step_toward(
    position: Vec3,
    target: Vec3,
    motion: DragMotion,
    speed: f32,
    dt: f32,
) -> Vec3 {
    match motion {
        DragMotion::Lerp => position.lerp(target, (speed * dt).clamp(0.0, 1.0)),
        DragMotion::MoveTowards => {
            let delta = target - position;
            let distance = delta.length();
            let step = speed * dt;
            if distance <= step || distance <= f32::EPSILON {
                target
            } else {
                position + delta * (step / distance)
            }
        }
    }
}

/// Cooperative task moving one item toward its drag target each tick.
///
/// Runs while the item is grabbed, and keeps running after release until
/// the item settles on its target. That settling is what carries a
/// rejected slot placement back home. Ends when the item is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DragTask {
    pub item: ItemId,
}

impl DragTask {
    /// Advance one tick. Returns `false` once the task is finished.
    pub fn tick<I: MergeItem>(
        &self,
        store: &mut ItemStore<I>,
        grabbed: Option<ItemId>,
        motion: DragMotion,
        speed: f32,
        dt: f32,
    ) -> bool {
        let Some(item) = store.get_mut(self.item) else {
            return false;
        };

        let target = item.target_point();
        let settled = item.position().distance(target) <= SETTLE_EPSILON;
        if settled {
            return grabbed == Some(self.item);
        }

        let mut next = step_toward(item.position(), target, motion, speed, dt);
        if next.distance(target) <= SETTLE_EPSILON {
            next = target;
        }
        item.set_position(next);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::data::KindId;
    use crate::units::Unit;

    const DT: f32 = 1.0 / 60.0;

    fn store_with_unit(position: Vec3, target: Vec3) -> (ItemStore<Unit>, ItemId) {
        let mut store = ItemStore::new();
        let mut unit = Unit::new(KindId(1), position);
        unit.set_target_point(target);
        let id = store.insert(unit);
        (store, id)
    }

    #[test]
    fn test_move_towards_reaches_target_exactly() {
        let mut position = Vec3::ZERO;
        let target = Vec3::new(1.0, 0.0, 0.0);

        for _ in 0..120 {
            position = step_toward(position, target, DragMotion::MoveTowards, 2.0, DT);
        }

        assert_eq!(position, target);
    }

    #[test]
    fn test_lerp_approaches_target() {
        let start = Vec3::ZERO;
        let target = Vec3::new(4.0, 0.0, 2.0);

        let one = step_toward(start, target, DragMotion::Lerp, 10.0, DT);
        let two = step_toward(one, target, DragMotion::Lerp, 10.0, DT);

        assert!(one.distance(target) < start.distance(target));
        assert!(two.distance(target) < one.distance(target));
    }

    #[test]
    fn test_task_runs_while_grabbed_and_settles_after_release() {
        let target = Vec3::new(2.0, 0.0, 0.0);
        let (mut store, id) = store_with_unit(Vec3::ZERO, target);
        let task = DragTask { item: id };

        // Grabbed: task stays alive even once it arrives
        for _ in 0..600 {
            assert!(task.tick(&mut store, Some(id), DragMotion::MoveTowards, 4.0, DT));
        }
        assert_eq!(store.get(id).unwrap().position(), target);

        // Released and already settled: task ends
        assert!(!task.tick(&mut store, None, DragMotion::MoveTowards, 4.0, DT));
    }

    #[test]
    fn test_task_settles_released_item_then_ends() {
        let target = Vec3::new(1.0, 0.0, 0.0);
        let (mut store, id) = store_with_unit(Vec3::ZERO, target);
        let task = DragTask { item: id };

        let mut ticks = 0;
        while task.tick(&mut store, None, DragMotion::MoveTowards, 4.0, DT) {
            ticks += 1;
            assert!(ticks < 600, "task should settle and end");
        }

        assert_eq!(store.get(id).unwrap().position(), target);
    }

    #[test]
    fn test_task_ends_when_item_destroyed() {
        let (mut store, id) = store_with_unit(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0));
        let task = DragTask { item: id };

        assert!(task.tick(&mut store, Some(id), DragMotion::Lerp, 10.0, DT));
        store.remove(id);
        assert!(!task.tick(&mut store, Some(id), DragMotion::Lerp, 10.0, DT));
    }

    #[test]
    fn test_resolver_memoizes_on_pointer() {
        use crate::camera::GroundPlane;

        let mut resolver = DragTargetResolver::new();
        let viewpoint = Viewpoint::looking_at(Vec3::new(0.0, 10.0, 10.0), Vec3::ZERO);
        let screen = Vec2::new(800.0, 600.0);
        let surface = GroundPlane::new(0.0);
        let pointer = Vec2::new(400.0, 300.0);

        let first = resolver.refresh(pointer, &viewpoint, screen, &surface, 200.0, None);
        let second = resolver.refresh(pointer, &viewpoint, screen, &surface, 200.0, None);

        assert!(first.is_some());
        assert!(second.is_none(), "unchanged pointer should not re-resolve");

        resolver.invalidate();
        let third = resolver.refresh(pointer, &viewpoint, screen, &surface, 200.0, None);
        assert_eq!(third, first);
    }

    #[test]
    fn test_resolver_snaps_to_nearest_slot() {
        use crate::camera::GroundPlane;

        let mut resolver = DragTargetResolver::new();
        let slot_point = Vec3::new(2.0, 0.0, 0.0);
        let slots = vec![
            PlacementSlot::new(Vec3::new(-2.0, 0.0, 0.0), Vec3::Z),
            PlacementSlot::new(slot_point, Vec3::Z),
        ];
        // Aim straight at the second slot: the hit lands on its point
        let viewpoint = Viewpoint::looking_at(Vec3::new(0.0, 10.0, 10.0), slot_point);
        let screen = Vec2::new(800.0, 600.0);
        let surface = GroundPlane::new(0.0);

        let target = resolver.refresh(
            Vec2::new(400.0, 300.0),
            &viewpoint,
            screen,
            &surface,
            200.0,
            Some(&slots),
        );

        assert_eq!(target, Some(slot_point));
        assert_eq!(resolver.selected_slot(), Some(1));
    }

    #[test]
    #[should_panic(expected = "placement slot")]
    fn test_resolver_panics_without_slots() {
        use crate::camera::GroundPlane;

        let mut resolver = DragTargetResolver::new();
        let viewpoint = Viewpoint::default();
        let surface = GroundPlane::new(0.0);

        resolver.refresh(
            Vec2::new(1.0, 1.0),
            &viewpoint,
            Vec2::new(800.0, 600.0),
            &surface,
            200.0,
            Some(&[]),
        );
    }
}
