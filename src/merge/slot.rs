//! Placement Slots
//!
//! Fixed, exclusive placement points for slot mode. Occupancy is tracked by
//! item handle; the controller is the only writer, so a slot's occupant is
//! always either `None` or a live item.

use glam::Vec3;

use super::item::ItemId;

/// A fixed placement point with exclusive occupancy.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementSlot {
    /// World point items snap to.
    pub point: Vec3,
    /// Facing direction given to items spawned on this slot.
    pub forward: Vec3,
    occupant: Option<ItemId>,
}

impl PlacementSlot {
    /// Create an empty slot.
    pub fn new(point: Vec3, forward: Vec3) -> Self {
        Self {
            point,
            forward,
            occupant: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    pub fn occupant(&self) -> Option<ItemId> {
        self.occupant
    }

    pub fn set_occupant(&mut self, item: ItemId) {
        self.occupant = Some(item);
    }

    pub fn vacate(&mut self) {
        self.occupant = None;
    }
}

/// Index of the slot currently holding `item`, if any.
pub fn slot_holding(slots: &[PlacementSlot], item: ItemId) -> Option<usize> {
    slots.iter().position(|slot| slot.occupant == Some(item))
}

/// Index of the slot whose point is nearest to `point`.
///
/// First wins on exact distance ties; `None` only for an empty slice.
pub fn nearest_slot(slots: &[PlacementSlot], point: Vec3) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, slot) in slots.iter().enumerate() {
        let distance = slot.point.distance_squared(point);
        match best {
            Some((_, closest)) if distance >= closest => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}
