//! Example Unit
//!
//! A minimal concrete item type: enough state for the controller to drive
//! and for a renderer to draw (position, facing, scale, lift, highlight).

use glam::Vec3;

use crate::merge::{KindId, MergeHandler, MergeItem};

use super::effects::{UnitEffectConfig, UnitEffects};

/// A placed unit on the board.
#[derive(Debug, Clone)]
pub struct Unit {
    kind: KindId,
    position: Vec3,
    target_point: Vec3,
    can_merge: bool,
    /// Facing direction (set from the slot's forward when slot-placed).
    pub forward: Vec3,
    /// Effect playback state; advance with [`UnitEffects::update`].
    pub effects: UnitEffects,
}

impl Unit {
    /// Create an interactable unit with default effect timing.
    pub fn new(kind: KindId, position: Vec3) -> Self {
        Self::with_effects(kind, position, UnitEffectConfig::default())
    }

    /// Create a unit with explicit effect timing.
    pub fn with_effects(kind: KindId, position: Vec3, config: UnitEffectConfig) -> Self {
        Self {
            kind,
            position,
            target_point: position,
            can_merge: true,
            forward: Vec3::Z,
            effects: UnitEffects::new(config),
        }
    }
}

impl MergeItem for Unit {
    fn kind(&self) -> KindId {
        self.kind
    }

    fn can_merge(&self) -> bool {
        self.can_merge
    }

    fn set_can_merge(&mut self, can_merge: bool) {
        self.can_merge = can_merge;
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn target_point(&self) -> Vec3 {
        self.target_point
    }

    fn set_target_point(&mut self, point: Vec3) {
        self.target_point = point;
    }

    fn handler(&mut self) -> &mut dyn MergeHandler {
        &mut self.effects
    }
}
