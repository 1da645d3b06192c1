//! Example Units
//!
//! A complete, minimal integration of the merge controller: a concrete
//! item type with timed effect playback, the factory the resolver spawns
//! through, and a spawner for bringing base-tier units onto the board.
//! Games with their own item types can treat this module as a template.

pub mod effects;
pub mod spawner;
pub mod unit;

pub use effects::{UnitEffectConfig, UnitEffects};
pub use spawner::{SpawnPlacement, UnitFactory, UnitSpawner};
pub use unit::Unit;

use crate::merge::MergeController;

/// Advance every live unit's effect playback by one tick.
pub fn update_effects(controller: &mut MergeController<Unit>, dt: f32) {
    for (_, unit) in controller.store.iter_mut() {
        unit.effects.update(dt);
    }
}
