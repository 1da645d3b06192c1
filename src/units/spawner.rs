//! Unit Spawning
//!
//! The factory the merge resolver uses to materialize merge results, and a
//! spawner for bringing new base-tier units onto the board: either at a
//! random point inside a disc around a spawn point, or into the first
//! empty placement slot.

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::merge::{ItemFactory, ItemId, KindId, MergeController, MergeItem};

use super::effects::UnitEffectConfig;
use super::unit::Unit;

/// Builds units for the merge resolver.
#[derive(Debug, Clone, Default)]
pub struct UnitFactory {
    /// Effect timing applied to spawned units.
    pub effect_config: UnitEffectConfig,
}

impl ItemFactory<Unit> for UnitFactory {
    fn spawn(&mut self, kind: KindId, position: Vec3, forward: Vec3) -> Unit {
        let mut unit = Unit::with_effects(kind, position, self.effect_config.clone());
        unit.forward = forward;
        unit
    }
}

/// Where newly spawned units are placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnPlacement {
    /// Random point inside a horizontal disc around `center`.
    Random { center: Vec3, radius: f32 },
    /// First empty placement slot; spawning is skipped when all are full.
    Slots,
}

/// Spawns base-tier units into a controller.
#[derive(Debug)]
pub struct UnitSpawner {
    pub placement: SpawnPlacement,
    /// Kind of the units this spawner produces.
    pub kind: KindId,
    /// Effect timing applied to spawned units.
    pub effect_config: UnitEffectConfig,
    rng: StdRng,
}

impl UnitSpawner {
    pub fn new(placement: SpawnPlacement, kind: KindId) -> Self {
        Self {
            placement,
            kind,
            effect_config: UnitEffectConfig::default(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic spawner for tests and replays.
    pub fn with_seed(placement: SpawnPlacement, kind: KindId, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new(placement, kind)
        }
    }

    /// Spawn one unit into the controller.
    ///
    /// Returns `None` in slot placement when every slot is taken.
    pub fn try_spawn(&mut self, controller: &mut MergeController<Unit>) -> Option<ItemId> {
        match self.placement {
            SpawnPlacement::Random { center, radius } => {
                let offset = self.random_in_disc() * radius;
                let position = center + Vec3::new(offset.x, 0.0, offset.y);
                let mut unit = Unit::with_effects(self.kind, position, self.effect_config.clone());
                unit.set_can_merge(true);
                Some(controller.add_item(unit))
            }
            SpawnPlacement::Slots => {
                let slot = controller.slots.iter().position(|slot| slot.is_empty())?;
                let point = controller.slots[slot].point;
                let forward = controller.slots[slot].forward;
                let mut unit = Unit::with_effects(self.kind, point, self.effect_config.clone());
                unit.forward = forward;
                unit.set_can_merge(true);
                Some(controller.add_item_in_slot(unit, slot))
            }
        }
    }

    /// Uniform point in the unit disc (rejection sampling).
    fn random_in_disc(&mut self) -> Vec2 {
        loop {
            let candidate = Vec2::new(
                self.rng.random_range(-1.0..=1.0),
                self.rng.random_range(-1.0..=1.0),
            );
            if candidate.length_squared() <= 1.0 {
                return candidate;
            }
        }
    }
}
