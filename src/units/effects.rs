//! Unit Effect Playback
//!
//! Duration-based stand-ins for tween animations: lift on grab, a
//! selection highlight, scale-from-zero on spawn and the asynchronous
//! scale-to-zero merge effect the resolver waits on. The host advances
//! playback by calling `update(dt)` once per tick.

use serde::{Deserialize, Serialize};

use crate::merge::MergeHandler;

/// Timing knobs for unit effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitEffectConfig {
    /// How high the unit rises while held.
    pub lift_height: f32,
    /// Seconds for the lift up/down.
    pub pickup_duration: f32,
    /// Seconds for the merge shrink.
    pub merge_duration: f32,
    /// Seconds for the spawn grow.
    pub spawn_duration: f32,
}

impl Default for UnitEffectConfig {
    fn default() -> Self {
        Self {
            lift_height: 0.6,
            pickup_duration: 0.15,
            merge_duration: 0.25,
            spawn_duration: 0.3,
        }
    }
}

/// A running scale animation.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScaleAnim {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

/// Effect state of one unit.
#[derive(Debug, Clone)]
pub struct UnitEffects {
    config: UnitEffectConfig,
    /// Current vertical model offset.
    pub lift: f32,
    lift_target: f32,
    /// Highlight shown while this unit is a merge candidate.
    pub selected: bool,
    /// Current model scale (1 = rest).
    pub scale: f32,
    scale_anim: Option<ScaleAnim>,
    merge_started: bool,
}

impl UnitEffects {
    pub fn new(config: UnitEffectConfig) -> Self {
        Self {
            config,
            lift: 0.0,
            lift_target: 0.0,
            selected: false,
            scale: 1.0,
            scale_anim: None,
            merge_started: false,
        }
    }

    /// Advance playback by one tick.
    pub fn update(&mut self, dt: f32) {
        // Lift eases at a constant rate so up and down take pickup_duration
        if self.lift != self.lift_target {
            let rate = if self.config.pickup_duration > 0.0 {
                self.config.lift_height / self.config.pickup_duration
            } else {
                f32::INFINITY
            };
            let step = rate * dt;
            let delta = self.lift_target - self.lift;
            if delta.abs() <= step {
                self.lift = self.lift_target;
            } else {
                self.lift += step * delta.signum();
            }
        }

        if let Some(anim) = &mut self.scale_anim {
            anim.elapsed += dt;
            let t = if anim.duration > 0.0 {
                (anim.elapsed / anim.duration).clamp(0.0, 1.0)
            } else {
                1.0
            };
            self.scale = anim.from + (anim.to - anim.from) * t;
            if t >= 1.0 {
                self.scale = anim.to;
                self.scale_anim = None;
            }
        }
    }

    fn start_scale(&mut self, from: f32, to: f32, duration: f32) {
        self.scale = from;
        self.scale_anim = Some(ScaleAnim {
            from,
            to,
            elapsed: 0.0,
            duration,
        });
    }
}

impl MergeHandler for UnitEffects {
    fn on_spawned(&mut self) {
        let duration = self.config.spawn_duration;
        self.start_scale(0.0, 1.0, duration);
    }

    fn on_grabbed(&mut self) {
        self.lift_target = self.config.lift_height;
    }

    fn on_dropped(&mut self) {
        self.lift_target = 0.0;
    }

    fn on_selected_to_merge(&mut self) {
        self.selected = true;
    }

    fn on_rejected_to_merge(&mut self) {
        self.selected = false;
    }

    fn begin_merge_effect(&mut self) {
        let duration = self.config.merge_duration;
        self.merge_started = true;
        self.start_scale(self.scale, 0.0, duration);
    }

    fn merge_effect_finished(&self) -> bool {
        self.merge_started && self.scale_anim.is_none()
    }
}
