//! Merge Configuration
//!
//! Tuning knobs for grabbing, merging and dragging as a plain data struct,
//! so hosts can remap or load them from settings files.

use serde::{Deserialize, Serialize};

/// How a grabbed item chases its drag target each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragMotion {
    /// Exponential ease toward the target (`drag_speed` is the rate).
    Lerp,
    /// Constant-speed approach (`drag_speed` in world units per second).
    MoveTowards,
}

/// Controller tuning.
///
/// Both thresholds are view-alignment dot products in [-1, 1] and belong
/// near 1: the pick is a narrow cone around the pointer ray rather than a
/// full 3D hit test, so anything much below ~0.99 starts grabbing
/// neighbors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Minimum alignment score to grab an item.
    pub grab_threshold: f32,
    /// Minimum alignment score to accept a merge partner on release.
    pub merge_threshold: f32,
    /// Motion style of the grabbed item.
    pub drag_motion: DragMotion,
    /// Drag speed; meaning depends on `drag_motion`.
    pub drag_speed: f32,
    /// Maximum raycast distance when resolving the drag target.
    pub drag_max_distance: f32,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            grab_threshold: 0.995,
            merge_threshold: 0.998,
            drag_motion: DragMotion::Lerp,
            drag_speed: 10.0,
            drag_max_distance: 200.0,
        }
    }
}
