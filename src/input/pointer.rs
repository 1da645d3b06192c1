//! Pointer State Tracker
//!
//! Tracks the primary pointer (mouse or touch) decoupled from the windowing
//! system: the host feeds `set_pressed` / `set_position` from its event
//! loop, and the controller drains the queued press/release edges once per
//! tick. Position is in pixels with (0, 0) at the bottom-left.

use glam::Vec2;

/// Edge events produced by the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Pressed,
    Released,
}

/// Press/release edge queue plus current pointer position.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    pressed: bool,
    position: Vec2,
    events: Vec<PointerEvent>,
}

impl PointerState {
    /// Create a released pointer at (0, 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the held state; queues an edge event on every change.
    pub fn set_pressed(&mut self, pressed: bool) {
        if self.pressed == pressed {
            return;
        }
        self.pressed = pressed;
        self.events.push(if pressed {
            PointerEvent::Pressed
        } else {
            PointerEvent::Released
        });
    }

    /// Update the current pointer position.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Current pointer position in screen space.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Whether the pointer is currently held.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Take all edges queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<PointerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Reset to released at (0, 0), dropping queued edges.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
