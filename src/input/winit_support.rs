//! Winit Adapter
//!
//! Feeds winit window events into a [`PointerState`]. Winit reports cursor
//! positions with (0, 0) at the top-left; picking math wants bottom-left,
//! so the y coordinate is flipped against the window height.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};

use super::pointer::PointerState;

/// Apply one window event to the pointer state.
///
/// Only left-button presses and cursor motion are of interest; everything
/// else passes through untouched. `window_height` is in physical pixels.
pub fn apply_window_event(pointer: &mut PointerState, event: &WindowEvent, window_height: f32) {
    match event {
        WindowEvent::CursorMoved { position, .. } => {
            pointer.set_position(flip_y(
                Vec2::new(position.x as f32, position.y as f32),
                window_height,
            ));
        }
        WindowEvent::MouseInput {
            state,
            button: MouseButton::Left,
            ..
        } => {
            pointer.set_pressed(*state == ElementState::Pressed);
        }
        _ => {}
    }
}

/// Convert a top-left-origin position to bottom-left origin.
fn flip_y(position: Vec2, window_height: f32) -> Vec2 {
    Vec2::new(position.x, window_height - position.y)
}
