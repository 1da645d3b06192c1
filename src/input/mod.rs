//! Pointer input
//!
//! Windowing-agnostic pointer state with edge detection, plus a thin winit
//! adapter. The merge controller consumes press/release edges once per tick
//! and queries the current pointer position for picking.

pub mod pointer;
pub mod winit_support;

pub use pointer::{PointerEvent, PointerState};
