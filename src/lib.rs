//! Mergecraft
//!
//! Interaction core for 3D "merge" games: grab an object with the pointer,
//! drag it across the board, drop it onto a matching object and the pair
//! combines into the next tier. This crate owns the hard part (the
//! grab/drag/merge state machine) and consumes everything scene-specific
//! (rendering, physics raycasts, item visuals) through small traits.
//!
//! # Modules
//!
//! - [`merge`] - The controller, selection ranking, drag resolution, slots
//!   and the two-phase merge routine
//! - [`camera`] - Viewpoint math and built-in drag surfaces
//! - [`input`] - Windowing-agnostic pointer state plus a winit adapter
//! - [`units`] - A complete example item type with timed effects
//!
//! # Example
//!
//! ```ignore
//! use glam::Vec3;
//! use mergecraft::input::PointerState;
//! use mergecraft::merge::{KindLibrary, MergeController, MergeEvent};
//! use mergecraft::units::{Unit, UnitFactory};
//!
//! let library = KindLibrary::load("assets/kinds.json")?;
//! let mut controller = MergeController::<Unit>::builder()
//!     .library(library)
//!     .input(PointerState::new())
//!     .factory(UnitFactory::default())
//!     .build()?;
//!
//! controller.observe(|event| {
//!     if let MergeEvent::ItemMerged(id) = event {
//!         println!("merged into {:?}", id);
//!     }
//! });
//!
//! // Each frame: feed window events into controller.input_mut(), then
//! controller.update(dt);
//! ```

pub mod camera;
pub mod input;
pub mod merge;
pub mod units;

// Re-export the core types at crate level for convenience
pub use camera::{DragSurface, GroundPlane, Ray, SphereSurface, Viewpoint};
pub use input::{PointerEvent, PointerState};
pub use merge::{
    DragMotion, ItemFactory, ItemId, ItemKind, ItemStore, KindId, KindLibrary, MergeConfig,
    MergeController, MergeEvent, MergeHandler, MergeItem, PlacementSlot, SetupError,
};
