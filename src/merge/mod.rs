//! Merge Interaction Core
//!
//! The grab/drag/merge mechanic:
//! - Items are picked by view alignment rather than collider hit-testing
//! - A grabbed item chases a raycast drag target every tick
//! - Releases resolve to a merge, a slot move, a rejected placement, or a
//!   plain drop
//! - Merges are two-phase: both items' effects play out before the swap
//!
//! Placement is either free-form on a drag surface or constrained to
//! exclusive [`PlacementSlot`]s, behind the same controller.

pub mod config;
pub mod controller;
pub mod data;
pub mod drag;
pub mod error;
pub mod events;
pub mod item;
pub mod resolver;
pub mod selection;
pub mod slot;

pub use config::{DragMotion, MergeConfig};
pub use controller::{MergeController, MergeControllerBuilder};
pub use data::{ItemKind, KindId, KindLibrary};
pub use drag::DragTargetResolver;
pub use error::{ContentError, SetupError};
pub use events::{EventObservers, MergeEvent};
pub use item::{ItemFactory, ItemId, ItemStore, MergeHandler, MergeItem};
pub use resolver::merge_result_for;
pub use selection::{alignment_score, select_best};
pub use slot::{nearest_slot, slot_holding, PlacementSlot};
