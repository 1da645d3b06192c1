//! Camera and picking support
//!
//! The viewpoint turns screen-space pointer positions into world-space rays,
//! and drag surfaces answer "where does this ray land" during dragging.

pub mod surfaces;
pub mod viewpoint;

pub use surfaces::{DragSurface, GroundPlane, SphereSurface};
pub use viewpoint::{Ray, Viewpoint};
