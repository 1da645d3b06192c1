//! Drag Surfaces
//!
//! The seam between drag-target resolution and whatever geometry the host
//! wants items dragged across. The built-in implementations cover the two
//! common cases analytically; a host with a physics engine can put its own
//! raycast behind [`DragSurface`] instead.

use glam::Vec3;

use super::viewpoint::Ray;

/// Surface the drag raycast is tested against.
pub trait DragSurface {
    /// Closest hit of `ray` within `max_distance`, if any.
    fn raycast(&self, ray: Ray, max_distance: f32) -> Option<Vec3>;
}

/// Infinite horizontal plane at a fixed height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPlane {
    /// Y coordinate of the plane.
    pub height: f32,
}

impl GroundPlane {
    pub fn new(height: f32) -> Self {
        Self { height }
    }
}

impl DragSurface for GroundPlane {
    fn raycast(&self, ray: Ray, max_distance: f32) -> Option<Vec3> {
        // Ray: P = origin + t * direction, plane: y = height
        if ray.direction.y.abs() < 1e-4 {
            return None;
        }

        let t = (self.height - ray.origin.y) / ray.direction.y;
        if t < 0.0 || t > max_distance {
            return None;
        }

        Some(ray.origin + ray.direction * t)
    }
}

/// Sphere surface, for planet-style worlds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereSurface {
    pub center: Vec3,
    pub radius: f32,
}

impl SphereSurface {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl DragSurface for SphereSurface {
    fn raycast(&self, ray: Ray, max_distance: f32) -> Option<Vec3> {
        // |origin + t * dir - center|^2 = radius^2, dir normalized so a = 1:
        // t^2 + 2t (oc . dir) + (oc . oc - radius^2) = 0
        let oc = ray.origin - self.center;
        let b = oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let t1 = -b - sqrt_disc;
        let t2 = -b + sqrt_disc;

        // Closest hit in front of the ray origin; t2 covers a viewpoint
        // inside the sphere.
        let t = if t1 > 0.001 {
            t1
        } else if t2 > 0.001 {
            t2
        } else {
            return None;
        };

        if t > max_distance {
            return None;
        }

        Some(ray.origin + ray.direction * t)
    }
}
