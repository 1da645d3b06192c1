//! Viewpoint Module
//!
//! The single active camera/viewpoint of the scene. Converts screen-space
//! pointer positions into world-space rays for picking and drag resolution.

use glam::{Vec2, Vec3};

/// A ray in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray starting point.
    pub origin: Vec3,
    /// Normalized ray direction.
    pub direction: Vec3,
}

/// The active camera used for pointer picking.
///
/// Only the data needed to build pointer rays lives here; rendering state
/// is the host's concern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewpoint {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Screen aspect ratio (width / height).
    pub aspect_ratio: f32,
}

impl Default for Viewpoint {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, 10.0),
            target: Vec3::ZERO,
            fov: 1.2, // ~69 degrees
            aspect_ratio: 16.0 / 9.0,
        }
    }
}

impl Viewpoint {
    /// Create a viewpoint at `position` looking at `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Default::default()
        }
    }

    /// Normalized view direction.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// Build the world-space ray through a screen point.
    ///
    /// `pointer` is in pixels with (0, 0) at the bottom-left; `screen_size`
    /// is the window size in pixels.
    pub fn pointer_ray(&self, pointer: Vec2, screen_size: Vec2) -> Ray {
        let uv = (pointer.x / screen_size.x, pointer.y / screen_size.y);
        Ray {
            origin: self.position,
            direction: self.ray_direction(uv),
        }
    }

    /// Ray direction through normalized screen coordinates (0-1, 0-1).
    pub fn ray_direction(&self, uv: (f32, f32)) -> Vec3 {
        let ndc = (uv.0 * 2.0 - 1.0, uv.1 * 2.0 - 1.0);
        let half_fov = (self.fov * 0.5).tan();

        let forward = self.forward();
        let up_world = Vec3::Y;

        // Degenerate basis when looking straight up or down
        let (right, up) = if forward.y.abs() > 0.99 {
            let right = Vec3::X;
            let up = right.cross(forward).normalize();
            (right, up)
        } else {
            let right = forward.cross(up_world).normalize();
            let up = right.cross(forward);
            (right, up)
        };

        (forward + right * ndc.0 * self.aspect_ratio * half_fov + up * ndc.1 * half_fov)
            .normalize()
    }
}
