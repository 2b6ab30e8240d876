//! Pinhole camera parameters.
//!
//! # Coordinate System
//!
//! The camera is described in world space by:
//! - `C`: eye position
//! - `N`: view direction (becomes the camera-space +Z axis)
//! - `V`: an "up" hint, orthogonalized against `N` when the basis is built
//!
//! `d` is the focal distance and `hx`, `hy` are the half-extents of the
//! screen window at that distance. The basis itself is built by
//! [`SpaceConverter`](crate::space::SpaceConverter).

use crate::math::Vec3;

/// Camera description as provided by the scene loader.
///
/// `up` must not be parallel to `direction`, otherwise the basis is
/// singular and [`SpaceConverter::build`](crate::space::SpaceConverter::build)
/// fails.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye point `C`.
    pub position: Vec3,
    /// View direction `N`.
    pub direction: Vec3,
    /// Up hint `V`.
    pub up: Vec3,
    /// Focal distance `d`.
    pub focal_distance: f64,
    pub half_width: f64,
    pub half_height: f64,
}

impl Camera {
    pub fn new(
        position: Vec3,
        direction: Vec3,
        up: Vec3,
        focal_distance: f64,
        half_width: f64,
        half_height: f64,
    ) -> Self {
        Self {
            position,
            direction,
            up,
            focal_distance,
            half_width,
            half_height,
        }
    }

    /// Camera at `position` looking toward `target`.
    pub fn looking_at(
        position: Vec3,
        target: Vec3,
        up: Vec3,
        focal_distance: f64,
        half_width: f64,
        half_height: f64,
    ) -> Self {
        Self::new(
            position,
            target - position,
            up,
            focal_distance,
            half_width,
            half_height,
        )
    }
}
