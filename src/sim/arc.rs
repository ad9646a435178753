//! Arc band geometry for the radial shield
//!
//! In polar coordinates around the core, a band is defined by:
//! - radius: centerline distance from the core
//! - half_thickness: radial reach on each side of the centerline
//! - center_deg, half_width_deg: angular extent
//!
//! All bounds are exclusive: a point exactly on an edge is outside.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{angular_distance_deg, cartesian_to_polar, normalize_degrees, polar_to_cartesian};

/// A thickened arc in polar space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcBand {
    pub radius: f32,
    pub half_thickness: f32,
    /// Center angle (degrees, normalized to [-180, 180))
    pub center_deg: f32,
    pub half_width_deg: f32,
}

impl ArcBand {
    pub fn new(radius: f32, half_thickness: f32, center_deg: f32, half_width_deg: f32) -> Self {
        Self {
            radius,
            half_thickness,
            center_deg: normalize_degrees(center_deg),
            half_width_deg,
        }
    }

    #[inline]
    pub fn inner_radius(&self) -> f32 {
        self.radius - self.half_thickness
    }

    #[inline]
    pub fn outer_radius(&self) -> f32 {
        self.radius + self.half_thickness
    }

    /// Rotate the band to a new center angle
    pub fn aim(&mut self, center_deg: f32) {
        self.center_deg = normalize_degrees(center_deg);
    }

    /// Check if a distance lies strictly inside the radial band
    pub fn contains_radius(&self, r: f32) -> bool {
        r > self.inner_radius() && r < self.outer_radius()
    }

    /// Check if an angle lies strictly inside the angular extent (wraps at ±180)
    pub fn contains_angle(&self, theta_deg: f32) -> bool {
        angular_distance_deg(theta_deg, self.center_deg) < self.half_width_deg
    }

    /// Check if a point (cartesian, relative to the core) is inside the band
    pub fn contains_point(&self, point: Vec2) -> bool {
        let (r, theta) = cartesian_to_polar(point);
        self.contains_radius(r) && self.contains_angle(theta)
    }

    /// Sample points along the centerline (for rendering)
    pub fn sample_centerline(&self, num_points: usize) -> Vec<Vec2> {
        let start = self.center_deg - self.half_width_deg;
        let span = self.half_width_deg * 2.0;
        (0..num_points)
            .map(|i| {
                let t = i as f32 / (num_points - 1).max(1) as f32;
                polar_to_cartesian(self.radius, start + t * span)
            })
            .collect()
    }
}
