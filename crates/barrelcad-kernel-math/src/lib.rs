#![warn(missing_docs)]

//! Math types for the barrelcad kernel.
//!
//! Thin wrappers around nalgebra plus the profile sample type shared by the
//! profile builder, the lathe and the mass solver.

use nalgebra::Vector3;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// Millimetres per centimetre.
pub const MM_PER_CM: f64 = 10.0;

/// One sample of a profile curve: a radius at an axial position.
///
/// Both values are in millimetres; `z` is measured from the front end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfilePoint {
    /// Distance from the axis.
    pub radius: f64,
    /// Axial position.
    pub z: f64,
}

impl ProfilePoint {
    /// Create a profile sample.
    pub fn new(radius: f64, z: f64) -> Self {
        Self { radius, z }
    }

    /// Point on the revolved surface at angle `theta` (radians) around the Z axis.
    pub fn revolve(&self, theta: f64) -> Point3 {
        let (s, c) = theta.sin_cos();
        Point3::new(self.radius * c, self.radius * s, self.z)
    }
}

/// Tolerance constants for numeric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in mm.
    pub linear: f64,
    /// Below this a frustum height (cm) is treated as zero.
    pub height: f64,
}

impl Tolerance {
    /// Default tolerances.
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        height: 1e-6,
    };
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Area-weighted normal of triangle `(a, b, c)`, counter-clockwise winding.
///
/// The magnitude is twice the triangle area.
pub fn triangle_normal(a: &Point3, b: &Point3, c: &Point3) -> Vec3 {
    (b - a).cross(&(c - a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_revolve_quarter_turn() {
        let p = ProfilePoint::new(2.0, 5.0);
        let q = p.revolve(PI / 2.0);
        assert!(q.x.abs() < 1e-12);
        assert!((q.y - 2.0).abs() < 1e-12);
        assert!((q.z - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_triangle_normal_ccw() {
        let n = triangle_normal(
            &Point3::origin(),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 1.0, 0.0),
        );
        assert!((n - Vec3::z()).norm() < 1e-12);
    }
}
