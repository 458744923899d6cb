#![warn(missing_docs)]

//! Mass properties of a barrel by frustum integration.
//!
//! Consecutive profile samples bound conical frustums. Their volumes and
//! centroids are summed, then the two end bores are removed as exact
//! cylinders. All integration happens in centimetres so that volume comes
//! out in cm³ and weight in grams for a density in g/cm³.
//!
//! # Example
//!
//! ```
//! use barrelcad_kernel_math::ProfilePoint;
//! use barrelcad_kernel_mass::{compute_mass_properties, Bores};
//!
//! // A 40mm long, 4mm radius cylinder without bores.
//! let profile = [ProfilePoint::new(4.0, 0.0), ProfilePoint::new(4.0, 40.0)];
//! let props = compute_mass_properties(&profile, 1.0, &Bores::none());
//! assert!((props.center_of_gravity - 20.0).abs() < 1e-9);
//! ```

use std::f64::consts::PI;

use barrelcad_kernel_math::{ProfilePoint, Tolerance, MM_PER_CM};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Physical properties of a barrel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalProperties {
    /// Net volume (cm³). Negative when the bores exceed the solid.
    pub volume: f64,
    /// Weight (g), never negative.
    pub weight: f64,
    /// Axial center of gravity, measured from the front (mm).
    pub center_of_gravity: f64,
}

/// The two end bores removed from the solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bores {
    /// Depth of the front bore (mm).
    pub front_depth: f64,
    /// Depth of the rear bore (mm).
    pub rear_depth: f64,
    /// Bore radius (mm).
    pub radius: f64,
}

impl Bores {
    /// Bores of the given depths with the standard 2.1mm radius.
    pub fn new(front_depth: f64, rear_depth: f64) -> Self {
        Self {
            front_depth,
            rear_depth,
            radius: 2.1,
        }
    }

    /// No bores.
    pub fn none() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Volume and first axial moment accumulated in cm units.
#[derive(Debug, Clone, Copy, Default)]
struct Moments {
    volume: f64,
    moment: f64,
}

impl Moments {
    fn add(&mut self, volume: f64, centroid: f64) {
        self.volume += volume;
        self.moment += volume * centroid;
    }

    fn remove(&mut self, volume: f64, centroid: f64) {
        self.volume -= volume;
        self.moment -= volume * centroid;
    }
}

/// Volume of the conical frustum between radii `r1`, `r2` over height `h`.
pub fn frustum_volume(r1: f64, r2: f64, h: f64) -> f64 {
    (PI * h / 3.0) * (r1 * r1 + r1 * r2 + r2 * r2)
}

/// Centroid height of a conical frustum above its `r1` base.
pub fn frustum_centroid(r1: f64, r2: f64, h: f64) -> f64 {
    let numerator = r1 * r1 + 2.0 * r1 * r2 + 3.0 * r2 * r2;
    let denominator = 4.0 * (r1 * r1 + r1 * r2 + r2 * r2);
    h * numerator / denominator
}

/// Compute volume, weight and center of gravity of a bored profile.
///
/// `profile` is the outer profile in millimetres, ordered by increasing `z`;
/// `density` is in g/cm³. Segments shorter than the height tolerance are
/// skipped. The rear bore is measured back from the last sample. When the net
/// volume is not positive the weight is zero and the center of gravity is `0`.
pub fn compute_mass_properties(
    profile: &[ProfilePoint],
    density: f64,
    bores: &Bores,
) -> PhysicalProperties {
    let tol = Tolerance::DEFAULT;
    let Some(last) = profile.last() else {
        return PhysicalProperties::default();
    };

    let mut acc = Moments::default();
    for pair in profile.windows(2) {
        let (r1, z1) = (pair[0].radius / MM_PER_CM, pair[0].z / MM_PER_CM);
        let (r2, z2) = (pair[1].radius / MM_PER_CM, pair[1].z / MM_PER_CM);
        let h = z2 - z1;
        if h <= tol.height {
            continue;
        }
        acc.add(frustum_volume(r1, r2, h), z1 + frustum_centroid(r1, r2, h));
    }

    let bore_area = PI * (bores.radius / MM_PER_CM).powi(2);
    let length = last.z / MM_PER_CM;
    let front = bores.front_depth / MM_PER_CM;
    let rear = bores.rear_depth / MM_PER_CM;
    acc.remove(bore_area * front, front / 2.0);
    acc.remove(bore_area * rear, length - rear / 2.0);

    let weight = (acc.volume * density).max(0.0);
    let center_of_gravity = if acc.volume > 0.0 {
        acc.moment / acc.volume * MM_PER_CM
    } else {
        warn!(volume = acc.volume, "non-positive net volume; center of gravity set to 0");
        0.0
    };

    debug!(
        segments = profile.len().saturating_sub(1),
        volume = acc.volume,
        weight,
        center_of_gravity,
        "computed mass properties"
    );

    PhysicalProperties {
        volume: acc.volume,
        weight,
        center_of_gravity,
    }
}
