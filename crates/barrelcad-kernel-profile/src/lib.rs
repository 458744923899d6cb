#![warn(missing_docs)]

//! Profile curve builder for the barrelcad kernel.
//!
//! Turns shape parameters and cut zones into a radius-versus-axial-position
//! curve sampled at a fixed step:
//! 1. Start from the maximum radius
//! 2. Blend linear tapers toward the tip and thread radii
//! 3. Subtract every containing cut's waveform
//! 4. Clamp to a minimum radius
//!
//! # Example
//!
//! ```
//! use barrelcad_kernel_profile::{build_profile, ShapeParameters};
//!
//! let shape = ShapeParameters::default();
//! let profile = build_profile(&shape, &[]).unwrap();
//! assert_eq!(profile.first().unwrap().z, 0.0);
//! assert_eq!(profile.last().unwrap().z, shape.length);
//! ```

pub mod waveform;

use barrelcad_ir::{BarrelDesign, Composition, CutZone};
use barrelcad_kernel_math::{ProfilePoint, Tolerance};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Fixed radius the front taper narrows to (mm).
pub const TIP_RADIUS: f64 = 2.9;

/// Fixed radius the rear taper narrows to (mm).
pub const THREAD_RADIUS: f64 = 2.9;

/// Radius of the threaded end bores (mm).
pub const BORE_RADIUS: f64 = 2.1;

/// Upper bound on the number of samples in one profile.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Errors from profile construction.
#[derive(Debug, Clone, Error)]
pub enum ProfileError {
    /// Length is zero, negative or not finite.
    #[error("barrel length must be positive, got {0}")]
    NonPositiveLength(f64),

    /// Sampling step is zero, negative or not finite.
    #[error("profile step must be positive, got {0}")]
    NonPositiveStep(f64),

    /// `length / step` would exceed [`MAX_SAMPLES`].
    #[error("profile of length {length} at step {step} exceeds {MAX_SAMPLES} samples")]
    TooManySamples {
        /// Barrel length (mm).
        length: f64,
        /// Sampling step (mm).
        step: f64,
    },

    /// A profile cut has a zero, negative or non-finite pitch.
    #[error("cut '{id}' has invalid pitch {pitch}")]
    InvalidCutPitch {
        /// Cut id.
        id: String,
        /// Offending pitch (mm).
        pitch: f64,
    },
}

/// Result type for profile operations.
pub type Result<T> = std::result::Result<T, ProfileError>;

/// Geometric inputs of one barrel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeParameters {
    /// Overall length (mm).
    pub length: f64,
    /// Maximum diameter (mm).
    pub max_diameter: f64,
    /// Axial length of the front taper (mm).
    pub front_taper_length: f64,
    /// Axial length of the rear taper (mm).
    pub rear_taper_length: f64,
    /// Radius at the front tip (mm).
    pub tip_radius: f64,
    /// Radius at the rear (thread) end (mm).
    pub thread_radius: f64,
    /// Depth of the front bore (mm).
    pub hole_depth_front: f64,
    /// Depth of the rear bore (mm).
    pub hole_depth_rear: f64,
    /// Bore radius (mm).
    pub bore_radius: f64,
}

impl Default for ShapeParameters {
    fn default() -> Self {
        Self::from_design(&BarrelDesign::default())
    }
}

impl ShapeParameters {
    /// Extract the geometric parameters of a design, with the fixed end and bore radii.
    pub fn from_design(design: &BarrelDesign) -> Self {
        Self {
            length: design.length,
            max_diameter: design.max_diameter,
            front_taper_length: design.front_taper_length,
            rear_taper_length: design.rear_taper_length,
            tip_radius: TIP_RADIUS,
            thread_radius: THREAD_RADIUS,
            hole_depth_front: design.hole_depth_front,
            hole_depth_rear: design.hole_depth_rear,
            bore_radius: BORE_RADIUS,
        }
    }

    /// Radius of the untapered, uncut body.
    pub fn base_radius(&self) -> f64 {
        self.max_diameter / 2.0
    }

    /// Radius of the tapered body at `z`, before cuts.
    ///
    /// The front taper is tested first: where both tapers cover `z` the front
    /// taper applies.
    pub fn taper_radius(&self, z: f64) -> f64 {
        let base = self.base_radius();
        if z < self.front_taper_length {
            self.tip_radius + (base - self.tip_radius) * (z / self.front_taper_length)
        } else if z > self.length - self.rear_taper_length {
            let ratio = (self.length - z) / self.rear_taper_length;
            self.thread_radius + (base - self.thread_radius) * ratio
        } else {
            base
        }
    }
}

/// Sampling parameters for the profile curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileParams {
    /// Axial distance between samples (mm).
    pub step: f64,
    /// Floor applied to every sampled radius (mm).
    pub min_radius: f64,
}

impl Default for ProfileParams {
    fn default() -> Self {
        Self {
            step: 0.1,
            min_radius: 0.5,
        }
    }
}

/// Build the outer profile with default sampling.
pub fn build_profile(shape: &ShapeParameters, cuts: &[CutZone]) -> Result<Vec<ProfilePoint>> {
    build_profile_with(shape, cuts, &ProfileParams::default())
}

/// Build the outer profile of a barrel.
///
/// Samples run from `z = 0` to `z = length` in `params.step` increments, with
/// the last sample placed exactly at `length`.
///
/// # Errors
///
/// - `NonPositiveLength` if `shape.length` is not a positive number
/// - `NonPositiveStep` if `params.step` is not a positive number
/// - `TooManySamples` if the curve would need more than [`MAX_SAMPLES`] points
/// - `InvalidCutPitch` if a profile cut's pitch is not a positive number
pub fn build_profile_with(
    shape: &ShapeParameters,
    cuts: &[CutZone],
    params: &ProfileParams,
) -> Result<Vec<ProfilePoint>> {
    if !shape.length.is_finite() || shape.length <= 0.0 {
        return Err(ProfileError::NonPositiveLength(shape.length));
    }
    if !params.step.is_finite() || params.step <= 0.0 {
        return Err(ProfileError::NonPositiveStep(params.step));
    }
    if shape.length / params.step >= MAX_SAMPLES as f64 {
        return Err(ProfileError::TooManySamples {
            length: shape.length,
            step: params.step,
        });
    }
    for cut in cuts {
        let pitch = cut.properties.pitch;
        if cut.kind.composition() == Composition::Additive && (!pitch.is_finite() || pitch <= 0.0) {
            return Err(ProfileError::InvalidCutPitch {
                id: cut.id.clone(),
                pitch,
            });
        }
    }

    let points: Vec<ProfilePoint> = sample_positions(shape.length, params.step)
        .map(|z| ProfilePoint::new(radius_at(shape, cuts, z, params), z))
        .collect();

    debug!(
        samples = points.len(),
        cuts = cuts.len(),
        length = shape.length,
        "built profile"
    );
    Ok(points)
}

/// Profile radius at a single axial position.
///
/// Cut pitches are assumed positive; [`build_profile_with`] checks them.
pub fn radius_at(shape: &ShapeParameters, cuts: &[CutZone], z: f64, params: &ProfileParams) -> f64 {
    let mut r = shape.taper_radius(z);

    for cut in cuts {
        if cut.kind.composition() != Composition::Additive || !cut.contains(z) {
            continue;
        }
        let pitch = cut.properties.pitch;
        let factor = ((z - cut.start_z) % pitch) / pitch;
        r -= waveform::reduction(cut.kind, factor, cut.properties.depth);
    }

    r.max(params.min_radius)
}

/// Axial sample positions: `i * step` below `length`, then `length` itself.
///
/// Positions are computed from the index rather than accumulated, so they are
/// strictly increasing and identical across runs.
fn sample_positions(length: f64, step: f64) -> impl Iterator<Item = f64> {
    let tol = Tolerance::DEFAULT;
    (0u64..)
        .map(move |i| i as f64 * step)
        .take_while(move |&z| z < length - tol.linear)
        .chain(std::iter::once(length))
}
