#![warn(missing_docs)]

//! Solid-of-revolution mesh builder for the barrelcad kernel.
//!
//! Revolves an extended profile (front bore wall, outer profile, rear bore
//! wall) around the Z axis into an indexed triangle mesh:
//! 1. Extend the outer profile with both bore walls and their bottoms
//! 2. Classify each ring as outer surface, bore surface or transition face
//! 3. Perturb ring radii per vertex: vertical grooves on the outer surface,
//!    a thread ripple on the bore surface
//! 4. Emit two triangles per grid quad and compute vertex normals

mod mesh;

pub use mesh::TriangleMesh;

use std::f64::consts::PI;

use barrelcad_ir::{Composition, CutZone};
use barrelcad_kernel_math::{ProfilePoint, Tolerance};
use barrelcad_kernel_profile::{waveform, ShapeParameters};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors from mesh construction.
#[derive(Debug, Clone, Error)]
pub enum LatheError {
    /// The profile has too few samples to span a surface.
    #[error("profile needs at least 2 samples, got {0}")]
    DegenerateProfile(usize),

    /// Fewer than three segments around the circumference.
    #[error("at least 3 radial segments required, got {0}")]
    TooFewSegments(u32),

    /// Wall sweep step is zero, negative or not finite.
    #[error("bore wall step must be positive, got {0}")]
    NonPositiveWallStep(f64),

    /// Thread pitch is zero, negative or not finite.
    #[error("thread pitch must be positive, got {0}")]
    NonPositiveThreadPitch(f64),

    /// The grid would overflow 32-bit indices.
    #[error("mesh too large: {0} vertices")]
    TooManyVertices(usize),
}

/// Result type for lathe operations.
pub type Result<T> = std::result::Result<T, LatheError>;

/// Revolution and surface-texture parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatheParams {
    /// Segments around the circumference.
    pub radial_segments: u32,
    /// Axial distance between bore wall rings (mm).
    pub wall_step: f64,
    /// Radius used for the on-axis ring closing each bore bottom (mm).
    pub axis_radius: f64,
    /// Rings with a larger radius are outer surface (mm).
    pub outer_threshold: f64,
    /// Rings within this distance of the bore radius are bore surface (mm).
    pub bore_tolerance: f64,
    /// Axial pitch of the simulated thread (mm).
    pub thread_pitch: f64,
    /// Amplitude of the simulated thread (mm).
    pub thread_depth: f64,
    /// Floor applied to every vertex radius (mm).
    pub min_radius: f64,
}

impl Default for LatheParams {
    fn default() -> Self {
        Self {
            radial_segments: 64,
            wall_step: 0.2,
            axis_radius: 0.001,
            outer_threshold: 2.5,
            bore_tolerance: 0.01,
            thread_pitch: 0.8,
            thread_depth: 0.15,
            min_radius: 0.1,
        }
    }
}

/// Which surface a ring of the extended profile lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Outside of the barrel; carries vertical grooves.
    Outer,
    /// Bore wall; carries the thread ripple.
    Bore,
    /// End faces and bore bottoms; left untouched.
    Transition,
}

/// Classify a ring by its base radius.
pub fn classify(radius: f64, bore_radius: f64, params: &LatheParams) -> Surface {
    if (radius - bore_radius).abs() < params.bore_tolerance {
        Surface::Bore
    } else if radius > params.outer_threshold {
        Surface::Outer
    } else {
        Surface::Transition
    }
}

/// Extend an outer profile with both bores.
///
/// The result runs: front bore bottom on the axis, front bore wall from its
/// bottom up to `z = 0`, the outer profile, rear bore wall from `z = length`
/// down to its bottom, rear bore bottom on the axis.
pub fn extended_profile(
    outer: &[ProfilePoint],
    shape: &ShapeParameters,
    params: &LatheParams,
) -> Vec<ProfilePoint> {
    let bore = shape.bore_radius;
    let front_bottom = shape.hole_depth_front;
    let rear_bottom = shape.length - shape.hole_depth_rear;

    let mut points = Vec::with_capacity(outer.len() + 8);
    points.push(ProfilePoint::new(params.axis_radius, front_bottom));
    points.extend(wall_sweep(front_bottom, 0.0, params.wall_step).map(|z| ProfilePoint::new(bore, z)));
    points.extend_from_slice(outer);
    points.extend(
        wall_sweep(shape.length, rear_bottom, params.wall_step).map(|z| ProfilePoint::new(bore, z)),
    );
    points.push(ProfilePoint::new(params.axis_radius, rear_bottom));
    points
}

/// Positions from `from` toward `to` in `step` increments, ending exactly at `to`.
fn wall_sweep(from: f64, to: f64, step: f64) -> impl Iterator<Item = f64> {
    let tol = Tolerance::DEFAULT;
    let span = (from - to).abs();
    let dir = if to < from { -1.0 } else { 1.0 };
    (0u64..)
        .map(move |i| i as f64 * step)
        .take_while(move |&d| d < span - tol.linear)
        .map(move |d| from + dir * d)
        .chain(std::iter::once(to))
}

/// Build the barrel mesh from its outer profile.
///
/// Only zones whose kind composes by maximum (vertical cuts) affect the mesh;
/// profile cuts are already part of `outer`.
///
/// # Errors
///
/// - `DegenerateProfile` if `outer` has fewer than 2 samples
/// - `TooFewSegments` if `params.radial_segments < 3`
/// - `NonPositiveWallStep` if `params.wall_step` is not positive
/// - `NonPositiveThreadPitch` if `params.thread_pitch` is not positive
/// - `TooManyVertices` if the grid does not fit 32-bit indices
pub fn build_mesh(
    outer: &[ProfilePoint],
    shape: &ShapeParameters,
    cuts: &[CutZone],
    params: &LatheParams,
) -> Result<TriangleMesh> {
    if outer.len() < 2 {
        return Err(LatheError::DegenerateProfile(outer.len()));
    }
    if params.radial_segments < 3 {
        return Err(LatheError::TooFewSegments(params.radial_segments));
    }
    if !params.wall_step.is_finite() || params.wall_step <= 0.0 {
        return Err(LatheError::NonPositiveWallStep(params.wall_step));
    }
    if !params.thread_pitch.is_finite() || params.thread_pitch <= 0.0 {
        return Err(LatheError::NonPositiveThreadPitch(params.thread_pitch));
    }

    let rings = extended_profile(outer, shape, params);
    let n = params.radial_segments as usize;
    let stride = n + 1;
    let vertex_count = rings.len() * stride;
    if vertex_count > u32::MAX as usize {
        return Err(LatheError::TooManyVertices(vertex_count));
    }

    let grooves: Vec<&CutZone> = cuts
        .iter()
        .filter(|c| c.kind.composition() == Composition::Max)
        .collect();

    let mut mesh = TriangleMesh::new();
    mesh.vertices.reserve(vertex_count * 3);
    mesh.uvs.reserve(vertex_count * 2);

    let last_ring = (rings.len() - 1) as f64;
    for (i, ring) in rings.iter().enumerate() {
        let surface = classify(ring.radius, shape.bore_radius, params);
        let v = 1.0 - i as f64 / last_ring;

        for j in 0..=n {
            let u = j as f64 / n as f64;
            let theta = u * 2.0 * PI;

            let offset = match surface {
                Surface::Outer => groove_depth(&grooves, ring.z, theta),
                Surface::Bore => {
                    params.thread_depth * (ring.z * (2.0 * PI / params.thread_pitch)).sin()
                }
                Surface::Transition => 0.0,
            };
            let r = (ring.radius - offset).max(params.min_radius);
            let p = ProfilePoint::new(r, ring.z).revolve(theta);

            mesh.vertices.extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
            mesh.uvs.extend_from_slice(&[u as f32, v as f32]);
        }
    }

    mesh.indices.reserve((rings.len() - 1) * n * 6);
    for i in 0..rings.len() - 1 {
        for j in 0..n {
            let a = (i * stride + j) as u32;
            let b = a + 1;
            let c = a + stride as u32;
            let d = c + 1;
            mesh.indices.extend_from_slice(&[a, b, d, a, d, c]);
        }
    }

    mesh.compute_vertex_normals();

    debug!(
        rings = rings.len(),
        vertices = mesh.num_vertices(),
        triangles = mesh.num_triangles(),
        grooves = grooves.len(),
        "built lathe mesh"
    );
    Ok(mesh)
}

/// Deepest vertical groove covering `(z, theta)`.
fn groove_depth(grooves: &[&CutZone], z: f64, theta: f64) -> f64 {
    grooves
        .iter()
        .filter(|g| g.contains(z))
        .map(|g| waveform::vertical_reduction(theta, g.properties.item_count(), g.properties.depth))
        .fold(0.0, f64::max)
}
