#![warn(missing_docs)]

//! Dart barrel design kernel facade for barrelcad.
//!
//! Provides the [`Barrel`] type: a validated design document plus the
//! resolution settings needed to evaluate it. Profile, mesh and mass
//! properties are computed on demand and are bit-identical for identical
//! inputs.
//!
//! # Example
//!
//! ```
//! use barrelcad_kernel::{Barrel, BarrelDesign};
//!
//! let barrel = Barrel::from_design(BarrelDesign::default()).unwrap();
//! let eval = barrel.evaluate().unwrap();
//! assert!(eval.properties.weight > 0.0);
//! assert!(eval.mesh.num_triangles() > 0);
//! ```

mod cache;
mod config;
mod error;
pub mod layout;
mod validate;

pub use barrelcad_ir;
pub use barrelcad_kernel_lathe;
pub use barrelcad_kernel_mass;
pub use barrelcad_kernel_math;
pub use barrelcad_kernel_profile;

pub use barrelcad_ir::{
    BarrelDesign, CutKind, CutUpdate, CutZone, Dimension, ShapeType, WizardSpec,
};
pub use barrelcad_kernel_lathe::TriangleMesh;
pub use barrelcad_kernel_mass::PhysicalProperties;
pub use barrelcad_kernel_math::ProfilePoint;
pub use barrelcad_kernel_profile::ShapeParameters;
pub use cache::MeshCache;
pub use config::KernelConfig;
pub use error::{KernelError, Result};
pub use validate::{validate_cut, validate_design};

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use barrelcad_kernel_lathe::build_mesh;
use barrelcad_kernel_mass::{compute_mass_properties, Bores};
use barrelcad_kernel_profile::build_profile_with;
use tracing::info;

/// Everything the kernel computes for one barrel.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Outer profile curve.
    pub profile: Vec<ProfilePoint>,
    /// Revolved mesh including bores and vertical grooves.
    pub mesh: TriangleMesh,
    /// Volume, weight and center of gravity.
    pub properties: PhysicalProperties,
}

/// A validated barrel design ready for evaluation.
///
/// Construction validates once; every evaluation afterwards is a total
/// function of the stored inputs.
#[derive(Debug, Clone)]
pub struct Barrel {
    design: BarrelDesign,
    config: KernelConfig,
    shape: ShapeParameters,
}

impl Barrel {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Validate a design and configuration.
    pub fn new(design: BarrelDesign, config: KernelConfig) -> Result<Self> {
        config.validate()?;
        validate_design(&design)?;
        let shape = ShapeParameters::from_design(&design);
        info!(
            length = design.length,
            max_diameter = design.max_diameter,
            cuts = design.cuts.len(),
            "validated barrel"
        );
        Ok(Self {
            design,
            config,
            shape,
        })
    }

    /// Validate a design with the default configuration.
    pub fn from_design(design: BarrelDesign) -> Result<Self> {
        Self::new(design, KernelConfig::default())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The design document.
    pub fn design(&self) -> &BarrelDesign {
        &self.design
    }

    /// The resolution settings.
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Geometric parameters derived from the design.
    pub fn shape(&self) -> &ShapeParameters {
        &self.shape
    }

    // =========================================================================
    // Evaluation
    // =========================================================================

    /// Outer profile curve.
    pub fn profile(&self) -> Result<Vec<ProfilePoint>> {
        Ok(build_profile_with(
            &self.shape,
            &self.design.cuts,
            &self.config.profile,
        )?)
    }

    /// Revolved triangle mesh.
    pub fn mesh(&self) -> Result<TriangleMesh> {
        let profile = self.profile()?;
        self.mesh_from(&profile)
    }

    /// Volume, weight and center of gravity.
    pub fn mass_properties(&self) -> Result<PhysicalProperties> {
        let profile = self.profile()?;
        Ok(self.mass_from(&profile))
    }

    /// Profile, mesh and mass properties from a single profile pass.
    pub fn evaluate(&self) -> Result<Evaluation> {
        let profile = self.profile()?;
        let mesh = self.mesh_from(&profile)?;
        let properties = self.mass_from(&profile);
        Ok(Evaluation {
            profile,
            mesh,
            properties,
        })
    }

    fn mesh_from(&self, profile: &[ProfilePoint]) -> Result<TriangleMesh> {
        Ok(build_mesh(
            profile,
            &self.shape,
            &self.design.cuts,
            &self.config.lathe,
        )?)
    }

    fn mass_from(&self, profile: &[ProfilePoint]) -> PhysicalProperties {
        let bores = Bores {
            front_depth: self.shape.hole_depth_front,
            rear_depth: self.shape.hole_depth_rear,
            radius: self.shape.bore_radius,
        };
        compute_mass_properties(profile, self.design.material_density, &bores)
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Structural hash of every input that affects evaluation.
    ///
    /// Floats are hashed by bit pattern. Cut ids, the stored outline and the
    /// timestamp do not contribute.
    pub fn fingerprint(&self) -> u64 {
        let mut h = DefaultHasher::new();
        let d = &self.design;
        for v in [
            d.length,
            d.max_diameter,
            d.material_density,
            d.front_taper_length,
            d.rear_taper_length,
            d.hole_depth_front,
            d.hole_depth_rear,
        ] {
            v.to_bits().hash(&mut h);
        }

        d.cuts.len().hash(&mut h);
        for cut in &d.cuts {
            cut.kind.hash(&mut h);
            for v in [
                cut.start_z,
                cut.end_z,
                cut.properties.pitch,
                cut.properties.depth,
            ] {
                v.to_bits().hash(&mut h);
            }
            cut.properties.item_count().hash(&mut h);
        }

        let p = &self.config.profile;
        let l = &self.config.lathe;
        l.radial_segments.hash(&mut h);
        for v in [
            p.step,
            p.min_radius,
            l.wall_step,
            l.axis_radius,
            l.outer_threshold,
            l.bore_tolerance,
            l.thread_pitch,
            l.thread_depth,
            l.min_radius,
        ] {
            v.to_bits().hash(&mut h);
        }
        h.finish()
    }
}
