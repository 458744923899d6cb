//! Boundary validation of design documents.

use std::collections::HashSet;

use barrelcad_ir::{BarrelDesign, CutZone};

use crate::layout::blocks;
use crate::{KernelError, Result};

/// Check a design against every geometric and material constraint.
///
/// Evaluation assumes a validated design; the pipeline itself only guards
/// against numerical degeneracy.
pub fn validate_design(design: &BarrelDesign) -> Result<()> {
    positive("length", design.length)?;
    positive("maxDiameter", design.max_diameter)?;
    let length = design.length;

    for (field, value) in [
        ("frontTaperLength", design.front_taper_length),
        ("rearTaperLength", design.rear_taper_length),
    ] {
        if !within(value, length) {
            return Err(KernelError::TaperOutOfRange {
                field,
                value,
                length,
            });
        }
    }

    for (field, value) in [
        ("holeDepthFront", design.hole_depth_front),
        ("holeDepthRear", design.hole_depth_rear),
    ] {
        if !within(value, length) {
            return Err(KernelError::BoreOutOfRange {
                field,
                value,
                length,
            });
        }
    }
    if design.hole_depth_front + design.hole_depth_rear > length {
        return Err(KernelError::BoresExceedLength {
            front: design.hole_depth_front,
            rear: design.hole_depth_rear,
            length,
        });
    }

    if !design.material_density.is_finite() || design.material_density < 0.0 {
        return Err(KernelError::InvalidDensity(design.material_density));
    }

    let mut ids = HashSet::new();
    for cut in &design.cuts {
        validate_cut(cut, length)?;
        if !ids.insert(cut.id.as_str()) {
            return Err(KernelError::DuplicateCutId(cut.id.clone()));
        }
    }

    for (i, cut) in design.cuts.iter().enumerate() {
        if let Some(other) = design.cuts[..i]
            .iter()
            .find(|other| blocks(other, cut.start_z, cut.end_z, cut.kind))
        {
            return Err(KernelError::OverlappingCuts {
                first: other.id.clone(),
                second: cut.id.clone(),
            });
        }
    }

    Ok(())
}

/// Check one cut zone's bounds and pattern properties against a barrel length.
pub fn validate_cut(cut: &CutZone, length: f64) -> Result<()> {
    let invalid = |reason: String| KernelError::InvalidCut {
        id: cut.id.clone(),
        reason,
    };

    if !cut.start_z.is_finite() || !cut.end_z.is_finite() {
        return Err(invalid("bounds must be finite".into()));
    }
    if cut.start_z < 0.0 || cut.end_z > length {
        return Err(invalid(format!(
            "zone {}..{} lies outside 0..{length}",
            cut.start_z, cut.end_z
        )));
    }
    if cut.start_z >= cut.end_z {
        return Err(invalid(format!(
            "start {} must be below end {}",
            cut.start_z, cut.end_z
        )));
    }

    let props = &cut.properties;
    if !props.pitch.is_finite() || props.pitch <= 0.0 {
        return Err(invalid(format!("pitch must be positive, got {}", props.pitch)));
    }
    if !props.depth.is_finite() || props.depth < 0.0 {
        return Err(invalid(format!(
            "depth must be non-negative, got {}",
            props.depth
        )));
    }
    if cut.kind.is_vertical() && props.item_count() == 0 {
        return Err(invalid("vertical cut needs at least one groove".into()));
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(KernelError::InvalidDimension { field, value })
    }
}

fn within(value: f64, length: f64) -> bool {
    value.is_finite() && (0.0..=length).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrelcad_ir::CutKind;

    fn with_cuts(cuts: Vec<CutZone>) -> BarrelDesign {
        BarrelDesign {
            cuts,
            ..BarrelDesign::default()
        }
    }

    #[test]
    fn test_default_design_is_valid() {
        validate_design(&BarrelDesign::default()).unwrap();
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let mut design = BarrelDesign::default();
        design.length = 0.0;
        assert!(matches!(
            validate_design(&design),
            Err(KernelError::InvalidDimension { field: "length", .. })
        ));

        let mut design = BarrelDesign::default();
        design.max_diameter = f64::NAN;
        assert!(matches!(
            validate_design(&design),
            Err(KernelError::InvalidDimension { field: "maxDiameter", .. })
        ));
    }

    #[test]
    fn test_rejects_tapers_and_bores_out_of_range() {
        let mut design = BarrelDesign::default();
        design.rear_taper_length = 50.0;
        assert!(matches!(
            validate_design(&design),
            Err(KernelError::TaperOutOfRange { .. })
        ));

        let mut design = BarrelDesign::default();
        design.hole_depth_front = -1.0;
        assert!(matches!(
            validate_design(&design),
            Err(KernelError::BoreOutOfRange { .. })
        ));

        let mut design = BarrelDesign::default();
        design.hole_depth_front = 25.0;
        design.hole_depth_rear = 25.0;
        assert!(matches!(
            validate_design(&design),
            Err(KernelError::BoresExceedLength { .. })
        ));
    }

    #[test]
    fn test_rejects_negative_density() {
        let mut design = BarrelDesign::default();
        design.material_density = -0.1;
        assert!(matches!(
            validate_design(&design),
            Err(KernelError::InvalidDensity(_))
        ));
        design.material_density = 0.0;
        validate_design(&design).unwrap();
    }

    #[test]
    fn test_rejects_bad_cuts() {
        let reversed = with_cuts(vec![CutZone::new("a", CutKind::Ring, 20.0, 10.0)]);
        assert!(matches!(
            validate_design(&reversed),
            Err(KernelError::InvalidCut { .. })
        ));

        let outside = with_cuts(vec![CutZone::new("a", CutKind::Ring, 40.0, 46.0)]);
        assert!(matches!(
            validate_design(&outside),
            Err(KernelError::InvalidCut { .. })
        ));

        let zero_pitch =
            with_cuts(vec![CutZone::new("a", CutKind::Ring, 10.0, 20.0).with_pattern(0.0, 0.5)]);
        assert!(matches!(
            validate_design(&zero_pitch),
            Err(KernelError::InvalidCut { .. })
        ));

        let no_grooves =
            with_cuts(vec![CutZone::new("v", CutKind::Vertical, 10.0, 20.0).with_item_count(0)]);
        assert!(matches!(
            validate_design(&no_grooves),
            Err(KernelError::InvalidCut { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let design = with_cuts(vec![
            CutZone::new("a", CutKind::Ring, 5.0, 10.0),
            CutZone::new("a", CutKind::Shark, 20.0, 30.0),
        ]);
        assert!(matches!(
            validate_design(&design),
            Err(KernelError::DuplicateCutId(id)) if id == "a"
        ));
    }

    #[test]
    fn test_overlap_rules() {
        let overlapping = with_cuts(vec![
            CutZone::new("a", CutKind::Ring, 5.0, 15.0),
            CutZone::new("b", CutKind::Canyon, 10.0, 20.0),
        ]);
        match validate_design(&overlapping) {
            Err(KernelError::OverlappingCuts { first, second }) => {
                assert_eq!(first, "a");
                assert_eq!(second, "b");
            }
            other => panic!("expected overlap error, got {other:?}"),
        }

        let touching = with_cuts(vec![
            CutZone::new("a", CutKind::Ring, 5.0, 15.0),
            CutZone::new("b", CutKind::Canyon, 15.0, 20.0),
        ]);
        validate_design(&touching).unwrap();

        let vertical_over_ring = with_cuts(vec![
            CutZone::new("a", CutKind::Ring, 5.0, 15.0),
            CutZone::new("v", CutKind::Vertical, 0.0, 45.0),
            CutZone::new("w", CutKind::Vertical, 10.0, 30.0),
        ]);
        validate_design(&vertical_over_ring).unwrap();
    }
}
