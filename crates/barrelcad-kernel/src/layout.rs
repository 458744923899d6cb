//! Cut placement along the barrel.
//!
//! Profile cuts may not share axial space. Vertical grooves live on a
//! different axis and neither block nor are blocked by anything.

use barrelcad_ir::{BarrelDesign, CutKind, CutUpdate, CutZone};
use tracing::debug;

use crate::{validate_cut, KernelError, Result};

/// Axial step used when scanning for a free slot (mm).
pub const SCAN_STEP: f64 = 2.0;

/// Whether `existing` blocks a new `kind` zone spanning `start..end`.
///
/// Touching zones do not block each other.
pub fn blocks(existing: &CutZone, start: f64, end: f64, kind: CutKind) -> bool {
    !kind.is_vertical() && !existing.kind.is_vertical() && existing.overlaps(start, end)
}

/// Whether a `kind` zone spanning `start..end` collides with any of `cuts`.
///
/// The cut named `ignore_id`, if any, is skipped so a zone can be moved or
/// resized in place.
pub fn collides(
    cuts: &[CutZone],
    ignore_id: Option<&str>,
    start: f64,
    end: f64,
    kind: CutKind,
) -> bool {
    cuts.iter()
        .filter(|c| Some(c.id.as_str()) != ignore_id)
        .any(|c| blocks(c, start, end, kind))
}

/// Find room for a new `kind` zone of `width` mm on a barrel of `length` mm.
///
/// The slot centred on the barrel is tried first, then slots starting at the
/// front in [`SCAN_STEP`] increments. Returns the `(start, end)` of the first
/// free slot, or `None` if the barrel is full.
pub fn find_free_slot(length: f64, cuts: &[CutZone], kind: CutKind, width: f64) -> Option<(f64, f64)> {
    if !width.is_finite() || width <= 0.0 || width > length {
        return None;
    }

    let centre = (length / 2.0 - width / 2.0).max(0.0);
    if !collides(cuts, None, centre, centre + width, kind) {
        return Some((centre, centre + width));
    }

    (0u64..)
        .map(|i| i as f64 * SCAN_STEP)
        .take_while(|&start| start + width <= length)
        .find(|&start| !collides(cuts, None, start, start + width, kind))
        .map(|start| (start, start + width))
}

/// Apply `update` to the cut `id`, moving or resizing it in place.
///
/// The edited zone must pass [`validate_cut`] and may not collide with any
/// other cut; on error the design is left unchanged.
///
/// # Errors
///
/// - `UnknownCut` if no cut has `id`
/// - `InvalidCut` if the edited zone is out of range
/// - `OverlappingCuts` if the edited zone collides with another cut
pub fn edit_cut<'a>(
    design: &'a mut BarrelDesign,
    id: &str,
    update: &CutUpdate,
) -> Result<&'a CutZone> {
    let edited = design
        .cut(id)
        .ok_or_else(|| KernelError::UnknownCut(id.to_string()))?
        .updated(update);
    validate_cut(&edited, design.length)?;

    if collides(&design.cuts, Some(id), edited.start_z, edited.end_z, edited.kind) {
        let blocker = design
            .cuts
            .iter()
            .filter(|c| c.id != id)
            .find(|c| blocks(c, edited.start_z, edited.end_z, edited.kind))
            .map(|c| c.id.clone())
            .unwrap_or_default();
        return Err(KernelError::OverlappingCuts {
            first: blocker,
            second: id.to_string(),
        });
    }

    debug!(id, start = edited.start_z, end = edited.end_z, "edited cut");
    design
        .update_cut(id, update)
        .ok_or_else(|| KernelError::UnknownCut(id.to_string()))
}
