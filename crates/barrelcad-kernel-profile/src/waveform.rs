//! Per-kind cut waveforms.
//!
//! Every function returns a non-negative radius reduction for a position
//! `factor` in `[0, 1)` within one pitch of the cut.

use std::f64::consts::PI;

use barrelcad_ir::CutKind;

/// Radius reduction of a profile cut at `factor` within its pitch.
///
/// Vertical cuts have no profile effect and return zero.
pub fn reduction(kind: CutKind, factor: f64, depth: f64) -> f64 {
    match kind {
        CutKind::Ring | CutKind::Micro | CutKind::Unrecognized => ring(factor, depth),
        CutKind::RingDouble => {
            if factor < 0.25 || (factor > 0.4 && factor < 0.65) {
                depth
            } else {
                0.0
            }
        }
        CutKind::RingTriple => {
            if factor < 0.2 || (factor > 0.3 && factor < 0.5) || (factor > 0.6 && factor < 0.8) {
                depth
            } else {
                0.0
            }
        }
        CutKind::Shark => depth * factor,
        CutKind::Wing => depth * (1.0 - factor),
        CutKind::RingV => {
            if factor < 0.5 {
                depth * (factor / 0.5)
            } else {
                depth * ((1.0 - factor) / 0.5)
            }
        }
        CutKind::RingRound | CutKind::Scallop => depth * (factor * PI).sin(),
        CutKind::Canyon => {
            if factor < 0.2 {
                depth * (factor / 0.2)
            } else if factor < 0.8 {
                depth
            } else {
                depth * ((1.0 - factor) / 0.2)
            }
        }
        CutKind::Step => {
            if factor < 0.4 {
                depth
            } else if factor < 0.7 {
                depth * 0.5
            } else {
                0.0
            }
        }
        CutKind::Stair => stair(factor, depth),
        CutKind::Vertical => 0.0,
    }
}

fn ring(factor: f64, depth: f64) -> f64 {
    if factor < 0.5 {
        depth
    } else {
        0.0
    }
}

// Past 0.6 the staircase re-tests the same factor, so the 0.33 step is never
// reached and only the 0.66 and full-depth steps are observable.
fn stair(factor: f64, depth: f64) -> f64 {
    if factor < 0.4 {
        depth * (factor / 0.4)
    } else if factor < 0.6 {
        depth
    } else if factor < 0.33 {
        depth * 0.33
    } else if factor < 0.66 {
        depth * 0.66
    } else {
        depth
    }
}

/// Radius reduction of a vertical (longitudinal) cut at angle `theta`.
///
/// A triangular wave with `count` teeth per revolution, peaking at `depth`
/// halfway between groove edges.
pub fn vertical_reduction(theta: f64, count: u32, depth: f64) -> f64 {
    let count = count.max(1);
    let segment = 2.0 * PI / f64::from(count);
    let local = (theta % segment) / segment;
    let wave = 1.0 - 2.0 * (local - 0.5).abs();
    depth * wave
}
