//! Cut zones: decorative radius-reduction bands applied along the barrel.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default axial pitch of a cut pattern (mm).
pub const DEFAULT_PITCH: f64 = 1.0;

/// Default cut depth (mm).
pub const DEFAULT_DEPTH: f64 = 0.5;

/// Default number of grooves around the circumference for vertical cuts.
pub const DEFAULT_ITEM_COUNT: u32 = 12;

/// Shape of a cut's waveform.
///
/// Serialized with the tag names used by saved design documents. Any tag that
/// is not recognized (including the legacy `none`) deserializes to
/// [`CutKind::Unrecognized`], which is cut like a plain ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutKind {
    /// Square groove, 50% duty cycle.
    Ring,
    /// Two grooves per pitch.
    RingDouble,
    /// Three grooves per pitch.
    RingTriple,
    /// Triangular (V) groove.
    RingV,
    /// Half-sine (rounded) groove.
    #[serde(rename = "ring_r", alias = "ring_round")]
    RingRound,
    /// Half-sine groove, conventionally wider and shallower than [`CutKind::RingRound`].
    Scallop,
    /// Trapezoidal groove.
    Canyon,
    /// Sawtooth ramping into the cut, sharp edge at the end of each pitch.
    Shark,
    /// Sawtooth with the sharp edge at the start of each pitch.
    Wing,
    /// Two-level step.
    Step,
    /// Ramp, flat, then staircase.
    Stair,
    /// Fine-pitch ring.
    Micro,
    /// Longitudinal grooves around the circumference.
    Vertical,
    /// Unknown tag from a document; cut like [`CutKind::Ring`].
    #[serde(other)]
    Unrecognized,
}

/// How overlapping contributions of the same category combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Composition {
    /// Contributions from every containing zone are summed.
    Additive,
    /// The deepest contribution wins.
    Max,
}

/// Palette grouping of cut kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CutCategory {
    /// Ring family.
    Basic,
    /// Grip-oriented sawtooth and step cuts.
    Aggressive,
    /// Shaped grooves.
    Groove,
    /// Micro and vertical cuts.
    Special,
}

impl CutKind {
    /// Every named kind, in palette order.
    pub const ALL: [CutKind; 13] = [
        CutKind::Ring,
        CutKind::RingDouble,
        CutKind::RingTriple,
        CutKind::Shark,
        CutKind::Wing,
        CutKind::Step,
        CutKind::Stair,
        CutKind::RingRound,
        CutKind::RingV,
        CutKind::Scallop,
        CutKind::Canyon,
        CutKind::Micro,
        CutKind::Vertical,
    ];

    /// The document tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            CutKind::Ring => "ring",
            CutKind::RingDouble => "ring_double",
            CutKind::RingTriple => "ring_triple",
            CutKind::RingV => "ring_v",
            CutKind::RingRound => "ring_r",
            CutKind::Scallop => "scallop",
            CutKind::Canyon => "canyon",
            CutKind::Shark => "shark",
            CutKind::Wing => "wing",
            CutKind::Step => "step",
            CutKind::Stair => "stair",
            CutKind::Micro => "micro",
            CutKind::Vertical => "vertical",
            CutKind::Unrecognized => "unrecognized",
        }
    }

    /// Kind for an exact document tag, or `None` if the tag is not recognized.
    pub fn from_tag(tag: &str) -> Option<Self> {
        if tag == "ring_round" {
            return Some(CutKind::RingRound);
        }
        CutKind::ALL.iter().copied().find(|k| k.as_str() == tag)
    }

    /// Whether this kind acts on the circumference rather than the profile.
    pub fn is_vertical(&self) -> bool {
        matches!(self, CutKind::Vertical)
    }

    /// Composition rule for zones of this kind.
    ///
    /// Profile cuts accumulate; vertical cuts take the deepest groove.
    pub fn composition(&self) -> Composition {
        if self.is_vertical() {
            Composition::Max
        } else {
            Composition::Additive
        }
    }

    /// Palette category.
    pub fn category(&self) -> CutCategory {
        match self {
            CutKind::Ring | CutKind::RingDouble | CutKind::RingTriple | CutKind::Unrecognized => {
                CutCategory::Basic
            }
            CutKind::Shark | CutKind::Wing | CutKind::Step | CutKind::Stair => {
                CutCategory::Aggressive
            }
            CutKind::RingRound | CutKind::RingV | CutKind::Scallop | CutKind::Canyon => {
                CutCategory::Groove
            }
            CutKind::Micro | CutKind::Vertical => CutCategory::Special,
        }
    }
}

impl fmt::Display for CutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CutKind::from_tag(&s.trim().to_ascii_lowercase())
            .ok_or_else(|| format!("unknown cut kind: {s}"))
    }
}

/// Tunable parameters of a cut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CutProperties {
    /// Axial length of one waveform cycle (mm).
    #[serde(default = "default_pitch")]
    pub pitch: f64,
    /// Maximum radius reduction (mm).
    #[serde(default = "default_depth")]
    pub depth: f64,
    /// Groove count around the circumference (vertical cuts only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u32>,
}

fn default_pitch() -> f64 {
    DEFAULT_PITCH
}

fn default_depth() -> f64 {
    DEFAULT_DEPTH
}

impl Default for CutProperties {
    fn default() -> Self {
        Self {
            pitch: DEFAULT_PITCH,
            depth: DEFAULT_DEPTH,
            item_count: Some(DEFAULT_ITEM_COUNT),
        }
    }
}

impl CutProperties {
    /// Groove count, falling back to the default when unset.
    pub fn item_count(&self) -> u32 {
        self.item_count.unwrap_or(DEFAULT_ITEM_COUNT)
    }
}

/// An axial band carrying one cut pattern.
///
/// A zone read with an unrecognized `type` keeps that tag and writes it back
/// unchanged, so legacy documents survive a load and save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CutZoneDoc", into = "CutZoneDoc")]
pub struct CutZone {
    /// Identifier, unique within a design.
    pub id: String,
    /// Waveform shape.
    pub kind: CutKind,
    /// Start of the band, measured from the front (mm).
    pub start_z: f64,
    /// End of the band, measured from the front (mm).
    pub end_z: f64,
    /// Pattern parameters.
    pub properties: CutProperties,
    /// Document tag of an [`CutKind::Unrecognized`] kind, as read.
    pub unknown_tag: Option<String>,
}

/// Persisted layout of a [`CutZone`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CutZoneDoc {
    id: String,
    #[serde(rename = "type")]
    tag: String,
    start_z: f64,
    end_z: f64,
    #[serde(default)]
    properties: CutProperties,
}

impl From<CutZoneDoc> for CutZone {
    fn from(doc: CutZoneDoc) -> Self {
        let (kind, unknown_tag) = match CutKind::from_tag(&doc.tag) {
            Some(kind) => (kind, None),
            None => (CutKind::Unrecognized, Some(doc.tag)),
        };
        Self {
            id: doc.id,
            kind,
            start_z: doc.start_z,
            end_z: doc.end_z,
            properties: doc.properties,
            unknown_tag,
        }
    }
}

impl From<CutZone> for CutZoneDoc {
    fn from(zone: CutZone) -> Self {
        let tag = match (zone.kind, zone.unknown_tag) {
            (CutKind::Unrecognized, Some(tag)) => tag,
            (kind, _) => kind.as_str().to_string(),
        };
        Self {
            id: zone.id,
            tag,
            start_z: zone.start_z,
            end_z: zone.end_z,
            properties: zone.properties,
        }
    }
}

/// Partial edit of a [`CutZone`]; unset fields are left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CutUpdate {
    /// New waveform shape.
    pub kind: Option<CutKind>,
    /// New start of the band (mm).
    pub start_z: Option<f64>,
    /// New end of the band (mm).
    pub end_z: Option<f64>,
    /// New pitch (mm).
    pub pitch: Option<f64>,
    /// New depth (mm).
    pub depth: Option<f64>,
    /// New vertical groove count.
    pub item_count: Option<u32>,
}

impl CutUpdate {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl CutZone {
    /// Create a zone with default properties.
    pub fn new(id: impl Into<String>, kind: CutKind, start_z: f64, end_z: f64) -> Self {
        Self {
            id: id.into(),
            kind,
            start_z,
            end_z,
            properties: CutProperties::default(),
            unknown_tag: None,
        }
    }

    /// Apply the set fields of `update`.
    pub fn apply(&mut self, update: &CutUpdate) {
        if let Some(kind) = update.kind {
            self.kind = kind;
            self.unknown_tag = None;
        }
        if let Some(start_z) = update.start_z {
            self.start_z = start_z;
        }
        if let Some(end_z) = update.end_z {
            self.end_z = end_z;
        }
        if let Some(pitch) = update.pitch {
            self.properties.pitch = pitch;
        }
        if let Some(depth) = update.depth {
            self.properties.depth = depth;
        }
        if let Some(count) = update.item_count {
            self.properties.item_count = Some(count);
        }
    }

    /// This zone with `update` applied.
    pub fn updated(&self, update: &CutUpdate) -> Self {
        let mut zone = self.clone();
        zone.apply(update);
        zone
    }

    /// Builder-style override of pitch and depth.
    pub fn with_pattern(mut self, pitch: f64, depth: f64) -> Self {
        self.properties.pitch = pitch;
        self.properties.depth = depth;
        self
    }

    /// Builder-style override of the vertical groove count.
    pub fn with_item_count(mut self, count: u32) -> Self {
        self.properties.item_count = Some(count);
        self
    }

    /// Axial width of the band.
    pub fn width(&self) -> f64 {
        self.end_z - self.start_z
    }

    /// Whether `z` lies in the band, bounds included.
    pub fn contains(&self, z: f64) -> bool {
        z >= self.start_z && z <= self.end_z
    }

    /// Whether the open intervals of two bands intersect. Touching bands do not overlap.
    pub fn overlaps(&self, start_z: f64, end_z: f64) -> bool {
        end_z > self.start_z && start_z < self.end_z
    }
}
