#![warn(missing_docs)]

//! Design document format for barrelcad.
//!
//! A [`BarrelDesign`] is the declarative parameter set of one barrel: overall
//! dimensions, taper lengths, end bores, material density and the list of
//! [`CutZone`]s. It carries no geometry; profile, mesh and mass properties are
//! derived from it by the kernel.
//!
//! The JSON layout matches the documents written by the editor, so files saved
//! there load here unchanged.

mod cut;

pub use cut::{
    Composition, CutCategory, CutKind, CutProperties, CutUpdate, CutZone, DEFAULT_DEPTH,
    DEFAULT_ITEM_COUNT, DEFAULT_PITCH,
};

use serde::{Deserialize, Serialize};

/// Density of nickel in g/cm³.
pub const NICKEL_DENSITY: f64 = 8.9;

/// Density of tungsten in g/cm³.
pub const TUNGSTEN_DENSITY: f64 = 19.3;

/// Density of a tungsten-nickel alloy with the given tungsten percentage.
///
/// Linear blend between nickel and tungsten. The percentage is clamped to
/// `[0, 100]`.
pub fn density_from_tungsten(percent: f64) -> f64 {
    let w = percent.clamp(0.0, 100.0) / 100.0;
    TUNGSTEN_DENSITY * w + NICKEL_DENSITY * (1.0 - w)
}

/// Overall silhouette family chosen during setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeType {
    /// Tapered at both ends.
    #[default]
    Torpedo,
    /// Constant diameter.
    Straight,
}

/// One point of an externally extracted outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlinePoint {
    /// Axial position from the front (mm).
    pub z: f64,
    /// Radius at that position (mm).
    pub radius: f64,
}

/// A scalar dimension of a [`BarrelDesign`] that can be edited directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Overall length (mm).
    Length,
    /// Maximum diameter (mm).
    MaxDiameter,
    /// Front taper length (mm).
    FrontTaperLength,
    /// Rear taper length (mm).
    RearTaperLength,
    /// Front bore depth (mm).
    HoleDepthFront,
    /// Rear bore depth (mm).
    HoleDepthRear,
    /// Material density (g/cm³).
    MaterialDensity,
}

/// A barrel design document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BarrelDesign {
    /// Overall length (mm).
    pub length: f64,
    /// Maximum diameter (mm).
    pub max_diameter: f64,
    /// Cut zones.
    pub cuts: Vec<CutZone>,
    /// Material density (g/cm³).
    pub material_density: f64,
    /// Axial length of the front taper (mm).
    pub front_taper_length: f64,
    /// Axial length of the rear taper (mm).
    pub rear_taper_length: f64,
    /// Depth of the front bore (mm).
    pub hole_depth_front: f64,
    /// Depth of the rear bore (mm).
    pub hole_depth_rear: f64,
    /// Silhouette family.
    pub shape_type: ShapeType,
    /// Extracted outline, kept for round-tripping. Not evaluated by the kernel.
    pub outline: Vec<OutlinePoint>,
    /// Export timestamp (ISO 8601), if the document was exported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Default for BarrelDesign {
    fn default() -> Self {
        Self {
            length: 45.0,
            max_diameter: 7.0,
            cuts: Vec::new(),
            material_density: 17.0,
            front_taper_length: 10.0,
            rear_taper_length: 10.0,
            hole_depth_front: 10.0,
            hole_depth_rear: 15.0,
            shape_type: ShapeType::Torpedo,
            outline: Vec::new(),
            timestamp: None,
        }
    }
}

/// Answers collected by the guided setup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WizardSpec {
    /// Overall length (mm).
    pub length: f64,
    /// Maximum diameter (mm).
    pub max_diameter: f64,
    /// Tungsten content (percent).
    pub tungsten_percent: f64,
    /// Silhouette family.
    pub shape_type: ShapeType,
    /// Front taper length (mm).
    pub front_taper_length: f64,
    /// Rear taper length (mm).
    pub rear_taper_length: f64,
    /// Front bore depth (mm).
    pub hole_depth_front: f64,
    /// Rear bore depth (mm).
    pub hole_depth_rear: f64,
}

impl Default for WizardSpec {
    fn default() -> Self {
        Self {
            length: 45.0,
            max_diameter: 7.0,
            tungsten_percent: 90.0,
            shape_type: ShapeType::Torpedo,
            front_taper_length: 15.0,
            rear_taper_length: 15.0,
            hole_depth_front: 10.0,
            hole_depth_rear: 15.0,
        }
    }
}

impl BarrelDesign {
    /// Create a design with the editor defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh design from setup answers.
    ///
    /// Cuts and outline are empty. A straight barrel has no tapers.
    pub fn wizard(spec: &WizardSpec) -> Self {
        let (front, rear) = match spec.shape_type {
            ShapeType::Torpedo => (spec.front_taper_length, spec.rear_taper_length),
            ShapeType::Straight => (0.0, 0.0),
        };
        Self {
            length: spec.length,
            max_diameter: spec.max_diameter,
            material_density: density_from_tungsten(spec.tungsten_percent),
            front_taper_length: front,
            rear_taper_length: rear,
            hole_depth_front: spec.hole_depth_front,
            hole_depth_rear: spec.hole_depth_rear,
            shape_type: spec.shape_type,
            ..Self::default()
        }
    }

    /// Current value of a dimension.
    pub fn dimension(&self, dim: Dimension) -> f64 {
        match dim {
            Dimension::Length => self.length,
            Dimension::MaxDiameter => self.max_diameter,
            Dimension::FrontTaperLength => self.front_taper_length,
            Dimension::RearTaperLength => self.rear_taper_length,
            Dimension::HoleDepthFront => self.hole_depth_front,
            Dimension::HoleDepthRear => self.hole_depth_rear,
            Dimension::MaterialDensity => self.material_density,
        }
    }

    /// Overwrite a dimension. The value is stored as given; range checks are
    /// left to the kernel's validation.
    pub fn set_dimension(&mut self, dim: Dimension, value: f64) {
        let field = match dim {
            Dimension::Length => &mut self.length,
            Dimension::MaxDiameter => &mut self.max_diameter,
            Dimension::FrontTaperLength => &mut self.front_taper_length,
            Dimension::RearTaperLength => &mut self.rear_taper_length,
            Dimension::HoleDepthFront => &mut self.hole_depth_front,
            Dimension::HoleDepthRear => &mut self.hole_depth_rear,
            Dimension::MaterialDensity => &mut self.material_density,
        };
        *field = value;
    }

    /// Serialize to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Look up a cut by id.
    pub fn cut(&self, id: &str) -> Option<&CutZone> {
        self.cuts.iter().find(|c| c.id == id)
    }

    /// Append a cut.
    pub fn add_cut(&mut self, cut: CutZone) {
        self.cuts.push(cut);
    }

    /// Apply a partial edit to the cut with `id`, returning the edited cut.
    ///
    /// Placement is not checked here; see the kernel's layout rules.
    pub fn update_cut(&mut self, id: &str, update: &CutUpdate) -> Option<&CutZone> {
        let cut = self.cuts.iter_mut().find(|c| c.id == id)?;
        cut.apply(update);
        Some(cut)
    }

    /// Remove a cut by id, returning it if present.
    pub fn remove_cut(&mut self, id: &str) -> Option<CutZone> {
        let idx = self.cuts.iter().position(|c| c.id == id)?;
        Some(self.cuts.remove(idx))
    }

    /// An id of the form `<kind>-<n>` not yet used in this design.
    pub fn next_cut_id(&self, kind: CutKind) -> String {
        let mut n = self.cuts.len() + 1;
        loop {
            let id = format!("{kind}-{n}");
            if self.cut(&id).is_none() {
                return id;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_from_tungsten() {
        assert!((density_from_tungsten(0.0) - NICKEL_DENSITY).abs() < 1e-12);
        assert!((density_from_tungsten(100.0) - TUNGSTEN_DENSITY).abs() < 1e-12);
        assert!((density_from_tungsten(90.0) - 18.26).abs() < 1e-9);
        assert_eq!(density_from_tungsten(150.0), TUNGSTEN_DENSITY);
    }

    #[test]
    fn test_json_field_names() {
        let mut design = BarrelDesign::new();
        design.add_cut(CutZone::new("c1", CutKind::Ring, 10.0, 20.0));
        let json = design.to_json().unwrap();
        for key in [
            "\"length\"",
            "\"maxDiameter\"",
            "\"materialDensity\"",
            "\"frontTaperLength\"",
            "\"rearTaperLength\"",
            "\"holeDepthFront\"",
            "\"holeDepthRear\"",
            "\"shapeType\"",
            "\"startZ\"",
            "\"itemCount\"",
        ] {
            assert!(json.contains(key), "missing {key} in {json}");
        }
        assert!(!json.contains("timestamp"));
        let back = BarrelDesign::from_json(&json).unwrap();
        assert_eq!(back, design);
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let design = BarrelDesign::from_json(r#"{"length": 50, "cuts": []}"#).unwrap();
        assert_eq!(design.length, 50.0);
        assert_eq!(design.max_diameter, 7.0);
        assert_eq!(design.hole_depth_rear, 15.0);
        assert_eq!(design.shape_type, ShapeType::Torpedo);
    }

    #[test]
    fn test_wizard_straight_has_no_taper() {
        let spec = WizardSpec {
            shape_type: ShapeType::Straight,
            ..WizardSpec::default()
        };
        let design = BarrelDesign::wizard(&spec);
        assert_eq!(design.front_taper_length, 0.0);
        assert_eq!(design.rear_taper_length, 0.0);
        assert!(design.cuts.is_empty());

        let torpedo = BarrelDesign::wizard(&WizardSpec::default());
        assert_eq!(torpedo.front_taper_length, 15.0);
        assert_eq!(torpedo.hole_depth_front, 10.0);
        assert_eq!(torpedo.hole_depth_rear, 15.0);
        assert!((torpedo.material_density - 18.26).abs() < 1e-9);
    }

    #[test]
    fn test_wizard_bore_depths() {
        let spec = WizardSpec {
            hole_depth_front: 0.0,
            hole_depth_rear: 20.0,
            ..WizardSpec::default()
        };
        let design = BarrelDesign::wizard(&spec);
        assert_eq!(design.hole_depth_front, 0.0);
        assert_eq!(design.hole_depth_rear, 20.0);
    }

    #[test]
    fn test_set_dimension() {
        let mut design = BarrelDesign::new();
        design.set_dimension(Dimension::Length, 50.0);
        design.set_dimension(Dimension::HoleDepthRear, 12.5);
        design.set_dimension(Dimension::MaterialDensity, 18.0);
        assert_eq!(design.length, 50.0);
        assert_eq!(design.hole_depth_rear, 12.5);
        assert_eq!(design.dimension(Dimension::MaterialDensity), 18.0);
        assert_eq!(design.dimension(Dimension::MaxDiameter), 7.0);
    }

    #[test]
    fn test_update_cut() {
        let mut design = BarrelDesign::new();
        design.add_cut(CutZone::new("ring-1", CutKind::Ring, 10.0, 20.0));
        let update = CutUpdate {
            start_z: Some(12.0),
            pitch: Some(1.5),
            ..CutUpdate::default()
        };
        let cut = design.update_cut("ring-1", &update).unwrap();
        assert_eq!(cut.start_z, 12.0);
        assert_eq!(cut.end_z, 20.0);
        assert_eq!(cut.properties.pitch, 1.5);
        assert!(design.update_cut("missing", &update).is_none());
    }

    #[test]
    fn test_cut_bookkeeping() {
        let mut design = BarrelDesign::new();
        let id = design.next_cut_id(CutKind::Shark);
        assert_eq!(id, "shark-1");
        design.add_cut(CutZone::new(id.clone(), CutKind::Shark, 0.0, 5.0));
        design.add_cut(CutZone::new("shark-2", CutKind::Shark, 5.0, 9.0));
        assert_eq!(design.next_cut_id(CutKind::Shark), "shark-3");
        assert!(design.remove_cut(&id).is_some());
        assert!(design.remove_cut(&id).is_none());
        assert_eq!(design.cuts.len(), 1);
    }
}
