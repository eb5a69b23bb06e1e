use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Body side of a bilateral measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Capitalized label, e.g. `"Left"`.
    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Degrees measured per side, plus the normative reference when known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SideValues {
    #[serde(default)]
    pub left: Option<f64>,
    #[serde(default)]
    pub right: Option<f64>,
    #[serde(default)]
    pub normal: Option<f64>,
}

impl SideValues {
    pub fn get(&self, side: Side) -> Option<f64> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Pain reported during movement, 0–10 per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PainScale {
    #[serde(default)]
    pub left: Option<f64>,
    #[serde(default)]
    pub right: Option<f64>,
}

impl PainScale {
    pub fn get(&self, side: Side) -> Option<f64> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Descriptive end-feel per side (e.g. "firm", "empty", "springy").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EndFeel {
    #[serde(default)]
    pub left: Option<String>,
    #[serde(default)]
    pub right: Option<String>,
}

impl EndFeel {
    pub fn get(&self, side: Side) -> Option<&str> {
        match side {
            Side::Left => self.left.as_deref(),
            Side::Right => self.right.as_deref(),
        }
    }
}

/// A single movement measured at a joint.
///
/// Measurements arrive grouped by joint name, so `joint` is optional on the
/// wire; the grouping key wins when both are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct JointMeasurement {
    #[serde(default)]
    pub joint: String,
    pub movement: String,
    #[serde(default)]
    pub active: SideValues,
    #[serde(default)]
    pub passive: Option<SideValues>,
    #[serde(default, rename = "painScale")]
    pub pain_scale: Option<PainScale>,
    #[serde(default, rename = "endFeel")]
    pub end_feel: Option<EndFeel>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl JointMeasurement {
    /// Pain on one side; `None` when the side was not tested.
    pub fn pain(&self, side: Side) -> Option<f64> {
        self.pain_scale.as_ref().and_then(|p| p.get(side))
    }
}

// ── Findings ────────────────────────────────────────────────────────────────

/// One side's active range falls below the functional threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RestrictedFinding {
    pub joint: String,
    pub movement: String,
    pub side: Side,
    pub description: String,
}

/// Left and right differ by more than the asymmetry margin.
///
/// `side` names the side with the *larger* raw value. Consumers depend on
/// this labeling; do not flip it without clinical sign-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AsymmetryFinding {
    pub joint: String,
    pub movement: String,
    pub side: Side,
    pub difference: f64,
}

/// Both sides restricted to a comparable degree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BilateralFinding {
    pub joint: String,
    pub movement: String,
    pub difference: f64,
    pub description: String,
}

/// Pain at or above the moderate threshold on one side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PainFinding {
    pub joint: String,
    pub movement: String,
    pub side: Side,
    pub intensity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FindingKind {
    Restricted,
    Unilateral,
    Bilateral,
    Painful,
}

/// A derived observation. Each variant carries exactly the fields its kind
/// allows, so a painful finding can never hold a `difference`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    Restricted(RestrictedFinding),
    Unilateral(AsymmetryFinding),
    Bilateral(BilateralFinding),
    Painful(PainFinding),
}

impl Finding {
    pub fn kind(&self) -> FindingKind {
        match self {
            Finding::Restricted(_) => FindingKind::Restricted,
            Finding::Unilateral(_) => FindingKind::Unilateral,
            Finding::Bilateral(_) => FindingKind::Bilateral,
            Finding::Painful(_) => FindingKind::Painful,
        }
    }

    pub fn joint(&self) -> &str {
        match self {
            Finding::Restricted(f) => &f.joint,
            Finding::Unilateral(f) => &f.joint,
            Finding::Bilateral(f) => &f.joint,
            Finding::Painful(f) => &f.joint,
        }
    }

    pub fn movement(&self) -> &str {
        match self {
            Finding::Restricted(f) => &f.movement,
            Finding::Unilateral(f) => &f.movement,
            Finding::Bilateral(f) => &f.movement,
            Finding::Painful(f) => &f.movement,
        }
    }

    pub fn side(&self) -> Option<Side> {
        match self {
            Finding::Restricted(f) => Some(f.side),
            Finding::Unilateral(f) => Some(f.side),
            Finding::Bilateral(_) => None,
            Finding::Painful(f) => Some(f.side),
        }
    }
}

/// Findings grouped by kind, in the order they were detected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RomPatterns {
    pub bilateral: Vec<BilateralFinding>,
    pub unilateral: Vec<AsymmetryFinding>,
    pub painful: Vec<PainFinding>,
    pub restricted: Vec<RestrictedFinding>,
}

impl RomPatterns {
    pub fn is_empty(&self) -> bool {
        self.bilateral.is_empty()
            && self.unilateral.is_empty()
            && self.painful.is_empty()
            && self.restricted.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bilateral.len() + self.unilateral.len() + self.painful.len() + self.restricted.len()
    }

    /// Every finding as a tagged [`Finding`].
    pub fn findings(&self) -> Vec<Finding> {
        let mut all = Vec::with_capacity(self.len());
        all.extend(self.bilateral.iter().cloned().map(Finding::Bilateral));
        all.extend(self.unilateral.iter().cloned().map(Finding::Unilateral));
        all.extend(self.painful.iter().cloned().map(Finding::Painful));
        all.extend(self.restricted.iter().cloned().map(Finding::Restricted));
        all
    }
}

/// Anatomical region used to group functional impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Region {
    UpperExtremity,
    LowerExtremity,
    Spine,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::UpperExtremity, Region::LowerExtremity, Region::Spine];

    pub fn label(self) -> &'static str {
        match self {
            Region::UpperExtremity => "Upper Extremity",
            Region::LowerExtremity => "Lower Extremity",
            Region::Spine => "Spine",
        }
    }
}

/// Short functional-impact statements per region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FunctionalImpact {
    pub upper_extremity: Vec<String>,
    pub lower_extremity: Vec<String>,
    pub spine: Vec<String>,
}

impl FunctionalImpact {
    pub fn for_region(&self, region: Region) -> &[String] {
        match region {
            Region::UpperExtremity => &self.upper_extremity,
            Region::LowerExtremity => &self.lower_extremity,
            Region::Spine => &self.spine,
        }
    }

    pub fn for_region_mut(&mut self, region: Region) -> &mut Vec<String> {
        match region {
            Region::UpperExtremity => &mut self.upper_extremity,
            Region::LowerExtremity => &mut self.lower_extremity,
            Region::Spine => &mut self.spine,
        }
    }

    pub fn is_empty(&self) -> bool {
        Region::ALL.iter().all(|r| self.for_region(*r).is_empty())
    }
}

/// Output of ROM pattern analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RomAnalysis {
    pub joints: BTreeMap<String, Vec<JointMeasurement>>,
    pub patterns: RomPatterns,
    pub functional: FunctionalImpact,
    pub impact: Vec<String>,
}
