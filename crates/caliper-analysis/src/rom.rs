//! Range-of-motion pattern analysis.
//!
//! For every measurement the analyzer looks at each side's active range
//! and emits:
//!
//! - **restricted** when a side reaches less than [`RESTRICTED_RATIO`] of
//!   the normal reference (or of the other side when no normal is given);
//! - **bilateral** instead of two restricted findings when both sides are
//!   restricted within [`BILATERAL_TOLERANCE_PCT`] of each other;
//! - **unilateral** when the sides differ by at least
//!   [`ASYMMETRY_THRESHOLD_DEG`]; `side` names the larger value;
//! - **painful** for each side whose pain score is at least
//!   [`PAIN_THRESHOLD`].
//!
//! Findings are then turned into functional-impact statements grouped by
//! region, and the most significant statements are flattened into
//! [`RomAnalysis::impact`].

use std::collections::BTreeMap;

use caliper_core::display::number;
use caliper_core::models::rom::{
    AsymmetryFinding, BilateralFinding, FunctionalImpact, JointMeasurement, PainFinding,
    RestrictedFinding, RomAnalysis, RomPatterns, Side,
};
use tracing::debug;

use crate::regions::joint_profile;

/// Active range below this share of the reference is restricted.
pub const RESTRICTED_RATIO: f64 = 0.75;
/// Below this share the restriction is described as severe.
pub const SEVERE_RATIO: f64 = 0.50;
/// Below this share (and above severe) the restriction is moderate.
pub const MODERATE_RATIO: f64 = 0.60;
/// Two restricted sides count as bilateral when their percentages of the
/// reference differ by no more than this many points.
pub const BILATERAL_TOLERANCE_PCT: f64 = 15.0;
/// Left/right difference in degrees that counts as asymmetry.
pub const ASYMMETRY_THRESHOLD_DEG: f64 = 15.0;
/// Pain score (0–10) at which a movement is flagged painful.
pub const PAIN_THRESHOLD: f64 = 4.0;
/// Cap on the flattened impact list.
pub const MAX_IMPACT_STATEMENTS: usize = 6;

/// Reference used to judge one side's range.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Reference {
    Normal(f64),
    Contralateral(f64),
}

impl Reference {
    fn value(self) -> f64 {
        match self {
            Reference::Normal(v) | Reference::Contralateral(v) => v,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Restriction {
    side: Side,
    value: f64,
    reference: Reference,
    ratio: f64,
}

impl Restriction {
    fn percent(&self) -> f64 {
        (self.ratio * 100.0).round()
    }
}

/// Analyze measurements grouped by joint name.
pub fn process_rom(joints: &BTreeMap<String, Vec<JointMeasurement>>) -> RomAnalysis {
    let mut patterns = RomPatterns::default();

    for (joint, measurements) in joints {
        for measurement in measurements {
            detect_restriction(joint, measurement, &mut patterns);
            detect_asymmetry(joint, measurement, &mut patterns);
            detect_pain(joint, measurement, &mut patterns);
        }
    }

    let (functional, impact) = functional_impact(&patterns);

    debug!(
        joints = joints.len(),
        findings = patterns.len(),
        impact = impact.len(),
        "ROM analysis complete"
    );

    RomAnalysis {
        joints: joints.clone(),
        patterns,
        functional,
        impact,
    }
}

fn side_restriction(measurement: &JointMeasurement, side: Side) -> Option<Restriction> {
    let value = measurement.active.get(side)?;
    let reference = match measurement.active.normal {
        Some(normal) => Reference::Normal(normal),
        None => Reference::Contralateral(measurement.active.get(side.opposite())?),
    };
    if reference.value() <= 0.0 {
        return None;
    }

    let ratio = value / reference.value();
    (ratio < RESTRICTED_RATIO).then_some(Restriction {
        side,
        value,
        reference,
        ratio,
    })
}

fn severity(ratio: f64) -> &'static str {
    if ratio < SEVERE_RATIO {
        "severely"
    } else if ratio < MODERATE_RATIO {
        "moderately"
    } else {
        "mildly"
    }
}

fn describe_restriction(r: &Restriction) -> String {
    match r.reference {
        Reference::Normal(normal) => format!(
            "{} side {} restricted: {}° of {}° normal ({}%)",
            r.side.label(),
            severity(r.ratio),
            number(r.value),
            number(normal),
            number(r.percent()),
        ),
        Reference::Contralateral(other) => format!(
            "{} side {} restricted: {}° vs {}° on the {} side ({}%)",
            r.side.label(),
            severity(r.ratio),
            number(r.value),
            number(other),
            r.side.opposite(),
            number(r.percent()),
        ),
    }
}

fn detect_restriction(joint: &str, measurement: &JointMeasurement, patterns: &mut RomPatterns) {
    let left = side_restriction(measurement, Side::Left);
    let right = side_restriction(measurement, Side::Right);

    if let (Some(l), Some(r)) = (left, right)
        && (l.percent() - r.percent()).abs() <= BILATERAL_TOLERANCE_PCT
    {
        let worst = l.ratio.min(r.ratio);
        patterns.bilateral.push(BilateralFinding {
            joint: joint.to_string(),
            movement: measurement.movement.clone(),
            difference: (l.value - r.value).abs(),
            description: format!(
                "Bilateral {} restriction: left {}°, right {}° ({}% / {}% of reference)",
                severity(worst),
                number(l.value),
                number(r.value),
                number(l.percent()),
                number(r.percent()),
            ),
        });
        return;
    }

    for restriction in [left, right].into_iter().flatten() {
        patterns.restricted.push(RestrictedFinding {
            joint: joint.to_string(),
            movement: measurement.movement.clone(),
            side: restriction.side,
            description: describe_restriction(&restriction),
        });
    }
}

fn detect_asymmetry(joint: &str, measurement: &JointMeasurement, patterns: &mut RomPatterns) {
    let (Some(left), Some(right)) = (measurement.active.left, measurement.active.right) else {
        return;
    };

    let difference = (left - right).abs();
    if difference < ASYMMETRY_THRESHOLD_DEG {
        return;
    }

    patterns.unilateral.push(AsymmetryFinding {
        joint: joint.to_string(),
        movement: measurement.movement.clone(),
        side: if left > right { Side::Left } else { Side::Right },
        difference,
    });
}

fn detect_pain(joint: &str, measurement: &JointMeasurement, patterns: &mut RomPatterns) {
    for side in Side::BOTH {
        if let Some(intensity) = measurement.pain(side)
            && intensity >= PAIN_THRESHOLD
        {
            patterns.painful.push(PainFinding {
                joint: joint.to_string(),
                movement: measurement.movement.clone(),
                side,
                intensity,
            });
        }
    }
}

fn activities_for(joint: &str) -> String {
    joint_profile(joint)
        .map(|p| p.activities.to_string())
        .unwrap_or_else(|| format!("tasks involving the {}", joint.to_lowercase()))
}

/// Group impact statements by region and rank them for the flat list.
///
/// Ranking: bilateral, then restricted, painful, and asymmetry last.
fn functional_impact(patterns: &RomPatterns) -> (FunctionalImpact, Vec<String>) {
    let mut ranked: Vec<(u8, &str, String)> = Vec::new();

    for f in &patterns.bilateral {
        ranked.push((
            0,
            &f.joint,
            format!(
                "Bilateral {} {} restriction limits {}",
                f.joint.to_lowercase(),
                f.movement.to_lowercase(),
                activities_for(&f.joint)
            ),
        ));
    }
    for f in &patterns.restricted {
        ranked.push((
            1,
            &f.joint,
            format!(
                "Reduced {} {} {} limits {}",
                f.side,
                f.joint.to_lowercase(),
                f.movement.to_lowercase(),
                activities_for(&f.joint)
            ),
        ));
    }
    for f in &patterns.painful {
        ranked.push((
            2,
            &f.joint,
            format!(
                "Pain with {} {} {} may reduce tolerance for {}",
                f.side,
                f.joint.to_lowercase(),
                f.movement.to_lowercase(),
                activities_for(&f.joint)
            ),
        ));
    }
    for f in &patterns.unilateral {
        ranked.push((
            3,
            &f.joint,
            format!(
                "Asymmetrical {} {} may lead to compensatory movement during {}",
                f.joint.to_lowercase(),
                f.movement.to_lowercase(),
                activities_for(&f.joint)
            ),
        ));
    }

    let mut functional = FunctionalImpact::default();
    for (_, joint, statement) in &ranked {
        if let Some(profile) = joint_profile(joint) {
            let bucket = functional.for_region_mut(profile.region);
            if !bucket.contains(statement) {
                bucket.push(statement.clone());
            }
        }
    }

    ranked.sort_by_key(|(rank, _, _)| *rank);
    let mut impact: Vec<String> = Vec::new();
    for (_, _, statement) in ranked {
        if impact.len() == MAX_IMPACT_STATEMENTS {
            break;
        }
        if !impact.contains(&statement) {
            impact.push(statement);
        }
    }

    (functional, impact)
}
