use std::collections::BTreeMap;

use caliper_analysis::process_rom;
use caliper_analysis::regions::classify_joint;
use caliper_core::models::rom::{
    FindingKind, JointMeasurement, PainScale, Region, Side, SideValues,
};

fn measurement(movement: &str, left: f64, right: f64, normal: Option<f64>) -> JointMeasurement {
    JointMeasurement {
        movement: movement.to_string(),
        active: SideValues {
            left: Some(left),
            right: Some(right),
            normal,
        },
        ..Default::default()
    }
}

fn joints(entries: Vec<(&str, JointMeasurement)>) -> BTreeMap<String, Vec<JointMeasurement>> {
    let mut map: BTreeMap<String, Vec<JointMeasurement>> = BTreeMap::new();
    for (joint, m) in entries {
        map.entry(joint.to_string()).or_default().push(m);
    }
    map
}

#[test]
fn restricted_side_and_asymmetry_labelled_by_larger_value() {
    let input = joints(vec![("shoulder", measurement("flexion", 160.0, 90.0, Some(180.0)))]);
    let analysis = process_rom(&input);

    let restricted = &analysis.patterns.restricted;
    assert_eq!(restricted.len(), 1);
    assert_eq!(restricted[0].joint, "shoulder");
    assert_eq!(restricted[0].movement, "flexion");
    assert_eq!(restricted[0].side, Side::Right);
    assert!(restricted[0].description.contains("moderately restricted"));
    assert!(restricted[0].description.contains("90° of 180° normal"));

    let unilateral = &analysis.patterns.unilateral;
    assert_eq!(unilateral.len(), 1);
    assert_eq!(unilateral[0].joint, "shoulder");
    assert_eq!(unilateral[0].movement, "flexion");
    assert_eq!(unilateral[0].side, Side::Left);
    assert_eq!(unilateral[0].difference, 70.0);

    assert!(analysis.patterns.bilateral.is_empty());
    assert!(analysis.patterns.painful.is_empty());
}

fn right_side_description(right: f64) -> String {
    let input = joints(vec![("shoulder", measurement("flexion", 180.0, right, Some(180.0)))]);
    let analysis = process_rom(&input);
    assert_eq!(analysis.patterns.restricted.len(), 1);
    analysis.patterns.restricted[0].description.clone()
}

#[test]
fn severity_bands_split_at_fifty_and_sixty_percent() {
    // 81 of 180 is 45%.
    assert!(right_side_description(81.0).contains("severely restricted"));
    // 89 of 180 is just under half.
    assert!(right_side_description(89.0).contains("severely restricted"));
    assert!(right_side_description(90.0).contains("moderately restricted"));
    assert!(right_side_description(107.0).contains("moderately restricted"));
    assert!(right_side_description(108.0).contains("mildly restricted"));
    assert!(right_side_description(134.0).contains("mildly restricted"));
}

#[test]
fn range_at_three_quarters_of_normal_is_not_restricted() {
    let input = joints(vec![("shoulder", measurement("flexion", 180.0, 135.0, Some(180.0)))]);
    assert!(process_rom(&input).patterns.restricted.is_empty());
}

#[test]
fn pain_flagged_only_at_or_above_threshold() {
    let mut m = measurement("flexion", 160.0, 160.0, Some(180.0));
    m.pain_scale = Some(PainScale {
        left: Some(2.0),
        right: Some(6.0),
    });
    let analysis = process_rom(&joints(vec![("shoulder", m)]));

    let painful = &analysis.patterns.painful;
    assert_eq!(painful.len(), 1);
    assert_eq!(painful[0].side, Side::Right);
    assert_eq!(painful[0].intensity, 6.0);
    assert!(analysis.patterns.restricted.is_empty());
    assert!(analysis.patterns.unilateral.is_empty());
}

#[test]
fn comparable_restriction_on_both_sides_is_bilateral() {
    let analysis = process_rom(&joints(vec![("knee", measurement("flexion", 80.0, 75.0, Some(135.0)))]));

    assert_eq!(analysis.patterns.bilateral.len(), 1);
    assert!(analysis.patterns.restricted.is_empty());
    let finding = &analysis.patterns.bilateral[0];
    assert_eq!(finding.difference, 5.0);
    assert!(finding.description.starts_with("Bilateral"));
}

#[test]
fn uneven_restriction_on_both_sides_stays_separate() {
    // 30% vs 70% of normal: both restricted, not comparable.
    let analysis = process_rom(&joints(vec![("hip", measurement("abduction", 13.5, 31.5, Some(45.0)))]));

    assert!(analysis.patterns.bilateral.is_empty());
    assert_eq!(analysis.patterns.restricted.len(), 2);
    assert_eq!(analysis.patterns.unilateral.len(), 1);
    assert_eq!(analysis.patterns.unilateral[0].side, Side::Right);
}

#[test]
fn without_normal_the_other_side_is_the_reference() {
    let analysis = process_rom(&joints(vec![("wrist", measurement("extension", 70.0, 40.0, None))]));

    assert_eq!(analysis.patterns.restricted.len(), 1);
    assert_eq!(analysis.patterns.restricted[0].side, Side::Right);
    assert!(analysis.patterns.restricted[0].description.contains("on the left side"));
}

#[test]
fn missing_sides_never_panic() {
    let m = JointMeasurement {
        movement: "rotation".to_string(),
        active: SideValues {
            left: Some(40.0),
            right: None,
            normal: None,
        },
        ..Default::default()
    };
    let analysis = process_rom(&joints(vec![("cervical spine", m)]));
    assert!(analysis.patterns.is_empty());
    assert!(analysis.impact.is_empty());
    assert_eq!(analysis.joints.len(), 1);
}

#[test]
fn functional_impact_grouped_by_region() {
    let mut knee = measurement("flexion", 130.0, 130.0, Some(135.0));
    knee.pain_scale = Some(PainScale {
        left: Some(5.0),
        right: None,
    });
    let input = joints(vec![
        ("shoulder", measurement("flexion", 160.0, 90.0, Some(180.0))),
        ("knee", knee),
        ("lumbar spine", measurement("flexion", 20.0, 20.0, Some(60.0))),
    ]);
    let analysis = process_rom(&input);

    assert!(!analysis.functional.upper_extremity.is_empty());
    assert!(analysis.functional.lower_extremity[0].starts_with("Pain with left knee flexion"));
    assert!(analysis.functional.spine[0].starts_with("Bilateral lumbar spine flexion"));

    // Bilateral findings rank first in the flat list.
    assert!(analysis.impact[0].starts_with("Bilateral"));
    assert!(analysis.impact.len() <= caliper_analysis::rom::MAX_IMPACT_STATEMENTS);
}

#[test]
fn finding_kinds_line_up_with_pattern_lists() {
    let input = joints(vec![("shoulder", measurement("flexion", 160.0, 90.0, Some(180.0)))]);
    let findings = process_rom(&input).patterns.findings();
    let kinds: Vec<_> = findings.iter().map(|f| f.kind()).collect();
    assert_eq!(kinds, vec![FindingKind::Unilateral, FindingKind::Restricted]);
    assert_eq!(findings[0].side(), Some(Side::Left));
}

#[test]
fn joints_classify_into_regions() {
    assert_eq!(classify_joint("Shoulder"), Some(Region::UpperExtremity));
    assert_eq!(classify_joint("left knee"), Some(Region::LowerExtremity));
    assert_eq!(classify_joint("Cervical"), Some(Region::Spine));
    assert_eq!(classify_joint("jaw"), None);
}
