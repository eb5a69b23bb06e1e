//! ROM narrative at brief, standard and detailed verbosity.
//!
//! Every level omits empty categories entirely; missing measurements are
//! written as `NT` (not tested), never as an empty or null value.

use caliper_core::display::number;
use caliper_core::models::report::DetailLevel;
use caliper_core::models::rom::{
    AsymmetryFinding, EndFeel, JointMeasurement, Region, RomAnalysis, Side, SideValues,
};

pub const NOT_TESTED: &str = "NT";
pub const NO_FINDINGS: &str = "No significant range of motion findings.";

pub fn format_rom(analysis: &RomAnalysis, level: DetailLevel) -> String {
    match level {
        DetailLevel::Brief => format_brief(analysis),
        DetailLevel::Standard => format_standard(analysis),
        DetailLevel::Detailed => format_detailed(analysis),
    }
}

fn push_list(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("\n{heading}:\n"));
    for item in items {
        out.push_str(&format!("- {item}\n"));
    }
}

/// Difference as a share of the larger side, when the source measurement
/// is still present in the analysis.
fn asymmetry_percent(analysis: &RomAnalysis, f: &AsymmetryFinding) -> Option<f64> {
    let larger = analysis
        .joints
        .get(&f.joint)?
        .iter()
        .find(|m| m.movement == f.movement)?
        .active
        .get(f.side)?;
    (larger > 0.0).then(|| (f.difference / larger * 100.0).round())
}

fn format_brief(analysis: &RomAnalysis) -> String {
    let mut out = String::from("Range of Motion Summary\n");
    let p = &analysis.patterns;

    let mut findings: Vec<String> = Vec::new();
    findings.extend(p.unilateral.iter().map(|f| {
        format!(
            "Asymmetrical {} {} ({}° difference)",
            f.joint,
            f.movement,
            number(f.difference)
        )
    }));
    findings.extend(
        p.bilateral
            .iter()
            .map(|f| format!("{} {} restricted bilaterally", f.joint, f.movement)),
    );
    findings.extend(
        p.restricted
            .iter()
            .map(|f| format!("{} {} restricted", f.joint, f.movement)),
    );
    findings.extend(
        p.painful
            .iter()
            .map(|f| format!("{} {} painful", f.joint, f.movement)),
    );
    dedup_in_order(&mut findings);

    if findings.is_empty() && analysis.impact.is_empty() {
        out.push_str(NO_FINDINGS);
        out.push('\n');
        return out;
    }

    for finding in &findings {
        out.push_str(&format!("- {finding}\n"));
    }
    push_list(&mut out, "Functional Impact", &analysis.impact);
    out
}

fn format_standard(analysis: &RomAnalysis) -> String {
    let mut out = String::from("Range of Motion Analysis\n");
    let p = &analysis.patterns;

    if p.is_empty() && analysis.impact.is_empty() {
        out.push('\n');
        out.push_str(NO_FINDINGS);
        out.push('\n');
        return out;
    }

    let asymmetries: Vec<String> = p
        .unilateral
        .iter()
        .map(|f| describe_asymmetry(analysis, f))
        .collect();
    push_list(&mut out, "Asymmetrical Movements", &asymmetries);

    let painful: Vec<String> = p
        .painful
        .iter()
        .map(|f| {
            format!(
                "{} {} ({}): pain {}/10",
                f.joint,
                f.movement,
                f.side,
                number(f.intensity)
            )
        })
        .collect();
    push_list(&mut out, "Painful Movements", &painful);

    let mut restricted: Vec<String> = p
        .bilateral
        .iter()
        .map(|f| format!("{} {}: {}", f.joint, f.movement, f.description))
        .collect();
    restricted.extend(
        p.restricted
            .iter()
            .map(|f| format!("{} {}: {}", f.joint, f.movement, f.description)),
    );
    push_list(&mut out, "Restricted Movements", &restricted);

    push_list(&mut out, "Functional Impact", &analysis.impact);
    out
}

fn format_detailed(analysis: &RomAnalysis) -> String {
    let mut out = String::from("Range of Motion Assessment (Detailed)\n");
    let p = &analysis.patterns;

    if !analysis.joints.is_empty() {
        out.push_str("\nJoint Measurements:\n");
        for (joint, measurements) in &analysis.joints {
            out.push_str(&format!("{joint}:\n"));
            for m in measurements {
                push_measurement(&mut out, m);
            }
        }
    }

    let bilateral: Vec<String> = p
        .bilateral
        .iter()
        .map(|f| {
            format!(
                "{} {}: {} ({}° between sides)",
                f.joint,
                f.movement,
                f.description,
                number(f.difference)
            )
        })
        .collect();
    push_list(&mut out, "Bilateral Patterns", &bilateral);

    let unilateral: Vec<String> = p
        .unilateral
        .iter()
        .map(|f| describe_asymmetry(analysis, f))
        .collect();
    push_list(&mut out, "Unilateral Patterns", &unilateral);

    let painful: Vec<String> = p
        .painful
        .iter()
        .map(|f| {
            format!(
                "{} {} ({} side): pain intensity {}/10",
                f.joint,
                f.movement,
                f.side,
                number(f.intensity)
            )
        })
        .collect();
    push_list(&mut out, "Painful Movements", &painful);

    let restricted: Vec<String> = p
        .restricted
        .iter()
        .map(|f| format!("{} {}: {}", f.joint, f.movement, f.description))
        .collect();
    push_list(&mut out, "Restricted Movements", &restricted);

    if !analysis.functional.is_empty() {
        out.push_str("\nFunctional Analysis:\n");
        for region in Region::ALL {
            let statements = analysis.functional.for_region(region);
            if statements.is_empty() {
                continue;
            }
            out.push_str(&format!("{}:\n", region.label()));
            for statement in statements {
                out.push_str(&format!("- {statement}\n"));
            }
        }
    }

    push_list(&mut out, "Overall Clinical Impact", &analysis.impact);

    if analysis.joints.is_empty() && p.is_empty() && analysis.impact.is_empty() {
        out.push('\n');
        out.push_str(NO_FINDINGS);
        out.push('\n');
    }
    out
}

fn describe_asymmetry(analysis: &RomAnalysis, f: &AsymmetryFinding) -> String {
    let mut line = format!(
        "{} {}: {} side greater by {}°",
        f.joint,
        f.movement,
        f.side,
        number(f.difference)
    );
    if let Some(percent) = asymmetry_percent(analysis, f) {
        line.push_str(&format!(" ({}% difference)", number(percent)));
    }
    line
}

fn side_value(values: Option<&SideValues>, side: Side) -> String {
    values
        .and_then(|v| v.get(side))
        .map(|v| format!("{}°", number(v)))
        .unwrap_or_else(|| NOT_TESTED.to_string())
}

fn end_feel(values: Option<&EndFeel>, side: Side) -> String {
    values
        .and_then(|e| e.get(side))
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(NOT_TESTED)
        .to_string()
}

fn push_measurement(out: &mut String, m: &JointMeasurement) {
    out.push_str(&format!("- {}\n", m.movement));

    let mut active = format!(
        "  Active: L {} / R {}",
        side_value(Some(&m.active), Side::Left),
        side_value(Some(&m.active), Side::Right)
    );
    if let Some(normal) = m.active.normal {
        active.push_str(&format!(" (normal {}°)", number(normal)));
    }
    out.push_str(&active);
    out.push('\n');

    out.push_str(&format!(
        "  Passive: L {} / R {}\n",
        side_value(m.passive.as_ref(), Side::Left),
        side_value(m.passive.as_ref(), Side::Right)
    ));

    // Untested pain is reported as 0 in the measurement dump.
    out.push_str(&format!(
        "  Pain: L {}/10 / R {}/10\n",
        number(m.pain(Side::Left).unwrap_or(0.0)),
        number(m.pain(Side::Right).unwrap_or(0.0))
    ));

    out.push_str(&format!(
        "  End feel: L {} / R {}\n",
        end_feel(m.end_feel.as_ref(), Side::Left),
        end_feel(m.end_feel.as_ref(), Side::Right)
    ));

    if let Some(notes) = m.notes.as_deref().map(str::trim)
        && !notes.is_empty()
    {
        out.push_str(&format!("  Notes: {notes}\n"));
    }
}

fn dedup_in_order(items: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}
