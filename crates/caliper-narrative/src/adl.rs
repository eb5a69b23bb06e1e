//! ADL narrative.

use caliper_core::display::humanize;
use caliper_core::models::adl::{ActivitySupport, AdlAnalysis, SupportNeed};
use caliper_core::models::independence::IndependenceLevel;
use caliper_core::models::report::DetailLevel;

pub const NO_SUPPORT_NEEDS: &str = "No support needs identified.";
pub const NOT_RATED: &str = "Not rated";

pub fn format_adl(analysis: &AdlAnalysis, level: DetailLevel) -> String {
    let mut out = String::from(match level {
        DetailLevel::Brief => "Functional Independence Summary\n",
        DetailLevel::Standard => "Functional Independence Analysis\n",
        DetailLevel::Detailed => "Functional Independence Assessment (Detailed)\n",
    });
    out.push_str(&format!("Overall independence: {}\n", overall_label(analysis.overall)));

    if analysis.needs.is_empty() && analysis.plan.is_empty() {
        out.push_str(NO_SUPPORT_NEEDS);
        out.push('\n');
        return out;
    }

    match level {
        DetailLevel::Brief => {
            for need in &analysis.needs {
                out.push_str(&format!(
                    "- {}: {}\n",
                    capitalize(&need.category),
                    need.level.label()
                ));
            }
        }
        DetailLevel::Standard => {
            push_needs(&mut out, &analysis.needs);
            if !analysis.plan.is_empty() {
                out.push_str("\nRecommended Support:\n");
                for row in &analysis.plan {
                    out.push_str(&format!(
                        "- {}: {} ({})\n",
                        capitalize(&humanize(&row.activity)),
                        row.support_type,
                        row.frequency
                    ));
                }
            }
        }
        DetailLevel::Detailed => {
            push_needs(&mut out, &analysis.needs);
            if !analysis.plan.is_empty() {
                out.push_str("\nSupport Plan:\n");
                for row in &analysis.plan {
                    push_plan_row(&mut out, row);
                }
            }
        }
    }
    out
}

fn overall_label(level: IndependenceLevel) -> &'static str {
    if level.is_rated() {
        level.label()
    } else {
        NOT_RATED
    }
}

fn push_needs(out: &mut String, needs: &[SupportNeed]) {
    if needs.is_empty() {
        return;
    }
    out.push_str("\nSupport Needs:\n");
    for need in needs {
        out.push_str(&format!(
            "- {} ({}): {}\n",
            capitalize(&need.category),
            need.level.label(),
            need.rationale
        ));
        if !need.barriers.is_empty() {
            let barriers: Vec<&str> = need.barriers.iter().map(String::as_str).collect();
            out.push_str(&format!("  Barriers: {}\n", barriers.join("; ")));
        }
    }
}

fn push_plan_row(out: &mut String, row: &ActivitySupport) {
    out.push_str(&format!(
        "- {} ({}, {})\n",
        capitalize(&humanize(&row.activity)),
        row.category,
        row.level.label()
    ));
    out.push_str(&format!("  Support: {}\n", row.support_type));
    out.push_str(&format!("  Frequency: {}\n", row.frequency));
    out.push_str(&format!("  Adaptations: {}\n", row.adaptation));
    out.push_str(&format!("  Rationale: {}\n", row.rationale));
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
