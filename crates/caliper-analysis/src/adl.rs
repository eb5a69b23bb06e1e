//! Activity-independence analysis.

use std::collections::BTreeSet;

use caliper_core::display::{humanize, normalize_key};
use caliper_core::models::adl::{
    ActivityMap, ActivityRecord, ActivitySupport, AdlAnalysis, AdlData, SupportNeed,
};
use caliper_core::models::independence::{
    IndependenceLevel, ensure_independence_level, reduce_worst,
};
use tracing::debug;

use crate::barriers::extract_barriers;

pub const SUPPORT_TO_BE_DETERMINED: &str = "Support type to be determined";
pub const FREQUENCY_TO_BE_DETERMINED: &str = "Frequency to be determined";
pub const ADAPTATION_TO_BE_DETERMINED: &str =
    "Adaptations to be determined following further assessment";

/// Used for activities with no entry in [`ACTIVITY_ADAPTATIONS`].
pub static DEFAULT_ADAPTATIONS: &[&str] = &[
    "task simplification",
    "energy conservation techniques",
    "adaptive equipment review",
];

/// Default adaptations per activity, keyed by normalized activity name.
pub static ACTIVITY_ADAPTATIONS: &[(&str, &[&str])] = &[
    (
        "meal_preparation",
        &["perching stool", "lightweight cookware", "kitchen reorganization"],
    ),
    (
        "laundry",
        &["front-loading machine", "laundry trolley", "raised laundry basket"],
    ),
    (
        "cleaning",
        &["long-handled cleaning tools", "lightweight vacuum", "task pacing schedule"],
    ),
    (
        "housework",
        &["long-handled cleaning tools", "lightweight vacuum", "task pacing schedule"],
    ),
    (
        "shopping",
        &["online grocery delivery", "shopping trolley", "accessible parking permit"],
    ),
    (
        "transportation",
        &["community transport service", "taxi vouchers", "driving assessment"],
    ),
    (
        "driving",
        &["driving assessment", "vehicle hand controls", "community transport service"],
    ),
    (
        "financial_management",
        &["online banking", "automatic bill payments", "large-print statements"],
    ),
    (
        "medication_management",
        &["blister packs", "medication reminder app", "pharmacy delivery"],
    ),
    ("bathing", &["shower chair", "grab rails", "long-handled sponge"]),
    ("dressing", &["reacher", "sock aid", "elastic shoelaces"]),
];

/// Most dependent level across every household and community activity.
/// Activities without a rating are ignored.
pub fn determine_overall_independence(data: &AdlData) -> IndependenceLevel {
    let levels = data
        .categories()
        .into_iter()
        .flat_map(|(_, activities)| activities.values())
        .map(|record| ensure_independence_level(Some(record.independence)))
        .filter(|level| *level != IndependenceLevel::NotApplicable);
    reduce_worst(levels)
}

/// Append a [`SupportNeed`] for `category` when any of its activities is
/// rated below independent.
pub fn process_category_needs(
    activities: &ActivityMap,
    category: &str,
    needs: &mut Vec<SupportNeed>,
) {
    let supported: Vec<&ActivityRecord> = activities
        .values()
        .filter(|record| record.needs_support())
        .collect();

    if supported.is_empty() {
        return;
    }

    let barriers: BTreeSet<String> = supported
        .iter()
        .flat_map(|record| extract_barriers(&record.notes))
        .collect();

    let level = supported
        .iter()
        .fold(IndependenceLevel::Independent, |worst, record| {
            if record.independence.is_worse_than(worst) {
                record.independence
            } else {
                worst
            }
        });

    let count = supported.len();
    let rationale = if count == 1 {
        format!("1 {category} activity requires support")
    } else {
        format!("{count} {category} activities require support")
    };

    needs.push(SupportNeed {
        category: category.to_string(),
        level,
        barriers,
        rationale,
    });
}

/// Support needs for every category, household first.
pub fn determine_support_needs(data: &AdlData) -> Vec<SupportNeed> {
    let mut needs = Vec::new();
    for (category, activities) in data.categories() {
        process_category_needs(activities, category, &mut needs);
    }
    needs
}

pub fn determine_support_type(level: IndependenceLevel) -> &'static str {
    match level {
        IndependenceLevel::Independent => "No assistance required",
        IndependenceLevel::ModifiedIndependent => "Setup or adaptive equipment only",
        IndependenceLevel::Supervision => "Supervision or verbal cues",
        IndependenceLevel::MinimalAssistance => "Minimal assistance required",
        IndependenceLevel::ModerateAssistance => "Moderate assistance required",
        IndependenceLevel::MaximalAssistance => "Maximal assistance required",
        IndependenceLevel::TotalAssistance => "Total assistance required",
        IndependenceLevel::NotApplicable => SUPPORT_TO_BE_DETERMINED,
    }
}

pub fn determine_frequency(level: IndependenceLevel) -> &'static str {
    match level {
        IndependenceLevel::Independent => "Not required",
        IndependenceLevel::ModifiedIndependent => "Occasional check-ins",
        IndependenceLevel::Supervision => "Standby during the activity",
        IndependenceLevel::MinimalAssistance => "Intermittent assistance",
        IndependenceLevel::ModerateAssistance => "Regular assistance throughout",
        IndependenceLevel::MaximalAssistance => "Continuous hands-on assistance",
        IndependenceLevel::TotalAssistance => "Full assistance for every component",
        IndependenceLevel::NotApplicable => FREQUENCY_TO_BE_DETERMINED,
    }
}

/// Recommended adaptations for one activity.
///
/// Adaptations already mentioned in the notes are assumed to be in place
/// and dropped, unless the notes say the client "needs" them.
pub fn determine_adaptation(activity_name: &str, details: &ActivityRecord) -> String {
    let key = normalize_key(activity_name);
    let candidates = ACTIVITY_ADAPTATIONS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, list)| *list)
        .unwrap_or(DEFAULT_ADAPTATIONS);

    let notes = details.notes.to_lowercase();
    let remaining: Vec<&str> = candidates
        .iter()
        .copied()
        .filter(|adaptation| {
            !notes.contains(adaptation)
                || notes.contains(&format!("needs {adaptation}"))
                || notes.contains(&format!("needs a {adaptation}"))
        })
        .collect();

    if remaining.is_empty() {
        ADAPTATION_TO_BE_DETERMINED.to_string()
    } else {
        remaining.join(", ")
    }
}

pub fn generate_rationale(activity_name: &str, details: &ActivityRecord) -> String {
    let barriers = extract_barriers(&details.notes);
    if barriers.is_empty() {
        format!(
            "Support needed with {} based on assessed independence level",
            humanize(activity_name)
        )
    } else {
        format!(
            "Support needed due to: {}",
            barriers.into_iter().collect::<Vec<_>>().join(", ")
        )
    }
}

/// One row per activity that needs support, in category then name order.
pub fn build_support_plan(data: &AdlData) -> Vec<ActivitySupport> {
    data.categories()
        .into_iter()
        .flat_map(|(category, activities)| {
            activities
                .iter()
                .filter(|(_, record)| record.needs_support())
                .map(move |(name, record)| ActivitySupport {
                    category: category.to_string(),
                    activity: name.clone(),
                    level: record.independence,
                    support_type: determine_support_type(record.independence).to_string(),
                    frequency: determine_frequency(record.independence).to_string(),
                    adaptation: determine_adaptation(name, record),
                    rationale: generate_rationale(name, record),
                })
        })
        .collect()
}

pub fn analyze_adl(data: &AdlData) -> AdlAnalysis {
    let analysis = AdlAnalysis {
        overall: determine_overall_independence(data),
        needs: determine_support_needs(data),
        plan: build_support_plan(data),
    };
    debug!(
        overall = %analysis.overall,
        needs = analysis.needs.len(),
        plan = analysis.plan.len(),
        "ADL analysis complete"
    );
    analysis
}
