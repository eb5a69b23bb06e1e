use caliper_analysis::analyze_adl;
use caliper_core::models::adl::{ActivityRecord, AdlData};
use caliper_core::models::independence::IndependenceLevel;
use caliper_core::models::report::DetailLevel;
use caliper_narrative::adl::{NO_SUPPORT_NEEDS, NOT_RATED};
use caliper_narrative::format_adl;

fn household_data() -> AdlData {
    let mut data = AdlData::default();
    data.household.insert(
        "meal_preparation".to_string(),
        ActivityRecord::new(
            "Difficulty standing at the bench for long periods",
            IndependenceLevel::ModerateAssistance,
        ),
    );
    data.household.insert(
        "laundry".to_string(),
        ActivityRecord::new("", IndependenceLevel::Independent),
    );
    data
}

#[test]
fn empty_data_reports_no_needs_at_every_level() {
    let analysis = analyze_adl(&AdlData::default());
    for level in [DetailLevel::Brief, DetailLevel::Standard, DetailLevel::Detailed] {
        let text = format_adl(&analysis, level);
        assert!(text.contains(&format!("Overall independence: {NOT_RATED}\n")));
        assert!(text.contains(NO_SUPPORT_NEEDS));
        assert!(!text.contains("null"));
        assert!(!text.contains("undefined"));
        assert!(!text.contains("Support Needs:"));
    }
}

#[test]
fn brief_lists_category_levels() {
    let text = format_adl(&analyze_adl(&household_data()), DetailLevel::Brief);
    assert!(text.contains("Overall independence: Moderate assistance\n"));
    assert!(text.contains("- Household: Moderate assistance\n"));
    assert!(!text.contains("Community"));
}

#[test]
fn standard_includes_needs_and_recommended_support() {
    let text = format_adl(&analyze_adl(&household_data()), DetailLevel::Standard);
    assert!(text.contains(
        "- Household (Moderate assistance): 1 household activity requires support\n"
    ));
    assert!(text.contains("  Barriers: "));
    assert!(text.contains("\nRecommended Support:\n"));
    assert!(text.contains(
        "- Meal preparation: Moderate assistance required (Regular assistance throughout)\n"
    ));
    assert!(!text.contains("Laundry"));
}

#[test]
fn detailed_includes_adaptations_and_rationale() {
    let text = format_adl(&analyze_adl(&household_data()), DetailLevel::Detailed);
    assert!(text.contains("\nSupport Plan:\n"));
    assert!(text.contains("- Meal preparation (household, Moderate assistance)\n"));
    assert!(text.contains(
        "  Adaptations: perching stool, lightweight cookware, kitchen reorganization\n"
    ));
    assert!(text.contains("  Rationale: Support needed due to: "));
}
