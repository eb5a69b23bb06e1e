use caliper_core::models::adl::ActivityRecord;
use caliper_core::models::assessment::AssessmentInput;
use caliper_core::models::independence::IndependenceLevel;
use caliper_core::models::report::{
    AssembledReport, AssembledSection, DetailLevel, GenerationProgress, SectionOutcome,
    SectionStatus,
};
use caliper_core::models::rom::{JointMeasurement, PainScale, Side};

#[test]
fn activity_record_defaults_missing_fields() {
    let record: ActivityRecord = serde_json::from_str("{}").unwrap();
    assert_eq!(record.notes, "");
    assert_eq!(record.independence, IndependenceLevel::NotApplicable);
    assert!(!record.needs_support());
}

#[test]
fn assessment_accepts_camel_case_measurement_fields() {
    let json = r#"{
        "client_name": "A. Client",
        "date_administered": "2026-03-14",
        "rom": {
            "shoulder": [{
                "movement": "flexion",
                "active": {"left": 160, "right": 90, "normal": 180},
                "painScale": {"right": 6},
                "endFeel": {"left": "firm"}
            }]
        },
        "adl": {
            "household": {"laundry": {"independence": "supervision"}}
        }
    }"#;

    let input = AssessmentInput::from_json(json).unwrap();
    let shoulder = &input.rom["shoulder"][0];
    assert_eq!(shoulder.active.get(Side::Right), Some(90.0));
    assert_eq!(shoulder.pain(Side::Right), Some(6.0));
    assert_eq!(shoulder.pain(Side::Left), None);
    assert_eq!(
        shoulder.end_feel.as_ref().and_then(|e| e.get(Side::Left)),
        Some("firm")
    );
    assert!(shoulder.passive.is_none());
    assert_eq!(
        input.adl.household["laundry"].independence,
        IndependenceLevel::Supervision
    );
    assert!(input.adl.community.is_empty());
}

#[test]
fn measurement_serializes_with_wire_field_names() {
    let measurement = JointMeasurement {
        movement: "flexion".to_string(),
        pain_scale: Some(PainScale {
            left: None,
            right: Some(6.0),
        }),
        ..Default::default()
    };

    let json = serde_json::to_value(&measurement).unwrap();
    assert_eq!(json["painScale"]["right"], 6.0);
    assert!(json.get("pain_scale").is_none());
    assert!(json.get("endFeel").is_some());
}

#[test]
fn malformed_assessment_is_an_error() {
    assert!(AssessmentInput::from_json("not json").is_err());
}

#[test]
fn new_progress_starts_pending() {
    let progress = GenerationProgress::new([("rom", "Range of Motion"), ("adl", "ADLs")]);
    assert_eq!(progress.overall_progress, 0);
    assert_eq!(progress.sections.len(), 2);
    for section in &progress.sections {
        assert_eq!(section.status, SectionStatus::Pending);
        assert_eq!(section.progress, 0);
        assert!(section.error.is_none());
    }
    assert_eq!(progress.section("adl").unwrap().label, "ADLs");
}

#[test]
fn overall_progress_counts_terminal_sections() {
    let mut progress =
        GenerationProgress::new([("a", "A"), ("b", "B"), ("c", "C"), ("d", "D")]);

    progress.section_mut("a").unwrap().status = SectionStatus::Complete;
    progress.section_mut("b").unwrap().status = SectionStatus::Error;
    progress.section_mut("c").unwrap().status = SectionStatus::Processing;
    progress.recompute_overall();

    assert_eq!(progress.overall_progress, 50);
    assert!(!progress.is_finished());
}

#[test]
fn empty_run_is_complete() {
    let progress = GenerationProgress::new(std::iter::empty::<(&str, &str)>());
    assert_eq!(progress.overall_progress, 100);
    assert!(progress.is_finished());
}

#[test]
fn assembled_report_marks_failures_visibly() {
    let report = AssembledReport {
        run_id: uuid::Uuid::new_v4(),
        cancelled: false,
        sections: vec![
            AssembledSection {
                id: "rom".into(),
                label: "Range of Motion".into(),
                outcome: SectionOutcome::Generated("Shoulder flexion is limited.\n".into()),
            },
            AssembledSection {
                id: "adl".into(),
                label: "Daily Living".into(),
                outcome: SectionOutcome::Failed("model timed out".into()),
            },
        ],
    };

    let text = report.to_text();
    assert!(text.starts_with("## Range of Motion\n\nShoulder flexion is limited.\n\n"));
    assert!(text.contains("## Daily Living\n\n[Section unavailable: model timed out]"));
    assert!(!report.is_complete());
    assert_eq!(report.failed_sections().count(), 1);
}

#[test]
fn detail_level_parses_case_insensitively() {
    assert_eq!("BRIEF".parse::<DetailLevel>().unwrap(), DetailLevel::Brief);
    assert_eq!(DetailLevel::default(), DetailLevel::Standard);
    assert!("verbose".parse::<DetailLevel>().is_err());
}
