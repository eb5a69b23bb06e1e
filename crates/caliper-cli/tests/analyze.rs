use caliper_cli::commands::analyze;
use caliper_core::models::assessment::AssessmentInput;
use caliper_core::models::report::DetailLevel;

const ASSESSMENT: &str = r#"{
    "client_name": "Sam Rivera",
    "date_administered": "2026-03-04",
    "rom": {
        "shoulder": [
            {
                "movement": "flexion",
                "active": { "left": 160, "right": 90, "normal": 180 },
                "painScale": { "left": 2, "right": 6 }
            }
        ]
    },
    "adl": {
        "household": {
            "laundry": { "notes": "Unable to carry the basket down the stairs.", "independence": "minimal_assistance" }
        },
        "community": {
            "shopping": { "independence": "independent" }
        }
    }
}"#;

#[test]
fn text_output_contains_both_narratives() {
    let input = AssessmentInput::from_json(ASSESSMENT).unwrap();
    let text = analyze(&input, DetailLevel::Standard, false).unwrap();

    assert!(text.contains("Range of Motion Analysis"));
    assert!(text.contains("Painful Movements:"));
    assert!(text.contains("Functional Independence Analysis"));
    assert!(text.contains("Overall independence: Minimal assistance"));
}

#[test]
fn json_output_is_parseable() {
    let input = AssessmentInput::from_json(ASSESSMENT).unwrap();
    let json = analyze(&input, DetailLevel::Brief, true).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["adl"]["overall"], "minimal_assistance");
    assert_eq!(value["rom"]["patterns"]["unilateral"][0]["side"], "left");
    assert!(!value["barriers"].as_array().unwrap().is_empty());
}
