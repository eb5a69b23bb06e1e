use caliper_core::models::report::{AssembledReport, AssembledSection, SectionOutcome};
use caliper_export::blocks::{Block, report_blocks};
use caliper_export::docx::generate_docx;
use caliper_export::styles::DocumentStyles;
use uuid::Uuid;

fn section(id: &str, label: &str, outcome: SectionOutcome) -> AssembledSection {
    AssembledSection {
        id: id.to_string(),
        label: label.to_string(),
        outcome,
    }
}

fn report() -> AssembledReport {
    AssembledReport {
        run_id: Uuid::new_v4(),
        sections: vec![
            section(
                "range_of_motion",
                "Range of Motion",
                SectionOutcome::Generated(
                    "Shoulder flexion is **markedly** reduced on the right.\n\n\n### Impact\n- Overhead reaching\n* Upper body dressing\n"
                        .to_string(),
                ),
            ),
            section(
                "functional_independence",
                "Functional Independence",
                SectionOutcome::Failed("operation failed after 3 attempt(s): throttled".to_string()),
            ),
            section("clinical_summary", "Clinical Notes Summary", SectionOutcome::Skipped),
        ],
        cancelled: true,
    }
}

#[test]
fn blocks_follow_section_order() {
    let blocks = report_blocks(&report(), "Functional Capacity Report");
    assert_eq!(
        blocks,
        vec![
            Block::Title("Functional Capacity Report".to_string()),
            Block::Heading("Range of Motion".to_string()),
            Block::Body("Shoulder flexion is **markedly** reduced on the right.".to_string()),
            Block::Spacer,
            Block::Subheading("Impact".to_string()),
            Block::Bullet("Overhead reaching".to_string()),
            Block::Bullet("Upper body dressing".to_string()),
            Block::Spacer,
            Block::Heading("Functional Independence".to_string()),
            Block::Marker(
                "Section unavailable: operation failed after 3 attempt(s): throttled".to_string()
            ),
            Block::Spacer,
            Block::Heading("Clinical Notes Summary".to_string()),
            Block::Marker("Section not generated: generation was cancelled".to_string()),
            Block::Spacer,
        ]
    );
}

#[test]
fn docx_is_a_zip_package() {
    let bytes = generate_docx(&report(), "Functional Capacity Report", &DocumentStyles::default())
        .expect("docx generation");
    assert!(bytes.len() > 100);
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn empty_report_still_exports() {
    let empty = AssembledReport {
        run_id: Uuid::new_v4(),
        sections: Vec::new(),
        cancelled: false,
    };
    assert_eq!(
        report_blocks(&empty, "Report"),
        vec![Block::Title("Report".to_string())]
    );
    assert!(generate_docx(&empty, "Report", &DocumentStyles::default()).is_ok());
}
