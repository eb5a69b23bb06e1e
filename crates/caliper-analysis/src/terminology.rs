//! Domain terminology found in clinician notes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TermCategory {
    Anatomy,
    Movement,
    Assistance,
    Equipment,
    Symptom,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Term {
    pub text: String,
    pub category: TermCategory,
}

/// Recognized vocabulary. Entries are lower-case and matched as whole
/// words; multi-word entries must appear contiguously.
pub static TERMINOLOGY: &[(&str, TermCategory)] = &[
    ("shoulder", TermCategory::Anatomy),
    ("elbow", TermCategory::Anatomy),
    ("wrist", TermCategory::Anatomy),
    ("hand", TermCategory::Anatomy),
    ("hip", TermCategory::Anatomy),
    ("knee", TermCategory::Anatomy),
    ("ankle", TermCategory::Anatomy),
    ("cervical spine", TermCategory::Anatomy),
    ("lumbar spine", TermCategory::Anatomy),
    ("flexion", TermCategory::Movement),
    ("extension", TermCategory::Movement),
    ("abduction", TermCategory::Movement),
    ("adduction", TermCategory::Movement),
    ("internal rotation", TermCategory::Movement),
    ("external rotation", TermCategory::Movement),
    ("rotation", TermCategory::Movement),
    ("pronation", TermCategory::Movement),
    ("supination", TermCategory::Movement),
    ("dorsiflexion", TermCategory::Movement),
    ("plantarflexion", TermCategory::Movement),
    ("transfers", TermCategory::Movement),
    ("ambulation", TermCategory::Movement),
    ("independent", TermCategory::Assistance),
    ("modified independent", TermCategory::Assistance),
    ("supervision", TermCategory::Assistance),
    ("standby assistance", TermCategory::Assistance),
    ("minimal assistance", TermCategory::Assistance),
    ("moderate assistance", TermCategory::Assistance),
    ("maximal assistance", TermCategory::Assistance),
    ("total assistance", TermCategory::Assistance),
    ("verbal cues", TermCategory::Assistance),
    ("walker", TermCategory::Equipment),
    ("wheeled walker", TermCategory::Equipment),
    ("cane", TermCategory::Equipment),
    ("wheelchair", TermCategory::Equipment),
    ("shower chair", TermCategory::Equipment),
    ("grab rails", TermCategory::Equipment),
    ("grab bars", TermCategory::Equipment),
    ("reacher", TermCategory::Equipment),
    ("sock aid", TermCategory::Equipment),
    ("perching stool", TermCategory::Equipment),
    ("pain", TermCategory::Symptom),
    ("fatigue", TermCategory::Symptom),
    ("stiffness", TermCategory::Symptom),
    ("weakness", TermCategory::Symptom),
    ("swelling", TermCategory::Symptom),
    ("dizziness", TermCategory::Symptom),
    ("shortness of breath", TermCategory::Symptom),
    ("numbness", TermCategory::Symptom),
];

/// Every vocabulary term that occurs in `notes`.
pub fn extract_terminology(notes: &str) -> BTreeSet<Term> {
    let text = notes.to_lowercase();
    TERMINOLOGY
        .iter()
        .filter(|(term, _)| contains_word(&text, term))
        .map(|(term, category)| Term {
            text: (*term).to_string(),
            category: *category,
        })
        .collect()
}

fn contains_word(text: &str, phrase: &str) -> bool {
    text.match_indices(phrase).any(|(start, _)| {
        let end = start + phrase.len();
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        before.is_none_or(|c| !c.is_alphanumeric()) && after.is_none_or(|c| !c.is_alphanumeric())
    })
}
