use caliper_analysis::corpus::NoteCorpus;
use caliper_analysis::terminology::{TermCategory, extract_terminology};

#[test]
fn terminology_matches_whole_words() {
    let terms = extract_terminology("Uses a wheeled walker; shoulder flexion painful. Reflexion.");
    let texts: Vec<&str> = terms.iter().map(|t| t.text.as_str()).collect();

    assert!(texts.contains(&"wheeled walker"));
    assert!(texts.contains(&"walker"));
    assert!(texts.contains(&"shoulder"));
    assert!(texts.contains(&"flexion"));
    // "painful" is not the symptom "pain".
    assert!(!texts.contains(&"pain"));
}

#[test]
fn terminology_carries_categories() {
    let terms = extract_terminology("Moderate assistance with transfers due to dizziness");
    let category = |text: &str| terms.iter().find(|t| t.text == text).map(|t| t.category);

    assert_eq!(category("moderate assistance"), Some(TermCategory::Assistance));
    assert_eq!(category("transfers"), Some(TermCategory::Movement));
    assert_eq!(category("dizziness"), Some(TermCategory::Symptom));
}

#[test]
fn corpus_counts_each_phrase_once_per_note() {
    let mut corpus = NoteCorpus::new();
    corpus.record("Needs help dressing. Needs help dressing.");
    corpus.record("Needs help dressing, fatigue with stairs");

    assert_eq!(corpus.notes_seen, 2);
    assert_eq!(corpus.barriers["needs help dressing"], 2);
    assert_eq!(corpus.most_frequent_barriers(1), vec![("needs help dressing", 2)]);
}

#[test]
fn corpora_merge() {
    let mut a = NoteCorpus::new();
    a.record("Pain with reaching overhead");
    let mut b = NoteCorpus::new();
    b.record("pain with reaching overhead");
    b.record("Uses a cane");

    a.merge(b);
    assert_eq!(a.notes_seen, 3);
    assert_eq!(a.barriers["pain with reaching overhead"], 2);

    let top_terms = a.most_frequent_terms(1);
    assert_eq!(top_terms[0].0.text, "pain");
    assert_eq!(top_terms[0].1, 2);
}

#[test]
fn separate_corpora_do_not_share_state() {
    let mut a = NoteCorpus::new();
    a.record("Unable to kneel");
    let b = NoteCorpus::new();
    assert_eq!(b.notes_seen, 0);
    assert!(b.barriers.is_empty());
}
