//! Barrier phrase extraction from clinician notes.
//!
//! Extraction is driven by [`BARRIER_TRIGGERS`], a table pairing each
//! trigger phrase with the rule that turns its surrounding text into a
//! barrier phrase. Each trigger can be exercised on its own through
//! [`BarrierTrigger::extract`].
//!
//! Given `"Client reports difficulty standing and pain with prolonged walking"`
//! the table yields `"difficulty standing"` (cut at the conjunction) and
//! `"pain with prolonged walking"` (runs to the end of the text).

use std::collections::BTreeSet;

/// Characters of lookahead taken after a trigger word.
pub const LOOKAHEAD_WINDOW: usize = 50;

const SENTENCE_END: &[char] = &['.', '!', '?', ';', '\n'];
const CLAUSE_END: &[char] = &['.', ',', ';', ':', '!', '?', '\n', '(', ')'];
const CONJUNCTIONS: &[&str] = &[" and ", " but ", " or "];

/// How the text around a trigger becomes a barrier phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionRule {
    /// Keep the whole span from the trigger to the end of its sentence.
    Sentence,
    /// Read up to `window` characters past the trigger and stop at the
    /// first clause punctuation or conjunction.
    Lookahead { window: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarrierTrigger {
    pub phrase: &'static str,
    pub rule: ExtractionRule,
}

const fn sentence(phrase: &'static str) -> BarrierTrigger {
    BarrierTrigger {
        phrase,
        rule: ExtractionRule::Sentence,
    }
}

const fn lookahead(phrase: &'static str) -> BarrierTrigger {
    BarrierTrigger {
        phrase,
        rule: ExtractionRule::Lookahead {
            window: LOOKAHEAD_WINDOW,
        },
    }
}

/// Trigger vocabulary. Phrases are lower-case and matched as whole words,
/// so inflected forms need their own entry.
pub static BARRIER_TRIGGERS: &[BarrierTrigger] = &[
    sentence("cannot"),
    sentence("can't"),
    sentence("can\u{2019}t"),
    sentence("unable to"),
    lookahead("difficulty"),
    lookahead("difficulties"),
    lookahead("requires"),
    lookahead("needs"),
    lookahead("limited"),
    lookahead("pain"),
    lookahead("painful"),
    lookahead("fatigue"),
    lookahead("balance"),
    lookahead("strength"),
    lookahead("endurance"),
];

impl BarrierTrigger {
    /// Every barrier phrase this trigger yields in `text`.
    ///
    /// `text` must already be lower-case. Single-word candidates are
    /// dropped.
    pub fn extract(&self, text: &str) -> Vec<String> {
        word_starts(text, self.phrase)
            .filter_map(|start| {
                let candidate = match self.rule {
                    ExtractionRule::Sentence => sentence_span(text, start).to_string(),
                    ExtractionRule::Lookahead { window } => {
                        lookahead_span(text, start, self.phrase, window)
                    }
                };
                let candidate = candidate.trim();
                (candidate.split_whitespace().count() > 1).then(|| collapse_whitespace(candidate))
            })
            .collect()
    }
}

/// Extract the deduplicated set of barrier phrases from free-text notes.
pub fn extract_barriers(notes: &str) -> BTreeSet<String> {
    extract_with(BARRIER_TRIGGERS, notes)
}

/// Same as [`extract_barriers`] with a caller-supplied trigger table.
pub fn extract_with(triggers: &[BarrierTrigger], notes: &str) -> BTreeSet<String> {
    let text = notes.to_lowercase();
    triggers
        .iter()
        .flat_map(|trigger| trigger.extract(&text))
        .collect()
}

/// Byte offsets where `phrase` occurs as a whole word in `text`.
fn word_starts<'a>(text: &'a str, phrase: &'a str) -> impl Iterator<Item = usize> + 'a {
    text.match_indices(phrase).filter_map(move |(start, _)| {
        let starts_word = text[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let ends_word = text[start + phrase.len()..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        (starts_word && ends_word).then_some(start)
    })
}

fn sentence_span(text: &str, start: usize) -> &str {
    let rest = &text[start..];
    let end = rest.find(SENTENCE_END).unwrap_or(rest.len());
    &rest[..end]
}

fn lookahead_span(text: &str, start: usize, phrase: &str, window: usize) -> String {
    let after = start + phrase.len();
    let rest = &text[after..];

    // Window end on a char boundary.
    let limit = rest
        .char_indices()
        .nth(window)
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    let window_text = &rest[..limit];

    let punctuation = window_text.find(CLAUSE_END);
    let conjunction = CONJUNCTIONS
        .iter()
        .filter_map(|c| window_text.find(c))
        .min();

    let tail = match (punctuation, conjunction) {
        (Some(p), Some(c)) => &window_text[..p.min(c)],
        (Some(p), None) => &window_text[..p],
        (None, Some(c)) => &window_text[..c],
        (None, None) => strip_partial_word(window_text, &rest[limit..]),
    };

    format!("{}{}", &text[start..after], tail)
}

/// Drop a word cut in half by the window edge.
fn strip_partial_word<'a>(window_text: &'a str, beyond: &str) -> &'a str {
    let cut_mid_word = window_text
        .chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric())
        && beyond.chars().next().is_some_and(|c| c.is_alphanumeric());

    if !cut_mid_word {
        return window_text;
    }

    match window_text.rfind(char::is_whitespace) {
        Some(i) => &window_text[..i],
        None => "",
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
