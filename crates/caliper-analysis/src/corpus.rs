//! Frequency statistics across many notes.
//!
//! A [`NoteCorpus`] is owned by whoever drives a batch: create one, feed it
//! notes, read the tallies, drop it. Two corpora built in parallel can be
//! combined with [`NoteCorpus::merge`].

use std::collections::BTreeMap;

use caliper_core::models::adl::AdlData;

use crate::barriers::extract_barriers;
use crate::terminology::{Term, extract_terminology};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteCorpus {
    pub notes_seen: usize,
    pub barriers: BTreeMap<String, usize>,
    pub terms: BTreeMap<Term, usize>,
}

impl NoteCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally the barriers and terms in one note. Each distinct phrase is
    /// counted at most once per note.
    pub fn record(&mut self, notes: &str) {
        self.notes_seen += 1;
        for barrier in extract_barriers(notes) {
            *self.barriers.entry(barrier).or_default() += 1;
        }
        for term in extract_terminology(notes) {
            *self.terms.entry(term).or_default() += 1;
        }
    }

    /// Record the notes of every activity that has any.
    pub fn record_adl(&mut self, adl: &AdlData) {
        for (_, activities) in adl.categories() {
            for record in activities.values().filter(|r| !r.notes.trim().is_empty()) {
                self.record(&record.notes);
            }
        }
    }

    pub fn merge(&mut self, other: NoteCorpus) {
        self.notes_seen += other.notes_seen;
        for (barrier, count) in other.barriers {
            *self.barriers.entry(barrier).or_default() += count;
        }
        for (term, count) in other.terms {
            *self.terms.entry(term).or_default() += count;
        }
    }

    /// Up to `n` barriers, most frequent first; ties in alphabetical order.
    pub fn most_frequent_barriers(&self, n: usize) -> Vec<(&str, usize)> {
        top_n(self.barriers.iter().map(|(b, c)| (b.as_str(), *c)), n)
    }

    /// Up to `n` terms, most frequent first; ties in alphabetical order.
    pub fn most_frequent_terms(&self, n: usize) -> Vec<(&Term, usize)> {
        top_n(self.terms.iter().map(|(t, c)| (t, *c)), n)
    }
}

fn top_n<K, I>(entries: I, n: usize) -> Vec<(K, usize)>
where
    I: Iterator<Item = (K, usize)>,
{
    let mut entries: Vec<_> = entries.collect();
    // Stable sort keeps the map's key order among equal counts.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(n);
    entries
}
