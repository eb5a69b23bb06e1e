use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// How much assistance an activity requires.
///
/// The scale runs from most to least independent:
///
/// ```text
/// independent > modified_independent > supervision > minimal_assistance
///   > moderate_assistance > maximal_assistance > total_assistance
/// ```
///
/// `NotApplicable` sits outside the scale. It never compares as better or
/// worse than a rated level, which is why this type does not implement
/// `Ord`; use [`IndependenceLevel::rank`] or [`reduce_worst`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum IndependenceLevel {
    Independent,
    ModifiedIndependent,
    Supervision,
    MinimalAssistance,
    ModerateAssistance,
    MaximalAssistance,
    TotalAssistance,
    #[default]
    NotApplicable,
}

impl IndependenceLevel {
    /// Every rated level, most independent first.
    pub const SCALE: [IndependenceLevel; 7] = [
        IndependenceLevel::Independent,
        IndependenceLevel::ModifiedIndependent,
        IndependenceLevel::Supervision,
        IndependenceLevel::MinimalAssistance,
        IndependenceLevel::ModerateAssistance,
        IndependenceLevel::MaximalAssistance,
        IndependenceLevel::TotalAssistance,
    ];

    /// Position on the scale; higher is more independent.
    /// `None` for `NotApplicable`.
    pub fn rank(self) -> Option<u8> {
        match self {
            IndependenceLevel::Independent => Some(6),
            IndependenceLevel::ModifiedIndependent => Some(5),
            IndependenceLevel::Supervision => Some(4),
            IndependenceLevel::MinimalAssistance => Some(3),
            IndependenceLevel::ModerateAssistance => Some(2),
            IndependenceLevel::MaximalAssistance => Some(1),
            IndependenceLevel::TotalAssistance => Some(0),
            IndependenceLevel::NotApplicable => None,
        }
    }

    /// `true` when both levels are rated and `self` sits strictly lower.
    pub fn is_worse_than(self, other: IndependenceLevel) -> bool {
        match (self.rank(), other.rank()) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        }
    }

    pub fn is_rated(self) -> bool {
        self.rank().is_some()
    }

    /// Canonical snake_case identifier, as used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            IndependenceLevel::Independent => "independent",
            IndependenceLevel::ModifiedIndependent => "modified_independent",
            IndependenceLevel::Supervision => "supervision",
            IndependenceLevel::MinimalAssistance => "minimal_assistance",
            IndependenceLevel::ModerateAssistance => "moderate_assistance",
            IndependenceLevel::MaximalAssistance => "maximal_assistance",
            IndependenceLevel::TotalAssistance => "total_assistance",
            IndependenceLevel::NotApplicable => "not_applicable",
        }
    }

    /// Human-readable label for narrative text.
    pub fn label(self) -> &'static str {
        match self {
            IndependenceLevel::Independent => "Independent",
            IndependenceLevel::ModifiedIndependent => "Modified independent",
            IndependenceLevel::Supervision => "Supervision",
            IndependenceLevel::MinimalAssistance => "Minimal assistance",
            IndependenceLevel::ModerateAssistance => "Moderate assistance",
            IndependenceLevel::MaximalAssistance => "Maximal assistance",
            IndependenceLevel::TotalAssistance => "Total assistance",
            IndependenceLevel::NotApplicable => "Not applicable",
        }
    }
}

impl fmt::Display for IndependenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndependenceLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::SCALE
            .into_iter()
            .chain([IndependenceLevel::NotApplicable])
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| CoreError::UnknownIndependenceLevel(s.to_string()))
    }
}

/// Return the level if one was recorded, otherwise `NotApplicable`.
pub fn ensure_independence_level(value: Option<IndependenceLevel>) -> IndependenceLevel {
    value.unwrap_or(IndependenceLevel::NotApplicable)
}

/// The most dependent rated level among `levels`.
///
/// `NotApplicable` entries are ignored; if nothing rated remains the
/// result is `NotApplicable`.
pub fn reduce_worst<I>(levels: I) -> IndependenceLevel
where
    I: IntoIterator<Item = IndependenceLevel>,
{
    levels
        .into_iter()
        .filter_map(|level| level.rank().map(|rank| (rank, level)))
        .min_by_key(|(rank, _)| *rank)
        .map(|(_, level)| level)
        .unwrap_or(IndependenceLevel::NotApplicable)
}
