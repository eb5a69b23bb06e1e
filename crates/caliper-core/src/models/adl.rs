use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::independence::IndependenceLevel;

/// One activity as rated by the clinician.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ActivityRecord {
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub independence: IndependenceLevel,
}

impl ActivityRecord {
    pub fn new(notes: impl Into<String>, independence: IndependenceLevel) -> Self {
        Self {
            notes: notes.into(),
            independence,
        }
    }

    /// Rated below fully independent (and rated at all).
    pub fn needs_support(&self) -> bool {
        self.independence.is_rated() && self.independence != IndependenceLevel::Independent
    }
}

/// Activities keyed by name.
pub type ActivityMap = BTreeMap<String, ActivityRecord>;

/// Instrumental activities grouped by setting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdlData {
    #[serde(default)]
    pub household: ActivityMap,
    #[serde(default)]
    pub community: ActivityMap,
}

impl AdlData {
    /// `(category, activities)` pairs in report order.
    pub fn categories(&self) -> [(&'static str, &ActivityMap); 2] {
        [("household", &self.household), ("community", &self.community)]
    }

    pub fn is_empty(&self) -> bool {
        self.household.is_empty() && self.community.is_empty()
    }
}

/// Summary of support required across one category of activities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SupportNeed {
    pub category: String,
    pub level: IndependenceLevel,
    pub barriers: BTreeSet<String>,
    pub rationale: String,
}

/// Recommended support for a single activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ActivitySupport {
    pub category: String,
    pub activity: String,
    pub level: IndependenceLevel,
    pub support_type: String,
    pub frequency: String,
    pub adaptation: String,
    pub rationale: String,
}

/// Output of ADL/independence analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdlAnalysis {
    pub overall: IndependenceLevel,
    pub needs: Vec<SupportNeed>,
    pub plan: Vec<ActivitySupport>,
}
