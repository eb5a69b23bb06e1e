use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::adl::AdlData;
use super::rom::JointMeasurement;
use crate::error::CoreError;

/// A complete assessment as handed to the analysis engine.
///
/// Source documents have already been read and their text extracted;
/// everything here is structured data or plain text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentInput {
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub date_administered: Option<jiff::civil::Date>,
    /// ROM measurements keyed by joint name.
    #[serde(default)]
    pub rom: BTreeMap<String, Vec<JointMeasurement>>,
    #[serde(default)]
    pub adl: AdlData,
    /// Free-text clinical notes for the whole assessment.
    #[serde(default)]
    pub notes: Option<String>,
}

impl AssessmentInput {
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }
}
