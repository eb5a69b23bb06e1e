pub mod adl;
pub mod assessment;
pub mod independence;
pub mod report;
pub mod rom;
