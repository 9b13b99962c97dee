use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a job-candidate line produced no job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Nothing usable was left for the city once address and tags were removed.
    NoCity,
    /// No house-number anchor, and the notes could not stand in as an address.
    NoAddress,
    /// The address has no digit or no street-shaped word.
    AddressWithoutStreet,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoCity => write!(f, "no city found"),
            SkipReason::NoAddress => write!(f, "no street address found"),
            SkipReason::AddressWithoutStreet => write!(f, "address has no street name"),
        }
    }
}

/// A job-candidate line that was dropped during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    /// 1-based line number in the pasted text.
    pub line_number: usize,
    pub line_text: String,
    pub reason: SkipReason,
}
