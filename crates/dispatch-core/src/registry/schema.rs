use serde::{Deserialize, Serialize};

/// Reference data for one service region: the gazetteer of known city
/// names and the job-type keywords that mark where notes begin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// State or area code, for display.
    #[serde(default)]
    pub region: Option<String>,
    /// Known city names. Order does not matter; matching tries longer names first.
    pub cities: Vec<String>,
    /// Roofing and job-type keywords, matched case-insensitively at word boundaries.
    pub tags: Vec<String>,
}
