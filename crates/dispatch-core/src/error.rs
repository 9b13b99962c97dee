use std::path::PathBuf;

use crate::model::JobId;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("failed to load registry from {path}: {reason}")]
    RegistryLoad { path: PathBuf, reason: String },

    #[error("invalid registry: {0}")]
    RegistryInvalid(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("unknown rep '{0}'")]
    UnknownRep(String),

    #[error("rep '{rep}' has no slot '{slot}'")]
    UnknownSlot { rep: String, slot: String },

    #[error("slot '{slot}' is unavailable for rep '{rep}' on the selected day")]
    SlotUnavailable { rep: String, slot: String },

    #[error("unknown job {0}")]
    UnknownJob(JobId),

    #[error("job {0} is already on the board")]
    DuplicateJob(JobId),

    #[error("geocoding failed: {0}")]
    Geocode(String),

    #[error("routing failed: {0}")]
    Routing(String),

    #[error("failed to read spreadsheet: {0}")]
    Spreadsheet(String),

    #[error("failed to write GPX: {0}")]
    Gpx(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
