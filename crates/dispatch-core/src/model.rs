use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier for a job, assigned once at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub Uuid);

impl JobId {
    /// Namespace for name-based job ids.
    const NAMESPACE: Uuid = Uuid::from_u128(0x5d1c_7a0e_93b4_4e0f_8a61_2f0c_6b9d_e412);

    /// Derive an id from the source line, so parsing the same text twice
    /// yields the same ids.
    pub fn from_line(line_number: usize, line: &str) -> JobId {
        let name = format!("{line_number}:{line}");
        JobId(Uuid::new_v5(&Self::NAMESPACE, name.as_bytes()))
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Structured markers recovered from a job's notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTags {
    /// Registry keywords found in the notes, lowercased, first occurrence order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stories: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub square_feet: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_years: Option<u32>,
    /// Number of `#` priority marks.
    #[serde(default)]
    pub priority: u8,
}

/// A single work order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub address: String,
    /// Address as first ingested, kept once the address has been corrected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_address: Option<String>,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: JobTags,
    /// Time window stated by the slot header above the job's line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_timeframe: Option<String>,
    /// Slot the job is currently scheduled into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slot_label: Option<String>,
    /// Rep named by a `-> Name` fragment on the source line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_rep: Option<String>,
}

impl Job {
    /// Overwrite the address, keeping the first pre-correction value.
    pub fn correct_address(&mut self, address: impl Into<String>) {
        let address = address.into();
        if address == self.address {
            return;
        }
        if self.original_address.is_none() {
            self.original_address = Some(std::mem::take(&mut self.address));
        }
        self.address = address;
    }

    /// Label used to group the job when sequencing: the assigned slot,
    /// falling back to the time window it was ingested under.
    pub fn slot_label(&self) -> Option<&str> {
        self.time_slot_label
            .as_deref()
            .or(self.original_timeframe.as_deref())
    }

    /// Single-line address suitable for a geocoder query.
    pub fn geocode_query(&self) -> String {
        match &self.zip_code {
            Some(zip) => format!("{}, {}, {}", self.address, self.city, zip),
            None => format!("{}, {}", self.address, self.city),
        }
    }
}

/// A fixed period of a rep's day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub jobs: Vec<JobId>,
}

impl TimeSlot {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        TimeSlot {
            id: id.into(),
            label: label.into(),
            jobs: Vec::new(),
        }
    }

    /// The four standard windows of a working day.
    pub fn default_day() -> Vec<TimeSlot> {
        vec![
            TimeSlot::new("slot-1", "8am-10am"),
            TimeSlot::new("slot-2", "10am-12pm"),
            TimeSlot::new("slot-3", "1pm-3pm"),
            TimeSlot::new("slot-4", "3pm-5pm"),
        ]
    }
}

/// A schedule owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rep {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub region: String,
    pub time_slots: Vec<TimeSlot>,
    #[serde(default)]
    pub zip_codes: Vec<String>,
    /// Slot ids the rep cannot work on the selected day.
    #[serde(default)]
    pub unavailable_slots: Vec<String>,
}

impl Rep {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Rep {
            id: id.into(),
            name: name.into(),
            region: String::new(),
            time_slots: TimeSlot::default_day(),
            zip_codes: Vec::new(),
            unavailable_slots: Vec::new(),
        }
    }

    /// All job ids across the rep's slots, in slot order.
    pub fn job_ids(&self) -> Vec<JobId> {
        self.time_slots
            .iter()
            .flat_map(|s| s.jobs.iter().copied())
            .collect()
    }

    pub fn job_count(&self) -> usize {
        self.time_slots.iter().map(|s| s.jobs.len()).sum()
    }

    pub fn is_available(&self, slot_id: &str) -> bool {
        !self.unavailable_slots.iter().any(|s| s == slot_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Coordinates { lat, lng }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lng)
    }
}

/// Route summary for a sequenced day. Derived, never the source of truth
/// for ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    /// Miles.
    pub distance: f64,
    /// Minutes.
    pub duration: f64,
    /// Encoded polyline, when the router returned one.
    pub geometry: Option<String>,
    pub coordinates: Vec<Coordinates>,
}

impl RouteInfo {
    /// Zero-length route through a single stop.
    pub fn single_point(point: Coordinates) -> Self {
        RouteInfo {
            distance: 0.0,
            duration: 0.0,
            geometry: None,
            coordinates: vec![point],
        }
    }
}
