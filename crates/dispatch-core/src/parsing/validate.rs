use crate::model::{Job, JobId};
use crate::parsing::city::Resolution;
use crate::parsing::tags::extract_tags;
use crate::registry::Registry;
use crate::trace::SkipReason;

/// Direction and street-type abbreviations accepted as the street part of
/// an address. Alphabetic words of three or more letters are accepted
/// without being listed.
const STREET_ABBREVIATIONS: &[&str] = &[
    "n", "s", "e", "w", "ne", "nw", "se", "sw", "dr", "st", "ct", "rd", "pl", "ln", "av", "blvd",
    "ave", "way", "cir", "pkwy", "hwy", "ter", "trl",
];

/// Everything the extraction steps recovered from one job-candidate line.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub line_number: usize,
    pub line: &'a str,
    /// From the house-number anchor; `None` when extraction was deferred.
    pub address: Option<&'a str>,
    pub resolution: Resolution,
    pub timeframe: Option<&'a str>,
    pub assigned_rep: Option<String>,
}

/// Apply the acceptance rules and build the job.
pub fn build_job(candidate: Candidate<'_>, registry: &Registry) -> Result<Job, SkipReason> {
    let Resolution {
        city,
        notes,
        zip_code,
    } = candidate.resolution;

    if city.is_empty() {
        return Err(SkipReason::NoCity);
    }

    let (address, notes) = match candidate.address {
        Some(address) => (address.to_string(), notes),
        // The notes stand in for the address only if they look like one.
        None if has_digit_and_letter(&notes) => (notes, String::new()),
        None => return Err(SkipReason::NoAddress),
    };

    if !is_street_address(&address) {
        return Err(SkipReason::AddressWithoutStreet);
    }

    let tags = extract_tags(&notes, registry);
    Ok(Job {
        id: JobId::from_line(candidate.line_number, candidate.line),
        address,
        original_address: None,
        city,
        zip_code,
        notes,
        tags,
        original_timeframe: candidate.timeframe.map(str::to_string),
        time_slot_label: None,
        assigned_rep: candidate.assigned_rep,
    })
}

fn has_digit_and_letter(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit()) && s.chars().any(|c| c.is_alphabetic())
}

/// At least one digit and at least one street-shaped word.
pub fn is_street_address(address: &str) -> bool {
    address.chars().any(|c| c.is_ascii_digit())
        && address.split_whitespace().any(|token| {
            let word = token.trim_matches(|c: char| c.is_ascii_punctuation());
            is_street_word(word)
        })
}

fn is_street_word(word: &str) -> bool {
    if word.chars().count() >= 3 && word.chars().all(char::is_alphabetic) {
        return true;
    }
    let lower = word.to_lowercase();
    STREET_ABBREVIATIONS.contains(&lower.as_str())
}
