pub mod address;
pub mod city;
pub mod classify;
pub mod tags;
pub mod timestamp;
pub mod validate;

use crate::model::Job;
use crate::registry::Registry;
use crate::trace::{SkipReason, SkippedLine};
use address::split_address;
use classify::{classify_line, LineKind};
use serde::{Deserialize, Serialize};
use timestamp::{strip_timestamp, take_rep};
use tracing::{debug, info};
use validate::{build_job, Candidate};

/// Jobs recovered from a block of pasted text, in source-line order, plus
/// the candidate lines that did not validate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedJobs {
    pub jobs: Vec<Job>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_lines: Vec<SkippedLine>,
}

/// State threaded through the line fold.
#[derive(Default)]
struct LineFold<'a> {
    /// Time range of the most recent slot header. Persists until the next one.
    timeframe: Option<&'a str>,
    parsed: ParsedJobs,
}

/// Parse pasted job listings.
///
/// Never fails: lines that don't yield a job are recorded in
/// `skipped_lines` and parsing continues. Headers and blank lines produce
/// nothing. The result depends only on `text` and `registry`.
pub fn parse_jobs(text: &str, registry: &Registry) -> ParsedJobs {
    let fold = text
        .lines()
        .enumerate()
        .fold(LineFold::default(), |mut acc, (idx, raw)| {
            match classify_line(raw) {
                LineKind::Blank | LineKind::DateHeader => {}
                LineKind::SlotHeader(range) => acc.timeframe = Some(range),
                LineKind::Candidate(line) => {
                    let line_number = idx + 1;
                    match parse_line(line_number, line, acc.timeframe, registry) {
                        Ok(job) => acc.parsed.jobs.push(job),
                        Err(reason) => {
                            debug!(line_number, %reason, line, "skipping line");
                            acc.parsed.skipped_lines.push(SkippedLine {
                                line_number,
                                line_text: line.to_string(),
                                reason,
                            });
                        }
                    }
                }
            }
            acc
        });

    let parsed = fold.parsed;
    info!(
        jobs = parsed.jobs.len(),
        skipped = parsed.skipped_lines.len(),
        registry = registry.name(),
        "parsed job listings"
    );
    parsed
}

/// Run one job-candidate line through extraction and validation.
pub fn parse_line(
    line_number: usize,
    line: &str,
    timeframe: Option<&str>,
    registry: &Registry,
) -> Result<Job, SkipReason> {
    let (without_rep, assigned_rep) = take_rep(line);
    let stripped = strip_timestamp(&without_rep);
    let split = split_address(stripped);
    let resolution = city::resolve(split.head, registry);

    build_job(
        Candidate {
            line_number,
            line,
            address: split.address,
            resolution,
            timeframe,
            assigned_rep,
        },
        registry,
    )
}
