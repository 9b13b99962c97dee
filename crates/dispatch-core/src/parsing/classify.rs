use regex::Regex;
use std::sync::LazyLock;

/// What a single line of pasted text is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    /// `Monday, December 15, 2025` and similar. Consumed silently.
    DateHeader,
    /// `1pm-3pm (3)`. Carries the time range, which becomes the timeframe
    /// for the lines that follow.
    SlotHeader(&'a str),
    /// Anything else: a line that may describe a job.
    Candidate(&'a str),
}

static DATE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday),?\s+(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+\d{1,2},\s*\d{4}",
    )
    .expect("date header regex")
});

/// Start and end hours with optional minutes; am/pm is required on at
/// least one side so house-number ranges like `10-12 W Main St` stay jobs.
static TIME_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    let clock = r"\d{1,2}(?::\d{2})?";
    let meridiem = r"(?:am|pm)";
    Regex::new(&format!(
        r"(?i)\b({clock}\s*{meridiem}\s*-\s*{clock}(?:\s*{meridiem})?|{clock}\s*-\s*{clock}\s*{meridiem})\b"
    ))
    .expect("time range regex")
});

static TRAILING_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*\d+\s*\)\s*$").expect("trailing count regex"));

/// Classify one line. The trailing count on a slot header is not checked
/// against the number of lines that follow.
pub fn classify_line(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }

    if is_date_header(trimmed) {
        return LineKind::DateHeader;
    }

    if let Some(range) = slot_range(trimmed) {
        return LineKind::SlotHeader(range);
    }

    LineKind::Candidate(trimmed)
}

fn is_date_header(line: &str) -> bool {
    DATE_HEADER.is_match(line) && line.split_whitespace().count() < 6
}

fn slot_range(line: &str) -> Option<&str> {
    if !TRAILING_COUNT.is_match(line) {
        return None;
    }
    let caps = TIME_RANGE.captures(line)?;
    Some(caps.get(1)?.as_str().trim())
}
