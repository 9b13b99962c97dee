use regex::Regex;
use std::sync::LazyLock;

const MONTH: &str = r"(?i:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";
const WEEKDAY: &str = r"(?i:mon(?:day)?|tue(?:s(?:day)?)?|wed(?:nesday)?|thu(?:r(?:s(?:day)?)?)?|fri(?:day)?|sat(?:urday)?|sun(?:day)?)";

/// Trailing ` - <date> [<time>] [<TZ>]` metadata left by the portal export.
static PASTED_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    let date = format!(
        r"(?:{WEEKDAY},?\s+{MONTH}\s+\d{{1,2}},?\s+\d{{4}}|\d{{1,2}}/\d{{1,2}}/\d{{4}}|\d{{4}}-\d{{2}}-\d{{2}}|{MONTH}\s+\d{{1,2}},?\s+\d{{4}})"
    );
    let pattern = format!(
        r"\s*-\s*{date}(?:,?\s+(?i:at\s+)?\d{{1,2}}:\d{{2}}(?::\d{{2}})?(?:\s*(?i:am|pm))?)?(?:\s+[A-Z]{{3,4}})?\s*$"
    );
    Regex::new(&pattern).expect("pasted timestamp regex")
});

/// `-> Rep Name` fragment naming the rep a job was handed to.
static REP_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*->\s*([A-Za-z][A-Za-z.']*(?:\s+[A-Za-z][A-Za-z.']*)*)")
        .expect("rep fragment regex")
});

/// Remove trailing pasted date/time metadata.
///
/// Runs before address extraction: the digits in the date would otherwise
/// look like a house number.
pub fn strip_timestamp(line: &str) -> &str {
    match PASTED_TIMESTAMP.find(line) {
        Some(m) => line[..m.start()].trim_end(),
        None => line,
    }
}

/// Pull a `-> Rep Name` fragment out of the line.
///
/// Returns the line with the fragment removed and the rep name, if any.
pub fn take_rep(line: &str) -> (String, Option<String>) {
    let Some(caps) = REP_FRAGMENT.captures(line) else {
        return (line.to_string(), None);
    };
    let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
        return (line.to_string(), None);
    };

    let rest = format!("{} {}", &line[..whole.start()], &line[whole.end()..]);
    let rest = rest.split_whitespace().collect::<Vec<_>>().join(" ");
    (rest, Some(name.as_str().trim().to_string()))
}
