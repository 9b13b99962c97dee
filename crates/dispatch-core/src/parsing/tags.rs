use crate::model::JobTags;
use crate::registry::Registry;
use regex::Regex;
use std::sync::LazyLock;

pub(crate) static STORIES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d+)s\b").expect("stories regex"));
pub(crate) static SQUARE_FEET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d[\d,]*)\s*sq").expect("square feet regex"));
pub(crate) static AGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\+?\s*yrs?\b").expect("age regex"));

/// Recover structured markers from a job's notes.
pub fn extract_tags(notes: &str, registry: &Registry) -> JobTags {
    let mut keywords: Vec<String> = Vec::new();
    for m in registry.keywords().find_iter(notes) {
        let kw = m.as_str().to_lowercase();
        if !keywords.contains(&kw) {
            keywords.push(kw);
        }
    }

    JobTags {
        keywords,
        stories: first_number(&STORIES, notes),
        square_feet: first_number(&SQUARE_FEET, notes),
        age_years: first_number(&AGE, notes),
        priority: notes.matches('#').count().min(u8::MAX as usize) as u8,
    }
}

fn first_number(re: &Regex, text: &str) -> Option<u32> {
    let caps = re.captures(text)?;
    let digits: String = caps.get(1)?.as_str().chars().filter(|c| *c != ',').collect();
    digits.parse().ok()
}
