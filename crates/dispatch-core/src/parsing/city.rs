use crate::parsing::tags::{AGE, SQUARE_FEET, STORIES};
use crate::registry::Registry;

/// City, notes and zip recovered from the part of a job line before the address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Uppercase, no digits. Empty when nothing usable was found.
    pub city: String,
    pub notes: String,
    pub zip_code: Option<String>,
}

/// Split the non-address part of a line into city, notes and zip.
///
/// The gazetteer is tried first; if no known city prefixes the text, the
/// city is whatever precedes the first tag-like token.
pub fn resolve(head: &str, registry: &Registry) -> Resolution {
    let head = head.trim();
    let (city, notes) = match match_gazetteer(head, registry) {
        Some(len) => {
            let rest = head[len..].trim_start_matches([',', '.', ' ']);
            (head[..len].to_string(), rest)
        }
        None => match first_tag_position(head, registry) {
            Some(pos) => (head[..pos].to_string(), &head[pos..]),
            None => (head.to_string(), ""),
        },
    };

    let zip_code = find_zip(head);
    let (city, notes) = match &zip_code {
        Some(zip) => (remove_token(&city, zip), remove_token(notes, zip)),
        None => (city, notes.to_string()),
    };

    Resolution {
        city: clean_city(&city),
        notes: clean_notes(&notes),
        zip_code,
    }
}

/// Byte length of the longest known city that prefixes `text`, ignoring case.
fn match_gazetteer(text: &str, registry: &Registry) -> Option<usize> {
    registry.cities().iter().find_map(|city| {
        let len = city.len();
        if !text.is_char_boundary(len) || text[..len].to_lowercase() != *city {
            return None;
        }
        match text[len..].chars().next() {
            Some(c) if c.is_alphanumeric() => None,
            _ => Some(len),
        }
    })
}

/// Start of the earliest tag keyword, stories, square-footage, age or
/// priority token. An opening parenthesis directly before it goes with the notes.
fn first_tag_position(text: &str, registry: &Registry) -> Option<usize> {
    let pos = [
        registry.keywords().find(text).map(|m| m.start()),
        STORIES.find(text).map(|m| m.start()),
        SQUARE_FEET.find(text).map(|m| m.start()),
        AGE.find(text).map(|m| m.start()),
        text.find('#'),
    ]
    .into_iter()
    .flatten()
    .min()?;

    if text[..pos].ends_with('(') {
        Some(pos - 1)
    } else {
        Some(pos)
    }
}

fn trim_token(token: &str) -> &str {
    token.trim_matches(|c: char| c.is_ascii_punctuation())
}

/// First whitespace-delimited token that is exactly five digits.
pub fn find_zip(text: &str) -> Option<String> {
    text.split_whitespace()
        .map(trim_token)
        .find(|t| t.len() == 5 && t.bytes().all(|b| b.is_ascii_digit()))
        .map(str::to_string)
}

/// Drop standalone occurrences of `token`. Numbers that merely contain it
/// are left alone.
fn remove_token(text: &str, token: &str) -> String {
    text.split_whitespace()
        .filter(|t| trim_token(t) != token)
        .collect::<Vec<_>>()
        .join(" ")
}

fn clean_city(city: &str) -> String {
    let no_digits: String = city.chars().filter(|c| !c.is_ascii_digit()).collect();
    no_digits
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace())
        .to_uppercase()
}

fn clean_notes(notes: &str) -> String {
    notes
        .trim_matches(|c: char| c == '-' || c.is_whitespace())
        .to_string()
}
