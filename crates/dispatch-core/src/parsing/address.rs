use regex::Regex;
use std::sync::LazyLock;

/// A house number followed by a capitalised word.
static HOUSE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\s+[A-Z]").expect("house number regex"));

/// A job line split around its street address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSplit<'a> {
    /// Everything before the address: city, notes, zip.
    pub head: &'a str,
    /// From the house number to end of line. `None` when the line has no
    /// house-number anchor and the address must come from the notes.
    pub address: Option<&'a str>,
}

/// Split a job line at the last house-number anchor.
///
/// Lines pack zip codes, square footage, ages and story counts before the
/// street address, so the last anchor is taken, not the first. A line whose
/// address carries a unit number followed by a capitalised word after the
/// real house number will split at the unit number.
pub fn split_address(line: &str) -> AddressSplit<'_> {
    match HOUSE_NUMBER.find_iter(line).last() {
        Some(m) => {
            let head = line[..m.start()].trim_end();
            let head = head.trim_end_matches(['-', ' ']).trim_end();
            AddressSplit {
                head,
                address: Some(line[m.start()..].trim()),
            }
        }
        None => AddressSplit {
            head: line.trim(),
            address: None,
        },
    }
}
