pub mod config;
pub mod error;
pub mod export;
pub mod extraction;
pub mod geo;
pub mod model;
pub mod parsing;
pub mod registry;
pub mod routing;
pub mod schedule;
pub mod trace;

pub use parsing::{parse_jobs, ParsedJobs};
pub use routing::board::RouteBoard;
pub use routing::optimize::{optimize_route, OptimizedRoute, RouteNotice, RouteStop};
pub use routing::{Geocoder, RouteProvider};

use error::DispatchError;
use registry::Registry;

/// Main API entry point: turn pasted listing text into jobs.
pub fn parse_text(text: &str, registry: &Registry) -> ParsedJobs {
    parse_jobs(text, registry)
}

/// Parse the first sheet of an xlsx workbook the same way as pasted text.
pub fn parse_xlsx(bytes: &[u8], registry: &Registry) -> Result<ParsedJobs, DispatchError> {
    let text = extraction::xlsx::workbook_text(bytes)?;
    Ok(parse_jobs(&text, registry))
}
