use dispatch_core::config::ClientConfig;
use dispatch_core::error::DispatchError;
use dispatch_core::export::gpx::route_to_gpx;
use dispatch_core::model::Job;
use dispatch_core::routing::nominatim::NominatimGeocoder;
use dispatch_core::routing::osrm::OsrmRouter;
use std::path::PathBuf;

use crate::output;

pub async fn run(
    jobs_file: PathBuf,
    output_format: &str,
    gpx_file: Option<PathBuf>,
) -> Result<(), DispatchError> {
    let content = std::fs::read_to_string(&jobs_file)?;
    let jobs: Vec<Job> = serde_json::from_str(&content)?;

    let config = ClientConfig::from_env()?;
    let geocoder = NominatimGeocoder::new(&config)?;
    let router = OsrmRouter::new(&config)?;

    let route = dispatch_core::optimize_route(jobs, &geocoder, &router).await;

    match output_format {
        "json" => output::json::print(&route)?,
        _ => output::table::print_route(&route),
    }

    if let Some(path) = gpx_file {
        let name = jobs_file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("route");
        std::fs::write(&path, route_to_gpx(&route, name)?)?;
        eprintln!("GPX written to {}", path.display());
    }

    Ok(())
}
