use crate::geo::path_miles;
use crate::model::{Coordinates, Job, RouteInfo};
use crate::routing::sequence::{sequence, Stop};
use crate::routing::{Geocoder, RouteProvider};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// Something the dispatcher should be told about an optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RouteNotice {
    /// Some addresses could not be geocoded; they are kept at the end of
    /// their slot group.
    Unlocated { count: usize },
    /// No address could be geocoded, so no route was requested.
    NoLocations,
    /// The routing backend failed. The visiting order is still valid.
    RoutingFailed { message: String },
}

impl fmt::Display for RouteNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteNotice::Unlocated { count: 1 } => write!(f, "Could not locate 1 address"),
            RouteNotice::Unlocated { count } => write!(f, "Could not locate {count} addresses"),
            RouteNotice::NoLocations => write!(f, "Could not find locations for any stop"),
            RouteNotice::RoutingFailed { message } => write!(f, "Route unavailable: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    pub job: Job,
    pub coordinates: Option<Coordinates>,
}

/// Result of sequencing one rep's day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedRoute {
    /// Stops in visiting order.
    pub stops: Vec<RouteStop>,
    /// Driving route, when one could be computed.
    pub route: Option<RouteInfo>,
    /// Addresses the geocoder could not locate.
    pub failed_addresses: Vec<String>,
    /// Sum of straight-line legs between located stops, in miles.
    pub straight_line_miles: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<RouteNotice>,
}

impl OptimizedRoute {
    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.stops.iter().map(|s| &s.job)
    }

    pub fn failed_count(&self) -> usize {
        self.failed_addresses.len()
    }

    /// Located points in visiting order.
    pub fn located_points(&self) -> Vec<Coordinates> {
        self.stops.iter().filter_map(|s| s.coordinates).collect()
    }
}

/// Geocode, sequence and route one rep's jobs for the day.
///
/// Never fails: geocoding failures are counted per address and routing
/// failures only cost the route summary.
pub async fn optimize_route<G, R>(jobs: Vec<Job>, geocoder: &G, router: &R) -> OptimizedRoute
where
    G: Geocoder,
    R: RouteProvider,
{
    let queries: Vec<String> = jobs.iter().map(Job::geocode_query).collect();
    let mut results = geocoder.geocode(&queries).await;
    if results.len() != jobs.len() {
        warn!(
            backend = geocoder.backend_name(),
            expected = jobs.len(),
            got = results.len(),
            "geocoder returned the wrong number of results"
        );
        results.resize(jobs.len(), None);
    }

    let failed_addresses: Vec<String> = queries
        .iter()
        .zip(&results)
        .filter(|(_, r)| r.is_none())
        .map(|(q, _)| q.clone())
        .collect();
    for address in &failed_addresses {
        warn!(backend = geocoder.backend_name(), address = %address, "could not locate address");
    }

    let order = {
        let stops: Vec<Stop<'_>> = jobs
            .iter()
            .zip(&results)
            .map(|(job, coordinates)| Stop {
                job,
                coordinates: *coordinates,
            })
            .collect();
        sequence(&stops)
    };

    let mut slots: Vec<Option<(Job, Option<Coordinates>)>> =
        jobs.into_iter().zip(results).map(Some).collect();
    let stops: Vec<RouteStop> = order
        .into_iter()
        .filter_map(|i| slots[i].take())
        .map(|(job, coordinates)| RouteStop { job, coordinates })
        .collect();

    let points: Vec<Coordinates> = stops.iter().filter_map(|s| s.coordinates).collect();
    let mut notices = Vec::new();
    if !failed_addresses.is_empty() {
        notices.push(RouteNotice::Unlocated {
            count: failed_addresses.len(),
        });
    }

    let route = match points.len() {
        0 => {
            notices.push(RouteNotice::NoLocations);
            None
        }
        1 => Some(RouteInfo::single_point(points[0])),
        _ => match router.fetch_route(&points).await {
            Ok(route) => Some(route),
            Err(e) => {
                warn!(backend = router.backend_name(), error = %e, "routing failed");
                notices.push(RouteNotice::RoutingFailed {
                    message: e.to_string(),
                });
                None
            }
        },
    };

    let straight_line_miles = path_miles(&points);
    info!(
        stops = stops.len(),
        located = points.len(),
        failed = failed_addresses.len(),
        routed = route.is_some(),
        "optimized route"
    );

    OptimizedRoute {
        stops,
        route,
        failed_addresses,
        straight_line_miles,
        notices,
    }
}
