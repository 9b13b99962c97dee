//! Integration tests for the ingest → sequence → publish pipeline.
//!
//! Uses a MockGeocoder and MockRouter keyed on street addresses, so these
//! tests never touch the network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use dispatch_core::error::DispatchError;
use dispatch_core::model::{Coordinates, Job, RouteInfo};
use dispatch_core::registry::Registry;
use dispatch_core::schedule::Board;
use dispatch_core::{
    optimize_route, parse_text, Geocoder, RouteBoard, RouteNotice, RouteProvider,
};

struct MockGeocoder {
    places: Vec<(&'static str, Coordinates)>,
    delay: Duration,
}

impl MockGeocoder {
    fn new(places: Vec<(&'static str, Coordinates)>) -> Self {
        MockGeocoder {
            places,
            delay: Duration::ZERO,
        }
    }
}

impl Geocoder for MockGeocoder {
    async fn geocode(&self, addresses: &[String]) -> Vec<Option<Coordinates>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        addresses
            .iter()
            .map(|query| {
                self.places
                    .iter()
                    .find(|(street, _)| query.starts_with(street))
                    .map(|(_, point)| *point)
            })
            .collect()
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

#[derive(Default)]
struct MockRouter {
    fail: bool,
    calls: AtomicUsize,
}

impl RouteProvider for MockRouter {
    async fn fetch_route(&self, coordinates: &[Coordinates]) -> Result<RouteInfo, DispatchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DispatchError::Routing("service unavailable".into()));
        }
        Ok(RouteInfo {
            distance: 12.5,
            duration: 30.0,
            geometry: Some("_p~iF~ps|U".into()),
            coordinates: coordinates.to_vec(),
        })
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

fn registry() -> Registry {
    Registry::preset("phoenix").unwrap()
}

fn jobs(text: &str) -> Vec<Job> {
    let parsed = parse_text(text, &registry());
    assert!(parsed.skipped_lines.is_empty(), "{:?}", parsed.skipped_lines);
    parsed.jobs
}

const END_TO_END: &str = "\
1pm-3pm (3)
PEORIA ## (Old Roof, Intent) 31yrs Tile 1 1,980sq 85382 - 17442 N 84th Dr
CAVE CREEK # (29yr Tile Roof) 29yrs Tile 1 2,329sq. 85331 - 29002 N 48th Ct - Dec 9, 2025
GLENDALE # (Built 1962) 25+yrs Flat 1 2,183sq. 85301 - 5548 West Belmont Avenue - 12/10/2025 09:51 AM";

const LINE_OF_THREE: &str = "\
1pm-3pm (3)
MESA 85201 - 100 A St
MESA 85201 - 300 C St
MESA 85201 - 200 B St";

fn line_of_three_places() -> Vec<(&'static str, Coordinates)> {
    vec![
        ("100 A St", Coordinates::new(0.0, 0.0)),
        ("300 C St", Coordinates::new(0.0, 10.0)),
        ("200 B St", Coordinates::new(0.0, 1.0)),
    ]
}

// ---------------------------------------------------------------------------
// Ingestion
// ---------------------------------------------------------------------------

#[test]
fn end_to_end_block_yields_three_jobs() {
    let parsed = parse_text(END_TO_END, &registry());
    let cities: Vec<&str> = parsed.jobs.iter().map(|j| j.city.as_str()).collect();
    assert_eq!(cities, vec!["PEORIA", "CAVE CREEK", "GLENDALE"]);
    for job in &parsed.jobs {
        assert_eq!(job.original_timeframe.as_deref(), Some("1pm-3pm"));
    }
    let addresses: Vec<&str> = parsed.jobs.iter().map(|j| j.address.as_str()).collect();
    assert_eq!(
        addresses,
        vec!["17442 N 84th Dr", "29002 N 48th Ct", "5548 West Belmont Avenue"]
    );
    assert_eq!(parsed.jobs[0].zip_code.as_deref(), Some("85382"));
    assert_eq!(parsed.jobs[0].tags.priority, 2);
    assert_eq!(parsed.jobs[0].tags.age_years, Some(31));
    assert_eq!(parsed.jobs[2].tags.square_feet, Some(2183));
}

#[test]
fn parsing_is_deterministic() {
    let a = parse_text(END_TO_END, &registry());
    let b = parse_text(END_TO_END, &registry());
    assert_eq!(a, b);
}

#[test]
fn empty_and_garbage_input_yield_nothing() {
    for text in ["", "\n\n   \n", "Monday, December 15, 2025\n8am-10am (0)", "!!! ??? ..."] {
        assert!(parse_text(text, &registry()).jobs.is_empty(), "{text:?}");
    }
}

#[test]
fn rejected_line_does_not_stop_the_block() {
    let text = "\
1pm-3pm (2)
CAVE CREEK 2,329sq 85331
MESA 85201 - 123 W Main St";
    let parsed = parse_text(text, &registry());
    assert_eq!(parsed.jobs.len(), 1);
    assert_eq!(parsed.skipped_lines.len(), 1);
    assert_eq!(parsed.jobs[0].city, "MESA");
}

// ---------------------------------------------------------------------------
// Sequencing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn nearest_neighbor_visits_near_point_first() {
    let geocoder = MockGeocoder::new(line_of_three_places());
    let router = MockRouter::default();
    let result = optimize_route(jobs(LINE_OF_THREE), &geocoder, &router).await;

    let order: Vec<&str> = result.jobs().map(|j| j.address.as_str()).collect();
    assert_eq!(order, vec!["100 A St", "200 B St", "300 C St"]);
    assert_eq!(result.failed_count(), 0);
    assert!(result.notices.is_empty());
    assert_eq!(router.calls.load(Ordering::SeqCst), 1);
    assert_eq!(result.route.as_ref().map(|r| r.distance), Some(12.5));
}

#[tokio::test]
async fn partial_geocode_appends_failed_job() {
    let text = "\
1pm-3pm (4)
MESA 85201 - 100 A St
MESA 85201 - 400 Lost Ln
MESA 85201 - 300 C St
MESA 85201 - 200 B St";
    let geocoder = MockGeocoder::new(line_of_three_places());
    let router = MockRouter::default();
    let result = optimize_route(jobs(text), &geocoder, &router).await;

    let order: Vec<&str> = result.jobs().map(|j| j.address.as_str()).collect();
    assert_eq!(order, vec!["100 A St", "200 B St", "300 C St", "400 Lost Ln"]);
    assert_eq!(result.failed_count(), 1);
    assert_eq!(result.failed_addresses, vec!["400 Lost Ln, MESA, 85201"]);
    assert_eq!(result.notices, vec![RouteNotice::Unlocated { count: 1 }]);
    assert!(result.stops[3].coordinates.is_none());
}

#[tokio::test]
async fn slot_groups_run_in_chronological_order() {
    let text = "\
1pm-3pm (1)
MESA 85201 - 100 A St
8am-10am (2)
MESA 85201 - 300 C St
MESA 85201 - 200 B St";
    let geocoder = MockGeocoder::new(line_of_three_places());
    let router = MockRouter::default();
    let result = optimize_route(jobs(text), &geocoder, &router).await;

    let order: Vec<&str> = result.jobs().map(|j| j.address.as_str()).collect();
    assert_eq!(order, vec!["300 C St", "200 B St", "100 A St"]);
}

#[tokio::test]
async fn no_locations_skips_router() {
    let geocoder = MockGeocoder::new(vec![]);
    let router = MockRouter::default();
    let result = optimize_route(jobs(LINE_OF_THREE), &geocoder, &router).await;

    assert_eq!(result.stops.len(), 3);
    assert_eq!(result.failed_count(), 3);
    assert!(result.route.is_none());
    assert!(result.notices.contains(&RouteNotice::NoLocations));
    assert_eq!(router.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn single_location_is_zero_length_route() {
    let geocoder = MockGeocoder::new(vec![("200 B St", Coordinates::new(33.4, -111.8))]);
    let router = MockRouter::default();
    let result = optimize_route(jobs(LINE_OF_THREE), &geocoder, &router).await;

    let route = result.route.unwrap();
    assert_eq!(route.distance, 0.0);
    assert_eq!(route.coordinates, vec![Coordinates::new(33.4, -111.8)]);
    assert_eq!(result.straight_line_miles, 0.0);
    assert_eq!(router.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn routing_failure_keeps_order() {
    let geocoder = MockGeocoder::new(line_of_three_places());
    let router = MockRouter {
        fail: true,
        ..Default::default()
    };
    let result = optimize_route(jobs(LINE_OF_THREE), &geocoder, &router).await;

    let order: Vec<&str> = result.jobs().map(|j| j.address.as_str()).collect();
    assert_eq!(order, vec!["100 A St", "200 B St", "300 C St"]);
    assert!(result.route.is_none());
    assert!(matches!(
        result.notices.as_slice(),
        [RouteNotice::RoutingFailed { .. }]
    ));
    assert!(result.straight_line_miles > 0.0);
}

// ---------------------------------------------------------------------------
// Board and publication
// ---------------------------------------------------------------------------

#[tokio::test]
async fn optimized_order_applied_to_board() {
    let mut board = Board::new();
    let parsed = jobs(LINE_OF_THREE);
    let ids: Vec<_> = parsed.iter().map(|j| j.id).collect();
    board.add_jobs(parsed).unwrap();
    board.add_rep(dispatch_core::model::Rep::new("r1", "Dana"));
    for id in &ids {
        board.assign(*id, "r1", "slot-3").unwrap();
    }

    let input: Vec<Job> = board.rep_jobs("r1").unwrap().into_iter().cloned().collect();
    let geocoder = MockGeocoder::new(line_of_three_places());
    let result = optimize_route(input, &geocoder, &MockRouter::default()).await;
    board.apply_route("r1", &result).unwrap();

    let order: Vec<&str> = board
        .rep_jobs("r1")
        .unwrap()
        .iter()
        .map(|j| j.address.as_str())
        .collect();
    assert_eq!(order, vec!["100 A St", "200 B St", "300 C St"]);
}

#[tokio::test]
async fn last_completed_run_wins() {
    let board = RouteBoard::new();
    let router = MockRouter::default();

    let mut slow = MockGeocoder::new(vec![
        ("100 A St", Coordinates::new(0.0, 0.0)),
        ("200 B St", Coordinates::new(0.0, 2.0)),
    ]);
    slow.delay = Duration::from_millis(50);
    let fast = MockGeocoder::new(vec![
        ("100 A St", Coordinates::new(0.0, 0.0)),
        ("200 B St", Coordinates::new(0.0, 1.0)),
    ]);

    let (first, second) = tokio::join!(
        board.optimize("r1", jobs(LINE_OF_THREE), &slow, &router),
        board.optimize("r1", jobs(LINE_OF_THREE), &fast, &router),
    );

    assert!(first.revision > second.revision);
    let current = board.current("r1").unwrap();
    assert_eq!(current.revision, first.revision);
    assert!(current.route.straight_line_miles > second.route.straight_line_miles);
}
