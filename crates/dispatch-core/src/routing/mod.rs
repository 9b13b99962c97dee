pub mod board;
pub mod nominatim;
pub mod optimize;
pub mod osrm;
pub mod sequence;

use crate::error::DispatchError;
use crate::model::{Coordinates, RouteInfo};
use std::future::Future;

/// Address lookup backend.
pub trait Geocoder: Send + Sync {
    /// Look up every address. Returns one entry per input, in order; `None`
    /// marks an address that could not be located. A failed lookup never
    /// fails the batch.
    fn geocode(
        &self,
        addresses: &[String],
    ) -> impl Future<Output = Vec<Option<Coordinates>>> + Send;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Driving-route backend. Only called with two or more points.
pub trait RouteProvider: Send + Sync {
    fn fetch_route(
        &self,
        coordinates: &[Coordinates],
    ) -> impl Future<Output = Result<RouteInfo, DispatchError>> + Send;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
