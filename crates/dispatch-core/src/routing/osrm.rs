use crate::config::ClientConfig;
use crate::error::DispatchError;
use crate::model::{Coordinates, RouteInfo};
use crate::routing::RouteProvider;
use reqwest::Client;
use serde::Deserialize;

const METERS_PER_MILE: f64 = 1609.344;

/// Route provider backed by an OSRM-compatible `/route/v1/driving` service.
pub struct OsrmRouter {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Meters.
    distance: f64,
    /// Seconds.
    duration: f64,
    #[serde(default)]
    geometry: Option<String>,
}

impl OsrmRouter {
    pub fn new(config: &ClientConfig) -> Result<Self, DispatchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout)
            .build()?;
        Ok(OsrmRouter {
            client,
            base_url: config.router_url.clone(),
        })
    }
}

impl RouteProvider for OsrmRouter {
    async fn fetch_route(&self, coordinates: &[Coordinates]) -> Result<RouteInfo, DispatchError> {
        if coordinates.len() < 2 {
            return Err(DispatchError::Routing(
                "at least two points are needed for a route".into(),
            ));
        }
        let url = route_url(&self.base_url, coordinates);
        // OSRM answers errors with a JSON body, so read it before checking status.
        let body = self.client.get(url).send().await?.text().await?;
        parse_route(&body, coordinates)
    }

    fn backend_name(&self) -> &str {
        "osrm"
    }
}

fn route_url(base: &str, coordinates: &[Coordinates]) -> String {
    // OSRM takes lng,lat pairs.
    let path = coordinates
        .iter()
        .map(|c| format!("{:.6},{:.6}", c.lng, c.lat))
        .collect::<Vec<_>>()
        .join(";");
    format!(
        "{}/route/v1/driving/{}?overview=full&geometries=polyline",
        base.trim_end_matches('/'),
        path
    )
}

fn parse_route(body: &str, coordinates: &[Coordinates]) -> Result<RouteInfo, DispatchError> {
    let response: RouteResponse = serde_json::from_str(body)
        .map_err(|e| DispatchError::Routing(format!("unreadable router response: {e}")))?;

    if response.code != "Ok" {
        let detail = response.message.unwrap_or_default();
        return Err(DispatchError::Routing(format!(
            "router returned {}: {}",
            response.code, detail
        )));
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| DispatchError::Routing("router returned no routes".into()))?;

    Ok(RouteInfo {
        distance: route.distance / METERS_PER_MILE,
        duration: route.duration / 60.0,
        geometry: route.geometry,
        coordinates: coordinates.to_vec(),
    })
}
