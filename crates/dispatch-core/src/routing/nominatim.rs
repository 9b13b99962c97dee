use crate::config::ClientConfig;
use crate::error::DispatchError;
use crate::model::Coordinates;
use crate::routing::Geocoder;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Geocoder backed by a Nominatim-compatible `/search` endpoint.
///
/// Requests go out one at a time with a fixed pause between them; public
/// Nominatim allows one request per second.
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
    delay: Duration,
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new(config: &ClientConfig) -> Result<Self, DispatchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout)
            .build()?;
        Ok(NominatimGeocoder {
            client,
            base_url: config.geocoder_url.clone(),
            delay: config.geocode_delay,
        })
    }

    async fn lookup(&self, address: &str) -> Result<Option<Coordinates>, DispatchError> {
        let url = search_url(&self.base_url, address)?;
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_places(&body)
    }
}

impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, addresses: &[String]) -> Vec<Option<Coordinates>> {
        let mut results = Vec::with_capacity(addresses.len());
        for (i, address) in addresses.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            let result = match self.lookup(address).await {
                Ok(found) => {
                    debug!(address = %address, found = found.is_some(), "geocoded");
                    found
                }
                Err(e) => {
                    warn!(address = %address, error = %e, "geocoder request failed");
                    None
                }
            };
            results.push(result);
        }
        results
    }

    fn backend_name(&self) -> &str {
        "nominatim"
    }
}

fn search_url(base: &str, address: &str) -> Result<Url, DispatchError> {
    Url::parse_with_params(
        &format!("{}/search", base.trim_end_matches('/')),
        &[("q", address), ("format", "json"), ("limit", "1")],
    )
    .map_err(|e| DispatchError::Geocode(format!("bad geocoder URL '{base}': {e}")))
}

/// First hit of a search response, if any.
fn parse_places(body: &str) -> Result<Option<Coordinates>, DispatchError> {
    let places: Vec<Place> = serde_json::from_str(body)?;
    let Some(place) = places.first() else {
        return Ok(None);
    };
    let lat = place.lat.trim().parse::<f64>();
    let lng = place.lon.trim().parse::<f64>();
    match (lat, lng) {
        (Ok(lat), Ok(lng)) => Ok(Some(Coordinates::new(lat, lng))),
        _ => Err(DispatchError::Geocode(format!(
            "unreadable coordinates '{}', '{}'",
            place.lat, place.lon
        ))),
    }
}
