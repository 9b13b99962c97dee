use crate::error::DispatchError;
use std::time::Duration;

/// Endpoints and limits for the HTTP geocoding and routing backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Nominatim-compatible search endpoint base.
    pub geocoder_url: String,
    /// OSRM-compatible route service base.
    pub router_url: String,
    /// Sent with every request; public Nominatim rejects anonymous clients.
    pub user_agent: String,
    pub request_timeout: Duration,
    /// Pause between consecutive geocoder requests.
    pub geocode_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            geocoder_url: "https://nominatim.openstreetmap.org".to_string(),
            router_url: "https://router.project-osrm.org".to_string(),
            user_agent: concat!("dispatch/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout: Duration::from_secs(15),
            geocode_delay: Duration::from_millis(1000),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `DISPATCH_*` environment variables.
    pub fn from_env() -> Result<Self, DispatchError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DispatchError> {
        let mut config = Self::default();

        if let Some(url) = lookup("DISPATCH_GEOCODER_URL") {
            config.geocoder_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = lookup("DISPATCH_ROUTER_URL") {
            config.router_url = url.trim_end_matches('/').to_string();
        }
        if let Some(agent) = lookup("DISPATCH_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Some(secs) = lookup("DISPATCH_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(parse_number("DISPATCH_TIMEOUT_SECS", &secs)?);
        }
        if let Some(ms) = lookup("DISPATCH_GEOCODE_DELAY_MS") {
            config.geocode_delay =
                Duration::from_millis(parse_number("DISPATCH_GEOCODE_DELAY_MS", &ms)?);
        }

        Ok(config)
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64, DispatchError> {
    value
        .trim()
        .parse()
        .map_err(|_| DispatchError::Config(format!("{key} must be a whole number, got '{value}'")))
}
