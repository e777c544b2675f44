use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::{GeocodeError, Geocoder};
use crate::geo::{BoundingBox, GeoResult};

const GOOGLE_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GMAPS_API_KEY";

/// Google Geocoding API backend.
pub struct GoogleGeocoder {
    api_key: String,
    http_client: ureq::Agent,
}

impl GoogleGeocoder {
    pub fn new(api_key: impl Into<String>) -> Self {
        let http_client = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(5))
            .timeout_read(Duration::from_secs(15))
            .timeout_write(Duration::from_secs(15))
            .build();

        Self {
            api_key: api_key.into(),
            http_client,
        }
    }
}

impl Geocoder for GoogleGeocoder {
    fn geocode(&self, query: &str, bias: &BoundingBox) -> Result<Vec<GeoResult>, GeocodeError> {
        info!(query, "querying geocoder");

        let request = self
            .http_client
            .get(GOOGLE_GEOCODE_URL)
            .set("Accept", "application/json")
            .query("address", query)
            .query("bounds", &bounds_param(bias))
            .query("key", &self.api_key);

        // Rejected queries may come back as HTTP 400 with a regular body.
        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(error) => return Err(GeocodeError::Transport(error.to_string())),
        };

        let body: GoogleResponse = response
            .into_json()
            .map_err(|error| GeocodeError::Transport(format!("Invalid JSON response: {error}")))?;

        parse_response(body)
    }
}

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    status: String,
    #[serde(default)]
    results: Vec<Value>,
    #[serde(default)]
    error_message: Option<String>,
}

/// `south,west|north,east` viewport bias.
fn bounds_param(bias: &BoundingBox) -> String {
    let (min_lat, min_long, max_lat, max_long) = bias.extents();
    format!("{min_lat},{min_long}|{max_lat},{max_long}")
}

fn parse_response(body: GoogleResponse) -> Result<Vec<GeoResult>, GeocodeError> {
    let detail = || body.error_message.clone().unwrap_or_else(|| body.status.clone());

    match body.status.as_str() {
        "OK" => body
            .results
            .iter()
            .map(|result| {
                let location = result.pointer("/geometry/location");
                let lat = location.and_then(|l| l.get("lat")).and_then(Value::as_f64);
                let lng = location.and_then(|l| l.get("lng")).and_then(Value::as_f64);
                match (lat, lng) {
                    (Some(lat), Some(lng)) => Ok(GeoResult::new(lat, lng, result.to_string())),
                    _ => Err(GeocodeError::Transport(format!(
                        "Result without geometry.location: {result}"
                    ))),
                }
            })
            .collect(),
        "ZERO_RESULTS" => Ok(Vec::new()),
        "INVALID_REQUEST" => Err(GeocodeError::QuerySyntax(detail())),
        _ => Err(GeocodeError::Transport(detail())),
    }
}
