//! Nominatim (OpenStreetMap) HTTP adapter for geocoding.

use serde::Deserialize;

use crate::geocode::GeocodeError;
use crate::traits::Geocoder;

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying User-Agent.
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("route-planner/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }
}

impl Geocoder for NominatimClient {
    fn geocode(&self, query: &str) -> Result<Option<(f64, f64)>, GeocodeError> {
        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));

        let places = self
            .client
            .get(url)
            .query(&[("format", "json"), ("limit", "1"), ("q", query)])
            .send()?
            .error_for_status()?
            .json::<Vec<NominatimPlace>>()?;

        match places.first() {
            Some(place) => Ok(Some((parse_degrees(&place.lat)?, parse_degrees(&place.lon)?))),
            None => Ok(None),
        }
    }
}

/// Nominatim returns coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

fn parse_degrees(value: &str) -> Result<f64, GeocodeError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|degrees| degrees.is_finite())
        .ok_or_else(|| GeocodeError::InvalidCoordinate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_degrees() {
        assert_eq!(parse_degrees("52.5170365").unwrap(), 52.5170365);
        assert_eq!(parse_degrees(" -0.5 ").unwrap(), -0.5);
        assert!(matches!(parse_degrees("north"), Err(GeocodeError::InvalidCoordinate(_))));
        assert!(matches!(parse_degrees("NaN"), Err(GeocodeError::InvalidCoordinate(_))));
    }

    #[test]
    fn test_place_deserialize_ignores_extra_fields() {
        let body = r#"[{"place_id":1,"lat":"52.5","lon":"13.4","display_name":"Berlin"}]"#;
        let places: Vec<NominatimPlace> = serde_json::from_str(body).unwrap();
        assert_eq!(places[0].lat, "52.5");
        assert_eq!(places[0].lon, "13.4");
    }

    #[test]
    fn test_default_config() {
        let config = NominatimConfig::default();
        assert!(config.user_agent.starts_with("route-planner/"));
        assert_eq!(config.timeout_secs, 10);
    }
}
