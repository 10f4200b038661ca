//! German city locations for realistic test fixtures.
//!
//! Coordinates are city centres, rounded to four decimals.

use route_planner::address::JsonAddress;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

pub const CITIES: &[Location] = &[
    Location::new("Berlin", 52.52, 13.405),
    Location::new("Hamburg", 53.5511, 9.9937),
    Location::new("Munich", 48.1351, 11.582),
    Location::new("Cologne", 50.9375, 6.9603),
    Location::new("Frankfurt", 50.1109, 8.6821),
    Location::new("Stuttgart", 48.7758, 9.1829),
    Location::new("Dusseldorf", 51.2277, 6.7735),
    Location::new("Leipzig", 51.3397, 12.3731),
    Location::new("Dresden", 51.0504, 13.7373),
    Location::new("Hanover", 52.3759, 9.732),
    Location::new("Nuremberg", 49.4521, 11.0767),
    Location::new("Bremen", 53.0793, 8.8017),
];

/// Addresses for the first `count` cities, ids starting at 1.
pub fn city_addresses(count: usize) -> Vec<JsonAddress> {
    CITIES
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, city)| {
            let (lat, lng) = city.coords();
            JsonAddress::new(format!("{}, Germany", city.name))
                .with_id(i as i64 + 1)
                .with_coordinates(lat, lng)
        })
        .collect()
}
