//! Polyline representation for drawing a route on a map.
//!
//! Points are stored decoded. Encoding to a compact format, if a frontend
//! wants one, happens at the API boundary.

use serde::{Deserialize, Serialize};

use crate::haversine::haversine_km;

/// A route path as (latitude, longitude) points in visiting order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    pub fn push(&mut self, point: (f64, f64)) {
        self.points.push(point);
    }

    /// Great-circle length of the path in kilometers.
    pub fn length_km(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| haversine_km(pair[0], pair[1]))
            .sum()
    }

    /// (min_lat, min_lng, max_lat, max_lng), or `None` for an empty path.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let (&first, rest) = self.points.split_first()?;
        let init = (first.0, first.1, first.0, first.1);
        Some(rest.iter().fold(init, |(min_lat, min_lng, max_lat, max_lng), &(lat, lng)| {
            (min_lat.min(lat), min_lng.min(lng), max_lat.max(lat), max_lng.max(lng))
        }))
    }
}
