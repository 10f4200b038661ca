//! Haversine distance matrix provider.
//!
//! Uses great-circle distance between coordinates. Locations without
//! coordinates are unreachable from everything else.

use crate::matrix::DistanceMatrix;
use crate::traits::DistanceMatrixProvider;

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two (lat, lng) points in kilometers.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Haversine-based distance matrix provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineMatrix;

impl DistanceMatrixProvider for HaversineMatrix {
    fn matrix_for(&self, locations: &[Option<(f64, f64)>]) -> DistanceMatrix {
        let n = locations.len();
        let mut matrix = DistanceMatrix::zeros(n);

        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate() {
                if i == j {
                    continue;
                }
                let km = match (from, to) {
                    (Some(from), Some(to)) => haversine_km(*from, *to),
                    _ => f64::INFINITY,
                };
                matrix.set(i, j, km);
            }
        }

        matrix
    }
}
