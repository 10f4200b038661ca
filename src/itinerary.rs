//! Leg-by-leg breakdown of an ordered route.
//!
//! Turns a visiting order into per-hop distances, flight times and CO2
//! estimates plus a drawable path. Stops without coordinates are skipped.

use serde::{Deserialize, Serialize};

use crate::haversine::haversine_km;
use crate::polyline::Polyline;
use crate::traits::Stop;

/// The traditional departure point.
pub const NORTH_POLE: (f64, f64) = (90.0, 0.0);

/// Sleigh emissions per kilometer flown.
pub const SLEIGH_CO2_KG_PER_KM: f64 = 0.045;

/// Extra emissions per kilogram of cargo per kilometer.
pub const CARGO_CO2_KG_PER_KG_KM: f64 = 0.001;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ItineraryOptions {
    /// Where the trip departs from before the first stop.
    pub origin: Option<(f64, f64)>,
    pub speed_kmh: f64,
    pub co2_kg_per_km: f64,
    pub cargo_co2_kg_per_kg_km: f64,
    pub cargo_kg: f64,
}

impl Default for ItineraryOptions {
    fn default() -> Self {
        Self {
            origin: None,
            speed_kmh: 1000.0,
            co2_kg_per_km: SLEIGH_CO2_KG_PER_KM,
            cargo_co2_kg_per_kg_km: CARGO_CO2_KG_PER_KG_KM,
            cargo_kg: 0.0,
        }
    }
}

impl ItineraryOptions {
    pub fn with_origin(mut self, origin: (f64, f64)) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_speed_kmh(mut self, speed_kmh: f64) -> Self {
        self.speed_kmh = speed_kmh;
        self
    }

    pub fn with_cargo_kg(mut self, cargo_kg: f64) -> Self {
        self.cargo_kg = cargo_kg;
        self
    }

    /// Emissions for flying `distance_km` with the configured cargo.
    pub fn co2_for(&self, distance_km: f64) -> f64 {
        distance_km * self.co2_kg_per_km + self.cargo_kg * distance_km * self.cargo_co2_kg_per_kg_km
    }
}

/// One hop of the trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    /// Position in the route of the stop this leg starts from; `None` for the origin.
    pub from: Option<usize>,
    /// Position in the route of the stop this leg arrives at.
    pub to: usize,
    pub distance_km: f64,
    pub duration_hours: f64,
    /// Distance flown from departure up to the end of this leg.
    pub cumulative_distance_km: f64,
    /// Emissions on arrival, from departure up to the end of this leg.
    pub co2_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    pub legs: Vec<Leg>,
    pub total_distance_km: f64,
    pub total_duration_hours: f64,
    pub total_co2_kg: f64,
    pub path: Polyline,
}

impl Itinerary {
    /// Plan legs along `route` in the given order.
    pub fn plan<S: Stop>(route: &[&S], options: &ItineraryOptions) -> Self {
        let mut legs = Vec::new();
        let mut path = Polyline::default();
        let mut cumulative = 0.0;

        let mut previous: Option<(Option<usize>, (f64, f64))> = options.origin.map(|origin| (None, origin));
        if let Some(origin) = options.origin {
            path.push(origin);
        }

        for (position, stop) in route.iter().enumerate() {
            let Some(point) = stop.coordinates() else {
                continue;
            };

            if let Some((from, from_point)) = previous {
                let distance_km = haversine_km(from_point, point);
                cumulative += distance_km;
                legs.push(Leg {
                    from,
                    to: position,
                    distance_km,
                    duration_hours: distance_km / options.speed_kmh,
                    cumulative_distance_km: cumulative,
                    co2_kg: options.co2_for(cumulative),
                });
            }

            path.push(point);
            previous = Some((Some(position), point));
        }

        Self {
            legs,
            total_distance_km: cumulative,
            total_duration_hours: cumulative / options.speed_kmh,
            total_co2_kg: options.co2_for(cumulative),
            path,
        }
    }
}

/// `"45m"` under an hour, otherwise `"2h"` or `"2h 30m"`.
pub fn format_flight_time(hours: f64) -> String {
    if hours < 1.0 {
        return format!("{}m", (hours * 60.0).round() as i64);
    }
    let whole = hours.floor();
    let minutes = ((hours - whole) * 60.0).round() as i64;
    if minutes > 0 {
        format!("{}h {}m", whole as i64, minutes)
    } else {
        format!("{}h", whole as i64)
    }
}

/// Grams under one kilogram, otherwise kilograms with one decimal.
pub fn format_co2(kg: f64) -> String {
    if kg < 1.0 {
        format!("{} g", (kg * 1000.0).round() as i64)
    } else {
        format!("{:.1} kg", kg)
    }
}
