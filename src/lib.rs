//! route-planner
//!
//! Orders a set of geocoded stops into a short visiting sequence using a
//! nearest-neighbor construction refined by 2-opt, plus the geocoding and
//! itinerary helpers around it.

pub mod traits;
pub mod address;
pub mod matrix;
pub mod haversine;
pub mod solver;
pub mod geocode;
pub mod nominatim;
pub mod itinerary;
pub mod polyline;
