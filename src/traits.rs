//! Core domain traits for the route planner.
//!
//! These are intentionally minimal. Concrete apps can implement [`Stop`] for
//! their own data models or use [`crate::address::Address`].

use std::hash::Hash;

use crate::geocode::GeocodeError;
use crate::matrix::DistanceMatrix;

/// Unique identifier for planner entities.
pub trait Id: Clone + Eq + Hash {}

impl<T> Id for T where T: Clone + Eq + Hash {}

/// A point to visit.
pub trait Stop {
    type Id: Id;

    /// Opaque identity, used for equality only.
    fn id(&self) -> Option<&Self::Id>;

    /// Free-text description (address or name).
    fn label(&self) -> &str;

    /// Location coordinates (lat, lng), if geocoded.
    fn coordinates(&self) -> Option<(f64, f64)>;

    /// Two stops are the same location when their identities match. If
    /// either side has no identity, the labels must match exactly.
    fn same_location(&self, other: &Self) -> bool {
        match (self.id(), other.id()) {
            (Some(a), Some(b)) => a == b,
            _ => self.label() == other.label(),
        }
    }
}

/// Provides a distance matrix (kilometers) for a set of locations.
///
/// The matrix is indexed by the provided location order. A `None` location
/// is unreachable and must produce `f64::INFINITY` off the diagonal.
pub trait DistanceMatrixProvider {
    fn matrix_for(&self, locations: &[Option<(f64, f64)>]) -> DistanceMatrix;
}

/// Resolves free-text addresses to coordinates.
pub trait Geocoder {
    /// `Ok(None)` means the service had no match for the query.
    fn geocode(&self, query: &str) -> Result<Option<(f64, f64)>, GeocodeError>;
}
