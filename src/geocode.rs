//! Batch geocoding of addresses with a caller-owned cache.

use std::collections::HashMap;
use std::fmt;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::address::Address;
use crate::traits::{Geocoder, Stop};

#[derive(Debug)]
pub enum GeocodeError {
    Http(reqwest::Error),
    /// The service answered with coordinates that do not parse.
    InvalidCoordinate(String),
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodeError::Http(err) => write!(f, "geocoding request failed: {}", err),
            GeocodeError::InvalidCoordinate(value) => {
                write!(f, "geocoder returned invalid coordinate {:?}", value)
            }
        }
    }
}

impl std::error::Error for GeocodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeocodeError::Http(err) => Some(err),
            GeocodeError::InvalidCoordinate(_) => None,
        }
    }
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        GeocodeError::Http(err)
    }
}

/// Memoized query → (lat, lng) results. Only successful lookups are stored.
#[derive(Debug, Clone, Default)]
pub struct GeocodeCache {
    entries: HashMap<String, (f64, f64)>,
}

impl GeocodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, query: &str) -> Option<(f64, f64)> {
        self.entries.get(query).copied()
    }

    pub fn insert(&mut self, query: impl Into<String>, coordinates: (f64, f64)) {
        self.entries.insert(query.into(), coordinates);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Look up one query, consulting and filling `cache`.
pub fn geocode_cached<G>(
    query: &str,
    geocoder: &G,
    cache: &mut GeocodeCache,
) -> Result<Option<(f64, f64)>, GeocodeError>
where
    G: Geocoder,
{
    if let Some(hit) = cache.get(query) {
        return Ok(Some(hit));
    }

    let result = geocoder.geocode(query)?;
    if let Some(coordinates) = result {
        cache.insert(query, coordinates);
    }
    Ok(result)
}

/// Fill in coordinates for addresses that lack them.
///
/// Addresses with coordinates pass through unchanged. Labels not in `cache`
/// are looked up in parallel, once per distinct label. An address whose
/// lookup finds nothing or fails is returned without coordinates.
pub fn geocode_addresses<P, G>(
    addresses: Vec<Address<P>>,
    geocoder: &G,
    cache: &mut GeocodeCache,
) -> Vec<Address<P>>
where
    G: Geocoder + Sync,
{
    let mut pending: Vec<&str> = addresses
        .iter()
        .filter(|addr| addr.coordinates().is_none() && cache.get(&addr.address).is_none())
        .map(|addr| addr.address.as_str())
        .collect();
    pending.sort_unstable();
    pending.dedup();

    debug!(
        pending = pending.len(),
        cached = cache.len(),
        "geocoding addresses"
    );

    let resolved: Vec<(String, (f64, f64))> = pending
        .par_iter()
        .filter_map(|query| match geocoder.geocode(query) {
            Ok(Some(coordinates)) => Some((query.to_string(), coordinates)),
            Ok(None) => {
                debug!(query = *query, "no geocoding result");
                None
            }
            Err(err) => {
                warn!(query = *query, error = %err, "geocoding failed");
                None
            }
        })
        .collect();

    for (query, coordinates) in resolved {
        cache.insert(query, coordinates);
    }

    addresses
        .into_iter()
        .map(|addr| {
            if addr.coordinates().is_some() {
                return addr;
            }
            match cache.get(&addr.address) {
                Some((lat, lng)) => addr.with_coordinates(lat, lng),
                None => addr,
            }
        })
        .collect()
}
