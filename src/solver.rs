//! Route solver: nearest-neighbor construction refined by 2-opt.
//!
//! Tours are carried as indices into the caller's stop slice, so every
//! distance lookup reads the matrix at the original input positions.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::haversine::HaversineMatrix;
use crate::matrix::DistanceMatrix;
use crate::traits::{DistanceMatrixProvider, Stop};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OptimizeOptions {
    /// Refine each constructed tour with 2-opt.
    pub use_two_opt: bool,
    /// Maximum 2-opt sweeps per tour.
    pub max_two_opt_sweeps: usize,
    /// How many leading input positions to try as a start when none is pinned.
    pub max_start_candidates: usize,
    /// Rank candidate tours by stops covered before distance. When off, a
    /// lone unreachable start (0 km) beats any longer tour.
    pub prefer_full_coverage: bool,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            use_two_opt: true,
            max_two_opt_sweeps: 100,
            max_start_candidates: 10,
            prefer_full_coverage: false,
        }
    }
}

impl OptimizeOptions {
    pub fn with_two_opt(mut self, enabled: bool) -> Self {
        self.use_two_opt = enabled;
        self
    }

    pub fn with_max_two_opt_sweeps(mut self, sweeps: usize) -> Self {
        self.max_two_opt_sweeps = sweeps;
        self
    }

    pub fn with_max_start_candidates(mut self, starts: usize) -> Self {
        self.max_start_candidates = starts;
        self
    }

    pub fn with_prefer_full_coverage(mut self, enabled: bool) -> Self {
        self.prefer_full_coverage = enabled;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", bound(serialize = "S: Serialize"))]
pub struct RouteResult<'a, S> {
    /// Stops in visiting order.
    #[serde(rename = "orderedStops")]
    pub route: Vec<&'a S>,
    /// Input positions of `route`.
    pub order: Vec<usize>,
    pub total_distance_km: f64,
    pub distance_matrix: DistanceMatrix,
    /// Number of start positions that were constructed and refined.
    pub starts_evaluated: usize,
    #[serde(skip)]
    input_len: usize,
}

impl<S> RouteResult<'_, S> {
    /// False when unreachable stops were left out of the route.
    pub fn is_complete(&self) -> bool {
        self.route.len() == self.input_len
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The requested start stop is not part of the input.
    InvalidStart,
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::InvalidStart => write!(f, "start address not found in addresses"),
        }
    }
}

impl std::error::Error for RouteError {}

/// Find a short route covering `stops`, using great-circle distances.
pub fn find_shortest_route<'a, S>(
    stops: &'a [S],
    start: Option<&S>,
    options: &OptimizeOptions,
) -> Result<RouteResult<'a, S>, RouteError>
where
    S: Stop,
{
    find_shortest_route_with(stops, start, options, &HaversineMatrix)
}

/// Find a short route covering `stops` with distances from `matrix_provider`.
///
/// With a `start`, only that stop is tried as the first stop. Without one,
/// the first `max_start_candidates` input positions are each tried and the
/// shortest tour is kept, the earliest start winning ties. With
/// `prefer_full_coverage` the tour covering the most stops wins first.
pub fn find_shortest_route_with<'a, S, M>(
    stops: &'a [S],
    start: Option<&S>,
    options: &OptimizeOptions,
    matrix_provider: &M,
) -> Result<RouteResult<'a, S>, RouteError>
where
    S: Stop,
    M: DistanceMatrixProvider,
{
    let start_index = match start {
        Some(start) => Some(
            stops
                .iter()
                .position(|stop| stop.same_location(start))
                .ok_or(RouteError::InvalidStart)?,
        ),
        None => None,
    };

    if stops.is_empty() {
        return Ok(RouteResult {
            route: Vec::new(),
            order: Vec::new(),
            total_distance_km: 0.0,
            distance_matrix: DistanceMatrix::default(),
            starts_evaluated: 0,
            input_len: 0,
        });
    }

    let locations: Vec<Option<(f64, f64)>> = stops.iter().map(|stop| stop.coordinates()).collect();
    let missing = locations.iter().filter(|location| location.is_none()).count();
    if missing > 0 {
        debug!(missing, total = stops.len(), "stops without coordinates are unreachable");
    }

    let matrix = matrix_provider.matrix_for(&locations);

    let candidates: Vec<usize> = match start_index {
        Some(index) => vec![index],
        None => (0..stops.len().min(options.max_start_candidates.max(1))).collect(),
    };

    let mut best: Option<(Vec<usize>, f64)> = None;
    for &candidate in &candidates {
        let tour = build_tour(&matrix, candidate, options);
        let distance = tour_distance(&tour, &matrix);
        debug!(start = candidate, distance, covered = tour.len(), "evaluated start");

        let better = match &best {
            Some((best_tour, best_distance)) => {
                if options.prefer_full_coverage {
                    covers_more_or_shorter(tour.len(), distance, best_tour.len(), *best_distance)
                } else {
                    distance < *best_distance
                }
            }
            None => true,
        };
        if better {
            best = Some((tour, distance));
        }
    }

    let (order, total_distance_km) = best.unwrap_or_default();
    let route = order.iter().map(|&index| &stops[index]).collect();

    Ok(RouteResult {
        route,
        order,
        total_distance_km,
        distance_matrix: matrix,
        starts_evaluated: candidates.len(),
        input_len: stops.len(),
    })
}

fn build_tour(matrix: &DistanceMatrix, start: usize, options: &OptimizeOptions) -> Vec<usize> {
    let tour = nearest_neighbor(matrix, start);
    if options.use_two_opt {
        two_opt(tour, matrix, options.max_two_opt_sweeps)
    } else {
        tour
    }
}

fn covers_more_or_shorter(covered: usize, distance: f64, best_covered: usize, best_distance: f64) -> bool {
    if covered != best_covered {
        return covered > best_covered;
    }
    distance < best_distance
}

/// Sum of consecutive-pair distances along `tour`.
pub fn tour_distance(tour: &[usize], matrix: &DistanceMatrix) -> f64 {
    tour.windows(2).map(|pair| matrix.get(pair[0], pair[1])).sum()
}

// ============================================================================
// Construction
// ============================================================================

/// Greedy tour from `start`, always moving to the closest unvisited stop.
///
/// Ties go to the lowest input index. Stops that are only reachable over
/// infinite edges end the tour early, so the result may be partial. A
/// `start` outside the matrix yields an empty tour.
pub fn nearest_neighbor(matrix: &DistanceMatrix, start: usize) -> Vec<usize> {
    let n = matrix.len();
    if start >= n {
        return Vec::new();
    }
    if n == 1 {
        return vec![start];
    }

    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n);
    visited[start] = true;
    tour.push(start);

    let mut current = start;
    while tour.len() < n {
        let mut nearest: Option<usize> = None;
        let mut min_distance = f64::INFINITY;

        for (candidate, &seen) in visited.iter().enumerate() {
            if !seen && matrix.get(current, candidate) < min_distance {
                min_distance = matrix.get(current, candidate);
                nearest = Some(candidate);
            }
        }

        let Some(next) = nearest else {
            debug!(covered = tour.len(), total = n, "remaining stops unreachable");
            break;
        };

        visited[next] = true;
        tour.push(next);
        current = next;
    }

    tour
}

// ============================================================================
// Local Search
// ============================================================================

/// 2-opt: reverse segments while that shortens the tour.
///
/// The first stop stays fixed. Each sweep stops at the first improving
/// reversal and the next sweep starts over from the improved tour. Runs at
/// most `max_sweeps` sweeps; tours of three stops or fewer are returned as is.
pub fn two_opt(mut tour: Vec<usize>, matrix: &DistanceMatrix, max_sweeps: usize) -> Vec<usize> {
    if tour.len() <= 3 {
        return tour;
    }

    let mut best_distance = tour_distance(&tour, matrix);
    let mut sweeps = 0;

    while sweeps < max_sweeps {
        sweeps += 1;
        match first_improvement(&mut tour, matrix, best_distance) {
            Some(distance) => best_distance = distance,
            None => return tour,
        }
    }

    debug!(sweeps, distance = best_distance, "2-opt sweep budget exhausted");
    tour
}

/// Applies the first segment reversal that beats `current` and returns the
/// new distance. Leaves `tour` untouched when nothing improves.
fn first_improvement(tour: &mut [usize], matrix: &DistanceMatrix, current: f64) -> Option<f64> {
    let n = tour.len();

    for i in 1..n - 2 {
        for j in i + 2..n {
            tour[i..=j].reverse();
            let distance = tour_distance(tour, matrix);
            if distance < current {
                return Some(distance);
            }
            tour[i..=j].reverse();
        }
    }

    None
}
