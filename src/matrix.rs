//! Square distance matrix indexed by input order.

use serde::Serialize;

/// Pairwise distances in kilometers.
///
/// `f64::INFINITY` marks a pair that cannot be routed (an endpoint has no
/// coordinates). Serializes as nested arrays; infinite entries become `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct DistanceMatrix {
    rows: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// An `n`×`n` matrix of zeros.
    pub fn zeros(n: usize) -> Self {
        Self {
            rows: vec![vec![0.0; n]; n],
        }
    }

    /// Wraps precomputed rows. Callers are responsible for squareness.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.rows[from][to]
    }

    pub fn set(&mut self, from: usize, to: usize, km: f64) {
        self.rows[from][to] = km;
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.rows
    }

    /// True when `from` has a finite edge to `to`.
    pub fn is_reachable(&self, from: usize, to: usize) -> bool {
        self.rows[from][to].is_finite()
    }
}
