//! Test fixtures for route-planner.
//!
//! Provides real city coordinates and helpers for building address sets.

pub mod german_cities;

pub use german_cities::*;
