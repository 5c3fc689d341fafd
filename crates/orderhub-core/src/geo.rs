//! # Geo Module
//!
//! Coordinates and great-circle distance.
//!
//! Store selection is proximity-driven: every candidate store is ranked by
//! its haversine distance to the customer's shipping address, and the
//! shipping fee tier is derived from the farthest allocated store. This
//! module is the single source of that distance.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic coordinate in decimal degrees.
///
/// Both stores and shipping addresses carry one; addresses arrive with
/// latitude/longitude already resolved (geocoding is out of scope).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance between two coordinates in kilometers, using the
/// haversine formula.
///
/// Inputs are decimal degrees; conversion to radians happens internally.
/// Pure and deterministic, no error conditions: identical points return 0.
///
/// ## Example
/// ```rust
/// use orderhub_core::geo::{distance_km, Coordinate};
///
/// let a = Coordinate::new(10.0, 106.0);
/// assert_eq!(distance_km(a, a), 0.0);
/// ```
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let dphi = (b.latitude - a.latitude).to_radians();
    let dlambda = (b.longitude - a.longitude).to_radians();

    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_points_zero() {
        let p = Coordinate::new(10.762622, 106.660172);
        assert_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn test_known_distance_hcmc_hanoi() {
        // Ho Chi Minh City to Hanoi is roughly 1140-1160 km great-circle
        let hcmc = Coordinate::new(10.7626, 106.6602);
        let hanoi = Coordinate::new(21.0285, 105.8542);
        let d = distance_km(hcmc, hanoi);
        assert!(d > 1100.0 && d < 1200.0, "got {d}");
    }

    #[test]
    fn test_one_degree_latitude() {
        // One degree of latitude is ~111.2 km anywhere on the globe
        let a = Coordinate::new(10.0, 106.0);
        let b = Coordinate::new(11.0, 106.0);
        let d = distance_km(a, b);
        assert!((d - 111.19).abs() < 0.5, "got {d}");
    }

    #[test]
    fn test_symmetry() {
        let a = Coordinate::new(10.0, 106.0);
        let b = Coordinate::new(10.3, 106.4);
        assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-9);
    }
}
