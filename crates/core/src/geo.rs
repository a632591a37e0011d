//! Great-circle distance between coordinate pairs.
//!
//! Haversine with a spherical Earth of radius 6371 km. Good enough for
//! kilometre-scale proximity thresholds; this is not survey-grade geodesy.

use proxima_domain::constants::EARTH_RADIUS_KM;
use proxima_domain::Position;

/// Distance between two positions in kilometres.
///
/// Deterministic and symmetric up to floating-point rounding;
/// `distance_km(a, a) == 0.0`.
pub fn distance_km(a: Position, b: Position) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKYO: Position = Position { latitude: 35.6762, longitude: 139.6503 };
    const OSAKA: Position = Position { latitude: 34.6937, longitude: 135.5023 };

    #[test]
    fn zero_for_identical_points() {
        assert_eq!(distance_km(TOKYO, TOKYO), 0.0);
    }

    #[test]
    fn symmetric_within_tolerance() {
        let forward = distance_km(TOKYO, OSAKA);
        let backward = distance_km(OSAKA, TOKYO);
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude_at_equator() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(1.0, 0.0);
        let distance = distance_km(a, b);
        assert!((distance - 111.19).abs() < 0.5, "got {distance}");
    }

    #[test]
    fn tokyo_to_osaka_roughly_400km() {
        let distance = distance_km(TOKYO, OSAKA);
        assert!((distance - 400.0).abs() < 15.0, "got {distance}");
    }
}
