use crate::model::Coordinates;

pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Haversine great-circle distance between two points in miles.
pub fn haversine_miles(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_MILES * c
}

/// Sum of straight-line legs along a path.
pub fn path_miles(points: &[Coordinates]) -> f64 {
    points
        .windows(2)
        .map(|w| haversine_miles(w[0], w[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_phoenix_to_tucson() {
        // ~105 miles as the crow flies
        let d = haversine_miles(
            Coordinates::new(33.4484, -112.0740),
            Coordinates::new(32.2226, -110.9747),
        );
        assert!((d - 105.0).abs() < 5.0, "Phoenix to Tucson should be ~105mi, got {d}");
    }

    #[test]
    fn haversine_same_point_is_zero() {
        let p = Coordinates::new(33.4152, -111.8315);
        assert!(haversine_miles(p, p) < 1e-9);
    }

    #[test]
    fn haversine_is_symmetric() {
        let a = Coordinates::new(33.6, -112.2);
        let b = Coordinates::new(33.3, -111.9);
        assert!((haversine_miles(a, b) - haversine_miles(b, a)).abs() < 1e-9);
    }

    #[test]
    fn path_sums_legs() {
        let pts = [
            Coordinates::new(0.0, 0.0),
            Coordinates::new(1.0, 0.0),
            Coordinates::new(2.0, 0.0),
        ];
        let one_degree = haversine_miles(pts[0], pts[1]);
        assert!((path_miles(&pts) - 2.0 * one_degree).abs() < 1e-6);
        assert_eq!(path_miles(&pts[..1]), 0.0);
    }
}
