//! Great-circle math over raw longitude/latitude pairs.

use fleet::Coords;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers, using the haversine formula.
pub fn haversine_km(a: Coords, b: Coords) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h slightly past 1 for antipodal points
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Forward azimuth from `a` towards `b`, in degrees clockwise from north, within [0, 360).
pub fn bearing(a: Coords, b: Coords) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    normalize_degrees(y.atan2(x).to_degrees())
}

/// Straight-line interpolation on the lon/lat plane, not along the geodesic. Fine at city scale.
pub fn lerp(a: Coords, b: Coords, t: f64) -> Coords {
    let t = t.clamp(0.0, 1.0);
    // Written this way, t = 1 lands exactly on b
    Coords::new(
        a.lon * (1.0 - t) + b.lon * t,
        a.lat * (1.0 - t) + b.lat * t,
    )
}

/// The inverse of `lerp`: how far along the segment from `a` to `b` the projection of `pt` lies,
/// clamped to [0, 1]. A degenerate segment counts as fully traversed.
pub fn fraction_along(a: Coords, b: Coords, pt: Coords) -> f64 {
    let dx = b.lon - a.lon;
    let dy = b.lat - a.lat;
    let len_squared = dx * dx + dy * dy;
    if len_squared == 0.0 {
        return 1.0;
    }
    let t = ((pt.lon - a.lon) * dx + (pt.lat - a.lat) * dy) / len_squared;
    t.clamp(0.0, 1.0)
}

fn normalize_degrees(x: f64) -> f64 {
    let x = x.rem_euclid(360.0);
    // rem_euclid of a tiny negative number can round up to exactly 360
    if x >= 360.0 {
        0.0
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lisbon() -> Coords {
        Coords::new(-9.1393, 38.7223)
    }

    fn porto() -> Coords {
        Coords::new(-8.6291, 41.1579)
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (lisbon(), porto()),
            (Coords::new(0.0, 0.0), Coords::new(179.9, -0.1)),
            (Coords::new(-120.0, 45.0), Coords::new(60.0, -45.0)),
            (Coords::new(10.0, 89.9), Coords::new(-170.0, 89.9)),
        ];
        for (a, b) in pairs {
            assert_eq!(haversine_km(a, b), haversine_km(b, a));
            assert_eq!(haversine_km(a, a), 0.0);
            assert_eq!(haversine_km(b, b), 0.0);
        }
    }

    #[test]
    fn known_distances() {
        // Lisbon to Porto is about 274km as the crow flies
        let d = haversine_km(lisbon(), porto());
        assert!((d - 274.0).abs() < 2.0, "got {d}");

        // One degree of latitude
        let d = haversine_km(Coords::new(0.0, 0.0), Coords::new(0.0, 1.0));
        assert!((d - 111.195).abs() < 0.01, "got {d}");

        // Half the circumference
        let d = haversine_km(Coords::new(0.0, 0.0), Coords::new(180.0, 0.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn bearing_cardinal_directions() {
        let origin = Coords::new(0.0, 0.0);
        assert!((bearing(origin, Coords::new(0.0, 1.0)) - 0.0).abs() < 1e-9);
        assert!((bearing(origin, Coords::new(1.0, 0.0)) - 90.0).abs() < 1e-9);
        assert!((bearing(origin, Coords::new(0.0, -1.0)) - 180.0).abs() < 1e-9);
        assert!((bearing(origin, Coords::new(-1.0, 0.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn bearing_is_normalized() {
        let mut points = Vec::new();
        for lon in [-179.5, -90.0, -9.1, 0.0, 0.0001, 45.0, 179.9] {
            for lat in [-89.0, -38.7, 0.0, 1e-9, 38.7, 89.0] {
                points.push(Coords::new(lon, lat));
            }
        }
        for a in &points {
            for b in &points {
                let x = bearing(*a, *b);
                assert!((0.0..360.0).contains(&x), "bearing {x} from {a} to {b}");
            }
        }
    }

    #[test]
    fn lerp_endpoints() {
        let a = lisbon();
        let b = porto();
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
        assert_eq!(lerp(a, b, 2.0), b);
        assert_eq!(lerp(a, b, -1.0), a);

        for t in [0.0, 0.1, 0.25, 0.5, 0.999, 1.0] {
            let pt = lerp(a, b, t);
            assert!((fraction_along(a, b, pt) - t).abs() < 1e-9);
        }
        assert_eq!(fraction_along(a, a, a), 1.0);

        let mid = lerp(a, b, 0.5);
        assert!((mid.lon - (a.lon + b.lon) / 2.0).abs() < 1e-12);
        assert!((mid.lat - (a.lat + b.lat) / 2.0).abs() < 1e-12);
    }
}
