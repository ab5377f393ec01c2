use crate::entities::Coordinates;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance on a sphere of fixed radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Haversine {
    radius_km: f64,
}

impl Haversine {
    pub const EARTH: Haversine = Haversine {
        radius_km: EARTH_RADIUS_KM,
    };

    /// Distance in kilometers between two coordinates given in degrees.
    ///
    /// Inputs are not range checked. The intermediate term is clamped to
    /// `[0, 1]` so rounding on antipodal or coincident points never yields
    /// a NaN from `asin`.
    pub fn distance(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
        let d_lat = (lat2 - lat1).to_radians();
        let d_lon = (lon2 - lon1).to_radians();

        let lat1 = lat1.to_radians();
        let lat2 = lat2.to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

        self.radius_km * c
    }

    pub fn distance_between(&self, from: &Coordinates, to: &Coordinates) -> f64 {
        self.distance(from.latitude, from.longitude, to.latitude, to.longitude)
    }
}

#[cfg(test)]
fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    Haversine::EARTH.distance(lat1, lon1, lat2, lon2)
}

#[test]
fn distance_to_self_is_zero_test() {
    let samples = [(0.0, 0.0), (38.7223, -9.1393), (-33.8688, 151.2093), (90.0, 0.0)];

    for (lat, lon) in samples {
        assert_eq!(haversine_distance(lat, lon, lat, lon), 0.0);
    }
}

#[test]
fn distance_is_symmetric_test() {
    let lisbon = (38.7223, -9.1393);
    let tokyo = (35.6762, 139.6503);

    let there = haversine_distance(lisbon.0, lisbon.1, tokyo.0, tokyo.1);
    let back = haversine_distance(tokyo.0, tokyo.1, lisbon.0, lisbon.1);

    assert!((there - back).abs() < 1e-9);
}

#[test]
fn pole_to_pole_is_half_circumference_test() {
    let distance = haversine_distance(90.0, 0.0, -90.0, 0.0);
    let expected = std::f64::consts::PI * EARTH_RADIUS_KM;

    assert!((distance - expected).abs() < 1e-6);
    assert!((distance - 20015.087).abs() < 1e-3);
}

#[test]
fn antipodal_points_stay_finite_test() {
    let samples = [(0.0, 0.0, 0.0, 180.0), (45.0, 90.0, -45.0, -90.0), (10.0, 20.0, -10.0, -160.0)];

    for (lat1, lon1, lat2, lon2) in samples {
        let distance = haversine_distance(lat1, lon1, lat2, lon2);

        assert!(distance.is_finite());
        assert!(distance <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
    }
}

#[test]
fn small_offset_on_equator_test() {
    // 0.0001 degrees of longitude on the equator is roughly 11 meters
    let distance = haversine_distance(0.0, 0.0, 0.0, 0.0001);

    assert!((distance - 0.01112).abs() < 1e-4);
}

#[test]
fn out_of_range_input_is_deterministic_test() {
    let first = haversine_distance(120.0, 400.0, -95.0, -200.0);
    let second = haversine_distance(120.0, 400.0, -95.0, -200.0);

    assert!(first.is_finite());
    assert!(first >= 0.0);
    assert_eq!(first, second);
}

#[test]
fn custom_radius_scales_distance_test() {
    let unit = Haversine { radius_km: 1.0 };

    assert_eq!(Haversine::EARTH.radius_km, EARTH_RADIUS_KM);
    assert!((unit.distance(90.0, 0.0, -90.0, 0.0) - std::f64::consts::PI).abs() < 1e-12);
}

#[test]
fn distance_between_coordinates_test() {
    let lisbon = Coordinates::new(38.7223, -9.1393);
    let porto = Coordinates::new(41.1579, -8.6291);

    assert_eq!(
        Haversine::EARTH.distance_between(&lisbon, &porto),
        haversine_distance(38.7223, -9.1393, 41.1579, -8.6291)
    );
    assert_eq!(Haversine::EARTH.distance_between(&lisbon, &lisbon), 0.0);
}
