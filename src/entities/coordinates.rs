use geo::{Distance, HaversineMeasure};
use geo_types::Point;
use serde::{Deserialize, Serialize};

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Spherical earth that every stop-to-stop distance is measured on.
pub fn earth() -> HaversineMeasure {
    HaversineMeasure::new(EARTH_RADIUS_M)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinates {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.longitude.is_finite() && self.latitude.is_finite()
    }

    /// Great-circle distance in kilometers.
    pub fn distance_km(&self, other: &Self) -> f64 {
        earth().distance(Point::from(*self), Point::from(*other)) / 1000.0
    }
}

impl From<Coordinates> for Point<f64> {
    fn from(coordinates: Coordinates) -> Self {
        Point::new(coordinates.longitude, coordinates.latitude)
    }
}

/// GeoJSON point, the shape stops take on the submission wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

impl From<Coordinates> for GeoPoint {
    fn from(coordinates: Coordinates) -> Self {
        Self {
            kind: "Point".into(),
            coordinates: [coordinates.longitude, coordinates.latitude],
        }
    }
}

impl From<&GeoPoint> for Coordinates {
    fn from(point: &GeoPoint) -> Self {
        let [longitude, latitude] = point.coordinates;

        Self::new(longitude, latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_degree_along_the_equator() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(1.0, 0.0);

        assert!((a.distance_km(&b) - 111.19).abs() < 0.01);
    }

    #[test]
    fn distance_is_symmetric() {
        let paris = Coordinates::new(2.3514, 48.8580);
        let london = Coordinates::new(-0.1249, 51.5052);

        assert!((paris.distance_km(&london) - london.distance_km(&paris)).abs() < 1e-9);
        assert!((paris.distance_km(&london) - 343.0).abs() < 5.0);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let a = Coordinates::new(77.5946, 12.9716);

        assert_eq!(a.distance_km(&a), 0.0);
    }

    #[test]
    fn geo_point_is_longitude_first() {
        let point: GeoPoint = Coordinates::new(77.59, 12.97).into();

        assert_eq!(point.kind, "Point");
        assert_eq!(point.coordinates, [77.59, 12.97]);
        assert_eq!(Coordinates::from(&point), Coordinates::new(77.59, 12.97));
    }
}
