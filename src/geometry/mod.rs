use num_traits::Float;
use crate::errors::GeometryError;


/// Mean Earth radius in metres (IUGG)
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;


/// Great-circle distance between two (lat, lon) points given in degrees
/// Result is in the unit of `radius`
/// https://en.wikipedia.org/wiki/Haversine_formula
pub fn haversine<T>(lat1: T, lon1: T, lat2: T, lon2: T, radius: T) -> T
where
    T: Float,
    {
    let two = T::one() + T::one();
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / two).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / two).sin().powi(2);

    // rounding can push a just above 1 for antipodal points
    two * radius * a.sqrt().min(T::one()).asin()
}


/// Geographic position in decimal degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {

    /// Latitude must lie in [-90, 90] and longitude in [-180, 180]
    pub fn new(lat: f64, lon: f64) -> Result<Self, GeometryError> {
        let valid = lat.is_finite() && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);

        if !valid {
            return Err(GeometryError::InvalidCoordinate { lat, lon });
        }
        Ok(Self { lat, lon })
    }

    /// Haversine distance in metres
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine(self.lat, self.lon, other.lat, other.lon, EARTH_RADIUS_M)
    }

    /// Position on the unit sphere
    /// Squared euclidean distance between these vectors grows with great-circle
    /// distance, so planar nearest neighbor queries give the geographic answer
    pub fn to_unit_vector(&self) -> [f64; 3] {
        let (lat, lon) = (self.lat.to_radians(), self.lon.to_radians());
        [
            lat.cos() * lon.cos(),
            lat.cos() * lon.sin(),
            lat.sin(),
        ]
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_reference_distances() {
        let paris = Coordinate::new(48.8566, 2.3522).unwrap();
        let london = Coordinate::new(51.5074, -0.1278).unwrap();
        assert!((paris.distance_to(&london) - 343_556.5).abs() < 1.0);

        // one degree of longitude on the equator
        let d = haversine(0.0, 0.0, 0.0, 1.0, EARTH_RADIUS_M);
        assert!((d - 111_195.08).abs() < 0.01);

        // f32 works too
        let d32 = haversine(0.0f32, 0.0, 0.0, 1.0, 6_371.0088);
        assert!((d32 - 111.195).abs() < 0.01);
    }

    #[test]
    fn test_distance_is_symmetric_and_zero_on_self() {
        let a = Coordinate::new(36.7509, 5.0567).unwrap();
        let b = Coordinate::new(36.7525, 5.0844).unwrap();
        assert_eq!(a.distance_to(&a), 0.0);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-9);
        assert!((a.distance_to(&b) - 2_474.3).abs() < 1.0);
    }

    #[test]
    fn test_antipodal_points() {
        let d = haversine(0.0, 0.0, 0.0, 180.0, EARTH_RADIUS_M);
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_M).abs() < 1e-3);
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(Coordinate::new(90.0, -180.0).is_ok());
        assert!(matches!(Coordinate::new(90.5, 0.0), Err(GeometryError::InvalidCoordinate { .. })));
        assert!(matches!(Coordinate::new(0.0, 181.0), Err(GeometryError::InvalidCoordinate { .. })));
        assert!(matches!(Coordinate::new(f64::NAN, 0.0), Err(GeometryError::InvalidCoordinate { .. })));
    }

    #[test]
    fn test_unit_vector() {
        let v = Coordinate::new(0.0, 90.0).unwrap().to_unit_vector();
        assert!(v[0].abs() < 1e-12);
        assert!((v[1] - 1.0).abs() < 1e-12);
        assert!(v[2].abs() < 1e-12);

        let north = Coordinate::new(90.0, 0.0).unwrap().to_unit_vector();
        assert!((north[2] - 1.0).abs() < 1e-12);
    }
}
