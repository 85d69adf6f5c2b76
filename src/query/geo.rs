//! Radius search filter construction.

use bson::{doc, Document};
use serde::{Deserialize, Serialize};

use crate::constants::{CODE_INVALID_DISTANCE, ERR_INVALID_DISTANCE};
use crate::errors::ApiError;

/// Earth radius in kilometers used to turn distances into angular radii.
pub const EARTH_RADIUS_KM: f64 = 6378.0;

/// Field holding the GeoJSON point of each bootcamp.
pub const LOCATION_FIELD: &str = "location";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Distance expressed as a fraction of the Earth's radius.
pub fn angular_radius(distance_km: f64) -> f64 {
    distance_km / EARTH_RADIUS_KM
}

/// Filter matching documents whose location lies within `distance_km` of `center`.
///
/// GeoJSON coordinate order is longitude first.
pub fn within_radius(center: GeoPoint, distance_km: f64) -> Document {
    let radius = angular_radius(distance_km);
    let mut filter = Document::new();
    filter.insert(
        LOCATION_FIELD,
        doc! {
            "$geoWithin": {
                "$centerSphere": [[center.longitude, center.latitude], radius]
            }
        },
    );
    filter
}

/// Parse the distance path segment of a radius request.
pub fn parse_distance(raw: &str) -> Result<f64, ApiError> {
    match raw.trim().parse::<f64>() {
        Ok(distance) if distance.is_finite() && distance >= 0.0 => Ok(distance),
        _ => Err(ApiError::bad_request(CODE_INVALID_DISTANCE, ERR_INVALID_DISTANCE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::Bson;

    #[test]
    fn test_earth_radius_is_one_radian() {
        assert_eq!(angular_radius(6378.0), 1.0);
        assert_eq!(angular_radius(0.0), 0.0);
        assert!((angular_radius(3189.0) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_within_radius_shape() {
        let center = GeoPoint {
            latitude: 42.35,
            longitude: -71.06,
        };
        let filter = within_radius(center, 6378.0);

        let sphere = filter
            .get_document(LOCATION_FIELD)
            .unwrap()
            .get_document("$geoWithin")
            .unwrap()
            .get_array("$centerSphere")
            .unwrap();

        assert_eq!(
            sphere[0],
            Bson::Array(vec![Bson::Double(-71.06), Bson::Double(42.35)])
        );
        assert_eq!(sphere[1], Bson::Double(1.0));
    }

    #[test]
    fn test_parse_distance() {
        assert_eq!(parse_distance("10").unwrap(), 10.0);
        assert_eq!(parse_distance(" 2.5 ").unwrap(), 2.5);
        assert_eq!(parse_distance("0").unwrap(), 0.0);
    }

    #[test]
    fn test_parse_distance_rejects_bad_input() {
        for raw in ["", "ten", "-1", "NaN", "inf"] {
            let err = parse_distance(raw).unwrap_err();
            assert_eq!(err.code(), CODE_INVALID_DISTANCE, "input {raw:?}");
        }
    }
}
