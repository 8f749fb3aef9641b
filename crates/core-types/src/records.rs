use crate::geometry::GeoJsonPoint;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// Request body for `POST /api/coordinates`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(deserialize_with = "lenient_f64")]
    pub lat: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub lon: f64,
}

/// Request body for `POST /api/child/coordinates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewChild {
    #[serde(deserialize_with = "lenient_f64")]
    pub lat: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub lon: f64,
    pub user_name: String,
    pub user_function: String,
}

/// A row of the anonymous position stream (`user_positions`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PositionRecord {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    pub created_at: NaiveDateTime,
}

impl PositionRecord {
    /// The fixed record served by `GET /api/coordinates/sara`.
    pub fn sample() -> Self {
        let created_at = NaiveDate::from_ymd_opt(2025, 11, 8)
            .and_then(|d| d.and_hms_micro_opt(10, 8, 44, 306_761))
            .unwrap_or_default();
        Self {
            id: 16,
            lat: 47.46385684116505,
            lon: 8.39244934396616,
            created_at,
        }
    }
}

/// A named roster entry (`users` table) with its position as GeoJSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildRecord {
    pub id: i64,
    pub user_name: String,
    pub user_function: String,
    pub geom: GeoJsonPoint,
    pub created_at: NaiveDateTime,
}

/// `{"success": true, "id": ...}` returned by both insert endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertedId {
    pub success: bool,
    pub id: i64,
}

impl From<i64> for InsertedId {
    fn from(id: i64) -> Self {
        Self { success: true, id }
    }
}

/// `{"success": true, "data": [...]}` returned by the roster listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildList {
    pub success: bool,
    pub data: Vec<ChildRecord>,
}

impl From<Vec<ChildRecord>> for ChildList {
    fn from(data: Vec<ChildRecord>) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Accepts a JSON number or a numeric string, the same coercion clients of
/// this API have always relied on. Range is not checked.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("'{}' is not a valid number", text))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sample_record_matches_literal() {
        let json = serde_json::to_value(PositionRecord::sample()).unwrap();
        assert_eq!(
            json,
            json!({
                "id": 16,
                "lat": 47.46385684116505,
                "lon": 8.39244934396616,
                "created_at": "2025-11-08T10:08:44.306761"
            })
        );
    }

    #[test]
    fn test_coordinates_accept_integers_and_numeric_strings() {
        let coords: Coordinates = serde_json::from_str(r#"{"lat": 47, "lon": "8.5"}"#).unwrap();
        assert_eq!(coords, Coordinates { lat: 47.0, lon: 8.5 });
    }

    #[test]
    fn test_out_of_range_latitude_is_passed_through() {
        let coords: Coordinates = serde_json::from_str(r#"{"lat": 123.0, "lon": -400.0}"#).unwrap();
        assert_eq!(coords.lat, 123.0);
        assert_eq!(coords.lon, -400.0);
    }

    #[test]
    fn test_coordinates_reject_non_numeric_input() {
        assert!(serde_json::from_str::<Coordinates>(r#"{"lat": "north", "lon": 8.5}"#).is_err());
        assert!(serde_json::from_str::<Coordinates>(r#"{"lat": 47.4}"#).is_err());
    }

    #[test]
    fn test_new_child_requires_labels() {
        let raw = r#"{"lat": 47.4, "lon": 8.5, "user_name": "Mia"}"#;
        assert!(serde_json::from_str::<NewChild>(raw).is_err());
    }

    #[test]
    fn test_envelopes_carry_success_flag() {
        let inserted = serde_json::to_value(InsertedId::from(7)).unwrap();
        assert_eq!(inserted, json!({ "success": true, "id": 7 }));

        let list = serde_json::to_value(ChildList::from(Vec::new())).unwrap();
        assert_eq!(list, json!({ "success": true, "data": [] }));
    }
}
