use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::entities::{Coordinates, PointType};

/// Everything about a point of interest that a caller may set. Updates
/// always replace the whole payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointDetails {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "type")]
    pub point_type: PointType,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl PointDetails {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// A persisted point of interest. The id is assigned by the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub id: Uuid,
    #[serde(flatten)]
    pub details: PointDetails,
}

impl PointOfInterest {
    pub fn new(id: Uuid, details: PointDetails) -> Self {
        Self { id, details }
    }

    pub fn coordinates(&self) -> Coordinates {
        self.details.coordinates()
    }
}

#[test]
fn serializes_flat_record_test() {
    let id = Uuid::new_v4();
    let point = PointOfInterest::new(
        id,
        PointDetails {
            name: "Jardim da Estrela".into(),
            description: "Garden".into(),
            latitude: 38.7139,
            longitude: -9.1602,
            point_type: PointType::Park,
        },
    );

    let value = serde_json::to_value(&point).unwrap();

    assert_eq!(
        value,
        serde_json::json!({
            "id": id,
            "name": "Jardim da Estrela",
            "description": "Garden",
            "latitude": 38.7139,
            "longitude": -9.1602,
            "type": "PARK",
        })
    );
}

#[test]
fn details_ignore_supplied_id_test() {
    let details: PointDetails = serde_json::from_value(serde_json::json!({
        "id": "not-a-real-id",
        "name": "Time Out Market",
        "latitude": 38.7069,
        "longitude": -9.1459,
        "type": "RESTAURANT",
    }))
    .unwrap();

    assert_eq!(details.name, "Time Out Market");
    assert_eq!(details.description, "");
    assert_eq!(details.point_type, PointType::Restaurant);
}

#[test]
fn null_description_reads_as_empty_test() {
    let details: PointDetails = serde_json::from_value(serde_json::json!({
        "name": "Praia da Ursa",
        "description": null,
        "latitude": 38.7895,
        "longitude": -9.4985,
        "type": "BEACH",
    }))
    .unwrap();

    assert_eq!(details.description, "");
    assert_eq!(details.point_type, PointType::Beach);
}
