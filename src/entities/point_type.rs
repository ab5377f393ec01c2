use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{invalid_input_error, Error};

/// Category of a point of interest. Persisted and serialized by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PointType {
    Restaurant,
    Cafe,
    Bar,
    Park,
    Museum,
    Monument,
    Beach,
    Shopping,
    Hotel,
    Other,
}

impl PointType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Restaurant => "RESTAURANT",
            Self::Cafe => "CAFE",
            Self::Bar => "BAR",
            Self::Park => "PARK",
            Self::Museum => "MUSEUM",
            Self::Monument => "MONUMENT",
            Self::Beach => "BEACH",
            Self::Shopping => "SHOPPING",
            Self::Hotel => "HOTEL",
            Self::Other => "OTHER",
        }
    }
}

impl FromStr for PointType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RESTAURANT" => Ok(Self::Restaurant),
            "CAFE" => Ok(Self::Cafe),
            "BAR" => Ok(Self::Bar),
            "PARK" => Ok(Self::Park),
            "MUSEUM" => Ok(Self::Museum),
            "MONUMENT" => Ok(Self::Monument),
            "BEACH" => Ok(Self::Beach),
            "SHOPPING" => Ok(Self::Shopping),
            "HOTEL" => Ok(Self::Hotel),
            "OTHER" => Ok(Self::Other),
            _ => Err(invalid_input_error()),
        }
    }
}

#[test]
fn name_matches_serialized_label_test() {
    let all = [
        PointType::Restaurant,
        PointType::Cafe,
        PointType::Bar,
        PointType::Park,
        PointType::Museum,
        PointType::Monument,
        PointType::Beach,
        PointType::Shopping,
        PointType::Hotel,
        PointType::Other,
    ];

    for point_type in all {
        let serialized = serde_json::to_value(point_type).unwrap();
        assert_eq!(serialized, serde_json::json!(point_type.name()));
        assert_eq!(point_type.name().parse::<PointType>().unwrap(), point_type);
    }
}

#[test]
fn unknown_name_is_rejected_test() {
    assert!("restaurant".parse::<PointType>().is_err());
    assert!(serde_json::from_str::<PointType>("\"ZOO\"").is_err());
}
