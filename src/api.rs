use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{PointDetails, PointOfInterest};
use crate::error::Error;

#[async_trait]
pub trait PointAPI {
    async fn find_all_points(&self) -> Result<Vec<PointOfInterest>, Error>;
    async fn find_point(&self, id: Uuid) -> Result<Option<PointOfInterest>, Error>;
    async fn create_point(&self, details: PointDetails) -> Result<PointOfInterest, Error>;
    async fn update_point(
        &self,
        id: Uuid,
        details: PointDetails,
    ) -> Result<Option<PointOfInterest>, Error>;
    async fn delete_point(&self, id: Uuid) -> Result<(), Error>;
}

#[async_trait]
pub trait NearbyAPI {
    async fn find_nearby_points(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Vec<PointOfInterest>, Error>;
}

pub trait API: PointAPI + NearbyAPI {}
