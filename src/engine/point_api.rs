use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::PointAPI,
    entities::{PointDetails, PointOfInterest},
    error::Error,
};

#[async_trait]
impl PointAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn find_all_points(&self) -> Result<Vec<PointOfInterest>, Error> {
        self.store.find_all().await
    }

    #[tracing::instrument(skip(self))]
    async fn find_point(&self, id: Uuid) -> Result<Option<PointOfInterest>, Error> {
        self.store.find_by_id(id).await
    }

    #[tracing::instrument(skip(self))]
    async fn create_point(&self, details: PointDetails) -> Result<PointOfInterest, Error> {
        let point = self.store.save(None, details).await?;

        tracing::info!(id = %point.id, "point created");

        Ok(point)
    }

    #[tracing::instrument(skip(self))]
    async fn update_point(
        &self,
        id: Uuid,
        details: PointDetails,
    ) -> Result<Option<PointOfInterest>, Error> {
        let existing = match self.store.find_by_id(id).await? {
            Some(point) => point,
            None => {
                tracing::info!("point not found, nothing to update");
                return Ok(None);
            }
        };

        let point = self.store.save(Some(existing.id), details).await?;

        Ok(Some(point))
    }

    #[tracing::instrument(skip(self))]
    async fn delete_point(&self, id: Uuid) -> Result<(), Error> {
        self.store.delete_by_id(id).await
    }
}

#[cfg(test)]
fn memory_engine() -> Engine {
    Engine::new(crate::db::MemoryStore::new())
}

#[cfg(test)]
fn park(name: &str) -> PointDetails {
    use crate::entities::PointType;

    PointDetails {
        name: name.into(),
        description: "green space".into(),
        latitude: 41.1579,
        longitude: -8.6291,
        point_type: PointType::Park,
    }
}

#[tokio::test]
async fn create_assigns_id_test() {
    let engine = memory_engine();

    let point = engine.create_point(park("Jardins do Palácio de Cristal")).await.unwrap();

    assert_eq!(engine.find_point(point.id).await.unwrap(), Some(point.clone()));
    assert_eq!(engine.find_all_points().await.unwrap(), vec![point]);
}

#[tokio::test]
async fn find_missing_point_returns_none_test() {
    let engine = memory_engine();

    assert_eq!(engine.find_point(Uuid::new_v4()).await.unwrap(), None);
}

#[tokio::test]
async fn update_overwrites_every_field_test() {
    use crate::entities::PointType;

    let engine = memory_engine();

    let point = engine.create_point(park("Parque da Cidade")).await.unwrap();

    let replacement = PointDetails {
        name: "Café Majestic".into(),
        description: "".into(),
        latitude: 41.1472,
        longitude: -8.6067,
        point_type: PointType::Cafe,
    };

    let updated = engine
        .update_point(point.id, replacement.clone())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, point.id);
    assert_eq!(updated.details, replacement);
    assert_eq!(engine.find_point(point.id).await.unwrap(), Some(updated));
    assert_eq!(engine.find_all_points().await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_missing_point_returns_none_test() {
    let engine = memory_engine();

    let result = engine
        .update_point(Uuid::new_v4(), park("Nowhere"))
        .await
        .unwrap();

    assert_eq!(result, None);
    assert!(engine.find_all_points().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_missing_point_is_noop_test() {
    let engine = memory_engine();

    let kept = engine.create_point(park("Kept")).await.unwrap();

    tokio_test::assert_ok!(engine.delete_point(Uuid::new_v4()).await);
    assert_eq!(engine.find_all_points().await.unwrap(), vec![kept.clone()]);

    tokio_test::assert_ok!(engine.delete_point(kept.id).await);
    tokio_test::assert_ok!(engine.delete_point(kept.id).await);
    assert_eq!(engine.find_point(kept.id).await.unwrap(), None);
}
