use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::PointStore;
use crate::entities::{PointDetails, PointOfInterest};
use crate::error::Error;

/// In-process store. Records are kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    points: RwLock<Vec<PointOfInterest>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PointStore for MemoryStore {
    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<PointOfInterest>, Error> {
        Ok(self.points.read().await.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PointOfInterest>, Error> {
        let points = self.points.read().await;

        Ok(points.iter().find(|point| point.id == id).cloned())
    }

    #[tracing::instrument(skip(self))]
    async fn save(
        &self,
        id: Option<Uuid>,
        details: PointDetails,
    ) -> Result<PointOfInterest, Error> {
        let mut points = self.points.write().await;

        let point = PointOfInterest::new(id.unwrap_or_else(Uuid::new_v4), details);

        match points.iter_mut().find(|existing| existing.id == point.id) {
            Some(existing) => *existing = point.clone(),
            None => points.push(point.clone()),
        }

        Ok(point)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_by_id(&self, id: Uuid) -> Result<(), Error> {
        self.points.write().await.retain(|point| point.id != id);

        Ok(())
    }
}

#[cfg(test)]
fn details(name: &str) -> PointDetails {
    PointDetails {
        name: name.into(),
        description: "".into(),
        latitude: 0.0,
        longitude: 0.0,
        point_type: crate::entities::PointType::Other,
    }
}

#[tokio::test]
async fn save_without_id_assigns_one_test() {
    let store = MemoryStore::new();

    let first = store.save(None, details("first")).await.unwrap();
    let second = store.save(None, details("second")).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(store.find_all().await.unwrap(), vec![first, second]);
}

#[tokio::test]
async fn save_with_id_upserts_in_place_test() {
    let store = MemoryStore::new();

    let first = store.save(None, details("first")).await.unwrap();
    let second = store.save(None, details("second")).await.unwrap();

    let renamed = store
        .save(Some(first.id), details("renamed"))
        .await
        .unwrap();

    let all = store.find_all().await.unwrap();
    assert_eq!(all, vec![renamed.clone(), second]);
    assert_eq!(renamed.id, first.id);

    let unknown = Uuid::new_v4();
    let inserted = store.save(Some(unknown), details("third")).await.unwrap();
    assert_eq!(inserted.id, unknown);
    assert_eq!(store.find_all().await.unwrap().len(), 3);
}

#[tokio::test]
async fn delete_is_idempotent_test() {
    let store = MemoryStore::new();

    let point = store.save(None, details("gone")).await.unwrap();

    tokio_test::assert_ok!(store.delete_by_id(point.id).await);
    tokio_test::assert_ok!(store.delete_by_id(point.id).await);
    tokio_test::assert_ok!(store.delete_by_id(Uuid::new_v4()).await);

    assert_eq!(store.find_by_id(point.id).await.unwrap(), None);
    assert!(store.find_all().await.unwrap().is_empty());
}
