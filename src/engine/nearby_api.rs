use super::Engine;

use async_trait::async_trait;

use crate::{
    api::NearbyAPI,
    entities::{Coordinates, PointOfInterest},
    error::Error,
};

#[async_trait]
impl NearbyAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn find_nearby_points(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Vec<PointOfInterest>, Error> {
        let origin = Coordinates::new(latitude, longitude);

        let points = self.store.find_all().await?;
        let candidates = points.len();

        let nearby: Vec<PointOfInterest> = points
            .into_iter()
            .filter(|point| {
                self.haversine
                    .distance_between(&origin, &point.coordinates())
                    <= radius_km
            })
            .collect();

        tracing::info!(candidates, matches = nearby.len(), "nearby search done");

        Ok(nearby)
    }
}

#[cfg(test)]
async fn seeded_engine(points: &[(&str, f64, f64)]) -> Engine {
    use crate::{
        api::PointAPI,
        db::MemoryStore,
        entities::{PointDetails, PointType},
    };

    let engine = Engine::new(MemoryStore::new());

    for (name, latitude, longitude) in points {
        let details = PointDetails {
            name: name.to_string(),
            description: "".into(),
            latitude: *latitude,
            longitude: *longitude,
            point_type: PointType::Other,
        };

        engine.create_point(details).await.unwrap();
    }

    engine
}

#[cfg(test)]
fn names(points: &[PointOfInterest]) -> Vec<&str> {
    points.iter().map(|point| point.details.name.as_str()).collect()
}

#[tokio::test]
async fn origin_near_far_test() {
    let engine =
        seeded_engine(&[("Origin", 0.0, 0.0), ("Near", 0.0, 0.0001), ("Far", 10.0, 10.0)]).await;

    let nearby = engine.find_nearby_points(0.0, 0.0, 5.0).await.unwrap();

    assert_eq!(names(&nearby), vec!["Origin", "Near"]);
}

#[tokio::test]
async fn zero_radius_matches_exact_coordinate_only_test() {
    let engine =
        seeded_engine(&[("Origin", 0.0, 0.0), ("Near", 0.0, 0.0001), ("Again", 0.0, 0.0)]).await;

    let nearby = engine.find_nearby_points(0.0, 0.0, 0.0).await.unwrap();

    assert_eq!(names(&nearby), vec!["Origin", "Again"]);
}

#[tokio::test]
async fn empty_store_returns_empty_result_test() {
    use crate::db::MemoryStore;

    let engine = Engine::new(MemoryStore::new());

    let nearby = engine.find_nearby_points(38.7, -9.1, 100.0).await.unwrap();

    assert!(nearby.is_empty());
}

#[tokio::test]
async fn result_partitions_all_points_by_radius_test() {
    use crate::{api::PointAPI, geo::Haversine};

    let engine = seeded_engine(&[
        ("Baixa", 38.7110, -9.1370),
        ("Belém", 38.6916, -9.2160),
        ("Sintra", 38.8029, -9.3817),
        ("Cascais", 38.6979, -9.4215),
        ("Porto", 41.1579, -8.6291),
        ("Alfama", 38.7118, -9.1300),
    ])
    .await;

    let query = Coordinates::new(38.7223, -9.1393);
    let radius_km = 10.0;

    let all = engine.find_all_points().await.unwrap();
    let nearby = engine
        .find_nearby_points(query.latitude, query.longitude, radius_km)
        .await
        .unwrap();

    for point in &all {
        let distance = Haversine::EARTH.distance_between(&query, &point.coordinates());

        if nearby.contains(point) {
            assert!(distance <= radius_km);
        } else {
            assert!(distance > radius_km);
        }
    }

    assert!(nearby.iter().all(|point| all.contains(point)));
    assert_eq!(names(&nearby), vec!["Baixa", "Belém", "Alfama"]);
}
