use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{
    postgres::{PgPoolOptions, PgRow},
    Executor, Pool, Postgres, Row,
};
use uuid::Uuid;

use super::PointStore;
use crate::entities::{PointDetails, PointOfInterest, PointType};
use crate::error::{database_error, Error};

pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    #[tracing::instrument(name = "PgStore::new", skip_all)]
    pub async fn new(db_uri: &str, max_connections: u32) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(db_uri)
            .await?;

        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: Pool<Postgres>) -> Result<Self, Error> {
        // TODO: move this to migrations
        pool.execute(
            "CREATE TABLE IF NOT EXISTS points (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                name VARCHAR NOT NULL,
                description TEXT NOT NULL,
                latitude DOUBLE PRECISION NOT NULL,
                longitude DOUBLE PRECISION NOT NULL,
                type VARCHAR NOT NULL,
                seq BIGSERIAL NOT NULL
            )",
        )
        .await?;

        Ok(Self { pool })
    }
}

fn point_from_row(row: &PgRow) -> Result<PointOfInterest, Error> {
    let point_type: String = row.try_get("type")?;

    let details = PointDetails {
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        point_type: point_type
            .parse::<PointType>()
            .map_err(|_| database_error(format!("unknown point type {}", point_type)))?,
    };

    Ok(PointOfInterest::new(row.try_get("id")?, details))
}

#[async_trait]
impl PointStore for PgStore {
    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<PointOfInterest>, Error> {
        let mut rows = sqlx::query(
            "SELECT id, name, description, latitude, longitude, type FROM points ORDER BY seq",
        )
        .fetch(&self.pool);

        let mut points = vec![];

        while let Some(row) = rows.try_next().await? {
            points.push(point_from_row(&row)?);
        }

        Ok(points)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PointOfInterest>, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_row = conn
            .fetch_optional(
                sqlx::query(
                    "SELECT id, name, description, latitude, longitude, type FROM points WHERE id = $1",
                )
                .bind(&id),
            )
            .await?;

        maybe_row.as_ref().map(point_from_row).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn save(
        &self,
        id: Option<Uuid>,
        details: PointDetails,
    ) -> Result<PointOfInterest, Error> {
        let mut conn = self.pool.acquire().await?;

        let row = match id {
            None => {
                conn.fetch_one(
                    sqlx::query(
                        "INSERT INTO points (name, description, latitude, longitude, type)
                        VALUES ($1, $2, $3, $4, $5)
                        RETURNING id",
                    )
                    .bind(&details.name)
                    .bind(&details.description)
                    .bind(details.latitude)
                    .bind(details.longitude)
                    .bind(details.point_type.name()),
                )
                .await?
            }
            Some(id) => {
                conn.fetch_one(
                    sqlx::query(
                        "INSERT INTO points (id, name, description, latitude, longitude, type)
                        VALUES ($1, $2, $3, $4, $5, $6)
                        ON CONFLICT (id) DO UPDATE SET
                            name = EXCLUDED.name,
                            description = EXCLUDED.description,
                            latitude = EXCLUDED.latitude,
                            longitude = EXCLUDED.longitude,
                            type = EXCLUDED.type
                        RETURNING id",
                    )
                    .bind(&id)
                    .bind(&details.name)
                    .bind(&details.description)
                    .bind(details.latitude)
                    .bind(details.longitude)
                    .bind(details.point_type.name()),
                )
                .await?
            }
        };

        Ok(PointOfInterest::new(row.try_get("id")?, details))
    }

    #[tracing::instrument(skip(self))]
    async fn delete_by_id(&self, id: Uuid) -> Result<(), Error> {
        let mut conn = self.pool.acquire().await?;

        conn.execute(sqlx::query("DELETE FROM points WHERE id = $1").bind(&id))
            .await?;

        Ok(())
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at a PostgreSQL 13+ server"]
async fn pg_store_crud_test() {
    let db_uri = std::env::var("DATABASE_URL").unwrap();
    let store = PgStore::new(&db_uri, 2).await.unwrap();

    let details = PointDetails {
        name: "Miradouro da Graça".into(),
        description: "Viewpoint".into(),
        latitude: 38.7163,
        longitude: -9.1316,
        point_type: PointType::Monument,
    };

    let created = store.save(None, details.clone()).await.unwrap();
    assert_eq!(created.details, details);

    let found = store.find_by_id(created.id).await.unwrap();
    assert_eq!(found, Some(created.clone()));

    let renamed = PointDetails {
        name: "Miradouro Sophia de Mello Breyner Andresen".into(),
        ..details
    };
    let updated = store.save(Some(created.id), renamed.clone()).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.details, renamed);

    assert!(store
        .find_all()
        .await
        .unwrap()
        .iter()
        .any(|point| point.id == created.id));

    store.delete_by_id(created.id).await.unwrap();
    store.delete_by_id(created.id).await.unwrap();
    assert_eq!(store.find_by_id(created.id).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at a PostgreSQL 13+ server"]
async fn pg_store_lists_in_insertion_order_test() {
    let db_uri = std::env::var("DATABASE_URL").unwrap();
    let store = PgStore::new(&db_uri, 2).await.unwrap();

    // a single transaction gives every row the same now()
    let mut tx = store.pool.begin().await.unwrap();
    let mut ids: Vec<Uuid> = vec![];

    for name in ["first", "second", "third", "fourth", "fifth"] {
        let row = tx
            .fetch_one(
                sqlx::query(
                    "INSERT INTO points (name, description, latitude, longitude, type)
                    VALUES ($1, '', 0, 0, 'OTHER')
                    RETURNING id",
                )
                .bind(name),
            )
            .await
            .unwrap();

        ids.push(row.try_get("id").unwrap());
    }

    tx.commit().await.unwrap();

    let listed: Vec<Uuid> = store
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|point| point.id)
        .filter(|id| ids.contains(id))
        .collect();

    assert_eq!(listed, ids);

    for id in ids {
        store.delete_by_id(id).await.unwrap();
    }
}
