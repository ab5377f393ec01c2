mod cors;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::Extension, routing::get, Router};

use crate::api::API;
use crate::error::{server_error, Error};
use crate::server::handlers::points;

pub type DynAPI = Arc<dyn API + Send + Sync>;

pub fn router<T: API + Sync + Send + 'static>(
    api: T,
    cors_allowed_origins: &[String],
) -> Result<Router, Error> {
    let api = Arc::new(api) as DynAPI;

    let app = Router::new()
        .route(
            "/api/points-of-interest",
            get(points::list).post(points::create),
        )
        .route("/api/points-of-interest/nearby", get(points::nearby))
        .route(
            "/api/points-of-interest/:id",
            get(points::find).put(points::update).delete(points::delete),
        )
        .layer(Extension(api))
        .layer(cors::cors_layer(cors_allowed_origins)?);

    Ok(app)
}

pub async fn serve<T: API + Sync + Send + 'static>(
    api: T,
    addr: SocketAddr,
    cors_allowed_origins: Vec<String>,
) -> Result<(), Error> {
    let app = router(api, &cors_allowed_origins)?;

    tracing::info!("listening on {}", addr);

    axum::Server::try_bind(&addr)
        .map_err(server_error)?
        .serve(app.into_make_service())
        .await
        .map_err(server_error)
}

#[cfg(test)]
async fn spawn_app() -> String {
    use crate::{db::MemoryStore, engine::Engine};

    let app = router(
        Engine::new(MemoryStore::new()),
        &["http://localhost:8100".to_string()],
    )
    .unwrap();

    let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
        .serve(app.into_make_service());
    let addr = server.local_addr();

    tokio::spawn(server);

    format!("http://{}/api/points-of-interest", addr)
}

#[cfg(test)]
async fn create_via_http(
    client: &reqwest::Client,
    base: &str,
    body: serde_json::Value,
) -> crate::entities::PointOfInterest {
    let res = client.post(base).json(&body).send().await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);

    res.json().await.unwrap()
}

#[tokio::test]
async fn crud_lifecycle_test() {
    use crate::entities::PointOfInterest;
    use reqwest::StatusCode;
    use serde_json::json;

    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let created = create_via_http(
        &client,
        &base,
        json!({
            "id": "00000000-0000-0000-0000-000000000000",
            "name": "Livraria Lello",
            "description": "Bookshop",
            "latitude": 41.1469,
            "longitude": -8.6148,
            "type": "SHOPPING",
        }),
    )
    .await;
    assert!(!created.id.is_nil());

    let found: PointOfInterest = client
        .get(format!("{}/{}", base, created.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(found, created);

    let res = client
        .put(format!("{}/{}", base, created.id))
        .json(&json!({
            "name": "Torre dos Clérigos",
            "description": "Bell tower",
            "latitude": 41.1458,
            "longitude": -8.6139,
            "type": "MONUMENT",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: PointOfInterest = res.json().await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.details.name, "Torre dos Clérigos");

    let all: Vec<PointOfInterest> = client.get(&base).send().await.unwrap().json().await.unwrap();
    assert_eq!(all, vec![updated]);

    let res = client
        .delete(format!("{}/{}", base, created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/{}", base, created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .delete(format!("{}/{}", base, created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn null_description_is_accepted_test() {
    use serde_json::json;

    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let created = create_via_http(
        &client,
        &base,
        json!({
            "name": "Jardim do Torel",
            "description": null,
            "latitude": 38.7190,
            "longitude": -9.1423,
            "type": "PARK",
        }),
    )
    .await;

    assert_eq!(created.details.description, "");
}

#[tokio::test]
async fn update_missing_point_test() {
    use reqwest::StatusCode;
    use serde_json::json;

    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let res = client
        .put(format!("{}/{}", base, uuid::Uuid::new_v4()))
        .json(&json!({
            "name": "Ghost",
            "latitude": 0.0,
            "longitude": 0.0,
            "type": "OTHER",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "code": 102, "error": "not found" }));
}

#[tokio::test]
async fn malformed_requests_test() {
    use reqwest::StatusCode;
    use serde_json::json;

    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let invalid_input = json!({ "code": 101, "error": "invalid input" });

    let requests = vec![
        client.get(format!("{}/not-a-uuid", base)),
        client.delete(format!("{}/not-a-uuid", base)),
        client.get(format!("{}/nearby?longitude=0", base)),
        client.get(format!("{}/nearby?latitude=north&longitude=0", base)),
        client.get(format!("{}/nearby?latitude=0&longitude=0&radiusKm=-1", base)),
        client
            .post(&base)
            .header("content-type", "application/json")
            .body("{\"name\": "),
        client
            .post(&base)
            .json(&json!({ "name": "No coordinates", "type": "PARK" })),
        client
            .post(&base)
            .json(&json!({ "name": "Zoo", "latitude": 0.0, "longitude": 0.0, "type": "ZOO" })),
        client.put(format!("{}/{}", base, uuid::Uuid::new_v4())).body("not json"),
    ];

    for request in requests {
        let res = request.send().await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body, invalid_input);
    }
}

#[tokio::test]
async fn nearby_test() {
    use crate::entities::PointOfInterest;
    use serde_json::json;

    let base = spawn_app().await;
    let client = reqwest::Client::new();

    for (name, latitude, longitude) in [("Origin", 0.0, 0.0), ("Near", 0.0, 0.0001), ("Far", 10.0, 10.0)] {
        create_via_http(
            &client,
            &base,
            json!({
                "name": name,
                "latitude": latitude,
                "longitude": longitude,
                "type": "PARK",
            }),
        )
        .await;
    }

    let names = |points: Vec<PointOfInterest>| -> Vec<String> {
        points.into_iter().map(|point| point.details.name).collect()
    };

    let default_radius: Vec<PointOfInterest> = client
        .get(format!("{}/nearby?latitude=0&longitude=0", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(names(default_radius), vec!["Origin", "Near"]);

    let wide: Vec<PointOfInterest> = client
        .get(format!("{}/nearby?latitude=0&longitude=0&radiusKm=2000", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(names(wide), vec!["Origin", "Near", "Far"]);

    let exact: Vec<PointOfInterest> = client
        .get(format!("{}/nearby?latitude=0&longitude=0&radius_km=0", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(names(exact), vec!["Origin"]);
}

#[tokio::test]
async fn cors_test() {
    use reqwest::StatusCode;

    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let res = client
        .request(reqwest::Method::OPTIONS, &base)
        .header("Origin", "http://localhost:8100")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());
    assert_eq!(
        res.headers()["access-control-allow-origin"],
        "http://localhost:8100"
    );

    let res = client
        .get(&base)
        .header("Origin", "http://localhost:8100")
        .send()
        .await
        .unwrap();
    assert_eq!(
        res.headers()["access-control-allow-origin"],
        "http://localhost:8100"
    );

    let res = client
        .get(&base)
        .header("Origin", "https://elsewhere.example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get("access-control-allow-origin").is_none());
}
