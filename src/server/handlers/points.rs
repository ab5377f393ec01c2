use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Extension, Json, Path, Query,
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{PointDetails, PointOfInterest};
use crate::error::{invalid_input_error, not_found_error, Error};
use crate::server::DynAPI;

const DEFAULT_RADIUS_KM: f64 = 5.0;

fn default_radius_km() -> f64 {
    DEFAULT_RADIUS_KM
}

#[derive(Serialize, Deserialize)]
pub struct NearbyParams {
    latitude: f64,
    longitude: f64,
    #[serde(
        rename = "radiusKm",
        alias = "radius_km",
        default = "default_radius_km"
    )]
    radius_km: f64,
}

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<PointOfInterest>>, Error> {
    let points = api.find_all_points().await?;

    Ok(points.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<PointOfInterest>, Error> {
    let Path(id) = id?;

    let point = api.find_point(id).await?.ok_or_else(not_found_error)?;

    Ok(point.into())
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    details: Result<Json<PointDetails>, JsonRejection>,
) -> Result<(StatusCode, Json<PointOfInterest>), Error> {
    let Json(details) = details?;

    let point = api.create_point(details).await?;

    Ok((StatusCode::CREATED, point.into()))
}

pub async fn update(
    Extension(api): Extension<DynAPI>,
    id: Result<Path<Uuid>, PathRejection>,
    details: Result<Json<PointDetails>, JsonRejection>,
) -> Result<Json<PointOfInterest>, Error> {
    let Path(id) = id?;
    let Json(details) = details?;

    let point = api
        .update_point(id, details)
        .await?
        .ok_or_else(not_found_error)?;

    Ok(point.into())
}

pub async fn delete(
    Extension(api): Extension<DynAPI>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, Error> {
    let Path(id) = id?;

    api.delete_point(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn nearby(
    Extension(api): Extension<DynAPI>,
    params: Result<Query<NearbyParams>, QueryRejection>,
) -> Result<Json<Vec<PointOfInterest>>, Error> {
    let Query(params) = params?;

    if !params.radius_km.is_finite() || params.radius_km < 0.0 {
        return Err(invalid_input_error());
    }

    let points = api
        .find_nearby_points(params.latitude, params.longitude, params.radius_km)
        .await?;

    Ok(points.into())
}
