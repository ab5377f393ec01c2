mod nearby_api;
mod point_api;

use crate::{
    api::API,
    db::{DynStore, PointStore},
    geo::Haversine,
};

pub struct Engine {
    store: DynStore,
    haversine: Haversine,
}

impl Engine {
    pub fn new<S: PointStore + Send + Sync + 'static>(store: S) -> Self {
        Self {
            store: Box::new(store),
            haversine: Haversine::EARTH,
        }
    }
}

impl API for Engine {}
