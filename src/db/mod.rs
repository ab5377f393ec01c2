mod memory;
mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{PointDetails, PointOfInterest};
use crate::error::Error;

/// Keyed storage for points of interest.
///
/// Implementations own id assignment: `save` with no id creates a record
/// under a fresh id, `save` with an id upserts. Enumeration order of
/// `find_all` is the store's natural order and is preserved by callers.
#[async_trait]
pub trait PointStore {
    async fn find_all(&self) -> Result<Vec<PointOfInterest>, Error>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PointOfInterest>, Error>;
    async fn save(
        &self,
        id: Option<Uuid>,
        details: PointDetails,
    ) -> Result<PointOfInterest, Error>;
    async fn delete_by_id(&self, id: Uuid) -> Result<(), Error>;
}

pub type DynStore = Box<dyn PointStore + Send + Sync>;
