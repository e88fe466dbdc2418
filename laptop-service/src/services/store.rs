use super::query::LaptopQuery;
use crate::models::Laptop;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

/// Read access to the laptop catalog.
///
/// One implementation is shared by every in-flight request, so implementors
/// must be cheap to call concurrently.
#[async_trait]
pub trait LaptopStore: Send + Sync {
    /// Runs `query` and returns every matching record, sorted and capped as requested.
    async fn find(&self, query: &LaptopQuery) -> Result<Vec<Laptop>, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Laptop>, AppError>;

    /// Round-trips to the backing store.
    async fn health_check(&self) -> Result<(), AppError>;
}
