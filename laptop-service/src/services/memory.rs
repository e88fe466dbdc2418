use super::query::{LaptopFilter, LaptopQuery, SortOrder, RATING_BUCKET_WIDTH};
use super::store::LaptopStore;
use crate::models::Laptop;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::cmp::Ordering;

/// Store backed by a fixed set of records, evaluating queries the way
/// MongoDB would. Used by router tests and local demos without a database.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLaptopStore {
    laptops: Vec<Laptop>,
    unavailable: bool,
}

impl InMemoryLaptopStore {
    pub fn new(laptops: Vec<Laptop>) -> Self {
        Self {
            laptops,
            unavailable: false,
        }
    }

    /// A store whose every call fails, as if the server went away.
    pub fn unavailable() -> Self {
        Self {
            laptops: Vec::new(),
            unavailable: true,
        }
    }

    fn ensure_available(&self) -> Result<(), AppError> {
        if self.unavailable {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "in-memory store marked unavailable"
            )));
        }
        Ok(())
    }
}

fn matches(filter: &LaptopFilter, laptop: &Laptop) -> bool {
    match filter {
        LaptopFilter::Brands(brands) => laptop
            .brand()
            .is_some_and(|brand| brands.iter().any(|b| b == brand)),
        LaptopFilter::PriceRange { min, max } => laptop
            .price()
            .is_some_and(|price| *min <= price && price <= *max),
        LaptopFilter::RatingBucket { min } => laptop
            .average_rating()
            .is_some_and(|rating| *min <= rating && rating < *min + RATING_BUCKET_WIDTH),
        LaptopFilter::OnFlashSale => laptop.is_on_flash_sale(),
    }
}

/// Descending order with missing values last, as MongoDB sorts nulls lowest.
fn descending<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl LaptopStore for InMemoryLaptopStore {
    async fn find(&self, query: &LaptopQuery) -> Result<Vec<Laptop>, AppError> {
        self.ensure_available()?;

        let mut found: Vec<Laptop> = self
            .laptops
            .iter()
            .filter(|laptop| query.filters.iter().all(|f| matches(f, laptop)))
            .cloned()
            .collect();

        match query.sort {
            Some(SortOrder::NewestFirst) => {
                found.sort_by(|a, b| descending(a.created_at(), b.created_at()))
            }
            Some(SortOrder::TopRated) => {
                found.sort_by(|a, b| descending(a.average_rating(), b.average_rating()))
            }
            None => {}
        }

        if let Some(limit) = query.limit {
            found.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }

        Ok(found)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Laptop>, AppError> {
        self.ensure_available()?;
        Ok(self
            .laptops
            .iter()
            .find(|laptop| laptop.id() == Some(id))
            .cloned())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.ensure_available()
    }
}
