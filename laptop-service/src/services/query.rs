//! Typed catalog queries and their MongoDB translation.
//!
//! Handlers never build BSON themselves: they describe what they want as a
//! [`LaptopQuery`] and the store decides how to execute it.

use mongodb::bson::{doc, Document};
use mongodb::options::FindOptions;

/// Width of a rating bucket: `ratings=4` selects `[4, 4.9)`.
pub const RATING_BUCKET_WIDTH: f64 = 0.9;

/// Number of records surfaced on `/trending`.
pub const TRENDING_LIMIT: i64 = 8;

/// A predicate derived from one query parameter. Fragments are ANDed.
#[derive(Debug, Clone, PartialEq)]
pub enum LaptopFilter {
    /// Brand equals any of the listed values.
    Brands(Vec<String>),
    /// `min <= price <= max`.
    PriceRange { min: f64, max: f64 },
    /// `min <= ratings.average < min + RATING_BUCKET_WIDTH`.
    RatingBucket { min: f64 },
    OnFlashSale,
}

impl LaptopFilter {
    pub fn to_document(&self) -> Document {
        match self {
            LaptopFilter::Brands(brands) => doc! { "brand": { "$in": brands.clone() } },
            LaptopFilter::PriceRange { min, max } => {
                doc! { "price": { "$gte": *min, "$lte": *max } }
            }
            LaptopFilter::RatingBucket { min } => doc! {
                "ratings.average": { "$gte": *min, "$lt": *min + RATING_BUCKET_WIDTH }
            },
            LaptopFilter::OnFlashSale => doc! { "isOnFlashSale": true },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// `createdAt` descending.
    NewestFirst,
    /// `ratings.average` descending.
    TopRated,
}

impl SortOrder {
    pub fn to_document(self) -> Document {
        match self {
            SortOrder::NewestFirst => doc! { "createdAt": -1 },
            SortOrder::TopRated => doc! { "ratings.average": -1 },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaptopQuery {
    pub filters: Vec<LaptopFilter>,
    pub sort: Option<SortOrder>,
    /// `None` means unlimited. Always positive when set.
    pub limit: Option<i64>,
}

impl LaptopQuery {
    /// Every record, in the store's natural order.
    pub fn catalog() -> Self {
        Self::default()
    }

    pub fn flash_sales(limit: Option<i64>) -> Self {
        Self::catalog()
            .with_filter(LaptopFilter::OnFlashSale)
            .sorted_by(SortOrder::NewestFirst)
            .limited_to(limit)
    }

    pub fn trending() -> Self {
        Self::catalog()
            .sorted_by(SortOrder::TopRated)
            .limited_to(Some(TRENDING_LIMIT))
    }

    pub fn with_filter(mut self, filter: LaptopFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn sorted_by(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn limited_to(mut self, limit: Option<i64>) -> Self {
        self.limit = limit.filter(|n| *n > 0);
        self
    }

    pub fn filter_document(&self) -> Document {
        match self.filters.as_slice() {
            [] => Document::new(),
            [single] => single.to_document(),
            many => {
                let clauses: Vec<Document> = many.iter().map(LaptopFilter::to_document).collect();
                doc! { "$and": clauses }
            }
        }
    }

    pub fn find_options(&self) -> FindOptions {
        FindOptions::builder()
            .sort(self.sort.map(SortOrder::to_document))
            .limit(self.limit)
            .build()
    }
}
