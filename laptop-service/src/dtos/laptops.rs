use crate::models::Laptop;
use crate::services::{LaptopFilter, LaptopQuery};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use thiserror::Error;

/// Query string of `GET /laptops`.
///
/// Every field stays a raw string so that a bad value never rejects the whole
/// request at extraction time; each one goes through its own parser instead.
#[derive(Debug, Default, Deserialize)]
pub struct LaptopListParams {
    pub limit: Option<String>,
    pub brand: Option<String>,
    #[serde(rename = "priceRange")]
    pub price_range: Option<String>,
    pub ratings: Option<String>,
}

/// Query string of `GET /flash-sales`.
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryParamError {
    #[error("invalid priceRange parameter")]
    PriceRange,

    #[error("invalid ratings parameter")]
    Ratings,
}

impl From<QueryParamError> for AppError {
    fn from(err: QueryParamError) -> Self {
        AppError::BadRequest(anyhow::Error::new(err))
    }
}

impl LaptopListParams {
    pub fn into_query(self) -> Result<LaptopQuery, QueryParamError> {
        let mut query = LaptopQuery::catalog().limited_to(parse_limit(self.limit.as_deref()));

        if let Some(brands) = self.brand.as_deref().and_then(parse_brands) {
            query = query.with_filter(LaptopFilter::Brands(brands));
        }

        if let Some(raw) = self.price_range.as_deref() {
            let (min, max) = parse_price_range(raw)?;
            query = query.with_filter(LaptopFilter::PriceRange { min, max });
        }

        if let Some(raw) = self.ratings.as_deref() {
            let min = parse_rating(raw)?;
            query = query.with_filter(LaptopFilter::RatingBucket { min });
        }

        Ok(query)
    }
}

impl LimitParams {
    pub fn limit(&self) -> Option<i64> {
        parse_limit(self.limit.as_deref())
    }
}

/// Reads the leading integer of `raw` (`"12"`, `" 12abc"`).
///
/// Anything that does not yield a positive integer means "no limit".
pub fn parse_limit(raw: Option<&str>) -> Option<i64> {
    let trimmed = raw?.trim_start();
    let digits_end = trimmed
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || (*i == 0 && (*c == '+' || *c == '-'))))
        .map_or(trimmed.len(), |(i, _)| i);

    trimmed[..digits_end]
        .parse::<i64>()
        .ok()
        .filter(|n| *n > 0)
}

/// Splits a comma-separated brand list. `None` when no brand survives trimming.
pub fn parse_brands(raw: &str) -> Option<Vec<String>> {
    let brands: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .collect();

    (!brands.is_empty()).then_some(brands)
}

/// Parses `"$<min> - $<max>"`. The currency symbol, spaces and thousands
/// separators (`"$1,000"`) are optional.
pub fn parse_price_range(raw: &str) -> Result<(f64, f64), QueryParamError> {
    let (low, high) = raw.split_once('-').ok_or(QueryParamError::PriceRange)?;
    let min = parse_price(low).ok_or(QueryParamError::PriceRange)?;
    let max = parse_price(high).ok_or(QueryParamError::PriceRange)?;
    Ok((min, max))
}

fn parse_price(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let amount = trimmed.strip_prefix('$').unwrap_or(trimmed).trim().replace(',', "");
    amount.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_rating(raw: &str) -> Result<f64, QueryParamError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(QueryParamError::Ratings)
}

/// JSON rendering of a stored record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LaptopResponse(pub serde_json::Value);

impl From<Laptop> for LaptopResponse {
    fn from(laptop: Laptop) -> Self {
        Self(laptop.into_json())
    }
}
