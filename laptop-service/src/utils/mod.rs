pub mod query;

pub use query::{StrictQuery, INVALID_QUERY_MESSAGE};
