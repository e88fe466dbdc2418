pub mod database;
pub mod memory;
pub mod metrics;
pub mod query;
pub mod store;

pub use database::MongoDb;
pub use memory::InMemoryLaptopStore;
pub use metrics::{get_metrics, init_metrics};
pub use query::{LaptopFilter, LaptopQuery, SortOrder};
pub use store::LaptopStore;
