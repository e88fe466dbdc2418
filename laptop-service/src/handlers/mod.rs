pub mod health;
pub mod laptops;

pub use health::{health_check, metrics_endpoint, readiness_check, server_status};
pub use laptops::{flash_sales, get_laptop, list_laptops, trending};
