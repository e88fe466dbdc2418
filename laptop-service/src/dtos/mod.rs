pub mod laptops;

pub use laptops::{LaptopListParams, LaptopResponse, LimitParams, QueryParamError};
