pub mod client;
pub mod query;
pub mod resources;

pub use client::ApiClient;
pub use query::{DateSort, ListFilter, QueryParams};
pub use resources::Resource;
