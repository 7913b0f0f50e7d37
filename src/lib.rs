//! Weather API
//!
//! Read-only HTTP/JSON access to a collection of city weather records kept
//! in SurrealDB.

pub mod config;
pub mod cors;
pub mod error;
pub mod record;
pub mod routes;
pub mod store;

pub use config::Config;
pub use record::WeatherRecord;
pub use routes::router;
pub use store::{StoreError, StoreSettings, SurrealStore, WeatherStore};
