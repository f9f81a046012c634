// src/lib.rs
pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod schema;
pub mod search;
pub mod server;
pub mod slug;
pub mod store;
pub mod upload;

#[cfg(test)]
mod testing;

pub use config::AppConfig;
pub use engine::{CatalogEngine, CatalogEngineBuilder};
pub use error::{CatalogError, CatalogResult};
pub use schema::*;
pub use store::{DocumentStore, Filter, MemoryStore, SledStore, StoreError, StoreResult};
pub use upload::{UploadForm, UploadOutcome};
