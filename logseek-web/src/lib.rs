//! Logseek Web - Event search service

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! JSON search API over event records loaded from JSON Lines files, and from
//! Parquet files with the `parquet` feature. Serves
//! the `GET /search?q=` contract the Logseek client talks to.

pub mod errors;
pub mod handlers;
pub mod loader;
#[cfg(feature = "parquet")]
pub mod parquet_file;
pub mod server;

// Re-export main types
pub use errors::ServiceError;
pub use loader::{load_event_dir, load_event_file};
#[cfg(feature = "parquet")]
pub use parquet_file::load_parquet_file;
pub use server::{AppState, router, run_server, serve};
