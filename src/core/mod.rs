//! Core module: domain models, stores, services, and remote adapters

pub mod admission;
pub mod analytics;
pub mod config;
pub mod ids;
pub mod messaging;
pub mod models;
pub mod remote;
pub mod seed;
pub mod store;

/// Returns the current version of the `esst-core` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
