//! Domain and state layer for the ESST school portal.
//!
//! Holds the typed in-memory repositories behind the public site and the
//! back-office, the analytics aggregation service, the messaging and
//! admission services, and the REST adapters for the pages and
//! project-configuration backends.

pub mod core;
pub mod logger;

pub use self::core::*;
