//! Core domain logic for the to-do list app.
//! This crate is the single source of truth for item ordering and persistence.

pub mod codec;
pub mod config;
pub mod logging;
pub mod model;
pub mod store;

pub use codec::{CodecError, CodecResult, ItemCodec, JsonFileCodec};
pub use config::{StoreConfig, STORE_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::{Item, ItemEntry, ItemId};
pub use store::item_store::{InvalidInput, ItemStore, LoadOutcome, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
