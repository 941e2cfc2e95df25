//! Domain model for the to-do list.
//!
//! # Responsibility
//! - Define canonical data structures shared by store, codec and UI facade.
//!
//! # Invariants
//! - Items are plain values; ordering in the store is their persisted identity.

pub mod item;
