//! Item store: the single mutation gateway for the to-do list.
//!
//! # Responsibility
//! - Own the authoritative ordered item sequence.
//! - Persist through a codec after every mutation.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod item_store;
