//! To-do item domain model.
//!
//! # Responsibility
//! - Define the plain value record rendered by the list UI.
//! - Define the session-scoped identity used to address items.
//!
//! # Invariants
//! - `Item` carries no identity and no change notification; the store is the
//!   only mutator of tracked items.
//! - Wire field names are `listItem` and `isCompleted` and never change.
//! - `ItemId` is never written to disk.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Session-scoped handle for one tracked item.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Ids are assigned on load/add and are not stable across process restarts.
pub type ItemId = Uuid;

/// One to-do entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// User-supplied label. No length or character validation.
    #[serde(rename = "listItem", deserialize_with = "text_or_null")]
    pub text: String,
    /// Completion flag.
    #[serde(rename = "isCompleted")]
    pub completed: bool,
}

impl Item {
    /// Creates a new, not yet completed item.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }

    /// Returns whether text is empty after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        is_blank(&self.text)
    }
}

/// Returns whether `text` is empty after trimming whitespace.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

impl Display for Item {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.text, self.completed)
    }
}

/// Tracked item paired with its session id, as handed to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEntry {
    pub id: ItemId,
    pub item: Item,
}

// Files written by older app builds contain `"listItem": null` when an item
// was added from an untouched input field.
fn text_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
