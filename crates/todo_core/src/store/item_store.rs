//! Ordered item store with write-through persistence.
//!
//! # Responsibility
//! - Provide add/update/toggle/remove/reorder entry points for callers.
//! - Rehydrate the whole sequence from the codec on load.
//!
//! # Invariants
//! - Every mutation writes the full sequence before it becomes visible.
//! - A failed write leaves the in-memory sequence untouched, so memory and
//!   disk stay reconcilable after every completed call.
//! - `items` and `ids` always have the same length and order.
//! - A malformed snapshot never aborts startup; it is moved aside and the
//!   store starts empty.
//! - A malformed snapshot that cannot be moved aside blocks every write until
//!   a later `load` succeeds.

use crate::codec::{CodecError, ItemCodec, JsonFileCodec};
use crate::config::StoreConfig;
use crate::model::item::{is_blank, Item, ItemEntry, ItemId};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Caller input the store refuses to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    /// No tracked item has this id.
    UnknownItem(ItemId),
    /// Index is outside the current sequence.
    IndexOutOfRange { index: usize, len: usize },
    /// Text is blank and the store is configured to reject it.
    BlankText,
}

impl Display for InvalidInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownItem(id) => write!(f, "item not found: {id}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} item(s)")
            }
            Self::BlankText => write!(f, "item text must not be blank"),
        }
    }
}

impl Error for InvalidInput {}

/// Tagged failure returned by every store operation.
#[derive(Debug)]
pub enum StoreError {
    IoFailure(CodecError),
    DecodeFailure(CodecError),
    InvalidInput(InvalidInput),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoFailure(err) => write!(f, "{err}"),
            Self::DecodeFailure(err) => write!(f, "{err}"),
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IoFailure(err) => Some(err),
            Self::DecodeFailure(err) => Some(err),
            Self::InvalidInput(err) => Some(err),
        }
    }
}

impl From<CodecError> for StoreError {
    fn from(value: CodecError) -> Self {
        if value.is_decode() {
            Self::DecodeFailure(value)
        } else {
            Self::IoFailure(value)
        }
    }
}

impl From<InvalidInput> for StoreError {
    fn from(value: InvalidInput) -> Self {
        Self::InvalidInput(value)
    }
}

/// Result of `ItemStore::load`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Snapshot read (or absent); store holds `items` entries.
    Loaded { items: usize },
    /// Snapshot was malformed; store is empty and the old file was moved to
    /// `backup`.
    Recovered {
        backup: Option<PathBuf>,
        reason: String,
    },
}

/// Authoritative ordered collection of to-do items.
pub struct ItemStore<C: ItemCodec> {
    codec: C,
    reject_blank_text: bool,
    items: Vec<Item>,
    ids: Vec<ItemId>,
    /// Set when unread data is still on disk.
    write_block: Option<String>,
}

impl ItemStore<JsonFileCodec> {
    /// Creates an empty, not yet loaded store for the configured file.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(JsonFileCodec::from_config(config)).reject_blank_text(config.reject_blank_text)
    }

    /// Creates a store for the configured file and loads it.
    pub fn open(config: &StoreConfig) -> StoreResult<(Self, LoadOutcome)> {
        let mut store = Self::from_config(config);
        let outcome = store.load()?;
        Ok((store, outcome))
    }
}

impl<C: ItemCodec> ItemStore<C> {
    /// Creates an empty store over `codec`. Call `load` to rehydrate.
    pub fn new(codec: C) -> Self {
        Self {
            codec,
            reject_blank_text: false,
            items: Vec::new(),
            ids: Vec::new(),
            write_block: None,
        }
    }

    /// Sets whether blank text is refused by `add` and `update`.
    pub fn reject_blank_text(mut self, reject: bool) -> Self {
        self.reject_blank_text = reject;
        self
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Replaces the whole sequence with the stored snapshot.
    ///
    /// # Contract
    /// - Absent snapshot loads as an empty sequence.
    /// - Malformed snapshot is quarantined and loads as empty
    ///   (`LoadOutcome::Recovered`).
    ///
    /// # Errors
    /// - `IoFailure` when the snapshot exists but cannot be read.
    /// - `DecodeFailure` when it is malformed and cannot be moved aside; the
    ///   store then stays empty and refuses writes.
    pub fn load(&mut self) -> StoreResult<LoadOutcome> {
        match self.codec.read() {
            Ok(items) => {
                self.write_block = None;
                self.replace_all(items);
                info!(
                    "event=store_load module=store status=ok items={}",
                    self.items.len()
                );
                Ok(LoadOutcome::Loaded {
                    items: self.items.len(),
                })
            }
            Err(err) if err.is_decode() => {
                self.replace_all(Vec::new());
                let reason = err.to_string();
                match self.codec.quarantine() {
                    Ok(backup) => {
                        self.write_block = None;
                        warn!(
                            "event=store_load module=store status=recovered items=0 backup_created={}",
                            backup.is_some()
                        );
                        Ok(LoadOutcome::Recovered { backup, reason })
                    }
                    Err(quarantine_err) => {
                        error!(
                            "event=store_load module=store status=error error_code=quarantine_failed error={}",
                            quarantine_err
                        );
                        self.write_block = Some(reason);
                        Err(StoreError::DecodeFailure(err))
                    }
                }
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error error_code=read_failed error={}",
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Appends a new, not completed item and persists.
    pub fn add(&mut self, text: impl Into<String>) -> StoreResult<ItemEntry> {
        let item = Item::new(text);
        self.check_text(&item.text)?;

        let id = Uuid::new_v4();
        let mut items = self.items.clone();
        let mut ids = self.ids.clone();
        items.push(item.clone());
        ids.push(id);
        self.commit("add", items, ids)?;

        Ok(ItemEntry { id, item })
    }

    /// Replaces the text of one item and persists.
    pub fn update(&mut self, id: ItemId, text: impl Into<String>) -> StoreResult<()> {
        let text = text.into();
        self.check_text(&text)?;
        let index = self.require(id)?;

        let mut items = self.items.clone();
        items[index].text = text;
        let ids = self.ids.clone();
        self.commit("update", items, ids)
    }

    /// Flips completion of one item, persists, and returns the new value.
    pub fn toggle_completed(&mut self, id: ItemId) -> StoreResult<bool> {
        let index = self.require(id)?;

        let mut items = self.items.clone();
        let completed = items[index].toggle();
        let ids = self.ids.clone();
        self.commit("toggle", items, ids)?;

        Ok(completed)
    }

    /// Sets completion of one item explicitly and persists.
    pub fn set_completed(&mut self, id: ItemId, completed: bool) -> StoreResult<()> {
        let index = self.require(id)?;

        let mut items = self.items.clone();
        items[index].completed = completed;
        let ids = self.ids.clone();
        self.commit("set_completed", items, ids)
    }

    /// Removes one item by id, persists, and returns the removed value.
    pub fn remove(&mut self, id: ItemId) -> StoreResult<Item> {
        let index = self.require(id)?;

        let mut items = self.items.clone();
        let mut ids = self.ids.clone();
        let removed = items.remove(index);
        ids.remove(index);
        self.commit("remove", items, ids)?;

        Ok(removed)
    }

    /// Moves the item at `from_index` so it ends up at `to_index`, then persists.
    ///
    /// Both indices address the sequence before the move.
    pub fn reorder(&mut self, from_index: usize, to_index: usize) -> StoreResult<()> {
        let len = self.items.len();
        for index in [from_index, to_index] {
            if index >= len {
                return Err(InvalidInput::IndexOutOfRange { index, len }.into());
            }
        }

        let mut items = self.items.clone();
        let mut ids = self.ids.clone();
        let item = items.remove(from_index);
        let id = ids.remove(from_index);
        items.insert(to_index, item);
        ids.insert(to_index, id);
        self.commit("reorder", items, ids)
    }

    /// Writes the current sequence again without changing it.
    pub fn persist(&mut self) -> StoreResult<()> {
        let items = self.items.clone();
        let ids = self.ids.clone();
        self.commit("persist", items, ids)
    }

    /// Current items in display order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Current items paired with their session ids, in display order.
    pub fn entries(&self) -> impl Iterator<Item = ItemEntry> + '_ {
        self.ids
            .iter()
            .zip(self.items.iter())
            .map(|(id, item)| ItemEntry {
                id: *id,
                item: item.clone(),
            })
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.position(id).map(|index| &self.items[index])
    }

    pub fn id_at(&self, index: usize) -> Option<ItemId> {
        self.ids.get(index).copied()
    }

    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.ids.iter().position(|candidate| *candidate == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }

    fn require(&self, id: ItemId) -> StoreResult<usize> {
        self.position(id)
            .ok_or_else(|| InvalidInput::UnknownItem(id).into())
    }

    fn check_text(&self, text: &str) -> StoreResult<()> {
        if self.reject_blank_text && is_blank(text) {
            return Err(InvalidInput::BlankText.into());
        }
        Ok(())
    }

    fn replace_all(&mut self, items: Vec<Item>) {
        self.ids = items.iter().map(|_| Uuid::new_v4()).collect();
        self.items = items;
    }

    fn commit(&mut self, op: &'static str, items: Vec<Item>, ids: Vec<ItemId>) -> StoreResult<()> {
        debug_assert_eq!(items.len(), ids.len());
        if let Some(reason) = &self.write_block {
            warn!(
                "event=store_mutation module=store op={} status=error error_code=write_blocked",
                op
            );
            return Err(StoreError::DecodeFailure(CodecError::Unrecovered {
                reason: reason.clone(),
            }));
        }
        match self.codec.write(&items) {
            Ok(()) => {
                self.items = items;
                self.ids = ids;
                info!(
                    "event=store_mutation module=store op={} status=ok items={}",
                    op,
                    self.items.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_mutation module=store op={} status=error error_code=write_failed error={}",
                    op, err
                );
                Err(err.into())
            }
        }
    }
}
