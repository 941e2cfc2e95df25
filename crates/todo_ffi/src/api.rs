//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose list operations to Dart via FRB as plain values and envelopes.
//! - Own the one process-wide store the UI talks to.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Calls are serialized through one mutex, so writes stay totally ordered.
//! - Item ids cross the boundary as UTF-8 UUID strings.

use log::warn;
use std::sync::{Mutex, MutexGuard};
use todo_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ItemEntry, ItemId, ItemStore, JsonFileCodec, LoadOutcome, StoreConfig, StoreResult,
};
use uuid::Uuid;

static STORE: Mutex<Option<ItemStore<JsonFileCodec>>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One row of the to-do list as rendered by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItemView {
    /// Session id in string form; valid until the next `todo_open`.
    pub id: String,
    pub text: String,
    pub completed: bool,
}

/// Generic action response envelope for list mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected item id, when the action targets one item.
    pub item_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TodoActionResponse {
    fn success(message: impl Into<String>, item_id: Option<ItemId>) -> Self {
        Self {
            ok: true,
            item_id: item_id.map(|id| id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            item_id: None,
            message: message.into(),
        }
    }
}

/// Opens the store file and loads it; call once on app foreground start.
///
/// Reopening replaces the process store and invalidates earlier item ids.
///
/// # FFI contract
/// - Sync call, performs file I/O.
/// - A malformed file is moved aside and reported with `ok=true`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_open(path: String) -> TodoActionResponse {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return TodoActionResponse::failure("todo_open failed: path cannot be empty");
    }

    match ItemStore::open(&StoreConfig::new(trimmed)) {
        Ok((store, outcome)) => {
            let message = match &outcome {
                LoadOutcome::Loaded { items } => format!("Loaded {items} item(s)."),
                LoadOutcome::Recovered { backup, .. } => match backup {
                    Some(backup) => format!(
                        "List file was unreadable; started empty. Backup: {}",
                        backup.display()
                    ),
                    None => "List file was unreadable; started empty.".to_string(),
                },
            };
            *lock_store() = Some(store);
            TodoActionResponse::success(message, None)
        }
        Err(err) => TodoActionResponse::failure(format!("todo_open failed: {err}")),
    }
}

/// Returns the current list in display order; empty when not opened.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_list() -> Vec<TodoItemView> {
    match lock_store().as_ref() {
        Some(store) => store.entries().map(to_item_view).collect(),
        None => Vec::new(),
    }
}

/// Appends a new item with the raw popup text.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_add(text: String) -> TodoActionResponse {
    match with_store(|store| store.add(text)) {
        Ok(entry) => TodoActionResponse::success("Item added.", Some(entry.id)),
        Err(err) => TodoActionResponse::failure(format!("todo_add failed: {err}")),
    }
}

/// Replaces the text of one item (edit popup save).
#[flutter_rust_bridge::frb(sync)]
pub fn todo_update(item_id: String, text: String) -> TodoActionResponse {
    let id = match parse_item_id(&item_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match with_store(|store| store.update(id, text)) {
        Ok(()) => TodoActionResponse::success("Item updated.", Some(id)),
        Err(err) => TodoActionResponse::failure(format!("todo_update failed: {err}")),
    }
}

/// Flips completion of one item (checkbox tap).
#[flutter_rust_bridge::frb(sync)]
pub fn todo_toggle(item_id: String) -> TodoActionResponse {
    let id = match parse_item_id(&item_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match with_store(|store| store.toggle_completed(id)) {
        Ok(true) => TodoActionResponse::success("Item completed.", Some(id)),
        Ok(false) => TodoActionResponse::success("Item reopened.", Some(id)),
        Err(err) => TodoActionResponse::failure(format!("todo_toggle failed: {err}")),
    }
}

/// Sets completion of one item to a checkbox value.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_set_completed(item_id: String, completed: bool) -> TodoActionResponse {
    let id = match parse_item_id(&item_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match with_store(|store| store.set_completed(id, completed)) {
        Ok(()) => TodoActionResponse::success("Item saved.", Some(id)),
        Err(err) => TodoActionResponse::failure(format!("todo_set_completed failed: {err}")),
    }
}

/// Deletes one item (trash button).
#[flutter_rust_bridge::frb(sync)]
pub fn todo_remove(item_id: String) -> TodoActionResponse {
    let id = match parse_item_id(&item_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match with_store(|store| store.remove(id)) {
        Ok(_) => TodoActionResponse::success("Item deleted.", Some(id)),
        Err(err) => TodoActionResponse::failure(format!("todo_remove failed: {err}")),
    }
}

/// Applies a completed drag-reorder gesture.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_reorder(from_index: u32, to_index: u32) -> TodoActionResponse {
    match with_store(|store| store.reorder(from_index as usize, to_index as usize)) {
        Ok(()) => TodoActionResponse::success("Items reordered.", None),
        Err(err) => TodoActionResponse::failure(format!("todo_reorder failed: {err}")),
    }
}

fn lock_store() -> MutexGuard<'static, Option<ItemStore<JsonFileCodec>>> {
    STORE.lock().unwrap_or_else(|poisoned| {
        warn!("event=ffi_lock module=ffi status=recovered reason=poisoned");
        poisoned.into_inner()
    })
}

fn with_store<T>(
    f: impl FnOnce(&mut ItemStore<JsonFileCodec>) -> StoreResult<T>,
) -> Result<T, String> {
    let mut guard = lock_store();
    let store = guard
        .as_mut()
        .ok_or_else(|| "store not opened; call todo_open first".to_string())?;
    f(store).map_err(|err| err.to_string())
}

fn parse_item_id(raw: &str) -> Result<ItemId, TodoActionResponse> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| TodoActionResponse::failure(format!("invalid item id `{raw}`")))
}

fn to_item_view(entry: ItemEntry) -> TodoItemView {
    TodoItemView {
        id: entry.id.to_string(),
        text: entry.item.text,
        completed: entry.item.completed,
    }
}
