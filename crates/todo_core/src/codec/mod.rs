//! Persistence codec contracts and implementations.
//!
//! # Responsibility
//! - Map the ordered item sequence to and from durable storage.
//! - Keep file layout and JSON details out of the store.
//!
//! # Invariants
//! - `write` replaces the whole snapshot; there are no partial writes.
//! - `read` of an absent snapshot is an empty sequence, not an error.
//! - `read` rejects malformed snapshots instead of masking them.

use crate::model::item::Item;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod json_file;

pub use json_file::JsonFileCodec;

pub type CodecResult<T> = Result<T, CodecError>;

/// Storage-level failure raised by a codec.
#[derive(Debug)]
pub enum CodecError {
    /// File system read/write/rename failure.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Snapshot exists but is not a JSON array of item objects.
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Sequence could not be serialized.
    Encode(serde_json::Error),
    /// An earlier load left unread data on disk; writing would destroy it.
    Unrecovered { reason: String },
}

impl CodecError {
    /// Returns whether this failure came from unreadable snapshot contents.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::Unrecovered { .. })
    }
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o failure on `{}`: {source}", path.display()),
            Self::Decode { path, source } => {
                write!(f, "malformed item snapshot `{}`: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "failed to encode items: {err}"),
            Self::Unrecovered { reason } => {
                write!(f, "writes blocked until the item snapshot is readable: {reason}")
            }
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::Unrecovered { .. } => None,
        }
    }
}

/// Snapshot codec used by `ItemStore`.
pub trait ItemCodec {
    /// Reads the full ordered sequence.
    fn read(&self) -> CodecResult<Vec<Item>>;
    /// Replaces the stored snapshot with `items`.
    fn write(&self, items: &[Item]) -> CodecResult<()>;
    /// Moves an unreadable snapshot aside so later writes cannot destroy it.
    ///
    /// Returns the backup location, or `None` when nothing was stored.
    fn quarantine(&self) -> CodecResult<Option<PathBuf>>;
}
