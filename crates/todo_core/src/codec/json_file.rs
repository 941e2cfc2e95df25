//! JSON file codec.
//!
//! # Responsibility
//! - Store the item sequence as one compact JSON array at a configured path.
//! - Replace the file via write-to-temp-then-rename.
//!
//! # Invariants
//! - The temp file lives in the target directory so rename stays on one
//!   filesystem.
//! - Logs carry counts and durations only, never item text.

use super::{CodecError, CodecResult, ItemCodec};
use crate::config::StoreConfig;
use crate::model::item::Item;
use log::{error, info, warn};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tempfile::NamedTempFile;

/// File-backed JSON codec.
#[derive(Debug, Clone)]
pub struct JsonFileCodec {
    path: PathBuf,
}

impl JsonFileCodec {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> CodecError {
        CodecError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn write_atomic(&self, bytes: &[u8]) -> CodecResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|source| CodecError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut temp_file = NamedTempFile::new_in(dir).map_err(|err| self.io_error(err))?;
        temp_file.write_all(bytes).map_err(|err| self.io_error(err))?;
        temp_file.flush().map_err(|err| self.io_error(err))?;
        temp_file
            .as_file()
            .sync_all()
            .map_err(|err| self.io_error(err))?;
        temp_file
            .persist(&self.path)
            .map_err(|err| self.io_error(err.error))?;
        Ok(())
    }
}

impl ItemCodec for JsonFileCodec {
    fn read(&self) -> CodecResult<Vec<Item>> {
        let started_at = Instant::now();
        // Bytes, not a String: a torn multi-byte character is a decode failure.
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("event=codec_read module=codec status=ok file=absent items=0");
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(
                    "event=codec_read module=codec status=error error_code=read_failed error={}",
                    err
                );
                return Err(self.io_error(err));
            }
        };

        match serde_json::from_slice::<Vec<Item>>(&raw) {
            Ok(items) => {
                info!(
                    "event=codec_read module=codec status=ok file=present items={} duration_ms={}",
                    items.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(items)
            }
            Err(source) => {
                warn!(
                    "event=codec_read module=codec status=error error_code=decode_failed line={} column={}",
                    source.line(),
                    source.column()
                );
                Err(CodecError::Decode {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }

    fn write(&self, items: &[Item]) -> CodecResult<()> {
        let started_at = Instant::now();
        let bytes = serde_json::to_vec(items).map_err(CodecError::Encode)?;

        match self.write_atomic(&bytes) {
            Ok(()) => {
                info!(
                    "event=codec_write module=codec status=ok items={} bytes={} duration_ms={}",
                    items.len(),
                    bytes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=codec_write module=codec status=error items={} duration_ms={} error_code=write_failed error={}",
                    items.len(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn quarantine(&self) -> CodecResult<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let backup = backup_path(&self.path, unix_millis());
        fs::rename(&self.path, &backup).map_err(|err| self.io_error(err))?;
        warn!(
            "event=codec_quarantine module=codec status=ok backup={}",
            backup.display()
        );
        Ok(Some(backup))
    }
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}

/// First free `<file>.corrupt-<millis>[-n]` name next to `path`.
fn backup_path(path: &Path, millis: u128) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "store".to_string());
    let base = format!("{file_name}.corrupt-{millis}");

    let mut candidate = path.with_file_name(&base);
    let mut suffix = 1u32;
    while candidate.exists() {
        candidate = path.with_file_name(format!("{base}-{suffix}"));
        suffix += 1;
    }
    candidate
}
