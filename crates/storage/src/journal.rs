//! JournalStore: file-backed storage with an append-only operation journal
//!
//! ## Design
//!
//! - Every mutation is appended to the journal as a CRC-framed bincode
//!   record and fsynced before the in-memory map is updated. A call
//!   that returns success has durably committed; there is no batching.
//! - On open, the journal is replayed into a fresh map. A torn or
//!   corrupt tail frame (short read or CRC mismatch) is logged and the
//!   file is truncated back to the last valid frame; everything before
//!   it survives.
//!
//! ## Frame format
//!
//! `<payload_len: u32 LE> <crc32(payload): u32 LE> <payload>` where the
//! payload is a bincode-encoded [`JournalOp`].

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::ops::Bound;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use ledgerbook_core::error::{Error, Result};
use ledgerbook_core::traits::Storage;

/// One journaled mutation
///
/// A `Batch` lands in a single frame, so its puts commit or vanish
/// together across replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
enum JournalOp {
    Put { key: Vec<u8>, value: Vec<u8> },
    Delete { key: Vec<u8> },
    Batch { puts: Vec<(Vec<u8>, Vec<u8>)> },
}

/// File-backed storage with synchronous journal persistence
pub struct JournalStore {
    data: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
    file: Mutex<File>,
    path: PathBuf,
}

impl JournalStore {
    /// Open (or create) a journal at `path` and replay it
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&path)?;

        let (data, valid_len) = Self::replay(&mut file)?;

        let file_len = file.metadata()?.len();
        if valid_len < file_len {
            warn!(
                path = %path.display(),
                valid_len,
                file_len,
                "truncating corrupt journal tail"
            );
            file.set_len(valid_len)?;
            file.sync_all()?;
        }
        file.seek(SeekFrom::End(0))?;

        debug!(path = %path.display(), keys = data.len(), "journal replayed");

        Ok(Self {
            data: RwLock::new(data),
            file: Mutex::new(file),
            path,
        })
    }

    /// Path of the backing journal file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replay frames from the start of the file
    ///
    /// Returns the reconstructed map and the byte offset of the last
    /// frame that decoded cleanly.
    fn replay(file: &mut File) -> Result<(BTreeMap<Vec<u8>, Vec<u8>>, u64)> {
        file.seek(SeekFrom::Start(0))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;

        let mut data = BTreeMap::new();
        let mut offset = 0usize;
        let mut valid_len = 0u64;

        while offset + 8 <= bytes.len() {
            let payload_len =
                u32::from_le_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
                    as usize;
            let stored_crc = u32::from_le_bytes([
                bytes[offset + 4],
                bytes[offset + 5],
                bytes[offset + 6],
                bytes[offset + 7],
            ]);

            let payload_start = offset + 8;
            let payload_end = payload_start + payload_len;
            if payload_end > bytes.len() {
                // Torn frame at the tail
                break;
            }

            let payload = &bytes[payload_start..payload_end];
            if crc32fast::hash(payload) != stored_crc {
                break;
            }

            let op: JournalOp = bincode::deserialize(payload)
                .map_err(|e| Error::Corruption(format!("journal frame at offset {offset}: {e}")))?;
            match op {
                JournalOp::Put { key, value } => {
                    data.insert(key, value);
                }
                JournalOp::Delete { key } => {
                    data.remove(&key);
                }
                JournalOp::Batch { puts } => {
                    for (key, value) in puts {
                        data.insert(key, value);
                    }
                }
            }

            offset = payload_end;
            valid_len = offset as u64;
        }

        Ok((data, valid_len))
    }

    /// Append one operation frame and fsync it
    fn append(&self, op: &JournalOp) -> Result<()> {
        let payload = bincode::serialize(op)?;
        let mut frame = Vec::with_capacity(8 + payload.len());
        frame.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        frame.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
        frame.extend_from_slice(&payload);

        let mut file = self.file.lock();
        file.write_all(&frame)?;
        file.sync_data()?;
        Ok(())
    }
}

impl Storage for JournalStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.append(&JournalOp::Put {
            key: key.to_vec(),
            value: value.to_vec(),
        })?;
        self.data.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn put_many(&self, pairs: &[(Vec<u8>, Vec<u8>)]) -> Result<()> {
        self.append(&JournalOp::Batch {
            puts: pairs.to_vec(),
        })?;
        let mut data = self.data.write();
        for (key, value) in pairs {
            data.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<bool> {
        let existed = self.data.read().contains_key(key);
        if existed {
            self.append(&JournalOp::Delete { key: key.to_vec() })?;
            self.data.write().remove(key);
        }
        Ok(existed)
    }

    fn contains(&self, key: &[u8]) -> Result<bool> {
        Ok(self.data.read().contains_key(key))
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let data = self.data.read();
        let iter = data.range::<Vec<u8>, _>((Bound::Included(&prefix.to_vec()), Bound::Unbounded));
        Ok(iter
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
