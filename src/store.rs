//! Persistence seam for derived records.
//!
//! The engine hands finished records to a [`RecordStore`] and reads them back
//! newest first. Failures are returned to the caller untouched so a computed
//! record can be retried without recomputation.

use crate::error::{LedgerError, LedgerResult};
use crate::valuation::DerivedRecord;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub trait RecordStore {
    /// All records, newest date first.
    fn list(&self) -> LedgerResult<Vec<DerivedRecord>>;
    /// Stores a new record and returns its id.
    fn create(&mut self, record: DerivedRecord) -> LedgerResult<String>;
    /// Replaces the record wholesale.
    fn update(&mut self, id: &str, record: DerivedRecord) -> LedgerResult<()>;
    fn delete(&mut self, id: &str) -> LedgerResult<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    // Most recently inserted first.
    inner: Vec<DerivedRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { inner: vec![] }
    }

    pub fn from_records(records: Vec<DerivedRecord>) -> Self {
        Self { inner: records }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn position(&self, id: &str) -> LedgerResult<usize> {
        self.inner
            .iter()
            .position(|r| r.id.as_deref() == Some(id))
            .ok_or_else(|| LedgerError::RecordNotFound(id.to_string()))
    }

    fn next_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        while self
            .inner
            .iter()
            .any(|r| r.id.as_deref() == Some(candidate.to_string().as_str()))
        {
            candidate += 1;
        }
        candidate.to_string()
    }
}

impl RecordStore for MemoryStore {
    fn list(&self) -> LedgerResult<Vec<DerivedRecord>> {
        let mut records = self.inner.clone();
        // Stable: same-day records stay most-recent-first.
        records.sort_by(|a, b| b.date().cmp(a.date()));
        Ok(records)
    }

    fn create(&mut self, mut record: DerivedRecord) -> LedgerResult<String> {
        let id = match &record.id {
            Some(id) if self.position(id).is_err() => id.clone(),
            _ => self.next_id(),
        };
        record.id = Some(id.clone());
        self.inner.insert(0, record);
        debug!("Created record {}", id);
        Ok(id)
    }

    fn update(&mut self, id: &str, mut record: DerivedRecord) -> LedgerResult<()> {
        let index = self.position(id)?;
        record.id = Some(id.to_string());
        self.inner[index] = record;
        debug!("Updated record {}", id);
        Ok(())
    }

    fn delete(&mut self, id: &str) -> LedgerResult<()> {
        let index = self.position(id)?;
        self.inner.remove(index);
        debug!("Deleted record {}", id);
        Ok(())
    }
}

/// Records kept as one pretty-printed JSON array, rewritten on every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    memory: MemoryStore,
}

impl JsonFileStore {
    /// Opens `path`, starting empty when the file does not exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let path = path.as_ref().to_path_buf();
        let records: Vec<DerivedRecord> = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                vec![]
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            vec![]
        };

        info!("📂 Loaded {} records from {}", records.len(), path.display());
        Ok(Self {
            path,
            memory: MemoryStore::from_records(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `change` to a copy, writes the copy, then keeps it.
    /// A failed write leaves both memory and disk as they were.
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut MemoryStore) -> LedgerResult<T>,
    ) -> LedgerResult<T> {
        let mut staged = self.memory.clone();
        let out = change(&mut staged)?;
        Self::flush(&self.path, &staged)?;
        self.memory = staged;
        Ok(out)
    }

    fn flush(path: &Path, memory: &MemoryStore) -> LedgerResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&memory.inner)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn list(&self) -> LedgerResult<Vec<DerivedRecord>> {
        self.memory.list()
    }

    fn create(&mut self, record: DerivedRecord) -> LedgerResult<String> {
        self.commit(|memory| memory.create(record))
    }

    fn update(&mut self, id: &str, record: DerivedRecord) -> LedgerResult<()> {
        self.commit(|memory| memory.update(id, record))
    }

    fn delete(&mut self, id: &str) -> LedgerResult<()> {
        self.commit(|memory| memory.delete(id))
    }
}
