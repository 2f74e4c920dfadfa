//! Generic JSON-backed repository
//!
//! One repository per record type, each persisted to its own JSON file.
//! Every mutation is committed to disk before it returns; if the write fails
//! the in-memory map is rolled back so readers never see an uncommitted
//! record.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::error::{RentalError, RentalResult};
use crate::models::Entity;

use super::file_io::{read_json, write_json_atomic};

/// On-disk layout of a repository file
#[derive(Debug, Serialize, Deserialize)]
struct RecordFile<T> {
    #[serde(default = "Vec::new")]
    records: Vec<T>,
}

impl<T> Default for RecordFile<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

/// Repository for one record type
pub struct Repository<T: Entity> {
    path: PathBuf,
    data: RwLock<HashMap<T::Id, T>>,
}

impl<T: Entity> Repository<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read(&self) -> RentalResult<RwLockReadGuard<'_, HashMap<T::Id, T>>> {
        self.data
            .read()
            .map_err(|e| RentalError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> RentalResult<RwLockWriteGuard<'_, HashMap<T::Id, T>>> {
        self.data
            .write()
            .map_err(|e| RentalError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Replace the in-memory state with the file contents
    pub fn load(&self) -> RentalResult<()> {
        let file: RecordFile<T> = read_json(&self.path)?;

        let mut data = self.write()?;
        data.clear();
        for record in file.records {
            data.insert(record.id(), record);
        }

        log::debug!(
            "Loaded {} {} record(s) from {}",
            data.len(),
            T::NAME,
            self.path.display()
        );
        Ok(())
    }

    fn persist(&self, data: &HashMap<T::Id, T>) -> RentalResult<()> {
        let mut records: Vec<T> = data.values().cloned().collect();
        records.sort_by_key(|r| r.sort_key());
        write_json_atomic(&self.path, &RecordFile { records })
    }

    /// Apply a change and write it through, restoring the previous state on failure
    fn commit<R>(
        &self,
        change: impl FnOnce(&mut HashMap<T::Id, T>) -> RentalResult<R>,
    ) -> RentalResult<R> {
        let mut data = self.write()?;
        let snapshot = data.clone();

        let result = change(&mut data)?;

        if let Err(e) = self.persist(&data) {
            log::error!("Rolling back {} change: {}", T::NAME, e);
            *data = snapshot;
            return Err(e);
        }

        Ok(result)
    }

    pub fn get(&self, id: T::Id) -> RentalResult<Option<T>> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// All records, ordered by their sort key
    pub fn get_all(&self) -> RentalResult<Vec<T>> {
        let mut records: Vec<T> = self.read()?.values().cloned().collect();
        records.sort_by_key(|r| r.sort_key());
        Ok(records)
    }

    /// Records matching a predicate, ordered by their sort key
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> RentalResult<Vec<T>> {
        let mut records: Vec<T> = self
            .read()?
            .values()
            .filter(|r| predicate(r))
            .cloned()
            .collect();
        records.sort_by_key(|r| r.sort_key());
        Ok(records)
    }

    pub fn exists(&self, id: T::Id) -> RentalResult<bool> {
        Ok(self.read()?.contains_key(&id))
    }

    pub fn count(&self) -> RentalResult<usize> {
        Ok(self.read()?.len())
    }

    /// Add a new record
    pub fn insert(&self, record: T) -> RentalResult<()> {
        self.commit(|data| {
            data.insert(record.id(), record);
            Ok(())
        })
    }

    /// Overwrite an existing record, returning the previous version
    pub fn update(&self, record: T) -> RentalResult<T> {
        self.commit(|data| match data.get_mut(&record.id()) {
            Some(existing) => Ok(std::mem::replace(existing, record)),
            None => Err(RentalError::not_found(T::NAME, record.id().to_string())),
        })
    }

    /// Remove a record, returning it
    pub fn delete(&self, id: T::Id) -> RentalResult<T> {
        self.commit(|data| {
            data.remove(&id)
                .ok_or_else(|| RentalError::not_found(T::NAME, id.to_string()))
        })
    }

    /// Replace every record at once
    pub fn replace_all(&self, records: Vec<T>) -> RentalResult<()> {
        self.commit(|data| {
            data.clear();
            for record in records {
                data.insert(record.id(), record);
            }
            Ok(())
        })
    }
}
