// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The ordered record list and its mutations.
//!
//! Every mutation builds a new list value, swaps it in, and writes the full
//! snapshot to storage before returning. If the write fails the new list is
//! kept in memory and the failure is returned as [`StoreError::Storage`].

use crate::error::StoreError;
use crate::io::persistence::Persistence;
use crate::io::storage::KeyValueStore;
use crate::models::record::Record;

/// `list` with `record` appended.
pub fn with_added(list: &[Record], record: Record) -> Vec<Record> {
    let mut next = list.to_vec();
    next.push(record);
    next
}

/// `list` with the entry at `index` replaced.
pub fn with_replaced(list: &[Record], index: usize, record: Record) -> Result<Vec<Record>, StoreError> {
    check_index(list, index)?;
    let mut next = list.to_vec();
    next[index] = record;
    Ok(next)
}

/// `list` with the entry at `index` removed; later entries move up by one.
pub fn without(list: &[Record], index: usize) -> Result<Vec<Record>, StoreError> {
    check_index(list, index)?;
    let mut next = list.to_vec();
    next.remove(index);
    Ok(next)
}

fn check_index(list: &[Record], index: usize) -> Result<(), StoreError> {
    if index < list.len() {
        Ok(())
    } else {
        Err(StoreError::IndexOutOfRange {
            index,
            len: list.len(),
        })
    }
}

/// In-memory record list mirrored to a key-value store.
pub struct RecordStore<S: KeyValueStore> {
    records: Vec<Record>,
    persistence: Persistence<S>,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Wrap an already loaded list. Nothing is written.
    pub fn new(persistence: Persistence<S>, records: Vec<Record>) -> Self {
        Self {
            records,
            persistence,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record.
    pub fn add(&mut self, record: Record) -> Result<(), StoreError> {
        let next = with_added(&self.records, record);
        self.commit(next)?;
        log::info!("Added record, total: {}", self.len());
        Ok(())
    }

    /// Replace the record at `index`.
    pub fn update(&mut self, index: usize, record: Record) -> Result<(), StoreError> {
        let next = with_replaced(&self.records, index, record)?;
        self.commit(next)?;
        log::info!("Updated record {}", index);
        Ok(())
    }

    /// Remove the record at `index`.
    pub fn delete(&mut self, index: usize) -> Result<(), StoreError> {
        let next = without(&self.records, index)?;
        self.commit(next)?;
        log::info!("Deleted record {}, total: {}", index, self.len());
        Ok(())
    }

    /// Copy of the record at `index` for the form draft.
    pub fn load_for_edit(&self, index: usize) -> Result<Record, StoreError> {
        check_index(&self.records, index)?;
        Ok(self.records[index].clone())
    }

    /// Install a whole list, e.g. from a backup.
    pub fn replace_all(&mut self, records: Vec<Record>) -> Result<(), StoreError> {
        self.commit(records)?;
        log::info!("Replaced record list, total: {}", self.len());
        Ok(())
    }

    /// Empty the list and erase every persisted key, including the job
    /// address and date/time.
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        self.records = Vec::new();
        self.persistence.clear()?;
        log::info!("Cleared all records and saved fields");
        Ok(())
    }

    #[cfg(test)]
    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut Persistence<S> {
        &mut self.persistence
    }

    fn commit(&mut self, next: Vec<Record>) -> Result<(), StoreError> {
        self.records = next;
        if let Err(e) = self.persistence.save_records(&self.records) {
            log::warn!("Failed to save record list: {}", e);
            return Err(e.into());
        }
        Ok(())
    }
}
