// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Translation between in-memory state and the key-value store.
//!
//! Three keys make up the persisted state, named as the browser version of
//! the tool named its local storage entries. Reads never fail: a missing or
//! damaged value is logged and replaced by its default.

use super::storage::KeyValueStore;
use crate::error::StorageError;
use crate::models::record::Record;

pub const JOB_ADDRESS_KEY: &str = "jobAddress";
pub const DATE_TIME_KEY: &str = "dateTime";
pub const RECORDS_KEY: &str = "flooringList";

/// Everything restored at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedState {
    pub job_address: String,
    pub date_time: String,
    pub records: Vec<Record>,
}

/// Persistence adapter over any [`KeyValueStore`].
pub struct Persistence<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the job address, date/time and record list.
    pub fn load_state(&self) -> PersistedState {
        PersistedState {
            job_address: self.load_text(JOB_ADDRESS_KEY),
            date_time: self.load_text(DATE_TIME_KEY),
            records: self.load_records(),
        }
    }

    fn load_text(&self, key: &str) -> String {
        match self.store.get(key) {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                log::warn!("Ignoring unreadable {}: {}", key, e);
                String::new()
            }
        }
    }

    fn load_records(&self) -> Vec<Record> {
        let raw = match self.store.get(RECORDS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("Ignoring unreadable {}: {}", RECORDS_KEY, e);
                return Vec::new();
            }
        };

        // A stored `null` means no list, same as a missing key.
        match serde_json::from_str::<Option<Vec<Record>>>(&raw) {
            Ok(records) => {
                let records = records.unwrap_or_default();
                log::info!("Loaded {} saved records", records.len());
                records
            }
            Err(e) => {
                log::warn!("Discarding malformed {}: {}", RECORDS_KEY, e);
                Vec::new()
            }
        }
    }

    /// Write the full record list.
    pub fn save_records(&mut self, records: &[Record]) -> Result<(), StorageError> {
        let json = serde_json::to_string(records)?;
        self.store.set(RECORDS_KEY, &json)
    }

    pub fn save_job_address(&mut self, job_address: &str) -> Result<(), StorageError> {
        self.store.set(JOB_ADDRESS_KEY, job_address)
    }

    pub fn save_date_time(&mut self, date_time: &str) -> Result<(), StorageError> {
        self.store.set(DATE_TIME_KEY, date_time)
    }

    /// Erase all three keys. Every key is attempted; the first failure is
    /// returned.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        let mut first_error = None;
        for key in [JOB_ADDRESS_KEY, DATE_TIME_KEY, RECORDS_KEY] {
            if let Err(e) = self.store.remove(key) {
                log::warn!("Failed to erase {}: {}", key, e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
