// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! One editing session: job scalars, the record list and the form draft.
//!
//! This is the whole surface the UI talks to. Every method runs to
//! completion synchronously, including its storage writes.

use crate::error::{ExportError, StorageError, StoreError};
use crate::io::persistence::Persistence;
use crate::io::report;
use crate::io::serialization::Backup;
use crate::io::storage::KeyValueStore;
use crate::models::draft::{EditTarget, FormDraft};
use crate::models::record::Record;
use crate::store::RecordStore;
use std::path::Path;

/// Engine state for the single active editing session.
pub struct Session<S: KeyValueStore> {
    job_address: String,
    date_time: String,
    store: RecordStore<S>,
    pub draft: FormDraft,
}

impl<S: KeyValueStore> Session<S> {
    /// Restore saved state from `store`. Missing or damaged values start
    /// out empty.
    pub fn open(store: S) -> Self {
        let persistence = Persistence::new(store);
        let state = persistence.load_state();
        Self {
            job_address: state.job_address,
            date_time: state.date_time,
            store: RecordStore::new(persistence, state.records),
            draft: FormDraft::new(),
        }
    }

    pub fn job_address(&self) -> &str {
        &self.job_address
    }

    pub fn date_time(&self) -> &str {
        &self.date_time
    }

    pub fn records(&self) -> &[Record] {
        self.store.records()
    }

    /// Set and persist the job address.
    pub fn set_job_address(&mut self, value: impl Into<String>) -> Result<(), StorageError> {
        self.job_address = value.into();
        self.store.persistence_mut().save_job_address(&self.job_address)
    }

    /// Set and persist the date/time typed by the user.
    pub fn set_date_time(&mut self, value: impl Into<String>) -> Result<(), StorageError> {
        self.date_time = value.into();
        self.store.persistence_mut().save_date_time(&self.date_time)
    }

    /// Show the live clock in the date/time field. Clock updates are not
    /// persisted; only user edits are.
    pub fn show_clock_time(&mut self, value: impl Into<String>) {
        self.date_time = value.into();
    }

    /// Recalculate the draft's total square feet.
    pub fn recompute_total(&mut self) -> f64 {
        self.draft.recompute_total()
    }

    /// Add the draft as a new record, or write it over the record being
    /// edited. The draft is cleared once the list has changed, even if the
    /// change could not be saved.
    pub fn submit(&mut self) -> Result<(), StoreError> {
        let record = self.draft.to_record(&self.job_address, &self.date_time);
        let result = match self.draft.edit_target {
            EditTarget::New => self.store.add(record),
            EditTarget::Existing(index) => self.store.update(index, record),
        };

        if !matches!(result, Err(StoreError::IndexOutOfRange { .. })) {
            self.draft.clear();
        }
        result
    }

    /// Load the record at `index` into the draft. The job address and
    /// date/time fields show the record's values.
    pub fn edit(&mut self, index: usize) -> Result<(), StoreError> {
        let record = self.store.load_for_edit(index)?;
        self.job_address = record.job_address.clone();
        self.date_time = record.date_time.clone();
        self.draft = FormDraft::load(record, index);
        log::info!("Editing record {}", index);
        Ok(())
    }

    /// Delete the record at `index`, keeping the draft's edit target
    /// pointing at the same record.
    pub fn delete(&mut self, index: usize) -> Result<(), StoreError> {
        let result = self.store.delete(index);
        if matches!(result, Err(StoreError::IndexOutOfRange { .. })) {
            return result;
        }

        if let EditTarget::Existing(editing) = self.draft.edit_target {
            if editing == index {
                // The record under edit is gone; a submit now adds it back.
                self.draft.edit_target = EditTarget::New;
            } else if editing > index {
                self.draft.edit_target = EditTarget::Existing(editing - 1);
            }
        }
        result
    }

    /// Remove every record and the saved job address and date/time.
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        self.job_address.clear();
        self.date_time.clear();
        self.draft.edit_target = EditTarget::New;
        self.store.clear_all()
    }

    /// Snapshot for a backup file.
    pub fn backup(&self) -> Backup {
        Backup {
            job_address: self.job_address.clone(),
            date_time: self.date_time.clone(),
            records: self.store.records().to_vec(),
        }
    }

    /// Replace the list and scalars with a backup's contents.
    pub fn restore(&mut self, backup: Backup) -> Result<(), StoreError> {
        self.draft.clear();
        self.store.replace_all(backup.records)?;
        if !backup.job_address.is_empty() {
            self.set_job_address(backup.job_address)?;
        }
        if !backup.date_time.is_empty() {
            self.set_date_time(backup.date_time)?;
        }
        Ok(())
    }

    /// Default file name for the report.
    pub fn report_file_name(&self) -> String {
        report::file_name(&self.job_address)
    }

    /// Write the report for the current list to `path`.
    pub fn export_report(&self, path: &Path) -> Result<(), ExportError> {
        report::export_to_file(path, &self.job_address, &self.date_time, self.store.records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::{FileStore, MemoryStore};
    use crate::models::dimension::DimensionField;

    fn fill_draft<S: KeyValueStore>(session: &mut Session<S>, area: &str, length: &str, width: &str) {
        session.draft.area = area.to_string();
        session.draft.update_dimension(0, DimensionField::LengthFeet, length);
        session.draft.update_dimension(0, DimensionField::WidthFeet, width);
    }

    #[test]
    fn test_submit_adds_and_clears_draft() {
        let mut session = Session::open(MemoryStore::new());
        session.set_job_address("12 Oak St").unwrap();
        fill_draft(&mut session, "Main", "12", "8");

        session.submit().unwrap();

        assert_eq!(session.records().len(), 1);
        let saved = &session.records()[0];
        assert_eq!(saved.job_address, "12 Oak St");
        assert_eq!(saved.total_sq_feet, 96.0);
        assert_eq!(session.draft, FormDraft::new());
    }

    #[test]
    fn test_edit_then_submit_updates_in_place() {
        let mut session = Session::open(MemoryStore::new());
        fill_draft(&mut session, "A", "1", "1");
        session.submit().unwrap();
        fill_draft(&mut session, "B", "2", "2");
        session.submit().unwrap();

        session.edit(0).unwrap();
        assert!(session.draft.is_editing());
        assert_eq!(session.draft.area, "A");
        session.draft.area = "A2".to_string();
        session.submit().unwrap();

        let areas: Vec<&str> = session.records().iter().map(|r| r.area.as_str()).collect();
        assert_eq!(areas, vec!["A2", "B"]);
        assert!(!session.draft.is_editing());
    }

    #[test]
    fn test_delete_shifts_edit_target() {
        let mut session = Session::open(MemoryStore::new());
        for area in ["A", "B", "C"] {
            fill_draft(&mut session, area, "1", "1");
            session.submit().unwrap();
        }

        session.edit(2).unwrap();
        session.delete(0).unwrap();
        assert_eq!(session.draft.edit_target, EditTarget::Existing(1));

        session.delete(1).unwrap();
        assert_eq!(session.draft.edit_target, EditTarget::New);
        assert_eq!(session.records().len(), 1);
    }

    #[test]
    fn test_clear_all_then_reload_shows_defaults() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut session = Session::open(FileStore::open(dir.path()).unwrap());
            session.set_job_address("12 Oak St").unwrap();
            session.set_date_time("10/18/2026, 9:00:00 AM").unwrap();
            for area in ["A", "B", "C"] {
                fill_draft(&mut session, area, "3", "4");
                session.submit().unwrap();
            }

            session.clear_all().unwrap();
            assert!(session.records().is_empty());
            assert!(session.job_address().is_empty());
            assert!(session.date_time().is_empty());
        }

        let reopened = Session::open(FileStore::open(dir.path()).unwrap());
        assert!(reopened.records().is_empty());
        assert!(reopened.job_address().is_empty());
        assert!(reopened.date_time().is_empty());
    }

    #[test]
    fn test_state_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut session = Session::open(FileStore::open(dir.path()).unwrap());
            session.set_job_address("12 Oak St").unwrap();
            session.show_clock_time("ticking");
            fill_draft(&mut session, "Main", "10", "5");
            session.submit().unwrap();
        }

        let reopened = Session::open(FileStore::open(dir.path()).unwrap());
        assert_eq!(reopened.job_address(), "12 Oak St");
        assert_eq!(reopened.date_time(), "");
        assert_eq!(reopened.records().len(), 1);
        assert_eq!(reopened.records()[0].date_time, "ticking");
    }

    #[test]
    fn test_stale_edit_target_keeps_draft() {
        let mut session = Session::open(MemoryStore::new());
        fill_draft(&mut session, "A", "1", "1");
        session.draft.edit_target = EditTarget::Existing(3);

        assert!(matches!(session.submit(), Err(StoreError::IndexOutOfRange { .. })));
        assert_eq!(session.draft.area, "A");
    }

    #[test]
    fn test_restore_replaces_list() {
        let mut session = Session::open(MemoryStore::new());
        fill_draft(&mut session, "Old", "1", "1");
        session.submit().unwrap();

        let backup = Backup {
            job_address: "5 Elm".to_string(),
            date_time: String::new(),
            records: vec![Record::default(), Record::default()],
        };
        session.restore(backup).unwrap();

        assert_eq!(session.records().len(), 2);
        assert_eq!(session.job_address(), "5 Elm");
        assert_eq!(session.backup().records.len(), 2);
    }

    #[test]
    fn test_report_for_session() {
        let mut session = Session::open(MemoryStore::new());
        session.set_job_address("12 Oak St").unwrap();
        fill_draft(&mut session, "Main", "10", "5");
        session.submit().unwrap();

        assert_eq!(session.report_file_name(), "flooring_installation_notes_12_Oak_St.pdf");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(session.report_file_name());
        session.export_report(&path).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }
}
