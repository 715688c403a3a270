// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The in-progress entry shown in the form.
//!
//! A draft is scratch space: it is never persisted and is reset after every
//! successful add or update.

use super::dimension::{Dimension, DimensionField};
use super::record::Record;
use crate::util::area::{round_sq_feet, total_area};

/// Which list entry a submit will write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditTarget {
    /// Submit appends a new record.
    #[default]
    New,
    /// Submit replaces the record at this index.
    Existing(usize),
}

/// Working copy of one record's fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDraft {
    pub area: String,
    pub sub_area: String,
    pub sub_sub_area: String,
    /// Never empty; a blank row stands in when nothing has been entered.
    dimensions: Vec<Dimension>,
    /// Total from the last recompute, rounded.
    pub total_sq_feet: f64,
    pub notes: String,
    pub edit_target: EditTarget,
}

impl Default for FormDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl FormDraft {
    /// An empty draft with one blank dimension row.
    pub fn new() -> Self {
        Self {
            area: String::new(),
            sub_area: String::new(),
            sub_sub_area: String::new(),
            dimensions: vec![Dimension::blank()],
            total_sq_feet: 0.0,
            notes: String::new(),
            edit_target: EditTarget::New,
        }
    }

    /// Populate the draft from a saved record for editing.
    ///
    /// Legacy decimal dimensions are converted to feet+inches rows.
    pub fn load(record: Record, index: usize) -> Self {
        let mut dimensions: Vec<Dimension> = record
            .dimensions
            .into_iter()
            .map(|d| Dimension::FeetInches(d.into_feet_inches()))
            .collect();
        if dimensions.is_empty() {
            dimensions.push(Dimension::blank());
        }

        Self {
            area: record.area,
            sub_area: record.sub_area,
            sub_sub_area: record.sub_sub_area,
            dimensions,
            total_sq_feet: record.total_sq_feet,
            notes: record.notes,
            edit_target: EditTarget::Existing(index),
        }
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.edit_target, EditTarget::Existing(_))
    }

    /// Append a blank dimension row.
    pub fn add_dimension(&mut self) {
        self.dimensions.push(Dimension::blank());
    }

    /// Change one field of one dimension. Returns false if `index` is not a
    /// row of this draft.
    pub fn update_dimension(&mut self, index: usize, field: DimensionField, value: impl Into<String>) -> bool {
        match self.dimensions.get_mut(index) {
            Some(dimension) => {
                dimension.set_field(field, value);
                true
            }
            None => false,
        }
    }

    /// Remove a dimension row. Removing the last row leaves a blank one.
    pub fn remove_dimension(&mut self, index: usize) -> bool {
        if index >= self.dimensions.len() {
            return false;
        }
        self.dimensions.remove(index);
        if self.dimensions.is_empty() {
            self.dimensions.push(Dimension::blank());
        }
        true
    }

    /// Recalculate and store the total square footage.
    pub fn recompute_total(&mut self) -> f64 {
        self.total_sq_feet = round_sq_feet(total_area(&self.dimensions));
        self.total_sq_feet
    }

    /// Every (row, field) whose text was ignored because it is not a number.
    pub fn invalid_fields(&self) -> Vec<(usize, DimensionField)> {
        self.dimensions
            .iter()
            .enumerate()
            .flat_map(|(row, d)| d.invalid_fields().into_iter().map(move |field| (row, field)))
            .collect()
    }

    /// Snapshot the draft as a record. The total is recomputed so a record
    /// never carries a stale figure.
    pub fn to_record(&mut self, job_address: &str, date_time: &str) -> Record {
        let total_sq_feet = self.recompute_total();
        Record {
            job_address: job_address.to_string(),
            date_time: date_time.to_string(),
            area: self.area.clone(),
            sub_area: self.sub_area.clone(),
            sub_sub_area: self.sub_sub_area.clone(),
            dimensions: self.dimensions.clone(),
            total_sq_feet,
            notes: self.notes.clone(),
        }
    }

    /// Reset to an empty new-entry draft.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dimension::DecimalFeet;

    #[test]
    fn test_new_draft_has_placeholder_row() {
        let draft = FormDraft::new();
        assert_eq!(draft.dimensions().len(), 1);
        assert_eq!(draft.edit_target, EditTarget::New);
    }

    #[test]
    fn test_remove_last_row_keeps_placeholder() {
        let mut draft = FormDraft::new();
        draft.update_dimension(0, DimensionField::LengthFeet, "9");
        assert!(draft.remove_dimension(0));
        assert_eq!(draft.dimensions(), &[Dimension::blank()]);
        assert!(!draft.remove_dimension(3));
    }

    #[test]
    fn test_edit_rows_and_total() {
        let mut draft = FormDraft::new();
        draft.update_dimension(0, DimensionField::LengthFeet, "12");
        draft.update_dimension(0, DimensionField::WidthFeet, "8");
        draft.add_dimension();
        draft.update_dimension(1, DimensionField::LengthFeet, "4");
        draft.update_dimension(1, DimensionField::WidthFeet, "3");
        assert!(!draft.update_dimension(2, DimensionField::WidthFeet, "3"));

        assert_eq!(draft.recompute_total(), 108.0);
        assert!(draft.invalid_fields().is_empty());
    }

    #[test]
    fn test_invalid_fields_are_reported() {
        let mut draft = FormDraft::new();
        draft.add_dimension();
        draft.update_dimension(1, DimensionField::LengthInches, "six");
        assert_eq!(draft.invalid_fields(), vec![(1, DimensionField::LengthInches)]);
    }

    #[test]
    fn test_to_record_snapshots_total() {
        let mut draft = FormDraft::new();
        draft.area = "Upstairs".to_string();
        draft.update_dimension(0, DimensionField::LengthFeet, "10");
        draft.update_dimension(0, DimensionField::LengthInches, "6");
        draft.update_dimension(0, DimensionField::WidthFeet, "5");

        let record = draft.to_record("1 Main St", "now");
        assert_eq!(record.total_sq_feet, 52.5);
        assert_eq!(record.job_address, "1 Main St");
        assert_eq!(record.area, "Upstairs");
    }

    #[test]
    fn test_load_migrates_legacy_dimensions() {
        let record = Record {
            dimensions: vec![Dimension::Decimal(DecimalFeet {
                length: "20".to_string(),
                width: "10".to_string(),
            })],
            total_sq_feet: 200.0,
            ..Default::default()
        };

        let mut draft = FormDraft::load(record, 4);
        assert_eq!(draft.edit_target, EditTarget::Existing(4));
        assert!(matches!(draft.dimensions()[0], Dimension::FeetInches(_)));
        assert_eq!(draft.recompute_total(), 200.0);
    }

    #[test]
    fn test_load_empty_dimensions_gets_placeholder() {
        let draft = FormDraft::load(Record::default(), 0);
        assert_eq!(draft.dimensions().len(), 1);
    }
}
