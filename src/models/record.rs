// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Saved job record.
//!
//! Field names serialize in camelCase so lists written by the browser
//! version of the tool load unchanged.

use super::dimension::Dimension;
use crate::util::area::format_sq_feet;
use serde::{Deserialize, Serialize};

/// One saved flooring job/area entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Record {
    pub job_address: String,
    pub date_time: String,
    pub area: String,
    pub sub_area: String,
    pub sub_sub_area: String,
    pub dimensions: Vec<Dimension>,
    /// Total square feet, already rounded to two decimals.
    #[serde(with = "sq_feet")]
    pub total_sq_feet: f64,
    pub notes: String,
}

impl Record {
    /// Every dimension rendered and joined with commas.
    pub fn dimensions_summary(&self) -> String {
        self.dimensions
            .iter()
            .map(Dimension::describe)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Total square feet with two decimals.
    pub fn total_display(&self) -> String {
        format_sq_feet(self.total_sq_feet)
    }
}

/// Totals are written as two-decimal strings and read from strings or
/// numbers. An unreadable total loads as zero.
mod sq_feet {
    use crate::models::dimension::parse_measure;
    use crate::util::area::format_sq_feet;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_sq_feet(*value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
            Null(Option<()>),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(value) if value.is_finite() => value,
            Raw::Number(_) => 0.0,
            Raw::Text(text) => parse_measure(&text).unwrap_or(0.0),
            Raw::Null(_) => 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record {
            job_address: "12 Oak St".to_string(),
            date_time: "10/18/2026, 9:00:00 AM".to_string(),
            area: "Main Floor".to_string(),
            sub_area: "Kitchen".to_string(),
            sub_sub_area: "Pantry".to_string(),
            dimensions: vec![
                Dimension::feet_inches(10.0, 6.0, 5.0, 0.0),
                Dimension::feet_inches(4.0, 0.0, 3.0, 0.0),
            ],
            total_sq_feet: 64.5,
            notes: "Check subfloor".to_string(),
        }
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["jobAddress"], "12 Oak St");
        assert_eq!(json["subSubArea"], "Pantry");
        assert_eq!(json["totalSqFeet"], "64.50");
        assert_eq!(json["dimensions"][0]["lengthInches"], "6");
    }

    #[test]
    fn test_json_roundtrip() {
        let record = sample();
        let json = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_reads_browser_record() {
        // Unsaved totals were stored as the number 0 by the browser tool.
        let json = r#"{
            "jobAddress": "5 Elm",
            "dateTime": "",
            "area": "Basement",
            "subArea": "",
            "subSubArea": "",
            "dimensions": [{"length": "20", "width": "10"}],
            "totalSqFeet": 0,
            "notes": ""
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.total_sq_feet, 0.0);
        assert_eq!(record.dimensions_summary(), "20 x 10");
    }

    #[test]
    fn test_missing_fields_default() {
        let record: Record = serde_json::from_str(r#"{"area": "Hall", "totalSqFeet": "12.25"}"#).unwrap();
        assert_eq!(record.area, "Hall");
        assert_eq!(record.total_display(), "12.25");
        assert!(record.dimensions.is_empty());
        assert!(record.notes.is_empty());
    }

    #[test]
    fn test_dimensions_summary() {
        assert_eq!(sample().dimensions_summary(), "10' 6\" x 5' 0\", 4' 0\" x 3' 0\"");
    }
}
