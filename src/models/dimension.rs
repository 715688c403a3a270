// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Measured segment data structures.
//!
//! A dimension is one rectangle of floor. Field values are kept as the text
//! the installer typed so that a half-typed entry survives a save/load cycle
//! unchanged; numbers are only parsed when an area is needed.

use crate::error::NumericParseError;
use serde::{Deserialize, Deserializer, Serialize};

/// Inches per foot.
const INCHES_PER_FOOT: f64 = 12.0;

/// One of the four inputs of a feet+inches dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionField {
    LengthFeet,
    LengthInches,
    WidthFeet,
    WidthInches,
}

impl DimensionField {
    pub const ALL: [DimensionField; 4] = [
        DimensionField::LengthFeet,
        DimensionField::LengthInches,
        DimensionField::WidthFeet,
        DimensionField::WidthInches,
    ];

    /// Input label shown next to the field.
    pub fn label(self) -> &'static str {
        match self {
            DimensionField::LengthFeet => "Length (ft)",
            DimensionField::LengthInches => "Length (in)",
            DimensionField::WidthFeet => "Width (ft)",
            DimensionField::WidthInches => "Width (in)",
        }
    }
}

/// Segment measured in feet plus inches on each side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeetInches {
    #[serde(deserialize_with = "text_or_number")]
    pub length_feet: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub length_inches: String,
    #[serde(deserialize_with = "text_or_number")]
    pub width_feet: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub width_inches: String,
}

impl FeetInches {
    /// Length in decimal feet.
    pub fn length(&self) -> f64 {
        lenient(&self.length_feet) + lenient(&self.length_inches) / INCHES_PER_FOOT
    }

    /// Width in decimal feet.
    pub fn width(&self) -> f64 {
        lenient(&self.width_feet) + lenient(&self.width_inches) / INCHES_PER_FOOT
    }

    fn text(&self, field: DimensionField) -> &str {
        match field {
            DimensionField::LengthFeet => &self.length_feet,
            DimensionField::LengthInches => &self.length_inches,
            DimensionField::WidthFeet => &self.width_feet,
            DimensionField::WidthInches => &self.width_inches,
        }
    }

    fn text_mut(&mut self, field: DimensionField) -> &mut String {
        match field {
            DimensionField::LengthFeet => &mut self.length_feet,
            DimensionField::LengthInches => &mut self.length_inches,
            DimensionField::WidthFeet => &mut self.width_feet,
            DimensionField::WidthInches => &mut self.width_inches,
        }
    }
}

/// Legacy segment with length and width already combined into feet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecimalFeet {
    #[serde(deserialize_with = "text_or_number")]
    pub length: String,
    #[serde(deserialize_with = "text_or_number")]
    pub width: String,
}

/// A rectangular measured segment contributing to a record's total area.
///
/// Stored records may hold either shape. The feet+inches shape is tried
/// first, so any object carrying `lengthFeet`/`widthFeet` is read as one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    FeetInches(FeetInches),
    Decimal(DecimalFeet),
}

impl Default for Dimension {
    fn default() -> Self {
        Self::blank()
    }
}

impl Dimension {
    /// An empty feet+inches row, as added by "Add Dimension".
    pub fn blank() -> Self {
        Dimension::FeetInches(FeetInches::default())
    }

    /// Build a feet+inches dimension from numbers.
    #[cfg(test)]
    pub fn feet_inches(length_feet: f64, length_inches: f64, width_feet: f64, width_inches: f64) -> Self {
        Dimension::FeetInches(FeetInches {
            length_feet: length_feet.to_string(),
            length_inches: length_inches.to_string(),
            width_feet: width_feet.to_string(),
            width_inches: width_inches.to_string(),
        })
    }

    /// Area in square feet at full precision.
    ///
    /// Blank and unparseable fields count as zero.
    pub fn area(&self) -> f64 {
        match self {
            Dimension::FeetInches(d) => d.length() * d.width(),
            Dimension::Decimal(d) => lenient(&d.length) * lenient(&d.width),
        }
    }

    /// Fields holding text that is neither blank nor a number.
    pub fn invalid_fields(&self) -> Vec<DimensionField> {
        match self {
            Dimension::FeetInches(d) => DimensionField::ALL
                .into_iter()
                .filter(|field| parse_measure(d.text(*field)).is_err())
                .collect(),
            Dimension::Decimal(d) => {
                let mut fields = Vec::new();
                if parse_measure(&d.length).is_err() {
                    fields.push(DimensionField::LengthFeet);
                }
                if parse_measure(&d.width).is_err() {
                    fields.push(DimensionField::WidthFeet);
                }
                fields
            }
        }
    }

    /// Human readable form used in the record list and the report.
    pub fn describe(&self) -> String {
        match self {
            Dimension::FeetInches(d) => format!(
                "{}' {}\" x {}' {}\"",
                d.length_feet, d.length_inches, d.width_feet, d.width_inches
            ),
            Dimension::Decimal(d) => format!("{} x {}", d.length, d.width),
        }
    }

    /// Convert to the feet+inches shape, keeping the area unchanged.
    pub fn into_feet_inches(self) -> FeetInches {
        match self {
            Dimension::FeetInches(d) => d,
            Dimension::Decimal(d) => FeetInches {
                length_feet: d.length,
                length_inches: "0".to_string(),
                width_feet: d.width,
                width_inches: "0".to_string(),
            },
        }
    }

    /// Text currently held by a field. Legacy dimensions are viewed as
    /// whole feet with zero inches.
    pub fn field(&self, field: DimensionField) -> &str {
        match self {
            Dimension::FeetInches(d) => d.text(field),
            Dimension::Decimal(d) => match field {
                DimensionField::LengthFeet => &d.length,
                DimensionField::WidthFeet => &d.width,
                DimensionField::LengthInches | DimensionField::WidthInches => "0",
            },
        }
    }

    /// Replace the text of one field, migrating a legacy dimension first.
    pub fn set_field(&mut self, field: DimensionField, value: impl Into<String>) {
        let mut feet_inches = std::mem::take(self).into_feet_inches();
        *feet_inches.text_mut(field) = value.into();
        *self = Dimension::FeetInches(feet_inches);
    }
}

/// Parse one measurement field.
///
/// Surrounding whitespace is ignored and a blank field is zero. Anything
/// else must be a finite decimal number.
pub fn parse_measure(text: &str) -> Result<f64, NumericParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(NumericParseError {
            input: text.to_string(),
        }),
    }
}

fn lenient(text: &str) -> f64 {
    parse_measure(text).unwrap_or(0.0)
}

/// Accept a JSON string, number, or null for a measurement field.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
        Null(Option<()>),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Int(value) => value.to_string(),
        Raw::Float(value) => value.to_string(),
        Raw::Null(_) => String::new(),
    })
}
