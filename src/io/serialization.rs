// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Record list backup and restore.
//!
//! This module handles exporting and importing the job address, date/time
//! and record list in YAML and JSON formats.

use crate::models::record::Record;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete saved state for backup files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Backup {
    pub job_address: String,
    pub date_time: String,
    pub records: Vec<Record>,
}

/// Backup file format, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupFormat {
    Yaml,
    Json,
}

impl BackupFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(|s| s.to_str());
        match extension {
            Some("yaml") | Some("yml") => Ok(BackupFormat::Yaml),
            Some("json") => Ok(BackupFormat::Json),
            _ => bail!("Unsupported file extension: {:?}", extension),
        }
    }
}

/// Export a backup to YAML format.
pub fn export_yaml(data: &Backup, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export a backup to JSON format.
pub fn export_json(data: &Backup, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Import a backup from YAML format.
pub fn import_yaml(path: &Path) -> Result<Backup> {
    let yaml = std::fs::read_to_string(path)?;
    let data = serde_yaml::from_str(&yaml)?;
    Ok(data)
}

/// Import a backup from JSON format.
///
/// A bare record array, as kept by the browser version of the tool, is
/// accepted as well.
pub fn import_json(path: &Path) -> Result<Backup> {
    let json = std::fs::read_to_string(path)?;
    if json.trim_start().starts_with('[') {
        let records: Vec<Record> = serde_json::from_str(&json)?;
        return Ok(Backup {
            records,
            ..Default::default()
        });
    }
    let data = serde_json::from_str(&json)?;
    Ok(data)
}

/// Export in the format implied by the file extension.
pub fn export(data: &Backup, path: &Path) -> Result<()> {
    match BackupFormat::from_path(path)? {
        BackupFormat::Yaml => export_yaml(data, path),
        BackupFormat::Json => export_json(data, path),
    }
}

/// Import in the format implied by the file extension.
pub fn import(path: &Path) -> Result<Backup> {
    match BackupFormat::from_path(path)? {
        BackupFormat::Yaml => import_yaml(path),
        BackupFormat::Json => import_json(path),
    }
}
