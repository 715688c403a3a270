// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Command-line options and data directory resolution.

use clap::Parser;
use std::path::PathBuf;

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "FLOORNOTES_DATA_DIR";

const APP_DIR_NAME: &str = "floornotes";

/// Flooring Installation Notes
#[derive(Debug, Parser)]
#[command(name = "floornotes", version, about = "Record flooring measurements and export them to PDF")]
pub struct Cli {
    /// Directory holding the saved job address, date/time and record list
    #[arg(long, value_name = "DIR", env = DATA_DIR_ENV)]
    pub data_dir: Option<PathBuf>,

    /// Write the PDF report for the saved records to PATH and exit
    /// (PATH may be a directory, in which case the default file name is used)
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

impl Cli {
    /// Data directory in priority order: flag or environment variable, then
    /// the platform data directory, then a folder next to the working
    /// directory.
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        default_data_dir()
    }
}

/// Platform default data directory.
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(format!("./{APP_DIR_NAME}_data")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins() {
        let cli = Cli::try_parse_from(["floornotes", "--data-dir", "/tmp/jobs"]).unwrap();
        assert_eq!(cli.resolve_data_dir(), PathBuf::from("/tmp/jobs"));
        assert!(cli.export.is_none());
    }

    #[test]
    fn test_export_flag() {
        let cli = Cli::try_parse_from(["floornotes", "--data-dir", "d", "--export", "out.pdf"]).unwrap();
        assert_eq!(cli.export, Some(PathBuf::from("out.pdf")));
    }

    #[test]
    fn test_default_dir_is_app_specific() {
        assert!(default_data_dir().to_string_lossy().contains(APP_DIR_NAME));
    }
}
