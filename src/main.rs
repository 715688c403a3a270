// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Flooring Installation Notes
//!
//! A desktop form for recording job-site flooring measurements, totalling
//! square footage, keeping the entries between runs, and exporting them as
//! a PDF report.

mod app;
mod config;
mod error;
mod io;
mod models;
mod session;
mod store;
mod ui;
mod util;

use anyhow::{Context, Result};
use app::FloorNotesApp;
use clap::Parser;
use config::Cli;
use io::storage::{FileStore, KeyValueStore, MemoryStore};
use session::Session;
use std::path::Path;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let data_dir = cli.resolve_data_dir();
    log::info!("Using data directory {}", data_dir.display());

    if let Some(path) = &cli.export {
        return export_report(&data_dir, path);
    }

    let store: Box<dyn KeyValueStore> = match FileStore::open(&data_dir) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("{}; entries will not be kept after exit", e);
            Box::new(MemoryStore::new())
        }
    };
    let session = Session::open(store);

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1180.0, 780.0])
            .with_min_inner_size([760.0, 520.0])
            .with_title("Flooring Installation Notes"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Flooring Installation Notes",
        options,
        Box::new(move |cc| Ok(Box::new(FloorNotesApp::new(session, &cc.egui_ctx)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}

/// Headless export of the saved records.
fn export_report(data_dir: &Path, path: &Path) -> Result<()> {
    let store = FileStore::open(data_dir)
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
    let session = Session::open(store);

    let target = if path.is_dir() {
        path.join(session.report_file_name())
    } else {
        path.to_path_buf()
    };

    session
        .export_report(&target)
        .with_context(|| format!("Failed to export {}", target.display()))?;

    println!("Exported {} records to {}", session.records().len(), target.display());
    Ok(())
}
