// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! The app owns the editing session and the live clock, draws the panels,
//! and applies the actions they return to the session.

use crate::error::StoreError;
use crate::io::serialization;
use crate::io::storage::KeyValueStore;
use crate::models::draft::EditTarget;
use crate::session::Session;
use crate::ui::form::{self, FormAction};
use crate::ui::record_list::{self, ListAction};
use crate::ui::toolbar::{self, MenuAction, Status, StatusKind};
use crate::util::clock::{self, ClockTicker};
use std::time::Duration;

const CLOCK_INTERVAL: Duration = Duration::from_secs(1);

/// Main application state.
pub struct FloorNotesApp {
    /// Job scalars, record list and form draft
    session: Session<Box<dyn KeyValueStore>>,

    /// Live clock; dropped (and stopped) with the app
    clock: ClockTicker,

    /// Whether clock ticks overwrite the date/time field
    follow_clock: bool,

    /// Waiting for the user to confirm "Clear All Data"
    confirm_clear: bool,

    /// Outcome of the last action
    status: Option<Status>,
}

impl FloorNotesApp {
    /// Create the app around a restored session.
    pub fn new(mut session: Session<Box<dyn KeyValueStore>>, ctx: &egui::Context) -> Self {
        let repaint = ctx.clone();
        let clock = ClockTicker::start(CLOCK_INTERVAL, move || repaint.request_repaint());

        // A saved date/time is kept; otherwise the field follows the clock.
        let follow_clock = session.date_time().is_empty();
        if follow_clock {
            session.show_clock_time(clock::now_string());
        }

        Self {
            session,
            clock,
            follow_clock,
            confirm_clear: false,
            status: None,
        }
    }

    fn set_status(&mut self, kind: StatusKind, message: impl Into<String>) {
        self.status = Some(Status {
            kind,
            message: message.into(),
        });
    }

    /// Report the outcome of a list operation.
    fn finish(&mut self, result: Result<(), StoreError>, done: &str) {
        match result {
            Ok(()) => self.set_status(StatusKind::Info, done),
            Err(e @ StoreError::Storage(_)) => self.set_status(StatusKind::Warning, format!("{done}, but {e}")),
            Err(e) => {
                log::error!("{}", e);
                self.set_status(StatusKind::Error, e.to_string());
            }
        }
    }

    fn apply_form_action(&mut self, action: FormAction) {
        match action {
            FormAction::SetJobAddress(value) => {
                if let Err(e) = self.session.set_job_address(value) {
                    log::warn!("Failed to save job address: {}", e);
                    self.set_status(StatusKind::Warning, format!("Job address not saved: {e}"));
                }
            }
            FormAction::SetDateTime(value) => {
                // Typing in the field stops the clock from overwriting it.
                self.follow_clock = false;
                if let Err(e) = self.session.set_date_time(value) {
                    log::warn!("Failed to save date/time: {}", e);
                    self.set_status(StatusKind::Warning, format!("Date/time not saved: {e}"));
                }
            }
            FormAction::FollowClock(follow) => {
                self.follow_clock = follow;
                if follow {
                    self.session.show_clock_time(clock::now_string());
                }
            }
            FormAction::UpdateDimension(index, field, value) => {
                self.session.draft.update_dimension(index, field, value);
            }
            FormAction::AddDimension => self.session.draft.add_dimension(),
            FormAction::RemoveDimension(index) => {
                self.session.draft.remove_dimension(index);
            }
            FormAction::CalculateTotal => {
                let total = self.session.recompute_total();
                log::debug!("Calculated total {:.2} SF", total);
            }
            FormAction::Submit => {
                let done = if self.session.draft.is_editing() { "Entry updated" } else { "Entry added" };
                let result = self.session.submit();
                self.finish(result, done);
            }
            FormAction::GeneratePdf => self.export_pdf(),
            FormAction::ClearAll => self.confirm_clear = true,
        }
    }

    fn apply_list_action(&mut self, action: ListAction) {
        match action {
            ListAction::Edit(index) => {
                let result = self.session.edit(index);
                if result.is_ok() {
                    // Show the record's own date/time rather than the clock.
                    self.follow_clock = false;
                }
                self.finish(result, &format!("Editing entry {}", index + 1));
            }
            ListAction::Delete(index) => {
                let result = self.session.delete(index);
                self.finish(result, "Entry deleted");
            }
            ListAction::None => {}
        }
    }

    fn apply_menu_action(&mut self, action: MenuAction, ctx: &egui::Context) {
        match action {
            MenuAction::ExportPdf => self.export_pdf(),
            MenuAction::BackupJson => self.backup("json"),
            MenuAction::BackupYaml => self.backup("yaml"),
            MenuAction::Restore => self.restore(),
            MenuAction::ClearAll => self.confirm_clear = true,
            MenuAction::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            MenuAction::None => {}
        }
    }

    /// Ask for a destination and write the PDF report.
    fn export_pdf(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PDF", &["pdf"])
            .set_file_name(self.session.report_file_name())
            .save_file()
        else {
            return;
        };

        match self.session.export_report(&path) {
            Ok(()) => self.set_status(StatusKind::Info, format!("Saved {}", path.display())),
            Err(e) => {
                log::error!("Failed to export report: {}", e);
                self.set_status(StatusKind::Error, format!("Export failed: {e}"));
            }
        }
    }

    /// Write the saved state to a JSON or YAML file.
    fn backup(&mut self, extension: &str) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter(extension.to_uppercase(), &[extension])
            .set_file_name(format!("flooring_list.{extension}"))
            .save_file()
        else {
            return;
        };

        match serialization::export(&self.session.backup(), &path) {
            Ok(()) => {
                log::info!("Backed up list to {}", path.display());
                self.set_status(StatusKind::Info, format!("Backed up to {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to back up list: {}", e);
                self.set_status(StatusKind::Error, format!("Backup failed: {e}"));
            }
        }
    }

    /// Replace the list with the contents of a backup file.
    fn restore(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Backups", &["json", "yaml", "yml"])
            .pick_file()
        else {
            return;
        };

        let backup = match serialization::import(&path) {
            Ok(backup) => backup,
            Err(e) => {
                log::error!("Failed to read backup {}: {}", path.display(), e);
                self.set_status(StatusKind::Error, format!("Restore failed: {e}"));
                return;
            }
        };

        if !backup.date_time.is_empty() {
            self.follow_clock = false;
        }
        let count = backup.records.len();
        let result = self.session.restore(backup);
        self.finish(result, &format!("Restored {count} entries"));
    }

    fn clear_all(&mut self) {
        let result = self.session.clear_all();
        self.follow_clock = true;
        self.session.show_clock_time(clock::now_string());
        self.finish(result, "All data cleared");
    }

    fn confirm_clear_window(&mut self, ctx: &egui::Context) {
        let mut confirmed = false;
        let mut cancelled = false;

        egui::Window::new("Clear All Data")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Delete every saved entry, the job address and the date/time?");
                ui.label(egui::RichText::new("This cannot be undone.").weak());
                ui.horizontal(|ui| {
                    if ui.button("Clear").clicked() {
                        confirmed = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });
            });

        if confirmed {
            self.clear_all();
        }
        if confirmed || cancelled {
            self.confirm_clear = false;
        }
    }
}

impl eframe::App for FloorNotesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Always drain ticks so a stale time is never shown later.
        if let Some(now) = self.clock.latest() {
            if self.follow_clock {
                self.session.show_clock_time(now);
            }
        }

        // Top menu bar
        let menu_action = egui::TopBottomPanel::top("menu_bar")
            .show(ctx, toolbar::menu)
            .inner;
        self.apply_menu_action(menu_action, ctx);

        // Status line
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            toolbar::status_line(ui, self.session.records().len(), self.status.as_ref());
        });

        // Saved entries (right side)
        let editing = match self.session.draft.edit_target {
            EditTarget::Existing(index) => Some(index),
            EditTarget::New => None,
        };
        let list_action = egui::SidePanel::right("records")
            .default_width(380.0)
            .resizable(true)
            .show(ctx, |ui| record_list::show(ui, self.session.records(), editing))
            .inner;
        self.apply_list_action(list_action);

        // Entry form (center)
        let job_address = self.session.job_address().to_string();
        let date_time = self.session.date_time().to_string();
        let follow_clock = self.follow_clock;
        let form_actions = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .show(ui, |ui| form::show(ui, &mut self.session.draft, &job_address, &date_time, follow_clock))
                    .inner
            })
            .inner;
        for action in form_actions {
            self.apply_form_action(action);
        }

        if self.confirm_clear {
            self.confirm_clear_window(ctx);
        }
    }
}
