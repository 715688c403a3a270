// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Menu bar and status line.
//!
//! This module provides the File menu for export, backup and clearing, and
//! the status line that reports the outcome of the last action.

/// Result of menu interaction.
pub enum MenuAction {
    None,
    ExportPdf,
    BackupJson,
    BackupYaml,
    Restore,
    ClearAll,
    Quit,
}

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

/// Message shown in the status line.
#[derive(Debug, Clone)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

/// Display the menu bar.
pub fn menu(ui: &mut egui::Ui) -> MenuAction {
    let mut action = MenuAction::None;

    egui::menu::bar(ui, |ui| {
        ui.menu_button("File", |ui| {
            if ui.button("Export PDF...").clicked() {
                action = MenuAction::ExportPdf;
                ui.close_menu();
            }
            ui.separator();
            ui.menu_button("Backup List", |ui| {
                if ui.button("Backup as JSON...").clicked() {
                    action = MenuAction::BackupJson;
                    ui.close_menu();
                }
                if ui.button("Backup as YAML...").clicked() {
                    action = MenuAction::BackupYaml;
                    ui.close_menu();
                }
            });
            if ui.button("Restore List...").clicked() {
                action = MenuAction::Restore;
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Clear All Data").clicked() {
                action = MenuAction::ClearAll;
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                action = MenuAction::Quit;
                ui.close_menu();
            }
        });
    });

    action
}

/// Display the status line with the record count and the last message.
pub fn status_line(ui: &mut egui::Ui, record_count: usize, status: Option<&Status>) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;
        ui.label(format!("{} saved entries", record_count));

        if let Some(status) = status {
            ui.separator();
            let color = match status.kind {
                StatusKind::Info => ui.visuals().text_color(),
                StatusKind::Warning => egui::Color32::from_rgb(220, 160, 40),
                StatusKind::Error => egui::Color32::from_rgb(220, 60, 60),
            };
            ui.label(egui::RichText::new(&status.message).color(color));
        }
    });
}
