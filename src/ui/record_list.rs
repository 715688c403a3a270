// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Saved record list panel.

use crate::models::record::Record;

/// Result of list interaction.
pub enum ListAction {
    None,
    Edit(usize),
    Delete(usize),
}

/// Display one card per saved record.
pub fn show(ui: &mut egui::Ui, records: &[Record], editing: Option<usize>) -> ListAction {
    let mut action = ListAction::None;

    ui.heading("Flooring Installation List");
    ui.separator();

    if records.is_empty() {
        ui.label(egui::RichText::new("No saved entries yet").weak());
        return action;
    }

    egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
        for (index, record) in records.iter().enumerate() {
            let mut frame = egui::Frame::group(ui.style());
            if editing == Some(index) {
                frame = frame.stroke(egui::Stroke::new(2.0, egui::Color32::from_rgb(128, 0, 128)));
            }

            frame.show(ui, |ui| {
                ui.set_width(ui.available_width());
                field(ui, "Job Address / Name:", &record.job_address);
                field(ui, "Date / Time:", &record.date_time);
                field(ui, "Area / Floor:", &record.area);
                field(ui, "Sub Area:", &record.sub_area);
                field(ui, "Sub-Sub Area:", &record.sub_sub_area);
                field(ui, "Dimensions (L x W):", &record.dimensions_summary());
                field(ui, "Total Square Feet (SF):", &record.total_display());
                field(ui, "Notes:", &record.notes);

                ui.horizontal(|ui| {
                    if ui.button("✏ Edit").clicked() {
                        action = ListAction::Edit(index);
                    }
                    if ui.button("🗑 Delete").clicked() {
                        action = ListAction::Delete(index);
                    }
                });
            });
            ui.add_space(4.0);
        }
    });

    action
}

fn field(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.label(egui::RichText::new(label).strong());
        ui.label(value);
    });
}
