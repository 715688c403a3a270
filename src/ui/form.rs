// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Entry form for the job fields and the record being composed.
//!
//! Location and notes fields are edited in place on the draft. Anything
//! that must be persisted or that reshapes the dimension list is returned as
//! a [`FormAction`] for the app to apply.

use crate::models::dimension::DimensionField;
use crate::models::draft::FormDraft;
use crate::util::area::format_sq_feet;

/// Result of form interaction.
pub enum FormAction {
    SetJobAddress(String),
    SetDateTime(String),
    FollowClock(bool),
    UpdateDimension(usize, DimensionField, String),
    AddDimension,
    RemoveDimension(usize),
    CalculateTotal,
    Submit,
    GeneratePdf,
    ClearAll,
}

const FIELD_WIDTH: f32 = 70.0;

/// Display the entry form.
pub fn show(
    ui: &mut egui::Ui,
    draft: &mut FormDraft,
    job_address: &str,
    date_time: &str,
    follow_clock: bool,
) -> Vec<FormAction> {
    let mut actions = Vec::new();

    ui.heading("Flooring Installation Notes");
    ui.add_space(6.0);

    egui::Grid::new("job_fields")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            ui.label("Job Address / Name");
            let mut address = job_address.to_string();
            if ui
                .add(egui::TextEdit::singleline(&mut address).desired_width(f32::INFINITY))
                .changed()
            {
                actions.push(FormAction::SetJobAddress(address));
            }
            ui.end_row();

            ui.label("Date / Time");
            ui.horizontal(|ui| {
                let mut when = date_time.to_string();
                if ui
                    .add(egui::TextEdit::singleline(&mut when).desired_width(220.0))
                    .changed()
                {
                    actions.push(FormAction::SetDateTime(when));
                }
                let mut live = follow_clock;
                if ui.checkbox(&mut live, "Live clock").changed() {
                    actions.push(FormAction::FollowClock(live));
                }
            });
            ui.end_row();

            ui.label("Area / Floor");
            ui.add(egui::TextEdit::singleline(&mut draft.area).desired_width(f32::INFINITY));
            ui.end_row();

            ui.label("Sub Area");
            ui.add(egui::TextEdit::singleline(&mut draft.sub_area).desired_width(f32::INFINITY));
            ui.end_row();

            ui.label("Sub-Sub Area");
            ui.add(egui::TextEdit::singleline(&mut draft.sub_sub_area).desired_width(f32::INFINITY));
            ui.end_row();
        });

    ui.add_space(8.0);
    ui.label(egui::RichText::new("Dimensions").strong());
    dimension_rows(ui, draft, &mut actions);

    let invalid = draft.invalid_fields();
    if !invalid.is_empty() {
        let fields: Vec<String> = invalid
            .iter()
            .map(|(row, field)| format!("#{} {}", row + 1, field.label()))
            .collect();
        ui.label(
            egui::RichText::new(format!("Not a number, counted as 0: {}", fields.join(", ")))
                .color(egui::Color32::from_rgb(220, 160, 40)),
        );
    }

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label("Total Square Feet (SF)");
        let mut total = format_sq_feet(draft.total_sq_feet);
        ui.add_enabled(false, egui::TextEdit::singleline(&mut total).desired_width(120.0));
    });

    ui.add_space(4.0);
    ui.label("Notes");
    ui.add(
        egui::TextEdit::multiline(&mut draft.notes)
            .desired_rows(4)
            .desired_width(f32::INFINITY),
    );

    ui.add_space(8.0);
    buttons(ui, draft.is_editing(), &mut actions);

    actions
}

fn dimension_rows(ui: &mut egui::Ui, draft: &FormDraft, actions: &mut Vec<FormAction>) {
    for (index, dimension) in draft.dimensions().iter().enumerate() {
        ui.push_id(index, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label(format!("{}.", index + 1));
                for field in DimensionField::ALL {
                    let mut text = dimension.field(field).to_string();
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut text)
                            .desired_width(FIELD_WIDTH)
                            .hint_text(field.label()),
                    );
                    if response.on_hover_text(field.label()).changed() {
                        actions.push(FormAction::UpdateDimension(index, field, text));
                    }
                }
                if ui.small_button("🗑").on_hover_text("Remove dimension").clicked() {
                    actions.push(FormAction::RemoveDimension(index));
                }
            });
        });
    }

    if ui.button("➕ Add Dimension").clicked() {
        actions.push(FormAction::AddDimension);
    }
}

fn buttons(ui: &mut egui::Ui, editing: bool, actions: &mut Vec<FormAction>) {
    let width = ui.available_width();
    let size = [width, 28.0];
    let primary = egui::Color32::from_rgb(63, 81, 181);

    let calculate = egui::Button::new(egui::RichText::new("Calculate Total SF").color(egui::Color32::WHITE)).fill(primary);
    if ui.add_sized(size, calculate).clicked() {
        actions.push(FormAction::CalculateTotal);
    }

    let submit_label = if editing { "Update Item" } else { "Add to List" };
    let submit = egui::Button::new(egui::RichText::new(submit_label).color(egui::Color32::WHITE)).fill(primary);
    if ui.add_sized(size, submit).clicked() {
        actions.push(FormAction::Submit);
    }

    let pdf = egui::Button::new(egui::RichText::new("Generate PDF").color(egui::Color32::WHITE))
        .fill(egui::Color32::from_rgb(128, 0, 128));
    if ui.add_sized(size, pdf).clicked() {
        actions.push(FormAction::GeneratePdf);
    }

    if ui.add_sized(size, egui::Button::new("Clear All Data")).clicked() {
        actions.push(FormAction::ClearAll);
    }
}
