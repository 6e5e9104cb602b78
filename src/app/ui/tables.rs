// src/app/ui/tables.rs
use eframe::egui as eg;
use egui_extras::{Column, TableBuilder};

use super::pager::render_pager;
use crate::app::data::{Field, Record};
use crate::app::types::{Pager, UiAction, ViewState};
use crate::app::utils::{display_cell, format_amount, format_crore};
use crate::app::view::TitleTotals;

const ROW_H: f32 = 20.0;
const HEADER_H: f32 = 24.0;

fn cell(ui: &mut eg::Ui, text: String, numeric: bool) {
    if numeric {
        ui.with_layout(eg::Layout::right_to_left(eg::Align::Center), |ui| {
            ui.label(text);
        });
    } else {
        ui.add(eg::Label::new(text).truncate());
    }
}

fn header_label(ui: &mut eg::Ui, text: &str) {
    ui.label(eg::RichText::new(text).strong());
}

/// Flat record list: sortable headers, 25 rows per page.
pub fn render_records_table(
    ui: &mut eg::Ui,
    records: &[Record],
    rows: &[usize],
    state: &ViewState,
    actions: &mut Vec<UiAction>,
) {
    let page = state.records_pager.slice(rows);

    ui.push_id("records_table", |ui| {
        let mut tbl = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(false)
            .cell_layout(eg::Layout::left_to_right(eg::Align::Center));
        for field in Field::TABLE {
            tbl = match field {
                Field::Movie => tbl.column(Column::initial(260.0).at_least(120.0).clip(true)),
                f if f.is_numeric() => tbl.column(Column::initial(120.0).at_least(80.0)),
                _ => tbl.column(Column::initial(130.0).at_least(70.0).clip(true)),
            };
        }

        tbl.header(HEADER_H, |mut header| {
            for field in Field::TABLE {
                header.col(|ui| {
                    let active = state.sort.key == field;
                    let text = if active {
                        format!("{} {}", field.label(), state.sort.dir.arrow())
                    } else {
                        field.label().to_string()
                    };
                    if ui
                        .selectable_label(active, eg::RichText::new(text).strong())
                        .on_hover_text("Sort by this column")
                        .clicked()
                    {
                        actions.push(UiAction::SortBy(field));
                    }
                });
            }
        })
        .body(|mut body| {
            for &idx in page {
                let Some(r) = records.get(idx) else {
                    continue;
                };
                body.row(ROW_H, |mut row| {
                    for field in Field::TABLE {
                        row.col(|ui| cell(ui, display_cell(r, field), field.is_numeric()));
                    }
                });
            }
        });
    });

    render_pager(ui, state.records_pager, rows.len(), UiAction::RecordsPage, actions);
}

/// Base-title totals: 20 rows per page, full amounts.
pub fn render_base_title_table(
    ui: &mut eg::Ui,
    groups: &[TitleTotals],
    pager: Pager,
    actions: &mut Vec<UiAction>,
) {
    let first_rank = pager.range(groups.len()).start + 1;
    let page = pager.slice(groups);

    ui.push_id("base_title_table", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .cell_layout(eg::Layout::left_to_right(eg::Align::Center))
            .column(Column::exact(40.0))
            .column(Column::initial(280.0).at_least(120.0).clip(true))
            .columns(Column::initial(140.0).at_least(90.0), 3)
            .column(Column::remainder())
            .header(HEADER_H, |mut header| {
                for label in ["#", "Movie", "Day 1", "Week 1", "Final Gross", "Releases"] {
                    header.col(|ui| header_label(ui, label));
                }
            })
            .body(|mut body| {
                for (i, g) in page.iter().enumerate() {
                    body.row(ROW_H, |mut row| {
                        row.col(|ui| cell(ui, (first_rank + i).to_string(), false));
                        row.col(|ui| cell(ui, g.title.clone(), false));
                        row.col(|ui| cell(ui, format_amount(g.day1), true));
                        row.col(|ui| cell(ui, format_amount(g.week1), true));
                        row.col(|ui| cell(ui, format_amount(g.final_gross), true));
                        row.col(|ui| cell(ui, g.records.to_string(), true));
                    });
                }
            });
    });

    render_pager(ui, pager, groups.len(), UiAction::GroupsPage, actions);
}

/// Ranked split of the top full titles, amounts in crore. Not paginated.
pub fn render_gross_split(ui: &mut eg::Ui, top: &[TitleTotals]) {
    if top.is_empty() {
        ui.label(eg::RichText::new("No records.").italics().weak());
        return;
    }

    ui.push_id("gross_split_table", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .cell_layout(eg::Layout::left_to_right(eg::Align::Center))
            .column(Column::exact(40.0))
            .column(Column::initial(300.0).at_least(120.0).clip(true))
            .columns(Column::initial(120.0).at_least(80.0), 2)
            .column(Column::remainder())
            .header(HEADER_H, |mut header| {
                for label in ["#", "Movie", "Day 1", "Week 1", "Final Gross"] {
                    header.col(|ui| header_label(ui, label));
                }
            })
            .body(|mut body| {
                for (i, g) in top.iter().enumerate() {
                    body.row(ROW_H, |mut row| {
                        row.col(|ui| cell(ui, (i + 1).to_string(), false));
                        row.col(|ui| cell(ui, g.title.clone(), false));
                        row.col(|ui| cell(ui, format_crore(g.day1), true));
                        row.col(|ui| cell(ui, format_crore(g.week1), true));
                        row.col(|ui| cell(ui, format_crore(g.final_gross), true));
                    });
                }
            });
    });
}
