// src/app/ui/mod.rs
pub mod chart;
pub mod pager;
pub mod tables;
pub mod topbar;

use eframe::egui as eg;

use super::types::UiAction;
use super::utils::{format_amount, format_crore, format_timestamp};
use super::view::Summary;

impl crate::app::BoxOfficeApp {
    /// Draw one frame. Returns what the user asked for; nothing is applied here.
    pub(crate) fn render(&mut self, ctx: &eg::Context) -> Vec<UiAction> {
        let mut actions = Vec::new();

        eg::TopBottomPanel::top("filters_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            self.ui_render_topbar(ui, &mut actions);
            ui.add_space(4.0);
        });

        self.popup
            .show(ctx, &self.options, &self.selection, &mut actions);

        eg::CentralPanel::default().show(ctx, |ui| {
            eg::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    self.ui_render_status(ui);
                    ui.add_space(6.0);
                    render_summary(ui, &self.view.summary);

                    ui.add_space(12.0);
                    ui.heading("Top 20 Movies by Final Gross");
                    chart::render_bar_chart(ui, self.view.chart_top());

                    ui.add_space(12.0);
                    ui.heading("Gross Split (Top 20)");
                    tables::render_gross_split(ui, self.view.gross_split_top());

                    ui.add_space(12.0);
                    ui.heading("Totals by Movie");
                    tables::render_base_title_table(
                        ui,
                        &self.view.by_base_title,
                        self.view_state.groups_pager,
                        &mut actions,
                    );

                    ui.add_space(12.0);
                    ui.heading("All Records");
                    tables::render_records_table(
                        ui,
                        &self.records,
                        &self.view.rows,
                        &self.view_state,
                        &mut actions,
                    );
                });
        });

        actions
    }

    fn ui_render_status(&self, ui: &mut eg::Ui) {
        ui.horizontal(|ui| {
            if !self.fetcher.has_source() {
                ui.label(
                    eg::RichText::new(
                        "No data source configured. Set SUPABASE_URL and SUPABASE_ANON_KEY.",
                    )
                    .weak()
                    .italics(),
                );
                return;
            }
            ui.label(format!(
                "{} records loaded, {} shown",
                self.records.len(),
                self.view.rows.len()
            ));
            if self.records.len() >= super::MAX_ROWS {
                ui.label(
                    eg::RichText::new(format!(
                        "(row limit of {} reached; narrow the filters)",
                        super::MAX_ROWS
                    ))
                    .weak(),
                );
            }
        });
    }
}

fn render_summary(ui: &mut eg::Ui, s: &Summary) {
    eg::Grid::new("summary_grid")
        .num_columns(5)
        .spacing([24.0, 4.0])
        .show(ui, |ui| {
            for label in ["Day 1", "Week 1", "Final Gross", "Records", "Last Updated"] {
                ui.label(eg::RichText::new(label).weak());
            }
            ui.end_row();

            for value in [s.day1, s.week1, s.final_gross] {
                ui.label(eg::RichText::new(format_crore(value)).strong().size(18.0))
                    .on_hover_text(format_amount(value));
            }
            ui.label(eg::RichText::new(s.count.to_string()).strong().size(18.0));
            let latest = s
                .latest_update
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_else(|| "—".to_string());
            ui.label(eg::RichText::new(latest).strong().size(18.0));
            ui.end_row();
        });
}
