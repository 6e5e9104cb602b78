// src/app/ui/topbar.rs
use eframe::egui as eg;

use crate::app::filters::{Dimension, FilterOptions, Selection};
use crate::app::types::UiAction;
use crate::app::utils::selection_caption;
use crate::app::FilterPopup;

impl crate::app::BoxOfficeApp {
    // ---------- TOP BAR ----------
    pub(crate) fn ui_render_topbar(&mut self, ui: &mut eg::Ui, actions: &mut Vec<UiAction>) {
        ui.horizontal_wrapped(|ui| {
            ui.heading("Box Office");
            ui.separator();

            // Multi-select triggers
            for dim in Dimension::ALL {
                let picked = self.selection.values(dim);
                let caption = format!("{}: {}", dim.plural(), selection_caption(picked, 2));
                let resp = ui.button(caption);
                if resp.clicked() {
                    self.popup.toggle(dim);
                }
                if !picked.is_empty()
                    && ui
                        .small_button("✖")
                        .on_hover_text(format!("Clear {}", dim.plural().to_lowercase()))
                        .clicked()
                {
                    actions.push(UiAction::Clear(dim));
                }
            }

            if !self.selection.is_empty() && ui.button("Clear all filters").clicked() {
                actions.push(UiAction::ClearAll);
            }

            ui.separator();

            // Search
            let mut search = self.view_state.search.clone();
            let resp = ui.add(
                eg::TextEdit::singleline(&mut search)
                    .hint_text("Search…")
                    .desired_width(180.0),
            );
            if resp.changed() {
                actions.push(UiAction::Search(search));
            }

            ui.separator();

            if ui
                .add_enabled(self.fetcher.has_source(), eg::Button::new("⟳ Refresh"))
                .clicked()
            {
                actions.push(UiAction::Refresh);
            }
            if self.fetcher.is_busy() {
                ui.add(eg::Spinner::new().size(14.0));
                ui.label(eg::RichText::new("Loading…").weak());
            }
        });
    }
}

impl FilterPopup {
    fn toggle(&mut self, dim: Dimension) {
        if self.open == Some(dim) {
            self.open = None;
        } else {
            self.open = Some(dim);
            self.query.clear();
        }
    }

    // ---------- FILTER POPUP ----------
    pub(crate) fn show(
        &mut self,
        ctx: &eg::Context,
        options: &FilterOptions,
        selection: &Selection,
        actions: &mut Vec<UiAction>,
    ) {
        let Some(dim) = self.open else {
            return;
        };

        let picked = selection.values(dim);
        let needle = self.query.to_lowercase();
        let visible: Vec<&String> = options
            .for_dimension(dim)
            .iter()
            .filter(|v| needle.is_empty() || v.to_lowercase().contains(&needle))
            .collect();

        let mut open = true;
        eg::Window::new(format!("{} filter", dim.plural()))
            .id(eg::Id::new(("filter_popup", dim.plural())))
            .collapsible(false)
            .resizable(true)
            .default_width(320.0)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.add(
                        eg::TextEdit::singleline(&mut self.query)
                            .hint_text("Find…")
                            .desired_width(160.0),
                    );
                    if !picked.is_empty() && ui.small_button("Clear").clicked() {
                        actions.push(UiAction::Clear(dim));
                    }
                });
                ui.label(
                    eg::RichText::new(format!(
                        "{} selected of {}",
                        picked.len(),
                        options.for_dimension(dim).len()
                    ))
                    .weak(),
                );

                ui.separator();
                if options.for_dimension(dim).is_empty() {
                    ui.label(eg::RichText::new("No values available.").italics().weak());
                }
                let row_h = ui.spacing().interact_size.y;
                eg::ScrollArea::vertical()
                    .max_height(360.0)
                    .show_rows(ui, row_h, visible.len(), |ui, range| {
                        for value in &visible[range] {
                            let mut checked = picked.contains(*value);
                            if ui.checkbox(&mut checked, value.as_str()).clicked() {
                                actions.push(UiAction::Toggle(dim, (*value).clone()));
                            }
                        }
                    });
            });

        if !open {
            self.open = None;
        }
    }
}
