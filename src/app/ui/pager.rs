// src/app/ui/pager.rs
use eframe::egui as eg;

use crate::app::types::{Pager, UiAction};

/// « ‹ Page x of y › » under a table. `to_action` wraps the requested page.
pub fn render_pager(
    ui: &mut eg::Ui,
    pager: Pager,
    total: usize,
    to_action: fn(usize) -> UiAction,
    actions: &mut Vec<UiAction>,
) {
    let pages = pager.page_count(total);
    let page = pager.clamped_page(total);
    let range = pager.range(total);

    ui.horizontal(|ui| {
        let mut go = |ui: &mut eg::Ui, enabled: bool, label: &str, target: usize| {
            if ui.add_enabled(enabled, eg::Button::new(label)).clicked() {
                actions.push(to_action(target));
            }
        };
        go(ui, page > 1, "«", 1);
        go(ui, page > 1, "‹", page.saturating_sub(1));
        ui.label(format!("Page {page} of {pages}"));
        go(ui, page < pages, "›", page + 1);
        go(ui, page < pages, "»", pages);

        ui.separator();
        if total == 0 {
            ui.label(eg::RichText::new("no rows").weak());
        } else {
            ui.label(
                eg::RichText::new(format!("{}–{} of {}", range.start + 1, range.end, total)).weak(),
            );
        }
    });
}
