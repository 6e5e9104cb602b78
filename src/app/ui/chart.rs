// src/app/ui/chart.rs: horizontal bars, painted directly
use eframe::egui as eg;

use crate::app::utils::format_crore;
use crate::app::view::TitleTotals;

const BAR_H: f32 = 18.0;
const BAR_GAP: f32 = 6.0;
const LABEL_FRACTION: f32 = 0.32;

/// Bar length relative to the largest value, in [0, 1].
pub fn bar_fraction(value: f64, max: f64) -> f32 {
    if max <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    (value / max).clamp(0.0, 1.0) as f32
}

pub fn render_bar_chart(ui: &mut eg::Ui, bars: &[TitleTotals]) {
    if bars.is_empty() {
        ui.label(eg::RichText::new("No data to chart.").italics().weak());
        return;
    }

    let width = ui.available_width().max(240.0);
    let height = bars.len() as f32 * (BAR_H + BAR_GAP);
    let (rect, _resp) = ui.allocate_exact_size(eg::vec2(width, height), eg::Sense::hover());
    let painter = ui.painter_at(rect);

    let visuals = ui.visuals().clone();
    let text_color = visuals.text_color();
    let bar_color = visuals.selection.bg_fill;
    let font = eg::FontId::proportional(13.0);

    let label_w = rect.width() * LABEL_FRACTION;
    let value_w = 90.0;
    let track_w = (rect.width() - label_w - value_w).max(20.0);
    let max = bars.iter().map(|b| b.final_gross).fold(0.0_f64, f64::max);

    for (i, b) in bars.iter().enumerate() {
        let top = rect.top() + i as f32 * (BAR_H + BAR_GAP);
        let mid = top + BAR_H * 0.5;

        painter.text(
            eg::pos2(rect.left() + label_w - 8.0, mid),
            eg::Align2::RIGHT_CENTER,
            truncate_label(&b.title, 36),
            font.clone(),
            text_color,
        );

        let bar = eg::Rect::from_min_size(
            eg::pos2(rect.left() + label_w, top),
            eg::vec2(track_w * bar_fraction(b.final_gross, max), BAR_H),
        );
        painter.rect_filled(bar, 3.0, bar_color);

        painter.text(
            eg::pos2(bar.right() + 6.0, mid),
            eg::Align2::LEFT_CENTER,
            format_crore(b.final_gross),
            font.clone(),
            text_color,
        );

        let row = eg::Rect::from_min_max(
            eg::pos2(rect.left(), top),
            eg::pos2(rect.right(), top + BAR_H),
        );
        ui.interact(row, eg::Id::new(("chart_bar", i)), eg::Sense::hover())
            .on_hover_ui(|ui| {
                ui.strong(&b.title);
                ui.label(format!("Day 1: {}", format_crore(b.day1)));
                ui.label(format!("Week 1: {}", format_crore(b.week1)));
                ui.label(format!("Final: {}", format_crore(b.final_gross)));
                ui.label(format!("{} release rows", b.records));
            });
    }
}

fn truncate_label(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let cut: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{cut}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_the_largest_value() {
        assert_eq!(bar_fraction(50.0, 100.0), 0.5);
        assert_eq!(bar_fraction(100.0, 100.0), 1.0);
        assert_eq!(bar_fraction(5.0, 0.0), 0.0);
        assert_eq!(bar_fraction(-5.0, 10.0), 0.0);
    }

    #[test]
    fn long_titles_are_shortened() {
        assert_eq!(truncate_label("Short", 10), "Short");
        assert_eq!(truncate_label("A very long movie title", 8), "A very …");
    }
}
