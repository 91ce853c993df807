use super::ACCENT_GREEN;
use crate::visualizer::{wave_points, BarLevels};
use eframe::egui;

const PANEL_HEIGHT: f32 = 100.0;
const BAR_SPACING: f32 = 4.0;

pub struct VisualizerPanel;

impl VisualizerPanel {
    pub fn draw_bars(ui: &mut egui::Ui, bars: &BarLevels) {
        let (rect, _) = ui.allocate_exact_size(
            egui::Vec2::new(ui.available_width(), PANEL_HEIGHT),
            egui::Sense::hover(),
        );
        if !ui.is_rect_visible(rect) {
            return;
        }

        let levels = bars.levels();
        if levels.is_empty() {
            return;
        }

        let painter = ui.painter();
        let count = levels.len() as f32;
        let bar_width = ((rect.width() - (count - 1.0) * BAR_SPACING) / count).max(1.0);
        let scale = rect.height() / bars.max_level().max(1.0);

        for (i, &level) in levels.iter().enumerate() {
            let x = rect.min.x + i as f32 * (bar_width + BAR_SPACING);
            let height = (level * scale).min(rect.height());
            let bar = egui::Rect::from_min_max(
                egui::Pos2::new(x, rect.max.y - height),
                egui::Pos2::new(x + bar_width, rect.max.y),
            );
            painter.rect_filled(bar, bar_width / 2.0, ACCENT_GREEN);
        }
    }

    pub fn draw_wave(ui: &mut egui::Ui, phase: f32) {
        let (rect, _) = ui.allocate_exact_size(
            egui::Vec2::new(ui.available_width(), PANEL_HEIGHT),
            egui::Sense::hover(),
        );
        if !ui.is_rect_visible(rect) {
            return;
        }

        let painter = ui.painter();
        painter.rect_filled(rect, 12.0, egui::Color32::from_rgb(250, 220, 60));

        let points: Vec<egui::Pos2> = wave_points(rect.width(), rect.height(), phase)
            .into_iter()
            .map(|(x, y)| egui::Pos2::new(rect.min.x + x, rect.min.y + y))
            .collect();
        painter.add(egui::Shape::line(points, egui::Stroke::new(3.0, ACCENT_GREEN)));
    }
}
