use crate::config::BannerConfig;
use eframe::egui;

/// Fixed-height advertisement slot.
///
/// Ad delivery itself is out of process; this only reserves the space and
/// labels it with the configured ad unit.
pub struct BannerPanel;

impl BannerPanel {
    pub fn draw(ui: &mut egui::Ui, config: &BannerConfig) {
        let (rect, _) = ui.allocate_exact_size(
            egui::Vec2::new(ui.available_width(), config.height),
            egui::Sense::hover(),
        );
        if !ui.is_rect_visible(rect) {
            return;
        }

        let painter = ui.painter();
        painter.rect_filled(rect, 0.0, egui::Color32::from_gray(235));
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            format!("Ad · {}", config.ad_unit_id),
            egui::FontId::proportional(11.0),
            egui::Color32::DARK_GRAY,
        );
    }
}
