use super::{gradient_rect, ACCENT_BLUE, ACCENT_GREEN};
use crate::captions::CaptionPair;
use eframe::egui;

const CARD_HEIGHT: f32 = 100.0;

pub struct CaptionPanel;

impl CaptionPanel {
    pub fn draw(ui: &mut egui::Ui, caption: &CaptionPair) {
        let (rect, _) = ui.allocate_exact_size(
            egui::Vec2::new(ui.available_width(), CARD_HEIGHT),
            egui::Sense::hover(),
        );

        if !ui.is_rect_visible(rect) {
            return;
        }

        let painter = ui.painter();
        gradient_rect(painter, rect, ACCENT_GREEN, ACCENT_BLUE);

        painter.text(
            rect.center() - egui::Vec2::new(0.0, 14.0),
            egui::Align2::CENTER_CENTER,
            &caption.source,
            egui::FontId::proportional(22.0),
            egui::Color32::WHITE,
        );
        painter.text(
            rect.center() + egui::Vec2::new(0.0, 20.0),
            egui::Align2::CENTER_CENTER,
            &caption.transliterated,
            egui::FontId::proportional(14.0),
            egui::Color32::from_white_alpha(204),
        );
    }
}
