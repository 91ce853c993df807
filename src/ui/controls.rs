use super::ACCENT_GREEN;
use crate::state::PlaybackStatus;
use eframe::egui;

pub enum ControlAction {
    TogglePlayback,
}

pub struct ControlsPanel;

impl ControlsPanel {
    /// Play/pause button. Callers only show it once an item is active.
    pub fn draw(ui: &mut egui::Ui, status: PlaybackStatus) -> Option<ControlAction> {
        let mut action = None;

        ui.vertical_centered(|ui| {
            let icon = egui::RichText::new(status.control_icon())
                .size(48.0)
                .color(ACCENT_GREEN);
            if ui.add(egui::Button::new(icon).frame(false)).clicked() {
                action = Some(ControlAction::TogglePlayback);
            }
            ui.label(format!("{} {}", status.status_icon(), status.status_message()));
        });

        action
    }
}
