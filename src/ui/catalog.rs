use crate::catalog::Catalog;
use eframe::egui;
use uuid::Uuid;

pub struct CatalogPanel;

impl CatalogPanel {
    /// Draw the recording list; returns the index of a clicked row.
    pub fn draw(ui: &mut egui::Ui, catalog: &Catalog, current: Option<Uuid>) -> Option<usize> {
        let mut selected = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for (index, item) in catalog.iter().enumerate() {
                    let is_current = current == Some(item.id());
                    ui.horizontal(|ui| {
                        let label = format!("▶ {}", item.display_name());
                        if ui.selectable_label(is_current, label).clicked() {
                            selected = Some(index);
                        }
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                egui::RichText::new(item.location_label()).color(egui::Color32::GRAY),
                            );
                        });
                    });
                    ui.separator();
                }
            });

        selected
    }
}
