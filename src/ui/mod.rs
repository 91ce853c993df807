pub mod banner;
pub mod captions;
pub mod catalog;
pub mod controls;
pub mod visualizer;

use eframe::egui;

pub const ACCENT_GREEN: egui::Color32 = egui::Color32::from_rgb(46, 160, 67);
pub const ACCENT_BLUE: egui::Color32 = egui::Color32::from_rgb(30, 110, 220);

/// Fill `rect` with a left-to-right two-colour gradient.
pub fn gradient_rect(painter: &egui::Painter, rect: egui::Rect, left: egui::Color32, right: egui::Color32) {
    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(rect.left_top(), left);
    mesh.colored_vertex(rect.right_top(), right);
    mesh.colored_vertex(rect.right_bottom(), right);
    mesh.colored_vertex(rect.left_bottom(), left);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    painter.add(egui::Shape::mesh(mesh));
}
