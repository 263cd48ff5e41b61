use crate::gui::QrPadApp;

const MAX_ZOOM: f32 = 4.0;

pub fn show(ctx: &egui::Context, app: &mut QrPadApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        ui.painter()
            .rect_filled(rect, 0.0, egui::Color32::from_gray(30));

        let Some(texture) = app.viewport.texture.as_ref() else {
            return;
        };

        let image_size = texture.size_vec2();
        let zoom = fit_zoom(image_size, rect.size());
        let img_rect = egui::Rect::from_center_size(rect.center(), image_size * zoom);

        ui.painter().image(
            texture.id(),
            img_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        if !app.controller.state().viewport.has_image() {
            ui.painter().text(
                rect.left_top() + egui::vec2(8.0, 8.0),
                egui::Align2::LEFT_TOP,
                "Generate or open an image to begin",
                egui::FontId::proportional(14.0),
                egui::Color32::from_white_alpha(200),
            );
        }
    });
}

/// Largest zoom that fits `image` in `available`, capped at `MAX_ZOOM`.
fn fit_zoom(image: egui::Vec2, available: egui::Vec2) -> f32 {
    if image.x <= 0.0 || image.y <= 0.0 {
        return 1.0;
    }
    (available.x / image.x).min(available.y / image.y).clamp(0.0, MAX_ZOOM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_zoom_shrinks_large_images() {
        let zoom = fit_zoom(egui::vec2(800.0, 400.0), egui::vec2(400.0, 400.0));
        assert_eq!(zoom, 0.5);
    }

    #[test]
    fn test_fit_zoom_caps_small_images() {
        let zoom = fit_zoom(egui::vec2(10.0, 10.0), egui::vec2(400.0, 400.0));
        assert_eq!(zoom, MAX_ZOOM);
    }
}
