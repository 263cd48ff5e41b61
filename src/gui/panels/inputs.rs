use crate::controller::ActionKind;
use crate::gui::QrPadApp;

pub fn show(ctx: &egui::Context, app: &mut QrPadApp) {
    egui::SidePanel::left("inputs")
        .resizable(false)
        .default_width(240.0)
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.strong("Text");
            if input_row(ui, &mut app.controller.state_mut().text_input, "Text or URL") {
                app.request(ActionKind::GenerateText);
            }

            ui.add_space(10.0);
            ui.strong("WhatsApp");
            if input_row(
                ui,
                &mut app.controller.state_mut().whatsapp_input,
                "Phone number, e.g. 15551234567",
            ) {
                app.request(ActionKind::GenerateWhatsApp);
            }

            ui.add_space(16.0);
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Open").clicked() {
                    app.request(ActionKind::Open);
                }
                if ui.button("Save").clicked() {
                    app.request(ActionKind::Save);
                }
                if ui.button("Decode").clicked() {
                    app.request(ActionKind::Decode);
                }
            });

            ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                ui.add_space(6.0);
                if ui.button("Close").clicked() {
                    app.request(ActionKind::Close);
                }
            });
        });
}

/// Single-line field with an OK button. True when OK is clicked or Enter pressed.
fn input_row(ui: &mut egui::Ui, text: &mut String, hint: &str) -> bool {
    ui.horizontal(|ui| {
        let edit = ui.add(
            egui::TextEdit::singleline(text)
                .hint_text(hint)
                .desired_width(170.0),
        );
        let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        ui.button("OK").clicked() || submitted
    })
    .inner
}
