use crate::controller::ActionKind;
use crate::gui::QrPadApp;

const OPEN: egui::KeyboardShortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
const SAVE: egui::KeyboardShortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
const QUIT: egui::KeyboardShortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);

pub fn show(ctx: &egui::Context, app: &mut QrPadApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.add(egui::Button::new("Open...").shortcut_text(ctx.format_shortcut(&OPEN))).clicked() {
                    ui.close();
                    app.request(ActionKind::Open);
                }

                if ui.add(egui::Button::new("Save...").shortcut_text(ctx.format_shortcut(&SAVE))).clicked() {
                    ui.close();
                    app.request(ActionKind::Save);
                }

                ui.separator();

                if ui.button("Decode").clicked() {
                    ui.close();
                    app.request(ActionKind::Decode);
                }

                ui.separator();

                if ui.add(egui::Button::new("Exit").shortcut_text(ctx.format_shortcut(&QUIT))).clicked() {
                    ui.close();
                    app.request(ActionKind::Close);
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&OPEN)) {
            app.request(ActionKind::Open);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&SAVE)) {
            app.request(ActionKind::Save);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&QUIT)) {
            app.request(ActionKind::Close);
        }
    });
}
