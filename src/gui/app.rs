use std::collections::VecDeque;

use tracing::debug;

use crate::config::AppConfig;
use crate::controller::{Action, ActionKind, Controller, Effect, Notification, Severity};

use super::convert::dynamic_to_color_image;
use super::{dialogs, panels};

/// Texture mirroring the controller's viewport.
#[derive(Default)]
pub struct ViewportTexture {
    pub texture: Option<egui::TextureHandle>,
    /// Viewport revision the texture was built from.
    pub revision: Option<u64>,
}

pub struct QrPadApp {
    pub controller: Controller,
    pub viewport: ViewportTexture,
    /// Actions requested by widgets this frame, dispatched after layout.
    pub requested: Vec<ActionKind>,
    pub notifications: VecDeque<Notification>,
    pub show_about: bool,
}

impl QrPadApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            controller: Controller::new(config),
            viewport: ViewportTexture::default(),
            requested: Vec::new(),
            notifications: VecDeque::new(),
            show_about: false,
        }
    }

    pub fn request(&mut self, kind: ActionKind) {
        self.requested.push(kind);
    }

    /// A modal notification blocks every other action until dismissed.
    pub fn is_blocked(&self) -> bool {
        !self.notifications.is_empty()
    }

    fn run_requested(&mut self, ctx: &egui::Context) {
        for kind in std::mem::take(&mut self.requested) {
            let action = match kind {
                ActionKind::GenerateText => Action::GenerateText,
                ActionKind::GenerateWhatsApp => Action::GenerateWhatsApp,
                ActionKind::Save => Action::Save {
                    path: dialogs::pick_save_path(),
                },
                ActionKind::Open => Action::Open {
                    path: dialogs::pick_image(),
                },
                ActionKind::Close => Action::Close,
                ActionKind::Decode => Action::Decode,
            };
            self.apply(ctx, action);
        }
    }

    fn apply(&mut self, ctx: &egui::Context, action: Action) {
        for effect in self.controller.dispatch(action) {
            match effect {
                Effect::Notify(notification) => self.notifications.push_back(notification),
                Effect::ViewportChanged => self.refresh_texture(ctx),
                Effect::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            }
        }
    }

    fn refresh_texture(&mut self, ctx: &egui::Context) {
        let viewport = &self.controller.state().viewport;
        if self.viewport.revision == Some(viewport.revision()) {
            return;
        }

        let image = dynamic_to_color_image(&viewport.snapshot());
        debug!(size = ?image.size, "Uploading viewport texture");
        self.viewport.texture = Some(ctx.load_texture("viewport", image, egui::TextureOptions::NEAREST));
        self.viewport.revision = Some(viewport.revision());
    }

    fn show_notification(&mut self, ctx: &egui::Context) {
        let Some(notification) = self.notifications.front() else {
            return;
        };

        let color = match notification.severity {
            Severity::Info => ctx.style().visuals.text_color(),
            Severity::Warning => ctx.style().visuals.warn_fg_color,
            Severity::Error => ctx.style().visuals.error_fg_color,
        };

        let mut dismissed = false;
        egui::Window::new(notification.title.as_str())
            .id(egui::Id::new("notification"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(&notification.message).color(color));
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.notifications.pop_front();
        }
    }

    fn show_about(&mut self, ctx: &egui::Context) {
        if !self.show_about {
            return;
        }
        egui::Window::new("About QR Pad")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("QR Pad");
                    ui.label("Generate and decode QR codes");
                    ui.add_space(8.0);
                    ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                    ui.add_space(8.0);
                    if ui.button("Close").clicked() {
                        self.show_about = false;
                    }
                });
            });
    }
}

impl eframe::App for QrPadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.refresh_texture(ctx);

        panels::menu_bar::show(ctx, self);
        panels::inputs::show(ctx, self);
        panels::viewport::show(ctx, self);

        self.show_notification(ctx);
        self.show_about(ctx);

        if self.is_blocked() {
            self.requested.clear();
        } else {
            self.run_requested(ctx);
        }
    }
}
