//! Application controller.
//!
//! User actions are routed through a table of handlers keyed by [`ActionKind`].
//! A handler receives the application state by mutable reference together with
//! the triggering [`Action`] and returns the [`Effect`]s the shell must carry out
//! (show a notification, refresh the viewport, quit). Handlers never touch the
//! UI directly.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::qr::{decode_qr_symbols, generate_qr_image};
use crate::viewport::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, title, message)
    }

    fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Side effects requested by a handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Notify(Notification),
    /// The viewport image changed and must be redrawn.
    ViewportChanged,
    /// The user asked to close the application.
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    GenerateText,
    GenerateWhatsApp,
    Save,
    Open,
    Close,
    Decode,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionKind::GenerateText => "generate-text",
            ActionKind::GenerateWhatsApp => "generate-whatsapp",
            ActionKind::Save => "save",
            ActionKind::Open => "open",
            ActionKind::Close => "close",
            ActionKind::Decode => "decode",
        };
        f.write_str(s)
    }
}

/// A user action. `path: None` means the file dialog was cancelled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    GenerateText,
    GenerateWhatsApp,
    Save { path: Option<PathBuf> },
    Open { path: Option<PathBuf> },
    Close,
    Decode,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::GenerateText => ActionKind::GenerateText,
            Action::GenerateWhatsApp => ActionKind::GenerateWhatsApp,
            Action::Save { .. } => ActionKind::Save,
            Action::Open { .. } => ActionKind::Open,
            Action::Close => ActionKind::Close,
            Action::Decode => ActionKind::Decode,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Busy,
}

/// Everything the window shows: the two input fields and the viewport.
#[derive(Debug, Default)]
pub struct AppState {
    pub text_input: String,
    pub whatsapp_input: String,
    pub viewport: Viewport,
    pub config: AppConfig,
    /// Text encoded into the most recently generated symbol.
    pub last_payload: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            text_input: String::new(),
            whatsapp_input: String::new(),
            viewport: Viewport::new(config.canvas),
            config,
            last_payload: None,
        }
    }

    pub fn clear_input_fields(&mut self) {
        self.text_input.clear();
        self.whatsapp_input.clear();
    }
}

pub type Handler = fn(&mut AppState, &Action) -> Vec<Effect>;

pub struct Controller {
    state: AppState,
    handlers: HashMap<ActionKind, Handler>,
    phase: Phase,
}

impl Controller {
    /// Controller with all six actions bound to their default handlers.
    pub fn new(config: AppConfig) -> Self {
        let mut controller = Self::without_handlers(AppState::new(config));
        controller.register(ActionKind::GenerateText, generate_text_qrcode);
        controller.register(ActionKind::GenerateWhatsApp, generate_whatsapp_qrcode);
        controller.register(ActionKind::Save, save_image);
        controller.register(ActionKind::Open, open_image);
        controller.register(ActionKind::Close, close_application);
        controller.register(ActionKind::Decode, decode_qrcode);
        controller
    }

    pub fn without_handlers(state: AppState) -> Self {
        Self {
            state,
            handlers: HashMap::new(),
            phase: Phase::Idle,
        }
    }

    /// Bind `handler` to `kind`, returning the handler it replaces.
    pub fn register(&mut self, kind: ActionKind, handler: Handler) -> Option<Handler> {
        self.handlers.insert(kind, handler)
    }

    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        let kind = action.kind();
        let Some(handler) = self.handlers.get(&kind).copied() else {
            warn!("No handler registered for {kind}");
            return Vec::new();
        };

        debug!("Dispatching {kind}");
        self.phase = Phase::Busy;
        let effects = handler(&mut self.state, &action);
        self.phase = Phase::Idle;
        effects
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }
}

fn generate_qrcode(state: &mut AppState, payload: String) -> Vec<Effect> {
    match generate_qr_image(&payload, &state.config.encode) {
        Ok(image) => {
            info!("Generated QR code for {} byte payload", payload.len());
            state.viewport.set_image(image);
            state.last_payload = Some(payload);
            state.clear_input_fields();
            vec![Effect::ViewportChanged]
        }
        Err(e) => {
            warn!("QR generation failed: {e}");
            vec![Effect::Notify(Notification::error(
                "Error generating QR code",
                e.to_string(),
            ))]
        }
    }
}

fn generate_text_qrcode(state: &mut AppState, _action: &Action) -> Vec<Effect> {
    if state.text_input.is_empty() {
        debug!("Text input empty, nothing to generate");
        return Vec::new();
    }
    let payload = state.text_input.clone();
    generate_qrcode(state, payload)
}

fn generate_whatsapp_qrcode(state: &mut AppState, _action: &Action) -> Vec<Effect> {
    if state.whatsapp_input.is_empty() {
        debug!("WhatsApp input empty, nothing to generate");
        return Vec::new();
    }
    let payload = format!("{}{}", state.config.whatsapp_prefix, state.whatsapp_input);
    generate_qrcode(state, payload)
}

fn save_image(state: &mut AppState, action: &Action) -> Vec<Effect> {
    let Action::Save { path: Some(path) } = action else {
        return Vec::new();
    };

    match state.viewport.export_to_file(path) {
        Ok(()) => {
            info!("Saved image to {}", path.display());
            vec![Effect::Notify(Notification::info(
                "Image Saved",
                "Image saved successfully.",
            ))]
        }
        Err(e) => {
            warn!("Saving {} failed: {e}", path.display());
            vec![Effect::Notify(Notification::error(
                "Error saving image",
                e.to_string(),
            ))]
        }
    }
}

fn open_image(state: &mut AppState, action: &Action) -> Vec<Effect> {
    let Action::Open { path: Some(path) } = action else {
        return Vec::new();
    };

    match state.viewport.load_from_file(path) {
        Ok(_) => {
            info!("Opened {}", path.display());
            state.clear_input_fields();
            vec![Effect::ViewportChanged]
        }
        Err(e) => {
            warn!("Opening {} failed: {e}", path.display());
            vec![Effect::Notify(Notification::error(
                "Error opening image",
                e.to_string(),
            ))]
        }
    }
}

fn close_application(_state: &mut AppState, _action: &Action) -> Vec<Effect> {
    info!("Close requested");
    vec![Effect::Quit]
}

fn decode_qrcode(state: &mut AppState, _action: &Action) -> Vec<Effect> {
    let snapshot = state.viewport.snapshot();
    match decode_qr_symbols(&snapshot) {
        Ok(symbols) if symbols.is_empty() => {
            info!("No QR code found in viewport");
            vec![Effect::Notify(Notification::warning(
                "QR Code Decoding",
                "No QR code found in the image.",
            ))]
        }
        Ok(symbols) => {
            info!("Decoded {} QR code(s)", symbols.len());
            let decoded = symbols.join(" ");
            state.clear_input_fields();
            vec![Effect::Notify(Notification::info(
                "Decoded Message",
                format!("Message:\n{decoded}"),
            ))]
        }
        Err(e) => {
            warn!("QR decoding failed: {e}");
            vec![Effect::Notify(Notification::error(
                "Error decoding QR code",
                e.to_string(),
            ))]
        }
    }
}
