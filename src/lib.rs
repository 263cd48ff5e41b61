pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod qr;
pub mod terminal;
pub mod viewport;

#[cfg(feature = "gui")]
pub mod gui;

pub use config::AppConfig;
pub use controller::{
    Action, ActionKind, AppState, Controller, Effect, Notification, Phase, Severity,
};
pub use error::{QrError, Result};
pub use qr::{
    decode_qr_bytes, decode_qr_file, decode_qr_symbols, generate_qr_image, EncodeOptions,
    ErrorCorrection, MAX_IMAGE_SIDE,
};
pub use terminal::render_qr_to_terminal;
pub use viewport::{CanvasSize, Viewport};
