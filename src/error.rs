use thiserror::Error;

#[derive(Error, Debug)]
pub enum QrError {
    #[error("Failed to encode QR code: {0}")]
    Encoding(String),

    #[error("Failed to decode image: {0}")]
    Decoding(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, QrError>;
