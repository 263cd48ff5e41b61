use std::fmt;
use std::path::Path;

use image::{imageops, DynamicImage, GrayImage, Rgb, RgbImage};
use qrcode::{EcLevel, QrCode, Version};
use rqrr::PreparedImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{QrError, Result};

/// Largest symbol version defined by the QR standard.
pub const MAX_SYMBOL_VERSION: i16 = 40;

/// Largest width or height, in pixels, of a generated image or blank canvas.
pub const MAX_IMAGE_SIDE: u32 = 16384;

const VERSION_1_MODULES: u32 = 21;

const DARK: Rgb<u8> = Rgb([0, 0, 0]);
const LIGHT: Rgb<u8> = Rgb([255, 255, 255]);

/// QR error-correction level. Higher levels survive more damage but hold less data.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum ErrorCorrection {
    /// ~7% recovery
    #[default]
    #[value(name = "L")]
    L,
    /// ~15% recovery
    #[value(name = "M")]
    M,
    /// ~25% recovery
    #[value(name = "Q")]
    Q,
    /// ~30% recovery
    #[value(name = "H")]
    H,
}

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::L => EcLevel::L,
            ErrorCorrection::M => EcLevel::M,
            ErrorCorrection::Q => EcLevel::Q,
            ErrorCorrection::H => EcLevel::H,
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCorrection::L => "L",
            ErrorCorrection::M => "M",
            ErrorCorrection::Q => "Q",
            ErrorCorrection::H => "H",
        };
        f.write_str(s)
    }
}

/// Rendering parameters for generated symbols.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    pub error_correction: ErrorCorrection,
    /// Pixels per module.
    pub box_size: u32,
    /// Quiet zone width, in modules.
    pub border: u32,
    /// Cap on the symbol version. `None` lets the encoder pick any version up to 40.
    pub max_version: Option<i16>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            error_correction: ErrorCorrection::L,
            box_size: 10,
            border: 4,
            max_version: None,
        }
    }
}

impl EncodeOptions {
    /// Reject options no symbol can be rendered with, including a version 1
    /// symbol whose side would exceed [`MAX_IMAGE_SIDE`].
    pub fn validate(&self) -> Result<()> {
        if self.box_size == 0 {
            return Err(QrError::Encoding("box size must be at least 1 pixel".into()));
        }
        if let Some(max) = self.max_version {
            if !(1..=MAX_SYMBOL_VERSION).contains(&max) {
                return Err(QrError::Encoding(format!(
                    "maximum version must be between 1 and {MAX_SYMBOL_VERSION}, got {max}"
                )));
            }
        }
        image_side(VERSION_1_MODULES, self.border, self.box_size)?;
        Ok(())
    }
}

/// Side in pixels of a square symbol of `modules` with a quiet zone of
/// `border` modules, capped at [`MAX_IMAGE_SIDE`].
pub(crate) fn image_side(modules: u32, border: u32, box_size: u32) -> Result<u32> {
    border
        .checked_mul(2)
        .and_then(|quiet| quiet.checked_add(modules))
        .and_then(|total| total.checked_mul(box_size))
        .filter(|side| *side <= MAX_IMAGE_SIDE)
        .ok_or_else(|| {
            QrError::Encoding(format!(
                "a {modules}-module symbol with border {border} and box size {box_size} \
                 exceeds {MAX_IMAGE_SIDE} pixels"
            ))
        })
}

/// Validate `options` and encode `text` into the smallest symbol that fits.
pub(crate) fn build_code(text: &str, options: &EncodeOptions) -> Result<QrCode> {
    if text.is_empty() {
        return Err(QrError::Encoding("nothing to encode".into()));
    }
    options.validate()?;

    let code = QrCode::with_error_correction_level(text, options.error_correction.into())
        .map_err(|e| QrError::Encoding(e.to_string()))?;

    if let (Version::Normal(needed), Some(max)) = (code.version(), options.max_version) {
        if needed > max {
            return Err(QrError::Encoding(format!(
                "data needs version {needed}, exceeding the maximum of {max}"
            )));
        }
    }

    Ok(code)
}

/// Render `text` as a black-on-white QR symbol using the smallest version that fits.
pub fn generate_qr_image(text: &str, options: &EncodeOptions) -> Result<RgbImage> {
    let code = build_code(text, options)?;
    let side = image_side(code.width() as u32, options.border, options.box_size)?;

    let symbol = code
        .render::<Rgb<u8>>()
        .quiet_zone(false)
        .module_dimensions(options.box_size, options.box_size)
        .dark_color(DARK)
        .light_color(LIGHT)
        .build();

    // side <= MAX_IMAGE_SIDE, so the margin cannot overflow.
    let margin = options.border * options.box_size;
    let mut image = RgbImage::from_pixel(side, side, LIGHT);
    imageops::replace(&mut image, &symbol, i64::from(margin), i64::from(margin));

    debug!(
        version = ?code.version(),
        modules = code.width(),
        width = image.width(),
        ec = %options.error_correction,
        "Generated QR image"
    );

    Ok(image)
}

/// Locate and decode every QR symbol in `img`.
///
/// An image without any readable symbol yields an empty vector, not an error.
/// When nothing decodes, detection is retried once on the inverted image so
/// light-on-dark codes are found as well.
pub fn decode_qr_symbols(img: &DynamicImage) -> Result<Vec<String>> {
    if img.width() == 0 || img.height() == 0 {
        return Err(QrError::Decoding("image has no pixels".into()));
    }

    let gray = img.to_luma8();
    let found = decode_qr_from_gray(gray.clone());
    if !found.is_empty() {
        return Ok(found);
    }

    let mut inverted = gray;
    imageops::invert(&mut inverted);
    let found = decode_qr_from_gray(inverted);
    if !found.is_empty() {
        debug!("Decoded {} symbol(s) from inverted image", found.len());
    }
    Ok(found)
}

/// Decode an encoded image file (PNG, JPEG, GIF) held in memory.
pub fn decode_qr_bytes(bytes: &[u8]) -> Result<Vec<String>> {
    let img = image::load_from_memory(bytes).map_err(|e| QrError::Decoding(e.to_string()))?;
    decode_qr_symbols(&img)
}

pub fn decode_qr_file(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path)?;
    decode_qr_bytes(&bytes)
}

fn decode_qr_from_gray(gray: GrayImage) -> Vec<String> {
    let mut prepared = PreparedImage::prepare(gray);
    let grids = prepared.detect_grids();

    grids
        .iter()
        .filter_map(|grid| match grid.decode() {
            Ok((_, content)) => Some(content),
            Err(e) => {
                debug!("Skipping unreadable QR grid: {:?}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_generation() {
        let image = generate_qr_image("Hello, World!", &EncodeOptions::default()).unwrap();
        assert!(image.width() > 0);
        assert_eq!(image.width(), image.height());
    }

    #[test]
    fn test_qr_dimensions_follow_box_size_and_border() {
        let options = EncodeOptions {
            box_size: 3,
            border: 2,
            ..EncodeOptions::default()
        };
        // "A" fits in a version 1 symbol, which is 21 modules wide.
        let image = generate_qr_image("A", &options).unwrap();
        assert_eq!(image.width(), (21 + 2 * 2) * 3);

        // Border pixels are white, the top-left finder corner is black.
        assert_eq!(*image.get_pixel(0, 0), LIGHT);
        assert_eq!(*image.get_pixel(6, 6), DARK);
    }

    #[test]
    fn test_qr_roundtrip() {
        let data = "Test data for QR code roundtrip";
        let image = generate_qr_image(data, &EncodeOptions::default()).unwrap();

        let decoded = decode_qr_symbols(&DynamicImage::ImageRgb8(image)).unwrap();
        assert_eq!(decoded, vec![data.to_string()]);
    }

    #[test]
    fn test_roundtrip_every_error_correction_level() {
        for level in [
            ErrorCorrection::L,
            ErrorCorrection::M,
            ErrorCorrection::Q,
            ErrorCorrection::H,
        ] {
            let options = EncodeOptions {
                error_correction: level,
                box_size: 4,
                ..EncodeOptions::default()
            };
            let image = generate_qr_image("https://wa.me/15551234567", &options).unwrap();
            let decoded = decode_qr_symbols(&DynamicImage::ImageRgb8(image)).unwrap();
            assert_eq!(decoded, vec!["https://wa.me/15551234567".to_string()], "level {level}");
        }
    }

    #[test]
    fn test_inverted_symbol_is_decoded() {
        let mut image = generate_qr_image("inverted", &EncodeOptions::default()).unwrap();
        imageops::invert(&mut image);

        let decoded = decode_qr_symbols(&DynamicImage::ImageRgb8(image)).unwrap();
        assert_eq!(decoded, vec!["inverted".to_string()]);
    }

    #[test]
    fn test_blank_image_has_no_symbols() {
        let blank = DynamicImage::ImageRgb8(RgbImage::from_pixel(200, 200, LIGHT));
        assert!(decode_qr_symbols(&blank).unwrap().is_empty());
    }

    #[test]
    fn test_zero_sized_image_is_decoding_error() {
        let empty = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        assert!(matches!(
            decode_qr_symbols(&empty),
            Err(QrError::Decoding(_))
        ));
    }

    #[test]
    fn test_garbage_bytes_are_decoding_error() {
        assert!(matches!(
            decode_qr_bytes(b"definitely not an image"),
            Err(QrError::Decoding(_))
        ));
    }

    #[test]
    fn test_zero_box_size_rejected() {
        let options = EncodeOptions {
            box_size: 0,
            ..EncodeOptions::default()
        };
        assert!(matches!(
            generate_qr_image("x", &options),
            Err(QrError::Encoding(_))
        ));
    }

    #[test]
    fn test_max_version_limits_capacity() {
        let options = EncodeOptions {
            max_version: Some(1),
            ..EncodeOptions::default()
        };
        assert!(generate_qr_image("short", &options).is_ok());

        let long = "x".repeat(200);
        assert!(matches!(
            generate_qr_image(&long, &options),
            Err(QrError::Encoding(_))
        ));
    }

    #[test]
    fn test_max_version_out_of_range_rejected() {
        let options = EncodeOptions {
            max_version: Some(41),
            ..EncodeOptions::default()
        };
        assert!(generate_qr_image("x", &options).is_err());
    }

    #[test]
    fn test_oversized_border_rejected_without_panic() {
        let options = EncodeOptions {
            box_size: 1,
            border: 2_200_000_000,
            ..EncodeOptions::default()
        };
        assert!(matches!(
            generate_qr_image("A", &options),
            Err(QrError::Encoding(_))
        ));
    }

    #[test]
    fn test_huge_image_rejected_before_rendering() {
        let options = EncodeOptions {
            box_size: 70_000,
            border: 70_000,
            ..EncodeOptions::default()
        };
        assert!(matches!(
            generate_qr_image("A", &options),
            Err(QrError::Encoding(_))
        ));
    }

    #[test]
    fn test_side_cap_applies_to_actual_symbol() {
        // Version 1 fits: (21 + 8) * 500 = 14500 px. Version 2 does not: (25 + 8) * 500.
        let options = EncodeOptions {
            box_size: 500,
            ..EncodeOptions::default()
        };
        assert!(options.validate().is_ok());
        assert!(generate_qr_image(&"x".repeat(30), &options).is_err());
    }

    #[test]
    fn test_image_side() {
        assert_eq!(image_side(21, 4, 10).unwrap(), 290);
        assert!(image_side(21, u32::MAX, 1).is_err());
        assert!(image_side(21, 0, MAX_IMAGE_SIDE).is_err());
    }

    #[test]
    fn test_empty_text_rejected() {
        assert!(matches!(
            generate_qr_image("", &EncodeOptions::default()),
            Err(QrError::Encoding(_))
        ));
    }

    #[test]
    fn test_text_beyond_capacity_rejected() {
        let huge = "x".repeat(8000);
        assert!(matches!(
            generate_qr_image(&huge, &EncodeOptions::default()),
            Err(QrError::Encoding(_))
        ));
    }
}
