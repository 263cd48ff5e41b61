use std::path::Path;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Size of the blank canvas shown when no image is loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
        }
    }
}

/// The single image currently on display.
#[derive(Debug, Default)]
pub struct Viewport {
    image: Option<DynamicImage>,
    canvas: CanvasSize,
    /// Bumped on every set/clear so renderers can tell when to refresh.
    revision: u64,
}

impl Viewport {
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            image: None,
            canvas,
            revision: 0,
        }
    }

    /// Replace whatever is displayed. The previous pixel buffer is dropped.
    pub fn set_image(&mut self, image: impl Into<DynamicImage>) {
        let image = image.into();
        debug!(width = image.width(), height = image.height(), "Viewport image replaced");
        self.image = Some(image);
        self.revision += 1;
    }

    pub fn clear(&mut self) {
        self.image = None;
        self.revision += 1;
    }

    pub fn image(&self) -> Option<&DynamicImage> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// What the user sees: the loaded image, or a blank white canvas.
    pub fn snapshot(&self) -> DynamicImage {
        match &self.image {
            Some(image) => image.clone(),
            None => DynamicImage::ImageRgb8(RgbImage::from_pixel(
                self.canvas.width,
                self.canvas.height,
                Rgb([255, 255, 255]),
            )),
        }
    }

    /// Write the snapshot as PNG, whatever the extension of `path`.
    pub fn export_to_file(&self, path: &Path) -> Result<()> {
        self.snapshot().save_with_format(path, ImageFormat::Png)?;
        debug!("Viewport exported to {}", path.display());
        Ok(())
    }

    /// Load a PNG, JPEG or GIF file and display it.
    pub fn load_from_file(&mut self, path: &Path) -> Result<&DynamicImage> {
        let bytes = std::fs::read(path)?;
        let image = image::load_from_memory(&bytes)?;
        debug!(
            width = image.width(),
            height = image.height(),
            "Loaded {}",
            path.display()
        );
        self.revision += 1;
        Ok(&*self.image.insert(image))
    }
}
