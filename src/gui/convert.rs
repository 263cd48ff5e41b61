use image::DynamicImage;

/// Convert any decoded raster into an egui texture source.
pub fn dynamic_to_color_image(image: &DynamicImage) -> egui::ColorImage {
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_color_image_keeps_size_and_pixels() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 2, Rgb([255, 0, 0])));
        let color = dynamic_to_color_image(&image);
        assert_eq!(color.size, [3, 2]);
        assert_eq!(color.pixels.len(), 6);
        assert!(color
            .pixels
            .iter()
            .all(|p| *p == egui::Color32::from_rgb(255, 0, 0)));
    }
}
