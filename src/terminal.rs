use qrcode::Color;
use terminal_size::{terminal_size, Width};

use crate::error::Result;
use crate::qr::{build_code, image_side, EncodeOptions};

/// Render `text` with half-block characters, two module rows per terminal line.
///
/// Options are validated exactly as for image output. The configured border
/// is kept; box size does not apply in a terminal. The symbol is centred
/// horizontally when the terminal width is known.
pub fn render_qr_to_terminal(text: &str, options: &EncodeOptions) -> Result<String> {
    let code = build_code(text, options)?;

    let qr_size = code.width();
    let colors = code.to_colors();
    let border = options.border as usize;
    let qr_with_quiet = image_side(qr_size as u32, options.border, 1)? as usize;

    let term_width = terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(qr_with_quiet);
    let left_pad = " ".repeat(term_width.saturating_sub(qr_with_quiet) / 2);

    let is_dark = |row: usize, col: usize| -> bool {
        if (border..qr_size + border).contains(&row) && (border..qr_size + border).contains(&col) {
            colors[(row - border) * qr_size + (col - border)] == Color::Dark
        } else {
            false
        }
    };

    let mut result = String::new();
    for top_row in (0..qr_with_quiet).step_by(2) {
        let bottom_row = top_row + 1;
        result.push_str(&left_pad);

        for col in 0..qr_with_quiet {
            let top_dark = is_dark(top_row, col);
            let bottom_dark = bottom_row < qr_with_quiet && is_dark(bottom_row, col);

            let ch = match (top_dark, bottom_dark) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            };
            result.push(ch);
        }
        result.push('\n');
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QrError;

    #[test]
    fn test_render_line_count() {
        let options = EncodeOptions {
            border: 2,
            ..EncodeOptions::default()
        };
        // Version 1: 21 modules + 2*2 border = 25 rows, rendered in 13 lines.
        let rendered = render_qr_to_terminal("A", &options).unwrap();
        assert_eq!(rendered.lines().count(), 13);
        assert!(rendered.contains('█'));
    }

    #[test]
    fn test_render_rejects_empty_text() {
        assert!(matches!(
            render_qr_to_terminal("", &EncodeOptions::default()),
            Err(QrError::Encoding(_))
        ));
    }

    #[test]
    fn test_render_honours_max_version() {
        let options = EncodeOptions {
            max_version: Some(1),
            ..EncodeOptions::default()
        };
        assert!(render_qr_to_terminal("short", &options).is_ok());
        assert!(matches!(
            render_qr_to_terminal(&"x".repeat(200), &options),
            Err(QrError::Encoding(_))
        ));
    }

    #[test]
    fn test_render_rejects_zero_box_size() {
        let options = EncodeOptions {
            box_size: 0,
            ..EncodeOptions::default()
        };
        assert!(render_qr_to_terminal("A", &options).is_err());
    }

    #[test]
    fn test_render_rejects_oversized_border() {
        let options = EncodeOptions {
            border: u32::MAX,
            ..EncodeOptions::default()
        };
        assert!(render_qr_to_terminal("A", &options).is_err());
    }

    #[test]
    fn test_render_rejects_oversized_text() {
        let huge = "x".repeat(8000);
        assert!(render_qr_to_terminal(&huge, &EncodeOptions::default()).is_err());
    }
}
