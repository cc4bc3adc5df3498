use macroquad::prelude::*;

use crate::display::GlyphBuffer;

/// Colors
const ALIVE_COLOR: Color = Color::new(0.0, 1.0, 0.59, 1.0); // Bright green
const FADING_COLOR: Color = Color::new(0.35, 0.35, 0.45, 1.0);
const STATUS_BACKGROUND: Color = Color::new(0.12, 0.12, 0.12, 1.0);

/// Pixel size of one glyph cell for a font size, as (width, height)
pub fn glyph_cell_size(font_size: u16) -> (f32, f32) {
    let dims = measure_text("M", None, font_size, 1.0);
    (dims.width.max(1.0), font_size as f32)
}

/// How many glyph rows and columns fit in the window, keeping one row for status
pub fn grid_capacity(font_size: u16) -> (usize, usize) {
    let (cell_w, cell_h) = glyph_cell_size(font_size);
    let rows = ((screen_height() - cell_h) / cell_h).floor().max(1.0) as usize;
    let cols = (screen_width() / cell_w).floor().max(1.0) as usize;
    (rows, cols)
}

/// Color a glyph is drawn with
pub fn glyph_color(glyph: char) -> Color {
    match glyph {
        '*' => ALIVE_COLOR,
        '.' => FADING_COLOR,
        _ => GRAY,
    }
}

/// Draw the visible frame of `screen` as a grid of glyphs, with a status line below
pub fn draw_screen(screen: &GlyphBuffer, font_size: u16, status: &str) {
    let (cell_w, cell_h) = glyph_cell_size(font_size);
    let mut utf8 = [0u8; 4];

    // Blank glyphs are skipped; the background is already cleared
    for (row, col, glyph) in screen.iter_visible() {
        draw_text(
            glyph.encode_utf8(&mut utf8),
            col as f32 * cell_w,
            (row + 1) as f32 * cell_h,
            font_size as f32,
            glyph_color(glyph),
        );
    }

    let (rows, _) = screen.dimensions();
    let status_y = rows as f32 * cell_h;
    draw_rectangle(0.0, status_y, screen_width(), cell_h + 4.0, STATUS_BACKGROUND);
    draw_text(status, 0.0, status_y + cell_h, font_size as f32, WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_colors() {
        assert_eq!(glyph_color('*'), ALIVE_COLOR);
        assert_eq!(glyph_color('.'), FADING_COLOR);
        assert_eq!(glyph_color('#'), GRAY);
    }
}
