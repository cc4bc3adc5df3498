//! Character-cell display surface.
//!
//! The simulation never talks to a window or terminal directly. It issues
//! `draw_glyph` commands and `refresh` triggers against the [`Display`] trait;
//! [`GlyphBuffer`] is the in-memory surface the windowed driver renders from.

/// Sink for per-cell draw commands.
pub trait Display {
    /// Place `glyph` at screen position (row, col). Off-screen positions are ignored.
    fn draw_glyph(&mut self, row: usize, col: usize, glyph: char);

    /// Flush pending draws to the visible surface.
    fn refresh(&mut self);
}

/// Double-buffered grid of glyphs.
///
/// Draws land in a pending frame. `refresh` publishes the pending frame so the
/// renderer only ever sees whole refreshes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBuffer {
    rows: usize,
    cols: usize,
    pending: Vec<char>,
    visible: Vec<char>,
    refreshes: u64,
}

impl GlyphBuffer {
    pub fn new(rows: usize, cols: usize) -> Self {
        let len = rows * cols;
        Self {
            rows,
            cols,
            pending: vec![' '; len],
            visible: vec![' '; len],
            refreshes: 0,
        }
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of refreshes issued so far
    pub const fn refresh_count(&self) -> u64 {
        self.refreshes
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Glyph currently visible at (row, col)
    pub fn visible(&self, row: usize, col: usize) -> Option<char> {
        self.idx(row, col).map(|i| self.visible[i])
    }

    /// Glyph drawn at (row, col) but possibly not yet refreshed
    pub fn pending(&self, row: usize, col: usize) -> Option<char> {
        self.idx(row, col).map(|i| self.pending[i])
    }

    /// Visible glyphs of one row as a string
    pub fn row_text(&self, row: usize) -> String {
        if row >= self.rows {
            return String::new();
        }
        self.visible[row * self.cols..(row + 1) * self.cols].iter().collect()
    }

    /// Iterate visible non-blank glyphs with their positions
    pub fn iter_visible(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        let cols = self.cols;
        self.visible
            .iter()
            .enumerate()
            .filter(|(_, ch)| **ch != ' ')
            .map(move |(i, ch)| (i / cols, i % cols, *ch))
    }
}

impl Display for GlyphBuffer {
    fn draw_glyph(&mut self, row: usize, col: usize, glyph: char) {
        if let Some(i) = self.idx(row, col) {
            self.pending[i] = glyph;
        }
    }

    fn refresh(&mut self) {
        self.visible.copy_from_slice(&self.pending);
        self.refreshes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_is_invisible_until_refresh() {
        let mut buf = GlyphBuffer::new(2, 3);
        buf.draw_glyph(1, 2, '*');

        assert_eq!(buf.pending(1, 2), Some('*'));
        assert_eq!(buf.visible(1, 2), Some(' '));

        buf.refresh();
        assert_eq!(buf.visible(1, 2), Some('*'));
        assert_eq!(buf.refresh_count(), 1);
        assert_eq!(buf.row_text(1), "  *");
    }

    #[test]
    fn test_off_screen_draws_are_ignored() {
        let mut buf = GlyphBuffer::new(2, 2);
        buf.draw_glyph(5, 0, '*');
        buf.draw_glyph(0, 5, '*');
        buf.refresh();

        assert_eq!(buf.iter_visible().count(), 0);
        assert_eq!(buf.visible(5, 0), None);
        assert_eq!(buf.row_text(9), "");
    }

    #[test]
    fn test_iter_visible_positions() {
        let mut buf = GlyphBuffer::new(3, 3);
        buf.draw_glyph(0, 1, '*');
        buf.draw_glyph(2, 2, '.');
        buf.refresh();

        let glyphs: Vec<_> = buf.iter_visible().collect();
        assert_eq!(glyphs, vec![(0, 1, '*'), (2, 2, '.')]);
    }
}
