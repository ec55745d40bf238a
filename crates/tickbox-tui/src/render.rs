//! Box drawing.
//!
//! Everything is written with crossterm commands queued into an arbitrary
//! writer and flushed once per call. Positions here are 1-indexed terminal
//! rows and columns; crossterm's `MoveTo` is 0-indexed.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

/// Fixed position and size of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxGeometry {
    /// Row of the top border (1-indexed).
    pub row: u16,
    /// Column of the left border (1-indexed).
    pub col: u16,
    /// Total width including borders.
    pub width: u16,
    /// Total height including borders.
    pub height: u16,
}

impl Default for BoxGeometry {
    fn default() -> Self {
        Self { row: 10, col: 30, width: 20, height: 7 }
    }
}

impl BoxGeometry {
    /// Where the counter field starts, roughly centered: `(row, col)`.
    pub fn counter_position(&self) -> (u16, u16) {
        (self.row + self.height / 2, (self.col + self.width / 2).saturating_sub(2))
    }

    /// Row the cursor is parked on at exit, two lines below the box.
    pub fn exit_row(&self) -> u16 {
        self.row + self.height + 2
    }

    fn inner_width(&self) -> usize {
        usize::from(self.width.saturating_sub(2))
    }
}

/// Convert a 1-indexed `(row, col)` to crossterm's cursor command.
fn cursor_at(row: u16, col: u16) -> MoveTo {
    MoveTo(col.saturating_sub(1), row.saturating_sub(1))
}

/// Clear the screen and draw the red bordered box.
pub fn draw_frame<W: Write>(out: &mut W, geometry: &BoxGeometry) -> io::Result<()> {
    let inner = geometry.inner_width();
    let border = "─".repeat(inner);
    let blank = " ".repeat(inner);

    queue!(
        out,
        Clear(ClearType::All),
        MoveTo(0, 0),
        SetForegroundColor(Color::DarkRed),
        cursor_at(geometry.row, geometry.col),
        Print(format!("┌{border}┐"))
    )?;

    for offset in 1..geometry.height.saturating_sub(1) {
        queue!(out, cursor_at(geometry.row + offset, geometry.col), Print(format!("│{blank}│")))?;
    }

    let bottom = geometry.row + geometry.height.saturating_sub(1);
    queue!(out, cursor_at(bottom, geometry.col), Print(format!("└{border}┘")), ResetColor)?;

    out.flush()
}

/// Redraw the counter field inside the box.
pub fn draw_counter<W: Write>(out: &mut W, geometry: &BoxGeometry, field: &str) -> io::Result<()> {
    let (row, col) = geometry.counter_position();
    queue!(out, cursor_at(row, col), Print(field))?;
    out.flush()
}

/// Move the cursor below the box so the shell prompt does not overwrite it.
pub fn park_cursor<W: Write>(out: &mut W, geometry: &BoxGeometry) -> io::Result<()> {
    queue!(out, cursor_at(geometry.exit_row(), 1))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(draw: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        draw(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn default_counter_position() {
        assert_eq!(BoxGeometry::default().counter_position(), (13, 38));
        assert_eq!(BoxGeometry::default().exit_row(), 19);
    }

    #[test]
    fn frame_has_borders_at_origin() {
        let geometry = BoxGeometry::default();
        let out = rendered(|out| draw_frame(out, &geometry));

        assert!(out.starts_with("\x1b[2J"));
        assert!(out.contains(&format!("\x1b[10;30H┌{}┐", "─".repeat(18))));
        assert!(out.contains(&format!("\x1b[16;30H└{}┘", "─".repeat(18))));
        for row in 11..16 {
            assert!(out.contains(&format!("\x1b[{row};30H│{}│", " ".repeat(18))), "row {row}");
        }
    }

    #[test]
    fn frame_resets_color() {
        let out = rendered(|out| draw_frame(out, &BoxGeometry::default()));
        assert!(out.ends_with("\x1b[0m"));
    }

    #[test]
    fn counter_is_written_at_fixed_position() {
        let out = rendered(|out| draw_counter(out, &BoxGeometry::default(), "   1"));
        assert_eq!(out, "\x1b[13;38H   1");
    }

    #[test]
    fn cursor_parks_below_box() {
        let out = rendered(|out| park_cursor(out, &BoxGeometry::default()));
        assert_eq!(out, "\x1b[19;1H");
    }

    #[test]
    fn custom_geometry() {
        let geometry = BoxGeometry { row: 1, col: 1, width: 10, height: 3 };
        assert_eq!(geometry.counter_position(), (2, 4));

        let out = rendered(|out| draw_frame(out, &geometry));
        assert!(out.contains(&format!("\x1b[1;1H┌{}┐", "─".repeat(8))));
        assert!(out.contains(&format!("\x1b[3;1H└{}┘", "─".repeat(8))));
    }
}
