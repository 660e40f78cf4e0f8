//! A soft red highlight that trails the mouse pointer.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
};

use super::theme::{blend, BACKGROUND, GLOW};

const FOLLOW: f64 = 0.25;
const RADIUS_COLS: f64 = 7.0;
const RADIUS_ROWS: f64 = 3.5;

/// Eased pointer position in screen cells.
#[derive(Debug, Clone, Default)]
pub struct CursorGlow {
    target: Option<(f64, f64)>,
    pos: (f64, f64),
}

impl CursorGlow {
    pub fn move_to(&mut self, col: u16, row: u16) {
        let target = (f64::from(col), f64::from(row));
        if self.target.is_none() {
            // First sighting: appear under the pointer instead of flying in.
            self.pos = target;
        }
        self.target = Some(target);
    }

    pub fn hide(&mut self) {
        self.target = None;
    }

    pub fn is_visible(&self) -> bool {
        self.target.is_some()
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        self.target.map(|_| self.pos)
    }

    pub fn tick(&mut self) {
        if let Some((tx, ty)) = self.target {
            self.pos.0 += (tx - self.pos.0) * FOLLOW;
            self.pos.1 += (ty - self.pos.1) * FOLLOW;
        }
    }

    /// Tint cell backgrounds around the pointer, strongest at the centre.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let Some((cx, cy)) = self.position() else {
            return;
        };
        let area = area.intersection(buf.area);
        for y in area.top()..area.bottom() {
            let dy = (f64::from(y) - cy) / RADIUS_ROWS;
            for x in area.left()..area.right() {
                let dx = (f64::from(x) - cx) / RADIUS_COLS;
                let d2 = dx * dx + dy * dy;
                if d2 >= 1.0 {
                    continue;
                }
                if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
                    cell.set_bg(blend(BACKGROUND, GLOW, 1.0 - d2));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::rgb;

    #[test]
    fn follows_the_pointer_with_easing() {
        let mut glow = CursorGlow::default();
        assert!(!glow.is_visible());
        glow.move_to(10, 4);
        assert_eq!(glow.position(), Some((10.0, 4.0)));
        glow.move_to(20, 4);
        glow.tick();
        assert_eq!(glow.position(), Some((12.5, 4.0)));
        glow.hide();
        assert_eq!(glow.position(), None);
    }

    #[test]
    fn tints_only_near_the_pointer() {
        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        let mut glow = CursorGlow::default();
        glow.move_to(5, 5);
        glow.render(area, &mut buf);
        assert_eq!(buf[(5u16, 5u16)].bg, rgb(GLOW));
        assert_eq!(buf[(25u16, 5u16)].bg, ratatui::style::Color::Reset);
    }
}
