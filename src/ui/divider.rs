//! Section divider: a red band with the section label scrolling across it.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::marquee::Marquee;

use super::theme::Theme;

/// Display width of a marquee run, used as its measured content width.
pub fn measure(run: &str) -> f64 {
    run.width() as f64
}

/// The `width` cells of `strip` starting `offset` cells in.  Offsets outside
/// the strip wrap around, and a wide glyph cut at either edge becomes a space.
pub fn visible_window(strip: &str, offset: f64, width: u16) -> String {
    let total = strip.width();
    let width = usize::from(width);
    if total == 0 || width == 0 {
        return " ".repeat(width);
    }
    let start = if offset.is_finite() {
        (offset.floor() as i64).rem_euclid(total as i64) as usize
    } else {
        0
    };

    let mut out = String::with_capacity(width);
    let mut out_width = 0;
    let mut col = 0;
    for ch in strip.chars().cycle() {
        if out_width >= width {
            break;
        }
        let w = ch.width().unwrap_or(0);
        if col < start {
            if col + w > start {
                // Glyph straddles the left edge.
                for _ in start..col + w {
                    out.push(' ');
                    out_width += 1;
                }
            }
            col += w;
            continue;
        }
        if out_width + w > width {
            break;
        }
        out.push(ch);
        out_width += w;
    }
    while out_width < width {
        out.push(' ');
        out_width += 1;
    }
    out
}

/// Renders one divider band from its marquee.
pub struct DividerWidget<'a> {
    pub marquee: &'a Marquee,
}

impl Widget for DividerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        buf.set_style(area, Theme::band_dot_style());
        let dots: String = (0..area.width)
            .map(|x| if x % 4 == 0 { '·' } else { ' ' })
            .collect();
        let label_row = area.y + area.height / 2;
        for y in area.top()..area.bottom() {
            if y == label_row {
                let text = visible_window(self.marquee.strip(), self.marquee.offset(), area.width);
                buf.set_string(area.x, y, text, Theme::band_style());
            } else {
                // Stagger alternate rows for a woven look.
                let shift = usize::from((y - area.y) % 2 * 2);
                let row: String = dots
                    .chars()
                    .skip(shift)
                    .chain("  ".chars())
                    .take(usize::from(area.width))
                    .collect();
                buf.set_string(area.x, y, row, Theme::band_dot_style());
            }
        }
    }
}
