//! Landing intro screen: the greeting and whichever button is up.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Modifier, Style},
    widgets::{Block, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::core::intro::{IntroButton, LandingIntro, GREETING};

use super::theme::{rgb, Theme, ACCENT, BACKGROUND, TEXT};

/// Screen positions of the greeting and the three buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntroGeometry {
    /// One rect per greeting line.
    pub lines: Vec<Rect>,
    buttons: [(IntroButton, Rect); 3],
}

impl IntroGeometry {
    pub fn compute(area: Rect) -> Self {
        let block_top = area.y + area.height.saturating_sub(GREETING.len() as u16 * 2) / 2;
        let lines = GREETING
            .iter()
            .enumerate()
            .map(|(i, text)| centred(area, text.width() as u16, block_top + i as u16 * 2))
            .collect();

        let primary = padded(IntroButton::Primary);
        let top_right = padded(IntroButton::TopRight);
        let middle_left = padded(IntroButton::MiddleLeft);
        let buttons = [
            (
                IntroButton::Primary,
                centred(area, primary, area.bottom().saturating_sub(3).max(area.y)),
            ),
            (
                IntroButton::TopRight,
                Rect::new(
                    area.right().saturating_sub(top_right + 2).max(area.x),
                    area.y + area.height.min(1),
                    top_right.min(area.width),
                    1,
                ),
            ),
            (
                IntroButton::MiddleLeft,
                Rect::new(
                    area.x + area.width.min(2),
                    area.y + area.height / 2,
                    middle_left.min(area.width),
                    1,
                ),
            ),
        ];
        Self { lines, buttons }
    }

    pub fn button_rect(&self, button: IntroButton) -> Rect {
        self.buttons
            .iter()
            .find(|(b, _)| *b == button)
            .map(|&(_, r)| r)
            .unwrap_or_default()
    }

    /// Which button occupies `pos`, shown or not.
    pub fn button_at(&self, pos: Position) -> Option<IntroButton> {
        self.buttons
            .iter()
            .find(|(_, r)| r.contains(pos))
            .map(|&(b, _)| b)
    }
}

fn padded(button: IntroButton) -> u16 {
    button.label().width() as u16 + 4
}

fn centred(area: Rect, width: u16, y: u16) -> Rect {
    let width = width.min(area.width);
    Rect::new(area.x + (area.width - width) / 2, y, width, 1)
}

pub struct IntroWidget<'a> {
    pub intro: &'a LandingIntro,
}

impl Widget for IntroWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default().style(Theme::page_style()).render(area, buf);
        let geo = IntroGeometry::compute(area);

        let text_style = Style::default()
            .fg(Theme::fade(TEXT, BACKGROUND, self.intro.text_opacity()))
            .add_modifier(Modifier::BOLD);
        let bottom = area.bottom().min(buf.area.bottom());
        let on_screen = |r: &Rect| r.y < bottom;
        for (rect, line) in geo.lines.iter().zip(GREETING).filter(|(r, _)| on_screen(r)) {
            buf.set_stringn(rect.x, rect.y, line, usize::from(rect.width), text_style);
        }

        if let Some(button) = self.intro.visible_button() {
            let rect = geo.button_rect(button);
            if !on_screen(&rect) {
                return;
            }
            let style = Style::default()
                .fg(rgb(BACKGROUND))
                .bg(Theme::fade(ACCENT, BACKGROUND, self.intro.button_opacity()))
                .add_modifier(Modifier::BOLD);
            let label = format!("  {}  ", button.label());
            buf.set_stringn(rect.x, rect.y, label, usize::from(rect.width), style);
        }
    }
}
