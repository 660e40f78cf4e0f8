//! Project modal overlay: the card's box morphs into a centred panel, then
//! the long-form content fades and slides in.
//!
//! [`ModalGeometry`] is computed the same way for drawing and for mouse
//! hit-testing, so a click always lands on what is on screen.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::core::content::Project;

use super::layout::wrap_text;
use super::theme::{rgb, Theme, ACCENT, MUTED, PANEL, TEXT};

pub const CLOSE_LABEL: &str = "[X]";
pub const LINK_LABEL: &str = "[ Open project link ]";
const MAX_WIDTH: u16 = 84;
const MAX_HEIGHT: u16 = 22;

/// Where the modal is on screen for a given morph progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalGeometry {
    /// Fully expanded panel.
    pub target: Rect,
    /// Panel as currently drawn.
    pub panel: Rect,
    pub close: Rect,
    /// Inside the border and padding.
    pub content: Rect,
    /// Link button; `None` when the project has no link or it does not fit.
    pub link: Option<Rect>,
}

impl ModalGeometry {
    /// `origin` is the card's on-screen box, `progress` 0..=1 the morph.
    pub fn compute(page: Rect, origin: Rect, progress: f64, has_link: bool) -> Self {
        let width = page.width.saturating_sub(4).clamp(1, MAX_WIDTH).min(page.width);
        let height = page.height.saturating_sub(2).clamp(1, MAX_HEIGHT).min(page.height);
        let target = Rect::new(
            page.x + (page.width - width) / 2,
            page.y + (page.height - height) / 2,
            width,
            height,
        );
        let origin = match origin.intersection(page) {
            r if r.is_empty() => Rect::new(
                target.x + target.width / 2,
                target.y + target.height / 2,
                0,
                0,
            ),
            r => r,
        };
        let panel = lerp_rect(origin, target, progress);

        let close_width = CLOSE_LABEL.width() as u16;
        let close = if panel.width >= close_width + 3 {
            Rect::new(panel.right() - close_width - 2, panel.y, close_width, 1)
        } else {
            Rect::new(panel.x, panel.y, 0, 0)
        };

        let content = Rect::new(
            panel.x.saturating_add(2),
            panel.y.saturating_add(1),
            panel.width.saturating_sub(4),
            panel.height.saturating_sub(2),
        );

        let link_width = LINK_LABEL.width() as u16;
        let link = (has_link && content.width >= link_width && content.height >= 2)
            .then(|| Rect::new(content.x, content.bottom() - 1, link_width, 1));

        Self {
            target,
            panel,
            close,
            content,
            link,
        }
    }

    pub fn hit(&self, pos: Position) -> ModalHit {
        if self.close.contains(pos) {
            ModalHit::Close
        } else if self.link.is_some_and(|r| r.contains(pos)) {
            ModalHit::Link
        } else if self.panel.contains(pos) {
            ModalHit::Panel
        } else {
            ModalHit::Backdrop
        }
    }
}

/// What a click on the modal overlay landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalHit {
    Close,
    Link,
    /// Anywhere else inside the panel; swallowed.
    Panel,
    Backdrop,
}

fn lerp_rect(from: Rect, to: Rect, t: f64) -> Rect {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: u16, b: u16| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u16;
    let x = lerp(from.x, to.x);
    let y = lerp(from.y, to.y);
    let right = lerp(from.right(), to.right());
    let bottom = lerp(from.bottom(), to.bottom());
    Rect::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y))
}

/// Draws backdrop, panel and staged content.
pub struct ModalWidget<'a> {
    pub project: &'a Project,
    pub geometry: ModalGeometry,
    /// Backdrop strength, follows the morph.
    pub backdrop: f64,
    pub content_opacity: f64,
    /// Remaining slide-up distance in rows.
    pub content_offset: f64,
    pub interactive: bool,
}

impl Widget for ModalWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        let geo = self.geometry;

        if self.backdrop > 0.0 {
            let fg = Theme::backdrop_fg(self.backdrop);
            for y in area.top()..area.bottom() {
                for x in area.left()..area.right() {
                    let pos = Position::new(x, y);
                    if geo.panel.contains(pos) {
                        continue;
                    }
                    if let Some(cell) = buf.cell_mut(pos) {
                        cell.set_fg(fg);
                    }
                }
            }
        }

        let panel = geo.panel.intersection(area);
        if panel.width < 2 || panel.height < 2 {
            return;
        }
        Clear.render(panel, buf);
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(rgb(ACCENT)).bg(rgb(PANEL)))
            .style(Theme::panel_style())
            .render(panel, buf);
        if !geo.close.is_empty() {
            buf.set_string(geo.close.x, geo.close.y, CLOSE_LABEL, Theme::close_style());
        }

        if self.content_opacity <= 0.0 || geo.content.is_empty() {
            return;
        }
        let opacity = self.content_opacity;
        let text = Style::default().fg(Theme::fade(TEXT, PANEL, opacity));
        let muted = Style::default().fg(Theme::fade(MUTED, PANEL, opacity));
        let accent = Style::default()
            .fg(Theme::fade(ACCENT, PANEL, opacity))
            .add_modifier(Modifier::BOLD);

        let mut lines: Vec<Line> = wrap_text(self.project.title, geo.content.width)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, accent)))
            .collect();
        lines.push(Line::from(Span::styled(self.project.tags.join(" · "), muted)));
        lines.push(Line::raw(""));
        lines.extend(
            wrap_text(self.project.description, geo.content.width)
                .into_iter()
                .map(|l| Line::from(Span::styled(l, text))),
        );

        // Slide: content starts a little low and rises into place.
        let shift = self.content_offset.max(0.0).round() as u16;
        let body = Rect::new(
            geo.content.x,
            geo.content.y.saturating_add(shift),
            geo.content.width,
            geo.content
                .height
                .saturating_sub(shift)
                .saturating_sub(u16::from(geo.link.is_some()) * 2),
        );
        Paragraph::new(lines).render(body, buf);

        if let (Some(link), Some(_)) = (geo.link, self.project.href) {
            let style = if self.interactive {
                Theme::button_style(true)
            } else {
                accent
            };
            buf.set_string(link.x, link.y, LINK_LABEL, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::PROJECTS;

    const PAGE: Rect = Rect::new(0, 0, 100, 30);

    #[test]
    fn panel_morphs_from_card_to_centre() {
        let card = Rect::new(4, 20, 30, 7);
        let start = ModalGeometry::compute(PAGE, card, 0.0, true);
        assert_eq!(start.panel, card);
        let end = ModalGeometry::compute(PAGE, card, 1.0, true);
        assert_eq!(end.panel, end.target);
        assert_eq!(end.target.width, MAX_WIDTH);
        assert_eq!(end.target.x, (100 - MAX_WIDTH) / 2);
        let mid = ModalGeometry::compute(PAGE, card, 0.5, true);
        assert!(mid.panel.width > card.width && mid.panel.width < end.panel.width);
    }

    #[test]
    fn hit_zones_are_disjoint_and_ordered() {
        let geo = ModalGeometry::compute(PAGE, Rect::new(4, 20, 30, 7), 1.0, true);
        let close = Position::new(geo.close.x + 1, geo.close.y);
        assert_eq!(geo.hit(close), ModalHit::Close);
        let link = geo.link.unwrap();
        assert_eq!(geo.hit(Position::new(link.x, link.y)), ModalHit::Link);
        let inside = Position::new(geo.panel.x + 3, geo.panel.y + 3);
        assert_eq!(geo.hit(inside), ModalHit::Panel);
        assert_eq!(geo.hit(Position::new(0, 0)), ModalHit::Backdrop);
    }

    #[test]
    fn offscreen_card_grows_from_the_centre() {
        let geo = ModalGeometry::compute(PAGE, Rect::new(0, 200, 30, 7), 0.0, false);
        assert!(geo.panel.is_empty());
        assert!(geo.link.is_none());
    }

    #[test]
    fn open_modal_renders_title_close_and_link() {
        let project = &PROJECTS[0];
        let geo = ModalGeometry::compute(PAGE, Rect::new(4, 20, 30, 7), 1.0, true);
        let mut buf = Buffer::empty(PAGE);
        ModalWidget {
            project,
            geometry: geo,
            backdrop: 1.0,
            content_opacity: 1.0,
            content_offset: 0.0,
            interactive: true,
        }
        .render(PAGE, &mut buf);

        let row = |y: u16| -> String {
            (PAGE.left()..PAGE.right()).map(|x| buf[(x, y)].symbol().to_string()).collect()
        };
        assert!(row(geo.close.y).contains(CLOSE_LABEL));
        assert!(row(geo.content.y).contains("NER in Low-Resource Languages"));
        assert!(row(geo.link.unwrap().y).contains(LINK_LABEL));
    }

    #[test]
    fn hidden_content_is_not_drawn() {
        let project = &PROJECTS[0];
        let geo = ModalGeometry::compute(PAGE, Rect::new(4, 20, 30, 7), 1.0, true);
        let mut buf = Buffer::empty(PAGE);
        ModalWidget {
            project,
            geometry: geo,
            backdrop: 1.0,
            content_opacity: 0.0,
            content_offset: 1.0,
            interactive: false,
        }
        .render(PAGE, &mut buf);
        let all: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(!all.contains("Low-Resource"));
        assert!(all.contains(CLOSE_LABEL));
    }
}
