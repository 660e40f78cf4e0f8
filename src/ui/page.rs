//! The scrolling page.
//!
//! Everything is drawn into an off-screen buffer the size of the whole
//! document, at [`PageLayout`] coordinates, and the visible window is copied
//! into the frame.  Only blocks that overlap the window are drawn.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::core::content::{Profile, PROJECTS, SECTIONS};
use crate::core::marquee::Marquee;

use super::cards::{InfoCardWidget, ProjectCardWidget};
use super::divider::DividerWidget;
use super::hero::{CubeCamera, HeroWidget};
use super::layout::{PageBlock, PageLayout};
use super::theme::Theme;

/// Where the document window sits on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub area: Rect,
    /// First document row shown.
    pub top: u16,
    /// Blank rows above the document while it slides in.
    pub entrance: u16,
}

impl Viewport {
    /// Document position under a screen cell, if the page is there.
    pub fn screen_to_doc(&self, col: u16, row: u16) -> Option<Position> {
        let pos = Position::new(col, row);
        if !self.area.contains(pos) {
            return None;
        }
        let row = (row - self.area.y).checked_sub(self.entrance)?;
        Some(Position::new(col - self.area.x, self.top.saturating_add(row)))
    }

    /// On-screen part of a document rect; empty when scrolled away.  The
    /// rows the entrance slide leaves blank hold no document.
    pub fn doc_to_screen(&self, rect: Rect) -> Rect {
        let first_row = i32::from(self.area.y) + i32::from(self.entrance);
        let y = first_row + i32::from(rect.y) - i32::from(self.top);
        let top = y.max(first_row);
        let bottom = (y + i32::from(rect.height)).min(i32::from(self.area.bottom()));
        if bottom <= top {
            return Rect::new(self.area.x.saturating_add(rect.x), self.area.y, 0, 0);
        }
        let screen = Rect::new(
            self.area.x.saturating_add(rect.x),
            top as u16,
            rect.width,
            (bottom - top) as u16,
        );
        screen.intersection(self.area)
    }
}

pub struct PageWidget<'a> {
    pub layout: &'a PageLayout,
    pub profile: &'a Profile,
    /// One per section, same order as the layout's dividers.
    pub marquees: &'a [Marquee],
    pub camera: &'a CubeCamera,
    pub viewport: Viewport,
    pub selected: Option<usize>,
    /// Project card that the modal currently owns.
    pub hidden: Option<usize>,
    pub year: i32,
}

impl Widget for PageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::page_style());
        let layout = self.layout;
        if layout.height == 0 || layout.width == 0 {
            return;
        }

        let mut doc = Buffer::empty(Rect::new(0, 0, layout.width, layout.height));
        doc.set_style(doc.area, Theme::page_style());
        let top = self.viewport.top;
        for block in layout.visible_blocks(top, area.height) {
            self.render_block(block, &mut doc);
        }

        let entrance = self.viewport.entrance;
        for row in entrance..area.height {
            let doc_y = top.saturating_add(row - entrance);
            if doc_y >= layout.height {
                break;
            }
            for x in 0..area.width.min(layout.width) {
                let Some(src) = doc.cell(Position::new(x, doc_y)) else {
                    continue;
                };
                if let Some(dst) = buf.cell_mut(Position::new(area.x + x, area.y + row)) {
                    *dst = src.clone();
                }
            }
        }
    }
}

impl PageWidget<'_> {
    fn render_block(&self, block: &PageBlock, doc: &mut Buffer) {
        match *block {
            PageBlock::Divider { section, rect } => {
                if let Some(marquee) = self.marquees.get(section) {
                    DividerWidget { marquee }.render(rect, doc);
                }
            }
            PageBlock::Hero { .. } => HeroWidget {
                profile: self.profile,
                slots: &self.layout.hero,
                camera: self.camera,
            }
            .render_into(doc),
            PageBlock::Info { card, rect } => InfoCardWidget { card }.render(rect, doc),
            PageBlock::Project { index, rect } => {
                if self.hidden == Some(index) {
                    return;
                }
                if let Some(project) = PROJECTS.get(index) {
                    ProjectCardWidget {
                        project,
                        selected: self.selected == Some(index),
                    }
                    .render(rect, doc);
                }
            }
            PageBlock::Contact { rect } => self.render_contact(rect, doc),
            PageBlock::Footer { rect } => {
                let text = format!("© {} {}", self.year, self.profile.full_name());
                Paragraph::new(Line::from(Span::styled(text, Theme::muted_style())))
                    .centered()
                    .render(rect, doc);
            }
        }
    }

    fn render_contact(&self, rect: Rect, doc: &mut Buffer) {
        let mut lines = vec![
            Line::from(Span::styled(self.profile.contact_heading, Theme::heading_style())),
            Line::raw(""),
        ];
        for link in self.profile.contacts {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<11}", link.label), Theme::muted_style()),
                Span::styled(link.text, Theme::body_style()),
            ]));
        }
        Paragraph::new(lines).render(rect, doc);
    }
}

/// Section index whose divider is at or above `row`.
pub fn section_at(layout: &PageLayout, row: u16) -> usize {
    layout
        .anchors
        .iter()
        .rposition(|&(_, r)| r <= row)
        .unwrap_or(0)
        .min(SECTIONS.len().saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::PROFILE;
    use crate::core::marquee::MarqueeConfig;

    fn marquees() -> Vec<Marquee> {
        SECTIONS
            .iter()
            .map(|s| Marquee::new(MarqueeConfig::new(s.label)))
            .collect()
    }

    fn screen(buf: &Buffer) -> String {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn viewport_maps_between_screen_and_document() {
        let vp = Viewport {
            area: Rect::new(0, 1, 80, 20),
            top: 30,
            entrance: 2,
        };
        assert_eq!(vp.screen_to_doc(5, 1), None);
        assert_eq!(vp.screen_to_doc(5, 3), Some(Position::new(5, 30)));
        assert_eq!(vp.screen_to_doc(5, 30), None);
        assert_eq!(vp.doc_to_screen(Rect::new(4, 32, 10, 3)), Rect::new(4, 5, 10, 3));
        assert!(vp.doc_to_screen(Rect::new(4, 0, 10, 3)).is_empty());
        // Straddling the scroll top is clipped below the blank entrance rows.
        assert_eq!(vp.doc_to_screen(Rect::new(4, 27, 10, 6)), Rect::new(4, 3, 10, 3));
    }

    #[test]
    fn entrance_rows_never_hold_a_card() {
        let vp = Viewport {
            area: Rect::new(0, 0, 80, 20),
            top: 5,
            entrance: 3,
        };
        assert_eq!(vp.doc_to_screen(Rect::new(0, 3, 10, 4)), Rect::new(0, 3, 10, 2));
        assert!(vp.doc_to_screen(Rect::new(0, 0, 10, 5)).is_empty());
        for row in 0..3 {
            assert_eq!(vp.screen_to_doc(1, row), None);
        }
        assert_eq!(vp.screen_to_doc(1, 3), Some(Position::new(1, 5)));
    }

    #[test]
    fn draws_the_window_at_the_scroll_position() {
        let layout = PageLayout::compute(80);
        let marquees = marquees();
        let camera = CubeCamera::default();
        let area = Rect::new(0, 0, 80, 24);
        let contact = layout.anchor_row("contact").unwrap();

        let mut buf = Buffer::empty(area);
        PageWidget {
            layout: &layout,
            profile: &PROFILE,
            marquees: &marquees,
            camera: &camera,
            viewport: Viewport { area, top: contact, entrance: 0 },
            selected: None,
            hidden: None,
            year: 2025,
        }
        .render(area, &mut buf);
        let text = screen(&buf);
        assert!(text.contains("Contact Me"));
        assert!(text.contains(PROFILE.contact_heading));
        assert!(text.contains("© 2025 Utsav Patel"));
        assert!(!text.contains(PROJECTS[0].title));
    }

    #[test]
    fn hidden_project_card_is_not_drawn() {
        let layout = PageLayout::compute(80);
        let marquees = marquees();
        let camera = CubeCamera::default();
        let area = Rect::new(0, 0, 80, 24);
        let top = layout.project_rects[0].y;
        let render = |hidden| {
            let mut buf = Buffer::empty(area);
            PageWidget {
                layout: &layout,
                profile: &PROFILE,
                marquees: &marquees,
                camera: &camera,
                viewport: Viewport { area, top, entrance: 0 },
                selected: Some(0),
                hidden,
                year: 2025,
            }
            .render(area, &mut buf);
            screen(&buf)
        };
        assert!(render(None).contains(PROJECTS[0].title));
        assert!(!render(Some(0)).contains(PROJECTS[0].title));
    }

    #[test]
    fn section_lookup() {
        let layout = PageLayout::compute(80);
        assert_eq!(section_at(&layout, 0), 0);
        let skills = layout.anchor_row("skills").unwrap();
        assert_eq!(section_at(&layout, skills + 1), 3);
        assert_eq!(section_at(&layout, layout.height), SECTIONS.len() - 1);
    }
}
