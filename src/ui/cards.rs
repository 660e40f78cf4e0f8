//! Project cards and plain information cards.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::core::content::{InfoCard, Project};

use super::layout::wrap_text;
use super::theme::Theme;

/// Space-separated tag chips on a single line.
pub fn tag_line(tags: &[&str]) -> Line<'static> {
    let mut spans = Vec::with_capacity(tags.len() * 2);
    for (i, tag) in tags.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!(" {tag} "), Theme::tag_style()));
    }
    Line::from(spans)
}

/// A clickable project card in the grid.
pub struct ProjectCardWidget<'a> {
    pub project: &'a Project,
    pub selected: bool,
}

impl Widget for ProjectCardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::card_border_style(self.selected));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }

        let mut lines = vec![Line::from(Span::styled(
            self.project.title,
            Theme::card_title_style(),
        ))];
        // Leave the last row for tags.
        let room = usize::from(inner.height.saturating_sub(2));
        lines.extend(
            wrap_text(self.project.short, inner.width)
                .into_iter()
                .take(room)
                .map(|l| Line::from(Span::styled(l, Theme::muted_style()))),
        );
        Paragraph::new(lines).render(inner, buf);

        if inner.height >= 2 {
            let tags = Rect::new(inner.x, inner.bottom() - 1, inner.width, 1);
            Paragraph::new(tag_line(self.project.tags)).render(tags, buf);
        }
    }
}

/// Education, experience and skill entries.
pub struct InfoCardWidget<'a> {
    pub card: &'a InfoCard,
}

impl Widget for InfoCardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::card_border_style(false))
            .padding(ratatui::widgets::Padding::horizontal(1));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = wrap_text(self.card.title, inner.width)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Theme::card_title_style())))
            .collect();
        if let Some(meta) = self.card.meta {
            lines.push(Line::from(Span::styled(meta, Theme::heading_style())));
        }
        if let Some(body) = self.card.body {
            lines.extend(
                wrap_text(body, inner.width)
                    .into_iter()
                    .map(|l| Line::from(Span::styled(l, Theme::body_style()))),
            );
        }
        for bullet in self.card.bullets {
            let wrapped = wrap_text(bullet, inner.width.saturating_sub(2));
            for (i, l) in wrapped.into_iter().enumerate() {
                let marker = if i == 0 { "• " } else { "  " };
                lines.push(Line::from(vec![
                    Span::styled(marker, Theme::heading_style()),
                    Span::styled(l, Theme::body_style()),
                ]));
            }
        }
        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::PROJECTS;
    use crate::ui::layout::info_card_height;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right())
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn project_card_shows_title_and_tags() {
        let area = Rect::new(0, 0, 40, 7);
        let mut buf = Buffer::empty(area);
        ProjectCardWidget {
            project: &PROJECTS[2],
            selected: true,
        }
        .render(area, &mut buf);
        assert!(row_text(&buf, 1).contains("Conversation Summarizer"));
        assert!(row_text(&buf, 5).contains("LLMs"));
    }

    #[test]
    fn info_card_fits_its_computed_height() {
        let card = InfoCard {
            title: "Role",
            meta: Some("2024"),
            body: None,
            bullets: &["first bullet that is long enough to wrap", "second"],
        };
        let width = 24;
        let height = info_card_height(&card, width);
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        InfoCardWidget { card: &card }.render(area, &mut buf);
        assert!(row_text(&buf, height - 2).contains("second"));
    }
}
