//! Popup overlay widgets for the settings menu and controls submenu.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::app::settings::SETTINGS_ITEMS;
use crate::app::state::AppState;
use crate::config::{Action, AppConfig};

use super::theme::{rgb, Theme, ACCENT, MUTED, TEXT};

// ───────────────────────────────────────── settings popup ────

/// Settings menu popup overlay.
pub struct SettingsPopup<'a> {
    pub state: &'a AppState,
    pub selected: usize,
}

impl Widget for SettingsPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (SETTINGS_ITEMS.len() as u16) + 6;
        let popup = centered_fixed(44, height, area);
        Clear.render(popup, buf);

        let block = popup_block(" Settings ");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![Line::raw("")];
        for (i, item) in SETTINGS_ITEMS.iter().enumerate() {
            let (prefix, style) = row_style(i == self.selected);
            let label = format!("{prefix}{:<20}", item.label());
            match item.value(self.state) {
                Some(value) => {
                    let value_style = match value.as_str() {
                        "ON" => Style::default().fg(rgb(ACCENT)),
                        "OFF" => Style::default().fg(rgb(MUTED)),
                        _ => Style::default().fg(rgb(TEXT)),
                    };
                    lines.push(Line::from(vec![
                        Span::styled(label, style),
                        Span::styled(format!("  [{value}]"), value_style),
                    ]));
                }
                None => lines.push(Line::from(Span::styled(format!("{label}  ›"), style))),
            }
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter/Space: change  Esc: close",
            Theme::muted_style(),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── controls popup ────

/// Interactive controls / keybinding popup overlay.
pub struct ControlsPopup<'a> {
    pub config: &'a AppConfig,
    pub selected: usize,
    pub awaiting_rebind: bool,
}

impl Widget for ControlsPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (Action::ALL.len() as u16) + 7;
        let popup = centered_fixed(52, height, area);
        Clear.render(popup, buf);

        let block = popup_block(" Controls ");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let key_style = Style::default().fg(rgb(ACCENT));
        let mut lines = vec![Line::raw("")];

        for (i, &action) in Action::ALL.iter().enumerate() {
            let is_selected = i == self.selected;
            let (prefix, base_style) = row_style(is_selected);

            let keys_display = if is_selected && self.awaiting_rebind {
                "Press a key…".to_string()
            } else {
                self.config.display_bindings(action)
            };
            let keys_style = if is_selected {
                key_style.patch(Theme::popup_selected_style())
            } else {
                key_style
            };

            // Fixed-width columns: label left-aligned, keys right-aligned.
            let label_col = format!("{prefix}{:<22}", action.label());
            let keys_width = usize::from(inner.width)
                .saturating_sub(label_col.chars().count())
                .max(1);
            let keys_col = format!("{keys_display:>keys_width$}");

            lines.push(Line::from(vec![
                Span::styled(label_col, base_style),
                Span::styled(keys_col, keys_style),
            ]));
        }

        let (reset_prefix, reset_style) = row_style(self.selected == Action::ALL.len());
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!("{reset_prefix}⟳ Reset to defaults"),
            reset_style,
        )));

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter: add key  Del: clear  Esc: back",
            Theme::muted_style(),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── helpers ───────────

fn popup_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(Theme::popup_title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::popup_border_style())
        .style(Theme::panel_style())
}

fn row_style(selected: bool) -> (&'static str, Style) {
    if selected {
        (" ▸ ", Theme::popup_selected_style())
    } else {
        ("   ", Style::default().fg(rgb(TEXT)))
    }
}

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;

    fn text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn settings_popup_lists_items_with_values() {
        let clock = ManualClock::new();
        let state = AppState::new(AppConfig::default(), clock.shared());
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        SettingsPopup { state: &state, selected: 1 }.render(area, &mut buf);
        let all = text(&buf);
        assert!(all.contains("Reduced Motion"));
        assert!(all.contains("[OFF]"));
        assert!(all.contains("[ON]"));
        assert!(all.contains("[0.8×]"));
    }

    #[test]
    fn controls_popup_prompts_while_rebinding() {
        let config = AppConfig::default();
        let area = Rect::new(0, 0, 60, 24);
        let mut buf = Buffer::empty(area);
        ControlsPopup {
            config: &config,
            selected: 0,
            awaiting_rebind: true,
        }
        .render(area, &mut buf);
        let all = text(&buf);
        assert!(all.contains("Press a key"));
        assert!(all.contains("Reset to defaults"));
    }

    #[test]
    fn centred_rect_is_clamped() {
        assert_eq!(centered_fixed(40, 10, Rect::new(0, 0, 20, 5)), Rect::new(0, 0, 20, 5));
        assert_eq!(centered_fixed(10, 4, Rect::new(0, 0, 30, 10)), Rect::new(10, 3, 10, 4));
    }
}
