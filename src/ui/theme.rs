//! Colour palette and text styles used across the UI.
//!
//! Terminals have no alpha channel, so fades are done by blending a colour
//! toward the page background ([`Theme::fade`]).

use ratatui::style::{Color, Modifier, Style};

pub const BACKGROUND: (u8, u8, u8) = (0x0a, 0x0a, 0x0a);
pub const TEXT: (u8, u8, u8) = (0xe5, 0xe5, 0xe5);
pub const MUTED: (u8, u8, u8) = (0xa3, 0xa3, 0xa3);
/// Brand red.
pub const ACCENT: (u8, u8, u8) = (0xff, 0x2d, 0x2d);
/// Divider band.
pub const BAND: (u8, u8, u8) = (0xb9, 0x1c, 0x1c);
pub const BAND_DOT: (u8, u8, u8) = (0x7f, 0x1d, 0x1d);
pub const PANEL: (u8, u8, u8) = (0x17, 0x17, 0x17);
pub const GLOW: (u8, u8, u8) = (0x3b, 0x0d, 0x0d);

pub fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

/// Linear blend from `from` to `to`; `t` is clamped to `[0, 1]`.
pub fn blend(from: (u8, u8, u8), to: (u8, u8, u8), t: f64) -> Color {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 1.0 };
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    Color::Rgb(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// Central theme.
pub struct Theme;

impl Theme {
    /// `color` at `opacity` over `background`.
    pub fn fade(color: (u8, u8, u8), background: (u8, u8, u8), opacity: f64) -> Color {
        blend(background, color, opacity)
    }

    // ── page ───────────────────────────────────────────────────
    pub fn page_style() -> Style {
        Style::default().fg(rgb(TEXT)).bg(rgb(BACKGROUND))
    }

    pub fn heading_style() -> Style {
        Style::default()
            .fg(rgb(ACCENT))
            .add_modifier(Modifier::BOLD)
    }

    pub fn body_style() -> Style {
        Style::default().fg(rgb(TEXT))
    }

    pub fn muted_style() -> Style {
        Style::default().fg(rgb(MUTED))
    }

    pub fn tag_style() -> Style {
        Style::default().fg(rgb(ACCENT)).bg(rgb(PANEL))
    }

    pub fn button_style(focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(rgb(BACKGROUND))
                .bg(rgb(ACCENT))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(rgb(ACCENT))
                .add_modifier(Modifier::BOLD)
        }
    }

    // ── cards ──────────────────────────────────────────────────
    pub fn card_border_style(selected: bool) -> Style {
        if selected {
            Style::default().fg(rgb(ACCENT))
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    pub fn card_title_style() -> Style {
        Style::default()
            .fg(rgb(TEXT))
            .add_modifier(Modifier::BOLD)
    }

    // ── divider ────────────────────────────────────────────────
    pub fn band_style() -> Style {
        Style::default()
            .fg(rgb(TEXT))
            .bg(rgb(BAND))
            .add_modifier(Modifier::BOLD)
    }

    pub fn band_dot_style() -> Style {
        Style::default().fg(rgb(BAND_DOT)).bg(rgb(BAND))
    }

    // ── modal ──────────────────────────────────────────────────
    /// Foreground for page text behind the modal; `level` 0 is untouched.
    pub fn backdrop_fg(level: f64) -> Color {
        blend(MUTED, BACKGROUND, level * 0.75)
    }

    pub fn panel_style() -> Style {
        Style::default().fg(rgb(TEXT)).bg(rgb(PANEL))
    }

    pub fn close_style() -> Style {
        Style::default()
            .fg(rgb(ACCENT))
            .bg(rgb(PANEL))
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn popup_title_style() -> Style {
        Style::default()
            .fg(rgb(ACCENT))
            .add_modifier(Modifier::BOLD)
    }

    pub fn popup_border_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn popup_selected_style() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_endpoints() {
        assert_eq!(Theme::fade(ACCENT, BACKGROUND, 0.0), rgb(BACKGROUND));
        assert_eq!(Theme::fade(ACCENT, BACKGROUND, 1.0), rgb(ACCENT));
        assert_eq!(Theme::fade(ACCENT, BACKGROUND, 7.0), rgb(ACCENT));
        assert_eq!(blend((0, 0, 0), (200, 100, 50), 0.5), Color::Rgb(100, 50, 25));
    }
}
