//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* state and turns it into cells on the
//! terminal.  [`draw`] composes one full frame from [`AppState`].

pub mod cards;
pub mod divider;
pub mod glow;
pub mod hero;
pub mod intro;
pub mod layout;
pub mod modal;
pub mod page;
pub mod popup;
pub mod smooth_scroll;
pub mod theme;

use ratatui::{widgets::Paragraph, Frame};

use crate::app::state::{ActiveView, AppState};
use crate::core::content::{PROFILE, SECTIONS};

use self::intro::IntroWidget;
use self::modal::ModalWidget;
use self::page::PageWidget;
use self::theme::Theme;

/// Draw the whole screen: intro or page, modal, glow, status bar, popups.
pub fn draw(frame: &mut Frame, state: &AppState) {
    let page_area = state.page_area;

    let status_text = if !state.intro.is_finished() {
        "Enter: continue | s: skip | q: quit".to_string()
    } else {
        frame.render_widget(
            PageWidget {
                layout: &state.layout,
                profile: &PROFILE,
                marquees: &state.marquees,
                camera: &state.cube,
                viewport: state.viewport(),
                selected: Some(state.selected_card),
                hidden: state.active_project().map(|(index, _)| index),
                year: state.footer_year,
            },
            page_area,
        );

        if let (Some((_, project)), Some(geometry)) =
            (state.active_project(), state.modal_geometry())
        {
            frame.render_widget(
                ModalWidget {
                    project,
                    geometry,
                    backdrop: state.transition.layout_progress(),
                    content_opacity: state.transition.content_opacity(),
                    content_offset: state.transition.content_offset(),
                    interactive: state.transition.is_interactive(),
                },
                page_area,
            );
        }

        match (&state.status_message, state.transition.is_modal_open()) {
            (Some(message), _) => message.clone(),
            (None, true) => state.config.modal_hint(),
            (None, false) => {
                let section = page::section_at(&state.layout, state.scroller.top());
                format!("{} | {}", SECTIONS[section].label, state.config.status_bar_hint())
            }
        }
    };

    if !state.intro.is_finished() {
        frame.render_widget(IntroWidget { intro: &state.intro }, page_area);
    }
    if state.config.cursor_glow && state.glow.is_visible() {
        state.glow.render(page_area, frame.buffer_mut());
    }

    let status_text = match state.active_view {
        ActiveView::Page => status_text,
        ActiveView::SettingsMenu | ActiveView::ControlsSubmenu => String::new(),
    };
    frame.render_widget(
        Paragraph::new(status_text).style(Theme::status_bar_style()),
        state.status_area,
    );

    match state.active_view {
        ActiveView::SettingsMenu => frame.render_widget(
            popup::SettingsPopup {
                state,
                selected: state.settings_selected,
            },
            frame.area(),
        ),
        ActiveView::ControlsSubmenu => frame.render_widget(
            popup::ControlsPopup {
                config: &state.config,
                selected: state.controls_selected,
                awaiting_rebind: state.awaiting_rebind,
            },
            frame.area(),
        ),
        ActiveView::Page => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::clock::ManualClock;
    use ratatui::{backend::TestBackend, layout::Rect, Terminal};

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn app(skip_intro: bool, clock: &ManualClock) -> AppState {
        let config = AppConfig {
            skip_intro,
            ..AppConfig::default()
        };
        let mut state = AppState::new(config, clock.shared());
        state.set_viewport(Rect::new(0, 0, 100, 30));
        state
    }

    #[test]
    fn intro_frame_shows_the_greeting() {
        let clock = ManualClock::new();
        let state = app(false, &clock);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, &state)).unwrap();
        let text = screen(&terminal);
        assert!(text.contains("Welcome"));
        assert!(text.contains("s: skip"));
    }

    #[test]
    fn page_frame_shows_hero_and_hint() {
        let clock = ManualClock::new();
        let mut state = app(true, &clock);
        clock.advance_ms(16);
        state.on_frame();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, &state)).unwrap();
        let text = screen(&terminal);
        assert!(text.contains("About Me"));
        assert!(text.contains(layout::HeroButton::SeeProjects.label()));
        assert!(text.contains("settings"));
    }

    #[test]
    fn open_modal_frame_shows_the_project() {
        let clock = ManualClock::new();
        let mut state = app(true, &clock);
        state
            .transition
            .request_open(crate::core::content::PROJECTS[0].id)
            .unwrap();
        clock.advance_ms(1_000);
        state.on_frame();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, &state)).unwrap();
        let text = screen(&terminal);
        assert!(text.contains(modal::CLOSE_LABEL));
        assert!(text.contains("o/Enter: open link"));
    }

    #[test]
    fn settings_popup_draws_over_the_page() {
        let clock = ManualClock::new();
        let mut state = app(true, &clock);
        state.active_view = ActiveView::SettingsMenu;
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, &state)).unwrap();
        assert!(screen(&terminal).contains("Settings"));
    }
}
