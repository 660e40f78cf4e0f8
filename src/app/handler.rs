//! Input handling: maps key/mouse events to state mutations.
//!
//! Dispatch order: Ctrl+C, then the landing intro while it runs, then the
//! settings popups, then the project modal while any card is expanded, and
//! finally the page itself.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::{Action, KeyBind};
use crate::core::content::PROJECTS;
use crate::core::intro::IntroButton;
use crate::ui::intro::IntroGeometry;
use crate::ui::layout::HeroButton;
use crate::ui::modal::ModalHit;

use super::settings::{SettingsItem, SETTINGS_ITEMS};
use super::state::{ActiveView, AppState};

/// Rows per mouse wheel notch.
const WHEEL_ROWS: f64 = 3.0;
/// Rows per scroll key press.
const KEY_ROWS: f64 = 2.0;

/// Total selectable rows in the controls submenu (actions + "Reset").
pub fn controls_item_count() -> usize {
    Action::ALL.len() + 1
}

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    if !state.intro.is_finished() {
        handle_intro_key(state, key);
        return;
    }

    match state.active_view {
        ActiveView::SettingsMenu => handle_settings_key(state, key),
        ActiveView::ControlsSubmenu => {
            if state.awaiting_rebind {
                handle_rebind_key(state, key);
            } else {
                handle_controls_key(state, key);
            }
        }
        ActiveView::Page if state.transition.is_modal_open() => handle_modal_key(state, key),
        ActiveView::Page => handle_page_key(state, key),
    }
}

// ── Intro (hardcoded keys) ──────────────────────────────────────

fn handle_intro_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(button) = state.intro.visible_button() {
                state.intro.activate(button);
            }
        }
        KeyCode::Esc | KeyCode::Char('s') => state.intro.skip(),
        _ => {
            if state.config.match_key(key) == Some(Action::Quit) {
                state.should_quit = true;
            }
        }
    }
}

// ── Page (configurable bindings) ────────────────────────────────

fn handle_page_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Home => {
            state.scroller.scroll_to(0.0);
            return;
        }
        KeyCode::End => {
            state.scroller.scroll_to(f64::from(state.max_scroll()));
            return;
        }
        _ => {}
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    let page_rows = f64::from(state.page_area.height.saturating_sub(2).max(1));
    let selected = state.selected_card;

    match action {
        Action::Quit => state.should_quit = true,
        Action::OpenSettings => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        Action::ScrollUp => {
            state.scroller.scroll_by(-KEY_ROWS);
        }
        Action::ScrollDown => {
            state.scroller.scroll_by(KEY_ROWS);
        }
        Action::PageUp => {
            state.scroller.scroll_by(-page_rows);
        }
        Action::PageDown => {
            state.scroller.scroll_by(page_rows);
        }
        Action::NextSection => {
            let row = state.scroller.target().round() as u16;
            if let Some(next) = state.layout.next_anchor(row) {
                state.scroller.scroll_to(f64::from(next));
            }
        }
        Action::PrevSection => {
            let row = state.scroller.target().round() as u16;
            if let Some(prev) = state.layout.prev_anchor(row) {
                state.scroller.scroll_to(f64::from(prev));
            }
        }
        Action::NextCard => select_card(state, selected.saturating_add(1)),
        Action::PrevCard => select_card(state, selected.saturating_sub(1)),
        Action::OpenCard => open_card(state, selected),
        Action::CloseModal => {}
    }
}

fn select_card(state: &mut AppState, index: usize) {
    let index = index.min(PROJECTS.len().saturating_sub(1));
    state.selected_card = index;
    if let Some(rect) = state.layout.project_rects.get(index) {
        state
            .scroller
            .reveal(rect.y, rect.height, state.page_area.height);
    }
}

fn open_card(state: &mut AppState, index: usize) {
    let Some(project) = PROJECTS.get(index) else {
        return;
    };
    state.selected_card = index;
    match state.transition.request_open(project.id) {
        Ok(()) => {
            tracing::info!(project = project.id, "opening project");
            state.status_message = None;
        }
        Err(err) => {
            tracing::debug!(%err, "open ignored");
            state.status_message = Some(err.to_string());
        }
    }
}

// ── Modal (close is always Esc, plus the bindable action) ───────

fn handle_modal_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            close_modal(state);
            return;
        }
        KeyCode::Char('o') | KeyCode::Enter => {
            activate_link(state);
            return;
        }
        _ => {}
    }
    match state.config.match_key(key) {
        Some(Action::CloseModal) => close_modal(state),
        Some(Action::Quit) => state.should_quit = true,
        _ => {}
    }
}

fn close_modal(state: &mut AppState) {
    if state.transition.request_close() {
        tracing::debug!("closing project");
    }
}

fn activate_link(state: &mut AppState) {
    if !state.transition.is_interactive() {
        return;
    }
    if let Some(href) = state.active_project().and_then(|(_, p)| p.href) {
        tracing::info!(href, "project link");
        state.status_message = Some(format!("Link: {href}"));
    }
}

// ── Settings menu (hardcoded keys) ──────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Page;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected < SETTINGS_ITEMS.len() - 1 {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                match item {
                    SettingsItem::Submenu { view, .. } => {
                        state.active_view = *view;
                        state.controls_selected = 0;
                    }
                    SettingsItem::Toggle { get, set, .. } => {
                        let current = get(state);
                        set(state, !current);
                    }
                    SettingsItem::Cycle { cycle, .. } => {
                        cycle(state);
                    }
                }
            }
        }
        _ => {}
    }
}

// ── Controls submenu (hardcoded navigation, interactive rebinding) ──

fn handle_controls_key(state: &mut AppState, key: KeyEvent) {
    let item_count = controls_item_count();

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            state.active_view = ActiveView::Page;
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.active_view = ActiveView::SettingsMenu;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.controls_selected = state.controls_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.controls_selected < item_count - 1 {
                state.controls_selected += 1;
            }
        }
        KeyCode::Enter => {
            if state.controls_selected < Action::ALL.len() {
                state.awaiting_rebind = true;
            } else {
                state.config.reset_defaults();
                state.persist_config();
            }
        }
        KeyCode::Delete | KeyCode::Backspace => {
            if let Some(&action) = Action::ALL.get(state.controls_selected) {
                state.config.bindings.insert(action, Vec::new());
                state.persist_config();
            }
        }
        _ => {}
    }
}

/// Capture the next key press as a new binding.
fn handle_rebind_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.code == KeyCode::Esc {
        state.awaiting_rebind = false;
        return;
    }

    // Ctrl+C stays reserved for quitting.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return;
    }

    let Some(&action) = Action::ALL.get(state.controls_selected) else {
        state.awaiting_rebind = false;
        return;
    };
    let bind = KeyBind::from_key_event(key);
    tracing::debug!(action = action.label(), key = %bind.display(), "rebound");
    state.config.add_binding(action, bind);
    state.persist_config();
    state.awaiting_rebind = false;
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let (col, row) = (mouse.column, mouse.row);

    if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
        if state.config.cursor_glow && state.page_area.contains((col, row).into()) {
            state.glow.move_to(col, row);
        } else {
            state.glow.hide();
        }
    }

    if !state.intro.is_finished() {
        handle_intro_mouse(state, mouse);
        return;
    }
    if state.active_view != ActiveView::Page {
        return;
    }
    if state.transition.is_modal_open() {
        handle_modal_mouse(state, mouse);
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollUp => {
            state.scroller.scroll_by(-WHEEL_ROWS);
        }
        MouseEventKind::ScrollDown => {
            state.scroller.scroll_by(WHEEL_ROWS);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(pos) = state.viewport().screen_to_doc(col, row) else {
                return;
            };
            if let Some(button) = state.layout.hero_button_at(pos) {
                jump_to(state, button);
            } else if let Some(index) = state.layout.project_at(pos) {
                open_card(state, index);
            } else if state.layout.hero.cube.contains(pos) {
                state.cube.begin_drag(col, row);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if state.cube.is_dragging() {
                state.cube.drag_to(col, row);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => state.cube.end_drag(),
        _ => {}
    }
}

fn handle_intro_mouse(state: &mut AppState, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let geometry = IntroGeometry::compute(state.page_area);
    let hit = geometry.button_at((mouse.column, mouse.row).into());
    // Only the button on screen reacts; clicks anywhere else do nothing.
    if let Some(button) = hit.filter(|b| Some(*b) == state.intro.visible_button()) {
        let finished = button == IntroButton::MiddleLeft;
        state.intro.activate(button);
        if finished {
            tracing::info!("intro completed");
        }
    }
}

fn handle_modal_mouse(state: &mut AppState, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let Some(geometry) = state.modal_geometry() else {
        return;
    };
    match geometry.hit((mouse.column, mouse.row).into()) {
        ModalHit::Close | ModalHit::Backdrop => close_modal(state),
        ModalHit::Link => activate_link(state),
        ModalHit::Panel => {}
    }
}

fn jump_to(state: &mut AppState, button: HeroButton) {
    if let Some(row) = state.layout.anchor_row(button.anchor()) {
        tracing::debug!(anchor = button.anchor(), row, "jump");
        state.scroller.scroll_to(f64::from(row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::clock::ManualClock;
    use crate::core::transition::CardPhase;
    use ratatui::layout::{Position, Rect};

    fn state(clock: &ManualClock, skip_intro: bool) -> AppState {
        let config = AppConfig {
            skip_intro,
            ..AppConfig::default()
        };
        let mut state = AppState::new(config, clock.shared());
        state.set_viewport(Rect::new(0, 0, 100, 30));
        state
    }

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn click(state: &mut AppState, pos: Position) {
        handle_mouse(
            state,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: pos.x,
                row: pos.y,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    fn run(clock: &ManualClock, state: &mut AppState, ms: u64) -> Vec<CardPhase> {
        let mut entered = Vec::new();
        for _ in 0..ms / 16 {
            clock.advance_ms(16);
            entered.extend(state.on_frame());
        }
        entered
    }

    fn open_first_card(clock: &ManualClock) -> AppState {
        let mut s = state(clock, true);
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.transition.phase(), CardPhase::Opening);
        run(clock, &mut s, 1_000);
        assert_eq!(s.transition.phase(), CardPhase::Open);
        s
    }

    fn close_with(trigger: impl FnOnce(&mut AppState)) -> Vec<CardPhase> {
        let clock = ManualClock::new();
        let mut s = open_first_card(&clock);
        trigger(&mut s);
        assert_eq!(s.transition.phase(), CardPhase::Closing);
        let phases = run(&clock, &mut s, 1_000);
        assert!(!s.scroll_lock.is_locked());
        assert_eq!(s.scroll_lock.acquire_count(), s.scroll_lock.release_count());
        phases
    }

    #[test]
    fn every_close_trigger_runs_the_same_sequence() {
        let by_escape = close_with(|s| press(s, KeyCode::Esc));
        let by_action = close_with(|s| press(s, KeyCode::Char('x')));
        let by_button = close_with(|s| {
            let close = s.modal_geometry().unwrap().close;
            click(s, Position::new(close.x, close.y));
        });
        let by_backdrop = close_with(|s| click(s, Position::new(0, 0)));

        assert_eq!(by_escape, vec![CardPhase::LayoutCollapsing, CardPhase::Closed]);
        assert_eq!(by_escape, by_action);
        assert_eq!(by_escape, by_button);
        assert_eq!(by_escape, by_backdrop);
    }

    #[test]
    fn clicks_inside_the_panel_do_not_close() {
        let clock = ManualClock::new();
        let mut s = open_first_card(&clock);
        let geo = s.modal_geometry().unwrap();
        click(&mut s, Position::new(geo.panel.x + 3, geo.panel.y + 3));
        assert_eq!(s.transition.phase(), CardPhase::Open);
    }

    #[test]
    fn repeated_close_is_ignored() {
        let clock = ManualClock::new();
        let mut s = open_first_card(&clock);
        press(&mut s, KeyCode::Esc);
        clock.advance_ms(50);
        press(&mut s, KeyCode::Esc);
        click(&mut s, Position::new(0, 0));
        assert_eq!(s.transition.phase(), CardPhase::Closing);
        run(&clock, &mut s, 1_000);
        assert_eq!(s.transition.phase(), CardPhase::Closed);
        assert_eq!(s.scroll_lock.release_count(), 1);
    }

    #[test]
    fn page_does_not_scroll_while_a_card_is_open() {
        let clock = ManualClock::new();
        let mut s = open_first_card(&clock);
        let before = s.scroller.target();
        press(&mut s, KeyCode::Down);
        handle_mouse(
            &mut s,
            MouseEvent {
                kind: MouseEventKind::ScrollDown,
                column: 1,
                row: 1,
                modifiers: KeyModifiers::NONE,
            },
        );
        assert_eq!(s.scroller.target(), before);

        press(&mut s, KeyCode::Esc);
        run(&clock, &mut s, 1_000);
        press(&mut s, KeyCode::Down);
        assert!(s.scroller.target() > before);
    }

    #[test]
    fn link_only_activates_once_open() {
        let clock = ManualClock::new();
        let mut s = state(&clock, true);
        press(&mut s, KeyCode::Enter);
        press(&mut s, KeyCode::Char('o'));
        assert!(s.status_message.is_none());
        run(&clock, &mut s, 1_000);
        press(&mut s, KeyCode::Char('o'));
        let href = PROJECTS[0].href.unwrap();
        assert_eq!(s.status_message.as_deref(), Some(format!("Link: {href}").as_str()));
    }

    #[test]
    fn clicking_a_card_opens_it() {
        let clock = ManualClock::new();
        let mut s = state(&clock, true);
        let card = s.layout.project_rects[2];
        s.scroller.scroll_to(f64::from(card.y));
        for _ in 0..400 {
            s.scroller.tick();
        }
        let screen = s.viewport().doc_to_screen(card);
        click(&mut s, Position::new(screen.x + 1, screen.y + 1));
        assert_eq!(s.selected_card, 2);
        assert_eq!(s.active_project().map(|(_, p)| p.id), Some(PROJECTS[2].id));
    }

    #[test]
    fn hero_button_jumps_to_its_section() {
        let clock = ManualClock::new();
        let mut s = state(&clock, true);
        let (button, rect) = s.layout.hero.buttons[1];
        assert_eq!(button, HeroButton::Contact);
        click(&mut s, Position::new(rect.x, rect.y));
        let contact = s.layout.anchor_row("contact").unwrap();
        assert_eq!(s.scroller.target(), f64::from(contact.min(s.max_scroll())));
    }

    #[test]
    fn section_keys_walk_the_anchors() {
        let clock = ManualClock::new();
        let mut s = state(&clock, true);
        press(&mut s, KeyCode::Char(']'));
        assert_eq!(s.scroller.target(), f64::from(s.layout.anchor_row("education").unwrap()));
        press(&mut s, KeyCode::Char('['));
        assert_eq!(s.scroller.target(), 0.0);
        press(&mut s, KeyCode::End);
        assert_eq!(s.scroller.target(), f64::from(s.max_scroll()));
    }

    #[test]
    fn card_selection_is_clamped() {
        let clock = ManualClock::new();
        let mut s = state(&clock, true);
        press(&mut s, KeyCode::Left);
        assert_eq!(s.selected_card, 0);
        for _ in 0..20 {
            press(&mut s, KeyCode::Right);
        }
        assert_eq!(s.selected_card, PROJECTS.len() - 1);
    }

    #[test]
    fn intro_buttons_advance_in_order() {
        let clock = ManualClock::new();
        let mut s = state(&clock, false);
        clock.advance_ms(1_200);
        s.on_frame();
        let geo = IntroGeometry::compute(s.page_area);

        // The hidden buttons ignore clicks.
        let top_right = geo.button_rect(IntroButton::TopRight);
        click(&mut s, Position::new(top_right.x, top_right.y));
        assert_eq!(s.intro.visible_button(), Some(IntroButton::Primary));

        for button in [IntroButton::Primary, IntroButton::TopRight, IntroButton::MiddleLeft] {
            let rect = geo.button_rect(button);
            click(&mut s, Position::new(rect.x + 1, rect.y));
        }
        assert!(s.intro.is_finished());
    }

    #[test]
    fn intro_keys_and_skip() {
        let clock = ManualClock::new();
        let mut s = state(&clock, false);
        // Page keys do nothing yet.
        press(&mut s, KeyCode::Down);
        assert_eq!(s.scroller.target(), 0.0);
        press(&mut s, KeyCode::Char('s'));
        assert!(s.intro.is_finished());
        press(&mut s, KeyCode::Down);
        assert!(s.scroller.target() > 0.0);
    }

    #[test]
    fn settings_toggle_reduced_motion() {
        let clock = ManualClock::new();
        let mut s = state(&clock, true);
        press(&mut s, KeyCode::Char('?'));
        assert_eq!(s.active_view, ActiveView::SettingsMenu);
        press(&mut s, KeyCode::Down);
        assert_eq!(SETTINGS_ITEMS[s.settings_selected].label(), "Reduced Motion");
        press(&mut s, KeyCode::Enter);
        assert!(s.config.reduced_motion);
        assert_eq!(
            s.transition.timings(),
            crate::core::transition::TransitionTimings::reduced()
        );
        press(&mut s, KeyCode::Esc);
        assert_eq!(s.active_view, ActiveView::Page);
    }

    #[test]
    fn rebinding_through_the_controls_menu() {
        let clock = ManualClock::new();
        let mut s = state(&clock, true);
        press(&mut s, KeyCode::Char('?'));
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.active_view, ActiveView::ControlsSubmenu);
        let quit = Action::ALL.iter().position(|&a| a == Action::Quit).unwrap();
        for _ in 0..quit {
            press(&mut s, KeyCode::Down);
        }
        press(&mut s, KeyCode::Enter);
        assert!(s.awaiting_rebind);
        press(&mut s, KeyCode::Char('Q'));
        assert!(!s.awaiting_rebind);
        press(&mut s, KeyCode::Esc);
        press(&mut s, KeyCode::Char('Q'));
        assert!(s.should_quit);
    }

    #[test]
    fn glow_follows_the_pointer_unless_disabled() {
        let clock = ManualClock::new();
        let mut s = state(&clock, true);
        let moved = MouseEvent {
            kind: MouseEventKind::Moved,
            column: 10,
            row: 5,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(&mut s, moved);
        assert!(s.glow.is_visible());

        s.config.cursor_glow = false;
        s.apply_motion_settings();
        handle_mouse(&mut s, moved);
        assert!(!s.glow.is_visible());
    }
}
