//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).
//! [`AppState::on_frame`] is the single per-frame step: every animation moves
//! forward there and nowhere else.

use std::time::Duration;

use chrono::Datelike;
use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    clock::SharedClock,
    content::{Project, PROJECTS, SECTIONS},
    easing::{ease_in_out_cubic, Tween},
    intro::LandingIntro,
    marquee::{Marquee, MarqueeConfig, ScrollTracker},
    scroll_lock::ScrollLock,
    transition::{CardPhase, CardTransition},
};
use crate::ui::{
    divider,
    glow::CursorGlow,
    hero::CubeCamera,
    layout::{AppLayout, PageLayout},
    modal::ModalGeometry,
    page::Viewport,
    smooth_scroll::PageScroller,
};

/// Page slide-in after the intro.
const ENTRANCE: Duration = Duration::from_millis(850);
const ENTRANCE_ROWS: f64 = 8.0;
/// Marquee cells per scrolled row.  A row is about two cells tall.
const CELLS_PER_ROW: f64 = 2.0;
const PAGE_SCROLL_SPEED: f64 = 0.25;

/// Which view / overlay is currently active.  The intro and the project modal
/// are driven by their own state machines, not by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Page,
    SettingsMenu,
    ControlsSubmenu,
}

/// Top-level application state.
pub struct AppState {
    pub config: AppConfig,
    pub clock: SharedClock,
    /// Shared with the scroller (reader) and the card transition (holder).
    pub scroll_lock: ScrollLock,
    pub scroller: PageScroller,
    scroll_tracker: ScrollTracker,
    /// One per section, in page order.
    pub marquees: Vec<Marquee>,
    pub transition: CardTransition,
    pub intro: LandingIntro,
    /// Set once the page has been shown after the intro.
    page_revealed: bool,
    entrance: Option<Tween>,
    pub cube: CubeCamera,
    pub glow: CursorGlow,
    /// Highlighted project card, index into [`PROJECTS`].
    pub selected_card: usize,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    pub active_view: ActiveView,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
    /// Currently highlighted item in the controls submenu.
    pub controls_selected: usize,
    /// When `true`, the controls submenu is waiting for the user to press
    /// a key to rebind the action at `controls_selected`.
    pub awaiting_rebind: bool,
    pub layout: PageLayout,
    pub page_area: Rect,
    pub status_area: Rect,
    /// Controls the main event loop.
    pub should_quit: bool,
    last_frame: Duration,
    pub footer_year: i32,
}

impl AppState {
    pub fn new(config: AppConfig, clock: SharedClock) -> Self {
        let scroll_lock = ScrollLock::new();
        let timings = config.transition_timings().effective(config.reduced_motion);
        let transition = CardTransition::new(clock.clone(), scroll_lock.clone(), timings);
        let mut intro = LandingIntro::new(clock.clone(), config.reduced_motion);
        if config.skip_intro {
            intro.skip();
        }
        let marquees = SECTIONS
            .iter()
            .map(|section| {
                Marquee::new(
                    MarqueeConfig::new(section.label)
                        .gap(config.divider_gap)
                        .speed_multiplier(config.divider_speed)
                        .easing_factor(config.divider_easing)
                        .anchor(section.anchor),
                )
            })
            .collect();
        let mut cube = CubeCamera::default();
        cube.set_auto_rotate(!config.reduced_motion);
        let now = clock.now();

        Self {
            scroller: PageScroller::new(scroll_lock.clone(), PAGE_SCROLL_SPEED),
            scroll_tracker: ScrollTracker::new(0.0),
            marquees,
            transition,
            page_revealed: intro.is_finished(),
            intro,
            entrance: None,
            cube,
            glow: CursorGlow::default(),
            selected_card: 0,
            status_message: None,
            active_view: ActiveView::default(),
            settings_selected: 0,
            controls_selected: 0,
            awaiting_rebind: false,
            layout: PageLayout::compute(0),
            page_area: Rect::default(),
            status_area: Rect::default(),
            should_quit: false,
            last_frame: now,
            footer_year: chrono::Local::now().year(),
            scroll_lock,
            clock,
            config,
        }
    }

    // ── geometry ────────────────────────────────────────────────

    /// Re-lay the page for a new terminal size.
    pub fn set_viewport(&mut self, area: Rect) {
        let split = AppLayout::from_area(area);
        if split.page_area.width != self.layout.width {
            self.layout = PageLayout::compute(split.page_area.width);
            tracing::debug!(
                width = self.layout.width,
                height = self.layout.height,
                "page laid out"
            );
        }
        self.page_area = split.page_area;
        self.status_area = split.status_area;
        self.scroller.set_max(self.max_scroll());
    }

    pub fn max_scroll(&self) -> u16 {
        self.layout.height.saturating_sub(self.page_area.height)
    }

    /// Rows the page is pushed down while it slides in.
    pub fn entrance_offset(&self) -> u16 {
        if !self.page_revealed {
            return ENTRANCE_ROWS as u16;
        }
        match self.entrance {
            Some(tween) => {
                let t = ease_in_out_cubic(tween.progress(self.clock.now()));
                ((1.0 - t) * ENTRANCE_ROWS).round() as u16
            }
            None => 0,
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            area: self.page_area,
            top: self.scroller.top(),
            entrance: self.entrance_offset(),
        }
    }

    /// Index and record of the project the modal is showing.
    pub fn active_project(&self) -> Option<(usize, &'static Project)> {
        let id = self.transition.active_project()?;
        PROJECTS
            .iter()
            .enumerate()
            .find(|(_, p)| p.id == id.as_str())
    }

    /// Modal placement for this frame, shared by drawing and hit-testing.
    pub fn modal_geometry(&self) -> Option<ModalGeometry> {
        let (index, project) = self.active_project()?;
        let card = self.layout.project_rects.get(index).copied().unwrap_or_default();
        let origin = self.viewport().doc_to_screen(card);
        Some(ModalGeometry::compute(
            self.page_area,
            origin,
            self.transition.layout_progress(),
            project.href.is_some(),
        ))
    }

    // ── settings side effects ───────────────────────────────────

    /// Push the motion-related config values into the running animations.
    pub fn apply_motion_settings(&mut self) {
        let reduced = self.config.reduced_motion;
        self.transition
            .set_timings(self.config.transition_timings().effective(reduced));
        self.cube.set_auto_rotate(!reduced);
        for marquee in &mut self.marquees {
            marquee.set_speed_multiplier(self.config.divider_speed);
            marquee.set_easing_factor(self.config.divider_easing);
        }
        if !self.config.cursor_glow {
            self.glow.hide();
        }
    }

    pub fn persist_config(&mut self) {
        if let Err(err) = self.config.save() {
            tracing::warn!(error = %err, "could not save config");
            self.status_message = Some(format!("Could not save settings: {err}"));
        }
    }

    // ── frame ───────────────────────────────────────────────────

    /// Advance every animation by one frame.  Returns the card phases entered.
    pub fn on_frame(&mut self) -> Vec<CardPhase> {
        let now = self.clock.now();
        let dt = now.saturating_sub(self.last_frame);
        self.last_frame = now;

        self.scroller.tick();
        let delta = self
            .scroll_tracker
            .sample(self.scroller.position() * CELLS_PER_ROW);
        for marquee in &mut self.marquees {
            if !marquee.is_measured() {
                let width = marquee.measure_content_width(divider::measure);
                tracing::debug!(
                    label = marquee.label(),
                    anchor = marquee.anchor(),
                    width,
                    "marquee measured"
                );
            }
            marquee.on_scroll_sample(delta);
            marquee.on_frame_tick();
        }

        let entered = self.transition.update();

        self.intro.update();
        if self.intro.is_finished() && !self.page_revealed {
            self.page_revealed = true;
            if !self.config.reduced_motion {
                self.entrance = Some(Tween::new(now, ENTRANCE));
            }
            tracing::debug!("intro finished, revealing page");
        }
        if self.entrance.is_some_and(|t| t.is_complete(now)) {
            self.entrance = None;
        }

        self.cube.tick(dt);
        self.glow.tick();
        entered
    }
}
