//! Landing intro: a fading greeting and a short chase of buttons.
//!
//! The greeting fades in after a short pause.  The first button appears
//! shortly after the fade starts; each button hides itself and reveals the
//! next when activated, and the last one finishes the intro.  Activating a
//! hidden button, or clicking anywhere else, does nothing.

use std::time::Duration;

use super::clock::SharedClock;
use super::easing::{ease_out_cubic, Tween};

/// Greeting lines, top to bottom.
pub const GREETING: [&str; 3] = ["Welcome", "to my", "portfolio"];

const FADE_DELAY: Duration = Duration::from_millis(600);
const FADE_DURATION: Duration = Duration::from_millis(1800);
const REDUCED_FADE_DURATION: Duration = Duration::from_millis(10);
/// Primary button shows up this long after the fade starts.
const CTA_AFTER_FADE_START: Duration = Duration::from_millis(500);
const BUTTON_FADE: Duration = Duration::from_millis(220);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntroButton {
    /// Bottom centre.
    Primary,
    TopRight,
    MiddleLeft,
}

impl IntroButton {
    pub fn label(self) -> &'static str {
        match self {
            IntroButton::Primary => "Click to see my portfolio",
            IntroButton::TopRight => "maybe try this one?",
            IntroButton::MiddleLeft => "maybe this is the one?",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntroStage {
    /// Greeting fading in, no button yet.
    #[default]
    Greeting,
    Showing(IntroButton),
    Finished,
}

pub struct LandingIntro {
    clock: SharedClock,
    started: Duration,
    stage: IntroStage,
    stage_started: Duration,
    reduced_motion: bool,
}

impl std::fmt::Debug for LandingIntro {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LandingIntro")
            .field("stage", &self.stage)
            .field("reduced_motion", &self.reduced_motion)
            .finish_non_exhaustive()
    }
}

impl LandingIntro {
    pub fn new(clock: SharedClock, reduced_motion: bool) -> Self {
        let now = clock.now();
        let mut intro = Self {
            clock,
            started: now,
            stage: IntroStage::Greeting,
            stage_started: now,
            reduced_motion,
        };
        intro.update();
        intro
    }

    #[cfg(test)]
    pub fn stage(&self) -> IntroStage {
        self.stage
    }

    pub fn is_finished(&self) -> bool {
        self.stage == IntroStage::Finished
    }

    /// Reveal the primary button once its delay has passed.
    pub fn update(&mut self) -> IntroStage {
        if self.stage == IntroStage::Greeting {
            let due = self.started + FADE_DELAY + CTA_AFTER_FADE_START;
            let now = self.clock.now();
            if self.reduced_motion {
                self.set_stage(IntroStage::Showing(IntroButton::Primary), now);
            } else if now >= due {
                self.set_stage(IntroStage::Showing(IntroButton::Primary), due);
            }
        }
        self.stage
    }

    /// Greeting opacity in `[0, 1]`.
    pub fn text_opacity(&self) -> f64 {
        let duration = if self.reduced_motion {
            REDUCED_FADE_DURATION
        } else {
            FADE_DURATION
        };
        let fade = Tween::new(self.started + FADE_DELAY, duration);
        ease_out_cubic(fade.progress(self.clock.now()))
    }

    pub fn visible_button(&self) -> Option<IntroButton> {
        match self.stage {
            IntroStage::Showing(button) => Some(button),
            IntroStage::Greeting | IntroStage::Finished => None,
        }
    }

    /// Opacity of the visible button as it fades in.
    pub fn button_opacity(&self) -> f64 {
        if self.visible_button().is_none() {
            return 0.0;
        }
        if self.reduced_motion {
            return 1.0;
        }
        Tween::new(self.stage_started, BUTTON_FADE).progress(self.clock.now())
    }

    /// Press `button`.  Ignored unless it is the one currently shown.
    pub fn activate(&mut self, button: IntroButton) -> bool {
        self.update();
        if self.visible_button() != Some(button) {
            return false;
        }
        let next = match button {
            IntroButton::Primary => IntroStage::Showing(IntroButton::TopRight),
            IntroButton::TopRight => IntroStage::Showing(IntroButton::MiddleLeft),
            IntroButton::MiddleLeft => IntroStage::Finished,
        };
        let now = self.clock.now();
        self.set_stage(next, now);
        true
    }

    /// Jump straight to the page.
    pub fn skip(&mut self) {
        let now = self.clock.now();
        self.set_stage(IntroStage::Finished, now);
    }

    fn set_stage(&mut self, stage: IntroStage, at: Duration) {
        tracing::debug!(from = ?self.stage, to = ?stage, "intro stage");
        self.stage = stage;
        self.stage_started = at;
    }
}
