//! Card → modal expansion as an explicit timed state machine.
//!
//! ```text
//!  Closed ─open─► Opening ─delay─► ContentRevealing ─fade─► Open
//!    ▲                 │                 │                   │
//!    │                 └──────close──────┴───────close───────┤
//!    │                                                       ▼
//!    └─layout─ LayoutCollapsing ◄────────exit───────── Closing
//! ```
//!
//! The card's geometry morphs into the modal's as soon as the open is
//! requested; the modal-only content fades in once the morph has visibly
//! started.  Closing runs the other way round and strictly in two phases:
//! content out first, then the geometry collapses back into the card.  Only
//! then is the active project cleared.
//!
//! Every timed phase knows its own exit duration
//! ([`CardPhase::exit_after`]), and [`CardTransition::update`] walks every
//! deadline that has passed, so a stalled frame clock only delays the
//! sequence, never skips its bookkeeping.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use super::clock::SharedClock;
use super::easing::{ease_out_cubic, spring_progress, Tween, LAYOUT_SPRING_OMEGA};
use super::scroll_lock::{ScrollLock, ScrollLockGuard};

/// How far (in rows) modal content slides up while it fades in.
pub const CONTENT_SLIDE_ROWS: f64 = 1.0;

// ───────────────────────────────────────── ids ───────────────

/// Identifies a project card.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ───────────────────────────────────────── phases ────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CardPhase {
    #[default]
    Closed,
    /// Geometry morph in flight, content hidden.
    Opening,
    /// Modal content fading in.
    ContentRevealing,
    Open,
    /// Modal content fading out; geometry held.
    Closing,
    /// Geometry collapsing back into the card.
    LayoutCollapsing,
}

impl CardPhase {
    #[cfg(test)]
    pub const ALL: &[CardPhase] = &[
        CardPhase::Closed,
        CardPhase::Opening,
        CardPhase::ContentRevealing,
        CardPhase::Open,
        CardPhase::Closing,
        CardPhase::LayoutCollapsing,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CardPhase::Closed => "closed",
            CardPhase::Opening => "opening",
            CardPhase::ContentRevealing => "revealing",
            CardPhase::Open => "open",
            CardPhase::Closing => "closing",
            CardPhase::LayoutCollapsing => "collapsing",
        }
    }

    /// How long the phase lasts before its timed successor takes over.
    /// `None` for phases that only leave on a request.
    pub fn exit_after(self, timings: &TransitionTimings) -> Option<Duration> {
        match self {
            CardPhase::Opening => Some(timings.open_delay),
            CardPhase::ContentRevealing => Some(timings.content_fade),
            CardPhase::Closing => Some(timings.content_exit),
            CardPhase::LayoutCollapsing => Some(timings.layout),
            CardPhase::Closed | CardPhase::Open => None,
        }
    }

    pub fn timed_next(self) -> Option<CardPhase> {
        match self {
            CardPhase::Opening => Some(CardPhase::ContentRevealing),
            CardPhase::ContentRevealing => Some(CardPhase::Open),
            CardPhase::Closing => Some(CardPhase::LayoutCollapsing),
            CardPhase::LayoutCollapsing => Some(CardPhase::Closed),
            CardPhase::Closed | CardPhase::Open => None,
        }
    }

    /// Phases from which a close request is honoured.
    pub fn accepts_close(self) -> bool {
        matches!(
            self,
            CardPhase::Opening | CardPhase::ContentRevealing | CardPhase::Open
        )
    }
}

impl fmt::Display for CardPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ───────────────────────────────────────── timings ───────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTimings {
    /// Head start the geometry morph gets before content starts to show.
    pub open_delay: Duration,
    pub content_fade: Duration,
    /// Content exit; the collapse waits for it to finish.
    pub content_exit: Duration,
    /// Length of the geometry morph in either direction.
    pub layout: Duration,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            open_delay: Duration::from_millis(50),
            content_fade: Duration::from_millis(160),
            content_exit: Duration::from_millis(180),
            layout: Duration::from_millis(400),
        }
    }
}

impl TransitionTimings {
    pub fn reduced() -> Self {
        Self {
            open_delay: Duration::ZERO,
            content_fade: Duration::from_millis(10),
            content_exit: Duration::from_millis(10),
            layout: Duration::from_millis(120),
        }
    }

    pub fn effective(self, reduced_motion: bool) -> Self {
        if reduced_motion {
            Self::reduced()
        } else {
            self
        }
    }
}

// ───────────────────────────────────────── errors ────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// Only one card can be expanded at a time.
    #[error("cannot open `{requested}` while the modal is {phase}")]
    Busy {
        requested: ProjectId,
        active: Option<ProjectId>,
        phase: CardPhase,
    },
}

// ───────────────────────────────────────── controller ────────

/// Drives the open/close sequence for at most one card at a time.
pub struct CardTransition {
    clock: SharedClock,
    lock: ScrollLock,
    timings: TransitionTimings,
    /// Timings of the sequence in flight, fixed when it opened.
    running: TransitionTimings,
    phase: CardPhase,
    phase_started: Duration,
    layout_started: Duration,
    /// Layout progress at the moment the collapse began.
    collapse_from: f64,
    /// Content opacity at the moment the exit began.
    exit_from: f64,
    active: Option<ProjectId>,
    guard: Option<ScrollLockGuard>,
}

impl fmt::Debug for CardTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardTransition")
            .field("phase", &self.phase)
            .field("active", &self.active)
            .field("phase_started", &self.phase_started)
            .field("timings", &self.timings)
            .finish_non_exhaustive()
    }
}

impl CardTransition {
    pub fn new(clock: SharedClock, lock: ScrollLock, timings: TransitionTimings) -> Self {
        Self {
            clock,
            lock,
            timings,
            running: timings,
            phase: CardPhase::Closed,
            phase_started: Duration::ZERO,
            layout_started: Duration::ZERO,
            collapse_from: 0.0,
            exit_from: 0.0,
            active: None,
            guard: None,
        }
    }

    /// Takes effect from the next open; a sequence in flight keeps the
    /// timings it started with.
    pub fn set_timings(&mut self, timings: TransitionTimings) {
        self.timings = timings;
    }

    #[cfg(test)]
    pub fn timings(&self) -> TransitionTimings {
        self.timings
    }

    #[cfg(test)]
    pub fn phase(&self) -> CardPhase {
        self.phase
    }

    pub fn active_project(&self) -> Option<&ProjectId> {
        self.active.as_ref()
    }

    /// True in every phase except `Closed`.
    pub fn is_modal_open(&self) -> bool {
        self.phase != CardPhase::Closed
    }

    /// Modal content only accepts activation once fully revealed.
    pub fn is_interactive(&self) -> bool {
        self.phase == CardPhase::Open
    }

    pub fn request_open(&mut self, id: impl Into<ProjectId>) -> Result<(), TransitionError> {
        let requested = id.into();
        self.update();
        if self.phase != CardPhase::Closed {
            tracing::debug!(%requested, phase = %self.phase, "open rejected, modal busy");
            return Err(TransitionError::Busy {
                requested,
                active: self.active.clone(),
                phase: self.phase,
            });
        }

        let now = self.clock.now();
        self.guard = Some(self.lock.acquire());
        tracing::debug!(project = %requested, "card expanding");
        self.active = Some(requested);
        self.running = self.timings;
        self.layout_started = now;
        self.collapse_from = 0.0;
        self.exit_from = 0.0;
        self.enter(CardPhase::Opening, now);
        Ok(())
    }

    /// Start the close sequence.  Returns `false` when a close is already
    /// under way (or nothing is open); the running sequence is left alone.
    pub fn request_close(&mut self) -> bool {
        self.update();
        if !self.phase.accepts_close() {
            return false;
        }
        let now = self.clock.now();
        self.exit_from = self.content_opacity_at(now);
        self.enter(CardPhase::Closing, now);
        true
    }

    /// Advance through every timed transition whose deadline has passed.
    /// Returns the phases entered, in order.
    pub fn update(&mut self) -> Vec<CardPhase> {
        let now = self.clock.now();
        let mut entered = Vec::new();

        while let (Some(after), Some(next)) =
            (self.phase.exit_after(&self.running), self.phase.timed_next())
        {
            let deadline = self.phase_started + after;
            if now < deadline {
                break;
            }
            if next == CardPhase::LayoutCollapsing {
                self.collapse_from = self.layout_progress_at(deadline);
            }
            self.enter(next, deadline);
            entered.push(next);
            if next == CardPhase::Closed {
                self.release();
            }
        }

        entered
    }

    /// Forced unmount: drop straight to `Closed` and unlock the page.
    pub fn teardown(&mut self) {
        if self.phase != CardPhase::Closed {
            let now = self.clock.now();
            self.enter(CardPhase::Closed, now);
        }
        self.release();
    }

    /// Geometry progress: 0 is the card's box, 1 the modal's.
    pub fn layout_progress(&self) -> f64 {
        self.layout_progress_at(self.clock.now())
    }

    pub fn content_opacity(&self) -> f64 {
        self.content_opacity_at(self.clock.now())
    }

    /// Remaining slide-up distance of the content, in rows.
    pub fn content_offset(&self) -> f64 {
        (1.0 - self.content_opacity()) * CONTENT_SLIDE_ROWS
    }

    fn layout_progress_at(&self, now: Duration) -> f64 {
        let layout = self.running.layout;
        match self.phase {
            CardPhase::Closed => 0.0,
            CardPhase::Opening
            | CardPhase::ContentRevealing
            | CardPhase::Open
            | CardPhase::Closing => spring_progress(
                now.saturating_sub(self.layout_started),
                layout,
                LAYOUT_SPRING_OMEGA,
            ),
            CardPhase::LayoutCollapsing => {
                let done = spring_progress(
                    now.saturating_sub(self.phase_started),
                    layout,
                    LAYOUT_SPRING_OMEGA,
                );
                self.collapse_from * (1.0 - done)
            }
        }
    }

    fn content_opacity_at(&self, now: Duration) -> f64 {
        match self.phase {
            CardPhase::ContentRevealing => {
                ease_out_cubic(Tween::new(self.phase_started, self.running.content_fade).progress(now))
            }
            CardPhase::Open => 1.0,
            CardPhase::Closing => {
                let t = Tween::new(self.phase_started, self.running.content_exit).progress(now);
                self.exit_from * (1.0 - ease_out_cubic(t))
            }
            CardPhase::Closed | CardPhase::Opening | CardPhase::LayoutCollapsing => 0.0,
        }
    }

    fn enter(&mut self, phase: CardPhase, at: Duration) {
        tracing::debug!(
            from = %self.phase,
            to = %phase,
            project = ?self.active.as_ref().map(ProjectId::as_str),
            at_ms = at.as_millis() as u64,
            "card transition"
        );
        self.phase = phase;
        self.phase_started = at;
    }

    fn release(&mut self) {
        self.active = None;
        self.collapse_from = 0.0;
        self.exit_from = 0.0;
        self.guard = None;
    }
}
