//! Terminal event abstraction.
//!
//! Wraps crossterm events into a smaller enum and runs a blocking reader that
//! forwards them over a channel, so the main loop can `select!` between input
//! and the frame clock.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

impl AppEvent {
    /// Key releases are dropped; everything else the app cares about maps 1:1.
    pub fn from_crossterm(ev: CtEvent) -> Option<Self> {
        match ev {
            CtEvent::Key(k) if k.kind != KeyEventKind::Release => Some(AppEvent::Key(k)),
            CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
            CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            _ => None,
        }
    }
}

/// Spawn a blocking task that polls the terminal and forwards events.
///
/// `poll_interval` bounds how long the reader waits before checking whether
/// the receiver is gone; the task ends on the first poll after it is dropped.
pub fn spawn_event_reader(poll_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(poll_interval) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(err) => {
                    tracing::error!(%err, "terminal poll failed, stopping event reader");
                    break;
                }
            }
            let ev = match event::read() {
                Ok(ev) => ev,
                Err(err) => {
                    tracing::warn!(%err, "terminal read failed");
                    continue;
                }
            };
            if let Some(app_event) = AppEvent::from_crossterm(ev) {
                if tx.send(app_event).is_err() {
                    break;
                }
            }
        }
        tracing::debug!("event reader stopped");
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn key_releases_are_dropped() {
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        release.state = KeyEventState::NONE;
        assert_eq!(AppEvent::from_crossterm(CtEvent::Key(release)), None);

        let press = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(
            AppEvent::from_crossterm(CtEvent::Key(press)),
            Some(AppEvent::Key(press))
        );
        assert_eq!(
            AppEvent::from_crossterm(CtEvent::Resize(80, 24)),
            Some(AppEvent::Resize(80, 24))
        );
        assert_eq!(AppEvent::from_crossterm(CtEvent::FocusGained), None);
    }
}
