//! Page scrolling with exponential ease-out.
//!
//! Input moves a target row; every frame the rendered position closes a fixed
//! fraction of the remaining distance, so the page visibly decelerates into
//! place.  While the shared [`ScrollLock`] is held, input is refused and both
//! values are left exactly where they were.

use crate::core::scroll_lock::ScrollLock;

/// Settle threshold in rows.
const SNAP: f64 = 0.02;

#[derive(Debug, Clone)]
pub struct PageScroller {
    lock: ScrollLock,
    target: f64,
    current: f64,
    max: f64,
    /// Fraction of the remaining distance covered per tick.
    speed: f64,
}

impl PageScroller {
    pub fn new(lock: ScrollLock, speed: f64) -> Self {
        Self {
            lock,
            target: 0.0,
            current: 0.0,
            max: 0.0,
            speed: speed.clamp(0.05, 1.0),
        }
    }

    /// Largest reachable top row.  Clamps both positions.
    pub fn set_max(&mut self, max: u16) {
        self.max = f64::from(max);
        self.target = self.target.clamp(0.0, self.max);
        self.current = self.current.clamp(0.0, self.max);
    }

    /// Returns `false` when the page is locked.
    pub fn scroll_by(&mut self, rows: f64) -> bool {
        if self.lock.is_locked() {
            return false;
        }
        self.target = (self.target + rows).clamp(0.0, self.max);
        true
    }

    /// Returns `false` when the page is locked.
    pub fn scroll_to(&mut self, row: f64) -> bool {
        if self.lock.is_locked() {
            return false;
        }
        self.target = row.clamp(0.0, self.max);
        true
    }

    /// Scroll just enough for rows `[top, top + height)` to be on screen.
    pub fn reveal(&mut self, top: u16, height: u16, viewport: u16) -> bool {
        let (top, bottom) = (f64::from(top), f64::from(top) + f64::from(height));
        let view = f64::from(viewport);
        if top < self.target {
            self.scroll_to(top)
        } else if bottom > self.target + view {
            self.scroll_to(bottom - view)
        } else {
            !self.lock.is_locked()
        }
    }

    pub fn tick(&mut self) {
        self.current += (self.target - self.current) * self.speed;
        if (self.target - self.current).abs() < SNAP {
            self.current = self.target;
        }
    }

    /// Rendered position in fractional rows.
    pub fn position(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// First visible document row.
    pub fn top(&self) -> u16 {
        self.current.round().clamp(0.0, f64::from(u16::MAX)) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroller() -> (ScrollLock, PageScroller) {
        let lock = ScrollLock::new();
        let mut s = PageScroller::new(lock.clone(), 0.5);
        s.set_max(100);
        (lock, s)
    }

    #[test]
    fn eases_toward_target_and_settles() {
        let (_, mut s) = scroller();
        assert!(s.scroll_by(10.0));
        s.tick();
        assert_eq!(s.position(), 5.0);
        for _ in 0..20 {
            s.tick();
        }
        assert_eq!(s.top(), 10);
        assert_eq!(s.position(), s.target());
    }

    #[test]
    fn clamps_to_the_page() {
        let (_, mut s) = scroller();
        s.scroll_by(-5.0);
        assert_eq!(s.target(), 0.0);
        s.scroll_to(500.0);
        assert_eq!(s.target(), 100.0);
        s.set_max(40);
        assert_eq!(s.target(), 40.0);
    }

    #[test]
    fn locked_page_refuses_input_and_keeps_position() {
        let (lock, mut s) = scroller();
        s.scroll_to(30.0);
        for _ in 0..30 {
            s.tick();
        }
        let guard = lock.acquire();
        assert!(!s.scroll_by(10.0));
        assert!(!s.scroll_to(0.0));
        assert!(!s.reveal(0, 1, 10));
        s.tick();
        assert_eq!(s.top(), 30);
        drop(guard);
        assert!(s.scroll_by(1.0));
        assert_eq!(s.target(), 31.0);
    }

    #[test]
    fn reveal_scrolls_minimally() {
        let (_, mut s) = scroller();
        s.reveal(50, 5, 20);
        assert_eq!(s.target(), 35.0);
        s.reveal(40, 5, 20);
        assert_eq!(s.target(), 35.0);
        s.reveal(10, 5, 20);
        assert_eq!(s.target(), 10.0);
    }
}
