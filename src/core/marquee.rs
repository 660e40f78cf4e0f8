//! Scroll-driven marquee engine behind the section dividers.
//!
//! Each divider repeats its label in a long horizontal strip.  Page scroll
//! deltas accumulate into a *target* offset; once per frame the *current*
//! (rendered) offset eases toward it and is wrapped into one copy's width,
//! so the strip loops forever and scroll jank is absorbed by the smoothing.
//!
//! ```text
//!   scroll sample ──► target += delta × multiplier
//!   frame tick    ──► current += (target − current) × easing ; wrap
//! ```
//!
//! Both offsets are shifted together when the current offset wraps, so the
//! target never grows without bound and `target − current` is preserved.

/// Label copies in one unrepeated run of the strip.
pub const COPIES_PER_RUN: usize = 20;

/// The strip holds this many runs back to back for seamless wraparound.
pub const RUNS_IN_STRIP: usize = 2;

const MIN_EASING: f64 = 0.01;
const MAX_EASING: f64 = 0.99;

// ───────────────────────────────────────── config ────────────

/// Per-divider settings.
#[derive(Debug, Clone, PartialEq)]
pub struct MarqueeConfig {
    /// Text to repeat.
    pub label: String,
    /// Blank cells after every label.
    pub gap: u16,
    /// Scale applied to every scroll delta.
    pub speed_multiplier: f64,
    /// Fraction of the remaining distance covered per frame, in `(0, 1)`.
    /// Lower is smoother and slower.
    pub easing_factor: f64,
    /// Navigation anchor (section jump target).
    pub anchor: Option<String>,
}

impl MarqueeConfig {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            gap: 6,
            speed_multiplier: 0.8,
            easing_factor: 0.08,
            anchor: None,
        }
    }

    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    pub fn speed_multiplier(mut self, multiplier: f64) -> Self {
        self.speed_multiplier = multiplier;
        self
    }

    pub fn easing_factor(mut self, easing: f64) -> Self {
        self.easing_factor = easing;
        self
    }

    pub fn anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }
}

fn sanitize_multiplier(multiplier: f64) -> f64 {
    if multiplier.is_finite() {
        multiplier
    } else {
        tracing::warn!(multiplier, "non-finite marquee speed, using 1.0");
        1.0
    }
}

fn sanitize_easing(easing: f64) -> f64 {
    if easing.is_finite() {
        easing.clamp(MIN_EASING, MAX_EASING)
    } else {
        tracing::warn!(easing, "non-finite marquee easing, using default");
        0.08
    }
}

// ───────────────────────────────────────── engine ────────────

/// Offset state for one divider.
#[derive(Debug, Clone)]
pub struct Marquee {
    config: MarqueeConfig,
    /// Accumulated scroll displacement (cells).
    target_offset: f64,
    /// Rendered displacement (cells), in `[0, content_width)` once measured.
    current_offset: f64,
    /// Width of one unrepeated run; `0.0` until measured.
    content_width: f64,
    measured: bool,
    run: String,
    strip: String,
}

impl Marquee {
    pub fn new(config: MarqueeConfig) -> Self {
        let config = MarqueeConfig {
            speed_multiplier: sanitize_multiplier(config.speed_multiplier),
            easing_factor: sanitize_easing(config.easing_factor),
            ..config
        };
        let (run, strip) = build_strip(&config.label, config.gap);
        Self {
            config,
            target_offset: 0.0,
            current_offset: 0.0,
            content_width: 0.0,
            measured: false,
            run,
            strip,
        }
    }

    #[cfg(test)]
    pub fn config(&self) -> &MarqueeConfig {
        &self.config
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }

    pub fn anchor(&self) -> Option<&str> {
        self.config.anchor.as_deref()
    }

    #[cfg(test)]
    pub fn target_offset(&self) -> f64 {
        self.target_offset
    }

    /// The offset to render.  Never the raw target.
    pub fn offset(&self) -> f64 {
        self.current_offset
    }

    pub fn is_measured(&self) -> bool {
        self.measured
    }

    /// One unrepeated run of the label (what gets measured).
    #[cfg(test)]
    pub fn run(&self) -> &str {
        &self.run
    }

    /// The full rendered strip: [`RUNS_IN_STRIP`] runs back to back.
    pub fn strip(&self) -> &str {
        &self.strip
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f64) {
        self.config.speed_multiplier = sanitize_multiplier(multiplier);
    }

    pub fn set_easing_factor(&mut self, easing: f64) {
        self.config.easing_factor = sanitize_easing(easing);
    }

    /// Feed the signed scroll distance since the previous sample.
    pub fn on_scroll_sample(&mut self, delta: f64) {
        if !delta.is_finite() {
            tracing::trace!(delta, label = %self.config.label, "ignoring non-finite scroll delta");
            return;
        }
        self.target_offset += delta * self.config.speed_multiplier;
    }

    /// Ease the rendered offset toward the target, then wrap.  Call once per
    /// frame.
    pub fn on_frame_tick(&mut self) {
        let next = self.current_offset
            + (self.target_offset - self.current_offset) * self.config.easing_factor;

        if self.content_width > 0.0 {
            let w = self.content_width;
            let wrapped = ((next % w) + w) % w;
            // Shift the target by the same whole number of runs.
            self.target_offset -= next - wrapped;
            self.current_offset = wrapped;
        } else {
            self.current_offset = next;
        }
    }

    /// Measure one run once, after the strip has been laid out.  Later calls
    /// are no-ops.  A non-positive measurement leaves the engine unwrapped.
    pub fn measure_content_width(&mut self, measure: impl FnOnce(&str) -> f64) -> f64 {
        if self.measured {
            return self.content_width;
        }
        self.measured = true;
        let width = measure(&self.run);
        if width.is_finite() && width > 0.0 {
            self.content_width = width;
        } else {
            tracing::debug!(width, label = %self.config.label, "marquee measured empty, not wrapping");
        }
        self.content_width
    }
}

fn build_strip(label: &str, gap: u16) -> (String, String) {
    let mut unit = String::with_capacity(label.len() + gap as usize);
    unit.push_str(label);
    unit.extend(std::iter::repeat(' ').take(gap as usize));
    let run = unit.repeat(COPIES_PER_RUN);
    let strip = run.repeat(RUNS_IN_STRIP);
    (run, strip)
}

// ───────────────────────────────────────── scroll source ─────

/// Turns absolute scroll positions into deltas.
///
/// Positions at or above the top are remembered as zero, so an overscroll
/// bounce does not inject a spurious jump when it settles.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollTracker {
    last_top: f64,
}

impl ScrollTracker {
    pub fn new(initial_top: f64) -> Self {
        Self {
            last_top: initial_top.max(0.0),
        }
    }

    pub fn sample(&mut self, top: f64) -> f64 {
        if !top.is_finite() {
            return 0.0;
        }
        let delta = top - self.last_top;
        self.last_top = if top <= 0.0 { 0.0 } else { top };
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn measured(width: f64) -> Marquee {
        let mut m = Marquee::new(MarqueeConfig::new("Projects"));
        m.measure_content_width(|_| width);
        m
    }

    #[test]
    fn strip_holds_forty_labels() {
        let m = Marquee::new(MarqueeConfig::new("Skills").gap(3));
        assert_eq!(m.strip().matches("Skills").count(), COPIES_PER_RUN * RUNS_IN_STRIP);
        assert_eq!(m.run().len(), ("Skills".len() + 3) * COPIES_PER_RUN);
    }

    #[test]
    fn render_offset_lags_behind_target() {
        let mut m = Marquee::new(MarqueeConfig::new("About Me").speed_multiplier(1.0).easing_factor(0.1));
        m.on_scroll_sample(100.0);
        assert_eq!(m.target_offset(), 100.0);
        assert_eq!(m.offset(), 0.0);
        m.on_frame_tick();
        assert!((m.offset() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn unmeasured_offset_passes_through_unwrapped() {
        let mut m = Marquee::new(MarqueeConfig::new("x").speed_multiplier(1.0).easing_factor(0.5));
        m.on_scroll_sample(-400.0);
        m.on_frame_tick();
        assert!((m.offset() + 200.0).abs() < 1e-9);
    }

    #[test]
    fn non_finite_deltas_are_ignored() {
        let mut m = measured(50.0);
        m.on_scroll_sample(f64::NAN);
        m.on_scroll_sample(f64::INFINITY);
        m.on_scroll_sample(f64::NEG_INFINITY);
        assert_eq!(m.target_offset(), 0.0);
        m.on_frame_tick();
        assert_eq!(m.offset(), 0.0);
    }

    #[test]
    fn measurement_happens_once() {
        let mut m = Marquee::new(MarqueeConfig::new("Contact Me"));
        assert_eq!(m.measure_content_width(|run| run.len() as f64), m.run().len() as f64);
        assert_eq!(m.measure_content_width(|_| 3.0), m.run().len() as f64);
    }

    #[test]
    fn zero_measurement_degrades_to_unwrapped() {
        let mut m = Marquee::new(MarqueeConfig::new("").gap(0).speed_multiplier(1.0).easing_factor(0.5));
        assert_eq!(m.measure_content_width(|run| run.len() as f64), 0.0);
        m.on_scroll_sample(30.0);
        m.on_frame_tick();
        assert!((m.offset() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn negative_offsets_wrap_into_range() {
        let mut m = Marquee::new(MarqueeConfig::new("Education").speed_multiplier(1.0).easing_factor(0.5));
        m.measure_content_width(|_| 100.0);
        m.on_scroll_sample(-30.0);
        m.on_frame_tick();
        assert!((m.offset() - 85.0).abs() < 1e-9);
    }

    #[test]
    fn wrapping_keeps_target_bounded() {
        let mut m = Marquee::new(MarqueeConfig::new("Experience").speed_multiplier(1.0).easing_factor(0.5));
        m.measure_content_width(|_| 100.0);
        for _ in 0..10_000 {
            m.on_scroll_sample(37.0);
            m.on_frame_tick();
        }
        assert!(m.target_offset().abs() < 500.0, "target = {}", m.target_offset());
        assert!((0.0..100.0).contains(&m.offset()));
    }

    #[test]
    fn easing_is_clamped_into_open_interval() {
        let m = Marquee::new(MarqueeConfig::new("a").easing_factor(4.0));
        assert!(m.config().easing_factor < 1.0);
        let m = Marquee::new(MarqueeConfig::new("a").easing_factor(-1.0));
        assert!(m.config().easing_factor > 0.0);
    }

    #[test]
    fn tracker_floors_overscroll_at_zero() {
        let mut t = ScrollTracker::new(10.0);
        assert_eq!(t.sample(4.0), -6.0);
        assert_eq!(t.sample(-3.0), -7.0);
        // -3 was remembered as 0
        assert_eq!(t.sample(2.0), 2.0);
        assert_eq!(t.sample(f64::NAN), 0.0);
    }

    proptest! {
        #[test]
        fn current_offset_stays_in_range(
            width in 1.0f64..5000.0,
            easing in 0.01f64..0.99,
            multiplier in -3.0f64..3.0,
            deltas in proptest::collection::vec(-10_000.0f64..10_000.0, 1..200),
        ) {
            let mut m = Marquee::new(
                MarqueeConfig::new("Skills").speed_multiplier(multiplier).easing_factor(easing),
            );
            m.measure_content_width(|_| width);
            for d in deltas {
                m.on_scroll_sample(d);
                m.on_frame_tick();
                prop_assert!(m.offset() >= 0.0 && m.offset() < width, "offset {} width {}", m.offset(), width);
            }
        }

        #[test]
        fn converges_toward_fixed_target_without_overshoot(
            width in 10.0f64..2000.0,
            easing in 0.01f64..0.99,
            target in -5000.0f64..5000.0,
        ) {
            let mut m = Marquee::new(
                MarqueeConfig::new("Projects").speed_multiplier(1.0).easing_factor(easing),
            );
            m.measure_content_width(|_| width);
            m.on_scroll_sample(target);
            let initial_gap = m.target_offset() - m.offset();
            let mut prev = initial_gap.abs();
            for _ in 0..400 {
                m.on_frame_tick();
                let gap = m.target_offset() - m.offset();
                // same side of the target, never further away
                if gap.abs() > 1e-6 {
                    prop_assert_eq!(gap.signum(), initial_gap.signum());
                }
                prop_assert!(gap.abs() <= prev + 1e-6);
                prev = gap.abs();
            }
            prop_assert!(prev <= initial_gap.abs() * (1.0 - easing).powi(400) + 1e-6);
            let residue = ((m.offset() - target) % width + width) % width;
            let dist = residue.min(width - residue);
            prop_assert!(dist <= prev + 1e-6, "dist {} gap {}", dist, prev);
        }
    }
}
