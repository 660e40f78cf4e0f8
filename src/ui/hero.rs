//! Hero block: name, tagline, jump buttons, and a slowly turning wireframe
//! "impossible cube" the user can orbit by dragging.

use std::f64::consts::{FRAC_PI_4, TAU};
use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Paragraph, Widget,
    },
};

use crate::core::content::Profile;

use super::layout::{wrap_text, HeroSlots};
use super::theme::{rgb, Theme, ACCENT};

// ───────────────────────────────────────── camera ────────────

/// One full turn every 30 s.
const AUTO_ROTATE: f64 = TAU / 30.0;
const PITCH_LIMIT: f64 = 1.2;
/// Radians per dragged cell.
const DRAG_SENSITIVITY: f64 = 0.06;
const CAMERA_DISTANCE: f64 = 12.0;
/// Focal length for a 45° vertical field of view.
const FOCAL: f64 = 2.414_213_562_373_095;

/// Orbit camera around the cube.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeCamera {
    pub yaw: f64,
    pub pitch: f64,
    auto_rotate: bool,
    drag_from: Option<(u16, u16)>,
}

impl Default for CubeCamera {
    fn default() -> Self {
        // Looking down from (4, 8, 8).
        Self {
            yaw: 0.463_647_609,
            pitch: 0.729_727_656,
            auto_rotate: true,
            drag_from: None,
        }
    }
}

impl CubeCamera {
    pub fn set_auto_rotate(&mut self, on: bool) {
        self.auto_rotate = on;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    /// Auto-rotation pauses while dragging.
    pub fn tick(&mut self, dt: Duration) {
        if self.auto_rotate && self.drag_from.is_none() {
            self.yaw = (self.yaw + AUTO_ROTATE * dt.as_secs_f64()).rem_euclid(TAU);
        }
    }

    pub fn begin_drag(&mut self, col: u16, row: u16) {
        self.drag_from = Some((col, row));
    }

    pub fn drag_to(&mut self, col: u16, row: u16) {
        let Some((from_col, from_row)) = self.drag_from else {
            return;
        };
        let dx = f64::from(col) - f64::from(from_col);
        // Rows are roughly twice as tall as columns are wide.
        let dy = (f64::from(row) - f64::from(from_row)) * 2.0;
        self.yaw = (self.yaw - dx * DRAG_SENSITIVITY).rem_euclid(TAU);
        self.pitch = (self.pitch + dy * DRAG_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.drag_from = Some((col, row));
    }

    pub fn end_drag(&mut self) {
        self.drag_from = None;
    }

    /// Perspective projection of a world point onto the unit image plane.
    fn project(&self, [x, y, z]: [f64; 3]) -> (f64, f64) {
        let (sy, cy) = self.yaw.sin_cos();
        let (x, z) = (x * cy - z * sy, x * sy + z * cy);
        let (sp, cp) = self.pitch.sin_cos();
        let (y, z) = (y * cp - z * sp, y * sp + z * cp);
        let depth = (CAMERA_DISTANCE - z).max(0.1);
        (x * FOCAL / depth, y * FOCAL / depth)
    }
}

// ───────────────────────────────────────── geometry ──────────

type Segment = ([f64; 3], [f64; 3]);

/// Beam centre lines: twelve edges plus a short cross on the top and bottom
/// faces.  The overshooting horizontals are what make it look impossible.
pub fn cube_segments() -> Vec<Segment> {
    const H: f64 = 1.5;
    const LONG: f64 = 3.3 / 2.0;
    const DIAG: f64 = 3.5 / 2.0;
    let mut segs = Vec::with_capacity(16);
    for sx in [-H, H] {
        for sz in [-H, H] {
            segs.push(([sx, -H, sz], [sx, H, sz]));
        }
    }
    for sy in [-H, H] {
        for sz in [-H, H] {
            segs.push(([-LONG, sy, sz], [LONG, sy, sz]));
        }
        for sx in [-H, H] {
            segs.push(([sx, sy, -LONG], [sx, sy, LONG]));
        }
        for angle in [FRAC_PI_4, -FRAC_PI_4] {
            let (s, c) = angle.sin_cos();
            segs.push(([-DIAG * c, sy, DIAG * s], [DIAG * c, sy, -DIAG * s]));
        }
    }
    segs
}

// ───────────────────────────────────────── widgets ───────────

/// Braille wireframe of the cube.
pub struct CubeWidget<'a> {
    pub camera: &'a CubeCamera,
}

impl Widget for CubeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 2 {
            return;
        }
        // Keep the cube square: a cell is about twice as tall as it is wide.
        let aspect = f64::from(area.width) / (f64::from(area.height) * 2.0);
        let scale = 0.55;
        let lines: Vec<((f64, f64), (f64, f64))> = cube_segments()
            .into_iter()
            .map(|(a, b)| (self.camera.project(a), self.camera.project(b)))
            .collect();
        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-scale * aspect, scale * aspect])
            .y_bounds([-scale, scale])
            .paint(move |ctx| {
                for &((x1, y1), (x2, y2)) in &lines {
                    ctx.draw(&CanvasLine::new(x1, y1, x2, y2, rgb(ACCENT)));
                }
            })
            .render(area, buf);
    }
}

/// Name, tagline and buttons, drawn at the document-space slots.
pub struct HeroWidget<'a> {
    pub profile: &'a Profile,
    pub slots: &'a HeroSlots,
    pub camera: &'a CubeCamera,
}

impl HeroWidget<'_> {
    pub fn render_into(self, buf: &mut Buffer) {
        let text = self.slots.text;
        let mut lines = vec![
            Line::from(vec![
                Span::styled(format!("{} ", self.profile.first_name), Theme::card_title_style()),
                Span::styled(self.profile.last_name, Theme::heading_style()),
            ]),
            Line::from(Span::styled("Software developer · ML & NLP", Theme::muted_style())),
            Line::raw(""),
        ];
        lines.extend(
            wrap_text(self.profile.tagline, text.width)
                .into_iter()
                .map(|l| Line::from(Span::styled(l, Theme::body_style()))),
        );
        Paragraph::new(lines).render(text, buf);

        for &(button, rect) in &self.slots.buttons {
            buf.set_string(rect.x, rect.y, button.label(), Theme::button_style(false));
        }
        let hint_row = self.slots.buttons.first().map(|(_, r)| r.y + 2);
        if let Some(y) = hint_row.filter(|&y| y < text.bottom()) {
            buf.set_string(text.x, y, "drag the cube to spin it", Theme::muted_style());
        }

        CubeWidget { camera: self.camera }.render(self.slots.cube, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_rotation_pauses_while_dragging() {
        let mut cam = CubeCamera::default();
        let yaw = cam.yaw;
        cam.tick(Duration::from_secs(1));
        assert!((cam.yaw - (yaw + AUTO_ROTATE)).abs() < 1e-9);

        cam.begin_drag(10, 10);
        let yaw = cam.yaw;
        cam.tick(Duration::from_secs(1));
        assert_eq!(cam.yaw, yaw);
        cam.end_drag();
        assert!(!cam.is_dragging());
    }

    #[test]
    fn dragging_orbits_and_clamps_pitch() {
        let mut cam = CubeCamera::default();
        cam.set_auto_rotate(false);
        cam.begin_drag(10, 10);
        cam.drag_to(20, 10);
        assert!(cam.yaw != CubeCamera::default().yaw);
        cam.drag_to(20, 200);
        assert_eq!(cam.pitch, PITCH_LIMIT);
        cam.drag_to(20, 0);
        assert_eq!(cam.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn drag_without_begin_is_ignored() {
        let mut cam = CubeCamera::default();
        cam.drag_to(50, 50);
        assert_eq!(cam, CubeCamera::default());
    }

    #[test]
    fn cube_has_edges_and_face_crosses() {
        let segs = cube_segments();
        assert_eq!(segs.len(), 16);
        let len = |(a, b): &Segment| {
            ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt()
        };
        assert!(segs.iter().filter(|s| (len(s) - 3.5).abs() < 1e-9).count() == 4);
        assert!(segs.iter().all(|s| len(s) >= 3.0 - 1e-9));
    }

    #[test]
    fn cube_draws_something() {
        let area = Rect::new(0, 0, 30, 12);
        let mut buf = Buffer::empty(area);
        CubeWidget { camera: &CubeCamera::default() }.render(area, &mut buf);
        let drawn = buf.content().iter().filter(|c| c.symbol() != " ").count();
        assert!(drawn > 10);
    }
}
