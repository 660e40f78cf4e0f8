//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and UI renderers consume the same source of truth without cross-importing.

use super::state::{ActiveView, AppState};

/// Divider speeds offered by the menu.
const DIVIDER_SPEEDS: &[f64] = &[0.4, 0.6, 0.8, 1.0, 1.5];
/// Divider easing factors offered by the menu.
const DIVIDER_EASINGS: &[f64] = &[0.04, 0.08, 0.12, 0.2];

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Opens a submenu.
    Submenu {
        label: &'static str,
        view: ActiveView,
    },
    /// Boolean toggle, read and written through accessors on `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submenu { label, .. }
            | Self::Toggle { label, .. }
            | Self::Cycle { label, .. } => label,
        }
    }

    /// Current value as shown next to the label, if the item has one.
    pub fn value(&self, state: &AppState) -> Option<String> {
        match self {
            Self::Submenu { .. } => None,
            Self::Toggle { get, .. } => Some(if get(state) { "ON" } else { "OFF" }.to_string()),
            Self::Cycle { value, .. } => Some(value(state)),
        }
    }
}

/// Next entry of `values` after the one closest to `current`.
fn next_step(values: &[f64], current: f64) -> f64 {
    let idx = values
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - current).abs().total_cmp(&(*b - current).abs()))
        .map_or(0, |(i, _)| i);
    values[(idx + 1) % values.len()]
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Submenu {
        label: "Controls",
        view: ActiveView::ControlsSubmenu,
    },
    SettingsItem::Toggle {
        label: "Reduced Motion",
        get: |s| s.config.reduced_motion,
        set: |s, v| {
            s.config.reduced_motion = v;
            s.apply_motion_settings();
            s.persist_config();
        },
    },
    SettingsItem::Toggle {
        label: "Cursor Glow",
        get: |s| s.config.cursor_glow,
        set: |s, v| {
            s.config.cursor_glow = v;
            s.apply_motion_settings();
            s.persist_config();
        },
    },
    SettingsItem::Toggle {
        label: "Skip Intro",
        get: |s| s.config.skip_intro,
        set: |s, v| {
            // Applies from the next launch.
            s.config.skip_intro = v;
            s.persist_config();
        },
    },
    SettingsItem::Cycle {
        label: "Divider Speed",
        value: |s| format!("{:.1}×", s.config.divider_speed),
        cycle: |s| {
            s.config.divider_speed = next_step(DIVIDER_SPEEDS, s.config.divider_speed);
            s.apply_motion_settings();
            s.persist_config();
            s.status_message = Some(format!("Divider speed: {:.1}×", s.config.divider_speed));
        },
    },
    SettingsItem::Cycle {
        label: "Divider Easing",
        value: |s| format!("{:.2}", s.config.divider_easing),
        cycle: |s| {
            s.config.divider_easing = next_step(DIVIDER_EASINGS, s.config.divider_easing);
            s.apply_motion_settings();
            s.persist_config();
            s.status_message = Some(format!("Divider easing: {:.2}", s.config.divider_easing));
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycling_steps_through_and_wraps() {
        assert_eq!(next_step(DIVIDER_SPEEDS, 0.8), 1.0);
        assert_eq!(next_step(DIVIDER_SPEEDS, 1.5), 0.4);
        // Off-menu values snap to their nearest neighbour first.
        assert_eq!(next_step(DIVIDER_SPEEDS, 0.79), 1.0);
        assert_eq!(next_step(DIVIDER_EASINGS, 0.08), 0.12);
    }

    #[test]
    fn labels_are_unique() {
        let mut labels: Vec<_> = SETTINGS_ITEMS.iter().map(SettingsItem::label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), SETTINGS_ITEMS.len());
    }
}
