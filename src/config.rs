//! User configuration: keybindings, animation tunables, persistence.
//!
//! Settings are stored as a flat `key = value` text file at
//! `$XDG_CONFIG_HOME/folio/config.toml` (default `~/.config/folio/config.toml`),
//! or wherever `--config` points.  Unknown keys are ignored and out-of-range
//! values are clamped, so a hand-edited file can never stop the app starting.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::transition::TransitionTimings;

// ───────────────────────────────────────── actions ───────────

/// Every rebindable page action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    NextSection,
    PrevSection,
    NextCard,
    PrevCard,
    OpenCard,
    CloseModal,
    OpenSettings,
    Quit,
}

impl Action {
    /// Display order for the controls menu.
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::NextSection,
        Action::PrevSection,
        Action::NextCard,
        Action::PrevCard,
        Action::OpenCard,
        Action::CloseModal,
        Action::OpenSettings,
        Action::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::ScrollUp => "Scroll Up",
            Action::ScrollDown => "Scroll Down",
            Action::PageUp => "Page Up",
            Action::PageDown => "Page Down",
            Action::NextSection => "Next Section",
            Action::PrevSection => "Prev Section",
            Action::NextCard => "Next Project",
            Action::PrevCard => "Prev Project",
            Action::OpenCard => "Open Project",
            Action::CloseModal => "Close Project",
            Action::OpenSettings => "Open Settings",
            Action::Quit => "Quit",
        }
    }

    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::NextSection => "next_section",
            Action::PrevSection => "prev_section",
            Action::NextCard => "next_card",
            Action::PrevCard => "prev_card",
            Action::OpenCard => "open_card",
            Action::CloseModal => "close_modal",
            Action::OpenSettings => "open_settings",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A key code plus the CTRL/ALT/SHIFT modifiers that must accompany it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Platform modifiers such as SUPER are ignored.
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && (self.modifiers & MODIFIER_MASK) == (event.modifiers & MODIFIER_MASK)
    }

    pub fn from_key_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers & MODIFIER_MASK,
        }
    }

    /// Short form for menus and the status bar (`"Ctrl+c"`, `"↑"`).
    pub fn display(&self) -> String {
        self.render(true)
    }

    /// Form written to the config file (`"Ctrl+c"`, `"Up"`).
    fn to_config_string(&self) -> String {
        self.render(false)
    }

    fn render(&self, pretty: bool) -> String {
        let mut s = String::new();
        for (flag, prefix) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                s.push_str(prefix);
            }
        }
        let name = match (self.code, pretty) {
            (KeyCode::Char(' '), _) => "Space".to_string(),
            (KeyCode::Char(c), _) => c.to_string(),
            (KeyCode::Up, true) => "↑".into(),
            (KeyCode::Down, true) => "↓".into(),
            (KeyCode::Left, true) => "←".into(),
            (KeyCode::Right, true) => "→".into(),
            (KeyCode::PageUp, true) => "PgUp".into(),
            (KeyCode::PageDown, true) => "PgDn".into(),
            (KeyCode::Up, false) => "Up".into(),
            (KeyCode::Down, false) => "Down".into(),
            (KeyCode::Left, false) => "Left".into(),
            (KeyCode::Right, false) => "Right".into(),
            (KeyCode::PageUp, false) => "PageUp".into(),
            (KeyCode::PageDown, false) => "PageDown".into(),
            (KeyCode::Enter, _) => "Enter".into(),
            (KeyCode::Esc, _) => "Esc".into(),
            (KeyCode::Tab, _) => "Tab".into(),
            (KeyCode::Backspace, _) => "Backspace".into(),
            (KeyCode::Delete, _) => "Delete".into(),
            (KeyCode::Home, _) => "Home".into(),
            (KeyCode::End, _) => "End".into(),
            (KeyCode::F(n), _) => format!("F{n}"),
            (other, _) => format!("{other:?}"),
        };
        s.push_str(&name);
        s
    }

    /// Parse `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`, `"+"`.
    fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        // A bare `+` is a key, not a separator.
        let (mods, key_part) = match s.rsplit_once('+') {
            Some((mods, "")) if mods.ends_with('+') || mods.is_empty() => {
                (mods.trim_end_matches('+'), "+")
            }
            Some((mods, key)) => (mods, key),
            None => ("", s),
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in mods.split('+').filter(|p| !p.is_empty()) {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let lower = key_part.to_ascii_lowercase();
        let code = match lower.as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            f if f.len() > 1 && f.starts_with('f') => KeyCode::F(f[1..].parse().ok()?),
            _ => {
                let mut chars = key_part.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                KeyCode::Char(c)
            }
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── tunables ──────────

/// Clamp ranges for numeric settings.
const GAP_RANGE: (u16, u16) = (1, 40);
const SPEED_RANGE: (f64, f64) = (0.1, 5.0);
const EASING_RANGE: (f64, f64) = (0.01, 0.99);
const PHASE_MS_RANGE: (u64, u64) = (0, 2000);
const LAYOUT_MS_RANGE: (u64, u64) = (50, 3000);

/// Application configuration: keybindings plus animation tunables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Blank cells between marquee labels.
    pub divider_gap: u16,
    /// Marquee distance per scrolled cell.
    pub divider_speed: f64,
    /// Fraction of the remaining marquee distance covered per frame.
    pub divider_easing: f64,
    pub open_delay_ms: u64,
    pub content_fade_ms: u64,
    pub content_exit_ms: u64,
    pub layout_ms: u64,
    pub reduced_motion: bool,
    pub cursor_glow: bool,
    pub skip_intro: bool,
    /// Where `save` writes to; `None` keeps changes in memory only.
    pub(crate) path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let timings = TransitionTimings::default();
        Self {
            bindings: Self::default_bindings(),
            divider_gap: 6,
            divider_speed: 0.8,
            divider_easing: 0.08,
            open_delay_ms: millis(timings.open_delay),
            content_fade_ms: millis(timings.content_fade),
            content_exit_ms: millis(timings.content_exit),
            layout_ms: millis(timings.layout),
            reduced_motion: false,
            cursor_glow: true,
            skip_intro: false,
            path: None,
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let mut m = HashMap::new();

        m.insert(ScrollUp, vec![KeyBind::plain(Up), KeyBind::plain(Char('k'))]);
        m.insert(ScrollDown, vec![KeyBind::plain(Down), KeyBind::plain(Char('j'))]);
        m.insert(Action::PageUp, vec![KeyBind::plain(KeyCode::PageUp)]);
        m.insert(
            Action::PageDown,
            vec![KeyBind::plain(KeyCode::PageDown), KeyBind::plain(Char(' '))],
        );
        m.insert(NextSection, vec![KeyBind::plain(Char(']')), KeyBind::plain(Char('n'))]);
        m.insert(PrevSection, vec![KeyBind::plain(Char('[')), KeyBind::plain(Char('p'))]);
        m.insert(NextCard, vec![KeyBind::plain(Right), KeyBind::plain(Char('l'))]);
        m.insert(PrevCard, vec![KeyBind::plain(Left), KeyBind::plain(Char('h'))]);
        m.insert(OpenCard, vec![KeyBind::plain(Enter)]);
        m.insert(CloseModal, vec![KeyBind::plain(Char('x'))]);
        m.insert(OpenSettings, vec![KeyBind::plain(Char('?'))]);
        m.insert(Quit, vec![KeyBind::plain(Char('q'))]);

        m
    }

    /// Resolve a key to an action.  If several bindings match, the one with
    /// the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, b)| b.matches(event))
            .max_by_key(|(_, b)| b.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    /// Bind `bind` to `action`, unbinding it from everything else first.
    pub fn add_binding(&mut self, action: Action, bind: KeyBind) {
        for binds in self.bindings.values_mut() {
            binds.retain(|b| b != &bind);
        }
        self.bindings.entry(action).or_default().push(bind);
    }

    pub fn reset_defaults(&mut self) {
        self.bindings = Self::default_bindings();
    }

    /// All bindings of `action`, e.g. `"↑/k"`.
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(KeyBind::display).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action).and_then(|b| b.first()) {
            Some(bind) => bind.display(),
            None => "?".into(),
        }
    }

    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}: section | {}: project | {}: open | {}: settings | {}: quit",
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::NextSection),
            self.short_binding(Action::NextCard),
            self.short_binding(Action::OpenCard),
            self.short_binding(Action::OpenSettings),
            self.short_binding(Action::Quit),
        )
    }

    pub fn modal_hint(&self) -> String {
        format!(
            "Esc/{}: close | o/Enter: open link",
            self.short_binding(Action::CloseModal)
        )
    }

    /// Card transition timings as configured, before reduced motion.
    pub fn transition_timings(&self) -> TransitionTimings {
        TransitionTimings {
            open_delay: Duration::from_millis(self.open_delay_ms),
            content_fade: Duration::from_millis(self.content_fade_ms),
            content_exit: Duration::from_millis(self.content_exit_ms),
            layout: Duration::from_millis(self.layout_ms),
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load from `path` (or the default location), falling back to defaults
    /// when the file is missing or unreadable.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
        let mut config = Self::default();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                config.apply(&contents);
                tracing::debug!(path = %path.display(), "config loaded");
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "config unreadable, using defaults");
            }
        }
        config.path = Some(path);
        config
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let Some(path) = &self.path else {
            tracing::debug!("config has no backing file, not saving");
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path, self.serialise())
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Overlay settings parsed from `s` onto `self`.
    fn apply(&mut self, s: &str) {
        for (lineno, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                tracing::warn!(line = lineno + 1, "config line without `=` ignored");
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "divider_gap" => set_clamped(&mut self.divider_gap, key, value, GAP_RANGE),
                "divider_speed" => set_clamped_f64(&mut self.divider_speed, key, value, SPEED_RANGE),
                "divider_easing" => {
                    set_clamped_f64(&mut self.divider_easing, key, value, EASING_RANGE)
                }
                "open_delay_ms" => set_clamped(&mut self.open_delay_ms, key, value, PHASE_MS_RANGE),
                "content_fade_ms" => {
                    set_clamped(&mut self.content_fade_ms, key, value, PHASE_MS_RANGE)
                }
                "content_exit_ms" => {
                    set_clamped(&mut self.content_exit_ms, key, value, PHASE_MS_RANGE)
                }
                "layout_ms" => set_clamped(&mut self.layout_ms, key, value, LAYOUT_MS_RANGE),
                "reduced_motion" => set_bool(&mut self.reduced_motion, key, value),
                "cursor_glow" => set_bool(&mut self.cursor_glow, key, value),
                "skip_intro" => set_bool(&mut self.skip_intro, key, value),
                _ => {
                    let Some(action) = Action::from_config_key(key) else {
                        tracing::warn!(key, "unknown config key ignored");
                        continue;
                    };
                    let parsed: Vec<KeyBind> = value
                        .split(',')
                        .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                        .collect();
                    if parsed.is_empty() {
                        tracing::warn!(key, value, "no valid keys, keeping default binding");
                    } else {
                        self.bindings.insert(action, parsed);
                    }
                }
            }
        }
    }

    pub fn serialise(&self) -> String {
        let mut lines = vec![
            "# folio configuration".to_string(),
            String::new(),
            "# Section dividers".to_string(),
            format!("divider_gap = {}", self.divider_gap),
            format!("divider_speed = {}", self.divider_speed),
            format!("divider_easing = {}", self.divider_easing),
            String::new(),
            "# Project modal timings (milliseconds)".to_string(),
            format!("open_delay_ms = {}", self.open_delay_ms),
            format!("content_fade_ms = {}", self.content_fade_ms),
            format!("content_exit_ms = {}", self.content_exit_ms),
            format!("layout_ms = {}", self.layout_ms),
            String::new(),
            "# Behaviour".to_string(),
            format!("reduced_motion = {}", self.reduced_motion),
            format!("cursor_glow = {}", self.cursor_glow),
            format!("skip_intro = {}", self.skip_intro),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Backspace, Delete, Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(KeyBind::to_config_string).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

fn set_clamped<T>(slot: &mut T, key: &str, value: &str, (lo, hi): (T, T))
where
    T: std::str::FromStr + Ord + Copy + std::fmt::Display,
{
    match value.parse::<T>() {
        Ok(v) => {
            let clamped = v.clamp(lo, hi);
            if clamped != v {
                tracing::warn!(key, %v, %clamped, "config value out of range, clamped");
            }
            *slot = clamped;
        }
        Err(_) => tracing::warn!(key, value, "invalid number in config, keeping default"),
    }
}

fn set_clamped_f64(slot: &mut f64, key: &str, value: &str, (lo, hi): (f64, f64)) {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => {
            let clamped = v.clamp(lo, hi);
            if clamped != v {
                tracing::warn!(key, v, clamped, "config value out of range, clamped");
            }
            *slot = clamped;
        }
        _ => tracing::warn!(key, value, "invalid number in config, keeping default"),
    }
}

fn set_bool(slot: &mut bool, key: &str, value: &str) {
    match value {
        "true" | "yes" | "on" => *slot = true,
        "false" | "no" | "off" => *slot = false,
        _ => tracing::warn!(key, value, "expected true/false in config, keeping default"),
    }
}

/// `$XDG_CONFIG_HOME/folio/config.toml`.
pub fn default_config_path() -> PathBuf {
    let config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let home = std::env::var_os("HOME").unwrap_or_else(|| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("folio").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parses_keys_and_modifiers() {
        assert_eq!(
            KeyBind::parse("Ctrl+c"),
            Some(KeyBind::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
        );
        assert_eq!(KeyBind::parse("PageDown"), Some(KeyBind::plain(KeyCode::PageDown)));
        assert_eq!(KeyBind::parse("space"), Some(KeyBind::plain(KeyCode::Char(' '))));
        assert_eq!(KeyBind::parse("F5"), Some(KeyBind::plain(KeyCode::F(5))));
        assert_eq!(KeyBind::parse("+"), Some(KeyBind::plain(KeyCode::Char('+'))));
        assert_eq!(KeyBind::parse("Hyper+x"), None);
        assert_eq!(KeyBind::parse("xyz"), None);
    }

    #[test]
    fn matching_ignores_platform_modifiers() {
        let config = AppConfig::default();
        assert_eq!(
            config.match_key(key(KeyCode::Char('j'), KeyModifiers::SUPER)),
            Some(Action::ScrollDown)
        );
        assert_eq!(config.match_key(key(KeyCode::Char('j'), KeyModifiers::ALT)), None);
    }

    #[test]
    fn paging_keys_trigger_the_paging_actions() {
        let config = AppConfig::default();
        assert_eq!(
            config.match_key(key(KeyCode::PageUp, KeyModifiers::NONE)),
            Some(Action::PageUp)
        );
        assert_eq!(
            config.match_key(key(KeyCode::PageDown, KeyModifiers::NONE)),
            Some(Action::PageDown)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(Action::PageDown)
        );
    }

    #[test]
    fn in_memory_config_never_touches_disk() {
        let config = AppConfig {
            skip_intro: true,
            ..AppConfig::default()
        };
        assert!(config.path.is_none());
        config.save().unwrap();
    }

    #[test]
    fn rebinding_steals_the_key() {
        let mut config = AppConfig::default();
        config.add_binding(Action::Quit, KeyBind::plain(KeyCode::Char('j')));
        assert_eq!(
            config.match_key(key(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(Action::Quit)
        );
        assert_eq!(config.display_bindings(Action::ScrollDown), "↓");
    }

    #[test]
    fn apply_clamps_and_skips_garbage() {
        let mut config = AppConfig::default();
        config.apply(
            "divider_gap = 500\n\
             divider_speed = nope\n\
             divider_easing = 2.5\n\
             layout_ms = 10\n\
             reduced_motion = true\n\
             mystery = 1\n\
             quit = Ctrl+q, nonsense-key\n\
             this line has no equals\n",
        );
        assert_eq!(config.divider_gap, 40);
        assert_eq!(config.divider_speed, 0.8);
        assert_eq!(config.divider_easing, 0.99);
        assert_eq!(config.layout_ms, 50);
        assert!(config.reduced_motion);
        assert_eq!(
            config.bindings.get(&Action::Quit),
            Some(&vec![KeyBind::new(KeyCode::Char('q'), KeyModifiers::CONTROL)])
        );
    }

    #[test]
    fn serialised_config_reads_back() {
        let mut original = AppConfig::default();
        original.divider_speed = 1.5;
        original.cursor_glow = false;
        original.add_binding(Action::OpenCard, KeyBind::plain(KeyCode::Char('o')));

        let mut reread = AppConfig::default();
        reread.apply(&original.serialise());
        assert_eq!(reread.divider_speed, 1.5);
        assert!(!reread.cursor_glow);
        assert_eq!(reread.bindings, original.bindings);
    }

    #[test]
    fn load_and_save_use_the_given_path() {
        let dir = std::env::temp_dir().join(format!("folio-config-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");
        let mut config = AppConfig::load(Some(&path));
        assert_eq!(config.divider_gap, 6);
        config.skip_intro = true;
        config.save().unwrap();
        assert!(AppConfig::load(Some(&path)).skip_intro);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn timings_follow_the_configured_millis() {
        let mut config = AppConfig::default();
        assert_eq!(config.transition_timings(), TransitionTimings::default());
        config.layout_ms = 600;
        assert_eq!(config.transition_timings().layout, Duration::from_millis(600));
    }
}
