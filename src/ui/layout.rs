//! Layout helpers: the screen split, and the page laid out as one tall
//! document.
//!
//! [`PageLayout`] positions every block of the page in *document*
//! coordinates (row 0 is the top of the page, not of the screen).  The
//! renderer draws from it and the input handler hit-tests against it, so both
//! always agree on where things are.

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::content::{InfoCard, Profile, Project, SectionBody, PROFILE, PROJECTS, SECTIONS};

// ───────────────────────────────────────── screen ────────────

/// Page area plus a one-line status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub page_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        Self {
            page_area: chunks[0],
            status_area: chunks[1],
        }
    }
}

// ───────────────────────────────────────── document ──────────

pub const DIVIDER_HEIGHT: u16 = 3;
const MARGIN_X: u16 = 2;
const BLOCK_GAP: u16 = 1;
const PROJECT_CARD_HEIGHT: u16 = 7;
const HERO_TEXT_MIN_HEIGHT: u16 = 12;
const CUBE_MIN_WIDTH: u16 = 24;
const FOOTER_HEIGHT: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeroButton {
    SeeProjects,
    Contact,
}

impl HeroButton {
    pub const ALL: [HeroButton; 2] = [HeroButton::SeeProjects, HeroButton::Contact];

    pub fn label(self) -> &'static str {
        match self {
            HeroButton::SeeProjects => "[ See Projects ]",
            HeroButton::Contact => "[ Contact ]",
        }
    }

    /// Section anchor the button scrolls to.
    pub fn anchor(self) -> &'static str {
        match self {
            HeroButton::SeeProjects => "projects",
            HeroButton::Contact => "contact",
        }
    }
}

/// Hero sub-areas, document coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroSlots {
    pub text: Rect,
    pub cube: Rect,
    pub buttons: Vec<(HeroButton, Rect)>,
}

/// One positioned piece of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageBlock {
    Divider { section: usize, rect: Rect },
    Hero { rect: Rect },
    Info { card: &'static InfoCard, rect: Rect },
    Project { index: usize, rect: Rect },
    Contact { rect: Rect },
    Footer { rect: Rect },
}

impl PageBlock {
    pub fn rect(&self) -> Rect {
        match self {
            PageBlock::Divider { rect, .. }
            | PageBlock::Hero { rect }
            | PageBlock::Info { rect, .. }
            | PageBlock::Project { rect, .. }
            | PageBlock::Contact { rect }
            | PageBlock::Footer { rect } => *rect,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    pub width: u16,
    pub height: u16,
    pub blocks: Vec<PageBlock>,
    /// `(anchor, row)` of each section's divider, top to bottom.
    pub anchors: Vec<(&'static str, u16)>,
    /// Rect of each project card, indexed like [`PROJECTS`].
    pub project_rects: Vec<Rect>,
    pub hero: HeroSlots,
}

impl PageLayout {
    pub fn compute(width: u16) -> Self {
        Builder::new(width, &PROFILE, PROJECTS).build()
    }

    pub fn anchor_row(&self, anchor: &str) -> Option<u16> {
        self.anchors
            .iter()
            .find(|(a, _)| *a == anchor)
            .map(|&(_, row)| row)
    }

    /// First anchor strictly below `row`.
    pub fn next_anchor(&self, row: u16) -> Option<u16> {
        self.anchors.iter().map(|&(_, r)| r).find(|&r| r > row)
    }

    /// Last anchor strictly above `row`.
    pub fn prev_anchor(&self, row: u16) -> Option<u16> {
        self.anchors.iter().rev().map(|&(_, r)| r).find(|&r| r < row)
    }

    pub fn project_at(&self, pos: Position) -> Option<usize> {
        self.project_rects.iter().position(|r| r.contains(pos))
    }

    pub fn hero_button_at(&self, pos: Position) -> Option<HeroButton> {
        self.hero
            .buttons
            .iter()
            .find(|(_, r)| r.contains(pos))
            .map(|&(b, _)| b)
    }

    /// Blocks overlapping rows `[top, top + height)`.
    pub fn visible_blocks(&self, top: u16, height: u16) -> impl Iterator<Item = &PageBlock> {
        let bottom = top.saturating_add(height);
        self.blocks.iter().filter(move |b| {
            let r = b.rect();
            r.y < bottom && r.bottom() > top
        })
    }
}

struct Builder<'a> {
    width: u16,
    inner_width: u16,
    y: u16,
    profile: &'a Profile,
    projects: &'a [Project],
    blocks: Vec<PageBlock>,
    anchors: Vec<(&'static str, u16)>,
    project_rects: Vec<Rect>,
    hero: HeroSlots,
}

impl<'a> Builder<'a> {
    fn new(width: u16, profile: &'a Profile, projects: &'a [Project]) -> Self {
        Self {
            width,
            inner_width: width.saturating_sub(MARGIN_X * 2).max(1),
            y: 0,
            profile,
            projects,
            blocks: Vec::new(),
            anchors: Vec::new(),
            project_rects: Vec::new(),
            hero: HeroSlots {
                text: Rect::default(),
                cube: Rect::default(),
                buttons: Vec::new(),
            },
        }
    }

    fn build(mut self) -> PageLayout {
        for (index, section) in SECTIONS.iter().enumerate() {
            self.anchors.push((section.anchor, self.y));
            self.push(
                PageBlock::Divider {
                    section: index,
                    rect: Rect::new(0, self.y, self.width, DIVIDER_HEIGHT),
                },
                DIVIDER_HEIGHT,
            );
            self.y += BLOCK_GAP;
            match section.body {
                SectionBody::Hero => self.hero(),
                SectionBody::Cards(cards) => {
                    for card in cards {
                        let height = info_card_height(card, self.inner_width);
                        let rect = self.content_rect(height);
                        self.push(PageBlock::Info { card, rect }, height + BLOCK_GAP);
                    }
                }
                SectionBody::Projects => self.project_grid(),
                SectionBody::Contact => {
                    let height = 3 + self.profile.contacts.len() as u16;
                    let rect = self.content_rect(height);
                    self.push(PageBlock::Contact { rect }, height + BLOCK_GAP);
                }
            }
            self.y += BLOCK_GAP;
        }
        let rect = Rect::new(0, self.y, self.width, FOOTER_HEIGHT);
        self.push(PageBlock::Footer { rect }, FOOTER_HEIGHT);

        PageLayout {
            width: self.width,
            height: self.y,
            blocks: self.blocks,
            anchors: self.anchors,
            project_rects: self.project_rects,
            hero: self.hero,
        }
    }

    fn push(&mut self, block: PageBlock, advance: u16) {
        self.blocks.push(block);
        self.y = self.y.saturating_add(advance);
    }

    fn content_rect(&self, height: u16) -> Rect {
        Rect::new(MARGIN_X.min(self.width), self.y, self.inner_width, height)
    }

    /// Text on the left, cube on the right; cube below text when narrow.
    fn hero(&mut self) {
        let side_by_side = self.inner_width >= CUBE_MIN_WIDTH * 3;
        let text_width = if side_by_side {
            self.inner_width * 3 / 5
        } else {
            self.inner_width
        };
        let tagline = wrap_text(self.profile.tagline, text_width).len() as u16;
        // name, blank, tagline, blank, buttons
        let text_height = (4 + tagline + 1).max(HERO_TEXT_MIN_HEIGHT);
        let x = MARGIN_X.min(self.width);
        let text = Rect::new(x, self.y, text_width, text_height);

        let (cube, height) = if side_by_side {
            let cube_x = x + text_width + 2;
            let cube = Rect::new(
                cube_x,
                self.y,
                (x + self.inner_width).saturating_sub(cube_x),
                text_height,
            );
            (cube, text_height)
        } else {
            let cube_height = HERO_TEXT_MIN_HEIGHT;
            let cube = Rect::new(x, self.y + text_height, self.inner_width, cube_height);
            (cube, text_height + cube_height)
        };

        let button_row = self.y + 4 + tagline;
        let mut bx = x;
        let mut buttons = Vec::new();
        for button in HeroButton::ALL {
            let w = button.label().width() as u16;
            buttons.push((button, Rect::new(bx, button_row, w.min(text_width), 1)));
            bx = bx.saturating_add(w + 2);
        }

        self.hero = HeroSlots { text, cube, buttons };
        let rect = Rect::new(0, self.y, self.width, height);
        self.push(PageBlock::Hero { rect }, height + BLOCK_GAP);
    }

    fn project_grid(&mut self) {
        let columns: u16 = match self.inner_width {
            w if w >= 96 => 3,
            w if w >= 60 => 2,
            _ => 1,
        };
        let gutter = 2;
        let card_width = (self.inner_width.saturating_sub(gutter * (columns - 1)) / columns).max(1);
        for (index, _) in self.projects.iter().enumerate() {
            let col = index as u16 % columns;
            if index > 0 && col == 0 {
                self.y += PROJECT_CARD_HEIGHT + BLOCK_GAP;
            }
            let x = MARGIN_X.min(self.width) + col * (card_width + gutter);
            let rect = Rect::new(x, self.y, card_width, PROJECT_CARD_HEIGHT);
            self.project_rects.push(rect);
            self.blocks.push(PageBlock::Project { index, rect });
        }
        if !self.projects.is_empty() {
            self.y += PROJECT_CARD_HEIGHT + BLOCK_GAP;
        }
    }
}

/// Border, title, optional meta line, body and bullets.
pub fn info_card_height(card: &InfoCard, width: u16) -> u16 {
    let inner = width.saturating_sub(4).max(1);
    let mut rows = 2 + wrap_text(card.title, inner).len();
    if card.meta.is_some() {
        rows += 1;
    }
    if let Some(body) = card.body {
        rows += wrap_text(body, inner).len();
    }
    for bullet in card.bullets {
        rows += wrap_text(bullet, inner.saturating_sub(2).max(1)).len();
    }
    rows as u16
}

// ───────────────────────────────────────── text ──────────────

/// Greedy word wrap by display width.  Words wider than `width` are split.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if line_width > 0 && line_width + 1 + word_width <= width {
            line.push(' ');
            line.push_str(word);
            line_width += 1 + word_width;
            continue;
        }
        if line_width > 0 {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }
        if word_width <= width {
            line.push_str(word);
            line_width = word_width;
            continue;
        }
        for ch in word.chars() {
            let w = ch.width().unwrap_or(0);
            if line_width + w > width && line_width > 0 {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            line.push(ch);
            line_width += w;
        }
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}
