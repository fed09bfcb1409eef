//! Cursor model shared by every navigable panel
//!
//! A [`Cursor`] is an index into a list whose length can change between
//! moves (lazy pagination appends items). Panels expose it through the
//! [`Navigable`] capability; a panel either implements the whole verb set
//! or none of it.

use super::mode::PanelId;

/// Items moved by `w`/`b`
pub const DEFAULT_WORD_STEP: usize = 3;
/// Items moved by `ctrl+d`/`ctrl+u`
pub const DEFAULT_HALF_PAGE_STEP: usize = 5;

/// Vertical direction of a multi-item move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
}

impl Heading {
    fn signed(self, step: usize) -> isize {
        let step = step as isize;
        match self {
            Heading::Up => -step,
            Heading::Down => step,
        }
    }
}

/// A single navigation verb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Down,
    Up,
    Top,
    Bottom,
    HalfPage(Heading),
    Word(Heading),
}

/// Step sizes for the multi-item verbs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavSteps {
    pub word: usize,
    pub half_page: usize,
}

impl Default for NavSteps {
    fn default() -> Self {
        Self {
            word: DEFAULT_WORD_STEP,
            half_page: DEFAULT_HALF_PAGE_STEP,
        }
    }
}

/// Cursor position and viewport of one panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    owner: PanelId,
    /// `None` is the empty-list sentinel
    index: Option<usize>,
    viewport_top: usize,
    viewport_height: usize,
    steps: NavSteps,
}

impl Cursor {
    pub fn new(owner: PanelId) -> Self {
        Self {
            owner,
            index: None,
            viewport_top: 0,
            viewport_height: 1,
            steps: NavSteps::default(),
        }
    }

    pub fn with_steps(mut self, steps: NavSteps) -> Self {
        self.steps = steps;
        self
    }

    pub fn owner(&self) -> PanelId {
        self.owner
    }

    pub fn steps(&self) -> NavSteps {
        self.steps
    }

    /// Current index, or `None` when the list is empty
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Current index, treating the sentinel as 0
    pub fn position(&self) -> usize {
        self.index.unwrap_or(0)
    }

    /// Whether the cursor marker belongs on `index`.
    ///
    /// Derived from the single stored index, so at most one item is marked.
    pub fn is_at(&self, index: usize) -> bool {
        self.index == Some(index)
    }

    pub fn viewport_top(&self) -> usize {
        self.viewport_top
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// Move to `target` clamped into `[0, len - 1]`, then scroll it into view.
    /// Returns true if the index changed.
    pub fn place(&mut self, target: usize, len: usize) -> bool {
        let before = self.index;
        self.index = if len == 0 {
            None
        } else {
            Some(target.min(len - 1))
        };
        self.scroll_into_view();
        before != self.index
    }

    /// Re-clamp after the list changed length without a move
    pub fn sync_len(&mut self, len: usize) {
        let target = self.position();
        self.place(target, len);
    }

    /// Back to the first item (used on mount and focus)
    pub fn reset(&mut self, len: usize) {
        self.viewport_top = 0;
        self.place(0, len);
    }

    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height.max(1);
        self.scroll_into_view();
    }

    /// Scroll the viewport without moving the cursor (mouse wheel).
    /// Returns the number of items still hidden below the viewport.
    pub fn scroll_viewport(&mut self, delta: isize, len: usize) -> usize {
        let max_top = len.saturating_sub(self.viewport_height);
        let top = self.viewport_top as isize + delta;
        self.viewport_top = top.clamp(0, max_top as isize) as usize;
        len.saturating_sub(self.viewport_top + self.viewport_height)
    }

    fn scroll_into_view(&mut self) {
        let Some(index) = self.index else {
            self.viewport_top = 0;
            return;
        };
        if index < self.viewport_top {
            self.viewport_top = index;
        } else if index >= self.viewport_top + self.viewport_height {
            self.viewport_top = index + 1 - self.viewport_height;
        }
    }
}

/// Capability implemented by panels that accept the vim verb set.
///
/// `item_count` is consulted on every move, since items may have been
/// appended since the previous one.
pub trait Navigable {
    fn item_count(&self) -> usize;
    fn cursor(&self) -> &Cursor;
    fn cursor_mut(&mut self) -> &mut Cursor;

    /// Runs after every move that actually reached the cursor
    fn cursor_moved(&mut self) {}

    fn move_to(&mut self, target: usize) {
        let len = self.item_count();
        if len == 0 {
            return;
        }
        self.cursor_mut().place(target, len);
        self.cursor_moved();
    }

    fn move_by(&mut self, delta: isize) {
        let len = self.item_count();
        if len == 0 {
            return;
        }
        let current = self.cursor().position() as isize;
        let target = (current + delta).clamp(0, len as isize - 1) as usize;
        self.move_to(target);
    }

    fn move_to_top(&mut self) {
        self.move_to(0);
    }

    fn move_to_bottom(&mut self) {
        let len = self.item_count();
        if len > 0 {
            self.move_to(len - 1);
        }
    }

    fn move_half_page(&mut self, heading: Heading) {
        let step = self.cursor().steps().half_page;
        self.move_by(heading.signed(step));
    }

    fn move_word(&mut self, heading: Heading) {
        let step = self.cursor().steps().word;
        self.move_by(heading.signed(step));
    }

    fn apply(&mut self, verb: Verb) {
        match verb {
            Verb::Down => self.move_by(1),
            Verb::Up => self.move_by(-1),
            Verb::Top => self.move_to_top(),
            Verb::Bottom => self.move_to_bottom(),
            Verb::HalfPage(h) => self.move_half_page(h),
            Verb::Word(h) => self.move_word(h),
        }
    }
}
