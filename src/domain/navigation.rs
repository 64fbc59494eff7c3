//! Page navigation with browser-style history.
//!
//! The navigator tracks which of the fixed set of pages is visible and
//! keeps a back/forward history of `{ page }` entries in sync. The one
//! rule that prevents an infinite push/pop loop: transitions that
//! originate from a back/forward event re-enter through
//! `navigate(page, record_history = false)` and never push an entry.

use super::models::{HistoryEntry, PageId};

/// Tracks the current page and the history of visited pages.
#[derive(Debug)]
pub struct Navigator {
    /// The current page id. Unchanged by unknown-id navigation.
    current: PageId,
    /// The page actually shown. `None` only after navigating to an
    /// unknown id, in which case every page is hidden.
    visible: Option<PageId>,
    /// Entry the session is currently on.
    entry: HistoryEntry,
    back: Vec<HistoryEntry>,
    forward: Vec<HistoryEntry>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Navigator {
    /// Builds the navigator from the raw page id saved by a previous
    /// session (the location-fragment analogue).
    ///
    /// Absent or unrecognized ids fall back to the welcome page, and the
    /// first render records no history entry, so startup never creates a
    /// spurious entry to go "back" to.
    pub fn new(initial: Option<&str>) -> Self {
        let page = initial.and_then(PageId::parse).unwrap_or(PageId::Welcome);
        Self {
            current: page,
            visible: Some(page),
            entry: HistoryEntry::initial(),
            back: Vec::new(),
            forward: Vec::new(),
        }
    }

    /// Shows exactly `page`, hiding every other page.
    ///
    /// With `record_history` a new `{ page }` entry is pushed and the
    /// forward stack is cleared, exactly like a browser `pushState`.
    /// Back/forward re-entry and startup pass `false`.
    pub fn navigate(&mut self, page: PageId, record_history: bool) {
        self.current = page;
        self.visible = Some(page);

        if record_history {
            let previous = std::mem::replace(&mut self.entry, HistoryEntry::of(page));
            self.back.push(previous);
            self.forward.clear();
        }
    }

    /// Navigates by raw id.
    ///
    /// Unknown ids hide every page without recording history and without
    /// failing; the current page id is left as it was.
    pub fn navigate_raw(&mut self, raw: &str, record_history: bool) {
        match PageId::parse(raw) {
            Some(page) => self.navigate(page, record_history),
            None => self.visible = None,
        }
    }

    /// Back-button analogue of a browser popstate event.
    ///
    /// Pops the previous entry, reads the page from its saved state
    /// (falling back to welcome for the stateless initial entry) and
    /// re-enters through `navigate(page, false)`. Returns `false` when
    /// there is nothing to go back to.
    pub fn go_back(&mut self) -> bool {
        match self.back.pop() {
            Some(previous) => {
                let left = std::mem::replace(&mut self.entry, previous);
                self.forward.push(left);
                let page = self.entry.page.unwrap_or(PageId::Welcome);
                self.navigate(page, false);
                true
            }
            None => false,
        }
    }

    /// Forward-button analogue; the mirror of [`Navigator::go_back`].
    pub fn go_forward(&mut self) -> bool {
        match self.forward.pop() {
            Some(next) => {
                let left = std::mem::replace(&mut self.entry, next);
                self.back.push(left);
                let page = self.entry.page.unwrap_or(PageId::Welcome);
                self.navigate(page, false);
                true
            }
            None => false,
        }
    }

    pub fn current(&self) -> PageId {
        self.current
    }

    pub fn visible(&self) -> Option<PageId> {
        self.visible
    }

    /// Whether a navigation trigger targeting `target` should be marked
    /// active. Exactly the triggers matching the visible page are.
    pub fn is_active(&self, target: PageId) -> bool {
        self.visible == Some(target)
    }

    /// The location-fragment analogue shown in the header and persisted
    /// between sessions.
    pub fn fragment(&self) -> String {
        format!("#{}", self.current.as_str())
    }

    /// Total number of history entries, counting the one the session is
    /// currently on.
    pub fn history_len(&self) -> usize {
        self.back.len() + self.forward.len() + 1
    }
}
