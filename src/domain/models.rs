use serde::{Deserialize, Serialize};

/// Identifier for one of the application's mutually-exclusive pages.
///
/// Exactly one page is current in steady state. Raw ids coming from
/// outside the type system (the persisted session fragment) go through
/// [`PageId::parse`], which rejects unrecognized names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageId {
    Welcome,
    Upload,
    About,
}

impl PageId {
    /// All known pages, in navigation-bar order.
    pub const ALL: [PageId; 3] = [PageId::Welcome, PageId::Upload, PageId::About];

    /// Parses a raw page id string.
    ///
    /// Returns `None` for unknown ids; callers decide whether that means
    /// "fall back to welcome" (startup) or "show nothing" (navigate).
    pub fn parse(raw: &str) -> Option<PageId> {
        match raw {
            "welcome" => Some(PageId::Welcome),
            "upload" => Some(PageId::Upload),
            "about" => Some(PageId::About),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PageId::Welcome => "welcome",
            PageId::Upload => "upload",
            PageId::About => "about",
        }
    }

    /// Human-readable label for the navigation bar.
    pub fn title(&self) -> &'static str {
        match self {
            PageId::Welcome => "Welcome",
            PageId::Upload => "Upload",
            PageId::About => "About",
        }
    }
}

/// One saved history entry, mirroring a browser `{ page: <id> }` state.
///
/// The entry created at load time carries no page (a browser's initial
/// entry has a null state); popping back onto it falls back to the
/// welcome page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub page: Option<PageId>,
}

impl HistoryEntry {
    pub fn initial() -> Self {
        Self { page: None }
    }

    pub fn of(page: PageId) -> Self {
        Self { page: Some(page) }
    }
}

/// A revocable handle that lets a selected file be rendered locally
/// without uploading it.
///
/// Handles are allocated by a [`PreviewRegistry`] and must be revoked
/// when the file is replaced or the workflow is reset; they are a scarce
/// resource and must not accumulate across repeated selections.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewRef {
    pub id: u64,
    pub locator: String,
}

/// Allocates preview handles and tracks which ones are still live.
///
/// The registry is the accounting half of the object-URL contract: every
/// `create` must eventually be paired with a `revoke`.
#[derive(Debug, Default)]
pub struct PreviewRegistry {
    next_id: u64,
    active: Vec<u64>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh preview handle for the named file.
    pub fn create(&mut self, file_name: &str) -> PreviewRef {
        self.next_id += 1;
        self.active.push(self.next_id);
        PreviewRef {
            id: self.next_id,
            locator: format!("preview://{}/{}", self.next_id, file_name),
        }
    }

    /// Releases a handle. Revoking an already-revoked handle is a no-op.
    pub fn revoke(&mut self, preview: &PreviewRef) {
        self.active.retain(|id| *id != preview.id);
    }

    /// Number of handles currently live.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

/// A file the user has chosen, together with its preview handle.
///
/// Owned by the lifecycle controller from the moment it is chosen until
/// it is replaced or the workflow is reset.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub preview: PreviewRef,
}
