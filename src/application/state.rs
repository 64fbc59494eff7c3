//! Application state for the deblurring client.
//!
//! [`App`] wires the two domain controllers together: the navigator
//! decides which page is visible, the lifecycle drives the upload
//! workflow. The lifecycle's effect lists are applied here to a plain
//! [`UiSurface`] of visibility/enablement flags, and the effects that
//! need infrastructure (upload, save, clipboard) become [`Command`]s the
//! main loop executes. Tests drive the whole application through this
//! type without a terminal or a server.

use crate::domain::{
    Effect, Lifecycle, LifecycleEvent, Navigator, PageId, PreviewRegistry, SelectedFile,
    UploadError,
};

/// Server base used when neither the CLI argument nor the environment
/// provides one.
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

/// Represents the current input mode of the application.
#[derive(Debug, PartialEq)]
pub enum AppMode {
    /// Normal mode - page navigation and workflow shortcuts
    Normal,
    /// The file picker prompt is open
    PickFile,
    /// Help screen is displayed
    Help,
}

/// The set of affordances the renderer consults: what is visible, what
/// is enabled, what the two image slots point at.
///
/// This is the "document" the lifecycle effects mutate; the renderer
/// only reads it.
#[derive(Debug, PartialEq)]
pub struct UiSurface {
    pub preview_visible: bool,
    /// Source of the original-image slot (the preview locator)
    pub original_source: Option<String>,
    /// Source of the deblurred-image slot, also the download target
    pub result_source: Option<String>,
    /// Error banner text; the banner is hidden when `None`
    pub error_message: Option<String>,
    pub submit_enabled: bool,
    /// Progress indicator shown while the upload is in flight
    pub busy: bool,
    pub download_visible: bool,
    /// Drop-zone highlight while a drag hovers over it
    pub drag_active: bool,
}

impl Default for UiSurface {
    fn default() -> Self {
        Self {
            preview_visible: false,
            original_source: None,
            result_source: None,
            error_message: None,
            submit_enabled: true,
            busy: false,
            download_visible: false,
            drag_active: false,
        }
    }
}

/// Infrastructure work requested by a transition, executed by the main
/// loop outside the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Issue the one multipart request to the processing endpoint
    Upload { file: SelectedFile, token: u64 },
    /// Save the produced image locally under a fixed filename
    SaveResult { locator: String, filename: String },
    /// Copy the result locator to the system clipboard
    CopyResult(String),
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    pub navigator: Navigator,
    pub lifecycle: Lifecycle,
    pub previews: PreviewRegistry,
    pub ui: UiSurface,
    pub mode: AppMode,
    /// Server base URL, shown in the header
    pub server: String,
    /// Input buffer for the file picker prompt
    pub path_input: String,
    /// Cursor position within the input buffer
    pub cursor_position: usize,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    pending: Vec<Command>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Navigator::default(), DEFAULT_SERVER.to_string())
    }
}

impl App {
    pub fn new(navigator: Navigator, server: String) -> Self {
        Self {
            navigator,
            lifecycle: Lifecycle::new(),
            previews: PreviewRegistry::new(),
            ui: UiSurface::default(),
            mode: AppMode::Normal,
            server,
            path_input: String::new(),
            cursor_position: 0,
            help_scroll: 0,
            status_message: None,
            pending: Vec::new(),
        }
    }

    /// Takes the infrastructure commands produced since the last call.
    pub fn drain_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending)
    }

    /// Whether the upload workflow's controls are reachable. They are
    /// exactly when the upload page is the one showing.
    pub fn upload_page_active(&self) -> bool {
        self.navigator.visible() == Some(PageId::Upload)
    }

    // --- navigation ---

    pub fn navigate(&mut self, page: PageId, record_history: bool) {
        self.navigator.navigate(page, record_history);
        self.status_message = None;
    }

    /// The "Get Started" trigger: an alias that always targets the
    /// upload page.
    pub fn get_started(&mut self) {
        self.navigate(PageId::Upload, true);
    }

    pub fn go_back(&mut self) {
        self.navigator.go_back();
        self.status_message = None;
    }

    pub fn go_forward(&mut self) {
        self.navigator.go_forward();
        self.status_message = None;
    }

    // --- upload workflow ---

    /// Manual file choice (click-to-browse analogue).
    pub fn choose_file(&mut self, name: &str, bytes: Vec<u8>) {
        // The previous handle is revoked before its replacement is
        // allocated, so handles never accumulate
        if let Some(previous) = self.lifecycle.selected_file().map(|f| f.preview.clone()) {
            self.previews.revoke(&previous);
        }
        let preview = self.previews.create(name);
        self.dispatch(LifecycleEvent::FileChosen(SelectedFile {
            name: name.to_string(),
            bytes,
            preview,
        }));
    }

    pub fn on_drag_enter(&mut self) {
        self.dispatch(LifecycleEvent::DragEntered);
    }

    pub fn on_drag_leave(&mut self) {
        self.dispatch(LifecycleEvent::DragLeft);
    }

    /// A drop behaves exactly like a manual file choice.
    pub fn on_drop(&mut self, name: &str, bytes: Vec<u8>) {
        self.choose_file(name, bytes);
    }

    pub fn submit(&mut self) {
        self.dispatch(LifecycleEvent::SubmitRequested);
    }

    /// Applies an upload completion delivered by the worker thread.
    pub fn finish_upload(&mut self, token: u64, outcome: Result<String, UploadError>) {
        self.dispatch(LifecycleEvent::UploadFinished { token, outcome });
    }

    pub fn download(&mut self) {
        self.dispatch(LifecycleEvent::DownloadRequested);
    }

    pub fn copy_result(&mut self) {
        self.dispatch(LifecycleEvent::CopyResultRequested);
    }

    pub fn reset(&mut self) {
        self.dispatch(LifecycleEvent::ResetRequested);
    }

    fn dispatch(&mut self, event: LifecycleEvent) {
        let effects = self.lifecycle.apply(event);
        self.apply_effects(effects);
    }

    /// The thin adapter: replays a transition's effect list onto the UI
    /// surface and queues the infrastructure commands.
    fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SetOriginalSource(source) => self.ui.original_source = source,
                Effect::SetResultSource(source) => self.ui.result_source = source,
                Effect::ShowPreviewPane => self.ui.preview_visible = true,
                Effect::HidePreviewPane => self.ui.preview_visible = false,
                Effect::ShowError(message) => self.ui.error_message = Some(message),
                Effect::HideError => self.ui.error_message = None,
                Effect::SetSubmitEnabled(enabled) => self.ui.submit_enabled = enabled,
                Effect::SetBusy(busy) => self.ui.busy = busy,
                Effect::ShowDownload => self.ui.download_visible = true,
                Effect::HideDownload => self.ui.download_visible = false,
                Effect::SetDragActive(active) => self.ui.drag_active = active,
                Effect::RevokePreview(preview) => self.previews.revoke(&preview),
                Effect::StartUpload { file, token } => {
                    self.pending.push(Command::Upload { file, token })
                }
                Effect::SaveResult { locator, filename } => {
                    self.pending.push(Command::SaveResult { locator, filename })
                }
                Effect::CopyResult(locator) => self.pending.push(Command::CopyResult(locator)),
            }
        }
    }

    /// Surfaces a failed file pick on the error banner. Not a lifecycle
    /// transition: the selection simply did not happen.
    pub fn report_pick_failure(&mut self, path: &str, error: &str) {
        self.ui.error_message = Some(format!("Could not read {}: {}", path, error));
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    // --- input modes ---

    /// Opens the file picker prompt (the click-to-browse analogue).
    pub fn start_pick_file(&mut self) {
        self.mode = AppMode::PickFile;
        self.path_input.clear();
        self.cursor_position = 0;
        self.status_message = None;
    }

    /// Cancels the file picker prompt and returns to normal mode.
    pub fn cancel_pick_file(&mut self) {
        self.mode = AppMode::Normal;
        self.path_input.clear();
        self.cursor_position = 0;
    }

    pub fn open_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }
}
