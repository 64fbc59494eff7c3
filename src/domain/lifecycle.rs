//! The upload/process/result lifecycle.
//!
//! The controller is a state machine over `Idle -> Previewing ->
//! Processing -> Ready | Failed`, written as a pure transition function:
//! current state + event in, next state + side-effect list out. The
//! effect list is applied by the application layer, which keeps every
//! transition unit-testable without a terminal or a server.
//!
//! Entering `Processing` disables the submit control and shows the
//! progress indicator; every transition out of `Processing` (success,
//! failure, replacement or reset) emits the paired release effects, so
//! the busy state can never be left dangling.

use super::errors::UploadError;
use super::models::{PreviewRef, SelectedFile};

/// Fixed name used when saving the produced image locally.
pub const DOWNLOAD_FILENAME: &str = "enhanced_image.png";

/// Phase of the select -> process -> result workflow.
///
/// The state carries its own data, so the invariants hold by
/// construction: a result locator exists exactly in `Ready`, and a
/// selected file exists in every state except `Idle` (and except the
/// failure produced by submitting with no file).
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleState {
    Idle,
    Previewing {
        file: SelectedFile,
    },
    Processing {
        file: SelectedFile,
        /// Request token; completions carrying any other token are stale
        /// and get dropped.
        token: u64,
    },
    Ready {
        file: SelectedFile,
        result: String,
    },
    Failed {
        file: Option<SelectedFile>,
        message: String,
    },
}

impl LifecycleState {
    /// The currently selected file, in whatever phase owns one.
    pub fn selected_file(&self) -> Option<&SelectedFile> {
        match self {
            LifecycleState::Idle => None,
            LifecycleState::Previewing { file } => Some(file),
            LifecycleState::Processing { file, .. } => Some(file),
            LifecycleState::Ready { file, .. } => Some(file),
            LifecycleState::Failed { file, .. } => file.as_ref(),
        }
    }

    /// The result locator, present iff the workflow is `Ready`.
    pub fn result(&self) -> Option<&str> {
        match self {
            LifecycleState::Ready { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, LifecycleState::Processing { .. })
    }
}

/// User actions and upload completions driving the lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    /// A file was chosen, via the picker or a drop. The caller revokes
    /// the previous preview handle before allocating this one.
    FileChosen(SelectedFile),
    SubmitRequested,
    /// The in-flight upload finished. `token` identifies which request
    /// this completion belongs to.
    UploadFinished {
        token: u64,
        outcome: Result<String, UploadError>,
    },
    DownloadRequested,
    CopyResultRequested,
    ResetRequested,
    DragEntered,
    DragLeft,
}

/// Presentation and infrastructure work requested by a transition.
///
/// Pure description only; the application layer applies these to the UI
/// surface and forwards the infrastructure ones to the main loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SetOriginalSource(Option<String>),
    SetResultSource(Option<String>),
    ShowPreviewPane,
    HidePreviewPane,
    ShowError(String),
    HideError,
    SetSubmitEnabled(bool),
    SetBusy(bool),
    ShowDownload,
    HideDownload,
    SetDragActive(bool),
    RevokePreview(PreviewRef),
    StartUpload { file: SelectedFile, token: u64 },
    SaveResult { locator: String, filename: String },
    CopyResult(String),
}

/// Owns the lifecycle state and the request-token counter.
#[derive(Debug)]
pub struct Lifecycle {
    state: LifecycleState,
    generation: u64,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            state: LifecycleState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &LifecycleState {
        &self.state
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.state.selected_file()
    }

    /// Runs one transition and returns the effects to apply.
    pub fn apply(&mut self, event: LifecycleEvent) -> Vec<Effect> {
        let state = std::mem::replace(&mut self.state, LifecycleState::Idle);
        let (next, effects) = transition(state, event, &mut self.generation);
        self.state = next;
        effects
    }
}

/// The transition table. Unexpected (state, event) pairs leave the state
/// unchanged and produce no effects.
fn transition(
    state: LifecycleState,
    event: LifecycleEvent,
    generation: &mut u64,
) -> (LifecycleState, Vec<Effect>) {
    use LifecycleEvent::*;
    use LifecycleState::*;

    match (state, event) {
        // Choosing a file from any phase replaces the selection. When it
        // interrupts an in-flight request the busy indicators are
        // released here; the eventual completion is stale and dropped.
        (state, FileChosen(file)) => {
            let was_processing = state.is_processing();
            let mut effects = vec![
                Effect::SetOriginalSource(Some(file.preview.locator.clone())),
                Effect::SetResultSource(None),
                Effect::ShowPreviewPane,
                Effect::HideError,
                Effect::HideDownload,
                Effect::SetDragActive(false),
            ];
            if was_processing {
                effects.push(Effect::SetBusy(false));
                effects.push(Effect::SetSubmitEnabled(true));
            }
            (Previewing { file }, effects)
        }

        (Previewing { file }, SubmitRequested) => begin_processing(file, generation, false),
        (Failed { file: Some(file), .. }, SubmitRequested) => {
            begin_processing(file, generation, false)
        }
        // Running it again from Ready drops the previous result first
        (Ready { file, .. }, SubmitRequested) => begin_processing(file, generation, true),
        // Submit with nothing selected: synchronous failure, no network
        (Idle, SubmitRequested) | (Failed { file: None, .. }, SubmitRequested) => {
            let message = UploadError::NoFileSelected.to_string();
            (
                Failed {
                    file: None,
                    message: message.clone(),
                },
                vec![Effect::ShowError(message)],
            )
        }
        // The submit control is disabled while processing; ignore
        (state @ Processing { .. }, SubmitRequested) => (state, Vec::new()),

        (Processing { file, token }, UploadFinished { token: finished, outcome })
            if finished == token =>
        {
            match outcome {
                Ok(locator) => (
                    Ready {
                        file,
                        result: locator.clone(),
                    },
                    vec![
                        Effect::SetResultSource(Some(locator)),
                        Effect::ShowDownload,
                        Effect::SetBusy(false),
                        Effect::SetSubmitEnabled(true),
                    ],
                ),
                Err(err) => {
                    let message = err.to_string();
                    (
                        Failed {
                            file: Some(file),
                            message: message.clone(),
                        },
                        vec![
                            Effect::ShowError(message),
                            Effect::SetBusy(false),
                            Effect::SetSubmitEnabled(true),
                        ],
                    )
                }
            }
        }
        // Completion for a request that is no longer current
        (state, UploadFinished { .. }) => (state, Vec::new()),

        (state @ Ready { .. }, DownloadRequested) => {
            let locator = state
                .result()
                .map(str::to_string)
                .unwrap_or_default();
            let effects = vec![Effect::SaveResult {
                locator,
                filename: DOWNLOAD_FILENAME.to_string(),
            }];
            (state, effects)
        }
        (state, DownloadRequested) => (state, Vec::new()),

        (state @ Ready { .. }, CopyResultRequested) => {
            let locator = state
                .result()
                .map(str::to_string)
                .unwrap_or_default();
            (state, vec![Effect::CopyResult(locator)])
        }
        (state, CopyResultRequested) => (state, Vec::new()),

        (Idle, ResetRequested) => (Idle, Vec::new()),
        (state, ResetRequested) => {
            let mut effects = vec![
                Effect::HidePreviewPane,
                Effect::SetOriginalSource(None),
                Effect::SetResultSource(None),
                Effect::HideDownload,
                Effect::HideError,
            ];
            if let Some(file) = state.selected_file() {
                effects.push(Effect::RevokePreview(file.preview.clone()));
            }
            if state.is_processing() {
                effects.push(Effect::SetBusy(false));
                effects.push(Effect::SetSubmitEnabled(true));
            }
            (Idle, effects)
        }

        (state, DragEntered) => (state, vec![Effect::SetDragActive(true)]),
        (state, DragLeft) => (state, vec![Effect::SetDragActive(false)]),
    }
}

fn begin_processing(
    file: SelectedFile,
    generation: &mut u64,
    leaving_ready: bool,
) -> (LifecycleState, Vec<Effect>) {
    *generation += 1;
    let token = *generation;
    let mut effects = Vec::new();
    if leaving_ready {
        effects.push(Effect::SetResultSource(None));
        effects.push(Effect::HideDownload);
    }
    effects.push(Effect::SetSubmitEnabled(false));
    effects.push(Effect::SetBusy(true));
    effects.push(Effect::StartUpload {
        file: file.clone(),
        token,
    });
    (LifecycleState::Processing { file, token }, effects)
}
