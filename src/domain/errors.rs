/// Failure taxonomy for the upload/process workflow.
///
/// Every variant is recoverable: the controller returns to a stable,
/// interactive configuration after surfacing the message, and the user
/// may simply resubmit.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadError {
    /// Submit was requested with no file selected. Caught synchronously,
    /// before any network call is issued.
    NoFileSelected,
    /// The endpoint answered with a non-success status. Surfaced with a
    /// fixed message regardless of the exact status code.
    ProcessingFailed,
    /// The request never completed (network unreachable, aborted, bad
    /// response body). Carries the underlying failure's own text.
    Transport(String),
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::NoFileSelected => {
                write!(f, "Please upload an image first.")
            }
            UploadError::ProcessingFailed => {
                write!(f, "Image processing failed.")
            }
            UploadError::Transport(msg) => {
                write!(f, "{}", msg)
            }
        }
    }
}

impl std::error::Error for UploadError {}
