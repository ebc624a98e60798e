use std::fmt;
use thiserror::Error;

/// Device permission the acquisition pipeline may be refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Camera,
    PhotoLibrary,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permission::Camera => write!(f, "camera"),
            Permission::PhotoLibrary => write!(f, "photo library"),
        }
    }
}

/// Everything this crate can fail with. All variants are per-request and
/// recoverable by resubmission; none leaves the orchestrator in a partial
/// state.
#[derive(Debug, Error)]
pub enum Error {
    #[error("prompt must not be empty")]
    EmptyPrompt,
    #[error("a style must be selected")]
    MissingStyle,
    #[error("{0} permission denied")]
    PermissionDenied(Permission),
    #[error("image acquisition failed: {0}")]
    Acquisition(String),
    #[error("image encoding failed: {0}")]
    Encoding(String),
    #[error("generation failed: {0}")]
    Generation(String),
    #[error("a generation request is already in flight")]
    RequestInFlight,
    #[error("export failed: {0}")]
    Export(String),
}

impl Error {
    /// True for the two precondition failures `submit` checks before
    /// touching the state machine.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::EmptyPrompt | Error::MissingStyle)
    }
}
