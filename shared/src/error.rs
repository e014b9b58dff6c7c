use thiserror::Error;

/// Bad input caught before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("Selected file is empty")]
    EmptyPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Drawing surface has no strokes")]
    EmptySurface,
    #[error("Failed to encode drawing: {0}")]
    Encode(String),
}

/// Readiness check failed at submission time. No request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionBlockedError {
    #[error("No file selected")]
    NoFileSelected,
    #[error("Drawing is not finished: {0}")]
    EmptyDrawing(#[source] CaptureError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server error: {status} - {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictionError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
