use crate::error::{PredictionError, SubmissionBlockedError, ValidationError};
use strum_macros::Display;

/// One-shot message for the user. The core decides which one fires, the
/// view decides how it looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Notice {
    UnsupportedFileType,
    UploadFailed,
    NoFileSelected,
    DrawingNotFinished,
    Processed,
    ProbabilityParseFailed,
    SubmissionFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::UnsupportedFileType => "Only image files are allowed!",
            Notice::UploadFailed => "Image upload failed. Please try again.",
            Notice::NoFileSelected => "Please select an image before requesting a prediction!",
            Notice::DrawingNotFinished => "Finish the drawing before requesting a prediction!",
            Notice::Processed => "The image was processed successfully!",
            Notice::ProbabilityParseFailed => "Could not read the probability from the response.",
            Notice::SubmissionFailed => "Failed to process the image!",
        }
    }

    pub fn level(self) -> NoticeLevel {
        match self {
            Notice::Processed => NoticeLevel::Success,
            _ => NoticeLevel::Error,
        }
    }
}

impl From<&ValidationError> for Notice {
    fn from(err: &ValidationError) -> Self {
        match err {
            ValidationError::UnsupportedType(_) => Notice::UnsupportedFileType,
            ValidationError::EmptyPayload => Notice::UploadFailed,
        }
    }
}

impl From<&SubmissionBlockedError> for Notice {
    fn from(err: &SubmissionBlockedError) -> Self {
        match err {
            SubmissionBlockedError::NoFileSelected => Notice::NoFileSelected,
            SubmissionBlockedError::EmptyDrawing(_) => Notice::DrawingNotFinished,
        }
    }
}

impl From<&PredictionError> for Notice {
    fn from(err: &PredictionError) -> Self {
        match err {
            PredictionError::Transport(_) => Notice::SubmissionFailed,
            PredictionError::MalformedResponse(_) => Notice::ProbabilityParseFailed,
        }
    }
}
