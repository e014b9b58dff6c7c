use crate::canvas::CanvasCapture;
use crate::config::PipelineConfig;
use crate::error::SubmissionBlockedError;
use crate::payload::ImagePayload;
use crate::upload::FileCapture;
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum CaptureMode {
    #[default]
    Upload,
    Draw,
}

/// Picks the one active capture path and turns it into a payload.
#[derive(Debug, Clone)]
pub struct InputNormalizer {
    mode: CaptureMode,
    upload: FileCapture,
    canvas: CanvasCapture,
}

impl InputNormalizer {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            mode: CaptureMode::default(),
            upload: FileCapture::default(),
            canvas: CanvasCapture::new(&config.canvas, config.policy.empty_drawing),
        }
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    pub fn upload(&self) -> &FileCapture {
        &self.upload
    }

    pub fn upload_mut(&mut self) -> &mut FileCapture {
        &mut self.upload
    }

    pub fn canvas(&self) -> &CanvasCapture {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut CanvasCapture {
        &mut self.canvas
    }

    /// Returns false if `mode` was already active. Leaving upload mode drops
    /// the selected file and its preview; the drawing survives a switch.
    pub fn switch_mode(&mut self, mode: CaptureMode) -> bool {
        if self.mode == mode {
            return false;
        }
        if self.mode == CaptureMode::Upload {
            self.upload.discard();
        }
        log::info!("Capture mode: {} -> {}", self.mode, mode);
        self.mode = mode;
        true
    }

    /// Derives the payload from the active path. Called once per submission
    /// and never cached.
    pub fn build_payload(&self) -> Result<ImagePayload, SubmissionBlockedError> {
        match self.mode {
            CaptureMode::Upload => self
                .upload
                .payload()
                .cloned()
                .ok_or(SubmissionBlockedError::NoFileSelected),
            CaptureMode::Draw => self
                .canvas
                .export()
                .map_err(SubmissionBlockedError::EmptyDrawing),
        }
    }
}
