pub mod animation;
pub mod canvas;
pub mod client;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod notice;
pub mod payload;
pub mod risk;
pub mod session;
pub mod testing;
pub mod upload;

use serde::{Deserialize, Serialize};

pub use animation::{Animation, AnimationHandle, Animator, Scheduler};
pub use canvas::{CanvasCapture, DrawingSurface, Point, Stroke};
pub use client::{MultipartForm, PredictionClient, PredictionResult, Transport, TransportResponse};
pub use config::PipelineConfig;
pub use normalizer::{CaptureMode, InputNormalizer};
pub use notice::{Notice, NoticeLevel};
pub use payload::{ImagePayload, RawFile};
pub use risk::RiskBand;
pub use session::{Event, PreviewJob, Reaction, Session, Submission};

/// Body of `POST /predict`. `probability` is kept loose so a non-string
/// value can be reported instead of failing deserialization outright.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PredictResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub probability: Option<serde_json::Value>,
}

/// Body of `GET /status`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StatusResponse {
    pub status: String,
}
