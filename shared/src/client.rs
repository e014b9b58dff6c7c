//! Talks to the classification service.

use crate::config::ServiceConfig;
use crate::error::{PredictionError, TransportError};
use crate::payload::ImagePayload;
use crate::{PredictResponse, StatusResponse};

/// Single-file multipart body, rendered by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartForm {
    pub field_name: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MultipartForm {
    pub fn new(field_name: impl Into<String>, payload: ImagePayload) -> Self {
        Self {
            field_name: field_name.into(),
            file_name: payload.file_name,
            content_type: payload.content_type,
            bytes: payload.bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One HTTP exchange per call. Implementations must not retry.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_multipart(
        &self,
        url: &str,
        form: MultipartForm,
    ) -> Result<TransportResponse, TransportError>;

    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError>;
}

/// Risk percentage as reported by the service, unclamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult(f64);

impl PredictionResult {
    pub fn value(self) -> f64 {
        self.0
    }
}

pub struct PredictionClient<T> {
    transport: T,
    predict_url: String,
    status_url: String,
    field_name: String,
}

impl<T: Transport> PredictionClient<T> {
    pub fn new(transport: T, service: &ServiceConfig) -> Self {
        Self {
            transport,
            predict_url: service.predict_url(),
            status_url: service.status_url(),
            field_name: service.field_name.clone(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn submit(&self, payload: ImagePayload) -> Result<PredictionResult, PredictionError> {
        log::info!(
            "Submitting {} ({}, {} bytes) to {}",
            payload.file_name,
            payload.content_type,
            payload.len(),
            self.predict_url
        );
        let form = MultipartForm::new(self.field_name.as_str(), payload);
        let response = self.transport.post_multipart(&self.predict_url, form).await?;
        ensure_success(&response)?;

        let result = parse_prediction_body(&response.body)?;
        log::info!("Service reported probability {:.2}%", result.value());
        Ok(result)
    }

    /// Asks the service whether it is up. Returns its status string.
    pub async fn status(&self) -> Result<String, PredictionError> {
        let response = self.transport.get(&self.status_url).await?;
        ensure_success(&response)?;
        let status: StatusResponse = serde_json::from_str(&response.body)
            .map_err(|e| PredictionError::MalformedResponse(format!("invalid status body: {}", e)))?;
        Ok(status.status)
    }
}

fn ensure_success(response: &TransportResponse) -> Result<(), TransportError> {
    if response.is_success() {
        Ok(())
    } else {
        log::error!("Service answered with status {}", response.status);
        Err(TransportError::Status {
            status: response.status,
            body: response.body.clone(),
        })
    }
}

pub fn parse_prediction_body(body: &str) -> Result<PredictionResult, PredictionError> {
    let response: PredictResponse = serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse prediction response: {}", e);
        PredictionError::MalformedResponse(format!("invalid JSON: {}", e))
    })?;

    if let Some(status) = &response.status {
        log::debug!("Prediction status: {}", status);
    }

    let raw = response
        .probability
        .ok_or_else(|| PredictionError::MalformedResponse("missing probability field".into()))?;
    let text = raw.as_str().ok_or_else(|| {
        PredictionError::MalformedResponse(format!("probability is not a string: {}", raw))
    })?;
    parse_percentage(text).map(PredictionResult)
}

/// Parses `"73.50%"` style strings. The trailing `%` is optional.
pub fn parse_percentage(text: &str) -> Result<f64, PredictionError> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    let value: f64 = number.parse().map_err(|_| {
        log::error!("Unparsable probability: {:?}", text);
        PredictionError::MalformedResponse(format!("unparsable probability: {:?}", text))
    })?;

    if !value.is_finite() {
        log::error!("Non-finite probability: {:?}", text);
        return Err(PredictionError::MalformedResponse(format!(
            "non-finite probability: {:?}",
            text
        )));
    }
    Ok(value)
}
