use crate::error::ValidationError;
use crate::payload::{ImagePayload, RawFile, is_image_type};

/// Holds the most recently selected image file and its preview.
///
/// Each accepted selection gets a new id so a preview produced for an older
/// selection can be told apart and dropped.
#[derive(Debug, Clone, Default)]
pub struct FileCapture {
    selected: Option<Selection>,
    next_id: u64,
}

#[derive(Debug, Clone)]
struct Selection {
    id: u64,
    payload: ImagePayload,
    preview: Option<String>,
}

impl FileCapture {
    /// Validates and stores `raw`. A rejected file leaves the current
    /// selection untouched.
    pub fn select(&mut self, raw: RawFile) -> Result<ImagePayload, ValidationError> {
        if !is_image_type(&raw.content_type) {
            log::warn!("Rejected non-image file: {} ({})", raw.name, raw.content_type);
            return Err(ValidationError::UnsupportedType(raw.content_type));
        }
        if raw.bytes.is_empty() {
            log::warn!("Rejected empty file: {}", raw.name);
            return Err(ValidationError::EmptyPayload);
        }

        self.next_id += 1;
        let payload = ImagePayload::new(raw.bytes, raw.name, raw.content_type);
        self.selected = Some(Selection {
            id: self.next_id,
            payload: payload.clone(),
            preview: None,
        });
        Ok(payload)
    }

    /// Id of the current selection, used to match an async preview.
    pub fn selection_id(&self) -> Option<u64> {
        self.selected.as_ref().map(|s| s.id)
    }

    pub fn payload(&self) -> Option<&ImagePayload> {
        self.selected.as_ref().map(|s| &s.payload)
    }

    pub fn preview(&self) -> Option<&str> {
        self.selected.as_ref().and_then(|s| s.preview.as_deref())
    }

    /// Returns false if `selection_id` is no longer current.
    pub fn attach_preview(&mut self, selection_id: u64, preview: String) -> bool {
        match self.selected.as_mut() {
            Some(selection) if selection.id == selection_id => {
                selection.preview = Some(preview);
                true
            }
            _ => false,
        }
    }

    pub fn discard(&mut self) {
        self.selected = None;
    }
}
