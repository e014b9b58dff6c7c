use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub const IMAGE_TYPE_PREFIX: &str = "image/";
pub const PNG_CONTENT_TYPE: &str = "image/png";

/// Image bytes plus the metadata sent along with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

/// A file as handed over by the picker, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
            content_type: content_type.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.bytes))
    }
}

pub fn is_image_type(content_type: &str) -> bool {
    content_type.starts_with(IMAGE_TYPE_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_carries_type_and_base64_body() {
        let payload = ImagePayload::new(b"abc".to_vec(), "a.png", PNG_CONTENT_TYPE);
        assert_eq!(payload.to_data_uri(), "data:image/png;base64,YWJj");
    }

    #[test]
    fn image_type_is_a_prefix_check() {
        assert!(is_image_type("image/jpeg"));
        assert!(is_image_type("image/svg+xml"));
        assert!(!is_image_type("application/pdf"));
        assert!(!is_image_type(""));
        assert!(!is_image_type("text/image/png"));
    }
}
