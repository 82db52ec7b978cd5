use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;

use crate::response::ApiError;

/// An uploaded file pulled out of a multipart request.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Text fields plus at most one file, as the provisioning and catalog
/// endpoints submit them.
#[derive(Debug, Default)]
pub struct ParsedForm {
    fields: HashMap<String, String>,
    pub file: Option<UploadFile>,
}

impl ParsedForm {
    pub async fn read(mut mp: Multipart) -> Result<Self, ApiError> {
        let mut form = ParsedForm::default();
        while let Some(field) = mp
            .next_field()
            .await
            .map_err(|_| ApiError::Validation("Malformed form data".into()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if let Some(file_name) = field.file_name() {
                let file_name = file_name.to_string();
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".into());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::Validation("Malformed form data".into()))?;
                form.file = Some(UploadFile {
                    file_name,
                    content_type,
                    bytes,
                });
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|_| ApiError::Validation("Malformed form data".into()))?;
                form.fields.insert(name, value);
            }
        }
        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|s| s.as_str()).filter(|s| !s.is_empty())
    }

    pub fn required(&self, name: &str) -> Result<&str, ApiError> {
        self.text(name)
            .ok_or_else(|| ApiError::Validation("Required fields".into()))
    }

    /// Parse a field submitted as embedded JSON (address, access grants).
    pub fn json<T: serde::de::DeserializeOwned>(&self, name: &str) -> Result<Option<T>, ApiError> {
        match self.text(name) {
            None => Ok(None),
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|_| ApiError::Validation(format!("Invalid {} payload", name))),
        }
    }
}
