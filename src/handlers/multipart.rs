// handlers/multipart.rs - Multipart form reader shared by upload handlers

use axum::{body::Bytes, extract::Multipart};
use std::collections::HashMap;

use crate::error::ApiError;

#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

/// Text fields and files of one multipart request.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    /// Drain the request. Parts carrying a filename are files; an empty file
    /// part (a form submitted with nothing chosen) is dropped.
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = FormData::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if let Some(file_name) = field.file_name().map(str::to_string) {
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    form.files.insert(
                        name,
                        UploadedFile {
                            file_name: Some(file_name),
                            bytes,
                        },
                    );
                }
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Trimmed text value, `None` when absent or blank.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }

    #[cfg(test)]
    pub fn with_fields(fields: &[(&str, &str)]) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            files: HashMap::new(),
        }
    }
}
