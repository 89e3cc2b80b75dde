use std::collections::HashMap;

use axum::{body::Bytes, extract::Multipart};

use crate::server::error::{domain::DomainError, Error};

/// A multipart form with one file part named `file` and any number of text parts
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    file: Option<(String, Bytes)>,
}

impl UploadForm {
    /// Reads every part of the form.
    ///
    /// # Returns
    /// - `Ok(UploadForm)` - All parts were read
    /// - `Err(DomainError::InvalidArgument)` - Malformed body, or a body over the request limit
    pub async fn read(mut multipart: Multipart) -> Result<Self, Error> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(invalid_form)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == "file" {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content = field.bytes().await.map_err(invalid_form)?;
                form.file = Some((file_name, content));
            } else {
                let value = field.text().await.map_err(invalid_form)?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// A text part, `None` when absent or blank
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    pub fn required_text(&self, name: &str) -> Result<String, DomainError> {
        self.text(name)
            .ok_or_else(|| DomainError::invalid_argument(format!("{} is required", name)))
    }

    /// A text part parsed as an integer, `None` when absent or blank
    pub fn integer(&self, name: &str) -> Result<Option<i32>, DomainError> {
        self.text(name)
            .map(|value| {
                value.parse::<i32>().map_err(|_| {
                    DomainError::invalid_argument(format!("{} must be an integer", name))
                })
            })
            .transpose()
    }

    /// Original file name and content of the `file` part
    pub fn take_file(&mut self) -> Result<(String, Bytes), DomainError> {
        self.file
            .take()
            .ok_or_else(|| DomainError::invalid_argument("file is required"))
    }
}

fn invalid_form(e: axum::extract::multipart::MultipartError) -> DomainError {
    DomainError::invalid_argument(e.body_text())
}
