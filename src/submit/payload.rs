//! Multipart payload built from a validated draft.

use reqwest::multipart::{Form, Part};

use crate::draft::SelectedFile;
use crate::errors::AdminError;

/// Body of one multipart part.
#[derive(Debug, Clone, PartialEq)]
pub enum PartBody {
    Text(String),
    File(SelectedFile),
}

/// One named part, in send order.
#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub key: String,
    pub body: PartBody,
}

/// Ordered multipart fields for a create or update request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPayload {
    parts: Vec<FormPart>,
}

impl ProductPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, key: &str, value: impl Into<String>) {
        self.parts.push(FormPart {
            key: key.to_string(),
            body: PartBody::Text(value.into()),
        });
    }

    pub fn push_file(&mut self, key: &str, file: SelectedFile) {
        self.parts.push(FormPart {
            key: key.to_string(),
            body: PartBody::File(file),
        });
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// First text value sent under `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.texts(key).into_iter().next()
    }

    pub fn texts(&self, key: &str) -> Vec<&str> {
        self.parts
            .iter()
            .filter(|part| part.key == key)
            .filter_map(|part| match &part.body {
                PartBody::Text(value) => Some(value.as_str()),
                PartBody::File(_) => None,
            })
            .collect()
    }

    pub fn files(&self) -> Vec<&SelectedFile> {
        self.parts
            .iter()
            .filter_map(|part| match &part.body {
                PartBody::File(file) => Some(file),
                PartBody::Text(_) => None,
            })
            .collect()
    }

    /// Convert into a `multipart/form-data` body.
    pub fn into_form(self) -> Result<Form, AdminError> {
        let mut form = Form::new();
        for part in self.parts {
            form = match part.body {
                PartBody::Text(value) => form.text(part.key, value),
                PartBody::File(file) => {
                    let bytes = file.bytes.as_ref().clone();
                    let file_part = Part::bytes(bytes)
                        .file_name(file.name.clone())
                        .mime_str(&file.mime_type)
                        .map_err(|e| {
                            AdminError::InvalidField(format!(
                                "Invalid MIME type {} for {}: {}",
                                file.mime_type, file.name, e
                            ))
                        })?;
                    form.part(part.key, file_part)
                }
            };
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_helpers() {
        let mut payload = ProductPayload::new();
        payload.push_text("name", "Ear Drops");
        payload.push_file("images", SelectedFile::new("a.png", vec![1]));
        payload.push_file("images", SelectedFile::new("b.png", vec![2]));

        assert_eq!(payload.parts().len(), 3);
        assert_eq!(payload.text("name"), Some("Ear Drops"));
        assert_eq!(payload.text("images"), None);
        assert_eq!(payload.files().len(), 2);
    }

    #[test]
    fn test_into_form_rejects_bad_mime() {
        let mut payload = ProductPayload::new();
        payload.push_file(
            "images",
            SelectedFile::new("a.png", vec![1]).with_mime_type("not a mime"),
        );
        assert!(matches!(
            payload.into_form(),
            Err(AdminError::InvalidField(_))
        ));
    }
}
