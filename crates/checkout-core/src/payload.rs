//! Form Payload
//!
//! Snapshot of the upload form taken at submit time. Field order is kept
//! as the form reported it so the multipart body mirrors the HTML form.

use reqwest::multipart::{Form, Part};

use crate::error::{CheckoutError, Result};

/// Value of a single form field
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File {
        file_name: String,
        /// Empty when the browser does not know the type
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// Named form field
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: FormValue,
}

/// Ordered form fields, including zero or more files
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormPayload {
    fields: Vec<FormField>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push(FormField {
            name: name.into(),
            value: FormValue::Text(value.into()),
        });
    }

    pub fn push_file(
        &mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) {
        self.fields.push(FormField {
            name: name.into(),
            value: FormValue::File {
                file_name: file_name.into(),
                content_type: content_type.into(),
                bytes,
            },
        });
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn file_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|f| matches!(f.value, FormValue::File { .. }))
            .count()
    }

    /// Build the multipart body
    pub fn into_multipart(self) -> Result<Form> {
        self.fields
            .into_iter()
            .try_fold(Form::new(), |form, field| match field.value {
                FormValue::Text(text) => Ok(form.text(field.name, text)),
                FormValue::File {
                    file_name,
                    content_type,
                    bytes,
                } => {
                    let mut part = Part::bytes(bytes).file_name(file_name);
                    if !content_type.is_empty() {
                        part = part.mime_str(&content_type).map_err(|e| {
                            CheckoutError::Payload(format!(
                                "invalid content type {content_type:?}: {e}"
                            ))
                        })?;
                    }
                    Ok(form.part(field.name, part))
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_preserved() {
        let mut payload = FormPayload::new();
        payload.push_text("email", "a@example.com");
        payload.push_file("file", "report.pdf", "application/pdf", b"%PDF-1.7".to_vec());
        payload.push_text("note", "");

        let names: Vec<_> = payload.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["email", "file", "note"]);
        assert_eq!(payload.file_count(), 1);
    }

    #[test]
    fn test_invalid_mime_is_payload_error() {
        let mut payload = FormPayload::new();
        payload.push_file("file", "x.bin", "not a mime\n", vec![1, 2, 3]);
        let err = payload.into_multipart().unwrap_err();
        assert!(matches!(err, CheckoutError::Payload(_)));
    }

    #[test]
    fn test_unknown_content_type_is_accepted() {
        let mut payload = FormPayload::new();
        payload.push_file("file", "", "", Vec::new());
        assert!(payload.into_multipart().is_ok());
    }
}
