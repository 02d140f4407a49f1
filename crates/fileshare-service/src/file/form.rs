//! Upload and edit forms with field-level validation.

use std::borrow::Cow;

use bytes::Bytes;
use serde_json::{Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

use fileshare_core::error::AppError;
use fileshare_core::result::AppResult;
use fileshare_entity::file::FileAccess;

/// A file received from the client.
#[derive(Debug, Clone, serde::Serialize)]
pub struct UploadedBlob {
    /// Client-side file name.
    pub filename: String,
    /// Content type sent by the client.
    pub content_type: Option<String>,
    /// File content.
    pub data: Bytes,
}

/// Form submitted to create a file.
///
/// Authenticated submitters may set `access`; for anonymous submitters
/// the field is dropped before validation.
#[derive(Debug, Clone, Default, Validate)]
pub struct FileForm {
    /// Display name.
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 100, message = "Ensure this value has between 1 and 100 characters.")
    )]
    pub name: Option<String>,
    /// `public` or `private`.
    #[validate(custom(function = "validate_access"))]
    pub access: Option<String>,
    /// The uploaded file. Content checks run in `validate_with_limit`.
    #[validate(required(message = "This field is required."))]
    pub file: Option<UploadedBlob>,
}

impl FileForm {
    /// Build a form, trimming the name. A blank name counts as missing.
    pub fn new(name: Option<String>, access: Option<String>, file: Option<UploadedBlob>) -> Self {
        Self {
            name: name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            access,
            file,
        }
    }

    /// Restrict the form to the fields anonymous submitters may send.
    pub fn restrict_to_anonymous(&mut self) {
        self.access = None;
    }

    /// Validate every field, including the upload size limit.
    pub fn validate_with_limit(&self, max_upload_bytes: u64) -> AppResult<()> {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);
        if let Some(file) = &self.file {
            check_upload(&mut errors, file, max_upload_bytes);
        }
        into_result(errors)
    }

    /// Parsed access level; public when absent.
    pub fn access_level(&self) -> AppResult<FileAccess> {
        parse_access(self.access.as_deref())
    }
}

/// Form submitted to edit a file. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Validate)]
pub struct EditFileForm {
    /// New display name.
    #[validate(length(
        min = 1,
        max = 100,
        message = "Ensure this value has between 1 and 100 characters."
    ))]
    pub name: Option<String>,
    /// New access level.
    #[validate(custom(function = "validate_access"))]
    pub access: Option<String>,
    /// Replacement file.
    pub file: Option<UploadedBlob>,
}

impl EditFileForm {
    /// Build a form, trimming the name. A blank name stays present so it
    /// fails validation instead of being ignored.
    pub fn new(name: Option<String>, access: Option<String>, file: Option<UploadedBlob>) -> Self {
        Self {
            name: name.map(|n| n.trim().to_string()),
            access,
            file,
        }
    }

    /// Validate every field, including the upload size limit.
    pub fn validate_with_limit(&self, max_upload_bytes: u64) -> AppResult<()> {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);
        if let Some(file) = &self.file {
            check_upload(&mut errors, file, max_upload_bytes);
        }
        into_result(errors)
    }

    /// Parsed access level, if one was submitted.
    pub fn access_level(&self) -> AppResult<Option<FileAccess>> {
        self.access
            .as_deref()
            .map(|a| parse_access(Some(a)))
            .transpose()
    }
}

fn parse_access(value: Option<&str>) -> AppResult<FileAccess> {
    match value {
        Some(v) => v.parse(),
        None => Ok(FileAccess::Public),
    }
}

fn validate_access(value: &str) -> Result<(), ValidationError> {
    value.parse::<FileAccess>().map(|_| ()).map_err(|_| {
        ValidationError::new("invalid_choice").with_message(Cow::Owned(format!(
            "Select a valid choice. {value} is not one of the available choices."
        )))
    })
}

fn validate_blob(blob: &UploadedBlob) -> Result<(), ValidationError> {
    if blob.data.is_empty() {
        return Err(ValidationError::new("empty")
            .with_message(Cow::Borrowed("The submitted file is empty.")));
    }
    if blob.filename.trim().is_empty() {
        return Err(ValidationError::new("no_name")
            .with_message(Cow::Borrowed("No filename could be determined.")));
    }
    Ok(())
}

fn check_upload(errors: &mut ValidationErrors, blob: &UploadedBlob, max_upload_bytes: u64) {
    if let Err(err) = validate_blob(blob) {
        errors.add("file", err);
    }
    if let Some(err) = check_size(blob, max_upload_bytes) {
        errors.add("file", err);
    }
}

fn check_size(blob: &UploadedBlob, max_upload_bytes: u64) -> Option<ValidationError> {
    if blob.data.len() as u64 <= max_upload_bytes {
        return None;
    }
    Some(
        ValidationError::new("too_large").with_message(Cow::Owned(format!(
            "File exceeds maximum upload size of {max_upload_bytes} bytes."
        ))),
    )
}

fn into_result(errors: ValidationErrors) -> AppResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(validation_error(&errors))
    }
}

/// Convert validator errors into an [`AppError`] whose details map each
/// field to its messages.
pub fn validation_error(errors: &ValidationErrors) -> AppError {
    let mut details = Map::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<Value> = field_errors
            .iter()
            .map(|e| {
                Value::String(
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                )
            })
            .collect();
        details.insert(field.to_string(), Value::Array(messages));
    }
    AppError::validation("Invalid form data").with_details(Value::Object(details))
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: &str = "This field is required.";
    const NAME_LENGTH: &str = "Ensure this value has between 1 and 100 characters.";

    fn blob(data: &'static [u8]) -> UploadedBlob {
        UploadedBlob {
            filename: "notes.txt".to_string(),
            content_type: Some("text/plain".to_string()),
            data: Bytes::from_static(data),
        }
    }

    fn details(err: &AppError) -> &Map<String, Value> {
        err.details.as_ref().and_then(Value::as_object).unwrap()
    }

    #[test]
    fn test_valid_form() {
        let form = FileForm::new(
            Some(" Notes ".to_string()),
            Some("private".to_string()),
            Some(blob(b"hello")),
        );
        form.validate_with_limit(1024).unwrap();
        assert_eq!(form.name.as_deref(), Some("Notes"));
        assert_eq!(form.access_level().unwrap(), FileAccess::Private);
    }

    #[test]
    fn test_missing_fields_are_reported_per_field() {
        let form = FileForm::new(Some("   ".to_string()), None, None);
        let err = form.validate_with_limit(1024).unwrap_err();
        let details = details(&err);
        assert_eq!(details["name"], serde_json::json!([REQUIRED]));
        assert_eq!(details["file"], serde_json::json!([REQUIRED]));
        assert!(!details.contains_key("access"));
    }

    #[test]
    fn test_name_too_long() {
        let form = FileForm::new(Some("x".repeat(101)), None, Some(blob(b"a")));
        let err = form.validate_with_limit(1024).unwrap_err();
        assert_eq!(details(&err)["name"], serde_json::json!([NAME_LENGTH]));
    }

    #[test]
    fn test_invalid_access_and_oversized_file() {
        let form = FileForm::new(
            Some("ok".to_string()),
            Some("secret".to_string()),
            Some(blob(b"0123456789")),
        );
        let err = form.validate_with_limit(4).unwrap_err();
        let details = details(&err);
        assert!(details.contains_key("access"));
        assert!(details.contains_key("file"));
    }

    #[test]
    fn test_anonymous_restriction_drops_access() {
        let mut form = FileForm::new(
            Some("ok".to_string()),
            Some("nonsense".to_string()),
            Some(blob(b"a")),
        );
        form.restrict_to_anonymous();
        form.validate_with_limit(1024).unwrap();
        assert_eq!(form.access_level().unwrap(), FileAccess::Public);
    }

    #[test]
    fn test_edit_form_allows_partial_but_rejects_blank_name() {
        EditFileForm::new(None, Some("public".to_string()), None)
            .validate_with_limit(1024)
            .unwrap();

        let err = EditFileForm::new(Some("  ".to_string()), None, None)
            .validate_with_limit(1024)
            .unwrap_err();
        assert!(details(&err).contains_key("name"));
    }

    #[test]
    fn test_empty_upload_rejected() {
        let form = FileForm::new(Some("ok".to_string()), None, Some(blob(b"")));
        let err = form.validate_with_limit(1024).unwrap_err();
        assert_eq!(
            details(&err)["file"],
            serde_json::json!(["The submitted file is empty."])
        );
    }

    #[test]
    fn test_edit_form_checks_replacement_file() {
        let err = EditFileForm::new(None, None, Some(blob(b"")))
            .validate_with_limit(1024)
            .unwrap_err();
        assert_eq!(
            details(&err)["file"],
            serde_json::json!(["The submitted file is empty."])
        );

        let err = EditFileForm::new(None, None, Some(blob(b"0123456789")))
            .validate_with_limit(4)
            .unwrap_err();
        assert_eq!(
            details(&err)["file"],
            serde_json::json!(["File exceeds maximum upload size of 4 bytes."])
        );
    }
}
