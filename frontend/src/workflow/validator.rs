//! Client-side file validation.

use crate::config::{ACCEPTED_MIME_TYPES, MAX_FILE_SIZE};
use crate::error::ValidationError;
use crate::types::FileMeta;

/// Check a selected file. Rules run in order and the first failure wins.
pub fn validate(file: Option<&FileMeta>) -> Result<(), ValidationError> {
    let file = file.ok_or(ValidationError::MissingFile)?;

    if file.size > MAX_FILE_SIZE {
        return Err(ValidationError::TooLarge { size: file.size });
    }

    if !ACCEPTED_MIME_TYPES.contains(&file.mime.as_str()) {
        return Err(ValidationError::UnsupportedType {
            mime: file.mime.clone(),
        });
    }

    Ok(())
}
