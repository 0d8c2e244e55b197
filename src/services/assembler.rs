//! Turns validated form input into the backend's multipart payload.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::field::FormFields;
use crate::domain::profile::{APPLICATION_DATE_FIELD, FormProfile, PayloadKind};
use crate::domain::submission::{PayloadValue, SubmissionPayload};
use crate::domain::types::{CourseId, SiteId, TypeConstraintError};
use crate::forms::validation::NULL_LITERAL;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssembleError {
    /// An integer field held something other than a positive identifier.
    #[error("field {field} is not a valid identifier: {source}")]
    InvalidNumber {
        field: String,
        source: TypeConstraintError,
    },
}

impl AssembleError {
    /// Form input the error refers to.
    pub fn field(&self) -> &str {
        match self {
            AssembleError::InvalidNumber { field, .. } => field,
        }
    }
}

fn is_present(value: &str) -> bool {
    !value.is_empty() && value != NULL_LITERAL
}

/// Builds the payload for `fields` following the profile's table.
///
/// `site_id` always goes first. Rows marked `always` are sent even when
/// blank (as an empty string); other rows only when the user supplied a
/// value. A blank application date defaults to `today`.
pub fn assemble_payload(
    fields: &FormFields,
    profile: &FormProfile,
    site_id: SiteId,
    today: NaiveDate,
) -> Result<SubmissionPayload, AssembleError> {
    let mut payload = SubmissionPayload::new();
    payload.push("site_id", PayloadValue::Integer(site_id.get()));

    let today = today.format("%Y-%m-%d").to_string();

    for row in &profile.payload_fields {
        match row.kind {
            PayloadKind::File => {
                let selected = fields
                    .file(&row.source)
                    .filter(|file| !file.file_name.is_empty());
                if let Some(file) = selected {
                    payload.push(row.target.as_str(), PayloadValue::File(file.clone()));
                }
            }
            PayloadKind::Text => {
                let mut value = fields.text(&row.source).unwrap_or_default();
                if row.source == APPLICATION_DATE_FIELD && !is_present(value) {
                    value = today.as_str();
                }
                if is_present(value) {
                    payload.push(row.target.as_str(), PayloadValue::Text(value.to_string()));
                } else if row.always {
                    payload.push(row.target.as_str(), PayloadValue::Text(String::new()));
                }
            }
            PayloadKind::Integer => {
                let value = fields.text(&row.source).unwrap_or_default().trim();
                if is_present(value) {
                    let id = value
                        .parse::<CourseId>()
                        .map_err(|source| AssembleError::InvalidNumber {
                            field: row.source.clone(),
                            source,
                        })?;
                    payload.push(row.target.as_str(), PayloadValue::Integer(id.get()));
                } else if row.always {
                    payload.push(row.target.as_str(), PayloadValue::Text(String::new()));
                }
            }
        }
    }

    Ok(payload)
}
