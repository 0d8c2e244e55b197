//! Form profiles: which inputs are required and how they map onto the
//! backend's multipart field names.
//!
//! Two admission form variants exist in the wild with different required
//! sets. Both are expressed as data so a deployment picks one by name (or
//! supplies its own table) instead of the code branching on variants.

use serde::{Deserialize, Serialize};

/// Name of the built-in profile validating every known field.
pub const FULL_PROFILE: &str = "full";
/// Name of the built-in profile requiring only the essential fields.
pub const ESSENTIAL_PROFILE: &str = "essential";

/// Form input carrying the application date; defaulted to today when blank.
pub const APPLICATION_DATE_FIELD: &str = "application_date";
/// Form input carrying the selected course id.
pub const COURSE_FIELD: &str = "course";

/// How a source value is encoded in the payload.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PayloadKind {
    #[default]
    Text,
    /// Parsed as a positive integer identifier.
    Integer,
    /// Attached as a file part, only when a file was selected.
    File,
}

/// One row of the UI-name to backend-name table.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct PayloadField {
    /// Name of the form input.
    pub source: String,
    /// Name of the multipart field sent to the backend.
    pub target: String,
    #[serde(default)]
    pub kind: PayloadKind,
    /// Include the field even when the value is empty.
    #[serde(default)]
    pub always: bool,
}

impl PayloadField {
    fn new(source: &str, target: &str, kind: PayloadKind, always: bool) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            kind,
            always,
        }
    }
}

/// Required-field set plus payload mapping for one admission form variant.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct FormProfile {
    /// Filled from the configuration key when loaded from config.
    #[serde(default)]
    pub name: String,
    pub required_fields: Vec<String>,
    pub payload_fields: Vec<PayloadField>,
}

impl FormProfile {
    /// Every field the validator knows is required.
    pub fn full() -> Self {
        Self {
            name: FULL_PROFILE.to_string(),
            required_fields: [
                "course",
                "name",
                "father_husband_name",
                "mother_name",
                "gender",
                "date_of_birth",
                "occupation",
                "course_mode",
                "education",
                "mobile",
                "guardian_mobile",
                "email",
                "current_address",
                "permanent_address",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            payload_fields: default_payload_fields(),
        }
    }

    /// Only name, guardian name, mobile and course are required.
    pub fn essential() -> Self {
        Self {
            name: ESSENTIAL_PROFILE.to_string(),
            required_fields: ["name", "father_husband_name", "mobile", "course"]
                .into_iter()
                .map(String::from)
                .collect(),
            payload_fields: default_payload_fields(),
        }
    }

    /// Looks up a built-in profile by name.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            FULL_PROFILE => Some(Self::full()),
            ESSENTIAL_PROFILE => Some(Self::essential()),
            _ => None,
        }
    }

    pub fn is_required(&self, field: &str) -> bool {
        self.required_fields.iter().any(|name| name == field)
    }
}

fn default_payload_fields() -> Vec<PayloadField> {
    use PayloadKind::{File, Integer, Text};

    vec![
        PayloadField::new("name", "name", Text, true),
        PayloadField::new("father_husband_name", "father_name", Text, true),
        PayloadField::new("mother_name", "mother_name", Text, false),
        PayloadField::new("gender", "gender", Text, false),
        PayloadField::new("date_of_birth", "date_of_birth", Text, false),
        PayloadField::new("occupation", "occupation", Text, false),
        PayloadField::new("course_mode", "course_mode", Text, false),
        PayloadField::new("education", "education_qualification", Text, false),
        PayloadField::new("mobile", "mobile", Text, true),
        PayloadField::new("guardian_mobile", "guardian_mobile", Text, true),
        PayloadField::new("email", "email", Text, false),
        PayloadField::new("current_address", "present_address", Text, false),
        PayloadField::new("permanent_address", "permanent_address", Text, false),
        PayloadField::new(APPLICATION_DATE_FIELD, "date_of_application", Text, false),
        PayloadField::new("photo", "student_img", File, false),
        PayloadField::new(COURSE_FIELD, "courses", Integer, true),
    ]
}
