//! Raw form input as captured from the browser.

use std::collections::BTreeMap;

/// File selected by the user in a file input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedFile {
    /// Original file name reported by the browser.
    pub file_name: String,
    /// MIME type reported by the browser, if any.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Value of a single form input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File(UploadedFile),
}

impl FieldValue {
    /// Text content, or `None` for file inputs.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text.as_str()),
            FieldValue::File(_) => None,
        }
    }
}

/// A named form input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
}

/// Submitted form entries in the order the browser sent them.
///
/// Setting a name that already exists replaces its value in place, so each
/// name appears at most once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormFields {
    fields: Vec<Field>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing an earlier entry with the same name.
    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) => field.value = value,
            None => self.fields.push(Field { name, value }),
        }
    }

    /// Shorthand for setting a text entry.
    pub fn set_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.set(name, FieldValue::Text(value.into()));
    }

    /// Builder-style variant of [`FormFields::set_text`].
    #[must_use]
    pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_text(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    /// Text value of `name`, `None` when absent or a file.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    /// File value of `name`, `None` when absent or plain text.
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        match self.get(name) {
            Some(FieldValue::File(file)) => Some(file),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Text entries keyed by name, used to refill the form after a failed submit.
    pub fn text_values(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .filter_map(|field| {
                field
                    .value
                    .as_text()
                    .map(|text| (field.name.clone(), text.to_string()))
            })
            .collect()
    }
}
