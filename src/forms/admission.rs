//! Multipart admission form as posted by the browser.

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};

use crate::domain::field::{FieldValue, FormFields, UploadedFile};
use crate::forms::FormError;

/// Raw admission form. Every input is optional here; which ones are
/// required is decided by the active form profile.
#[derive(MultipartForm)]
pub struct AdmissionForm {
    pub course: Option<Text<String>>,
    pub name: Option<Text<String>>,
    pub father_husband_name: Option<Text<String>>,
    pub mother_name: Option<Text<String>>,
    pub gender: Option<Text<String>>,
    pub date_of_birth: Option<Text<String>>,
    pub occupation: Option<Text<String>>,
    pub course_mode: Option<Text<String>>,
    pub education: Option<Text<String>>,
    pub mobile: Option<Text<String>>,
    pub guardian_mobile: Option<Text<String>>,
    pub email: Option<Text<String>>,
    pub current_address: Option<Text<String>>,
    pub permanent_address: Option<Text<String>>,
    #[multipart(limit = "5MB")]
    pub photo: Option<TempFile>,
    pub application_date: Option<Text<String>>,
}

impl TryFrom<AdmissionForm> for FormFields {
    type Error = FormError;

    /// Collects the submitted inputs in form order. A file input without a
    /// file name means nothing was selected and is dropped.
    fn try_from(form: AdmissionForm) -> Result<Self, Self::Error> {
        let mut fields = FormFields::new();

        let texts = [
            ("course", form.course),
            ("name", form.name),
            ("father_husband_name", form.father_husband_name),
            ("mother_name", form.mother_name),
            ("gender", form.gender),
            ("date_of_birth", form.date_of_birth),
            ("occupation", form.occupation),
            ("course_mode", form.course_mode),
            ("education", form.education),
            ("mobile", form.mobile),
            ("guardian_mobile", form.guardian_mobile),
            ("email", form.email),
            ("current_address", form.current_address),
            ("permanent_address", form.permanent_address),
        ];
        for (name, value) in texts {
            if let Some(Text(value)) = value {
                fields.set_text(name, value);
            }
        }

        if let Some(photo) = form.photo {
            let file_name = photo.file_name.clone().unwrap_or_default();
            if !file_name.is_empty() {
                let bytes = std::fs::read(photo.file.path())?;
                fields.set(
                    "photo",
                    FieldValue::File(UploadedFile {
                        file_name,
                        content_type: photo.content_type.map(|mime| mime.to_string()),
                        bytes,
                    }),
                );
            }
        }

        if let Some(Text(date)) = form.application_date {
            fields.set_text("application_date", date);
        }

        Ok(fields)
    }
}
