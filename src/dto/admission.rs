//! Data handed from the admission services to templates.

use serde::{Deserialize, Serialize};

use crate::domain::course::Course;
use crate::domain::settings::Theme;

/// Query parameters accepted by the admission page.
#[derive(Debug, Default, Deserialize)]
pub struct AdmissionQuery {
    /// Title of a course to lock the selection to, as linked from a course
    /// details page.
    pub course: Option<String>,
}

/// Everything needed to render the admission form.
#[derive(Debug, Serialize)]
pub struct AdmissionPageData {
    /// Courses offered in the selection list; empty when the backend was
    /// unreachable.
    pub courses: Vec<Course>,
    pub theme: Theme,
    /// Course picked through [`AdmissionQuery::course`].
    pub preselected: Option<Course>,
}
