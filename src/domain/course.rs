use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Course offered by the institute, as listed by the backend.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Course {
    pub id: i32,
    pub title: String,
}

/// Envelope returned by paginated backend list endpoints.
///
/// Entries that are not a valid course (missing id, `null` title) are
/// skipped so one bad record does not empty the whole list.
#[derive(Debug, Deserialize)]
pub struct CourseList {
    #[serde(default, deserialize_with = "valid_courses")]
    pub results: Vec<Course>,
}

fn valid_courses<'de, D>(deserializer: D) -> Result<Vec<Course>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<Value>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

/// Finds the course whose title matches `title` exactly.
pub fn find_by_title<'a>(courses: &'a [Course], title: &str) -> Option<&'a Course> {
    courses.iter().find(|course| course.title == title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_list_tolerates_missing_results() {
        let list: CourseList = serde_json::from_str(r#"{"count": 0}"#).unwrap();
        assert!(list.results.is_empty());
    }

    #[test]
    fn course_list_skips_malformed_entries() {
        let list: CourseList = serde_json::from_str(
            r#"{"results": [
                {"id": 3, "title": null},
                {"id": 4, "title": "Web Development", "fee": 5000},
                {"title": "No id"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            list.results,
            vec![Course {
                id: 4,
                title: "Web Development".to_string(),
            }]
        );
    }

    #[test]
    fn finds_course_by_exact_title() {
        let courses = vec![
            Course {
                id: 3,
                title: "Graphic Design".to_string(),
            },
            Course {
                id: 5,
                title: "Web Development".to_string(),
            },
        ];

        assert_eq!(
            find_by_title(&courses, "Web Development").map(|c| c.id),
            Some(5)
        );
        assert!(find_by_title(&courses, "web development").is_none());
    }
}
