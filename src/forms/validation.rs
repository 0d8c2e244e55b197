//! Per-field rules for the admission form.
//!
//! Messages are shown to applicants verbatim, hence Bengali.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::domain::field::FormFields;
use crate::domain::profile::{FormProfile, PayloadKind};
use crate::domain::submission::FieldErrors;
use crate::domain::types::CourseId;

/// Latin or Bengali letters and whitespace.
static PERSON_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\x{0980}-\x{09FF}\s]+$").expect("valid name regex"));

/// Bangladeshi mobile number with optional country prefix. ASCII digits only.
static BD_MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+88|88)?(01[3-9][0-9]{8})$").expect("valid mobile regex"));

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

const MIN_NAME_CHARS: usize = 2;
const MIN_ADDRESS_CHARS: usize = 10;
const MIN_EDUCATION_CHARS: usize = 5;
const MIN_AGE: i32 = 5;
const MAX_AGE: i32 = 100;

const NAME_TOO_SHORT: &str = "নাম কমপক্ষে ২ অক্ষর হতে হবে";
const NAME_LETTERS_ONLY: &str = "নামে শুধুমাত্র অক্ষর ব্যবহার করুন";
const MOBILE_INVALID: &str = "সঠিক মোবাইল নম্বর দিন (১১ ডিজিট)";
const ADDRESS_TOO_SHORT: &str = "ঠিকানা কমপক্ষে ১০ অক্ষর হতে হবে";
const AGE_OUT_OF_RANGE: &str = "বয়স ৫-১০০ বছরের মধ্যে হতে হবে";
const DATE_INVALID: &str = "সঠিক জন্ম তারিখ দিন";
/// Shown when an integer-mapped selection holds something other than an id.
pub const SELECTION_INVALID: &str = "সঠিক মান নির্বাচন করুন";

/// Placeholder some browsers and older clients send for an unset input.
pub const NULL_LITERAL: &str = "null";

/// Returns the error message for `value` in field `name`, or `None` when the
/// value is acceptable. Unknown field names are always accepted.
///
/// `today` anchors the age check so the function stays pure.
pub fn validate_field(name: &str, value: &str, today: NaiveDate) -> Option<&'static str> {
    let trimmed = value.trim();
    match name {
        "name" => person_name(trimmed, "নাম প্রয়োজন"),
        "father_husband_name" => person_name(trimmed, "বাবার / স্বামীর নাম প্রয়োজন"),
        "mother_name" => person_name(trimmed, "মায়ের নাম প্রয়োজন"),
        "mobile" => mobile(trimmed, "মোবাইল নম্বর প্রয়োজন"),
        "guardian_mobile" => mobile(trimmed, "অভিভাবকের মোবাইল নম্বর প্রয়োজন"),
        "email" => {
            if trimmed.is_empty() {
                Some("ইমেইল প্রয়োজন")
            } else if !EMAIL.is_match(trimmed) {
                Some("সঠিক ইমেইল ঠিকানা দিন")
            } else {
                None
            }
        }
        "date_of_birth" => date_of_birth(trimmed, today),
        "current_address" => min_chars(
            trimmed,
            MIN_ADDRESS_CHARS,
            "বর্তমান ঠিকানা প্রয়োজন",
            ADDRESS_TOO_SHORT,
        ),
        "permanent_address" => min_chars(
            trimmed,
            MIN_ADDRESS_CHARS,
            "স্থায়ী ঠিকানা প্রয়োজন",
            ADDRESS_TOO_SHORT,
        ),
        "education" => min_chars(
            trimmed,
            MIN_EDUCATION_CHARS,
            "শিক্ষাগত যোগ্যতা প্রয়োজন",
            "শিক্ষাগত যোগ্যতা কমপক্ষে ৫ অক্ষর হতে হবে",
        ),
        "course" => selected(trimmed, "কোর্স নির্বাচন করুন"),
        "gender" => selected(trimmed, "লিঙ্গ নির্বাচন করুন"),
        "occupation" => selected(trimmed, "পেশা নির্বাচন করুন"),
        "course_mode" => selected(trimmed, "কোর্স মোড নির্বাচন করুন"),
        _ => None,
    }
}

/// Validates every submitted text entry against the active profile.
///
/// Required fields are always checked, including required fields the browser
/// did not send at all. Optional fields are checked only when filled in.
/// Inputs the profile sends as integers must hold a positive id.
pub fn validate_form(fields: &FormFields, profile: &FormProfile, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for field in fields.iter() {
        let Some(value) = field.value.as_text() else {
            continue;
        };
        if !profile.is_required(&field.name) && value.trim().is_empty() {
            continue;
        }
        if let Some(message) = validate_field(&field.name, value, today) {
            errors.insert(field.name.as_str(), message);
        }
    }

    for name in &profile.required_fields {
        if fields.get(name).is_some() {
            continue;
        }
        if let Some(message) = validate_field(name, "", today) {
            errors.insert(name.as_str(), message);
        }
    }

    for row in &profile.payload_fields {
        if row.kind != PayloadKind::Integer || errors.get(&row.source).is_some() {
            continue;
        }
        let value = fields.text(&row.source).unwrap_or_default().trim();
        if value.is_empty() || value == NULL_LITERAL {
            continue;
        }
        if value.parse::<CourseId>().is_err() {
            errors.insert(row.source.as_str(), SELECTION_INVALID);
        }
    }

    errors
}

fn person_name(trimmed: &str, missing: &'static str) -> Option<&'static str> {
    if trimmed.is_empty() {
        Some(missing)
    } else if trimmed.chars().count() < MIN_NAME_CHARS {
        Some(NAME_TOO_SHORT)
    } else if !PERSON_NAME.is_match(trimmed) {
        Some(NAME_LETTERS_ONLY)
    } else {
        None
    }
}

fn mobile(trimmed: &str, missing: &'static str) -> Option<&'static str> {
    if trimmed.is_empty() {
        Some(missing)
    } else if !BD_MOBILE.is_match(trimmed) {
        Some(MOBILE_INVALID)
    } else {
        None
    }
}

fn min_chars(
    trimmed: &str,
    min: usize,
    missing: &'static str,
    too_short: &'static str,
) -> Option<&'static str> {
    if trimmed.is_empty() {
        Some(missing)
    } else if trimmed.chars().count() < min {
        Some(too_short)
    } else {
        None
    }
}

fn selected(trimmed: &str, missing: &'static str) -> Option<&'static str> {
    if trimmed.is_empty() {
        Some(missing)
    } else {
        None
    }
}

fn date_of_birth(trimmed: &str, today: NaiveDate) -> Option<&'static str> {
    if trimmed.is_empty() {
        return Some("জন্ম তারিখ প্রয়োজন");
    }
    let Ok(birth) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") else {
        return Some(DATE_INVALID);
    };
    let age = today.year() - birth.year();
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Some(AGE_OUT_OF_RANGE);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    const KNOWN_FIELDS: [&str; 14] = [
        "name",
        "father_husband_name",
        "mother_name",
        "mobile",
        "guardian_mobile",
        "email",
        "date_of_birth",
        "current_address",
        "permanent_address",
        "course",
        "gender",
        "occupation",
        "course_mode",
        "education",
    ];

    fn valid_fields() -> FormFields {
        FormFields::new()
            .with_text("course", "4")
            .with_text("name", "Rahim Uddin")
            .with_text("father_husband_name", "করিম উদ্দিন")
            .with_text("mother_name", "Amena Begum")
            .with_text("gender", "male")
            .with_text("date_of_birth", "2001-03-09")
            .with_text("occupation", "student")
            .with_text("course_mode", "offline")
            .with_text("education", "HSC 2019")
            .with_text("mobile", "01711111111")
            .with_text("guardian_mobile", "+8801911111111")
            .with_text("email", "rahim@example.com")
            .with_text("current_address", "House 4, Road 2, Dhanmondi")
            .with_text("permanent_address", "Village Char, Barishal")
            .with_text("application_date", "")
    }

    #[test]
    fn empty_or_blank_values_fail_for_every_known_field() {
        for name in KNOWN_FIELDS {
            for value in ["", "   ", "\t\n"] {
                assert!(
                    validate_field(name, value, today()).is_some(),
                    "field {name} with {value:?}"
                );
            }
        }
    }

    #[test]
    fn unknown_fields_are_always_valid() {
        assert_eq!(validate_field("photo", "", today()), None);
        assert_eq!(
            validate_field("application_date", "whatever", today()),
            None
        );
    }

    #[test]
    fn mobile_numbers() {
        assert_eq!(validate_field("mobile", "01711111111", today()), None);
        assert_eq!(validate_field("mobile", " 8801711111111 ", today()), None);
        assert_eq!(validate_field("mobile", "+8801311111111", today()), None);
        assert_eq!(
            validate_field("mobile", "123", today()),
            Some(MOBILE_INVALID)
        );
        assert_eq!(
            validate_field("mobile", "01211111111", today()),
            Some(MOBILE_INVALID)
        );
        assert_eq!(
            validate_field("mobile", "০১৭১১১১১১১১", today()),
            Some(MOBILE_INVALID)
        );
    }

    #[test]
    fn names_accept_latin_and_bengali_letters_only() {
        assert_eq!(validate_field("name", "রহিম", today()), None);
        assert_eq!(validate_field("name", "A", today()), Some(NAME_TOO_SHORT));
        assert_eq!(
            validate_field("mother_name", "Amena1", today()),
            Some(NAME_LETTERS_ONLY)
        );
    }

    #[test]
    fn email_shape() {
        assert_eq!(validate_field("email", "a@b.co", today()), None);
        assert!(validate_field("email", "a@b", today()).is_some());
        assert!(validate_field("email", "a b@c.d", today()).is_some());
    }

    #[test]
    fn age_bounds_are_inclusive() {
        assert_eq!(
            validate_field("date_of_birth", "2021-01-01", today()),
            Some(AGE_OUT_OF_RANGE)
        );
        assert_eq!(validate_field("date_of_birth", "2020-12-31", today()), None);
        assert_eq!(validate_field("date_of_birth", "1925-01-01", today()), None);
        assert_eq!(
            validate_field("date_of_birth", "1924-12-31", today()),
            Some(AGE_OUT_OF_RANGE)
        );
        assert_eq!(
            validate_field("date_of_birth", "09/03/2001", today()),
            Some(DATE_INVALID)
        );
    }

    #[test]
    fn address_and_education_lengths() {
        assert_eq!(
            validate_field("current_address", "Dhaka", today()),
            Some(ADDRESS_TOO_SHORT)
        );
        assert_eq!(
            validate_field("permanent_address", "ঢাকা, বাংলাদেশ", today()),
            None
        );
        assert!(validate_field("education", "SSC", today()).is_some());
    }

    #[test]
    fn validation_is_repeatable() {
        for (name, value) in [
            ("mobile", "123"),
            ("name", "Rahim"),
            ("date_of_birth", "2019-01-01"),
        ] {
            assert_eq!(
                validate_field(name, value, today()),
                validate_field(name, value, today())
            );
        }
    }

    #[test]
    fn full_profile_accepts_complete_form() {
        let errors = validate_form(&valid_fields(), &FormProfile::full(), today());
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn full_profile_reports_missing_required_fields() {
        let fields = FormFields::new()
            .with_text("name", "Rahim")
            .with_text("mobile", "123");

        let errors = validate_form(&fields, &FormProfile::full(), today());

        assert_eq!(errors.first(), Some(MOBILE_INVALID));
        assert_eq!(errors.get("email"), Some("ইমেইল প্রয়োজন"));
        assert_eq!(errors.get("course"), Some("কোর্স নির্বাচন করুন"));
        assert!(errors.get("name").is_none());
        assert_eq!(errors.len(), 13);
    }

    #[test]
    fn essential_profile_skips_blank_optional_fields() {
        let fields = FormFields::new()
            .with_text("course", "4")
            .with_text("name", "Rahim")
            .with_text("father_husband_name", "Karim")
            .with_text("mobile", "01711111111")
            .with_text("email", "")
            .with_text("guardian_mobile", "  ")
            .with_text("current_address", "");

        let errors = validate_form(&fields, &FormProfile::essential(), today());
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn essential_profile_still_checks_filled_optional_fields() {
        let fields = FormFields::new()
            .with_text("course", "4")
            .with_text("name", "Rahim")
            .with_text("father_husband_name", "Karim")
            .with_text("mobile", "01711111111")
            .with_text("email", "not-an-email");

        let errors = validate_form(&fields, &FormProfile::essential(), today());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("email"), Some("সঠিক ইমেইল ঠিকানা দিন"));
    }

    #[test]
    fn non_numeric_course_is_reported_with_other_errors() {
        let fields = FormFields::new()
            .with_text("course", "web")
            .with_text("name", "Rahim")
            .with_text("father_husband_name", "Karim")
            .with_text("mobile", "123");

        let errors = validate_form(&fields, &FormProfile::essential(), today());

        assert_eq!(errors.get("mobile"), Some(MOBILE_INVALID));
        assert_eq!(errors.get("course"), Some(SELECTION_INVALID));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn numeric_course_passes_id_check() {
        for course in ["4", " 12 "] {
            let fields = valid_fields().with_text("course", course);
            let errors = validate_form(&fields, &FormProfile::full(), today());
            assert!(errors.is_empty(), "{course:?}: {errors:?}");
        }
        let fields = valid_fields().with_text("course", "0");
        let errors = validate_form(&fields, &FormProfile::full(), today());
        assert_eq!(errors.get("course"), Some(SELECTION_INVALID));
    }
}
