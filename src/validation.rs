//! Form validation and sanitization
//!
//! Forms are trimmed first, then checked with their `#[derive(Validate)]`
//! rules. Every broken rule is reported, in form field order, as a
//! [`Violation`]; a submission is valid only when nothing was reported.

use std::borrow::Cow;

use chrono::{NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{AuthorData, AuthorForm, GenreData, GenreForm};

pub static ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Za-z]+$").expect("valid alphanumeric regex"));

// YYYY, YYYY-MM, YYYY-MM-DD, YYYYMMDD, YYYY-Www[-D], YYYYWww[D], YYYY-DDD, YYYYDDD
static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<y>\d{4})(?:-(?P<m>\d{2})(?:-(?P<d>\d{2}))?|(?P<bm>\d{2})(?P<bd>\d{2})|-?W(?P<w>\d{2})(?:-?(?P<wd>[1-7]))?|-?(?P<o>\d{3}))?$",
    )
    .expect("valid date regex")
});

// hh[:mm[:ss]][.fff] with an optional Z or ±hh[[:]mm] zone
static ISO_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<h>\d{2})(?::?(?P<mi>\d{2})(?::?(?P<s>\d{2}))?)?(?:[.,]\d+)?(?:[zZ]|[+-](?P<zh>\d{2})(?::?(?P<zm>\d{2}))?)?$",
    )
    .expect("valid time regex")
});

const AUTHOR_FIELDS: [&str; 4] = ["first_name", "family_name", "date_of_birth", "date_of_death"];
const GENRE_FIELDS: [&str; 1] = ["name"];

/// A single broken rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

/// All violations reported for one form submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    /// Flatten validator errors, walking `fields` to keep form order
    fn from_errors(errors: &ValidationErrors, fields: &[&'static str]) -> Self {
        let by_field = errors.field_errors();
        let violations = fields
            .iter()
            .filter_map(|field| by_field.get(*field).map(|errs| (*field, errs)))
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| Violation {
                    field,
                    message: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string()),
                })
            })
            .collect();
        Self(violations)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.0.iter().map(|v| v.message.as_str()).collect()
    }
}

fn parse_time(value: &str) -> bool {
    let Some(caps) = ISO_TIME.captures(value) else {
        return false;
    };
    let num = |name: &str| caps.name(name).map_or(0, |m| m.as_str().parse::<u32>().unwrap_or(99));
    let (h, mi, s) = (num("h"), num("mi"), num("s"));
    let time_ok = (h < 24 && mi < 60 && s < 60) || (h == 24 && mi == 0 && s == 0);
    time_ok && num("zh") < 24 && num("zm") < 60
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let caps = ISO_DATE.captures(value)?;
    let num = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<u32>().ok());
    let year = caps.name("y")?.as_str().parse::<i32>().ok()?;

    if let Some(week) = num("w") {
        let weekday = match num("wd").unwrap_or(1) {
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            6 => Weekday::Sat,
            _ => Weekday::Sun,
        };
        return NaiveDate::from_isoywd_opt(year, week, weekday);
    }
    if let Some(ordinal) = num("o") {
        return NaiveDate::from_yo_opt(year, ordinal);
    }
    let month = num("m").or_else(|| num("bm")).unwrap_or(1);
    let day = num("d").or_else(|| num("bd")).unwrap_or(1);
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse an ISO-8601 calendar, week or ordinal date, optionally followed by
/// a time of day (`T` or space separated); only the date part is kept.
/// Missing month or day components default to the first.
pub fn parse_iso8601_date(value: &str) -> Option<NaiveDate> {
    match value.find(['T', 't', ' ']) {
        Some(idx) => {
            let date = parse_date(&value[..idx])?;
            parse_time(&value[idx + 1..]).then_some(date)
        }
        None => parse_date(value),
    }
}

/// Blank means absent; anything else must be an ISO-8601 date
fn parse_optional_date(value: &str) -> Result<Option<NaiveDate>, ()> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    parse_iso8601_date(value).map(Some).ok_or(())
}

fn check_optional_date(value: &str, message: &'static str) -> Result<(), ValidationError> {
    parse_optional_date(value).map(|_| ()).map_err(|()| {
        let mut err = ValidationError::new("iso8601");
        err.message = Some(Cow::Borrowed(message));
        err
    })
}

pub fn validate_date_of_birth(value: &str) -> Result<(), ValidationError> {
    check_optional_date(value, "Invalid date of birth")
}

pub fn validate_date_of_death(value: &str) -> Result<(), ValidationError> {
    check_optional_date(value, "Invalid date of death")
}

impl AuthorForm {
    /// The submission as it is validated and echoed back on a re-rendered form
    pub fn sanitized(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            family_name: self.family_name.trim().to_string(),
            date_of_birth: self.date_of_birth.trim().to_string(),
            date_of_death: self.date_of_death.trim().to_string(),
        }
    }

    pub fn validated(&self) -> Result<AuthorData, Violations> {
        let form = self.sanitized();
        form.validate()
            .map_err(|errors| Violations::from_errors(&errors, &AUTHOR_FIELDS))?;

        Ok(AuthorData {
            date_of_birth: parse_optional_date(&form.date_of_birth).ok().flatten(),
            date_of_death: parse_optional_date(&form.date_of_death).ok().flatten(),
            first_name: form.first_name,
            family_name: form.family_name,
        })
    }
}

impl GenreForm {
    pub fn sanitized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
        }
    }

    pub fn validated(&self) -> Result<GenreData, Violations> {
        let form = self.sanitized();
        form.validate()
            .map_err(|errors| Violations::from_errors(&errors, &GENRE_FIELDS))?;
        Ok(GenreData { name: form.name })
    }
}
