//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::validation::{validate_date_of_birth, validate_date_of_death, ALPHANUMERIC};

/// Date format used by the HTML date inputs
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date format used when displaying a lifespan
const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y";

/// Full author model from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    pub fn from_data(id: Uuid, data: AuthorData) -> Self {
        Self {
            id,
            first_name: data.first_name,
            family_name: data.family_name,
            date_of_birth: data.date_of_birth,
            date_of_death: data.date_of_death,
        }
    }

    /// Canonical URL of the author detail page
    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }

    /// Display name, `"Family, First"` when both parts are known
    pub fn name(&self) -> String {
        match (self.family_name.is_empty(), self.first_name.is_empty()) {
            (false, false) => format!("{}, {}", self.family_name, self.first_name),
            (false, true) => self.family_name.clone(),
            (true, false) => self.first_name.clone(),
            (true, true) => String::new(),
        }
    }

    /// `"Jan 2, 1900 - Mar 4, 1980"`, with unknown ends left blank
    pub fn lifespan(&self) -> String {
        let fmt = |d: Option<NaiveDate>| {
            d.map(|d| d.format(DISPLAY_DATE_FORMAT).to_string())
                .unwrap_or_default()
        };
        format!("{} - {}", fmt(self.date_of_birth), fmt(self.date_of_death))
    }
}

/// Validated author fields, ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorData {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Raw author form submission
///
/// Every field defaults to an empty string so a missing input is reported
/// as a violation instead of rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AuthorForm {
    #[validate(
        length(min = 1, message = "First name must be specified."),
        regex(path = *ALPHANUMERIC, message = "First name has non-alphanumeric characters.")
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, message = "Family name must be specified."),
        regex(path = *ALPHANUMERIC, message = "Family name has non-alphanumeric characters.")
    )]
    pub family_name: String,
    #[validate(custom(function = "validate_date_of_birth"))]
    pub date_of_birth: String,
    #[validate(custom(function = "validate_date_of_death"))]
    pub date_of_death: String,
}

impl From<&Author> for AuthorForm {
    fn from(author: &Author) -> Self {
        let fmt = |d: Option<NaiveDate>| {
            d.map(|d| d.format(FORM_DATE_FORMAT).to_string())
                .unwrap_or_default()
        };
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: fmt(author.date_of_birth),
            date_of_death: fmt(author.date_of_death),
        }
    }
}
