//! Form schemas for cafe submissions.
//!
//! Each schema is a static table of fields and the validators that run on
//! them, in order. Handlers deserialize the urlencoded body into a plain form
//! struct, run the schema over it and, only when every field passes, convert
//! the form into a typed model value.
//!
//! # Checkbox convention
//!
//! Browsers omit unchecked checkboxes from the submission. A checkbox is
//! therefore checked when its key is present with any non-empty value
//! (including the literal string `"false"`), and unchecked otherwise.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer};

use cafe_directory_core::{CafeId, CoffeePrice, WebUrl};

use crate::models::NewCafe;

/// Maximum length of short text columns.
pub const MAX_TEXT_LENGTH: usize = 250;

// =============================================================================
// Validators
// =============================================================================

/// A single check applied to a submitted field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// Skip the remaining validators when the value is blank.
    Optional,
    /// Value must not be blank.
    Required,
    /// Value must be at most this many characters.
    MaxLength(usize),
    /// Value must be an absolute `http`/`https` URL.
    Url,
    /// Value must be a non-negative decimal.
    Decimal,
}

/// Outcome of a single validator.
enum Check {
    Pass,
    Fail(String),
    StopChain,
}

impl Validator {
    fn check(self, value: &str) -> Check {
        let value = value.trim();
        match self {
            Self::Optional if value.is_empty() => Check::StopChain,
            Self::Optional => Check::Pass,
            Self::Required if value.is_empty() => Check::Fail("This field is required.".into()),
            Self::Required => Check::Pass,
            Self::MaxLength(max) if value.chars().count() > max => {
                Check::Fail(format!("Must be at most {max} characters."))
            }
            Self::MaxLength(_) => Check::Pass,
            Self::Url => match WebUrl::parse(value) {
                Ok(_) => Check::Pass,
                Err(_) => Check::Fail("Invalid URL.".into()),
            },
            Self::Decimal => match CoffeePrice::parse(value) {
                Ok(_) => Check::Pass,
                Err(e) => Check::Fail(format!("Not a valid price: {e}.")),
            },
        }
    }
}

/// A form field and its validators.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// Name of the form input.
    pub name: &'static str,
    /// Validators, applied in order until one fails.
    pub validators: &'static [Validator],
}

/// Schema of the add-cafe form.
///
/// Checkboxes carry no validators: every value is acceptable.
pub const ADD_CAFE_SCHEMA: &[FieldRule] = &[
    FieldRule {
        name: "cafe_name",
        validators: &[Validator::Required, Validator::MaxLength(MAX_TEXT_LENGTH)],
    },
    FieldRule {
        name: "map_url",
        validators: &[Validator::Required, Validator::Url],
    },
    FieldRule {
        name: "img_url",
        validators: &[Validator::Required, Validator::Url],
    },
    FieldRule {
        name: "location",
        validators: &[Validator::Required, Validator::MaxLength(MAX_TEXT_LENGTH)],
    },
    FieldRule {
        name: "seats",
        validators: &[Validator::Required, Validator::MaxLength(MAX_TEXT_LENGTH)],
    },
    FieldRule {
        name: "coffee_price",
        validators: &[Validator::Optional, Validator::Decimal],
    },
];

/// Schema of the edit-cafe form.
pub const EDIT_CAFE_SCHEMA: &[FieldRule] = &[FieldRule {
    name: "cafe_location",
    validators: &[Validator::Required, Validator::MaxLength(MAX_TEXT_LENGTH)],
}];

/// Run every rule of a schema, collecting the first failure per field.
fn run_schema<'f>(schema: &[FieldRule], value_of: impl Fn(&str) -> &'f str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for rule in schema {
        let value = value_of(rule.name);
        for validator in rule.validators {
            match validator.check(value) {
                Check::Pass => {}
                Check::StopChain => break,
                Check::Fail(message) => {
                    errors.add(rule.name, message);
                    break;
                }
            }
        }
    }
    errors
}

// =============================================================================
// Errors
// =============================================================================

/// Validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, Vec<String>>,
}

impl FieldErrors {
    /// Create an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error for a specific field.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    /// Check if there are any errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether the given field failed validation.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// First error message for a field, for display next to the input.
    #[must_use]
    pub fn first(&self, field: &str) -> Option<&str> {
        self.errors
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Checkbox
// =============================================================================

/// An HTML checkbox value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checkbox(bool);

impl Checkbox {
    /// Whether the box was ticked.
    #[must_use]
    pub const fn is_checked(self) -> bool {
        self.0
    }
}

impl From<bool> for Checkbox {
    fn from(checked: bool) -> Self {
        Self(checked)
    }
}

impl<'de> Deserialize<'de> for Checkbox {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self(!value.is_empty()))
    }
}

// =============================================================================
// Add Cafe
// =============================================================================

/// Add-cafe form submission.
///
/// Missing keys deserialize to empty values so the schema, not the
/// extractor, reports them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddCafeForm {
    pub cafe_name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: Checkbox,
    pub has_wifi: Checkbox,
    pub has_sockets: Checkbox,
    pub can_take_calls: Checkbox,
    pub coffee_price: String,
}

impl AddCafeForm {
    fn value(&self, field: &str) -> &str {
        match field {
            "cafe_name" => &self.cafe_name,
            "map_url" => &self.map_url,
            "img_url" => &self.img_url,
            "location" => &self.location,
            "seats" => &self.seats,
            "coffee_price" => &self.coffee_price,
            _ => "",
        }
    }

    /// Validate the submission and build the cafe to insert.
    ///
    /// The returned value is built from the validated fields only; text is
    /// trimmed and the price normalised to two decimal places.
    ///
    /// # Errors
    ///
    /// Returns `FieldErrors` describing every field that failed validation.
    pub fn validate(&self) -> Result<NewCafe, FieldErrors> {
        let errors = run_schema(ADD_CAFE_SCHEMA, |field| self.value(field));
        if !errors.is_empty() {
            return Err(errors);
        }

        let map_url = WebUrl::parse(&self.map_url)
            .map_err(|e| FieldErrors::single("map_url", e.to_string()))?;
        let img_url = WebUrl::parse(&self.img_url)
            .map_err(|e| FieldErrors::single("img_url", e.to_string()))?;
        let coffee_price = match self.coffee_price.trim() {
            "" => None,
            raw => Some(
                CoffeePrice::parse(raw)
                    .map_err(|e| FieldErrors::single("coffee_price", e.to_string()))?,
            ),
        };

        Ok(NewCafe {
            name: self.cafe_name.trim().to_string(),
            map_url,
            img_url,
            location: self.location.trim().to_string(),
            seats: self.seats.trim().to_string(),
            has_toilet: self.has_toilet.is_checked(),
            has_wifi: self.has_wifi.is_checked(),
            has_sockets: self.has_sockets.is_checked(),
            can_take_calls: self.can_take_calls.is_checked(),
            coffee_price,
        })
    }
}

// =============================================================================
// Edit Cafe
// =============================================================================

/// Edit-cafe form submission.
#[derive(Debug, Clone, Deserialize)]
pub struct EditCafeForm {
    pub id: CafeId,
    #[serde(default)]
    pub cafe_location: String,
}

impl EditCafeForm {
    /// Validate the submission and return the trimmed new location.
    ///
    /// # Errors
    ///
    /// Returns `FieldErrors` if the location is blank or too long.
    pub fn validate(&self) -> Result<String, FieldErrors> {
        let errors = run_schema(EDIT_CAFE_SCHEMA, |field| match field {
            "cafe_location" => self.cafe_location.as_str(),
            _ => "",
        });
        if errors.is_empty() {
            Ok(self.cafe_location.trim().to_string())
        } else {
            Err(errors)
        }
    }
}
