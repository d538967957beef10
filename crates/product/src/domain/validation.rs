//! Declarative field validation.
//!
//! A [`Schema`] is a static table of `(field, rules)` pairs. [`validate`] walks the
//! table against any [`FormFields`] source and collects every failing field into a
//! [`ValidationErrors`] set. Rules for a field stop at the first failure.

use crate::domain::{image::ImageFormat, requests::product::ImageUpload};
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The field must be present and non-empty.
    Required,
    /// The field may be omitted; remaining rules only run when it is present.
    Nullable,
    MinLength(usize),
    Integer,
    /// Inclusive bounds, checked only once the value parses as an integer.
    Between(i64, i64),
    In(&'static [&'static str]),
    Boolean,
    /// The field must be an uploaded image whose detected format has one of these extensions.
    Image(&'static [&'static str]),
}

pub type Schema = &'static [(&'static str, &'static [Rule])];

#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    File(&'a ImageUpload),
    /// A nested value (object or array) that has no text form.
    Structured,
}

pub trait FormFields {
    /// Returns the submitted value, or `None` when it is absent or blank.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

pub fn validate<F: FormFields + ?Sized>(form: &F, schema: Schema) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    for &(field, rules) in schema {
        let Some(value) = form.field(field) else {
            if rules.contains(&Rule::Required) {
                errors.add(
                    field,
                    failure("required", format!("The {field} field is required.")),
                );
            }
            continue;
        };

        if let Some(err) = rules.iter().find_map(|rule| check(field, *rule, value)) {
            errors.add(field, err);
        }
    }

    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check(field: &str, rule: Rule, value: FieldValue<'_>) -> Option<ValidationError> {
    let text = match (rule, value) {
        (Rule::Required | Rule::Nullable, _) => return None,
        (Rule::Image(allowed), FieldValue::File(upload)) => {
            return check_image(field, allowed, upload);
        }
        (Rule::Image(_), _) => {
            return Some(failure("image", format!("The {field} field must be an image.")));
        }
        (_, FieldValue::File(_) | FieldValue::Structured) => {
            return Some(failure("string", format!("The {field} field must be a string.")));
        }
        (_, FieldValue::Text(text)) => text,
    };

    match rule {
        Rule::MinLength(min) if text.chars().count() < min => Some(failure(
            "min_length",
            format!("The {field} field must be at least {min} characters."),
        )),
        Rule::Integer if parse_integer(text).is_none() => Some(failure(
            "integer",
            format!("The {field} field must be an integer."),
        )),
        Rule::Between(min, max) => match parse_integer(text) {
            Some(n) if n < min || n > max => Some(failure(
                "between",
                format!("The {field} field must be between {min} and {max}."),
            )),
            _ => None,
        },
        Rule::In(allowed) if !allowed.contains(&text) => Some(failure(
            "in",
            format!("The selected {field} is invalid."),
        )),
        Rule::Boolean if parse_bool(text).is_none() => Some(failure(
            "boolean",
            format!("The {field} field must be true or false."),
        )),
        _ => None,
    }
}

fn check_image(
    field: &str,
    allowed: &'static [&'static str],
    upload: &ImageUpload,
) -> Option<ValidationError> {
    match ImageFormat::detect(&upload.bytes) {
        None => Some(failure("image", format!("The {field} field must be an image."))),
        Some(format) if !format.aliases().iter().any(|ext| allowed.contains(ext)) => {
            Some(failure(
                "mimes",
                format!(
                    "The {field} field must be a file of type: {}.",
                    allowed.join(", ")
                ),
            ))
        }
        Some(_) => None,
    }
}

fn failure(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

pub fn parse_integer(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}
