//! Stateless single-field checks shared by the application wizard, the contact form and
//! the development stub.
//!
//! Every check returns a [`FieldVerdict`]; an invalid value is an ordinary outcome and
//! never an error.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

pub const IDENTIFICATION_MESSAGE: &str =
    "Número de identificación debe contener de 7 a 10 dígitos";
pub const CONTACT_NUMBER_MESSAGE: &str = "Número de contacto debe contener exactamente 10 dígitos";
pub const EMAIL_MESSAGE: &str = "Por favor ingrese un correo electrónico válido";
pub const DATE_MESSAGE: &str = "La fecha debe tener el formato AAAA-MM-DD";

/// Outcome of a single field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldVerdict {
    Valid,
    Invalid(String),
}

impl FieldVerdict {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(message) => Some(message),
        }
    }

    fn check(valid: bool, message: &str) -> Self {
        if valid {
            Self::Valid
        } else {
            Self::invalid(message)
        }
    }
}

fn digits_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]+$").expect("digits pattern compiles"))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
    })
}

fn digits_only(value: &str) -> bool {
    digits_pattern().is_match(value)
}

/// National identification number: 7 to 10 ASCII digits.
pub fn validate_identification(value: &str) -> FieldVerdict {
    FieldVerdict::check(
        digits_only(value) && (7..=10).contains(&value.len()),
        IDENTIFICATION_MESSAGE,
    )
}

/// Colombian mobile number: exactly 10 ASCII digits.
pub fn validate_contact_number(value: &str) -> FieldVerdict {
    FieldVerdict::check(
        digits_only(value) && value.len() == 10,
        CONTACT_NUMBER_MESSAGE,
    )
}

/// `local@domain.tld` shape with no whitespace in any part.
pub fn validate_email(value: &str) -> FieldVerdict {
    FieldVerdict::check(email_pattern().is_match(value), EMAIL_MESSAGE)
}

pub fn validate_required(value: &str, message: &str) -> FieldVerdict {
    FieldVerdict::check(!value.trim().is_empty(), message)
}

pub fn validate_min_length(value: &str, min: usize, message: &str) -> FieldVerdict {
    FieldVerdict::check(value.trim().chars().count() >= min, message)
}

pub fn validate_max_length(value: &str, max: usize, message: &str) -> FieldVerdict {
    FieldVerdict::check(value.chars().count() <= max, message)
}

/// ISO calendar date (`YYYY-MM-DD`).
pub fn validate_iso_date(value: &str) -> FieldVerdict {
    FieldVerdict::check(parse_iso_date(value).is_some(), DATE_MESSAGE)
}

pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
