use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::error::AppError;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
        .expect("email regex should compile")
});

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("url regex should compile")
});

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9(][0-9 ().-]*$").expect("phone regex should compile")
});

/// Serde helper for PATCH semantics on nullable fields.
///
/// * JSON field absent  => `None`          (don't update)
/// * JSON field = null  => `Some(None)`    (set to NULL)
/// * JSON field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Required, non-blank text of at most `max` characters (after trimming).
pub fn validate_text(field: &'static str, value: &str, max: usize) -> Result<(), AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::field(field, format!("{field} may not be blank")));
    }
    if value.chars().count() > max {
        return Err(AppError::field(
            field,
            format!("{field} must be at most {max} characters"),
        ));
    }
    Ok(())
}

/// Optional text: blank is allowed, but the length limit still applies.
pub fn validate_optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), AppError> {
    if let Some(value) = value
        && value.trim().chars().count() > max
    {
        return Err(AppError::field(
            field,
            format!("{field} must be at most {max} characters"),
        ));
    }
    Ok(())
}

/// Free-form body text (descriptions, lead details). Must not be blank.
pub fn validate_body(field: &'static str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() || value.len() > 1_000_000 {
        return Err(AppError::field(
            field,
            format!("{field} must be non-empty and at most 1MB"),
        ));
    }
    Ok(())
}

pub fn validate_email(field: &'static str, value: &str) -> Result<(), AppError> {
    let value = value.trim();
    if value.chars().count() > 254 || !EMAIL_PATTERN.is_match(value) {
        return Err(AppError::field(field, "Enter a valid email address."));
    }
    Ok(())
}

pub fn validate_url(field: &'static str, value: &str) -> Result<(), AppError> {
    let value = value.trim();
    if value.chars().count() > 200 || !URL_PATTERN.is_match(value) {
        return Err(AppError::field(field, "Enter a valid URL."));
    }
    Ok(())
}

pub fn validate_phone(field: &'static str, value: &str) -> Result<(), AppError> {
    validate_text(field, value, 20)?;
    if !PHONE_PATTERN.is_match(value.trim()) {
        return Err(AppError::field(field, "Enter a valid phone number."));
    }
    Ok(())
}

const PRICE_DIGITS: u32 = 10;
const PRICE_DECIMALS: u32 = 2;

/// Prices are non-negative and fit a `DECIMAL(10, 2)` column.
pub fn validate_price(field: &'static str, price: Decimal) -> Result<(), AppError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(AppError::field(field, format!("{field} must be >= 0")));
    }
    if price.normalize().scale() > PRICE_DECIMALS {
        return Err(AppError::field(
            field,
            format!("{field} must have at most {PRICE_DECIMALS} decimal places"),
        ));
    }
    if price.trunc() >= Decimal::from(10_i64.pow(PRICE_DIGITS - PRICE_DECIMALS)) {
        return Err(AppError::field(
            field,
            format!(
                "{field} must have at most {} digits before the decimal point",
                PRICE_DIGITS - PRICE_DECIMALS
            ),
        ));
    }
    Ok(())
}

pub fn validate_date_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), AppError> {
    if end < start {
        return Err(AppError::field(
            "endDate",
            "endDate must not be before startDate",
        ));
    }
    Ok(())
}

/// Trim and turn blank strings into `None`.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
