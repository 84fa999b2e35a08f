//! Field predicates shared by the dialogs.

use std::sync::LazyLock;

use regex::Regex;

/// Minimum number of digits in a phone number.
pub const MIN_PHONE_DIGITS: usize = 10;

pub const PHONE_MESSAGE: &str = "Phone number must be at least 10 digits";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";

/// `local@domain.tld` with no whitespace and a single `@`.
#[allow(clippy::expect_used)]
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex")
});

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Number of ASCII digits, ignoring separators like `(`, `-` and spaces.
#[must_use]
pub fn phone_digit_count(phone: &str) -> usize {
    phone.chars().filter(char::is_ascii_digit).count()
}

#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    phone_digit_count(phone) >= MIN_PHONE_DIGITS
}

/// Non-empty after trimming.
#[must_use]
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}
