//! Staff password complexity policy.

use std::env;

use thiserror::Error;

/// Hard upper bound on password length.
pub const MAX_PASSWORD_LENGTH: usize = 50;

const DEFAULT_MIN_LENGTH: usize = 12;
const MIN_LENGTH_ENV: &str = "TELLER_MIN_PASSWORD_LENGTH";

/// A way a candidate password fails the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordViolation {
    #[error("password must be at least {0} characters long")]
    TooShort(usize),
    #[error("password must be at most 50 characters long")]
    TooLong,
    #[error("password must contain at least one uppercase letter")]
    MissingUppercase,
    #[error("password must contain at least one lowercase letter")]
    MissingLowercase,
    #[error("password must contain at least one number")]
    MissingDigit,
    #[error("password must contain at least one special character")]
    MissingSpecial,
    #[error("password must not repeat a character consecutively")]
    RepeatedCharacter,
    #[error("password must not contain spaces")]
    ContainsWhitespace,
}

/// Password complexity policy applied to staff credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
        }
    }
}

impl PasswordPolicy {
    /// Load the policy from `TELLER_MIN_PASSWORD_LENGTH`, falling back to
    /// the default minimum length.
    pub fn from_env() -> Self {
        let min_length = env::var(MIN_LENGTH_ENV)
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_MIN_LENGTH);
        Self { min_length }
    }

    /// Every rule the candidate breaks, in a fixed order.
    ///
    /// An empty candidate yields no violations: required-ness is the form
    /// layer's check, not the policy's.
    pub fn violations(&self, password: &str) -> Vec<PasswordViolation> {
        if password.is_empty() {
            return Vec::new();
        }
        let mut violations = Vec::new();
        let length = password.chars().count();
        if length < self.min_length {
            violations.push(PasswordViolation::TooShort(self.min_length));
        }
        if length > MAX_PASSWORD_LENGTH {
            violations.push(PasswordViolation::TooLong);
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            violations.push(PasswordViolation::MissingUppercase);
        }
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            violations.push(PasswordViolation::MissingLowercase);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            violations.push(PasswordViolation::MissingDigit);
        }
        if !password.chars().any(is_special) {
            violations.push(PasswordViolation::MissingSpecial);
        }
        if has_consecutive_repeat(password) {
            violations.push(PasswordViolation::RepeatedCharacter);
        }
        if password.chars().any(char::is_whitespace) {
            violations.push(PasswordViolation::ContainsWhitespace);
        }
        violations
    }

    pub fn is_valid(&self, password: &str) -> bool {
        !password.is_empty() && self.violations(password).is_empty()
    }
}

/// Anything that is not alphanumeric, an underscore, or whitespace.
fn is_special(c: char) -> bool {
    !c.is_alphanumeric() && c != '_' && !c.is_whitespace()
}

fn has_consecutive_repeat(password: &str) -> bool {
    password
        .chars()
        .zip(password.chars().skip(1))
        .any(|(current, next)| current == next)
}
