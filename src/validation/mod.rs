//! Applicant field validation.
//!
//! Local counterparts of the provider's field rules, so malformed input
//! gets a typed error before a request is ever sent. Each field has a
//! boolean predicate (`is_valid_*`) and a `Result` form (`validate_*`)
//! used by request types.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

// NANP: optional +1 country code, separators tolerated, area code and
// exchange cannot start with 0 or 1.
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?1?[ .-]?\(?[2-9]\d{2}\)?[ .-]?[2-9]\d{2}[ .-]?\d{4}$")
        .expect("phone pattern is valid")
});

static SIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}[ -]?\d{3}[ -]?\d{3}$").expect("SIN pattern is valid"));

// Canadian postal code, e.g. "M5V 2T6". D, F, I, O, Q and U never appear;
// W and Z never lead.
static POSTAL_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ABCEGHJ-NPRSTVXYabceghj-nprstvxy]\d[ABCEGHJ-NPRSTV-Zabceghj-nprstv-z][ -]?\d[ABCEGHJ-NPRSTV-Zabceghj-nprstv-z]\d$")
        .expect("postal code pattern is valid")
});

/// Error type for applicant field validation.
///
/// Mirrors the provider's 422 responses for the same fields. The SIN
/// variant deliberately omits the rejected value so it never reaches logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Not a well-formed email address.
    #[error("Invalid email address '{0}'")]
    Email(String),

    /// Not a North American phone number.
    #[error("Invalid phone number '{0}'")]
    Phone(String),

    /// Not a nine-digit social insurance number.
    #[error("Invalid social insurance number")]
    Sin,

    /// Not a Canadian postal code.
    #[error("Invalid postal code '{0}'")]
    PostalCode(String),
}

/// Returns true for a well-formed email address.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Returns true for a North American (NANP) phone number.
///
/// Accepts an optional `+1` prefix and common separator styles:
/// `4165550133`, `(416) 555-0133`, `+1 416.555.0133`.
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    PHONE.is_match(value)
}

/// Returns true for a nine-digit Canadian social insurance number.
///
/// Digits may be grouped with single spaces or dashes (`046 454 286`).
/// Only the format is checked; the provider performs the registry match.
#[must_use]
pub fn is_valid_sin(value: &str) -> bool {
    SIN.is_match(value)
}

/// Returns true for a Canadian postal code (`A1A 1A1`), case-insensitive,
/// with an optional space or dash between the halves.
#[must_use]
pub fn is_valid_postal_code(value: &str) -> bool {
    POSTAL_CODE.is_match(value)
}

/// Validates an email address.
///
/// # Errors
///
/// Returns [`ValidationError::Email`] when the value is malformed.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err(ValidationError::Email(value.to_string()))
    }
}

/// Validates a phone number.
///
/// # Errors
///
/// Returns [`ValidationError::Phone`] when the value is malformed.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if is_valid_phone(value) {
        Ok(())
    } else {
        Err(ValidationError::Phone(value.to_string()))
    }
}

/// Validates a social insurance number.
///
/// # Errors
///
/// Returns [`ValidationError::Sin`] when the value is malformed. The
/// rejected value is not echoed back.
pub fn validate_sin(value: &str) -> Result<(), ValidationError> {
    if is_valid_sin(value) {
        Ok(())
    } else {
        Err(ValidationError::Sin)
    }
}

/// Validates a Canadian postal code.
///
/// # Errors
///
/// Returns [`ValidationError::PostalCode`] when the value is malformed.
pub fn validate_postal_code(value: &str) -> Result<(), ValidationError> {
    if is_valid_postal_code(value) {
        Ok(())
    } else {
        Err(ValidationError::PostalCode(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod email {
        use super::*;

        #[test]
        fn accepts_common_forms() {
            assert!(is_valid_email("tenant@example.com"));
            assert!(is_valid_email("first.last+tag@mail.example.co.uk"));
            assert!(is_valid_email("x_1%y@sub-domain.example.io"));
        }

        #[test]
        fn rejects_malformed() {
            assert!(!is_valid_email(""));
            assert!(!is_valid_email("plainaddress"));
            assert!(!is_valid_email("@example.com"));
            assert!(!is_valid_email("user@"));
            assert!(!is_valid_email("user@example"));
            assert!(!is_valid_email("user @example.com"));
        }

        #[test]
        fn validate_reports_the_value() {
            let err = validate_email("nope").unwrap_err();
            assert_eq!(err, ValidationError::Email("nope".to_string()));
        }
    }

    mod phone {
        use super::*;

        #[test]
        fn accepts_nanp_forms() {
            assert!(is_valid_phone("4165550133"));
            assert!(is_valid_phone("416-555-0133"));
            assert!(is_valid_phone("(416) 555-0133"));
            assert!(is_valid_phone("+1 416.555.0133"));
            assert!(is_valid_phone("1-416-555-0133"));
        }

        #[test]
        fn rejects_short_and_invalid_area_codes() {
            assert!(!is_valid_phone("555-0133"));
            assert!(!is_valid_phone("016-555-0133"));
            assert!(!is_valid_phone("116-555-0133"));
            assert!(!is_valid_phone("416-155-0133"));
            assert!(!is_valid_phone("not a phone"));
        }
    }

    mod sin {
        use super::*;

        #[test]
        fn accepts_nine_digits_with_grouping() {
            assert!(is_valid_sin("046454286"));
            assert!(is_valid_sin("046 454 286"));
            assert!(is_valid_sin("046-454-286"));
        }

        #[test]
        fn rejects_wrong_lengths_and_characters() {
            assert!(!is_valid_sin("04645428"));
            assert!(!is_valid_sin("0464542861"));
            assert!(!is_valid_sin("046 454 28a"));
            assert!(!is_valid_sin(""));
        }

        #[test]
        fn error_does_not_echo_the_value() {
            let err = validate_sin("123").unwrap_err();
            assert_eq!(err.to_string(), "Invalid social insurance number");
        }
    }

    mod postal_code {
        use super::*;

        #[test]
        fn accepts_canadian_codes() {
            assert!(is_valid_postal_code("M5V 2T6"));
            assert!(is_valid_postal_code("M5V2T6"));
            assert!(is_valid_postal_code("m5v 2t6"));
            assert!(is_valid_postal_code("K1A-0B1"));
        }

        #[test]
        fn rejects_forbidden_letters_and_shapes() {
            // D, F, I, O, Q, U never appear in any position
            assert!(!is_valid_postal_code("D5V 2T6"));
            assert!(!is_valid_postal_code("M5D 2T6"));
            // W and Z cannot lead
            assert!(!is_valid_postal_code("W5V 2T6"));
            assert!(!is_valid_postal_code("99999"));
            assert!(!is_valid_postal_code("M5V 2T"));
        }
    }
}
