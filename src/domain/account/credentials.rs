//! Normalized identity fields for account holders.
//!
//! Every uniqueness comparison happens on the normalized form, so the
//! normalization functions are shared between registration (which also
//! validates) and the verification lookups (which only normalize).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Minimum plaintext credential length accepted at registration.
pub const MIN_CREDENTIAL_LENGTH: usize = 6;

/// Trims surrounding whitespace from a username.
pub fn normalize_username(raw: &str) -> String {
    raw.trim().to_string()
}

/// Trims and lowercases an email address.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Strips every non-digit character from a national id (CPF).
pub fn normalize_national_id(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Account login name, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let value = normalize_username(raw);
        if value.is_empty() {
            return Err(ValidationError::empty_field("username"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Email address, trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let value = normalize_email(raw);
        if value.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }

        let (local, domain) = value
            .split_once('@')
            .ok_or_else(|| ValidationError::invalid_format("email", "missing @ symbol"))?;

        if local.is_empty() || domain.contains('@') {
            return Err(ValidationError::invalid_format("email", "malformed address"));
        }
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(ValidationError::invalid_format("email", "malformed domain"));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format("email", "contains whitespace"));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Brazilian individual taxpayer id (CPF), stored as 11 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NationalId(String);

impl NationalId {
    /// Normalizes to digits and validates length and check digits.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let value = normalize_national_id(raw);
        if value.is_empty() {
            return Err(ValidationError::empty_field("nationalId"));
        }
        if value.len() != 11 {
            return Err(ValidationError::invalid_format(
                "nationalId",
                "must contain exactly 11 digits",
            ));
        }

        let digits: Vec<u32> = value.chars().filter_map(|c| c.to_digit(10)).collect();
        if digits.iter().all(|d| *d == digits[0]) {
            return Err(ValidationError::invalid_format(
                "nationalId",
                "repeated digit sequence",
            ));
        }
        if check_digit(&digits[..9]) != digits[9] || check_digit(&digits[..10]) != digits[10] {
            return Err(ValidationError::invalid_format(
                "nationalId",
                "check digits do not match",
            ));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mod-11 check digit over a CPF prefix of 9 or 10 digits.
fn check_digit(prefix: &[u32]) -> u32 {
    let weight_start = prefix.len() as u32 + 1;
    let sum: u32 = prefix
        .iter()
        .enumerate()
        .map(|(i, d)| d * (weight_start - i as u32))
        .sum();
    let rest = (sum * 10) % 11;
    if rest == 10 {
        0
    } else {
        rest
    }
}

/// Validates a plaintext credential before it is hashed.
pub fn validate_credential(plain: &str) -> Result<(), ValidationError> {
    if plain.is_empty() {
        return Err(ValidationError::empty_field("passwordCredential"));
    }
    if plain.chars().count() < MIN_CREDENTIAL_LENGTH {
        return Err(ValidationError::too_short(
            "passwordCredential",
            MIN_CREDENTIAL_LENGTH,
        ));
    }
    Ok(())
}

/// Opaque password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn username_is_trimmed() {
        assert_eq!(Username::new("  joao \t").unwrap().as_str(), "joao");
    }

    #[test]
    fn blank_username_is_rejected() {
        assert_eq!(
            Username::new("   ").unwrap_err(),
            ValidationError::empty_field("username")
        );
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(Email::new("  Joao@X.COM ").unwrap().as_str(), "joao@x.com");
    }

    #[test]
    fn email_without_at_is_rejected() {
        let err = Email::new("joao.x.com").unwrap_err();
        assert_eq!(err.field(), "email");
    }

    #[test]
    fn email_without_dotted_domain_is_rejected() {
        assert!(Email::new("joao@localhost").is_err());
        assert!(Email::new("joao@x.").is_err());
        assert!(Email::new("@x.com").is_err());
    }

    #[test]
    fn national_id_strips_formatting() {
        let id = NationalId::new("529.982.247-25").unwrap();
        assert_eq!(id.as_str(), "52998224725");
    }

    #[test]
    fn national_id_accepts_known_valid_numbers() {
        for cpf in ["52998224725", "11144477735", "39053344705"] {
            assert!(NationalId::new(cpf).is_ok(), "{} should be valid", cpf);
        }
    }

    #[test]
    fn national_id_rejects_wrong_check_digit() {
        assert!(NationalId::new("52998224726").is_err());
    }

    #[test]
    fn national_id_rejects_repeated_digits() {
        assert!(NationalId::new("11111111111").is_err());
    }

    #[test]
    fn national_id_rejects_wrong_length() {
        let err = NationalId::new("1234").unwrap_err();
        assert_eq!(err.field(), "nationalId");
    }

    #[test]
    fn short_credential_is_rejected() {
        assert!(validate_credential("abc").is_err());
        assert!(validate_credential("abcdef").is_ok());
    }

    #[test]
    fn password_hash_debug_is_redacted() {
        let hash = PasswordHash::from_phc("$argon2id$v=19$secret");
        assert_eq!(format!("{:?}", hash), "PasswordHash(***)");
    }

    proptest! {
        #[test]
        fn normalized_email_is_idempotent(raw in "[ A-Za-z0-9@.]{0,30}") {
            let once = normalize_email(&raw);
            prop_assert_eq!(normalize_email(&once), once.clone());
        }

        #[test]
        fn normalized_national_id_is_digits_only(raw in ".{0,30}") {
            prop_assert!(normalize_national_id(&raw).chars().all(|c| c.is_ascii_digit()));
        }
    }
}
