//! Input validation for registration and login forms.
//!
//! All checks return [`CadenzaError::Validation`] with a message meant to
//! be surfaced inline next to the offending field.

use crate::error::{CadenzaError, Result};

/// Minimum password length.
pub const PASSWORD_MIN_LEN: usize = 6;
/// Maximum password length.
pub const PASSWORD_MAX_LEN: usize = 32;

/// Validate an email address.
///
/// Accepts `local@domain` where the local part is word characters
/// optionally separated by `- + . '` and the domain is word characters
/// separated by `- .` with at least one dot.
pub fn validate_email(email: &str) -> Result<()> {
    fn is_word(c: char) -> bool {
        c.is_alphanumeric() || c == '_'
    }

    // Groups of word chars joined by single separator chars, e.g. "a.b-c".
    fn well_formed(part: &str, separators: &[char]) -> bool {
        let mut prev_was_sep = true; // must not start with a separator
        let mut saw_word = false;
        for c in part.chars() {
            if is_word(c) {
                prev_was_sep = false;
                saw_word = true;
            } else if separators.contains(&c) {
                if prev_was_sep {
                    return false;
                }
                prev_was_sep = true;
            } else {
                return false;
            }
        }
        saw_word && !prev_was_sep
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            well_formed(local, &['-', '+', '.', '\''])
                && well_formed(domain, &['-', '.'])
                && domain.contains('.')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(CadenzaError::validation("Invalid email format"))
    }
}

/// Validate the password policy: 6–32 characters, at least one letter and
/// one digit.
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(CadenzaError::validation(
            "Password must be at least 6 characters",
        ));
    }
    if password.chars().count() > PASSWORD_MAX_LEN {
        return Err(CadenzaError::validation(
            "Password must not exceed 32 characters",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(CadenzaError::validation(
            "Password must contain at least one digit",
        ));
    }
    if !password.chars().any(char::is_alphabetic) {
        return Err(CadenzaError::validation(
            "Password must contain at least one letter",
        ));
    }
    Ok(())
}

/// Check that a password and its confirmation match.
pub fn ensure_passwords_match(password: &str, confirmation: &str) -> Result<()> {
    if password == confirmation {
        Ok(())
    } else {
        Err(CadenzaError::validation("Passwords do not match"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("misha.smirnov@gmail.com").is_ok());
        assert!(validate_email("first+tag@sub.example.org").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(validate_email("").is_err());
        assert!(validate_email("plainaddress").is_err());
        assert!(validate_email("@missing-local.com").is_err());
        assert!(validate_email("user@nodot").is_err());
        assert!(validate_email("user@.leading.dot").is_err());
        assert!(validate_email("user..double@x.com").is_err());
        assert!(validate_email("user@domain.").is_err());
    }

    #[test]
    fn password_policy() {
        assert!(validate_password("abc123").is_ok());
        assert!(validate_password("a1b2c").is_err()); // too short
        assert!(validate_password(&"a1".repeat(20)).is_err()); // too long
        assert!(validate_password("abcdef").is_err()); // no digit
        assert!(validate_password("123456").is_err()); // no letter
    }

    #[test]
    fn confirmation_must_match() {
        assert!(ensure_passwords_match("abc123", "abc123").is_ok());
        assert!(ensure_passwords_match("abc123", "abc124").is_err());
    }
}
