//! Input validation for provisioning and updates.
//!
//! These checks run before any external call; a request that fails here
//! never reaches the Identity Provider.

use aulario_core::AularioError;
use rand::Rng;

/// Minimum password length accepted by the strength policy.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validate `local@domain.tld` structure.
///
/// Intentionally a structural check, not full RFC 5322: one `@`, non-empty
/// local part, and a domain containing a dot with non-empty labels.
pub fn validate_email(email: &str) -> Result<(), AularioError> {
    let invalid = || AularioError::validation("email", format!("invalid email format: {email}"));

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || local.contains(char::is_whitespace) || domain.contains('@') {
        return Err(invalid());
    }
    let (host, tld) = domain.rsplit_once('.').ok_or_else(invalid)?;
    if host.is_empty() || tld.is_empty() || domain.contains(char::is_whitespace) {
        return Err(invalid());
    }
    Ok(())
}

/// Validate the password strength policy: length >= 8, at least one
/// uppercase letter, one lowercase letter and one digit.
pub fn validate_password(password: &str) -> Result<(), AularioError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AularioError::validation(
            "password",
            format!("password must be at least {MIN_PASSWORD_LENGTH} characters"),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(AularioError::validation(
            "password",
            "password must contain at least one uppercase letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(AularioError::validation(
            "password",
            "password must contain at least one lowercase letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AularioError::validation(
            "password",
            "password must contain at least one digit",
        ));
    }
    Ok(())
}

/// Derive a provider username from a display name.
///
/// Lowercased, alphanumeric only, plus a random numeric suffix to dodge
/// collisions. Falls back to "usuario" when the name has no usable chars.
pub fn derive_username(name: &str) -> String {
    let base: String = name
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    let base = if base.is_empty() { "usuario" } else { &base };
    let suffix: u32 = rand::thread_rng().gen_range(0..10_000);
    format!("{base}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        for email in ["ana@example.com", "a.b+c@sub.dominio.mx"] {
            assert!(validate_email(email).is_ok(), "{email}");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in [
            "",
            "ana",
            "@example.com",
            "ana@",
            "ana@example",
            "ana@exam ple.com",
            "ana ruiz@example.com",
            "ana@@example.com",
        ] {
            assert!(validate_email(email).is_err(), "{email}");
        }
    }

    #[test]
    fn password_policy_boundaries() {
        assert!(validate_password("Passw0rd").is_ok());
        for bad in ["short", "alllowercase1", "ALLUPPER1", "NoDigitsHere"] {
            assert!(validate_password(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn username_is_lowercase_alphanumeric_with_suffix() {
        let username = derive_username("Ana Ruiz-García");
        assert!(username.starts_with("anaruizgarca") || username.starts_with("anaruiz"));
        assert!(username.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(username.chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn username_falls_back_for_empty_names() {
        let username = derive_username("¡¡¡");
        assert!(username.starts_with("usuario"));
    }
}
