//! Client-side credential policy checks.
//!
//! Advisory UX gates only: they block form submission and never contact the
//! network, but the server re-validates everything. Pure functions — the
//! form passes its values in explicitly, nothing is looked up ambiently.

use crate::error::{CredentialField, ValidationError};

const USERNAME_MIN: usize = 2;
const USERNAME_MAX: usize = 32;
const PASSWORD_MIN: usize = 8;

fn fail(field: CredentialField, message: &str) -> ValidationError {
    ValidationError {
        field,
        message: message.to_string(),
    }
}

/// Registration form values, passed explicitly into [`validate_registration`].
#[derive(Debug, Clone, Copy)]
pub struct RegistrationForm<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
    pub accepted_terms: bool,
}

/// Email must be non-empty and shaped like `local@domain.tld`.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let shaped = (|| {
        if email.is_empty() || email.chars().any(char::is_whitespace) {
            return false;
        }
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.contains('@') {
            return false;
        }
        let Some((host, tld)) = domain.rsplit_once('.') else {
            return false;
        };
        !host.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
    })();

    if shaped {
        Ok(())
    } else {
        Err(fail(CredentialField::Email, "Enter a valid email address"))
    }
}

/// Username: 2–32 characters, letters/digits/dots/underscores, starts with
/// a letter.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(fail(
            CredentialField::Username,
            "Username must be between 2 and 32 characters",
        ));
    }
    if !username
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
    {
        return Err(fail(
            CredentialField::Username,
            "Username must start with a letter",
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
    {
        return Err(fail(
            CredentialField::Username,
            "Username may only contain letters, numbers, dots and underscores",
        ));
    }
    Ok(())
}

/// Password strength: length ≥ 8, at least one uppercase letter, one
/// lowercase letter, one digit, and one special character. The first
/// failing rule's message is reported.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < PASSWORD_MIN {
        return Err(fail(
            CredentialField::Password,
            "Password must be at least 8 characters",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(fail(
            CredentialField::Password,
            "Password must contain at least one uppercase letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(fail(
            CredentialField::Password,
            "Password must contain at least one lowercase letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(fail(
            CredentialField::Password,
            "Password must contain at least one number",
        ));
    }
    if password.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(fail(
            CredentialField::Password,
            "Password must contain at least one special character",
        ));
    }
    Ok(())
}

/// Confirmation must match the password exactly.
pub fn validate_confirm_password(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password == confirm {
        Ok(())
    } else {
        Err(fail(
            CredentialField::ConfirmPassword,
            "Passwords do not match",
        ))
    }
}

/// Terms must be explicitly accepted before submission.
pub fn validate_terms(accepted: bool) -> Result<(), ValidationError> {
    if accepted {
        Ok(())
    } else {
        Err(fail(
            CredentialField::Terms,
            "You must agree to the terms and privacy policy",
        ))
    }
}

/// Full registration gate — the first failing field wins.
pub fn validate_registration(form: &RegistrationForm<'_>) -> Result<(), ValidationError> {
    validate_username(form.username)?;
    validate_email(form.email)?;
    validate_password(form.password)?;
    validate_confirm_password(form.password, form.confirm_password)?;
    validate_terms(form.accepted_terms)
}
