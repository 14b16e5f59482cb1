//! Input checks run before a form issues its vault call.
//!
//! Lengths are counted in characters, not bytes.

use crate::config::ClientConfig;
use crate::error::FormError;

/// Default minimum length of a new master password.
pub const DEFAULT_MIN_MASTER_PASSWORD_LENGTH: usize = 8;

/// Default maximum length accepted on the login form.
pub const DEFAULT_MAX_LOGIN_PASSWORD_LENGTH: usize = 128;

/// Length bounds applied to master-password input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialLimits {
    /// Shortest accepted new master password.
    pub min_master_password_length: usize,
    /// Longest accepted login attempt.
    pub max_login_password_length: usize,
}

impl Default for CredentialLimits {
    fn default() -> Self {
        Self {
            min_master_password_length: DEFAULT_MIN_MASTER_PASSWORD_LENGTH,
            max_login_password_length: DEFAULT_MAX_LOGIN_PASSWORD_LENGTH,
        }
    }
}

impl From<&ClientConfig> for CredentialLimits {
    fn from(config: &ClientConfig) -> Self {
        Self {
            min_master_password_length: config.min_master_password_length,
            max_login_password_length: config.max_login_password_length,
        }
    }
}

/// Check a login attempt.
///
/// # Errors
///
/// [`FormError::PasswordRequired`] for blank input,
/// [`FormError::PasswordTooLong`] above the configured maximum.
pub fn validate_login(password: &str, limits: &CredentialLimits) -> Result<(), FormError> {
    if password.trim().is_empty() {
        return Err(FormError::PasswordRequired);
    }
    if password.chars().count() > limits.max_login_password_length {
        return Err(FormError::PasswordTooLong);
    }
    Ok(())
}

/// Check a new master password and its confirmation.
///
/// # Errors
///
/// [`FormError::PasswordRequired`], [`FormError::PasswordMismatch`] or
/// [`FormError::PasswordTooShort`], checked in that order.
pub fn validate_new_master_password(
    password: &str,
    confirmation: &str,
    limits: &CredentialLimits,
) -> Result<(), FormError> {
    if password.trim().is_empty() || confirmation.trim().is_empty() {
        return Err(FormError::PasswordRequired);
    }
    if password != confirmation {
        return Err(FormError::PasswordMismatch);
    }
    if password.chars().count() < limits.min_master_password_length {
        return Err(FormError::PasswordTooShort(
            limits.min_master_password_length,
        ));
    }
    Ok(())
}

/// Check a master password change.
///
/// # Errors
///
/// [`FormError::PasswordRequired`] when the current password is blank,
/// otherwise as [`validate_new_master_password`].
pub fn validate_master_password_change(
    old_password: &str,
    new_password: &str,
    confirmation: &str,
    limits: &CredentialLimits,
) -> Result<(), FormError> {
    if old_password.trim().is_empty() {
        return Err(FormError::PasswordRequired);
    }
    validate_new_master_password(new_password, confirmation, limits)
}

/// Check an entry title.
///
/// # Errors
///
/// [`FormError::TitleRequired`] for an empty title.
pub fn validate_title(title: &str) -> Result<(), FormError> {
    if title.trim().is_empty() {
        return Err(FormError::TitleRequired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_login_rejected() {
        let limits = CredentialLimits::default();
        assert_eq!(validate_login("", &limits), Err(FormError::PasswordRequired));
        assert_eq!(validate_login("   ", &limits), Err(FormError::PasswordRequired));
    }

    #[test]
    fn overlong_login_rejected() {
        let limits = CredentialLimits::default();
        let long = "x".repeat(129);
        assert_eq!(validate_login(&long, &limits), Err(FormError::PasswordTooLong));
        assert!(validate_login(&"x".repeat(128), &limits).is_ok());
    }

    #[test]
    fn new_master_password_checks_in_order() {
        let limits = CredentialLimits::default();
        assert_eq!(
            validate_new_master_password("", "abc", &limits),
            Err(FormError::PasswordRequired)
        );
        assert_eq!(
            validate_new_master_password("abc", "abd", &limits),
            Err(FormError::PasswordMismatch)
        );
        assert_eq!(
            validate_new_master_password("short", "short", &limits),
            Err(FormError::PasswordTooShort(8))
        );
        assert!(validate_new_master_password("long enough", "long enough", &limits).is_ok());
    }

    #[test]
    fn length_counts_characters() {
        let limits = CredentialLimits::default();
        // 8 characters, 16 bytes.
        let pw = "éééééééé";
        assert!(validate_new_master_password(pw, pw, &limits).is_ok());
    }

    #[test]
    fn change_requires_old_password() {
        let limits = CredentialLimits::default();
        assert_eq!(
            validate_master_password_change(" ", "new password", "new password", &limits),
            Err(FormError::PasswordRequired)
        );
        assert!(
            validate_master_password_change("old", "new password", "new password", &limits)
                .is_ok()
        );
    }

    #[test]
    fn too_short_message_names_minimum() {
        assert_eq!(
            FormError::PasswordTooShort(12).to_string(),
            "Master password must be at least 12 characters"
        );
    }

    #[test]
    fn title_required() {
        assert_eq!(validate_title(""), Err(FormError::TitleRequired));
        assert!(validate_title("Bank").is_ok());
    }
}
