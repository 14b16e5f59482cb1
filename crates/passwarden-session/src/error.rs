//! Error types for `passwarden-session`.

use thiserror::Error;

use crate::busy::Form;

/// Rejection reported by a [`crate::VaultClient`] implementation.
///
/// Every vault call either applies completely or fails with one of these;
/// partial application is never reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    /// The vault service could not be reached.
    #[error("vault service unavailable")]
    Unavailable,

    /// The vault service refused the request.
    #[error("vault rejected the request: {0}")]
    Rejected(String),

    /// Master password verification failed.
    #[error("invalid master password")]
    InvalidPassword,

    /// The vault holds no record with this identifier.
    #[error("vault record not found: {0}")]
    NotFound(String),
}

/// Field-level input problems on the credential and entry forms.
///
/// The `Display` text is the message rendered under the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Empty or whitespace-only password field.
    #[error("Password is required")]
    PasswordRequired,

    /// Login password longer than the configured maximum.
    #[error("Invalid password attempt")]
    PasswordTooLong,

    /// New password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// New master password shorter than the configured minimum.
    #[error("Master password must be at least {0} characters")]
    PasswordTooShort(usize),

    /// Entry saved without a title.
    #[error("Title is required")]
    TitleRequired,
}

/// Authentication operations, used to pick the generic failure banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOperation {
    /// First-run master password creation.
    CreateMasterPassword,
    /// Session login.
    Login,
    /// Master password rotation.
    ChangeMasterPassword,
}

impl AuthOperation {
    /// Banner shown when the vault rejects the attempt.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::CreateMasterPassword => "Failed to create master password",
            Self::Login => "Failed to login",
            Self::ChangeMasterPassword => "Failed to change master password",
        }
    }
}

/// Failure of an authentication attempt.
///
/// `Failed` deliberately carries no vault detail: the user only learns
/// that the attempt failed, never why.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Input rejected before any vault call.
    #[error(transparent)]
    Input(#[from] FormError),

    /// The vault rejected the attempt.
    #[error("{}", .0.failure_message())]
    Failed(AuthOperation),
}

/// Errors produced by session controller operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A vault call was rejected; the local snapshot is unchanged.
    #[error(transparent)]
    Vault(#[from] VaultError),

    /// Authentication attempt failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Form input rejected before any vault call.
    #[error(transparent)]
    Form(#[from] FormError),

    /// Local lookup found no entry with this identifier.
    #[error("entry not found: {0}")]
    EntryNotFound(String),

    /// Another operation is already in flight for this form.
    #[error("{0} form is busy")]
    Busy(Form),

    /// The user declined a confirmation step.
    #[error("action cancelled")]
    Cancelled,

    /// Global tracing subscriber could not be installed.
    #[error("logging setup failed: {0}")]
    Logging(String),
}
