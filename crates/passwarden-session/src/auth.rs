//! Master-password operations.
//!
//! Input is checked locally first ([`crate::forms`]); only then is the
//! vault called. A vault rejection is logged with its detail but reaches
//! the caller as the generic [`AuthError::Failed`], and no session state
//! is touched.

use tracing::{debug, info, warn};

use crate::client::VaultClient;
use crate::error::{AuthError, AuthOperation, VaultError};
use crate::forms::{
    validate_login, validate_master_password_change, validate_new_master_password,
    CredentialLimits,
};

fn failed(operation: AuthOperation, err: &VaultError) -> AuthError {
    warn!(operation = ?operation, error = %err, "authentication rejected");
    AuthError::Failed(operation)
}

/// Create the master password on first run.
///
/// # Errors
///
/// [`AuthError::Input`] for invalid input, [`AuthError::Failed`] when the
/// vault rejects the request.
pub async fn create_master_password<C: VaultClient + ?Sized>(
    client: &C,
    password: &str,
    confirmation: &str,
    limits: &CredentialLimits,
) -> Result<(), AuthError> {
    validate_new_master_password(password, confirmation, limits)?;
    debug!("creating master password");
    client
        .create_master_password(password)
        .await
        .map_err(|e| failed(AuthOperation::CreateMasterPassword, &e))?;
    info!("master password created");
    Ok(())
}

/// Rotate the master password.
///
/// # Errors
///
/// [`AuthError::Input`] for invalid input, [`AuthError::Failed`] when the
/// vault rejects the request (including a wrong current password).
pub async fn change_master_password<C: VaultClient + ?Sized>(
    client: &C,
    old_password: &str,
    new_password: &str,
    confirmation: &str,
    limits: &CredentialLimits,
) -> Result<(), AuthError> {
    validate_master_password_change(old_password, new_password, confirmation, limits)?;
    debug!("changing master password");
    client
        .change_master_password(old_password, new_password)
        .await
        .map_err(|e| failed(AuthOperation::ChangeMasterPassword, &e))?;
    info!("master password changed");
    Ok(())
}

/// Verify the master password with the vault.
///
/// # Errors
///
/// [`AuthError::Input`] for blank or overlong input, [`AuthError::Failed`]
/// when the vault rejects the password.
pub async fn login<C: VaultClient + ?Sized>(
    client: &C,
    password: &str,
    limits: &CredentialLimits,
) -> Result<(), AuthError> {
    validate_login(password, limits)?;
    debug!("logging in");
    client
        .login(password)
        .await
        .map_err(|e| failed(AuthOperation::Login, &e))?;
    info!("login accepted");
    Ok(())
}
