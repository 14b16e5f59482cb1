//! First screen selection.

use tracing::warn;

use crate::client::VaultClient;
use crate::error::VaultError;

/// Where the application starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Vault data exists: ask for the master password.
    Login,
    /// No usable vault data: create a master password.
    SetupMasterPassword,
}

/// Map the vault's existence check to a start route.
///
/// A failed check (unreadable or corrupted data) routes to setup.
#[must_use]
pub const fn initial_route(existence: &Result<bool, VaultError>) -> Route {
    match existence {
        Ok(true) => Route::Login,
        Ok(false) | Err(_) => Route::SetupMasterPassword,
    }
}

/// Ask the vault and pick the start route.
pub async fn resolve_initial_route<C: VaultClient + ?Sized>(client: &C) -> Route {
    let existence = client.existence_check().await;
    if let Err(err) = &existence {
        warn!(error = %err, "existence check failed; routing to setup");
    }
    initial_route(&existence)
}
