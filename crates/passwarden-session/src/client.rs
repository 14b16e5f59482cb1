//! The vault service boundary.
//!
//! The vault service owns encryption, durable storage and master-password
//! verification. The session controller reaches it only through
//! [`VaultClient`]: one request, one response, no streaming. Transport
//! (IPC, local RPC, an in-process backend) is the implementor's concern.

use std::collections::BTreeSet;

use async_trait::async_trait;
use passwarden_core::{DecryptedPasswordEntry, SessionState, UserSettings};

use crate::error::VaultError;

/// Request/response interface to the vault service.
///
/// Each call is atomic from the caller's point of view: it either applies
/// fully or returns a [`VaultError`]. The session controller never retries.
#[async_trait]
pub trait VaultClient: Send + Sync {
    /// Whether initialized vault data exists (drives first-run routing).
    async fn existence_check(&self) -> Result<bool, VaultError>;

    /// Create the master password on first run.
    async fn create_master_password(&self, password: &str) -> Result<(), VaultError>;

    /// Replace the master password after verifying the old one.
    async fn change_master_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), VaultError>;

    /// Verify the master password and open the vault session.
    async fn login(&self, password: &str) -> Result<(), VaultError>;

    /// Close the vault session.
    async fn logout(&self) -> Result<(), VaultError>;

    /// Issue a blank entry with vault-assigned `id` and `creation_date`.
    async fn new_entry(&self) -> Result<DecryptedPasswordEntry, VaultError>;

    /// Store an entry.
    async fn add_entry(&self, entry: &DecryptedPasswordEntry) -> Result<(), VaultError>;

    /// Delete the entry with this identifier.
    async fn remove_entry(&self, id: &str) -> Result<(), VaultError>;

    /// Read the persisted generation policy.
    async fn get_settings(&self) -> Result<UserSettings, VaultError>;

    /// Persist a generation policy.
    async fn update_settings(&self, settings: &UserSettings) -> Result<(), VaultError>;

    /// Generate a password from the *persisted* policy.
    async fn generate_password(&self) -> Result<String, VaultError>;

    /// Read the full decrypted session snapshot.
    async fn get_session_state(&self) -> Result<SessionState, VaultError>;

    /// Persist a full session snapshot.
    async fn save_session_state(
        &self,
        settings: &UserSettings,
        entries: &[DecryptedPasswordEntry],
    ) -> Result<(), VaultError>;

    /// Distinct categories, deduplicated by exact match.
    async fn list_categories(&self) -> Result<BTreeSet<String>, VaultError>;

    /// Favorite entries.
    async fn list_favorites(&self) -> Result<Vec<DecryptedPasswordEntry>, VaultError>;
}
