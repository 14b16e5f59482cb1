//! Session state manager.
//!
//! [`SessionManager`] owns the decrypted [`SessionState`] of one
//! authenticated session. Every mutation goes to the vault first; the
//! local snapshot changes only after the vault acknowledges, so a rejected
//! call leaves it untouched.
//!
//! The manager takes `&mut self` for mutations, so two mutations can never
//! interleave on the same snapshot. Readers borrow the state and see either
//! the value before or after a mutation, never a mixture.

use std::collections::BTreeSet;

use passwarden_core::{
    apply_edit, filter, normalize, DecryptedPasswordEntry, PolicyViolation, SessionState,
    SettingsEdit, UserSettings,
};
use tracing::{debug, info, warn};
use zeroize::Zeroize;

use crate::auth;
use crate::client::VaultClient;
use crate::confirm::{Confirm, ConfirmAction};
use crate::error::{SessionError, VaultError};
use crate::forms::{validate_title, CredentialLimits};

// ---------------------------------------------------------------------------
// Local mutations
// ---------------------------------------------------------------------------

/// A change to the local snapshot, applied after the vault acknowledged it.
enum Mutation {
    ReplaceSettings(UserSettings),
    AppendEntry(DecryptedPasswordEntry),
    RemoveEntry(String),
}

fn apply(state: &mut SessionState, mutation: Mutation) {
    match mutation {
        Mutation::ReplaceSettings(settings) => state.user_settings = settings,
        Mutation::AppendEntry(entry) => state.password_entries.push(entry),
        Mutation::RemoveEntry(id) => {
            let (kept, mut removed): (Vec<_>, Vec<_>) = std::mem::take(&mut state.password_entries)
                .into_iter()
                .partition(|entry| entry.id() != id);
            removed.zeroize();
            state.password_entries = kept;
        }
    }
}

fn rejected(operation: &'static str, err: VaultError) -> SessionError {
    warn!(operation, error = %err, "vault call rejected");
    SessionError::Vault(err)
}

// ---------------------------------------------------------------------------
// SessionManager
// ---------------------------------------------------------------------------

/// Owner of the session snapshot and sole caller of the vault for it.
///
/// The snapshot is wiped on [`SessionManager::logout`] and on drop.
pub struct SessionManager<C> {
    client: C,
    state: SessionState,
}

impl<C> SessionManager<C> {
    /// A manager with an empty snapshot. Call [`SessionManager::fetch`]
    /// (or [`SessionManager::login`]) to load the vault's state.
    pub fn new(client: C) -> Self {
        Self {
            client,
            state: SessionState::default(),
        }
    }

    /// The vault client.
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// The current snapshot.
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// The current generation policy.
    pub const fn settings(&self) -> &UserSettings {
        &self.state.user_settings
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[DecryptedPasswordEntry] {
        &self.state.password_entries
    }

    /// Look up an entry by identifier.
    ///
    /// # Errors
    ///
    /// [`SessionError::EntryNotFound`] if no entry has this identifier.
    pub fn get_entry(&self, id: &str) -> Result<&DecryptedPasswordEntry, SessionError> {
        self.state
            .password_entries
            .iter()
            .find(|entry| entry.id() == id)
            .ok_or_else(|| SessionError::EntryNotFound(id.to_owned()))
    }

    /// Filter and sort the local entries for display.
    ///
    /// See [`passwarden_core::project`].
    pub fn project(
        &self,
        search_term: &str,
        category: &str,
        favorites_only: bool,
    ) -> Vec<&DecryptedPasswordEntry> {
        filter::project(
            &self.state.password_entries,
            search_term,
            category,
            favorites_only,
        )
    }

    /// Favorite entries from the local snapshot, in insertion order.
    pub fn local_favorites(&self) -> Vec<&DecryptedPasswordEntry> {
        filter::favorites(&self.state.password_entries)
    }

    /// Distinct categories of the local snapshot.
    pub fn local_categories(&self) -> BTreeSet<String> {
        filter::categories(&self.state.password_entries)
    }
}

impl<C: VaultClient> SessionManager<C> {
    /// Replace the snapshot with the vault's current state.
    ///
    /// The previous snapshot is wiped.
    ///
    /// # Errors
    ///
    /// [`SessionError::Vault`] if the vault rejects the read; the snapshot
    /// is left unchanged.
    pub async fn fetch(&mut self) -> Result<(), SessionError> {
        let fresh = self
            .client
            .get_session_state()
            .await
            .map_err(|e| rejected("get_session_state", e))?;

        let mut previous = std::mem::replace(&mut self.state, fresh);
        previous.zeroize();

        debug!(
            entries = self.state.password_entries.len(),
            "session state fetched"
        );
        Ok(())
    }

    /// Verify the master password, then load the session.
    ///
    /// # Errors
    ///
    /// [`SessionError::Auth`] if the attempt is rejected (the snapshot is
    /// not touched), [`SessionError::Vault`] if the follow-up fetch fails.
    pub async fn login(
        &mut self,
        password: &str,
        limits: &CredentialLimits,
    ) -> Result<(), SessionError> {
        auth::login(&self.client, password, limits).await?;
        self.fetch().await
    }

    /// Persist `settings` and adopt them locally.
    ///
    /// # Errors
    ///
    /// [`SessionError::Vault`] if the vault rejects the update; the local
    /// settings are left unchanged.
    pub async fn update_settings(&mut self, settings: UserSettings) -> Result<(), SessionError> {
        self.client
            .update_settings(&settings)
            .await
            .map_err(|e| rejected("update_settings", e))?;
        apply(&mut self.state, Mutation::ReplaceSettings(settings));
        debug!("settings updated");
        Ok(())
    }

    /// Replace the local settings with the policy the vault has persisted.
    ///
    /// Entries are left alone.
    ///
    /// # Errors
    ///
    /// [`SessionError::Vault`] if the vault rejects the read; the local
    /// settings are left unchanged.
    pub async fn reload_settings(&mut self) -> Result<(), SessionError> {
        let settings = self
            .client
            .get_settings()
            .await
            .map_err(|e| rejected("get_settings", e))?;
        apply(&mut self.state, Mutation::ReplaceSettings(settings));
        debug!("settings reloaded");
        Ok(())
    }

    /// Apply one settings-form edit and persist the repaired result.
    ///
    /// Returns the repair message to show the user, if any.
    ///
    /// # Errors
    ///
    /// [`SessionError::Vault`] if the vault rejects the update.
    pub async fn edit_settings(
        &mut self,
        edit: SettingsEdit,
    ) -> Result<Option<PolicyViolation>, SessionError> {
        let validated = apply_edit(&self.state.user_settings, edit);
        if let Some(violation) = validated.violation {
            debug!(%violation, "settings repaired");
        }
        self.update_settings(validated.settings).await?;
        Ok(validated.violation)
    }

    /// Ask the vault for a blank entry with assigned identity.
    ///
    /// The entry is not stored until passed to [`SessionManager::add_entry`].
    ///
    /// # Errors
    ///
    /// [`SessionError::Vault`] if the vault rejects the request.
    pub async fn new_entry(&self) -> Result<DecryptedPasswordEntry, SessionError> {
        self.client
            .new_entry()
            .await
            .map_err(|e| rejected("new_entry", e))
    }

    /// Store `entry` and append it to the snapshot.
    ///
    /// No de-duplication: an entry whose identifier is already present is
    /// appended again.
    ///
    /// # Errors
    ///
    /// [`SessionError::Form`] for an empty title (no vault call is made),
    /// [`SessionError::Vault`] if the vault rejects the entry.
    pub async fn add_entry(&mut self, entry: DecryptedPasswordEntry) -> Result<(), SessionError> {
        validate_title(&entry.title)?;
        self.client
            .add_entry(&entry)
            .await
            .map_err(|e| rejected("add_entry", e))?;
        info!(entry_id = entry.id(), "entry added");
        apply(&mut self.state, Mutation::AppendEntry(entry));
        Ok(())
    }

    /// Entry-form submit: store `entry`, then persist the full snapshot.
    ///
    /// # Errors
    ///
    /// As [`SessionManager::add_entry`] and [`SessionManager::save`].
    pub async fn submit_entry(
        &mut self,
        entry: DecryptedPasswordEntry,
    ) -> Result<(), SessionError> {
        self.add_entry(entry).await?;
        self.save().await
    }

    /// Delete an entry and persist the resulting snapshot.
    ///
    /// # Errors
    ///
    /// [`SessionError::Vault`] if the vault rejects the removal (nothing
    /// changes locally) or the follow-up save.
    pub async fn remove_entry(&mut self, id: &str) -> Result<(), SessionError> {
        self.client
            .remove_entry(id)
            .await
            .map_err(|e| rejected("remove_entry", e))?;
        apply(&mut self.state, Mutation::RemoveEntry(id.to_owned()));
        info!(entry_id = id, "entry removed");
        self.save().await
    }

    /// [`SessionManager::remove_entry`] after the user approves.
    ///
    /// # Errors
    ///
    /// [`SessionError::EntryNotFound`] if the entry is not in the snapshot,
    /// [`SessionError::Cancelled`] if the user declines; neither reaches the
    /// vault.
    pub async fn remove_entry_confirmed(
        &mut self,
        id: &str,
        confirm: &impl Confirm,
    ) -> Result<(), SessionError> {
        let title = self.get_entry(id)?.title.clone();
        if !confirm.confirm(&ConfirmAction::RemoveEntry { title: &title }) {
            debug!(entry_id = id, "removal cancelled");
            return Err(SessionError::Cancelled);
        }
        self.remove_entry(id).await
    }

    /// Generate a password from the current policy.
    ///
    /// The vault generates from its persisted policy, so settings that
    /// differ from their normalized form are pushed first. The normalized
    /// settings are adopted locally only once generation succeeds.
    ///
    /// Returns an empty string on any failure, with the local settings
    /// unchanged. If the push went through but generation failed, the vault
    /// already holds the normalized record; the next call pushes nothing.
    pub async fn generate_password(&mut self) -> String {
        let normalized = normalize(&self.state.user_settings).settings;
        let repaired = normalized != self.state.user_settings;
        if repaired {
            if let Err(err) = self.client.update_settings(&normalized).await {
                warn!(error = %err, "settings push before generation rejected");
                return String::new();
            }
        }

        match self.client.generate_password().await {
            Ok(password) => {
                if repaired {
                    apply(&mut self.state, Mutation::ReplaceSettings(normalized));
                    debug!("normalized settings adopted");
                }
                debug!("password generated");
                password
            }
            Err(err) => {
                warn!(error = %err, "password generation failed");
                String::new()
            }
        }
    }

    /// Persist the full snapshot.
    ///
    /// # Errors
    ///
    /// [`SessionError::Vault`] if the vault rejects the write.
    pub async fn save(&self) -> Result<(), SessionError> {
        self.client
            .save_session_state(&self.state.user_settings, &self.state.password_entries)
            .await
            .map_err(|e| rejected("save_session_state", e))?;
        debug!(
            entries = self.state.password_entries.len(),
            "session state saved"
        );
        Ok(())
    }

    /// Distinct categories as reported by the vault.
    ///
    /// # Errors
    ///
    /// [`SessionError::Vault`] if the vault rejects the request.
    pub async fn categories(&self) -> Result<BTreeSet<String>, SessionError> {
        self.client
            .list_categories()
            .await
            .map_err(|e| rejected("list_categories", e))
    }

    /// Favorite entries as reported by the vault.
    ///
    /// # Errors
    ///
    /// [`SessionError::Vault`] if the vault rejects the request.
    pub async fn favorites(&self) -> Result<Vec<DecryptedPasswordEntry>, SessionError> {
        self.client
            .list_favorites()
            .await
            .map_err(|e| rejected("list_favorites", e))
    }

    /// Close the vault session and wipe the snapshot.
    ///
    /// # Errors
    ///
    /// [`SessionError::Vault`] if the vault rejects the logout; the
    /// snapshot is kept.
    pub async fn logout(&mut self) -> Result<(), SessionError> {
        self.client
            .logout()
            .await
            .map_err(|e| rejected("logout", e))?;
        self.state.zeroize();
        info!("session closed");
        Ok(())
    }

    /// [`SessionManager::logout`] after the user approves.
    ///
    /// # Errors
    ///
    /// [`SessionError::Cancelled`] if the user declines.
    pub async fn logout_confirmed(&mut self, confirm: &impl Confirm) -> Result<(), SessionError> {
        if !confirm.confirm(&ConfirmAction::Logout) {
            return Err(SessionError::Cancelled);
        }
        self.logout().await
    }
}

impl<C> Drop for SessionManager<C> {
    fn drop(&mut self) {
        self.state.zeroize();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
