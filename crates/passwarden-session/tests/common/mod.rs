//! In-memory vault double that records every call.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use passwarden_core::{DecryptedPasswordEntry, SessionState, UserSettings};
use passwarden_session::{VaultClient, VaultError};

pub const MASTER_PASSWORD: &str = "correct horse battery";

/// A vault call as observed by [`RecordingVault`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ExistenceCheck,
    CreateMasterPassword,
    ChangeMasterPassword,
    Login,
    Logout,
    NewEntry,
    AddEntry(DecryptedPasswordEntry),
    RemoveEntry(String),
    GetSettings,
    UpdateSettings(UserSettings),
    GeneratePassword,
    GetSessionState,
    SaveSessionState(UserSettings, Vec<DecryptedPasswordEntry>),
    ListCategories,
    ListFavorites,
}

/// Stores state in memory, records calls and fails on demand.
///
/// While `failing` is set every call is recorded and then rejected.
/// `generation_failing` rejects only `generate_password`.
#[derive(Default)]
pub struct RecordingVault {
    pub state: Mutex<SessionState>,
    pub master_password: Mutex<Option<String>>,
    calls: Mutex<Vec<Call>>,
    failing: AtomicBool,
    generation_failing: AtomicBool,
    next_id: AtomicU32,
}

impl RecordingVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// A vault already holding `state`, protected by [`MASTER_PASSWORD`].
    pub fn with_state(state: SessionState) -> Self {
        let vault = Self::default();
        *vault.state.lock().unwrap() = state;
        *vault.master_password.lock().unwrap() = Some(MASTER_PASSWORD.into());
        vault
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn fail_generation(&self, failing: bool) {
        self.generation_failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: Call) -> Result<(), VaultError> {
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            Err(VaultError::Unavailable)
        } else {
            Ok(())
        }
    }
}

pub fn entry(id: &str, title: &str) -> DecryptedPasswordEntry {
    DecryptedPasswordEntry::issued(id, "2024-05-01T12:00:00Z").with_title(title)
}

#[async_trait]
impl VaultClient for RecordingVault {
    async fn existence_check(&self) -> Result<bool, VaultError> {
        self.record(Call::ExistenceCheck)?;
        Ok(self.master_password.lock().unwrap().is_some())
    }

    async fn create_master_password(&self, password: &str) -> Result<(), VaultError> {
        self.record(Call::CreateMasterPassword)?;
        let mut master = self.master_password.lock().unwrap();
        if master.is_some() {
            return Err(VaultError::Rejected("master password already set".into()));
        }
        *master = Some(password.into());
        Ok(())
    }

    async fn change_master_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), VaultError> {
        self.record(Call::ChangeMasterPassword)?;
        let mut master = self.master_password.lock().unwrap();
        if master.as_deref() != Some(old_password) {
            return Err(VaultError::InvalidPassword);
        }
        *master = Some(new_password.into());
        Ok(())
    }

    async fn login(&self, password: &str) -> Result<(), VaultError> {
        self.record(Call::Login)?;
        if self.master_password.lock().unwrap().as_deref() == Some(password) {
            Ok(())
        } else {
            Err(VaultError::InvalidPassword)
        }
    }

    async fn logout(&self) -> Result<(), VaultError> {
        self.record(Call::Logout)
    }

    async fn new_entry(&self) -> Result<DecryptedPasswordEntry, VaultError> {
        self.record(Call::NewEntry)?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(DecryptedPasswordEntry::issued(
            format!("issued-{n}"),
            "2024-05-01T12:00:00Z",
        ))
    }

    async fn add_entry(&self, entry: &DecryptedPasswordEntry) -> Result<(), VaultError> {
        self.record(Call::AddEntry(entry.clone()))?;
        self.state.lock().unwrap().password_entries.push(entry.clone());
        Ok(())
    }

    async fn remove_entry(&self, id: &str) -> Result<(), VaultError> {
        self.record(Call::RemoveEntry(id.into()))?;
        self.state
            .lock()
            .unwrap()
            .password_entries
            .retain(|e| e.id() != id);
        Ok(())
    }

    async fn get_settings(&self) -> Result<UserSettings, VaultError> {
        self.record(Call::GetSettings)?;
        Ok(self.state.lock().unwrap().user_settings.clone())
    }

    async fn update_settings(&self, settings: &UserSettings) -> Result<(), VaultError> {
        self.record(Call::UpdateSettings(settings.clone()))?;
        self.state.lock().unwrap().user_settings = settings.clone();
        Ok(())
    }

    async fn generate_password(&self) -> Result<String, VaultError> {
        self.record(Call::GeneratePassword)?;
        if self.generation_failing.load(Ordering::SeqCst) {
            return Err(VaultError::Unavailable);
        }
        let settings = self.state.lock().unwrap().user_settings.clone();
        passwarden_core::generate_password(&settings)
            .map_err(|e| VaultError::Rejected(e.to_string()))
    }

    async fn get_session_state(&self) -> Result<SessionState, VaultError> {
        self.record(Call::GetSessionState)?;
        Ok(self.state.lock().unwrap().clone())
    }

    async fn save_session_state(
        &self,
        settings: &UserSettings,
        entries: &[DecryptedPasswordEntry],
    ) -> Result<(), VaultError> {
        self.record(Call::SaveSessionState(settings.clone(), entries.to_vec()))?;
        *self.state.lock().unwrap() = SessionState {
            user_settings: settings.clone(),
            password_entries: entries.to_vec(),
        };
        Ok(())
    }

    async fn list_categories(&self) -> Result<BTreeSet<String>, VaultError> {
        self.record(Call::ListCategories)?;
        Ok(passwarden_core::categories(
            &self.state.lock().unwrap().password_entries,
        ))
    }

    async fn list_favorites(&self) -> Result<Vec<DecryptedPasswordEntry>, VaultError> {
        self.record(Call::ListFavorites)?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .password_entries
            .iter()
            .filter(|e| e.favorite)
            .cloned()
            .collect())
    }
}
