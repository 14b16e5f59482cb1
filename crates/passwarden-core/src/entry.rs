//! Decrypted entries and the session snapshot.
//!
//! Both types hold cleartext secrets. They implement [`Zeroize`] so the
//! session controller can wipe them when a session ends, and their `Debug`
//! output masks the password and notes.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::settings::UserSettings;

// ---------------------------------------------------------------------------
// DecryptedPasswordEntry
// ---------------------------------------------------------------------------

/// One vault record in its cleartext working form.
///
/// `id` and `creation_date` are assigned by the vault service when it issues
/// a blank entry ([`DecryptedPasswordEntry::issued`]) and are read-only for
/// everyone else.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptedPasswordEntry {
    id: String,
    /// Display title. Required, non-empty.
    pub title: String,
    /// Account name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Cleartext password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Site address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    creation_date: String,
    /// User-chosen grouping label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Pinned by the user.
    #[serde(default)]
    pub favorite: bool,
}

impl DecryptedPasswordEntry {
    /// A blank entry carrying vault-assigned identity.
    ///
    /// Only vault service implementations call this.
    #[must_use]
    pub fn issued(id: impl Into<String>, creation_date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            creation_date: creation_date.into(),
            ..Self::default()
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Vault-assigned identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Vault-assigned creation timestamp.
    #[must_use]
    pub fn creation_date(&self) -> &str {
        &self.creation_date
    }
}

impl fmt::Debug for DecryptedPasswordEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptedPasswordEntry")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("url", &self.url)
            .field("notes", &self.notes.as_ref().map(|_| "***"))
            .field("creation_date", &self.creation_date)
            .field("category", &self.category)
            .field("favorite", &self.favorite)
            .finish()
    }
}

impl Zeroize for DecryptedPasswordEntry {
    fn zeroize(&mut self) {
        self.id.zeroize();
        self.title.zeroize();
        self.username.zeroize();
        self.password.zeroize();
        self.url.zeroize();
        self.notes.zeroize();
        self.creation_date.zeroize();
        self.category.zeroize();
        self.favorite = false;
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// The decrypted working set of one authenticated session.
///
/// Entries keep insertion order; sorting is the job of
/// [`crate::filter::project`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Generation policy.
    pub user_settings: UserSettings,
    /// Entries in insertion order.
    pub password_entries: Vec<DecryptedPasswordEntry>,
}

impl Zeroize for SessionState {
    fn zeroize(&mut self) {
        self.password_entries.zeroize();
        self.user_settings = UserSettings::default();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
