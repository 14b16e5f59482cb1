//! `passwarden-core`: generation policy and entry model for PassWarden.
//!
//! Pure data and pure functions: zero network, zero async, zero file I/O.
//! The session controller in `passwarden-session` owns the state; this
//! crate only validates, generates and projects it.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;

pub mod settings;

pub mod entry;

pub mod generator;

pub mod filter;

pub use entry::{DecryptedPasswordEntry, SessionState};
pub use error::PolicyError;
pub use filter::{categories, compare_titles, favorites, project};
pub use generator::generate_password;
pub use settings::{
    apply_edit, clamp_password_length, derived_min_length, normalize, validate, PolicyViolation,
    SettingsEdit, UserSettings, Validated, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH,
};
