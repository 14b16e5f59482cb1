//! `passwarden-session`: client-side session controller for PassWarden.
//!
//! Talks to the vault service through [`VaultClient`] and keeps the
//! decrypted working set of an authenticated session in a
//! [`SessionManager`]. Policy validation, generation and the entry
//! filter/sort pipeline live in `passwarden-core`.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod auth;
pub mod bootstrap;
pub mod busy;
pub mod client;
pub mod config;
pub mod confirm;
pub mod error;
pub mod forms;
pub mod logging;
pub mod manager;

pub use bootstrap::{initial_route, resolve_initial_route, Route};
pub use busy::{BusyForms, BusyGuard, Form};
pub use client::VaultClient;
pub use config::ClientConfig;
pub use confirm::{Confirm, ConfirmAction};
pub use error::{AuthError, AuthOperation, FormError, SessionError, VaultError};
pub use forms::CredentialLimits;
pub use logging::init_logging;
pub use manager::SessionManager;
