//! Per-form in-flight flags.
//!
//! The session manager does not serialize concurrent calls on its own.
//! Each form takes a [`BusyGuard`] before issuing a vault call and keeps
//! its controls disabled while the guard is alive, so two user-triggered
//! operations from the same form can never interleave.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::SessionError;

/// The forms that issue vault calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Form {
    /// First-run master password creation.
    Setup,
    /// Login screen.
    Login,
    /// Master password rotation.
    ChangeMasterPassword,
    /// Entry list (removal, logout).
    Dashboard,
    /// Entry editor (save, generate, settings edits).
    Entry,
}

impl Form {
    const COUNT: usize = 5;

    const fn index(self) -> usize {
        match self {
            Self::Setup => 0,
            Self::Login => 1,
            Self::ChangeMasterPassword => 2,
            Self::Dashboard => 3,
            Self::Entry => 4,
        }
    }

    /// Lower-case label used in messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Login => "login",
            Self::ChangeMasterPassword => "change master password",
            Self::Dashboard => "dashboard",
            Self::Entry => "entry",
        }
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One busy flag per [`Form`].
#[derive(Debug, Default)]
pub struct BusyForms {
    flags: [AtomicBool; Form::COUNT],
}

impl BusyForms {
    /// All forms idle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `form` busy for the lifetime of the returned guard.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Busy`] if `form` already has an operation
    /// in flight.
    pub fn try_begin(&self, form: Form) -> Result<BusyGuard<'_>, SessionError> {
        self.flags[form.index()]
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SessionError::Busy(form))?;
        tracing::debug!(form = %form, "form busy");
        Ok(BusyGuard { forms: self, form })
    }

    /// Whether `form` currently has an operation in flight.
    #[must_use]
    pub fn is_busy(&self, form: Form) -> bool {
        self.flags[form.index()].load(Ordering::Acquire)
    }
}

/// Releases its form's busy flag on drop.
#[derive(Debug)]
pub struct BusyGuard<'a> {
    forms: &'a BusyForms,
    form: Form,
}

impl BusyGuard<'_> {
    /// The form this guard holds.
    #[must_use]
    pub const fn form(&self) -> Form {
        self.form
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.forms.flags[self.form.index()].store(false, Ordering::Release);
        tracing::debug!(form = %self.form, "form idle");
    }
}
