//! Blocking confirmation before destructive session operations.

/// A destructive action awaiting the user's approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction<'a> {
    /// Delete the entry with this title.
    RemoveEntry {
        /// Title of the entry about to be deleted.
        title: &'a str,
    },
    /// End the session.
    Logout,
}

impl ConfirmAction<'_> {
    /// Dialog heading.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        match self {
            Self::RemoveEntry { .. } => "Confirm to delete",
            Self::Logout => "Confirm to log out",
        }
    }

    /// Dialog body.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::RemoveEntry { .. } => "Are you sure you want to delete this entry?",
            Self::Logout => "Are you sure you want to log out?",
        }
    }
}

/// Asks the user to approve a [`ConfirmAction`].
///
/// Implemented for any `Fn(&ConfirmAction<'_>) -> bool`, so a dialog
/// callback can be passed directly.
pub trait Confirm {
    /// `true` when the user approved.
    fn confirm(&self, action: &ConfirmAction<'_>) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&ConfirmAction<'_>) -> bool,
{
    fn confirm(&self, action: &ConfirmAction<'_>) -> bool {
        self(action)
    }
}
