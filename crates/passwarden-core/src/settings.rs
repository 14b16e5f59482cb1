//! Password generation policy and its validator.
//!
//! [`UserSettings`] is the one settings record of a session. It is never
//! mutated field-by-field by callers: every change goes through
//! [`apply_edit`], which clamps, validates and returns the record that
//! should be persisted together with an optional inline message.
//!
//! The validator ([`validate`]) is total. Invalid inputs are repaired,
//! never rejected.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Smallest length the length control offers.
pub const MIN_PASSWORD_LENGTH: u32 = 5;

/// Largest supported password length.
pub const MAX_PASSWORD_LENGTH: u32 = 128;

/// Base of the derived minimum, before any character-class contribution.
pub const BASE_MIN_LENGTH: u32 = 4;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Password generation policy for one session.
///
/// Serialized with camelCase field names (`passwordLength`, `useNum`, ...)
/// so the record matches the vault service's wire shape.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    /// Requested length of generated passwords (5–128).
    pub password_length: u32,
    /// Derived from the flags below. Recomputed by [`validate`].
    pub min_password_length: u32,
    /// Include digits.
    pub use_num: bool,
    /// Minimum number of digits, when `use_num` is set.
    pub min_num: u32,
    /// Include symbols.
    pub use_symbol: bool,
    /// Minimum number of symbols, when `use_symbol` is set.
    pub min_symbol: u32,
    /// Include lowercase letters.
    pub use_lower: bool,
    /// Include uppercase letters.
    pub use_upper: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            password_length: 14,
            min_password_length: 10,
            use_num: true,
            min_num: 2,
            use_symbol: true,
            min_symbol: 2,
            use_lower: true,
            use_upper: true,
        }
    }
}

impl UserSettings {
    /// Whether at least one character class is enabled.
    #[must_use]
    pub const fn has_character_class(&self) -> bool {
        self.use_num || self.use_symbol || self.use_lower || self.use_upper
    }
}

/// A policy problem the validator repaired on its own.
///
/// Rendered inline under the offending control; never raised as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyViolation {
    /// Every character class was disabled; lowercase was re-enabled.
    NoCharacterClass,
    /// Required digits and symbols did not fit in the maximum length; the
    /// counts were lowered.
    RequiredCountsTooHigh,
}

impl PolicyViolation {
    /// Message shown to the user.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoCharacterClass => "At least one character type must be selected",
            Self::RequiredCountsTooHigh => {
                "Required digits and symbols cannot exceed the maximum password length"
            }
        }
    }
}

impl fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Output of [`validate`] and [`apply_edit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    /// The repaired, internally consistent settings.
    pub settings: UserSettings,
    /// Set when a repair took place.
    pub violation: Option<PolicyViolation>,
}

/// One user-initiated change to a single settings field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsEdit {
    /// The length slider.
    PasswordLength(u32),
    /// Digits checkbox.
    UseNum(bool),
    /// Minimum digits input.
    MinNum(u32),
    /// Symbols checkbox.
    UseSymbol(bool),
    /// Minimum symbols input.
    MinSymbol(u32),
    /// Lowercase checkbox.
    UseLower(bool),
    /// Uppercase checkbox.
    UseUpper(bool),
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Smallest password length that fits every mandatory character.
///
/// `4 + minNum (if useNum) + minSymbol (if useSymbol) + 1 (if useLower)
/// + 1 (if useUpper)`.
#[must_use]
pub const fn derived_min_length(settings: &UserSettings) -> u32 {
    let mut length = BASE_MIN_LENGTH;
    if settings.use_num {
        length = length.saturating_add(settings.min_num);
    }
    if settings.use_symbol {
        length = length.saturating_add(settings.min_symbol);
    }
    if settings.use_lower {
        length = length.saturating_add(1);
    }
    if settings.use_upper {
        length = length.saturating_add(1);
    }
    length
}

/// Which required count gives way first when the derived minimum would
/// exceed [`MAX_PASSWORD_LENGTH`].
#[derive(Clone, Copy)]
enum CountPriority {
    DigitsFirst,
    SymbolsFirst,
}

/// Lower enabled `min_num`/`min_symbol` until the derived minimum fits in
/// [`MAX_PASSWORD_LENGTH`]. Returns `true` if anything was lowered.
fn cap_required_counts(settings: &mut UserSettings, priority: CountPriority) -> bool {
    let mut excess = derived_min_length(settings).saturating_sub(MAX_PASSWORD_LENGTH);
    if excess == 0 {
        return false;
    }

    let num = (settings.use_num, &mut settings.min_num);
    let symbol = (settings.use_symbol, &mut settings.min_symbol);
    let order = match priority {
        CountPriority::DigitsFirst => [num, symbol],
        CountPriority::SymbolsFirst => [symbol, num],
    };
    for (enabled, count) in order {
        if enabled {
            let cut = excess.min(*count);
            *count = count.saturating_sub(cut);
            excess = excess.saturating_sub(cut);
        }
    }
    true
}

fn repair(settings: &UserSettings, priority: CountPriority) -> Validated {
    let mut settings = settings.clone();

    let mut violation = if settings.has_character_class() {
        None
    } else {
        settings.use_lower = true;
        Some(PolicyViolation::NoCharacterClass)
    };

    if cap_required_counts(&mut settings, priority) {
        violation = violation.or(Some(PolicyViolation::RequiredCountsTooHigh));
    }

    settings.min_password_length = derived_min_length(&settings);

    Validated {
        settings,
        violation,
    }
}

/// Normalize `settings` into a record that satisfies its own invariants.
///
/// - No character class enabled: lowercase is forced on and
///   [`PolicyViolation::NoCharacterClass`] is reported.
/// - Required digit and symbol counts that would push the derived minimum
///   past [`MAX_PASSWORD_LENGTH`] are lowered (digits first) and
///   [`PolicyViolation::RequiredCountsTooHigh`] is reported.
/// - `min_password_length` is recomputed from the (possibly repaired) flags.
///
/// `password_length` is left alone; see [`clamp_password_length`] and
/// [`normalize`].
/// Idempotent: validating a validated record changes nothing.
#[must_use]
pub fn validate(settings: &UserSettings) -> Validated {
    repair(settings, CountPriority::DigitsFirst)
}

/// [`validate`], then bring `password_length` into
/// `[min_password_length, MAX_PASSWORD_LENGTH]`.
///
/// The result is always generatable.
#[must_use]
pub fn normalize(settings: &UserSettings) -> Validated {
    fit_length(validate(settings))
}

fn fit_length(mut validated: Validated) -> Validated {
    validated.settings.password_length = clamp_password_length(
        validated.settings.password_length,
        validated.settings.min_password_length,
    );
    validated
}

/// Clamp a requested length to `[minimum, MAX_PASSWORD_LENGTH]`.
///
/// When `minimum` itself exceeds the maximum, the minimum wins.
#[must_use]
pub fn clamp_password_length(requested: u32, minimum: u32) -> u32 {
    requested.min(MAX_PASSWORD_LENGTH).max(minimum)
}

/// Apply one edit to `current` and return the record to persist.
///
/// 1. the raw field change is applied;
/// 2. a length edit is clamped against the *previous* minimum;
/// 3. the result is validated, producing the *new* minimum; when required
///    counts must be lowered, the edited class gives way first;
/// 4. the length is fitted into `[new minimum, MAX_PASSWORD_LENGTH]`.
#[must_use]
pub fn apply_edit(current: &UserSettings, edit: SettingsEdit) -> Validated {
    let previous_minimum = current.min_password_length.max(MIN_PASSWORD_LENGTH);
    let mut edited = current.clone();

    match edit {
        SettingsEdit::PasswordLength(length) => {
            edited.password_length = clamp_password_length(length, previous_minimum);
        }
        SettingsEdit::UseNum(enabled) => edited.use_num = enabled,
        SettingsEdit::MinNum(count) => edited.min_num = count,
        SettingsEdit::UseSymbol(enabled) => edited.use_symbol = enabled,
        SettingsEdit::MinSymbol(count) => edited.min_symbol = count,
        SettingsEdit::UseLower(enabled) => edited.use_lower = enabled,
        SettingsEdit::UseUpper(enabled) => edited.use_upper = enabled,
    }

    let priority = match edit {
        SettingsEdit::UseSymbol(_) | SettingsEdit::MinSymbol(_) => CountPriority::SymbolsFirst,
        _ => CountPriority::DigitsFirst,
    };
    fit_length(repair(&edited, priority))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
