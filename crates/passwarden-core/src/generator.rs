//! Policy-driven random password generation.
//!
//! This is the generator a vault service runs behind its
//! `generate_password` call, against the settings it last persisted.
//! Uses `OsRng` (OS-level CSPRNG) for all randomness.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::PolicyError;
use crate::settings::{validate, UserSettings, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

// Character sets
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate a password satisfying `settings`.
///
/// The settings are validated first, so a record with no character class
/// generates lowercase-only output. Mandatory characters are `min_num`
/// digits, `min_symbol` symbols, one lowercase and one uppercase letter
/// (each only when its class is enabled); the remaining positions are
/// drawn from the union of enabled classes and the result is
/// Fisher-Yates shuffled.
///
/// # Errors
///
/// - [`PolicyError::LengthOutOfRange`] if `password_length` is outside
///   [`MIN_PASSWORD_LENGTH`]..=[`MAX_PASSWORD_LENGTH`]
/// - [`PolicyError::BelowMinimum`] if `password_length` is below the
///   derived minimum length
pub fn generate_password(settings: &UserSettings) -> Result<String, PolicyError> {
    let settings = validate(settings).settings;
    let length = settings.password_length;

    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
        return Err(PolicyError::LengthOutOfRange {
            min: MIN_PASSWORD_LENGTH,
            max: MAX_PASSWORD_LENGTH,
            actual: length,
        });
    }
    if length < settings.min_password_length {
        return Err(PolicyError::BelowMinimum {
            length,
            minimum: settings.min_password_length,
        });
    }

    let mut rng = rand::rngs::OsRng;
    let mut pool: Vec<u8> = Vec::new();
    let mut chars: Vec<u8> = Vec::with_capacity(length as usize);

    if settings.use_num {
        pool.extend_from_slice(DIGITS);
        for _ in 0..settings.min_num {
            chars.push(DIGITS[rng.gen_range(0..DIGITS.len())]);
        }
    }
    if settings.use_symbol {
        pool.extend_from_slice(SYMBOLS);
        for _ in 0..settings.min_symbol {
            chars.push(SYMBOLS[rng.gen_range(0..SYMBOLS.len())]);
        }
    }
    if settings.use_lower {
        pool.extend_from_slice(LOWERCASE);
        chars.push(LOWERCASE[rng.gen_range(0..LOWERCASE.len())]);
    }
    if settings.use_upper {
        pool.extend_from_slice(UPPERCASE);
        chars.push(UPPERCASE[rng.gen_range(0..UPPERCASE.len())]);
    }

    // Validation guarantees at least one class, so the pool is never empty.
    while chars.len() < length as usize {
        chars.push(pool[rng.gen_range(0..pool.len())]);
    }

    chars.shuffle(&mut rng);

    Ok(chars.into_iter().map(char::from).collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
