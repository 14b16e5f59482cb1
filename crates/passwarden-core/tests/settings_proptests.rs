#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Property-based tests for the generation policy validator.

use passwarden_core::{
    apply_edit, generate_password, normalize, validate, SettingsEdit, UserSettings,
    MAX_PASSWORD_LENGTH,
};
use proptest::prelude::*;

fn arb_settings() -> impl Strategy<Value = UserSettings> {
    (
        0u32..200,
        0u32..200,
        any::<bool>(),
        0u32..400,
        any::<bool>(),
        0u32..400,
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(
                password_length,
                min_password_length,
                use_num,
                min_num,
                use_symbol,
                min_symbol,
                use_lower,
                use_upper,
            )| UserSettings {
                password_length,
                min_password_length,
                use_num,
                min_num,
                use_symbol,
                min_symbol,
                use_lower,
                use_upper,
            },
        )
}

fn arb_edit() -> impl Strategy<Value = SettingsEdit> {
    prop_oneof![
        (0u32..300).prop_map(SettingsEdit::PasswordLength),
        any::<bool>().prop_map(SettingsEdit::UseNum),
        (0u32..400).prop_map(SettingsEdit::MinNum),
        any::<bool>().prop_map(SettingsEdit::UseSymbol),
        (0u32..400).prop_map(SettingsEdit::MinSymbol),
        any::<bool>().prop_map(SettingsEdit::UseLower),
        any::<bool>().prop_map(SettingsEdit::UseUpper),
    ]
}

fn expected_minimum(s: &UserSettings) -> u32 {
    let num = if s.use_num { s.min_num } else { 0 };
    let symbol = if s.use_symbol { s.min_symbol } else { 0 };
    4 + num
        + symbol
        + u32::from(s.use_lower)
        + u32::from(s.use_upper)
}

proptest! {
    /// Validating twice equals validating once.
    #[test]
    fn validate_is_idempotent(settings in arb_settings()) {
        let once = validate(&settings).settings;
        let twice = validate(&once);
        prop_assert_eq!(&twice.settings, &once);
        prop_assert!(twice.violation.is_none());
    }

    /// The derived minimum always follows the policy formula.
    #[test]
    fn minimum_follows_formula(settings in arb_settings()) {
        let validated = validate(&settings).settings;
        prop_assert_eq!(validated.min_password_length, expected_minimum(&validated));
    }

    /// At least one character class survives validation.
    #[test]
    fn some_class_always_enabled(settings in arb_settings()) {
        prop_assert!(validate(&settings).settings.has_character_class());
    }

    /// With every class off, lowercase is forced and a message is reported.
    #[test]
    fn all_classes_off_is_repaired(settings in arb_settings()) {
        let off = UserSettings {
            use_num: false,
            use_symbol: false,
            use_lower: false,
            use_upper: false,
            ..settings
        };
        let validated = validate(&off);
        prop_assert!(validated.settings.use_lower);
        let message = validated.violation.map(|v| v.to_string()).unwrap_or_default();
        prop_assert!(!message.is_empty());
    }

    /// A length edit always lands inside [minimum, 128].
    #[test]
    fn length_edit_stays_in_bounds(settings in arb_settings(), requested in 0u32..400) {
        let current = validate(&settings).settings;
        let edited = apply_edit(&current, SettingsEdit::PasswordLength(requested)).settings;
        prop_assert!(edited.password_length >= edited.min_password_length);
        prop_assert!(edited.password_length <= MAX_PASSWORD_LENGTH);
    }

    /// Any sequence of edits keeps the record consistent.
    #[test]
    fn edit_sequences_stay_consistent(edits in proptest::collection::vec(arb_edit(), 1..20)) {
        let mut settings = UserSettings::default();
        for edit in edits {
            settings = apply_edit(&settings, edit).settings;
            prop_assert_eq!(settings.min_password_length, expected_minimum(&settings));
            prop_assert!(settings.password_length >= settings.min_password_length);
            prop_assert!(settings.password_length <= MAX_PASSWORD_LENGTH);
            prop_assert!(settings.has_character_class());
        }
    }

    /// The derived minimum never exceeds the maximum length.
    #[test]
    fn minimum_fits_maximum(settings in arb_settings()) {
        let validated = validate(&settings).settings;
        prop_assert!(validated.min_password_length <= MAX_PASSWORD_LENGTH);
    }

    /// Normalized settings always generate.
    #[test]
    fn normalized_settings_generate(settings in arb_settings()) {
        let normalized = normalize(&settings).settings;
        let password = generate_password(&normalized).unwrap();
        prop_assert_eq!(password.len() as u32, normalized.password_length);
    }

    /// Generated passwords have exactly the requested length.
    #[test]
    fn generated_length_matches(edits in proptest::collection::vec(arb_edit(), 0..10)) {
        let mut settings = UserSettings::default();
        for edit in edits {
            settings = apply_edit(&settings, edit).settings;
        }
        let password = generate_password(&settings).unwrap();
        prop_assert_eq!(password.len() as u32, settings.password_length);
    }
}
