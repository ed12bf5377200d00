//! Authentication input tests
//!
//! Tests for credential validation:
//! - Username and email rules
//! - Password hashing round trip

use proptest::prelude::*;

use shared::models::User;
use shared::validation::{validate_email, validate_username};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        for username in ["ana", "cocina.principal", "mozo_2", "caja-turno-noche"] {
            assert!(validate_username(username).is_ok(), "{username}");
        }
    }

    #[test]
    fn test_invalid_usernames() {
        for username in ["ab", "Ana", "con espacios", "ñoqui", ""] {
            assert!(validate_username(username).is_err(), "{username:?}");
        }
        let too_long = "a".repeat(31);
        assert!(validate_username(&too_long).is_err());
    }

    #[test]
    fn test_valid_emails() {
        for email in ["ana@resto.com", "caja@local.com.ar"] {
            assert!(validate_email(email).is_ok(), "{email}");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in ["sin-arroba.com", "sin-punto@com", "a@b", ""] {
            assert!(validate_email(email).is_err(), "{email:?}");
        }
    }

    /// Account payloads carry the public fields only
    #[test]
    fn test_user_payload_has_no_secrets() {
        let user = User {
            id: uuid::Uuid::new_v4(),
            name: "Ana".to_string(),
            surname: "Pérez".to_string(),
            username: "ana".to_string(),
            email: "ana@resto.com".to_string(),
            created_at: chrono::Utc::now(),
        };

        let value = serde_json::to_value(&user).unwrap();
        let fields = value.as_object().unwrap();

        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("created_at"));
        assert!(!fields.keys().any(|k| k.contains("password")));
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = bcrypt::hash("secreto123", 4).unwrap();

        assert!(bcrypt::verify("secreto123", &hash).unwrap());
        assert!(!bcrypt::verify("otroSecreto", &hash).unwrap());
    }

    /// Hashing the same password twice yields distinct hashes (salted)
    #[test]
    fn test_password_hash_is_salted() {
        let first = bcrypt::hash("secreto123", 4).unwrap();
        let second = bcrypt::hash("secreto123", 4).unwrap();

        assert_ne!(first, second);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// Usernames from the allowed alphabet always validate
        #[test]
        fn prop_allowed_alphabet_usernames_validate(
            username in "[a-z0-9._-]{3,30}"
        ) {
            prop_assert!(validate_username(&username).is_ok());
        }

        /// Any uppercase character invalidates a username
        #[test]
        fn prop_uppercase_invalidates_username(
            prefix in "[a-z0-9]{2,10}",
            upper in "[A-Z]",
            suffix in "[a-z0-9]{1,10}"
        ) {
            let username = format!("{prefix}{upper}{suffix}");
            prop_assert!(validate_username(&username).is_err());
        }
    }
}
