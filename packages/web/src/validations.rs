//! Validation schemas for the auth pages.

use ui::{FieldRules, Schema};

/// Sign-in: email + password.
pub fn sign_in_schema() -> Schema {
    Schema::new()
        .field("email", FieldRules::new().required().email())
        .field("password", FieldRules::new().required())
}

/// Sign-up: email, password, name, username.
pub fn sign_up_schema() -> Schema {
    Schema::new()
        .field("email", FieldRules::new().required().email())
        .field("password", FieldRules::new().required().min_length(6).max_length(100))
        .field("name", FieldRules::new().required().max_length(50))
        .field("username", FieldRules::new().required().min_length(3).max_length(30))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ui::{FieldValues, Validate};

    fn sign_up_values(username: &str) -> FieldValues {
        vec![
            ("email".to_string(), "ada@example.com".to_string()),
            ("password".to_string(), "hunter22".to_string()),
            ("name".to_string(), "Ada Lovelace".to_string()),
            ("username".to_string(), username.to_string()),
        ]
    }

    #[test]
    fn accepts_a_complete_sign_up() {
        assert!(sign_up_schema().validate(&sign_up_values("ada")).is_ok());
    }

    #[test]
    fn rejects_a_short_username() {
        let errors = sign_up_schema()
            .validate(&sign_up_values("al"))
            .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors["username"], "Username must be at least 3 characters");
    }

    #[test]
    fn reports_missing_email_and_password_together() {
        let values = vec![
            ("email".to_string(), String::new()),
            ("password".to_string(), String::new()),
        ];
        let errors = sign_in_schema().validate(&values).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors["email"], "Email is required");
        assert_eq!(errors["password"], "Password is required");
    }
}
