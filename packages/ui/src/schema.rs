//! Client-side validation: field values, per-field errors, and the
//! declarative rule schema.
//!
//! The form component is generic over [`Validate`], so any schema
//! implementation can back it. [`Schema`] is the rule-table implementation
//! the pages use: an ordered list of per-field rules producing one message
//! per failing field.

use std::collections::HashMap;

/// Ordered field/value pairs. Order is render order.
pub type FieldValues = Vec<(String, String)>;

/// Validation errors keyed by field name.
pub type FieldErrors = HashMap<String, String>;

/// Look up a field's value by name.
pub fn field_value<'a>(values: &'a FieldValues, name: &str) -> Option<&'a str> {
    values
        .iter()
        .find(|(field, _)| field == name)
        .map(|(_, value)| value.as_str())
}

/// Capitalize the first letter of a field name.
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Validation capability: check a submission, returning the cleaned values or
/// one message per failing field.
pub trait Validate {
    fn validate(&self, values: &FieldValues) -> Result<FieldValues, FieldErrors>;
}

/// Rules for a single field.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FieldRules {
    required: bool,
    email: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
}

impl FieldRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }

    /// Message for the first failing rule, if any.
    fn check(&self, label: &str, value: &str) -> Option<String> {
        if value.is_empty() {
            return self.required.then(|| format!("{} is required", label));
        }
        if self.email && !value.contains('@') {
            return Some("Please provide a valid email address".to_string());
        }
        if let Some(min) = self.min_length {
            if value.chars().count() < min {
                return Some(format!("{} must be at least {} characters", label, min));
            }
        }
        if let Some(max) = self.max_length {
            if value.chars().count() > max {
                return Some(format!("{} cannot exceed {} characters", label, max));
            }
        }
        None
    }
}

/// Declarative validation schema: an ordered list of per-field rules.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
    rules: Vec<(String, FieldRules)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add rules for a field.
    pub fn field(mut self, name: impl Into<String>, rules: FieldRules) -> Self {
        self.rules.push((name.into(), rules));
        self
    }
}

impl Validate for Schema {
    fn validate(&self, values: &FieldValues) -> Result<FieldValues, FieldErrors> {
        // Passwords keep their whitespace; everything else is trimmed.
        let cleaned: FieldValues = values
            .iter()
            .map(|(name, value)| {
                let value = if name == "password" {
                    value.clone()
                } else {
                    value.trim().to_string()
                };
                (name.clone(), value)
            })
            .collect();

        let mut errors = FieldErrors::new();
        for (name, rules) in &self.rules {
            let value = field_value(&cleaned, name).unwrap_or("");
            if let Some(message) = rules.check(&capitalize(name), value) {
                errors.insert(name.clone(), message);
            }
        }

        if errors.is_empty() {
            Ok(cleaned)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    fn schema() -> Schema {
        Schema::new()
            .field("email", FieldRules::new().required().email())
            .field("password", FieldRules::new().required().min_length(6))
            .field("username", FieldRules::new().required().min_length(3).max_length(30))
    }

    #[test]
    fn empty_required_fields_report_per_field_messages() {
        let errors = schema()
            .validate(&values(&[("email", ""), ("password", ""), ("username", "")]))
            .unwrap_err();

        assert_eq!(errors.len(), 3);
        assert_eq!(errors["email"], "Email is required");
        assert_eq!(errors["password"], "Password is required");
        assert_eq!(errors["username"], "Username is required");
    }

    #[test]
    fn email_rule_wants_an_at_sign() {
        let errors = schema()
            .validate(&values(&[
                ("email", "not-an-address"),
                ("password", "hunter22"),
                ("username", "ada"),
            ]))
            .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors["email"], "Please provide a valid email address");
    }

    #[test]
    fn length_rules_report_the_bound() {
        let errors = schema()
            .validate(&values(&[
                ("email", "ada@example.com"),
                ("password", "abc"),
                ("username", "ab"),
            ]))
            .unwrap_err();

        assert_eq!(errors["password"], "Password must be at least 6 characters");
        assert_eq!(errors["username"], "Username must be at least 3 characters");
    }

    #[test]
    fn valid_input_passes_and_is_trimmed() {
        let cleaned = schema()
            .validate(&values(&[
                ("email", "  ada@example.com "),
                ("password", "hunter22"),
                ("username", " ada "),
            ]))
            .unwrap();

        assert_eq!(field_value(&cleaned, "email"), Some("ada@example.com"));
        assert_eq!(field_value(&cleaned, "username"), Some("ada"));
    }

    #[test]
    fn passwords_keep_their_whitespace() {
        let cleaned = schema()
            .validate(&values(&[
                ("email", "ada@example.com"),
                ("password", " spaces "),
                ("username", "ada"),
            ]))
            .unwrap();

        assert_eq!(field_value(&cleaned, "password"), Some(" spaces "));
    }

    #[test]
    fn capitalize_handles_short_names() {
        assert_eq!(capitalize("username"), "Username");
        assert_eq!(capitalize("x"), "X");
        assert_eq!(capitalize(""), "");
    }
}
