//! The contact form constraint set.
//!
//! Rules are plain data: the server evaluates them in [`ContactSchema::validate`],
//! the form controller evaluates them field by field on blur, and the REST API
//! publishes them as JSON for browser side evaluation. Every consumer sees the
//! same rules, so anything accepted client side is accepted server side.

use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;
use serde::{Serialize, Serializer};

use super::{
    ContactField, ContactInput, ContactMessageContent, ContactName, ContactSubmission,
    PhoneNumber,
};
use crate::email_address::EmailAddress;

pub const NAME_TOO_SHORT: &str = "Imię musi mieć co najmniej 2 znaki";
pub const INVALID_EMAIL: &str = "Podaj prawidłowy adres e-mail";
pub const INVALID_PHONE: &str = "Podaj prawidłowy numer telefonu (9 cyfr)";
pub const MESSAGE_TOO_SHORT: &str = "Wiadomość musi mieć co najmniej 10 znaków";

pub static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_'+\-]+(\.[A-Za-z0-9_'+\-]+)*@([A-Za-z0-9]([A-Za-z0-9\-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$",
    )
    .unwrap()
});

/// At most 64 characters before the `@`.
pub static EMAIL_LOCAL_PART_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[^@]{1,64}@").unwrap());

/// At most 253 characters after the `@`.
pub static EMAIL_DOMAIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("@[^@]{1,253}$").unwrap());

pub static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new("^[0-9]{9}$").unwrap());

pub static CONTACT_SCHEMA: LazyLock<ContactSchema> = LazyLock::new(|| ContactSchema {
    fields: vec![
        FieldSchema {
            field: ContactField::Name,
            rules: vec![Rule::MinLength {
                min: 2,
                message: NAME_TOO_SHORT,
            }],
        },
        FieldSchema {
            field: ContactField::Email,
            rules: vec![
                Rule::Pattern {
                    pattern: &EMAIL_REGEX,
                    message: INVALID_EMAIL,
                },
                Rule::Pattern {
                    pattern: &EMAIL_LOCAL_PART_REGEX,
                    message: INVALID_EMAIL,
                },
                Rule::Pattern {
                    pattern: &EMAIL_DOMAIN_REGEX,
                    message: INVALID_EMAIL,
                },
            ],
        },
        FieldSchema {
            field: ContactField::Phone,
            rules: vec![Rule::Pattern {
                pattern: &PHONE_REGEX,
                message: INVALID_PHONE,
            }],
        },
        FieldSchema {
            field: ContactField::Message,
            rules: vec![Rule::MinLength {
                min: 10,
                message: MESSAGE_TOO_SHORT,
            }],
        },
    ],
});

#[derive(Debug, Clone, Serialize)]
pub struct ContactSchema {
    pub fields: Vec<FieldSchema>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldSchema {
    pub field: ContactField,
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    /// At least `min` characters (unicode scalar values).
    MinLength { min: usize, message: &'static str },
    /// `pattern` matches the value. Patterns anchor themselves.
    Pattern {
        #[serde(serialize_with = "serialize_regex")]
        pattern: &'static LazyLock<Regex>,
        message: &'static str,
    },
}

impl Rule {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MinLength { message, .. } | Self::Pattern { message, .. } => message,
        }
    }

    pub fn check(&self, value: &str) -> Result<(), &'static str> {
        let ok = match self {
            Self::MinLength { min, .. } => value.chars().count() >= *min,
            Self::Pattern { pattern, .. } => pattern.is_match(value),
        };
        ok.then_some(()).ok_or(self.message())
    }
}

fn serialize_regex<S: Serializer>(
    regex: &&'static LazyLock<Regex>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(regex.as_str())
}

impl ContactSchema {
    pub fn rules(&self, field: ContactField) -> &[Rule] {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.rules.as_slice())
            .unwrap_or_default()
    }

    /// Returns the messages of the rules of `field` that `value` violates.
    /// Rules sharing a message report it once.
    pub fn validate_field(&self, field: ContactField, value: &str) -> Vec<&'static str> {
        let mut messages = self
            .rules(field)
            .iter()
            .filter_map(|rule| rule.check(value).err())
            .collect::<Vec<_>>();
        messages.dedup();
        messages
    }

    pub fn validate(&self, input: &ContactInput) -> Result<ContactSubmission, ValidationErrors> {
        let errors = ContactField::ALL
            .into_iter()
            .map(|field| (field, self.validate_field(field, input.get(field))))
            .filter(|(_, messages)| !messages.is_empty())
            .collect::<BTreeMap<_, _>>();
        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        // the email rules only admit addresses lettre can parse
        let email = input
            .email
            .parse::<EmailAddress>()
            .map_err(|_| ValidationErrors::single(ContactField::Email, INVALID_EMAIL))?;

        Ok(ContactSubmission {
            name: ContactName::new(input.name.clone()),
            email,
            phone: PhoneNumber::new(input.phone.clone()),
            message: ContactMessageContent::new(input.message.clone()),
        })
    }
}

/// Violated rules, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<ContactField, Vec<&'static str>>);

impl ValidationErrors {
    pub fn single(field: ContactField, message: &'static str) -> Self {
        Self([(field, vec![message])].into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: ContactField) -> &[&'static str] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = ContactField> + '_ {
        self.0.keys().copied()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (field, messages)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {}", messages.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn valid_input() -> ContactInput {
        ContactInput {
            name: "Jan Kowalski".into(),
            email: "jan@example.com".into(),
            phone: "123456789".into(),
            message: "Szukam fotografa na komunię w maju.".into(),
        }
    }

    #[test]
    fn accepts_valid_input() {
        let submission = CONTACT_SCHEMA.validate(&valid_input()).unwrap();

        assert_eq!(
            submission,
            ContactSubmission {
                name: ContactName::new("Jan Kowalski"),
                email: "jan@example.com".parse().unwrap(),
                phone: PhoneNumber::new("123456789"),
                message: ContactMessageContent::new("Szukam fotografa na komunię w maju."),
            }
        );
    }

    #[test]
    fn rejects_each_field() {
        for (field, value, expected) in [
            (ContactField::Name, "J", NAME_TOO_SHORT),
            (ContactField::Name, "", NAME_TOO_SHORT),
            (ContactField::Email, "jan", INVALID_EMAIL),
            (ContactField::Email, "jan@", INVALID_EMAIL),
            (ContactField::Email, "@example.com", INVALID_EMAIL),
            (ContactField::Email, "jan..kowalski@example.com", INVALID_EMAIL),
            (ContactField::Email, "jan@example", INVALID_EMAIL),
            (ContactField::Phone, "12345", INVALID_PHONE),
            (ContactField::Phone, "1234567890", INVALID_PHONE),
            (ContactField::Phone, "12345678a", INVALID_PHONE),
            (ContactField::Phone, "123 456 789", INVALID_PHONE),
            (ContactField::Phone, "", INVALID_PHONE),
            (ContactField::Message, "Za krótko", MESSAGE_TOO_SHORT),
        ] {
            let mut input = valid_input();
            input.set(field, value.into());

            let errors = CONTACT_SCHEMA.validate(&input).unwrap_err();

            assert_eq!(errors.fields().collect::<Vec<_>>(), [field], "{value:?}");
            assert_eq!(errors.get(field), [expected], "{value:?}");
            assert_eq!(CONTACT_SCHEMA.validate_field(field, value), [expected]);
        }
    }

    #[test]
    fn collects_all_violations() {
        let errors = CONTACT_SCHEMA.validate(&ContactInput::default()).unwrap_err();

        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            ContactField::ALL.to_vec()
        );
        assert_eq!(errors.get(ContactField::Message), [MESSAGE_TOO_SHORT]);
        assert_eq!(
            errors.to_string(),
            format!(
                "name: {NAME_TOO_SHORT}; email: {INVALID_EMAIL}; phone: {INVALID_PHONE}; \
                 message: {MESSAGE_TOO_SHORT}"
            )
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert!(CONTACT_SCHEMA
            .validate_field(ContactField::Name, "Łó")
            .is_empty());
        assert_eq!(
            CONTACT_SCHEMA.validate_field(ContactField::Name, "Ł"),
            [NAME_TOO_SHORT]
        );
    }

    #[test]
    fn validation_is_idempotent() {
        let mut invalid = valid_input();
        invalid.phone = "12345".into();

        for input in [valid_input(), invalid] {
            assert_eq!(
                CONTACT_SCHEMA.validate(&input),
                CONTACT_SCHEMA.validate(&input)
            );
        }
    }

    #[test]
    fn accepts_common_addresses() {
        for email in [
            "jan@example.com",
            "jan.kowalski@example.co.uk",
            "jan+foto@sub.example.pl",
            "o'neil@example.com",
            "j_k-1@example-domain.com",
        ] {
            assert!(
                CONTACT_SCHEMA
                    .validate_field(ContactField::Email, email)
                    .is_empty(),
                "{email}"
            );
        }
    }

    #[test]
    fn email_rules_match_server_side_parsing() {
        let label = |c: &str| c.repeat(63);
        let longest_local_part = format!("{}@example.com", "j".repeat(64));
        let longest_label = format!("jan@{}.com", label("a"));
        let long_domain = format!("jan@{}.{}.{}.com", label("a"), label("b"), label("c"));
        let accepted = [longest_local_part, longest_label, long_domain];

        let rejected = [
            format!("{}@example.com", "j".repeat(65)),
            format!("jan@{}.com", "a".repeat(64)),
            format!(
                "jan@{}.{}.{}.{}.{}.com",
                label("a"),
                label("b"),
                label("c"),
                label("d"),
                label("e")
            ),
            format!("jan@example.{}", "c".repeat(64)),
        ];

        for email in accepted {
            let mut input = valid_input();
            input.email = email.clone();

            assert!(
                CONTACT_SCHEMA
                    .validate_field(ContactField::Email, &email)
                    .is_empty(),
                "{email}"
            );
            assert!(CONTACT_SCHEMA.validate(&input).is_ok(), "{email}");
        }
        for email in rejected {
            assert_eq!(
                CONTACT_SCHEMA.validate_field(ContactField::Email, &email),
                [INVALID_EMAIL],
                "{email}"
            );
        }
    }

    #[test]
    fn serializes_rules_as_data() {
        let json = serde_json::to_value(&*CONTACT_SCHEMA).unwrap();

        assert_eq!(
            json["fields"][2],
            serde_json::json!({
                "field": "phone",
                "rules": [{
                    "kind": "pattern",
                    "pattern": "^[0-9]{9}$",
                    "message": INVALID_PHONE,
                }],
            })
        );
        assert_eq!(
            json["fields"][0]["rules"][0],
            serde_json::json!({ "kind": "min_length", "min": 2, "message": NAME_TOO_SHORT })
        );
    }
}
