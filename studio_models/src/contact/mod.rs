use serde::{Deserialize, Deserializer, Serialize};

use crate::{email_address::EmailAddress, macros::nutype_string};

pub mod schema;

/// Raw contact form values, as typed by the visitor.
///
/// Missing or `null` fields deserialize to empty strings, so they surface as
/// validation errors instead of protocol errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInput {
    #[serde(deserialize_with = "string_or_null")]
    pub name: String,
    #[serde(deserialize_with = "string_or_null")]
    pub email: String,
    #[serde(deserialize_with = "string_or_null")]
    pub phone: String,
    #[serde(deserialize_with = "string_or_null")]
    pub message: String,
}

impl ContactInput {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
            ContactField::Message => &mut self.message,
        };
        *slot = value;
    }
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Phone, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Message => "message",
        }
    }

    /// Human readable label, as shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Imię i nazwisko",
            Self::Email => "Adres e-mail",
            Self::Phone => "Telefon",
            Self::Message => "Wiadomość",
        }
    }
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contact form submission that passed [`schema::CONTACT_SCHEMA`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub message: ContactMessageContent,
}

nutype_string!(
    /// Full name of the visitor
    ContactName
);
nutype_string!(
    /// Nine digit phone number
    PhoneNumber
);
nutype_string!(ContactMessageContent);
