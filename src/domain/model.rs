use crate::utils::error::PhonebookError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five free-form text fields of a contact. No format validation is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactFields {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub phone_number: String,
}

impl ContactFields {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: address.into(),
            city: city.into(),
            phone_number: phone_number.into(),
        }
    }
}

/// Stable handle for an entry. Unique across every directory in the process and
/// never reused, so two entries with identical fields are still told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub(crate) u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Entry {
    id: EntryId,
    fields: ContactFields,
}

impl Entry {
    pub(crate) fn new(id: EntryId, fields: ContactFields) -> Self {
        Self { id, fields }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn first_name(&self) -> &str {
        &self.fields.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.fields.last_name
    }

    pub fn address(&self) -> &str {
        &self.fields.address
    }

    pub fn city(&self) -> &str {
        &self.fields.city
    }

    pub fn phone_number(&self) -> &str {
        &self.fields.phone_number
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.fields.first_name = first_name.into();
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.fields.last_name = last_name.into();
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.fields.address = address.into();
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.fields.city = city.into();
    }

    pub fn set_phone_number(&mut self, phone_number: impl Into<String>) {
        self.fields.phone_number = phone_number.into();
    }

    /// Overwrites all five fields in place; the id is kept.
    pub fn set_fields(&mut self, fields: ContactFields) {
        self.fields = fields;
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {} {}\nAddress: {}\nCity: {}\nPhone Number: {}",
            self.fields.first_name,
            self.fields.last_name,
            self.fields.address,
            self.fields.city,
            self.fields.phone_number
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    Name,
    Address,
    PhoneNumber,
}

impl Criterion {
    pub fn keyword(&self) -> &'static str {
        match self {
            Criterion::Name => "name",
            Criterion::Address => "address",
            Criterion::PhoneNumber => "phoneNumber",
        }
    }

    /// Human wording used in shell messages.
    pub fn label(&self) -> &'static str {
        match self {
            Criterion::Name => "name",
            Criterion::Address => "address",
            Criterion::PhoneNumber => "phone number",
        }
    }
}

impl FromStr for Criterion {
    type Err = PhonebookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Criterion::Name),
            "address" => Ok(Criterion::Address),
            "phoneNumber" => Ok(Criterion::PhoneNumber),
            other => Err(PhonebookError::UnknownCriterion {
                criterion: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> Entry {
        Entry::new(
            EntryId(1),
            ContactFields::new("Jane", "Doe", "123 Main St", "Springfield", "555-0100"),
        )
    }

    #[test]
    fn test_entry_renders_four_lines() {
        assert_eq!(
            jane().to_string(),
            "Name: Jane Doe\nAddress: 123 Main St\nCity: Springfield\nPhone Number: 555-0100"
        );
    }

    #[test]
    fn test_setters_accept_any_text() {
        let mut entry = jane();
        entry.set_first_name("");
        entry.set_last_name("  Smith ");
        entry.set_address("PO Box 9");
        entry.set_city("Shelbyville");
        entry.set_phone_number("not a number");

        assert_eq!(entry.first_name(), "");
        assert_eq!(entry.last_name(), "  Smith ");
        assert_eq!(entry.address(), "PO Box 9");
        assert_eq!(entry.city(), "Shelbyville");
        assert_eq!(entry.phone_number(), "not a number");
        assert_eq!(entry.id(), EntryId(1));
    }

    #[test]
    fn test_criterion_keywords() {
        assert_eq!("name".parse::<Criterion>().unwrap(), Criterion::Name);
        assert_eq!("address".parse::<Criterion>().unwrap(), Criterion::Address);
        assert!(" address ".parse::<Criterion>().is_err());
        assert_eq!(
            "phoneNumber".parse::<Criterion>().unwrap(),
            Criterion::PhoneNumber
        );
        assert!("phonenumber".parse::<Criterion>().is_err());
        assert!("city".parse::<Criterion>().is_err());
    }
}
