//! Contact model and canonical field order.

use crate::db::ContactRow;
use crate::error::{Error, Result};
use serde::Serialize;

/// Number of non-id fields a contact carries.
pub const FIELD_COUNT: usize = 8;

/// Display headers for the id column followed by the canonical fields.
pub const HEADERS: [&str; FIELD_COUNT + 1] = [
    "ID",
    "First name",
    "Last name",
    "Phone",
    "Email",
    "Adress",
    "Zip code",
    "Town",
    "Birthday",
];

/// Index of each non-id field in the canonical column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName = 0,
    LastName = 1,
    Phone = 2,
    Email = 3,
    StreetAddress = 4,
    ZipCode = 5,
    Town = 6,
    Birthday = 7,
}

impl Field {
    /// All fields in canonical order.
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::FirstName,
        Field::LastName,
        Field::Phone,
        Field::Email,
        Field::StreetAddress,
        Field::ZipCode,
        Field::Town,
        Field::Birthday,
    ];

    /// Position of the field in the canonical order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Field at a canonical position.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human-readable label, as shown in list headers.
    pub fn label(self) -> &'static str {
        HEADERS[self.index() + 1]
    }

    /// Whether the field must be non-empty when a contact is added.
    pub fn is_required(self) -> bool {
        matches!(self, Field::FirstName | Field::LastName)
    }
}

/// A contact as stored in the contacts table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub phone: String,
    pub email: String,
    pub street_address: String,
    pub zip_code: String,
    pub town: String,
    pub birthday: String,
}

impl Contact {
    /// Convert a ContactRow to a Contact. Missing optional columns read as
    /// empty strings.
    pub fn from_row(row: ContactRow) -> Self {
        Self {
            id: row.id,
            firstname: row.firstname,
            lastname: row.lastname,
            phone: row.phone.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
            street_address: row.streetadress.unwrap_or_default(),
            zip_code: row.zip.unwrap_or_default(),
            town: row.town.unwrap_or_default(),
            birthday: row.birthday.unwrap_or_default(),
        }
    }

    /// Non-id fields in canonical order.
    pub fn fields(&self) -> Vec<String> {
        vec![
            self.firstname.clone(),
            self.lastname.clone(),
            self.phone.clone(),
            self.email.clone(),
            self.street_address.clone(),
            self.zip_code.clone(),
            self.town.clone(),
            self.birthday.clone(),
        ]
    }

    /// Value of a single field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.firstname,
            Field::LastName => &self.lastname,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
            Field::StreetAddress => &self.street_address,
            Field::ZipCode => &self.zip_code,
            Field::Town => &self.town,
            Field::Birthday => &self.birthday,
        }
    }
}

/// Fail unless `fields` has exactly [`FIELD_COUNT`] entries.
pub fn check_arity<S: AsRef<str>>(fields: &[S]) -> Result<()> {
    if fields.len() != FIELD_COUNT {
        return Err(Error::Validation(format!(
            "expected {FIELD_COUNT} fields, got {}",
            fields.len()
        )));
    }
    Ok(())
}

/// Check the required fields of a new contact before it is inserted.
///
/// The store itself only checks arity; this is the caller-side check for
/// first and last name.
pub fn validate_required<S: AsRef<str>>(fields: &[S]) -> Result<()> {
    check_arity(fields)?;
    for field in Field::ALL.into_iter().filter(|f| f.is_required()) {
        if fields[field.index()].as_ref().trim().is_empty() {
            return Err(Error::Validation(format!(
                "You must provide a contact's {}",
                field.label()
            )));
        }
    }
    Ok(())
}
