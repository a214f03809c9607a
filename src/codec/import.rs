//! Importing contacts from metadata-block files.

use crate::codec::frontmatter::{self, Metadata};
use crate::config::ImportMapping;
use crate::core::{Contact, ContactRepository, Field, FIELD_COUNT};
use crate::error::Result;
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Column a metadata key refers to, matched case-insensitively.
///
/// Accepts the export labels, the list headers and the SQL column names.
pub fn field_for_label(label: &str) -> Option<Field> {
    let field = match label.trim().to_lowercase().as_str() {
        "first name" | "firstname" => Field::FirstName,
        "last name" | "lastname" => Field::LastName,
        "phone" | "phone number" => Field::Phone,
        "email" => Field::Email,
        "adress" | "street adress" | "street address" | "streetadress" => Field::StreetAddress,
        "zip code" | "zip" => Field::ZipCode,
        "town" => Field::Town,
        "birthday" => Field::Birthday,
        _ => return None,
    };
    Some(field)
}

/// Turn a parsed metadata block into a field list for
/// [`ContactRepository::insert`].
///
/// With [`ImportMapping::Positional`] the values come out in document order
/// with no check on their number; a wrong count is rejected by the insert.
pub fn fields_from_metadata(metadata: &Metadata, mapping: ImportMapping) -> Vec<String> {
    match mapping {
        ImportMapping::Positional => metadata.values().cloned().collect(),
        ImportMapping::ByLabel => {
            let mut fields = vec![String::new(); FIELD_COUNT];
            for (key, value) in metadata {
                match field_for_label(key) {
                    Some(field) => fields[field.index()] = value.clone(),
                    None => debug!("ignoring unknown key {key:?}"),
                }
            }
            fields
        }
    }
}

/// Parse a metadata-block document and insert it as a new contact.
pub fn import_bytes(
    repo: &mut ContactRepository,
    bytes: &[u8],
    mapping: ImportMapping,
) -> Result<Contact> {
    let metadata = frontmatter::parse(bytes)?;
    let fields = fields_from_metadata(&metadata, mapping);
    repo.insert(&fields)
}

/// Import a single file.
pub fn import_file(
    repo: &mut ContactRepository,
    path: &Path,
    mapping: ImportMapping,
) -> Result<Contact> {
    let bytes = fs::read(path)?;
    let contact = import_bytes(repo, &bytes, mapping)?;
    info!("imported contact #{} from {}", contact.id, path.display());
    Ok(contact)
}

/// Import files in order, stopping at the first failure.
///
/// Contacts imported before the failing file are kept.
pub fn import_files<P: AsRef<Path>>(
    repo: &mut ContactRepository,
    paths: &[P],
    mapping: ImportMapping,
) -> Result<Vec<Contact>> {
    let mut imported = Vec::with_capacity(paths.len());
    for path in paths {
        imported.push(import_file(repo, path.as_ref(), mapping)?);
    }
    Ok(imported)
}
