//! Exporting contacts to metadata-block files.

use crate::codec::frontmatter;
use crate::core::{check_arity, ContactRepository, Field};
use crate::error::Result;
use log::info;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Labels written on export, in file order.
pub const EXPORT_LABELS: [(&str, Field); 7] = [
    ("First name", Field::FirstName),
    ("Last name", Field::LastName),
    ("Adress", Field::StreetAddress),
    ("Zip code", Field::ZipCode),
    ("Town", Field::Town),
    ("Phone number", Field::Phone),
    ("Birthday", Field::Birthday),
];

/// Label of the optional email line.
pub const EMAIL_LABEL: &str = "Email";

/// Render retrieved fields (canonical order) as an export document.
///
/// The email line goes right after the phone number when `include_email`
/// is set.
pub fn render<S: AsRef<str>>(fields: &[S], include_email: bool) -> Result<String> {
    check_arity(fields)?;
    let mut pairs: Vec<(&str, &str)> = Vec::with_capacity(EXPORT_LABELS.len() + 1);
    for (label, field) in EXPORT_LABELS {
        pairs.push((label, fields[field.index()].as_ref()));
        if include_email && field == Field::Phone {
            pairs.push((EMAIL_LABEL, fields[Field::Email.index()].as_ref()));
        }
    }
    Ok(frontmatter::render(&pairs))
}

/// File name a contact is exported to: `<lastname>, <firstname>.md`.
///
/// Path separators inside the names are replaced with `_`.
pub fn file_name<S: AsRef<str>>(fields: &[S]) -> Result<String> {
    check_arity(fields)?;
    let clean = |s: &str| s.replace(['/', '\\'], "_");
    Ok(format!(
        "{}, {}.md",
        clean(fields[Field::LastName.index()].as_ref()),
        clean(fields[Field::FirstName.index()].as_ref())
    ))
}

/// Write an export document for `fields` into `dir` and return its path.
///
/// The directory must already exist; an existing file is overwritten.
pub fn export_fields<S: AsRef<str>>(
    fields: &[S],
    dir: &Path,
    include_email: bool,
) -> Result<PathBuf> {
    let document = render(fields, include_email)?;
    if !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("export directory {} does not exist", dir.display()),
        )
        .into());
    }

    let path = dir.join(file_name(fields)?);
    fs::write(&path, document)?;
    info!("exported contact to {}", path.display());
    Ok(path)
}

/// Export the contact at `position` in the current listing.
pub fn export_position(
    repo: &mut ContactRepository,
    position: usize,
    dir: &Path,
    include_email: bool,
) -> Result<PathBuf> {
    let fields = repo.retrieve(position)?;
    export_fields(&fields, dir, include_email)
}
