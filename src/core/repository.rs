//! Contact repository - the CRUD façade over the contacts table.
//!
//! Rows can be addressed two ways: by listing position (the row a user has
//! selected in the current listing) or by id. Positions are only stable
//! until the next insert or delete; callers that hold on to a row should map
//! it to an id with [`ContactRepository::id_at`] first.

use crate::core::contact::{check_arity, Contact, Field, FIELD_COUNT};
use crate::db::{schema::ContactRow, Connection, Schema};
use crate::error::{Error, Result};
use log::debug;

/// Contact repository.
pub struct ContactRepository {
    conn: Connection,
}

impl ContactRepository {
    /// Build a repository over an already opened database handle.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Open an in-memory repository for testing.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(Connection::open_in_memory()?))
    }

    /// Get the underlying connection.
    #[cfg(test)]
    fn conn(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// All contacts in storage order.
    pub fn list(&mut self) -> Result<Vec<Contact>> {
        let rows = self
            .conn
            .query("SELECT * FROM contacts ORDER BY id", &[], ContactRow::from_row)?;
        Ok(rows.into_iter().map(Contact::from_row).collect())
    }

    /// Number of stored contacts.
    pub fn count(&mut self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacts", &[], |r| r.get(0))?;
        Ok(count as usize)
    }

    /// Append a new contact from its eight fields in canonical order.
    ///
    /// Only the arity is checked; required fields are the caller's concern
    /// (see [`crate::core::validate_required`]).
    pub fn insert<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<Contact> {
        check_arity(fields)?;
        let values: Vec<&str> = fields.iter().map(|f| f.as_ref()).collect();
        let params: Vec<&dyn rusqlite::ToSql> =
            values.iter().map(|v| v as &dyn rusqlite::ToSql).collect();

        self.conn.execute(
            &format!(
                "INSERT INTO contacts ({}) VALUES ({})",
                Schema::COLUMNS.join(", "),
                vec!["?"; FIELD_COUNT].join(", ")
            ),
            &params,
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("inserted contact #{id}");
        self.get(id)
    }

    /// Get a contact by id.
    pub fn get(&mut self, id: i64) -> Result<Contact> {
        let row = self
            .conn
            .query_row(
                "SELECT * FROM contacts WHERE id = ?",
                &[&id as &dyn rusqlite::ToSql],
                ContactRow::from_row,
            )
            .map_err(|e| match e {
                Error::Db(rusqlite::Error::QueryReturnedNoRows) => Error::NotFound(id),
                other => other,
            })?;

        Ok(Contact::from_row(row))
    }

    /// Id of the contact at `position` in the current listing.
    pub fn id_at(&mut self, position: usize) -> Result<i64> {
        let offset = i64::try_from(position).unwrap_or(i64::MAX);
        let ids: Vec<i64> = self.conn.query(
            "SELECT id FROM contacts ORDER BY id LIMIT 1 OFFSET ?",
            &[&offset as &dyn rusqlite::ToSql],
            |r| r.get(0),
        )?;

        match ids.first() {
            Some(&id) => Ok(id),
            None => Err(Error::Index {
                position,
                len: self.count()?,
            }),
        }
    }

    /// Non-id fields of the contact at `position`, in canonical order.
    pub fn retrieve(&mut self, position: usize) -> Result<Vec<String>> {
        let id = self.id_at(position)?;
        Ok(self.get(id)?.fields())
    }

    /// Remove the contact at `position` in the current listing.
    pub fn delete(&mut self, position: usize) -> Result<()> {
        let id = self.id_at(position)?;
        self.delete_by_id(id)
    }

    /// Remove a contact by id.
    pub fn delete_by_id(&mut self, id: i64) -> Result<()> {
        let removed = self.conn.execute(
            "DELETE FROM contacts WHERE id = ?",
            &[&id as &dyn rusqlite::ToSql],
        )?;
        if removed == 0 {
            return Err(Error::NotFound(id));
        }
        debug!("deleted contact #{id}");
        Ok(())
    }

    /// Overwrite one field of a contact in place.
    ///
    /// `column` is the canonical field index (0 = first name); the id is
    /// not addressable.
    pub fn update_field(&mut self, id: i64, column: usize, value: &str) -> Result<Contact> {
        let field = Field::from_index(column).ok_or_else(|| {
            Error::Validation(format!(
                "column {column} is not editable (expected 0..{FIELD_COUNT})"
            ))
        })?;

        let updated = self.conn.execute(
            &format!(
                "UPDATE contacts SET {} = ? WHERE id = ?",
                Schema::COLUMNS[field.index()]
            ),
            &[
                &value as &dyn rusqlite::ToSql,
                &id as &dyn rusqlite::ToSql,
            ],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(id));
        }
        debug!("updated {} of contact #{id}", field.label());
        self.get(id)
    }
}
