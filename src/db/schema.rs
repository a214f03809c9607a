//! Database schema and row types.

use crate::db::Connection as DbConnection;
use crate::error::Result;
use log::debug;
use rusqlite::Row;

/// Schema management for the contacts table.
pub struct Schema;

impl Schema {
    /// Name of the single table the contact book uses.
    pub const TABLE: &'static str = "contacts";

    /// Non-id column names, in canonical order.
    pub const COLUMNS: [&'static str; 8] = [
        "firstname",
        "lastname",
        "phone",
        "email",
        "streetadress",
        "zip",
        "town",
        "birthday",
    ];

    /// Create the contacts table if it does not exist yet.
    ///
    /// Safe to call on every open; an existing table and its rows are left
    /// untouched.
    pub fn init(conn: &mut DbConnection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS contacts (
                id INTEGER PRIMARY KEY AUTOINCREMENT UNIQUE NOT NULL,
                firstname VARCHAR(40) NOT NULL,
                lastname VARCHAR(40) NOT NULL,
                phone VARCHAR(15),
                email VARCHAR(40),
                streetadress VARCHAR(40),
                zip VARCHAR(5),
                town VARCHAR(40),
                birthday VARCHAR(12)
            )",
            &[],
        )?;
        debug!("ensured table {}", Self::TABLE);
        Ok(())
    }
}

/// Row representation of a contact from the database.
#[derive(Debug, Clone)]
pub struct ContactRow {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub streetadress: Option<String>,
    pub zip: Option<String>,
    pub town: Option<String>,
    pub birthday: Option<String>,
}

impl ContactRow {
    /// Create a ContactRow from a SQLite row.
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            firstname: row.get("firstname")?,
            lastname: row.get("lastname")?,
            phone: row.get("phone")?,
            email: row.get("email")?,
            streetadress: row.get("streetadress")?,
            zip: row.get("zip")?,
            town: row.get("town")?,
            birthday: row.get("birthday")?,
        })
    }
}
