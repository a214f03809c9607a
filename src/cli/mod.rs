//! CLI commands for the contact book.
//!
//! Rows are addressed by their position in `contacts list` (starting at 0).

use crate::codec::{self, import::field_for_label};
use crate::config::{Config, ImportMapping, DEFAULT_EXPORT_DIR};
use crate::core::{validate_required, Contact, ContactRepository, Field, HEADERS};
use crate::db::{Connection, DbPath};
use crate::error::{Error, Result};
use clap::{Parser, Subcommand};
use log::warn;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "contacts")]
#[command(about = "Local contact book", long_about = None)]
pub struct Cli {
    /// Database file
    #[arg(long, global = true, default_value = DbPath::DEFAULT_FILE)]
    pub db: PathBuf,

    /// Directory exported contacts are written to
    #[arg(long, global = true, default_value = DEFAULT_EXPORT_DIR)]
    pub export_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all contacts
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one contact
    Show { row: usize },
    /// Add a contact
    Add {
        first_name: String,
        last_name: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, default_value = "")]
        zip: String,
        #[arg(long, default_value = "")]
        town: String,
        #[arg(long, default_value = "")]
        birthday: String,
    },
    /// Change one field of a contact
    Edit {
        row: usize,
        /// Field label, e.g. "Town" or "Zip code"
        field: String,
        value: String,
    },
    /// Delete a contact
    Delete {
        row: usize,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Import contacts from metadata-block files
    Import {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Match keys to fields by label instead of by position
        #[arg(long)]
        by_label: bool,
    },
    /// Export a contact to `<export-dir>/<last>, <first>.md`
    Export {
        row: usize,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
        /// Include the email address
        #[arg(long)]
        with_email: bool,
    },
}

impl Cli {
    /// Configuration selected by the command line.
    pub fn config(&self) -> Config {
        let mut config = Config {
            db_path: DbPath::new(&self.db),
            export_dir: self.export_dir.clone(),
            ..Config::default()
        };
        match &self.command {
            Commands::Import { by_label: true, .. } => {
                config.import_mapping = ImportMapping::ByLabel;
            }
            Commands::Export {
                with_email: true, ..
            } => config.export_email = true,
            _ => {}
        }
        config
    }
}

/// Run the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config();
    let mut repo = ContactRepository::new(Connection::open_path(&config.db_path)?);

    match cli.command {
        Commands::List { json } => cmd_list(&mut repo, json),
        Commands::Show { row } => cmd_show(&mut repo, row),
        Commands::Add {
            first_name,
            last_name,
            phone,
            email,
            address,
            zip,
            town,
            birthday,
        } => cmd_add(
            &mut repo,
            [
                first_name, last_name, phone, email, address, zip, town, birthday,
            ],
        ),
        Commands::Edit { row, field, value } => cmd_edit(&mut repo, row, &field, &value),
        Commands::Delete { row, yes } => cmd_delete(&mut repo, row, yes),
        Commands::Import { files, .. } => cmd_import(&mut repo, &files, &config),
        Commands::Export { row, yes, .. } => cmd_export(&mut repo, row, yes, &config),
    }
}

fn cmd_list(repo: &mut ContactRepository, json: bool) -> Result<()> {
    let contacts = repo.list()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&contacts)?);
        return Ok(());
    }
    if contacts.is_empty() {
        println!("No contacts");
        return Ok(());
    }
    print!("{}", format_table(&contacts));
    Ok(())
}

fn cmd_show(repo: &mut ContactRepository, row: usize) -> Result<()> {
    let id = repo.id_at(row)?;
    let contact = repo.get(id)?;
    println!("[#{}] {} {}", contact.id, contact.firstname, contact.lastname);
    for field in Field::ALL {
        println!("{:<12}{}", format!("{}:", field.label()), contact.get(field));
    }
    Ok(())
}

fn cmd_add(repo: &mut ContactRepository, fields: [String; 8]) -> Result<()> {
    validate_required(&fields)?;
    let contact = repo.insert(&fields)?;
    println!("{}", contact.id);
    Ok(())
}

fn cmd_edit(repo: &mut ContactRepository, row: usize, label: &str, value: &str) -> Result<()> {
    let field = field_for_label(label)
        .ok_or_else(|| Error::Validation(format!("unknown field {label:?}")))?;
    let id = repo.id_at(row)?;
    if field.is_required() && value.trim().is_empty() {
        return Err(Error::Validation(format!(
            "You must provide a contact's {}",
            field.label()
        )));
    }
    repo.update_field(id, field.index(), value)?;
    println!("Contact #{id} updated");
    Ok(())
}

fn cmd_delete(repo: &mut ContactRepository, row: usize, yes: bool) -> Result<()> {
    let id = repo.id_at(row)?;
    if !confirm("Do you want to remove the selected contact?", yes)? {
        warn!("delete of contact #{id} cancelled");
        println!("Cancelled");
        return Ok(());
    }
    repo.delete_by_id(id)?;
    println!("Contact #{id} deleted");
    Ok(())
}

fn cmd_import(repo: &mut ContactRepository, files: &[PathBuf], config: &Config) -> Result<()> {
    let imported = codec::import_files(repo, files, config.import_mapping)?;
    for contact in &imported {
        println!("{}", contact.id);
    }
    Ok(())
}

fn cmd_export(repo: &mut ContactRepository, row: usize, yes: bool, config: &Config) -> Result<()> {
    // Pin the row to its id before prompting.
    let id = repo.id_at(row)?;
    if !confirm("Do you want to export selected contact?", yes)? {
        warn!("export of contact #{id} cancelled");
        println!("Cancelled");
        return Ok(());
    }
    let fields = repo.get(id)?.fields();
    let path = codec::export_fields(&fields, &config.export_dir, config.export_email)?;
    println!("{}", path.display());
    Ok(())
}

/// Ask a yes/no question on stdin; `assume_yes` skips the prompt.
fn confirm(question: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    print!("{question} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Render contacts as a table sized to its contents.
pub fn format_table(contacts: &[Contact]) -> String {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(contacts.len() + 1);
    let mut header = vec!["Row".to_string()];
    header.extend(HEADERS.iter().map(|h| h.to_string()));
    rows.push(header);
    for (position, contact) in contacts.iter().enumerate() {
        let mut row = vec![position.to_string(), contact.id.to_string()];
        row.extend(contact.fields());
        rows.push(row);
    }

    let mut widths = vec![0; rows[0].len()];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in &rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
