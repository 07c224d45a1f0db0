//! The catalog workbook: a directory holding one `.tsv` file per sheet.
//!
//! ```text
//! Images tracker/
//! ├── Movies.tsv                Title, Distributor, ..., Poster, Still
//! └── Distributor_contact.tsv   Distributor, Contact Name(s), Email(s)
//! ```
//!
//! Both sheets are opened together; failing to open either one aborts the run.

use crate::error::{CatalogError, Result};
use crate::sheet::Sheet;
use crate::types::{CatalogEntry, ContactBook, DistributorContact, ImageResults, UpdateSummary};
use crate::updater::{self, DISTRIBUTOR_COLUMN, TITLE_COLUMN};
use std::path::{Path, PathBuf};
use tracing::info;

pub const MOVIES_SHEET: &str = "Movies.tsv";
pub const CONTACTS_SHEET: &str = "Distributor_contact.tsv";

const CONTACT_DISTRIBUTOR_COLUMN: &str = "Distributor";
const CONTACT_NAME_COLUMN: &str = "Contact Name(s)";
const CONTACT_EMAIL_COLUMN: &str = "Email(s)";

/// Loaded catalog: the editable `Movies` sheet plus the read-only contacts.
#[derive(Debug, Clone)]
pub struct CatalogWorkbook {
    dir: PathBuf,
    movies: Sheet,
    contacts: ContactBook,
}

impl CatalogWorkbook {
    /// Open both sheets from a catalog directory
    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(CatalogError::FileNotFound {
                path: dir.display().to_string(),
            });
        }

        let movies = Sheet::read(&dir.join(MOVIES_SHEET))?;
        movies.require_column(TITLE_COLUMN)?;
        movies.require_column(DISTRIBUTOR_COLUMN)?;

        let contacts = parse_contacts(&Sheet::read(&dir.join(CONTACTS_SHEET))?)?;

        info!(
            "Opened catalog {}: {} movie rows, {} distributor contacts",
            dir.display(),
            movies.rows.len(),
            contacts.len()
        );

        Ok(Self {
            dir: dir.to_path_buf(),
            movies,
            contacts,
        })
    }

    /// Build a workbook from in-memory sheets, saved under `dir`
    pub fn from_sheets(dir: &Path, movies: Sheet, contacts: &Sheet) -> Result<Self> {
        movies.require_column(TITLE_COLUMN)?;
        movies.require_column(DISTRIBUTOR_COLUMN)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            movies,
            contacts: parse_contacts(contacts)?,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn movies(&self) -> &Sheet {
        &self.movies
    }

    pub fn contacts(&self) -> &ContactBook {
        &self.contacts
    }

    /// All movie rows in sheet order
    pub fn entries(&self) -> Vec<CatalogEntry> {
        // columns were checked when the workbook was built
        let title_col = self.movies.column_index(TITLE_COLUMN).unwrap_or(0);
        let distributor_col = self.movies.column_index(DISTRIBUTOR_COLUMN).unwrap_or(0);

        (0..self.movies.rows.len())
            .map(|row| {
                CatalogEntry::new(
                    self.movies.cell(row, title_col),
                    self.movies.cell(row, distributor_col),
                )
            })
            .collect()
    }

    /// Merge results into the `Movies` sheet in memory, without saving
    pub fn merge_results(&mut self, results: &ImageResults) -> Result<UpdateSummary> {
        updater::merge_results(&mut self.movies, results)
    }

    /// Merge results and persist the `Movies` sheet
    pub fn apply_results(&mut self, results: &ImageResults) -> Result<UpdateSummary> {
        let summary = self.merge_results(results)?;
        self.save()?;
        info!(
            "Catalog updated with image filenames ({} rows)",
            summary.rows_updated
        );
        Ok(summary)
    }

    pub fn save(&self) -> Result<()> {
        self.movies.write(&self.dir.join(MOVIES_SHEET))
    }
}

fn parse_contacts(sheet: &Sheet) -> Result<ContactBook> {
    let distributor_col = sheet.require_column(CONTACT_DISTRIBUTOR_COLUMN)?;
    let name_col = sheet.require_column(CONTACT_NAME_COLUMN)?;
    let email_col = sheet.require_column(CONTACT_EMAIL_COLUMN)?;

    let contacts = (0..sheet.rows.len())
        .map(|row| DistributorContact {
            distributor: sheet.cell(row, distributor_col).to_string(),
            contact_name: sheet.cell(row, name_col).to_string(),
            email: sheet.cell(row, email_col).to_string(),
        })
        .collect();

    Ok(ContactBook::new(contacts))
}
