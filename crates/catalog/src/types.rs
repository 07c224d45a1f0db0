//! Core domain types for the image catalog.
//!
//! These are the values passed between the catalog, the asset resolver and
//! the run orchestrator. None of them hold file handles; the catalog sheets
//! themselves live in [`crate::sheet`] and [`crate::workbook`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Catalog rows
// =============================================================================

/// One movie row as read from the `Movies` sheet.
///
/// Both fields are the raw cell text. Blank cells come through as empty
/// strings; validation (trimming, "is it present?") is the orchestrator's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    pub distributor: String,
}

impl CatalogEntry {
    pub fn new(title: impl Into<String>, distributor: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            distributor: distributor.into(),
        }
    }
}

// =============================================================================
// Asset categories
// =============================================================================

/// The two kinds of image tracked per title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetCategory {
    Poster,
    Still,
}

impl AssetCategory {
    /// Resolution order used by the orchestrator
    pub const ALL: [AssetCategory; 2] = [AssetCategory::Poster, AssetCategory::Still];

    /// Subfolder expected under a distributor folder, and under the output tree
    pub fn folder_name(self) -> &'static str {
        match self {
            AssetCategory::Poster => "Poster",
            AssetCategory::Still => "Still",
        }
    }

    /// Header of the `Movies` column that receives the copied filename
    pub fn column_name(self) -> &'static str {
        match self {
            AssetCategory::Poster => "Poster",
            AssetCategory::Still => "Still",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder_name())
    }
}

impl FromStr for AssetCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "poster" => Ok(AssetCategory::Poster),
            "still" => Ok(AssetCategory::Still),
            other => Err(format!("unknown asset category '{other}' (expected poster or still)")),
        }
    }
}

// =============================================================================
// Results written back into the catalog
// =============================================================================

/// Filenames copied for one title; `None` means nothing was copied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetFilenames {
    pub poster: Option<String>,
    pub still: Option<String>,
}

impl AssetFilenames {
    pub fn get(&self, category: AssetCategory) -> Option<&str> {
        match category {
            AssetCategory::Poster => self.poster.as_deref(),
            AssetCategory::Still => self.still.as_deref(),
        }
    }

    pub fn set(&mut self, category: AssetCategory, filename: Option<String>) {
        match category {
            AssetCategory::Poster => self.poster = filename,
            AssetCategory::Still => self.still = filename,
        }
    }

    /// True when at least one category was copied
    pub fn any(&self) -> bool {
        self.poster.is_some() || self.still.is_some()
    }
}

/// Title (as written in the catalog) -> filenames copied for it.
///
/// Keeps titles in the order they were first inserted, so merging into the
/// catalog replays them in catalog order. Re-inserting a title replaces its
/// filenames in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResults {
    entries: Vec<(String, AssetFilenames)>,
}

impl ImageResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the filenames for `title`
    pub fn insert(&mut self, title: String, files: AssetFilenames) {
        match self.entries.iter_mut().find(|(t, _)| *t == title) {
            Some((_, existing)) => *existing = files,
            None => self.entries.push((title, files)),
        }
    }

    pub fn get(&self, title: &str) -> Option<&AssetFilenames> {
        self.entries
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, files)| files)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (title, filenames) in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AssetFilenames)> {
        self.entries.iter().map(|(t, files)| (t.as_str(), files))
    }
}

/// Outcome of merging [`ImageResults`] into the `Movies` sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSummary {
    /// Rows that received at least one filename
    pub rows_updated: usize,
    /// Result titles with no matching catalog row
    pub skipped_titles: Vec<String>,
}

// =============================================================================
// Distributor contacts
// =============================================================================

/// One row of the `Distributor_contact` sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributorContact {
    pub distributor: String,
    pub contact_name: String,
    pub email: String,
}

/// Read-only lookup over the contact sheet.
#[derive(Debug, Clone, Default)]
pub struct ContactBook {
    contacts: Vec<DistributorContact>,
}

impl ContactBook {
    pub fn new(contacts: Vec<DistributorContact>) -> Self {
        Self { contacts }
    }

    /// First contact whose distributor name equals `distributor` exactly
    pub fn find(&self, distributor: &str) -> Option<&DistributorContact> {
        self.contacts.iter().find(|c| c.distributor == distributor)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!("Poster".parse::<AssetCategory>().unwrap(), AssetCategory::Poster);
        assert_eq!("still".parse::<AssetCategory>().unwrap(), AssetCategory::Still);
        assert!("banner".parse::<AssetCategory>().is_err());
    }

    #[test]
    fn test_asset_filenames_set_get() {
        let mut files = AssetFilenames::default();
        assert!(!files.any());

        files.set(AssetCategory::Still, Some("still.jpg".to_string()));
        assert_eq!(files.get(AssetCategory::Still), Some("still.jpg"));
        assert_eq!(files.get(AssetCategory::Poster), None);
        assert!(files.any());
    }

    #[test]
    fn test_image_results_keep_first_insertion_position() {
        let poster = |name: &str| AssetFilenames {
            poster: Some(name.to_string()),
            still: None,
        };
        let mut results = ImageResults::new();
        results.insert("Title B".to_string(), poster("b.jpg"));
        results.insert("Title A".to_string(), poster("a.jpg"));
        results.insert("Title B".to_string(), poster("b2.jpg"));

        let order: Vec<&str> = results.iter().map(|(title, _)| title).collect();
        assert_eq!(order, vec!["Title B", "Title A"]);
        assert_eq!(results.len(), 2);
        assert_eq!(results.get("Title B").unwrap().poster.as_deref(), Some("b2.jpg"));
        assert!(results.get("Title C").is_none());
    }

    #[test]
    fn test_contact_lookup_is_exact_and_first_wins() {
        let book = ContactBook::new(vec![
            DistributorContact {
                distributor: "DistY".to_string(),
                contact_name: "Jo".to_string(),
                email: "jo@disty.test".to_string(),
            },
            DistributorContact {
                distributor: "DistY".to_string(),
                contact_name: "Sam".to_string(),
                email: "sam@disty.test".to_string(),
            },
        ]);

        assert_eq!(book.find("DistY").unwrap().contact_name, "Jo");
        assert!(book.find("disty").is_none());
        assert!(book.find("DistZ").is_none());
    }
}
