//! # Catalog Crate
//!
//! This crate owns the movie image catalog: the spreadsheet-style workbook
//! listing titles and distributors, the distributor contact sheet, and the
//! title normalization every other crate matches on.
//!
//! ## Main Components
//!
//! - **normalize**: Canonical, comparable keys for titles and filenames
//! - **types**: Domain types (CatalogEntry, AssetCategory, AssetFilenames, contacts)
//! - **sheet**: Tab-separated sheet codec
//! - **updater**: Merging copied filenames back into catalog rows
//! - **workbook**: Opening and saving the catalog directory
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{CatalogWorkbook, ImageResults};
//! use std::path::Path;
//!
//! let mut workbook = CatalogWorkbook::open(Path::new("Images tracker"))?;
//! for entry in workbook.entries() {
//!     println!("{} ({})", entry.title, entry.distributor);
//! }
//!
//! let results = ImageResults::new();
//! let summary = workbook.apply_results(&results)?;
//! println!("updated {} rows", summary.rows_updated);
//! ```

// Public modules
pub mod error;
pub mod normalize;
pub mod types;
pub mod sheet;
pub mod updater;
pub mod workbook;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use normalize::{NormalizedKey, normalize, normalize_opt};
pub use sheet::Sheet;
pub use types::{
    AssetCategory,
    AssetFilenames,
    CatalogEntry,
    ContactBook,
    DistributorContact,
    ImageResults,
    UpdateSummary,
};
pub use workbook::{CONTACTS_SHEET, CatalogWorkbook, MOVIES_SHEET};
