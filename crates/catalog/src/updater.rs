//! Merging copied filenames back into the `Movies` sheet.
//!
//! Rows are matched by normalized title through a lookup built once per
//! merge, not by scanning the sheet per result.

use crate::error::Result;
use crate::normalize::{NormalizedKey, normalize};
use crate::sheet::Sheet;
use crate::types::{AssetCategory, ImageResults, UpdateSummary};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

pub const TITLE_COLUMN: &str = "Title";
pub const DISTRIBUTOR_COLUMN: &str = "Distributor";

/// Build normalized title -> row index. Later rows overwrite earlier ones
/// with the same key; rows with an empty title are not indexed.
pub fn build_title_lookup(sheet: &Sheet, title_col: usize) -> HashMap<NormalizedKey, usize> {
    let mut lookup = HashMap::new();
    for row in 0..sheet.rows.len() {
        let key = normalize(sheet.cell(row, title_col));
        if !key.is_empty() {
            lookup.insert(key, row);
        }
    }
    lookup
}

/// Write every resolved filename in `results` into its matching row.
///
/// Results are applied in insertion order, so when several titles normalize
/// to the same row the last one written wins. A category with no filename
/// leaves its cell untouched. Titles without a matching row are skipped and
/// reported back in the summary.
pub fn merge_results(sheet: &mut Sheet, results: &ImageResults) -> Result<UpdateSummary> {
    let title_col = sheet.require_column(TITLE_COLUMN)?;
    let lookup = build_title_lookup(sheet, title_col);

    let mut summary = UpdateSummary::default();
    let mut touched = BTreeSet::new();
    for (title, files) in results.iter() {
        if !files.any() {
            continue;
        }
        let Some(&row) = lookup.get(&normalize(title)) else {
            warn!("No catalog row matches title '{}', filenames not recorded", title);
            summary.skipped_titles.push(title.to_string());
            continue;
        };

        for category in AssetCategory::ALL {
            if let Some(filename) = files.get(category) {
                let col = sheet.ensure_column(category.column_name());
                sheet.set_cell(row, col, filename);
            }
        }
        debug!("Updated catalog row {} for '{}'", row + 2, title);
        touched.insert(row);
    }

    summary.rows_updated = touched.len();
    summary.skipped_titles.sort();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::types::AssetFilenames;

    fn movies() -> Sheet {
        Sheet::parse(
            "Movies",
            "No\tTitle\tDistributor\tPoster\tStill\n\
             1\tTitle A\tDistX\t\t\n\
             2\tTitle B\tDistY\told-b.jpg\told-b-still.jpg\n\
             3\tThe Movie!\tDistX\n",
        )
        .unwrap()
    }

    fn files(poster: Option<&str>, still: Option<&str>) -> AssetFilenames {
        AssetFilenames {
            poster: poster.map(str::to_string),
            still: still.map(str::to_string),
        }
    }

    #[test]
    fn test_only_matching_rows_are_written() {
        let mut sheet = movies();
        let mut results = ImageResults::new();
        results.insert("title a".to_string(), files(Some("a.jpg"), Some("a-still.jpg")));

        let summary = merge_results(&mut sheet, &results).unwrap();

        assert_eq!(summary.rows_updated, 1);
        assert_eq!(sheet.cell(0, 3), "a.jpg");
        assert_eq!(sheet.cell(0, 4), "a-still.jpg");
        // untouched
        assert_eq!(sheet.cell(1, 3), "old-b.jpg");
        assert_eq!(sheet.cell(1, 4), "old-b-still.jpg");
        assert_eq!(sheet.cell(2, 3), "");
    }

    #[test]
    fn test_missing_category_leaves_cell_alone() {
        let mut sheet = movies();
        let mut results = ImageResults::new();
        results.insert("Title B".to_string(), files(Some("new-b.jpg"), None));

        merge_results(&mut sheet, &results).unwrap();

        assert_eq!(sheet.cell(1, 3), "new-b.jpg");
        assert_eq!(sheet.cell(1, 4), "old-b-still.jpg");
    }

    #[test]
    fn test_unknown_titles_are_skipped() {
        let mut sheet = movies();
        let before = sheet.clone();
        let mut results = ImageResults::new();
        results.insert("Renamed Title".to_string(), files(Some("r.jpg"), None));
        results.insert("Nothing Found".to_string(), files(None, None));

        let summary = merge_results(&mut sheet, &results).unwrap();

        assert_eq!(summary.rows_updated, 0);
        assert_eq!(summary.skipped_titles, vec!["Renamed Title".to_string()]);
        assert_eq!(sheet, before);
    }

    #[test]
    fn test_appends_missing_output_columns() {
        let mut sheet = Sheet::parse("Movies", "Title\tDistributor\nThe Movie\tDistX\n").unwrap();
        let mut results = ImageResults::new();
        results.insert("the movie".to_string(), files(None, Some("s.jpg")));

        merge_results(&mut sheet, &results).unwrap();

        assert_eq!(sheet.header, vec!["Title", "Distributor", "Still"]);
        assert_eq!(sheet.cell(0, 2), "s.jpg");
    }

    #[test]
    fn test_titles_sharing_a_row_apply_in_order() {
        let mut sheet = Sheet::parse("Movies", "Title\tPoster\nTitle A\t\nTITLE A\t\n").unwrap();
        let mut results = ImageResults::new();
        results.insert("Title A".to_string(), files(Some("first.jpg"), None));
        results.insert("TITLE A".to_string(), files(Some("second.jpg"), Some("s.jpg")));

        let summary = merge_results(&mut sheet, &results).unwrap();

        assert_eq!(summary.rows_updated, 1, "one row received both results");
        assert_eq!(sheet.cell(1, 1), "second.jpg");
        assert_eq!(sheet.cell(1, 2), "s.jpg");
        assert_eq!(sheet.cell(0, 1), "", "earlier duplicate row is not indexed");
    }

    #[test]
    fn test_last_duplicate_row_wins() {
        let sheet = Sheet::parse("Movies", "Title\nSame!\n\nsame\n").unwrap();
        let lookup = build_title_lookup(&sheet, 0);
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup[&normalize("SAME")], 1);
    }

    #[test]
    fn test_requires_title_column() {
        let mut sheet = Sheet::parse("Movies", "Name\tDistributor\nA\tX\n").unwrap();
        let err = merge_results(&mut sheet, &ImageResults::new()).unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn { .. }));
    }
}
