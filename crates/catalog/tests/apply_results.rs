//! Integration tests for opening a catalog directory and persisting results.

use catalog::{AssetFilenames, CatalogWorkbook, ImageResults, CONTACTS_SHEET, MOVIES_SHEET};
use std::fs;
use std::path::Path;

fn write_catalog(dir: &Path) {
    fs::write(
        dir.join(MOVIES_SHEET),
        "No\tTitle\tDistributor\tNotes\tPoster\tStill\n\
         1\tTitle A\tDistX\tkeep me\t\t\n\
         2\tTitle B\tDistY\t\t\t\n",
    )
    .unwrap();
    fs::write(
        dir.join(CONTACTS_SHEET),
        "Distributor\tContact Name(s)\tEmail(s)\nDistY\tJo Park\tjo@disty.test\n",
    )
    .unwrap();
}

#[test]
fn test_apply_results_persists_to_movies_sheet() {
    let dir = tempfile::tempdir().unwrap();
    write_catalog(dir.path());

    let mut workbook = CatalogWorkbook::open(dir.path()).unwrap();
    assert_eq!(workbook.entries().len(), 2);
    assert!(workbook.contacts().find("DistY").is_some());

    let mut results = ImageResults::new();
    results.insert(
        "TITLE A".to_string(),
        AssetFilenames {
            poster: Some("title-a-final.jpg".to_string()),
            still: None,
        },
    );
    let summary = workbook.apply_results(&results).unwrap();
    assert_eq!(summary.rows_updated, 1);
    assert!(summary.skipped_titles.is_empty());

    let reopened = CatalogWorkbook::open(dir.path()).unwrap();
    let movies = reopened.movies();
    let poster_col = movies.column_index("Poster").unwrap();
    let notes_col = movies.column_index("Notes").unwrap();

    assert_eq!(movies.cell(0, poster_col), "title-a-final.jpg");
    assert_eq!(movies.cell(0, notes_col), "keep me", "other columns survive a save");
    assert_eq!(movies.cell(1, poster_col), "", "rows absent from results are untouched");
}

#[test]
fn test_open_rejects_sheet_without_distributor_column() {
    let dir = tempfile::tempdir().unwrap();
    write_catalog(dir.path());
    fs::write(dir.path().join(MOVIES_SHEET), "Title\nTitle A\n").unwrap();

    let result = CatalogWorkbook::open(dir.path());
    assert!(result.is_err(), "missing Distributor column is fatal");
}
