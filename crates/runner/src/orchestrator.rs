//! # Run Orchestrator
//!
//! Drives one image-sourcing run over the catalog:
//! 1. Validate each entry (title and distributor present)
//! 2. Resolve Poster and Still (primary resolve, then title-only fallback)
//! 3. Copy whatever resolved into the dated output folder
//! 4. Record unmatched titles and copy failures
//! 5. Write the copied filenames back into the catalog
//! 6. Render and save the report
//!
//! Entries are processed strictly one after another. Per-entry problems
//! are folded into the run state; only catalog and report I/O can fail
//! the run as a whole.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use assets::{AssetResolver, AssetTransfer, FileCopier, ResolvedAsset};
use catalog::{AssetCategory, AssetFilenames, CatalogEntry, CatalogWorkbook, ImageResults};

use crate::report::ReportGenerator;
use crate::unmatched::{UNDEFINED_DISTRIBUTOR, UNDEFINED_TITLE, UnmatchedTitles};

/// Output folders are named "<prefix> <DDMon>", e.g. "Images sourced 19Oct"
pub const OUTPUT_DIR_PREFIX: &str = "Images sourced";

/// Everything a run needs besides the catalog itself
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Root of the distributor-organized image tree
    pub source_root: PathBuf,
    /// Folder the dated output folder is created in
    pub download_root: PathBuf,
    /// Date stamped on the output folder
    pub run_date: NaiveDate,
    /// Quoted in outreach drafts when set
    pub campaign: Option<String>,
}

impl RunConfig {
    /// Config dated today (local time), with no campaign
    pub fn new(source_root: impl Into<PathBuf>, download_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            download_root: download_root.into(),
            run_date: Local::now().date_naive(),
            campaign: None,
        }
    }

    pub fn with_run_date(mut self, run_date: NaiveDate) -> Self {
        self.run_date = run_date;
        self
    }

    pub fn with_campaign(mut self, campaign: impl Into<String>) -> Self {
        self.campaign = Some(campaign.into());
        self
    }

    /// `<download_root>/Images sourced <DDMon>`
    pub fn output_dir(&self) -> PathBuf {
        self.download_root.join(format!(
            "{} {}",
            OUTPUT_DIR_PREFIX,
            self.run_date.format("%d%b")
        ))
    }
}

/// What a finished run did
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub output_dir: PathBuf,
    pub report_path: PathBuf,
    /// Catalog entries visited
    pub processed: usize,
    /// Files copied across all categories
    pub copied: usize,
    pub unmatched: UnmatchedTitles,
    /// Source paths that failed to copy
    pub copy_errors: Vec<String>,
    pub catalog_rows_updated: usize,
    /// Result titles with no catalog row at update time
    pub catalog_titles_skipped: Vec<String>,
}

/// Mutable state owned by the orchestrator for the length of one run
#[derive(Debug, Default)]
struct RunState {
    unmatched: UnmatchedTitles,
    copy_errors: Vec<String>,
    results: ImageResults,
    copied: usize,
}

/// Coordinates resolver, transfer, catalog update and report for one run
pub struct RunOrchestrator {
    resolver: AssetResolver,
    transfer: AssetTransfer,
    report: ReportGenerator,
    output_dir: PathBuf,
}

impl RunOrchestrator {
    /// Set up a run: creates the dated output folder if needed.
    pub fn new(config: &RunConfig) -> Result<Self> {
        let output_dir = config.output_dir();
        fs::create_dir_all(&output_dir).with_context(|| {
            format!("Failed to create output directory {}", output_dir.display())
        })?;
        info!("Download directory set to: {}", output_dir.display());

        Ok(Self {
            resolver: AssetResolver::new(&config.source_root),
            transfer: AssetTransfer::new(&output_dir),
            report: ReportGenerator::new(config.campaign.clone()),
            output_dir,
        })
    }

    /// Replace the filesystem copy primitives (builder pattern)
    pub fn with_copier(mut self, copier: impl FileCopier + 'static) -> Self {
        self.transfer = AssetTransfer::with_copier(&self.output_dir, copier);
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn resolver(&self) -> &AssetResolver {
        &self.resolver
    }

    /// Run the full pass over `workbook`, update it, and write the report.
    pub fn run(&self, workbook: &mut CatalogWorkbook) -> Result<RunSummary> {
        let span = info_span!("image_run", output = %self.output_dir.display());
        let _guard = span.enter();
        let start_time = Instant::now();

        let entries = workbook.entries();
        info!("Starting image search for {} catalog entries", entries.len());

        let mut state = RunState::default();
        for (idx, entry) in entries.iter().enumerate() {
            debug!("Processing entry {}/{}", idx + 1, entries.len());
            self.process_entry(entry, &mut state);
        }

        let update = workbook
            .apply_results(&state.results)
            .context("Failed to update catalog with image filenames")?;

        let missing = state.unmatched.total();
        if missing > 0 {
            warn!("Images not found for {} titles", missing);
        } else {
            info!("All images were successfully found");
        }
        if !state.copy_errors.is_empty() {
            warn!("Errors copying {} files", state.copy_errors.len());
        }

        let text = self
            .report
            .render(&state.unmatched, &state.copy_errors, workbook.contacts());
        let report_path = self.report.write(&text, &self.output_dir)?;

        info!(
            "Process completed in {:.2?}: {} copied, {} unmatched",
            start_time.elapsed(),
            state.copied,
            missing
        );

        Ok(RunSummary {
            output_dir: self.output_dir.clone(),
            report_path,
            processed: entries.len(),
            copied: state.copied,
            unmatched: state.unmatched,
            copy_errors: state.copy_errors,
            catalog_rows_updated: update.rows_updated,
            catalog_titles_skipped: update.skipped_titles,
        })
    }

    /// Resolve, copy and record a single catalog entry
    fn process_entry(&self, entry: &CatalogEntry, state: &mut RunState) {
        let title = entry.title.trim();
        let distributor = entry.distributor.trim();

        if title.is_empty() || distributor.is_empty() {
            let bucket = if distributor.is_empty() { UNDEFINED_DISTRIBUTOR } else { distributor };
            let label = if title.is_empty() { UNDEFINED_TITLE } else { title };
            warn!("Catalog entry missing title or distributor: '{}' / '{}'", label, bucket);
            state.unmatched.record(bucket, label);
            return;
        }

        let resolved: Vec<ResolvedAsset> = AssetCategory::ALL
            .into_iter()
            .filter_map(|category| self.resolver.find(title, distributor, category))
            .collect();

        let mut files = AssetFilenames::default();
        for asset in &resolved {
            let result = self.transfer.transfer(asset);
            if let Some(error) = &result.error {
                state.copy_errors.push(error.source_path().display().to_string());
            }
            if result.is_success() {
                state.copied += 1;
            }
            files.set(asset.category, result.copied_filename);
        }

        if !files.any() {
            debug!("No image copied for '{}' ({})", title, distributor);
            state.unmatched.record(distributor, title);
        }
        state.results.insert(title.to_string(), files);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"img").unwrap();
    }

    fn build_orchestrator(source: &Path, download: &Path) -> RunOrchestrator {
        let config = RunConfig::new(source, download)
            .with_run_date(NaiveDate::from_ymd_opt(2025, 2, 7).unwrap());
        RunOrchestrator::new(&config).unwrap()
    }

    // ============================================================================
    // Unit Tests: RunConfig
    // ============================================================================

    #[test]
    fn test_output_dir_is_date_stamped() {
        let config = RunConfig::new("Movies", "/downloads")
            .with_run_date(NaiveDate::from_ymd_opt(2025, 2, 7).unwrap());
        assert_eq!(
            config.output_dir(),
            PathBuf::from("/downloads/Images sourced 07Feb")
        );
    }

    #[test]
    fn test_new_creates_output_dir() {
        let source = TempDir::new().unwrap();
        let download = TempDir::new().unwrap();
        let orchestrator = build_orchestrator(source.path(), download.path());
        assert!(orchestrator.output_dir().is_dir());
        assert!(orchestrator.output_dir().starts_with(download.path()));
    }

    // ============================================================================
    // Unit Tests: process_entry
    // ============================================================================

    #[test]
    fn test_missing_fields_go_to_undefined_buckets() {
        let source = TempDir::new().unwrap();
        let download = TempDir::new().unwrap();
        let orchestrator = build_orchestrator(source.path(), download.path());
        let mut state = RunState::default();

        orchestrator.process_entry(&CatalogEntry::new("Title A", "   "), &mut state);
        orchestrator.process_entry(&CatalogEntry::new("", "DistX"), &mut state);
        orchestrator.process_entry(&CatalogEntry::new(" ", ""), &mut state);

        assert_eq!(
            state.unmatched.titles_for(UNDEFINED_DISTRIBUTOR),
            ["Title A", UNDEFINED_TITLE]
        );
        assert_eq!(state.unmatched.titles_for("DistX"), [UNDEFINED_TITLE]);
        assert!(state.results.is_empty(), "invalid entries are not sent to the catalog");
    }

    #[test]
    fn test_entry_with_poster_only_is_matched() {
        let source = TempDir::new().unwrap();
        let download = TempDir::new().unwrap();
        touch(source.path(), "DistX/Poster/Title A.jpg");
        let orchestrator = build_orchestrator(source.path(), download.path());
        let mut state = RunState::default();

        orchestrator.process_entry(&CatalogEntry::new("  Title A ", "DistX"), &mut state);

        assert!(state.unmatched.is_empty());
        assert_eq!(state.copied, 1);
        let files = state.results.get("Title A").unwrap();
        assert_eq!(files.poster.as_deref(), Some("Title A.jpg"));
        assert_eq!(files.still, None);
        assert!(orchestrator.output_dir().join("DistX/Poster/Title A.jpg").is_file());
    }

    #[test]
    fn test_entry_with_nothing_found_is_unmatched() {
        let source = TempDir::new().unwrap();
        let download = TempDir::new().unwrap();
        touch(source.path(), "DistX/Poster/Other.jpg");
        let orchestrator = build_orchestrator(source.path(), download.path());
        let mut state = RunState::default();

        orchestrator.process_entry(&CatalogEntry::new("Title A", "DistX"), &mut state);

        assert_eq!(state.unmatched.titles_for("DistX"), ["Title A"]);
        assert_eq!(state.results.get("Title A"), Some(&AssetFilenames::default()));
        assert!(state.copy_errors.is_empty());
    }

    #[test]
    fn test_horizontal_posters_serve_both_categories() {
        let source = TempDir::new().unwrap();
        let download = TempDir::new().unwrap();
        touch(source.path(), "DistX/Horizontal Posters/Title A wide.jpg");
        touch(source.path(), "DistX/Still/Title A still.jpg");
        let orchestrator = build_orchestrator(source.path(), download.path());
        let mut state = RunState::default();

        orchestrator.process_entry(&CatalogEntry::new("Title A", "DistX"), &mut state);

        let files = state.results.get("Title A").unwrap();
        assert_eq!(files.poster.as_deref(), Some("Title A wide.jpg"));
        assert_eq!(files.still.as_deref(), Some("Title A wide.jpg"));
        assert_eq!(state.copied, 2);
    }

    #[test]
    fn test_still_falls_back_to_title_only_search() {
        let source = TempDir::new().unwrap();
        let download = TempDir::new().unwrap();
        touch(source.path(), "DistX/Horizontal Posters/Another Film.jpg");
        touch(source.path(), "DistX/Still/Title A still.jpg");
        let orchestrator = build_orchestrator(source.path(), download.path());
        let mut state = RunState::default();

        orchestrator.process_entry(&CatalogEntry::new("Title A", "DistX"), &mut state);

        let files = state.results.get("Title A").unwrap();
        assert_eq!(files.poster, None);
        assert_eq!(files.still.as_deref(), Some("Title A still.jpg"));
        assert!(orchestrator.output_dir().join("DistX/Still/Title A still.jpg").is_file());
        assert!(state.unmatched.is_empty());
    }
}
