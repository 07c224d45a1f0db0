//! Asset Resolver.
//!
//! Finds the image file for a catalog title inside a distributor's folder.
//!
//! ## Source tree layout
//! ```text
//! <source_root>/<Distributor>/Poster/**/*
//! <source_root>/<Distributor>/Still/**/*
//! <source_root>/<Distributor>/<... Horizontal Posters ...>/**/*   (shared by both categories)
//! ```
//!
//! ## Algorithm (primary resolve)
//! 1. Locate the distributor folder; missing -> soft miss
//! 2. Pick the target folder: a lone "*Horizontal Posters*" folder serves
//!    every category, otherwise `<Distributor>/<Category>`
//! 3. Walk the target recursively in file-name order
//! 4. Candidates are files whose normalized name contains the normalized title
//! 5. Prefer "(1)", then "(2)", then the first candidate

use catalog::{AssetCategory, NormalizedKey, normalize};
use serde::Serialize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Substring a folder name needs to be considered a poster folder
const POSTER_FOLDER_MARKER: &str = "Poster";

/// A lone poster folder with this in its name is searched for every category
const HORIZONTAL_POSTERS_MARKER: &str = "Horizontal Posters";

/// Filename tags marking the primary asset among numbered duplicates, best first
pub const PRIORITY_TAGS: [&str; 2] = ["(1)", "(2)"];

/// A file picked for one title and category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAsset {
    pub source_path: PathBuf,
    pub distributor: String,
    pub category: AssetCategory,
}

/// Looks up title images under a source root.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    source_root: PathBuf,
}

impl AssetResolver {
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
        }
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Primary resolve with folder selection and priority-tag tie-break.
    pub fn resolve(
        &self,
        title: &str,
        distributor: &str,
        category: AssetCategory,
    ) -> Option<PathBuf> {
        let key = searchable_key(title)?;

        let distributor_folder = self.distributor_folder(distributor)?;
        if !distributor_folder.is_dir() {
            warn!("Distributor folder not found: {}", distributor_folder.display());
            return None;
        }

        let target = select_target_folder(&distributor_folder, category);
        if !target.is_dir() {
            warn!("Target folder does not exist: {}", target.display());
            return None;
        }

        let candidates = collect_candidates(&target, &key);
        debug!(
            "{} candidate(s) for '{}' in {}",
            candidates.len(),
            title,
            target.display()
        );
        pick_preferred(candidates)
    }

    /// Fallback resolve: `<Distributor>/<Category>` only, first match wins.
    pub fn resolve_by_title_only(
        &self,
        title: &str,
        distributor: &str,
        category: AssetCategory,
    ) -> Option<PathBuf> {
        let key = searchable_key(title)?;

        let target = self
            .distributor_folder(distributor)?
            .join(category.folder_name());
        if !target.is_dir() {
            debug!("Fallback folder does not exist: {}", target.display());
            return None;
        }

        walk_files(&target).find(|path| file_matches(path, &key))
    }

    /// `<source_root>/<distributor>`, or `None` when the name would leave the root
    fn distributor_folder(&self, distributor: &str) -> Option<PathBuf> {
        if !is_plain_folder_name(distributor) {
            warn!("Distributor '{}' is not a plain folder name, skipping search", distributor);
            return None;
        }
        Some(self.source_root.join(distributor))
    }

    /// Primary resolve, then the title-only fallback
    pub fn find(
        &self,
        title: &str,
        distributor: &str,
        category: AssetCategory,
    ) -> Option<ResolvedAsset> {
        self.resolve(title, distributor, category)
            .or_else(|| self.resolve_by_title_only(title, distributor, category))
            .map(|source_path| ResolvedAsset {
                source_path,
                distributor: distributor.to_string(),
                category,
            })
    }
}

/// Normalized title, or `None` when it is empty and would match any file
fn searchable_key(title: &str) -> Option<NormalizedKey> {
    let key = normalize(title);
    if key.is_empty() {
        warn!("Title '{}' has no letters or digits, skipping search", title);
        return None;
    }
    Some(key)
}

/// True when `name` is a single path component that stays under its parent:
/// not empty, not absolute, no separators, no `.` or `..`.
pub fn is_plain_folder_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Immediate subdirectories whose name contains "Poster" (case-sensitive)
pub fn poster_folders(distributor_folder: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(distributor_folder) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot list {}: {}", distributor_folder.display(), e);
            return Vec::new();
        }
    };

    let mut folders: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir() && name_contains(path, POSTER_FOLDER_MARKER))
        .collect();
    folders.sort();
    folders
}

/// Folder to search for `category` under a distributor folder.
///
/// Some distributors deliver one shared "Horizontal Posters" folder instead
/// of separate Poster/Still folders; when it is the only poster folder it is
/// used for both categories.
pub fn select_target_folder(distributor_folder: &Path, category: AssetCategory) -> PathBuf {
    let mut posters = poster_folders(distributor_folder);
    if posters.len() == 1 && name_contains(&posters[0], HORIZONTAL_POSTERS_MARKER) {
        return posters.remove(0);
    }
    distributor_folder.join(category.folder_name())
}

/// Every file under `target` (recursive, file-name order) matching `key`
pub fn collect_candidates(target: &Path, key: &NormalizedKey) -> Vec<PathBuf> {
    walk_files(target).filter(|path| file_matches(path, key)).collect()
}

/// Apply the priority-tag tie-break to candidates in enumeration order.
pub fn pick_preferred(candidates: Vec<PathBuf>) -> Option<PathBuf> {
    for tag in PRIORITY_TAGS {
        if let Some(tagged) = candidates.iter().find(|path| name_contains(path, tag)) {
            return Some(tagged.clone());
        }
    }
    candidates.into_iter().next()
}

/// Files under `root` in file-name order; symlinks are followed, loops are
/// reported by walkdir and skipped
fn walk_files(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
}

fn file_matches(path: &Path, key: &NormalizedKey) -> bool {
    path.file_name()
        .map(|name| key.is_within(&normalize(&name.to_string_lossy())))
        .unwrap_or(false)
}

fn name_contains(path: &Path, needle: &str) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().contains(needle))
        .unwrap_or(false)
}
