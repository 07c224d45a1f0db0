//! # Assets Crate
//!
//! Locating and copying movie images (posters and stills) from a
//! distributor-organized source tree.
//!
//! ## Components
//!
//! ### Asset Resolver
//! Matches a catalog title against filenames under `<Distributor>/`:
//! - Normalized-title substring matching (not whole words)
//! - Folder selection, including the shared "Horizontal Posters" folder
//! - "(1)" / "(2)" tie-break among several candidates
//! - A title-only fallback that searches `<Distributor>/<Category>` directly
//!
//! ### Asset Transfer
//! Copies a resolved file to `<download_root>/<Distributor>/<Category>/`,
//! returning failures as values instead of errors.
//!
//! ## Example Usage
//!
//! ```ignore
//! use assets::{AssetResolver, AssetTransfer};
//! use catalog::AssetCategory;
//!
//! let resolver = AssetResolver::new("Movies");
//! let transfer = AssetTransfer::new("Downloads/Images sourced 19Oct");
//!
//! if let Some(asset) = resolver.find("Title A", "DistX", AssetCategory::Poster) {
//!     let result = transfer.transfer(&asset);
//!     println!("copied: {:?}", result.copied_filename);
//! }
//! ```

// Public modules
pub mod resolver;
pub mod transfer;

// Re-export commonly used types
pub use resolver::{AssetResolver, ResolvedAsset};
pub use transfer::{AssetTransfer, FileCopier, FsCopier, TransferError, TransferResult};

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::AssetCategory;
    use std::fs;

    #[test]
    fn test_find_then_transfer() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::create_dir_all(src.path().join("DistX/Poster")).unwrap();
        fs::write(src.path().join("DistX/Poster/Title A (1).jpg"), b"p").unwrap();

        let resolver = AssetResolver::new(src.path());
        let transfer = AssetTransfer::new(out.path());

        let asset = resolver
            .find("Title A", "DistX", AssetCategory::Poster)
            .expect("poster should resolve");
        let result = transfer.transfer(&asset);

        assert_eq!(result.copied_filename.as_deref(), Some("Title A (1).jpg"));
        assert!(out.path().join("DistX/Poster/Title A (1).jpg").is_file());
    }
}
