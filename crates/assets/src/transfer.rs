//! Asset Transfer.
//!
//! Copies a resolved asset into `<download_root>/<Distributor>/<Category>/`,
//! keeping its filename. Failures never abort a run: they come back inside
//! [`TransferResult`] for the orchestrator to record.

use crate::resolver::{ResolvedAsset, is_plain_folder_name};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

/// Why a copy attempt failed. Every variant carries the source path.
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Permission denied copying {}: {cause}", source_path.display())]
    PermissionDenied {
        source_path: PathBuf,
        #[source]
        cause: io::Error,
    },

    #[error("Error creating {} for {}: {cause}", dest_dir.display(), source_path.display())]
    CreateDir {
        source_path: PathBuf,
        dest_dir: PathBuf,
        #[source]
        cause: io::Error,
    },

    #[error("Refusing to copy {}: distributor '{distributor}' is not a plain folder name", source_path.display())]
    InvalidDestination {
        source_path: PathBuf,
        distributor: String,
    },

    #[error("Error copying {}: {cause}", source_path.display())]
    Copy {
        source_path: PathBuf,
        #[source]
        cause: io::Error,
    },
}

impl TransferError {
    pub fn source_path(&self) -> &Path {
        match self {
            TransferError::PermissionDenied { source_path, .. }
            | TransferError::CreateDir { source_path, .. }
            | TransferError::InvalidDestination { source_path, .. }
            | TransferError::Copy { source_path, .. } => source_path,
        }
    }

    fn from_io(source_path: &Path, cause: io::Error) -> Self {
        if cause.kind() == io::ErrorKind::PermissionDenied {
            TransferError::PermissionDenied {
                source_path: source_path.to_path_buf(),
                cause,
            }
        } else {
            TransferError::Copy {
                source_path: source_path.to_path_buf(),
                cause,
            }
        }
    }
}

/// Outcome of one copy attempt; exactly one of the fields is set.
#[derive(Debug)]
pub struct TransferResult {
    pub copied_filename: Option<String>,
    pub error: Option<TransferError>,
}

impl TransferResult {
    fn copied(filename: String) -> Self {
        Self {
            copied_filename: Some(filename),
            error: None,
        }
    }

    fn failed(error: TransferError) -> Self {
        Self {
            copied_filename: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.copied_filename.is_some()
    }
}

/// Filesystem primitives used by [`AssetTransfer`].
///
/// `Send + Sync` so a transfer can be shared like any other run component.
pub trait FileCopier: Send + Sync {
    /// Create `dir` and all parents; must succeed if it already exists
    fn create_dir_all(&self, dir: &Path) -> io::Result<()>;

    /// Copy `from` to `to`, overwriting `to`
    fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// [`FileCopier`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct FsCopier;

impl FileCopier for FsCopier {
    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::copy(from, to).map(|_| ())
    }
}

/// Copies resolved assets into the run's output tree.
pub struct AssetTransfer {
    download_root: PathBuf,
    copier: Box<dyn FileCopier>,
}

impl AssetTransfer {
    /// Transfer into `download_root` using the real filesystem
    pub fn new(download_root: impl Into<PathBuf>) -> Self {
        Self::with_copier(download_root, FsCopier)
    }

    pub fn with_copier(download_root: impl Into<PathBuf>, copier: impl FileCopier + 'static) -> Self {
        Self {
            download_root: download_root.into(),
            copier: Box::new(copier),
        }
    }

    pub fn download_root(&self) -> &Path {
        &self.download_root
    }

    /// Destination folder for a distributor and category
    pub fn destination_dir(&self, asset: &ResolvedAsset) -> PathBuf {
        self.download_root
            .join(&asset.distributor)
            .join(asset.category.folder_name())
    }

    /// Copy one asset, logging one line for the attempt.
    pub fn transfer(&self, asset: &ResolvedAsset) -> TransferResult {
        let source = &asset.source_path;
        let Some(file_name) = source.file_name() else {
            let error = TransferError::Copy {
                source_path: source.clone(),
                cause: io::Error::new(io::ErrorKind::InvalidInput, "source has no file name"),
            };
            error!("{}", error);
            return TransferResult::failed(error);
        };

        if !is_plain_folder_name(&asset.distributor) {
            let error = TransferError::InvalidDestination {
                source_path: source.clone(),
                distributor: asset.distributor.clone(),
            };
            error!("{}", error);
            return TransferResult::failed(error);
        }

        let dest_dir = self.destination_dir(asset);
        if let Err(cause) = self.copier.create_dir_all(&dest_dir) {
            let error = match cause.kind() {
                io::ErrorKind::PermissionDenied => TransferError::from_io(source, cause),
                _ => TransferError::CreateDir {
                    source_path: source.clone(),
                    dest_dir,
                    cause,
                },
            };
            error!("{}", error);
            return TransferResult::failed(error);
        }

        let dest_path = dest_dir.join(file_name);
        match self.copier.copy(source, &dest_path) {
            Ok(()) => {
                info!("Copied image: {} -> {}", source.display(), dest_path.display());
                TransferResult::copied(file_name.to_string_lossy().into_owned())
            }
            Err(cause) => {
                let error = TransferError::from_io(source, cause);
                error!("{}", error);
                TransferResult::failed(error)
            }
        }
    }
}
