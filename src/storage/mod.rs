//! Storage layer for stacks-cli
//!
//! Provides JSON snapshot storage with atomic writes, first-run seeding,
//! and a backup after every persist.

pub mod books;
pub mod file_io;
pub mod init;
pub mod users;

pub use books::BookRepository;
pub use file_io::{read_json_or_default, write_json_atomic};
pub use init::seed_if_empty;
pub use users::UserRepository;

use std::sync::atomic::{AtomicBool, Ordering};

use crate::backup::BackupManager;
use crate::config::paths::StacksPaths;
use crate::error::CatalogError;

/// Main storage coordinator that owns both repositories
///
/// All catalog mutations funnel through [`Storage::persist`], which writes
/// both snapshots and takes a backup. A failed persist never propagates to
/// the caller: the in-memory collections stay authoritative for the rest
/// of the process and the failure is recorded on the degraded flag.
pub struct Storage {
    paths: StacksPaths,
    pub users: UserRepository,
    pub books: BookRepository,
    backups: BackupManager,
    degraded: AtomicBool,
}

impl Storage {
    /// Create a new Storage instance without touching disk contents
    pub fn new(paths: StacksPaths) -> Result<Self, CatalogError> {
        // Ensure directories exist
        paths.ensure_directories()?;

        Ok(Self {
            users: UserRepository::new(paths.users_file()),
            books: BookRepository::new(paths.books_file()),
            backups: BackupManager::new(paths.clone()),
            paths,
            degraded: AtomicBool::new(false),
        })
    }

    /// Open the store: load both collections and seed them if needed
    ///
    /// This is the full initialization sequence; the returned store is
    /// ready for queries and mutations.
    pub fn open(paths: StacksPaths) -> Result<Self, CatalogError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        init::seed_if_empty(&storage)?;
        Ok(storage)
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &StacksPaths {
        &self.paths
    }

    /// Get the backup manager
    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), CatalogError> {
        self.users.load()?;
        self.books.load()?;
        Ok(())
    }

    /// Save all data to disk, propagating errors
    pub fn save_all(&self) -> Result<(), CatalogError> {
        self.users.save()?;
        self.books.save()?;
        Ok(())
    }

    /// Persist both collections and take a backup, degrading on failure
    ///
    /// I/O errors are logged and flip [`Storage::persistence_degraded`];
    /// the triggering operation always completes against memory.
    pub fn persist(&self) {
        if let Err(e) = self.save_all() {
            log::error!("Persist failed, continuing in memory only: {}", e);
            self.degraded.store(true, Ordering::Relaxed);
            return;
        }

        if let Err(e) = self.backups.create_backup() {
            log::error!("Backup failed: {}", e);
            self.degraded.store(true, Ordering::Relaxed);
        }
    }

    /// Whether any persist since startup has failed
    ///
    /// When true, disk snapshots may be stale and memory is the only
    /// authoritative state.
    pub fn persistence_degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }
}
