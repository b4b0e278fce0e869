//! Backup manager for stacks-cli
//!
//! Creates point-in-time copies of the data files in timestamped
//! directories and lists the existing history.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::paths::StacksPaths;
use crate::error::{CatalogError, CatalogResult};

/// Metadata about a backup
#[derive(Debug, Clone)]
pub struct BackupInfo {
    /// Backup directory name
    pub name: String,
    /// Full path to the backup directory
    pub path: PathBuf,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
}

/// Manages backup creation and listing
pub struct BackupManager {
    /// Path to backup directory
    backup_dir: PathBuf,
    /// Paths to data files
    paths: StacksPaths,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: StacksPaths) -> Self {
        let backup_dir = paths.backup_dir();
        Self { backup_dir, paths }
    }

    /// Copy the data files into a new timestamped backup directory
    ///
    /// Sources that don't exist yet (e.g., the reserved borrow-records
    /// file) are skipped. Returns the path to the created directory.
    pub fn create_backup(&self) -> CatalogResult<PathBuf> {
        let now = Utc::now();
        let name = format!(
            "{}-{:03}",
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis()
        );
        let backup_path = self.backup_dir.join(&name);

        fs::create_dir_all(&backup_path)
            .map_err(|e| CatalogError::Io(format!("Failed to create backup directory: {}", e)))?;

        copy_if_exists(&self.paths.users_file(), &backup_path)?;
        copy_if_exists(&self.paths.books_file(), &backup_path)?;
        copy_if_exists(&self.paths.borrow_records_file(), &backup_path)?;

        Ok(backup_path)
    }

    /// List all available backups, newest first
    pub fn list_backups(&self) -> CatalogResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir)
            .map_err(|e| CatalogError::Io(format!("Failed to read backup directory: {}", e)))?
        {
            let entry = entry
                .map_err(|e| CatalogError::Io(format!("Failed to read directory entry: {}", e)))?;

            let path = entry.path();
            if path.is_dir() {
                if let Some(info) = parse_backup_info(&path) {
                    backups.push(info);
                }
            }
        }

        // Sort by date, newest first
        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(backups)
    }

    /// Get the most recent backup
    pub fn latest_backup(&self) -> CatalogResult<Option<BackupInfo>> {
        let backups = self.list_backups()?;
        Ok(backups.into_iter().next())
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }
}

/// Copy a file into the backup directory, skipping missing sources
fn copy_if_exists(source: &Path, backup_dir: &Path) -> CatalogResult<()> {
    if !source.exists() {
        return Ok(());
    }

    let file_name = source
        .file_name()
        .ok_or_else(|| CatalogError::Io(format!("Invalid source path: {}", source.display())))?;

    fs::copy(source, backup_dir.join(file_name)).map_err(|e| {
        CatalogError::Io(format!("Backup failed for {}: {}", source.display(), e))
    })?;

    Ok(())
}

/// Parse backup info from a timestamped directory name
fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let name = path.file_name()?.to_string_lossy().to_string();
    let created_at = parse_backup_timestamp(&name)?;

    Some(BackupInfo {
        name,
        path: path.to_path_buf(),
        created_at,
    })
}

/// Parse a backup timestamp from a directory name
fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    // Expected format: YYYYMMDD-HHMMSS-mmm
    let parts: Vec<&str> = name.split('-').collect();
    if parts.len() != 3 {
        return None;
    }

    let date_part = parts[0];
    let time_part = parts[1];
    let millis: u32 = parts[2].parse().ok()?;

    if date_part.len() != 8 || time_part.len() != 6 {
        return None;
    }

    let year: i32 = date_part[0..4].parse().ok()?;
    let month: u32 = date_part[4..6].parse().ok()?;
    let day: u32 = date_part[6..8].parse().ok()?;
    let hour: u32 = time_part[0..2].parse().ok()?;
    let minute: u32 = time_part[2..4].parse().ok()?;
    let second: u32 = time_part[4..6].parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = chrono::NaiveTime::from_hms_milli_opt(hour, minute, second, millis)?;
    let datetime = chrono::NaiveDateTime::new(date, time);

    Some(DateTime::from_naive_utc_and_offset(datetime, Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use tempfile::TempDir;

    fn create_test_manager() -> (BackupManager, StacksPaths, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = StacksPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        let manager = BackupManager::new(paths.clone());
        (manager, paths, temp_dir)
    }

    #[test]
    fn test_create_backup_copies_present_files() {
        let (manager, paths, _temp) = create_test_manager();

        fs::write(paths.users_file(), "{\"users\":[]}").unwrap();
        fs::write(paths.books_file(), "{\"books\":[]}").unwrap();
        // borrow_records.json intentionally absent

        let backup_path = manager.create_backup().unwrap();

        assert!(backup_path.join("users.json").exists());
        assert!(backup_path.join("books.json").exists());
        assert!(!backup_path.join("borrow_records.json").exists());
    }

    #[test]
    fn test_missing_sources_are_skipped() {
        let (manager, _paths, _temp) = create_test_manager();

        // No data files at all; still succeeds
        let backup_path = manager.create_backup().unwrap();
        assert!(backup_path.exists());
    }

    #[test]
    fn test_list_backups_newest_first() {
        let (manager, _paths, _temp) = create_test_manager();

        manager.create_backup().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(100));
        manager.create_backup().unwrap();

        let backups = manager.list_backups().unwrap();
        assert_eq!(backups.len(), 2);
        assert!(backups[0].created_at >= backups[1].created_at);
    }

    #[test]
    fn test_latest_backup() {
        let (manager, _paths, _temp) = create_test_manager();

        assert!(manager.latest_backup().unwrap().is_none());

        let path = manager.create_backup().unwrap();
        let latest = manager.latest_backup().unwrap().unwrap();
        assert_eq!(latest.path, path);
    }

    #[test]
    fn test_empty_backup_dir() {
        let (manager, _paths, _temp) = create_test_manager();

        let backups = manager.list_backups().unwrap();
        assert!(backups.is_empty());
    }

    #[test]
    fn test_parse_backup_timestamp() {
        let timestamp = parse_backup_timestamp("20251127-143022-456").unwrap();
        assert_eq!(timestamp.year(), 2025);
        assert_eq!(timestamp.month(), 11);
        assert_eq!(timestamp.day(), 27);

        assert!(parse_backup_timestamp("not-a-backup").is_none());
        assert!(parse_backup_timestamp("20251127-143022").is_none());
    }
}
