//! Backup system for stacks-cli
//!
//! After every persist the data files are copied into a new timestamped
//! directory under `backups/`, giving a point-in-time history of the
//! store. There is no retention policy; old backups accumulate until the
//! user removes them.

mod manager;

pub use manager::{BackupInfo, BackupManager};
