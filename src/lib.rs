//! stacks-cli - Terminal-based library catalog manager
//!
//! This library provides the core functionality for the stacks-cli catalog
//! application: user accounts with role-based access, a book catalog with
//! copy counts, and JSON snapshot persistence with timestamped backups.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path management
//! - `error`: Custom error types
//! - `models`: Core data models (users, books)
//! - `storage`: JSON file storage layer and seed data
//! - `backup`: Point-in-time backup management
//! - `services`: Session and catalog operations
//! - `cli`: Interactive shell and input validation
//!
//! # Example
//!
//! ```rust,ignore
//! use stacks::config::paths::StacksPaths;
//! use stacks::storage::Storage;
//!
//! let paths = StacksPaths::new()?;
//! let storage = Storage::open(paths)?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::CatalogError;
