//! Configuration for stacks-cli
//!
//! Currently limited to path management; there are no user-tunable
//! settings beyond the data directory override.

pub mod paths;

pub use paths::StacksPaths;
