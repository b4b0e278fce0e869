//! Service layer for stacks-cli
//!
//! The services expose the store's operation surface to the presentation
//! layer: session handling (authentication, registration, the current-user
//! pointer) and catalog queries and mutations. Input validation and role
//! gating live in the calling layer, not here.

pub mod catalog;
pub mod session;

pub use catalog::CatalogService;
pub use session::SessionService;
