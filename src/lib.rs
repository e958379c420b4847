//! Billboard rental management server library.
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod access;
pub mod business_store;
pub mod config;
pub mod documents;
pub mod filtering;
pub mod finance;
pub mod server;
pub mod sqlite_persistence;
pub mod status_badges;
pub mod user;

// Re-export commonly used types for convenience
pub use business_store::{BusinessStore, SqliteBusinessStore};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
pub use user::{SqliteUserStore, UserManager, UserRole, UserStore};
