//! Common test utilities and helpers
//!
//! - Database fixtures
//! - Router and listener helpers
//! - Authentication helpers

pub mod database;
pub mod server;

pub use auth_helpers::*;
pub use database::*;
pub use server::*;
