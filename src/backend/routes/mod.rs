//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, static bundle, fallback
//! └── api_routes.rs   - The /api/user, /api/chat and /api/message groups
//! ```
//!
//! # Middleware
//!
//! - `CorsLayer` restricts browser callers to `CORS_ORIGIN`
//! - `TraceLayer` logs every request through `tracing`
//! - `protect` guards the authenticated API routes

pub mod api_routes;
pub mod router;

pub use router::create_router;
