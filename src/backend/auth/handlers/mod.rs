//! Authentication Handlers Module
//!
//! HTTP handlers for the `/api/user` route group.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - POST /api/user        (register)
//! ├── login.rs    - POST /api/user/login  (authenticate)
//! └── search.rs   - GET  /api/user        (search, protected)
//! ```

/// Request and response types
pub mod types;

/// Registration handler
pub mod signup;

/// Login handler
pub mod login;

/// User search handler
pub mod search;

pub use types::{AuthResponse, LoginRequest, RegisterRequest, SearchQuery};

pub use signup::register_user;
pub use login::auth_user;
pub use search::all_users;
