//! Authentication Module
//!
//! This module handles user registration, login, session tokens and the
//! user search used to start new chats.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT token management
//! ├── passwords.rs    - bcrypt hashing
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email, password → user created → token returned
//! 2. **Login**: email, password → credentials verified → token returned
//! 3. **Protected routes**: `Authorization: Bearer <token>` → user attached to the request
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are HS256 JWTs that expire after 30 days
//! - Invalid credentials return 401 without saying which part was wrong

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// Password hashing
pub mod passwords;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{all_users, auth_user, register_user};
pub use users::User;
