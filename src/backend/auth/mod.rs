//! Authentication Module
//!
//! Credential primitives used by the auth gate and the login/signup
//! resolvers.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs       - Module exports and documentation
//! ├── sessions.rs  - JWT token generation and validation
//! └── passwords.rs - bcrypt hashing
//! ```
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage
//! - JWT tokens are used for stateless authentication
//! - Tokens expire after the configured TTL (one hour by default)

/// JWT token generation and validation
pub mod sessions;

/// bcrypt password hashing
pub mod passwords;

pub use passwords::{hash_password, verify_password};
pub use sessions::{Claims, TokenKeys};
