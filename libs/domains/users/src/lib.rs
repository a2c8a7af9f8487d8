//! Users Domain
//!
//! Registration, credential checks and user lookup.
//!
//! # Features
//!
//! - Registration with validated input
//! - Password hashing with Argon2, behind the [`PasswordHasher`] trait
//! - Authentication that answers "no match" instead of failing
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← Validation, password hashing, error translation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Staged writes + commit (Postgres or in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← User, registration DTO
//! └─────────────┘
//! ```

pub mod entity;
pub mod error;
pub mod models;
pub mod password;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use models::{RegisterUser, User};
pub use password::{Argon2Hasher, PasswordHasher, PasswordMatch};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
