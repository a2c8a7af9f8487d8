//! Common utilities shared by every repository implementation

pub mod error;
pub mod guard;

pub use error::{DatabaseError, DatabaseResult};
pub use guard::{ArgumentError, positive_id, require, require_email, require_id};
