//! # Axum Helpers
//!
//! Shared HTTP error contract for the task manager crates.
//!
//! Domain errors (`TaskError`, `UserError`) convert into [`AppError`], which
//! renders a uniform [`ErrorResponse`] body:
//!
//! | Kind              | Status |
//! |-------------------|--------|
//! | invalid argument  | 400    |
//! | forbidden         | 403    |
//! | not found         | 404    |
//! | conflict          | 409    |
//! | operation failed  | 500    |

pub mod errors;

pub use errors::{AppError, ErrorCode, ErrorResponse};
