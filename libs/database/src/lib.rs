//! Storage plumbing shared by the task and user domains
//!
//! - [`common`]: the [`DatabaseError`] classification every repository
//!   reports through, and the argument guards services run before touching
//!   storage.
//! - [`postgres`] (default feature): connection configuration, the pool
//!   connector and [`postgres::UnitOfWork`], which stages changes in one
//!   transaction until `commit()`.
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL support with SeaORM
//! - `config` (default) - `core_config::FromEnv` for [`postgres::PostgresConfig`]
//!
//! ```ignore
//! use database::postgres::{PostgresConfig, UnitOfWork, connect_from_config};
//! use core_config::FromEnv;
//!
//! let db = connect_from_config(PostgresConfig::from_env()?).await?;
//! let unit = UnitOfWork::new(db.clone());
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{
    ArgumentError, DatabaseError, DatabaseResult, positive_id, require, require_email, require_id,
};
