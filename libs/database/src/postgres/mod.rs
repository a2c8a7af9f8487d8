//! PostgreSQL connector, configuration and unit of work

mod config;
mod connector;
mod unit_of_work;

pub use config::PostgresConfig;
pub use connector::{connect, connect_from_config, connect_with_options};
pub use unit_of_work::{StageFuture, UnitOfWork};

// Re-export SeaORM types for convenience
pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
