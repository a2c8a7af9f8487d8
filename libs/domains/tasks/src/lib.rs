//! Tasks Domain
//!
//! Personal tasks owned by exactly one user.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← Argument checks, validation, error translation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Staged writes + commit (Postgres or in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Task, DTOs, enums
//! └─────────────┘
//! ```
//!
//! [`authorization`] holds the ownership rule the calling layer applies on
//! top of [`TaskService::get_by_id`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_tasks::{NewTask, PgTaskRepository, Task, TaskPriority, TaskService};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! // One repository per request: it owns that request's unit of work
//! let service = TaskService::new(PgTaskRepository::new(db));
//!
//! let task = Task::from(NewTask {
//!     title: "Water plants".to_string(),
//!     description: "Balcony and kitchen".to_string(),
//!     priority: TaskPriority::Low,
//!     status: Default::default(),
//! });
//! let created = service.create(Some(task), Some(1)).await?;
//! # Ok(())
//! # }
//! ```

pub mod authorization;
pub mod entity;
pub mod error;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use authorization::{ensure_owner, owned_task};
pub use error::{TaskError, TaskResult};
pub use models::{NewTask, Task, TaskPriority, TaskStatus, UpdateTask};
pub use postgres::PgTaskRepository;
pub use repository::{InMemoryTaskRepository, TaskRepository};
pub use service::TaskService;
