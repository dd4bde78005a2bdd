//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the driven repository ports, backed by
//! PostgreSQL through `diesel-async` with `bb8` connection pooling.
//!
//! Adapters only translate between Diesel rows and domain types. Row structs
//! (`models.rs`) and table definitions (`schema.rs`) stay private to this
//! module, and every database failure is mapped to the port's error type.
//!
//! # Example
//!
//! ```rust,no_run
//! use schedule_backend::outbound::persistence::{
//!     DbPool, DieselScheduleRepository, PoolConfig,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/schedule")).await?;
//! let schedules = DieselScheduleRepository::new(pool);
//! # let _ = schedules;
//! # Ok(())
//! # }
//! ```

mod diesel_availability_repository;
mod diesel_comment_repository;
mod diesel_helpers;
mod diesel_schedule_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_availability_repository::DieselAvailabilityRepository;
pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_schedule_repository::DieselScheduleRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
