//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel rows and domain types and contain no
//! business logic. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module.
//!
//! ```ignore
//! use reelmark::outbound::persistence::{DbPool, DieselRatingRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/reelmark")).await?;
//! let ratings = DieselRatingRepository::new(pool);
//! ```

mod diesel_content_repository;
mod diesel_error_mapping;
mod diesel_favorite_repository;
mod diesel_password_reset_repository;
mod diesel_rating_repository;
mod diesel_user_profile_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_content_repository::DieselContentRepository;
pub use diesel_favorite_repository::DieselFavoriteRepository;
pub use diesel_password_reset_repository::DieselPasswordResetRepository;
pub use diesel_rating_repository::DieselRatingRepository;
pub use diesel_user_profile_repository::DieselUserProfileRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
