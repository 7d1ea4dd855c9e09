//! Core domain logic for Shelfmark.
//! This crate is the single source of truth for catalog invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{Book, BookId, NewBook};
pub use model::review::{NewReview, Review, ReviewId};
pub use notify::{
    DeliveryChannel, DeliveryError, EmailLogChannel, Notification, NotificationDispatcher,
};
pub use repo::book_repo::{
    BookFilter, BookRepository, RepoError, RepoResult, SqliteBookRepository,
};
pub use repo::review_repo::{ReviewRepository, SqliteReviewRepository};
pub use service::catalog_service::{CatalogError, CatalogService, CONFIRMATION_RECIPIENT};
pub use store::{Storage, UnitOfWork};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
