//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for books and reviews.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories are only constructed over schema-ready connections
//!   (`try_new` verifies version, tables and columns).
//! - Repository APIs return semantic errors (`BookNotFound`) in addition to
//!   DB transport errors.

pub mod book_repo;
pub mod review_repo;
