//! Domain model for the book catalog.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep persisted shapes and insert shapes clearly separated.
//!
//! # Invariants
//! - Every persisted entity is identified by a stable storage-assigned id.
//! - Reviews relate to books through `book_id`; the relation is computed by
//!   query, never cached on the book.

pub mod book;
pub mod review;
