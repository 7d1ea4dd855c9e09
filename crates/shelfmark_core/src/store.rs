//! Shared storage handle and request-scoped access guards.
//!
//! # Responsibility
//! - Own the process-wide SQLite connection behind a lock.
//! - Hand out short-lived unit-of-work guards that scope repository access.
//!
//! # Invariants
//! - All catalog reads and writes pass through a `UnitOfWork`, so storage
//!   operations serialize and a reader never observes a partial write.
//! - The handle is released when the guard drops, on every exit path.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::repo::book_repo::{RepoResult, SqliteBookRepository};
use crate::repo::review_repo::SqliteReviewRepository;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Process-wide storage engine for the catalog.
///
/// One instance is shared by all concurrent callers; the connection behind
/// it is handed out one unit of work at a time.
pub struct Storage {
    conn: Mutex<Connection>,
}

impl Storage {
    /// Opens file-backed storage, bootstrapping the schema when needed.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: Mutex::new(open_db(path)?),
        })
    }

    /// Opens in-memory storage for tests and ephemeral runs.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: Mutex::new(open_db_in_memory()?),
        })
    }

    /// Acquires the storage handle for one request-scoped unit of work.
    ///
    /// Blocks until the handle is free. The returned guard releases it on
    /// drop.
    pub fn unit_of_work(&self) -> UnitOfWork<'_> {
        // A poisoned lock still holds a usable connection: SQLite rolls back
        // any statement the panicking holder left unfinished.
        let conn = match self.conn.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        UnitOfWork { conn }
    }
}

/// RAII guard scoping repository access to one catalog request.
pub struct UnitOfWork<'a> {
    conn: MutexGuard<'a, Connection>,
}

impl UnitOfWork<'_> {
    /// Book repository bound to this unit of work.
    pub fn books(&self) -> RepoResult<SqliteBookRepository<'_>> {
        SqliteBookRepository::try_new(&self.conn)
    }

    /// Review repository bound to this unit of work.
    pub fn reviews(&self) -> RepoResult<SqliteReviewRepository<'_>> {
        SqliteReviewRepository::try_new(&self.conn)
    }
}
