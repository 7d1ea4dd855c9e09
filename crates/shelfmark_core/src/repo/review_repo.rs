//! Review repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/list APIs over the `reviews` table.
//! - Enforce the review-to-book reference before any write lands.
//!
//! # Invariants
//! - A non-null `book_id` must reference an existing book; the existence
//!   check runs before the insert, with `foreign_keys=ON` as the backstop.
//! - Listing is constrained to one book and ordered `id ASC`.

use crate::model::book::BookId;
use crate::model::review::{NewReview, Review, ReviewId};
use crate::repo::book_repo::{
    table_exists, table_has_column, RepoError, RepoResult, SqliteBookRepository,
};
use rusqlite::{params, Connection, Row};

const REVIEW_SELECT_SQL: &str = "SELECT
    id,
    text,
    rating,
    book_id
FROM reviews";

/// Repository interface for review operations.
pub trait ReviewRepository {
    /// Persists one review and returns it with the storage-assigned id.
    fn create_review(&self, review: &NewReview) -> RepoResult<Review>;
    /// Lists all reviews attached to the given book, oldest first.
    fn list_reviews_for_book(&self, book_id: BookId) -> RepoResult<Vec<Review>>;
}

/// SQLite-backed review repository.
pub struct SqliteReviewRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReviewRepository<'conn> {
    /// Constructs a repository from a bootstrapped/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        // Reviews reference books, so the book side must be ready too.
        let _ = SqliteBookRepository::try_new(conn)?;
        ensure_review_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ReviewRepository for SqliteReviewRepository<'_> {
    fn create_review(&self, review: &NewReview) -> RepoResult<Review> {
        if let Some(book_id) = review.book_id {
            if !book_exists(self.conn, book_id)? {
                return Err(RepoError::BookNotFound(book_id));
            }
        }

        self.conn.execute(
            "INSERT INTO reviews (text, rating, book_id) VALUES (?1, ?2, ?3);",
            params![review.text.as_str(), review.rating, review.book_id],
        )?;
        load_required_review(self.conn, self.conn.last_insert_rowid())
    }

    fn list_reviews_for_book(&self, book_id: BookId) -> RepoResult<Vec<Review>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REVIEW_SELECT_SQL} WHERE book_id = ?1 ORDER BY id ASC;"))?;

        let mut rows = stmt.query([book_id])?;
        let mut reviews = Vec::new();
        while let Some(row) = rows.next()? {
            reviews.push(parse_review_row(row)?);
        }

        Ok(reviews)
    }
}

fn parse_review_row(row: &Row<'_>) -> RepoResult<Review> {
    Ok(Review {
        id: row.get("id")?,
        text: row.get("text")?,
        rating: row.get("rating")?,
        book_id: row.get("book_id")?,
    })
}

fn load_required_review(conn: &Connection, id: ReviewId) -> RepoResult<Review> {
    let mut stmt = conn.prepare(&format!("{REVIEW_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return parse_review_row(row);
    }
    Err(RepoError::ReviewNotFound(id))
}

fn book_exists(conn: &Connection, book_id: BookId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM books
            WHERE id = ?1
        );",
        [book_id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn ensure_review_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, "reviews")? {
        return Err(RepoError::MissingRequiredTable("reviews"));
    }

    for column in ["id", "text", "rating", "book_id"] {
        if !table_has_column(conn, "reviews", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "reviews",
                column,
            });
        }
    }

    Ok(())
}
