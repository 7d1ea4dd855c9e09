use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crossbeam::channel::{unbounded, Sender};
use rusqlite::Connection;
use shelfmark_core::db::migrations::latest_version;
use shelfmark_core::db::open_db_in_memory;
use shelfmark_core::{
    BookRepository, CatalogError, CatalogService, DeliveryChannel, DeliveryError, EmailLogChannel,
    NewBook, NewReview, Notification, NotificationDispatcher, RepoError, ReviewRepository,
    SqliteBookRepository, SqliteReviewRepository, Storage, CONFIRMATION_RECIPIENT,
};

#[test]
fn create_review_roundtrip_without_book_reference() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReviewRepository::try_new(&conn).unwrap();

    let created = repo
        .create_review(&NewReview::new("A slow start, a strong finish.", 4))
        .unwrap();

    assert!(created.id > 0);
    assert_eq!(created.text, "A slow start, a strong finish.");
    assert_eq!(created.rating, 4);
    assert_eq!(created.book_id, None);
}

#[test]
fn create_review_roundtrip_with_book_reference() {
    let conn = open_db_in_memory().unwrap();
    let books = SqliteBookRepository::try_new(&conn).unwrap();
    let reviews = SqliteReviewRepository::try_new(&conn).unwrap();

    let book = books
        .create_book(&NewBook::new("Solaris", "Stanislaw Lem", 1961))
        .unwrap();
    let created = reviews
        .create_review(&NewReview::with_book("Unsettling and brilliant.", 5, book.id))
        .unwrap();

    assert_eq!(created.book_id, Some(book.id));

    let listed = reviews.list_reviews_for_book(book.id).unwrap();
    assert_eq!(listed, vec![created]);
}

#[test]
fn create_review_with_dangling_book_reference_fails() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReviewRepository::try_new(&conn).unwrap();

    let err = repo
        .create_review(&NewReview::with_book("orphan", 1, 777))
        .unwrap_err();
    assert!(matches!(err, RepoError::BookNotFound(777)));
}

#[test]
fn list_reviews_returns_only_the_given_book_oldest_first() {
    let conn = open_db_in_memory().unwrap();
    let books = SqliteBookRepository::try_new(&conn).unwrap();
    let reviews = SqliteReviewRepository::try_new(&conn).unwrap();

    let first_book = books
        .create_book(&NewBook::new("Solaris", "Stanislaw Lem", 1961))
        .unwrap();
    let second_book = books
        .create_book(&NewBook::new("The Invincible", "Stanislaw Lem", 1964))
        .unwrap();

    let review_a = reviews
        .create_review(&NewReview::with_book("first take", 3, first_book.id))
        .unwrap();
    reviews
        .create_review(&NewReview::with_book("other book", 2, second_book.id))
        .unwrap();
    reviews
        .create_review(&NewReview::new("free-standing", 5))
        .unwrap();
    let review_b = reviews
        .create_review(&NewReview::with_book("second take", 4, first_book.id))
        .unwrap();

    let listed = reviews.list_reviews_for_book(first_book.id).unwrap();
    assert_eq!(listed, vec![review_a, review_b]);
}

#[test]
fn repeated_review_reads_observe_identical_rows() {
    let conn = open_db_in_memory().unwrap();
    let books = SqliteBookRepository::try_new(&conn).unwrap();
    let reviews = SqliteReviewRepository::try_new(&conn).unwrap();

    let book = books
        .create_book(&NewBook::new("Solaris", "Stanislaw Lem", 1961))
        .unwrap();
    for (text, rating) in [("first take", 3), ("second take", 4), ("third take", 5)] {
        reviews
            .create_review(&NewReview::with_book(text, rating, book.id))
            .unwrap();
    }

    let first_pass = reviews.list_reviews_for_book(book.id).unwrap();
    let second_pass = reviews.list_reviews_for_book(book.id).unwrap();
    assert_eq!(first_pass.len(), 3);
    assert_eq!(first_pass, second_pass);
}

#[test]
fn service_review_has_no_book_reference() {
    let service = catalog_with_channel(EmailLogChannel);

    let review = service
        .create_review("Bought on a whim, finished in a night.", 5)
        .unwrap();

    assert_eq!(review.book_id, None);
    assert_eq!(review.rating, 5);
}

#[test]
fn service_queues_one_confirmation_per_created_review() {
    let channel = RecordingChannel::default();
    let delivered = Arc::clone(&channel.delivered);
    let service = catalog_with_channel(channel);

    let first = service.create_review("first", 1).unwrap();
    let second = service.create_review("second", 2).unwrap();
    let third = service.create_review("third", 3).unwrap();

    // Dropping the service drains the dispatcher queue before returning.
    drop(service);

    let delivered = delivered.lock().unwrap();
    assert_eq!(delivered.len(), 3);
    assert!(delivered
        .iter()
        .all(|item| item.recipient == CONFIRMATION_RECIPIENT));

    let delivered_ids: HashSet<_> = delivered.iter().map(|item| item.review_id).collect();
    assert_eq!(
        delivered_ids,
        HashSet::from([first.id, second.id, third.id])
    );
}

#[test]
fn service_review_create_survives_delivery_faults() {
    let service = catalog_with_channel(FailingChannel);

    let review = service.create_review("delivery will fail", 2).unwrap();
    assert!(review.id > 0);

    // Worker faults stay inside the dispatcher; teardown must still drain.
    drop(service);
}

#[test]
fn service_list_reviews_for_missing_book_fails() {
    let service = catalog_with_channel(EmailLogChannel);

    let err = service.list_reviews_for_book(4242).unwrap_err();
    assert!(matches!(err, CatalogError::BookNotFound(4242)));
}

#[test]
fn service_list_reviews_for_reviewless_book_is_empty() {
    let service = catalog_with_channel(EmailLogChannel);

    let book = service
        .create_book(NewBook::new("Roadside Picnic", "Arkady Strugatsky", 1972))
        .unwrap();

    let listed = service.list_reviews_for_book(book.id).unwrap();
    assert!(listed.is_empty());
}

#[test]
fn concurrent_review_creates_assign_distinct_ids() {
    let storage = Storage::open_in_memory().unwrap();
    let dispatcher = NotificationDispatcher::with_workers(EmailLogChannel, 2);
    let service = Arc::new(CatalogService::new(storage, dispatcher));

    let mut handles = Vec::new();
    for worker in 0..4 {
        let service = Arc::clone(&service);
        handles.push(thread::spawn(move || {
            let mut ids = Vec::new();
            for attempt in 0..8 {
                let review = service
                    .create_review(format!("take {worker}-{attempt}"), 3)
                    .unwrap();
                ids.push(review.id);
            }
            ids
        }));
    }

    let mut seen = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(seen.insert(id), "review id {id} assigned twice");
        }
    }
    assert_eq!(seen.len(), 32);
}

#[test]
fn enqueue_survives_delivery_worker_crash() {
    let (crashed_tx, crashed_rx) = unbounded();
    let dispatcher = NotificationDispatcher::new(CrashingChannel {
        crashed: crashed_tx,
    });

    dispatcher.enqueue(1, CONFIRMATION_RECIPIENT);
    crashed_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("the worker should pick up the first notification");

    // The sole worker dies unwinding; once its queue handle is gone, later
    // items are dropped with a log entry instead of failing the caller.
    for review_id in 2..34 {
        dispatcher.enqueue(review_id, CONFIRMATION_RECIPIENT);
        thread::yield_now();
    }
    drop(dispatcher);
}

#[test]
fn review_repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteReviewRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::UninitializedConnection { .. })
    ));
}

#[test]
fn review_repository_rejects_connection_without_reviews_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            publication_year INTEGER NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteReviewRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("reviews"))
    ));
}

#[derive(Clone, Default)]
struct RecordingChannel {
    delivered: Arc<Mutex<Vec<Notification>>>,
}

impl DeliveryChannel for RecordingChannel {
    fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        self.delivered.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

struct FailingChannel;

impl DeliveryChannel for FailingChannel {
    fn deliver(&self, _notification: &Notification) -> Result<(), DeliveryError> {
        Err(DeliveryError::new("smtp relay unavailable"))
    }
}

struct CrashingChannel {
    crashed: Sender<()>,
}

impl DeliveryChannel for CrashingChannel {
    fn deliver(&self, _notification: &Notification) -> Result<(), DeliveryError> {
        let _ = self.crashed.send(());
        panic!("simulated delivery crash");
    }
}

fn catalog_with_channel(channel: impl DeliveryChannel + 'static) -> CatalogService {
    let storage = Storage::open_in_memory().unwrap();
    CatalogService::new(storage, NotificationDispatcher::new(channel))
}
