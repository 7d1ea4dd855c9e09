use serde_json::json;
use shelfmark_core::{Book, NewBook, NewReview, Review};

#[test]
fn book_serialization_uses_expected_wire_fields() {
    let book = Book {
        id: 7,
        title: "The Invincible".to_string(),
        author: "Stanislaw Lem".to_string(),
        publication_year: 1964,
    };

    let value = serde_json::to_value(&book).unwrap();
    assert_eq!(value["id"], 7);
    assert_eq!(value["title"], "The Invincible");
    assert_eq!(value["author"], "Stanislaw Lem");
    assert_eq!(value["publication_year"], 1964);

    let decoded: Book = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, book);
}

#[test]
fn new_book_deserializes_from_wire_shape() {
    let value = json!({
        "title": "Roadside Picnic",
        "author": "Arkady Strugatsky",
        "publication_year": 1972
    });

    let decoded: NewBook = serde_json::from_value(value).unwrap();
    assert_eq!(
        decoded,
        NewBook::new("Roadside Picnic", "Arkady Strugatsky", 1972)
    );
}

#[test]
fn new_book_rejects_missing_required_field() {
    let value = json!({"title": "No Author"});
    assert!(serde_json::from_value::<NewBook>(value).is_err());
}

#[test]
fn new_review_defaults_to_no_book_reference() {
    let free_standing = NewReview::new("no link", 3);
    assert_eq!(free_standing.book_id, None);

    let attached = NewReview::with_book("linked", 4, 11);
    assert_eq!(attached.book_id, Some(11));
}

#[test]
fn review_serialization_keeps_optional_book_reference() {
    let review = Review {
        id: 3,
        text: "kept the reference".to_string(),
        rating: 4,
        book_id: Some(11),
    };

    let value = serde_json::to_value(&review).unwrap();
    assert_eq!(value["book_id"], 11);

    let decoded: Review = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, review);
}
