use std::collections::{BTreeMap, BTreeSet};

use super::types::Book;

/// Returns the distinct genre ids referenced by a result set.
pub fn distinct_genre_ids(books: &[Book]) -> BTreeSet<i64> {
    books.iter().map(|book| book.genre).collect()
}

/// Returns the display label for a book's genre.
/// Falls back to the raw id when the genre has not been resolved.
pub fn genre_label(book: &Book, genres: &BTreeMap<i64, String>) -> String {
    genres
        .get(&book.genre)
        .cloned()
        .unwrap_or_else(|| book.genre.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: i64, genre: i64) -> Book {
        Book {
            id,
            title: format!("Book {}", id),
            author: "Author".to_string(),
            description: String::new(),
            genre,
        }
    }

    #[test]
    fn test_distinct_genre_ids_dedupes() {
        let books = vec![book(1, 5), book(2, 5), book(3, 9), book(4, 5)];
        let ids: Vec<i64> = distinct_genre_ids(&books).into_iter().collect();
        assert_eq!(ids, vec![5, 9]);
    }

    #[test]
    fn test_distinct_genre_ids_empty() {
        assert!(distinct_genre_ids(&[]).is_empty());
    }

    #[test]
    fn test_genre_label_resolved() {
        let genres = BTreeMap::from([(5, "Fiction".to_string())]);
        assert_eq!(genre_label(&book(1, 5), &genres), "Fiction");
    }

    #[test]
    fn test_genre_label_unresolved_uses_id() {
        assert_eq!(genre_label(&book(1, 42), &BTreeMap::new()), "42");
    }
}
