//! Pretty output formatting.

use std::collections::BTreeMap;

use catalog_core::catalog::{genre_label, Book, CatalogSnapshot, Genre};

/// Format a book for display, with its genre name when known.
pub fn format_book(book: &Book, genres: &BTreeMap<i64, String>) -> String {
    let mut output = format!(
        "{} - {}\n  ID: {}\n  Genre: {}",
        book.title,
        book.author,
        book.id,
        genre_label(book, genres)
    );
    if !book.description.is_empty() {
        output.push_str(&format!("\n  Description: {}", book.description));
    }
    output
}

/// Format a catalog snapshot for display.
pub fn format_snapshot(snapshot: &CatalogSnapshot) -> String {
    if snapshot.books.is_empty() {
        return "No books found.".to_string();
    }
    let mut output = format!("BOOKS ({})\n", snapshot.books.len());
    output.push_str(&"-".repeat(40));
    for book in &snapshot.books {
        output.push_str(&format!("\n{}", format_book(book, &snapshot.genres)));
        output.push('\n');
    }
    output
}

/// Format a genre for display.
pub fn format_genre(genre: &Genre) -> String {
    format!("{}\n  ID: {}", genre.name, genre.id)
}
