// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 bookyard contributors
//
//! Collection views
//!
//! The list the user sees is always computed fresh from the stored
//! books: filter, then sort, never mutate. Nothing here writes anything
//! back, so a view can never change what is on disk.

use std::cmp::Ordering;

use crate::types::{Book, Genre, Quote, SortKey, Status};

/// Project the collection into a sorted, filtered view.
///
/// The filter matches case-insensitively against title or author; an
/// empty filter selects everything. `status_order` decides how status
/// groups rank when sorting by status (titles stay alphabetical within
/// each group). Sorting is stable, so equal books keep their stored
/// order.
#[must_use]
pub fn project<'a>(
    books: &'a [Book],
    sort: SortKey,
    filter: &str,
    status_order: &[Status; 3],
) -> Vec<&'a Book> {
    let needle = filter.to_lowercase();
    let mut view: Vec<&Book> = books
        .iter()
        .filter(|book| {
            needle.is_empty()
                || book.title.to_lowercase().contains(&needle)
                || book.author.to_lowercase().contains(&needle)
        })
        .collect();

    match sort {
        SortKey::Title => view.sort_by(|a, b| compare_ci(&a.title, &b.title)),
        SortKey::Author => view.sort_by(|a, b| compare_ci(&a.author, &b.author)),
        SortKey::Status => view.sort_by(|a, b| {
            status_rank(status_order, a.status)
                .cmp(&status_rank(status_order, b.status))
                .then_with(|| compare_ci(&a.title, &b.title))
        }),
    }
    view
}

/// A book's genres, resolved against the definitions and sorted by name
#[must_use]
pub fn sorted_genres<'a>(book: &Book, definitions: &'a [Genre]) -> Vec<&'a Genre> {
    let mut genres: Vec<&Genre> = definitions
        .iter()
        .filter(|genre| book.genres.iter().any(|id| id == &genre.id))
        .collect();
    genres.sort_by(|a, b| compare_ci(&a.name, &b.name));
    genres
}

/// A book's quotes in the order they were captured
#[must_use]
pub fn sorted_quotes(book: &Book) -> Vec<&Quote> {
    let mut quotes: Vec<&Quote> = book.quotes.iter().collect();
    quotes.sort_by_key(|quote| quote.created_at);
    quotes
}

fn status_rank(order: &[Status; 3], status: Status) -> usize {
    order.iter().position(|&s| s == status).unwrap_or(order.len())
}

fn compare_ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_book(title: &str, author: &str, status: Status) -> Book {
        let mut book = Book::new(title, author, date(2024, 1, 1));
        book.status = status;
        if status != Status::OnShelf {
            book.date_started = Some(date(2024, 1, 2));
        }
        if status == Status::Completed {
            book.date_completed = Some(date(2024, 1, 3));
        }
        book
    }

    fn titles(view: &[&Book]) -> Vec<String> {
        view.iter().map(|b| b.title.clone()).collect()
    }

    #[test]
    fn test_title_sort_ignores_case() {
        let books = vec![
            make_book("zebra", "Someone", Status::OnShelf),
            make_book("Apple", "Someone", Status::OnShelf),
            make_book("mango", "Someone", Status::OnShelf),
        ];
        let view = project(&books, SortKey::Title, "", &Status::ALL);
        assert_eq!(titles(&view), ["Apple", "mango", "zebra"]);
    }

    #[test]
    fn test_author_sort_ignores_case() {
        let books = vec![
            make_book("One", "wright", Status::OnShelf),
            make_book("Two", "Adams", Status::OnShelf),
        ];
        let view = project(&books, SortKey::Author, "", &Status::ALL);
        assert_eq!(titles(&view), ["Two", "One"]);
    }

    #[test]
    fn test_status_sort_groups_then_alphabetizes() {
        let books = vec![
            make_book("Beta", "X", Status::Completed),
            make_book("Delta", "X", Status::OnShelf),
            make_book("Alpha", "X", Status::InProgress),
            make_book("Carol", "X", Status::OnShelf),
        ];
        let view = project(&books, SortKey::Status, "", &Status::ALL);
        assert_eq!(titles(&view), ["Carol", "Delta", "Alpha", "Beta"]);
    }

    #[test]
    fn test_status_sort_honors_custom_order() {
        let books = vec![
            make_book("Shelved", "X", Status::OnShelf),
            make_book("Finished", "X", Status::Completed),
            make_book("Reading", "X", Status::InProgress),
        ];
        let order = [Status::InProgress, Status::OnShelf, Status::Completed];
        let view = project(&books, SortKey::Status, "", &order);
        assert_eq!(titles(&view), ["Reading", "Shelved", "Finished"]);
    }

    #[test]
    fn test_filter_matches_title_or_author_any_case() {
        let books = vec![
            make_book("The Dispossessed", "Ursula K. Le Guin", Status::OnShelf),
            make_book("Leviathan Wakes", "James S. A. Corey", Status::OnShelf),
            make_book("Annihilation", "Jeff VanderMeer", Status::OnShelf),
        ];
        let by_title = project(&books, SortKey::Title, "LEVIATHAN", &Status::ALL);
        assert_eq!(titles(&by_title), ["Leviathan Wakes"]);

        let by_author = project(&books, SortKey::Title, "le guin", &Status::ALL);
        assert_eq!(titles(&by_author), ["The Dispossessed"]);

        let nothing = project(&books, SortKey::Title, "dickens", &Status::ALL);
        assert!(nothing.is_empty());
    }

    #[test]
    fn test_empty_filter_selects_everything() {
        let books = vec![
            make_book("A", "X", Status::OnShelf),
            make_book("B", "Y", Status::Completed),
        ];
        let view = project(&books, SortKey::Title, "", &Status::ALL);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_projection_does_not_reorder_source() {
        let books = vec![
            make_book("Zebra", "X", Status::OnShelf),
            make_book("Apple", "Y", Status::OnShelf),
        ];
        let _ = project(&books, SortKey::Title, "", &Status::ALL);
        assert_eq!(books[0].title, "Zebra");
        assert_eq!(books[1].title, "Apple");
    }

    #[test]
    fn test_equal_keys_keep_stored_order() {
        let mut first = make_book("Same Title", "Same Author", Status::OnShelf);
        first.synopsis = "first".into();
        let mut second = make_book("Same Title", "Same Author", Status::OnShelf);
        second.synopsis = "second".into();
        let books = vec![first, second];

        for sort in [SortKey::Title, SortKey::Author, SortKey::Status] {
            let view = project(&books, sort, "", &Status::ALL);
            assert_eq!(view[0].synopsis, "first");
            assert_eq!(view[1].synopsis, "second");
        }
    }

    #[test]
    fn test_genres_resolve_and_sort_by_name() {
        let definitions = vec![
            Genre { id: "genre:sci-fi".into(), name: "Sci-Fi".into(), color: "#3366ff".into() },
            Genre { id: "genre:classics".into(), name: "Classics".into(), color: "#aa8833".into() },
            Genre { id: "genre:horror".into(), name: "Horror".into(), color: "#882222".into() },
        ];
        let mut book = make_book("Dune", "Frank Herbert", Status::OnShelf);
        book.genres = vec!["genre:sci-fi".into(), "genre:classics".into()];

        let resolved = sorted_genres(&book, &definitions);
        let names: Vec<&str> = resolved.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Classics", "Sci-Fi"]);
    }

    #[test]
    fn test_quotes_sort_by_capture_time() {
        use chrono::{TimeZone, Utc};
        let mut book = make_book("Dune", "Frank Herbert", Status::OnShelf);
        let t1 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap();
        book.quotes = vec![
            Quote { id: "quote:b".into(), text: "later".into(), page: None, created_at: t2 },
            Quote { id: "quote:a".into(), text: "earlier".into(), page: None, created_at: t1 },
        ];
        let quotes = sorted_quotes(&book);
        assert_eq!(quotes[0].text, "earlier");
        assert_eq!(quotes[1].text, "later");
    }
}
