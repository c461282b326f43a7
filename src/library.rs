// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 bookyard contributors
//
//! Library storage and operations
//!
//! Wraps the two persisted stores (books and genre definitions) behind
//! the operations the commands need: resolution by name or id, the
//! commit gate for drafts, genre tagging with cascade, and quote
//! management. Persistence is pretty-printed JSON under the data
//! directory, read fully on load and written fully on save.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::draft::BookDraft;
use crate::types::{Book, Genre, GenreStore, LibraryStore, Quote, parse_hex_color};

/// An operation the library refuses
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LibraryError {
    /// No book matched the given name or id
    #[error("no book found matching '{0}'")]
    BookNotFound(String),
    /// Several books matched a name
    #[error("book name '{needle}' is ambiguous ({} matches); use an id", .candidates.len())]
    AmbiguousBook {
        /// What the user asked for
        needle: String,
        /// The matching books, as "Title (id)" lines
        candidates: Vec<String>,
    },
    /// No genre matched the given name or id
    #[error("no genre found matching '{0}'")]
    GenreNotFound(String),
    /// A genre with this name already exists
    #[error("genre '{0}' already exists")]
    GenreExists(String),
    /// Genre name was empty
    #[error("a genre needs a name")]
    EmptyGenreName,
    /// Genre color did not parse
    #[error("invalid color '{0}' (expected #RRGGBB)")]
    InvalidColor(String),
    /// Quote text was empty
    #[error("a quote needs some text")]
    EmptyQuoteText,
    /// No quote with the given id
    #[error("no quote found with id '{0}'")]
    QuoteNotFound(String),
}

/// The in-memory library: books plus genre definitions
#[derive(Debug, Clone)]
pub struct Library {
    /// Persisted book collection
    pub store: LibraryStore,
    /// Persisted genre definitions
    pub genres: GenreStore,
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

impl Library {
    /// Create an empty library
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: LibraryStore::default(),
            genres: GenreStore::default(),
        }
    }

    /// Load the library from the data directory
    ///
    /// Missing files mean an empty library. Files that do not parse are
    /// an error; nothing runs against a half-read collection.
    ///
    /// # Errors
    /// Returns an error if a store file exists but cannot be read or parsed.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let library_path = data_dir.join("library.json");
        let genres_path = data_dir.join("genres.json");

        let store = if library_path.exists() {
            let content = fs::read_to_string(&library_path)
                .with_context(|| format!("Failed to read {}", library_path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", library_path.display()))?
        } else {
            LibraryStore::default()
        };

        let genres = if genres_path.exists() {
            let content = fs::read_to_string(&genres_path)
                .with_context(|| format!("Failed to read {}", genres_path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", genres_path.display()))?
        } else {
            GenreStore::default()
        };

        Ok(Self { store, genres })
    }

    /// Save the library to the data directory
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or a store
    /// file cannot be written.
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;

        let library_path = data_dir.join("library.json");
        let content = serde_json::to_string_pretty(&self.store)
            .context("Failed to serialize library")?;
        fs::write(&library_path, content)
            .with_context(|| format!("Failed to write {}", library_path.display()))?;

        let genres_path = data_dir.join("genres.json");
        let content = serde_json::to_string_pretty(&self.genres)
            .context("Failed to serialize genres")?;
        fs::write(&genres_path, content)
            .with_context(|| format!("Failed to write {}", genres_path.display()))?;

        Ok(())
    }

    // =========================================================================
    // Books
    // =========================================================================

    /// All books, in stored order
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.store.books
    }

    /// Find a book by exact id
    #[must_use]
    pub fn get_book(&self, id: &str) -> Option<&Book> {
        self.store.books.iter().find(|b| b.id == id)
    }

    fn get_book_mut(&mut self, id: &str) -> Option<&mut Book> {
        self.store.books.iter_mut().find(|b| b.id == id)
    }

    /// Add a book; returns false if the id is already present
    pub fn add_book(&mut self, book: Book) -> bool {
        if self.store.books.iter().any(|b| b.id == book.id) {
            return false;
        }
        self.store.books.push(book);
        true
    }

    /// Delete a book and everything it owns; returns false if absent
    pub fn delete_book(&mut self, id: &str) -> bool {
        let before = self.store.books.len();
        self.store.books.retain(|b| b.id != id);
        self.store.books.len() < before
    }

    /// Commit a draft back onto its book
    ///
    /// A clean draft is a no-op; returns whether anything was applied.
    ///
    /// # Errors
    /// Returns [`LibraryError::BookNotFound`] if the book is gone.
    pub fn commit(&mut self, id: &str, draft: &BookDraft) -> Result<bool, LibraryError> {
        let book = self
            .get_book_mut(id)
            .ok_or_else(|| LibraryError::BookNotFound(id.to_string()))?;
        if !draft.is_dirty(book) {
            return Ok(false);
        }
        draft.apply_to(book);
        Ok(true)
    }

    /// Resolve a book from an id or a (partial) title
    ///
    /// Ids are looked up exactly. Otherwise a unique case-insensitive
    /// exact title wins, then a unique substring match.
    ///
    /// # Errors
    /// Returns [`LibraryError::BookNotFound`] when nothing matches and
    /// [`LibraryError::AmbiguousBook`] when several books do.
    pub fn resolve_book(&self, needle: &str) -> Result<&Book, LibraryError> {
        if needle.starts_with("book:") {
            return self
                .get_book(needle)
                .ok_or_else(|| LibraryError::BookNotFound(needle.to_string()));
        }

        let lowered = needle.to_lowercase();
        let exact: Vec<&Book> = self
            .store
            .books
            .iter()
            .filter(|b| b.title.to_lowercase() == lowered)
            .collect();
        let matches = if exact.is_empty() {
            self.store
                .books
                .iter()
                .filter(|b| b.title.to_lowercase().contains(&lowered))
                .collect()
        } else {
            exact
        };

        match matches.len() {
            0 => Err(LibraryError::BookNotFound(needle.to_string())),
            1 => Ok(matches[0]),
            _ => Err(LibraryError::AmbiguousBook {
                needle: needle.to_string(),
                candidates: matches
                    .iter()
                    .map(|b| format!("{} ({})", b.title, b.id))
                    .collect(),
            }),
        }
    }

    // =========================================================================
    // Genres
    // =========================================================================

    /// Find a genre by exact id
    #[must_use]
    pub fn genre(&self, id: &str) -> Option<&Genre> {
        self.genres.genres.iter().find(|g| g.id == id)
    }

    /// Resolve a genre from an id or name
    ///
    /// # Errors
    /// Returns [`LibraryError::GenreNotFound`] when nothing matches.
    pub fn resolve_genre(&self, needle: &str) -> Result<&Genre, LibraryError> {
        if needle.starts_with("genre:") {
            return self
                .genre(needle)
                .ok_or_else(|| LibraryError::GenreNotFound(needle.to_string()));
        }
        let lowered = needle.to_lowercase();
        let slugged = Genre::id_for_name(needle);
        self.genres
            .genres
            .iter()
            .find(|g| g.name.to_lowercase() == lowered || g.id == slugged)
            .ok_or_else(|| LibraryError::GenreNotFound(needle.to_string()))
    }

    /// Create a genre definition; returns its id
    ///
    /// # Errors
    /// Rejects empty names, colors that are not #RRGGBB, and names whose
    /// id already exists.
    pub fn create_genre(&mut self, name: &str, color: &str) -> Result<String, LibraryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LibraryError::EmptyGenreName);
        }
        if parse_hex_color(color).is_none() {
            return Err(LibraryError::InvalidColor(color.to_string()));
        }
        let id = Genre::id_for_name(name);
        if self.genre(&id).is_some() {
            return Err(LibraryError::GenreExists(name.to_string()));
        }
        self.genres.genres.push(Genre {
            id: id.clone(),
            name: name.to_string(),
            color: color.to_string(),
        });
        Ok(id)
    }

    /// Delete a genre definition and strip it from every book
    ///
    /// Returns how many books lost the tag, or `None` if the genre did
    /// not exist.
    pub fn delete_genre(&mut self, id: &str) -> Option<usize> {
        let before = self.genres.genres.len();
        self.genres.genres.retain(|g| g.id != id);
        if self.genres.genres.len() == before {
            return None;
        }
        let mut stripped = 0;
        for book in &mut self.store.books {
            let had = book.genres.len();
            book.genres.retain(|g| g != id);
            if book.genres.len() < had {
                stripped += 1;
            }
        }
        Some(stripped)
    }

    /// Tag a book with a genre; returns false if it was already tagged
    ///
    /// # Errors
    /// Both the book and the genre definition must exist.
    pub fn tag_book(&mut self, book_id: &str, genre_id: &str) -> Result<bool, LibraryError> {
        if self.genre(genre_id).is_none() {
            return Err(LibraryError::GenreNotFound(genre_id.to_string()));
        }
        let book = self
            .get_book_mut(book_id)
            .ok_or_else(|| LibraryError::BookNotFound(book_id.to_string()))?;
        if book.genres.iter().any(|g| g == genre_id) {
            return Ok(false);
        }
        book.genres.push(genre_id.to_string());
        Ok(true)
    }

    /// Remove a genre tag from a book; returns false if it was not tagged
    ///
    /// # Errors
    /// Returns [`LibraryError::BookNotFound`] if the book is gone.
    pub fn untag_book(&mut self, book_id: &str, genre_id: &str) -> Result<bool, LibraryError> {
        let book = self
            .get_book_mut(book_id)
            .ok_or_else(|| LibraryError::BookNotFound(book_id.to_string()))?;
        let before = book.genres.len();
        book.genres.retain(|g| g != genre_id);
        Ok(book.genres.len() < before)
    }

    // =========================================================================
    // Quotes
    // =========================================================================

    /// Capture a quote on a book; returns the new quote's id
    ///
    /// # Errors
    /// The book must exist and the text must not be blank.
    pub fn add_quote(
        &mut self,
        book_id: &str,
        text: &str,
        page: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<String, LibraryError> {
        if text.trim().is_empty() {
            return Err(LibraryError::EmptyQuoteText);
        }
        let book = self
            .get_book_mut(book_id)
            .ok_or_else(|| LibraryError::BookNotFound(book_id.to_string()))?;
        let id = Quote::generate_id(&book.id, text, now);
        book.quotes.push(Quote {
            id: id.clone(),
            text: text.to_string(),
            page,
            created_at: now,
        });
        Ok(id)
    }

    /// Find a quote by id, anywhere in the library
    #[must_use]
    pub fn find_quote(&self, quote_id: &str) -> Option<(&Book, &Quote)> {
        self.store.books.iter().find_map(|book| {
            book.quotes
                .iter()
                .find(|q| q.id == quote_id)
                .map(|q| (book, q))
        })
    }

    /// Edit a quote's text and/or page reference
    ///
    /// `page` uses two levels of `Option`: `None` leaves the page alone,
    /// `Some(None)` clears it. The capture time and id never change, so
    /// an edited quote keeps its place in the list.
    ///
    /// # Errors
    /// The quote must exist and replacement text must not be blank.
    pub fn edit_quote(
        &mut self,
        quote_id: &str,
        text: Option<&str>,
        page: Option<Option<String>>,
    ) -> Result<(), LibraryError> {
        if let Some(t) = text {
            if t.trim().is_empty() {
                return Err(LibraryError::EmptyQuoteText);
            }
        }
        let quote = self
            .store
            .books
            .iter_mut()
            .find_map(|book| book.quotes.iter_mut().find(|q| q.id == quote_id))
            .ok_or_else(|| LibraryError::QuoteNotFound(quote_id.to_string()))?;
        if let Some(t) = text {
            quote.text = t.to_string();
        }
        if let Some(p) = page {
            quote.page = p;
        }
        Ok(())
    }

    /// Delete a quote by id; returns false if no such quote exists
    pub fn delete_quote(&mut self, quote_id: &str) -> bool {
        for book in &mut self.store.books {
            let before = book.quotes.len();
            book.quotes.retain(|q| q.id != quote_id);
            if book.quotes.len() < before {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;
    use chrono::{NaiveDate, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn library_with(titles: &[(&str, &str)]) -> Library {
        let mut library = Library::new();
        for (title, author) in titles {
            library.add_book(Book::new(*title, *author, date(2024, 1, 1)));
        }
        library
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut library = library_with(&[("Dune", "Frank Herbert")]);
        let book_id = library.books()[0].id.clone();
        library.create_genre("Sci-Fi", "#3366ff").unwrap();
        library.tag_book(&book_id, "genre:sci-fi").unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        library.add_quote(&book_id, "Fear is the mind-killer.", Some("8".into()), now).unwrap();
        {
            let mut draft = BookDraft::from_book(library.get_book(&book_id).unwrap());
            draft.set_cover(Some(vec![0xff, 0xd8, 0xff, 0xe0]));
            library.commit(&book_id, &draft).unwrap();
        }

        library.save(dir.path()).unwrap();
        let loaded = Library::load(dir.path()).unwrap();

        let book = loaded.get_book(&book_id).unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.genres, vec!["genre:sci-fi".to_string()]);
        assert_eq!(book.quotes.len(), 1);
        assert_eq!(book.quotes[0].text, "Fear is the mind-killer.");
        assert_eq!(book.cover, Some(vec![0xff, 0xd8, 0xff, 0xe0]));
        assert_eq!(loaded.genres.genres.len(), 1);
    }

    #[test]
    fn test_load_missing_dir_is_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let library = Library::load(&dir.path().join("nowhere")).unwrap();
        assert!(library.books().is_empty());
        assert!(library.genres.genres.is_empty());
    }

    #[test]
    fn test_load_rejects_unknown_status() {
        let dir = tempfile::TempDir::new().unwrap();
        let bad = r#"{"books":[{"id":"book:1","title":"X","status":"on-fire","date_added":"2024-01-01"}]}"#;
        std::fs::write(dir.path().join("library.json"), bad).unwrap();
        assert!(Library::load(dir.path()).is_err());
    }

    #[test]
    fn test_add_book_rejects_duplicate_id() {
        let mut library = Library::new();
        let book = Book::new("Dune", "Frank Herbert", date(2024, 1, 1));
        let twin = book.clone();
        assert!(library.add_book(book));
        assert!(!library.add_book(twin));
        assert_eq!(library.books().len(), 1);
    }

    #[test]
    fn test_commit_applies_only_when_dirty() {
        let mut library = library_with(&[("Dune", "Frank Herbert")]);
        let id = library.books()[0].id.clone();

        let clean = BookDraft::from_book(library.get_book(&id).unwrap());
        assert!(!library.commit(&id, &clean).unwrap());

        let mut draft = BookDraft::from_book(library.get_book(&id).unwrap());
        draft.set_status(Status::InProgress, date(2024, 2, 1));
        draft.set_rating(Some(4)).unwrap();
        assert!(library.commit(&id, &draft).unwrap());

        let book = library.get_book(&id).unwrap();
        assert_eq!(book.status, Status::InProgress);
        assert_eq!(book.rating, Some(4));
        assert_eq!(book.date_started, Some(date(2024, 2, 1)));
    }

    #[test]
    fn test_commit_missing_book_errors() {
        let mut library = library_with(&[("Dune", "Frank Herbert")]);
        let id = library.books()[0].id.clone();
        let draft = BookDraft::from_book(library.get_book(&id).unwrap());
        let err = library.commit("book:gone", &draft).unwrap_err();
        assert_eq!(err, LibraryError::BookNotFound("book:gone".into()));
    }

    #[test]
    fn test_resolve_book_by_id_name_and_substring() {
        let library = library_with(&[("Dune", "Frank Herbert"), ("Dune Messiah", "Frank Herbert")]);
        let id = library.books()[1].id.clone();

        assert_eq!(library.resolve_book(&id).unwrap().title, "Dune Messiah");
        // exact title beats the substring overlap with "Dune Messiah"
        assert_eq!(library.resolve_book("dune").unwrap().title, "Dune");
        assert_eq!(library.resolve_book("messiah").unwrap().title, "Dune Messiah");
    }

    #[test]
    fn test_resolve_book_ambiguous_lists_candidates() {
        let library = library_with(&[("Foundation", "Asimov"), ("Foundation and Empire", "Asimov")]);
        // neither title is exactly "found", so both substring-match
        match library.resolve_book("found") {
            Err(LibraryError::AmbiguousBook { candidates, .. }) => {
                assert_eq!(candidates.len(), 2);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
        assert!(matches!(
            library.resolve_book("nonexistent"),
            Err(LibraryError::BookNotFound(_))
        ));
    }

    #[test]
    fn test_genre_create_validates() {
        let mut library = Library::new();
        assert_eq!(
            library.create_genre("  ", "#336699"),
            Err(LibraryError::EmptyGenreName)
        );
        assert_eq!(
            library.create_genre("Horror", "red"),
            Err(LibraryError::InvalidColor("red".into()))
        );
        let id = library.create_genre("Sci-Fi", "#3366ff").unwrap();
        assert_eq!(id, "genre:sci-fi");
        assert_eq!(
            library.create_genre("sci-fi", "#000000"),
            Err(LibraryError::GenreExists("sci-fi".into()))
        );
    }

    #[test]
    fn test_tag_is_idempotent() {
        let mut library = library_with(&[("Dune", "Frank Herbert")]);
        let id = library.books()[0].id.clone();
        library.create_genre("Sci-Fi", "#3366ff").unwrap();

        assert!(library.tag_book(&id, "genre:sci-fi").unwrap());
        assert!(!library.tag_book(&id, "genre:sci-fi").unwrap());
        assert_eq!(library.get_book(&id).unwrap().genres.len(), 1);

        assert!(library.untag_book(&id, "genre:sci-fi").unwrap());
        assert!(!library.untag_book(&id, "genre:sci-fi").unwrap());
    }

    #[test]
    fn test_tag_requires_defined_genre() {
        let mut library = library_with(&[("Dune", "Frank Herbert")]);
        let id = library.books()[0].id.clone();
        assert_eq!(
            library.tag_book(&id, "genre:undefined"),
            Err(LibraryError::GenreNotFound("genre:undefined".into()))
        );
    }

    #[test]
    fn test_delete_genre_cascades_to_books() {
        let mut library = library_with(&[("Dune", "Frank Herbert"), ("Solaris", "Lem")]);
        let dune = library.books()[0].id.clone();
        let solaris = library.books()[1].id.clone();
        library.create_genre("Sci-Fi", "#3366ff").unwrap();
        library.tag_book(&dune, "genre:sci-fi").unwrap();
        library.tag_book(&solaris, "genre:sci-fi").unwrap();

        assert_eq!(library.delete_genre("genre:sci-fi"), Some(2));
        assert!(library.get_book(&dune).unwrap().genres.is_empty());
        assert!(library.get_book(&solaris).unwrap().genres.is_empty());
        assert_eq!(library.delete_genre("genre:sci-fi"), None);
    }

    #[test]
    fn test_resolve_genre_by_name_and_slug() {
        let mut library = Library::new();
        library.create_genre("Science Fiction", "#3366ff").unwrap();
        assert_eq!(library.resolve_genre("science fiction").unwrap().id, "genre:science-fiction");
        assert_eq!(library.resolve_genre("Science Fiction").unwrap().id, "genre:science-fiction");
        assert_eq!(library.resolve_genre("genre:science-fiction").unwrap().name, "Science Fiction");
        assert!(matches!(
            library.resolve_genre("western"),
            Err(LibraryError::GenreNotFound(_))
        ));
    }

    #[test]
    fn test_quote_lifecycle() {
        let mut library = library_with(&[("Dune", "Frank Herbert")]);
        let book_id = library.books()[0].id.clone();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

        assert_eq!(
            library.add_quote(&book_id, "   ", None, now),
            Err(LibraryError::EmptyQuoteText)
        );

        let quote_id = library
            .add_quote(&book_id, "Fear is the mind-killer.", Some("8".into()), now)
            .unwrap();
        let (book, quote) = library.find_quote(&quote_id).unwrap();
        assert_eq!(book.id, book_id);
        assert_eq!(quote.page.as_deref(), Some("8"));

        library.edit_quote(&quote_id, Some("Fear is the mind-killer!"), None).unwrap();
        library.edit_quote(&quote_id, None, Some(None)).unwrap();
        let (_, quote) = library.find_quote(&quote_id).unwrap();
        assert_eq!(quote.text, "Fear is the mind-killer!");
        assert_eq!(quote.page, None);
        assert_eq!(quote.created_at, now);

        assert_eq!(
            library.edit_quote(&quote_id, Some(""), None),
            Err(LibraryError::EmptyQuoteText)
        );
        assert_eq!(
            library.edit_quote("quote:gone", Some("x"), None),
            Err(LibraryError::QuoteNotFound("quote:gone".into()))
        );

        assert!(library.delete_quote(&quote_id));
        assert!(!library.delete_quote(&quote_id));
        assert!(library.find_quote(&quote_id).is_none());
    }

    #[test]
    fn test_edited_quote_keeps_its_place() {
        let mut library = library_with(&[("Dune", "Frank Herbert")]);
        let book_id = library.books()[0].id.clone();
        let t1 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap();
        let first = library.add_quote(&book_id, "first", None, t1).unwrap();
        let second = library.add_quote(&book_id, "second", None, t2).unwrap();

        library.edit_quote(&first, Some("first, edited"), None).unwrap();

        let book = library.get_book(&book_id).unwrap();
        let order: Vec<&str> = crate::projection::sorted_quotes(book)
            .iter()
            .map(|q| q.id.as_str())
            .collect();
        assert_eq!(order, vec![first.as_str(), second.as_str()]);
    }

    #[test]
    fn test_delete_book_takes_quotes_with_it() {
        let mut library = library_with(&[("Dune", "Frank Herbert")]);
        let book_id = library.books()[0].id.clone();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let quote_id = library.add_quote(&book_id, "gone soon", None, now).unwrap();

        assert!(library.delete_book(&book_id));
        assert!(library.find_quote(&quote_id).is_none());
        assert!(!library.delete_book(&book_id));
    }
}
