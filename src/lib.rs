// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 bookyard contributors
//
//! Bookyard library - card catalogue for your reading life
//!
//! This crate provides the core functionality for tracking a personal
//! book collection: shelf lifecycle, dirty-checked edits, sorted and
//! filtered views, genre tagging, and captured quotes.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod config;
pub mod draft;
pub mod library;
pub mod lifecycle;
pub mod projection;

/// Core data types for the persisted library
pub mod types {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{Deserialize, Serialize};
    use sha2::{Digest, Sha256};

    // =========================================================================
    // Reading Status
    // =========================================================================

    /// Where a book sits in its reading lifecycle
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub enum Status {
        /// Owned but not started
        OnShelf,
        /// Currently being read
        InProgress,
        /// Finished
        Completed,
    }

    impl Status {
        /// Every status, in default shelf order
        pub const ALL: [Status; 3] = [Status::OnShelf, Status::InProgress, Status::Completed];

        /// Get the short code for this status (matches the persisted form)
        #[must_use]
        pub fn code(&self) -> &'static str {
            match self {
                Self::OnShelf => "on-shelf",
                Self::InProgress => "in-progress",
                Self::Completed => "completed",
            }
        }

        /// Human-readable label
        #[must_use]
        pub fn label(&self) -> &'static str {
            match self {
                Self::OnShelf => "On Shelf",
                Self::InProgress => "In Progress",
                Self::Completed => "Completed",
            }
        }

        /// One-character list marker
        #[must_use]
        pub fn marker(&self) -> &'static str {
            match self {
                Self::OnShelf => "○",
                Self::InProgress => "◐",
                Self::Completed => "●",
            }
        }

        /// Parse a status from user input, accepting a few spellings
        #[must_use]
        pub fn parse(input: &str) -> Option<Self> {
            match input.trim().to_lowercase().as_str() {
                "on-shelf" | "onshelf" | "shelf" | "owned" | "to-read" => Some(Self::OnShelf),
                "in-progress" | "inprogress" | "reading" | "started" => Some(Self::InProgress),
                "completed" | "complete" | "done" | "finished" | "read" => Some(Self::Completed),
                _ => None,
            }
        }
    }

    // =========================================================================
    // Sort Keys
    // =========================================================================

    /// Sort key for the collection view
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum SortKey {
        /// Group by status, titles alphabetical within each group
        Status,
        /// Alphabetical by title, case-insensitive
        Title,
        /// Alphabetical by author, case-insensitive
        Author,
    }

    impl SortKey {
        /// Get the short code for this sort key
        #[must_use]
        pub fn code(&self) -> &'static str {
            match self {
                Self::Status => "status",
                Self::Title => "title",
                Self::Author => "author",
            }
        }

        /// Parse a sort key from user input
        #[must_use]
        pub fn parse(input: &str) -> Option<Self> {
            match input.trim().to_lowercase().as_str() {
                "status" => Some(Self::Status),
                "title" => Some(Self::Title),
                "author" => Some(Self::Author),
                _ => None,
            }
        }
    }

    // =========================================================================
    // Reading Dates
    // =========================================================================

    /// The three tracked dates of a book's lifecycle
    ///
    /// `started` and `completed` are `None` until the book has actually
    /// reached the phase they belong to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ReadingDates {
        /// When the book entered the library
        pub added: NaiveDate,
        /// When reading began, if it has
        pub started: Option<NaiveDate>,
        /// When reading finished, if it has
        pub completed: Option<NaiveDate>,
    }

    // =========================================================================
    // Book (Entity)
    // =========================================================================

    /// A book in the library
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Book {
        /// Unique identifier: book:<hash>
        pub id: String,
        /// Title
        pub title: String,
        /// Author
        #[serde(default)]
        pub author: String,
        /// Synopsis or notes
        #[serde(default)]
        pub synopsis: String,
        /// Who recommended it
        #[serde(default)]
        pub recommended_by: String,
        /// Reading status
        pub status: Status,
        /// Star rating, 1 to 5
        #[serde(default)]
        pub rating: Option<u8>,
        /// When the book entered the library
        pub date_added: NaiveDate,
        /// When reading began (only once in progress or completed)
        #[serde(default)]
        pub date_started: Option<NaiveDate>,
        /// When reading finished (only once completed)
        #[serde(default)]
        pub date_completed: Option<NaiveDate>,
        /// Cover image bytes, hex-encoded on disk
        #[serde(default, with = "cover_bytes", skip_serializing_if = "Option::is_none")]
        pub cover: Option<Vec<u8>>,
        /// IDs of genres this book is tagged with
        #[serde(default)]
        pub genres: Vec<String>,
        /// Quotes captured from this book
        #[serde(default)]
        pub quotes: Vec<Quote>,
    }

    impl Book {
        /// Create a new book on the shelf, added today
        #[must_use]
        pub fn new(title: impl Into<String>, author: impl Into<String>, today: NaiveDate) -> Self {
            let title = title.into();
            let author = author.into();
            let id = Self::generate_id(&title, &author, Utc::now());
            Self {
                id,
                title,
                author,
                synopsis: String::new(),
                recommended_by: String::new(),
                status: Status::OnShelf,
                rating: None,
                date_added: today,
                date_started: None,
                date_completed: None,
                cover: None,
                genres: Vec::new(),
                quotes: Vec::new(),
            }
        }

        /// Generate a deterministic ID for a book
        #[must_use]
        pub fn generate_id(title: &str, author: &str, created: DateTime<Utc>) -> String {
            let mut hasher = Sha256::new();
            hasher.update(title.as_bytes());
            hasher.update(author.as_bytes());
            hasher.update(created.timestamp_nanos_opt().unwrap_or_default().to_le_bytes());
            let hash = hex::encode(hasher.finalize());
            format!("book:{}", &hash[..8])
        }

        /// The three tracked dates as one value
        #[must_use]
        pub fn dates(&self) -> ReadingDates {
            ReadingDates {
                added: self.date_added,
                started: self.date_started,
                completed: self.date_completed,
            }
        }

        /// Store a dates value back into the three fields
        pub fn set_dates(&mut self, dates: ReadingDates) {
            self.date_added = dates.added;
            self.date_started = dates.started;
            self.date_completed = dates.completed;
        }
    }

    mod cover_bytes {
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            bytes: &Option<Vec<u8>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match bytes {
                Some(b) => serializer.serialize_some(&hex::encode(b)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Vec<u8>>, D::Error> {
            let encoded: Option<String> = Option::deserialize(deserializer)?;
            match encoded {
                Some(s) => hex::decode(&s).map(Some).map_err(serde::de::Error::custom),
                None => Ok(None),
            }
        }
    }

    // =========================================================================
    // Genre
    // =========================================================================

    /// A genre chip books can be tagged with
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Genre {
        /// Unique identifier: genre:<slug>
        pub id: String,
        /// Display name
        pub name: String,
        /// Chip color as #RRGGBB
        pub color: String,
    }

    impl Genre {
        /// Generate the deterministic ID for a genre name
        #[must_use]
        pub fn id_for_name(name: &str) -> String {
            format!("genre:{}", slug(name))
        }

        /// The chip color as RGB components, if the stored color parses
        #[must_use]
        pub fn rgb(&self) -> Option<(u8, u8, u8)> {
            parse_hex_color(&self.color)
        }
    }

    /// Parse a #RRGGBB color string into RGB components
    #[must_use]
    pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
        let digits = color.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let bytes = hex::decode(digits).ok()?;
        Some((bytes[0], bytes[1], bytes[2]))
    }

    fn slug(name: &str) -> String {
        name.to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect::<String>()
            .trim_matches('-')
            .to_string()
    }

    // =========================================================================
    // Quote
    // =========================================================================

    /// A quote captured from a book
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Quote {
        /// Unique identifier: quote:<hash>
        pub id: String,
        /// The quoted text
        pub text: String,
        /// Free-form page reference ("43", "ch. 2"), if any
        #[serde(default)]
        pub page: Option<String>,
        /// When the quote was captured
        pub created_at: DateTime<Utc>,
    }

    impl Quote {
        /// Generate a deterministic ID for a quote
        #[must_use]
        pub fn generate_id(book_id: &str, text: &str, created: DateTime<Utc>) -> String {
            let mut hasher = Sha256::new();
            hasher.update(book_id.as_bytes());
            hasher.update(text.as_bytes());
            hasher.update(created.timestamp_nanos_opt().unwrap_or_default().to_le_bytes());
            let hash = hex::encode(hasher.finalize());
            format!("quote:{}", &hash[..8])
        }
    }

    // =========================================================================
    // Stores
    // =========================================================================

    /// The persisted book collection (library.json)
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct LibraryStore {
        /// All books
        #[serde(default)]
        pub books: Vec<Book>,
    }

    /// The persisted genre definitions (genres.json)
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct GenreStore {
        /// All genres
        #[serde(default)]
        pub genres: Vec<Genre>,
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::types::*;
    pub use anyhow::{Context, Result};
}
