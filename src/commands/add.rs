// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 bookyard contributors
//! Add command - shelve a new book

use anyhow::{Context, Result};

use crate::config::Config;
use crate::library::Library;
use crate::types::Book;

use super::{paint_genre, today};

/// Optional fields for a new book
#[derive(Debug, Default)]
pub struct AddArgs {
    /// Author name
    pub author: Option<String>,
    /// Synopsis or notes
    pub synopsis: Option<String>,
    /// Who recommended it
    pub recommended_by: Option<String>,
    /// Existing genres to tag the book with
    pub genres: Vec<String>,
}

/// Run the add command
pub fn run(config: &Config, title: &str, args: AddArgs) -> Result<()> {
    if title.trim().is_empty() {
        anyhow::bail!("A book needs a title");
    }

    let mut library = Library::load(&config.data_dir)
        .with_context(|| format!("Failed to load library from {}", config.data_dir.display()))?;

    // Resolve genre IDs first; unknown genres fail before anything is written
    let mut genre_ids: Vec<String> = Vec::new();
    for needle in &args.genres {
        let id = library.resolve_genre(needle)?.id.clone();
        if !genre_ids.contains(&id) {
            genre_ids.push(id);
        }
    }

    let mut book = Book::new(title, args.author.unwrap_or_default(), today());
    book.synopsis = args.synopsis.unwrap_or_default();
    book.recommended_by = args.recommended_by.unwrap_or_default();
    book.genres = genre_ids;

    let book_id = book.id.clone();
    let author = book.author.clone();
    let tagged: Vec<String> = book
        .genres
        .iter()
        .filter_map(|id| library.genre(id).map(paint_genre))
        .collect();

    if !library.add_book(book) {
        anyhow::bail!("A book with id {} already exists", book_id);
    }
    library.save(&config.data_dir)?;

    println!("Added book: {title} ({book_id})");
    if !author.is_empty() {
        println!("  author: {author}");
    }
    if !tagged.is_empty() {
        println!("  genres: {}", tagged.join(", "));
    }

    Ok(())
}
