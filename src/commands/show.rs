// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 bookyard contributors
//! Show command - one book in full

use anyhow::{Context, Result};

use crate::config::Config;
use crate::library::Library;
use crate::projection;

use super::{paint_genre, paint_status, resolve_book, short_sha, stars};

/// Run the show command
pub fn run(config: &Config, book: &str, json: bool) -> Result<()> {
    let library = Library::load(&config.data_dir)
        .with_context(|| format!("Failed to load library from {}", config.data_dir.display()))?;
    let book = resolve_book(&library, book)?;

    if json {
        println!("{}", serde_json::to_string_pretty(book)?);
        return Ok(());
    }

    println!("Book: {} ({})", book.title, book.id);
    if !book.author.is_empty() {
        println!("  author: {}", book.author);
    }
    println!("  status: {} {}", paint_status(book.status), book.status.label());
    if let Some(rating) = book.rating {
        println!("  rating: {}", stars(rating));
    }
    println!("  added: {}", book.date_added);
    if let Some(started) = book.date_started {
        println!("  started: {started}");
    }
    if let Some(completed) = book.date_completed {
        println!("  completed: {completed}");
    }
    if !book.recommended_by.is_empty() {
        println!("  recommended by: {}", book.recommended_by);
    }
    if !book.synopsis.is_empty() {
        println!("  synopsis: {}", book.synopsis);
    }
    if let Some(cover) = &book.cover {
        println!("  cover: {} bytes (sha256:{})", cover.len(), short_sha(cover));
    }

    let genres = projection::sorted_genres(book, &library.genres.genres);
    if !genres.is_empty() {
        let names: Vec<String> = genres.iter().map(|g| paint_genre(g)).collect();
        println!("  genres: {}", names.join(", "));
    }

    let quotes = projection::sorted_quotes(book);
    if !quotes.is_empty() {
        println!("  quotes ({}):", quotes.len());
        for quote in quotes {
            println!("    [{}] {}", quote.id, quote.created_at.format("%Y-%m-%d"));
            let page = quote
                .page
                .as_ref()
                .map(|p| format!(" (page {p})"))
                .unwrap_or_default();
            println!("      \"{}\"{}", quote.text, page);
        }
    }

    Ok(())
}
