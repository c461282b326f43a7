// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 bookyard contributors
//! Delete command - remove a book and everything it owns

use anyhow::{Context, Result};

use crate::config::Config;
use crate::library::{Library, LibraryError};

/// Run the delete command
pub fn run(config: &Config, book: &str) -> Result<()> {
    let mut library = Library::load(&config.data_dir)
        .with_context(|| format!("Failed to load library from {}", config.data_dir.display()))?;

    match library.resolve_book(book) {
        Ok(found) => {
            let book_id = found.id.clone();
            let title = found.title.clone();
            let quotes = found.quotes.len();

            library.delete_book(&book_id);
            library.save(&config.data_dir)?;

            println!("Deleted {title} ({book_id})");
            if quotes > 0 {
                println!("  removed {quotes} quote(s)");
            }
        }
        // Deleting something already gone is not a failure
        Err(LibraryError::BookNotFound(_)) => {
            println!("Book not found: {book} (nothing to delete)");
        }
        Err(LibraryError::AmbiguousBook { needle, candidates }) => {
            eprintln!("Multiple books match '{needle}':");
            for candidate in &candidates {
                eprintln!("  {candidate}");
            }
            anyhow::bail!("Ambiguous book name. Use the id.");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
