// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 bookyard contributors
//! List command - the sorted, filtered collection view

use anyhow::{Context, Result};

use crate::config::Config;
use crate::library::Library;
use crate::projection;
use crate::types::SortKey;

use super::{paint_genre, paint_status, stars};

/// Run the list command
pub fn run(config: &Config, sort: Option<String>, filter: Option<String>, json: bool) -> Result<()> {
    let library = Library::load(&config.data_dir)
        .with_context(|| format!("Failed to load library from {}", config.data_dir.display()))?;

    let sort_key = match sort {
        Some(ref key) => SortKey::parse(key)
            .ok_or_else(|| anyhow::anyhow!("Unknown sort key: {}. Valid: status, title, author", key))?,
        None => config.default_sort,
    };
    let filter = filter.unwrap_or_default();
    let view = projection::project(library.books(), sort_key, &filter, &config.status_order);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if library.books().is_empty() {
        println!("No books yet. Use 'bookyard add <title>' to shelve one.");
        return Ok(());
    }
    if view.is_empty() {
        println!("No books match '{filter}'.");
        return Ok(());
    }

    println!("Books ({}):", view.len());
    for book in view {
        let mut row = format!("  {} {}", paint_status(book.status), book.title);
        if !book.author.is_empty() {
            row.push_str(&format!(" ({})", book.author));
        }
        if let Some(rating) = book.rating {
            row.push_str(&format!(" {}", stars(rating)));
        }
        let genres = projection::sorted_genres(book, &library.genres.genres);
        if !genres.is_empty() {
            let names: Vec<String> = genres.iter().map(|g| paint_genre(g)).collect();
            row.push_str(&format!(" [{}]", names.join(", ")));
        }
        println!("{row}");
    }

    Ok(())
}
