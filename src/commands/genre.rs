// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 bookyard contributors
//! Genre management commands - colored chips books can be tagged with

use anyhow::{Context, Result};

use crate::config::Config;
use crate::library::{Library, LibraryError};
use crate::types::Genre;

use super::{paint_genre, resolve_book};

const DEFAULT_COLOR: &str = "#888888";

/// Run the genre command
pub fn run(
    config: &Config,
    action: &str,
    name: Option<String>,
    books: Vec<String>,
    color: Option<String>,
) -> Result<()> {
    let mut library = Library::load(&config.data_dir)
        .with_context(|| format!("Failed to load library from {}", config.data_dir.display()))?;

    match action {
        "create" | "new" => {
            let name = name.ok_or_else(|| anyhow::anyhow!("Genre name is required"))?;
            let color = color.unwrap_or_else(|| DEFAULT_COLOR.to_string());
            let genre_id = library.create_genre(&name, &color)?;
            library.save(&config.data_dir)?;

            let painted = library.genre(&genre_id).map_or(name, |g| paint_genre(g));
            println!("Created genre: {painted} ({genre_id})");
        }

        "list" | "ls" => {
            if library.genres.genres.is_empty() {
                println!("No genres defined. Use 'bookyard genre create <name>' to create one.");
                return Ok(());
            }

            let mut genres: Vec<&Genre> = library.genres.genres.iter().collect();
            genres.sort_by_key(|g| g.name.to_lowercase());

            println!("Genres ({}):", genres.len());
            for genre in genres {
                let count = library
                    .books()
                    .iter()
                    .filter(|b| b.genres.iter().any(|id| id == &genre.id))
                    .count();
                println!("  {} ({} books)", paint_genre(genre), count);
            }
        }

        "show" => {
            let name = name.ok_or_else(|| anyhow::anyhow!("Genre name is required"))?;
            let genre = library.resolve_genre(&name)?;

            println!("Genre: {}", paint_genre(genre));
            println!("  id: {}", genre.id);
            println!("  color: {}", genre.color);
            let members: Vec<&str> = library
                .books()
                .iter()
                .filter(|b| b.genres.iter().any(|id| id == &genre.id))
                .map(|b| b.title.as_str())
                .collect();
            println!("  books ({}):", members.len());
            for title in members {
                println!("    {title}");
            }
        }

        "add" => {
            let name = name.ok_or_else(|| anyhow::anyhow!("Genre name is required"))?;
            let (genre_id, genre_name) = {
                let genre = library.resolve_genre(&name)?;
                (genre.id.clone(), genre.name.clone())
            };

            // Resolve book IDs first (before mutable borrow)
            let mut targets: Vec<(String, String)> = Vec::new();
            for needle in &books {
                let book = resolve_book(&library, needle)?;
                targets.push((book.id.clone(), book.title.clone()));
            }
            if targets.is_empty() {
                anyhow::bail!("No books given. Usage: bookyard genre add <genre> <book>...");
            }

            for (book_id, title) in targets {
                if library.tag_book(&book_id, &genre_id)? {
                    println!("Tagged {title} with {genre_name}");
                } else {
                    println!("{title} already tagged {genre_name}");
                }
            }

            library.save(&config.data_dir)?;
        }

        "remove" | "rm" => {
            let name = name.ok_or_else(|| anyhow::anyhow!("Genre name is required"))?;
            let (genre_id, genre_name) = {
                let genre = library.resolve_genre(&name)?;
                (genre.id.clone(), genre.name.clone())
            };

            // Resolve book IDs first (before mutable borrow)
            let mut targets: Vec<(String, String)> = Vec::new();
            for needle in &books {
                let book = resolve_book(&library, needle)?;
                targets.push((book.id.clone(), book.title.clone()));
            }
            if targets.is_empty() {
                anyhow::bail!("No books given. Usage: bookyard genre rm <genre> <book>...");
            }

            for (book_id, title) in targets {
                if library.untag_book(&book_id, &genre_id)? {
                    println!("Removed {genre_name} from {title}");
                } else {
                    println!("{title} not tagged {genre_name}");
                }
            }

            library.save(&config.data_dir)?;
        }

        "delete" => {
            let name = name.ok_or_else(|| anyhow::anyhow!("Genre name is required"))?;
            match library.resolve_genre(&name) {
                Ok(genre) => {
                    let genre_id = genre.id.clone();
                    let genre_name = genre.name.clone();
                    let stripped = library.delete_genre(&genre_id).unwrap_or(0);
                    library.save(&config.data_dir)?;
                    println!("Deleted genre: {genre_name} (removed from {stripped} books)");
                }
                Err(LibraryError::GenreNotFound(_)) => {
                    println!("Genre not found: {name} (nothing to delete)");
                }
                Err(e) => return Err(e.into()),
            }
        }

        other => {
            anyhow::bail!("Unknown genre action: {}. Valid: create, list, show, add, rm, delete", other);
        }
    }

    Ok(())
}
