// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 bookyard contributors
//! Cover command - attach, fetch, export, or drop a cover image

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::draft::BookDraft;
use crate::library::Library;

use super::{resolve_book, short_sha};

/// Run the cover command
pub fn run(config: &Config, action: &str, book: &str, source: Option<String>) -> Result<()> {
    let mut library = Library::load(&config.data_dir)
        .with_context(|| format!("Failed to load library from {}", config.data_dir.display()))?;

    match action {
        "set" => {
            let path = source.ok_or_else(|| anyhow::anyhow!("Image path is required"))?;
            let bytes = fs::read(Path::new(&path))
                .with_context(|| format!("Failed to read {path}"))?;
            if bytes.is_empty() {
                anyhow::bail!("{} is empty", path);
            }
            store_cover(&mut library, config, book, bytes)?;
        }

        "fetch" => {
            let url = source.ok_or_else(|| anyhow::anyhow!("Image URL is required"))?;
            let bytes = fetch_cover(&url)?;
            store_cover(&mut library, config, book, bytes)?;
        }

        "export" => {
            let path = source.ok_or_else(|| anyhow::anyhow!("Output path is required"))?;
            let book = resolve_book(&library, book)?;
            match &book.cover {
                Some(bytes) => {
                    fs::write(Path::new(&path), bytes)
                        .with_context(|| format!("Failed to write {path}"))?;
                    println!("Wrote cover for {} to {} ({} bytes)", book.title, path, bytes.len());
                }
                None => {
                    println!("No cover stored for {}", book.title);
                }
            }
        }

        "remove" | "rm" => {
            let (book_id, title, draft) = {
                let book = resolve_book(&library, book)?;
                let mut draft = BookDraft::from_book(book);
                draft.set_cover(None);
                (book.id.clone(), book.title.clone(), draft)
            };

            if !library.commit(&book_id, &draft)? {
                println!("No cover to remove.");
                return Ok(());
            }
            library.save(&config.data_dir)?;
            println!("Removed cover from {title}");
        }

        other => {
            anyhow::bail!("Unknown cover action: {}. Valid: set, fetch, export, rm", other);
        }
    }

    Ok(())
}

fn store_cover(library: &mut Library, config: &Config, book: &str, bytes: Vec<u8>) -> Result<()> {
    let size = bytes.len();
    let digest = short_sha(&bytes);

    let (book_id, title, draft) = {
        let book = resolve_book(library, book)?;
        let mut draft = BookDraft::from_book(book);
        draft.set_cover(Some(bytes));
        (book.id.clone(), book.title.clone(), draft)
    };

    if !library.commit(&book_id, &draft)? {
        println!("Cover unchanged (same image).");
        return Ok(());
    }
    library.save(&config.data_dir)?;
    println!("Set cover for {title} ({size} bytes, sha256:{digest})");
    Ok(())
}

/// Download a cover image, insisting on a successful response with data
fn fetch_cover(url: &str) -> Result<Vec<u8>> {
    info!("Fetching cover from {}", url);

    let response = reqwest::blocking::get(url)
        .with_context(|| format!("Failed to fetch {url}"))?
        .error_for_status()
        .context("Cover request failed")?;
    let bytes = response.bytes().context("Failed to read cover bytes")?;

    if bytes.is_empty() {
        anyhow::bail!("No image data at {}", url);
    }
    Ok(bytes.to_vec())
}
