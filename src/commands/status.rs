// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 bookyard contributors
//! Status command - move a book through its reading lifecycle

use anyhow::{Context, Result};

use crate::config::Config;
use crate::draft::BookDraft;
use crate::library::Library;
use crate::types::Status;

use super::{resolve_book, today};

/// Run the status command
pub fn run(config: &Config, book: &str, new_status: &str) -> Result<()> {
    let status = Status::parse(new_status).ok_or_else(|| {
        anyhow::anyhow!("Unknown status: {}. Valid: on-shelf, in-progress, completed", new_status)
    })?;

    let mut library = Library::load(&config.data_dir)
        .with_context(|| format!("Failed to load library from {}", config.data_dir.display()))?;

    let (book_id, title, old_status, draft) = {
        let book = resolve_book(&library, book)?;
        let mut draft = BookDraft::from_book(book);
        draft.set_status(status, today());
        (book.id.clone(), book.title.clone(), book.status, draft)
    };

    if !library.commit(&book_id, &draft)? {
        println!("{} is already {}", title, status.label());
        return Ok(());
    }
    library.save(&config.data_dir)?;

    println!("{}: {} -> {}", title, old_status.label(), status.label());
    let dates = draft.dates();
    if let Some(started) = dates.started {
        println!("  started: {started}");
    }
    if let Some(completed) = dates.completed {
        println!("  completed: {completed}");
    }
    if dates.started.is_none() && dates.completed.is_none() && old_status != Status::OnShelf {
        println!("  reading dates cleared");
    }

    Ok(())
}
