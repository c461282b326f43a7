// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 bookyard contributors
//! Edit command - dirty-checked field edits through a draft

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::config::Config;
use crate::draft::BookDraft;
use crate::library::Library;
use crate::types::Status;

use super::{resolve_book, today};

/// Field edits for the edit command
#[derive(Debug, Default)]
pub struct EditArgs {
    /// New title
    pub title: Option<String>,
    /// New author
    pub author: Option<String>,
    /// New synopsis
    pub synopsis: Option<String>,
    /// New recommended-by note
    pub recommended_by: Option<String>,
    /// New rating (1-5)
    pub rating: Option<u8>,
    /// Clear the rating
    pub clear_rating: bool,
    /// New status
    pub status: Option<String>,
    /// Corrected date added
    pub added: Option<NaiveDate>,
    /// Corrected start date
    pub started: Option<NaiveDate>,
    /// Corrected completion date
    pub completed: Option<NaiveDate>,
}

/// Run the edit command
pub fn run(config: &Config, book: &str, args: EditArgs) -> Result<()> {
    let mut library = Library::load(&config.data_dir)
        .with_context(|| format!("Failed to load library from {}", config.data_dir.display()))?;
    let today = today();

    let (book_id, title, draft) = {
        let book = resolve_book(&library, book)?;
        let mut draft = BookDraft::from_book(book);

        // Status first, so date corrections apply to the new phase
        if let Some(ref status) = args.status {
            let status = Status::parse(status).ok_or_else(|| {
                anyhow::anyhow!("Unknown status: {}. Valid: on-shelf, in-progress, completed", status)
            })?;
            draft.set_status(status, today);
        }
        if let Some(added) = args.added {
            draft.set_date_added(added, today)?;
        }
        if let Some(started) = args.started {
            draft.set_date_started(started, today)?;
        }
        if let Some(completed) = args.completed {
            draft.set_date_completed(completed, today)?;
        }
        if args.clear_rating {
            draft.set_rating(None)?;
        } else if let Some(rating) = args.rating {
            draft.set_rating(Some(rating))?;
        }
        if let Some(title) = args.title {
            draft.set_title(title);
        }
        if let Some(author) = args.author {
            draft.set_author(author);
        }
        if let Some(synopsis) = args.synopsis {
            draft.set_synopsis(synopsis);
        }
        if let Some(recommended_by) = args.recommended_by {
            draft.set_recommended_by(recommended_by);
        }

        (book.id.clone(), book.title.clone(), draft)
    };

    if !library.commit(&book_id, &draft)? {
        println!("No changes.");
        return Ok(());
    }
    library.save(&config.data_dir)?;

    let title = library.get_book(&book_id).map_or(title, |b| b.title.clone());
    println!("Updated {title} ({book_id})");

    Ok(())
}
