// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 bookyard contributors
//
//! Command implementations

pub mod add;
pub mod completions;
pub mod config;
pub mod cover;
pub mod delete;
pub mod edit;
pub mod export;
pub mod genre;
pub mod list;
pub mod quote;
pub mod show;
pub mod status;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use owo_colors::{OwoColorize, Stream};
use sha2::{Digest, Sha256};

use crate::library::{Library, LibraryError};
use crate::types::{Book, Genre, Status};

/// Today in local time; commands stamp dates with this
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolve a book by name or id, listing candidates when ambiguous
pub(crate) fn resolve_book<'a>(library: &'a Library, needle: &str) -> Result<&'a Book> {
    match library.resolve_book(needle) {
        Ok(book) => Ok(book),
        Err(LibraryError::AmbiguousBook { needle, candidates }) => {
            eprintln!("Multiple books match '{needle}':");
            for candidate in &candidates {
                eprintln!("  {candidate}");
            }
            anyhow::bail!("Ambiguous book name. Use the id.")
        }
        Err(e) => Err(e.into()),
    }
}

/// Render a 1-5 rating as filled and hollow stars
pub(crate) fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    "★".repeat(filled) + &"☆".repeat(5 - filled)
}

/// Status marker, colored when stdout supports it
pub(crate) fn paint_status(status: Status) -> String {
    let marker = status.marker();
    match status {
        Status::OnShelf => {
            format!("{}", marker.if_supports_color(Stream::Stdout, |t| t.blue()))
        }
        Status::InProgress => {
            format!("{}", marker.if_supports_color(Stream::Stdout, |t| t.yellow()))
        }
        Status::Completed => {
            format!("{}", marker.if_supports_color(Stream::Stdout, |t| t.green()))
        }
    }
}

/// Genre name in its chip color, when stdout supports it
pub(crate) fn paint_genre(genre: &Genre) -> String {
    match genre.rgb() {
        Some((r, g, b)) => format!(
            "{}",
            genre
                .name
                .if_supports_color(Stream::Stdout, |t| t.truecolor(r, g, b))
        ),
        None => genre.name.clone(),
    }
}

/// Short content digest used when describing cover images
pub(crate) fn short_sha(bytes: &[u8]) -> String {
    let hash = hex::encode(Sha256::digest(bytes));
    hash[..8].to_string()
}
