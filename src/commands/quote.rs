// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 bookyard contributors
//! Quote management commands - lines worth keeping

use anyhow::{Context, Result};
use chrono::Utc;

use crate::config::Config;
use crate::library::Library;
use crate::projection;

use super::resolve_book;

/// Flags for the quote command
#[derive(Debug, Default)]
pub struct QuoteArgs {
    /// Replacement text (edit)
    pub new_text: Option<String>,
    /// Page reference (add, edit)
    pub page: Option<String>,
    /// Clear the page reference (edit)
    pub no_page: bool,
}

/// Run the quote command
pub fn run(
    config: &Config,
    action: &str,
    target: Option<String>,
    text: Option<String>,
    args: QuoteArgs,
) -> Result<()> {
    let mut library = Library::load(&config.data_dir)
        .with_context(|| format!("Failed to load library from {}", config.data_dir.display()))?;

    match action {
        "add" => {
            let target = target.ok_or_else(|| anyhow::anyhow!("Book is required"))?;
            let text = text.ok_or_else(|| anyhow::anyhow!("Quote text is required"))?;
            let (book_id, title) = {
                let book = resolve_book(&library, &target)?;
                (book.id.clone(), book.title.clone())
            };

            let quote_id = library.add_quote(&book_id, &text, args.page, Utc::now())?;
            library.save(&config.data_dir)?;

            println!("Added quote to {title} ({quote_id})");
        }

        "list" | "ls" => {
            let target = target.ok_or_else(|| anyhow::anyhow!("Book is required"))?;
            let book = resolve_book(&library, &target)?;
            let quotes = projection::sorted_quotes(book);

            if quotes.is_empty() {
                println!(
                    "No quotes for {}. Use 'bookyard quote add <book> <text>' to capture one.",
                    book.title
                );
                return Ok(());
            }

            println!("Quotes for {} ({}):", book.title, quotes.len());
            for quote in quotes {
                println!("  [{}] {}", quote.id, quote.created_at.format("%Y-%m-%d"));
                let page = quote
                    .page
                    .as_ref()
                    .map(|p| format!(" (page {p})"))
                    .unwrap_or_default();
                println!("    \"{}\"{}", quote.text, page);
            }
        }

        "edit" => {
            let quote_id = target.ok_or_else(|| anyhow::anyhow!("Quote id is required"))?;
            if args.no_page && args.page.is_some() {
                anyhow::bail!("Use either --page or --no-page, not both");
            }
            let page = if args.no_page {
                Some(None)
            } else {
                args.page.map(Some)
            };
            let new_text = args.new_text.as_deref();
            if new_text.is_none() && page.is_none() {
                println!("No changes.");
                return Ok(());
            }

            library.edit_quote(&quote_id, new_text, page)?;
            library.save(&config.data_dir)?;

            println!("Updated quote {quote_id}");
        }

        "remove" | "rm" => {
            let quote_id = target.ok_or_else(|| anyhow::anyhow!("Quote id is required"))?;
            if library.delete_quote(&quote_id) {
                library.save(&config.data_dir)?;
                println!("Deleted quote: {quote_id}");
            } else {
                // Deleting something already gone is not a failure
                println!("Quote not found: {quote_id} (nothing to delete)");
            }
        }

        other => {
            anyhow::bail!("Unknown quote action: {}. Valid: add, list, edit, rm", other);
        }
    }

    Ok(())
}
