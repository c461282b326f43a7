// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 bookyard contributors
//! Export command - dump the library to portable formats

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::library::Library;
use crate::types::{Book, Genre};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// JSON format
    Json,
    /// CSV format (books flattened, one row each)
    Csv,
}

impl ExportFormat {
    /// Parse format from string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Get file extension for format
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

#[derive(Serialize)]
struct ExportBundle<'a> {
    books: &'a [Book],
    genres: &'a [Genre],
}

/// Run the export command
pub fn run(config: &Config, format: &str, output: Option<PathBuf>) -> Result<()> {
    info!("Exporting to {}", format);

    let export_format = ExportFormat::from_str(format)
        .ok_or_else(|| anyhow::anyhow!("Unknown export format: {}. Supported: json, csv", format))?;

    let library = Library::load(&config.data_dir)
        .with_context(|| format!("Failed to load library from {}", config.data_dir.display()))?;

    if library.books().is_empty() {
        eprintln!("Warning: Library is empty.");
    }

    let content = match export_format {
        ExportFormat::Json => {
            let bundle = ExportBundle {
                books: library.books(),
                genres: &library.genres.genres,
            };
            serde_json::to_string_pretty(&bundle).context("Failed to serialize library")?
        }
        ExportFormat::Csv => to_csv(&library)?,
    };

    match output {
        Some(path) => {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
            println!("Exported {} books to {}", library.books().len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }

    Ok(())
}

fn to_csv(library: &Library) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "id",
        "title",
        "author",
        "status",
        "rating",
        "date_added",
        "date_started",
        "date_completed",
        "genres",
        "quotes",
    ])?;

    for book in library.books() {
        let genres: Vec<&str> = crate::projection::sorted_genres(book, &library.genres.genres)
            .iter()
            .map(|g| g.name.as_str())
            .collect();
        writer.write_record([
            book.id.as_str(),
            book.title.as_str(),
            book.author.as_str(),
            book.status.code(),
            &book.rating.map(|r| r.to_string()).unwrap_or_default(),
            &book.date_added.to_string(),
            &book.date_started.map(|d| d.to_string()).unwrap_or_default(),
            &book.date_completed.map(|d| d.to_string()).unwrap_or_default(),
            &genres.join("; "),
            &book.quotes.len().to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush csv: {e}"))?;
    String::from_utf8(bytes).context("Export produced invalid UTF-8")
}
