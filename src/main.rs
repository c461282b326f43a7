// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 bookyard contributors
//
//! Bookyard CLI - Card catalogue for your reading life

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

use bookyard::commands;
use bookyard::config::Config;

#[derive(Parser)]
#[command(name = "bookyard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "BOOKYARD_CONFIG")]
    config: Option<std::path::PathBuf>,

    /// Data directory override
    #[arg(long, env = "BOOKYARD_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shelve a new book
    Add {
        /// Book title
        title: String,

        /// Author name
        #[arg(short, long)]
        author: Option<String>,

        /// Synopsis or notes
        #[arg(short, long)]
        synopsis: Option<String>,

        /// Who recommended it
        #[arg(long)]
        recommended_by: Option<String>,

        /// Tag with an existing genre (repeatable)
        #[arg(short, long = "genre")]
        genres: Vec<String>,
    },

    /// List books as a sorted, filtered shelf view
    List {
        /// Sort key (status, title, author)
        #[arg(short, long)]
        sort: Option<String>,

        /// Case-insensitive title/author filter
        #[arg(short, long)]
        filter: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show full details for one book
    Show {
        /// Book id, title, or title substring
        book: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Move a book to a new reading status
    Status {
        /// Book id, title, or title substring
        book: String,

        /// Target status (on-shelf, in-progress, completed)
        new_status: String,
    },

    /// Edit book fields, saving only when something changed
    Edit {
        /// Book id, title, or title substring
        book: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New author
        #[arg(long)]
        author: Option<String>,

        /// New synopsis
        #[arg(long)]
        synopsis: Option<String>,

        /// New recommended-by note
        #[arg(long)]
        recommended_by: Option<String>,

        /// Rating from 1 to 5
        #[arg(long)]
        rating: Option<u8>,

        /// Clear the rating
        #[arg(long)]
        clear_rating: bool,

        /// New status (on-shelf, in-progress, completed)
        #[arg(long)]
        status: Option<String>,

        /// Correct the date added (YYYY-MM-DD)
        #[arg(long)]
        added: Option<chrono::NaiveDate>,

        /// Correct the start date (YYYY-MM-DD)
        #[arg(long)]
        started: Option<chrono::NaiveDate>,

        /// Correct the completion date (YYYY-MM-DD)
        #[arg(long)]
        completed: Option<chrono::NaiveDate>,
    },

    /// Delete a book and its quotes
    Delete {
        /// Book id, title, or title substring
        book: String,
    },

    /// Manage genres
    Genre {
        /// Action: create, list, show, add, rm, delete
        action: String,

        /// Genre name
        name: Option<String>,

        /// Books to tag or untag
        books: Vec<String>,

        /// Chip color as #rrggbb (create)
        #[arg(long)]
        color: Option<String>,
    },

    /// Manage quotes
    Quote {
        /// Action: add, list, edit, rm
        action: String,

        /// Book (add, list) or quote id (edit, rm)
        target: Option<String>,

        /// Quote text (add)
        text: Option<String>,

        /// Replacement text (edit)
        #[arg(long)]
        new_text: Option<String>,

        /// Page reference (add, edit)
        #[arg(short, long)]
        page: Option<String>,

        /// Clear the page reference (edit)
        #[arg(long)]
        no_page: bool,
    },

    /// Manage a book's cover image
    Cover {
        /// Action: set, fetch, export, rm
        action: String,

        /// Book id, title, or title substring
        book: String,

        /// Image file, URL, or output path (per action)
        source: Option<String>,
    },

    /// Export the whole library
    Export {
        /// Output format (json, csv)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (data_dir, default_sort, status_order)
        key: String,

        /// Value to set (omit to get)
        value: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    // Logs go to stderr so exports can be piped from stdout
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    let config = Config::load(cli.config, cli.data_dir)?;

    // Execute command
    match cli.command {
        Commands::Add { title, author, synopsis, recommended_by, genres } => {
            let args = commands::add::AddArgs { author, synopsis, recommended_by, genres };
            commands::add::run(&config, &title, args)
        }
        Commands::List { sort, filter, json } => {
            commands::list::run(&config, sort, filter, json)
        }
        Commands::Show { book, json } => {
            commands::show::run(&config, &book, json)
        }
        Commands::Status { book, new_status } => {
            commands::status::run(&config, &book, &new_status)
        }
        Commands::Edit {
            book,
            title,
            author,
            synopsis,
            recommended_by,
            rating,
            clear_rating,
            status,
            added,
            started,
            completed,
        } => {
            let args = commands::edit::EditArgs {
                title,
                author,
                synopsis,
                recommended_by,
                rating,
                clear_rating,
                status,
                added,
                started,
                completed,
            };
            commands::edit::run(&config, &book, args)
        }
        Commands::Delete { book } => {
            commands::delete::run(&config, &book)
        }
        Commands::Genre { action, name, books, color } => {
            commands::genre::run(&config, &action, name, books, color)
        }
        Commands::Quote { action, target, text, new_text, page, no_page } => {
            let args = commands::quote::QuoteArgs { new_text, page, no_page };
            commands::quote::run(&config, &action, target, text, args)
        }
        Commands::Cover { action, book, source } => {
            commands::cover::run(&config, &action, &book, source)
        }
        Commands::Export { format, output } => {
            commands::export::run(&config, &format, output)
        }
        Commands::Config { key, value } => {
            commands::config::run(&config, &key, value)
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd)
        }
    }
}
