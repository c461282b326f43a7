// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 bookyard contributors
//
//! Dirty-checked edit drafts
//!
//! Edits never touch a stored [`Book`] directly. They go through a
//! [`BookDraft`]: a working copy whose setters validate, whose status
//! changes run the lifecycle engine, and which only lands back in the
//! library via [`crate::library::Library::commit`] when it actually
//! differs from what is stored.

use chrono::NaiveDate;
use thiserror::Error;

use crate::lifecycle;
use crate::types::{Book, ReadingDates, Status};

/// A field edit the draft refuses to hold
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    /// Rating outside the 1-5 star scale
    #[error("rating must be between 1 and 5 (got {0})")]
    RatingOutOfRange(u8),
    /// A tracked date set later than today
    #[error("{0} cannot be in the future")]
    DateInFuture(&'static str),
    /// date added pushed past the recorded start
    #[error("date added cannot be after the start date")]
    AddedAfterStarted,
    /// Start date offered for a book still on the shelf
    #[error("start date only applies once a book is in progress or completed")]
    StartedNotApplicable,
    /// Start date earlier than the date added
    #[error("start date cannot be before the date added")]
    StartedBeforeAdded,
    /// Start date later than the recorded completion
    #[error("start date cannot be after the completion date")]
    StartedAfterCompleted,
    /// Completion date offered for a book not completed
    #[error("completion date only applies to completed books")]
    CompletedNotApplicable,
    /// Completion date earlier than the recorded start
    #[error("completion date cannot be before the start date")]
    CompletedBeforeStarted,
    /// Completion date earlier than the date added
    #[error("completion date cannot be before the date added")]
    CompletedBeforeAdded,
}

/// Working copy of a book's editable fields
#[derive(Debug, Clone)]
pub struct BookDraft {
    status: Status,
    rating: Option<u8>,
    title: String,
    author: String,
    synopsis: String,
    recommended_by: String,
    dates: ReadingDates,
    cover: Option<Vec<u8>>,
}

impl BookDraft {
    /// Start a draft from the stored state of a book
    #[must_use]
    pub fn from_book(book: &Book) -> Self {
        Self {
            status: book.status,
            rating: book.rating,
            title: book.title.clone(),
            author: book.author.clone(),
            synopsis: book.synopsis.clone(),
            recommended_by: book.recommended_by.clone(),
            dates: book.dates(),
            cover: book.cover.clone(),
        }
    }

    /// The draft's current status
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// The draft's current rating
    #[must_use]
    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    /// The draft's current tracked dates
    #[must_use]
    pub fn dates(&self) -> ReadingDates {
        self.dates
    }

    /// Change the status, letting the lifecycle engine adjust the dates
    pub fn set_status(&mut self, to: Status, today: NaiveDate) {
        self.dates = lifecycle::transition(&self.dates, self.status, to, today);
        self.status = to;
    }

    /// Set or clear the star rating
    ///
    /// # Errors
    /// Rejects ratings outside 1-5; those are never representable here.
    pub fn set_rating(&mut self, rating: Option<u8>) -> Result<(), DraftError> {
        if let Some(r) = rating {
            if !(1..=5).contains(&r) {
                return Err(DraftError::RatingOutOfRange(r));
            }
        }
        self.rating = rating;
        Ok(())
    }

    /// Replace the title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replace the author
    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = author.into();
    }

    /// Replace the synopsis
    pub fn set_synopsis(&mut self, synopsis: impl Into<String>) {
        self.synopsis = synopsis.into();
    }

    /// Replace the recommended-by note
    pub fn set_recommended_by(&mut self, recommended_by: impl Into<String>) {
        self.recommended_by = recommended_by.into();
    }

    /// Move the date the book entered the library
    ///
    /// # Errors
    /// Rejects future dates and dates after the recorded start.
    pub fn set_date_added(&mut self, added: NaiveDate, today: NaiveDate) -> Result<(), DraftError> {
        if added > today {
            return Err(DraftError::DateInFuture("date added"));
        }
        if let Some(started) = self.dates.started {
            if added > started {
                return Err(DraftError::AddedAfterStarted);
            }
        }
        self.dates.added = added;
        Ok(())
    }

    /// Move the start date of a book that has one
    ///
    /// # Errors
    /// Rejects the edit while the book is on the shelf, and any date in
    /// the future, before the date added, or after the completion.
    pub fn set_date_started(&mut self, started: NaiveDate, today: NaiveDate) -> Result<(), DraftError> {
        if self.status == Status::OnShelf {
            return Err(DraftError::StartedNotApplicable);
        }
        if started > today {
            return Err(DraftError::DateInFuture("start date"));
        }
        if started < self.dates.added {
            return Err(DraftError::StartedBeforeAdded);
        }
        if let Some(completed) = self.dates.completed {
            if started > completed {
                return Err(DraftError::StartedAfterCompleted);
            }
        }
        self.dates.started = Some(started);
        Ok(())
    }

    /// Move the completion date of a completed book
    ///
    /// # Errors
    /// Rejects the edit unless the book is completed, and any date in
    /// the future or earlier than the dates before it.
    pub fn set_date_completed(&mut self, completed: NaiveDate, today: NaiveDate) -> Result<(), DraftError> {
        if self.status != Status::Completed {
            return Err(DraftError::CompletedNotApplicable);
        }
        if completed > today {
            return Err(DraftError::DateInFuture("completion date"));
        }
        match self.dates.started {
            Some(started) if completed < started => Err(DraftError::CompletedBeforeStarted),
            None if completed < self.dates.added => Err(DraftError::CompletedBeforeAdded),
            _ => {
                self.dates.completed = Some(completed);
                Ok(())
            }
        }
    }

    /// Replace or clear the cover image
    pub fn set_cover(&mut self, cover: Option<Vec<u8>>) {
        self.cover = cover;
    }

    /// Does this draft differ from the stored book?
    #[must_use]
    pub fn is_dirty(&self, persisted: &Book) -> bool {
        self.status != persisted.status
            || self.rating != persisted.rating
            || self.title != persisted.title
            || self.author != persisted.author
            || self.synopsis != persisted.synopsis
            || self.dates != persisted.dates()
            || self.recommended_by != persisted.recommended_by
            || self.cover != persisted.cover
    }

    /// Copy the draft's fields onto a stored book
    ///
    /// Identity, genre tags, and quotes are not part of the draft and
    /// are left alone.
    pub(crate) fn apply_to(&self, book: &mut Book) {
        book.status = self.status;
        book.rating = self.rating;
        book.title = self.title.clone();
        book.author = self.author.clone();
        book.synopsis = self.synopsis.clone();
        book.recommended_by = self.recommended_by.clone();
        book.set_dates(self.dates);
        book.cover = self.cover.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn book() -> Book {
        Book::new("Dune", "Frank Herbert", date(2024, 1, 10))
    }

    #[test]
    fn test_fresh_draft_is_clean() {
        let book = book();
        let draft = BookDraft::from_book(&book);
        assert!(!draft.is_dirty(&book));
    }

    #[test]
    fn test_each_field_edit_dirties() {
        let book = book();
        let today = date(2024, 3, 1);

        let mut draft = BookDraft::from_book(&book);
        draft.set_title("Dune Messiah");
        assert!(draft.is_dirty(&book));

        let mut draft = BookDraft::from_book(&book);
        draft.set_author("F. Herbert");
        assert!(draft.is_dirty(&book));

        let mut draft = BookDraft::from_book(&book);
        draft.set_synopsis("Desert planet");
        assert!(draft.is_dirty(&book));

        let mut draft = BookDraft::from_book(&book);
        draft.set_recommended_by("Gurney");
        assert!(draft.is_dirty(&book));

        let mut draft = BookDraft::from_book(&book);
        draft.set_rating(Some(5)).unwrap();
        assert!(draft.is_dirty(&book));

        let mut draft = BookDraft::from_book(&book);
        draft.set_status(Status::InProgress, today);
        assert!(draft.is_dirty(&book));

        let mut draft = BookDraft::from_book(&book);
        draft.set_cover(Some(vec![0xff, 0xd8]));
        assert!(draft.is_dirty(&book));
    }

    #[test]
    fn test_no_op_edit_stays_clean() {
        let book = book();
        let mut draft = BookDraft::from_book(&book);
        draft.set_title("Dune");
        draft.set_rating(None).unwrap();
        assert!(!draft.is_dirty(&book));
    }

    #[test]
    fn test_reverted_edit_stays_clean() {
        let book = book();
        let mut draft = BookDraft::from_book(&book);
        draft.set_title("Something else");
        draft.set_title("Dune");
        assert!(!draft.is_dirty(&book));
    }

    #[test]
    fn test_status_round_trip_via_shelf_is_clean() {
        let book = book();
        let today = date(2024, 3, 1);
        let mut draft = BookDraft::from_book(&book);
        draft.set_status(Status::InProgress, today);
        draft.set_status(Status::OnShelf, today);
        assert!(!draft.is_dirty(&book));
    }

    #[test]
    fn test_rating_bounds() {
        let book = book();
        let mut draft = BookDraft::from_book(&book);
        assert_eq!(draft.set_rating(Some(0)), Err(DraftError::RatingOutOfRange(0)));
        assert_eq!(draft.set_rating(Some(6)), Err(DraftError::RatingOutOfRange(6)));
        assert!(!draft.is_dirty(&book), "rejected rating must not stick");
        draft.set_rating(Some(1)).unwrap();
        draft.set_rating(Some(5)).unwrap();
        assert_eq!(draft.rating(), Some(5));
        draft.set_rating(None).unwrap();
        assert_eq!(draft.rating(), None);
    }

    #[test]
    fn test_status_change_runs_lifecycle() {
        let book = book();
        let today = date(2024, 3, 1);
        let mut draft = BookDraft::from_book(&book);
        draft.set_status(Status::Completed, today);
        assert_eq!(draft.status(), Status::Completed);
        assert_eq!(draft.dates().started, Some(date(2024, 1, 10)));
        assert_eq!(draft.dates().completed, Some(today));
    }

    #[test]
    fn test_date_added_rules() {
        let book = book();
        let today = date(2024, 3, 1);
        let mut draft = BookDraft::from_book(&book);
        assert_eq!(
            draft.set_date_added(date(2024, 3, 2), today),
            Err(DraftError::DateInFuture("date added"))
        );
        draft.set_date_added(date(2023, 12, 25), today).unwrap();
        assert_eq!(draft.dates().added, date(2023, 12, 25));

        draft.set_status(Status::InProgress, date(2024, 2, 1));
        assert_eq!(
            draft.set_date_added(date(2024, 2, 2), today),
            Err(DraftError::AddedAfterStarted)
        );
    }

    #[test]
    fn test_start_date_rules() {
        let book = book();
        let today = date(2024, 3, 1);

        let mut draft = BookDraft::from_book(&book);
        assert_eq!(
            draft.set_date_started(date(2024, 2, 1), today),
            Err(DraftError::StartedNotApplicable)
        );

        draft.set_status(Status::InProgress, date(2024, 2, 10));
        assert_eq!(
            draft.set_date_started(date(2024, 1, 1), today),
            Err(DraftError::StartedBeforeAdded)
        );
        assert_eq!(
            draft.set_date_started(date(2024, 3, 2), today),
            Err(DraftError::DateInFuture("start date"))
        );
        draft.set_date_started(date(2024, 1, 20), today).unwrap();
        assert_eq!(draft.dates().started, Some(date(2024, 1, 20)));
    }

    #[test]
    fn test_completion_date_rules() {
        let book = book();
        let today = date(2024, 3, 1);

        let mut draft = BookDraft::from_book(&book);
        assert_eq!(
            draft.set_date_completed(date(2024, 2, 1), today),
            Err(DraftError::CompletedNotApplicable)
        );

        draft.set_status(Status::InProgress, date(2024, 2, 10));
        assert_eq!(
            draft.set_date_completed(date(2024, 2, 20), today),
            Err(DraftError::CompletedNotApplicable)
        );

        draft.set_status(Status::Completed, date(2024, 2, 25));
        assert_eq!(
            draft.set_date_completed(date(2024, 2, 1), today),
            Err(DraftError::CompletedBeforeStarted)
        );
        assert_eq!(
            draft.set_date_completed(date(2024, 3, 5), today),
            Err(DraftError::DateInFuture("completion date"))
        );
        draft.set_date_completed(date(2024, 2, 12), today).unwrap();
        assert_eq!(draft.dates().completed, Some(date(2024, 2, 12)));

        assert_eq!(
            draft.set_date_started(date(2024, 2, 14), today),
            Err(DraftError::StartedAfterCompleted)
        );
    }

    #[test]
    fn test_apply_leaves_identity_and_associations_alone() {
        let mut book = book();
        book.genres.push("genre:sci-fi".into());
        let id = book.id.clone();
        let today = date(2024, 3, 1);

        let mut draft = BookDraft::from_book(&book);
        draft.set_title("Dune (1965)");
        draft.set_status(Status::InProgress, today);
        draft.apply_to(&mut book);

        assert_eq!(book.id, id);
        assert_eq!(book.genres, vec!["genre:sci-fi".to_string()]);
        assert_eq!(book.title, "Dune (1965)");
        assert_eq!(book.status, Status::InProgress);
        assert_eq!(book.date_started, Some(today));
    }
}
