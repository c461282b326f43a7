// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 bookyard contributors
//
//! Status lifecycle engine
//!
//! A book's three tracked dates are derived from how its status moves,
//! never edited as a side effect of anything else. [`transition`] is the
//! single place that mapping lives: give it the stored dates, the old and
//! new status, and today's date, and it returns the dates that should be
//! stored next. It never touches any other field and never does IO.

use chrono::NaiveDate;

use crate::types::{ReadingDates, Status};

/// Compute the dates a book should carry after a status change.
///
/// Moving backwards clears the dates of phases the book has left; moving
/// forwards stamps the phase it just entered. Re-asserting the current
/// status changes nothing.
#[must_use]
pub fn transition(dates: &ReadingDates, from: Status, to: Status, today: NaiveDate) -> ReadingDates {
    match (from, to) {
        // Same status: nothing to do
        (Status::OnShelf, Status::OnShelf)
        | (Status::InProgress, Status::InProgress)
        | (Status::Completed, Status::Completed) => *dates,

        // Back to the shelf: the book was never started after all
        (Status::InProgress | Status::Completed, Status::OnShelf) => ReadingDates {
            added: dates.added,
            started: None,
            completed: None,
        },

        // Un-finish: back to reading, keep the original start
        (Status::Completed, Status::InProgress) => ReadingDates {
            completed: None,
            ..*dates
        },

        // Picked up off the shelf today
        (Status::OnShelf, Status::InProgress) => ReadingDates {
            started: Some(today),
            ..*dates
        },

        // Shelf straight to finished: treat it as started the day it arrived
        (Status::OnShelf, Status::Completed) => ReadingDates {
            started: Some(dates.added),
            completed: Some(today),
            ..*dates
        },

        // Finished an in-progress read today
        (Status::InProgress, Status::Completed) => ReadingDates {
            completed: Some(today),
            ..*dates
        },
    }
}

/// Check that a dates value is well-formed for the given status.
///
/// Each phase date exists exactly when the status has reached that phase,
/// and the dates that exist are in chronological order.
#[must_use]
pub fn dates_consistent(dates: &ReadingDates, status: Status) -> bool {
    let phases_ok = match status {
        Status::OnShelf => dates.started.is_none() && dates.completed.is_none(),
        Status::InProgress => dates.started.is_some() && dates.completed.is_none(),
        Status::Completed => dates.started.is_some() && dates.completed.is_some(),
    };
    if !phases_ok {
        return false;
    }
    if let Some(started) = dates.started {
        if started < dates.added {
            return false;
        }
        if let Some(completed) = dates.completed {
            if completed < started {
                return false;
            }
        }
    }
    true
}
