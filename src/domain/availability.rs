//! Date-overlap check run before a reservation is accepted.

use crate::domain::model::Booking;
use chrono::NaiveDate;

/// A stay as a half-open range of nights: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl StayRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn of(booking: &Booking) -> Self {
        Self::new(booking.start_date, booking.end_date)
    }

    /// Back-to-back stays (one checks out the day the other checks in) do not overlap.
    pub fn overlaps(&self, other: &StayRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// First existing booking whose nights intersect `requested`, if any.
pub fn find_conflict<'a>(requested: &StayRange, existing: &'a [Booking]) -> Option<&'a Booking> {
    existing
        .iter()
        .find(|b| StayRange::of(b).overlaps(requested))
}
