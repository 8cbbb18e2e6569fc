//! Form validation for the capsule draft.
//!
//! Pure and synchronous; called exactly once per submit attempt. Rules are
//! checked in order and the first failure wins; errors are never aggregated.

use chrono::{Days, NaiveDate};
use thiserror::Error;

use crate::clock::Clock;
use crate::model::CapsuleDraft;

/// A user-correctable form error. Blocks submission only; the draft is
/// left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more of the three required fields is empty.
    #[error("Please fill in your email, letter, and a delivery date.")]
    MissingFields,

    /// The delivery date is today, in the past, or not a parseable date.
    #[error("The delivery date must be in the future.")]
    DateNotFuture,
}

/// Validate a draft against "today" from the given clock.
///
/// On success, returns the parsed delivery date for sealing. No email format
/// checking is done beyond non-emptiness.
pub fn validate_draft(
    draft: &CapsuleDraft,
    clock: &dyn Clock,
) -> Result<NaiveDate, ValidationError> {
    if draft.email.is_empty() || draft.letter.is_empty() || draft.delivery_date.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    // An unparseable date is treated the same as a past one.
    let date = parse_delivery_date(&draft.delivery_date).ok_or(ValidationError::DateNotFuture)?;
    if date <= clock.today() {
        return Err(ValidationError::DateNotFuture);
    }

    Ok(date)
}

/// Parse a `YYYY-MM-DD` delivery date string.
pub fn parse_delivery_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Earliest selectable delivery date: tomorrow.
///
/// A UI affordance (shown as a hint on the date field), not a validation
/// rule of its own.
pub fn min_delivery_date(clock: &dyn Clock) -> NaiveDate {
    clock
        .today()
        .checked_add_days(Days::new(1))
        .expect("tomorrow is representable")
}
