//! Age derivation from a date of birth. Ages are never stored.

use chrono::{Datelike, Local, NaiveDate};

/// Whole years between `dob` and `as_of`, counting a birthday only once it is reached.
///
/// A `dob` after `as_of` gives a negative age; rejecting that is up to the caller.
pub fn age(dob: NaiveDate, as_of: NaiveDate) -> i32 {
    let years = as_of.year() - dob.year();
    if (as_of.month(), as_of.day()) < (dob.month(), dob.day()) {
        years - 1
    } else {
        years
    }
}

/// The local calendar date used as "today" for age-based filtering
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn age_today(dob: NaiveDate) -> i32 {
    age(dob, today())
}
