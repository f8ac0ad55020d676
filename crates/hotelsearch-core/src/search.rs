//! Per-request search criteria and the inbound validation rules applied
//! before any criteria reach the aggregation layer.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_ADULTS: u32 = 10;
pub const MAX_CHILDREN: u32 = 10;
/// Furthest a check-in or check-out date may be from today.
pub const MAX_DAYS_AHEAD: u64 = 365;

/// Dates and occupancy for one search. Created per request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: u32,
    pub children: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} date '{value}': expected YYYY-MM-DD")]
    MalformedDate { field: &'static str, value: String },

    #[error("check-out {check_out} must be after check-in {check_in}")]
    CheckOutNotAfterCheckIn {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("{field} {date} is outside the bookable window {earliest}..={latest}")]
    DateOutOfRange {
        field: &'static str,
        date: NaiveDate,
        earliest: NaiveDate,
        latest: NaiveDate,
    },

    #[error("adults must be between 1 and {MAX_ADULTS}, got {0}")]
    Adults(u32),

    #[error("children must be between 0 and {MAX_CHILDREN}, got {0}")]
    Children(u32),
}

impl SearchCriteria {
    #[must_use]
    pub fn new(check_in: NaiveDate, check_out: NaiveDate, adults: u32, children: u32) -> Self {
        Self {
            check_in,
            check_out,
            adults,
            children,
        }
    }

    /// Parses `YYYY-MM-DD` dates and validates the result against `today`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MalformedDate`] for unparseable dates and any
    /// error from [`Self::validate`].
    pub fn parse(
        check_in: &str,
        check_out: &str,
        adults: u32,
        children: u32,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let check_in = parse_date("check_in", check_in)?;
        let check_out = parse_date("check_out", check_out)?;
        let criteria = Self::new(check_in, check_out, adults, children);
        criteria.validate(today)?;
        Ok(criteria)
    }

    /// Checks the inbound invariants the aggregation layer relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule: occupancy bounds, then date ordering,
    /// then the `[today, today + 365d]` window.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        if !(1..=MAX_ADULTS).contains(&self.adults) {
            return Err(ValidationError::Adults(self.adults));
        }
        if self.children > MAX_CHILDREN {
            return Err(ValidationError::Children(self.children));
        }
        if self.check_out <= self.check_in {
            return Err(ValidationError::CheckOutNotAfterCheckIn {
                check_in: self.check_in,
                check_out: self.check_out,
            });
        }

        let latest = today
            .checked_add_days(Days::new(MAX_DAYS_AHEAD))
            .unwrap_or(NaiveDate::MAX);
        for (field, date) in [("check_in", self.check_in), ("check_out", self.check_out)] {
            if date < today || date > latest {
                return Err(ValidationError::DateOutOfRange {
                    field,
                    date,
                    earliest: today,
                    latest,
                });
            }
        }

        Ok(())
    }

    /// Number of nights between check-in and check-out. Zero for inverted ranges.
    #[must_use]
    pub fn nights(&self) -> u64 {
        u64::try_from((self.check_out - self.check_in).num_days()).unwrap_or(0)
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::MalformedDate {
            field,
            value: value.to_owned(),
        }
    })
}
