// src/models/period.rs

//! Period arguments and the publication-date windows they resolve to.

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Format used for full dates on the archive's date inputs.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Format of a reference month as shown on result cards.
pub const MONTH_FORMAT: &str = "%m/%Y";

/// Days of slack on each side of a reference month. Decks are often
/// published weeks before or after the month they refer to.
pub const MONTH_SLACK_DAYS: u64 = 40;

/// Period requested by the caller, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PeriodSpec {
    /// Single reference month, `mm/yyyy`
    Month(String),
    /// Explicit `[start, end]` publication dates, `dd/mm/yyyy`
    Dates(Vec<String>),
}

/// Inclusive range of publication dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A period after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPeriod {
    pub window: DateWindow,
    /// First day of the reference month, when a single month was requested
    pub month: Option<NaiveDate>,
}

impl PeriodSpec {
    /// Convenience constructor for a single month.
    pub fn month(month: impl Into<String>) -> Self {
        Self::Month(month.into())
    }

    /// Convenience constructor for an explicit list of dates.
    pub fn dates<S: AsRef<str>>(dates: &[S]) -> Self {
        Self::Dates(dates.iter().map(|d| d.as_ref().to_string()).collect())
    }

    /// Validate the period and compute its search window.
    ///
    /// Performs no I/O, so a malformed period fails before any browser
    /// session is opened.
    pub fn resolve(&self) -> Result<ResolvedPeriod> {
        match self {
            Self::Month(raw) => {
                let month = parse_month(raw)?;
                Ok(ResolvedPeriod {
                    window: DateWindow::around_month(month)?,
                    month: Some(month),
                })
            }
            Self::Dates(dates) => match dates.as_slice() {
                [start, end] => Ok(ResolvedPeriod {
                    window: DateWindow::new(parse_date(start)?, parse_date(end)?)?,
                    month: None,
                }),
                other => Err(AppError::period(format!(
                    "expected exactly two dates ['dd/mm/yyyy', 'dd/mm/yyyy'], e.g. \
                     ['28/01/2022', '30/06/2022']; got {} value(s)",
                    other.len()
                ))),
            },
        }
    }
}

impl fmt::Display for PeriodSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month(month) => write!(f, "{month}"),
            Self::Dates(dates) => write!(f, "[{}]", dates.join(", ")),
        }
    }
}

impl DateWindow {
    /// Create a window, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(AppError::period(format!(
                "start date {} is after end date {}",
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            )));
        }
        Ok(Self { start, end })
    }

    /// Window of [`MONTH_SLACK_DAYS`] on each side of the first day of `month`.
    pub fn around_month(month: NaiveDate) -> Result<Self> {
        let slack = Days::new(MONTH_SLACK_DAYS);
        let start = month
            .checked_sub_days(slack)
            .ok_or_else(|| AppError::period(format!("month {month} is out of range")))?;
        let end = month
            .checked_add_days(slack)
            .ok_or_else(|| AppError::period(format!("month {month} is out of range")))?;
        Self::new(start, end)
    }

    /// Start date as typed into the archive's date field.
    pub fn start_str(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    /// End date as typed into the archive's date field.
    pub fn end_str(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }

    /// Number of days between start and end.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start_str(), self.end_str())
    }
}

/// Parse a `dd/mm/yyyy` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|e| AppError::period(format!("'{raw}' is not a dd/mm/yyyy date: {e}")))
}

/// Parse a `mm/yyyy` month into its first day.
pub fn parse_month(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("01/{}", raw.trim()), DATE_FORMAT)
        .map_err(|e| AppError::period(format!("'{raw}' is not a mm/yyyy month: {e}")))
}

/// Format the first day of a month as `mm/yyyy`.
pub fn format_month(month: NaiveDate) -> String {
    month.format(MONTH_FORMAT).to_string()
}
