//! Calendar month arithmetic.

use crate::error::{ForecastError, Result};
use chrono::{Month, NaiveDate};

/// A calendar month, e.g. 2023-07.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Create a new year/month pair. Months are 1-based.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(ForecastError::InvalidInput(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// The following calendar month, rolling over into January of the next year.
    pub fn succ(self) -> Self {
        if self.month >= 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// First day of the month.
    pub fn first_day(self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or_else(|| {
            ForecastError::InvalidInput(format!(
                "{}-{:02} is outside the supported date range",
                self.year, self.month
            ))
        })
    }

    /// Full English month name ("January" .. "December").
    pub fn month_name(self) -> Result<&'static str> {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .ok_or_else(|| {
                ForecastError::InvalidInput(format!("no month named for {}", self.month))
            })
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}
