use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::cmp::Ordering;

use crate::date::{self, add_years, last_day_of_month, next_month, out_of_range, MAX_LAYOUT_YEAR};
use crate::error::CoreError;
use crate::rule::{DaySelector, RecurrenceRule};

/// Result of a next-date calculation.
///
/// Daily and yearly rules produce a single date; weekly and monthly rules produce
/// every candidate they found, sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextOccurrence {
    Single(NaiveDate),
    Candidates(Vec<NaiveDate>),
}

impl NextOccurrence {
    /// All dates, earliest first.
    pub fn dates(&self) -> &[NaiveDate] {
        match self {
            NextOccurrence::Single(date) => std::slice::from_ref(date),
            NextOccurrence::Candidates(dates) => dates,
        }
    }

    /// The chronologically earliest date, if any.
    pub fn earliest(&self) -> Option<NaiveDate> {
        self.dates().first().copied()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dates().is_empty()
    }

    /// Dates in the fixed `YYYYMMDD` layout.
    pub fn to_strings(&self) -> Vec<String> {
        self.dates().iter().map(|d| date::format_date(*d)).collect()
    }
}

/// The later of `anchor` and `now`; weekly and monthly candidates are generated from it.
#[inline]
pub fn reference_point(anchor: NaiveDate, now: NaiveDate) -> NaiveDate {
    if anchor < now {
        now
    } else {
        anchor
    }
}

impl RecurrenceRule {
    /// Computes the next occurrence(s) of this rule for a task due on `anchor`.
    ///
    /// Dates past year 9999 cannot be written in the `YYYYMMDD` layout and are
    /// reported as [`CoreError::InvalidDate`].
    pub fn next_after(
        &self,
        anchor: NaiveDate,
        now: NaiveDate,
    ) -> Result<NextOccurrence, CoreError> {
        let next = match self {
            RecurrenceRule::Daily { interval } => {
                next_daily(anchor, now, *interval).map(NextOccurrence::Single)
            }
            RecurrenceRule::Yearly => next_yearly(anchor, now).map(NextOccurrence::Single),
            RecurrenceRule::Weekly { weekdays } => {
                next_weekly(anchor, now, weekdays).map(NextOccurrence::Candidates)
            }
            RecurrenceRule::Monthly {
                days,
                months: Some(months),
            } => next_monthly_in_months(anchor, now, days, months).map(NextOccurrence::Candidates),
            RecurrenceRule::Monthly { days, months: None } => {
                next_monthly(anchor, now, days).map(NextOccurrence::Candidates)
            }
        }?;

        if next.dates().iter().any(|d| d.year() > MAX_LAYOUT_YEAR) {
            return Err(out_of_range(anchor));
        }

        Ok(next)
    }
}

/// Parses `rule`, `anchor` and `now` and computes the next occurrence(s).
///
/// Dates use the fixed `YYYYMMDD` layout. Any parse failure is returned before
/// calculation starts.
pub fn compute_next(rule: &str, anchor: &str, now: &str) -> Result<NextOccurrence, CoreError> {
    let now = date::parse_date(now)?;
    let anchor = date::parse_date(anchor)?;
    let rule: RecurrenceRule = rule.parse()?;

    rule.next_after(anchor, now)
}

/// Steps `anchor` forward by `interval` days until it is no longer before `now`.
///
/// At least one step is always taken, except for a one-day interval whose
/// anchor is exactly `now`: such a task stays due today.
pub fn next_daily(anchor: NaiveDate, now: NaiveDate, interval: u32) -> Result<NaiveDate, CoreError> {
    if anchor == now && interval == 1 {
        return Ok(now);
    }

    let interval = i64::from(interval);
    let mut next = anchor
        .checked_add_signed(Duration::days(interval))
        .ok_or_else(|| out_of_range(anchor))?;

    if next < now {
        let behind = now.signed_duration_since(next).num_days();
        let steps = (behind + interval - 1) / interval;
        next = next
            .checked_add_signed(Duration::days(steps * interval))
            .ok_or_else(|| out_of_range(anchor))?;
    }

    Ok(next)
}

/// One year after `anchor`, or `anchor` moved into the current year when that
/// is still before `now`.
pub fn next_yearly(anchor: NaiveDate, now: NaiveDate) -> Result<NaiveDate, CoreError> {
    let next = add_years(anchor, 1).ok_or_else(|| out_of_range(anchor))?;

    if next < now {
        return add_years(anchor, now.year() - anchor.year()).ok_or_else(|| out_of_range(anchor));
    }

    Ok(next)
}

/// Next date for each requested weekday, counted from the later of `anchor` and `now`.
pub fn next_weekly(
    anchor: NaiveDate,
    now: NaiveDate,
    weekdays: &[Weekday],
) -> Result<Vec<NaiveDate>, CoreError> {
    let reference = reference_point(anchor, now);
    let current = i64::from(reference.weekday().number_from_monday());

    let mut dates = weekdays
        .iter()
        .map(|weekday| {
            let offset = i64::from(weekday.number_from_monday()) - current;
            // A matching weekday moves a full week ahead.
            let days = if offset > 0 { offset } else { offset + 7 };
            reference
                .checked_add_signed(Duration::days(days))
                .ok_or_else(|| out_of_range(reference))
        })
        .collect::<Result<Vec<_>, _>>()?;

    dates.sort();
    Ok(dates)
}

impl DaySelector {
    /// Day number this selector names in the given month.
    ///
    /// Literal days are returned as-is, even past the end of a short month.
    pub fn resolve(&self, year: i32, month: u32) -> Option<u32> {
        match self {
            DaySelector::Day(day) => Some(*day),
            DaySelector::Last => last_day_of_month(year, month),
            DaySelector::SecondToLast => last_day_of_month(year, month).map(|day| day - 1),
        }
    }

    /// Date of this selector in the given month.
    ///
    /// A literal day the month does not have rolls forward to that day of the
    /// following month (`30` in February is March 30th).
    pub fn occurrence_in(&self, year: i32, month: u32) -> Option<NaiveDate> {
        let day = self.resolve(year, month)?;
        NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
            let (year, month) = next_month(year, month);
            NaiveDate::from_ymd_opt(year, month, day)
        })
    }
}

/// Candidates for a monthly rule without a month list.
///
/// A selector landing exactly on the reference day yields no candidate.
pub fn next_monthly(
    anchor: NaiveDate,
    now: NaiveDate,
    days: &[DaySelector],
) -> Result<Vec<NaiveDate>, CoreError> {
    let reference = reference_point(anchor, now);
    let (year, month) = (reference.year(), reference.month());
    let (following_year, following_month) = next_month(year, month);
    let last_day = last_day_of_month(year, month).ok_or_else(|| out_of_range(reference))?;

    let mut dates = Vec::with_capacity(days.len());
    for selector in days {
        let day = selector
            .resolve(year, month)
            .ok_or_else(|| out_of_range(reference))?;

        let date = match day.cmp(&reference.day()) {
            Ordering::Less => selector.occurrence_in(following_year, following_month),
            Ordering::Greater if day > last_day => {
                selector.occurrence_in(following_year, following_month)
            }
            Ordering::Greater => NaiveDate::from_ymd_opt(year, month, day),
            Ordering::Equal => continue,
        };

        dates.push(date.ok_or_else(|| out_of_range(reference))?);
    }

    dates.sort();
    Ok(dates)
}

/// Candidates for a monthly rule restricted to `months`: one per selector and month.
///
/// Each selector is projected onto the anchor's year. Projections before `now`
/// move to next year when the month has already started, otherwise to the
/// current year.
pub fn next_monthly_in_months(
    anchor: NaiveDate,
    now: NaiveDate,
    days: &[DaySelector],
    months: &[u32],
) -> Result<Vec<NaiveDate>, CoreError> {
    let mut dates = Vec::with_capacity(days.len() * months.len());

    for selector in days {
        for &month in months {
            let projected = selector
                .occurrence_in(anchor.year(), month)
                .ok_or_else(|| out_of_range(anchor))?;

            let date = if projected < now {
                let year = if month <= now.month() {
                    now.year() + 1
                } else {
                    now.year()
                };
                selector
                    .occurrence_in(year, month)
                    .ok_or_else(|| out_of_range(now))?
            } else {
                projected
            };

            dates.push(date);
        }
    }

    dates.sort();
    Ok(dates)
}
