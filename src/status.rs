//! Lifecycle status derivation for rentals and services
//!
//! Status is never stored: it is recomputed from the record's dates and the
//! current time on every call. Nothing here returns an error; unparseable
//! dates fall back to sentinel text instead.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

use crate::constants::{
    Palette, DAYS_PER_MONTH, DUE_SOON_DAYS, LABEL_COMPLETED, LABEL_DUE_SOON, LABEL_IN_PROGRESS, LABEL_NOT_STARTED,
    LABEL_ON_SCHEDULE, LABEL_OVERDUE, LABEL_RETURNED, MILLIS_PER_DAY, NOT_AVAILABLE, PALETTE_AMBER, PALETTE_BLUE,
    PALETTE_GRAY, PALETTE_GRAY_PLAIN, PALETTE_GREEN, PALETTE_RED, PALETTE_YELLOW, TEXT_DUE_TODAY, TEXT_ENDS_TODAY,
    TEXT_INVALID_DATE, TEXT_SERVICE_ENDED,
};
use crate::models::{Rental, Service};
use crate::utils::date::{self, DISPLAY_DATE_PATTERN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RentalStatus {
    Overdue,
    DueSoon,
    OnSchedule,
    Returned,
}

impl RentalStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RentalStatus::Overdue => LABEL_OVERDUE,
            RentalStatus::DueSoon => LABEL_DUE_SOON,
            RentalStatus::OnSchedule => LABEL_ON_SCHEDULE,
            RentalStatus::Returned => LABEL_RETURNED,
        }
    }
}

impl fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ServiceStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl ServiceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ServiceStatus::NotStarted => LABEL_NOT_STARTED,
            ServiceStatus::InProgress => LABEL_IN_PROGRESS,
            ServiceStatus::Completed => LABEL_COMPLETED,
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of a status evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusInfo<S> {
    pub status: S,
    pub palette: Palette,
    /// Day count behind the text, when there is one (always non-negative for overdue rentals)
    pub days: Option<i64>,
    /// Human readable countdown or overdue text
    pub info: String,
}

impl<S> StatusInfo<S> {
    fn new(status: S, palette: Palette, days: Option<i64>, info: impl Into<String>) -> Self {
        Self {
            status,
            palette,
            days,
            info: info.into(),
        }
    }
}

/// An optional stored date counts as set only when it is non-blank
fn is_set(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Days from today until `expected`, time of day zeroed on both sides
///
/// Returns `None` when an actual date is already recorded or `expected`
/// cannot be parsed.
pub fn calculate_days_remaining(expected: &str, actual: Option<&str>, now: NaiveDateTime) -> Option<i64> {
    if is_set(actual) {
        return None;
    }
    let expected = date::parse_datetime(expected)?;
    Some(date::difference_in_days(expected, now))
}

/// Human readable span between two stored dates
///
/// Whole days are rounded up; spans from one month (30 days) on are broken
/// into months and days. Missing, unparseable or reversed dates yield `N/A`.
pub fn calculate_duration(start: Option<&str>, end: Option<&str>) -> String {
    let (Some(start), Some(end)) = (start, end) else {
        return NOT_AVAILABLE.to_string();
    };
    let (Some(start), Some(end)) = (date::parse_datetime(start), date::parse_datetime(end)) else {
        return NOT_AVAILABLE.to_string();
    };

    let millis = (end - start).num_milliseconds();
    let mut days = millis / MILLIS_PER_DAY;
    if millis % MILLIS_PER_DAY > 0 {
        days += 1;
    }

    if days < 0 {
        return NOT_AVAILABLE.to_string();
    }

    if days >= DAYS_PER_MONTH {
        let months = days / DAYS_PER_MONTH;
        let remainder = days % DAYS_PER_MONTH;
        if remainder > 0 {
            format!("{} months and {} days", months, remainder)
        } else {
            format!("{} months", months)
        }
    } else {
        format!("{} days", days)
    }
}

/// Status rules with a configurable due-soon window and date pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCalculator {
    due_soon_days: i64,
    date_pattern: String,
}

impl Default for StatusCalculator {
    fn default() -> Self {
        Self::new(DUE_SOON_DAYS)
    }
}

impl StatusCalculator {
    pub fn new(due_soon_days: i64) -> Self {
        Self {
            due_soon_days,
            date_pattern: DISPLAY_DATE_PATTERN.to_string(),
        }
    }

    /// Token pattern used for the dates in `returned on` and `completed on`
    pub fn with_date_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.date_pattern = pattern.into();
        self
    }

    pub fn rental(&self, rental: &Rental, now: NaiveDateTime) -> StatusInfo<RentalStatus> {
        if let Some(returned) = rental.actual_return_date.as_deref().filter(|d| !d.trim().is_empty()) {
            let info = format!("returned on {}", date::format_str(returned, &self.date_pattern));
            return StatusInfo::new(RentalStatus::Returned, PALETTE_GRAY, None, info);
        }

        let Some(days) = calculate_days_remaining(&rental.expected_return_date, None, now) else {
            return StatusInfo::new(RentalStatus::OnSchedule, PALETTE_GRAY_PLAIN, None, TEXT_INVALID_DATE);
        };

        if days < 0 {
            let overdue = days.abs();
            return StatusInfo::new(
                RentalStatus::Overdue,
                PALETTE_RED,
                Some(overdue),
                format!("overdue by {} days", overdue),
            );
        }

        if days <= self.due_soon_days {
            let info = if days > 0 {
                format!("due in {} days", days)
            } else {
                TEXT_DUE_TODAY.to_string()
            };
            return StatusInfo::new(RentalStatus::DueSoon, PALETTE_AMBER, Some(days), info);
        }

        StatusInfo::new(
            RentalStatus::OnSchedule,
            PALETTE_GREEN,
            Some(days),
            format!("{} days remaining", days),
        )
    }

    pub fn service(&self, service: &Service, now: NaiveDateTime) -> StatusInfo<ServiceStatus> {
        let today = date::start_of_day(now);
        let start = date::parse_datetime(&service.start_date).map(date::start_of_day);
        let end = date::parse_datetime(&service.expected_end_date).map(date::start_of_day);

        let completed_on = service
            .actual_completion_date
            .as_deref()
            .filter(|d| !d.trim().is_empty());
        let ended = end.is_some_and(|end| date::is_after(today, end));

        if completed_on.is_some() || ended {
            let info = match completed_on {
                Some(completed) => format!("completed on {}", date::format_str(completed, &self.date_pattern)),
                None => TEXT_SERVICE_ENDED.to_string(),
            };
            return StatusInfo::new(ServiceStatus::Completed, PALETTE_BLUE, None, info);
        }

        if let Some(start) = start.filter(|start| date::is_before(today, *start)) {
            let days = date::difference_in_days(start, today);
            return StatusInfo::new(
                ServiceStatus::NotStarted,
                PALETTE_GREEN,
                Some(days),
                format!("starts in {} days", days),
            );
        }

        match end {
            Some(end) => {
                let days = date::difference_in_days(end, today);
                let info = if days > 0 {
                    format!("{} days remaining", days)
                } else {
                    TEXT_ENDS_TODAY.to_string()
                };
                StatusInfo::new(ServiceStatus::InProgress, PALETTE_YELLOW, Some(days), info)
            }
            None => StatusInfo::new(ServiceStatus::InProgress, PALETTE_YELLOW, None, TEXT_INVALID_DATE),
        }
    }
}

/// Classify a rental with the default due-soon window
pub fn rental_status(rental: &Rental, now: NaiveDateTime) -> StatusInfo<RentalStatus> {
    StatusCalculator::default().rental(rental, now)
}

/// Classify a service
pub fn service_status(service: &Service, now: NaiveDateTime) -> StatusInfo<ServiceStatus> {
    StatusCalculator::default().service(service, now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_rounds_partial_days_up() {
        assert_eq!(
            calculate_duration(Some("2025-01-01T00:00:00"), Some("2025-01-03T06:00:00")),
            "3 days"
        );
    }

    #[test]
    fn test_duration_same_instant_is_zero_days() {
        assert_eq!(calculate_duration(Some("2025-01-01"), Some("2025-01-01")), "0 days");
    }

    #[test]
    fn test_days_remaining_none_when_actual_is_set() {
        let now = date::parse_datetime("2025-01-01T09:00:00").unwrap();
        assert_eq!(calculate_days_remaining("2025-01-10", Some("2025-01-05"), now), None);
        assert_eq!(calculate_days_remaining("2025-01-10", Some("  "), now), Some(9));
        assert_eq!(calculate_days_remaining("garbage", None, now), None);
    }
}
