//! Dashboard counters
//!
//! Lifecycle counters only consider approved rentals and services; the
//! pending and total counters look at every request handed in.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::Request;
use crate::status::{RentalStatus, ServiceStatus, StatusCalculator};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub overdue_rentals: usize,
    pub rentals_due_soon: usize,
    pub services_in_progress: usize,
    /// Requests still pending or under review
    pub pending_requests: usize,
    pub total_requests: usize,
    /// Overdue rentals plus rentals due soon
    pub critical: usize,
    /// Approved rentals not yet returned plus approved services not completed
    pub active: usize,
}

impl DashboardStats {
    pub fn compute<'a, I>(requests: I, now: NaiveDateTime) -> Self
    where
        I: IntoIterator<Item = &'a Request>,
    {
        Self::compute_with(&StatusCalculator::default(), requests, now)
    }

    pub fn compute_with<'a, I>(calculator: &StatusCalculator, requests: I, now: NaiveDateTime) -> Self
    where
        I: IntoIterator<Item = &'a Request>,
    {
        let mut stats = Self::default();

        for request in requests {
            stats.total_requests += 1;
            if request.base().approval_status.is_awaiting_decision() {
                stats.pending_requests += 1;
            }
            if !request.is_approved() {
                continue;
            }

            match request {
                Request::Rental(rental) => {
                    match calculator.rental(rental, now).status {
                        RentalStatus::Overdue => stats.overdue_rentals += 1,
                        RentalStatus::DueSoon => stats.rentals_due_soon += 1,
                        _ => {}
                    }
                    // Only an explicit return date takes a rental off the active list
                    if rental.actual_return_date.as_deref().map_or(true, |d| d.trim().is_empty()) {
                        stats.active += 1;
                    }
                }
                Request::Service(service) => match calculator.service(service, now).status {
                    ServiceStatus::InProgress => {
                        stats.services_in_progress += 1;
                        stats.active += 1;
                    }
                    ServiceStatus::NotStarted => stats.active += 1,
                    ServiceStatus::Completed => {}
                },
                Request::Purchase(_) => {}
            }
        }

        stats.critical = stats.overdue_rentals + stats.rentals_due_soon;
        stats
    }
}
