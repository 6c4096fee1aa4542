//! Rental and service panel
//!
//! Sorts approved rentals and services into status tabs and narrows a tab
//! down with a free-text search and a site filter.

use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::models::Request;
use crate::status::{RentalStatus, ServiceStatus, StatusCalculator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelTab {
    OverdueRentals,
    RentalsDueSoon,
    RentalsOnSchedule,
    ReturnedRentals,
    ServicesInProgress,
    CompletedServices,
    ServicesNotStarted,
}

impl PanelTab {
    pub const ALL: [PanelTab; 7] = [
        PanelTab::OverdueRentals,
        PanelTab::RentalsDueSoon,
        PanelTab::RentalsOnSchedule,
        PanelTab::ReturnedRentals,
        PanelTab::ServicesInProgress,
        PanelTab::CompletedServices,
        PanelTab::ServicesNotStarted,
    ];

    /// Short name used on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            PanelTab::OverdueRentals => "overdue",
            PanelTab::RentalsDueSoon => "due-soon",
            PanelTab::RentalsOnSchedule => "on-schedule",
            PanelTab::ReturnedRentals => "returned",
            PanelTab::ServicesInProgress => "in-progress",
            PanelTab::CompletedServices => "completed",
            PanelTab::ServicesNotStarted => "not-started",
        }
    }

    fn for_rental(status: RentalStatus) -> Self {
        match status {
            RentalStatus::Overdue => PanelTab::OverdueRentals,
            RentalStatus::DueSoon => PanelTab::RentalsDueSoon,
            RentalStatus::OnSchedule => PanelTab::RentalsOnSchedule,
            RentalStatus::Returned => PanelTab::ReturnedRentals,
        }
    }

    fn for_service(status: ServiceStatus) -> Self {
        match status {
            ServiceStatus::InProgress => PanelTab::ServicesInProgress,
            ServiceStatus::Completed => PanelTab::CompletedServices,
            ServiceStatus::NotStarted => PanelTab::ServicesNotStarted,
        }
    }
}

impl Default for PanelTab {
    fn default() -> Self {
        Self::OverdueRentals
    }
}

impl fmt::Display for PanelTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PanelTab::OverdueRentals => "Overdue rentals",
            PanelTab::RentalsDueSoon => "Rentals due soon",
            PanelTab::RentalsOnSchedule => "Rentals on schedule",
            PanelTab::ReturnedRentals => "Returned rentals",
            PanelTab::ServicesInProgress => "Services in progress",
            PanelTab::CompletedServices => "Completed services",
            PanelTab::ServicesNotStarted => "Services not started",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for PanelTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        PanelTab::ALL
            .into_iter()
            .find(|tab| tab.slug() == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = PanelTab::ALL.iter().map(|t| t.slug()).collect();
                format!("unknown tab '{}', expected one of: {}", s, valid.join(", "))
            })
    }
}

/// Search and site narrowing applied to a tab
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelFilter {
    /// Case-insensitive text matched against title, site, requester and supplier
    pub search: Option<String>,
    /// Exact site name; `None` keeps every site
    pub site: Option<String>,
}

impl PanelFilter {
    pub fn matches(&self, request: &Request) -> bool {
        if let Some(site) = &self.site {
            if &request.base().site != site {
                return false;
            }
        }

        let Some(search) = self.search.as_deref().map(str::to_lowercase).filter(|s| !s.is_empty()) else {
            return true;
        };

        let base = request.base();
        let contains = |field: &str| field.to_lowercase().contains(&search);
        contains(&base.title)
            || contains(&base.site)
            || contains(&base.requester)
            || request.as_service().is_some_and(|s| contains(&s.supplier_name))
    }
}

/// Approved rentals and services bucketed by lifecycle status
#[derive(Debug, Default)]
pub struct Panel<'a> {
    tabs: HashMap<PanelTab, Vec<&'a Request>>,
    sites: Vec<&'a str>,
}

impl<'a> Panel<'a> {
    pub fn build<I>(requests: I, now: NaiveDateTime) -> Self
    where
        I: IntoIterator<Item = &'a Request>,
    {
        Self::build_with(&StatusCalculator::default(), requests, now)
    }

    pub fn build_with<I>(calculator: &StatusCalculator, requests: I, now: NaiveDateTime) -> Self
    where
        I: IntoIterator<Item = &'a Request>,
    {
        let mut panel = Panel::default();

        for request in requests.into_iter().filter(|r| r.is_approved()) {
            let site = request.base().site.as_str();
            if !site.is_empty() && !panel.sites.contains(&site) {
                panel.sites.push(site);
            }

            let tab = match request {
                Request::Rental(rental) => PanelTab::for_rental(calculator.rental(rental, now).status),
                Request::Service(service) => PanelTab::for_service(calculator.service(service, now).status),
                Request::Purchase(_) => continue,
            };
            panel.tabs.entry(tab).or_default().push(request);
        }

        panel
    }

    pub fn tab(&self, tab: PanelTab) -> &[&'a Request] {
        self.tabs.get(&tab).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, tab: PanelTab) -> usize {
        self.tab(tab).len()
    }

    /// Distinct sites of approved requests, in first-seen order
    pub fn sites(&self) -> &[&'a str] {
        &self.sites
    }

    pub fn filtered(&self, tab: PanelTab, filter: &PanelFilter) -> Vec<&'a Request> {
        self.tab(tab)
            .iter()
            .copied()
            .filter(|r| filter.matches(r))
            .collect()
    }
}
