//! In-memory request book
//!
//! Holds every request raised during a session and applies the lifecycle
//! operations (approval, renewal, return, completion). Status is never stored
//! here; it is derived on demand by [`crate::status`].

use anyhow::{Context, Result};
use log::{info, warn};
use std::path::Path;

use crate::clock::{Clock, SystemClock};
use crate::config::DisplayConfig;
use crate::models::{
    ApprovalStatus, NewRequest, Purchase, Rental, Request, RequestBase, RequestDetails, RequestKind, RequestUpdate,
    Service, User,
};
use crate::utils::date;

pub mod validation;

/// Error types specific to request book operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    #[error("Request '{0}' not found")]
    NotFound(String),

    #[error("Request '{id}' is a {actual} request, expected {expected}")]
    WrongKind {
        id: String,
        expected: RequestKind,
        actual: RequestKind,
    },

    #[error("Invalid request: {0}")]
    Validation(String),
}

/// Collection of requests, newest first
pub struct RequestBook<C: Clock = SystemClock> {
    requests: Vec<Request>,
    clock: C,
    display: DisplayConfig,
    next_sequence: u32,
}

impl RequestBook<SystemClock> {
    /// Create an empty book driven by the system clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Load a JSON array of requests
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut book = Self::new();
        book.load_file(path)?;
        Ok(book)
    }
}

impl Default for RequestBook<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> RequestBook<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            requests: Vec::new(),
            clock,
            display: DisplayConfig::default(),
            next_sequence: 1,
        }
    }

    /// Date patterns used in renewal history lines and return notes
    pub fn with_display(mut self, display: DisplayConfig) -> Self {
        self.display = display;
        self
    }

    /// Replace the book's contents with the requests stored in `path`
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read request file: {}", path.as_ref().display()))?;

        let requests: Vec<Request> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse request file: {}", path.as_ref().display()))?;

        info!("Loaded {} requests from {}", requests.len(), path.as_ref().display());
        self.requests = requests;
        Ok(())
    }

    /// Write the book's contents as a JSON array
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.requests).context("Failed to serialize requests")?;

        if let Some(parent) = path.as_ref().parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write request file: {}", path.as_ref().display()))?;
        Ok(())
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn iter(&self) -> impl Iterator<Item = &Request> {
        self.requests.iter()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Request> {
        self.requests.iter().find(|r| r.id() == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Request, RequestError> {
        self.requests
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| RequestError::NotFound(id.to_string()))
    }

    fn rental_mut(&mut self, id: &str) -> Result<&mut Rental, RequestError> {
        match self.get_mut(id)? {
            Request::Rental(rental) => Ok(rental),
            other => Err(RequestError::WrongKind {
                id: id.to_string(),
                expected: RequestKind::Rental,
                actual: other.kind(),
            }),
        }
    }

    fn service_mut(&mut self, id: &str) -> Result<&mut Service, RequestError> {
        match self.get_mut(id)? {
            Request::Service(service) => Ok(service),
            other => Err(RequestError::WrongKind {
                id: id.to_string(),
                expected: RequestKind::Service,
                actual: other.kind(),
            }),
        }
    }

    /// Next free id of the form `REN-001`
    fn generate_id(&mut self, kind: RequestKind) -> String {
        loop {
            let id = format!("{}-{:03}", kind.id_prefix(), self.next_sequence);
            self.next_sequence += 1;
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Validate and insert a new request at the front of the book
    ///
    /// The request gets a generated id, the current time as its creation
    /// timestamp and starts out pending approval.
    pub fn add(&mut self, new: NewRequest) -> Result<&Request, RequestError> {
        validation::validate_new_request(&new)?;

        let id = self.generate_id(new.details.kind());
        let base = RequestBase {
            id: id.clone(),
            title: new.title,
            description: new.description,
            requester: new.requester,
            site: new.site,
            justification: new.justification,
            priority: new.priority,
            notes: new.notes,
            created_at: date::format_iso(self.clock.now()),
            approval_status: ApprovalStatus::Pending,
            rejection_reason: None,
        };

        let request = match new.details {
            RequestDetails::Purchase {
                needed_by,
                suggested_supplier,
            } => Request::Purchase(Purchase {
                base,
                needed_by,
                suggested_supplier,
            }),
            RequestDetails::Rental {
                start_date,
                expected_return_date,
                quantity,
            } => Request::Rental(Rental {
                base,
                start_date,
                expected_return_date,
                quantity,
                actual_return_date: None,
                renewal_history: None,
            }),
            RequestDetails::Service {
                value,
                start_date,
                expected_end_date,
                supplier_name,
                supplier_tax_id,
                pix_key,
            } => Request::Service(Service {
                base,
                value,
                start_date,
                expected_end_date,
                supplier_name,
                supplier_tax_id,
                pix_key,
                actual_completion_date: None,
            }),
        };

        info!("Created {} request {}", request.kind(), id);
        self.requests.insert(0, request);
        Ok(&self.requests[0])
    }

    /// Move a request through the approval workflow
    ///
    /// Rejections must carry a reason; any other status clears it.
    pub fn update_approval(
        &mut self,
        id: &str,
        status: ApprovalStatus,
        reason: Option<&str>,
    ) -> Result<(), RequestError> {
        let reason = reason.map(str::trim).filter(|r| !r.is_empty());
        if status == ApprovalStatus::Rejected && reason.is_none() {
            return Err(RequestError::Validation("a rejection reason is required".to_string()));
        }

        let base = self.get_mut(id)?.base_mut();
        base.approval_status = status;
        base.rejection_reason = reason.map(str::to_string);

        info!("Request {} is now {}", id, status);
        Ok(())
    }

    pub fn update(&mut self, id: &str, update: RequestUpdate) -> Result<(), RequestError> {
        update.apply(self.get_mut(id)?.base_mut());
        info!("Updated request {}", id);
        Ok(())
    }

    /// Push a rental's expected return date out and log the renewal
    pub fn renew_rental(&mut self, id: &str, new_date: &str, reason: &str) -> Result<(), RequestError> {
        if reason.trim().is_empty() {
            return Err(RequestError::Validation("a renewal reason is required".to_string()));
        }
        let new_at = date::parse_datetime(new_date)
            .ok_or_else(|| RequestError::Validation(format!("'{}' is not a valid date", new_date)))?;

        let now = self.clock.now();
        let display = self.display.clone();
        let rental = self.rental_mut(id)?;

        if let Some(current) = date::parse_datetime(&rental.expected_return_date) {
            if new_at <= current {
                return Err(RequestError::Validation(
                    "the new return date must be after the current one".to_string(),
                ));
            }
        }

        let entry = format!(
            "{} - Previous date: {} | New date: {} | Reason: {}",
            date::format(now, &display.datetime_format),
            date::format_str(&rental.expected_return_date, &display.date_format),
            date::format(new_at, &display.date_format),
            reason.trim()
        );

        rental.renewal_history = Some(match rental.renewal_history.take() {
            Some(history) if !history.is_empty() => format!("{}\n{}", history, entry),
            _ => entry,
        });
        rental.expected_return_date = new_date.trim().to_string();

        info!("Renewed rental {} until {}", id, rental.expected_return_date);
        Ok(())
    }

    /// Record that a rental's equipment came back
    pub fn mark_returned(&mut self, id: &str, returned_on: &str, notes: &str) -> Result<(), RequestError> {
        let returned_at = date::parse_datetime(returned_on)
            .ok_or_else(|| RequestError::Validation(format!("'{}' is not a valid date", returned_on)))?;

        let returned_label = date::format(returned_at, &self.display.date_format);
        let rental = self.rental_mut(id)?;
        if rental.actual_return_date.as_deref().is_some_and(|d| !d.trim().is_empty()) {
            warn!("Rental {} was already returned", id);
            return Err(RequestError::Validation(format!("rental '{}' was already returned", id)));
        }

        let note = format!("\n\nReturned on {}: {}", returned_label, notes);
        rental.actual_return_date = Some(returned_on.trim().to_string());
        rental.base.notes = Some(rental.base.notes.take().unwrap_or_default() + &note);

        info!("Rental {} returned on {}", id, returned_on.trim());
        Ok(())
    }

    /// Mark a service as completed now
    pub fn complete_service(&mut self, id: &str) -> Result<(), RequestError> {
        let now = self.clock.now();
        let service = self.service_mut(id)?;
        if service
            .actual_completion_date
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
        {
            warn!("Service {} was already completed", id);
            return Err(RequestError::Validation(format!("service '{}' was already completed", id)));
        }

        service.actual_completion_date = Some(date::format_iso(now));
        info!("Service {} completed", id);
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<Request, RequestError> {
        let index = self
            .requests
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| RequestError::NotFound(id.to_string()))?;

        info!("Deleted request {}", id);
        Ok(self.requests.remove(index))
    }

    /// Drop every request
    pub fn reset(&mut self) {
        info!("Clearing {} requests", self.requests.len());
        self.requests.clear();
    }

    /// Requests a user is allowed to see: everything for admins, otherwise
    /// only the ones they raised
    pub fn visible_to(&self, user: &User) -> Vec<&Request> {
        if user.is_admin() {
            return self.requests.iter().collect();
        }
        self.requests
            .iter()
            .filter(|r| user.owns(&r.base().requester))
            .collect()
    }
}
