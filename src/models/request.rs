use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three kinds of request a site can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    Purchase,
    Rental,
    Service,
}

impl RequestKind {
    /// Prefix used for generated request ids (`PUR`, `REN`, `SER`)
    pub fn id_prefix(&self) -> &'static str {
        match self {
            RequestKind::Purchase => "PUR",
            RequestKind::Rental => "REN",
            RequestKind::Service => "SER",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequestKind::Purchase => "Purchase",
            RequestKind::Rental => "Rental",
            RequestKind::Service => "Service",
        };
        f.pad(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        };
        f.pad(label)
    }
}

/// Where a request stands in the approval workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApprovalStatus {
    #[default]
    Pending,
    UnderReview,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    /// Pending and under-review requests both still wait on a decision
    pub fn is_awaiting_decision(&self) -> bool {
        matches!(self, ApprovalStatus::Pending | ApprovalStatus::UnderReview)
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ApprovalStatus::Pending => "Pending",
            ApprovalStatus::UnderReview => "Under Review",
            ApprovalStatus::Approved => "Approved",
            ApprovalStatus::Rejected => "Rejected",
        };
        f.pad(label)
    }
}

/// Fields shared by every request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBase {
    pub id: String,
    pub title: String,
    pub description: String,
    pub requester: String,
    /// Work site or department the request is charged to
    pub site: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub approval_status: ApprovalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    #[serde(flatten)]
    pub base: RequestBase,
    pub needed_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_supplier: Option<String>,
}

/// Equipment lease over a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rental {
    #[serde(flatten)]
    pub base: RequestBase,
    pub start_date: String,
    pub expected_return_date: String,
    pub quantity: u32,
    /// Set once the equipment is back; its presence alone marks the rental returned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_return_date: Option<String>,
    /// Newline separated log of renewals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewal_history: Option<String>,
}

/// Contracted work with a value and a supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(flatten)]
    pub base: RequestBase,
    /// Contract value in reais
    pub value: Decimal,
    pub start_date: String,
    pub expected_end_date: String,
    pub supplier_name: String,
    /// Supplier CPF, digits only
    pub supplier_tax_id: String,
    pub pix_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_completion_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Request {
    Purchase(Purchase),
    Rental(Rental),
    Service(Service),
}

impl Request {
    pub fn kind(&self) -> RequestKind {
        match self {
            Request::Purchase(_) => RequestKind::Purchase,
            Request::Rental(_) => RequestKind::Rental,
            Request::Service(_) => RequestKind::Service,
        }
    }

    pub fn base(&self) -> &RequestBase {
        match self {
            Request::Purchase(p) => &p.base,
            Request::Rental(r) => &r.base,
            Request::Service(s) => &s.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut RequestBase {
        match self {
            Request::Purchase(p) => &mut p.base,
            Request::Rental(r) => &mut r.base,
            Request::Service(s) => &mut s.base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn is_approved(&self) -> bool {
        self.base().approval_status == ApprovalStatus::Approved
    }

    pub fn as_rental(&self) -> Option<&Rental> {
        match self {
            Request::Rental(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_service(&self) -> Option<&Service> {
        match self {
            Request::Service(s) => Some(s),
            _ => None,
        }
    }

    /// Supplier attached to the request, if the kind carries one
    pub fn supplier_name(&self) -> Option<&str> {
        match self {
            Request::Purchase(p) => p.suggested_supplier.as_deref(),
            Request::Service(s) => Some(&s.supplier_name),
            Request::Rental(_) => None,
        }
    }
}

/// Kind-specific fields supplied when creating a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum RequestDetails {
    Purchase {
        needed_by: String,
        #[serde(default)]
        suggested_supplier: Option<String>,
    },
    Rental {
        start_date: String,
        expected_return_date: String,
        quantity: u32,
    },
    Service {
        value: Decimal,
        start_date: String,
        expected_end_date: String,
        supplier_name: String,
        supplier_tax_id: String,
        pix_key: String,
    },
}

impl RequestDetails {
    pub fn kind(&self) -> RequestKind {
        match self {
            RequestDetails::Purchase { .. } => RequestKind::Purchase,
            RequestDetails::Rental { .. } => RequestKind::Rental,
            RequestDetails::Service { .. } => RequestKind::Service,
        }
    }
}

/// A request as submitted, before it gets an id, a timestamp and a status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRequest {
    pub title: String,
    pub description: String,
    pub requester: String,
    pub site: String,
    #[serde(default)]
    pub justification: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub details: RequestDetails,
}

/// Partial update of the shared request fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub site: Option<String>,
    pub justification: Option<String>,
    pub priority: Option<Priority>,
    pub notes: Option<String>,
}

impl RequestUpdate {
    pub fn apply(self, base: &mut RequestBase) {
        if let Some(title) = self.title {
            base.title = title;
        }
        if let Some(description) = self.description {
            base.description = description;
        }
        if let Some(site) = self.site {
            base.site = site;
        }
        if let Some(justification) = self.justification {
            base.justification = Some(justification);
        }
        if let Some(priority) = self.priority {
            base.priority = priority;
        }
        if let Some(notes) = self.notes {
            base.notes = Some(notes);
        }
    }
}
