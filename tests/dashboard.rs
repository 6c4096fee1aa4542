use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use requisitor::dashboard::DashboardStats;
use requisitor::models::{ApprovalStatus, Priority, Purchase, Rental, Request, RequestBase, Service};
use requisitor::status::StatusCalculator;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap().and_hms_opt(12, 0, 0).unwrap()
}

fn base(id: &str, status: ApprovalStatus) -> RequestBase {
    RequestBase {
        id: id.to_string(),
        title: format!("Request {}", id),
        description: String::new(),
        requester: "Ana".to_string(),
        site: "Obra Centro".to_string(),
        justification: None,
        priority: Priority::Medium,
        notes: None,
        created_at: "2025-06-01T08:00:00".to_string(),
        approval_status: status,
        rejection_reason: None,
    }
}

fn rental(id: &str, status: ApprovalStatus, expected: &str, returned: Option<&str>) -> Request {
    Request::Rental(Rental {
        base: base(id, status),
        start_date: "2025-06-01".to_string(),
        expected_return_date: expected.to_string(),
        quantity: 1,
        actual_return_date: returned.map(str::to_string),
        renewal_history: None,
    })
}

fn service(id: &str, status: ApprovalStatus, start: &str, end: &str) -> Request {
    Request::Service(Service {
        base: base(id, status),
        value: Decimal::new(100, 0),
        start_date: start.to_string(),
        expected_end_date: end.to_string(),
        supplier_name: "Fornecedor".to_string(),
        supplier_tax_id: "12345678901".to_string(),
        pix_key: "pix".to_string(),
        actual_completion_date: None,
    })
}

fn purchase(id: &str, status: ApprovalStatus) -> Request {
    Request::Purchase(Purchase {
        base: base(id, status),
        needed_by: "2025-07-01".to_string(),
        suggested_supplier: None,
    })
}

fn sample() -> Vec<Request> {
    use ApprovalStatus::*;
    vec![
        rental("REN-001", Approved, "2025-06-10", None),
        rental("REN-002", Approved, "2025-06-18", None),
        rental("REN-003", Approved, "2025-08-01", None),
        rental("REN-004", Approved, "2025-06-01", Some("2025-06-02")),
        // Not approved: never counted as overdue
        rental("REN-005", Pending, "2025-06-01", None),
        service("SER-001", Approved, "2025-06-01", "2025-06-30"),
        service("SER-002", Approved, "2025-06-20", "2025-06-30"),
        service("SER-003", Approved, "2025-05-01", "2025-05-30"),
        service("SER-004", UnderReview, "2025-06-01", "2025-06-30"),
        purchase("PUR-001", Approved),
        purchase("PUR-002", Rejected),
    ]
}

#[test]
fn test_dashboard_counters() {
    let requests = sample();
    let stats = DashboardStats::compute(&requests, now());

    assert_eq!(stats.total_requests, 11);
    assert_eq!(stats.pending_requests, 2);
    assert_eq!(stats.overdue_rentals, 1);
    assert_eq!(stats.rentals_due_soon, 1);
    assert_eq!(stats.critical, 2);
    assert_eq!(stats.services_in_progress, 1);
    // three unreturned approved rentals, one in-progress and one not-started service
    assert_eq!(stats.active, 5);
}

#[test]
fn test_dashboard_empty() {
    let requests: Vec<Request> = Vec::new();
    let stats = DashboardStats::compute(&requests, now());
    assert_eq!(stats, DashboardStats::default());
}

#[test]
fn test_dashboard_with_wider_window() {
    let requests = sample();
    let stats = DashboardStats::compute_with(&StatusCalculator::new(60), &requests, now());
    assert_eq!(stats.rentals_due_soon, 2);
    assert_eq!(stats.critical, 3);
}
