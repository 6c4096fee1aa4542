use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use requisitor::constants::{PALETTE_AMBER, PALETTE_BLUE, PALETTE_RED};
use requisitor::models::{ApprovalStatus, Priority, Rental, RequestBase, Service};
use requisitor::status::*;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap().and_hms_opt(10, 30, 0).unwrap()
}

fn base(id: &str) -> RequestBase {
    RequestBase {
        id: id.to_string(),
        title: "Concrete mixer 400L".to_string(),
        description: "Mixer for the east slab".to_string(),
        requester: "Ana Souza".to_string(),
        site: "Obra Centro".to_string(),
        justification: None,
        priority: Priority::High,
        notes: None,
        created_at: "2025-06-01T08:00:00".to_string(),
        approval_status: ApprovalStatus::Approved,
        rejection_reason: None,
    }
}

fn rental(expected: &str, returned: Option<&str>) -> Rental {
    Rental {
        base: base("REN-001"),
        start_date: "2025-06-01".to_string(),
        expected_return_date: expected.to_string(),
        quantity: 1,
        actual_return_date: returned.map(str::to_string),
        renewal_history: None,
    }
}

fn service(start: &str, end: &str, completed: Option<&str>) -> Service {
    Service {
        base: base("SER-001"),
        value: Decimal::new(4500, 0),
        start_date: start.to_string(),
        expected_end_date: end.to_string(),
        supplier_name: "Eletrica Silva".to_string(),
        supplier_tax_id: "12345678901".to_string(),
        pix_key: "silva@pix".to_string(),
        actual_completion_date: completed.map(str::to_string),
    }
}

#[test]
fn test_rental_returned_wins_over_dates() {
    let status = rental_status(&rental("2020-01-01", Some("2025-06-10")), now());
    assert_eq!(status.status, RentalStatus::Returned);
    assert_eq!(status.info, "returned on 10/06/2025");
    assert_eq!(status.days, None);

    let status = rental_status(&rental("garbage", Some("2025-06-10")), now());
    assert_eq!(status.status, RentalStatus::Returned);
}

#[test]
fn test_rental_seven_days_out_is_due_soon() {
    let status = rental_status(&rental("2025-06-22", None), now());
    assert_eq!(status.status, RentalStatus::DueSoon);
    assert_eq!(status.days, Some(7));
    assert_eq!(status.info, "due in 7 days");
    assert_eq!(status.palette, PALETTE_AMBER);
}

#[test]
fn test_rental_eight_days_out_is_on_schedule() {
    let status = rental_status(&rental("2025-06-23", None), now());
    assert_eq!(status.status, RentalStatus::OnSchedule);
    assert_eq!(status.days, Some(8));
    assert_eq!(status.info, "8 days remaining");
}

#[test]
fn test_rental_one_day_late_is_overdue() {
    let status = rental_status(&rental("2025-06-14", None), now());
    assert_eq!(status.status, RentalStatus::Overdue);
    assert_eq!(status.days, Some(1));
    assert_eq!(status.info, "overdue by 1 days");
    assert_eq!(status.palette, PALETTE_RED);
}

#[test]
fn test_rental_due_today() {
    let status = rental_status(&rental("2025-06-15T23:00:00", None), now());
    assert_eq!(status.status, RentalStatus::DueSoon);
    assert_eq!(status.days, Some(0));
    assert_eq!(status.info, "due today");
}

#[test]
fn test_rental_invalid_date_falls_back_to_on_schedule() {
    let status = rental_status(&rental("31/12/2025", None), now());
    assert_eq!(status.status, RentalStatus::OnSchedule);
    assert_eq!(status.info, "invalid date");
    assert_eq!(status.days, None);
}

#[test]
fn test_blank_return_date_does_not_count_as_returned() {
    let status = rental_status(&rental("2025-06-14", Some("")), now());
    assert_eq!(status.status, RentalStatus::Overdue);
}

#[test]
fn test_custom_due_soon_window() {
    let calculator = StatusCalculator::new(10);
    let status = calculator.rental(&rental("2025-06-23", None), now());
    assert_eq!(status.status, RentalStatus::DueSoon);
}

#[test]
fn test_service_starting_today_is_in_progress() {
    let status = service_status(&service("2025-06-15", "2025-06-20", None), now());
    assert_eq!(status.status, ServiceStatus::InProgress);
    assert_eq!(status.days, Some(5));
    assert_eq!(status.info, "5 days remaining");
}

#[test]
fn test_service_not_started() {
    let status = service_status(&service("2025-06-18", "2025-06-30", None), now());
    assert_eq!(status.status, ServiceStatus::NotStarted);
    assert_eq!(status.days, Some(3));
    assert_eq!(status.info, "starts in 3 days");
}

#[test]
fn test_service_ending_today() {
    let status = service_status(&service("2025-06-01", "2025-06-15", None), now());
    assert_eq!(status.status, ServiceStatus::InProgress);
    assert_eq!(status.days, Some(0));
    assert_eq!(status.info, "ends today");
}

#[test]
fn test_service_past_end_is_completed() {
    let status = service_status(&service("2025-06-01", "2025-06-14", None), now());
    assert_eq!(status.status, ServiceStatus::Completed);
    assert_eq!(status.info, "service ended");
    assert_eq!(status.palette, PALETTE_BLUE);
}

#[test]
fn test_service_explicitly_completed() {
    let status = service_status(
        &service("2025-06-18", "2025-06-30", Some("2025-06-10T16:00:00")),
        now(),
    );
    assert_eq!(status.status, ServiceStatus::Completed);
    assert_eq!(status.info, "completed on 10/06/2025");
}

#[test]
fn test_custom_date_pattern_reaches_info_text() {
    let calculator = StatusCalculator::default().with_date_pattern("yyyy-MM-dd");

    let returned = calculator.rental(&rental("2025-06-20", Some("2025-06-10")), now());
    assert_eq!(returned.info, "returned on 2025-06-10");

    let completed = calculator.service(
        &service("2025-06-01", "2025-06-30", Some("2025-06-12T08:00:00")),
        now(),
    );
    assert_eq!(completed.info, "completed on 2025-06-12");
}

#[test]
fn test_service_with_unparseable_end_stays_in_progress() {
    let status = service_status(&service("2025-06-01", "soon", None), now());
    assert_eq!(status.status, ServiceStatus::InProgress);
    assert_eq!(status.days, None);
    assert_eq!(status.info, "invalid date");
}

#[test]
fn test_duration_months_and_days() {
    assert_eq!(calculate_duration(Some("2025-01-01"), Some("2025-02-05")), "1 months and 5 days");
}

#[test]
fn test_duration_exact_month_has_no_remainder() {
    assert_eq!(calculate_duration(Some("2025-01-01"), Some("2025-01-31")), "1 months");
    assert_eq!(calculate_duration(Some("2025-01-01"), Some("2025-03-02")), "2 months");
}

#[test]
fn test_duration_short_span() {
    assert_eq!(calculate_duration(Some("2025-01-01"), Some("2025-01-08")), "7 days");
}

#[test]
fn test_duration_sentinels() {
    assert_eq!(calculate_duration(None, Some("2025-01-08")), "N/A");
    assert_eq!(calculate_duration(Some("2025-01-08"), None), "N/A");
    assert_eq!(calculate_duration(Some("bad"), Some("2025-01-08")), "N/A");
    assert_eq!(calculate_duration(Some("2025-01-08"), Some("2025-01-01")), "N/A");
}

#[test]
fn test_labels() {
    assert_eq!(RentalStatus::DueSoon.to_string(), "Due Soon");
    assert_eq!(ServiceStatus::NotStarted.label(), "Not Started");
}
