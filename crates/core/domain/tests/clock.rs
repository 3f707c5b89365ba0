use chrono::{NaiveDate, TimeZone, Utc};
use domain::recurrence::{advance, days_until_due, is_overdue};
use domain::{Clock, FixedClock, ServiceError, SystemClock};

#[test]
fn fixed_clock_pins_today() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 10).expect("date");
    let clock = FixedClock::at_date(date);
    assert_eq!(clock.today(), date);
    assert_eq!(clock.now(), Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap());
}

#[test]
fn system_clock_dates_follow_utc_timestamps() {
    let clock = SystemClock;
    let before = clock.now();
    let today = clock.today();
    let after = clock.now();
    // 两次取值之间可能跨过 UTC 午夜
    assert!(today == before.date_naive() || today == after.date_naive());
}

#[test]
fn overdue_and_days_until_due_are_exclusive() {
    let today = NaiveDate::from_ymd_opt(2024, 1, 10).expect("date");
    for offset in -5i64..=5 {
        let next_due = today + chrono::Duration::days(offset);
        assert_eq!(is_overdue(next_due, today), offset < 0);
        assert_eq!(days_until_due(next_due, today).is_some(), offset >= 0);
    }
}

#[test]
fn late_completion_shifts_schedule() {
    let completed = NaiveDate::from_ymd_opt(2024, 1, 15).expect("date");
    let next_due = advance(completed, 30).expect("advance");
    assert_eq!(next_due, NaiveDate::from_ymd_opt(2024, 2, 14).expect("date"));
}

#[test]
fn service_error_kinds_are_stable() {
    assert_eq!(ServiceError::validation("x").kind(), "INVALID.REQUEST");
    assert_eq!(ServiceError::not_found("x").kind(), "RESOURCE.NOT_FOUND");
    assert_eq!(ServiceError::Conflict("x".into()).kind(), "RESOURCE.CONFLICT");
    assert_eq!(ServiceError::Storage("boom".into()).kind(), "INTERNAL.ERROR");
    assert_eq!(
        ServiceError::Storage("boom".into()).public_message(),
        "internal error"
    );
}
