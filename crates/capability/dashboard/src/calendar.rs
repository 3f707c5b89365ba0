//! 聚合共用的日期窗口与分组工具。

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// 临期窗口（天）。
pub const HORIZON_DAYS: i64 = 30;

/// 当月第一天。
pub fn month_start(today: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today)
}

pub fn days_between(today: NaiveDate, date: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// 未过期且 30 天内到期（不含今天）。
pub fn expiring_soon(expiry: NaiveDate, today: NaiveDate) -> bool {
    expiry > today && days_between(today, expiry) <= HORIZON_DAYS
}

/// `today ≤ date ≤ today + 30`。
pub fn within_horizon(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today && days_between(today, date) <= HORIZON_DAYS
}

/// 无到期日或到期日在今天之后。
pub fn is_active(expiry: Option<NaiveDate>, today: NaiveDate) -> bool {
    expiry.is_none_or(|date| date > today)
}

pub fn is_expired(expiry: Option<NaiveDate>, today: NaiveDate) -> bool {
    expiry.is_some_and(|date| date < today)
}

/// 按键计数。
pub fn count_by<I>(keys: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = String>,
{
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// 关联名称缺失时的分组键。
pub const UNKNOWN: &str = "Unknown";

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("date")
    }

    #[test]
    fn expiring_excludes_today_and_past() {
        let today = date(2024, 6, 1);
        assert!(!expiring_soon(today, today));
        assert!(expiring_soon(date(2024, 7, 1), today));
        assert!(!expiring_soon(date(2024, 7, 2), today));
        assert!(!expiring_soon(date(2024, 5, 31), today));
    }

    #[test]
    fn horizon_includes_today() {
        let today = date(2024, 6, 1);
        assert!(within_horizon(today, today));
        assert!(within_horizon(date(2024, 7, 1), today));
        assert!(!within_horizon(date(2024, 5, 31), today));
    }

    #[test]
    fn expiry_on_today_is_neither_active_nor_expired() {
        let today = date(2024, 6, 1);
        assert!(!is_active(Some(today), today));
        assert!(!is_expired(Some(today), today));
        assert!(is_active(None, today));
    }

    #[test]
    fn month_start_is_first_day() {
        assert_eq!(month_start(date(2024, 2, 29)), date(2024, 2, 1));
    }
}
