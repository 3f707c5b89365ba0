//! 周期维护计算（纯函数，无状态）。
//!
//! 下次到期日总是以实际完成日为锚点：`next_due = completed + frequency_days`，
//! 延迟完成会把之后所有周期整体后移。

use chrono::{Days, NaiveDate};

/// 频率下限（天）。
pub const MIN_FREQUENCY_DAYS: i32 = 1;
/// 频率上限（天）。
pub const MAX_FREQUENCY_DAYS: i32 = 3650;
/// "本周到期"窗口长度（天）。
pub const DUE_THIS_WEEK_DAYS: u64 = 7;

pub fn frequency_in_bounds(frequency_days: i32) -> bool {
    (MIN_FREQUENCY_DAYS..=MAX_FREQUENCY_DAYS).contains(&frequency_days)
}

pub fn is_overdue(next_due: NaiveDate, today: NaiveDate) -> bool {
    next_due < today
}

/// 距到期的整天数；已过期时不返回。
pub fn days_until_due(next_due: NaiveDate, today: NaiveDate) -> Option<i64> {
    if is_overdue(next_due, today) {
        return None;
    }
    Some((next_due - today).num_days())
}

/// 完成后推进：返回新的到期日。频率越界时返回 `None`。
pub fn advance(completed: NaiveDate, frequency_days: i32) -> Option<NaiveDate> {
    if !frequency_in_bounds(frequency_days) {
        return None;
    }
    completed.checked_add_days(Days::new(frequency_days as u64))
}

pub fn is_due_today(next_due: NaiveDate, today: NaiveDate) -> bool {
    next_due == today
}

/// `today ≤ next_due ≤ today + 7`。
pub fn is_due_this_week(next_due: NaiveDate, today: NaiveDate) -> bool {
    let end = today
        .checked_add_days(Days::new(DUE_THIS_WEEK_DAYS))
        .unwrap_or(NaiveDate::MAX);
    next_due >= today && next_due <= end
}

/// 闭区间 `[start, end]`。
pub fn is_due_between(next_due: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    next_due >= start && next_due <= end
}
