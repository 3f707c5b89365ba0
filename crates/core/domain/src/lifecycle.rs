//! 问题生命周期规则：指派、解决、整单更新时的状态与时间戳副作用。
//!
//! 规则保证 `closed_at` 存在时 `resolved_at` 一定存在。

use crate::enums::IssueStatus;
use chrono::{DateTime, Utc};

/// 问题的审计时间戳。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IssueTimestamps {
    pub resolved_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// 指派后的状态：仅 `OPEN` 自动推进为 `ASSIGNED`。
pub fn status_after_assign(current: IssueStatus) -> IssueStatus {
    if current == IssueStatus::Open {
        IssueStatus::Assigned
    } else {
        current
    }
}

/// 解决操作：无条件覆盖 `resolved_at`；目标为 `CLOSED` 时同时写入 `closed_at`。
pub fn timestamps_after_resolve(
    target: IssueStatus,
    current: IssueTimestamps,
    now: DateTime<Utc>,
) -> IssueTimestamps {
    IssueTimestamps {
        resolved_at: Some(now),
        closed_at: if target == IssueStatus::Closed {
            Some(now)
        } else {
            current.closed_at
        },
    }
}

/// 整单更新：`RESOLVED` 覆盖 `resolved_at`；`CLOSED` 写入 `closed_at`，
/// 且仅在 `resolved_at` 为空时补齐。
pub fn timestamps_after_update(
    target: IssueStatus,
    current: IssueTimestamps,
    now: DateTime<Utc>,
) -> IssueTimestamps {
    match target {
        IssueStatus::Resolved => IssueTimestamps {
            resolved_at: Some(now),
            closed_at: current.closed_at,
        },
        IssueStatus::Closed => IssueTimestamps {
            resolved_at: current.resolved_at.or(Some(now)),
            closed_at: Some(now),
        },
        _ => current,
    }
}

/// 解决耗时（整小时，向零截断）。
pub fn resolution_hours(reported_at: DateTime<Utc>, resolved_at: DateTime<Utc>) -> i64 {
    (resolved_at - reported_at).num_hours()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0)
            .single()
            .expect("timestamp")
    }

    #[test]
    fn assign_only_advances_open() {
        assert_eq!(status_after_assign(IssueStatus::Open), IssueStatus::Assigned);
        assert_eq!(
            status_after_assign(IssueStatus::InProgress),
            IssueStatus::InProgress
        );
        assert_eq!(status_after_assign(IssueStatus::Resolved), IssueStatus::Resolved);
    }

    #[test]
    fn resolve_closed_sets_both_timestamps() {
        let stamps =
            timestamps_after_resolve(IssueStatus::Closed, IssueTimestamps::default(), at(9));
        assert_eq!(stamps.resolved_at, Some(at(9)));
        assert_eq!(stamps.closed_at, Some(at(9)));
    }

    #[test]
    fn resolve_overwrites_prior_resolution() {
        let current = IssueTimestamps {
            resolved_at: Some(at(1)),
            closed_at: None,
        };
        let stamps = timestamps_after_resolve(IssueStatus::Resolved, current, at(5));
        assert_eq!(stamps.resolved_at, Some(at(5)));
        assert!(stamps.closed_at.is_none());
    }

    #[test]
    fn update_resolved_overwrites_resolution() {
        let current = IssueTimestamps {
            resolved_at: Some(at(2)),
            closed_at: None,
        };
        let stamps = timestamps_after_update(IssueStatus::Resolved, current, at(8));
        assert_eq!(stamps.resolved_at, Some(at(8)));
        assert!(stamps.closed_at.is_none());
    }

    #[test]
    fn update_closed_backfills_only_missing_resolution() {
        let resolved = IssueTimestamps {
            resolved_at: Some(at(2)),
            closed_at: None,
        };
        let stamps = timestamps_after_update(IssueStatus::Closed, resolved, at(7));
        assert_eq!(stamps.resolved_at, Some(at(2)));
        assert_eq!(stamps.closed_at, Some(at(7)));

        let fresh = timestamps_after_update(IssueStatus::Closed, IssueTimestamps::default(), at(7));
        assert_eq!(fresh.resolved_at, Some(at(7)));
    }

    #[test]
    fn update_other_status_keeps_timestamps() {
        let current = IssueTimestamps {
            resolved_at: Some(at(2)),
            closed_at: None,
        };
        assert_eq!(
            timestamps_after_update(IssueStatus::InProgress, current, at(7)),
            current
        );
    }

    #[test]
    fn resolution_hours_truncates() {
        let reported = at(1);
        let resolved = reported + chrono::Duration::minutes(150);
        assert_eq!(resolution_hours(reported, resolved), 2);
    }
}
