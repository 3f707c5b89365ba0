//! 问题统计（纯计算）。

use api_contract::{IssueStatsDto, UserIssueStatsDto};
use chrono::{DateTime, Duration, Utc};
use domain::lifecycle::resolution_hours;
use itam_storage::{AssetIssueRecord, UserRecord};
use std::collections::BTreeMap;

/// 积压阈值（天）。
pub const STALE_AFTER_DAYS: i64 = 30;

/// 全局问题统计。
pub fn issue_stats(records: &[AssetIssueRecord], now: DateTime<Utc>) -> IssueStatsDto {
    let mut by_status = BTreeMap::new();
    let mut by_severity = BTreeMap::new();
    let mut by_type = BTreeMap::new();
    let mut by_month = BTreeMap::new();
    for record in records {
        *by_status.entry(record.status.as_str().to_string()).or_insert(0) += 1;
        *by_severity
            .entry(record.severity.as_str().to_string())
            .or_insert(0) += 1;
        *by_type
            .entry(record.issue_type.as_str().to_string())
            .or_insert(0) += 1;
        *by_month
            .entry(record.reported_at.format("%Y-%m").to_string())
            .or_insert(0) += 1;
    }

    let hours: Vec<i64> = records
        .iter()
        .filter_map(|record| {
            record
                .resolved_at
                .map(|resolved| resolution_hours(record.reported_at, resolved))
        })
        .collect();
    let average_resolution_time_hours = if hours.is_empty() {
        None
    } else {
        Some(hours.iter().sum::<i64>() as f64 / hours.len() as f64)
    };

    let cutoff = now - Duration::days(STALE_AFTER_DAYS);
    let open_issues_older_than30_days = records
        .iter()
        .filter(|record| record.status.is_pending() && record.reported_at < cutoff)
        .count();

    IssueStatsDto {
        total_issues: records.len(),
        issues_by_status: by_status,
        issues_by_severity: by_severity,
        issues_by_type: by_type,
        issues_by_month: by_month,
        average_resolution_time_hours,
        open_issues_older_than30_days,
    }
}

/// 用户维度统计：解决/待处理数只统计指派给该用户的问题。
pub fn user_stats(user: &UserRecord, records: &[AssetIssueRecord]) -> UserIssueStatsDto {
    let assigned: Vec<&AssetIssueRecord> = records
        .iter()
        .filter(|record| record.assigned_to == Some(user.id))
        .collect();
    UserIssueStatsDto {
        user_id: user.id,
        user_name: user.display_name().unwrap_or_default(),
        reported_issues: records
            .iter()
            .filter(|record| record.reported_by == user.id)
            .count(),
        assigned_issues: assigned.len(),
        resolved_issues: assigned.iter().filter(|r| r.status.is_settled()).count(),
        pending_issues: assigned.iter().filter(|r| r.status.is_pending()).count(),
    }
}
