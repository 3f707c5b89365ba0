//! 问题指标。

use crate::calendar::{count_by, month_start};
use api_contract::IssueMetricsDto;
use chrono::NaiveDate;
use domain::lifecycle::resolution_hours;
use domain::{IssueStatus, Severity};
use itam_storage::AssetIssueRecord;

pub fn issue_metrics(issues: &[AssetIssueRecord], today: NaiveDate) -> IssueMetricsDto {
    let first_of_month = month_start(today);
    let hours: Vec<i64> = issues
        .iter()
        .filter_map(|issue| {
            issue
                .resolved_at
                .map(|resolved| resolution_hours(issue.reported_at, resolved))
        })
        .collect();
    let avg_resolution_time = if hours.is_empty() {
        None
    } else {
        let mean = hours.iter().sum::<i64>() as f64 / hours.len() as f64;
        Some(format!("{mean:.1} hours"))
    };

    IssueMetricsDto {
        total_issues: issues.len(),
        open_issues: issues
            .iter()
            .filter(|issue| matches!(issue.status, IssueStatus::Open | IssueStatus::InProgress))
            .count(),
        resolved_issues: issues
            .iter()
            .filter(|issue| issue.status == IssueStatus::Resolved)
            .count(),
        critical_issues: issues
            .iter()
            .filter(|issue| issue.severity == Severity::Critical)
            .count(),
        issues_by_type: count_by(issues.iter().map(|i| i.issue_type.as_str().to_string())),
        issues_by_severity: count_by(issues.iter().map(|i| i.severity.as_str().to_string())),
        avg_resolution_time,
        issues_this_month: issues
            .iter()
            .filter(|issue| issue.reported_at.date_naive() >= first_of_month)
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use domain::IssueType;

    fn at(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, month, day, 8, 0, 0)
            .single()
            .expect("timestamp")
    }

    fn issue(status: IssueStatus, severity: Severity, reported_at: DateTime<Utc>) -> AssetIssueRecord {
        AssetIssueRecord {
            id: 1,
            asset_id: 1,
            reported_by: 1,
            assigned_to: None,
            issue_type: IssueType::NetworkProblem,
            severity,
            issue_description: "link flapping".to_string(),
            resolution_notes: None,
            status,
            reported_at,
            resolved_at: None,
            closed_at: None,
        }
    }

    #[test]
    fn open_counts_in_progress_but_not_assigned() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).expect("date");
        let issues = vec![
            issue(IssueStatus::Open, Severity::Low, at(6, 1)),
            issue(IssueStatus::InProgress, Severity::Critical, at(5, 31)),
            issue(IssueStatus::Assigned, Severity::High, at(6, 2)),
        ];
        let metrics = issue_metrics(&issues, today);
        assert_eq!(metrics.open_issues, 2);
        assert_eq!(metrics.critical_issues, 1);
        assert_eq!(metrics.issues_this_month, 2);
        assert_eq!(metrics.issues_by_type.get("NETWORK_PROBLEM"), Some(&3));
        assert!(metrics.avg_resolution_time.is_none());
    }

    #[test]
    fn average_resolution_is_formatted_in_hours() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).expect("date");
        let mut first = issue(IssueStatus::Resolved, Severity::Low, at(6, 1));
        first.resolved_at = Some(at(6, 1) + Duration::hours(3));
        let mut second = issue(IssueStatus::Closed, Severity::Low, at(6, 1));
        second.resolved_at = Some(at(6, 1) + Duration::hours(6));
        let metrics = issue_metrics(&[first, second], today);
        assert_eq!(metrics.avg_resolution_time.as_deref(), Some("4.5 hours"));
        assert_eq!(metrics.resolved_issues, 1);
    }
}
