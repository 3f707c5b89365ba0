use api_contract::{
    ApiResponse, CreateAssetIssueRequest, DashboardFiltersDto, CreateMaintenanceScheduleRequest, IssueStatsDto,
    MaintenanceScheduleDto, ResolveIssueRequest,
};
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

#[test]
fn schedule_request_defaults_active() {
    let payload = r#"{"assetId":3,"frequencyDays":30,"nextDue":"2024-01-10"}"#;
    let req: CreateMaintenanceScheduleRequest = serde_json::from_str(payload).expect("parse");
    assert_eq!(req.asset_id, 3);
    assert_eq!(req.frequency_days, 30);
    assert!(req.is_active);
    assert!(req.priority.is_none());
}

#[test]
fn issue_requests_default_status() {
    let payload = r#"{"assetId":1,"reportedBy":2,"issueType":"OTHER","severity":"LOW","issueDescription":"fan noise"}"#;
    let req: CreateAssetIssueRequest = serde_json::from_str(payload).expect("parse");
    assert_eq!(req.status, "OPEN");

    let resolve: ResolveIssueRequest =
        serde_json::from_str(r#"{"resolutionNotes":"replaced fan"}"#).expect("parse");
    assert_eq!(resolve.status, "RESOLVED");
}

#[test]
fn overdue_schedule_omits_days_until_due() {
    let dto = MaintenanceScheduleDto {
        id: 1,
        asset_id: 3,
        asset_name: Some("Laptop".to_string()),
        maintenance_type_id: None,
        maintenance_type: None,
        maintenance_type_name: None,
        frequency_days: 30,
        last_performed: None,
        next_due: NaiveDate::from_ymd_opt(2024, 1, 10).expect("date"),
        assigned_to: None,
        assigned_to_name: None,
        priority: Some("HIGH".to_string()),
        estimated_cost: None,
        notes: None,
        is_active: true,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
        is_overdue: true,
        days_until_due: None,
    };
    let value = serde_json::to_value(dto).expect("serialize");
    assert_eq!(value.get("nextDue"), Some(&Value::from("2024-01-10")));
    assert_eq!(value.get("isOverdue"), Some(&Value::from(true)));
    assert!(value.get("daysUntilDue").is_none());
    assert!(value.get("next_due").is_none());
}

#[test]
fn issue_stats_keys_are_camel_case() {
    let dto = IssueStatsDto {
        total_issues: 0,
        issues_by_status: BTreeMap::new(),
        issues_by_severity: BTreeMap::new(),
        issues_by_type: BTreeMap::new(),
        issues_by_month: BTreeMap::new(),
        average_resolution_time_hours: None,
        open_issues_older_than30_days: 0,
    };
    let value = serde_json::to_value(dto).expect("serialize");
    assert!(value.get("openIssuesOlderThan30Days").is_some());
    assert!(value.get("averageResolutionTimeHours").is_some());
}

#[test]
fn error_envelope_carries_code_without_data() {
    let envelope = ApiResponse::<()>::error("RESOURCE.CONFLICT", "Issue status changed");
    let value: Value = serde_json::to_value(&envelope).expect("serialize");
    assert_eq!(value["success"], false);
    assert!(value["data"].is_null());
    assert_eq!(value["error"]["code"], "RESOURCE.CONFLICT");
    assert_eq!(value["error"]["message"], "Issue status changed");
}

#[test]
fn dashboard_filter_accepts_partial_payloads() {
    let filter: DashboardFiltersDto =
        serde_json::from_str(r#"{"locationId":2}"#).expect("parse");
    assert_eq!(filter.location_id, Some(2));
    assert!(filter.category_id.is_none());
    assert!(filter.date_range.is_none());

    let success = serde_json::to_value(ApiResponse::success(filter)).expect("serialize");
    assert_eq!(success["data"]["locationId"], 2);
    assert!(success["error"].is_null());
}
