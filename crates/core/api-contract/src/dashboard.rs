//! 仪表盘视图契约。
//!
//! 分组统计使用有序 Map，输出稳定；金额字段在不大于零时省略为 `null`。

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 仪表盘过滤条件。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardFiltersDto {
    pub location_id: Option<i32>,
    pub category_id: Option<i32>,
    pub date_range: Option<DateRangeDto>,
}

/// 闭区间日期范围。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeDto {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRangeDto {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// 总览快照。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverviewDto {
    pub asset_metrics: AssetMetricsDto,
    pub maintenance_metrics: MaintenanceMetricsDto,
    pub software_license_metrics: SoftwareLicenseMetricsDto,
    pub subscription_metrics: SubscriptionMetricsDto,
    pub issue_metrics: IssueMetricsDto,
    pub upcoming_events: UpcomingEventsDto,
    pub financial_summary: FinancialSummaryDto,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMetricsDto {
    pub total_assets: usize,
    pub assets_by_status: BTreeMap<String, usize>,
    pub assets_by_category: BTreeMap<String, usize>,
    pub assets_by_location: BTreeMap<String, usize>,
    pub total_value: Option<String>,
    /// 形如 `"3.2 years"`。
    pub avg_asset_age: Option<String>,
    pub assets_near_warranty_expiry: usize,
    pub unassigned_assets: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceMetricsDto {
    pub total_maintenance_records: usize,
    pub maintenance_this_month: usize,
    pub pending_maintenance: usize,
    pub overdue_maintenance: usize,
    pub maintenance_cost_this_month: Option<String>,
    pub avg_maintenance_cost: Option<String>,
    pub maintenance_by_type: BTreeMap<String, usize>,
    pub maintenance_by_status: BTreeMap<String, usize>,
    pub top_maintenance_assets: Vec<AssetMaintenanceSummaryDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMaintenanceSummaryDto {
    pub asset_id: i32,
    pub asset_name: Option<String>,
    pub serial_number: Option<String>,
    pub maintenance_count: usize,
    pub total_cost: Option<String>,
    pub last_maintenance_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareLicenseMetricsDto {
    pub total_licenses: usize,
    pub active_licenses: usize,
    pub expired_licenses: usize,
    pub expiring_licenses: usize,
    /// 形如 `"80.0%"`，无座位时为 `"0%"`。
    pub license_utilization: String,
    pub total_seats: i64,
    pub used_seats: i64,
    pub licenses_by_vendor: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionMetricsDto {
    pub total_subscriptions: usize,
    pub active_subscriptions: usize,
    pub expired_subscriptions: usize,
    pub expiring_subscriptions: usize,
    pub monthly_cost: Option<String>,
    pub annual_cost: Option<String>,
    pub subscriptions_by_vendor: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueMetricsDto {
    pub total_issues: usize,
    pub open_issues: usize,
    pub resolved_issues: usize,
    pub critical_issues: usize,
    pub issues_by_type: BTreeMap<String, usize>,
    pub issues_by_severity: BTreeMap<String, usize>,
    /// 形如 `"12.5 hours"`。
    pub avg_resolution_time: Option<String>,
    pub issues_this_month: usize,
}

/// 未来 30 天内的事件。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingEventsDto {
    pub maintenance_due: Vec<UpcomingMaintenanceDto>,
    pub license_expiring: Vec<ExpiringLicenseDto>,
    pub subscription_expiring: Vec<ExpiringSubscriptionDto>,
    pub warranty_expiring: Vec<ExpiringWarrantyDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingMaintenanceDto {
    pub schedule_id: i32,
    pub asset_id: i32,
    pub asset_name: Option<String>,
    pub maintenance_type: String,
    pub due_date: NaiveDate,
    pub priority: String,
    pub days_until_due: i64,
    /// 窗口从今天开始，列表内恒为 `false`；过期计划见计划的逾期查询。
    pub is_overdue: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiringLicenseDto {
    pub license_id: i32,
    pub name: String,
    pub vendor_name: Option<String>,
    pub expiry_date: NaiveDate,
    pub days_until_expiry: i64,
    pub seats_used: i32,
    pub total_seats: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiringSubscriptionDto {
    pub subscription_id: i32,
    pub name: String,
    pub vendor_name: Option<String>,
    pub expiry_date: NaiveDate,
    pub days_until_expiry: i64,
    pub cost: Option<String>,
    pub auto_renewal: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiringWarrantyDto {
    pub asset_id: i32,
    pub asset_name: String,
    pub serial_number: Option<String>,
    pub warranty_expiry_date: NaiveDate,
    pub days_until_expiry: i64,
    pub vendor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummaryDto {
    pub total_asset_value: Option<String>,
    pub maintenance_cost_this_month: Option<String>,
    pub subscription_cost_this_month: Option<String>,
    pub total_monthly_costs: Option<String>,
    pub projected_annual_costs: Option<String>,
    /// 值为零的分类不出现。
    pub cost_by_category: BTreeMap<String, String>,
}
