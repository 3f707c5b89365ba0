//! 资产问题契约。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_open() -> String {
    "OPEN".to_string()
}

fn default_resolved() -> String {
    "RESOLVED".to_string()
}

/// 问题创建请求体。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetIssueRequest {
    pub asset_id: i32,
    pub reported_by: i32,
    pub assigned_to: Option<i32>,
    pub issue_type: String,
    pub severity: String,
    pub issue_description: String,
    pub resolution_notes: Option<String>,
    #[serde(default = "default_open")]
    pub status: String,
}

/// 问题整单更新请求体。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssetIssueRequest {
    pub asset_id: i32,
    pub reported_by: i32,
    pub assigned_to: Option<i32>,
    pub issue_type: String,
    pub severity: String,
    pub issue_description: String,
    pub resolution_notes: Option<String>,
    #[serde(default = "default_open")]
    pub status: String,
}

/// 批量创建请求体：同一模板扇出到多个资产。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCreateAssetIssueRequest {
    pub asset_ids: Vec<i32>,
    pub reported_by: i32,
    pub assigned_to: Option<i32>,
    pub issue_type: String,
    pub severity: String,
    pub issue_description: String,
    pub resolution_notes: Option<String>,
    #[serde(default = "default_open")]
    pub status: String,
}

/// 指派请求体。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignIssueRequest {
    pub assigned_to: i32,
}

/// 解决请求体。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveIssueRequest {
    pub resolution_notes: String,
    #[serde(default = "default_resolved")]
    pub status: String,
}

/// 问题返回结构（含关联资产与用户信息）。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetIssueDto {
    pub id: i32,
    pub asset_id: i32,
    pub reported_by: i32,
    pub assigned_to: Option<i32>,
    pub issue_type: String,
    pub severity: String,
    pub issue_description: String,
    pub resolution_notes: Option<String>,
    pub status: String,
    pub reported_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub asset_name: Option<String>,
    pub asset_serial_number: Option<String>,
    pub reported_by_name: Option<String>,
    pub reported_by_email: Option<String>,
    pub assigned_to_name: Option<String>,
    pub assigned_to_email: Option<String>,
}

/// 单个资产的问题历史。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetIssueHistoryDto {
    pub asset_id: i32,
    pub asset_name: String,
    pub asset_serial_number: Option<String>,
    pub total_issues: usize,
    pub open_issues: usize,
    pub resolved_issues: usize,
    pub closed_issues: usize,
    pub last_issue_date: Option<DateTime<Utc>>,
    pub issues: Vec<AssetIssueDto>,
}

/// 全局问题统计。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueStatsDto {
    pub total_issues: usize,
    pub issues_by_status: BTreeMap<String, usize>,
    pub issues_by_severity: BTreeMap<String, usize>,
    pub issues_by_type: BTreeMap<String, usize>,
    /// 键为 `YYYY-MM`。
    pub issues_by_month: BTreeMap<String, usize>,
    pub average_resolution_time_hours: Option<f64>,
    pub open_issues_older_than30_days: usize,
}

/// 用户维度的问题统计。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIssueStatsDto {
    pub user_id: i32,
    pub user_name: String,
    pub reported_issues: usize,
    pub assigned_issues: usize,
    pub resolved_issues: usize,
    pub pending_issues: usize,
}
