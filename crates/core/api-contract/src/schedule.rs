//! 维护计划契约。

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// 维护计划创建请求体。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceScheduleRequest {
    pub asset_id: i32,
    pub maintenance_type_id: Option<i32>,
    pub maintenance_type: Option<String>,
    pub frequency_days: i32,
    /// `YYYY-MM-DD`
    pub last_performed: Option<String>,
    /// `YYYY-MM-DD`
    pub next_due: String,
    pub assigned_to: Option<i32>,
    pub priority: Option<String>,
    pub estimated_cost: Option<String>,
    pub notes: Option<String>,
    #[serde(default = "crate::default_true")]
    pub is_active: bool,
}

/// 维护计划更新请求体（资产不可变更）。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaintenanceScheduleRequest {
    pub maintenance_type_id: Option<i32>,
    pub maintenance_type: Option<String>,
    pub frequency_days: i32,
    pub last_performed: Option<String>,
    pub next_due: String,
    pub assigned_to: Option<i32>,
    pub priority: Option<String>,
    pub estimated_cost: Option<String>,
    pub notes: Option<String>,
    #[serde(default = "crate::default_true")]
    pub is_active: bool,
}

/// 完成维护请求体。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteMaintenanceRequest {
    pub completed_date: String,
}

/// 维护计划返回结构（含关联名称与计算字段）。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceScheduleDto {
    pub id: i32,
    pub asset_id: i32,
    pub asset_name: Option<String>,
    pub maintenance_type_id: Option<i32>,
    pub maintenance_type: Option<String>,
    pub maintenance_type_name: Option<String>,
    pub frequency_days: i32,
    pub last_performed: Option<NaiveDate>,
    pub next_due: NaiveDate,
    pub assigned_to: Option<i32>,
    pub assigned_to_name: Option<String>,
    pub priority: Option<String>,
    pub estimated_cost: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub is_overdue: bool,
    /// 已过期时省略。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until_due: Option<i64>,
}

/// 维护计划汇总。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceScheduleSummaryDto {
    pub total_schedules: usize,
    pub active_schedules: usize,
    pub overdue_schedules: usize,
    pub due_today_schedules: usize,
    pub due_this_week_schedules: usize,
    pub total_estimated_cost: Option<String>,
}
