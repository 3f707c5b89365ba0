//! 数据模型
//!
//! 定义所有存储相关的数据模型和写入结构：
//! - 只读协作方：AssetRecord, UserRecord, VendorRecord, LocationRecord, CategoryRecord,
//!   MaintenanceTypeRecord, LicenseRecord, SubscriptionRecord
//! - 维护事实日志：MaintenanceRecord, MaintenanceRecordCreate
//! - 维护计划：MaintenanceScheduleRecord, MaintenanceScheduleCreate, MaintenanceScheduleUpdate
//! - 资产问题：AssetIssueRecord, AssetIssueCreate, AssetIssuePatch

use chrono::{DateTime, NaiveDate, Utc};
use domain::{IssueStatus, IssueTimestamps, IssueType, Priority, Severity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 资产记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    pub id: i32,
    pub category_id: i32,
    pub vendor_id: Option<i32>,
    pub location_id: Option<i32>,
    pub name: String,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Option<Decimal>,
    pub current_value: Option<Decimal>,
    pub warranty_expiry: Option<NaiveDate>,
    pub assigned_to: Option<i32>,
    pub status: Option<String>,
}

/// 用户记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: i32,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
}

impl UserRecord {
    /// 显示名："名 姓"，缺一则取另一个，都缺省时为空。
    pub fn display_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(first), None) => Some(first.clone()),
            (None, Some(last)) => Some(last.clone()),
            (None, None) => None,
        }
    }
}

/// 供应商记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorRecord {
    pub id: i32,
    pub name: String,
    pub contact_email: Option<String>,
}

/// 位置记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    pub id: i32,
    pub name: String,
}

/// 资产分类记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    pub id: i32,
    pub name: String,
}

/// 维护类型记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTypeRecord {
    pub id: i32,
    pub name: String,
}

/// 软件许可证记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseRecord {
    pub id: i32,
    pub name: String,
    pub vendor_id: Option<i32>,
    pub expiry_date: Option<NaiveDate>,
    pub number_of_seats: Option<i32>,
    #[serde(default)]
    pub seats_used: i32,
    pub status: String,
}

/// 订阅记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    pub id: i32,
    pub name: String,
    pub vendor_id: Option<i32>,
    pub expiry_date: Option<NaiveDate>,
    pub cost: Option<Decimal>,
    /// `monthly` / `yearly` 等。
    pub billing_cycle: Option<String>,
    #[serde(default)]
    pub auto_renewal: bool,
    pub status: String,
}

/// 已执行维护的事实记录（只追加）。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: i32,
    pub asset_id: i32,
    pub schedule_id: Option<i32>,
    pub performed_by: i32,
    pub maintenance_type: String,
    pub performed_date: NaiveDate,
    pub duration_hours: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// 维护事实写入输入。
#[derive(Debug, Clone)]
pub struct MaintenanceRecordCreate {
    pub asset_id: i32,
    pub schedule_id: Option<i32>,
    pub performed_by: i32,
    pub maintenance_type: String,
    pub performed_date: NaiveDate,
    pub duration_hours: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// 维护计划记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceScheduleRecord {
    pub id: i32,
    pub asset_id: i32,
    pub maintenance_type_id: Option<i32>,
    pub maintenance_type: Option<String>,
    pub frequency_days: i32,
    pub last_performed: Option<NaiveDate>,
    pub next_due: NaiveDate,
    pub assigned_to: Option<i32>,
    pub priority: Option<Priority>,
    pub estimated_cost: Option<Decimal>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// 维护计划创建输入。
#[derive(Debug, Clone)]
pub struct MaintenanceScheduleCreate {
    pub asset_id: i32,
    pub maintenance_type_id: Option<i32>,
    pub maintenance_type: Option<String>,
    pub frequency_days: i32,
    pub last_performed: Option<NaiveDate>,
    pub next_due: NaiveDate,
    pub assigned_to: Option<i32>,
    pub priority: Option<Priority>,
    pub estimated_cost: Option<Decimal>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// 维护计划整单替换输入（资产与创建时间不变）。
#[derive(Debug, Clone)]
pub struct MaintenanceScheduleUpdate {
    pub maintenance_type_id: Option<i32>,
    pub maintenance_type: Option<String>,
    pub frequency_days: i32,
    pub last_performed: Option<NaiveDate>,
    pub next_due: NaiveDate,
    pub assigned_to: Option<i32>,
    pub priority: Option<Priority>,
    pub estimated_cost: Option<Decimal>,
    pub notes: Option<String>,
    pub is_active: bool,
}

/// 资产问题记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetIssueRecord {
    pub id: i32,
    pub asset_id: i32,
    pub reported_by: i32,
    pub assigned_to: Option<i32>,
    pub issue_type: IssueType,
    pub severity: Severity,
    pub issue_description: String,
    pub resolution_notes: Option<String>,
    pub status: IssueStatus,
    pub reported_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl AssetIssueRecord {
    pub fn timestamps(&self) -> IssueTimestamps {
        IssueTimestamps {
            resolved_at: self.resolved_at,
            closed_at: self.closed_at,
        }
    }

    /// 以当前记录为底构造补丁。
    pub fn to_patch(&self) -> AssetIssuePatch {
        AssetIssuePatch {
            asset_id: self.asset_id,
            reported_by: self.reported_by,
            assigned_to: self.assigned_to,
            issue_type: self.issue_type,
            severity: self.severity,
            issue_description: self.issue_description.clone(),
            resolution_notes: self.resolution_notes.clone(),
            status: self.status,
            resolved_at: self.resolved_at,
            closed_at: self.closed_at,
        }
    }
}

/// 资产问题创建输入。
#[derive(Debug, Clone)]
pub struct AssetIssueCreate {
    pub asset_id: i32,
    pub reported_by: i32,
    pub assigned_to: Option<i32>,
    pub issue_type: IssueType,
    pub severity: Severity,
    pub issue_description: String,
    pub resolution_notes: Option<String>,
    pub status: IssueStatus,
    pub reported_at: DateTime<Utc>,
}

/// 问题可变字段的完整新状态（状态比较交换时整体写入）。
#[derive(Debug, Clone)]
pub struct AssetIssuePatch {
    pub asset_id: i32,
    pub reported_by: i32,
    pub assigned_to: Option<i32>,
    pub issue_type: IssueType,
    pub severity: Severity,
    pub issue_description: String,
    pub resolution_notes: Option<String>,
    pub status: IssueStatus,
    pub resolved_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl AssetIssuePatch {
    pub fn apply_timestamps(&mut self, stamps: IssueTimestamps) {
        self.resolved_at = stamps.resolved_at;
        self.closed_at = stamps.closed_at;
    }
}
