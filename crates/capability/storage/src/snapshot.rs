//! JSON 快照：一次性装载全部记录到内存存储。

use crate::error::StorageError;
use crate::models::{
    AssetIssueRecord, AssetRecord, CategoryRecord, LicenseRecord, LocationRecord,
    MaintenanceRecord, MaintenanceScheduleRecord, MaintenanceTypeRecord, SubscriptionRecord,
    UserRecord, VendorRecord,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 全量记录快照（字段均可缺省）。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageSnapshot {
    pub assets: Vec<AssetRecord>,
    pub users: Vec<UserRecord>,
    pub vendors: Vec<VendorRecord>,
    pub locations: Vec<LocationRecord>,
    pub categories: Vec<CategoryRecord>,
    pub maintenance_types: Vec<MaintenanceTypeRecord>,
    pub licenses: Vec<LicenseRecord>,
    pub subscriptions: Vec<SubscriptionRecord>,
    pub maintenance_records: Vec<MaintenanceRecord>,
    pub maintenance_schedules: Vec<MaintenanceScheduleRecord>,
    pub asset_issues: Vec<AssetIssueRecord>,
}

impl StorageSnapshot {
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
