//! 存储接口 Trait 定义
//!
//! 定义所有资源存储的异步接口：
//! - 只读协作方：AssetStore, UserStore, VendorStore, LocationStore, CategoryStore,
//!   MaintenanceTypeStore, LicenseStore, SubscriptionStore
//! - MaintenanceRecordStore：维护事实日志（只追加）
//! - MaintenanceScheduleStore：维护计划
//! - AssetIssueStore：资产问题（状态比较交换）
//!
//! 设计原则：
//! - 所有接口返回 StorageError
//! - 记录不存在时返回 `Option::None` / `false`，不视为错误
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use crate::models::{
    AssetIssueCreate, AssetIssuePatch, AssetIssueRecord, AssetRecord, CategoryRecord,
    LicenseRecord, LocationRecord, MaintenanceRecord, MaintenanceRecordCreate,
    MaintenanceScheduleCreate, MaintenanceScheduleRecord, MaintenanceScheduleUpdate,
    MaintenanceTypeRecord, SubscriptionRecord, UserRecord, VendorRecord,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use domain::IssueStatus;

/// 资产存储接口（只读）。
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn get_asset(&self, id: i32) -> Result<Option<AssetRecord>, StorageError>;

    async fn list_assets(&self) -> Result<Vec<AssetRecord>, StorageError>;

    async fn asset_exists(&self, id: i32) -> Result<bool, StorageError>;
}

/// 用户存储接口（只读）。
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, id: i32) -> Result<Option<UserRecord>, StorageError>;

    async fn list_users(&self) -> Result<Vec<UserRecord>, StorageError>;

    async fn user_exists(&self, id: i32) -> Result<bool, StorageError>;
}

/// 供应商存储接口（只读）。
#[async_trait]
pub trait VendorStore: Send + Sync {
    async fn get_vendor(&self, id: i32) -> Result<Option<VendorRecord>, StorageError>;

    async fn list_vendors(&self) -> Result<Vec<VendorRecord>, StorageError>;

    async fn vendor_exists(&self, id: i32) -> Result<bool, StorageError>;
}

/// 位置存储接口（只读）。
#[async_trait]
pub trait LocationStore: Send + Sync {
    async fn get_location(&self, id: i32) -> Result<Option<LocationRecord>, StorageError>;

    async fn list_locations(&self) -> Result<Vec<LocationRecord>, StorageError>;

    async fn location_exists(&self, id: i32) -> Result<bool, StorageError>;
}

/// 资产分类存储接口（只读）。
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn get_category(&self, id: i32) -> Result<Option<CategoryRecord>, StorageError>;

    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, StorageError>;

    async fn category_exists(&self, id: i32) -> Result<bool, StorageError>;
}

/// 维护类型存储接口（只读）。
#[async_trait]
pub trait MaintenanceTypeStore: Send + Sync {
    async fn get_maintenance_type(
        &self,
        id: i32,
    ) -> Result<Option<MaintenanceTypeRecord>, StorageError>;

    async fn list_maintenance_types(&self) -> Result<Vec<MaintenanceTypeRecord>, StorageError>;

    async fn maintenance_type_exists(&self, id: i32) -> Result<bool, StorageError>;
}

/// 软件许可证存储接口（只读）。
#[async_trait]
pub trait LicenseStore: Send + Sync {
    async fn get_license(&self, id: i32) -> Result<Option<LicenseRecord>, StorageError>;

    async fn list_licenses(&self) -> Result<Vec<LicenseRecord>, StorageError>;

    async fn license_exists(&self, id: i32) -> Result<bool, StorageError>;
}

/// 订阅存储接口（只读）。
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    async fn get_subscription(&self, id: i32)
    -> Result<Option<SubscriptionRecord>, StorageError>;

    async fn list_subscriptions(&self) -> Result<Vec<SubscriptionRecord>, StorageError>;

    async fn subscription_exists(&self, id: i32) -> Result<bool, StorageError>;
}

/// 维护事实存储接口（只追加）。
#[async_trait]
pub trait MaintenanceRecordStore: Send + Sync {
    async fn list_maintenance_records(&self) -> Result<Vec<MaintenanceRecord>, StorageError>;

    async fn create_maintenance_record(
        &self,
        record: MaintenanceRecordCreate,
    ) -> Result<MaintenanceRecord, StorageError>;
}

/// 维护计划存储接口。
#[async_trait]
pub trait MaintenanceScheduleStore: Send + Sync {
    async fn create_schedule(
        &self,
        record: MaintenanceScheduleCreate,
    ) -> Result<MaintenanceScheduleRecord, StorageError>;

    async fn get_schedule(
        &self,
        id: i32,
    ) -> Result<Option<MaintenanceScheduleRecord>, StorageError>;

    async fn list_schedules(&self) -> Result<Vec<MaintenanceScheduleRecord>, StorageError>;

    /// 整单替换可变字段。
    async fn replace_schedule(
        &self,
        id: i32,
        update: MaintenanceScheduleUpdate,
    ) -> Result<Option<MaintenanceScheduleRecord>, StorageError>;

    /// 一次写入 `last_performed` 与 `next_due`。
    async fn record_completion(
        &self,
        id: i32,
        completed: NaiveDate,
        next_due: NaiveDate,
    ) -> Result<Option<MaintenanceScheduleRecord>, StorageError>;

    /// 停用（软禁用，保留历史）。
    async fn deactivate_schedule(&self, id: i32) -> Result<bool, StorageError>;

    async fn delete_schedule(&self, id: i32) -> Result<bool, StorageError>;
}

/// 资产问题存储接口。
#[async_trait]
pub trait AssetIssueStore: Send + Sync {
    async fn create_issue(&self, record: AssetIssueCreate)
    -> Result<AssetIssueRecord, StorageError>;

    /// 批量写入：全部成功或全部不写。
    async fn create_issues(
        &self,
        records: Vec<AssetIssueCreate>,
    ) -> Result<Vec<AssetIssueRecord>, StorageError>;

    async fn get_issue(&self, id: i32) -> Result<Option<AssetIssueRecord>, StorageError>;

    async fn list_issues(&self) -> Result<Vec<AssetIssueRecord>, StorageError>;

    /// 状态比较交换：仅当当前状态等于 `expected` 时写入补丁。
    ///
    /// 记录不存在或状态已变化时返回 `None`。
    async fn transition_issue(
        &self,
        id: i32,
        expected: IssueStatus,
        patch: AssetIssuePatch,
    ) -> Result<Option<AssetIssueRecord>, StorageError>;

    async fn delete_issue(&self, id: i32) -> Result<bool, StorageError>;

    /// 删除资产下的全部问题，返回删除数量。
    async fn delete_issues_by_asset(&self, asset_id: i32) -> Result<u64, StorageError>;
}
