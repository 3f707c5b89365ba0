//! 存储集合：按后端一次性装配全部存储接口。

use crate::in_memory::{
    InMemoryAssetStore, InMemoryCategoryStore, InMemoryIssueStore, InMemoryLicenseStore,
    InMemoryLocationStore, InMemoryMaintenanceRecordStore, InMemoryMaintenanceTypeStore,
    InMemoryScheduleStore, InMemorySubscriptionStore, InMemoryUserStore, InMemoryVendorStore,
};
use crate::postgres::{
    PgAssetStore, PgCategoryStore, PgIssueStore, PgLicenseStore, PgLocationStore,
    PgMaintenanceRecordStore, PgMaintenanceTypeStore, PgScheduleStore, PgSubscriptionStore,
    PgUserStore, PgVendorStore,
};
use crate::snapshot::StorageSnapshot;
use crate::traits::{
    AssetIssueStore, AssetStore, CategoryStore, LicenseStore, LocationStore,
    MaintenanceRecordStore, MaintenanceScheduleStore, MaintenanceTypeStore, SubscriptionStore,
    UserStore, VendorStore,
};
use sqlx::PgPool;
use std::sync::Arc;

/// 全部存储接口的共享句柄。
#[derive(Clone)]
pub struct StoreSet {
    pub assets: Arc<dyn AssetStore>,
    pub users: Arc<dyn UserStore>,
    pub vendors: Arc<dyn VendorStore>,
    pub locations: Arc<dyn LocationStore>,
    pub categories: Arc<dyn CategoryStore>,
    pub maintenance_types: Arc<dyn MaintenanceTypeStore>,
    pub licenses: Arc<dyn LicenseStore>,
    pub subscriptions: Arc<dyn SubscriptionStore>,
    pub maintenance_records: Arc<dyn MaintenanceRecordStore>,
    pub schedules: Arc<dyn MaintenanceScheduleStore>,
    pub issues: Arc<dyn AssetIssueStore>,
}

impl StoreSet {
    /// 内存后端（以快照初始化）。
    pub fn in_memory(snapshot: StorageSnapshot) -> Self {
        Self {
            assets: Arc::new(InMemoryAssetStore::with_records(snapshot.assets)),
            users: Arc::new(InMemoryUserStore::with_records(snapshot.users)),
            vendors: Arc::new(InMemoryVendorStore::with_records(snapshot.vendors)),
            locations: Arc::new(InMemoryLocationStore::with_records(snapshot.locations)),
            categories: Arc::new(InMemoryCategoryStore::with_records(snapshot.categories)),
            maintenance_types: Arc::new(InMemoryMaintenanceTypeStore::with_records(
                snapshot.maintenance_types,
            )),
            licenses: Arc::new(InMemoryLicenseStore::with_records(snapshot.licenses)),
            subscriptions: Arc::new(InMemorySubscriptionStore::with_records(
                snapshot.subscriptions,
            )),
            maintenance_records: Arc::new(InMemoryMaintenanceRecordStore::with_records(
                snapshot.maintenance_records,
            )),
            schedules: Arc::new(InMemoryScheduleStore::with_records(
                snapshot.maintenance_schedules,
            )),
            issues: Arc::new(InMemoryIssueStore::with_records(snapshot.asset_issues)),
        }
    }

    /// PostgreSQL 后端（共享同一连接池）。
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            assets: Arc::new(PgAssetStore::new(pool.clone())),
            users: Arc::new(PgUserStore::new(pool.clone())),
            vendors: Arc::new(PgVendorStore::new(pool.clone())),
            locations: Arc::new(PgLocationStore::new(pool.clone())),
            categories: Arc::new(PgCategoryStore::new(pool.clone())),
            maintenance_types: Arc::new(PgMaintenanceTypeStore::new(pool.clone())),
            licenses: Arc::new(PgLicenseStore::new(pool.clone())),
            subscriptions: Arc::new(PgSubscriptionStore::new(pool.clone())),
            maintenance_records: Arc::new(PgMaintenanceRecordStore::new(pool.clone())),
            schedules: Arc::new(PgScheduleStore::new(pool.clone())),
            issues: Arc::new(PgIssueStore::new(pool)),
        }
    }
}
