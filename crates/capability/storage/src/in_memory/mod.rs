//! 内存存储实现模块
//!
//! 用于本地演示、快照重放和测试。
//!
//! 包含以下实现：
//! - 只读协作方：InMemoryAssetStore, InMemoryUserStore, InMemoryVendorStore,
//!   InMemoryLocationStore, InMemoryCategoryStore, InMemoryMaintenanceTypeStore,
//!   InMemoryLicenseStore, InMemorySubscriptionStore
//! - MaintenanceRecordStore: InMemoryMaintenanceRecordStore
//! - MaintenanceScheduleStore: InMemoryScheduleStore
//! - AssetIssueStore: InMemoryIssueStore

pub mod issue;
pub mod maintenance_record;
pub mod reference;
pub mod schedule;

pub use issue::*;
pub use maintenance_record::*;
pub use reference::*;
pub use schedule::*;

use crate::error::StorageError;
use crate::models::{
    AssetIssueRecord, AssetRecord, CategoryRecord, LicenseRecord, LocationRecord,
    MaintenanceRecord, MaintenanceScheduleRecord, MaintenanceTypeRecord, SubscriptionRecord,
    UserRecord, VendorRecord,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{RwLock, RwLockWriteGuard};

/// 带整数主键的记录。
pub(crate) trait Keyed {
    fn key(&self) -> i32;
}

macro_rules! keyed {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Keyed for $ty {
                fn key(&self) -> i32 {
                    self.id
                }
            }
        )*
    };
}

keyed!(
    AssetRecord,
    UserRecord,
    VendorRecord,
    LocationRecord,
    CategoryRecord,
    MaintenanceTypeRecord,
    LicenseRecord,
    SubscriptionRecord,
    MaintenanceRecord,
    MaintenanceScheduleRecord,
    AssetIssueRecord,
);

/// 内存表：`RwLock<HashMap>` + 自增主键。
///
/// 列表按主键升序返回。
pub(crate) struct RecordMap<T> {
    items: RwLock<HashMap<i32, T>>,
    next_id: AtomicI32,
}

impl<T: Keyed + Clone> RecordMap<T> {
    pub(crate) fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// 以已有记录初始化；新主键从最大主键之后开始。
    pub(crate) fn with_records(records: Vec<T>) -> Self {
        let next_id = records.iter().map(Keyed::key).max().unwrap_or(0) + 1;
        let items = records
            .into_iter()
            .map(|record| (record.key(), record))
            .collect();
        Self {
            items: RwLock::new(items),
            next_id: AtomicI32::new(next_id),
        }
    }

    pub(crate) fn get(&self, id: i32) -> Option<T> {
        self.items
            .read()
            .ok()
            .and_then(|map| map.get(&id).cloned())
    }

    pub(crate) fn list(&self) -> Vec<T> {
        let mut items: Vec<T> = self
            .items
            .read()
            .map(|map| map.values().cloned().collect())
            .unwrap_or_default();
        items.sort_by_key(Keyed::key);
        items
    }

    pub(crate) fn contains(&self, id: i32) -> bool {
        self.items
            .read()
            .map(|map| map.contains_key(&id))
            .unwrap_or(false)
    }

    pub(crate) fn allocate_id(&self) -> i32 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<i32, T>>, StorageError> {
        self.items
            .write()
            .map_err(|_| StorageError::poisoned("record map"))
    }
}
