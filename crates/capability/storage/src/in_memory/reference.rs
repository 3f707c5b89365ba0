//! 只读协作方的内存存储实现
//!
//! 资产、用户、供应商、位置、分类、维护类型、许可证、订阅。
//! 数据通过 `with_records` 一次性装载（快照或测试夹具）。

use super::RecordMap;
use crate::error::StorageError;
use crate::models::{
    AssetRecord, CategoryRecord, LicenseRecord, LocationRecord, MaintenanceTypeRecord,
    SubscriptionRecord, UserRecord, VendorRecord,
};
use crate::traits::{
    AssetStore, CategoryStore, LicenseStore, LocationStore, MaintenanceTypeStore,
    SubscriptionStore, UserStore, VendorStore,
};

macro_rules! read_only_store {
    (
        $(#[$meta:meta])*
        $store:ident, $record:ty, $trait:ident, $get:ident, $list:ident, $exists:ident
    ) => {
        $(#[$meta])*
        pub struct $store {
            records: RecordMap<$record>,
        }

        impl $store {
            pub fn new() -> Self {
                Self {
                    records: RecordMap::new(),
                }
            }

            pub fn with_records(records: Vec<$record>) -> Self {
                Self {
                    records: RecordMap::with_records(records),
                }
            }
        }

        impl Default for $store {
            fn default() -> Self {
                Self::new()
            }
        }

        #[async_trait::async_trait]
        impl $trait for $store {
            async fn $get(&self, id: i32) -> Result<Option<$record>, StorageError> {
                Ok(self.records.get(id))
            }

            async fn $list(&self) -> Result<Vec<$record>, StorageError> {
                Ok(self.records.list())
            }

            async fn $exists(&self, id: i32) -> Result<bool, StorageError> {
                Ok(self.records.contains(id))
            }
        }
    };
}

read_only_store!(
    /// 资产内存存储
    InMemoryAssetStore, AssetRecord, AssetStore, get_asset, list_assets, asset_exists
);

read_only_store!(
    /// 用户内存存储
    InMemoryUserStore, UserRecord, UserStore, get_user, list_users, user_exists
);

read_only_store!(
    /// 供应商内存存储
    InMemoryVendorStore, VendorRecord, VendorStore, get_vendor, list_vendors, vendor_exists
);

read_only_store!(
    /// 位置内存存储
    InMemoryLocationStore,
    LocationRecord,
    LocationStore,
    get_location,
    list_locations,
    location_exists
);

read_only_store!(
    /// 资产分类内存存储
    InMemoryCategoryStore,
    CategoryRecord,
    CategoryStore,
    get_category,
    list_categories,
    category_exists
);

read_only_store!(
    /// 维护类型内存存储
    InMemoryMaintenanceTypeStore,
    MaintenanceTypeRecord,
    MaintenanceTypeStore,
    get_maintenance_type,
    list_maintenance_types,
    maintenance_type_exists
);

read_only_store!(
    /// 许可证内存存储
    InMemoryLicenseStore,
    LicenseRecord,
    LicenseStore,
    get_license,
    list_licenses,
    license_exists
);

read_only_store!(
    /// 订阅内存存储
    InMemorySubscriptionStore,
    SubscriptionRecord,
    SubscriptionStore,
    get_subscription,
    list_subscriptions,
    subscription_exists
);
