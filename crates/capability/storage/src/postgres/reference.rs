//! Postgres 只读协作方存储实现
//!
//! 资产、用户、供应商、位置、分类、维护类型、许可证、订阅。
//! 列表查询按主键升序返回。

use crate::error::StorageError;
use crate::models::{
    AssetRecord, CategoryRecord, LicenseRecord, LocationRecord, MaintenanceTypeRecord,
    SubscriptionRecord, UserRecord, VendorRecord,
};
use crate::traits::{
    AssetStore, CategoryStore, LicenseStore, LocationStore, MaintenanceTypeStore,
    SubscriptionStore, UserStore, VendorStore,
};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

macro_rules! pg_read_only_store {
    (
        $(#[$meta:meta])*
        $store:ident, $record:ty, $trait:ident,
        $get:ident, $list:ident, $exists:ident,
        table = $table:literal, columns = $columns:literal, map = $map:path
    ) => {
        $(#[$meta])*
        pub struct $store {
            pub pool: PgPool,
        }

        impl $store {
            pub fn new(pool: PgPool) -> Self {
                Self { pool }
            }
        }

        #[async_trait::async_trait]
        impl $trait for $store {
            async fn $get(&self, id: i32) -> Result<Option<$record>, StorageError> {
                let row = sqlx::query(concat!(
                    "select ", $columns, " from ", $table, " where id = $1"
                ))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
                let Some(row) = row else {
                    return Ok(None);
                };
                Ok(Some($map(&row)?))
            }

            async fn $list(&self) -> Result<Vec<$record>, StorageError> {
                let rows = sqlx::query(concat!(
                    "select ", $columns, " from ", $table, " order by id"
                ))
                .fetch_all(&self.pool)
                .await?;
                let mut items = Vec::with_capacity(rows.len());
                for row in rows {
                    items.push($map(&row)?);
                }
                Ok(items)
            }

            async fn $exists(&self, id: i32) -> Result<bool, StorageError> {
                let row = sqlx::query(concat!(
                    "select exists(select 1 from ", $table, " where id = $1) as found"
                ))
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
                Ok(row.try_get("found")?)
            }
        }
    };
}

fn asset_from_row(row: &PgRow) -> Result<AssetRecord, StorageError> {
    Ok(AssetRecord {
        id: row.try_get("id")?,
        category_id: row.try_get("category_id")?,
        vendor_id: row.try_get("vendor_id")?,
        location_id: row.try_get("location_id")?,
        name: row.try_get("name")?,
        model: row.try_get("model")?,
        serial_number: row.try_get("serial_number")?,
        purchase_date: row.try_get("purchase_date")?,
        purchase_price: row.try_get("purchase_price")?,
        current_value: row.try_get("current_value")?,
        warranty_expiry: row.try_get("warranty_expiry")?,
        assigned_to: row.try_get("assigned_to")?,
        status: row.try_get("status")?,
    })
}

fn user_from_row(row: &PgRow) -> Result<UserRecord, StorageError> {
    Ok(UserRecord {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        role: row.try_get("role")?,
    })
}

fn vendor_from_row(row: &PgRow) -> Result<VendorRecord, StorageError> {
    Ok(VendorRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        contact_email: row.try_get("contact_email")?,
    })
}

fn location_from_row(row: &PgRow) -> Result<LocationRecord, StorageError> {
    Ok(LocationRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

fn category_from_row(row: &PgRow) -> Result<CategoryRecord, StorageError> {
    Ok(CategoryRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

fn maintenance_type_from_row(row: &PgRow) -> Result<MaintenanceTypeRecord, StorageError> {
    Ok(MaintenanceTypeRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

fn license_from_row(row: &PgRow) -> Result<LicenseRecord, StorageError> {
    Ok(LicenseRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        vendor_id: row.try_get("vendor_id")?,
        expiry_date: row.try_get("expiry_date")?,
        number_of_seats: row.try_get("number_of_seats")?,
        seats_used: row.try_get("seats_used")?,
        status: row.try_get("status")?,
    })
}

fn subscription_from_row(row: &PgRow) -> Result<SubscriptionRecord, StorageError> {
    Ok(SubscriptionRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        vendor_id: row.try_get("vendor_id")?,
        expiry_date: row.try_get("expiry_date")?,
        cost: row.try_get("cost")?,
        billing_cycle: row.try_get("billing_cycle")?,
        auto_renewal: row.try_get("auto_renewal")?,
        status: row.try_get("status")?,
    })
}

pg_read_only_store!(
    /// Postgres 资产存储
    PgAssetStore, AssetRecord, AssetStore,
    get_asset, list_assets, asset_exists,
    table = "assets",
    columns = "id, category_id, vendor_id, location_id, name, model, serial_number, \
               purchase_date, purchase_price, current_value, warranty_expiry, assigned_to, status",
    map = asset_from_row
);

pg_read_only_store!(
    /// Postgres 用户存储
    PgUserStore, UserRecord, UserStore,
    get_user, list_users, user_exists,
    table = "users",
    columns = "id, email, first_name, last_name, role",
    map = user_from_row
);

pg_read_only_store!(
    /// Postgres 供应商存储
    PgVendorStore, VendorRecord, VendorStore,
    get_vendor, list_vendors, vendor_exists,
    table = "vendors",
    columns = "id, name, contact_email",
    map = vendor_from_row
);

pg_read_only_store!(
    /// Postgres 位置存储
    PgLocationStore, LocationRecord, LocationStore,
    get_location, list_locations, location_exists,
    table = "locations",
    columns = "id, name",
    map = location_from_row
);

pg_read_only_store!(
    /// Postgres 资产分类存储
    PgCategoryStore, CategoryRecord, CategoryStore,
    get_category, list_categories, category_exists,
    table = "asset_categories",
    columns = "id, name",
    map = category_from_row
);

pg_read_only_store!(
    /// Postgres 维护类型存储
    PgMaintenanceTypeStore, MaintenanceTypeRecord, MaintenanceTypeStore,
    get_maintenance_type, list_maintenance_types, maintenance_type_exists,
    table = "maintenance_types",
    columns = "id, name",
    map = maintenance_type_from_row
);

pg_read_only_store!(
    /// Postgres 许可证存储
    PgLicenseStore, LicenseRecord, LicenseStore,
    get_license, list_licenses, license_exists,
    table = "software_licenses",
    columns = "id, name, vendor_id, expiry_date, number_of_seats, seats_used, status",
    map = license_from_row
);

pg_read_only_store!(
    /// Postgres 订阅存储
    PgSubscriptionStore, SubscriptionRecord, SubscriptionStore,
    get_subscription, list_subscriptions, subscription_exists,
    table = "subscriptions",
    columns = "id, name, vendor_id, expiry_date, cost, billing_cycle, auto_renewal, status",
    map = subscription_from_row
);
