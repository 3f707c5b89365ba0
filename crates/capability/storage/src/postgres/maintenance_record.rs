//! Postgres 维护事实存储实现

use crate::error::StorageError;
use crate::models::{MaintenanceRecord, MaintenanceRecordCreate};
use crate::traits::MaintenanceRecordStore;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const COLUMNS: &str = "id, asset_id, schedule_id, performed_by, maintenance_type, performed_date, \
                       duration_hours, cost, description, status, created_at";

pub struct PgMaintenanceRecordStore {
    pub pool: PgPool,
}

impl PgMaintenanceRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn record_from_row(row: &PgRow) -> Result<MaintenanceRecord, StorageError> {
    Ok(MaintenanceRecord {
        id: row.try_get("id")?,
        asset_id: row.try_get("asset_id")?,
        schedule_id: row.try_get("schedule_id")?,
        performed_by: row.try_get("performed_by")?,
        maintenance_type: row.try_get("maintenance_type")?,
        performed_date: row.try_get("performed_date")?,
        duration_hours: row.try_get("duration_hours")?,
        cost: row.try_get("cost")?,
        description: row.try_get("description")?,
        status: row.try_get("status")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait::async_trait]
impl MaintenanceRecordStore for PgMaintenanceRecordStore {
    async fn list_maintenance_records(&self) -> Result<Vec<MaintenanceRecord>, StorageError> {
        let rows = sqlx::query(&format!(
            "select {COLUMNS} from maintenance_records order by id"
        ))
        .fetch_all(&self.pool)
        .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(record_from_row(&row)?);
        }
        Ok(items)
    }

    async fn create_maintenance_record(
        &self,
        record: MaintenanceRecordCreate,
    ) -> Result<MaintenanceRecord, StorageError> {
        let row = sqlx::query(&format!(
            "insert into maintenance_records \
             (asset_id, schedule_id, performed_by, maintenance_type, performed_date, \
              duration_hours, cost, description, status, created_at) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             returning {COLUMNS}"
        ))
        .bind(record.asset_id)
        .bind(record.schedule_id)
        .bind(record.performed_by)
        .bind(&record.maintenance_type)
        .bind(record.performed_date)
        .bind(record.duration_hours)
        .bind(record.cost)
        .bind(&record.description)
        .bind(&record.status)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await?;
        record_from_row(&row)
    }
}
