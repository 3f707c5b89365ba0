//! Postgres 维护计划存储实现
//!
//! 完成推进以一条 update 同时写入 last_performed 与 next_due。

use crate::error::StorageError;
use crate::models::{
    MaintenanceScheduleCreate, MaintenanceScheduleRecord, MaintenanceScheduleUpdate,
};
use crate::traits::MaintenanceScheduleStore;
use chrono::NaiveDate;
use domain::Priority;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const COLUMNS: &str = "id, asset_id, maintenance_type_id, maintenance_type, frequency_days, \
                       last_performed, next_due, assigned_to, priority, estimated_cost, notes, \
                       is_active, created_at";

pub struct PgScheduleStore {
    pub pool: PgPool,
}

impl PgScheduleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn schedule_from_row(row: &PgRow) -> Result<MaintenanceScheduleRecord, StorageError> {
    let priority: Option<String> = row.try_get("priority")?;
    let priority = match priority {
        Some(value) => Some(
            Priority::parse(&value)
                .ok_or_else(|| StorageError::new(format!("invalid priority: {value}")))?,
        ),
        None => None,
    };
    Ok(MaintenanceScheduleRecord {
        id: row.try_get("id")?,
        asset_id: row.try_get("asset_id")?,
        maintenance_type_id: row.try_get("maintenance_type_id")?,
        maintenance_type: row.try_get("maintenance_type")?,
        frequency_days: row.try_get("frequency_days")?,
        last_performed: row.try_get("last_performed")?,
        next_due: row.try_get("next_due")?,
        assigned_to: row.try_get("assigned_to")?,
        priority,
        estimated_cost: row.try_get("estimated_cost")?,
        notes: row.try_get("notes")?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait::async_trait]
impl MaintenanceScheduleStore for PgScheduleStore {
    async fn create_schedule(
        &self,
        record: MaintenanceScheduleCreate,
    ) -> Result<MaintenanceScheduleRecord, StorageError> {
        let row = sqlx::query(&format!(
            "insert into maintenance_schedules \
             (asset_id, maintenance_type_id, maintenance_type, frequency_days, last_performed, \
              next_due, assigned_to, priority, estimated_cost, notes, is_active, created_at) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             returning {COLUMNS}"
        ))
        .bind(record.asset_id)
        .bind(record.maintenance_type_id)
        .bind(&record.maintenance_type)
        .bind(record.frequency_days)
        .bind(record.last_performed)
        .bind(record.next_due)
        .bind(record.assigned_to)
        .bind(record.priority.map(|p| p.as_str()))
        .bind(record.estimated_cost)
        .bind(&record.notes)
        .bind(record.is_active)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await?;
        schedule_from_row(&row)
    }

    async fn get_schedule(
        &self,
        id: i32,
    ) -> Result<Option<MaintenanceScheduleRecord>, StorageError> {
        let row = sqlx::query(&format!(
            "select {COLUMNS} from maintenance_schedules where id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(schedule_from_row(&row)?))
    }

    async fn list_schedules(&self) -> Result<Vec<MaintenanceScheduleRecord>, StorageError> {
        let rows = sqlx::query(&format!(
            "select {COLUMNS} from maintenance_schedules order by id"
        ))
        .fetch_all(&self.pool)
        .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(schedule_from_row(&row)?);
        }
        Ok(items)
    }

    async fn replace_schedule(
        &self,
        id: i32,
        update: MaintenanceScheduleUpdate,
    ) -> Result<Option<MaintenanceScheduleRecord>, StorageError> {
        let row = sqlx::query(&format!(
            "update maintenance_schedules set \
             maintenance_type_id = $1, maintenance_type = $2, frequency_days = $3, \
             last_performed = $4, next_due = $5, assigned_to = $6, priority = $7, \
             estimated_cost = $8, notes = $9, is_active = $10 \
             where id = $11 \
             returning {COLUMNS}"
        ))
        .bind(update.maintenance_type_id)
        .bind(&update.maintenance_type)
        .bind(update.frequency_days)
        .bind(update.last_performed)
        .bind(update.next_due)
        .bind(update.assigned_to)
        .bind(update.priority.map(|p| p.as_str()))
        .bind(update.estimated_cost)
        .bind(&update.notes)
        .bind(update.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(schedule_from_row(&row)?))
    }

    async fn record_completion(
        &self,
        id: i32,
        completed: NaiveDate,
        next_due: NaiveDate,
    ) -> Result<Option<MaintenanceScheduleRecord>, StorageError> {
        let row = sqlx::query(&format!(
            "update maintenance_schedules set last_performed = $1, next_due = $2 \
             where id = $3 \
             returning {COLUMNS}"
        ))
        .bind(completed)
        .bind(next_due)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(schedule_from_row(&row)?))
    }

    async fn deactivate_schedule(&self, id: i32) -> Result<bool, StorageError> {
        let result = sqlx::query("update maintenance_schedules set is_active = false where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_schedule(&self, id: i32) -> Result<bool, StorageError> {
        let result = sqlx::query("delete from maintenance_schedules where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
