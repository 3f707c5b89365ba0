//! 维护计划内存存储实现
//!
//! 功能：
//! - 计划创建、整单替换、删除
//! - 完成推进（单次写入 last_performed + next_due）
//! - 停用

use super::RecordMap;
use crate::error::StorageError;
use crate::models::{
    MaintenanceScheduleCreate, MaintenanceScheduleRecord, MaintenanceScheduleUpdate,
};
use crate::traits::MaintenanceScheduleStore;
use chrono::NaiveDate;

/// 维护计划内存存储
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储。
pub struct InMemoryScheduleStore {
    schedules: RecordMap<MaintenanceScheduleRecord>,
}

impl InMemoryScheduleStore {
    /// 创建新的维护计划存储
    pub fn new() -> Self {
        Self {
            schedules: RecordMap::new(),
        }
    }

    pub fn with_records(records: Vec<MaintenanceScheduleRecord>) -> Self {
        Self {
            schedules: RecordMap::with_records(records),
        }
    }
}

impl Default for InMemoryScheduleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MaintenanceScheduleStore for InMemoryScheduleStore {
    async fn create_schedule(
        &self,
        record: MaintenanceScheduleCreate,
    ) -> Result<MaintenanceScheduleRecord, StorageError> {
        let mut map = self.schedules.write()?;
        let created = MaintenanceScheduleRecord {
            id: self.schedules.allocate_id(),
            asset_id: record.asset_id,
            maintenance_type_id: record.maintenance_type_id,
            maintenance_type: record.maintenance_type,
            frequency_days: record.frequency_days,
            last_performed: record.last_performed,
            next_due: record.next_due,
            assigned_to: record.assigned_to,
            priority: record.priority,
            estimated_cost: record.estimated_cost,
            notes: record.notes,
            is_active: record.is_active,
            created_at: record.created_at,
        };
        map.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_schedule(
        &self,
        id: i32,
    ) -> Result<Option<MaintenanceScheduleRecord>, StorageError> {
        Ok(self.schedules.get(id))
    }

    async fn list_schedules(&self) -> Result<Vec<MaintenanceScheduleRecord>, StorageError> {
        Ok(self.schedules.list())
    }

    async fn replace_schedule(
        &self,
        id: i32,
        update: MaintenanceScheduleUpdate,
    ) -> Result<Option<MaintenanceScheduleRecord>, StorageError> {
        let mut map = self.schedules.write()?;
        let schedule = match map.get_mut(&id) {
            Some(schedule) => schedule,
            None => return Ok(None),
        };
        schedule.maintenance_type_id = update.maintenance_type_id;
        schedule.maintenance_type = update.maintenance_type;
        schedule.frequency_days = update.frequency_days;
        schedule.last_performed = update.last_performed;
        schedule.next_due = update.next_due;
        schedule.assigned_to = update.assigned_to;
        schedule.priority = update.priority;
        schedule.estimated_cost = update.estimated_cost;
        schedule.notes = update.notes;
        schedule.is_active = update.is_active;
        Ok(Some(schedule.clone()))
    }

    async fn record_completion(
        &self,
        id: i32,
        completed: NaiveDate,
        next_due: NaiveDate,
    ) -> Result<Option<MaintenanceScheduleRecord>, StorageError> {
        let mut map = self.schedules.write()?;
        let schedule = match map.get_mut(&id) {
            Some(schedule) => schedule,
            None => return Ok(None),
        };
        schedule.last_performed = Some(completed);
        schedule.next_due = next_due;
        Ok(Some(schedule.clone()))
    }

    async fn deactivate_schedule(&self, id: i32) -> Result<bool, StorageError> {
        let mut map = self.schedules.write()?;
        match map.get_mut(&id) {
            Some(schedule) => {
                schedule.is_active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_schedule(&self, id: i32) -> Result<bool, StorageError> {
        let mut map = self.schedules.write()?;
        Ok(map.remove(&id).is_some())
    }
}
