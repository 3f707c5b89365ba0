//! 维护事实内存存储实现

use super::RecordMap;
use crate::error::StorageError;
use crate::models::{MaintenanceRecord, MaintenanceRecordCreate};
use crate::traits::MaintenanceRecordStore;

/// 维护事实内存存储（只追加）
pub struct InMemoryMaintenanceRecordStore {
    records: RecordMap<MaintenanceRecord>,
}

impl InMemoryMaintenanceRecordStore {
    pub fn new() -> Self {
        Self {
            records: RecordMap::new(),
        }
    }

    pub fn with_records(records: Vec<MaintenanceRecord>) -> Self {
        Self {
            records: RecordMap::with_records(records),
        }
    }
}

impl Default for InMemoryMaintenanceRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MaintenanceRecordStore for InMemoryMaintenanceRecordStore {
    async fn list_maintenance_records(&self) -> Result<Vec<MaintenanceRecord>, StorageError> {
        Ok(self.records.list())
    }

    async fn create_maintenance_record(
        &self,
        record: MaintenanceRecordCreate,
    ) -> Result<MaintenanceRecord, StorageError> {
        let mut map = self.records.write()?;
        let created = MaintenanceRecord {
            id: self.records.allocate_id(),
            asset_id: record.asset_id,
            schedule_id: record.schedule_id,
            performed_by: record.performed_by,
            maintenance_type: record.maintenance_type,
            performed_date: record.performed_date,
            duration_hours: record.duration_hours,
            cost: record.cost,
            description: record.description,
            status: record.status,
            created_at: record.created_at,
        };
        map.insert(created.id, created.clone());
        Ok(created)
    }
}
