//! 维护计划管理：创建、查询、完成推进、停用与删除。
//!
//! 到期判断统一经由注入的 `Clock`；列表默认按 `next_due` 升序。

pub mod validation;

use api_contract::{
    CompleteMaintenanceRequest, CreateMaintenanceScheduleRequest, MaintenanceScheduleDto, MaintenanceScheduleSummaryDto,
    UpdateMaintenanceScheduleRequest,
};
use chrono::NaiveDate;
use domain::recurrence::{
    advance, days_until_due, is_due_between, is_due_this_week, is_due_today, is_overdue,
};
use domain::{Clock, ServiceError};
use itam_storage::{
    AssetStore, MaintenanceScheduleCreate, MaintenanceScheduleRecord, MaintenanceScheduleStore,
    MaintenanceTypeStore, StorageError, StoreSet, UserStore,
};
use itam_telemetry::{record_schedule_completed, record_schedule_created};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};
use validation::{parse_date, parse_priority, validate_create, validate_id, validate_update};

/// 维护计划服务。
pub struct MaintenanceScheduleService {
    schedules: Arc<dyn MaintenanceScheduleStore>,
    assets: Arc<dyn AssetStore>,
    users: Arc<dyn UserStore>,
    maintenance_types: Arc<dyn MaintenanceTypeStore>,
    clock: Arc<dyn Clock>,
}

/// 关联名称查找表。
#[derive(Default)]
struct Lookups {
    assets: HashMap<i32, String>,
    types: HashMap<i32, String>,
    users: HashMap<i32, Option<String>>,
}

fn storage_error(err: StorageError) -> ServiceError {
    warn!(target: "itam.scheduling", error = %err, "storage_failed");
    ServiceError::Storage(err.to_string())
}

fn to_dto(
    record: MaintenanceScheduleRecord,
    lookups: &Lookups,
    today: NaiveDate,
) -> MaintenanceScheduleDto {
    MaintenanceScheduleDto {
        id: record.id,
        asset_id: record.asset_id,
        asset_name: lookups.assets.get(&record.asset_id).cloned(),
        maintenance_type_id: record.maintenance_type_id,
        maintenance_type: record.maintenance_type,
        maintenance_type_name: record
            .maintenance_type_id
            .and_then(|id| lookups.types.get(&id).cloned()),
        frequency_days: record.frequency_days,
        last_performed: record.last_performed,
        next_due: record.next_due,
        assigned_to: record.assigned_to,
        assigned_to_name: record
            .assigned_to
            .and_then(|id| lookups.users.get(&id).cloned().flatten()),
        priority: record.priority.map(|priority| priority.as_str().to_string()),
        estimated_cost: record.estimated_cost.map(|cost| cost.to_string()),
        notes: record.notes,
        is_active: record.is_active,
        created_at: record.created_at,
        is_overdue: is_overdue(record.next_due, today),
        days_until_due: days_until_due(record.next_due, today),
    }
}

impl MaintenanceScheduleService {
    pub fn new(
        schedules: Arc<dyn MaintenanceScheduleStore>,
        assets: Arc<dyn AssetStore>,
        users: Arc<dyn UserStore>,
        maintenance_types: Arc<dyn MaintenanceTypeStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            schedules,
            assets,
            users,
            maintenance_types,
            clock,
        }
    }

    pub fn from_stores(stores: &StoreSet, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            stores.schedules.clone(),
            stores.assets.clone(),
            stores.users.clone(),
            stores.maintenance_types.clone(),
            clock,
        )
    }

    pub async fn create(
        &self,
        request: CreateMaintenanceScheduleRequest,
    ) -> Result<MaintenanceScheduleDto, ServiceError> {
        let (asset_id, fields) = validate_create(&request)?;
        self.ensure_asset(asset_id).await?;
        self.ensure_references(fields.maintenance_type_id, fields.assigned_to)
            .await?;

        let record = self
            .schedules
            .create_schedule(MaintenanceScheduleCreate {
                asset_id,
                maintenance_type_id: fields.maintenance_type_id,
                maintenance_type: fields.maintenance_type,
                frequency_days: fields.frequency_days,
                last_performed: fields.last_performed,
                next_due: fields.next_due,
                assigned_to: fields.assigned_to,
                priority: fields.priority,
                estimated_cost: fields.estimated_cost,
                notes: fields.notes,
                is_active: fields.is_active,
                created_at: self.clock.now(),
            })
            .await
            .map_err(storage_error)?;
        record_schedule_created();
        info!(
            target: "itam.scheduling",
            schedule_id = record.id,
            asset_id = record.asset_id,
            frequency_days = record.frequency_days,
            next_due = %record.next_due,
            "schedule_created"
        );
        self.single_dto(record).await
    }

    pub async fn get(&self, id: i32) -> Result<MaintenanceScheduleDto, ServiceError> {
        validate_id(id, "Schedule ID")?;
        let record = self.load(id).await?;
        self.single_dto(record).await
    }

    pub async fn list_all(&self) -> Result<Vec<MaintenanceScheduleDto>, ServiceError> {
        self.list_where(|_, _| true).await
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdateMaintenanceScheduleRequest,
    ) -> Result<MaintenanceScheduleDto, ServiceError> {
        validate_id(id, "Schedule ID")?;
        let update = validate_update(&request)?;
        self.ensure_references(update.maintenance_type_id, update.assigned_to)
            .await?;
        let record = self
            .schedules
            .replace_schedule(id, update)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| ServiceError::not_found("Maintenance schedule not found"))?;
        info!(
            target: "itam.scheduling",
            schedule_id = record.id,
            next_due = %record.next_due,
            is_active = record.is_active,
            "schedule_updated"
        );
        self.single_dto(record).await
    }

    /// 完成一次维护：`next_due = completed + frequency_days`。
    pub async fn complete(
        &self,
        id: i32,
        request: &CompleteMaintenanceRequest,
    ) -> Result<MaintenanceScheduleDto, ServiceError> {
        validate_id(id, "Schedule ID")?;
        let schedule = self.load(id).await?;
        let completed = parse_date(&request.completed_date, "Completed date")?;
        let next_due = advance(completed, schedule.frequency_days)
            .ok_or_else(|| ServiceError::validation("Completed date is out of range"))?;
        let record = self
            .schedules
            .record_completion(id, completed, next_due)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| ServiceError::not_found("Maintenance schedule not found"))?;
        record_schedule_completed();
        info!(
            target: "itam.scheduling",
            schedule_id = record.id,
            completed = %completed,
            previous_due = %schedule.next_due,
            next_due = %record.next_due,
            "schedule_completed"
        );
        self.single_dto(record).await
    }

    pub async fn deactivate(&self, id: i32) -> Result<MaintenanceScheduleDto, ServiceError> {
        validate_id(id, "Schedule ID")?;
        let updated = self
            .schedules
            .deactivate_schedule(id)
            .await
            .map_err(storage_error)?;
        if !updated {
            return Err(ServiceError::not_found("Maintenance schedule not found"));
        }
        info!(target: "itam.scheduling", schedule_id = id, "schedule_deactivated");
        self.get(id).await
    }

    /// 硬删除；引用该计划的维护记录保留原指针。
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        validate_id(id, "Schedule ID")?;
        let deleted = self
            .schedules
            .delete_schedule(id)
            .await
            .map_err(storage_error)?;
        if !deleted {
            return Err(ServiceError::not_found("Maintenance schedule not found"));
        }
        info!(target: "itam.scheduling", schedule_id = id, "schedule_deleted");
        Ok(())
    }

    pub async fn by_asset(&self, asset_id: i32) -> Result<Vec<MaintenanceScheduleDto>, ServiceError> {
        validate_id(asset_id, "Asset ID")?;
        self.ensure_asset(asset_id).await?;
        self.list_where(|record, _| record.asset_id == asset_id)
            .await
    }

    pub async fn by_assigned_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<MaintenanceScheduleDto>, ServiceError> {
        validate_id(user_id, "User ID")?;
        let exists = self
            .users
            .user_exists(user_id)
            .await
            .map_err(storage_error)?;
        if !exists {
            return Err(ServiceError::not_found("User not found"));
        }
        self.list_where(|record, _| record.assigned_to == Some(user_id))
            .await
    }

    pub async fn by_priority(
        &self,
        priority: &str,
    ) -> Result<Vec<MaintenanceScheduleDto>, ServiceError> {
        let priority = parse_priority(priority)?;
        self.list_where(|record, _| record.priority == Some(priority))
            .await
    }

    pub async fn active(&self) -> Result<Vec<MaintenanceScheduleDto>, ServiceError> {
        self.list_where(|record, _| record.is_active).await
    }

    pub async fn overdue(&self) -> Result<Vec<MaintenanceScheduleDto>, ServiceError> {
        self.list_where(|record, today| record.is_active && is_overdue(record.next_due, today))
            .await
    }

    pub async fn due_today(&self) -> Result<Vec<MaintenanceScheduleDto>, ServiceError> {
        self.list_where(|record, today| record.is_active && is_due_today(record.next_due, today))
            .await
    }

    pub async fn due_this_week(&self) -> Result<Vec<MaintenanceScheduleDto>, ServiceError> {
        self.list_where(|record, today| {
            record.is_active && is_due_this_week(record.next_due, today)
        })
        .await
    }

    /// 闭区间 `[start, end]` 内到期的活动计划。
    pub async fn due_in_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<MaintenanceScheduleDto>, ServiceError> {
        let start = parse_date(start, "Start date")?;
        let end = parse_date(end, "End date")?;
        if start > end {
            return Err(ServiceError::validation(
                "Start date must be before end date",
            ));
        }
        self.list_where(|record, _| record.is_active && is_due_between(record.next_due, start, end))
            .await
    }

    pub async fn summary(&self) -> Result<MaintenanceScheduleSummaryDto, ServiceError> {
        let today = self.clock.today();
        let records = self.schedules.list_schedules().await.map_err(storage_error)?;
        let active: Vec<&MaintenanceScheduleRecord> =
            records.iter().filter(|record| record.is_active).collect();
        let costs: Vec<Decimal> = active
            .iter()
            .filter_map(|record| record.estimated_cost)
            .collect();
        let total_estimated_cost = if costs.is_empty() {
            None
        } else {
            Some(costs.iter().sum::<Decimal>().to_string())
        };

        Ok(MaintenanceScheduleSummaryDto {
            total_schedules: records.len(),
            active_schedules: active.len(),
            overdue_schedules: active
                .iter()
                .filter(|record| is_overdue(record.next_due, today))
                .count(),
            due_today_schedules: active
                .iter()
                .filter(|record| is_due_today(record.next_due, today))
                .count(),
            due_this_week_schedules: active
                .iter()
                .filter(|record| is_due_this_week(record.next_due, today))
                .count(),
            total_estimated_cost,
        })
    }

    async fn load(&self, id: i32) -> Result<MaintenanceScheduleRecord, ServiceError> {
        self.schedules
            .get_schedule(id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| ServiceError::not_found("Maintenance schedule not found"))
    }

    async fn ensure_asset(&self, asset_id: i32) -> Result<(), ServiceError> {
        let exists = self
            .assets
            .asset_exists(asset_id)
            .await
            .map_err(storage_error)?;
        if !exists {
            return Err(ServiceError::not_found("Asset not found"));
        }
        Ok(())
    }

    async fn ensure_references(
        &self,
        maintenance_type_id: Option<i32>,
        assigned_to: Option<i32>,
    ) -> Result<(), ServiceError> {
        if let Some(type_id) = maintenance_type_id {
            let exists = self
                .maintenance_types
                .maintenance_type_exists(type_id)
                .await
                .map_err(storage_error)?;
            if !exists {
                return Err(ServiceError::not_found("Maintenance type not found"));
            }
        }
        if let Some(user_id) = assigned_to {
            let exists = self
                .users
                .user_exists(user_id)
                .await
                .map_err(storage_error)?;
            if !exists {
                return Err(ServiceError::not_found("Assigned user not found"));
            }
        }
        Ok(())
    }

    async fn list_where<F>(&self, predicate: F) -> Result<Vec<MaintenanceScheduleDto>, ServiceError>
    where
        F: Fn(&MaintenanceScheduleRecord, NaiveDate) -> bool,
    {
        let today = self.clock.today();
        let mut records: Vec<MaintenanceScheduleRecord> = self
            .schedules
            .list_schedules()
            .await
            .map_err(storage_error)?
            .into_iter()
            .filter(|record| predicate(record, today))
            .collect();
        records.sort_by_key(|record| record.next_due);
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let lookups = self.all_lookups().await?;
        Ok(records
            .into_iter()
            .map(|record| to_dto(record, &lookups, today))
            .collect())
    }

    async fn all_lookups(&self) -> Result<Lookups, ServiceError> {
        let assets = self.assets.list_assets().await.map_err(storage_error)?;
        let types = self
            .maintenance_types
            .list_maintenance_types()
            .await
            .map_err(storage_error)?;
        let users = self.users.list_users().await.map_err(storage_error)?;
        Ok(Lookups {
            assets: assets.into_iter().map(|a| (a.id, a.name)).collect(),
            types: types.into_iter().map(|t| (t.id, t.name)).collect(),
            users: users
                .into_iter()
                .map(|user| (user.id, user.display_name()))
                .collect(),
        })
    }

    async fn single_dto(
        &self,
        record: MaintenanceScheduleRecord,
    ) -> Result<MaintenanceScheduleDto, ServiceError> {
        let mut lookups = Lookups::default();
        if let Some(asset) = self
            .assets
            .get_asset(record.asset_id)
            .await
            .map_err(storage_error)?
        {
            lookups.assets.insert(asset.id, asset.name);
        }
        if let Some(type_id) = record.maintenance_type_id
            && let Some(kind) = self
                .maintenance_types
                .get_maintenance_type(type_id)
                .await
                .map_err(storage_error)?
        {
            lookups.types.insert(kind.id, kind.name);
        }
        if let Some(user_id) = record.assigned_to
            && let Some(user) = self.users.get_user(user_id).await.map_err(storage_error)?
        {
            lookups.users.insert(user.id, user.display_name());
        }
        Ok(to_dto(record, &lookups, self.clock.today()))
    }
}
