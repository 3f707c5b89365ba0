//! 资产问题生命周期：创建（单条/批量）、指派、解决、整单更新与统计。
//!
//! 所有状态变更都通过存储层的状态比较交换写入：读取当前记录，按领域规则
//! 计算补丁，仅当状态未被并发修改时落库，否则返回 `Conflict`。

pub mod stats;
pub mod validation;

use api_contract::{
    AssetIssueDto, AssetIssueHistoryDto, AssignIssueRequest, BulkCreateAssetIssueRequest,
    CreateAssetIssueRequest, IssueStatsDto, ResolveIssueRequest, UpdateAssetIssueRequest,
    UserIssueStatsDto,
};
use domain::lifecycle::{status_after_assign, timestamps_after_resolve, timestamps_after_update};
use domain::{Clock, IssueStatus, ServiceError};
use itam_storage::{
    AssetIssueCreate, AssetIssuePatch, AssetIssueRecord, AssetIssueStore, AssetStore,
    StorageError, StoreSet, UserStore,
};
use itam_telemetry::{record_issue_transition, record_issues_created, record_transition_conflict};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};
use validation::{
    parse_date_time, parse_issue_type, parse_severity, parse_status, validate_create,
    validate_description, validate_id, validate_update,
};

/// 资产问题服务。
pub struct IssueService {
    issues: Arc<dyn AssetIssueStore>,
    assets: Arc<dyn AssetStore>,
    users: Arc<dyn UserStore>,
    clock: Arc<dyn Clock>,
}

#[derive(Default)]
struct Lookups {
    assets: HashMap<i32, (String, Option<String>)>,
    users: HashMap<i32, (Option<String>, String)>,
}

fn storage_error(err: StorageError) -> ServiceError {
    warn!(target: "itam.issues", error = %err, "storage_failed");
    ServiceError::Storage(err.to_string())
}

fn issue_not_found() -> ServiceError {
    ServiceError::not_found("Asset issue not found")
}

fn to_dto(record: AssetIssueRecord, lookups: &Lookups) -> AssetIssueDto {
    let asset = lookups.assets.get(&record.asset_id);
    let reporter = lookups.users.get(&record.reported_by);
    let assignee = record.assigned_to.and_then(|id| lookups.users.get(&id));
    AssetIssueDto {
        id: record.id,
        asset_id: record.asset_id,
        reported_by: record.reported_by,
        assigned_to: record.assigned_to,
        issue_type: record.issue_type.as_str().to_string(),
        severity: record.severity.as_str().to_string(),
        issue_description: record.issue_description,
        resolution_notes: record.resolution_notes,
        status: record.status.as_str().to_string(),
        reported_at: record.reported_at,
        resolved_at: record.resolved_at,
        closed_at: record.closed_at,
        asset_name: asset.map(|(name, _)| name.clone()),
        asset_serial_number: asset.and_then(|(_, serial)| serial.clone()),
        reported_by_name: reporter.and_then(|(name, _)| name.clone()),
        reported_by_email: reporter.map(|(_, email)| email.clone()),
        assigned_to_name: assignee.and_then(|(name, _)| name.clone()),
        assigned_to_email: assignee.map(|(_, email)| email.clone()),
    }
}

/// 按上报时间倒序（相同时间保持主键顺序）。
fn newest_first(records: &mut [AssetIssueRecord]) {
    records.sort_by(|a, b| b.reported_at.cmp(&a.reported_at));
}

impl IssueService {
    pub fn new(
        issues: Arc<dyn AssetIssueStore>,
        assets: Arc<dyn AssetStore>,
        users: Arc<dyn UserStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            issues,
            assets,
            users,
            clock,
        }
    }

    pub fn from_stores(stores: &StoreSet, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            stores.issues.clone(),
            stores.assets.clone(),
            stores.users.clone(),
            clock,
        )
    }

    pub async fn create(&self, request: CreateAssetIssueRequest) -> Result<AssetIssueDto, ServiceError> {
        let draft = validate_create(&request)?;
        self.ensure_asset(draft.asset_id).await?;
        self.ensure_user(draft.reported_by).await?;
        if let Some(assigned_to) = draft.assigned_to {
            self.ensure_user(assigned_to).await?;
        }

        let record = self
            .issues
            .create_issue(AssetIssueCreate {
                asset_id: draft.asset_id,
                reported_by: draft.reported_by,
                assigned_to: draft.assigned_to,
                issue_type: draft.issue_type,
                severity: draft.severity,
                issue_description: draft.issue_description,
                resolution_notes: draft.resolution_notes,
                status: draft.status,
                reported_at: self.clock.now(),
            })
            .await
            .map_err(storage_error)?;
        record_issues_created(1);
        info!(
            target: "itam.issues",
            issue_id = record.id,
            asset_id = record.asset_id,
            issue_type = %record.issue_type,
            severity = %record.severity,
            status = %record.status,
            "issue_created"
        );
        self.single_dto(record).await
    }

    /// 批量创建：任一资产校验失败则整批不写。
    pub async fn bulk_create(
        &self,
        request: BulkCreateAssetIssueRequest,
    ) -> Result<Vec<AssetIssueDto>, ServiceError> {
        validate_id(request.reported_by, "Reported By")?;
        let issue_type = parse_issue_type(&request.issue_type)?;
        let severity = parse_severity(&request.severity)?;
        let status = parse_status(&request.status)?;
        if let Some(assigned_to) = request.assigned_to {
            validate_id(assigned_to, "Assigned To")?;
        }
        validate_description(&request.issue_description)?;
        if request.asset_ids.is_empty() {
            return Err(ServiceError::validation("Asset IDs list cannot be empty"));
        }

        self.ensure_user(request.reported_by).await?;
        if let Some(assigned_to) = request.assigned_to {
            self.ensure_user(assigned_to).await?;
        }
        for asset_id in &request.asset_ids {
            validate_id(*asset_id, "Asset ID")?;
            self.ensure_asset(*asset_id).await?;
        }

        let reported_at = self.clock.now();
        let drafts: Vec<AssetIssueCreate> = request
            .asset_ids
            .iter()
            .map(|asset_id| AssetIssueCreate {
                asset_id: *asset_id,
                reported_by: request.reported_by,
                assigned_to: request.assigned_to,
                issue_type,
                severity,
                issue_description: request.issue_description.clone(),
                resolution_notes: request.resolution_notes.clone(),
                status,
                reported_at,
            })
            .collect();
        let records = self
            .issues
            .create_issues(drafts)
            .await
            .map_err(storage_error)?;
        record_issues_created(records.len() as u64);
        info!(
            target: "itam.issues",
            count = records.len(),
            reported_by = request.reported_by,
            issue_type = %issue_type,
            "issues_bulk_created"
        );

        let lookups = self.all_lookups().await?;
        Ok(records
            .into_iter()
            .map(|record| to_dto(record, &lookups))
            .collect())
    }

    pub async fn get(&self, id: i32) -> Result<AssetIssueDto, ServiceError> {
        validate_id(id, "Asset Issue ID")?;
        let record = self.load(id).await?;
        self.single_dto(record).await
    }

    pub async fn list(&self) -> Result<Vec<AssetIssueDto>, ServiceError> {
        self.list_where(|_| true).await
    }

    /// 整单更新；`RESOLVED` / `CLOSED` 触发时间戳副作用。
    pub async fn update(
        &self,
        id: i32,
        request: UpdateAssetIssueRequest,
    ) -> Result<AssetIssueDto, ServiceError> {
        validate_id(id, "Asset Issue ID")?;
        let draft = validate_update(&request)?;
        self.ensure_asset(draft.asset_id).await?;
        self.ensure_user(draft.reported_by).await?;
        if let Some(assigned_to) = draft.assigned_to {
            self.ensure_user(assigned_to).await?;
        }

        let current = self.load(id).await?;
        let mut patch = AssetIssuePatch {
            asset_id: draft.asset_id,
            reported_by: draft.reported_by,
            assigned_to: draft.assigned_to,
            issue_type: draft.issue_type,
            severity: draft.severity,
            issue_description: draft.issue_description,
            resolution_notes: draft.resolution_notes,
            status: draft.status,
            resolved_at: current.resolved_at,
            closed_at: current.closed_at,
        };
        patch.apply_timestamps(timestamps_after_update(
            draft.status,
            current.timestamps(),
            self.clock.now(),
        ));
        let record = self.transition(&current, patch).await?;
        info!(
            target: "itam.issues",
            issue_id = record.id,
            from = %current.status,
            to = %record.status,
            "issue_updated"
        );
        self.single_dto(record).await
    }

    /// 指派：仅 `OPEN` 自动推进为 `ASSIGNED`。
    pub async fn assign(
        &self,
        id: i32,
        request: AssignIssueRequest,
    ) -> Result<AssetIssueDto, ServiceError> {
        validate_id(id, "Asset Issue ID")?;
        validate_id(request.assigned_to, "Assigned To")?;
        self.ensure_user(request.assigned_to).await?;

        let current = self.load(id).await?;
        let mut patch = current.to_patch();
        patch.assigned_to = Some(request.assigned_to);
        patch.status = status_after_assign(current.status);
        let record = self.transition(&current, patch).await?;
        info!(
            target: "itam.issues",
            issue_id = record.id,
            assigned_to = request.assigned_to,
            from = %current.status,
            to = %record.status,
            "issue_assigned"
        );
        self.single_dto(record).await
    }

    /// 解决：无条件覆盖 `resolved_at`，目标为 `CLOSED` 时同时写入 `closed_at`。
    pub async fn resolve(
        &self,
        id: i32,
        request: ResolveIssueRequest,
    ) -> Result<AssetIssueDto, ServiceError> {
        validate_id(id, "Asset Issue ID")?;
        let target = parse_status(&request.status)?;
        if request.resolution_notes.trim().is_empty() {
            return Err(ServiceError::validation("Resolution notes cannot be empty"));
        }

        let current = self.load(id).await?;
        let mut patch = current.to_patch();
        patch.resolution_notes = Some(request.resolution_notes);
        patch.status = target;
        patch.apply_timestamps(timestamps_after_resolve(
            target,
            current.timestamps(),
            self.clock.now(),
        ));
        let record = self.transition(&current, patch).await?;
        info!(
            target: "itam.issues",
            issue_id = record.id,
            from = %current.status,
            to = %record.status,
            "issue_resolved"
        );
        self.single_dto(record).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        validate_id(id, "Asset Issue ID")?;
        let deleted = self.issues.delete_issue(id).await.map_err(storage_error)?;
        if !deleted {
            return Err(issue_not_found());
        }
        info!(target: "itam.issues", issue_id = id, "issue_deleted");
        Ok(())
    }

    /// 删除资产下全部问题，返回删除条数。
    pub async fn delete_by_asset(&self, asset_id: i32) -> Result<u64, ServiceError> {
        validate_id(asset_id, "Asset ID")?;
        self.ensure_asset(asset_id).await?;
        let deleted = self
            .issues
            .delete_issues_by_asset(asset_id)
            .await
            .map_err(storage_error)?;
        info!(
            target: "itam.issues",
            asset_id,
            deleted,
            "issues_deleted_for_asset"
        );
        Ok(deleted)
    }

    pub async fn by_asset(&self, asset_id: i32) -> Result<Vec<AssetIssueDto>, ServiceError> {
        validate_id(asset_id, "Asset ID")?;
        self.ensure_asset(asset_id).await?;
        self.list_where(|record| record.asset_id == asset_id).await
    }

    pub async fn by_reporter(&self, user_id: i32) -> Result<Vec<AssetIssueDto>, ServiceError> {
        validate_id(user_id, "Reported By")?;
        self.ensure_user(user_id).await?;
        self.list_where(|record| record.reported_by == user_id).await
    }

    pub async fn by_assignee(&self, user_id: i32) -> Result<Vec<AssetIssueDto>, ServiceError> {
        validate_id(user_id, "Assigned To")?;
        self.ensure_user(user_id).await?;
        self.list_where(|record| record.assigned_to == Some(user_id))
            .await
    }

    pub async fn by_type(&self, issue_type: &str) -> Result<Vec<AssetIssueDto>, ServiceError> {
        let issue_type = parse_issue_type(issue_type)?;
        self.list_where(|record| record.issue_type == issue_type)
            .await
    }

    pub async fn by_severity(&self, severity: &str) -> Result<Vec<AssetIssueDto>, ServiceError> {
        let severity = parse_severity(severity)?;
        self.list_where(|record| record.severity == severity).await
    }

    pub async fn by_status(&self, status: &str) -> Result<Vec<AssetIssueDto>, ServiceError> {
        let status = parse_status(status)?;
        self.list_where(|record| record.status == status).await
    }

    /// 上报时间落在 `[start, end]` 内（两端包含）。
    pub async fn by_date_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<AssetIssueDto>, ServiceError> {
        let start = parse_date_time(start, "Start Date")?;
        let end = parse_date_time(end, "End Date")?;
        if start > end {
            return Err(ServiceError::validation(
                "Start date cannot be after end date",
            ));
        }
        self.list_where(|record| record.reported_at >= start && record.reported_at <= end)
            .await
    }

    pub async fn history(&self, asset_id: i32) -> Result<AssetIssueHistoryDto, ServiceError> {
        validate_id(asset_id, "Asset ID")?;
        let asset = self
            .assets
            .get_asset(asset_id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| ServiceError::not_found("Asset not found"))?;
        let mut records: Vec<AssetIssueRecord> = self
            .issues
            .list_issues()
            .await
            .map_err(storage_error)?
            .into_iter()
            .filter(|record| record.asset_id == asset_id)
            .collect();
        if records.is_empty() {
            return Err(ServiceError::not_found(
                "No issue history found for this asset",
            ));
        }
        newest_first(&mut records);

        let count = |status: IssueStatus| records.iter().filter(|r| r.status == status).count();
        let open_issues = records.iter().filter(|r| r.status.is_pending()).count();
        let resolved_issues = count(IssueStatus::Resolved);
        let closed_issues = count(IssueStatus::Closed);
        let last_issue_date = records.first().map(|record| record.reported_at);
        let total_issues = records.len();
        let lookups = self.all_lookups().await?;

        Ok(AssetIssueHistoryDto {
            asset_id,
            asset_name: asset.name,
            asset_serial_number: asset.serial_number,
            total_issues,
            open_issues,
            resolved_issues,
            closed_issues,
            last_issue_date,
            issues: records
                .into_iter()
                .map(|record| to_dto(record, &lookups))
                .collect(),
        })
    }

    pub async fn user_stats(&self, user_id: i32) -> Result<UserIssueStatsDto, ServiceError> {
        validate_id(user_id, "User ID")?;
        let user = self
            .users
            .get_user(user_id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| ServiceError::not_found("User not found"))?;
        let records = self.issues.list_issues().await.map_err(storage_error)?;
        Ok(stats::user_stats(&user, &records))
    }

    pub async fn issue_stats(&self) -> Result<IssueStatsDto, ServiceError> {
        let records = self.issues.list_issues().await.map_err(storage_error)?;
        Ok(stats::issue_stats(&records, self.clock.now()))
    }

    /// 状态比较交换；并发修改时返回 `Conflict`，记录消失时返回 `NotFound`。
    async fn transition(
        &self,
        current: &AssetIssueRecord,
        patch: AssetIssuePatch,
    ) -> Result<AssetIssueRecord, ServiceError> {
        let target = patch.status;
        let applied = self
            .issues
            .transition_issue(current.id, current.status, patch)
            .await
            .map_err(storage_error)?;
        if let Some(record) = applied {
            record_issue_transition();
            return Ok(record);
        }

        let still_exists = self
            .issues
            .get_issue(current.id)
            .await
            .map_err(storage_error)?
            .is_some();
        if !still_exists {
            return Err(issue_not_found());
        }
        record_transition_conflict();
        warn!(
            target: "itam.issues",
            issue_id = current.id,
            expected = %current.status,
            requested = %target,
            "issue_transition_conflict"
        );
        Err(ServiceError::Conflict(format!(
            "Asset issue {} was modified concurrently",
            current.id
        )))
    }

    async fn load(&self, id: i32) -> Result<AssetIssueRecord, ServiceError> {
        self.issues
            .get_issue(id)
            .await
            .map_err(storage_error)?
            .ok_or_else(issue_not_found)
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

    async fn ensure_user(&self, user_id: i32) -> Result<(), ServiceError> {
        let exists = self
            .users
            .user_exists(user_id)
            .await
            .map_err(storage_error)?;
        if !exists {
            return Err(ServiceError::not_found("User not found"));
        }
        Ok(())
    }

    async fn list_where<F>(&self, predicate: F) -> Result<Vec<AssetIssueDto>, ServiceError>
    where
        F: Fn(&AssetIssueRecord) -> bool,
    {
        let mut records: Vec<AssetIssueRecord> = self
            .issues
            .list_issues()
            .await
            .map_err(storage_error)?
            .into_iter()
            .filter(|record| predicate(record))
            .collect();
        if records.is_empty() {
            return Ok(Vec::new());
        }
        newest_first(&mut records);
        let lookups = self.all_lookups().await?;
        Ok(records
            .into_iter()
            .map(|record| to_dto(record, &lookups))
            .collect())
    }

    async fn all_lookups(&self) -> Result<Lookups, ServiceError> {
        let assets = self.assets.list_assets().await.map_err(storage_error)?;
        let users = self.users.list_users().await.map_err(storage_error)?;
        Ok(Lookups {
            assets: assets
                .into_iter()
                .map(|asset| (asset.id, (asset.name, asset.serial_number)))
                .collect(),
            users: users
                .into_iter()
                .map(|user| (user.id, (user.display_name(), user.email)))
                .collect(),
        })
    }

    async fn single_dto(&self, record: AssetIssueRecord) -> Result<AssetIssueDto, ServiceError> {
        let mut lookups = Lookups::default();
        if let Some(asset) = self
            .assets
            .get_asset(record.asset_id)
            .await
            .map_err(storage_error)?
        {
            lookups
                .assets
                .insert(asset.id, (asset.name, asset.serial_number));
        }
        let user_ids = [Some(record.reported_by), record.assigned_to];
        for user_id in user_ids.into_iter().flatten() {
            if let Some(user) = self.users.get_user(user_id).await.map_err(storage_error)? {
                let name = user.display_name();
                lookups.users.insert(user.id, (name, user.email));
            }
        }
        Ok(to_dto(record, &lookups))
    }
}
