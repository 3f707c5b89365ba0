//! 资产问题内存存储实现
//!
//! 状态比较交换在同一把写锁内完成读取与写入。

use super::RecordMap;
use crate::error::StorageError;
use crate::models::{AssetIssueCreate, AssetIssuePatch, AssetIssueRecord};
use crate::traits::AssetIssueStore;
use domain::IssueStatus;

/// 资产问题内存存储
pub struct InMemoryIssueStore {
    issues: RecordMap<AssetIssueRecord>,
}

impl InMemoryIssueStore {
    pub fn new() -> Self {
        Self {
            issues: RecordMap::new(),
        }
    }

    pub fn with_records(records: Vec<AssetIssueRecord>) -> Self {
        Self {
            issues: RecordMap::with_records(records),
        }
    }

    fn build(&self, record: AssetIssueCreate) -> AssetIssueRecord {
        AssetIssueRecord {
            id: self.issues.allocate_id(),
            asset_id: record.asset_id,
            reported_by: record.reported_by,
            assigned_to: record.assigned_to,
            issue_type: record.issue_type,
            severity: record.severity,
            issue_description: record.issue_description,
            resolution_notes: record.resolution_notes,
            status: record.status,
            reported_at: record.reported_at,
            resolved_at: None,
            closed_at: None,
        }
    }
}

impl Default for InMemoryIssueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AssetIssueStore for InMemoryIssueStore {
    async fn create_issue(
        &self,
        record: AssetIssueCreate,
    ) -> Result<AssetIssueRecord, StorageError> {
        let mut map = self.issues.write()?;
        let created = self.build(record);
        map.insert(created.id, created.clone());
        Ok(created)
    }

    async fn create_issues(
        &self,
        records: Vec<AssetIssueCreate>,
    ) -> Result<Vec<AssetIssueRecord>, StorageError> {
        // 持有写锁期间整批写入
        let mut map = self.issues.write()?;
        let created: Vec<AssetIssueRecord> =
            records.into_iter().map(|record| self.build(record)).collect();
        for issue in &created {
            map.insert(issue.id, issue.clone());
        }
        Ok(created)
    }

    async fn get_issue(&self, id: i32) -> Result<Option<AssetIssueRecord>, StorageError> {
        Ok(self.issues.get(id))
    }

    async fn list_issues(&self) -> Result<Vec<AssetIssueRecord>, StorageError> {
        Ok(self.issues.list())
    }

    async fn transition_issue(
        &self,
        id: i32,
        expected: IssueStatus,
        patch: AssetIssuePatch,
    ) -> Result<Option<AssetIssueRecord>, StorageError> {
        let mut map = self.issues.write()?;
        let issue = match map.get_mut(&id) {
            Some(issue) => issue,
            None => return Ok(None),
        };
        if issue.status != expected {
            return Ok(None);
        }
        issue.asset_id = patch.asset_id;
        issue.reported_by = patch.reported_by;
        issue.assigned_to = patch.assigned_to;
        issue.issue_type = patch.issue_type;
        issue.severity = patch.severity;
        issue.issue_description = patch.issue_description;
        issue.resolution_notes = patch.resolution_notes;
        issue.status = patch.status;
        issue.resolved_at = patch.resolved_at;
        issue.closed_at = patch.closed_at;
        Ok(Some(issue.clone()))
    }

    async fn delete_issue(&self, id: i32) -> Result<bool, StorageError> {
        let mut map = self.issues.write()?;
        Ok(map.remove(&id).is_some())
    }

    async fn delete_issues_by_asset(&self, asset_id: i32) -> Result<u64, StorageError> {
        let mut map = self.issues.write()?;
        let before = map.len();
        map.retain(|_, issue| issue.asset_id != asset_id);
        Ok((before - map.len()) as u64)
    }
}
