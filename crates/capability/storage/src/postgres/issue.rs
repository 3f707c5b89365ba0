//! Postgres 资产问题存储实现
//!
//! - 状态比较交换：`update ... where id = $n and status = $m`
//! - 批量创建在单个事务中完成

use crate::error::StorageError;
use crate::models::{AssetIssueCreate, AssetIssuePatch, AssetIssueRecord};
use crate::traits::AssetIssueStore;
use domain::{IssueStatus, IssueType, Severity};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const COLUMNS: &str = "id, asset_id, reported_by, assigned_to, issue_type, severity, \
                       issue_description, resolution_notes, status, reported_at, resolved_at, \
                       closed_at";

pub struct PgIssueStore {
    pub pool: PgPool,
}

impl PgIssueStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn issue_from_row(row: &PgRow) -> Result<AssetIssueRecord, StorageError> {
    let issue_type: String = row.try_get("issue_type")?;
    let severity: String = row.try_get("severity")?;
    let status: String = row.try_get("status")?;
    Ok(AssetIssueRecord {
        id: row.try_get("id")?,
        asset_id: row.try_get("asset_id")?,
        reported_by: row.try_get("reported_by")?,
        assigned_to: row.try_get("assigned_to")?,
        issue_type: IssueType::parse(&issue_type)
            .ok_or_else(|| StorageError::new(format!("invalid issue type: {issue_type}")))?,
        severity: Severity::parse(&severity)
            .ok_or_else(|| StorageError::new(format!("invalid severity: {severity}")))?,
        issue_description: row.try_get("issue_description")?,
        resolution_notes: row.try_get("resolution_notes")?,
        status: IssueStatus::parse(&status)
            .ok_or_else(|| StorageError::new(format!("invalid status: {status}")))?,
        reported_at: row.try_get("reported_at")?,
        resolved_at: row.try_get("resolved_at")?,
        closed_at: row.try_get("closed_at")?,
    })
}

fn insert_sql() -> String {
    format!(
        "insert into asset_issues \
         (asset_id, reported_by, assigned_to, issue_type, severity, issue_description, \
          resolution_notes, status, reported_at) \
         values ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         returning {COLUMNS}"
    )
}

#[async_trait::async_trait]
impl AssetIssueStore for PgIssueStore {
    async fn create_issue(
        &self,
        record: AssetIssueCreate,
    ) -> Result<AssetIssueRecord, StorageError> {
        let row = sqlx::query(&insert_sql())
            .bind(record.asset_id)
            .bind(record.reported_by)
            .bind(record.assigned_to)
            .bind(record.issue_type.as_str())
            .bind(record.severity.as_str())
            .bind(&record.issue_description)
            .bind(&record.resolution_notes)
            .bind(record.status.as_str())
            .bind(record.reported_at)
            .fetch_one(&self.pool)
            .await?;
        issue_from_row(&row)
    }

    async fn create_issues(
        &self,
        records: Vec<AssetIssueCreate>,
    ) -> Result<Vec<AssetIssueRecord>, StorageError> {
        let sql = insert_sql();
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(records.len());
        for record in records {
            let row = sqlx::query(&sql)
                .bind(record.asset_id)
                .bind(record.reported_by)
                .bind(record.assigned_to)
                .bind(record.issue_type.as_str())
                .bind(record.severity.as_str())
                .bind(&record.issue_description)
                .bind(&record.resolution_notes)
                .bind(record.status.as_str())
                .bind(record.reported_at)
                .fetch_one(&mut *tx)
                .await?;
            created.push(issue_from_row(&row)?);
        }
        tx.commit().await?;
        Ok(created)
    }

    async fn get_issue(&self, id: i32) -> Result<Option<AssetIssueRecord>, StorageError> {
        let row = sqlx::query(&format!("select {COLUMNS} from asset_issues where id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(issue_from_row(&row)?))
    }

    async fn list_issues(&self) -> Result<Vec<AssetIssueRecord>, StorageError> {
        let rows = sqlx::query(&format!("select {COLUMNS} from asset_issues order by id"))
            .fetch_all(&self.pool)
            .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(issue_from_row(&row)?);
        }
        Ok(items)
    }

    async fn transition_issue(
        &self,
        id: i32,
        expected: IssueStatus,
        patch: AssetIssuePatch,
    ) -> Result<Option<AssetIssueRecord>, StorageError> {
        let row = sqlx::query(&format!(
            "update asset_issues set \
             asset_id = $1, reported_by = $2, assigned_to = $3, issue_type = $4, severity = $5, \
             issue_description = $6, resolution_notes = $7, status = $8, resolved_at = $9, \
             closed_at = $10 \
             where id = $11 and status = $12 \
             returning {COLUMNS}"
        ))
        .bind(patch.asset_id)
        .bind(patch.reported_by)
        .bind(patch.assigned_to)
        .bind(patch.issue_type.as_str())
        .bind(patch.severity.as_str())
        .bind(&patch.issue_description)
        .bind(&patch.resolution_notes)
        .bind(patch.status.as_str())
        .bind(patch.resolved_at)
        .bind(patch.closed_at)
        .bind(id)
        .bind(expected.as_str())
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(issue_from_row(&row)?))
    }

    async fn delete_issue(&self, id: i32) -> Result<bool, StorageError> {
        let result = sqlx::query("delete from asset_issues where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_issues_by_asset(&self, asset_id: i32) -> Result<u64, StorageError> {
        let result = sqlx::query("delete from asset_issues where asset_id = $1")
            .bind(asset_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
