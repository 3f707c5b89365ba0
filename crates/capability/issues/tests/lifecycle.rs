use api_contract::{
    AssignIssueRequest, BulkCreateAssetIssueRequest, CreateAssetIssueRequest, ResolveIssueRequest,
    UpdateAssetIssueRequest,
};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use domain::{FixedClock, IssueStatus, ServiceError};
use itam_issues::IssueService;
use itam_storage::{
    AssetIssueCreate, AssetIssuePatch, AssetIssueRecord, AssetIssueStore, InMemoryIssueStore,
    StorageError, StorageSnapshot, StoreSet,
};
use std::sync::Arc;

const SNAPSHOT: &str = r#"{
  "assets": [
    {"id": 1, "categoryId": 1, "name": "Laptop 14", "serialNumber": "LT-14"},
    {"id": 2, "categoryId": 1, "name": "Laptop 15"}
  ],
  "users": [
    {"id": 3, "email": "reporter@example.com", "firstName": "Ari", "lastName": "Lane"},
    {"id": 7, "email": "tech@example.com", "firstName": "Kai"}
  ]
}"#;

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 4, 2, 9, 30, 0)
            .single()
            .expect("now"),
    ))
}

fn stores() -> StoreSet {
    StoreSet::in_memory(StorageSnapshot::from_json(SNAPSHOT).expect("snapshot"))
}

fn create_request(asset_id: i32) -> CreateAssetIssueRequest {
    CreateAssetIssueRequest {
        asset_id,
        reported_by: 3,
        assigned_to: None,
        issue_type: "HARDWARE_FAILURE".to_string(),
        severity: "HIGH".to_string(),
        issue_description: "Battery swelling".to_string(),
        resolution_notes: None,
        status: "OPEN".to_string(),
    }
}

#[tokio::test]
async fn assign_then_resolve() {
    let service = IssueService::from_stores(&stores(), clock());
    let created = service.create(create_request(1)).await.expect("create");
    assert_eq!(created.status, "OPEN");
    assert_eq!(created.asset_serial_number.as_deref(), Some("LT-14"));
    assert_eq!(created.reported_by_name.as_deref(), Some("Ari Lane"));

    let assigned = service
        .assign(created.id, AssignIssueRequest { assigned_to: 7 })
        .await
        .expect("assign");
    assert_eq!(assigned.status, "ASSIGNED");
    assert_eq!(assigned.assigned_to, Some(7));
    assert_eq!(assigned.assigned_to_email.as_deref(), Some("tech@example.com"));

    let resolved = service
        .resolve(
            created.id,
            ResolveIssueRequest {
                resolution_notes: "fixed".to_string(),
                status: "RESOLVED".to_string(),
            },
        )
        .await
        .expect("resolve");
    assert_eq!(resolved.status, "RESOLVED");
    assert!(resolved.resolved_at.is_some());
    assert!(resolved.closed_at.is_none());
    assert_eq!(resolved.resolution_notes.as_deref(), Some("fixed"));
}

#[tokio::test]
async fn assign_keeps_non_open_status() {
    let service = IssueService::from_stores(&stores(), clock());
    let mut request = create_request(1);
    request.status = "IN_PROGRESS".to_string();
    let created = service.create(request).await.expect("create");
    let assigned = service
        .assign(created.id, AssignIssueRequest { assigned_to: 7 })
        .await
        .expect("assign");
    assert_eq!(assigned.status, "IN_PROGRESS");
    assert_eq!(assigned.assigned_to, Some(7));
}

#[tokio::test]
async fn resolve_closed_sets_both_timestamps() {
    let service = IssueService::from_stores(&stores(), clock());
    let created = service.create(create_request(2)).await.expect("create");
    let closed = service
        .resolve(
            created.id,
            ResolveIssueRequest {
                resolution_notes: "replaced".to_string(),
                status: "CLOSED".to_string(),
            },
        )
        .await
        .expect("close");
    let resolved_at = closed.resolved_at.expect("resolved_at");
    let closed_at = closed.closed_at.expect("closed_at");
    assert!(resolved_at <= closed_at);

    let err = service
        .resolve(
            created.id,
            ResolveIssueRequest {
                resolution_notes: "  ".to_string(),
                status: "RESOLVED".to_string(),
            },
        )
        .await
        .expect_err("blank notes");
    assert_eq!(
        err,
        ServiceError::validation("Resolution notes cannot be empty")
    );
}

#[tokio::test]
async fn update_to_resolved_restamps_resolution() {
    let stores = stores();
    let earlier = IssueService::from_stores(&stores, clock());
    let later_now = Utc
        .with_ymd_and_hms(2024, 4, 5, 16, 0, 0)
        .single()
        .expect("later");
    let later = IssueService::from_stores(&stores, Arc::new(FixedClock::new(later_now)));

    let created = earlier.create(create_request(1)).await.expect("create");
    let resolved = earlier
        .resolve(
            created.id,
            ResolveIssueRequest {
                resolution_notes: "reseated battery".to_string(),
                status: "RESOLVED".to_string(),
            },
        )
        .await
        .expect("resolve");
    let first_resolution = resolved.resolved_at.expect("resolved at");

    let updated = later
        .update(
            created.id,
            UpdateAssetIssueRequest {
                asset_id: 1,
                reported_by: 3,
                assigned_to: None,
                issue_type: "HARDWARE_FAILURE".to_string(),
                severity: "HIGH".to_string(),
                issue_description: "Battery swelling".to_string(),
                resolution_notes: Some("replaced battery".to_string()),
                status: "RESOLVED".to_string(),
            },
        )
        .await
        .expect("update");
    assert_eq!(updated.status, "RESOLVED");
    assert_eq!(updated.resolved_at, Some(later_now));
    assert_ne!(updated.resolved_at, Some(first_resolution));
    assert!(updated.closed_at.is_none());
}

#[tokio::test]
async fn update_closed_backfills_resolution() {
    let service = IssueService::from_stores(&stores(), clock());
    let created = service.create(create_request(1)).await.expect("create");
    let updated = service
        .update(
            created.id,
            UpdateAssetIssueRequest {
                asset_id: 1,
                reported_by: 3,
                assigned_to: Some(7),
                issue_type: "HARDWARE_FAILURE".to_string(),
                severity: "CRITICAL".to_string(),
                issue_description: "Battery swelling".to_string(),
                resolution_notes: Some("battery replaced".to_string()),
                status: "CLOSED".to_string(),
            },
        )
        .await
        .expect("update");
    assert_eq!(updated.status, "CLOSED");
    assert_eq!(updated.severity, "CRITICAL");
    assert!(updated.closed_at.is_some());
    assert_eq!(updated.resolved_at, updated.closed_at);
}

#[tokio::test]
async fn bulk_create_is_all_or_nothing() {
    let stores = stores();
    let service = IssueService::from_stores(&stores, clock());
    let request = BulkCreateAssetIssueRequest {
        asset_ids: vec![1, 2, 99],
        reported_by: 3,
        assigned_to: None,
        issue_type: "SOFTWARE_ISSUE".to_string(),
        severity: "LOW".to_string(),
        issue_description: "Agent outdated".to_string(),
        resolution_notes: None,
        status: "OPEN".to_string(),
    };
    let err = service
        .bulk_create(request.clone())
        .await
        .expect_err("missing asset");
    assert!(matches!(err, ServiceError::NotFound(_)));
    assert!(stores.issues.list_issues().await.expect("list").is_empty());

    let mut empty = request.clone();
    empty.asset_ids.clear();
    assert_eq!(
        service.bulk_create(empty).await.expect_err("empty"),
        ServiceError::validation("Asset IDs list cannot be empty")
    );

    let mut valid = request;
    valid.asset_ids = vec![1, 2];
    let created = service.bulk_create(valid).await.expect("bulk");
    assert_eq!(created.len(), 2);
    assert!(created.iter().all(|issue| issue.issue_type == "SOFTWARE_ISSUE"));
}

#[tokio::test]
async fn queries_history_and_deletes() {
    let service = IssueService::from_stores(&stores(), clock());
    let first = service.create(create_request(1)).await.expect("first");
    let mut second = create_request(1);
    second.severity = "CRITICAL".to_string();
    service.create(second).await.expect("second");
    service.create(create_request(2)).await.expect("third");

    assert_eq!(service.by_asset(1).await.expect("by asset").len(), 2);
    assert_eq!(service.by_severity("CRITICAL").await.expect("severity").len(), 1);
    assert!(matches!(
        service.by_severity("critical").await,
        Err(ServiceError::Validation(_))
    ));
    assert_eq!(service.by_reporter(3).await.expect("reporter").len(), 3);
    assert_eq!(
        service
            .by_date_range("2024-04-02T00:00:00", "2024-04-02T09:30:00")
            .await
            .expect("range")
            .len(),
        3
    );
    assert!(matches!(
        service
            .by_date_range("2024-04-03T00:00:00", "2024-04-02T00:00:00")
            .await,
        Err(ServiceError::Validation(_))
    ));

    let history = service.history(1).await.expect("history");
    assert_eq!(history.total_issues, 2);
    assert_eq!(history.open_issues, 2);
    assert_eq!(history.asset_name, "Laptop 14");
    assert!(matches!(
        service.history(99).await,
        Err(ServiceError::NotFound(_))
    ));

    let stats = service.user_stats(3).await.expect("user stats");
    assert_eq!(stats.reported_issues, 3);
    assert_eq!(stats.user_name, "Ari Lane");

    service.delete(first.id).await.expect("delete");
    assert!(matches!(
        service.get(first.id).await,
        Err(ServiceError::NotFound(_))
    ));
    assert_eq!(service.delete_by_asset(1).await.expect("delete by asset"), 1);
    assert!(matches!(
        service.history(1).await,
        Err(ServiceError::NotFound(message)) if message == "No issue history found for this asset"
    ));
}

/// 在比较交换前抢先修改状态的存储，模拟并发写入。
struct RacingStore {
    inner: InMemoryIssueStore,
}

#[async_trait]
impl AssetIssueStore for RacingStore {
    async fn create_issue(&self, record: AssetIssueCreate) -> Result<AssetIssueRecord, StorageError> {
        self.inner.create_issue(record).await
    }

    async fn create_issues(
        &self,
        records: Vec<AssetIssueCreate>,
    ) -> Result<Vec<AssetIssueRecord>, StorageError> {
        self.inner.create_issues(records).await
    }

    async fn get_issue(&self, id: i32) -> Result<Option<AssetIssueRecord>, StorageError> {
        self.inner.get_issue(id).await
    }

    async fn list_issues(&self) -> Result<Vec<AssetIssueRecord>, StorageError> {
        self.inner.list_issues().await
    }

    async fn transition_issue(
        &self,
        id: i32,
        expected: IssueStatus,
        patch: AssetIssuePatch,
    ) -> Result<Option<AssetIssueRecord>, StorageError> {
        if let Some(current) = self.inner.get_issue(id).await? {
            let mut rival = current.to_patch();
            rival.status = IssueStatus::Cancelled;
            self.inner
                .transition_issue(id, current.status, rival)
                .await?;
        }
        self.inner.transition_issue(id, expected, patch).await
    }

    async fn delete_issue(&self, id: i32) -> Result<bool, StorageError> {
        self.inner.delete_issue(id).await
    }

    async fn delete_issues_by_asset(&self, asset_id: i32) -> Result<u64, StorageError> {
        self.inner.delete_issues_by_asset(asset_id).await
    }
}

#[tokio::test]
async fn lost_transition_is_a_conflict() {
    let stores = stores();
    let racing = Arc::new(RacingStore {
        inner: InMemoryIssueStore::new(),
    });
    let service = IssueService::new(
        racing.clone(),
        stores.assets.clone(),
        stores.users.clone(),
        clock(),
    );
    let created = service.create(create_request(1)).await.expect("create");
    let err = service
        .assign(created.id, AssignIssueRequest { assigned_to: 7 })
        .await
        .expect_err("conflict");
    assert!(matches!(err, ServiceError::Conflict(_)));

    let stored = racing
        .get_issue(created.id)
        .await
        .expect("get")
        .expect("issue");
    assert_eq!(stored.status, IssueStatus::Cancelled);
    assert!(stored.assigned_to.is_none());
}
