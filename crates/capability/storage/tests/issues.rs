use chrono::{TimeZone, Utc};
use domain::{IssueStatus, IssueType, Severity};
use itam_storage::{AssetIssueCreate, AssetIssueStore, InMemoryIssueStore};

fn new_issue(asset_id: i32) -> AssetIssueCreate {
    AssetIssueCreate {
        asset_id,
        reported_by: 1,
        assigned_to: None,
        issue_type: IssueType::HardwareFailure,
        severity: Severity::High,
        issue_description: "Fan failure".to_string(),
        resolution_notes: None,
        status: IssueStatus::Open,
        reported_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn transition_requires_expected_status() {
    let store = InMemoryIssueStore::new();
    let issue = store.create_issue(new_issue(1)).await.expect("create");

    let mut patch = issue.to_patch();
    patch.assigned_to = Some(7);
    patch.status = IssueStatus::Assigned;
    let updated = store
        .transition_issue(issue.id, IssueStatus::Open, patch.clone())
        .await
        .expect("transition")
        .expect("applied");
    assert_eq!(updated.status, IssueStatus::Assigned);
    assert_eq!(updated.assigned_to, Some(7));

    // 状态已变化，第二次比较交换失败
    let stale = store
        .transition_issue(issue.id, IssueStatus::Open, patch)
        .await
        .expect("transition");
    assert!(stale.is_none());
}

#[tokio::test]
async fn bulk_create_and_delete_by_asset() {
    let store = InMemoryIssueStore::new();
    let created = store
        .create_issues(vec![new_issue(1), new_issue(1), new_issue(2)])
        .await
        .expect("create");
    assert_eq!(created.len(), 3);

    let deleted = store.delete_issues_by_asset(1).await.expect("delete");
    assert_eq!(deleted, 2);
    let remaining = store.list_issues().await.expect("list");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].asset_id, 2);

    assert!(store.delete_issue(remaining[0].id).await.expect("delete"));
    assert!(store.get_issue(remaining[0].id).await.expect("get").is_none());
}
