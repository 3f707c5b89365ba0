use chrono::{NaiveDate, TimeZone, Utc};
use itam_storage::{
    AssetStore, InMemoryUserStore, LicenseStore, MaintenanceRecordCreate, MaintenanceRecordStore,
    StorageSnapshot, StoreSet, UserRecord, UserStore,
};
use rust_decimal::Decimal;

const SNAPSHOT: &str = r#"{
  "assets": [
    {"id": 7, "categoryId": 1, "name": "Laptop", "serialNumber": "SN-7",
     "purchaseDate": "2022-03-01", "currentValue": "1200.00", "status": "ACTIVE"},
    {"id": 3, "categoryId": 1, "name": "Printer"}
  ],
  "users": [{"id": 1, "email": "ops@example.com", "firstName": "Ada"}]
}"#;

#[tokio::test]
async fn snapshot_populates_in_memory_stores() {
    let snapshot = StorageSnapshot::from_json(SNAPSHOT).expect("parse");
    let stores = StoreSet::in_memory(snapshot);

    let assets = stores.assets.list_assets().await.expect("list");
    assert_eq!(assets.len(), 2);
    // 列表按主键升序
    assert_eq!(assets[0].id, 3);
    assert_eq!(assets[1].id, 7);

    let laptop = stores.assets.get_asset(7).await.expect("get").expect("laptop");
    assert_eq!(laptop.serial_number.as_deref(), Some("SN-7"));
    assert_eq!(
        laptop.current_value.map(|value| value.to_string()),
        Some("1200.00".to_string())
    );

    assert!(stores.users.user_exists(1).await.expect("exists"));
    assert!(!stores.users.user_exists(2).await.expect("exists"));
    assert!(stores.licenses.list_licenses().await.expect("list").is_empty());
}

#[tokio::test]
async fn snapshot_rejects_malformed_json() {
    assert!(StorageSnapshot::from_json("{\"assets\": 1}").is_err());
}

#[tokio::test]
async fn user_display_name_variants() {
    let store = InMemoryUserStore::with_records(vec![
        UserRecord {
            id: 1,
            email: "a@example.com".to_string(),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            role: None,
        },
        UserRecord {
            id: 2,
            email: "b@example.com".to_string(),
            first_name: None,
            last_name: Some("Hopper".to_string()),
            role: None,
        },
    ]);
    let ada = store.get_user(1).await.expect("get").expect("user");
    assert_eq!(ada.display_name().as_deref(), Some("Ada Lovelace"));
    let hopper = store.get_user(2).await.expect("get").expect("user");
    assert_eq!(hopper.display_name().as_deref(), Some("Hopper"));
    assert!(store.get_user(3).await.expect("get").is_none());
}

#[tokio::test]
async fn maintenance_records_append_after_snapshot_ids() {
    let snapshot = StorageSnapshot::from_json(
        r#"{"maintenanceRecords": [
          {"id": 4, "assetId": 7, "performedBy": 1, "maintenanceType": "Inspection",
           "performedDate": "2024-05-02", "cost": "80.00", "status": "COMPLETED",
           "createdAt": "2024-05-02T09:00:00Z"}
        ]}"#,
    )
    .expect("parse");
    let stores = StoreSet::in_memory(snapshot);

    let created = stores
        .maintenance_records
        .create_maintenance_record(MaintenanceRecordCreate {
            asset_id: 7,
            schedule_id: Some(2),
            performed_by: 1,
            maintenance_type: "Cleaning".to_string(),
            performed_date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("date"),
            duration_hours: Some(Decimal::new(15, 1)),
            cost: Some(Decimal::new(2_500, 2)),
            description: None,
            status: "COMPLETED".to_string(),
            created_at: Utc
                .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
                .single()
                .expect("timestamp"),
        })
        .await
        .expect("create");
    assert_eq!(created.id, 5);
    assert_eq!(created.schedule_id, Some(2));

    let records = stores
        .maintenance_records
        .list_maintenance_records()
        .await
        .expect("list");
    let ids: Vec<i32> = records.iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![4, 5]);
    assert_eq!(records[1].maintenance_type, "Cleaning");
    assert_eq!(records[1].cost.map(|cost| cost.to_string()).as_deref(), Some("25.00"));
}
