//! 维护指标：维护事实记录 + 活动计划。

use crate::calendar::{count_by, month_start};
use api_contract::{AssetMaintenanceSummaryDto, DashboardFiltersDto, MaintenanceMetricsDto};
use chrono::NaiveDate;
use domain::money::positive_amount;
use domain::recurrence::is_overdue;
use itam_storage::{AssetRecord, MaintenanceRecord, MaintenanceScheduleRecord};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;

/// 维护次数排行长度。
pub const TOP_ASSETS: usize = 5;

fn asset_in_scope(asset: Option<&AssetRecord>, filter: &DashboardFiltersDto) -> bool {
    if filter.location_id.is_none() && filter.category_id.is_none() {
        return true;
    }
    let Some(asset) = asset else {
        return false;
    };
    filter
        .location_id
        .is_none_or(|location_id| asset.location_id == Some(location_id))
        && filter
            .category_id
            .is_none_or(|category_id| asset.category_id == category_id)
}

/// 位置/分类条件经由记录所属资产生效，日期范围匹配执行日期。
pub fn maintenance_metrics(
    records: &[MaintenanceRecord],
    schedules: &[MaintenanceScheduleRecord],
    assets: &[AssetRecord],
    filter: &DashboardFiltersDto,
    today: NaiveDate,
) -> MaintenanceMetricsDto {
    let assets_by_id: HashMap<i32, &AssetRecord> =
        assets.iter().map(|asset| (asset.id, asset)).collect();
    let records: Vec<&MaintenanceRecord> = records
        .iter()
        .filter(|record| asset_in_scope(assets_by_id.get(&record.asset_id).copied(), filter))
        .filter(|record| {
            filter
                .date_range
                .as_ref()
                .is_none_or(|range| range.contains(record.performed_date))
        })
        .collect();
    let active: Vec<&MaintenanceScheduleRecord> = schedules
        .iter()
        .filter(|schedule| schedule.is_active)
        .filter(|schedule| {
            asset_in_scope(assets_by_id.get(&schedule.asset_id).copied(), filter)
        })
        .collect();

    let first_of_month = month_start(today);
    let this_month: Vec<&&MaintenanceRecord> = records
        .iter()
        .filter(|record| record.performed_date >= first_of_month)
        .collect();
    let cost_this_month: Decimal = this_month.iter().filter_map(|record| record.cost).sum();

    let costs: Vec<Decimal> = records.iter().filter_map(|record| record.cost).collect();
    let avg_maintenance_cost = if costs.is_empty() {
        None
    } else {
        let mean = costs.iter().copied().sum::<Decimal>() / Decimal::from(costs.len());
        let mut mean = mean.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
        mean.rescale(2);
        Some(mean.to_string())
    };

    MaintenanceMetricsDto {
        total_maintenance_records: records.len(),
        maintenance_this_month: this_month.len(),
        pending_maintenance: active
            .iter()
            .filter(|schedule| schedule.next_due > today)
            .count(),
        overdue_maintenance: active
            .iter()
            .filter(|schedule| is_overdue(schedule.next_due, today))
            .count(),
        maintenance_cost_this_month: positive_amount(cost_this_month),
        avg_maintenance_cost,
        maintenance_by_type: count_by(records.iter().map(|r| r.maintenance_type.clone())),
        maintenance_by_status: count_by(records.iter().map(|r| r.status.clone())),
        top_maintenance_assets: top_assets(&records, &assets_by_id),
    }
}

/// 按维护次数降序取前五；次数相同保持首次出现顺序。
fn top_assets(
    records: &[&MaintenanceRecord],
    assets_by_id: &HashMap<i32, &AssetRecord>,
) -> Vec<AssetMaintenanceSummaryDto> {
    let mut order: Vec<i32> = Vec::new();
    let mut groups: HashMap<i32, Vec<&MaintenanceRecord>> = HashMap::new();
    for record in records {
        let group = groups.entry(record.asset_id).or_insert_with(|| {
            order.push(record.asset_id);
            Vec::new()
        });
        group.push(record);
    }

    let mut summaries: Vec<AssetMaintenanceSummaryDto> = order
        .into_iter()
        .filter_map(|asset_id| {
            let group = groups.get(&asset_id)?;
            let asset = assets_by_id.get(&asset_id);
            let total_cost: Decimal = group.iter().filter_map(|record| record.cost).sum();
            Some(AssetMaintenanceSummaryDto {
                asset_id,
                asset_name: asset.map(|asset| asset.name.clone()),
                serial_number: asset.and_then(|asset| asset.serial_number.clone()),
                maintenance_count: group.len(),
                total_cost: positive_amount(total_cost),
                last_maintenance_date: group.iter().map(|record| record.performed_date).max(),
            })
        })
        .collect();
    summaries.sort_by(|a, b| b.maintenance_count.cmp(&a.maintenance_count));
    summaries.truncate(TOP_ASSETS);
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("date")
    }

    fn record(id: i32, asset_id: i32, performed: NaiveDate, cost: Option<i64>) -> MaintenanceRecord {
        MaintenanceRecord {
            id,
            asset_id,
            schedule_id: None,
            performed_by: 1,
            maintenance_type: "Cleaning".to_string(),
            performed_date: performed,
            duration_hours: None,
            cost: cost.map(|cents| Decimal::new(cents, 2)),
            description: None,
            status: "COMPLETED".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("ts"),
        }
    }

    fn schedule(id: i32, next_due: NaiveDate, is_active: bool) -> MaintenanceScheduleRecord {
        MaintenanceScheduleRecord {
            id,
            asset_id: 1,
            maintenance_type_id: None,
            maintenance_type: None,
            frequency_days: 30,
            last_performed: None,
            next_due,
            assigned_to: None,
            priority: None,
            estimated_cost: None,
            notes: None,
            is_active,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("ts"),
        }
    }

    #[test]
    fn month_cost_and_schedule_counts() {
        let today = date(2024, 6, 15);
        let records = vec![
            record(1, 1, date(2024, 6, 1), Some(10_000)),
            record(2, 1, date(2024, 5, 31), Some(5_000)),
            record(3, 2, date(2024, 6, 10), None),
        ];
        let schedules = vec![
            schedule(1, date(2024, 6, 20), true),
            schedule(2, date(2024, 6, 1), true),
            schedule(3, date(2024, 6, 15), true),
            schedule(4, date(2024, 6, 1), false),
        ];
        let metrics = maintenance_metrics(
            &records,
            &schedules,
            &[],
            &DashboardFiltersDto::default(),
            today,
        );
        assert_eq!(metrics.total_maintenance_records, 3);
        assert_eq!(metrics.maintenance_this_month, 2);
        assert_eq!(metrics.maintenance_cost_this_month.as_deref(), Some("100.00"));
        assert_eq!(metrics.avg_maintenance_cost.as_deref(), Some("75.00"));
        assert_eq!(metrics.pending_maintenance, 1);
        assert_eq!(metrics.overdue_maintenance, 1);
        assert_eq!(metrics.maintenance_by_type.get("Cleaning"), Some(&3));
    }

    #[test]
    fn average_rounds_half_to_even() {
        let today = date(2024, 6, 15);
        let records = vec![
            record(1, 1, date(2024, 6, 1), Some(3)),
            record(2, 1, date(2024, 6, 2), Some(2)),
        ];
        // 0.05 / 2 = 0.025
        let metrics = maintenance_metrics(
            &records,
            &[],
            &[],
            &DashboardFiltersDto::default(),
            today,
        );
        assert_eq!(metrics.avg_maintenance_cost.as_deref(), Some("0.02"));
    }

    #[test]
    fn top_assets_are_stable_on_ties() {
        let today = date(2024, 6, 15);
        let mut records = Vec::new();
        let mut id = 0;
        for asset_id in [5, 3, 8, 1, 2, 7] {
            for _ in 0..2 {
                id += 1;
                records.push(record(id, asset_id, date(2024, 6, id as u32), Some(100)));
            }
        }
        id += 1;
        records.push(record(id, 7, date(2024, 6, 28), None));
        let metrics = maintenance_metrics(
            &records,
            &[],
            &[],
            &DashboardFiltersDto::default(),
            today,
        );
        let ids: Vec<i32> = metrics
            .top_maintenance_assets
            .iter()
            .map(|summary| summary.asset_id)
            .collect();
        assert_eq!(ids, vec![7, 5, 3, 8, 1]);
        let top = &metrics.top_maintenance_assets[0];
        assert_eq!(top.maintenance_count, 3);
        assert_eq!(top.total_cost.as_deref(), Some("2.00"));
        assert_eq!(top.last_maintenance_date, Some(date(2024, 6, 28)));
        assert!(top.asset_name.is_none());
    }

    #[test]
    fn location_filter_applies_through_asset() {
        let today = date(2024, 6, 15);
        let assets = vec![AssetRecord {
            id: 1,
            category_id: 1,
            vendor_id: None,
            location_id: Some(4),
            name: "Printer".to_string(),
            model: None,
            serial_number: Some("PR-1".to_string()),
            purchase_date: None,
            purchase_price: None,
            current_value: None,
            warranty_expiry: None,
            assigned_to: None,
            status: None,
        }];
        let records = vec![
            record(1, 1, date(2024, 6, 1), None),
            record(2, 2, date(2024, 6, 2), None),
        ];
        let filter = DashboardFiltersDto {
            location_id: Some(4),
            ..DashboardFiltersDto::default()
        };
        let metrics = maintenance_metrics(&records, &[], &assets, &filter, today);
        assert_eq!(metrics.total_maintenance_records, 1);
        assert_eq!(
            metrics.top_maintenance_assets[0].serial_number.as_deref(),
            Some("PR-1")
        );
    }
}
