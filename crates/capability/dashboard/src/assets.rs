//! 资产指标。

use crate::calendar::{UNKNOWN, count_by, expiring_soon};
use api_contract::{AssetMetricsDto, DashboardFiltersDto};
use chrono::NaiveDate;
use domain::money::positive_amount;
use itam_storage::{AssetRecord, CategoryRecord, LocationRecord};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// 资产是否命中过滤条件（日期范围匹配购置日期）。
pub fn matches_filter(asset: &AssetRecord, filter: &DashboardFiltersDto) -> bool {
    if let Some(location_id) = filter.location_id
        && asset.location_id != Some(location_id)
    {
        return false;
    }
    if let Some(category_id) = filter.category_id
        && asset.category_id != category_id
    {
        return false;
    }
    match &filter.date_range {
        Some(range) => asset
            .purchase_date
            .is_some_and(|purchased| range.contains(purchased)),
        None => true,
    }
}

/// 总数与标量指标基于全量资产；过滤条件只收窄三个分组。
pub fn asset_metrics(
    assets: &[AssetRecord],
    categories: &[CategoryRecord],
    locations: &[LocationRecord],
    filter: &DashboardFiltersDto,
    today: NaiveDate,
) -> AssetMetricsDto {
    let category_names: HashMap<i32, &str> = categories
        .iter()
        .map(|category| (category.id, category.name.as_str()))
        .collect();
    let location_names: HashMap<i32, &str> = locations
        .iter()
        .map(|location| (location.id, location.name.as_str()))
        .collect();
    let filtered: Vec<&AssetRecord> = assets
        .iter()
        .filter(|asset| matches_filter(asset, filter))
        .collect();

    let assets_by_status = count_by(
        filtered
            .iter()
            .map(|asset| asset.status.clone().unwrap_or_else(|| UNKNOWN.to_string())),
    );
    let assets_by_category = count_by(filtered.iter().map(|asset| {
        category_names
            .get(&asset.category_id)
            .copied()
            .unwrap_or(UNKNOWN)
            .to_string()
    }));
    let assets_by_location = count_by(filtered.iter().map(|asset| {
        asset
            .location_id
            .and_then(|id| location_names.get(&id).copied())
            .unwrap_or(UNKNOWN)
            .to_string()
    }));

    let total_value: Decimal = assets.iter().filter_map(|asset| asset.current_value).sum();
    let ages: Vec<i64> = assets
        .iter()
        .filter_map(|asset| asset.purchase_date)
        .map(|purchased| (today - purchased).num_days())
        .collect();
    let avg_asset_age = if ages.is_empty() {
        None
    } else {
        let mean_days = ages.iter().sum::<i64>() as f64 / ages.len() as f64;
        Some(format!("{:.1} years", mean_days / 365.25))
    };

    AssetMetricsDto {
        total_assets: assets.len(),
        assets_by_status,
        assets_by_category,
        assets_by_location,
        total_value: positive_amount(total_value),
        avg_asset_age,
        assets_near_warranty_expiry: assets
            .iter()
            .filter(|asset| {
                asset
                    .warranty_expiry
                    .is_some_and(|expiry| expiring_soon(expiry, today))
            })
            .count(),
        unassigned_assets: assets
            .iter()
            .filter(|asset| asset.assigned_to.is_none())
            .count(),
    }
}
