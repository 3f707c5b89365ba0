//! 未来 30 天内的到期事件：维护计划、许可证、订阅与保修。
//!
//! 四个列表都按日期升序，同日保持存储顺序。

use crate::calendar::{UNKNOWN, days_between, within_horizon};
use api_contract::{
    ExpiringLicenseDto, ExpiringSubscriptionDto, ExpiringWarrantyDto, UpcomingEventsDto,
    UpcomingMaintenanceDto,
};
use chrono::NaiveDate;
use domain::Priority;
use domain::recurrence::is_overdue;
use itam_storage::{
    AssetRecord, LicenseRecord, MaintenanceScheduleRecord, SubscriptionRecord, VendorRecord,
};
use std::collections::HashMap;

pub fn upcoming_events(
    schedules: &[MaintenanceScheduleRecord],
    licenses: &[LicenseRecord],
    subscriptions: &[SubscriptionRecord],
    assets: &[AssetRecord],
    vendors: &[VendorRecord],
    today: NaiveDate,
) -> UpcomingEventsDto {
    let vendor_names: HashMap<i32, &str> = vendors
        .iter()
        .map(|vendor| (vendor.id, vendor.name.as_str()))
        .collect();
    let vendor_name = |id: Option<i32>| -> Option<String> {
        id.and_then(|id| vendor_names.get(&id).map(|name| name.to_string()))
    };
    let asset_names: HashMap<i32, &str> = assets
        .iter()
        .map(|asset| (asset.id, asset.name.as_str()))
        .collect();

    let mut maintenance_due: Vec<UpcomingMaintenanceDto> = schedules
        .iter()
        .filter(|schedule| schedule.is_active && within_horizon(schedule.next_due, today))
        .map(|schedule| UpcomingMaintenanceDto {
            schedule_id: schedule.id,
            asset_id: schedule.asset_id,
            asset_name: asset_names.get(&schedule.asset_id).map(|name| name.to_string()),
            maintenance_type: schedule
                .maintenance_type
                .clone()
                .unwrap_or_else(|| UNKNOWN.to_string()),
            due_date: schedule.next_due,
            priority: schedule
                .priority
                .unwrap_or(Priority::Medium)
                .as_str()
                .to_string(),
            days_until_due: days_between(today, schedule.next_due),
            // 窗口已排除过期日期，此处恒为 false
            is_overdue: is_overdue(schedule.next_due, today),
        })
        .collect();
    maintenance_due.sort_by_key(|event| event.due_date);

    let mut license_expiring: Vec<ExpiringLicenseDto> = licenses
        .iter()
        .filter_map(|license| {
            let expiry = license.expiry_date.filter(|date| within_horizon(*date, today))?;
            Some(ExpiringLicenseDto {
                license_id: license.id,
                name: license.name.clone(),
                vendor_name: vendor_name(license.vendor_id),
                expiry_date: expiry,
                days_until_expiry: days_between(today, expiry),
                seats_used: license.seats_used,
                total_seats: license.number_of_seats.unwrap_or(0),
            })
        })
        .collect();
    license_expiring.sort_by_key(|event| event.expiry_date);

    let mut subscription_expiring: Vec<ExpiringSubscriptionDto> = subscriptions
        .iter()
        .filter_map(|subscription| {
            let expiry = subscription
                .expiry_date
                .filter(|date| within_horizon(*date, today))?;
            Some(ExpiringSubscriptionDto {
                subscription_id: subscription.id,
                name: subscription.name.clone(),
                vendor_name: vendor_name(subscription.vendor_id),
                expiry_date: expiry,
                days_until_expiry: days_between(today, expiry),
                cost: subscription.cost.map(|cost| cost.to_string()),
                auto_renewal: subscription.auto_renewal,
            })
        })
        .collect();
    subscription_expiring.sort_by_key(|event| event.expiry_date);

    let mut warranty_expiring: Vec<ExpiringWarrantyDto> = assets
        .iter()
        .filter_map(|asset| {
            let expiry = asset
                .warranty_expiry
                .filter(|date| within_horizon(*date, today))?;
            Some(ExpiringWarrantyDto {
                asset_id: asset.id,
                asset_name: asset.name.clone(),
                serial_number: asset.serial_number.clone(),
                warranty_expiry_date: expiry,
                days_until_expiry: days_between(today, expiry),
                vendor: vendor_name(asset.vendor_id),
            })
        })
        .collect();
    warranty_expiring.sort_by_key(|event| event.warranty_expiry_date);

    UpcomingEventsDto {
        maintenance_due,
        license_expiring,
        subscription_expiring,
        warranty_expiring,
    }
}
