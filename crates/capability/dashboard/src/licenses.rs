//! 软件许可证指标。

use crate::calendar::{UNKNOWN, count_by, expiring_soon, is_active, is_expired};
use api_contract::SoftwareLicenseMetricsDto;
use chrono::NaiveDate;
use itam_storage::{LicenseRecord, VendorRecord};
use std::collections::HashMap;

/// 座位利用率：一位小数百分比，无座位时为 `"0%"`。
pub fn utilization(used_seats: i64, total_seats: i64) -> String {
    if total_seats <= 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", used_seats as f64 / total_seats as f64 * 100.0)
}

pub fn license_metrics(
    licenses: &[LicenseRecord],
    vendors: &[VendorRecord],
    today: NaiveDate,
) -> SoftwareLicenseMetricsDto {
    let vendor_names: HashMap<i32, &str> = vendors
        .iter()
        .map(|vendor| (vendor.id, vendor.name.as_str()))
        .collect();
    let total_seats: i64 = licenses
        .iter()
        .map(|license| i64::from(license.number_of_seats.unwrap_or(0)))
        .sum();
    let used_seats: i64 = licenses
        .iter()
        .map(|license| i64::from(license.seats_used))
        .sum();

    SoftwareLicenseMetricsDto {
        total_licenses: licenses.len(),
        active_licenses: licenses
            .iter()
            .filter(|license| is_active(license.expiry_date, today))
            .count(),
        expired_licenses: licenses
            .iter()
            .filter(|license| is_expired(license.expiry_date, today))
            .count(),
        expiring_licenses: licenses
            .iter()
            .filter(|license| {
                license
                    .expiry_date
                    .is_some_and(|expiry| expiring_soon(expiry, today))
            })
            .count(),
        license_utilization: utilization(used_seats, total_seats),
        total_seats,
        used_seats,
        licenses_by_vendor: count_by(licenses.iter().map(|license| {
            license
                .vendor_id
                .and_then(|id| vendor_names.get(&id).copied())
                .unwrap_or(UNKNOWN)
                .to_string()
        })),
    }
}
