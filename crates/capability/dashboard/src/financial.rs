//! 财务汇总：资产价值、本月维护支出、月度订阅与年度预估。

use crate::calendar::month_start;
use crate::subscriptions::{MONTHLY, cost_for_cycle};
use api_contract::FinancialSummaryDto;
use chrono::NaiveDate;
use domain::money::positive_amount;
use itam_storage::{AssetRecord, MaintenanceRecord, SubscriptionRecord};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

pub const ASSET_VALUE: &str = "Asset Value";
pub const MAINTENANCE_THIS_MONTH: &str = "Maintenance (This Month)";
pub const SUBSCRIPTIONS_MONTHLY: &str = "Subscriptions (Monthly)";

pub fn financial_summary(
    assets: &[AssetRecord],
    records: &[MaintenanceRecord],
    subscriptions: &[SubscriptionRecord],
    today: NaiveDate,
) -> FinancialSummaryDto {
    let first_of_month = month_start(today);
    let asset_value: Decimal = assets.iter().filter_map(|asset| asset.current_value).sum();
    let maintenance: Decimal = records
        .iter()
        .filter(|record| record.performed_date >= first_of_month)
        .filter_map(|record| record.cost)
        .sum();
    let subscription = cost_for_cycle(subscriptions, MONTHLY);
    let monthly_total = maintenance + subscription;

    let mut cost_by_category = BTreeMap::new();
    for (label, amount) in [
        (ASSET_VALUE, asset_value),
        (MAINTENANCE_THIS_MONTH, maintenance),
        (SUBSCRIPTIONS_MONTHLY, subscription),
    ] {
        if let Some(value) = positive_amount(amount) {
            cost_by_category.insert(label.to_string(), value);
        }
    }

    FinancialSummaryDto {
        total_asset_value: positive_amount(asset_value),
        maintenance_cost_this_month: positive_amount(maintenance),
        subscription_cost_this_month: positive_amount(subscription),
        total_monthly_costs: positive_amount(monthly_total),
        projected_annual_costs: positive_amount(monthly_total * Decimal::from(12)),
        cost_by_category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(performed_date: NaiveDate, cents: i64) -> MaintenanceRecord {
        MaintenanceRecord {
            id: 1,
            asset_id: 1,
            schedule_id: None,
            performed_by: 1,
            maintenance_type: "Inspection".to_string(),
            performed_date,
            duration_hours: None,
            cost: Some(Decimal::new(cents, 2)),
            description: None,
            status: "COMPLETED".to_string(),
            created_at: Utc
                .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                .single()
                .expect("timestamp"),
        }
    }

    #[test]
    fn projects_monthly_costs_over_a_year() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).expect("date");
        let records = vec![
            record(NaiveDate::from_ymd_opt(2024, 6, 2).expect("date"), 10_000),
            record(NaiveDate::from_ymd_opt(2024, 5, 31).expect("date"), 99_900),
        ];
        let subscriptions = vec![SubscriptionRecord {
            id: 1,
            name: "Office".to_string(),
            vendor_id: None,
            expiry_date: None,
            cost: Some(Decimal::new(5_000, 2)),
            billing_cycle: Some("monthly".to_string()),
            auto_renewal: true,
            status: "ACTIVE".to_string(),
        }];
        let summary = financial_summary(&[], &records, &subscriptions, today);
        assert_eq!(summary.maintenance_cost_this_month.as_deref(), Some("100.00"));
        assert_eq!(summary.subscription_cost_this_month.as_deref(), Some("50.00"));
        assert_eq!(summary.total_monthly_costs.as_deref(), Some("150.00"));
        assert_eq!(summary.projected_annual_costs.as_deref(), Some("1800.00"));
        assert!(summary.total_asset_value.is_none());
        assert!(!summary.cost_by_category.contains_key(ASSET_VALUE));
        assert_eq!(
            summary.cost_by_category.get(SUBSCRIPTIONS_MONTHLY).map(String::as_str),
            Some("50.00")
        );
    }
}
