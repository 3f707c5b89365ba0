//! 订阅指标。

use crate::calendar::{UNKNOWN, count_by, expiring_soon, is_active, is_expired};
use api_contract::SubscriptionMetricsDto;
use chrono::NaiveDate;
use domain::money::positive_amount;
use itam_storage::{SubscriptionRecord, VendorRecord};
use rust_decimal::Decimal;
use std::collections::HashMap;

pub const MONTHLY: &str = "monthly";
pub const YEARLY: &str = "yearly";

/// 指定计费周期的费用合计。
pub fn cost_for_cycle(subscriptions: &[SubscriptionRecord], cycle: &str) -> Decimal {
    subscriptions
        .iter()
        .filter(|subscription| subscription.billing_cycle.as_deref() == Some(cycle))
        .filter_map(|subscription| subscription.cost)
        .sum()
}

pub fn subscription_metrics(
    subscriptions: &[SubscriptionRecord],
    vendors: &[VendorRecord],
    today: NaiveDate,
) -> SubscriptionMetricsDto {
    let vendor_names: HashMap<i32, &str> = vendors
        .iter()
        .map(|vendor| (vendor.id, vendor.name.as_str()))
        .collect();

    SubscriptionMetricsDto {
        total_subscriptions: subscriptions.len(),
        active_subscriptions: subscriptions
            .iter()
            .filter(|subscription| is_active(subscription.expiry_date, today))
            .count(),
        expired_subscriptions: subscriptions
            .iter()
            .filter(|subscription| is_expired(subscription.expiry_date, today))
            .count(),
        expiring_subscriptions: subscriptions
            .iter()
            .filter(|subscription| {
                subscription
                    .expiry_date
                    .is_some_and(|expiry| expiring_soon(expiry, today))
            })
            .count(),
        monthly_cost: positive_amount(cost_for_cycle(subscriptions, MONTHLY)),
        annual_cost: positive_amount(cost_for_cycle(subscriptions, YEARLY)),
        subscriptions_by_vendor: count_by(subscriptions.iter().map(|subscription| {
            subscription
                .vendor_id
                .and_then(|id| vendor_names.get(&id).copied())
                .unwrap_or(UNKNOWN)
                .to_string()
        })),
    }
}
