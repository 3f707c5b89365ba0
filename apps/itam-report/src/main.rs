//! 报表入口：按配置装配存储与服务，运行一个视图并以 JSON 输出。

use api_contract::{ApiResponse, DashboardFiltersDto, DateRangeDto};
use domain::{Clock, ServiceError, SystemClock};
use itam_config::{AppConfig, FilterConfig, ReportKind, StorageBackend};
use itam_dashboard::DashboardService;
use itam_issues::IssueService;
use itam_scheduling::MaintenanceScheduleService;
use itam_storage::{StorageSnapshot, StoreSet, connect_pool, verify_pool};
use itam_telemetry::{init_tracing, new_trace_id};
use serde::Serialize;
use std::sync::Arc;
use tracing::{Instrument, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在）
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing();

    let stores = build_stores(&config).await?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let filter = to_filters(&config.filter);

    let span = tracing::info_span!(
        "report",
        trace_id = %new_trace_id(),
        report = config.report.as_str()
    );
    let (body, ok) = run_report(config.report, &stores, clock, &filter)
        .instrument(span)
        .await?;
    println!("{body}");
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

async fn build_stores(config: &AppConfig) -> Result<StoreSet, Box<dyn std::error::Error>> {
    match config.storage {
        StorageBackend::Memory => {
            let snapshot = match &config.snapshot_path {
                Some(path) => StorageSnapshot::load(path)?,
                None => StorageSnapshot::default(),
            };
            info!(
                target: "itam.report",
                snapshot = config.snapshot_path.as_deref().unwrap_or("-"),
                "memory_stores_loaded"
            );
            Ok(StoreSet::in_memory(snapshot))
        }
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or("ITAM_DATABASE_URL is required for postgres storage")?;
            let pool = connect_pool(url, config.db_max_connections).await?;
            verify_pool(&pool).await?;
            info!(
                target: "itam.report",
                max_connections = config.db_max_connections,
                "postgres_pool_ready"
            );
            Ok(StoreSet::postgres(pool))
        }
    }
}

fn to_filters(filter: &FilterConfig) -> DashboardFiltersDto {
    DashboardFiltersDto {
        location_id: filter.location_id,
        category_id: filter.category_id,
        date_range: filter
            .date_range
            .map(|(start_date, end_date)| DateRangeDto {
                start_date,
                end_date,
            }),
    }
}

async fn run_report(
    kind: ReportKind,
    stores: &StoreSet,
    clock: Arc<dyn Clock>,
    filter: &DashboardFiltersDto,
) -> Result<(String, bool), serde_json::Error> {
    let dashboard = DashboardService::from_stores(stores, clock.clone());
    match kind {
        ReportKind::Overview => render(dashboard.overview(filter).await),
        ReportKind::Assets => render(dashboard.asset_metrics(filter).await),
        ReportKind::Maintenance => render(dashboard.maintenance_metrics(filter).await),
        ReportKind::Licenses => render(dashboard.license_metrics().await),
        ReportKind::Subscriptions => render(dashboard.subscription_metrics().await),
        ReportKind::Issues => render(dashboard.issue_metrics().await),
        ReportKind::Upcoming => render(dashboard.upcoming_events().await),
        ReportKind::Financial => render(dashboard.financial_summary().await),
        ReportKind::ScheduleSummary => {
            let schedules = MaintenanceScheduleService::from_stores(stores, clock);
            render(schedules.summary().await)
        }
        ReportKind::IssueStats => {
            let issues = IssueService::from_stores(stores, clock);
            render(issues.issue_stats().await)
        }
    }
}

/// 成功输出数据封装，失败输出错误封装并标记为失败。
fn render<T: Serialize>(
    result: Result<T, ServiceError>,
) -> Result<(String, bool), serde_json::Error> {
    match result {
        Ok(data) => Ok((serde_json::to_string_pretty(&ApiResponse::success(data))?, true)),
        Err(err) => {
            warn!(target: "itam.report", code = err.kind(), error = %err, "report_failed");
            let envelope = ApiResponse::<()>::error(err.kind(), err.public_message());
            Ok((serde_json::to_string_pretty(&envelope)?, false))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_config_maps_to_dashboard_filter() {
        let day = "2024-06-01".parse().expect("date");
        let filter = to_filters(&FilterConfig {
            location_id: Some(1),
            category_id: None,
            date_range: Some((day, day)),
        });
        assert_eq!(filter.location_id, Some(1));
        assert!(filter.category_id.is_none());
        let range = filter.date_range.expect("range");
        assert_eq!(range.start_date, range.end_date);
    }

    #[test]
    fn service_errors_render_the_error_envelope() {
        let (body, ok) =
            render::<()>(Err(ServiceError::not_found("Issue not found"))).expect("render");
        assert!(!ok);
        let value: serde_json::Value = serde_json::from_str(&body).expect("json");
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], "RESOURCE.NOT_FOUND");
    }
}
