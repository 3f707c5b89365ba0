//! 仪表盘聚合：每次调用都从存储全量重新计算，不保留缓存。
//!
//! 总览由各子视图独立读取拼装，不同部分可能反映不同时刻的数据。

pub mod assets;
pub mod calendar;
pub mod financial;
pub mod issues;
pub mod licenses;
pub mod maintenance;
pub mod subscriptions;
pub mod upcoming;

use api_contract::{
    AssetMetricsDto, DashboardFiltersDto, DashboardOverviewDto, FinancialSummaryDto,
    IssueMetricsDto, MaintenanceMetricsDto, SoftwareLicenseMetricsDto, SubscriptionMetricsDto,
    UpcomingEventsDto,
};
use domain::{Clock, ServiceError};
use itam_storage::{StorageError, StoreSet};
use itam_telemetry::record_dashboard_build;
use std::sync::Arc;
use tracing::{info, warn};

fn storage_error(err: StorageError) -> ServiceError {
    warn!(target: "itam.dashboard", error = %err, "storage_failed");
    ServiceError::Storage(err.to_string())
}

/// 仪表盘服务（只读）。
pub struct DashboardService {
    stores: StoreSet,
    clock: Arc<dyn Clock>,
}

impl DashboardService {
    pub fn new(stores: StoreSet, clock: Arc<dyn Clock>) -> Self {
        Self { stores, clock }
    }

    pub fn from_stores(stores: &StoreSet, clock: Arc<dyn Clock>) -> Self {
        Self::new(stores.clone(), clock)
    }

    pub async fn asset_metrics(
        &self,
        filter: &DashboardFiltersDto,
    ) -> Result<AssetMetricsDto, ServiceError> {
        let assets = self.stores.assets.list_assets().await.map_err(storage_error)?;
        let categories = self
            .stores
            .categories
            .list_categories()
            .await
            .map_err(storage_error)?;
        let locations = self
            .stores
            .locations
            .list_locations()
            .await
            .map_err(storage_error)?;
        Ok(assets::asset_metrics(
            &assets,
            &categories,
            &locations,
            filter,
            self.clock.today(),
        ))
    }

    pub async fn maintenance_metrics(
        &self,
        filter: &DashboardFiltersDto,
    ) -> Result<MaintenanceMetricsDto, ServiceError> {
        let records = self
            .stores
            .maintenance_records
            .list_maintenance_records()
            .await
            .map_err(storage_error)?;
        let schedules = self
            .stores
            .schedules
            .list_schedules()
            .await
            .map_err(storage_error)?;
        let assets = self.stores.assets.list_assets().await.map_err(storage_error)?;
        Ok(maintenance::maintenance_metrics(
            &records,
            &schedules,
            &assets,
            filter,
            self.clock.today(),
        ))
    }

    pub async fn license_metrics(&self) -> Result<SoftwareLicenseMetricsDto, ServiceError> {
        let licenses = self
            .stores
            .licenses
            .list_licenses()
            .await
            .map_err(storage_error)?;
        let vendors = self.stores.vendors.list_vendors().await.map_err(storage_error)?;
        Ok(licenses::license_metrics(
            &licenses,
            &vendors,
            self.clock.today(),
        ))
    }

    pub async fn subscription_metrics(&self) -> Result<SubscriptionMetricsDto, ServiceError> {
        let subscriptions = self
            .stores
            .subscriptions
            .list_subscriptions()
            .await
            .map_err(storage_error)?;
        let vendors = self.stores.vendors.list_vendors().await.map_err(storage_error)?;
        Ok(subscriptions::subscription_metrics(
            &subscriptions,
            &vendors,
            self.clock.today(),
        ))
    }

    pub async fn issue_metrics(&self) -> Result<IssueMetricsDto, ServiceError> {
        let issues = self.stores.issues.list_issues().await.map_err(storage_error)?;
        Ok(issues::issue_metrics(&issues, self.clock.today()))
    }

    pub async fn upcoming_events(&self) -> Result<UpcomingEventsDto, ServiceError> {
        let schedules = self
            .stores
            .schedules
            .list_schedules()
            .await
            .map_err(storage_error)?;
        let licenses = self
            .stores
            .licenses
            .list_licenses()
            .await
            .map_err(storage_error)?;
        let subscriptions = self
            .stores
            .subscriptions
            .list_subscriptions()
            .await
            .map_err(storage_error)?;
        let assets = self.stores.assets.list_assets().await.map_err(storage_error)?;
        let vendors = self.stores.vendors.list_vendors().await.map_err(storage_error)?;
        Ok(upcoming::upcoming_events(
            &schedules,
            &licenses,
            &subscriptions,
            &assets,
            &vendors,
            self.clock.today(),
        ))
    }

    pub async fn financial_summary(&self) -> Result<FinancialSummaryDto, ServiceError> {
        let assets = self.stores.assets.list_assets().await.map_err(storage_error)?;
        let records = self
            .stores
            .maintenance_records
            .list_maintenance_records()
            .await
            .map_err(storage_error)?;
        let subscriptions = self
            .stores
            .subscriptions
            .list_subscriptions()
            .await
            .map_err(storage_error)?;
        Ok(financial::financial_summary(
            &assets,
            &records,
            &subscriptions,
            self.clock.today(),
        ))
    }

    /// 全部子视图的总览。
    pub async fn overview(
        &self,
        filter: &DashboardFiltersDto,
    ) -> Result<DashboardOverviewDto, ServiceError> {
        let overview = DashboardOverviewDto {
            asset_metrics: self.asset_metrics(filter).await?,
            maintenance_metrics: self.maintenance_metrics(filter).await?,
            software_license_metrics: self.license_metrics().await?,
            subscription_metrics: self.subscription_metrics().await?,
            issue_metrics: self.issue_metrics().await?,
            upcoming_events: self.upcoming_events().await?,
            financial_summary: self.financial_summary().await?,
            last_updated: self.clock.now(),
        };
        record_dashboard_build();
        info!(
            target: "itam.dashboard",
            total_assets = overview.asset_metrics.total_assets,
            total_issues = overview.issue_metrics.total_issues,
            filtered = filter.location_id.is_some()
                || filter.category_id.is_some()
                || filter.date_range.is_some(),
            "dashboard_built"
        );
        Ok(overview)
    }
}
