//! 追踪初始化、trace_id 生成与生命周期计数器。
//!
//! 计数器只用于观测，不参与任何业务结果计算。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 计数器快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub schedules_created: u64,
    pub schedules_completed: u64,
    pub issues_created: u64,
    pub issue_transitions: u64,
    pub transition_conflicts: u64,
    pub dashboard_builds: u64,
}

/// 进程级计数器。
pub struct TelemetryMetrics {
    schedules_created: AtomicU64,
    schedules_completed: AtomicU64,
    issues_created: AtomicU64,
    issue_transitions: AtomicU64,
    transition_conflicts: AtomicU64,
    dashboard_builds: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            schedules_created: AtomicU64::new(0),
            schedules_completed: AtomicU64::new(0),
            issues_created: AtomicU64::new(0),
            issue_transitions: AtomicU64::new(0),
            transition_conflicts: AtomicU64::new(0),
            dashboard_builds: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            schedules_created: self.schedules_created.load(Ordering::Relaxed),
            schedules_completed: self.schedules_completed.load(Ordering::Relaxed),
            issues_created: self.issues_created.load(Ordering::Relaxed),
            issue_transitions: self.issue_transitions.load(Ordering::Relaxed),
            transition_conflicts: self.transition_conflicts.load(Ordering::Relaxed),
            dashboard_builds: self.dashboard_builds.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局计数器实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 trace_id。
pub fn new_trace_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 记录维护计划创建次数。
pub fn record_schedule_created() {
    metrics().schedules_created.fetch_add(1, Ordering::Relaxed);
}

/// 记录维护完成推进次数。
pub fn record_schedule_completed() {
    metrics()
        .schedules_completed
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录问题创建条数（批量按条计）。
pub fn record_issues_created(count: u64) {
    metrics().issues_created.fetch_add(count, Ordering::Relaxed);
}

/// 记录成功的问题状态变更。
pub fn record_issue_transition() {
    metrics().issue_transitions.fetch_add(1, Ordering::Relaxed);
}

/// 记录比较交换失败次数。
pub fn record_transition_conflict() {
    metrics()
        .transition_conflicts
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录仪表盘视图构建次数。
pub fn record_dashboard_build() {
    metrics().dashboard_builds.fetch_add(1, Ordering::Relaxed);
}
