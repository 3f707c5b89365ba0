//! 封闭枚举：维护优先级、问题类型、严重程度、问题状态。
//!
//! 持久化与对外契约均使用大写下划线字符串（如 `IN_PROGRESS`）。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 维护计划优先级。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Critical => "CRITICAL",
        }
    }

    /// 优先级不区分大小写。
    pub fn parse(value: &str) -> Option<Self> {
        let upper = value.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|item| item.as_str() == upper)
    }
}

/// 问题严重程度。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }

    /// 精确匹配大写取值。
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.as_str() == value)
    }
}

/// 问题类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueType {
    HardwareFailure,
    SoftwareIssue,
    NetworkProblem,
    PerformanceIssue,
    SecurityIncident,
    MaintenanceRequired,
    UserError,
    ConfigurationIssue,
    Other,
}

impl IssueType {
    pub const ALL: [IssueType; 9] = [
        IssueType::HardwareFailure,
        IssueType::SoftwareIssue,
        IssueType::NetworkProblem,
        IssueType::PerformanceIssue,
        IssueType::SecurityIncident,
        IssueType::MaintenanceRequired,
        IssueType::UserError,
        IssueType::ConfigurationIssue,
        IssueType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::HardwareFailure => "HARDWARE_FAILURE",
            IssueType::SoftwareIssue => "SOFTWARE_ISSUE",
            IssueType::NetworkProblem => "NETWORK_PROBLEM",
            IssueType::PerformanceIssue => "PERFORMANCE_ISSUE",
            IssueType::SecurityIncident => "SECURITY_INCIDENT",
            IssueType::MaintenanceRequired => "MAINTENANCE_REQUIRED",
            IssueType::UserError => "USER_ERROR",
            IssueType::ConfigurationIssue => "CONFIGURATION_ISSUE",
            IssueType::Other => "OTHER",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.as_str() == value)
    }
}

/// 问题状态。
///
/// 常规流转：`OPEN → ASSIGNED → IN_PROGRESS → RESOLVED → CLOSED`，
/// 任意状态均可进入 `CANCELLED`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueStatus {
    Open,
    Assigned,
    InProgress,
    Resolved,
    Closed,
    Cancelled,
}

impl IssueStatus {
    pub const ALL: [IssueStatus; 6] = [
        IssueStatus::Open,
        IssueStatus::Assigned,
        IssueStatus::InProgress,
        IssueStatus::Resolved,
        IssueStatus::Closed,
        IssueStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Open => "OPEN",
            IssueStatus::Assigned => "ASSIGNED",
            IssueStatus::InProgress => "IN_PROGRESS",
            IssueStatus::Resolved => "RESOLVED",
            IssueStatus::Closed => "CLOSED",
            IssueStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.as_str() == value)
    }

    /// 尚未被处理的问题（OPEN / ASSIGNED）。
    pub fn is_pending(&self) -> bool {
        matches!(self, IssueStatus::Open | IssueStatus::Assigned)
    }

    /// 已处理完成的问题（RESOLVED / CLOSED）。
    pub fn is_settled(&self) -> bool {
        matches!(self, IssueStatus::Resolved | IssueStatus::Closed)
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(Priority, Severity, IssueType, IssueStatus);
