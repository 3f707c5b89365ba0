//! 报表运行配置加载。

use chrono::NaiveDate;
use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 存储后端。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres,
}

/// 单次运行输出的视图。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Overview,
    Assets,
    Maintenance,
    Licenses,
    Subscriptions,
    Issues,
    Upcoming,
    Financial,
    ScheduleSummary,
    IssueStats,
}

impl ReportKind {
    pub fn parse(value: &str) -> Option<Self> {
        let kind = match value {
            "overview" => Self::Overview,
            "assets" => Self::Assets,
            "maintenance" => Self::Maintenance,
            "licenses" => Self::Licenses,
            "subscriptions" => Self::Subscriptions,
            "issues" => Self::Issues,
            "upcoming" => Self::Upcoming,
            "financial" => Self::Financial,
            "schedule-summary" => Self::ScheduleSummary,
            "issue-stats" => Self::IssueStats,
            _ => return None,
        };
        Some(kind)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Assets => "assets",
            Self::Maintenance => "maintenance",
            Self::Licenses => "licenses",
            Self::Subscriptions => "subscriptions",
            Self::Issues => "issues",
            Self::Upcoming => "upcoming",
            Self::Financial => "financial",
            Self::ScheduleSummary => "schedule-summary",
            Self::IssueStats => "issue-stats",
        }
    }
}

/// 仪表盘过滤配置。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    pub location_id: Option<i32>,
    pub category_id: Option<i32>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub snapshot_path: Option<String>,
    pub report: ReportKind,
    pub filter: FilterConfig,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let storage = match read_optional("ITAM_STORAGE").as_deref() {
            None | Some("memory") => StorageBackend::Memory,
            Some("postgres") => StorageBackend::Postgres,
            Some(other) => {
                return Err(ConfigError::Invalid(
                    "ITAM_STORAGE".to_string(),
                    other.to_string(),
                ));
            }
        };
        let database_url = read_optional("ITAM_DATABASE_URL");
        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("ITAM_DATABASE_URL".to_string()));
        }
        let db_max_connections = read_u32_with_default("ITAM_DB_MAX_CONNECTIONS", 8)?;
        let snapshot_path = read_optional("ITAM_SNAPSHOT_PATH");
        let report = match read_optional("ITAM_REPORT") {
            None => ReportKind::Overview,
            Some(value) => ReportKind::parse(&value)
                .ok_or_else(|| ConfigError::Invalid("ITAM_REPORT".to_string(), value))?,
        };
        let location_id = read_optional_id("ITAM_FILTER_LOCATION_ID")?;
        let category_id = read_optional_id("ITAM_FILTER_CATEGORY_ID")?;
        let start = read_optional_date("ITAM_FILTER_START")?;
        let end = read_optional_date("ITAM_FILTER_END")?;
        let date_range = match (start, end) {
            (Some(start), Some(end)) => Some((start, end)),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing("ITAM_FILTER_END".to_string())),
            (None, Some(_)) => {
                return Err(ConfigError::Missing("ITAM_FILTER_START".to_string()));
            }
        };

        Ok(Self {
            storage,
            database_url,
            db_max_connections,
            snapshot_path,
            report,
            filter: FilterConfig {
                location_id,
                category_id,
                date_range,
            },
        })
    }
}

fn read_u32_with_default(key: &str, default: u32) -> Result<u32, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u32>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn read_optional_id(key: &str) -> Result<Option<i32>, ConfigError> {
    match read_optional(key) {
        None => Ok(None),
        Some(value) => match value.parse::<i32>() {
            Ok(id) if id > 0 => Ok(Some(id)),
            _ => Err(ConfigError::Invalid(key.to_string(), value)),
        },
    }
}

fn read_optional_date(key: &str) -> Result<Option<NaiveDate>, ConfigError> {
    match read_optional(key) {
        None => Ok(None),
        Some(value) => NaiveDate::parse_from_str(&value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ConfigError::Invalid(key.to_string(), value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_kind_round_trips_names() {
        assert_eq!(
            ReportKind::parse("schedule-summary"),
            Some(ReportKind::ScheduleSummary)
        );
        assert_eq!(ReportKind::IssueStats.as_str(), "issue-stats");
        assert!(ReportKind::parse("Overview").is_none());
    }
}
