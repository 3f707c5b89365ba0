//! 资产问题请求校验。

use api_contract::{CreateAssetIssueRequest, UpdateAssetIssueRequest};
use chrono::{DateTime, NaiveDateTime, Utc};
use domain::{IssueStatus, IssueType, ServiceError, Severity};

/// 问题描述最大长度（字符）。
pub const MAX_DESCRIPTION_CHARS: usize = 5000;
/// 问题类型最大长度（字符）。
pub const MAX_ISSUE_TYPE_CHARS: usize = 50;

pub fn validate_id(id: i32, field: &str) -> Result<(), ServiceError> {
    if id <= 0 {
        return Err(ServiceError::validation(format!(
            "{field} must be a positive integer"
        )));
    }
    Ok(())
}

fn one_of<T: Copy>(all: &[T], name: fn(&T) -> &'static str) -> String {
    all.iter().map(name).collect::<Vec<_>>().join(", ")
}

pub fn parse_issue_type(value: &str) -> Result<IssueType, ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::validation("Issue type cannot be empty"));
    }
    if value.chars().count() > MAX_ISSUE_TYPE_CHARS {
        return Err(ServiceError::validation(
            "Issue type cannot exceed 50 characters",
        ));
    }
    IssueType::parse(value).ok_or_else(|| {
        ServiceError::validation(format!(
            "Issue type must be one of: {}",
            one_of(&IssueType::ALL, IssueType::as_str)
        ))
    })
}

pub fn parse_severity(value: &str) -> Result<Severity, ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::validation("Severity cannot be empty"));
    }
    Severity::parse(value).ok_or_else(|| {
        ServiceError::validation(format!(
            "Severity must be one of: {}",
            one_of(&Severity::ALL, Severity::as_str)
        ))
    })
}

pub fn parse_status(value: &str) -> Result<IssueStatus, ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::validation("Status cannot be empty"));
    }
    IssueStatus::parse(value).ok_or_else(|| {
        ServiceError::validation(format!(
            "Status must be one of: {}",
            one_of(&IssueStatus::ALL, IssueStatus::as_str)
        ))
    })
}

pub fn validate_description(value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::validation("Issue description cannot be empty"));
    }
    if value.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(ServiceError::validation(
            "Issue description cannot exceed 5000 characters",
        ));
    }
    Ok(())
}

/// 解析不带时区的 ISO 日期时间（按 UTC 解释）。
pub fn parse_date_time(value: &str, field: &str) -> Result<DateTime<Utc>, ServiceError> {
    let value = value.trim();
    value
        .parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            ServiceError::validation(format!("{field} must be a valid date-time (ISO format)"))
        })
}

/// 通过校验的问题字段。
#[derive(Debug, Clone)]
pub struct IssueDraft {
    pub asset_id: i32,
    pub reported_by: i32,
    pub assigned_to: Option<i32>,
    pub issue_type: IssueType,
    pub severity: Severity,
    pub issue_description: String,
    pub resolution_notes: Option<String>,
    pub status: IssueStatus,
}

struct IssueFields<'a> {
    asset_id: i32,
    reported_by: i32,
    assigned_to: Option<i32>,
    issue_type: &'a str,
    severity: &'a str,
    issue_description: &'a str,
    resolution_notes: Option<&'a str>,
    status: &'a str,
}

impl<'a> From<&'a CreateAssetIssueRequest> for IssueFields<'a> {
    fn from(request: &'a CreateAssetIssueRequest) -> Self {
        Self {
            asset_id: request.asset_id,
            reported_by: request.reported_by,
            assigned_to: request.assigned_to,
            issue_type: &request.issue_type,
            severity: &request.severity,
            issue_description: &request.issue_description,
            resolution_notes: request.resolution_notes.as_deref(),
            status: &request.status,
        }
    }
}

impl<'a> From<&'a UpdateAssetIssueRequest> for IssueFields<'a> {
    fn from(request: &'a UpdateAssetIssueRequest) -> Self {
        Self {
            asset_id: request.asset_id,
            reported_by: request.reported_by,
            assigned_to: request.assigned_to,
            issue_type: &request.issue_type,
            severity: &request.severity,
            issue_description: &request.issue_description,
            resolution_notes: request.resolution_notes.as_deref(),
            status: &request.status,
        }
    }
}

fn validate_fields(fields: IssueFields<'_>) -> Result<IssueDraft, ServiceError> {
    validate_id(fields.asset_id, "Asset ID")?;
    validate_id(fields.reported_by, "Reported By")?;
    let issue_type = parse_issue_type(fields.issue_type)?;
    let severity = parse_severity(fields.severity)?;
    let status = parse_status(fields.status)?;
    if let Some(assigned_to) = fields.assigned_to {
        validate_id(assigned_to, "Assigned To")?;
    }
    validate_description(fields.issue_description)?;
    Ok(IssueDraft {
        asset_id: fields.asset_id,
        reported_by: fields.reported_by,
        assigned_to: fields.assigned_to,
        issue_type,
        severity,
        issue_description: fields.issue_description.to_string(),
        resolution_notes: fields.resolution_notes.map(str::to_string),
        status,
    })
}

pub fn validate_create(request: &CreateAssetIssueRequest) -> Result<IssueDraft, ServiceError> {
    validate_fields(request.into())
}

pub fn validate_update(request: &UpdateAssetIssueRequest) -> Result<IssueDraft, ServiceError> {
    validate_fields(request.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_checks_are_exact_and_ordered() {
        assert_eq!(
            parse_issue_type("HARDWARE_FAILURE").expect("type"),
            IssueType::HardwareFailure
        );
        assert!(matches!(
            parse_issue_type("hardware_failure"),
            Err(ServiceError::Validation(message)) if message.starts_with("Issue type must be one of")
        ));
        assert_eq!(
            parse_issue_type(" "),
            Err(ServiceError::validation("Issue type cannot be empty"))
        );
        assert_eq!(
            parse_issue_type(&"X".repeat(51)),
            Err(ServiceError::validation("Issue type cannot exceed 50 characters"))
        );
        assert_eq!(
            parse_severity(""),
            Err(ServiceError::validation("Severity cannot be empty"))
        );
        assert!(parse_status("REOPENED").is_err());
    }

    #[test]
    fn description_length_counts_characters() {
        assert!(validate_description(&"é".repeat(5000)).is_ok());
        assert!(validate_description(&"a".repeat(5001)).is_err());
        assert!(validate_description("   ").is_err());
    }

    #[test]
    fn date_time_accepts_iso_local_forms() {
        let parsed = parse_date_time("2024-03-01T08:30:00", "Start Date").expect("seconds");
        assert_eq!(parsed.to_rfc3339(), "2024-03-01T08:30:00+00:00");
        assert!(parse_date_time("2024-03-01T08:30", "Start Date").is_ok());
        assert_eq!(
            parse_date_time("2024-03-01", "Start Date"),
            Err(ServiceError::validation(
                "Start Date must be a valid date-time (ISO format)"
            ))
        );
    }

    #[test]
    fn non_positive_ids_are_rejected() {
        assert_eq!(
            validate_id(0, "Asset ID"),
            Err(ServiceError::validation("Asset ID must be a positive integer"))
        );
    }
}
