//! 维护计划请求校验：写入前拒绝非法输入。

use api_contract::{CreateMaintenanceScheduleRequest, UpdateMaintenanceScheduleRequest};
use chrono::NaiveDate;
use domain::money::parse_amount;
use domain::recurrence::MAX_FREQUENCY_DAYS;
use domain::{Priority, ServiceError};
use itam_storage::MaintenanceScheduleUpdate;

/// 主键必须为正整数。
pub fn validate_id(id: i32, field: &str) -> Result<(), ServiceError> {
    if id <= 0 {
        return Err(ServiceError::validation(format!(
            "{field} must be a positive integer"
        )));
    }
    Ok(())
}

/// 解析 `YYYY-MM-DD` 日期。
pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate, ServiceError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ServiceError::validation(format!("{field} must be in format YYYY-MM-DD")))
}

/// 优先级（大小写不敏感）。
pub fn parse_priority(value: &str) -> Result<Priority, ServiceError> {
    Priority::parse(value).ok_or_else(|| {
        let valid: Vec<&str> = Priority::ALL.iter().map(|p| p.as_str()).collect();
        ServiceError::validation(format!(
            "Invalid priority. Valid priorities: {}",
            valid.join(", ")
        ))
    })
}

/// 创建与更新共用的字段视图。
struct ScheduleFields<'a> {
    maintenance_type_id: Option<i32>,
    maintenance_type: Option<&'a str>,
    frequency_days: i32,
    last_performed: Option<&'a str>,
    next_due: &'a str,
    assigned_to: Option<i32>,
    priority: Option<&'a str>,
    estimated_cost: Option<&'a str>,
    notes: Option<&'a str>,
    is_active: bool,
}

impl<'a> From<&'a CreateMaintenanceScheduleRequest> for ScheduleFields<'a> {
    fn from(request: &'a CreateMaintenanceScheduleRequest) -> Self {
        Self {
            maintenance_type_id: request.maintenance_type_id,
            maintenance_type: request.maintenance_type.as_deref(),
            frequency_days: request.frequency_days,
            last_performed: request.last_performed.as_deref(),
            next_due: &request.next_due,
            assigned_to: request.assigned_to,
            priority: request.priority.as_deref(),
            estimated_cost: request.estimated_cost.as_deref(),
            notes: request.notes.as_deref(),
            is_active: request.is_active,
        }
    }
}

impl<'a> From<&'a UpdateMaintenanceScheduleRequest> for ScheduleFields<'a> {
    fn from(request: &'a UpdateMaintenanceScheduleRequest) -> Self {
        Self {
            maintenance_type_id: request.maintenance_type_id,
            maintenance_type: request.maintenance_type.as_deref(),
            frequency_days: request.frequency_days,
            last_performed: request.last_performed.as_deref(),
            next_due: &request.next_due,
            assigned_to: request.assigned_to,
            priority: request.priority.as_deref(),
            estimated_cost: request.estimated_cost.as_deref(),
            notes: request.notes.as_deref(),
            is_active: request.is_active,
        }
    }
}

fn validate_fields(fields: ScheduleFields<'_>) -> Result<MaintenanceScheduleUpdate, ServiceError> {
    if fields.frequency_days <= 0 {
        return Err(ServiceError::validation("Frequency days must be positive"));
    }
    if fields.frequency_days > MAX_FREQUENCY_DAYS {
        return Err(ServiceError::validation(
            "Frequency days cannot exceed 10 years",
        ));
    }
    let next_due = parse_date(fields.next_due, "Next due date")?;
    let last_performed = fields
        .last_performed
        .map(|value| parse_date(value, "Last performed date"))
        .transpose()?;
    let priority = fields.priority.map(parse_priority).transpose()?;
    let estimated_cost = fields
        .estimated_cost
        .map(|value| parse_amount("Estimated cost", value))
        .transpose()?;
    let type_label_missing = fields
        .maintenance_type
        .is_none_or(|label| label.trim().is_empty());
    if fields.maintenance_type_id.is_some() && type_label_missing {
        return Err(ServiceError::validation(
            "Maintenance type name is required when maintenance type ID is provided",
        ));
    }
    if let Some(id) = fields.maintenance_type_id
        && id <= 0
    {
        return Err(ServiceError::validation("Invalid maintenance type ID"));
    }
    if let Some(id) = fields.assigned_to
        && id <= 0
    {
        return Err(ServiceError::validation("Invalid assigned user ID"));
    }

    Ok(MaintenanceScheduleUpdate {
        maintenance_type_id: fields.maintenance_type_id,
        maintenance_type: fields.maintenance_type.map(str::to_string),
        frequency_days: fields.frequency_days,
        last_performed,
        next_due,
        assigned_to: fields.assigned_to,
        priority,
        estimated_cost,
        notes: fields.notes.map(str::to_string),
        is_active: fields.is_active,
    })
}

/// 校验创建请求，返回资产 id 与规范化字段。
pub fn validate_create(
    request: &CreateMaintenanceScheduleRequest,
) -> Result<(i32, MaintenanceScheduleUpdate), ServiceError> {
    if request.asset_id <= 0 {
        return Err(ServiceError::validation("Invalid asset ID"));
    }
    Ok((request.asset_id, validate_fields(request.into())?))
}

/// 校验更新请求（资产不可变更）。
pub fn validate_update(
    request: &UpdateMaintenanceScheduleRequest,
) -> Result<MaintenanceScheduleUpdate, ServiceError> {
    validate_fields(request.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_positive() {
        assert!(validate_id(1, "Schedule ID").is_ok());
        let err = validate_id(0, "Schedule ID").expect_err("zero");
        assert_eq!(err.public_message(), "Schedule ID must be a positive integer");
        assert!(matches!(validate_id(-3, "Asset ID"), Err(ServiceError::Validation(_))));
    }

    fn request() -> UpdateMaintenanceScheduleRequest {
        UpdateMaintenanceScheduleRequest {
            maintenance_type_id: None,
            maintenance_type: Some("Inspection".to_string()),
            frequency_days: 30,
            last_performed: None,
            next_due: "2024-01-10".to_string(),
            assigned_to: None,
            priority: Some("high".to_string()),
            estimated_cost: Some("120.50".to_string()),
            notes: None,
            is_active: true,
        }
    }

    #[test]
    fn normalizes_valid_request() {
        let update = validate_update(&request()).expect("valid");
        assert_eq!(update.priority, Some(Priority::High));
        assert_eq!(
            update.next_due,
            NaiveDate::from_ymd_opt(2024, 1, 10).expect("date")
        );
        assert_eq!(
            update.estimated_cost.map(|cost| cost.to_string()),
            Some("120.50".to_string())
        );
    }

    #[test]
    fn rejects_frequency_out_of_bounds() {
        for frequency in [0, -5, 3651] {
            let mut req = request();
            req.frequency_days = frequency;
            assert!(matches!(
                validate_update(&req),
                Err(ServiceError::Validation(_))
            ));
        }
    }

    #[test]
    fn rejects_bad_date_and_priority() {
        let mut req = request();
        req.next_due = "10/01/2024".to_string();
        assert!(matches!(
            validate_update(&req),
            Err(ServiceError::Validation(message))
                if message == "Next due date must be in format YYYY-MM-DD"
        ));

        let mut req = request();
        req.priority = Some("URGENT".to_string());
        assert!(matches!(
            validate_update(&req),
            Err(ServiceError::Validation(message)) if message.starts_with("Invalid priority")
        ));
    }

    #[test]
    fn type_id_requires_label() {
        let mut req = request();
        req.maintenance_type_id = Some(2);
        req.maintenance_type = Some("  ".to_string());
        assert!(matches!(
            validate_update(&req),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn rejects_three_fraction_digits() {
        let mut req = request();
        req.estimated_cost = Some("10.125".to_string());
        assert!(validate_update(&req).is_err());
    }
}
