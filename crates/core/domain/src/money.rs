//! 金额约定：非负、最多两位小数、上限 99,999,999.99。

use crate::error::ServiceError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// 金额上限。
pub fn max_amount() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

/// 解析并校验金额字符串。
pub fn parse_amount(field: &str, value: &str) -> Result<Decimal, ServiceError> {
    let amount = Decimal::from_str(value.trim()).map_err(|_| {
        ServiceError::validation(format!("{field} must be a valid decimal number"))
    })?;
    if amount < Decimal::ZERO {
        return Err(ServiceError::validation(format!("{field} cannot be negative")));
    }
    if amount.normalize().scale() > 2 {
        return Err(ServiceError::validation(format!(
            "{field} cannot have more than 2 decimal places"
        )));
    }
    if amount > max_amount() {
        return Err(ServiceError::validation(format!(
            "{field} is too large (max 99999999.99)"
        )));
    }
    Ok(amount)
}

/// 仅当严格大于零时输出。
pub fn positive_amount(amount: Decimal) -> Option<String> {
    if amount > Decimal::ZERO {
        Some(amount.to_string())
    } else {
        None
    }
}
