//! 稳定的 DTO 与 API 响应契约。
//!
//! 请求体中的日期与金额保持字符串形式，由业务层统一校验；
//! 响应体中的日期使用 ISO 格式，金额使用十进制字符串。

pub mod dashboard;
pub mod issue;
pub mod schedule;

pub use dashboard::*;
pub use issue::*;
pub use schedule::*;

use serde::Serialize;

/// 标准 API 响应封装。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

pub(crate) fn default_true() -> bool {
    true
}
