//! 引擎错误分类。

/// 引擎对外错误。
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ServiceError {
    /// 输入非法（枚举值、非正 id、日期/金额格式、空文本），写入前拒绝。
    #[error("validation error: {0}")]
    Validation(String),
    /// 引用的资产/用户/计划/问题不存在。
    #[error("not found: {0}")]
    NotFound(String),
    /// 唯一性冲突或状态比较交换失败。
    #[error("conflict: {0}")]
    Conflict(String),
    /// 未归类的内部错误。
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// 稳定错误码（响应封装使用）。
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "INVALID.REQUEST",
            ServiceError::NotFound(_) => "RESOURCE.NOT_FOUND",
            ServiceError::Conflict(_) => "RESOURCE.CONFLICT",
            ServiceError::Storage(_) => "INTERNAL.ERROR",
        }
    }

    /// 对外消息：内部错误不暴露细节。
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::Validation(message)
            | ServiceError::NotFound(message)
            | ServiceError::Conflict(message) => message.clone(),
            ServiceError::Storage(_) => "internal error".to_string(),
        }
    }
}
