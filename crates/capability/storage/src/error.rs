//! 存储层错误：对上层只暴露消息文本。
//!
//! 来源包括 SQL 执行与连接、快照读取与解析、非法枚举值与锁中毒。

/// 存储错误（不区分来源）。
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct StorageError {
    message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// 内存存储的锁已中毒。
    pub fn poisoned(store: &str) -> Self {
        Self::new(format!("{store} lock poisoned"))
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("snapshot parse failed: {err}"))
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("snapshot read failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_failures_keep_their_origin() {
        let err: StorageError = serde_json::from_str::<Vec<i32>>("{")
            .map_err(StorageError::from)
            .expect_err("invalid json");
        assert!(err.to_string().starts_with("snapshot parse failed"));
        assert_eq!(StorageError::poisoned("issues").to_string(), "issues lock poisoned");
    }
}
