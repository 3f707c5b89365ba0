//! 数据库连接池
//!
//! - `connect_pool`：按配置上限建立 Postgres 连接池
//! - `verify_pool`：启动时做一次往返探测，连接问题在运行报表前暴露

use crate::error::StorageError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

/// 获取连接的等待上限。
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// 建立 Postgres 连接池；上限至少为 1。
pub async fn connect_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, StorageError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn verify_pool(pool: &PgPool) -> Result<(), StorageError> {
    sqlx::query("select 1").execute(pool).await?;
    Ok(())
}
