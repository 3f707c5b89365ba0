//! # PostgreSQL 存储实现模块
//!
//! 本模块提供所有存储接口的 PostgreSQL 实现，用于生产环境。
//!
//! ## 设计原则
//!
//! 1. **参数化查询**：所有 SQL 查询使用参数绑定，禁止字符串拼接用户输入
//! 2. **单语句状态变更**：问题状态的比较交换、计划完成推进均为一条 update
//! 3. **批量原子性**：问题批量创建在单个事务中完成
//! 4. **连接池管理**：使用连接池复用数据库连接
//!
//! ## 包含的实现
//!
//! - **只读协作方** (`reference.rs`)：资产、用户、供应商、位置、分类、维护类型、许可证、订阅
//! - **MaintenanceRecordStore** (`maintenance_record.rs`)：维护事实日志
//! - **MaintenanceScheduleStore** (`schedule.rs`)：维护计划
//! - **AssetIssueStore** (`issue.rs`)：资产问题
//!
//! ## 数据库模式要求
//!
//! 表结构见 crate 根目录下的 `schema.sql`。枚举字段以大写字符串存储，
//! 读取时解析失败视为存储错误。
//!
//! ## 错误处理
//!
//! 所有存储操作返回 `Result<T, StorageError>`：
//!
//! - `sqlx::Error`：自动转换为 `StorageError`
//! - 返回 `Option<T>` 表示"可能不存在"（查询、更新）
//! - 返回 `bool` 表示删除/停用是否命中

pub mod issue;
pub mod maintenance_record;
pub mod reference;
pub mod schedule;

pub use issue::*;
pub use maintenance_record::*;
pub use reference::*;
pub use schedule::*;
