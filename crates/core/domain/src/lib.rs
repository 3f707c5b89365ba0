//! 资产生命周期领域规则：枚举、周期计算、问题状态机、时钟与错误分类。

pub mod enums;
pub mod error;
pub mod lifecycle;
pub mod money;
pub mod recurrence;

pub use enums::{IssueStatus, IssueType, Priority, Severity};
pub use error::ServiceError;
pub use lifecycle::IssueTimestamps;

use chrono::{DateTime, NaiveDate, Utc};

/// 时钟抽象：所有"今天/现在"的判断都经由此接口。
pub trait Clock: Send + Sync {
    /// 当前时间戳（审计字段使用）。
    fn now(&self) -> DateTime<Utc>;

    /// 当前日历日期（到期/过期判断使用）。
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// 系统时钟：日期与时间戳同取 UTC，月份边界与审计时间一致。
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 固定时钟（用于测试或离线重放）。
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// 以指定日期零点构造。
    pub fn at_date(date: NaiveDate) -> Self {
        Self {
            now: date.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
