use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 一次访问事件，兑换时从请求上下文采集，写入后不可修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitEvent {
    pub occurred_at: DateTime<Utc>,
    pub source_address: Option<String>,
    pub user_agent: Option<String>,
    pub host: Option<String>,
    pub referer: Option<String>,
}

impl VisitEvent {
    /// 只有时间戳的事件（CLI、测试等没有请求上下文的场景）
    pub fn at(occurred_at: DateTime<Utc>) -> Self {
        Self {
            occurred_at,
            source_address: None,
            user_agent: None,
            host: None,
            referer: None,
        }
    }

    pub fn now() -> Self {
        Self::at(Utc::now())
    }
}

/// 某个标识的点击账本记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub identity: String,
    /// 按写入顺序排列，最新的在最后
    pub visits: Vec<VisitEvent>,
    pub created_at: DateTime<Utc>,
}

impl LedgerRecord {
    pub fn visit_count(&self) -> usize {
        self.visits.len()
    }

    pub fn last_visit(&self) -> Option<&VisitEvent> {
        self.visits.last()
    }
}
