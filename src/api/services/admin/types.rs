//! Admin API 类型定义

use serde::{Deserialize, Serialize};

use crate::ledger::LedgerRecord;

#[derive(Deserialize, Clone, Debug)]
pub struct GenerateLinkQuery {
    pub username: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GenerateLinksRequest {
    pub usernames: Vec<String>,
}

/// 单条签发结果
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GeneratedLink {
    pub username: String,
    pub token: String,
    pub url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GenerateLinkError {
    pub username: String,
    pub error: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct GenerateLinksResponse {
    pub links: Vec<GeneratedLink>,
    pub errors: Vec<GenerateLinkError>,
}

/// 账本记录的对外视图
#[derive(Serialize, Clone, Debug)]
pub struct UserRecordResponse {
    pub username: String,
    pub created_at: String,
    pub visit_count: usize,
    pub last_visit_at: Option<String>,
    pub visits: Vec<VisitResponse>,
}

#[derive(Serialize, Clone, Debug)]
pub struct VisitResponse {
    pub timestamp: String,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub host: Option<String>,
    pub referer: Option<String>,
}

impl From<LedgerRecord> for UserRecordResponse {
    fn from(record: LedgerRecord) -> Self {
        let last_visit_at = record.last_visit().map(|v| v.occurred_at.to_rfc3339());
        Self {
            username: record.identity,
            created_at: record.created_at.to_rfc3339(),
            visit_count: record.visits.len(),
            last_visit_at,
            visits: record
                .visits
                .into_iter()
                .map(|v| VisitResponse {
                    timestamp: v.occurred_at.to_rfc3339(),
                    ip: v.source_address,
                    user_agent: v.user_agent,
                    host: v.host,
                    referer: v.referer,
                })
                .collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClearResponse {
    pub deleted: u64,
}
