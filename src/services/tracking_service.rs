//! Tracking service
//!
//! Glues the token codec to the click ledger. Shared by the HTTP handlers and
//! the CLI, so both get the same validation and logging.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::{LinktrackError, Result};
use crate::ledger::{ClickLedger, LedgerRecord, VisitEvent};
use crate::token::{Identity, TokenCodec};

/// 签发结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedLink {
    pub identity: Identity,
    pub token: String,
}

/// 批量签发中失败的一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueFailure {
    pub input: String,
    pub error: String,
}

/// 批量签发结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchIssueResult {
    pub issued: Vec<IssuedLink>,
    pub failed: Vec<IssueFailure>,
}

pub struct TrackingService {
    codec: TokenCodec,
    ledger: Arc<dyn ClickLedger>,
}

impl TrackingService {
    pub fn new(codec: TokenCodec, ledger: Arc<dyn ClickLedger>) -> Self {
        Self { codec, ledger }
    }

    pub fn ledger(&self) -> &Arc<dyn ClickLedger> {
        &self.ledger
    }

    /// 为标识签发令牌（去除首尾空白后校验）
    pub fn issue(&self, raw_identity: &str) -> Result<IssuedLink> {
        let identity = Identity::parse(raw_identity.trim())?;
        let token = self.codec.issue(&identity)?;
        debug!("Token issued for identity ({} chars)", identity.char_len());
        Ok(IssuedLink { identity, token })
    }

    /// 批量签发，空行跳过，单项失败不影响其它项
    pub fn issue_many<I, S>(&self, raw_identities: I) -> BatchIssueResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = BatchIssueResult::default();

        for raw in raw_identities {
            let raw = raw.as_ref();
            if raw.trim().is_empty() {
                continue;
            }
            match self.issue(raw) {
                Ok(link) => result.issued.push(link),
                Err(e) => result.failed.push(IssueFailure {
                    input: raw.to_string(),
                    error: e.public_message().to_string(),
                }),
            }
        }

        info!(
            "Batch issue finished: {} issued, {} failed",
            result.issued.len(),
            result.failed.len()
        );
        result
    }

    /// 兑换令牌并记录访问
    ///
    /// 令牌无效时不写账本；格式错误与签名错误原样返回，由调用方统一对外展示。
    pub async fn redeem(&self, token: &str, event: VisitEvent) -> Result<Identity> {
        let identity = match self.codec.redeem(token) {
            Ok(identity) => identity,
            Err(e) => {
                warn!(
                    "Invalid token attempt from IP: {}",
                    event.source_address.as_deref().unwrap_or("unknown")
                );
                debug!("Token rejected: {}", e.error_type());
                return Err(e);
            }
        };

        self.ledger.record_visit(&identity, event).await?;
        info!("Visit recorded via token");
        Ok(identity)
    }

    /// 全部记录，按创建时间倒序
    pub async fn list_all(&self) -> Result<Vec<LedgerRecord>> {
        let records = self.ledger.list_all().await?;
        info!("Fetched ledger records - count: {}", records.len());
        Ok(records)
    }

    pub async fn find(&self, raw_identity: &str) -> Result<LedgerRecord> {
        let identity = Identity::parse(raw_identity)?;
        self.ledger
            .find(&identity)
            .await?
            .ok_or_else(|| LinktrackError::not_found("No visits recorded for this identity"))
    }

    /// 清空账本
    pub async fn clear_all(&self) -> Result<u64> {
        let removed = self.ledger.clear_all().await?;
        warn!("All ledger records deleted - count: {}", removed);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MemoryLedger;

    fn service(secret: &str) -> TrackingService {
        TrackingService::new(
            TokenCodec::new(secret).unwrap(),
            Arc::new(MemoryLedger::new()),
        )
    }

    #[test]
    fn test_issue_trims_input() {
        let svc = service("k1");
        let link = svc.issue("  alice@example.com \n").unwrap();
        assert_eq!(link.identity.as_str(), "alice@example.com");
        assert_eq!(link.token, svc.issue("alice@example.com").unwrap().token);
    }

    #[test]
    fn test_issue_whitespace_only_is_invalid() {
        let svc = service("k1");
        assert!(matches!(
            svc.issue("   "),
            Err(LinktrackError::InvalidIdentity(_))
        ));
    }

    #[test]
    fn test_issue_many_skips_blank_and_reports_failures() {
        let svc = service("k1");
        let long = "x".repeat(101);
        let result = svc.issue_many(["alice", "", "  ", long.as_str(), "bob"]);

        let issued: Vec<_> = result.issued.iter().map(|l| l.identity.as_str()).collect();
        assert_eq!(issued, vec!["alice", "bob"]);
        assert_eq!(result.failed.len(), 1);
        assert_eq!(result.failed[0].input, long);
    }

    #[tokio::test]
    async fn test_redeem_records_visit() {
        let svc = service("k1");
        let link = svc.issue("carol").unwrap();

        let mut event = VisitEvent::now();
        event.source_address = Some("198.51.100.7".to_string());
        let identity = svc.redeem(&link.token, event).await.unwrap();
        assert_eq!(identity.as_str(), "carol");

        let record = svc.find("carol").await.unwrap();
        assert_eq!(record.visit_count(), 1);
        assert_eq!(
            record.visits[0].source_address.as_deref(),
            Some("198.51.100.7")
        );
    }

    #[tokio::test]
    async fn test_redeem_invalid_token_records_nothing() {
        let svc = service("k1");
        let foreign = service("k2").issue("dave").unwrap();

        let err = svc.redeem(&foreign.token, VisitEvent::now()).await.unwrap_err();
        assert!(matches!(err, LinktrackError::BadSignature(_)));

        let err = svc.redeem("%%%", VisitEvent::now()).await.unwrap_err();
        assert!(matches!(err, LinktrackError::MalformedToken(_)));

        assert!(svc.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_missing_is_not_found() {
        let svc = service("k1");
        assert!(matches!(
            svc.find("ghost").await,
            Err(LinktrackError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_clear_all() {
        let svc = service("k1");
        for name in ["a", "b", "c"] {
            let token = svc.issue(name).unwrap().token;
            svc.redeem(&token, VisitEvent::now()).await.unwrap();
        }
        assert_eq!(svc.clear_all().await.unwrap(), 3);
        assert!(svc.list_all().await.unwrap().is_empty());
    }
}
