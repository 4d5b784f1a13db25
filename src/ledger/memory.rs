//! 内存账本
//!
//! - 记录保存在分片的 DashMap 中，同一标识的追加在分片锁内完成，不同分片互不阻塞
//! - 清空闸门：追加与读取持共享锁，清空持独占锁，清空不会与追加交错

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::RwLock;
use tracing::{debug, trace};

use super::{ClickLedger, LedgerRecord, VisitEvent};
use crate::errors::Result;
use crate::token::Identity;

struct Slot {
    /// 创建顺序，用于创建时间相同时的排序
    seq: u64,
    record: LedgerRecord,
}

pub struct MemoryLedger {
    records: DashMap<String, Slot>,
    gate: RwLock<()>,
    next_seq: AtomicU64,
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            gate: RwLock::new(()),
            next_seq: AtomicU64::new(0),
        }
    }

    fn append(&self, identity: &Identity, event: VisitEvent) -> usize {
        let _gate = self.gate.read();

        match self.records.entry(identity.as_str().to_string()) {
            Entry::Occupied(mut slot) => {
                let visits = &mut slot.get_mut().record.visits;
                visits.push(event);
                visits.len()
            }
            Entry::Vacant(slot) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                slot.insert(Slot {
                    seq,
                    record: LedgerRecord {
                        identity: identity.as_str().to_string(),
                        visits: vec![event],
                        created_at: Utc::now(),
                    },
                });
                1
            }
        }
    }

    fn snapshot(&self) -> Vec<LedgerRecord> {
        let _gate = self.gate.read();

        let mut slots: Vec<(u64, LedgerRecord)> = self
            .records
            .iter()
            .map(|entry| (entry.seq, entry.record.clone()))
            .collect();

        // 创建时间倒序，时间相同则后创建的在前
        slots.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| seq_b.cmp(seq_a))
        });

        slots.into_iter().map(|(_, record)| record).collect()
    }

    fn get(&self, identity: &Identity) -> Option<LedgerRecord> {
        let _gate = self.gate.read();
        self.records
            .get(identity.as_str())
            .map(|slot| slot.record.clone())
    }

    fn len(&self) -> u64 {
        let _gate = self.gate.read();
        self.records.len() as u64
    }

    fn clear(&self) -> u64 {
        let _gate = self.gate.write();
        let removed = self.records.len() as u64;
        self.records.clear();
        removed
    }
}

#[async_trait]
impl ClickLedger for MemoryLedger {
    async fn record_visit(&self, identity: &Identity, event: VisitEvent) -> Result<()> {
        let total = self.append(identity, event);
        trace!("MemoryLedger: visit appended, total visits: {}", total);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<LedgerRecord>> {
        Ok(self.snapshot())
    }

    async fn find(&self, identity: &Identity) -> Result<Option<LedgerRecord>> {
        Ok(self.get(identity))
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.len())
    }

    async fn clear_all(&self) -> Result<u64> {
        let removed = self.clear();
        debug!("MemoryLedger cleared, {} records removed", removed);
        Ok(removed)
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn id(s: &str) -> Identity {
        Identity::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_first_visit_creates_record() {
        let ledger = MemoryLedger::new();
        ledger.record_visit(&id("alice"), VisitEvent::now()).await.unwrap();

        let record = ledger.find(&id("alice")).await.unwrap().unwrap();
        assert_eq!(record.identity, "alice");
        assert_eq!(record.visit_count(), 1);
    }

    #[tokio::test]
    async fn test_visits_keep_insertion_order() {
        let ledger = MemoryLedger::new();
        for ua in ["first", "second", "third"] {
            let mut event = VisitEvent::now();
            event.user_agent = Some(ua.to_string());
            ledger.record_visit(&id("bob"), event).await.unwrap();
        }

        let record = ledger.find(&id("bob")).await.unwrap().unwrap();
        let agents: Vec<_> = record
            .visits
            .iter()
            .map(|v| v.user_agent.as_deref().unwrap())
            .collect();
        assert_eq!(agents, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_list_all_newest_created_first() {
        let ledger = MemoryLedger::new();
        for name in ["one", "two", "three"] {
            ledger.record_visit(&id(name), VisitEvent::now()).await.unwrap();
        }
        // 追加访问不改变记录的创建顺序
        ledger.record_visit(&id("one"), VisitEvent::now()).await.unwrap();

        let names: Vec<_> = ledger
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.identity)
            .collect();
        assert_eq!(names, vec!["three", "two", "one"]);
    }

    #[tokio::test]
    async fn test_clear_then_fresh_record() {
        let ledger = MemoryLedger::new();
        ledger.record_visit(&id("a"), VisitEvent::now()).await.unwrap();
        ledger.record_visit(&id("a"), VisitEvent::now()).await.unwrap();
        ledger.record_visit(&id("b"), VisitEvent::now()).await.unwrap();

        assert_eq!(ledger.count().await.unwrap(), 2);
        assert_eq!(ledger.clear_all().await.unwrap(), 2);
        assert_eq!(ledger.count().await.unwrap(), 0);
        assert!(ledger.list_all().await.unwrap().is_empty());
        assert_eq!(ledger.clear_all().await.unwrap(), 0);

        ledger.record_visit(&id("a"), VisitEvent::now()).await.unwrap();
        let record = ledger.find(&id("a")).await.unwrap().unwrap();
        assert_eq!(record.visit_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_appends_same_identity() {
        let ledger = Arc::new(MemoryLedger::new());
        let mut handles = Vec::new();
        for _ in 0..100 {
            let ledger = ledger.clone();
            handles.push(tokio::spawn(async move {
                ledger
                    .record_visit(&Identity::parse("hot").unwrap(), VisitEvent::now())
                    .await
            }));
        }
        for h in handles {
            h.await.unwrap().unwrap();
        }

        let record = ledger.find(&id("hot")).await.unwrap().unwrap();
        assert_eq!(record.visit_count(), 100);
        assert_eq!(ledger.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_missing() {
        let ledger = MemoryLedger::new();
        assert!(ledger.find(&id("nobody")).await.unwrap().is_none());
    }
}
