use sea_orm::ActiveValue::{NotSet, Set};

use crate::ledger::{LedgerRecord, VisitEvent};
use migration::entities::{identity_visit, tracked_identity};

/// 访问事件 → 待插入的行
pub fn visit_to_active_model(identity_id: i64, event: &VisitEvent) -> identity_visit::ActiveModel {
    identity_visit::ActiveModel {
        id: NotSet,
        identity_id: Set(identity_id),
        occurred_at: Set(event.occurred_at),
        source_address: Set(event.source_address.clone()),
        user_agent: Set(event.user_agent.clone()),
        host: Set(event.host.clone()),
        referer: Set(event.referer.clone()),
    }
}

pub fn model_to_visit(model: identity_visit::Model) -> VisitEvent {
    VisitEvent {
        occurred_at: model.occurred_at,
        source_address: model.source_address,
        user_agent: model.user_agent,
        host: model.host,
        referer: model.referer,
    }
}

pub fn model_to_record(
    owner: tracked_identity::Model,
    visits: Vec<identity_visit::Model>,
) -> LedgerRecord {
    LedgerRecord {
        identity: owner.identity,
        visits: visits.into_iter().map(model_to_visit).collect(),
        created_at: owner.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_visit_round_trip_through_model() {
        let event = VisitEvent {
            occurred_at: Utc::now(),
            source_address: Some("203.0.113.9".to_string()),
            user_agent: Some("curl/8.0".to_string()),
            host: Some("t.example.com".to_string()),
            referer: None,
        };

        let active = visit_to_active_model(7, &event);
        assert_eq!(active.identity_id, Set(7));

        let model = identity_visit::Model {
            id: 1,
            identity_id: 7,
            occurred_at: event.occurred_at,
            source_address: event.source_address.clone(),
            user_agent: event.user_agent.clone(),
            host: event.host.clone(),
            referer: None,
        };
        assert_eq!(model_to_visit(model), event);
    }
}
