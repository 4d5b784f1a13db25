//! 账本查询与清空

use std::sync::Arc;

use actix_web::{Responder, web};
use tracing::warn;

use crate::services::TrackingService;

use super::helpers::api_result;
use super::types::{ClearResponse, UserRecordResponse};

/// GET /users
pub async fn list_users(service: web::Data<Arc<TrackingService>>) -> impl Responder {
    let result = service.list_all().await.map(|records| {
        records
            .into_iter()
            .map(UserRecordResponse::from)
            .collect::<Vec<_>>()
    });
    api_result(result)
}

/// GET /users/{identity}
pub async fn get_user(
    path: web::Path<String>,
    service: web::Data<Arc<TrackingService>>,
) -> impl Responder {
    let identity = path.into_inner();
    api_result(service.find(&identity).await.map(UserRecordResponse::from))
}

/// DELETE /users
pub async fn clear_users(service: web::Data<Arc<TrackingService>>) -> impl Responder {
    warn!("Admin API: clearing all ledger records");
    api_result(
        service
            .clear_all()
            .await
            .map(|deleted| ClearResponse { deleted }),
    )
}
