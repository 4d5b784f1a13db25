use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use tracing::{error, trace};

use crate::services::TrackingService;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize, Debug)]
pub struct HealthStorageCheck {
    pub status: String,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime_secs: i64,
    pub storage: HealthStorageCheck,
    pub response_time_ms: u128,
}

/// Health Service
///
/// 直接探测账本，不经过业务日志。
pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        service: web::Data<Arc<TrackingService>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received health check request");

        let ledger = service.ledger();
        let backend = ledger.backend_name().to_string();

        // 只查数量，不加载访问明细
        let storage =
            match tokio::time::timeout(Duration::from_secs(5), ledger.count()).await {
                Ok(Ok(count)) => {
                    trace!("Storage health check passed, {} records found", count);
                    HealthStorageCheck {
                        status: "healthy".to_string(),
                        backend,
                        records: Some(count),
                        error: None,
                    }
                }
                Ok(Err(e)) => {
                    error!("Storage health check failed: {}", e);
                    HealthStorageCheck {
                        status: "unhealthy".to_string(),
                        backend,
                        records: None,
                        error: Some(e.public_message().to_string()),
                    }
                }
                Err(_) => {
                    error!("Storage health check timeout");
                    HealthStorageCheck {
                        status: "unhealthy".to_string(),
                        backend,
                        records: None,
                        error: Some("timeout".to_string()),
                    }
                }
            };

        let now = chrono::Utc::now();
        let healthy = storage.status == "healthy";
        let response = HealthResponse {
            status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
            timestamp: now.to_rfc3339(),
            uptime_secs: (now - app_start_time.start_datetime).num_seconds(),
            storage,
            response_time_ms: start_time.elapsed().as_millis(),
        };

        let status = if healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        HttpResponse::build(status).json(response)
    }
}

pub fn health_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check));
}
