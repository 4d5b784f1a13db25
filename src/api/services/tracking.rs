//! 令牌兑换路由
//!
//! 成功时记录访问并 302 到配置的跳转地址；格式错误与签名错误返回同一个 403。

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::error;

use crate::api::ApiSettings;
use crate::ledger::VisitEvent;
use crate::services::TrackingService;
use crate::utils::source_address;

pub struct TrackingRedirect;

impl TrackingRedirect {
    pub async fn handle(
        req: HttpRequest,
        path: web::Path<String>,
        service: web::Data<Arc<TrackingService>>,
        settings: web::Data<ApiSettings>,
    ) -> HttpResponse {
        let token = path.into_inner();
        let event = Self::visit_event(&req);

        match service.redeem(&token, event).await {
            Ok(_) => HttpResponse::Found()
                .insert_header(("Location", settings.redirect_url.as_str()))
                .insert_header(("Cache-Control", "no-store"))
                .finish(),
            Err(e) if e.is_redemption_failure() => Self::forbidden_response(),
            Err(e) => {
                error!("Ledger error during redemption: {}", e);
                Self::error_response()
            }
        }
    }

    /// 从请求上下文采集访问事件
    fn visit_event(req: &HttpRequest) -> VisitEvent {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(String::from)
        };

        let mut event = VisitEvent::now();
        event.source_address = source_address(req);
        event.user_agent = header("user-agent");
        event.host = header("host");
        event.referer = header("referer").or_else(|| header("referrer"));
        event
    }

    #[inline]
    fn forbidden_response() -> HttpResponse {
        HttpResponse::build(StatusCode::FORBIDDEN)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .insert_header(("Cache-Control", "no-store"))
            .body("Invalid tracking link")
    }

    #[inline]
    fn error_response() -> HttpResponse {
        HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body("Internal Server Error")
    }
}

/// 兑换路由，挂在 `routes.tracking_prefix` 下
pub fn tracking_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{token}", web::get().to(TrackingRedirect::handle))
        .route("/{token}", web::head().to(TrackingRedirect::handle));
}
