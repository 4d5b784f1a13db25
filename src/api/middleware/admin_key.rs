//! 管理密钥校验
//!
//! 密钥来源（按优先级）：
//! 1. `Authorization: Bearer <key>`
//! 2. 查询参数 `key`

use actix_web::{
    Error, HttpResponse,
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::Method,
    middleware::Next,
    web,
};
use tracing::{info, trace};

use crate::api::services::admin::{ErrorCode, error_response};
use crate::api::ApiSettings;
use crate::token::constant_time_str_eq;

/// 从 Authorization header 提取 Bearer token
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
}

/// 从查询字符串提取 `key`
fn extract_query_key(req: &ServiceRequest) -> Option<String> {
    url::form_urlencoded::parse(req.query_string().as_bytes())
        .find(|(name, _)| name == "key")
        .map(|(_, value)| value.into_owned())
}

fn forbidden<B>(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
    req.into_response(
        error_response(
            actix_web::http::StatusCode::FORBIDDEN,
            ErrorCode::Forbidden,
            "Unauthorized",
        )
        .map_into_right_body(),
    )
}

/// 管理接口守卫，配合 `actix_web::middleware::from_fn` 使用
pub async fn admin_key_guard<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error>
where
    B: MessageBody + 'static,
{
    // CORS 预检直接放行
    if req.method() == Method::OPTIONS {
        return Ok(req.into_response(HttpResponse::NoContent().finish().map_into_right_body()));
    }

    let Some(settings) = req.app_data::<web::Data<ApiSettings>>().cloned() else {
        info!("Admin settings missing from app data - rejecting request");
        return Ok(forbidden(req));
    };

    let provided = extract_bearer_token(&req).or_else(|| extract_query_key(&req));
    let authorized = provided
        .as_deref()
        .is_some_and(|key| constant_time_str_eq(key, settings.admin_key()));

    if !authorized {
        info!("Admin authentication failed - invalid or missing key");
        return Ok(forbidden(req));
    }

    trace!("Admin key accepted");
    next.call(req).await.map(ServiceResponse::map_into_left_body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, http::StatusCode, middleware::from_fn, test};

    use crate::config::StaticConfig;

    fn settings() -> ApiSettings {
        let mut config = StaticConfig::default();
        config.tracking.secret_key = "s3cret".to_string();
        config.tracking.admin_key = Some("adm1n".to_string());
        ApiSettings::from_config(&config)
    }

    async fn ok_handler() -> HttpResponse {
        HttpResponse::Ok().body("ok")
    }

    #[actix_rt::test]
    async fn test_guard_accepts_query_and_bearer() {
        let app = test::init_service(
            App::new().app_data(web::Data::new(settings())).service(
                web::scope("/admin")
                    .wrap(from_fn(admin_key_guard))
                    .route("/ping", web::get().to(ok_handler)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/admin/ping?key=adm1n")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/admin/ping")
            .insert_header(("Authorization", "Bearer adm1n"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_rt::test]
    async fn test_guard_rejects_missing_or_wrong_key() {
        let app = test::init_service(
            App::new().app_data(web::Data::new(settings())).service(
                web::scope("/admin")
                    .wrap(from_fn(admin_key_guard))
                    .route("/ping", web::get().to(ok_handler)),
            ),
        )
        .await;

        for uri in ["/admin/ping", "/admin/ping?key=wrong", "/admin/ping?key=s3cret"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            assert_eq!(
                test::call_service(&app, req).await.status(),
                StatusCode::FORBIDDEN,
                "uri: {}",
                uri
            );
        }
    }
}
